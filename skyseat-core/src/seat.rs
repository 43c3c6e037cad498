use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::booking::BookingReference;
use crate::SeatingError;

/// Canonical seat identifier: row number followed by an uppercase column letter.
///
/// Parsing only checks the shape (`<digits><letter>`). Whether the seat exists is
/// decided by the layout, so `99Z` parses fine and is later reported as not found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SeatId {
    pub row: u32,
    pub column: char,
}

impl SeatId {
    pub fn new(row: u32, column: char) -> Self {
        Self {
            row,
            column: column.to_ascii_uppercase(),
        }
    }

    /// Parse user input, case-insensitive and ignoring surrounding whitespace.
    pub fn parse(input: &str) -> Result<Self, SeatingError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(SeatingError::Input("seat number is empty".to_string()));
        }

        let split = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .ok_or_else(|| SeatingError::Input(format!("'{}' has no column letter", trimmed)))?;
        let (digits, rest) = trimmed.split_at(split);

        if digits.is_empty() {
            return Err(SeatingError::Input(format!("'{}' must start with a row number", trimmed)));
        }

        let mut letters = rest.chars();
        let column = match (letters.next(), letters.next()) {
            (Some(c), None) if c.is_ascii_alphabetic() => c,
            _ => {
                return Err(SeatingError::Input(format!(
                    "'{}' must end with a single column letter",
                    trimmed
                )))
            }
        };

        let row = digits
            .parse::<u32>()
            .map_err(|_| SeatingError::Input(format!("row number in '{}' is out of range", trimmed)))?;

        Ok(Self::new(row, column))
    }
}

impl fmt::Display for SeatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.row, self.column)
    }
}

impl FromStr for SeatId {
    type Err = SeatingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Cabin section a column belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Section {
    Front,
    Rear,
}

impl Section {
    pub fn label(&self) -> &'static str {
        match self {
            Section::Front => "Front",
            Section::Rear => "Rear",
        }
    }
}

/// Status of a single seat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SeatStatus {
    Free,
    Storage,
    Booked { reference: BookingReference },
}

impl SeatStatus {
    pub fn is_free(&self) -> bool {
        matches!(self, SeatStatus::Free)
    }

    pub fn is_storage(&self) -> bool {
        matches!(self, SeatStatus::Storage)
    }

    pub fn reference(&self) -> Option<&BookingReference> {
        match self {
            SeatStatus::Booked { reference } => Some(reference),
            _ => None,
        }
    }

    /// Short marker used in the status grid: `F`, `S` or the booking reference.
    pub fn marker(&self) -> &str {
        match self {
            SeatStatus::Free => "F",
            SeatStatus::Storage => "S",
            SeatStatus::Booked { reference } => reference.as_str(),
        }
    }
}
