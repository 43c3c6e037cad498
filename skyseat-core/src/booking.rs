use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::seat::SeatId;
use crate::SeatingError;

/// Booking reference handed to the passenger and used as the persistence key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookingReference(String);

impl BookingReference {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for BookingReference {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for BookingReference {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for BookingReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassengerDetails {
    pub passport_number: String,
    pub first_name: String,
    pub last_name: String,
}

impl PassengerDetails {
    /// Trims every field and rejects blanks.
    pub fn new(
        passport_number: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Result<Self, SeatingError> {
        Ok(Self {
            passport_number: required("passport number", passport_number.into())?,
            first_name: required("first name", first_name.into())?,
            last_name: required("last name", last_name.into())?,
        })
    }
}

fn required(field: &str, value: String) -> Result<String, SeatingError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(SeatingError::Input(format!("{} must not be empty", field)));
    }
    Ok(trimmed.to_string())
}

/// Persisted booking, one per booked seat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRecord {
    pub reference: BookingReference,
    pub passenger: PassengerDetails,
    pub seat: SeatId,
    pub booked_at: DateTime<Utc>,
}

impl BookingRecord {
    pub fn new(reference: BookingReference, passenger: PassengerDetails, seat: SeatId) -> Self {
        Self {
            reference,
            passenger,
            seat,
            booked_at: Utc::now(),
        }
    }

    pub fn seat_row(&self) -> u32 {
        self.seat.row
    }

    pub fn seat_column(&self) -> char {
        self.seat.column
    }
}
