use std::ops::RangeInclusive;

use crate::seat::{SeatId, SeatStatus, Section};

/// Fixed cabin geometry: two sections sharing the same row numbers, with a
/// block of rear-section rows given over to storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeatLayout {
    pub rows: RangeInclusive<u32>,
    pub front_columns: Vec<char>,
    pub rear_columns: Vec<char>,
    pub storage_rows: Vec<u32>,
}

impl SeatLayout {
    pub const FIRST_ROW: u32 = 1;
    pub const LAST_ROW: u32 = 80;

    /// The production aircraft: rows 1-80, A-C front, D-F rear, rows 77-78 rear are storage.
    pub fn standard() -> Self {
        Self {
            rows: Self::FIRST_ROW..=Self::LAST_ROW,
            front_columns: vec!['A', 'B', 'C'],
            rear_columns: vec!['D', 'E', 'F'],
            storage_rows: vec![77, 78],
        }
    }

    pub fn columns(&self, section: Section) -> &[char] {
        match section {
            Section::Front => &self.front_columns,
            Section::Rear => &self.rear_columns,
        }
    }

    pub fn section_of(&self, column: char) -> Option<Section> {
        if self.front_columns.contains(&column) {
            Some(Section::Front)
        } else if self.rear_columns.contains(&column) {
            Some(Section::Rear)
        } else {
            None
        }
    }

    /// Status a seat starts with, or `None` when the seat is not part of the cabin.
    pub fn initial_status(&self, seat: &SeatId) -> Option<SeatStatus> {
        if !self.rows.contains(&seat.row) {
            return None;
        }
        match self.section_of(seat.column)? {
            Section::Rear if self.storage_rows.contains(&seat.row) => Some(SeatStatus::Storage),
            _ => Some(SeatStatus::Free),
        }
    }

    /// Every seat in the cabin, front section first, row by row.
    pub fn seats(&self) -> impl Iterator<Item = SeatId> + '_ {
        [Section::Front, Section::Rear]
            .into_iter()
            .flat_map(move |section| {
                self.rows.clone().flat_map(move |row| {
                    self.columns(section)
                        .iter()
                        .map(move |&column| SeatId::new(row, column))
                })
            })
    }
}

impl Default for SeatLayout {
    fn default() -> Self {
        Self::standard()
    }
}
