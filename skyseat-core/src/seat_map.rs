use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, warn};

use crate::booking::{BookingRecord, BookingReference};
use crate::layout::SeatLayout;
use crate::seat::{SeatId, SeatStatus};
use crate::{SeatingError, SeatingResult};

/// Seat counts by status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OccupancySummary {
    pub free: usize,
    pub booked: usize,
    pub storage: usize,
}

impl OccupancySummary {
    pub fn bookable(&self) -> usize {
        self.free + self.booked
    }

    /// Share of bookable seats that are booked, 0.0 to 1.0.
    pub fn utilization(&self) -> f64 {
        if self.bookable() == 0 {
            0.0
        } else {
            self.booked as f64 / self.bookable() as f64
        }
    }
}

/// In-memory seat-to-status map. Holds no persistence handle; the ledger
/// drives it and keeps the store in step.
#[derive(Debug, Clone)]
pub struct SeatMap {
    layout: SeatLayout,
    seats: HashMap<SeatId, SeatStatus>,
}

#[allow(clippy::len_without_is_empty)]
impl SeatMap {
    /// Populate every seat of the layout with its initial status.
    pub fn initialize(layout: SeatLayout) -> Self {
        let seats = layout
            .seats()
            .filter_map(|seat| layout.initial_status(&seat).map(|status| (seat, status)))
            .collect();
        Self { layout, seats }
    }

    pub fn layout(&self) -> &SeatLayout {
        &self.layout
    }

    pub fn len(&self) -> usize {
        self.seats.len()
    }

    pub fn status(&self, seat: &SeatId) -> Option<&SeatStatus> {
        self.seats.get(seat)
    }

    /// Like `status`, but an unknown seat is an error.
    pub fn require(&self, seat: &SeatId) -> SeatingResult<&SeatStatus> {
        self.seats
            .get(seat)
            .ok_or_else(|| SeatingError::NotFound(*seat))
    }

    /// Mark persisted bookings as booked. Records for seats outside the layout,
    /// storage seats, or seats already claimed are skipped. Returns how many applied.
    pub fn reconcile(&mut self, records: &[BookingRecord]) -> usize {
        let mut applied = 0;

        for record in records {
            match self.seats.get_mut(&record.seat) {
                Some(status) if status.is_free() => {
                    *status = SeatStatus::Booked {
                        reference: record.reference.clone(),
                    };
                    applied += 1;
                }
                Some(status) => {
                    warn!(
                        "Ignoring booking {} for seat {}: seat is {:?}",
                        record.reference, record.seat, status
                    );
                }
                None => {
                    warn!(
                        "Ignoring booking {} for seat {}: not part of the layout",
                        record.reference, record.seat
                    );
                }
            }
        }

        debug!("Reconciled {} of {} persisted bookings", applied, records.len());
        applied
    }

    /// Ok when the seat can take a new booking.
    pub fn ensure_bookable(&self, seat: &SeatId) -> SeatingResult<()> {
        match self.require(seat)? {
            SeatStatus::Free => Ok(()),
            SeatStatus::Storage => Err(invalid(seat, "is a storage area and cannot be booked")),
            SeatStatus::Booked { .. } => Err(invalid(seat, "is already booked")),
        }
    }

    /// The reference a seat is booked under, or why it cannot be freed.
    pub fn ensure_booked(&self, seat: &SeatId) -> SeatingResult<&BookingReference> {
        match self.require(seat)? {
            SeatStatus::Booked { reference } => Ok(reference),
            SeatStatus::Storage => Err(invalid(seat, "is a storage area and cannot be freed")),
            SeatStatus::Free => Err(invalid(seat, "is already free")),
        }
    }

    /// Transition: Free → Booked
    pub fn assign(&mut self, seat: &SeatId, reference: BookingReference) -> SeatingResult<()> {
        self.ensure_bookable(seat)?;
        self.seats.insert(*seat, SeatStatus::Booked { reference });
        Ok(())
    }

    /// Transition: Booked → Free. Returns the reference the seat was booked under.
    pub fn release(&mut self, seat: &SeatId) -> SeatingResult<BookingReference> {
        let reference = self.ensure_booked(seat)?.clone();
        self.seats.insert(*seat, SeatStatus::Free);
        Ok(reference)
    }

    pub fn summary(&self) -> OccupancySummary {
        self.seats
            .values()
            .fold(OccupancySummary::default(), |mut acc, status| {
                match status {
                    SeatStatus::Free => acc.free += 1,
                    SeatStatus::Booked { .. } => acc.booked += 1,
                    SeatStatus::Storage => acc.storage += 1,
                }
                acc
            })
    }
}

fn invalid(seat: &SeatId, reason: &str) -> SeatingError {
    SeatingError::InvalidState {
        seat: *seat,
        reason: reason.to_string(),
    }
}
