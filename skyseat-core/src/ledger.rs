use std::sync::Arc;
use tracing::{error, info, warn};

use crate::booking::{BookingRecord, BookingReference, PassengerDetails};
use crate::layout::SeatLayout;
use crate::reference::ReferenceGenerator;
use crate::render::{RowWindow, StatusGrid};
use crate::repository::{BookingRepository, RepositoryError};
use crate::seat::{SeatId, SeatStatus};
use crate::seat_map::{OccupancySummary, SeatMap};
use crate::{SeatingError, SeatingResult};

/// Seat map kept in step with the booking store.
///
/// Only obtainable through [`SeatLedger::open`], which reconciles persisted
/// bookings before returning, so no mutation can run against a stale map.
pub struct SeatLedger {
    seats: SeatMap,
    repository: Arc<dyn BookingRepository>,
    references: ReferenceGenerator,
}

impl SeatLedger {
    pub async fn open(
        layout: SeatLayout,
        repository: Arc<dyn BookingRepository>,
        references: ReferenceGenerator,
    ) -> SeatingResult<Self> {
        let mut seats = SeatMap::initialize(layout);
        let records = repository
            .list_bookings()
            .await
            .map_err(SeatingError::Persistence)?;
        let restored = seats.reconcile(&records);

        info!(
            "Seat ledger ready: {} seats, {} bookings restored",
            seats.len(),
            restored
        );

        Ok(Self {
            seats,
            repository,
            references,
        })
    }

    pub fn seat_map(&self) -> &SeatMap {
        &self.seats
    }

    pub fn layout(&self) -> &SeatLayout {
        self.seats.layout()
    }

    pub fn query(&self, seat: &SeatId) -> SeatingResult<SeatStatus> {
        self.seats.require(seat).cloned()
    }

    /// Book a free seat and persist the booking. The seat is put back to free
    /// if the store rejects the record.
    pub async fn book(
        &mut self,
        seat: &SeatId,
        passenger: PassengerDetails,
    ) -> SeatingResult<BookingReference> {
        self.seats.ensure_bookable(seat)?;

        let reference = self
            .references
            .generate_unique(self.repository.as_ref())
            .await?;
        self.seats.assign(seat, reference.clone())?;

        let record = BookingRecord::new(reference.clone(), passenger, *seat);
        if let Err(err) = self.repository.insert_booking(&record).await {
            if let Err(rollback) = self.seats.release(seat) {
                error!("Rollback of seat {} failed: {}", seat, rollback);
            }
            warn!("Booking of seat {} rolled back: {}", seat, err);

            return Err(match err {
                RepositoryError::Conflict(msg) => SeatingError::Conflict(msg),
                other => SeatingError::Persistence(other),
            });
        }

        info!("Seat {} booked under reference {}", seat, reference);
        Ok(reference)
    }

    /// Free a booked seat and delete its record. Returns the released reference.
    pub async fn free(&mut self, seat: &SeatId) -> SeatingResult<BookingReference> {
        let reference = self.seats.ensure_booked(seat)?.clone();

        let removed = self
            .repository
            .delete_booking(reference.as_str())
            .await
            .map_err(SeatingError::Persistence)?;
        if !removed {
            warn!(
                "No stored record for reference {}, freeing seat {} anyway",
                reference, seat
            );
        }

        self.seats.release(seat)?;
        info!("Seat {} freed (reference {})", seat, reference);
        Ok(reference)
    }

    pub fn render(&self, window: RowWindow) -> StatusGrid {
        StatusGrid::build(&self.seats, window)
    }

    pub fn summary(&self) -> OccupancySummary {
        self.seats.summary()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory_repo::InMemoryBookingRepository;
    use async_trait::async_trait;

    /// Store that accepts lookups but refuses every insert.
    struct RejectingRepository {
        conflict: bool,
    }

    #[async_trait]
    impl BookingRepository for RejectingRepository {
        async fn list_bookings(&self) -> Result<Vec<BookingRecord>, RepositoryError> {
            Ok(Vec::new())
        }

        async fn reference_exists(&self, _reference: &str) -> Result<bool, RepositoryError> {
            Ok(false)
        }

        async fn insert_booking(&self, record: &BookingRecord) -> Result<(), RepositoryError> {
            if self.conflict {
                Err(RepositoryError::Conflict(format!("seat {} is already recorded", record.seat)))
            } else {
                Err(RepositoryError::Backend("disk unplugged".into()))
            }
        }

        async fn delete_booking(&self, _reference: &str) -> Result<bool, RepositoryError> {
            Ok(false)
        }
    }

    /// Store where every reference looks taken.
    struct SaturatedRepository;

    #[async_trait]
    impl BookingRepository for SaturatedRepository {
        async fn list_bookings(&self) -> Result<Vec<BookingRecord>, RepositoryError> {
            Ok(Vec::new())
        }

        async fn reference_exists(&self, _reference: &str) -> Result<bool, RepositoryError> {
            Ok(true)
        }

        async fn insert_booking(&self, _record: &BookingRecord) -> Result<(), RepositoryError> {
            Ok(())
        }

        async fn delete_booking(&self, _reference: &str) -> Result<bool, RepositoryError> {
            Ok(false)
        }
    }

    fn passenger() -> PassengerDetails {
        PassengerDetails::new("X9876543", "Katherine", "Johnson").unwrap()
    }

    #[tokio::test]
    async fn test_conflict_rolls_seat_back_to_free() {
        let repo = Arc::new(RejectingRepository { conflict: true });
        let mut ledger = SeatLedger::open(SeatLayout::standard(), repo, ReferenceGenerator::seeded(3, 8))
            .await
            .unwrap();
        let seat = SeatId::new(5, 'C');

        let err = ledger.book(&seat, passenger()).await.unwrap_err();
        assert!(matches!(err, SeatingError::Conflict(_)));
        assert_eq!(ledger.query(&seat).unwrap(), SeatStatus::Free);
    }

    #[tokio::test]
    async fn test_backend_failure_rolls_seat_back_to_free() {
        let repo = Arc::new(RejectingRepository { conflict: false });
        let mut ledger = SeatLedger::open(SeatLayout::standard(), repo, ReferenceGenerator::seeded(3, 8))
            .await
            .unwrap();
        let seat = SeatId::new(6, 'D');

        let err = ledger.book(&seat, passenger()).await.unwrap_err();
        assert!(matches!(err, SeatingError::Persistence(RepositoryError::Backend(_))));
        assert_eq!(ledger.query(&seat).unwrap(), SeatStatus::Free);
    }

    #[tokio::test]
    async fn test_generation_exhausted_leaves_seat_free() {
        let mut ledger = SeatLedger::open(
            SeatLayout::standard(),
            Arc::new(SaturatedRepository),
            ReferenceGenerator::seeded(11, 4),
        )
        .await
        .unwrap();
        let seat = SeatId::new(1, 'A');

        let err = ledger.book(&seat, passenger()).await.unwrap_err();
        assert!(matches!(err, SeatingError::GenerationExhausted { attempts: 4 }));
        assert!(ledger.query(&seat).unwrap().is_free());
    }

    #[tokio::test]
    async fn test_invalid_seat_never_reaches_the_store() {
        let repo = Arc::new(InMemoryBookingRepository::new());
        let mut ledger = SeatLedger::open(SeatLayout::standard(), repo.clone(), ReferenceGenerator::default())
            .await
            .unwrap();

        let err = ledger.book(&SeatId::new(78, 'E'), passenger()).await.unwrap_err();
        assert!(matches!(err, SeatingError::InvalidState { .. }));

        let err = ledger.book(&SeatId::new(81, 'A'), passenger()).await.unwrap_err();
        assert!(matches!(err, SeatingError::NotFound(_)));

        assert!(repo.is_empty().await);
    }
}
