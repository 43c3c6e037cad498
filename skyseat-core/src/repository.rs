use async_trait::async_trait;

use crate::booking::BookingRecord;

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// A uniqueness rule (reference or seat) was violated.
    #[error("{0}")]
    Conflict(String),
    #[error(transparent)]
    Backend(Box<dyn std::error::Error + Send + Sync>),
}

/// Repository trait for booking record access
#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn list_bookings(&self) -> Result<Vec<BookingRecord>, RepositoryError>;

    async fn reference_exists(&self, reference: &str) -> Result<bool, RepositoryError>;

    /// Fails with `Conflict` when the reference or the seat is already recorded.
    async fn insert_booking(&self, record: &BookingRecord) -> Result<(), RepositoryError>;

    /// Returns whether a record was removed.
    async fn delete_booking(&self, reference: &str) -> Result<bool, RepositoryError>;
}
