use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::Mutex;

use crate::booking::BookingRecord;
use crate::repository::{BookingRepository, RepositoryError};

/// Process-local store used when persistence is switched off, and in tests.
#[derive(Default)]
pub struct InMemoryBookingRepository {
    records: Mutex<HashMap<String, BookingRecord>>,
}

impl InMemoryBookingRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load records as if they had been persisted by an earlier run.
    pub async fn seed(&self, records: Vec<BookingRecord>) {
        let mut guard = self.records.lock().await;
        for record in records {
            guard.insert(record.reference.as_str().to_string(), record);
        }
    }

    pub async fn len(&self) -> usize {
        self.records.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.lock().await.is_empty()
    }
}

#[async_trait]
impl BookingRepository for InMemoryBookingRepository {
    async fn list_bookings(&self) -> Result<Vec<BookingRecord>, RepositoryError> {
        let mut records: Vec<BookingRecord> = self.records.lock().await.values().cloned().collect();
        records.sort_by_key(|r| r.seat);
        Ok(records)
    }

    async fn reference_exists(&self, reference: &str) -> Result<bool, RepositoryError> {
        Ok(self.records.lock().await.contains_key(reference))
    }

    async fn insert_booking(&self, record: &BookingRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().await;

        if guard.contains_key(record.reference.as_str()) {
            return Err(RepositoryError::Conflict(format!(
                "reference {} already exists",
                record.reference
            )));
        }
        if guard.values().any(|r| r.seat == record.seat) {
            return Err(RepositoryError::Conflict(format!(
                "seat {} is already recorded",
                record.seat
            )));
        }

        guard.insert(record.reference.as_str().to_string(), record.clone());
        Ok(())
    }

    async fn delete_booking(&self, reference: &str) -> Result<bool, RepositoryError> {
        Ok(self.records.lock().await.remove(reference).is_some())
    }
}
