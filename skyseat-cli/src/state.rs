use anyhow::Context;
use std::sync::Arc;
use tracing::info;

use skyseat_core::repository::BookingRepository;
use skyseat_core::{InMemoryBookingRepository, ReferenceGenerator, SeatLayout, SeatLedger};
use skyseat_store::{Config, DbClient, SqliteBookingRepository, StorageBackend};

/// Everything one session needs: the reconciled ledger and, when persisting,
/// the database handle to close on the way out.
pub struct AppState {
    pub ledger: SeatLedger,
    db: Option<DbClient>,
}

impl AppState {
    pub async fn bootstrap(config: &Config) -> anyhow::Result<Self> {
        let (repository, db): (Arc<dyn BookingRepository>, Option<DbClient>) =
            match config.storage.backend {
                StorageBackend::Sqlite => {
                    let db = DbClient::new(&config.storage.database_url, config.storage.max_connections)
                        .await
                        .with_context(|| {
                            format!("Failed to open booking database {}", config.storage.database_url)
                        })?;
                    db.migrate().await.context("Failed to run migrations")?;
                    let repository: Arc<dyn BookingRepository> =
                        Arc::new(SqliteBookingRepository::new(db.pool.clone()));
                    (repository, Some(db))
                }
                StorageBackend::Memory => {
                    info!("Persistence disabled, bookings are kept in memory");
                    let repository: Arc<dyn BookingRepository> =
                        Arc::new(InMemoryBookingRepository::new());
                    (repository, None)
                }
            };

        let references = ReferenceGenerator::new(config.booking.max_reference_attempts);
        let ledger = SeatLedger::open(SeatLayout::standard(), repository, references)
            .await
            .context("Failed to load existing bookings")?;

        Ok(Self { ledger, db })
    }

    pub fn is_persistent(&self) -> bool {
        self.db.is_some()
    }

    pub async fn shutdown(self) {
        if let Some(db) = self.db {
            db.close().await;
        }
    }
}
