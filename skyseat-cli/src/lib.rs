pub mod error;
pub mod menu;
pub mod state;

use clap::Parser;
use skyseat_store::{Config, StorageBackend};

pub use menu::Console;
pub use state::AppState;

/// Seat booking console for the fixed-layout aircraft.
#[derive(Debug, Parser)]
#[command(name = "skyseat")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// SQLite database URL, overriding `storage.database_url`.
    #[arg(long)]
    pub database_url: Option<String>,

    /// Keep bookings in memory only; nothing survives exit.
    #[arg(long)]
    pub in_memory: bool,
}

impl Cli {
    /// Layer command-line flags over the loaded configuration.
    pub fn apply(&self, mut config: Config) -> Config {
        if let Some(url) = &self.database_url {
            config.storage.database_url = url.clone();
            config.storage.backend = StorageBackend::Sqlite;
        }
        if self.in_memory {
            config.storage.backend = StorageBackend::Memory;
        }
        config
    }
}
