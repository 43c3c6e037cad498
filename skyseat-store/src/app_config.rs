use serde::Deserialize;
use std::env;
use std::path::Path;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub storage: StorageConfig,
    pub booking: BookingConfig,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Sqlite,
    Memory,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub database_url: String,
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BookingConfig {
    pub max_reference_attempts: u32,
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());
        Self::load_from(
            Path::new("config"),
            &run_mode,
            config::Environment::with_prefix("SKYSEAT").separator("__"),
        )
    }

    pub fn load_from(
        dir: &Path,
        run_mode: &str,
        environment: config::Environment,
    ) -> Result<Self, config::ConfigError> {
        let file = |name: &str| {
            config::File::with_name(&dir.join(name).to_string_lossy()).required(false)
        };

        let s = config::Config::builder()
            // Built-in defaults, so a bare binary runs without any config directory
            .set_default("storage.backend", "sqlite")?
            .set_default("storage.database_url", "sqlite://seating.db")?
            .set_default("storage.max_connections", 1)?
            .set_default("booking.max_reference_attempts", 64)?
            .add_source(file("default"))
            // Per-environment overrides, e.g. config/test.toml
            .add_source(file(run_mode))
            // Not checked in
            .add_source(file("local"))
            // Eg.. `SKYSEAT__STORAGE__BACKEND=memory`
            .add_source(environment)
            .build()?;

        s.try_deserialize()
    }
}
