use anyhow::Context;
use clap::Parser;
use std::io;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use skyseat_cli::{AppState, Cli, Console};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they never interleave with the menu on stdout
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,skyseat_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();
    let config = cli.apply(skyseat_store::Config::load().context("Failed to load config")?);
    tracing::info!("Starting skyseat with {:?} storage", config.storage.backend);

    // A store that cannot be opened ends the process here
    let mut app = AppState::bootstrap(&config).await?;
    if !app.is_persistent() {
        tracing::warn!("Bookings are kept in memory and will be lost on exit");
    }

    let stdin = io::stdin();
    let mut console = Console::new(stdin.lock(), io::stdout());
    let outcome = console.run(&mut app.ledger).await;

    app.shutdown().await;
    outcome
}
