use std::io::Cursor;

use skyseat_cli::{AppState, Cli, Console};
use skyseat_core::{SeatId, SeatStatus};
use skyseat_store::app_config::{BookingConfig, StorageConfig};
use skyseat_store::{Config, StorageBackend};

fn config(backend: StorageBackend, url: &str) -> Config {
    Config {
        storage: StorageConfig {
            backend,
            database_url: url.to_string(),
            max_connections: 1,
        },
        booking: BookingConfig {
            max_reference_attempts: 16,
        },
    }
}

async fn run_script(app: &mut AppState, script: &str) -> String {
    run_bytes(app, script.as_bytes()).await
}

async fn run_bytes(app: &mut AppState, script: &[u8]) -> String {
    let mut console = Console::new(Cursor::new(script.to_vec()), Vec::new());
    console.run(&mut app.ledger).await.unwrap();
    String::from_utf8(console.into_output()).unwrap()
}

#[tokio::test]
async fn test_book_check_and_free_session() {
    let mut app = AppState::bootstrap(&config(StorageBackend::Memory, "")).await.unwrap();
    assert!(!app.is_persistent());

    let out = run_script(
        &mut app,
        "2\n1a\nX1234567\nAda\nLovelace\n1\n1A\n3\n1A\n1\n1a\n5\n",
    )
    .await;

    assert!(out.contains("Seat 1A has been successfully booked. Booking reference: "));
    assert!(out.contains("Seat 1A is already booked (reference "));
    assert!(out.contains("Seat 1A has been freed and is now available."));
    assert!(out.contains("Seat 1A is free and available for booking."));
    assert!(out.ends_with("Exiting the program. Goodbye!\n"));
    assert_eq!(app.ledger.query(&SeatId::new(1, 'A')).unwrap(), SeatStatus::Free);
}

#[tokio::test]
async fn test_invalid_input_keeps_session_alive() {
    let mut app = AppState::bootstrap(&config(StorageBackend::Memory, "")).await.unwrap();

    let out = run_script(&mut app, "9\nabc\n1\n99Z\n1\nA1\n2\n77D\n3\n5C\n5\n").await;

    assert_eq!(out.matches("Invalid choice. Please select a valid option (1-5).").count(), 2);
    assert!(out.contains("Invalid seat number. Please try again."));
    assert!(out.contains("Invalid input: 'A1' must start with a row number. Please try again."));
    assert!(out.contains("Seat 77D is a storage area and cannot be booked."));
    assert!(out.contains("Seat 5C is already free."));
    assert!(out.contains("Goodbye!"));
}

#[tokio::test]
async fn test_non_utf8_input_is_rejected_and_session_continues() {
    let mut app = AppState::bootstrap(&config(StorageBackend::Memory, "")).await.unwrap();

    let out = run_bytes(
        &mut app,
        b"\xff\n1\n\xff\xfeA\n2\n1A\nP1\nAda\nLovelace\n5\n",
    )
    .await;

    assert!(out.contains("Invalid choice. Please select a valid option (1-5)."));
    assert!(out.contains("must start with a row number. Please try again."));
    assert!(out.contains("Seat 1A has been successfully booked."));
    assert!(out.ends_with("Exiting the program. Goodbye!\n"));
    assert!(app.ledger.query(&SeatId::new(1, 'A')).unwrap().reference().is_some());
}

#[tokio::test]
async fn test_blank_passenger_fields_are_reprompted() {
    let mut app = AppState::bootstrap(&config(StorageBackend::Memory, "")).await.unwrap();

    let out = run_script(&mut app, "2\n10F\n\nP1\n  \nGrace\nHopper\n5\n").await;

    assert!(out.contains("Invalid input: passport number must not be empty."));
    assert!(out.contains("Invalid input: first name must not be empty."));
    assert!(out.contains("Seat 10F has been successfully booked."));
    assert!(app.ledger.query(&SeatId::new(10, 'F')).unwrap().reference().is_some());
}

#[tokio::test]
async fn test_status_submenu() {
    let mut app = AppState::bootstrap(&config(StorageBackend::Memory, "")).await.unwrap();

    let out = run_script(&mut app, "4\n8\nx\n12\n9\n5\n").await;

    assert!(out.contains("8. Rows 71-80"));
    assert!(out.contains("9. Return to main menu"));
    assert!(out.contains("--- Booking Status (Rows 71-80) ---"));
    assert!(out.contains("77D(S)  77E(S)  77F(S)"));
    assert!(out.contains("Invalid input. Please enter a number between 1 and 9."));
    assert!(out.contains("Invalid choice. Please select a number between 1 and 9."));
    assert!(out.contains("Goodbye!"));
}

#[tokio::test]
async fn test_end_of_input_exits_cleanly() {
    let mut app = AppState::bootstrap(&config(StorageBackend::Memory, "")).await.unwrap();

    let out = run_script(&mut app, "2\n3B\nP1\n").await;

    assert!(!out.contains("successfully booked"));
    assert!(app.ledger.query(&SeatId::new(3, 'B')).unwrap().is_free());
}

#[tokio::test]
async fn test_sqlite_bootstrap_and_shutdown() {
    let mut app = AppState::bootstrap(&config(StorageBackend::Sqlite, "sqlite::memory:"))
        .await
        .unwrap();
    assert!(app.is_persistent());

    let out = run_script(&mut app, "2\n40E\nP9\nDorothy\nVaughan\n5\n").await;
    assert!(out.contains("Seat 40E has been successfully booked."));
    assert_eq!(app.ledger.summary().booked, 1);

    app.shutdown().await;
}

#[test]
fn test_cli_flags_override_config() {
    let base = config(StorageBackend::Sqlite, "sqlite://seating.db");

    let cli = Cli { database_url: None, in_memory: true };
    assert_eq!(cli.apply(base.clone()).storage.backend, StorageBackend::Memory);

    let cli = Cli {
        database_url: Some("sqlite://elsewhere.db".into()),
        in_memory: false,
    };
    let applied = cli.apply(base);
    assert_eq!(applied.storage.database_url, "sqlite://elsewhere.db");
    assert_eq!(applied.storage.backend, StorageBackend::Sqlite);
}
