pub mod seat;
pub mod layout;
pub mod seat_map;
pub mod booking;
pub mod reference;
pub mod repository;
pub mod memory_repo;
pub mod ledger;
pub mod render;

pub use seat::{SeatId, SeatStatus, Section};
pub use layout::SeatLayout;
pub use seat_map::{OccupancySummary, SeatMap};
pub use booking::{BookingRecord, BookingReference, PassengerDetails};
pub use reference::ReferenceGenerator;
pub use repository::{BookingRepository, RepositoryError};
pub use memory_repo::InMemoryBookingRepository;
pub use ledger::SeatLedger;
pub use render::{RowWindow, StatusGrid};

#[derive(Debug, thiserror::Error)]
pub enum SeatingError {
    #[error("Seat {0} does not exist on this aircraft")]
    NotFound(SeatId),
    #[error("Seat {seat} {reason}")]
    InvalidState { seat: SeatId, reason: String },
    #[error("Booking conflict: {0}")]
    Conflict(String),
    #[error("Invalid input: {0}")]
    Input(String),
    #[error("Could not generate a unique booking reference after {attempts} attempts")]
    GenerationExhausted { attempts: u32 },
    #[error("Persistence failure: {0}")]
    Persistence(#[source] RepositoryError),
}

pub type SeatingResult<T> = Result<T, SeatingError>;
