use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use skyseat_core::repository::{BookingRepository, RepositoryError};
use skyseat_core::{BookingRecord, BookingReference, PassengerDetails, SeatId};

pub struct SqliteBookingRepository {
    pool: SqlitePool,
}

impl SqliteBookingRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct BookingRow {
    reference: String,
    passport_number: String,
    first_name: String,
    last_name: String,
    seat_row: i64,
    seat_column: String,
    seat_id: String,
    booked_at: DateTime<Utc>,
}

impl TryFrom<BookingRow> for BookingRecord {
    type Error = RepositoryError;

    fn try_from(row: BookingRow) -> Result<Self, Self::Error> {
        let row_number = u32::try_from(row.seat_row)
            .map_err(|_| backend(format!("invalid seat row {} for {}", row.seat_row, row.reference)))?;
        let column = row
            .seat_column
            .chars()
            .next()
            .ok_or_else(|| backend(format!("missing seat column for {}", row.reference)))?;

        // seat_id carries the uniqueness constraint, so it must agree with row/column
        let seat = SeatId::new(row_number, column);
        if seat.to_string() != row.seat_id {
            return Err(backend(format!(
                "seat id {} does not match seat {} for {}",
                row.seat_id, seat, row.reference
            )));
        }

        Ok(BookingRecord {
            reference: BookingReference::from(row.reference),
            passenger: PassengerDetails {
                passport_number: row.passport_number,
                first_name: row.first_name,
                last_name: row.last_name,
            },
            seat,
            booked_at: row.booked_at,
        })
    }
}

fn backend(msg: String) -> RepositoryError {
    RepositoryError::Backend(msg.into())
}

fn map_sqlx(err: sqlx::Error) -> RepositoryError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            RepositoryError::Conflict(db.message().to_string())
        }
        _ => RepositoryError::Backend(Box::new(err)),
    }
}

#[async_trait]
impl BookingRepository for SqliteBookingRepository {
    async fn list_bookings(&self) -> Result<Vec<BookingRecord>, RepositoryError> {
        let rows = sqlx::query_as::<_, BookingRow>(
            r#"
            SELECT reference, passport_number, first_name, last_name,
                   seat_row, seat_column, seat_id, booked_at
            FROM bookings
            ORDER BY seat_row, seat_column
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;

        rows.into_iter().map(BookingRecord::try_from).collect()
    }

    async fn reference_exists(&self, reference: &str) -> Result<bool, RepositoryError> {
        let found: Option<i64> = sqlx::query_scalar("SELECT 1 FROM bookings WHERE reference = ?")
            .bind(reference)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?;

        Ok(found.is_some())
    }

    async fn insert_booking(&self, record: &BookingRecord) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO bookings (reference, passport_number, first_name, last_name,
                                  seat_row, seat_column, seat_id, booked_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(record.reference.as_str())
        .bind(&record.passenger.passport_number)
        .bind(&record.passenger.first_name)
        .bind(&record.passenger.last_name)
        .bind(i64::from(record.seat_row()))
        .bind(record.seat_column().to_string())
        .bind(record.seat.to_string())
        .bind(record.booked_at)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Ok(())
    }

    async fn delete_booking(&self, reference: &str) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM bookings WHERE reference = ?")
            .bind(reference)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;

        Ok(result.rows_affected() > 0)
    }
}
