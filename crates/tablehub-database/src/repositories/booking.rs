//! Booking repository implementation.

use chrono::NaiveDate;
use sqlx::PgPool;
use tracing::debug;

use tablehub_core::error::{AppError, ErrorKind};
use tablehub_core::result::AppResult;
use tablehub_core::types::id::{BookingId, TableId, VenueId};
use tablehub_entity::booking::Booking;

/// SQLSTATE for a violated exclusion constraint.
const EXCLUSION_VIOLATION: &str = "23P01";

/// Select clause assembling a booking together with its occupied tables,
/// primary table first.
const SELECT_BOOKING: &str = "SELECT b.id, b.venue_id, \
        COALESCE(array_agg(bt.table_id ORDER BY bt.position) \
                 FILTER (WHERE bt.table_id IS NOT NULL), ARRAY[]::BIGINT[]) AS table_ids, \
        b.guest_name, b.guest_email, b.guest_phone, b.party_size, b.booking_date, \
        b.start_time, b.duration_minutes, b.status, b.is_unallocated, \
        b.created_at, b.updated_at \
     FROM bookings b LEFT JOIN booking_tables bt ON bt.booking_id = b.id";

/// Repository for booking queries and allocation writes.
#[derive(Debug, Clone)]
pub struct BookingRepository {
    pool: PgPool,
    /// Interval length assumed for bookings without an explicit duration.
    default_duration_minutes: i32,
}

impl BookingRepository {
    /// Create a new booking repository.
    pub fn new(pool: PgPool, default_duration_minutes: u32) -> Self {
        Self {
            pool,
            default_duration_minutes: default_duration_minutes as i32,
        }
    }

    /// Find a booking by ID.
    pub async fn find_by_id(&self, id: BookingId) -> AppResult<Option<Booking>> {
        sqlx::query_as::<_, Booking>(&format!("{SELECT_BOOKING} WHERE b.id = $1 GROUP BY b.id"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find booking", e))
    }

    /// List bookings occupying tables on a date: everything except
    /// cancelled and finished.
    pub async fn list_active_for_date(
        &self,
        venue_id: VenueId,
        date: NaiveDate,
    ) -> AppResult<Vec<Booking>> {
        sqlx::query_as::<_, Booking>(&format!(
            "{SELECT_BOOKING} \
             WHERE b.venue_id = $1 AND b.booking_date = $2 \
               AND b.status NOT IN ('cancelled', 'finished') \
             GROUP BY b.id ORDER BY b.start_time ASC"
        ))
        .bind(venue_id)
        .bind(date)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list bookings", e))
    }

    /// Persist a table assignment, or clear it when `table_ids` is `None`.
    ///
    /// The whole write runs in one transaction: prior occupancy rows are
    /// dropped, the new set is inserted, and the booking row is updated.
    /// An exclusion-constraint violation means another booking claimed one
    /// of the tables for an overlapping interval since the caller's
    /// occupancy read; the transaction rolls back and the caller sees
    /// `ErrorKind::Conflict`.
    pub async fn write_allocation(
        &self,
        booking_id: BookingId,
        table_ids: Option<&[TableId]>,
        is_unallocated: bool,
    ) -> AppResult<()> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let row: Option<(NaiveDate, i32, Option<i32>)> = sqlx::query_as(
            "SELECT booking_date, start_time, duration_minutes \
             FROM bookings WHERE id = $1 FOR UPDATE",
        )
        .bind(booking_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to load booking", e))?;

        let Some((booking_date, start_time, duration_minutes)) = row else {
            return Err(AppError::not_found(format!(
                "Booking {booking_id} not found"
            )));
        };

        sqlx::query("DELETE FROM booking_tables WHERE booking_id = $1")
            .bind(booking_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to clear occupancy rows", e)
            })?;

        if let Some(table_ids) = table_ids {
            let end_time = start_time + duration_minutes.unwrap_or(self.default_duration_minutes);
            for (position, table_id) in table_ids.iter().enumerate() {
                sqlx::query(
                    "INSERT INTO booking_tables \
                         (booking_id, table_id, booking_date, position, during) \
                     VALUES ($1, $2, $3, $4, int4range($5, $6))",
                )
                .bind(booking_id)
                .bind(table_id)
                .bind(booking_date)
                .bind(position as i32)
                .bind(start_time)
                .bind(end_time)
                .execute(&mut *tx)
                .await
                .map_err(|e| map_occupancy_write_error(*table_id, e))?;
            }
        }

        sqlx::query("UPDATE bookings SET is_unallocated = $2, updated_at = NOW() WHERE id = $1")
            .bind(booking_id)
            .bind(is_unallocated)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to update booking", e)
            })?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit allocation", e)
        })?;

        debug!(
            booking_id = %booking_id,
            tables = table_ids.map(<[TableId]>::len).unwrap_or(0),
            is_unallocated,
            "Allocation written"
        );
        Ok(())
    }
}

/// Map an occupancy insert failure, distinguishing the exclusion
/// constraint (another booking claimed the table) from plain database
/// errors.
fn map_occupancy_write_error(table_id: TableId, err: sqlx::Error) -> AppError {
    let is_exclusion = err
        .as_database_error()
        .and_then(|db| db.code())
        .is_some_and(|code| code == EXCLUSION_VIOLATION);
    if is_exclusion {
        AppError::conflict(format!(
            "Table {table_id} was claimed by another booking for an overlapping interval"
        ))
    } else {
        AppError::with_source(ErrorKind::Database, "Failed to write occupancy row", err)
    }
}
