//! Booking window repository implementation.

use sqlx::PgPool;

use tablehub_core::error::{AppError, ErrorKind};
use tablehub_core::result::AppResult;
use tablehub_core::types::id::{ServiceId, VenueId};
use tablehub_entity::window::BookingWindow;

/// Repository for booking window queries.
#[derive(Debug, Clone)]
pub struct WindowRepository {
    pool: PgPool,
}

impl WindowRepository {
    /// Create a new window repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List booking windows for a venue, optionally narrowed to one
    /// service.
    pub async fn list_for_venue(
        &self,
        venue_id: VenueId,
        service_id: Option<ServiceId>,
    ) -> AppResult<Vec<BookingWindow>> {
        match service_id {
            Some(service_id) => sqlx::query_as::<_, BookingWindow>(
                "SELECT id, venue_id, service_id, days, start_time, end_time, \
                        valid_from, valid_until, blackouts \
                 FROM booking_windows WHERE venue_id = $1 AND service_id = $2 \
                 ORDER BY start_time ASC",
            )
            .bind(venue_id)
            .bind(service_id)
            .fetch_all(&self.pool)
            .await,
            None => sqlx::query_as::<_, BookingWindow>(
                "SELECT id, venue_id, service_id, days, start_time, end_time, \
                        valid_from, valid_until, blackouts \
                 FROM booking_windows WHERE venue_id = $1 ORDER BY start_time ASC",
            )
            .bind(venue_id)
            .fetch_all(&self.pool)
            .await,
        }
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list booking windows", e)
        })
    }
}
