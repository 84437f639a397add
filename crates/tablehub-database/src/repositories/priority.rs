//! Booking priority repository implementation.

use sqlx::PgPool;

use tablehub_core::error::{AppError, ErrorKind};
use tablehub_core::result::AppResult;
use tablehub_core::types::id::VenueId;
use tablehub_entity::priority::BookingPriority;

/// Repository for booking priority queries.
#[derive(Debug, Clone)]
pub struct PriorityRepository {
    pool: PgPool,
}

impl PriorityRepository {
    /// Create a new priority repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List priority rules matching an exact party size, ascending by
    /// rank.
    pub async fn list_for_party(
        &self,
        venue_id: VenueId,
        party_size: i32,
    ) -> AppResult<Vec<BookingPriority>> {
        sqlx::query_as::<_, BookingPriority>(
            "SELECT venue_id, party_size, item_type, item_id, priority_rank \
             FROM booking_priorities WHERE venue_id = $1 AND party_size = $2 \
             ORDER BY priority_rank ASC",
        )
        .bind(venue_id)
        .bind(party_size)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list priorities", e))
    }
}
