//! Dining table repository implementation.

use sqlx::PgPool;

use tablehub_core::error::{AppError, ErrorKind};
use tablehub_core::result::AppResult;
use tablehub_core::types::id::{TableId, VenueId};
use tablehub_entity::table::DiningTable;

/// Repository for dining table queries.
#[derive(Debug, Clone)]
pub struct TableRepository {
    pool: PgPool,
}

impl TableRepository {
    /// Create a new table repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List all in-service tables for a venue, preferred tables first.
    pub async fn list_active(&self, venue_id: VenueId) -> AppResult<Vec<DiningTable>> {
        sqlx::query_as::<_, DiningTable>(
            "SELECT id, venue_id, label, seats, status, online_bookable, priority_rank \
             FROM dining_tables WHERE venue_id = $1 AND status = 'active' \
             ORDER BY priority_rank ASC, id ASC",
        )
        .bind(venue_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list tables", e))
    }

    /// Find a table by ID.
    pub async fn find_by_id(&self, id: TableId) -> AppResult<Option<DiningTable>> {
        sqlx::query_as::<_, DiningTable>(
            "SELECT id, venue_id, label, seats, status, online_bookable, priority_rank \
             FROM dining_tables WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find table", e))
    }
}
