//! Join-group repository implementation.

use sqlx::PgPool;

use tablehub_core::error::{AppError, ErrorKind};
use tablehub_core::result::AppResult;
use tablehub_core::types::id::VenueId;
use tablehub_entity::join_group::JoinGroup;

/// Repository for join-group queries.
#[derive(Debug, Clone)]
pub struct JoinGroupRepository {
    pool: PgPool,
}

impl JoinGroupRepository {
    /// Create a new join-group repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List all join-groups configured for a venue.
    pub async fn list_for_venue(&self, venue_id: VenueId) -> AppResult<Vec<JoinGroup>> {
        sqlx::query_as::<_, JoinGroup>(
            "SELECT id, venue_id, name, table_ids, min_party_size, max_party_size \
             FROM join_groups WHERE venue_id = $1 ORDER BY id ASC",
        )
        .bind(venue_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list join groups", e))
    }
}
