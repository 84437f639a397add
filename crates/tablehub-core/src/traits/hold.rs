//! Slot hold trait for advisory reservation holds.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};

use crate::result::AppResult;
use crate::types::id::{HoldId, VenueId};
use crate::types::time::TimeOfDay;

/// A live advisory hold on a venue time slot.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct HoldToken {
    /// Unique hold identifier, returned to the guest flow.
    pub id: HoldId,
    /// When the hold lapses and the slot is released to others.
    pub expires_at: DateTime<Utc>,
}

/// Trait for advisory slot holds taken while a guest fills in details.
///
/// A hold reduces contention on popular slots by making concurrent guests
/// queue behind the first one; it is a UX optimization only. The
/// correctness guarantee against double-booking is the conflict check at
/// allocation write time, which holds neither depend on nor replace.
#[async_trait]
pub trait SlotHold: Send + Sync + 'static {
    /// Try to place a hold on the given venue/date/time interval.
    ///
    /// Returns `None` when another live hold overlaps the interval.
    async fn acquire(
        &self,
        venue_id: VenueId,
        date: NaiveDate,
        start: TimeOfDay,
        duration_minutes: u32,
    ) -> AppResult<Option<HoldToken>>;

    /// Release a hold before its TTL lapses. Releasing an unknown or
    /// already-expired hold is a no-op.
    async fn release(&self, hold_id: HoldId) -> AppResult<()>;

    /// Drop every lapsed hold and return how many were removed.
    async fn purge_expired(&self) -> AppResult<u64>;
}
