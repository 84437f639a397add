//! Booking priority entity model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use tablehub_core::types::id::{JoinGroupId, TableId, VenueId};

use super::PriorityItemType;

/// An explicit staff seating preference for an exact party size.
///
/// Priorities are evaluated in ascending `priority_rank` order before any
/// generic best-fit logic; a rule applies only when the requested party
/// size matches `party_size` exactly.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct BookingPriority {
    /// The venue this rule belongs to.
    pub venue_id: VenueId,
    /// The exact party size this rule applies to.
    pub party_size: i32,
    /// Whether the rule targets a table or a join-group.
    pub item_type: PriorityItemType,
    /// The targeted table or join-group id.
    pub item_id: i64,
    /// Evaluation order; lower runs first.
    pub priority_rank: i32,
}

impl BookingPriority {
    /// The targeted table, when this rule prefers a single table.
    pub fn table_target(&self) -> Option<TableId> {
        match self.item_type {
            PriorityItemType::Table => Some(TableId::from_raw(self.item_id)),
            PriorityItemType::Group => None,
        }
    }

    /// The targeted join-group, when this rule prefers a combination.
    pub fn group_target(&self) -> Option<JoinGroupId> {
        match self.item_type {
            PriorityItemType::Group => Some(JoinGroupId::from_raw(self.item_id)),
            PriorityItemType::Table => None,
        }
    }
}
