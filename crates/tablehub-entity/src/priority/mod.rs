//! Booking priority domain entities.

pub mod model;

pub use model::BookingPriority;

use serde::{Deserialize, Serialize};

/// What a priority rule points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "priority_item_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PriorityItemType {
    /// The rule prefers a single table.
    Table,
    /// The rule prefers a join-group.
    Group,
}

impl PriorityItemType {
    /// Return the item type as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Table => "table",
            Self::Group => "group",
        }
    }
}

impl std::fmt::Display for PriorityItemType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
