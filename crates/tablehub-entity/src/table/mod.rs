//! Dining table domain entities.

pub mod model;

pub use model::DiningTable;

use serde::{Deserialize, Serialize};

/// Configuration status of a dining table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "table_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TableStatus {
    /// Table is in service and may be booked.
    Active,
    /// Table is withdrawn from service (refurbishment, storage).
    Inactive,
}

impl TableStatus {
    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }
}

impl std::fmt::Display for TableStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
