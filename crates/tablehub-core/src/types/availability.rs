//! Availability and allocation result types.
//!
//! These are ordinary values, not errors: a fully booked evening or a
//! party no table can seat is a negative result the UI renders, never an
//! `AppError`.

use serde::{Deserialize, Serialize};

use crate::types::id::{JoinGroupId, TableId};
use crate::types::time::TimeOfDay;

/// Outcome of checking a single requested time slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotVerdict {
    /// Whether the party can be seated at the requested time.
    pub available: bool,
    /// Why the slot is unavailable, when it is.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// Up to three open alternative times, ascending; never includes the
    /// requested time itself.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suggested_times: Vec<TimeOfDay>,
}

impl SlotVerdict {
    /// The slot is open.
    pub fn open() -> Self {
        Self {
            available: true,
            reason: None,
            suggested_times: Vec::new(),
        }
    }

    /// No table is large enough for the party, at any time.
    pub fn no_tables() -> Self {
        Self {
            available: false,
            reason: Some("no tables for this party size".to_string()),
            suggested_times: Vec::new(),
        }
    }

    /// Every fitting table is occupied at the requested time.
    pub fn fully_booked(suggested_times: Vec<TimeOfDay>) -> Self {
        Self {
            available: false,
            reason: Some("fully booked".to_string()),
            suggested_times,
        }
    }
}

/// The seating that satisfies a slot in the join-group-aware check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Seating {
    /// A join-group seats the party as one combined unit.
    Group {
        /// The join-group id.
        id: JoinGroupId,
        /// The staff-facing group name.
        name: String,
        /// Every table consumed by the combination.
        table_ids: Vec<TableId>,
    },
    /// A single table seats the party.
    Table {
        /// The table id.
        id: TableId,
        /// The staff-facing table label.
        label: String,
    },
}

/// Per-slot outcome of the join-group-aware availability scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotSeating {
    /// Whether the party can be seated in this slot.
    pub available: bool,
    /// Which path succeeded, or why none did.
    pub reason: String,
    /// The seating that succeeded, when one did.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seating: Option<Seating>,
}

/// Result of an allocation attempt.
///
/// `Unallocated` is a documented negative outcome — the reservation still
/// exists and awaits manual staff seating. System failures (store
/// unreachable, invalid input) are `AppError`s instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "lowercase")]
pub enum AllocationOutcome {
    /// The party was assigned one or more tables.
    Seated {
        /// The assigned tables; the first entry is the primary table.
        table_ids: Vec<TableId>,
    },
    /// Nothing fits; the booking stays unallocated.
    Unallocated {
        /// Why nothing fits.
        reason: String,
        /// Alternative times that would fit, ascending.
        alternatives: Vec<TimeOfDay>,
    },
}

impl AllocationOutcome {
    /// Whether the attempt produced a table assignment.
    pub fn is_seated(&self) -> bool {
        matches!(self, Self::Seated { .. })
    }
}
