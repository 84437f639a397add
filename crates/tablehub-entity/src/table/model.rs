//! Dining table entity model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use tablehub_core::types::id::{TableId, VenueId};

use super::TableStatus;

/// A physical seating unit in a venue.
///
/// Tables are configured by venue staff; the booking flow never creates
/// or destroys them. Only active (and, for guest-facing flows,
/// online-bookable) tables participate in allocation.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DiningTable {
    /// Stable table identifier.
    pub id: TableId,
    /// The venue this table belongs to.
    pub venue_id: VenueId,
    /// Staff-facing label ("T4", "Window 2").
    pub label: String,
    /// Seat capacity.
    pub seats: i32,
    /// Whether the table is in service.
    pub status: TableStatus,
    /// Whether guests may book this table online.
    pub online_bookable: bool,
    /// Allocation preference rank; lower is preferred.
    pub priority_rank: i32,
}

impl DiningTable {
    /// Whether the table is in service.
    pub fn is_active(&self) -> bool {
        self.status == TableStatus::Active
    }

    /// Whether the table can physically seat the party.
    pub fn seats_party(&self, party_size: i32) -> bool {
        self.seats >= party_size
    }

    /// Whether the table qualifies for a guest-facing booking of the
    /// given party size.
    pub fn qualifies_for(&self, party_size: i32) -> bool {
        self.is_active() && self.online_bookable && self.seats_party(party_size)
    }

    /// Fraction of seats the party would fill. Higher means a tighter fit.
    pub fn seat_efficiency(&self, party_size: i32) -> f64 {
        if self.seats <= 0 {
            return 0.0;
        }
        f64::from(party_size) / f64::from(self.seats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(seats: i32, status: TableStatus, online: bool) -> DiningTable {
        DiningTable {
            id: TableId::from_raw(1),
            venue_id: VenueId::new(),
            label: "T1".to_string(),
            seats,
            status,
            online_bookable: online,
            priority_rank: 0,
        }
    }

    #[test]
    fn test_qualifies_for_requires_active_and_bookable() {
        assert!(table(4, TableStatus::Active, true).qualifies_for(4));
        assert!(!table(4, TableStatus::Inactive, true).qualifies_for(4));
        assert!(!table(4, TableStatus::Active, false).qualifies_for(4));
        assert!(!table(4, TableStatus::Active, true).qualifies_for(5));
    }

    #[test]
    fn test_seat_efficiency_prefers_tight_fit() {
        let snug = table(4, TableStatus::Active, true);
        let roomy = table(8, TableStatus::Active, true);
        assert!(snug.seat_efficiency(4) > roomy.seat_efficiency(4));
    }
}
