//! Join-group entity model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use tablehub_core::types::id::{JoinGroupId, TableId, VenueId};

/// A named combination of tables seated together as one unit.
///
/// All member tables belong to the same venue. A join-group is usable
/// only if every member table is simultaneously unoccupied for the
/// requested interval.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JoinGroup {
    /// Stable join-group identifier.
    pub id: JoinGroupId,
    /// The venue this group belongs to.
    pub venue_id: VenueId,
    /// Staff-facing name ("Back room", "T4+T5").
    pub name: String,
    /// The member tables; non-empty.
    pub table_ids: Vec<TableId>,
    /// Smallest party the combination is offered to.
    pub min_party_size: i32,
    /// Largest party the combination can seat.
    pub max_party_size: i32,
}

impl JoinGroup {
    /// Whether the party size falls inside this group's offered range.
    pub fn fits(&self, party_size: i32) -> bool {
        (self.min_party_size..=self.max_party_size).contains(&party_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(min: i32, max: i32) -> JoinGroup {
        JoinGroup {
            id: JoinGroupId::from_raw(1),
            venue_id: VenueId::new(),
            name: "Back room".to_string(),
            table_ids: vec![TableId::from_raw(1), TableId::from_raw(2)],
            min_party_size: min,
            max_party_size: max,
        }
    }

    #[test]
    fn test_fits_is_inclusive_at_both_bounds() {
        let g = group(5, 8);
        assert!(!g.fits(4));
        assert!(g.fits(5));
        assert!(g.fits(8));
        assert!(!g.fits(9));
    }
}
