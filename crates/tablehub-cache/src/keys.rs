//! Cache key builders for all TableHub cache entries.
//!
//! Centralising key construction prevents typos and makes it easy
//! to find every key the application uses. All availability keys share
//! the `tablehub:avail:{venue}:{date}:` prefix so that one pattern
//! delete invalidates everything a booking mutation can affect.

use chrono::NaiveDate;

use tablehub_core::types::id::VenueId;
use tablehub_core::types::time::TimeOfDay;

/// Prefix applied to all TableHub cache keys.
const PREFIX: &str = "tablehub";

/// Cache key for a whole-date availability verdict.
pub fn date_availability(venue_id: VenueId, date: NaiveDate, party_size: i32) -> String {
    format!("{PREFIX}:avail:{venue_id}:{date}:date:{party_size}")
}

/// Cache key for a single time-slot verdict.
pub fn time_slot(
    venue_id: VenueId,
    date: NaiveDate,
    party_size: i32,
    time: TimeOfDay,
    duration_minutes: u32,
) -> String {
    format!(
        "{PREFIX}:avail:{venue_id}:{date}:slot:{party_size}:{}:{duration_minutes}",
        time.minutes()
    )
}

/// Cache key for a join-group-aware slot map over a time window.
pub fn slot_map(
    venue_id: VenueId,
    date: NaiveDate,
    party_size: i32,
    start: TimeOfDay,
    end: TimeOfDay,
    duration_minutes: u32,
) -> String {
    format!(
        "{PREFIX}:avail:{venue_id}:{date}:map:{party_size}:{}:{}:{duration_minutes}",
        start.minutes(),
        end.minutes()
    )
}

/// Pattern matching every availability entry for a venue and date.
pub fn venue_date_pattern(venue_id: VenueId, date: NaiveDate) -> String {
    format!("{PREFIX}:avail:{venue_id}:{date}:*")
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn nil_venue() -> VenueId {
        VenueId::from_uuid(Uuid::nil())
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    #[test]
    fn test_date_key() {
        assert_eq!(
            date_availability(nil_venue(), date(), 4),
            "tablehub:avail:00000000-0000-0000-0000-000000000000:2025-06-01:date:4"
        );
    }

    #[test]
    fn test_slot_key_uses_minute_counts() {
        let key = time_slot(nil_venue(), date(), 4, "19:00".parse().unwrap(), 120);
        assert!(key.ends_with(":slot:4:1140:120"));
    }

    #[test]
    fn test_pattern_covers_all_availability_keys() {
        let pattern = venue_date_pattern(nil_venue(), date());
        let prefix = pattern.trim_end_matches('*');
        assert!(date_availability(nil_venue(), date(), 4).starts_with(prefix));
        assert!(
            time_slot(nil_venue(), date(), 4, "19:00".parse().unwrap(), 120).starts_with(prefix)
        );
    }
}
