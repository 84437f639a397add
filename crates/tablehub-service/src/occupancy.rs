//! The occupancy calculator.
//!
//! Single authoritative computation of which tables are taken for a
//! candidate interval. Every higher component — date scans, slot checks,
//! allocation — goes through [`occupied_table_ids`]; availability code
//! must never apply its own overlap arithmetic.

use std::collections::HashSet;

use tablehub_core::types::id::TableId;
use tablehub_core::types::time::{TimeOfDay, intervals_overlap};
use tablehub_entity::booking::Booking;

/// Compute the set of table ids occupied for a candidate interval.
///
/// A booking contributes its tables iff it has at least one assigned
/// table, its status occupies (not cancelled or finished), and its
/// half-open interval overlaps the candidate's. Bookings without an
/// explicit duration occupy for `default_duration_minutes`.
pub fn occupied_table_ids(
    bookings: &[Booking],
    candidate_start: TimeOfDay,
    candidate_duration_minutes: u32,
    default_duration_minutes: u32,
) -> HashSet<TableId> {
    let start = candidate_start.as_i32();
    let end = start + candidate_duration_minutes as i32;

    let mut occupied = HashSet::new();
    for booking in bookings {
        if !booking.is_occupying() {
            continue;
        }
        let (booking_start, booking_end) = booking.interval(default_duration_minutes);
        if intervals_overlap(start, end, booking_start, booking_end) {
            occupied.extend(booking.table_ids.iter().copied());
        }
    }
    occupied
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use tablehub_core::types::id::{BookingId, VenueId};
    use tablehub_entity::booking::BookingStatus;

    fn booking(
        table_ids: Vec<i64>,
        start: &str,
        duration: Option<i32>,
        status: BookingStatus,
    ) -> Booking {
        Booking {
            id: BookingId::new(),
            venue_id: VenueId::new(),
            table_ids: table_ids.into_iter().map(TableId::from_raw).collect(),
            guest_name: "Sam".to_string(),
            guest_email: None,
            guest_phone: None,
            party_size: 2,
            booking_date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            start_time: start.parse().unwrap(),
            duration_minutes: duration,
            status,
            is_unallocated: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn time(s: &str) -> TimeOfDay {
        s.parse().unwrap()
    }

    #[test]
    fn test_overlapping_booking_occupies() {
        let bookings = vec![booking(vec![1], "18:30", Some(120), BookingStatus::Confirmed)];
        let occupied = occupied_table_ids(&bookings, time("19:00"), 120, 120);
        assert!(occupied.contains(&TableId::from_raw(1)));
    }

    #[test]
    fn test_touching_endpoints_do_not_overlap() {
        // Booking 17:00-19:00; candidates ending at 17:00 or starting at
        // 19:00 are free.
        let bookings = vec![booking(vec![1], "17:00", Some(120), BookingStatus::Confirmed)];
        assert!(occupied_table_ids(&bookings, time("15:00"), 120, 120).is_empty());
        assert!(occupied_table_ids(&bookings, time("19:00"), 120, 120).is_empty());
        assert!(!occupied_table_ids(&bookings, time("18:45"), 120, 120).is_empty());
    }

    #[test]
    fn test_cancelled_and_finished_never_occupy() {
        let bookings = vec![
            booking(vec![1], "19:00", Some(120), BookingStatus::Cancelled),
            booking(vec![2], "19:00", Some(120), BookingStatus::Finished),
        ];
        assert!(occupied_table_ids(&bookings, time("19:00"), 120, 120).is_empty());
    }

    #[test]
    fn test_unallocated_booking_occupies_nothing() {
        let bookings = vec![booking(vec![], "19:00", Some(120), BookingStatus::Confirmed)];
        assert!(occupied_table_ids(&bookings, time("19:00"), 120, 120).is_empty());
    }

    #[test]
    fn test_missing_duration_defaults() {
        let bookings = vec![booking(vec![1], "17:00", None, BookingStatus::Confirmed)];
        // With the 120-minute default the booking runs to 19:00.
        assert!(!occupied_table_ids(&bookings, time("18:30"), 60, 120).is_empty());
        assert!(occupied_table_ids(&bookings, time("19:00"), 60, 120).is_empty());
    }

    #[test]
    fn test_joined_booking_occupies_every_table() {
        let bookings = vec![booking(
            vec![1, 2, 3],
            "19:00",
            Some(120),
            BookingStatus::Seated,
        )];
        let occupied = occupied_table_ids(&bookings, time("20:00"), 120, 120);
        assert_eq!(occupied.len(), 3);
    }
}
