//! Booking entity model.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use tablehub_core::types::id::{BookingId, TableId, VenueId};
use tablehub_core::types::time::TimeOfDay;

use super::BookingStatus;

/// A reservation.
///
/// A booking occupies its assigned tables for the half-open interval
/// `[start_time, start_time + duration)` on `booking_date`, unless its
/// status is cancelled or finished. An empty table set means the booking
/// is not yet seated and awaits allocation.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Booking {
    /// Unique booking identifier.
    pub id: BookingId,
    /// The venue the booking belongs to.
    pub venue_id: VenueId,
    /// Assigned tables; the first entry is the primary table. Empty when
    /// unallocated.
    pub table_ids: Vec<TableId>,
    /// Guest name.
    pub guest_name: String,
    /// Guest email.
    pub guest_email: Option<String>,
    /// Guest phone number.
    pub guest_phone: Option<String>,
    /// Number of covers.
    pub party_size: i32,
    /// Calendar date of the reservation.
    pub booking_date: NaiveDate,
    /// Seating time.
    pub start_time: TimeOfDay,
    /// Expected duration; bookings without one use the configured default.
    pub duration_minutes: Option<i32>,
    /// Lifecycle status.
    pub status: BookingStatus,
    /// Whether the booking awaits manual staff seating.
    pub is_unallocated: bool,
    /// When the booking was created.
    pub created_at: DateTime<Utc>,
    /// When the booking was last modified.
    pub updated_at: DateTime<Utc>,
}

impl Booking {
    /// The duration this booking occupies its tables for.
    pub fn duration_or(&self, default_minutes: u32) -> i32 {
        self.duration_minutes.unwrap_or(default_minutes as i32)
    }

    /// The `[start, end)` minute interval this booking occupies.
    pub fn interval(&self, default_minutes: u32) -> (i32, i32) {
        let start = self.start_time.as_i32();
        (start, start + self.duration_or(default_minutes))
    }

    /// Whether this booking currently occupies its tables.
    pub fn is_occupying(&self) -> bool {
        !self.table_ids.is_empty() && self.status.occupies()
    }

    /// The primary assigned table, when seated.
    pub fn primary_table(&self) -> Option<TableId> {
        self.table_ids.first().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn booking(status: BookingStatus, table_ids: Vec<TableId>) -> Booking {
        Booking {
            id: BookingId::new(),
            venue_id: VenueId::new(),
            table_ids,
            guest_name: "Avery".to_string(),
            guest_email: None,
            guest_phone: None,
            party_size: 2,
            booking_date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            start_time: "19:00".parse().unwrap(),
            duration_minutes: None,
            status,
            is_unallocated: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_interval_uses_default_duration() {
        let b = booking(BookingStatus::Confirmed, vec![TableId::from_raw(1)]);
        assert_eq!(b.interval(120), (19 * 60, 21 * 60));
    }

    #[test]
    fn test_unallocated_booking_occupies_nothing() {
        let b = booking(BookingStatus::Confirmed, Vec::new());
        assert!(!b.is_occupying());
        assert_eq!(b.primary_table(), None);
    }

    #[test]
    fn test_cancelled_booking_occupies_nothing() {
        let b = booking(BookingStatus::Cancelled, vec![TableId::from_raw(1)]);
        assert!(!b.is_occupying());
    }
}
