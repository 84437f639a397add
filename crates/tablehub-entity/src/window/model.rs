//! Booking window entity model.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use tablehub_core::types::id::{ServiceId, VenueId, WindowId};
use tablehub_core::types::time::TimeOfDay;

use super::DayOfWeek;

/// A calendar period during which a venue takes no bookings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlackoutPeriod {
    /// First blacked-out date, inclusive.
    pub start_date: NaiveDate,
    /// Last blacked-out date, inclusive.
    pub end_date: NaiveDate,
    /// Staff-facing reason ("Christmas closure").
    pub reason: Option<String>,
}

impl BlackoutPeriod {
    /// Whether the date falls inside this period, bounds inclusive.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }
}

/// A recurring availability schedule for a service.
///
/// A window applies to a calendar date only if the date's weekday is in
/// `days`, the date sits inside the validity range when one is set, and
/// the date is not inside any blackout period.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct BookingWindow {
    /// Unique window identifier.
    pub id: WindowId,
    /// The venue this window belongs to.
    pub venue_id: VenueId,
    /// The service this window schedules (lunch, dinner, ...).
    pub service_id: ServiceId,
    /// Weekdays the window recurs on.
    pub days: Vec<DayOfWeek>,
    /// First bookable slot of the window.
    pub start_time: TimeOfDay,
    /// End of the window; the last slot starts before this time.
    pub end_time: TimeOfDay,
    /// First date the window is in effect, when bounded.
    pub valid_from: Option<NaiveDate>,
    /// Last date the window is in effect, when bounded.
    pub valid_until: Option<NaiveDate>,
    /// Calendar periods excluded from this window.
    #[sqlx(json)]
    pub blackouts: Vec<BlackoutPeriod>,
}

impl BookingWindow {
    /// Whether this window offers any slots on the given date.
    pub fn applies_on(&self, date: NaiveDate) -> bool {
        let weekday = DayOfWeek::from(date.weekday());
        if !self.days.contains(&weekday) {
            return false;
        }
        if let Some(from) = self.valid_from {
            if date < from {
                return false;
            }
        }
        if let Some(until) = self.valid_until {
            if date > until {
                return false;
            }
        }
        !self.blackouts.iter().any(|b| b.contains(date))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn window(days: Vec<DayOfWeek>) -> BookingWindow {
        BookingWindow {
            id: WindowId::new(),
            venue_id: VenueId::new(),
            service_id: ServiceId::new(),
            days,
            start_time: "18:00".parse().unwrap(),
            end_time: "22:00".parse().unwrap(),
            valid_from: None,
            valid_until: None,
            blackouts: Vec::new(),
        }
    }

    #[test]
    fn test_weekday_filter() {
        let w = window(vec![DayOfWeek::Fri, DayOfWeek::Sat]);
        // 2025-06-06 is a Friday, 2025-06-03 a Tuesday.
        assert!(w.applies_on(date(2025, 6, 6)));
        assert!(!w.applies_on(date(2025, 6, 3)));
    }

    #[test]
    fn test_validity_range_inclusive() {
        let mut w = window(vec![DayOfWeek::Fri]);
        w.valid_from = Some(date(2025, 6, 6));
        w.valid_until = Some(date(2025, 6, 13));
        assert!(w.applies_on(date(2025, 6, 6)));
        assert!(w.applies_on(date(2025, 6, 13)));
        assert!(!w.applies_on(date(2025, 5, 30)));
        assert!(!w.applies_on(date(2025, 6, 20)));
    }

    #[test]
    fn test_blackout_excludes_inclusively() {
        let mut w = window(vec![DayOfWeek::Fri]);
        w.blackouts = vec![BlackoutPeriod {
            start_date: date(2025, 6, 6),
            end_date: date(2025, 6, 13),
            reason: Some("Private event".to_string()),
        }];
        assert!(!w.applies_on(date(2025, 6, 6)));
        assert!(!w.applies_on(date(2025, 6, 13)));
        assert!(w.applies_on(date(2025, 6, 20)));
    }
}
