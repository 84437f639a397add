//! Alternative-time search for fully booked slots.

use tablehub_core::config::booking::BookingConfig;
use tablehub_core::types::time::TimeOfDay;
use tablehub_entity::booking::Booking;
use tablehub_entity::table::DiningTable;

use crate::occupancy::occupied_table_ids;

/// Find open times near a fully booked one.
///
/// Scans the configured window around the requested time in granularity
/// steps, bounded by service hours (a suggestion must start at or after
/// opening and end by close), skipping the requested time itself. Returns
/// at most `max_suggested_times` open slots, ascending.
pub(crate) fn suggest_times(
    qualifying: &[&DiningTable],
    bookings: &[Booking],
    requested: TimeOfDay,
    duration_minutes: u32,
    config: &BookingConfig,
) -> Vec<TimeOfDay> {
    let step = i32::from(config.slot_granularity_minutes.max(1));
    let window = i32::from(config.suggestion_window_minutes);
    let open = config.service_open.as_i32();
    let close = config.service_close.as_i32();

    let mut suggestions = Vec::new();
    let mut offset = -window;
    while offset <= window && suggestions.len() < config.max_suggested_times {
        if offset != 0 {
            if let Some(candidate) = requested.offset(offset) {
                let starts_after_open = candidate.as_i32() >= open;
                let ends_by_close = candidate.as_i32() + duration_minutes as i32 <= close;
                if starts_after_open && ends_by_close {
                    let occupied = occupied_table_ids(
                        bookings,
                        candidate,
                        duration_minutes,
                        config.default_duration_minutes,
                    );
                    if qualifying.iter().any(|t| !occupied.contains(&t.id)) {
                        suggestions.push(candidate);
                    }
                }
            }
        }
        offset += step;
    }
    suggestions
}
