//! Booking engine configuration.
//!
//! Every numeric rule the availability and allocation engines apply lives
//! here, so a venue-wide tunable is changed in exactly one place.

use serde::{Deserialize, Serialize};

use crate::types::time::TimeOfDay;

/// Tunables for the availability and allocation engines.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingConfig {
    /// Slot granularity in minutes for every time scan.
    #[serde(default = "default_slot_granularity")]
    pub slot_granularity_minutes: u16,
    /// Duration assumed for bookings that do not carry one.
    #[serde(default = "default_duration")]
    pub default_duration_minutes: u32,
    /// Party size at which join-groups are tried before single tables.
    #[serde(default = "default_large_party")]
    pub large_party_threshold: i32,
    /// How far around a requested time the alternative search scans, in
    /// minutes on each side.
    #[serde(default = "default_suggestion_window")]
    pub suggestion_window_minutes: u16,
    /// Maximum number of alternative times returned.
    #[serde(default = "default_max_suggestions")]
    pub max_suggested_times: usize,
    /// Earliest slot the alternative search may propose.
    #[serde(default = "default_service_open")]
    pub service_open: TimeOfDay,
    /// Latest time a suggested booking may end.
    #[serde(default = "default_service_close")]
    pub service_close: TimeOfDay,
    /// How long an advisory slot hold lives.
    #[serde(default = "default_hold_ttl")]
    pub hold_ttl_seconds: u64,
    /// How many dates a range scan checks concurrently.
    #[serde(default = "default_scan_batch")]
    pub date_scan_batch_size: usize,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            slot_granularity_minutes: default_slot_granularity(),
            default_duration_minutes: default_duration(),
            large_party_threshold: default_large_party(),
            suggestion_window_minutes: default_suggestion_window(),
            max_suggested_times: default_max_suggestions(),
            service_open: default_service_open(),
            service_close: default_service_close(),
            hold_ttl_seconds: default_hold_ttl(),
            date_scan_batch_size: default_scan_batch(),
        }
    }
}

fn default_slot_granularity() -> u16 {
    15
}

fn default_duration() -> u32 {
    120
}

fn default_large_party() -> i32 {
    7
}

fn default_suggestion_window() -> u16 {
    120
}

fn default_max_suggestions() -> usize {
    3
}

fn default_service_open() -> TimeOfDay {
    TimeOfDay::from_hm(11, 0).expect("valid literal")
}

fn default_service_close() -> TimeOfDay {
    TimeOfDay::from_hm(23, 0).expect("valid literal")
}

fn default_hold_ttl() -> u64 {
    600
}

fn default_scan_batch() -> usize {
    14
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BookingConfig::default();
        assert_eq!(config.slot_granularity_minutes, 15);
        assert_eq!(config.default_duration_minutes, 120);
        assert_eq!(config.large_party_threshold, 7);
        assert_eq!(config.max_suggested_times, 3);
        assert_eq!(config.service_open.to_string(), "11:00");
        assert_eq!(config.service_close.to_string(), "23:00");
    }

    #[test]
    fn test_deserializes_from_toml_fragment() {
        let config: BookingConfig = serde_json::from_str(
            r#"{"slot_granularity_minutes": 30, "service_open": "12:00"}"#,
        )
        .unwrap();
        assert_eq!(config.slot_granularity_minutes, 30);
        assert_eq!(config.service_open.to_string(), "12:00");
        assert_eq!(config.default_duration_minutes, 120);
    }
}
