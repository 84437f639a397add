//! Time-of-day primitives and the interval overlap rule.
//!
//! Booking times are minutes since midnight, parsed from and displayed as
//! `"HH:MM"`. All availability and allocation code measures occupancy with
//! the single half-open overlap rule defined here; no other overlap logic
//! is permitted anywhere in the workspace.

use std::fmt;
use std::str::FromStr;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::AppError;

/// Minutes in a full day.
const MINUTES_PER_DAY: u16 = 24 * 60;

/// A clock time within a single day, stored as minutes since midnight.
///
/// Serialized as an `"HH:MM"` string; persisted as an integer minute
/// count when the `sqlx` feature is enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimeOfDay(u16);

impl TimeOfDay {
    /// Midnight.
    pub const MIDNIGHT: TimeOfDay = TimeOfDay(0);

    /// Create a time from hours and minutes.
    ///
    /// Returns an error when the pair does not name a valid clock time.
    pub fn from_hm(hours: u16, minutes: u16) -> Result<Self, AppError> {
        if hours >= 24 || minutes >= 60 {
            return Err(AppError::validation(format!(
                "Invalid time {hours:02}:{minutes:02}"
            )));
        }
        Ok(Self(hours * 60 + minutes))
    }

    /// Create a time from a raw minutes-since-midnight count.
    pub fn from_minutes(minutes: u16) -> Result<Self, AppError> {
        if minutes >= MINUTES_PER_DAY {
            return Err(AppError::validation(format!(
                "Minute count {minutes} is outside the day"
            )));
        }
        Ok(Self(minutes))
    }

    /// Minutes since midnight.
    pub fn minutes(self) -> u16 {
        self.0
    }

    /// Minutes since midnight as a signed value, for interval arithmetic.
    pub fn as_i32(self) -> i32 {
        i32::from(self.0)
    }

    /// The hour component (0..=23).
    pub fn hour(self) -> u16 {
        self.0 / 60
    }

    /// The minute component (0..=59).
    pub fn minute(self) -> u16 {
        self.0 % 60
    }

    /// Shift this time by a signed minute offset.
    ///
    /// Returns `None` when the result would leave the day.
    pub fn offset(self, minutes: i32) -> Option<Self> {
        let shifted = self.as_i32() + minutes;
        if (0..i32::from(MINUTES_PER_DAY)).contains(&shifted) {
            Some(Self(shifted as u16))
        } else {
            None
        }
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for TimeOfDay {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (hours, minutes) = s
            .split_once(':')
            .ok_or_else(|| AppError::validation(format!("Invalid time '{s}'. Expected HH:MM")))?;
        let hours: u16 = hours
            .parse()
            .map_err(|_| AppError::validation(format!("Invalid hour in '{s}'")))?;
        let minutes: u16 = minutes
            .parse()
            .map_err(|_| AppError::validation(format!("Invalid minute in '{s}'")))?;
        Self::from_hm(hours, minutes)
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(|e: AppError| D::Error::custom(e.message))
    }
}

#[cfg(feature = "sqlx")]
impl sqlx::Type<sqlx::Postgres> for TimeOfDay {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <i32 as sqlx::Type<sqlx::Postgres>>::type_info()
    }
}

#[cfg(feature = "sqlx")]
impl<'q> sqlx::Encode<'q, sqlx::Postgres> for TimeOfDay {
    fn encode_by_ref(
        &self,
        buf: &mut <sqlx::Postgres as sqlx::Database>::ArgumentBuffer<'q>,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <i32 as sqlx::Encode<'q, sqlx::Postgres>>::encode_by_ref(&self.as_i32(), buf)
    }
}

#[cfg(feature = "sqlx")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for TimeOfDay {
    fn decode(
        value: <sqlx::Postgres as sqlx::Database>::ValueRef<'r>,
    ) -> Result<Self, sqlx::error::BoxDynError> {
        let minutes = <i32 as sqlx::Decode<'r, sqlx::Postgres>>::decode(value)?;
        let minutes = u16::try_from(minutes).map_err(|_| "negative minute count")?;
        TimeOfDay::from_minutes(minutes).map_err(|e| e.message.into())
    }
}

/// The single authoritative interval overlap rule.
///
/// Intervals are half-open `[start, end)` minute ranges: two intervals
/// overlap iff `a_start < b_end && a_end > b_start`. Touching endpoints do
/// not overlap — a booking ending at 19:00 does not conflict with one
/// starting at 19:00.
pub fn intervals_overlap(a_start: i32, a_end: i32, b_start: i32, b_end: i32) -> bool {
    a_start < b_end && a_end > b_start
}

/// Enumerate slot start times in the half-open range `[start, end)` at the
/// given minute granularity.
pub fn slots_between(start: TimeOfDay, end: TimeOfDay, step_minutes: u16) -> Vec<TimeOfDay> {
    let step = step_minutes.max(1);
    let mut slots = Vec::new();
    let mut current = start.minutes();
    while current < end.minutes() {
        slots.push(TimeOfDay(current));
        current = match current.checked_add(step) {
            Some(next) => next,
            None => break,
        };
    }
    slots
}
