//! Booking domain entities.

pub mod model;

pub use model::Booking;

use serde::{Deserialize, Serialize};

/// Lifecycle status of a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "booking_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    /// Reservation confirmed, party not yet arrived.
    Confirmed,
    /// Party is at the table.
    Seated,
    /// Party has left; the table is free again.
    Finished,
    /// Reservation cancelled by guest or staff.
    Cancelled,
    /// Party never arrived.
    NoShow,
    /// Awaiting a deposit or card guarantee.
    PendingPayment,
    /// Payment attempt failed.
    PaymentFailed,
    /// Payment window lapsed without completion.
    Expired,
    /// Party has announced a late arrival.
    Late,
}

impl BookingStatus {
    /// Whether a booking in this status occupies its tables.
    ///
    /// Cancelled and finished bookings never count as occupying,
    /// regardless of their time interval.
    pub fn occupies(&self) -> bool {
        !matches!(self, Self::Cancelled | Self::Finished)
    }

    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Confirmed => "confirmed",
            Self::Seated => "seated",
            Self::Finished => "finished",
            Self::Cancelled => "cancelled",
            Self::NoShow => "no_show",
            Self::PendingPayment => "pending_payment",
            Self::PaymentFailed => "payment_failed",
            Self::Expired => "expired",
            Self::Late => "late",
        }
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
