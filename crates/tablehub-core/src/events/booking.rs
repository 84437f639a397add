//! Booking-related domain events.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::id::{BookingId, TableId, VenueId};

/// Events related to bookings.
///
/// Every variant carries the venue and date whose cached availability it
/// invalidates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum BookingEvent {
    /// A reservation was created.
    Created {
        /// The booking ID.
        booking_id: BookingId,
        /// The venue the booking belongs to.
        venue_id: VenueId,
        /// The booking date.
        date: NaiveDate,
    },
    /// A reservation's time, party size, or duration changed.
    Updated {
        /// The booking ID.
        booking_id: BookingId,
        /// The venue the booking belongs to.
        venue_id: VenueId,
        /// The booking date.
        date: NaiveDate,
    },
    /// A reservation was cancelled and stopped occupying its tables.
    Cancelled {
        /// The booking ID.
        booking_id: BookingId,
        /// The venue the booking belongs to.
        venue_id: VenueId,
        /// The booking date.
        date: NaiveDate,
    },
    /// The allocation engine assigned tables to a reservation.
    Allocated {
        /// The booking ID.
        booking_id: BookingId,
        /// The venue the booking belongs to.
        venue_id: VenueId,
        /// The booking date.
        date: NaiveDate,
        /// The assigned tables.
        table_ids: Vec<TableId>,
    },
    /// The allocation engine found nothing that fits; the reservation
    /// awaits manual seating.
    Unallocated {
        /// The booking ID.
        booking_id: BookingId,
        /// The venue the booking belongs to.
        venue_id: VenueId,
        /// The booking date.
        date: NaiveDate,
    },
}

impl BookingEvent {
    /// The venue whose cached availability this event invalidates.
    pub fn venue_id(&self) -> VenueId {
        match self {
            Self::Created { venue_id, .. }
            | Self::Updated { venue_id, .. }
            | Self::Cancelled { venue_id, .. }
            | Self::Allocated { venue_id, .. }
            | Self::Unallocated { venue_id, .. } => *venue_id,
        }
    }

    /// The date whose cached availability this event invalidates.
    pub fn date(&self) -> NaiveDate {
        match self {
            Self::Created { date, .. }
            | Self::Updated { date, .. }
            | Self::Cancelled { date, .. }
            | Self::Allocated { date, .. }
            | Self::Unallocated { date, .. } => *date,
        }
    }
}
