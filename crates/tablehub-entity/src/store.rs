//! Data-access port the availability and allocation engines are written
//! against.

use async_trait::async_trait;
use chrono::NaiveDate;

use tablehub_core::result::AppResult;
use tablehub_core::types::id::{BookingId, ServiceId, TableId, VenueId};

use crate::booking::Booking;
use crate::join_group::JoinGroup;
use crate::priority::BookingPriority;
use crate::table::DiningTable;
use crate::window::BookingWindow;

/// The query shapes the engines need from the relational store.
///
/// `tablehub-database` implements this over PostgreSQL; tests substitute
/// in-memory fakes. Implementations report infrastructure failures as
/// errors — an unreachable store must never be presented as "no
/// availability".
#[async_trait]
pub trait AvailabilityStore: Send + Sync + 'static {
    /// Tables in service for a venue.
    async fn list_active_tables(&self, venue_id: VenueId) -> AppResult<Vec<DiningTable>>;

    /// Join-groups configured for a venue.
    async fn list_join_groups(&self, venue_id: VenueId) -> AppResult<Vec<JoinGroup>>;

    /// Booking windows for a venue, optionally narrowed to one service.
    async fn list_booking_windows(
        &self,
        venue_id: VenueId,
        service_id: Option<ServiceId>,
    ) -> AppResult<Vec<BookingWindow>>;

    /// Bookings occupying tables on a date: everything except cancelled
    /// and finished.
    async fn list_active_bookings(
        &self,
        venue_id: VenueId,
        date: NaiveDate,
    ) -> AppResult<Vec<Booking>>;

    /// Priority rules matching an exact party size, ascending by rank.
    async fn list_priorities(
        &self,
        venue_id: VenueId,
        party_size: i32,
    ) -> AppResult<Vec<BookingPriority>>;

    /// Persist a table assignment, or clear it when `table_ids` is `None`.
    ///
    /// Must fail with `ErrorKind::Conflict` when another booking claimed
    /// any of the tables for an overlapping interval between the caller's
    /// occupancy read and this write.
    async fn write_booking_allocation(
        &self,
        booking_id: BookingId,
        table_ids: Option<&[TableId]>,
        is_unallocated: bool,
    ) -> AppResult<()>;
}
