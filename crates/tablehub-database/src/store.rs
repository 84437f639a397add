//! PostgreSQL implementation of the data-access port.

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;

use tablehub_core::result::AppResult;
use tablehub_core::types::id::{BookingId, ServiceId, TableId, VenueId};
use tablehub_entity::booking::Booking;
use tablehub_entity::join_group::JoinGroup;
use tablehub_entity::priority::BookingPriority;
use tablehub_entity::store::AvailabilityStore;
use tablehub_entity::table::DiningTable;
use tablehub_entity::window::BookingWindow;

use crate::repositories::{
    BookingRepository, JoinGroupRepository, PriorityRepository, TableRepository, WindowRepository,
};

/// [`AvailabilityStore`] backed by the PostgreSQL repositories.
#[derive(Debug, Clone)]
pub struct PgAvailabilityStore {
    tables: TableRepository,
    join_groups: JoinGroupRepository,
    windows: WindowRepository,
    bookings: BookingRepository,
    priorities: PriorityRepository,
}

impl PgAvailabilityStore {
    /// Create a store over a connection pool.
    ///
    /// `default_duration_minutes` sizes the occupancy interval written for
    /// bookings that carry no explicit duration; it must match the engine
    /// configuration.
    pub fn new(pool: PgPool, default_duration_minutes: u32) -> Self {
        Self {
            tables: TableRepository::new(pool.clone()),
            join_groups: JoinGroupRepository::new(pool.clone()),
            windows: WindowRepository::new(pool.clone()),
            bookings: BookingRepository::new(pool.clone(), default_duration_minutes),
            priorities: PriorityRepository::new(pool),
        }
    }
}

#[async_trait]
impl AvailabilityStore for PgAvailabilityStore {
    async fn list_active_tables(&self, venue_id: VenueId) -> AppResult<Vec<DiningTable>> {
        self.tables.list_active(venue_id).await
    }

    async fn list_join_groups(&self, venue_id: VenueId) -> AppResult<Vec<JoinGroup>> {
        self.join_groups.list_for_venue(venue_id).await
    }

    async fn list_booking_windows(
        &self,
        venue_id: VenueId,
        service_id: Option<ServiceId>,
    ) -> AppResult<Vec<BookingWindow>> {
        self.windows.list_for_venue(venue_id, service_id).await
    }

    async fn list_active_bookings(
        &self,
        venue_id: VenueId,
        date: NaiveDate,
    ) -> AppResult<Vec<Booking>> {
        self.bookings.list_active_for_date(venue_id, date).await
    }

    async fn list_priorities(
        &self,
        venue_id: VenueId,
        party_size: i32,
    ) -> AppResult<Vec<BookingPriority>> {
        self.priorities.list_for_party(venue_id, party_size).await
    }

    async fn write_booking_allocation(
        &self,
        booking_id: BookingId,
        table_ids: Option<&[TableId]>,
        is_unallocated: bool,
    ) -> AppResult<()> {
        self.bookings
            .write_allocation(booking_id, table_ids, is_unallocated)
            .await
    }
}
