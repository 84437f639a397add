//! Shared test fixtures: an in-memory store and entity builders.

#![allow(dead_code)]

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};

use tablehub_cache::{AvailabilityCache, MemoryCacheProvider};
use tablehub_core::AppError;
use tablehub_core::config::booking::BookingConfig;
use tablehub_core::config::cache::CacheConfig;
use tablehub_core::result::AppResult;
use tablehub_core::types::id::{
    BookingId, JoinGroupId, ServiceId, TableId, VenueId, WindowId,
};
use tablehub_core::types::time::TimeOfDay;
use tablehub_entity::booking::{Booking, BookingStatus};
use tablehub_entity::join_group::JoinGroup;
use tablehub_entity::priority::{BookingPriority, PriorityItemType};
use tablehub_entity::store::AvailabilityStore;
use tablehub_entity::table::{DiningTable, TableStatus};
use tablehub_entity::window::{BookingWindow, DayOfWeek};
use tablehub_service::{AllocationEngine, AvailabilityEngine};

/// In-memory [`AvailabilityStore`] with query counters and scriptable
/// write conflicts.
#[derive(Debug, Default)]
pub struct MockStore {
    pub tables: Vec<DiningTable>,
    pub groups: Vec<JoinGroup>,
    pub windows: Vec<BookingWindow>,
    pub priorities: Vec<BookingPriority>,
    pub bookings: Mutex<Vec<Booking>>,
    pub table_queries: AtomicUsize,
    pub booking_queries: AtomicUsize,
    /// The next N allocation writes fail with `Conflict`.
    pub conflicts_remaining: AtomicUsize,
    /// Every successful `write_booking_allocation` call, in order.
    pub writes: Mutex<Vec<(BookingId, Option<Vec<TableId>>, bool)>>,
}

impl MockStore {
    pub fn with_tables(tables: Vec<DiningTable>) -> Self {
        Self {
            tables,
            ..Self::default()
        }
    }

    pub fn push_booking(&self, booking: Booking) {
        self.bookings.lock().unwrap().push(booking);
    }

    pub fn fail_next_writes_with_conflict(&self, count: usize) {
        self.conflicts_remaining.store(count, Ordering::SeqCst);
    }
}

#[async_trait]
impl AvailabilityStore for MockStore {
    async fn list_active_tables(&self, venue_id: VenueId) -> AppResult<Vec<DiningTable>> {
        self.table_queries.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .tables
            .iter()
            .filter(|t| t.venue_id == venue_id && t.is_active())
            .cloned()
            .collect())
    }

    async fn list_join_groups(&self, venue_id: VenueId) -> AppResult<Vec<JoinGroup>> {
        Ok(self
            .groups
            .iter()
            .filter(|g| g.venue_id == venue_id)
            .cloned()
            .collect())
    }

    async fn list_booking_windows(
        &self,
        venue_id: VenueId,
        service_id: Option<ServiceId>,
    ) -> AppResult<Vec<BookingWindow>> {
        Ok(self
            .windows
            .iter()
            .filter(|w| {
                w.venue_id == venue_id && service_id.is_none_or(|s| w.service_id == s)
            })
            .cloned()
            .collect())
    }

    async fn list_active_bookings(
        &self,
        venue_id: VenueId,
        date: NaiveDate,
    ) -> AppResult<Vec<Booking>> {
        self.booking_queries.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .bookings
            .lock()
            .unwrap()
            .iter()
            .filter(|b| {
                b.venue_id == venue_id && b.booking_date == date && b.status.occupies()
            })
            .cloned()
            .collect())
    }

    async fn list_priorities(
        &self,
        venue_id: VenueId,
        party_size: i32,
    ) -> AppResult<Vec<BookingPriority>> {
        let mut rules: Vec<_> = self
            .priorities
            .iter()
            .filter(|p| p.venue_id == venue_id && p.party_size == party_size)
            .cloned()
            .collect();
        rules.sort_by_key(|p| p.priority_rank);
        Ok(rules)
    }

    async fn write_booking_allocation(
        &self,
        booking_id: BookingId,
        table_ids: Option<&[TableId]>,
        is_unallocated: bool,
    ) -> AppResult<()> {
        let remaining = self.conflicts_remaining.load(Ordering::SeqCst);
        if table_ids.is_some() && remaining > 0 {
            self.conflicts_remaining
                .store(remaining - 1, Ordering::SeqCst);
            return Err(AppError::conflict(
                "Table was claimed by another booking for an overlapping interval",
            ));
        }
        self.writes.lock().unwrap().push((
            booking_id,
            table_ids.map(<[TableId]>::to_vec),
            is_unallocated,
        ));
        Ok(())
    }
}

pub fn table(venue_id: VenueId, id: i64, seats: i32) -> DiningTable {
    DiningTable {
        id: TableId::from_raw(id),
        venue_id,
        label: format!("T{id}"),
        seats,
        status: TableStatus::Active,
        online_bookable: true,
        priority_rank: 0,
    }
}

pub fn group(
    venue_id: VenueId,
    id: i64,
    table_ids: &[i64],
    min_party: i32,
    max_party: i32,
) -> JoinGroup {
    JoinGroup {
        id: JoinGroupId::from_raw(id),
        venue_id,
        name: format!("G{id}"),
        table_ids: table_ids.iter().copied().map(TableId::from_raw).collect(),
        min_party_size: min_party,
        max_party_size: max_party,
    }
}

pub fn window(venue_id: VenueId, days: &[DayOfWeek], start: &str, end: &str) -> BookingWindow {
    BookingWindow {
        id: WindowId::new(),
        venue_id,
        service_id: ServiceId::new(),
        days: days.to_vec(),
        start_time: start.parse().unwrap(),
        end_time: end.parse().unwrap(),
        valid_from: None,
        valid_until: None,
        blackouts: Vec::new(),
    }
}

pub fn booking(
    venue_id: VenueId,
    table_ids: &[i64],
    date: NaiveDate,
    start: &str,
    duration: Option<i32>,
    status: BookingStatus,
) -> Booking {
    Booking {
        id: BookingId::new(),
        venue_id,
        table_ids: table_ids.iter().copied().map(TableId::from_raw).collect(),
        guest_name: "Jordan".to_string(),
        guest_email: None,
        guest_phone: None,
        party_size: 2,
        booking_date: date,
        start_time: start.parse().unwrap(),
        duration_minutes: duration,
        status,
        is_unallocated: table_ids.is_empty(),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub fn priority(
    venue_id: VenueId,
    party_size: i32,
    item_type: PriorityItemType,
    item_id: i64,
    rank: i32,
) -> BookingPriority {
    BookingPriority {
        venue_id,
        party_size,
        item_type,
        item_id,
        priority_rank: rank,
    }
}

pub fn fresh_cache() -> AvailabilityCache {
    let config = CacheConfig::default();
    let provider = Arc::new(MemoryCacheProvider::new(&config.memory, 60));
    AvailabilityCache::new(provider, &config)
}

pub fn availability_engine(store: Arc<MockStore>) -> AvailabilityEngine {
    AvailabilityEngine::new(store, fresh_cache(), BookingConfig::default())
}

pub fn allocation_engine(store: Arc<MockStore>) -> AllocationEngine {
    AllocationEngine::new(store, fresh_cache(), BookingConfig::default())
}

pub fn time(s: &str) -> TimeOfDay {
    s.parse().unwrap()
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}
