//! Availability decisions: date scans, slot checks, and the
//! join-group-aware slot map.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;

use chrono::NaiveDate;
use futures::future::try_join_all;
use tracing::debug;

use tablehub_cache::AvailabilityCache;
use tablehub_core::config::booking::BookingConfig;
use tablehub_core::error::AppError;
use tablehub_core::result::AppResult;
use tablehub_core::traits::Service;
use tablehub_core::types::availability::{Seating, SlotSeating, SlotVerdict};
use tablehub_core::types::id::{TableId, VenueId};
use tablehub_core::types::time::{TimeOfDay, slots_between};
use tablehub_entity::join_group::JoinGroup;
use tablehub_entity::store::AvailabilityStore;
use tablehub_entity::table::DiningTable;

use crate::availability::suggest::suggest_times;
use crate::occupancy::occupied_table_ids;

/// Decides whether a party can be seated on a date or at a time.
///
/// Guest-facing date/time pickers use the cheap individual-table checks
/// ([`is_date_available`], [`check_time_slot`]); staff and large-party
/// flows use the join-group-aware [`slot_map`]. All three share the one
/// occupancy primitive.
///
/// [`is_date_available`]: AvailabilityEngine::is_date_available
/// [`check_time_slot`]: AvailabilityEngine::check_time_slot
/// [`slot_map`]: AvailabilityEngine::slot_map
#[derive(Clone)]
pub struct AvailabilityEngine {
    store: Arc<dyn AvailabilityStore>,
    cache: AvailabilityCache,
    config: BookingConfig,
}

impl std::fmt::Debug for AvailabilityEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AvailabilityEngine").finish()
    }
}

impl Service for AvailabilityEngine {}

impl AvailabilityEngine {
    /// Create a new availability engine.
    pub fn new(
        store: Arc<dyn AvailabilityStore>,
        cache: AvailabilityCache,
        config: BookingConfig,
    ) -> Self {
        Self {
            store,
            cache,
            config,
        }
    }

    /// Whether any slot on the date can seat the party.
    ///
    /// Short-circuits before touching table or booking queries when no
    /// booking window covers the date. A venue with no windows or no
    /// qualifying tables is simply unavailable, not an error.
    pub async fn is_date_available(
        &self,
        venue_id: VenueId,
        date: NaiveDate,
        party_size: i32,
    ) -> AppResult<bool> {
        validate_party_size(party_size)?;

        if let Some(cached) = self.cache.get_date(venue_id, date, party_size).await? {
            return Ok(cached);
        }

        let available = self.compute_date_available(venue_id, date, party_size).await?;
        self.cache
            .put_date(venue_id, date, party_size, available)
            .await?;
        Ok(available)
    }

    async fn compute_date_available(
        &self,
        venue_id: VenueId,
        date: NaiveDate,
        party_size: i32,
    ) -> AppResult<bool> {
        let windows = self.store.list_booking_windows(venue_id, None).await?;
        if windows.is_empty() {
            debug!(venue_id = %venue_id, "No booking windows configured");
            return Ok(false);
        }

        let applicable: Vec<_> = windows.iter().filter(|w| w.applies_on(date)).collect();
        if applicable.is_empty() {
            return Ok(false);
        }

        let tables = self.store.list_active_tables(venue_id).await?;
        let qualifying = qualifying_tables(&tables, party_size);
        if qualifying.is_empty() {
            debug!(venue_id = %venue_id, party_size, "No qualifying tables");
            return Ok(false);
        }

        let bookings = self.store.list_active_bookings(venue_id, date).await?;
        let duration = self.config.default_duration_minutes;

        for window in applicable {
            for slot in slots_between(
                window.start_time,
                window.end_time,
                self.config.slot_granularity_minutes,
            ) {
                let occupied =
                    occupied_table_ids(&bookings, slot, duration, duration);
                if qualifying.iter().any(|t| !occupied.contains(&t.id)) {
                    return Ok(true);
                }
            }
        }
        Ok(false)
    }

    /// Check one requested time for the party, suggesting alternatives
    /// when it is fully booked.
    pub async fn check_time_slot(
        &self,
        venue_id: VenueId,
        date: NaiveDate,
        time: TimeOfDay,
        party_size: i32,
        duration_minutes: Option<u32>,
    ) -> AppResult<SlotVerdict> {
        validate_party_size(party_size)?;
        let duration = duration_minutes.unwrap_or(self.config.default_duration_minutes);

        if let Some(cached) = self
            .cache
            .get_slot(venue_id, date, party_size, time, duration)
            .await?
        {
            return Ok(cached);
        }

        let tables = self.store.list_active_tables(venue_id).await?;
        let qualifying = qualifying_tables(&tables, party_size);
        let verdict = if qualifying.is_empty() {
            SlotVerdict::no_tables()
        } else {
            let bookings = self.store.list_active_bookings(venue_id, date).await?;
            let occupied = occupied_table_ids(
                &bookings,
                time,
                duration,
                self.config.default_duration_minutes,
            );
            if qualifying.iter().any(|t| !occupied.contains(&t.id)) {
                SlotVerdict::open()
            } else {
                SlotVerdict::fully_booked(suggest_times(
                    &qualifying,
                    &bookings,
                    time,
                    duration,
                    &self.config,
                ))
            }
        };

        self.cache
            .put_slot(venue_id, date, party_size, time, duration, &verdict)
            .await?;
        Ok(verdict)
    }

    /// Join-group-aware availability for every slot in a time window,
    /// bounds inclusive.
    ///
    /// Join-groups are checked before individual tables, so large-party
    /// flows see combinations first.
    pub async fn slot_map(
        &self,
        venue_id: VenueId,
        date: NaiveDate,
        start: TimeOfDay,
        end: TimeOfDay,
        party_size: i32,
        duration_minutes: Option<u32>,
    ) -> AppResult<BTreeMap<TimeOfDay, SlotSeating>> {
        validate_party_size(party_size)?;
        if start > end {
            return Err(AppError::validation(format!(
                "Window start {start} is after end {end}"
            )));
        }
        let duration = duration_minutes.unwrap_or(self.config.default_duration_minutes);

        if let Some(cached) = self
            .cache
            .get_slot_map(venue_id, date, party_size, start, end, duration)
            .await?
        {
            return Ok(cached);
        }

        let tables = self.store.list_active_tables(venue_id).await?;
        let groups = self.store.list_join_groups(venue_id).await?;
        let bookings = self.store.list_active_bookings(venue_id, date).await?;

        let qualifying = qualifying_tables(&tables, party_size);
        let active_ids: HashMap<TableId, &DiningTable> =
            tables.iter().map(|t| (t.id, t)).collect();

        let mut map = BTreeMap::new();
        let step = i32::from(self.config.slot_granularity_minutes.max(1));
        let mut slot = Some(start);
        while let Some(time) = slot {
            if time > end {
                break;
            }
            let occupied = occupied_table_ids(
                &bookings,
                time,
                duration,
                self.config.default_duration_minutes,
            );
            map.insert(
                time,
                seat_slot(&qualifying, &groups, &active_ids, &occupied, party_size),
            );
            slot = time.offset(step);
        }

        self.cache
            .put_slot_map(venue_id, date, party_size, start, end, duration, &map)
            .await?;
        Ok(map)
    }

    /// Dates in `[from, to]` with at least one open slot for the party.
    ///
    /// Dates are checked concurrently in bounded batches purely to cap
    /// outstanding store queries; results are in date order.
    pub async fn available_dates(
        &self,
        venue_id: VenueId,
        from: NaiveDate,
        to: NaiveDate,
        party_size: i32,
    ) -> AppResult<Vec<NaiveDate>> {
        validate_party_size(party_size)?;
        if from > to {
            return Err(AppError::validation(format!(
                "Date range start {from} is after end {to}"
            )));
        }

        let dates: Vec<NaiveDate> = from.iter_days().take_while(|d| *d <= to).collect();
        let batch_size = self.config.date_scan_batch_size.max(1);

        let mut open_dates = Vec::new();
        for batch in dates.chunks(batch_size) {
            let verdicts = try_join_all(
                batch
                    .iter()
                    .map(|date| self.is_date_available(venue_id, *date, party_size)),
            )
            .await?;
            open_dates.extend(
                batch
                    .iter()
                    .zip(verdicts)
                    .filter_map(|(date, open)| open.then_some(*date)),
            );
        }
        Ok(open_dates)
    }
}

/// Reject impossible party sizes before any data access.
pub(crate) fn validate_party_size(party_size: i32) -> AppResult<()> {
    if party_size < 1 {
        return Err(AppError::validation(format!(
            "Party size must be at least 1, got {party_size}"
        )));
    }
    Ok(())
}

/// Tables a guest-facing booking of this party size may use.
pub(crate) fn qualifying_tables(tables: &[DiningTable], party_size: i32) -> Vec<&DiningTable> {
    tables.iter().filter(|t| t.qualifies_for(party_size)).collect()
}

/// Whether every member table of a join-group is active and unoccupied.
pub(crate) fn group_is_free(
    group: &JoinGroup,
    active_ids: &HashMap<TableId, &DiningTable>,
    occupied: &HashSet<TableId>,
) -> bool {
    !group.table_ids.is_empty()
        && group
            .table_ids
            .iter()
            .all(|id| active_ids.contains_key(id) && !occupied.contains(id))
}

/// Decide how one slot seats the party: join-groups first, then
/// individual tables.
fn seat_slot(
    qualifying: &[&DiningTable],
    groups: &[JoinGroup],
    active_ids: &HashMap<TableId, &DiningTable>,
    occupied: &HashSet<TableId>,
    party_size: i32,
) -> SlotSeating {
    if let Some(group) = groups
        .iter()
        .find(|g| g.fits(party_size) && group_is_free(g, active_ids, occupied))
    {
        return SlotSeating {
            available: true,
            reason: format!("join group '{}' available", group.name),
            seating: Some(Seating::Group {
                id: group.id,
                name: group.name.clone(),
                table_ids: group.table_ids.clone(),
            }),
        };
    }

    if let Some(table) = qualifying.iter().find(|t| !occupied.contains(&t.id)) {
        return SlotSeating {
            available: true,
            reason: format!("table '{}' available", table.label),
            seating: Some(Seating::Table {
                id: table.id,
                label: table.label.clone(),
            }),
        };
    }

    SlotSeating {
        available: false,
        reason: "fully booked".to_string(),
        seating: None,
    }
}
