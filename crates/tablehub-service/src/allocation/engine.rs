//! Table selection and the allocation write path.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{info, warn};

use tablehub_cache::AvailabilityCache;
use tablehub_core::config::booking::BookingConfig;
use tablehub_core::events::BookingEvent;
use tablehub_core::result::AppResult;
use tablehub_core::traits::Service;
use tablehub_core::types::availability::AllocationOutcome;
use tablehub_core::types::id::{BookingId, TableId, VenueId};
use tablehub_core::types::time::TimeOfDay;
use tablehub_entity::booking::Booking;
use tablehub_entity::join_group::JoinGroup;
use tablehub_entity::priority::BookingPriority;
use tablehub_entity::store::AvailabilityStore;
use tablehub_entity::table::DiningTable;

use crate::availability::engine::{group_is_free, qualifying_tables, validate_party_size};
use crate::availability::suggest::suggest_times;
use crate::occupancy::occupied_table_ids;

/// Selects the concrete table(s) for a positive availability verdict and
/// persists the assignment.
///
/// Selection order is strict, first match wins: exact-party-size priority
/// rules by ascending rank, then join-groups for large parties, then the
/// tightest-fitting individual table. Finding nothing is a documented
/// negative outcome, never an error.
#[derive(Clone)]
pub struct AllocationEngine {
    store: Arc<dyn AvailabilityStore>,
    cache: AvailabilityCache,
    config: BookingConfig,
}

impl std::fmt::Debug for AllocationEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AllocationEngine").finish()
    }
}

impl Service for AllocationEngine {}

impl AllocationEngine {
    /// Create a new allocation engine.
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

    /// Decide which table(s) would seat the party, without persisting
    /// anything.
    pub async fn allocate(
        &self,
        venue_id: VenueId,
        date: NaiveDate,
        time: TimeOfDay,
        party_size: i32,
        duration_minutes: Option<u32>,
    ) -> AppResult<AllocationOutcome> {
        validate_party_size(party_size)?;
        let duration = duration_minutes.unwrap_or(self.config.default_duration_minutes);

        let tables = self.store.list_active_tables(venue_id).await?;
        let groups = self.store.list_join_groups(venue_id).await?;
        let priorities = self.store.list_priorities(venue_id, party_size).await?;
        let bookings = self.store.list_active_bookings(venue_id, date).await?;

        let occupied = occupied_table_ids(
            &bookings,
            time,
            duration,
            self.config.default_duration_minutes,
        );

        Ok(self.decide(
            &tables, &groups, &priorities, &bookings, &occupied, time, party_size, duration,
        ))
    }

    /// Allocate and persist the assignment for a booking.
    ///
    /// On a write-time conflict (another booking claimed a table between
    /// the occupancy read and the write) the decision is retried exactly
    /// once with fresh occupancy; a second conflict degrades to an
    /// unallocated booking awaiting staff seating. The affected venue/date
    /// cache entries are invalidated on every outcome that mutates state.
    pub async fn allocate_booking(
        &self,
        booking_id: BookingId,
        venue_id: VenueId,
        date: NaiveDate,
        time: TimeOfDay,
        party_size: i32,
        duration_minutes: Option<u32>,
    ) -> AppResult<AllocationOutcome> {
        let outcome = self
            .allocate(venue_id, date, time, party_size, duration_minutes)
            .await?;

        let table_ids = match outcome {
            AllocationOutcome::Seated { table_ids } => table_ids,
            unallocated @ AllocationOutcome::Unallocated { .. } => {
                return self
                    .mark_unallocated(booking_id, venue_id, date, unallocated)
                    .await;
            }
        };

        match self
            .store
            .write_booking_allocation(booking_id, Some(&table_ids), false)
            .await
        {
            Ok(()) => {
                self.finish_seated(booking_id, venue_id, date, table_ids)
                    .await
            }
            Err(e) if e.is_conflict() => {
                warn!(
                    booking_id = %booking_id,
                    venue_id = %venue_id,
                    %date,
                    "Allocation conflict, retrying with fresh occupancy"
                );
                self.retry_once(booking_id, venue_id, date, time, party_size, duration_minutes)
                    .await
            }
            Err(e) => Err(e),
        }
    }

    async fn retry_once(
        &self,
        booking_id: BookingId,
        venue_id: VenueId,
        date: NaiveDate,
        time: TimeOfDay,
        party_size: i32,
        duration_minutes: Option<u32>,
    ) -> AppResult<AllocationOutcome> {
        let retried = self
            .allocate(venue_id, date, time, party_size, duration_minutes)
            .await?;

        let table_ids = match retried {
            AllocationOutcome::Seated { table_ids } => table_ids,
            unallocated @ AllocationOutcome::Unallocated { .. } => {
                return self
                    .mark_unallocated(booking_id, venue_id, date, unallocated)
                    .await;
            }
        };

        match self
            .store
            .write_booking_allocation(booking_id, Some(&table_ids), false)
            .await
        {
            Ok(()) => {
                self.finish_seated(booking_id, venue_id, date, table_ids)
                    .await
            }
            Err(e) if e.is_conflict() => {
                warn!(
                    booking_id = %booking_id,
                    venue_id = %venue_id,
                    %date,
                    "Allocation conflict persisted after retry, leaving booking unallocated"
                );
                let fallback = AllocationOutcome::Unallocated {
                    reason: "fully booked".to_string(),
                    alternatives: Vec::new(),
                };
                self.mark_unallocated(booking_id, venue_id, date, fallback)
                    .await
            }
            Err(e) => Err(e),
        }
    }

    async fn finish_seated(
        &self,
        booking_id: BookingId,
        venue_id: VenueId,
        date: NaiveDate,
        table_ids: Vec<TableId>,
    ) -> AppResult<AllocationOutcome> {
        self.cache
            .apply_event(&BookingEvent::Allocated {
                booking_id,
                venue_id,
                date,
                table_ids: table_ids.clone(),
            })
            .await?;
        info!(
            booking_id = %booking_id,
            venue_id = %venue_id,
            %date,
            tables = table_ids.len(),
            "Booking allocated"
        );
        Ok(AllocationOutcome::Seated { table_ids })
    }

    async fn mark_unallocated(
        &self,
        booking_id: BookingId,
        venue_id: VenueId,
        date: NaiveDate,
        outcome: AllocationOutcome,
    ) -> AppResult<AllocationOutcome> {
        self.store
            .write_booking_allocation(booking_id, None, true)
            .await?;
        self.cache
            .apply_event(&BookingEvent::Unallocated {
                booking_id,
                venue_id,
                date,
            })
            .await?;
        info!(
            booking_id = %booking_id,
            venue_id = %venue_id,
            %date,
            "Booking left unallocated for manual seating"
        );
        Ok(outcome)
    }

    /// The strict selection order.
    #[allow(clippy::too_many_arguments)]
    fn decide(
        &self,
        tables: &[DiningTable],
        groups: &[JoinGroup],
        priorities: &[BookingPriority],
        bookings: &[Booking],
        occupied: &HashSet<TableId>,
        time: TimeOfDay,
        party_size: i32,
        duration: u32,
    ) -> AllocationOutcome {
        let active_ids: HashMap<TableId, &DiningTable> =
            tables.iter().map(|t| (t.id, t)).collect();

        // 1. Explicit staff priorities for this exact party size.
        if let Some(table_ids) =
            priority_pick(priorities, groups, &active_ids, occupied, party_size)
        {
            return AllocationOutcome::Seated { table_ids };
        }

        // 2. Join-groups for large parties.
        if party_size >= self.config.large_party_threshold {
            if let Some(group) = groups
                .iter()
                .find(|g| g.fits(party_size) && group_is_free(g, &active_ids, occupied))
            {
                return AllocationOutcome::Seated {
                    table_ids: group.table_ids.clone(),
                };
            }
        }

        // 3. Best-fit individual table: fewest wasted seats, then rank.
        let qualifying = qualifying_tables(tables, party_size);
        if let Some(best) = qualifying
            .iter()
            .filter(|t| !occupied.contains(&t.id))
            .min_by_key(|t| (t.seats, t.priority_rank, t.id))
        {
            return AllocationOutcome::Seated {
                table_ids: vec![best.id],
            };
        }

        // 4. Nothing fits.
        let reason = if qualifying.is_empty() && !groups.iter().any(|g| g.fits(party_size)) {
            "no tables for this party size".to_string()
        } else {
            "fully booked".to_string()
        };
        AllocationOutcome::Unallocated {
            reason,
            alternatives: suggest_times(&qualifying, bookings, time, duration, &self.config),
        }
    }
}

/// Apply priority rules in rank order; first satisfiable rule wins.
fn priority_pick(
    priorities: &[BookingPriority],
    groups: &[JoinGroup],
    active_ids: &HashMap<TableId, &DiningTable>,
    occupied: &HashSet<TableId>,
    party_size: i32,
) -> Option<Vec<TableId>> {
    for rule in priorities {
        if rule.party_size != party_size {
            continue;
        }
        if let Some(table_id) = rule.table_target() {
            if let Some(table) = active_ids.get(&table_id) {
                if table.seats_party(party_size) && !occupied.contains(&table_id) {
                    return Some(vec![table_id]);
                }
            }
        }
        if let Some(group_id) = rule.group_target() {
            if let Some(group) = groups.iter().find(|g| g.id == group_id) {
                if group.fits(party_size) && group_is_free(group, active_ids, occupied) {
                    return Some(group.table_ids.clone());
                }
            }
        }
    }
    None
}
