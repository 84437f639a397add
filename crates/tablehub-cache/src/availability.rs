//! Typed memoization of availability verdicts.
//!
//! Date verdicts live longer than slot verdicts (a date scan is the
//! expensive query shape), and every entry for a venue/date pair is
//! dropped the moment a booking on that date mutates.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use tracing::debug;

use tablehub_core::config::cache::CacheConfig;
use tablehub_core::events::BookingEvent;
use tablehub_core::result::AppResult;
use tablehub_core::traits::cache::CacheProvider;
use tablehub_core::types::availability::{SlotSeating, SlotVerdict};
use tablehub_core::types::id::VenueId;
use tablehub_core::types::time::TimeOfDay;

use crate::keys;

/// Short-TTL memoization of availability results.
///
/// Constructor-injected wherever the engines need it; invalidation is
/// part of the contract, not an afterthought scattered through call
/// sites.
#[derive(Debug, Clone)]
pub struct AvailabilityCache {
    provider: Arc<dyn CacheProvider>,
    date_ttl: Duration,
    slot_ttl: Duration,
}

impl AvailabilityCache {
    /// Create a cache over the given provider.
    pub fn new(provider: Arc<dyn CacheProvider>, config: &CacheConfig) -> Self {
        Self {
            provider,
            date_ttl: Duration::from_secs(config.date_ttl_seconds),
            slot_ttl: Duration::from_secs(config.slot_ttl_seconds),
        }
    }

    /// Look up a memoized whole-date verdict.
    pub async fn get_date(
        &self,
        venue_id: VenueId,
        date: NaiveDate,
        party_size: i32,
    ) -> AppResult<Option<bool>> {
        self.get(&keys::date_availability(venue_id, date, party_size))
            .await
    }

    /// Memoize a whole-date verdict.
    pub async fn put_date(
        &self,
        venue_id: VenueId,
        date: NaiveDate,
        party_size: i32,
        available: bool,
    ) -> AppResult<()> {
        self.put(
            &keys::date_availability(venue_id, date, party_size),
            &available,
            self.date_ttl,
        )
        .await
    }

    /// Look up a memoized time-slot verdict.
    pub async fn get_slot(
        &self,
        venue_id: VenueId,
        date: NaiveDate,
        party_size: i32,
        time: TimeOfDay,
        duration_minutes: u32,
    ) -> AppResult<Option<SlotVerdict>> {
        self.get(&keys::time_slot(
            venue_id,
            date,
            party_size,
            time,
            duration_minutes,
        ))
        .await
    }

    /// Memoize a time-slot verdict.
    pub async fn put_slot(
        &self,
        venue_id: VenueId,
        date: NaiveDate,
        party_size: i32,
        time: TimeOfDay,
        duration_minutes: u32,
        verdict: &SlotVerdict,
    ) -> AppResult<()> {
        self.put(
            &keys::time_slot(venue_id, date, party_size, time, duration_minutes),
            verdict,
            self.slot_ttl,
        )
        .await
    }

    /// Look up a memoized join-group-aware slot map.
    pub async fn get_slot_map(
        &self,
        venue_id: VenueId,
        date: NaiveDate,
        party_size: i32,
        start: TimeOfDay,
        end: TimeOfDay,
        duration_minutes: u32,
    ) -> AppResult<Option<BTreeMap<TimeOfDay, SlotSeating>>> {
        self.get(&keys::slot_map(
            venue_id,
            date,
            party_size,
            start,
            end,
            duration_minutes,
        ))
        .await
    }

    /// Memoize a join-group-aware slot map.
    pub async fn put_slot_map(
        &self,
        venue_id: VenueId,
        date: NaiveDate,
        party_size: i32,
        start: TimeOfDay,
        end: TimeOfDay,
        duration_minutes: u32,
        map: &BTreeMap<TimeOfDay, SlotSeating>,
    ) -> AppResult<()> {
        self.put(
            &keys::slot_map(venue_id, date, party_size, start, end, duration_minutes),
            map,
            self.slot_ttl,
        )
        .await
    }

    /// Drop every availability entry for a venue and date.
    pub async fn invalidate_venue_date(
        &self,
        venue_id: VenueId,
        date: NaiveDate,
    ) -> AppResult<u64> {
        let removed = self
            .provider
            .delete_pattern(&keys::venue_date_pattern(venue_id, date))
            .await?;
        debug!(venue_id = %venue_id, %date, removed, "Invalidated availability cache");
        Ok(removed)
    }

    /// Invalidate in response to a booking mutation event.
    pub async fn apply_event(&self, event: &BookingEvent) -> AppResult<u64> {
        self.invalidate_venue_date(event.venue_id(), event.date())
            .await
    }

    async fn get<T: serde::de::DeserializeOwned>(&self, key: &str) -> AppResult<Option<T>> {
        match self.provider.get(key).await? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    async fn put<T: serde::Serialize>(&self, key: &str, value: &T, ttl: Duration) -> AppResult<()> {
        let raw = serde_json::to_string(value)?;
        self.provider.set(key, &raw, ttl).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tablehub_core::types::id::BookingId;

    use crate::memory::MemoryCacheProvider;

    fn make_cache() -> AvailabilityCache {
        let config = CacheConfig::default();
        let provider = Arc::new(MemoryCacheProvider::new(&config.memory, 60));
        AvailabilityCache::new(provider, &config)
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    #[tokio::test]
    async fn test_date_roundtrip() {
        let cache = make_cache();
        let venue = VenueId::new();
        assert_eq!(cache.get_date(venue, date(), 4).await.unwrap(), None);
        cache.put_date(venue, date(), 4, true).await.unwrap();
        assert_eq!(cache.get_date(venue, date(), 4).await.unwrap(), Some(true));
    }

    #[tokio::test]
    async fn test_slot_roundtrip() {
        let cache = make_cache();
        let venue = VenueId::new();
        let time: TimeOfDay = "19:00".parse().unwrap();
        let verdict = SlotVerdict::fully_booked(vec!["17:00".parse().unwrap()]);
        cache
            .put_slot(venue, date(), 4, time, 120, &verdict)
            .await
            .unwrap();
        let cached = cache.get_slot(venue, date(), 4, time, 120).await.unwrap();
        assert_eq!(cached, Some(verdict));
    }

    #[tokio::test]
    async fn test_event_invalidates_venue_date() {
        let cache = make_cache();
        let venue = VenueId::new();
        let other_date = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
        cache.put_date(venue, date(), 4, true).await.unwrap();
        cache.put_date(venue, other_date, 4, false).await.unwrap();

        let event = BookingEvent::Created {
            booking_id: BookingId::new(),
            venue_id: venue,
            date: date(),
        };
        cache.apply_event(&event).await.unwrap();

        assert_eq!(cache.get_date(venue, date(), 4).await.unwrap(), None);
        assert_eq!(
            cache.get_date(venue, other_date, 4).await.unwrap(),
            Some(false)
        );
    }
}
