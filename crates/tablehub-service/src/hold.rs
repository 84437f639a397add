//! Advisory slot holds taken while a guest completes their details.
//!
//! Holds reduce contention on popular slots; they are not a correctness
//! mechanism. The database-level conflict check at allocation write time
//! is what prevents double-booking.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use dashmap::DashMap;
use tracing::debug;

use tablehub_core::config::booking::BookingConfig;
use tablehub_core::result::AppResult;
use tablehub_core::traits::Service;
use tablehub_core::traits::hold::{HoldToken, SlotHold};
use tablehub_core::types::id::{HoldId, VenueId};
use tablehub_core::types::time::{TimeOfDay, intervals_overlap};

/// A live hold on a venue/date interval.
#[derive(Debug, Clone)]
struct HoldEntry {
    id: HoldId,
    start: i32,
    end: i32,
    expires_at: chrono::DateTime<Utc>,
}

impl HoldEntry {
    fn is_expired(&self) -> bool {
        self.expires_at <= Utc::now()
    }
}

/// In-process implementation of [`SlotHold`] with TTL expiry.
#[derive(Debug, Clone)]
pub struct SlotHoldService {
    holds: Arc<DashMap<(VenueId, NaiveDate), Vec<HoldEntry>>>,
    index: Arc<DashMap<HoldId, (VenueId, NaiveDate)>>,
    ttl: Duration,
}

impl Service for SlotHoldService {}

impl SlotHoldService {
    /// Create a hold service with the configured TTL.
    pub fn new(config: &BookingConfig) -> Self {
        Self {
            holds: Arc::new(DashMap::new()),
            index: Arc::new(DashMap::new()),
            ttl: Duration::from_secs(config.hold_ttl_seconds),
        }
    }
}

#[async_trait]
impl SlotHold for SlotHoldService {
    async fn acquire(
        &self,
        venue_id: VenueId,
        date: NaiveDate,
        start: TimeOfDay,
        duration_minutes: u32,
    ) -> AppResult<Option<HoldToken>> {
        let start_m = start.as_i32();
        let end_m = start_m + duration_minutes as i32;

        let mut entries = self.holds.entry((venue_id, date)).or_default();
        entries.retain(|h| {
            let live = !h.is_expired();
            if !live {
                self.index.remove(&h.id);
            }
            live
        });

        let blocked = entries
            .iter()
            .any(|h| intervals_overlap(start_m, end_m, h.start, h.end));
        if blocked {
            debug!(venue_id = %venue_id, %date, %start, "Slot already held");
            return Ok(None);
        }

        let entry = HoldEntry {
            id: HoldId::new(),
            start: start_m,
            end: end_m,
            expires_at: Utc::now()
                + chrono::Duration::from_std(self.ttl).unwrap_or(chrono::Duration::zero()),
        };
        let token = HoldToken {
            id: entry.id,
            expires_at: entry.expires_at,
        };
        self.index.insert(entry.id, (venue_id, date));
        entries.push(entry);
        Ok(Some(token))
    }

    async fn release(&self, hold_id: HoldId) -> AppResult<()> {
        if let Some((_, key)) = self.index.remove(&hold_id) {
            if let Some(mut entries) = self.holds.get_mut(&key) {
                entries.retain(|h| h.id != hold_id);
            }
        }
        Ok(())
    }

    async fn purge_expired(&self) -> AppResult<u64> {
        let mut removed = 0u64;
        for mut slot in self.holds.iter_mut() {
            let before = slot.len();
            slot.retain(|h| {
                let live = !h.is_expired();
                if !live {
                    self.index.remove(&h.id);
                }
                live
            });
            removed += (before - slot.len()) as u64;
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service_with_ttl(seconds: u64) -> SlotHoldService {
        let config = BookingConfig {
            hold_ttl_seconds: seconds,
            ..BookingConfig::default()
        };
        SlotHoldService::new(&config)
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    fn time(s: &str) -> TimeOfDay {
        s.parse().unwrap()
    }

    #[tokio::test]
    async fn test_overlapping_hold_is_refused() {
        let holds = service_with_ttl(600);
        let venue = VenueId::new();
        let first = holds
            .acquire(venue, date(), time("19:00"), 120)
            .await
            .unwrap();
        assert!(first.is_some());
        let second = holds
            .acquire(venue, date(), time("20:00"), 120)
            .await
            .unwrap();
        assert!(second.is_none());
    }

    #[tokio::test]
    async fn test_touching_hold_is_allowed() {
        let holds = service_with_ttl(600);
        let venue = VenueId::new();
        holds
            .acquire(venue, date(), time("17:00"), 120)
            .await
            .unwrap()
            .expect("first hold");
        let second = holds
            .acquire(venue, date(), time("19:00"), 120)
            .await
            .unwrap();
        assert!(second.is_some());
    }

    #[tokio::test]
    async fn test_release_frees_the_slot() {
        let holds = service_with_ttl(600);
        let venue = VenueId::new();
        let token = holds
            .acquire(venue, date(), time("19:00"), 120)
            .await
            .unwrap()
            .expect("hold");
        holds.release(token.id).await.unwrap();
        let again = holds
            .acquire(venue, date(), time("19:00"), 120)
            .await
            .unwrap();
        assert!(again.is_some());
    }

    #[tokio::test]
    async fn test_expired_hold_no_longer_blocks() {
        let holds = service_with_ttl(0);
        let venue = VenueId::new();
        holds
            .acquire(venue, date(), time("19:00"), 120)
            .await
            .unwrap()
            .expect("hold");
        let again = holds
            .acquire(venue, date(), time("19:00"), 120)
            .await
            .unwrap();
        assert!(again.is_some());
    }

    #[tokio::test]
    async fn test_purge_counts_expired_holds() {
        let holds = service_with_ttl(0);
        let venue = VenueId::new();
        let other_date = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
        holds
            .acquire(venue, date(), time("12:00"), 60)
            .await
            .unwrap();
        holds
            .acquire(venue, other_date, time("19:00"), 60)
            .await
            .unwrap();
        assert_eq!(holds.purge_expired().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_different_venues_do_not_collide() {
        let holds = service_with_ttl(600);
        holds
            .acquire(VenueId::new(), date(), time("19:00"), 120)
            .await
            .unwrap()
            .expect("first venue");
        holds
            .acquire(VenueId::new(), date(), time("19:00"), 120)
            .await
            .unwrap()
            .expect("second venue");
    }
}
