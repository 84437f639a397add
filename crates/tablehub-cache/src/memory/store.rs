//! In-memory cache implementation using the moka crate.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use moka::future::Cache;
use tracing::debug;

use tablehub_core::config::cache::MemoryCacheConfig;
use tablehub_core::result::AppResult;
use tablehub_core::traits::cache::CacheProvider;

/// A cached value together with its own expiry deadline.
///
/// moka enforces capacity and a cache-wide upper-bound TTL; per-entry
/// TTLs shorter than that bound are checked lazily on read.
#[derive(Debug, Clone)]
struct CachedEntry {
    value: String,
    expires_at: Instant,
}

impl CachedEntry {
    fn is_expired(&self) -> bool {
        self.expires_at <= Instant::now()
    }
}

/// In-memory cache provider using moka.
#[derive(Debug, Clone)]
pub struct MemoryCacheProvider {
    /// The underlying moka cache.
    cache: Cache<String, CachedEntry>,
    /// Default TTL for entries.
    default_ttl: Duration,
}

impl MemoryCacheProvider {
    /// Create a new in-memory cache from configuration.
    pub fn new(config: &MemoryCacheConfig, default_ttl_seconds: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(config.max_capacity)
            .time_to_live(Duration::from_secs(config.time_to_live_seconds))
            .build();

        Self {
            cache,
            default_ttl: Duration::from_secs(default_ttl_seconds),
        }
    }

    async fn live_entry(&self, key: &str) -> Option<CachedEntry> {
        match self.cache.get(key).await {
            Some(entry) if entry.is_expired() => {
                self.cache.invalidate(key).await;
                None
            }
            other => other,
        }
    }
}

#[async_trait]
impl CacheProvider for MemoryCacheProvider {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.live_entry(key).await.map(|entry| entry.value))
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> AppResult<()> {
        let entry = CachedEntry {
            value: value.to_string(),
            expires_at: Instant::now() + ttl,
        };
        self.cache.insert(key.to_string(), entry).await;
        Ok(())
    }

    async fn set_default(&self, key: &str, value: &str) -> AppResult<()> {
        self.set(key, value, self.default_ttl).await
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        self.cache.invalidate(key).await;
        Ok(())
    }

    async fn exists(&self, key: &str) -> AppResult<bool> {
        Ok(self.live_entry(key).await.is_some())
    }

    async fn delete_pattern(&self, pattern: &str) -> AppResult<u64> {
        // Flush pending inserts so the iterator sees entries written
        // immediately before an invalidation.
        self.cache.run_pending_tasks().await;

        // Convert glob pattern to prefix matching.
        // Moka doesn't support pattern scanning, so we iterate.
        let prefix = pattern.trim_end_matches('*');
        let mut count = 0u64;

        // Collect keys to remove (we can't mutate while iterating).
        let keys_to_remove: Vec<String> = self
            .cache
            .iter()
            .filter(|entry| entry.0.starts_with(prefix))
            .map(|entry| entry.0.to_string())
            .collect();

        for key in keys_to_remove {
            self.cache.invalidate(&key).await;
            count += 1;
        }

        debug!(pattern, count, "Deleted keys matching pattern");
        Ok(count)
    }

    async fn set_nx(&self, key: &str, value: &str, ttl: Duration) -> AppResult<bool> {
        // get-then-insert; acceptable for a single-node in-memory cache.
        if self.live_entry(key).await.is_some() {
            return Ok(false);
        }
        self.set(key, value, ttl).await?;
        Ok(true)
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }

    async fn flush_all(&self) -> AppResult<()> {
        self.cache.invalidate_all();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tablehub_core::config::cache::MemoryCacheConfig;

    fn make_provider() -> MemoryCacheProvider {
        let config = MemoryCacheConfig {
            max_capacity: 1000,
            time_to_live_seconds: 60,
        };
        MemoryCacheProvider::new(&config, 60)
    }

    #[tokio::test]
    async fn test_set_get() {
        let provider = make_provider();
        provider
            .set("key1", "value1", Duration::from_secs(60))
            .await
            .unwrap();
        let val = provider.get("key1").await.unwrap();
        assert_eq!(val, Some("value1".to_string()));
    }

    #[tokio::test]
    async fn test_delete() {
        let provider = make_provider();
        provider
            .set("key2", "value2", Duration::from_secs(60))
            .await
            .unwrap();
        provider.delete("key2").await.unwrap();
        let val = provider.get("key2").await.unwrap();
        assert_eq!(val, None);
    }

    #[tokio::test]
    async fn test_per_entry_ttl_expires_on_read() {
        let provider = make_provider();
        provider
            .set("fleeting", "value", Duration::from_millis(0))
            .await
            .unwrap();
        let val = provider.get("fleeting").await.unwrap();
        assert_eq!(val, None);
    }

    #[tokio::test]
    async fn test_delete_pattern() {
        let provider = make_provider();
        provider
            .set("avail:v1:a", "1", Duration::from_secs(60))
            .await
            .unwrap();
        provider
            .set("avail:v1:b", "2", Duration::from_secs(60))
            .await
            .unwrap();
        provider
            .set("avail:v2:a", "3", Duration::from_secs(60))
            .await
            .unwrap();

        let removed = provider.delete_pattern("avail:v1:*").await.unwrap();
        assert_eq!(removed, 2);
        assert_eq!(provider.get("avail:v1:a").await.unwrap(), None);
        assert_eq!(
            provider.get("avail:v2:a").await.unwrap(),
            Some("3".to_string())
        );
    }

    #[tokio::test]
    async fn test_set_nx() {
        let provider = make_provider();
        let first = provider
            .set_nx("nx_key", "val", Duration::from_secs(60))
            .await
            .unwrap();
        assert!(first);
        let second = provider
            .set_nx("nx_key", "val2", Duration::from_secs(60))
            .await
            .unwrap();
        assert!(!second);
    }

    #[tokio::test]
    async fn test_json_roundtrip() {
        let provider = make_provider();
        let data = serde_json::json!({"name": "test", "count": 42});
        provider
            .set_json("json_key", &data, Duration::from_secs(60))
            .await
            .unwrap();
        let result: Option<serde_json::Value> = provider.get_json("json_key").await.unwrap();
        assert_eq!(result, Some(data));
    }

    #[tokio::test]
    async fn test_health_check() {
        let provider = make_provider();
        assert!(provider.health_check().await.unwrap());
    }
}
