//! Cache store trait for abstracted caching operations.

use async_trait::async_trait;
use shaku::Interface;
use std::time::Duration;
use tracing::{debug, warn};

/// Best-effort key-value cache.
///
/// This trait provides an abstraction over caching implementations,
/// allowing for easy swapping between Redis, in-memory, or other backends.
///
/// Every operation is fail-open: a broken or unreachable cache behaves
/// exactly like an empty one, so callers never need their own fallback
/// logic. No method errors and none blocks past the implementation's wait
/// bound.
///
/// Uses JSON strings for type-erased storage to maintain dyn-compatibility.
#[async_trait]
pub trait CacheStore: Interface + Send + Sync {
    /// Get a raw JSON value from the cache.
    ///
    /// Returns `None` if the key doesn't exist, has expired, or the cache
    /// is disabled or unreachable.
    async fn get_raw(&self, key: &str) -> Option<String>;

    /// Set a raw JSON value in the cache with a TTL.
    ///
    /// Empty values are rejected rather than cached. Returns whether the
    /// value was stored.
    async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> bool;

    /// Delete a value from the cache.
    ///
    /// Returns `true` if the key existed and was deleted; deleting a
    /// missing key returns `false`, not an error.
    async fn delete(&self, key: &str) -> bool;

    /// Check if caching is enabled.
    fn is_enabled(&self) -> bool;
}

/// Extension trait with typed methods for convenience.
///
/// This trait provides generic get/set methods that work with any
/// serializable type, keeping the JSON boundary in one place.
#[async_trait]
pub trait CacheStoreExt: CacheStore {
    /// Get a typed value from the cache.
    ///
    /// A value that fails to deserialize is treated as a miss.
    async fn get<T: serde::de::DeserializeOwned + Send>(&self, key: &str) -> Option<T> {
        let json = self.get_raw(key).await?;
        match serde_json::from_str(&json) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Discarding undeserializable cache value for key '{}': {}", key, e);
                None
            }
        }
    }

    /// Set a typed value in the cache.
    ///
    /// Values that serialize to JSON `null` are rejected, mirroring the
    /// raw empty-write rule.
    async fn set<T: serde::Serialize + Send + Sync>(
        &self,
        key: &str,
        value: &T,
        ttl: Duration,
    ) -> bool {
        let json = match serde_json::to_string(value) {
            Ok(json) => json,
            Err(e) => {
                warn!("Refusing to cache unserializable value for key '{}': {}", key, e);
                return false;
            }
        };

        if json == "null" {
            debug!("Rejected null write for key '{}'", key);
            return false;
        }

        self.set_raw(key, &json, ttl).await
    }

    /// Get a value or fetch from the source of truth and cache it.
    ///
    /// A fetch error propagates; a failed cache write does not, since the
    /// fetched value is still valid.
    async fn get_or_fetch<T, E, F, Fut>(&self, key: &str, ttl: Duration, fetch: F) -> Result<T, E>
    where
        T: serde::Serialize + serde::de::DeserializeOwned + Send + Sync,
        E: Send,
        F: FnOnce() -> Fut + Send,
        Fut: std::future::Future<Output = Result<T, E>> + Send,
    {
        if let Some(cached) = self.get::<T>(key).await {
            return Ok(cached);
        }

        let value = fetch().await?;

        let _ = self.set(key, &value, ttl).await;

        Ok(value)
    }
}

// Blanket implementation for all CacheStore implementations
impl<T: CacheStore + ?Sized> CacheStoreExt for T {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryCacheStore;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct InventoryRow {
        sku: String,
        qty: i64,
        bins: Vec<String>,
        tracked: bool,
    }

    fn sample_rows() -> Vec<InventoryRow> {
        vec![
            InventoryRow {
                sku: "A".to_string(),
                qty: 5,
                bins: vec!["north-1".to_string(), "north-2".to_string()],
                tracked: true,
            },
            InventoryRow {
                sku: "B".to_string(),
                qty: 0,
                bins: vec![],
                tracked: false,
            },
        ]
    }

    #[tokio::test]
    async fn test_typed_round_trip() {
        let store = MemoryCacheStore::new();
        let rows = sample_rows();

        assert!(store.set("inventory:T1:", &rows, Duration::from_secs(60)).await);

        let cached: Vec<InventoryRow> = store.get("inventory:T1:").await.unwrap();
        assert_eq!(cached, rows);
    }

    #[tokio::test]
    async fn test_null_value_rejected() {
        let store = MemoryCacheStore::new();
        let nothing: Option<InventoryRow> = None;

        assert!(!store.set("inventory:T1:", &nothing, Duration::from_secs(60)).await);
        assert!(store.get_raw("inventory:T1:").await.is_none());
    }

    #[tokio::test]
    async fn test_undeserializable_value_is_a_miss() {
        let store = MemoryCacheStore::new();
        assert!(store.set_raw("product:p1", "not json", Duration::from_secs(60)).await);

        let cached: Option<Vec<InventoryRow>> = store.get("product:p1").await;
        assert!(cached.is_none());
    }

    #[tokio::test]
    async fn test_get_or_fetch_miss_populates() {
        let store = MemoryCacheStore::new();
        let rows = sample_rows();

        let fetched: Vec<InventoryRow> = store
            .get_or_fetch("inventory:T1:", Duration::from_secs(60), || async {
                Ok::<_, std::convert::Infallible>(rows.clone())
            })
            .await
            .unwrap();

        assert_eq!(fetched, rows);
        assert!(store.get_raw("inventory:T1:").await.is_some());
    }

    #[tokio::test]
    async fn test_get_or_fetch_hit_skips_fetch() {
        let store = MemoryCacheStore::new();
        let rows = sample_rows();
        assert!(store.set("inventory:T1:", &rows, Duration::from_secs(60)).await);

        let fetched: Vec<InventoryRow> = store
            .get_or_fetch::<_, std::convert::Infallible, _, _>(
                "inventory:T1:",
                Duration::from_secs(60),
                || async { panic!("fetch must not run on a cache hit") },
            )
            .await
            .unwrap();

        assert_eq!(fetched, rows);
    }

    #[tokio::test]
    async fn test_get_or_fetch_propagates_fetch_error() {
        let store = MemoryCacheStore::new();

        let result: Result<Vec<InventoryRow>, &str> = store
            .get_or_fetch("inventory:T1:", Duration::from_secs(60), || async {
                Err("source of truth is down")
            })
            .await;

        assert!(result.is_err());
        assert!(store.get_raw("inventory:T1:").await.is_none());
    }
}
