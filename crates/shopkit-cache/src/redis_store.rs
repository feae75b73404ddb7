//! Redis-based cache store implementation.

use super::CacheStore;
use crate::error::{CacheError, CacheResult};
use crate::timeout::bounded;
use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;
use shaku::Component;
use shopkit_config::CacheConfig;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// Default TTL for cached items (5 minutes).
pub const DEFAULT_TTL: Duration = Duration::from_secs(300);

/// Wait bound for a single cache operation.
pub const OP_TIMEOUT: Duration = Duration::from_secs(1);

/// Wait bound for establishing the initial connection.
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(3);

const DEFAULT_KEY_PREFIX: &str = "shopkit:cache";

/// Redis-backed cache store.
///
/// The connection is established lazily on first use and memoized; any
/// timeout or backend error discards the handle so the next call attempts
/// a fresh connection instead of reusing a known-bad one. Establishing the
/// connection happens under the handle's lock, so concurrent first callers
/// share a single connection attempt.
#[derive(Component)]
#[shaku(interface = CacheStore)]
pub struct RedisCacheStore {
    /// Redis URL, consumed at first use.
    url: String,
    /// Prefix distinguishing this application's keys in a shared store.
    #[shaku(default = DEFAULT_KEY_PREFIX.to_string())]
    key_prefix: String,
    /// Feature flag; when false every operation is a no-op.
    enabled: bool,
    /// Per-operation wait bound.
    #[shaku(default = OP_TIMEOUT)]
    op_timeout: Duration,
    /// Connect wait bound.
    #[shaku(default = CONNECT_TIMEOUT)]
    connect_timeout: Duration,
    /// Memoized connection handle, shared across callers.
    conn: Mutex<Option<MultiplexedConnection>>,
}

impl RedisCacheStore {
    /// Create a new Redis cache store from configuration.
    #[must_use]
    pub fn new(config: &CacheConfig) -> Self {
        Self {
            url: config.url.clone(),
            key_prefix: config.key_prefix.clone(),
            enabled: config.enabled,
            op_timeout: config.op_timeout(),
            connect_timeout: config.connect_timeout(),
            conn: Mutex::new(None),
        }
    }

    /// Create a no-op cache store (for when caching is disabled).
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            url: String::new(),
            key_prefix: DEFAULT_KEY_PREFIX.to_string(),
            enabled: false,
            op_timeout: OP_TIMEOUT,
            connect_timeout: CONNECT_TIMEOUT,
            conn: Mutex::new(None),
        }
    }

    fn prefixed(&self, key: &str) -> String {
        format!("{}:{}", self.key_prefix, key)
    }

    /// Get the shared connection, establishing it if necessary.
    ///
    /// The lock is held across the connect so concurrent first callers
    /// wait for a single in-flight attempt rather than racing their own.
    async fn connection(&self) -> CacheResult<MultiplexedConnection> {
        let mut guard = self.conn.lock().await;

        if let Some(conn) = guard.as_ref() {
            return Ok(conn.clone());
        }

        debug!("Establishing Redis connection to {}", self.url);
        let client = redis::Client::open(self.url.as_str())
            .map_err(|e| CacheError::Unavailable(format!("Invalid Redis URL: {}", e)))?;

        let conn = bounded(self.connect_timeout, client.get_multiplexed_async_connection())
            .await?
            .map_err(|e| CacheError::Unavailable(format!("Failed to connect: {}", e)))?;

        *guard = Some(conn.clone());
        Ok(conn)
    }

    /// Discard the memoized handle so the next call reconnects.
    async fn reset(&self) {
        *self.conn.lock().await = None;
    }

    async fn degrade(&self, op: &str, key: &str, err: &CacheError) {
        warn!("Cache {} failed for key '{}': {}", op, key, err);
        if err.resets_connection() {
            self.reset().await;
        }
    }

    async fn try_get(&self, key: &str) -> CacheResult<Option<String>> {
        let mut conn = self.connection().await?;
        let value: Option<String> = bounded(self.op_timeout, conn.get(self.prefixed(key))).await??;
        Ok(value)
    }

    async fn try_set(&self, key: &str, value: &str, ttl: Duration) -> CacheResult<()> {
        let mut conn = self.connection().await?;
        let ttl_secs = ttl.as_secs().max(1);
        bounded(
            self.op_timeout,
            conn.set_ex::<_, _, ()>(self.prefixed(key), value, ttl_secs),
        )
        .await??;
        Ok(())
    }

    async fn try_delete(&self, key: &str) -> CacheResult<bool> {
        let mut conn = self.connection().await?;
        let deleted: i64 = bounded(self.op_timeout, conn.del(self.prefixed(key))).await??;
        Ok(deleted > 0)
    }

    #[cfg(test)]
    async fn has_connection(&self) -> bool {
        self.conn.lock().await.is_some()
    }
}

#[async_trait]
impl CacheStore for RedisCacheStore {
    fn is_enabled(&self) -> bool {
        self.enabled
    }

    async fn get_raw(&self, key: &str) -> Option<String> {
        if !self.enabled {
            return None;
        }

        match self.try_get(key).await {
            Ok(Some(value)) => {
                debug!("Cache hit for key '{}'", key);
                Some(value)
            }
            Ok(None) => {
                debug!("Cache miss for key '{}'", key);
                None
            }
            Err(err) => {
                self.degrade("get", key, &err).await;
                None
            }
        }
    }

    async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> bool {
        if !self.enabled {
            return false;
        }

        if value.is_empty() {
            debug!("Rejected empty write for key '{}'", key);
            return false;
        }

        match self.try_set(key, value, ttl).await {
            Ok(()) => {
                debug!("Cached key '{}' with TTL {}s", key, ttl.as_secs().max(1));
                true
            }
            Err(err) => {
                self.degrade("set", key, &err).await;
                false
            }
        }
    }

    async fn delete(&self, key: &str) -> bool {
        if !self.enabled {
            return false;
        }

        match self.try_delete(key).await {
            Ok(deleted) => {
                debug!("Deleted key '{}': {}", key, deleted);
                deleted
            }
            Err(err) => {
                self.degrade("delete", key, &err).await;
                false
            }
        }
    }
}
