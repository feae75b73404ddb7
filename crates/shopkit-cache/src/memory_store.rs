//! In-memory cache store implementation.

use super::CacheStore;
use async_trait::async_trait;
use parking_lot::Mutex;
use shaku::Component;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tracing::debug;

/// In-process cache store for development and tests.
///
/// Entries carry an expiry deadline and are dropped lazily on read, so TTL
/// semantics match the remote store without a background sweeper.
#[derive(Component, Default)]
#[shaku(interface = CacheStore)]
pub struct MemoryCacheStore {
    entries: Mutex<HashMap<String, (String, Instant)>>,
}

impl MemoryCacheStore {
    /// Create an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live (possibly expired, not yet reaped) entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Whether the store holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

#[async_trait]
impl CacheStore for MemoryCacheStore {
    fn is_enabled(&self) -> bool {
        true
    }

    async fn get_raw(&self, key: &str) -> Option<String> {
        let mut entries = self.entries.lock();

        match entries.get(key) {
            Some((value, expires_at)) if *expires_at > Instant::now() => Some(value.clone()),
            Some(_) => {
                entries.remove(key);
                debug!("Cache entry expired for key '{}'", key);
                None
            }
            None => None,
        }
    }

    async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> bool {
        if value.is_empty() {
            debug!("Rejected empty write for key '{}'", key);
            return false;
        }

        let expires_at = Instant::now() + ttl;
        self.entries
            .lock()
            .insert(key.to_string(), (value.to_string(), expires_at));
        true
    }

    async fn delete(&self, key: &str) -> bool {
        self.entries.lock().remove(key).is_some()
    }
}
