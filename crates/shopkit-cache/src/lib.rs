//! # Shopkit Cache
//!
//! Best-effort cache client for Shopkit.
//!
//! Provides timeout-bounded access to a shared key-value cache with
//! fail-open semantics: the application must remain fully correct (just
//! slower) with the cache entirely offline. A process-wide feature flag
//! turns the whole layer into a transparent pass-through.

mod error;
mod memory_store;
mod redis_store;
mod store;
mod timeout;

pub use error::{CacheError, CacheResult};
pub use memory_store::{MemoryCacheStore, MemoryCacheStoreParameters};
pub use redis_store::{
    RedisCacheStore, RedisCacheStoreParameters, CONNECT_TIMEOUT, DEFAULT_TTL, OP_TIMEOUT,
};
pub use store::{CacheStore, CacheStoreExt};
