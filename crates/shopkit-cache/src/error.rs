//! Cache error types.
//!
//! These errors never cross the [`CacheStore`](crate::CacheStore) boundary:
//! every public operation degrades to a cache-miss return value instead.

use std::time::Duration;
use thiserror::Error;

/// Result type for internal cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Cache-related errors.
///
/// A disabled cache is not an error condition: the store short-circuits
/// before any operation runs, so no variant models it.
#[derive(Debug, Error)]
pub enum CacheError {
    /// The backing store could not be reached.
    #[error("Cache unavailable: {0}")]
    Unavailable(String),

    /// An operation exceeded its wait bound.
    #[error("Cache operation timed out after {0:?}")]
    Timeout(Duration),

    /// Redis error.
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CacheError {
    /// Returns true if the shared connection handle should be discarded so
    /// the next call re-establishes it.
    #[must_use]
    pub fn resets_connection(&self) -> bool {
        matches!(
            self,
            CacheError::Unavailable(_) | CacheError::Timeout(_) | CacheError::Redis(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_resets_connection() {
        let err = CacheError::Timeout(Duration::from_secs(1));
        assert!(err.resets_connection());
    }

    #[test]
    fn test_unavailable_resets_connection() {
        let err = CacheError::Unavailable("refused".into());
        assert!(err.resets_connection());
    }

    #[test]
    fn test_serialization_keeps_connection() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert!(!CacheError::Serialization(json_err).resets_connection());
    }
}
