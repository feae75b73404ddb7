//! Bounded-wait wrapper for cache I/O.

use crate::error::{CacheError, CacheResult};
use std::future::Future;
use std::time::Duration;

/// Races an operation against a timer; whichever finishes first wins and
/// the loser is dropped, so a slow operation cannot complete later and
/// mutate shared state.
pub(crate) async fn bounded<F>(limit: Duration, operation: F) -> CacheResult<F::Output>
where
    F: Future,
{
    tokio::time::timeout(limit, operation)
        .await
        .map_err(|_| CacheError::Timeout(limit))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_bounded_success() {
        let result = bounded(Duration::from_secs(1), async { 42 }).await;
        assert_eq!(result.unwrap(), 42);
    }

    #[tokio::test]
    async fn test_bounded_exceeded() {
        let result = bounded(Duration::from_millis(10), async {
            tokio::time::sleep(Duration::from_millis(200)).await;
            42
        })
        .await;

        assert!(matches!(result, Err(CacheError::Timeout(_))));
    }

    #[tokio::test]
    async fn test_bounded_returns_within_limit() {
        let start = std::time::Instant::now();
        let _ = bounded(Duration::from_millis(50), std::future::pending::<()>()).await;
        // Scheduling jitter aside, the call must come back near the bound,
        // not hang on the never-resolving operation.
        assert!(start.elapsed() < Duration::from_millis(500));
    }
}
