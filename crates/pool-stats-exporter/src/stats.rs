//! Pool statistics snapshot and the provider capability.
//!
//! The exporter never talks to a pool directly. Anything that can hand out a
//! [`PoolStats`] snapshot on demand implements [`StatsProvider`], which lets a
//! real pool and a test double be swapped freely.

use std::sync::Arc;
use std::time::Duration;

use crate::error::StatsError;

/// Point-in-time statistics of a connection pool.
///
/// Counters such as `wait_count` and the closure counts are cumulative since
/// the pool was created.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoolStats {
    /// Maximum number of open connections (0 means unlimited).
    pub max_open_connections: u32,
    /// Established connections, both in use and idle.
    pub open_connections: u32,
    /// Connections currently checked out.
    pub in_use: u32,
    /// Connections currently idle.
    pub idle: u32,
    /// Total number of times a caller waited for a connection.
    pub wait_count: u64,
    /// Total time spent waiting for a connection.
    pub wait_duration: Duration,
    /// Connections closed for exceeding the max idle setting.
    pub max_idle_closed: u64,
    /// Connections closed for exceeding the max lifetime setting.
    pub max_lifetime_closed: u64,
}

impl PoolStats {
    /// Total wait time in whole microseconds.
    #[must_use]
    pub fn wait_duration_micros(&self) -> u128 {
        self.wait_duration.as_micros()
    }
}

/// Source of connection pool statistics.
///
/// Implementations must be cheap to call and safe to call concurrently; the
/// exporter calls [`stats`](StatsProvider::stats) once per collection cycle.
pub trait StatsProvider: Send + Sync {
    /// Return the current statistics snapshot.
    fn stats(&self) -> Result<PoolStats, StatsError>;
}

impl<T: StatsProvider + ?Sized> StatsProvider for &T {
    fn stats(&self) -> Result<PoolStats, StatsError> {
        (**self).stats()
    }
}

impl<T: StatsProvider + ?Sized> StatsProvider for Arc<T> {
    fn stats(&self) -> Result<PoolStats, StatsError> {
        (**self).stats()
    }
}

impl<T: StatsProvider + ?Sized> StatsProvider for Box<T> {
    fn stats(&self) -> Result<PoolStats, StatsError> {
        (**self).stats()
    }
}

/// Provider backed by an infallible closure. Created with [`from_fn`].
#[derive(Clone)]
pub struct FnProvider<F> {
    f: F,
}

impl<F> std::fmt::Debug for FnProvider<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnProvider").finish_non_exhaustive()
    }
}

impl<F> StatsProvider for FnProvider<F>
where
    F: Fn() -> PoolStats + Send + Sync,
{
    fn stats(&self) -> Result<PoolStats, StatsError> {
        Ok((self.f)())
    }
}

/// Wrap a closure that always yields a snapshot as a [`StatsProvider`].
///
/// ```rust
/// use pool_stats_exporter::{PoolStats, StatsProvider, stats};
///
/// let provider = stats::from_fn(|| PoolStats {
///     max_open_connections: 10,
///     ..PoolStats::default()
/// });
/// assert_eq!(provider.stats().unwrap().max_open_connections, 10);
/// ```
pub fn from_fn<F>(f: F) -> FnProvider<F>
where
    F: Fn() -> PoolStats + Send + Sync,
{
    FnProvider { f }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    struct Closed;

    impl StatsProvider for Closed {
        fn stats(&self) -> Result<PoolStats, StatsError> {
            Err(StatsError::PoolClosed)
        }
    }

    #[test]
    fn test_wait_duration_truncates_to_micros() {
        let stats = PoolStats {
            wait_duration: Duration::from_nanos(1_500_999),
            ..PoolStats::default()
        };
        assert_eq!(stats.wait_duration_micros(), 1_500);
    }

    #[test]
    fn test_from_fn_provider() {
        let provider = from_fn(|| PoolStats {
            idle: 4,
            ..PoolStats::default()
        });
        assert_eq!(provider.stats().unwrap().idle, 4);
    }

    #[test]
    fn test_wrapped_providers_delegate() {
        let arc: Arc<dyn StatsProvider> = Arc::new(Closed);
        assert!(matches!(arc.stats(), Err(StatsError::PoolClosed)));

        let boxed: Box<dyn StatsProvider> = Box::new(from_fn(PoolStats::default));
        assert_eq!(boxed.stats().unwrap(), PoolStats::default());

        let closed = Closed;
        let by_ref = &closed;
        assert!(by_ref.stats().is_err());
    }
}
