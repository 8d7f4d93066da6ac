// ── Runtime cache configuration ──
//
// Tuning for the cache service. Core never reads config files; the
// application (or `teamized-config`) builds a `CacheConfig` and hands it in.

use std::time::Duration;

/// Behaviour switches for a [`CacheService`](crate::CacheService).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// Re-fetch the team list when the last cached team is deleted.
    pub refetch_when_empty: bool,
    /// Maximum age of a fetched category before `refresh_if_needed`
    /// fetches it again. `None` = fetch once, then serve from cache.
    pub stale_after: Option<Duration>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            refetch_when_empty: true,
            stale_after: None,
        }
    }
}

impl CacheConfig {
    pub(crate) fn stale_after_chrono(&self) -> Option<chrono::Duration> {
        self.stale_after
            .and_then(|d| chrono::Duration::from_std(d).ok())
    }
}
