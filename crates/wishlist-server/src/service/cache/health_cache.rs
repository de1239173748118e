//! Record store health checks with a short-lived cache.
//!
//! Health endpoints may be polled often by load balancers; the cached result
//! keeps those polls from acquiring a database connection every time.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use axum::extract::FromRef;
use tokio::sync::RwLock;

use crate::service::store::SharedStore;

/// Tracing target for health service operations.
const TRACING_TARGET_HEALTH: &str = "wishlist_server::service::health";

/// Default cache duration for health checks.
const DEFAULT_CACHE_DURATION: Duration = Duration::from_secs(30);

#[derive(Debug)]
struct HealthCacheEntry {
    /// Last observed status; relaxed ordering is enough for a status flag.
    is_healthy: AtomicBool,
    last_check: RwLock<Instant>,
    cache_duration: Duration,
}

impl HealthCacheEntry {
    fn new(cache_duration: Duration) -> Self {
        Self {
            is_healthy: AtomicBool::new(false),
            last_check: RwLock::new(Self::expired(cache_duration)),
            cache_duration,
        }
    }

    /// Returns an instant old enough to force the next check.
    fn expired(cache_duration: Duration) -> Instant {
        let now = Instant::now();
        now.checked_sub(cache_duration).unwrap_or(now)
    }

    /// Returns the cached status, or runs `check_fn` once the cache expired.
    async fn get_or_update<F, Fut>(&self, check_fn: F) -> bool
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = bool>,
    {
        let now = Instant::now();
        let last_check = { *self.last_check.read().await };

        if now.duration_since(last_check) < self.cache_duration {
            return self.is_healthy.load(Ordering::Relaxed);
        }

        let healthy = check_fn().await;

        self.is_healthy.store(healthy, Ordering::Relaxed);
        *self.last_check.write().await = now;

        healthy
    }

    fn get_cached(&self) -> bool {
        self.is_healthy.load(Ordering::Relaxed)
    }

    async fn invalidate(&self) {
        *self.last_check.write().await = Self::expired(self.cache_duration);
    }
}

/// Cached health status of the record store.
///
/// This type is `Clone` and all clones share the same cache.
#[derive(Debug, Clone)]
pub struct HealthCache {
    cache: Arc<HealthCacheEntry>,
}

impl HealthCache {
    /// Creates a health cache with the default duration of 30 seconds.
    pub fn new() -> Self {
        Self::with_cache_duration(DEFAULT_CACHE_DURATION)
    }

    /// Creates a health cache with a custom cache duration.
    pub fn with_cache_duration(cache_duration: Duration) -> Self {
        tracing::info!(
            target: TRACING_TARGET_HEALTH,
            cache_duration_secs = cache_duration.as_secs(),
            "health service initialized"
        );

        Self {
            cache: Arc::new(HealthCacheEntry::new(cache_duration)),
        }
    }

    /// Returns whether the record store is reachable, checking at most once
    /// per cache duration.
    pub async fn is_healthy<S>(&self, service_state: S) -> bool
    where
        SharedStore: FromRef<S>,
    {
        let store = SharedStore::from_ref(&service_state);
        self.cache.get_or_update(|| Self::check_store(store)).await
    }

    /// Returns the last cached status without checking.
    pub fn get_cached_health(&self) -> bool {
        self.cache.get_cached()
    }

    /// Forces a fresh check on the next call to [`HealthCache::is_healthy`].
    pub async fn invalidate(&self) {
        self.cache.invalidate().await;

        tracing::debug!(
            target: TRACING_TARGET_HEALTH,
            "Health cache invalidated"
        );
    }

    #[tracing::instrument(skip_all, target = TRACING_TARGET_HEALTH)]
    async fn check_store(store: SharedStore) -> bool {
        let start = Instant::now();
        let result = store.ping().await;

        match result {
            Ok(()) => {
                tracing::info!(
                    target: TRACING_TARGET_HEALTH,
                    duration_ms = start.elapsed().as_millis(),
                    "Health check completed"
                );
                true
            }
            Err(e) => {
                tracing::warn!(
                    target: TRACING_TARGET_HEALTH,
                    duration_ms = start.elapsed().as_millis(),
                    error = %e,
                    "record store health check failed"
                );
                false
            }
        }
    }
}

impl Default for HealthCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::store::MemoryStore;

    #[tokio::test]
    async fn test_health_cache_entry_update() {
        let entry = HealthCacheEntry::new(Duration::from_secs(1));

        let result = entry.get_or_update(|| async { true }).await;
        assert!(result);
        assert!(entry.get_cached());

        // Served from the cache.
        let result = entry.get_or_update(|| async { false }).await;
        assert!(result);
    }

    #[tokio::test]
    async fn test_health_cache_entry_expiry() {
        let entry = HealthCacheEntry::new(Duration::from_millis(10));
        assert!(entry.get_or_update(|| async { true }).await);

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!entry.get_or_update(|| async { false }).await);
    }

    #[tokio::test]
    async fn test_health_cache_entry_invalidation() {
        let entry = HealthCacheEntry::new(Duration::from_secs(60));
        entry.get_or_update(|| async { true }).await;

        entry.invalidate().await;
        assert!(!entry.get_or_update(|| async { false }).await);
    }

    #[tokio::test]
    async fn test_store_health() {
        let store = MemoryStore::new();
        let shared: SharedStore = Arc::new(store.clone());
        let health = HealthCache::with_cache_duration(Duration::ZERO);
        assert!(!health.get_cached_health());

        assert!(health.is_healthy(shared.clone()).await);

        store.set_unavailable(true);
        assert!(!health.is_healthy(shared).await);
        assert!(!health.get_cached_health());
    }
}
