//! TTL-keyed result cache.

use super::clock::{Clock, SystemClock};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

/// Cached value with the time it was stored.
struct CacheEntry<V> {
    value: V,
    stored_at: Instant,
    ttl: Duration,
}

impl<V> CacheEntry<V> {
    fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.stored_at) >= self.ttl
    }
}

/// Snapshot of cache counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub entries: usize,
    pub hits: u64,
    pub misses: u64,
}

/// In-memory key to value map where entries older than their TTL are absent.
///
/// Pure TTL expiry, not LRU. The map is guarded by a tokio Mutex so the
/// read-check-evict sequence in [`ExpiringCache::get`] is atomic.
pub struct ExpiringCache<V> {
    entries: Mutex<HashMap<String, CacheEntry<V>>>,
    default_ttl: Duration,
    sweep_threshold: usize,
    clock: Arc<dyn Clock>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl<V> std::fmt::Debug for ExpiringCache<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExpiringCache")
            .field("default_ttl", &self.default_ttl)
            .field("sweep_threshold", &self.sweep_threshold)
            .finish_non_exhaustive()
    }
}

impl<V: Clone + Send> ExpiringCache<V> {
    /// Create a cache on the system clock.
    pub fn new(default_ttl: Duration, sweep_threshold: usize) -> Self {
        Self::with_clock(default_ttl, sweep_threshold, Arc::new(SystemClock))
    }

    /// Create a cache driven by the given clock.
    pub fn with_clock(default_ttl: Duration, sweep_threshold: usize, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            default_ttl,
            sweep_threshold,
            clock,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Get a fresh value. Stale entries are evicted and reported as absent.
    pub async fn get(&self, key: &str) -> Option<V> {
        let now = self.clock.now();
        let mut entries = self.entries.lock().await;

        let fresh = entries
            .get(key)
            .filter(|entry| !entry.is_expired(now))
            .map(|entry| entry.value.clone());

        if fresh.is_some() {
            self.hits.fetch_add(1, Ordering::Relaxed);
        } else {
            entries.remove(key);
            self.misses.fetch_add(1, Ordering::Relaxed);
        }
        fresh
    }

    /// Insert or overwrite a value with the default TTL.
    pub async fn insert(&self, key: impl Into<String>, value: V) {
        self.insert_with_ttl(key, value, self.default_ttl).await;
    }

    /// Insert or overwrite a value with an explicit TTL.
    pub async fn insert_with_ttl(&self, key: impl Into<String>, value: V, ttl: Duration) {
        let now = self.clock.now();
        let mut entries = self.entries.lock().await;
        entries.insert(key.into(), CacheEntry { value, stored_at: now, ttl });

        if entries.len() > self.sweep_threshold {
            let before = entries.len();
            entries.retain(|_, entry| !entry.is_expired(now));
            tracing::debug!(removed = before - entries.len(), "swept expired cache entries");
        }
    }

    /// Delete expired entries.
    ///
    /// Returns the number of deleted entries.
    pub async fn purge_expired(&self) -> usize {
        let now = self.clock.now();
        let mut entries = self.entries.lock().await;
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired(now));
        before - entries.len()
    }

    /// Delete every entry, returning how many were removed.
    pub async fn clear(&self) -> usize {
        let mut entries = self.entries.lock().await;
        let count = entries.len();
        entries.clear();
        count
    }

    /// Number of stored entries, including ones not yet evicted.
    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    pub async fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.len().await,
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}
