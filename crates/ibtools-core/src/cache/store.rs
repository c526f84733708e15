//! The utility path cache.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;

use tracing::debug;

use super::clock::{Clock, SystemClock};
use super::entry::{CacheKey, CachedEntry};
use crate::domain::{UtilityLocation, UtilityType};

/// How long a resolution is trusted: 24 hours.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Snapshot of cache counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
}

/// In-memory store of resolved utility locations with lazy TTL expiry.
///
/// Entries older than the TTL are never returned by [`get`](Self::get) but
/// stay in the map until they are overwritten, invalidated, purged or
/// cleared. The cache is internally synchronized; share it via `Arc`.
pub struct UtilPathCache {
    entries: RwLock<HashMap<CacheKey, CachedEntry>>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl UtilPathCache {
    /// Create a cache with the default 24 hour TTL.
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_CACHE_TTL)
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self::with_clock(ttl, Arc::new(SystemClock))
    }

    pub fn with_clock(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
            clock,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    pub const fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Look up a live entry for the exact key.
    pub fn get(&self, utility: UtilityType, version: Option<&str>) -> Option<UtilityLocation> {
        let key = CacheKey::new(utility, version);
        let now = self.clock.now();

        let found = self
            .read()
            .get(&key)
            .filter(|entry| !entry.is_expired(now, self.ttl))
            .map(|entry| entry.location.clone());

        if found.is_some() {
            self.hits.fetch_add(1, Ordering::Relaxed);
        } else {
            self.misses.fetch_add(1, Ordering::Relaxed);
        }
        found
    }

    /// Insert or replace the entry for the key with a fresh timestamp.
    pub fn store(&self, utility: UtilityType, version: Option<&str>, location: UtilityLocation) {
        let key = CacheKey::new(utility, version);
        let entry = CachedEntry::new(location, self.clock.now());
        debug!(
            utility = %utility,
            version = version.unwrap_or("*"),
            path = %entry.location.path().display(),
            "Caching utility location"
        );
        self.write().insert(key, entry);
    }

    /// Remove the entry for the key, if any.
    pub fn invalidate(&self, utility: UtilityType, version: Option<&str>) {
        let key = CacheKey::new(utility, version);
        if self.write().remove(&key).is_some() {
            debug!(utility = %utility, version = version.unwrap_or("*"), "Invalidated cache entry");
        }
    }

    /// Remove every entry.
    pub fn clear(&self) {
        self.write().clear();
    }

    /// Number of stored entries, expired ones included.
    pub fn size(&self) -> usize {
        self.read().len()
    }

    /// Raw entry for the key regardless of expiry.
    pub fn entry(&self, utility: UtilityType, version: Option<&str>) -> Option<CachedEntry> {
        self.read().get(&CacheKey::new(utility, version)).cloned()
    }

    /// Drop every expired entry and return how many were removed.
    pub fn purge_expired(&self) -> usize {
        let now = self.clock.now();
        let mut entries = self.write();
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired(now, self.ttl));
        before - entries.len()
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.size(),
        }
    }

    // Critical sections never leave the map half-updated, so a poisoned
    // lock still guards consistent data.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<CacheKey, CachedEntry>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<CacheKey, CachedEntry>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for UtilPathCache {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for UtilPathCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UtilPathCache")
            .field("ttl", &self.ttl)
            .field("entries", &self.size())
            .finish_non_exhaustive()
    }
}
