//! In-memory sliding-TTL cache.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use parking_lot::RwLock;

/// Cache entry with its last-renewed timestamp.
#[derive(Clone)]
struct CacheEntry<V> {
    value: V,
    cached_at: Instant,
}

impl<V> CacheEntry<V> {
    fn is_expired(&self, renewal_window: Duration) -> bool {
        self.cached_at.elapsed() >= renewal_window
    }
}

/// In-memory cache with sliding expiry.
///
/// Thread-safe. Every successful hit renews the entry's lifetime by the
/// full renewal window; expired entries are left in place for the sweeper.
///
/// Reads follow a two-step protocol: call [`is_hit`](TtlCache::is_hit)
/// first to check (and renew) freshness, then [`read`](TtlCache::read) for
/// the value. `read` alone gives no freshness guarantee.
pub struct TtlCache<V> {
    entries: RwLock<HashMap<String, CacheEntry<V>>>,
    renewal_window: Duration,
}

impl<V: Clone> TtlCache<V> {
    /// Creates an empty cache with the given renewal window.
    pub fn new(renewal_window: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            renewal_window,
        }
    }

    /// Returns the configured renewal window.
    pub fn renewal_window(&self) -> Duration {
        self.renewal_window
    }

    /// Returns whether a live entry exists for `key`, renewing its
    /// timestamp if so.
    ///
    /// An expired entry is left untouched (removal is the sweeper's job)
    /// and reported as a miss. Takes the write lock because a hit mutates
    /// the timestamp.
    pub fn is_hit(&self, key: &str) -> bool {
        let mut entries = self.entries.write();

        let Some(entry) = entries.get_mut(key) else {
            return false;
        };

        let expired = entry.is_expired(self.renewal_window);
        if !expired {
            entry.cached_at = Instant::now();
        }

        !expired
    }

    /// Returns the stored value for `key`, or the default value if absent.
    ///
    /// Does not check or affect expiry.
    pub fn read(&self, key: &str) -> V
    where
        V: Default,
    {
        let entries = self.entries.read();
        entries
            .get(key)
            .map(|entry| entry.value.clone())
            .unwrap_or_default()
    }

    /// Inserts or replaces the entry for `key` with a fresh timestamp.
    pub fn write(&self, key: &str, value: V) {
        let mut entries = self.entries.write();
        entries.insert(
            key.to_string(),
            CacheEntry {
                value,
                cached_at: Instant::now(),
            },
        );
    }

    /// Removes every expired entry, returning the number removed.
    ///
    /// Holds the write lock for the whole scan-and-delete pass, so a
    /// concurrent `is_hit` or `write` never observes a partial sweep.
    pub fn sweep(&self) -> usize {
        let mut entries = self.entries.write();
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired(self.renewal_window));
        before - entries.len()
    }

    /// Returns the number of entries, expired ones included.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns true if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}
