//! Call Statistics Module
//!
//! Counts lookup outcomes of a memoized function.

use std::sync::atomic::{AtomicU64, Ordering};

use super::Lookup;

// == Cache Stats ==
/// Snapshot of call outcome counters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Calls answered from the store
    pub hits: u64,
    /// Calls that found no entry
    pub misses: u64,
    /// Calls that found an entry older than the max age
    pub stale: u64,
    /// Calls that found an entry without a timestamp under a max-age policy
    pub undated: u64,
    /// Entries written after a successful function call
    pub stores: u64,
}

impl CacheStats {
    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / calls, or 0.0 if no calls have been made. Stale and
    /// undated lookups count as calls that missed.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses + self.stale + self.undated;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

// == Stats Recorder ==
/// Lock-free counters shared by concurrent calls.
#[derive(Debug, Default)]
pub(crate) struct StatsRecorder {
    hits: AtomicU64,
    misses: AtomicU64,
    stale: AtomicU64,
    undated: AtomicU64,
    stores: AtomicU64,
}

impl StatsRecorder {
    pub(crate) fn record_lookup(&self, lookup: &Lookup) {
        let counter = match lookup {
            Lookup::Fresh(_) => &self.hits,
            Lookup::Miss => &self.misses,
            Lookup::Stale(_) => &self.stale,
            Lookup::Undated(_) => &self.undated,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_store(&self) {
        self.stores.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn snapshot(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            stale: self.stale.load(Ordering::Relaxed),
            undated: self.undated.load(Ordering::Relaxed),
            stores: self.stores.load(Ordering::Relaxed),
        }
    }
}
