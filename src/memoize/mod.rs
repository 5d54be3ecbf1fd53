//! Memoize Module
//!
//! Wraps a single-argument fetch function so each key is fetched once and
//! answered from the store afterwards, optionally bounded by a max age.
//!
//! # Concurrency
//! Calls take `&self` and may run concurrently. There is no per-key locking:
//! two concurrent misses on the same key both invoke the function and both
//! append an entry.

mod policy;
mod stats;


use std::sync::Arc;
use std::time::Duration;

use crate::error::CacheError;
use crate::fetch::Fetcher;
use crate::store::{CacheEntry, CacheStore};

// Re-export public types
pub use policy::{Clock, Expiration, Lookup, ManualClock, SystemClock};
pub use stats::CacheStats;

use stats::StatsRecorder;

// == Memoized ==
/// A fetcher whose results are cached in a `CacheStore`.
pub struct Memoized<F> {
    store: Arc<dyn CacheStore>,
    fetcher: F,
    expiration: Expiration,
    clock: Arc<dyn Clock>,
    stats: StatsRecorder,
}

impl<F: Fetcher> Memoized<F> {
    // == Constructors ==
    /// Wraps `fetcher`; stored entries never expire.
    pub fn new(store: Arc<dyn CacheStore>, fetcher: F) -> Self {
        Self {
            store,
            fetcher,
            expiration: Expiration::Never,
            clock: Arc::new(SystemClock),
            stats: StatsRecorder::default(),
        }
    }

    /// Wraps `fetcher`; entries older than `max_age` are fetched again.
    pub fn with_max_age(store: Arc<dyn CacheStore>, fetcher: F, max_age: Duration) -> Self {
        Self::new(store, fetcher).with_expiration(Expiration::max_age(max_age))
    }

    pub fn with_expiration(mut self, expiration: Expiration) -> Self {
        self.expiration = expiration;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    // == Call ==
    /// Returns the cached value for `key`, fetching and storing it on a miss.
    ///
    /// A hit performs no store write and no fetch. A miss performs exactly
    /// one fetch and, if it succeeds, exactly one insert. Fetch and store
    /// failures are returned as-is; a failed fetch writes nothing.
    pub async fn call(&self, key: &str) -> Result<String, CacheError<F::Error>> {
        let lookup = self.lookup(key).await?;
        self.stats.record_lookup(&lookup);

        if let Some(value) = lookup.into_hit() {
            return Ok(value);
        }

        let value = self
            .fetcher
            .fetch(key)
            .await
            .map_err(CacheError::Function)?;

        let entry = CacheEntry {
            key: key.to_string(),
            value: value.clone(),
            stored_at: self.expiration.stamp(self.clock.now()),
        };
        self.store.insert(entry).await?;
        self.stats.record_store();

        Ok(value)
    }

    // == Lookup ==
    /// Looks `key` up and classifies the result without fetching.
    pub async fn lookup(&self, key: &str) -> Result<Lookup, CacheError<F::Error>> {
        let now = self.clock.now();
        let found = self.store.find_one(key).await?;
        Ok(self.expiration.classify(found, now))
    }

    // == Accessors ==
    pub fn expiration(&self) -> Expiration {
        self.expiration
    }

    /// Returns a snapshot of call outcome counters.
    pub fn stats(&self) -> CacheStats {
        self.stats.snapshot()
    }
}
