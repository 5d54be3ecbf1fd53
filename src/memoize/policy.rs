//! Expiration Policy Module
//!
//! Decides whether a stored entry may answer a call.

use std::sync::Mutex;
use std::time::Duration as StdDuration;

use chrono::{DateTime, Duration, Utc};

use crate::store::CacheEntry;

// == Expiration ==
/// How long a stored entry stays usable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Expiration {
    /// Entries never expire and are written without a timestamp
    #[default]
    Never,
    /// Entries older than this are stale; entries are written with a timestamp
    MaxAge(Duration),
}

impl Expiration {
    /// Builds a max-age policy from a std duration.
    ///
    /// Durations too large for chrono clamp to `Duration::MAX`, so entries
    /// are still timestamped and undated ones still count as stale.
    pub fn max_age(age: StdDuration) -> Self {
        Expiration::MaxAge(Duration::from_std(age).unwrap_or(Duration::MAX))
    }

    /// Oldest write time that still counts as stale, or `None` without a max age.
    pub fn cutoff(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            Expiration::Never => None,
            Expiration::MaxAge(age) => {
                Some(now.checked_sub_signed(*age).unwrap_or(DateTime::<Utc>::MIN_UTC))
            }
        }
    }

    /// Write time to stamp a new entry with.
    pub fn stamp(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            Expiration::Never => None,
            Expiration::MaxAge(_) => Some(now),
        }
    }

    // == Classify ==
    /// Maps a lookup result to its outcome under this policy.
    pub fn classify(&self, found: Option<CacheEntry>, now: DateTime<Utc>) -> Lookup {
        let Some(entry) = found else {
            return Lookup::Miss;
        };

        match self.cutoff(now) {
            None => Lookup::Fresh(entry),
            Some(_) if entry.stored_at.is_none() => Lookup::Undated(entry),
            Some(cutoff) if entry.is_fresh(cutoff) => Lookup::Fresh(entry),
            Some(_) => Lookup::Stale(entry),
        }
    }
}

// == Lookup ==
/// Outcome of looking up a key. Only `Fresh` answers the call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    /// No entry stored for the key
    Miss,
    /// Entry lacks a timestamp while a max age is configured
    Undated(CacheEntry),
    /// Entry written at or before the cutoff
    Stale(CacheEntry),
    /// Entry usable as the result
    Fresh(CacheEntry),
}

impl Lookup {
    /// The cached value, if this outcome is a hit.
    pub fn into_hit(self) -> Option<String> {
        match self {
            Lookup::Fresh(entry) => Some(entry.value),
            _ => None,
        }
    }
}

// == Clock ==
/// Source of the current time.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    /// Moves the clock forward by `by`.
    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap_or_else(|e| e.into_inner());
        *now += by;
    }

    pub fn set(&self, at: DateTime<Utc>) {
        *self.now.lock().unwrap_or_else(|e| e.into_inner()) = at;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(|e| e.into_inner())
    }
}
