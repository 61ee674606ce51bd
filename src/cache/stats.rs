//! Cache Statistics Module
//!
//! Per-category entry status and running operation counters.

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};

// == Expiry ==
/// Time left on an entry, as reported by stats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expiry {
    /// Whole seconds remaining, rounded to nearest
    InSeconds(u64),
    /// The entry is past (or exactly at) its expiry time
    Expired,
}

impl Expiry {
    /// Classifies a remaining duration in milliseconds.
    pub fn from_remaining_ms(remaining_ms: i64) -> Self {
        if remaining_ms > 0 {
            Expiry::InSeconds((remaining_ms as u64 + 500) / 1000)
        } else {
            Expiry::Expired
        }
    }
}

impl Serialize for Expiry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Expiry::InSeconds(secs) => serializer.serialize_u64(*secs),
            Expiry::Expired => serializer.serialize_str("expired"),
        }
    }
}

// == Category Status ==
/// What stats reports for a category with something in storage.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum CategoryStatus {
    Present {
        /// Length of the serialized envelope
        size_bytes: usize,
        expires_in_seconds: Expiry,
        last_written_at: Option<DateTime<Utc>>,
    },
    /// Stored text could not be parsed as an envelope
    Corrupted,
}

// == Cache Counters ==
/// Tracks cache operation outcomes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CacheCounters {
    /// Reads that returned a payload
    pub hits: u64,
    /// Reads that returned nothing (absent, expired, unreadable)
    pub misses: u64,
    /// Entries deleted because they had expired
    pub evictions: u64,
    /// Successful writes
    pub writes: u64,
    /// Storage or serialization failures that were swallowed
    pub failures: u64,
}

impl CacheCounters {
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no reads have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    pub fn record_write(&mut self) {
        self.writes += 1;
    }

    pub fn record_failure(&mut self) {
        self.failures += 1;
    }
}
