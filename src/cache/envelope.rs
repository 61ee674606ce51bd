//! Cache Envelope Module
//!
//! Defines the persisted wrapper around a cached payload.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// == Cache Envelope ==
/// A cached payload together with its write and expiry timestamps.
///
/// Serialized as `{"data": ..., "timestamp": <ms>, "expires": <ms>}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEnvelope<T> {
    /// The cached payload
    pub data: T,
    /// Write time (Unix milliseconds)
    pub timestamp: i64,
    /// Expiry time (Unix milliseconds), fixed at write time
    pub expires: i64,
}

impl<T> CacheEnvelope<T> {
    // == Constructor ==
    /// Wraps `data` written at `now_ms` with the given TTL in milliseconds.
    pub fn new(data: T, now_ms: i64, ttl_ms: i64) -> Self {
        Self {
            data,
            timestamp: now_ms,
            expires: now_ms.saturating_add(ttl_ms),
        }
    }

    // == Is Expired ==
    /// An envelope is stale once `now_ms` is strictly past `expires`.
    pub fn is_expired(&self, now_ms: i64) -> bool {
        now_ms > self.expires
    }

    // == Time To Live ==
    /// Milliseconds left before expiry; zero or negative once stale.
    pub fn remaining_ms(&self, now_ms: i64) -> i64 {
        self.expires.saturating_sub(now_ms)
    }

    /// Write time as a UTC datetime, if representable.
    pub fn written_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.timestamp)
    }
}
