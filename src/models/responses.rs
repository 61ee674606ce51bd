//! Response DTOs for the cache HTTP facade
//!
//! Defines the structure of outgoing HTTP response bodies.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use crate::cache::{CacheCounters, CategoryStatus};

/// Response body for `GET /cache/:category`
#[derive(Debug, Clone, Serialize)]
pub struct GetResponse {
    /// The requested category
    pub category: String,
    /// The cached payload
    pub data: Value,
}

impl GetResponse {
    pub fn new(category: impl Into<String>, data: Value) -> Self {
        Self {
            category: category.into(),
            data,
        }
    }
}

/// Response body for `PUT /cache/:category`
#[derive(Debug, Clone, Serialize)]
pub struct SetResponse {
    /// Success message
    pub message: String,
    /// The category that was written
    pub category: String,
}

impl SetResponse {
    pub fn new(category: impl Into<String>) -> Self {
        let category = category.into();
        Self {
            message: format!("Category '{}' cached successfully", category),
            category,
        }
    }
}

/// Response body for `DELETE /cache/:category`
#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponse {
    /// Success message
    pub message: String,
    /// The category that was removed
    pub category: String,
}

impl DeleteResponse {
    pub fn new(category: impl Into<String>) -> Self {
        let category = category.into();
        Self {
            message: format!("Category '{}' removed", category),
            category,
        }
    }
}

/// Response body for `DELETE /cache`
#[derive(Debug, Clone, Serialize)]
pub struct ClearResponse {
    pub message: String,
}

impl ClearResponse {
    pub fn new() -> Self {
        Self {
            message: "All cached categories removed".to_string(),
        }
    }
}

impl Default for ClearResponse {
    fn default() -> Self {
        Self::new()
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Status of every category with a stored entry
    pub categories: BTreeMap<String, CategoryStatus>,
    /// Number of reads that returned a payload
    pub hits: u64,
    /// Number of reads that returned nothing
    pub misses: u64,
    /// Number of expired entries evicted
    pub evictions: u64,
    /// Number of successful writes
    pub writes: u64,
    /// Number of swallowed storage or serialization failures
    pub failures: u64,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl StatsResponse {
    pub fn new(categories: BTreeMap<String, CategoryStatus>, counters: CacheCounters) -> Self {
        Self {
            categories,
            hit_rate: counters.hit_rate(),
            hits: counters.hits,
            misses: counters.misses,
            evictions: counters.evictions,
            writes: counters.writes,
            failures: counters.failures,
        }
    }
}

/// Response body for the health check endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
