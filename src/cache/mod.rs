//! Cache Module
//!
//! Category-scoped caching with TTL expiration over a persistent key-value
//! substrate.

mod category;
mod envelope;
mod manager;
mod stats;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use category::{CacheCategory, CategoryPolicy, CategoryTable};
pub use envelope::CacheEnvelope;
pub use manager::{CacheManager, SharedCache};
pub use stats::{CacheCounters, CategoryStatus, Expiry};
