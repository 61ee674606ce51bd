//! Portal Cache - category-scoped TTL cache for the reporting portal
//!
//! Keeps one timestamped envelope per cache category in a persistent
//! key-value store, invalidates entries on read once their TTL has passed,
//! and runs a background sweeper that evicts entries nobody reads.

pub mod api;
pub mod cache;
pub mod clock;
pub mod config;
pub mod error;
pub mod models;
pub mod storage;
pub mod tasks;

pub use api::AppState;
pub use cache::{CacheCategory, CacheManager, CategoryTable, SharedCache};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::Config;
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use tasks::{Sweeper, SweeperState};
