//! Storage Module
//!
//! Persistent key-value substrates the cache writes its envelopes into.
//!
//! # Backends
//! - [`MemoryStore`]: process-local map, used for tests and ephemeral runs
//! - [`FileStore`]: one file per key in a directory, survives restarts

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::error::StorageError;

// == Key-Value Store Trait ==
/// String-keyed, string-valued storage with atomic single-key operations.
///
/// Implementations make no promise about atomicity across keys.
pub trait KeyValueStore: Send + Sync {
    /// Returns the stored text for `key`, or `None` if absent.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Deletes `key`. Removing an absent key is not an error.
    fn remove_item(&mut self, key: &str) -> Result<(), StorageError>;
}

/// Checks a write against an optional byte quota.
pub(crate) fn check_quota(needed: usize, quota: Option<usize>) -> Result<(), StorageError> {
    match quota {
        Some(quota) if needed > quota => Err(StorageError::QuotaExceeded { needed, quota }),
        _ => Ok(()),
    }
}
