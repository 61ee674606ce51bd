//! In-memory key-value store.

use std::collections::HashMap;

use super::{check_quota, KeyValueStore};
use crate::error::StorageError;

// == Memory Store ==
/// `HashMap`-backed store with an optional byte quota.
///
/// Usage is counted as the sum of key and value lengths, which is how
/// origin-scoped browser storage accounts for its quota.
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: HashMap<String, String>,
    quota: Option<usize>,
}

impl MemoryStore {
    /// Creates an unbounded store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that rejects writes once `quota` bytes would be used.
    pub fn with_quota(quota: usize) -> Self {
        Self {
            items: HashMap::new(),
            quota: Some(quota),
        }
    }

    /// Returns true if `key` is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.items.contains_key(key)
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Bytes currently used.
    pub fn used_bytes(&self) -> usize {
        self.items.iter().map(|(k, v)| k.len() + v.len()).sum()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let replaced = self.items.get(key).map_or(0, |old| key.len() + old.len());
        let needed = self.used_bytes() - replaced + key.len() + value.len();
        check_quota(needed, self.quota)?;

        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        self.items.remove(key);
        Ok(())
    }
}
