//! Cache Manager Module
//!
//! Main cache engine: category lookup, envelope persistence and TTL
//! invalidation on read. Every operation is best-effort. Storage and
//! serialization failures are logged and degrade to a miss, so the cache can
//! make the application slower but never make it fail.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::de::{DeserializeOwned, IgnoredAny};
use serde::Serialize;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{debug, error, info, warn};

use crate::cache::{CacheCounters, CacheEnvelope, CategoryStatus, CategoryTable, Expiry};
use crate::clock::{duration_to_ms, Clock, SystemClock};
use crate::storage::{KeyValueStore, MemoryStore};

/// Handle passed to every consumer of the cache.
pub type SharedCache = Arc<RwLock<CacheManager>>;

// == Cache Manager ==
/// Single point of access to the cached categories.
pub struct CacheManager {
    /// Persistent substrate holding one envelope per category
    storage: Box<dyn KeyValueStore>,
    /// Source of "now" for expiry arithmetic
    clock: Arc<dyn Clock>,
    /// Category name to storage key and TTL
    categories: CategoryTable,
    /// Operation counters
    counters: CacheCounters,
}

impl CacheManager {
    // == Constructor ==
    /// Creates a manager over `storage`, reading time from `clock`.
    pub fn new(
        storage: impl KeyValueStore + 'static,
        clock: impl Clock + 'static,
        categories: CategoryTable,
    ) -> Self {
        Self {
            storage: Box::new(storage),
            clock: Arc::new(clock),
            categories,
            counters: CacheCounters::new(),
        }
    }

    /// Creates a manager over an unbounded in-memory store and the system clock.
    pub fn in_memory(categories: CategoryTable) -> Self {
        Self::new(MemoryStore::new(), SystemClock, categories)
    }

    /// Wraps the manager in the shared handle used by handlers and the sweeper.
    pub fn into_shared(self) -> SharedCache {
        Arc::new(RwLock::new(self))
    }

    // == Set ==
    /// Stores `data` for `category`, replacing whatever was there.
    ///
    /// Returns `false` without touching storage if the category is unknown,
    /// and `false` if the payload cannot be serialized or persisted.
    pub fn set<T: Serialize + ?Sized>(&mut self, category: &str, data: &T) -> bool {
        let Some(policy) = self.categories.lookup(category) else {
            debug!("Ignoring write to unknown cache category {}", category);
            return false;
        };

        let envelope = CacheEnvelope::new(data, self.clock.now_ms(), duration_to_ms(policy.ttl));
        let text = match serde_json::to_string(&envelope) {
            Ok(text) => text,
            Err(err) => {
                error!("Failed to serialize cache entry {}: {}", category, err);
                self.counters.record_failure();
                return false;
            }
        };

        match self.storage.set_item(&policy.storage_key, &text) {
            Ok(()) => {
                debug!("Cache saved: {} ({} bytes)", category, text.len());
                self.counters.record_write();
                true
            }
            Err(err) => {
                error!("Failed to save cache entry {}: {}", category, err);
                self.counters.record_failure();
                false
            }
        }
    }

    // == Get ==
    /// Returns the cached payload for `category`.
    ///
    /// Unless `ignore_expiry` is set, an expired entry is deleted from storage
    /// and reported as absent. A corrupted entry is reported as absent and
    /// left in place.
    pub fn get<T: DeserializeOwned>(&mut self, category: &str, ignore_expiry: bool) -> Option<T> {
        let key = self.categories.lookup(category)?.storage_key.clone();

        let Some(envelope) = self.load(category, &key) else {
            self.counters.record_miss();
            return None;
        };

        if !ignore_expiry && envelope.is_expired(self.clock.now_ms()) {
            self.evict(category, &key);
            self.counters.record_miss();
            return None;
        }

        match serde_json::from_value(envelope.data) {
            Ok(data) => {
                debug!("Cache hit: {}", category);
                self.counters.record_hit();
                Some(data)
            }
            Err(err) => {
                warn!("Cached payload for {} has an unexpected shape: {}", category, err);
                self.counters.record_failure();
                self.counters.record_miss();
                None
            }
        }
    }

    // == Remove ==
    /// Deletes the entry for `category`, if the category is known.
    pub fn remove(&mut self, category: &str) {
        let Some(policy) = self.categories.lookup(category) else {
            return;
        };

        match self.storage.remove_item(&policy.storage_key) {
            Ok(()) => info!("Cache removed: {}", category),
            Err(err) => {
                error!("Failed to remove cache entry {}: {}", category, err);
                self.counters.record_failure();
            }
        }
    }

    // == Clear ==
    /// Deletes the entry of every configured category.
    ///
    /// A failure on one key is logged and the remaining keys are still
    /// attempted, so a clear may be partial.
    pub fn clear(&mut self) {
        let mut failed = 0;
        for (name, policy) in self.categories.iter() {
            if let Err(err) = self.storage.remove_item(&policy.storage_key) {
                error!("Failed to clear cache entry {}: {}", name, err);
                self.counters.record_failure();
                failed += 1;
            }
        }

        if failed == 0 {
            info!("Cache cleared");
        } else {
            warn!("Cache partially cleared: {} categories failed", failed);
        }
    }

    // == Stats ==
    /// Reports every category that currently has something in storage.
    ///
    /// Expired entries are reported (not evicted); categories never written
    /// are omitted.
    pub fn stats(&self) -> BTreeMap<String, CategoryStatus> {
        let now = self.clock.now_ms();
        let mut stats = BTreeMap::new();

        for (name, policy) in self.categories.iter() {
            let raw = match self.storage.get_item(&policy.storage_key) {
                Ok(Some(raw)) => raw,
                Ok(None) => continue,
                Err(err) => {
                    error!("Failed to read cache entry {} for stats: {}", name, err);
                    continue;
                }
            };

            let status = match serde_json::from_str::<CacheEnvelope<IgnoredAny>>(&raw) {
                Ok(envelope) => CategoryStatus::Present {
                    size_bytes: raw.len(),
                    expires_in_seconds: Expiry::from_remaining_ms(envelope.remaining_ms(now)),
                    last_written_at: envelope.written_at(),
                },
                Err(_) => CategoryStatus::Corrupted,
            };
            stats.insert(name.to_string(), status);
        }

        stats
    }

    // == Sweep ==
    /// Evicts every expired entry, returning how many were removed.
    ///
    /// Equivalent to reading each category with expiry enforced and
    /// discarding the result.
    pub fn sweep(&mut self) -> usize {
        let targets: Vec<(String, String)> = self
            .categories
            .iter()
            .map(|(name, policy)| (name.to_string(), policy.storage_key.clone()))
            .collect();

        let mut evicted = 0;
        for (name, key) in targets {
            let Some(envelope) = self.load(&name, &key) else {
                continue;
            };
            if envelope.is_expired(self.clock.now_ms()) && self.evict(&name, &key) {
                evicted += 1;
            }
        }
        evicted
    }

    // == Accessors ==
    /// The configured category table.
    pub fn categories(&self) -> &CategoryTable {
        &self.categories
    }

    /// Current operation counters.
    pub fn counters(&self) -> CacheCounters {
        self.counters.clone()
    }

    /// The underlying storage substrate.
    pub fn storage(&self) -> &dyn KeyValueStore {
        self.storage.as_ref()
    }

    // == Internals ==
    /// Reads and parses the envelope under `key`; failures read as absent.
    fn load(&mut self, category: &str, key: &str) -> Option<CacheEnvelope<Value>> {
        let raw = match self.storage.get_item(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(err) => {
                error!("Failed to read cache entry {}: {}", category, err);
                self.counters.record_failure();
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(envelope) => Some(envelope),
            Err(err) => {
                warn!("Corrupted cache entry {}: {}", category, err);
                self.counters.record_failure();
                None
            }
        }
    }

    fn evict(&mut self, category: &str, key: &str) -> bool {
        match self.storage.remove_item(key) {
            Ok(()) => {
                info!("Cache expired: {}", category);
                self.counters.record_eviction();
                true
            }
            Err(err) => {
                error!("Failed to evict cache entry {}: {}", category, err);
                self.counters.record_failure();
                false
            }
        }
    }
}

impl fmt::Debug for CacheManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheManager")
            .field("categories", &self.categories)
            .field("counters", &self.counters)
            .finish_non_exhaustive()
    }
}
