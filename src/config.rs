//! Configuration Module
//!
//! Handles loading and managing process configuration from environment variables.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::cache::{CacheManager, CategoryTable};
use crate::clock::SystemClock;
use crate::error::StorageError;
use crate::storage::{FileStore, MemoryStore};

/// Default storage quota, matching typical origin storage limits (5 MiB).
pub const DEFAULT_STORAGE_QUOTA: usize = 5 * 1024 * 1024;

/// Process configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Background sweep interval in seconds
    pub sweep_interval: u64,
    /// Directory for persistent envelopes; in-memory storage when `None`
    pub cache_dir: Option<PathBuf>,
    /// Storage quota in bytes; `None` means unbounded
    pub storage_quota: Option<usize>,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `SWEEP_INTERVAL` - Sweep frequency in seconds (default: 300)
    /// - `CACHE_DIR` - Storage directory (default: unset, in-memory)
    /// - `STORAGE_QUOTA_BYTES` - Quota in bytes, 0 disables (default: 5 MiB)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
            sweep_interval: parse_var("SWEEP_INTERVAL").unwrap_or(defaults.sweep_interval),
            cache_dir: env::var("CACHE_DIR")
                .ok()
                .filter(|dir| !dir.trim().is_empty())
                .map(PathBuf::from),
            storage_quota: match parse_var::<usize>("STORAGE_QUOTA_BYTES") {
                Some(0) => None,
                Some(quota) => Some(quota),
                None => defaults.storage_quota,
            },
        }
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval)
    }

    /// Builds the cache manager this configuration describes.
    pub fn build_cache(&self, categories: CategoryTable) -> Result<CacheManager, StorageError> {
        let manager = match &self.cache_dir {
            Some(dir) => {
                let mut store = FileStore::open(dir)?;
                if let Some(quota) = self.storage_quota {
                    store = store.with_quota(quota);
                }
                CacheManager::new(store, SystemClock, categories)
            }
            None => {
                let store = match self.storage_quota {
                    Some(quota) => MemoryStore::with_quota(quota),
                    None => MemoryStore::new(),
                };
                CacheManager::new(store, SystemClock, categories)
            }
        };
        Ok(manager)
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            sweep_interval: 300,
            cache_dir: None,
            storage_quota: Some(DEFAULT_STORAGE_QUOTA),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.sweep_interval(), Duration::from_secs(300));
        assert!(config.cache_dir.is_none());
        assert_eq!(config.storage_quota, Some(5_242_880));
    }

    #[test]
    fn test_config_from_env() {
        // Env vars are process-global, so every case lives in one test
        env::remove_var("SERVER_PORT");
        env::remove_var("SWEEP_INTERVAL");
        env::remove_var("CACHE_DIR");
        env::remove_var("STORAGE_QUOTA_BYTES");

        let config = Config::from_env();
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.sweep_interval, 300);
        assert!(config.cache_dir.is_none());
        assert_eq!(config.storage_quota, Some(DEFAULT_STORAGE_QUOTA));

        env::set_var("SWEEP_INTERVAL", "60");
        env::set_var("STORAGE_QUOTA_BYTES", "0");
        env::set_var("SERVER_PORT", "not-a-port");
        let config = Config::from_env();
        assert_eq!(config.sweep_interval, 60);
        assert!(config.storage_quota.is_none());
        assert_eq!(config.server_port, 3000);

        env::remove_var("SWEEP_INTERVAL");
        env::remove_var("STORAGE_QUOTA_BYTES");
        env::remove_var("SERVER_PORT");
    }

    #[test]
    fn test_build_in_memory_cache() {
        let config = Config::default();
        let mut cache = config.build_cache(CategoryTable::defaults()).unwrap();
        assert!(cache.set("NEWS", &["headline"]));
        assert_eq!(cache.categories().len(), 5);
    }

    #[test]
    fn test_build_file_cache() {
        let dir = env::temp_dir().join(format!("portal_cache_config_{}", std::process::id()));
        let config = Config {
            cache_dir: Some(dir.clone()),
            ..Config::default()
        };

        let mut cache = config.build_cache(CategoryTable::defaults()).unwrap();
        assert!(cache.set("USERS", &[1, 2, 3]));
        assert!(dir.join("cache_users").exists());
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
