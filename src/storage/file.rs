//! Directory-backed key-value store.
//!
//! Each key is a file inside the store directory. Writes land in a hidden
//! temporary file first and are renamed into place, so a reader never sees a
//! half-written value.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use tracing::debug;

use super::{check_quota, KeyValueStore};
use crate::error::StorageError;

// == File Store ==
/// Persistent store keeping one file per key.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
    quota: Option<usize>,
}

impl FileStore {
    /// Opens (creating if needed) a store rooted at `dir`.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        debug!("File store opened at {}", dir.display());
        Ok(Self { dir, quota: None })
    }

    /// Limits total usage (key plus value bytes) to `quota`.
    #[must_use]
    pub fn with_quota(mut self, quota: usize) -> Self {
        self.quota = Some(quota);
        self
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && !key.starts_with('.')
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));

        if valid {
            Ok(self.dir.join(key))
        } else {
            Err(StorageError::InvalidKey(key.to_string()))
        }
    }

    /// Bytes used by every stored key except `skip`.
    fn used_bytes_excluding(&self, skip: &str) -> Result<usize, StorageError> {
        let mut used = 0;
        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            let name = entry.file_name();
            let name = name.to_string_lossy();
            if name.starts_with('.') || name == skip {
                continue;
            }
            used += name.len() + entry.metadata()?.len() as usize;
        }
        Ok(used)
    }
}

impl KeyValueStore for FileStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        // Undecodable bytes must still reach the envelope parser, which
        // reports them as a corrupted entry rather than a storage failure
        match fs::read(path) {
            Ok(bytes) => Ok(Some(String::from_utf8_lossy(&bytes).into_owned())),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        if self.quota.is_some() {
            let needed = self.used_bytes_excluding(key)? + key.len() + value.len();
            check_quota(needed, self.quota)?;
        }

        let tmp = self.dir.join(format!(".{key}.tmp"));
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        match fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}
