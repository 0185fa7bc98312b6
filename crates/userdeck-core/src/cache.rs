//! Key-value cache for validated payloads.
//!
//! Values are stored as raw JSON. Reads hand the JSON back untrusted:
//! callers re-validate before use and remove entries that fail. There is
//! no TTL; staleness policy belongs to whoever owns the key.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;
use serde_json::Value;
use thiserror::Error;

use crate::config::Config;

/// Cache storage errors.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Cache I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cache serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Keyed JSON storage.
///
/// `get` treats every storage-level failure as a miss; only writes and
/// removals surface errors.
pub trait CacheStore: Send + Sync {
    fn get(&self, key: &str) -> Option<Value>;
    fn set(&self, key: &str, value: Value) -> Result<(), CacheError>;
    fn remove(&self, key: &str) -> Result<(), CacheError>;
}

/// In-memory store, used by tests and as a session-scoped cache.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: RwLock<HashMap<String, Value>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CacheStore for MemoryCache {
    fn get(&self, key: &str) -> Option<Value> {
        self.entries.read().get(key).cloned()
    }

    fn set(&self, key: &str, value: Value) -> Result<(), CacheError> {
        self.entries.write().insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), CacheError> {
        self.entries.write().remove(key);
        Ok(())
    }
}

/// Single-file JSON store: one object with a field per cache key.
///
/// A missing or unreadable file is treated as an empty store so a
/// corrupt file can never poison reads.
#[derive(Debug)]
pub struct JsonFileCache {
    path: PathBuf,
}

impl JsonFileCache {
    /// Create a store backed by `userdeck_cache.json` in `cache_dir`.
    pub fn new(cache_dir: &Path) -> Self {
        Self {
            path: cache_dir.join("userdeck_cache.json"),
        }
    }

    fn read_entries(&self) -> HashMap<String, Value> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) => {
                if e.kind() != std::io::ErrorKind::NotFound {
                    tracing::warn!("Failed to read cache file: {}", e);
                }
                return HashMap::new();
            }
        };

        match serde_json::from_str(&text) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!("Cache file is not valid JSON, treating as empty: {}", e);
                HashMap::new()
            }
        }
    }

    fn write_entries(&self, entries: &HashMap<String, Value>) -> Result<(), CacheError> {
        let text = serde_json::to_string(entries)?;
        fs::write(&self.path, text)?;
        Ok(())
    }
}

impl CacheStore for JsonFileCache {
    fn get(&self, key: &str) -> Option<Value> {
        self.read_entries().remove(key)
    }

    fn set(&self, key: &str, value: Value) -> Result<(), CacheError> {
        let mut entries = self.read_entries();
        entries.insert(key.to_string(), value);
        self.write_entries(&entries)
    }

    fn remove(&self, key: &str) -> Result<(), CacheError> {
        let mut entries = self.read_entries();
        if entries.remove(key).is_some() {
            self.write_entries(&entries)?;
        }
        Ok(())
    }
}

/// Build the store selected by `config.cache_dir`: on-disk when set,
/// in-memory otherwise.
pub fn store_for(config: &Config) -> Arc<dyn CacheStore> {
    match &config.cache_dir {
        Some(dir) => Arc::new(JsonFileCache::new(dir)),
        None => Arc::new(MemoryCache::new()),
    }
}
