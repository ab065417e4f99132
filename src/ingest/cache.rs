//! Key-value cache for fetched match records
//!
//! An explicit store abstraction injected into the ingestion layer, with an
//! in-memory implementation for tests and a JSON-file implementation matching
//! the read-if-present-else-fetch-and-store usage of [`super::CachedSource`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use crate::error::RatingError;
use crate::types::MatchRecord;

/// A cached match record with fetch metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry {
    pub record: MatchRecord,
    pub fetched_at: DateTime<Utc>,
}

impl CacheEntry {
    pub fn new(record: MatchRecord) -> Self {
        Self {
            record,
            fetched_at: Utc::now(),
        }
    }
}

/// Trait for match-record cache stores
pub trait KeyValueCache: Send + Sync {
    /// Look up a cached record by match id
    fn get(&self, match_id: &str) -> crate::error::Result<Option<CacheEntry>>;

    /// Store or replace a record under a match id
    fn put(&self, match_id: &str, entry: CacheEntry) -> crate::error::Result<()>;

    /// Number of cached records
    fn len(&self) -> crate::error::Result<usize>;

    fn is_empty(&self) -> crate::error::Result<bool> {
        Ok(self.len()? == 0)
    }
}

/// In-memory cache implementation
#[derive(Debug, Default)]
pub struct InMemoryCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl InMemoryCache {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueCache for InMemoryCache {
    fn get(&self, match_id: &str) -> crate::error::Result<Option<CacheEntry>> {
        let entries = self.entries.read().map_err(|_| RatingError::CacheError {
            message: "failed to acquire cache read lock".to_string(),
        })?;
        Ok(entries.get(match_id).cloned())
    }

    fn put(&self, match_id: &str, entry: CacheEntry) -> crate::error::Result<()> {
        let mut entries = self.entries.write().map_err(|_| RatingError::CacheError {
            message: "failed to acquire cache write lock".to_string(),
        })?;
        entries.insert(match_id.to_string(), entry);
        Ok(())
    }

    fn len(&self) -> crate::error::Result<usize> {
        let entries = self.entries.read().map_err(|_| RatingError::CacheError {
            message: "failed to acquire cache read lock".to_string(),
        })?;
        Ok(entries.len())
    }
}

/// JSON-file-backed cache implementation
///
/// The whole store is one JSON object mapping match ids to entries, rewritten
/// on every put. Suitable for the small per-event record sets this tool works
/// with; a heavier store can implement [`KeyValueCache`] instead.
#[derive(Debug)]
pub struct JsonFileCache {
    path: PathBuf,
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl JsonFileCache {
    /// Open a cache file, creating an empty store if the file is absent
    pub fn open(path: impl AsRef<Path>) -> crate::error::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let entries = if path.exists() {
            let raw = std::fs::read_to_string(&path).map_err(|e| RatingError::CacheError {
                message: format!("failed to read {}: {}", path.display(), e),
            })?;
            serde_json::from_str(&raw).map_err(|e| RatingError::CacheError {
                message: format!("failed to parse {}: {}", path.display(), e),
            })?
        } else {
            HashMap::new()
        };
        Ok(Self {
            path,
            entries: RwLock::new(entries),
        })
    }

    fn flush(&self, entries: &HashMap<String, CacheEntry>) -> crate::error::Result<()> {
        let raw = serde_json::to_string(entries).map_err(|e| RatingError::CacheError {
            message: format!("failed to serialize cache: {}", e),
        })?;
        std::fs::write(&self.path, raw).map_err(|e| {
            RatingError::CacheError {
                message: format!("failed to write {}: {}", self.path.display(), e),
            }
            .into()
        })
    }
}

impl KeyValueCache for JsonFileCache {
    fn get(&self, match_id: &str) -> crate::error::Result<Option<CacheEntry>> {
        let entries = self.entries.read().map_err(|_| RatingError::CacheError {
            message: "failed to acquire cache read lock".to_string(),
        })?;
        Ok(entries.get(match_id).cloned())
    }

    fn put(&self, match_id: &str, entry: CacheEntry) -> crate::error::Result<()> {
        let mut entries = self.entries.write().map_err(|_| RatingError::CacheError {
            message: "failed to acquire cache write lock".to_string(),
        })?;
        entries.insert(match_id.to_string(), entry);
        self.flush(&entries)
    }

    fn len(&self) -> crate::error::Result<usize> {
        let entries = self.entries.read().map_err(|_| RatingError::CacheError {
            message: "failed to acquire cache read lock".to_string(),
        })?;
        Ok(entries.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> MatchRecord {
        MatchRecord::new(
            vec!["a".to_string()],
            vec!["b".to_string()],
            10.0,
            5.0,
        )
    }

    #[test]
    fn test_in_memory_round_trip() {
        let cache = InMemoryCache::new();
        assert!(cache.get("m1").unwrap().is_none());

        cache.put("m1", CacheEntry::new(sample_record())).unwrap();
        let entry = cache.get("m1").unwrap().unwrap();
        assert_eq!(entry.record, sample_record());
        assert_eq!(cache.len().unwrap(), 1);
    }

    #[test]
    fn test_put_replaces_existing_entry() {
        let cache = InMemoryCache::new();
        cache.put("m1", CacheEntry::new(sample_record())).unwrap();

        let mut replacement = sample_record();
        replacement.red_score = 99.0;
        cache.put("m1", CacheEntry::new(replacement.clone())).unwrap();

        assert_eq!(cache.get("m1").unwrap().unwrap().record, replacement);
        assert_eq!(cache.len().unwrap(), 1);
    }

    #[test]
    fn test_json_file_cache_persists_across_opens() {
        let path = std::env::temp_dir().join(format!(
            "alliance-rating-cache-{}.json",
            std::process::id()
        ));
        let _ = std::fs::remove_file(&path);

        {
            let cache = JsonFileCache::open(&path).unwrap();
            cache.put("m1", CacheEntry::new(sample_record())).unwrap();
        }

        let reopened = JsonFileCache::open(&path).unwrap();
        assert_eq!(reopened.get("m1").unwrap().unwrap().record, sample_record());

        let _ = std::fs::remove_file(&path);
    }
}
