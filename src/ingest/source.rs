//! Match-data sources
//!
//! A [`MatchSource`] supplies a finite set of match records keyed by opaque
//! match ids, in a stable order. Whatever sits behind it (a remote statistics
//! API, a file export, fixtures) is its own concern; the engine only sees the
//! resulting record list.

use tracing::debug;

use crate::error::RatingError;
use crate::ingest::cache::{CacheEntry, KeyValueCache};
use crate::types::MatchRecord;

/// Trait for producers of match records
pub trait MatchSource {
    /// The ids of every match this source knows, in a stable order
    fn match_ids(&self) -> crate::error::Result<Vec<String>>;

    /// Fetch one match record by id
    fn fetch(&self, match_id: &str) -> crate::error::Result<MatchRecord>;

    /// Fetch every record this source knows, in id order
    fn fetch_all(&self) -> crate::error::Result<Vec<MatchRecord>> {
        self.match_ids()?
            .iter()
            .map(|id| self.fetch(id))
            .collect()
    }
}

/// A fixed, in-memory source for fixtures and tests
#[derive(Debug, Clone, Default)]
pub struct StaticMatchSource {
    matches: Vec<(String, MatchRecord)>,
}

impl StaticMatchSource {
    pub fn new(matches: Vec<(String, MatchRecord)>) -> Self {
        Self { matches }
    }
}

impl MatchSource for StaticMatchSource {
    fn match_ids(&self) -> crate::error::Result<Vec<String>> {
        Ok(self.matches.iter().map(|(id, _)| id.clone()).collect())
    }

    fn fetch(&self, match_id: &str) -> crate::error::Result<MatchRecord> {
        self.matches
            .iter()
            .find(|(id, _)| id == match_id)
            .map(|(_, record)| record.clone())
            .ok_or_else(|| {
                RatingError::SourceError {
                    message: format!("unknown match id: {}", match_id),
                }
                .into()
            })
    }
}

/// A source wrapper that consults a cache before its inner source
///
/// Read-if-present, else fetch-and-store: a record is fetched from the inner
/// source at most once per cache lifetime.
pub struct CachedSource<S, C> {
    inner: S,
    cache: C,
}

impl<S: MatchSource, C: KeyValueCache> CachedSource<S, C> {
    pub fn new(inner: S, cache: C) -> Self {
        Self { inner, cache }
    }

    /// The wrapped cache, for inspection
    pub fn cache(&self) -> &C {
        &self.cache
    }
}

impl<S: MatchSource, C: KeyValueCache> MatchSource for CachedSource<S, C> {
    fn match_ids(&self) -> crate::error::Result<Vec<String>> {
        self.inner.match_ids()
    }

    fn fetch(&self, match_id: &str) -> crate::error::Result<MatchRecord> {
        if let Some(entry) = self.cache.get(match_id)? {
            return Ok(entry.record);
        }

        debug!(match_id, "cache miss, fetching from source");
        let record = self.inner.fetch(match_id)?;
        self.cache.put(match_id, CacheEntry::new(record.clone()))?;
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::cache::InMemoryCache;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn record(red: &str, blue: &str) -> MatchRecord {
        MatchRecord::new(vec![red.to_string()], vec![blue.to_string()], 10.0, 5.0)
    }

    /// Source that counts how many times each match is actually fetched
    struct CountingSource {
        inner: StaticMatchSource,
        fetches: AtomicUsize,
    }

    impl MatchSource for CountingSource {
        fn match_ids(&self) -> crate::error::Result<Vec<String>> {
            self.inner.match_ids()
        }

        fn fetch(&self, match_id: &str) -> crate::error::Result<MatchRecord> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            self.inner.fetch(match_id)
        }
    }

    #[test]
    fn test_static_source_fetch_all_keeps_order() {
        let source = StaticMatchSource::new(vec![
            ("m1".to_string(), record("a", "b")),
            ("m2".to_string(), record("c", "d")),
        ]);

        let records = source.fetch_all().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].red[0], "a");
        assert_eq!(records[1].red[0], "c");
    }

    #[test]
    fn test_static_source_unknown_id() {
        let source = StaticMatchSource::new(vec![]);
        assert!(source.fetch("missing").is_err());
    }

    #[test]
    fn test_cached_source_fetches_once() {
        let counting = CountingSource {
            inner: StaticMatchSource::new(vec![("m1".to_string(), record("a", "b"))]),
            fetches: AtomicUsize::new(0),
        };
        let cached = CachedSource::new(counting, InMemoryCache::new());

        let first = cached.fetch("m1").unwrap();
        let second = cached.fetch("m1").unwrap();
        assert_eq!(first, second);
        assert_eq!(cached.inner.fetches.load(Ordering::SeqCst), 1);
        assert_eq!(cached.cache().len().unwrap(), 1);
    }
}
