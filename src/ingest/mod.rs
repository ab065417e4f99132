//! Ingestion boundary for match data
//!
//! The engine itself never performs I/O; it consumes whatever finite match
//! list an ingestion source hands it. This module defines that boundary: a
//! [`MatchSource`] that produces records keyed by opaque match ids, and a
//! [`KeyValueCache`] that a [`CachedSource`] consults before fetching
//! (read-if-present, else fetch-and-store).

pub mod cache;
pub mod source;

// Re-export commonly used types
pub use cache::{InMemoryCache, JsonFileCache, KeyValueCache};
pub use source::{CachedSource, MatchSource, StaticMatchSource};
