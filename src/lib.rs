//! Alliance Rating - least-squares contribution ratings
//!
//! This crate estimates per-team contribution ratings from alliance-based
//! match results by solving a least-squares system over match participation,
//! with outcome encoding, z-score normalization, and ranked output.

pub mod config;
pub mod error;
pub mod ingest;
pub mod rating;
pub mod report;
pub mod synth;
pub mod types;

// Re-export commonly used types and traits
pub use error::{RatingError, Result};
pub use types::*;

// Re-export key components
pub use rating::{compute_ratings, OutcomePolicy, RatingMapping, RatingModel, RatingRequest};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
