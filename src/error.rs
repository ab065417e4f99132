//! Error types for the rating engine
//!
//! This module defines all error types using anyhow for consistent error
//! handling throughout the crate. Core failures are deterministic functions of
//! the inputs: the engine never retries and never returns partial results.

/// Result type alias for convenience
pub type Result<T> = anyhow::Result<T>;

/// Custom error types for specific rating-computation failures
#[derive(Debug, thiserror::Error)]
pub enum RatingError {
    #[error("match {match_index} is malformed: {reason}")]
    MalformedMatch { match_index: usize, reason: String },

    #[error("duplicate team key in universe: {key}")]
    DuplicateTeam { key: String },

    #[error("match {match_index} has a combined score of zero; margin-ratio target is undefined")]
    ZeroCombinedScore { match_index: usize },

    #[error(
        "participation graph splits into {components} disconnected components over {teams} \
         teams; ratings are not comparable across components"
    )]
    SingularSystem { components: usize, teams: usize },

    #[error("rating vector has zero variance; z-score normalization is undefined")]
    ZeroVariance,

    #[error("configuration error: {message}")]
    ConfigurationError { message: String },

    #[error("cache error: {message}")]
    CacheError { message: String },

    #[error("match source error: {message}")]
    SourceError { message: String },
}
