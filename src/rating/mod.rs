//! The rating-computation pipeline
//!
//! This module contains the numerical core: outcome encoding, design-matrix
//! construction, the minimum-norm least-squares solve, z-score normalization,
//! and the aggregation of solved ratings back onto team keys.

pub mod aggregate;
pub mod encoder;
pub mod engine;
pub mod matrix;
pub mod normalize;
pub mod solver;

// Re-export commonly used types
pub use aggregate::RatingMapping;
pub use encoder::OutcomePolicy;
pub use engine::{compute_ratings, RatingModel, RatingRequest};
pub use matrix::{build_demi_system, build_signed_system, DesignSystem, TeamIndex};
pub use solver::{residual_norm, solve_minimum_norm, solve_normal_equations};
