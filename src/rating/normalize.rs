//! Z-score normalization of raw ratings
//!
//! Makes ratings comparable across computations with different absolute scale
//! (a single event versus a whole season) and removes the additive degree of
//! freedom the solver leaves behind: two solutions differing by a constant
//! normalize to the same vector.

use nalgebra::DVector;

use crate::error::RatingError;

/// Threshold below which the standard deviation is treated as zero
const STDDEV_EPSILON: f64 = 1e-12;

/// Mean and population standard deviation of a rating vector
pub fn rating_stats(ratings: &DVector<f64>) -> (f64, f64) {
    let n = ratings.len() as f64;
    let mean = ratings.iter().sum::<f64>() / n;
    let variance = ratings.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / n;
    (mean, variance.sqrt())
}

/// Apply the z-score transform `(x - mean) / stddev`
///
/// Uses the population standard deviation: the universe is the full set of
/// rated teams, not a sample. Fails when every team is tied, since the
/// transform is undefined on a zero-variance vector.
pub fn z_score(ratings: &DVector<f64>) -> crate::error::Result<DVector<f64>> {
    if ratings.is_empty() {
        return Err(RatingError::ZeroVariance.into());
    }

    let (mean, stddev) = rating_stats(ratings);
    if stddev < STDDEV_EPSILON {
        return Err(RatingError::ZeroVariance.into());
    }

    Ok(ratings.map(|r| (r - mean) / stddev))
}
