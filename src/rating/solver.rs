//! Least-squares rating solver
//!
//! Solves `A x = y` for the rating vector minimizing `||A x - y||^2` using an
//! SVD factorization. The signed participation matrix of equal-sized alliances
//! is structurally rank deficient by one (shifting every rating by the same
//! constant changes no prediction), so the solver returns the minimum-norm
//! solution rather than failing.
//!
//! A disconnected participation graph is different: when two groups of teams
//! share no observation, the minimum-norm solution still exists but its values
//! are not comparable across components. That case is detected from the
//! matrix's nonzero pattern and surfaced as an error, never as a silently
//! returned vector.

use nalgebra::{DMatrix, DVector};
use tracing::debug;

use crate::error::RatingError;
use crate::rating::matrix::DesignSystem;

/// Solve the system for the minimum-norm least-squares rating vector
pub fn solve_minimum_norm(system: &DesignSystem) -> crate::error::Result<DVector<f64>> {
    let teams = system.matrix.ncols();
    if teams == 0 || system.matrix.nrows() == 0 {
        return Err(RatingError::SingularSystem {
            components: 0,
            teams,
        }
        .into());
    }

    let components = count_components(&system.matrix);
    if components > 1 {
        return Err(RatingError::SingularSystem { components, teams }.into());
    }

    let svd = system.matrix.clone().svd(true, true);
    let tolerance = singular_value_tolerance(&svd.singular_values, &system.matrix);

    let rank = svd.rank(tolerance);
    if rank + 1 < teams {
        // Connected but underdetermined (e.g. too few observations); the
        // minimum-norm solution is still the canonical answer, but the deficit
        // is worth surfacing for diagnosis.
        debug!(rank, teams, "rating system is rank deficient beyond the structural degree");
    }

    // Singular values below the tolerance are zeroed by the pseudoinverse
    // solve, which is what yields the minimum-norm solution over the null
    // space.
    let solution = svd
        .solve(&system.targets, tolerance)
        .map_err(|message| RatingError::ConfigurationError {
            message: message.to_string(),
        })?;

    Ok(solution)
}

/// Solve via the normal equations `(A^T A)^-1 A^T y`
///
/// Numerically inferior to [`solve_minimum_norm`]: squaring the matrix squares
/// its condition number, and the inverse does not exist at all for the signed
/// system's structural rank deficiency. Retained for comparison against the
/// factorization path on well-conditioned single-sided systems; not used by
/// the engine.
pub fn solve_normal_equations(system: &DesignSystem) -> crate::error::Result<DVector<f64>> {
    let teams = system.matrix.ncols();
    let gram: DMatrix<f64> = system.matrix.transpose() * &system.matrix;
    let moment: DVector<f64> = system.matrix.transpose() * &system.targets;

    let inverse = gram.try_inverse().ok_or(RatingError::SingularSystem {
        components: 1,
        teams,
    })?;

    Ok(inverse * moment)
}

/// Residual norm `||A x - y||` for a candidate rating vector
pub fn residual_norm(system: &DesignSystem, ratings: &DVector<f64>) -> f64 {
    (&system.matrix * ratings - &system.targets).norm()
}

/// Count connected components of the participation graph
///
/// Two teams are connected when some observation row touches both; a team
/// touched by no observation is its own component. Union-find over matrix
/// columns.
fn count_components(matrix: &DMatrix<f64>) -> usize {
    let n = matrix.ncols();
    let mut parent: Vec<usize> = (0..n).collect();

    fn find(parent: &mut Vec<usize>, i: usize) -> usize {
        let mut root = i;
        while parent[root] != root {
            root = parent[root];
        }
        let mut cursor = i;
        while parent[cursor] != root {
            let next = parent[cursor];
            parent[cursor] = root;
            cursor = next;
        }
        root
    }

    for j in 0..matrix.nrows() {
        let mut first: Option<usize> = None;
        for i in 0..n {
            if matrix[(j, i)] != 0.0 {
                match first {
                    None => first = Some(i),
                    Some(anchor) => {
                        let a = find(&mut parent, anchor);
                        let b = find(&mut parent, i);
                        parent[b] = a;
                    }
                }
            }
        }
    }

    (0..n).filter(|&i| find(&mut parent, i) == i).count()
}

fn singular_value_tolerance(singular_values: &DVector<f64>, matrix: &DMatrix<f64>) -> f64 {
    let largest = singular_values.iter().cloned().fold(0.0, f64::max);
    f64::EPSILON * matrix.nrows().max(matrix.ncols()) as f64 * largest
}
