//! Binding ratings back to team keys
//!
//! The solver works purely in index space; this module restores the
//! key-to-rating association by positional correspondence with the universe
//! ordering and provides the presentation-ready ranking.

use nalgebra::DVector;
use serde::{Deserialize, Serialize};

use crate::rating::matrix::TeamIndex;
use crate::types::{RatedTeam, TeamKey};

/// The engine's output: every team in the universe bound to its rating
///
/// Entries keep the universe ordering; created fresh per computation with no
/// state shared across calls.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatingMapping {
    entries: Vec<RatedTeam>,
}

impl RatingMapping {
    /// Bind a rating vector to the universe it was solved against
    ///
    /// The vector is aligned one-to-one with the index by construction, so
    /// position i belongs to the i-th universe key.
    pub fn bind(index: &TeamIndex, ratings: &DVector<f64>) -> Self {
        let entries = index
            .keys()
            .iter()
            .zip(ratings.iter())
            .map(|(key, &rating)| RatedTeam {
                key: key.clone(),
                rating,
            })
            .collect();
        Self { entries }
    }

    /// Entries in universe order
    pub fn entries(&self) -> &[RatedTeam] {
        &self.entries
    }

    /// Look up a single team's rating
    pub fn rating(&self, key: &TeamKey) -> Option<f64> {
        self.entries
            .iter()
            .find(|entry| &entry.key == key)
            .map(|entry| entry.rating)
    }

    /// Entries sorted by rating, best first
    ///
    /// The sort is stable and no secondary key is applied: teams with equal
    /// ratings keep their relative universe order.
    pub fn ranked(&self) -> Vec<RatedTeam> {
        let mut ranked = self.entries.clone();
        ranked.sort_by(|a, b| {
            b.rating
                .partial_cmp(&a.rating)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        ranked
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
