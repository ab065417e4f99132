//! Design-matrix construction
//!
//! Builds the participation matrix relating teams to matches, oriented with
//! rows as observations (matches) and columns as unknowns (team ratings).
//! That is the shape the least-squares solve expects, with more observations
//! than unknowns in the well-posed case.
//!
//! Construction is a pure function of the universe ordering and the match
//! ordering: repeated calls with identical inputs produce bit-identical
//! matrices. All per-team addressing goes through an explicit [`TeamIndex`]
//! rather than map iteration order.

use nalgebra::{DMatrix, DVector};
use std::collections::{HashMap, HashSet};

use crate::error::RatingError;
use crate::rating::encoder::OutcomePolicy;
use crate::types::{DemiMatch, MatchRecord, TeamKey};

/// Ordered, duplicate-free team universe with O(1) key-to-index lookup
///
/// The caller's ordering is the authoritative index space: matrix columns and
/// rating-vector positions are addressed by index into this list.
#[derive(Debug, Clone)]
pub struct TeamIndex {
    keys: Vec<TeamKey>,
    positions: HashMap<TeamKey, usize>,
}

impl TeamIndex {
    /// Build an index from an ordered universe, rejecting duplicates
    pub fn new(keys: Vec<TeamKey>) -> crate::error::Result<Self> {
        let mut positions = HashMap::with_capacity(keys.len());
        for (i, key) in keys.iter().enumerate() {
            if positions.insert(key.clone(), i).is_some() {
                return Err(RatingError::DuplicateTeam { key: key.clone() }.into());
            }
        }
        Ok(Self { keys, positions })
    }

    /// Derive a universe from the matches themselves, in first-appearance order
    pub fn from_matches(matches: &[MatchRecord]) -> crate::error::Result<Self> {
        let mut keys = Vec::new();
        let mut seen = HashSet::new();
        for record in matches {
            for key in record.red.iter().chain(record.blue.iter()) {
                if seen.insert(key.clone()) {
                    keys.push(key.clone());
                }
            }
        }
        Self::new(keys)
    }

    pub fn position(&self, key: &TeamKey) -> Option<usize> {
        self.positions.get(key).copied()
    }

    pub fn keys(&self) -> &[TeamKey] {
        &self.keys
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    fn require(&self, key: &TeamKey, match_index: usize) -> crate::error::Result<usize> {
        self.position(key).ok_or_else(|| {
            RatingError::MalformedMatch {
                match_index,
                reason: format!("team {} is not in the declared universe", key),
            }
            .into()
        })
    }
}

/// A participation matrix paired with its aligned target vector
#[derive(Debug, Clone)]
pub struct DesignSystem {
    /// Observations x teams participation matrix
    pub matrix: DMatrix<f64>,
    /// One target per observation row
    pub targets: DVector<f64>,
}

/// Build the signed two-sided system for contribution-to-result ratings
///
/// Cell (j, i) is +1 when team i played red in match j, -1 when blue, 0 when
/// absent. Targets come from the outcome encoder under the given policy.
pub fn build_signed_system(
    index: &TeamIndex,
    matches: &[MatchRecord],
    policy: OutcomePolicy,
) -> crate::error::Result<DesignSystem> {
    let mut matrix = DMatrix::zeros(matches.len(), index.len());
    let mut targets = DVector::zeros(matches.len());

    for (j, record) in matches.iter().enumerate() {
        record.validate(j)?;
        for key in &record.red {
            let i = index.require(key, j)?;
            matrix[(j, i)] = 1.0;
        }
        for key in &record.blue {
            let i = index.require(key, j)?;
            matrix[(j, i)] = -1.0;
        }
        targets[j] = policy.encode(record.red_score, record.blue_score, j)?;
    }

    Ok(DesignSystem { matrix, targets })
}

/// Build the single-sided system for offensive-contribution ratings
///
/// One row per demi-match with cell value 1 for each participating team; the
/// target is the alliance's raw score, so no outcome encoding applies.
pub fn build_demi_system(
    index: &TeamIndex,
    demis: &[DemiMatch],
) -> crate::error::Result<DesignSystem> {
    let mut matrix = DMatrix::zeros(demis.len(), index.len());
    let mut targets = DVector::zeros(demis.len());

    for (j, demi) in demis.iter().enumerate() {
        if demi.teams.is_empty() {
            return Err(RatingError::MalformedMatch {
                match_index: j,
                reason: "an alliance is empty".to_string(),
            }
            .into());
        }
        for key in &demi.teams {
            let i = index.require(key, j)?;
            matrix[(j, i)] = 1.0;
        }
        targets[j] = demi.score;
    }

    Ok(DesignSystem { matrix, targets })
}
