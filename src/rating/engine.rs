//! The batch rating pipeline
//!
//! One synchronous, stateless call: build the design system, solve it,
//! optionally normalize, and bind ratings back to team keys. Identical inputs
//! produce identical outputs; a failure at any stage aborts the whole
//! computation with no partial result.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::RatingError;
use crate::rating::aggregate::RatingMapping;
use crate::rating::encoder::OutcomePolicy;
use crate::rating::matrix::{build_demi_system, build_signed_system, TeamIndex};
use crate::rating::normalize::z_score;
use crate::rating::solver::solve_minimum_norm;
use crate::types::{MatchRecord, TeamKey};

/// Which regression the ratings come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "model")]
pub enum RatingModel {
    /// Signed two-sided system: each match is one observation whose target is
    /// the encoded outcome. A team's rating is its contribution to the match
    /// result.
    MatchResult { policy: OutcomePolicy },
    /// Single-sided system: each alliance outing is one observation whose
    /// target is the raw alliance score. A team's rating is its offensive
    /// contribution.
    Offense,
}

/// Everything one rating computation needs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatingRequest {
    /// Ordered, duplicate-free team universe; the authoritative index space
    pub universe: Vec<TeamKey>,
    pub matches: Vec<MatchRecord>,
    pub model: RatingModel,
    /// Apply the z-score transform to the raw solution
    pub normalize: bool,
    /// Presentation rescale applied after the solve (and before
    /// normalization, which would cancel it); unit concern only
    pub scale: Option<f64>,
}

impl RatingRequest {
    /// A match-result request with no normalization or rescale
    pub fn match_result(
        universe: Vec<TeamKey>,
        matches: Vec<MatchRecord>,
        policy: OutcomePolicy,
    ) -> Self {
        Self {
            universe,
            matches,
            model: RatingModel::MatchResult { policy },
            normalize: false,
            scale: None,
        }
    }

    /// An offense request normalized for cross-event comparison
    pub fn normalized_offense(universe: Vec<TeamKey>, matches: Vec<MatchRecord>) -> Self {
        Self {
            universe,
            matches,
            model: RatingModel::Offense,
            normalize: true,
            scale: None,
        }
    }
}

/// Run the full pipeline for one request
pub fn compute_ratings(request: &RatingRequest) -> crate::error::Result<RatingMapping> {
    if request.universe.is_empty() {
        return Err(RatingError::ConfigurationError {
            message: "team universe is empty".to_string(),
        }
        .into());
    }
    if request.matches.is_empty() {
        return Err(RatingError::ConfigurationError {
            message: "match list is empty".to_string(),
        }
        .into());
    }

    let index = TeamIndex::new(request.universe.clone())?;

    let system = match request.model {
        RatingModel::MatchResult { policy } => {
            build_signed_system(&index, &request.matches, policy)?
        }
        RatingModel::Offense => {
            let mut demis = Vec::with_capacity(request.matches.len() * 2);
            for (j, record) in request.matches.iter().enumerate() {
                record.validate(j)?;
                let (red, blue) = record.demi_split();
                demis.push(red);
                demis.push(blue);
            }
            build_demi_system(&index, &demis)?
        }
    };

    debug!(
        observations = system.matrix.nrows(),
        teams = system.matrix.ncols(),
        "solving rating system"
    );

    let mut ratings = solve_minimum_norm(&system)?;

    if let Some(scale) = request.scale {
        ratings *= scale;
    }

    if request.normalize {
        ratings = z_score(&ratings)?;
    }

    Ok(RatingMapping::bind(&index, &ratings))
}
