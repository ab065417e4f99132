//! Common types used throughout the rating engine

use serde::{Deserialize, Serialize};

use crate::error::RatingError;

/// Opaque identifier for a competing team (e.g. "frc1678")
pub type TeamKey = String;

/// One alliance-vs-alliance competition with its final scores
///
/// Records are produced by an ingestion source and consumed transiently by the
/// matrix builder; the engine never mutates or persists them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    /// Teams on the red alliance
    pub red: Vec<TeamKey>,
    /// Teams on the blue alliance
    pub blue: Vec<TeamKey>,
    pub red_score: f64,
    pub blue_score: f64,
}

impl MatchRecord {
    pub fn new(red: Vec<TeamKey>, blue: Vec<TeamKey>, red_score: f64, blue_score: f64) -> Self {
        Self {
            red,
            blue,
            red_score,
            blue_score,
        }
    }

    /// Split the match into its two single-sided observations
    ///
    /// Each alliance's absolute score becomes an independent observation for
    /// the offense model, with no reference to the opposing side.
    pub fn demi_split(&self) -> (DemiMatch, DemiMatch) {
        (
            DemiMatch {
                teams: self.red.clone(),
                score: self.red_score,
            },
            DemiMatch {
                teams: self.blue.clone(),
                score: self.blue_score,
            },
        )
    }

    /// Check the structural invariants: both alliances non-empty and disjoint
    ///
    /// `match_index` is only used to give the error enough context to locate
    /// the offending record in the input list.
    pub fn validate(&self, match_index: usize) -> crate::error::Result<()> {
        if self.red.is_empty() || self.blue.is_empty() {
            return Err(RatingError::MalformedMatch {
                match_index,
                reason: "an alliance is empty".to_string(),
            }
            .into());
        }

        for key in &self.red {
            if self.blue.contains(key) {
                return Err(RatingError::MalformedMatch {
                    match_index,
                    reason: format!("team {} appears on both alliances", key),
                }
                .into());
            }
        }

        Ok(())
    }
}

impl std::fmt::Display for MatchRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Red: {} ({}) vs Blue: {} ({})",
            self.red.join(" "),
            self.red_score,
            self.blue.join(" "),
            self.blue_score
        )
    }
}

/// A single alliance's outing: one group of teams and the score they posted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemiMatch {
    pub teams: Vec<TeamKey>,
    pub score: f64,
}

impl std::fmt::Display for DemiMatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Teams: {} Score: {}", self.teams.join(" "), self.score)
    }
}

/// A team bound to its computed rating
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatedTeam {
    pub key: TeamKey,
    pub rating: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(names: &[&str]) -> Vec<TeamKey> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_demi_split() {
        let record = MatchRecord::new(keys(&["a", "b"]), keys(&["c", "d"]), 30.0, 20.0);
        let (red, blue) = record.demi_split();

        assert_eq!(red.teams, keys(&["a", "b"]));
        assert_eq!(red.score, 30.0);
        assert_eq!(blue.teams, keys(&["c", "d"]));
        assert_eq!(blue.score, 20.0);
    }

    #[test]
    fn test_validate_accepts_disjoint_alliances() {
        let record = MatchRecord::new(keys(&["a", "b", "c"]), keys(&["d", "e", "f"]), 10.0, 5.0);
        assert!(record.validate(0).is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_alliance() {
        let record = MatchRecord::new(vec![], keys(&["d"]), 10.0, 5.0);
        let err = record.validate(3).unwrap_err();
        assert!(err.to_string().contains("match 3"));
    }

    #[test]
    fn test_validate_rejects_overlapping_alliances() {
        let record = MatchRecord::new(keys(&["a", "b"]), keys(&["b", "c"]), 10.0, 5.0);
        let err = record.validate(0).unwrap_err();
        assert!(err.to_string().contains("both alliances"));
    }
}
