//! Outcome encoding policies
//!
//! Turns the raw pair of opposing scores into the scalar regression target the
//! least-squares system is fit against. The policy is always an explicit
//! caller choice; nothing is auto-detected from the data.

use serde::{Deserialize, Serialize};

use crate::error::RatingError;

/// How a match's score pair becomes a regression target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomePolicy {
    /// Who won: +1 for a red win, -1 for a blue win, 0 for a tie
    ///
    /// Produces ratings that predict match outcome.
    Sign,
    /// Normalized score difference: (red - blue) / (red + blue)
    ///
    /// Produces ratings that predict relative scoring margin. Undefined for a
    /// combined score of zero (e.g. a 0-0 tie), which is surfaced as an error
    /// rather than coerced to 0 or NaN.
    MarginRatio,
}

impl OutcomePolicy {
    /// Encode one score pair under this policy
    ///
    /// `match_index` identifies the match in error messages.
    pub fn encode(
        &self,
        red_score: f64,
        blue_score: f64,
        match_index: usize,
    ) -> crate::error::Result<f64> {
        match self {
            OutcomePolicy::Sign => {
                if red_score > blue_score {
                    Ok(1.0)
                } else if red_score < blue_score {
                    Ok(-1.0)
                } else {
                    Ok(0.0)
                }
            }
            OutcomePolicy::MarginRatio => {
                let combined = red_score + blue_score;
                if combined == 0.0 {
                    return Err(RatingError::ZeroCombinedScore { match_index }.into());
                }
                Ok((red_score - blue_score) / combined)
            }
        }
    }
}

impl std::fmt::Display for OutcomePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutcomePolicy::Sign => write!(f, "sign"),
            OutcomePolicy::MarginRatio => write!(f, "margin-ratio"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_policy_exactness() {
        assert_eq!(OutcomePolicy::Sign.encode(10.0, 5.0, 0).unwrap(), 1.0);
        assert_eq!(OutcomePolicy::Sign.encode(5.0, 10.0, 0).unwrap(), -1.0);
        assert_eq!(OutcomePolicy::Sign.encode(7.0, 7.0, 0).unwrap(), 0.0);
    }

    #[test]
    fn test_margin_ratio_exactness() {
        let target = OutcomePolicy::MarginRatio.encode(10.0, 5.0, 0).unwrap();
        assert!((target - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_margin_ratio_zero_combined_score() {
        let err = OutcomePolicy::MarginRatio.encode(0.0, 0.0, 7).unwrap_err();
        assert!(err.to_string().contains("match 7"));
    }

    #[test]
    fn test_policy_serde_round_trip() {
        let json = serde_json::to_string(&OutcomePolicy::MarginRatio).unwrap();
        assert_eq!(json, "\"margin_ratio\"");
        let policy: OutcomePolicy = serde_json::from_str(&json).unwrap();
        assert_eq!(policy, OutcomePolicy::MarginRatio);
    }
}
