//! Final results
//!
//! A [`GameResult`] is the summary shown at the end of a play-through and
//! reported to the lead backend. It keeps the per-slot record so the
//! presentation layer can show which questions were answered correctly.

use serde::{Deserialize, Serialize};

use crate::session_id::SessionId;

/// Whether the player reached the winning threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// The score met or exceeded the threshold
    Win,
    /// The score fell short of the threshold
    Lose,
}

impl Outcome {
    /// Decides the outcome of `score` against `threshold`
    pub fn from_score(score: usize, threshold: usize) -> Self {
        if score >= threshold {
            Self::Win
        } else {
            Self::Lose
        }
    }
}

/// Summary of a completed session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameResult {
    /// The play-through this result belongs to
    pub session_id: SessionId,
    /// Number of correct answers
    pub score: usize,
    /// Number of questions in the session
    pub total: usize,
    /// Win or lose against the configured threshold
    pub outcome: Outcome,
    /// For each slot, whether it was answered correctly
    pub breakdown: Vec<bool>,
}

impl GameResult {
    /// Builds a result from the per-slot record
    pub fn new(session_id: SessionId, breakdown: Vec<bool>, threshold: usize) -> Self {
        let score = breakdown.iter().filter(|correct| **correct).count();
        Self {
            session_id,
            score,
            total: breakdown.len(),
            outcome: Outcome::from_score(score, threshold),
            breakdown,
        }
    }

    /// Whether the player won
    pub fn is_win(&self) -> bool {
        self.outcome == Outcome::Win
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn test_outcome_threshold() {
        assert_eq!(Outcome::from_score(3, 3), Outcome::Win);
        assert_eq!(Outcome::from_score(4, 3), Outcome::Win);
        assert_eq!(Outcome::from_score(2, 3), Outcome::Lose);
        assert_eq!(Outcome::from_score(0, 0), Outcome::Win);
    }

    #[test]
    fn test_game_result_new() {
        let id = SessionId::from_str("10000").unwrap();
        let result = GameResult::new(id, vec![true, false, true, true], 3);
        assert_eq!(result.score, 3);
        assert_eq!(result.total, 4);
        assert!(result.is_win());

        let result = GameResult::new(id, vec![true, false, true], 3);
        assert_eq!(result.score, 2);
        assert_eq!(result.outcome, Outcome::Lose);
    }

    #[test]
    fn test_game_result_serialization() {
        let id = SessionId::from_str("10000").unwrap();
        let json = serde_json::to_string(&GameResult::new(id, vec![true], 1)).unwrap();
        assert!(json.contains("\"sessionId\":\"10000\""));
        assert!(json.contains("\"outcome\":\"Win\""));
        assert!(json.contains("\"breakdown\":[true]"));
    }
}
