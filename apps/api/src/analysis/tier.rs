//! Score tiers. These thresholds are the only place tier boundaries are defined;
//! the interview planner, statistics and the store all classify through here.

use std::fmt;

use serde::{Deserialize, Serialize};

/// score ≥ 0.70 is a High Match.
pub const HIGH_MATCH_THRESHOLD: f64 = 0.70;
/// 0.40 ≤ score < 0.70 is a Medium Match; anything lower is Low.
pub const MEDIUM_MATCH_THRESHOLD: f64 = 0.40;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchTier {
    #[serde(rename = "High Match")]
    High,
    #[serde(rename = "Medium Match")]
    Medium,
    #[serde(rename = "Low Match")]
    Low,
}

impl MatchTier {
    pub fn from_score(score: f64) -> Self {
        if score >= HIGH_MATCH_THRESHOLD {
            MatchTier::High
        } else if score >= MEDIUM_MATCH_THRESHOLD {
            MatchTier::Medium
        } else {
            MatchTier::Low
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MatchTier::High => "High Match",
            MatchTier::Medium => "Medium Match",
            MatchTier::Low => "Low Match",
        }
    }
}

impl fmt::Display for MatchTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
