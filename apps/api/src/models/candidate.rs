use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

use crate::analysis::interview::InterviewPlan;
use crate::analysis::matching::MatchResult;
use crate::analysis::pipeline::Evaluation;
use crate::analysis::requirements::RequirementProfile;
use crate::analysis::resume_parser::CandidateProfile;
use crate::analysis::tier::MatchTier;

// ────────────────────────────────────────────────────────────────────────────
// Database rows
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, FromRow)]
pub struct CandidateRow {
    pub id: Uuid,
    pub name: Option<String>,
    pub email: Option<String>,
    pub raw_text: String,
    pub profile: Value,
    pub result: Value,
    pub plan: Value,
    pub score: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow)]
pub struct CandidateSummaryRow {
    pub id: Uuid,
    pub name: Option<String>,
    pub email: Option<String>,
    pub score: f64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow)]
pub struct RequirementRow {
    pub id: Uuid,
    pub version: i32,
    pub profile: Value,
    pub created_at: DateTime<Utc>,
}

// ────────────────────────────────────────────────────────────────────────────
// Domain records
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateRecord {
    pub id: Uuid,
    pub raw_text: String,
    pub profile: CandidateProfile,
    pub result: MatchResult,
    pub plan: InterviewPlan,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CandidateRecord {
    pub fn summary(&self) -> CandidateSummary {
        CandidateSummary {
            id: self.id,
            name: self.profile.name.clone(),
            email: self.profile.email.clone(),
            score: self.result.score,
            tier: self.result.tier,
            created_at: self.created_at,
        }
    }

    pub fn set_evaluation(&mut self, evaluation: Evaluation) {
        self.result = evaluation.result;
        self.plan = evaluation.plan;
    }
}

impl TryFrom<CandidateRow> for CandidateRecord {
    type Error = serde_json::Error;

    fn try_from(row: CandidateRow) -> Result<Self, Self::Error> {
        Ok(CandidateRecord {
            id: row.id,
            raw_text: row.raw_text,
            profile: serde_json::from_value(row.profile)?,
            result: serde_json::from_value(row.result)?,
            plan: serde_json::from_value(row.plan)?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateSummary {
    pub id: Uuid,
    pub name: Option<String>,
    pub email: Option<String>,
    pub score: f64,
    pub tier: MatchTier,
    pub created_at: DateTime<Utc>,
}

impl From<CandidateSummaryRow> for CandidateSummary {
    fn from(row: CandidateSummaryRow) -> Self {
        CandidateSummary {
            id: row.id,
            name: row.name,
            email: row.email,
            score: row.score,
            // tier is always derived from the stored score
            tier: MatchTier::from_score(row.score),
            created_at: row.created_at,
        }
    }
}

/// One entry of the append-only requirement history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequirementRecord {
    pub id: Uuid,
    pub version: i32,
    pub profile: RequirementProfile,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<RequirementRow> for RequirementRecord {
    type Error = serde_json::Error;

    fn try_from(row: RequirementRow) -> Result<Self, Self::Error> {
        Ok(RequirementRecord {
            id: row.id,
            version: row.version,
            profile: serde_json::from_value(row.profile)?,
            created_at: row.created_at,
        })
    }
}
