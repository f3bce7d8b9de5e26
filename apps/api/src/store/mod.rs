//! Candidate store: the only I/O collaborator of the screening core.
//!
//! `PgCandidateStore` is used when `DATABASE_URL` is set; `MemoryCandidateStore`
//! otherwise and in tests. Both go through the `CandidateStore` trait held in
//! `AppState`.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::analysis::pipeline::Evaluation;
use crate::analysis::requirements::RequirementProfile;
use crate::analysis::resume_parser::CandidateProfile;
use crate::analysis::tier::MatchTier;
use crate::models::candidate::{CandidateRecord, CandidateSummary, RequirementRecord};

pub use memory::MemoryCandidateStore;
pub use postgres::PgCandidateStore;

/// Window for the "recent uploads" statistic.
pub const RECENT_UPLOAD_DAYS: i64 = 7;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Candidate {0} not found")]
    CandidateNotFound(Uuid),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Stored record could not be decoded: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[async_trait]
pub trait CandidateStore: Send + Sync {
    async fn insert_candidate(
        &self,
        raw_text: &str,
        profile: &CandidateProfile,
        evaluation: &Evaluation,
    ) -> Result<CandidateRecord, StoreError>;

    async fn get_candidate(&self, id: Uuid) -> Result<Option<CandidateRecord>, StoreError>;

    /// Newest first.
    async fn list_candidates(&self) -> Result<Vec<CandidateSummary>, StoreError>;

    /// Oldest first, so rescoring visits candidates in a stable order.
    async fn candidate_ids(&self) -> Result<Vec<Uuid>, StoreError>;

    async fn load_profile(&self, id: Uuid) -> Result<Option<CandidateProfile>, StoreError>;

    /// Overwrites the stored result and plan. Fails with `CandidateNotFound`
    /// when the candidate was deleted in the meantime.
    async fn save_evaluation(&self, id: Uuid, evaluation: &Evaluation) -> Result<(), StoreError>;

    /// Returns whether a candidate was removed.
    async fn delete_candidate(&self, id: Uuid) -> Result<bool, StoreError>;

    async fn current_requirements(&self) -> Result<Option<RequirementRecord>, StoreError>;

    /// Appends a new requirement version; earlier versions are never modified.
    async fn save_requirements(
        &self,
        profile: &RequirementProfile,
    ) -> Result<RequirementRecord, StoreError>;

    /// Newest first.
    async fn requirement_history(&self) -> Result<Vec<RequirementRecord>, StoreError>;

    async fn statistics(&self) -> Result<Statistics, StoreError> {
        let summaries = self.list_candidates().await?;
        Ok(Statistics::from_summaries(&summaries, Utc::now()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Statistics {
    pub total_candidates: usize,
    pub high_match: usize,
    pub medium_match: usize,
    pub low_match: usize,
    /// `None` when there are no candidates.
    pub average_score: Option<f64>,
    pub recent_uploads: usize,
}

impl Statistics {
    pub fn from_summaries(summaries: &[CandidateSummary], now: DateTime<Utc>) -> Self {
        let cutoff = now - Duration::days(RECENT_UPLOAD_DAYS);
        let mut stats = Statistics {
            total_candidates: summaries.len(),
            high_match: 0,
            medium_match: 0,
            low_match: 0,
            average_score: None,
            recent_uploads: 0,
        };

        for summary in summaries {
            // re-derive from the score rather than trusting the stored tier
            match MatchTier::from_score(summary.score) {
                MatchTier::High => stats.high_match += 1,
                MatchTier::Medium => stats.medium_match += 1,
                MatchTier::Low => stats.low_match += 1,
            }
            if summary.created_at >= cutoff {
                stats.recent_uploads += 1;
            }
        }

        if !summaries.is_empty() {
            let total: f64 = summaries.iter().map(|s| s.score).sum();
            stats.average_score = Some(total / summaries.len() as f64);
        }

        stats
    }
}
