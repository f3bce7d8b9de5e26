use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::analysis::pipeline::Evaluation;
use crate::analysis::requirements::RequirementProfile;
use crate::analysis::resume_parser::CandidateProfile;
use crate::models::candidate::{CandidateRecord, CandidateSummary, RequirementRecord};
use crate::store::{CandidateStore, StoreError};

/// In-process store. Candidates are kept in insertion order.
#[derive(Default)]
pub struct MemoryCandidateStore {
    inner: RwLock<Inner>,
}

#[derive(Default)]
struct Inner {
    candidates: Vec<CandidateRecord>,
    requirements: Vec<RequirementRecord>,
}

impl MemoryCandidateStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CandidateStore for MemoryCandidateStore {
    async fn insert_candidate(
        &self,
        raw_text: &str,
        profile: &CandidateProfile,
        evaluation: &Evaluation,
    ) -> Result<CandidateRecord, StoreError> {
        let now = Utc::now();
        let record = CandidateRecord {
            id: Uuid::new_v4(),
            raw_text: raw_text.to_string(),
            profile: profile.clone(),
            result: evaluation.result.clone(),
            plan: evaluation.plan.clone(),
            created_at: now,
            updated_at: now,
        };
        self.inner.write().await.candidates.push(record.clone());
        Ok(record)
    }

    async fn get_candidate(&self, id: Uuid) -> Result<Option<CandidateRecord>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.candidates.iter().find(|c| c.id == id).cloned())
    }

    async fn list_candidates(&self) -> Result<Vec<CandidateSummary>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .candidates
            .iter()
            .rev()
            .map(CandidateRecord::summary)
            .collect())
    }

    async fn candidate_ids(&self) -> Result<Vec<Uuid>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.candidates.iter().map(|c| c.id).collect())
    }

    async fn load_profile(&self, id: Uuid) -> Result<Option<CandidateProfile>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .candidates
            .iter()
            .find(|c| c.id == id)
            .map(|c| c.profile.clone()))
    }

    async fn save_evaluation(&self, id: Uuid, evaluation: &Evaluation) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        let record = inner
            .candidates
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(StoreError::CandidateNotFound(id))?;
        record.set_evaluation(evaluation.clone());
        record.updated_at = Utc::now();
        Ok(())
    }

    async fn delete_candidate(&self, id: Uuid) -> Result<bool, StoreError> {
        let mut inner = self.inner.write().await;
        let before = inner.candidates.len();
        inner.candidates.retain(|c| c.id != id);
        Ok(inner.candidates.len() != before)
    }

    async fn current_requirements(&self) -> Result<Option<RequirementRecord>, StoreError> {
        Ok(self.inner.read().await.requirements.last().cloned())
    }

    async fn save_requirements(
        &self,
        profile: &RequirementProfile,
    ) -> Result<RequirementRecord, StoreError> {
        let mut inner = self.inner.write().await;
        let version = inner.requirements.last().map_or(0, |r| r.version) + 1;
        let record = RequirementRecord {
            id: Uuid::new_v4(),
            version,
            profile: profile.clone(),
            created_at: Utc::now(),
        };
        inner.requirements.push(record.clone());
        Ok(record)
    }

    async fn requirement_history(&self) -> Result<Vec<RequirementRecord>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.requirements.iter().rev().cloned().collect())
    }
}
