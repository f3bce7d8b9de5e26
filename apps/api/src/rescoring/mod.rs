//! Rescoring Coordinator.
//!
//! Re-runs matching and planning for every stored candidate against a new
//! requirement profile. Candidates are processed through a bounded worker pool
//! (`Semaphore` + `FuturesUnordered`); one candidate failing never aborts the
//! rest. Re-running with the same requirements rewrites identical results, so an
//! interrupted run can simply be started again.
//!
//! Requirement writes hold `RequirementsLock` until their rescore finishes, so
//! overlapping updates apply in order and the last saved version is the one
//! every candidate ends up scored against.

use std::sync::Arc;

use futures::{stream::FuturesUnordered, StreamExt};
use serde::Serialize;
use tokio::sync::{Mutex, Semaphore};
use tracing::{info, warn};
use uuid::Uuid;

use crate::analysis::pipeline::{Evaluation, Screener};
use crate::analysis::requirements::RequirementProfile;
use crate::models::candidate::RequirementRecord;
use crate::store::{CandidateStore, StoreError};

pub const DEFAULT_CONCURRENCY: usize = 8;

/// Orders requirement updates against each other and against submissions that
/// score with the stored requirements.
pub type RequirementsLock = Arc<Mutex<()>>;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandidateOutcome {
    pub candidate_id: Uuid,
    #[serde(flatten)]
    pub status: OutcomeStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum OutcomeStatus {
    Rescored(Evaluation),
    Failed { error: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RescoreReport {
    pub total: usize,
    pub rescored: usize,
    pub failed_ids: Vec<Uuid>,
    /// Same order as the store's candidate ids.
    pub outcomes: Vec<CandidateOutcome>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequirementUpdate {
    pub requirements: RequirementRecord,
    pub rescore: RescoreReport,
}

/// Analyzes and saves new requirement text, then rescores every candidate.
pub async fn apply_requirements(
    store: Arc<dyn CandidateStore>,
    screener: &Screener,
    lock: &Mutex<()>,
    raw_text: &str,
    concurrency: usize,
) -> Result<RequirementUpdate, StoreError> {
    let profile = screener.analyze_requirements(raw_text);
    let _guard = lock.lock().await;
    let requirements = store.save_requirements(&profile).await?;
    info!(
        "Job requirements updated to version {} ({} skills)",
        requirements.version,
        requirements.profile.required_skills.len()
    );

    let rescore = rescore_all(
        store,
        screener,
        Arc::new(requirements.profile.clone()),
        concurrency,
    )
    .await?;

    Ok(RequirementUpdate {
        requirements,
        rescore,
    })
}

/// Only listing the candidates can fail the whole run; everything after that is
/// reported per candidate.
pub async fn rescore_all(
    store: Arc<dyn CandidateStore>,
    screener: &Screener,
    requirement: Arc<RequirementProfile>,
    concurrency: usize,
) -> Result<RescoreReport, StoreError> {
    let ids = store.candidate_ids().await?;
    let total = ids.len();
    info!("Rescoring {total} candidates (concurrency {})", concurrency.max(1));

    let sem = Arc::new(Semaphore::new(concurrency.max(1)));
    let mut tasks = FuturesUnordered::new();

    for (idx, id) in ids.into_iter().enumerate() {
        let sem = sem.clone();
        let store = store.clone();
        let screener = screener.clone();
        let requirement = requirement.clone();

        tasks.push(async move {
            let status = match sem.acquire().await {
                Ok(_permit) => {
                    match rescore_one(store.as_ref(), &screener, &requirement, id).await {
                        Ok(evaluation) => OutcomeStatus::Rescored(evaluation),
                        Err(e) => {
                            warn!("Rescoring candidate {id} failed: {e}");
                            OutcomeStatus::Failed {
                                error: e.to_string(),
                            }
                        }
                    }
                }
                Err(_) => OutcomeStatus::Failed {
                    error: "worker pool closed".to_string(),
                },
            };
            (
                idx,
                CandidateOutcome {
                    candidate_id: id,
                    status,
                },
            )
        });
    }

    let mut outcomes = Vec::with_capacity(total);
    while let Some(outcome) = tasks.next().await {
        outcomes.push(outcome);
    }
    outcomes.sort_by_key(|(idx, _)| *idx);
    let outcomes: Vec<CandidateOutcome> = outcomes.into_iter().map(|(_, o)| o).collect();

    let failed_ids: Vec<Uuid> = outcomes
        .iter()
        .filter(|o| matches!(o.status, OutcomeStatus::Failed { .. }))
        .map(|o| o.candidate_id)
        .collect();

    if failed_ids.is_empty() {
        info!("Rescored all {total} candidates");
    } else {
        warn!(
            "Rescored {} of {total} candidates; failed: {failed_ids:?}",
            total - failed_ids.len()
        );
    }

    Ok(RescoreReport {
        total,
        rescored: total - failed_ids.len(),
        failed_ids,
        outcomes,
    })
}

async fn rescore_one(
    store: &dyn CandidateStore,
    screener: &Screener,
    requirement: &RequirementProfile,
    id: Uuid,
) -> Result<Evaluation, StoreError> {
    let profile = store
        .load_profile(id)
        .await?
        .ok_or(StoreError::CandidateNotFound(id))?;
    let evaluation = screener.evaluate(&profile, requirement);
    store.save_evaluation(id, &evaluation).await?;
    Ok(evaluation)
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;

    use super::*;
    use crate::analysis::interview::InterviewFormat;
    use crate::analysis::matching::{MatchPolicy, WeightedOverlapScorer};
    use crate::analysis::resume_parser::CandidateProfile;
    use crate::analysis::tier::MatchTier;
    use crate::lexicon::SkillLexicon;
    use crate::models::candidate::{CandidateRecord, CandidateSummary};
    use crate::store::MemoryCandidateStore;

    fn screener() -> Screener {
        Screener::new(
            Arc::new(SkillLexicon::builtin().unwrap()),
            Arc::new(WeightedOverlapScorer::new(MatchPolicy::default())),
        )
    }

    /// Delegates to the memory store; fails saves for one candidate and tracks
    /// how many profile loads are in flight at once.
    struct FlakyStore {
        inner: MemoryCandidateStore,
        fail_id: Option<Uuid>,
        in_flight: AtomicUsize,
        max_in_flight: AtomicUsize,
    }

    impl FlakyStore {
        fn new(inner: MemoryCandidateStore, fail_id: Option<Uuid>) -> Self {
            Self {
                inner,
                fail_id,
                in_flight: AtomicUsize::new(0),
                max_in_flight: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl CandidateStore for FlakyStore {
        async fn insert_candidate(
            &self,
            raw_text: &str,
            profile: &CandidateProfile,
            evaluation: &Evaluation,
        ) -> Result<CandidateRecord, StoreError> {
            self.inner.insert_candidate(raw_text, profile, evaluation).await
        }

        async fn get_candidate(&self, id: Uuid) -> Result<Option<CandidateRecord>, StoreError> {
            self.inner.get_candidate(id).await
        }

        async fn list_candidates(&self) -> Result<Vec<CandidateSummary>, StoreError> {
            self.inner.list_candidates().await
        }

        async fn candidate_ids(&self) -> Result<Vec<Uuid>, StoreError> {
            self.inner.candidate_ids().await
        }

        async fn load_profile(&self, id: Uuid) -> Result<Option<CandidateProfile>, StoreError> {
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_in_flight.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(5)).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            self.inner.load_profile(id).await
        }

        async fn save_evaluation(
            &self,
            id: Uuid,
            evaluation: &Evaluation,
        ) -> Result<(), StoreError> {
            if self.fail_id == Some(id) {
                return Err(StoreError::Database(sqlx::Error::PoolTimedOut));
            }
            self.inner.save_evaluation(id, evaluation).await
        }

        async fn delete_candidate(&self, id: Uuid) -> Result<bool, StoreError> {
            self.inner.delete_candidate(id).await
        }

        async fn current_requirements(&self) -> Result<Option<RequirementRecord>, StoreError> {
            self.inner.current_requirements().await
        }

        async fn save_requirements(
            &self,
            profile: &RequirementProfile,
        ) -> Result<RequirementRecord, StoreError> {
            self.inner.save_requirements(profile).await
        }

        async fn requirement_history(&self) -> Result<Vec<RequirementRecord>, StoreError> {
            self.inner.requirement_history().await
        }
    }

    async fn seed(store: &MemoryCandidateStore, resumes: &[&str], requirements: &str) -> Vec<Uuid> {
        let s = screener();
        let requirement = s.analyze_requirements(requirements);
        let mut ids = Vec::new();
        for text in resumes {
            let screening = s.screen(text, &requirement);
            let record = store
                .insert_candidate(text, &screening.profile, &screening.evaluation)
                .await
                .unwrap();
            ids.push(record.id);
        }
        ids
    }

    #[tokio::test]
    async fn test_requirement_change_drops_tier_and_regenerates_plan() {
        let memory = MemoryCandidateStore::new();
        let ids = seed(&memory, &["Ann\nPython, SQL"], "Python, SQL").await;
        let store: Arc<dyn CandidateStore> = Arc::new(memory);

        let before = store.get_candidate(ids[0]).await.unwrap().unwrap();
        assert_eq!(before.result.tier, MatchTier::High);
        assert_eq!(before.plan.format, InterviewFormat::TechnicalDeepDive);

        let update = apply_requirements(
            store.clone(),
            &screener(),
            &Mutex::new(()),
            "Python, Docker, AWS, Kubernetes",
            DEFAULT_CONCURRENCY,
        )
        .await
        .unwrap();
        assert_eq!(update.requirements.version, 1);
        assert_eq!(update.rescore.rescored, 1);

        let after = store.get_candidate(ids[0]).await.unwrap().unwrap();
        assert!((after.result.score - 0.25).abs() < 1e-9);
        assert_eq!(after.result.tier, MatchTier::Low);
        assert_eq!(after.plan.format, InterviewFormat::BriefScreening);
        assert_ne!(after.plan, before.plan);
    }

    #[tokio::test]
    async fn test_overlapping_updates_leave_every_candidate_on_latest_version() {
        let memory = MemoryCandidateStore::new();
        let ids = seed(&memory, &["A\nPython, Rust"; 6], "SQL").await;
        let store: Arc<dyn CandidateStore> = Arc::new(FlakyStore::new(memory, None));
        let lock = Mutex::new(());
        let s = screener();

        let (first, second) = tokio::join!(
            apply_requirements(store.clone(), &s, &lock, "Python", 1),
            apply_requirements(store.clone(), &s, &lock, "Rust, Docker", 8),
        );
        first.unwrap();
        second.unwrap();

        let current = store.current_requirements().await.unwrap().unwrap();
        assert_eq!(current.version, 2);
        for id in ids {
            let record = store.get_candidate(id).await.unwrap().unwrap();
            let expected = s.evaluate(&record.profile, &current.profile);
            assert_eq!(record.result, expected.result, "candidate {id} is stale");
        }
    }

    #[tokio::test]
    async fn test_failures_are_isolated_per_candidate() {
        let memory = MemoryCandidateStore::new();
        let ids = seed(
            &memory,
            &["Ann\nPython", "Bob\nDocker", "Cy\nAWS"],
            "Python",
        )
        .await;
        let store: Arc<dyn CandidateStore> = Arc::new(FlakyStore::new(memory, Some(ids[1])));

        let requirement = Arc::new(screener().analyze_requirements("Docker"));
        let report = rescore_all(store.clone(), &screener(), requirement, 2)
            .await
            .unwrap();

        assert_eq!(report.total, 3);
        assert_eq!(report.rescored, 2);
        assert_eq!(report.failed_ids, vec![ids[1]]);
        let order: Vec<Uuid> = report.outcomes.iter().map(|o| o.candidate_id).collect();
        assert_eq!(order, ids);
        assert!(matches!(report.outcomes[0].status, OutcomeStatus::Rescored(_)));
        assert!(matches!(report.outcomes[1].status, OutcomeStatus::Failed { .. }));

        // the failed candidate keeps its previous evaluation
        let stale = store.get_candidate(ids[1]).await.unwrap().unwrap();
        assert_eq!(stale.result.score, 0.0);
    }

    #[tokio::test]
    async fn test_worker_pool_respects_cap() {
        let memory = MemoryCandidateStore::new();
        seed(&memory, &["A\nPython"; 6], "Python").await;
        let flaky = Arc::new(FlakyStore::new(memory, None));
        let store: Arc<dyn CandidateStore> = flaky.clone();

        let requirement = Arc::new(screener().analyze_requirements("Python"));
        let report = rescore_all(store, &screener(), requirement, 2).await.unwrap();

        assert_eq!(report.rescored, 6);
        let max = flaky.max_in_flight.load(Ordering::SeqCst);
        assert!((1..=2).contains(&max), "max in flight was {max}");
    }

    #[tokio::test]
    async fn test_rescoring_is_idempotent() {
        let memory = MemoryCandidateStore::new();
        seed(&memory, &["Ann\nPython, SQL", "Bob\nReact"], "SQL").await;
        let store: Arc<dyn CandidateStore> = Arc::new(memory);
        let requirement = Arc::new(screener().analyze_requirements("Python, React"));

        let first = rescore_all(store.clone(), &screener(), requirement.clone(), 4)
            .await
            .unwrap();
        let second = rescore_all(store, &screener(), requirement, 4).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_empty_store_rescores_nothing() {
        let store: Arc<dyn CandidateStore> = Arc::new(MemoryCandidateStore::new());
        let requirement = Arc::new(RequirementProfile::default());
        let report = rescore_all(store, &screener(), requirement, 0).await.unwrap();
        assert_eq!(report.total, 0);
        assert!(report.outcomes.is_empty());
    }
}
