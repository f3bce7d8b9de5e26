use async_trait::async_trait;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::analysis::pipeline::Evaluation;
use crate::analysis::requirements::RequirementProfile;
use crate::analysis::resume_parser::CandidateProfile;
use crate::models::candidate::{
    CandidateRecord, CandidateRow, CandidateSummary, CandidateSummaryRow, RequirementRecord,
    RequirementRow,
};
use crate::store::{CandidateStore, StoreError};

pub struct PgCandidateStore {
    pool: PgPool,
}

impl PgCandidateStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CandidateStore for PgCandidateStore {
    async fn insert_candidate(
        &self,
        raw_text: &str,
        profile: &CandidateProfile,
        evaluation: &Evaluation,
    ) -> Result<CandidateRecord, StoreError> {
        let row = sqlx::query_as::<_, CandidateRow>(
            r#"
            INSERT INTO candidates (id, name, email, raw_text, profile, result, plan, score)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(profile.name.as_deref())
        .bind(profile.email.as_deref())
        .bind(raw_text)
        .bind(serde_json::to_value(profile)?)
        .bind(serde_json::to_value(&evaluation.result)?)
        .bind(serde_json::to_value(&evaluation.plan)?)
        .bind(evaluation.result.score)
        .fetch_one(&self.pool)
        .await?;

        info!("Inserted candidate {}", row.id);
        Ok(CandidateRecord::try_from(row)?)
    }

    async fn get_candidate(&self, id: Uuid) -> Result<Option<CandidateRecord>, StoreError> {
        let row = sqlx::query_as::<_, CandidateRow>("SELECT * FROM candidates WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(CandidateRecord::try_from).transpose()?)
    }

    async fn list_candidates(&self) -> Result<Vec<CandidateSummary>, StoreError> {
        let rows = sqlx::query_as::<_, CandidateSummaryRow>(
            "SELECT id, name, email, score, created_at FROM candidates ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(CandidateSummary::from).collect())
    }

    async fn candidate_ids(&self) -> Result<Vec<Uuid>, StoreError> {
        Ok(
            sqlx::query_scalar::<_, Uuid>("SELECT id FROM candidates ORDER BY created_at, id")
                .fetch_all(&self.pool)
                .await?,
        )
    }

    async fn load_profile(&self, id: Uuid) -> Result<Option<CandidateProfile>, StoreError> {
        let profile: Option<serde_json::Value> =
            sqlx::query_scalar("SELECT profile FROM candidates WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(profile.map(serde_json::from_value).transpose()?)
    }

    async fn save_evaluation(&self, id: Uuid, evaluation: &Evaluation) -> Result<(), StoreError> {
        let updated = sqlx::query(
            r#"
            UPDATE candidates
            SET result = $1, plan = $2, score = $3, updated_at = now()
            WHERE id = $4
            "#,
        )
        .bind(serde_json::to_value(&evaluation.result)?)
        .bind(serde_json::to_value(&evaluation.plan)?)
        .bind(evaluation.result.score)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if updated.rows_affected() == 0 {
            return Err(StoreError::CandidateNotFound(id));
        }
        Ok(())
    }

    async fn delete_candidate(&self, id: Uuid) -> Result<bool, StoreError> {
        let deleted = sqlx::query("DELETE FROM candidates WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(deleted.rows_affected() > 0)
    }

    async fn current_requirements(&self) -> Result<Option<RequirementRecord>, StoreError> {
        let row = sqlx::query_as::<_, RequirementRow>(
            "SELECT * FROM requirement_versions ORDER BY version DESC LIMIT 1",
        )
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(RequirementRecord::try_from).transpose()?)
    }

    async fn save_requirements(
        &self,
        profile: &RequirementProfile,
    ) -> Result<RequirementRecord, StoreError> {
        // Append-only INSERT; the next version is computed in the same statement
        let row = sqlx::query_as::<_, RequirementRow>(
            r#"
            INSERT INTO requirement_versions (id, version, profile)
            SELECT $1, COALESCE(MAX(version), 0) + 1, $2
            FROM requirement_versions
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(serde_json::to_value(profile)?)
        .fetch_one(&self.pool)
        .await?;

        info!("Saved job requirements version {}", row.version);
        Ok(RequirementRecord::try_from(row)?)
    }

    async fn requirement_history(&self) -> Result<Vec<RequirementRecord>, StoreError> {
        let rows = sqlx::query_as::<_, RequirementRow>(
            "SELECT * FROM requirement_versions ORDER BY version DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows
            .into_iter()
            .map(RequirementRecord::try_from)
            .collect::<Result<_, _>>()?)
    }
}
