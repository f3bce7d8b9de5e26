//! Candidate endpoints: submit a resume, list, fetch, delete, statistics.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::analysis::requirements::RequirementProfile;
use crate::analysis::resume_parser::ExtractionGap;
use crate::errors::AppError;
use crate::models::candidate::{CandidateRecord, CandidateSummary};
use crate::state::AppState;
use crate::store::Statistics;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SubmitResumeRequest {
    /// Text extracted from the uploaded document.
    #[serde(default)]
    pub raw_text: String,
    /// Scores against this text instead of the stored requirements. Not saved.
    pub requirements: Option<String>,
    /// Set by the uploader when text extraction failed upstream.
    pub extraction_error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SubmitResumeResponse {
    #[serde(flatten)]
    pub candidate: CandidateRecord,
    pub extraction_gaps: Vec<ExtractionGap>,
    /// Version of the stored requirements used, `None` for ad-hoc or absent ones.
    pub requirements_version: Option<i32>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/candidates
pub async fn handle_submit_resume(
    State(state): State<AppState>,
    Json(request): Json<SubmitResumeRequest>,
) -> Result<(StatusCode, Json<SubmitResumeResponse>), AppError> {
    if let Some(reason) = request.extraction_error {
        warn!("Rejecting resume submission: extraction failed upstream: {reason}");
        return Err(AppError::ExtractionFailed(reason));
    }
    if request.raw_text.trim().is_empty() {
        return Err(AppError::ExtractionFailed(
            "No text could be extracted from the resume".to_string(),
        ));
    }

    let inline = request
        .requirements
        .as_deref()
        .filter(|text| !text.trim().is_empty());

    // Scoring against the stored requirements must not interleave with an update,
    // or the new candidate would miss that update's rescore.
    let _guard = match inline {
        Some(_) => None,
        None => Some(state.requirements_lock.lock().await),
    };

    let (requirement, requirements_version) = match inline {
        Some(text) => (state.screener.analyze_requirements(text), None),
        None => match state.store.current_requirements().await? {
            Some(record) => (record.profile, Some(record.version)),
            None => (RequirementProfile::default(), None),
        },
    };

    let screening = state.screener.screen(&request.raw_text, &requirement);
    let extraction_gaps = screening.profile.extraction_gaps();
    let candidate = state
        .store
        .insert_candidate(&request.raw_text, &screening.profile, &screening.evaluation)
        .await?;

    info!(
        "Candidate {} submitted: {:.3} ({})",
        candidate.id, candidate.result.score, candidate.result.tier
    );

    Ok((
        StatusCode::CREATED,
        Json(SubmitResumeResponse {
            candidate,
            extraction_gaps,
            requirements_version,
        }),
    ))
}

/// GET /api/v1/candidates
pub async fn handle_list_candidates(
    State(state): State<AppState>,
) -> Result<Json<Vec<CandidateSummary>>, AppError> {
    Ok(Json(state.store.list_candidates().await?))
}

/// GET /api/v1/candidates/:id
pub async fn handle_get_candidate(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CandidateRecord>, AppError> {
    let candidate = state
        .store
        .get_candidate(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Candidate {id} not found")))?;
    Ok(Json(candidate))
}

/// DELETE /api/v1/candidates/:id
pub async fn handle_delete_candidate(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if !state.store.delete_candidate(id).await? {
        return Err(AppError::NotFound(format!("Candidate {id} not found")));
    }
    info!("Deleted candidate {id}");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/statistics
pub async fn handle_statistics(
    State(state): State<AppState>,
) -> Result<Json<Statistics>, AppError> {
    Ok(Json(state.store.statistics().await?))
}
