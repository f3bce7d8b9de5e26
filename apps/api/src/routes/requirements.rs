//! Job requirement endpoints. Writing new requirements rescores every candidate.

use axum::{extract::State, Json};
use serde::Deserialize;

use crate::analysis::requirements::RequirementProfile;
use crate::errors::AppError;
use crate::models::candidate::RequirementRecord;
use crate::rescoring::{apply_requirements, RequirementUpdate};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RequirementsRequest {
    pub raw_text: String,
}

/// GET /api/v1/requirements
pub async fn handle_get_requirements(
    State(state): State<AppState>,
) -> Result<Json<RequirementRecord>, AppError> {
    let current = state
        .store
        .current_requirements()
        .await?
        .ok_or_else(|| AppError::NotFound("No job requirements have been set".to_string()))?;
    Ok(Json(current))
}

/// PUT /api/v1/requirements
///
/// Saves a new requirements version and rescores all candidates against it.
/// Succeeds even when individual candidates fail; see `rescore.failed_ids`.
pub async fn handle_put_requirements(
    State(state): State<AppState>,
    Json(request): Json<RequirementsRequest>,
) -> Result<Json<RequirementUpdate>, AppError> {
    let update = apply_requirements(
        state.store.clone(),
        &state.screener,
        &state.requirements_lock,
        &request.raw_text,
        state.config.rescore_concurrency,
    )
    .await?;
    Ok(Json(update))
}

/// POST /api/v1/requirements/analyze
///
/// Previews what the analyzer extracts without saving anything.
pub async fn handle_analyze_requirements(
    State(state): State<AppState>,
    Json(request): Json<RequirementsRequest>,
) -> Result<Json<RequirementProfile>, AppError> {
    if request.raw_text.trim().is_empty() {
        return Err(AppError::Validation("raw_text cannot be empty".to_string()));
    }
    Ok(Json(state.screener.analyze_requirements(&request.raw_text)))
}

/// GET /api/v1/requirements/history
pub async fn handle_requirement_history(
    State(state): State<AppState>,
) -> Result<Json<Vec<RequirementRecord>>, AppError> {
    Ok(Json(state.store.requirement_history().await?))
}
