pub mod candidates;
pub mod health;
pub mod requirements;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Candidates
        .route(
            "/api/v1/candidates",
            get(candidates::handle_list_candidates).post(candidates::handle_submit_resume),
        )
        .route(
            "/api/v1/candidates/:id",
            get(candidates::handle_get_candidate).delete(candidates::handle_delete_candidate),
        )
        .route("/api/v1/statistics", get(candidates::handle_statistics))
        // Job requirements
        .route(
            "/api/v1/requirements",
            get(requirements::handle_get_requirements).put(requirements::handle_put_requirements),
        )
        .route(
            "/api/v1/requirements/analyze",
            post(requirements::handle_analyze_requirements),
        )
        .route(
            "/api/v1/requirements/history",
            get(requirements::handle_requirement_history),
        )
        .with_state(state)
}
