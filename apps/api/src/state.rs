use std::sync::Arc;

use crate::analysis::pipeline::Screener;
use crate::config::Config;
use crate::rescoring::RequirementsLock;
use crate::store::CandidateStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Postgres in production, in-memory when no database is configured.
    pub store: Arc<dyn CandidateStore>,
    /// Lexicon and pluggable scorer shared by submissions and rescoring.
    pub screener: Screener,
    /// Held while requirements are written and candidates rescored.
    pub requirements_lock: RequirementsLock,
    pub config: Config,
}
