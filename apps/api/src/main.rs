mod analysis;
mod config;
mod db;
mod errors;
mod lexicon;
mod models;
mod rescoring;
mod routes;
mod state;
mod store;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analysis::matching::{MatchScorer, WeightedOverlapScorer};
use crate::analysis::pipeline::Screener;
use crate::config::Config;
use crate::db::{create_pool, ensure_schema};
use crate::lexicon::SkillLexicon;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::{CandidateStore, MemoryCandidateStore, PgCandidateStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting screener v{}", env!("CARGO_PKG_VERSION"));

    // A malformed lexicon is fatal
    let lexicon = match &config.skill_lexicon_path {
        Some(path) => SkillLexicon::from_path(path)
            .with_context(|| format!("Failed to load skill lexicon from {}", path.display()))?,
        None => SkillLexicon::builtin().context("Built-in skill lexicon is invalid")?,
    };
    info!("Skill lexicon loaded ({} skills)", lexicon.len());

    // Initialize scorer (weighted overlap by default)
    let scorer: Arc<dyn MatchScorer> = Arc::new(WeightedOverlapScorer::new(config.match_policy));
    info!(
        "Match scorer: {} (neutral score {})",
        scorer.backend(),
        config.match_policy.neutral_score
    );

    // Initialize candidate store
    let store: Arc<dyn CandidateStore> = match &config.database_url {
        Some(url) => {
            let pool = create_pool(url, config.database_max_connections).await?;
            ensure_schema(&pool).await?;
            Arc::new(PgCandidateStore::new(pool))
        }
        None => {
            warn!("DATABASE_URL is not set; candidates are kept in memory only");
            Arc::new(MemoryCandidateStore::new())
        }
    };

    // Build app state
    let state = AppState {
        store,
        screener: Screener::new(Arc::new(lexicon), scorer),
        requirements_lock: Arc::new(Mutex::new(())),
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
