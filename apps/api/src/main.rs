mod config;
mod corpus;
mod embedding;
mod errors;
mod extract;
mod feedback;
mod matching;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::corpus::load_postings;
use crate::embedding::OllamaEmbedder;
use crate::feedback::FeedbackClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            let crate_target = env!("CARGO_PKG_NAME").replace('-', "_");
            EnvFilter::new(format!("{}={}", crate_target, &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting JobLens API v{}", env!("CARGO_PKG_VERSION"));

    // Build the working set once; a bad dataset degrades to an empty set
    // and the process keeps serving.
    let load = load_postings(&config.dataset_path);
    if let Some(reason) = &load.warning {
        warn!("Job dataset unavailable, matching will return empty rankings: {reason}");
    }
    info!(
        "Working set loaded: {} candidate postings from {}",
        load.working_set.len(),
        config.dataset_path
    );

    // Initialize embedding client
    let embedder = Arc::new(OllamaEmbedder::new(config.ollama_url.clone()));
    info!("Embedding client initialized (model: {})", embedding::MODEL);

    // Initialize feedback client
    let feedback = FeedbackClient::new(config.anthropic_api_key.clone());
    info!("Feedback client initialized (model: {})", feedback::MODEL);

    // Build app state
    let state = AppState {
        working_set: Arc::new(load.working_set),
        embedder,
        feedback,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
