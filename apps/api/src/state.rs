use std::sync::Arc;

use crate::corpus::WorkingSet;
use crate::embedding::Embedder;
use crate::feedback::FeedbackClient;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Read-only candidate corpus, built once at startup. May be empty if
    /// the dataset failed to load; matching then returns empty rankings.
    pub working_set: Arc<WorkingSet>,
    /// Pluggable embedding provider. Default: OllamaEmbedder.
    pub embedder: Arc<dyn Embedder>,
    pub feedback: FeedbackClient,
}
