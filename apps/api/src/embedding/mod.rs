//! Embedding Provider — the single point of entry for all embedding calls.
//!
//! ARCHITECTURAL RULE: no other module may call the embedding service
//! directly. The ranking engine depends only on the [`Embedder`] trait,
//! carried in `AppState` as `Arc<dyn Embedder>`, so tests can substitute a
//! deterministic mock.
//!
//! Failure policy: an embedding call never fails. Any error reaching or
//! reading the service degrades to the zero fallback vector, logged through
//! tracing. Downstream scoring then yields 0 similarity for the affected
//! text instead of aborting the request.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

/// The embedding model used for all calls.
/// Intentionally hardcoded to prevent accidental drift.
pub const MODEL: &str = "nomic-embed-text";

/// Dimension of every vector produced by this module, fallback included.
pub const EMBEDDING_DIM: usize = 768;

/// A hung embedding call routes into the fallback path after this long.
const REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error)]
enum EmbedError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("unexpected embedding dimension {got} (want {EMBEDDING_DIM})")]
    Dimension { got: usize },
}

/// Outcome of an embedding call. `Degraded` carries the zero fallback
/// vector substituted when the service could not produce a real embedding.
#[derive(Debug, Clone, PartialEq)]
pub enum Embedding {
    Computed(Vec<f32>),
    Degraded(Vec<f32>),
}

impl Embedding {
    /// The deterministic zero vector used when embedding fails.
    pub fn fallback() -> Self {
        Embedding::Degraded(vec![0.0; EMBEDDING_DIM])
    }

    pub fn vector(&self) -> &[f32] {
        match self {
            Embedding::Computed(v) | Embedding::Degraded(v) => v,
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, Embedding::Degraded(_))
    }
}

/// Pluggable embedding backend. Default: [`OllamaEmbedder`].
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Embeds `text` into a fixed-dimension vector. Never fails: service
    /// errors yield [`Embedding::fallback`] instead.
    async fn embed(&self, text: &str) -> Embedding;
}

#[derive(Debug, Serialize)]
struct EmbeddingsRequest<'a> {
    model: &'a str,
    prompt: &'a str,
}

#[derive(Debug, Deserialize)]
struct EmbeddingsResponse {
    embedding: Vec<f32>,
}

/// Embedding client for a local Ollama instance.
#[derive(Clone)]
pub struct OllamaEmbedder {
    client: Client,
    base_url: String,
}

impl OllamaEmbedder {
    pub fn new(base_url: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()
                .expect("Failed to build HTTP client"),
            base_url,
        }
    }

    async fn request(&self, prompt: &str) -> Result<Vec<f32>, EmbedError> {
        let url = format!("{}/api/embeddings", self.base_url.trim_end_matches('/'));

        let response = self
            .client
            .post(&url)
            .json(&EmbeddingsRequest {
                model: MODEL,
                prompt,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(EmbedError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: EmbeddingsResponse = response.json().await?;

        // A wrong-size vector would violate the scorer's equal-length
        // precondition; treat it like any other service failure.
        if body.embedding.len() != EMBEDDING_DIM {
            return Err(EmbedError::Dimension {
                got: body.embedding.len(),
            });
        }

        Ok(body.embedding)
    }
}

#[async_trait]
impl Embedder for OllamaEmbedder {
    async fn embed(&self, text: &str) -> Embedding {
        match self.request(text).await {
            Ok(vector) => Embedding::Computed(vector),
            Err(e) => {
                warn!("Embedding call failed, substituting zero vector: {e}");
                Embedding::fallback()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_is_zero_vector_of_fixed_dimension() {
        let fallback = Embedding::fallback();
        assert!(fallback.is_degraded());
        assert_eq!(fallback.vector().len(), EMBEDDING_DIM);
        assert!(fallback.vector().iter().all(|&x| x == 0.0));
    }

    #[test]
    fn test_computed_embedding_is_not_degraded() {
        let embedding = Embedding::Computed(vec![0.5; EMBEDDING_DIM]);
        assert!(!embedding.is_degraded());
    }

    #[test]
    fn test_embeddings_response_parses_ollama_shape() {
        let body: EmbeddingsResponse =
            serde_json::from_str(r#"{"embedding": [0.1, -0.2, 0.3]}"#).unwrap();
        assert_eq!(body.embedding, vec![0.1, -0.2, 0.3]);
    }
}
