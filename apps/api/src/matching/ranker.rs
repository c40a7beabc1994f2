//! Match Ranking Engine — embeds the resume and every candidate description,
//! scores each pair, and returns postings sorted by descending similarity.

use std::sync::Arc;

use serde::Serialize;
use tokio::task::JoinSet;
use tracing::warn;

use crate::corpus::WorkingSet;
use crate::embedding::{Embedder, Embedding};
use crate::matching::similarity::{cosine_similarity, to_percent};

/// One ranked posting. `score` is a percentage rounded to two decimals.
#[derive(Debug, Clone, Serialize)]
pub struct MatchResult {
    pub title: String,
    pub score: f32,
}

/// Ranks every posting in the working set against the resume text.
///
/// The resume is embedded once; descriptions are embedded concurrently, one
/// task per posting, so total latency is roughly one service round-trip. A
/// failed embedding degrades that posting's score through the provider's
/// zero-vector fallback and never aborts the ranking: the output always has
/// one entry per posting. Ties are broken by working-set order (stable sort).
pub async fn rank_postings(
    resume_text: &str,
    working_set: &WorkingSet,
    embedder: &Arc<dyn Embedder>,
) -> Vec<MatchResult> {
    if working_set.is_empty() {
        return Vec::new();
    }

    let resume_embedding = embedder.embed(resume_text).await;

    let mut tasks = JoinSet::new();
    for (index, posting) in working_set.postings().iter().enumerate() {
        let embedder = Arc::clone(embedder);
        let description = posting.description.clone();
        tasks.spawn(async move { (index, embedder.embed(&description).await) });
    }

    // Re-order completions by working-set index before scoring.
    let mut embeddings: Vec<Option<Embedding>> = vec![None; working_set.len()];
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((index, embedding)) => embeddings[index] = Some(embedding),
            Err(e) => warn!("Embedding task panicked, posting degrades to fallback: {e}"),
        }
    }

    let mut results: Vec<MatchResult> = working_set
        .postings()
        .iter()
        .zip(embeddings)
        .map(|(posting, embedding)| {
            let embedding = embedding.unwrap_or_else(Embedding::fallback);
            let similarity = cosine_similarity(resume_embedding.vector(), embedding.vector());
            MatchResult {
                title: posting.title.clone(),
                score: to_percent(similarity),
            }
        })
        .collect();

    results.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::Posting;
    use crate::embedding::EMBEDDING_DIM;
    use async_trait::async_trait;
    use std::collections::HashMap;

    /// Deterministic embedder keyed by exact text. Unknown text degrades to
    /// the zero fallback, mirroring a service failure.
    struct MockEmbedder {
        vectors: HashMap<String, Vec<f32>>,
    }

    impl MockEmbedder {
        fn new(entries: &[(&str, Vec<f32>)]) -> Arc<dyn Embedder> {
            Arc::new(Self {
                vectors: entries
                    .iter()
                    .map(|(text, v)| (text.to_string(), v.clone()))
                    .collect(),
            })
        }
    }

    #[async_trait]
    impl Embedder for MockEmbedder {
        async fn embed(&self, text: &str) -> Embedding {
            match self.vectors.get(text) {
                Some(v) => Embedding::Computed(v.clone()),
                None => Embedding::fallback(),
            }
        }
    }

    /// Unit vector along `axis`, full embedding dimension.
    fn unit(axis: usize) -> Vec<f32> {
        let mut v = vec![0.0; EMBEDDING_DIM];
        v[axis] = 1.0;
        v
    }

    fn working_set(postings: &[(&str, &str)]) -> WorkingSet {
        WorkingSet::from_postings(
            postings
                .iter()
                .map(|(title, description)| Posting {
                    title: title.to_string(),
                    description: description.to_string(),
                })
                .collect(),
        )
    }

    #[tokio::test]
    async fn test_ranking_sorts_by_descending_similarity() {
        let ws = working_set(&[("Posting B", "rust systems"), ("Posting A", "python data")]);
        let embedder = MockEmbedder::new(&[
            ("my python resume", unit(0)),
            ("python data", unit(0)),
            ("rust systems", unit(1)),
        ]);

        let results = rank_postings("my python resume", &ws, &embedder).await;

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].title, "Posting A");
        assert_eq!(results[0].score, 100.0);
        assert_eq!(results[1].title, "Posting B");
        assert_eq!(results[1].score, 0.0);
    }

    #[tokio::test]
    async fn test_empty_working_set_returns_empty_ranking() {
        let embedder = MockEmbedder::new(&[("resume", unit(0))]);

        let results = rank_postings("resume", &working_set(&[]), &embedder).await;

        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_one_result_per_posting_in_non_increasing_order() {
        let ws = working_set(&[("A", "da"), ("B", "db"), ("C", "dc"), ("D", "dd")]);
        let mut mixed = unit(0);
        mixed[1] = 1.0;
        let embedder = MockEmbedder::new(&[
            ("resume", unit(0)),
            ("da", unit(1)),
            ("db", mixed),
            ("dc", unit(0)),
        ]);

        let results = rank_postings("resume", &ws, &embedder).await;

        assert_eq!(results.len(), ws.len());
        for pair in results.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }

    #[tokio::test]
    async fn test_ties_keep_working_set_order() {
        let ws = working_set(&[("First", "same text a"), ("Second", "same text b")]);
        let embedder = MockEmbedder::new(&[
            ("resume", unit(0)),
            ("same text a", unit(0)),
            ("same text b", unit(0)),
        ]);

        let results = rank_postings("resume", &ws, &embedder).await;

        assert_eq!(results[0].score, results[1].score);
        assert_eq!(results[0].title, "First");
        assert_eq!(results[1].title, "Second");
    }

    #[tokio::test]
    async fn test_degraded_posting_scores_zero_but_is_still_ranked() {
        let ws = working_set(&[("Known", "known description"), ("Unknown", "never embedded")]);
        let embedder = MockEmbedder::new(&[
            ("resume", unit(0)),
            ("known description", unit(0)),
        ]);

        let results = rank_postings("resume", &ws, &embedder).await;

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].title, "Known");
        assert_eq!(results[1].title, "Unknown");
        assert_eq!(results[1].score, 0.0);
    }

    #[tokio::test]
    async fn test_degraded_resume_embedding_still_returns_full_ranking() {
        let ws = working_set(&[("A", "da"), ("B", "db")]);
        let embedder = MockEmbedder::new(&[("da", unit(0)), ("db", unit(1))]);

        // Resume text unknown to the mock: resume embedding degrades to the
        // zero vector and every posting scores 0.
        let results = rank_postings("resume", &ws, &embedder).await;

        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|r| r.score == 0.0));
        assert_eq!(results[0].title, "A");
    }

    #[tokio::test]
    async fn test_ranking_is_deterministic_for_same_inputs() {
        let ws = working_set(&[("A", "da"), ("B", "db"), ("C", "dc")]);
        let mut near = unit(0);
        near[1] = 0.5;
        let embedder = MockEmbedder::new(&[
            ("resume", unit(0)),
            ("da", near.clone()),
            ("db", unit(0)),
            ("dc", unit(2)),
        ]);

        let first = rank_postings("resume", &ws, &embedder).await;
        let second = rank_postings("resume", &ws, &embedder).await;

        let titles = |rs: &[MatchResult]| rs.iter().map(|r| r.title.clone()).collect::<Vec<_>>();
        assert_eq!(titles(&first), titles(&second));
        let scores = |rs: &[MatchResult]| rs.iter().map(|r| r.score).collect::<Vec<_>>();
        assert_eq!(scores(&first), scores(&second));
    }
}
