//! Cosine similarity between embedding vectors.

/// Cosine similarity of two equal-length vectors, in [-1, 1].
///
/// Unequal lengths are a programming error: the embedding provider is the
/// sole vector source and always produces fixed-dimension vectors, fallback
/// included.
///
/// A zero-magnitude input (the degraded fallback vector) has no defined
/// cosine; this returns 0.0 rather than NaN so degraded embeddings score at
/// the bottom of the ranking instead of poisoning the sort.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    assert_eq!(
        a.len(),
        b.len(),
        "embedding dimension mismatch: {} vs {}",
        a.len(),
        b.len()
    );

    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot / (norm_a * norm_b)
}

/// Scales a raw similarity to the percentage-style score reported to
/// callers, rounded to two decimals.
pub fn to_percent(similarity: f32) -> f32 {
    (similarity * 100.0 * 100.0).round() / 100.0
}
