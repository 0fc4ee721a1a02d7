use tracing::warn;

/// Cosine similarity in [-1, 1]. Zero vectors and mismatched dimensions give 0.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    if a.len() != b.len() {
        warn!(
            a_len = a.len(),
            b_len = b.len(),
            "embedding dimension mismatch; returning zero similarity"
        );
        return 0.0;
    }

    let dot: f64 = a
        .iter()
        .zip(b)
        .map(|(x, y)| f64::from(*x) * f64::from(*y))
        .sum();
    let norm_a = a.iter().map(|x| f64::from(*x).powi(2)).sum::<f64>().sqrt();
    let norm_b = b.iter().map(|x| f64::from(*x).powi(2)).sum::<f64>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

/// Maps similarity in [0, 1] linearly onto [0, cap]. Absent embeddings give 0.
pub fn semantic_bonus(candidate: Option<&[f32]>, job: Option<&[f32]>, cap: f64) -> f64 {
    match (candidate, job) {
        (Some(a), Some(b)) => cap * cosine_similarity(a, b).clamp(0.0, 1.0),
        _ => 0.0,
    }
}
