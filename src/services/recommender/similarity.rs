use std::cmp::Ordering;

use super::vector::FilmVector;

/// Cosine similarity between two film vectors.
///
/// Vectors are L2-normalized at build time, so this reduces to the sparse dot
/// product. An all-zero vector scores 0 against everything, which is a valid
/// result rather than an error.
pub fn cosine(a: &FilmVector, b: &FilmVector) -> f32 {
    a.dot(b)
}

/// Scores the query against every vector in the corpus, the query's own
/// vector included (the self-match is excluded downstream by the assembler).
///
/// Returns `(corpus index, score)` pairs sorted by score descending; equal
/// scores fall back to ascending corpus index so results are reproducible
/// across runs for identical input.
pub fn rank(query: &FilmVector, all: &[FilmVector]) -> Vec<(usize, f32)> {
    let mut ranked: Vec<(usize, f32)> = all
        .iter()
        .map(|vector| cosine(query, vector))
        .enumerate()
        .collect();

    ranked.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.0.cmp(&b.0))
    });
    ranked
}
