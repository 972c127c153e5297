//! Vector utilities for fixed-dimension embeddings.
//!
//! Every embedding produced by [`Vectorizer::transform`](crate::vectorizer::Vectorizer::transform)
//! is either L2-unit-normalised or the all-zero vector. [`similarity`]
//! relies on that: it is a plain dot product, which equals cosine
//! similarity only for unit-length inputs.

use crate::error::{Result, RetrievalError};

/// Euclidean (L2) norm of a vector.
pub fn norm(v: &[f32]) -> f32 {
    v.iter().map(|x| x * x).sum::<f32>().sqrt()
}

/// Scale a vector to unit length in place.
///
/// A zero vector (no matched terms) is left unchanged.
pub fn l2_normalize(v: &mut [f32]) {
    let magnitude = norm(v);
    if magnitude > 0.0 {
        for x in v.iter_mut() {
            *x /= magnitude;
        }
    }
}

/// Similarity between two embeddings, computed as their dot product.
///
/// **Precondition:** both vectors are L2-normalised (as returned by
/// `transform`). Under that precondition the result is the cosine
/// similarity, here in `[0.0, 1.0]` since all term weights are
/// non-negative. On un-normalised input the dot product is returned as-is,
/// which is *not* a cosine similarity.
///
/// # Errors
///
/// Returns [`RetrievalError::DimensionMismatch`] if the lengths differ.
///
/// # Example
///
/// ```rust
/// use docsift_core::embedding::similarity;
///
/// let a = [0.6f32, 0.8];
/// assert!((similarity(&a, &a).unwrap() - 1.0).abs() < 1e-6);
/// assert!(similarity(&a, &[1.0]).is_err());
/// ```
pub fn similarity(a: &[f32], b: &[f32]) -> Result<f32> {
    if a.len() != b.len() {
        return Err(RetrievalError::DimensionMismatch {
            left: a.len(),
            right: b.len(),
        });
    }
    Ok(a.iter().zip(b.iter()).map(|(x, y)| x * y).sum())
}
