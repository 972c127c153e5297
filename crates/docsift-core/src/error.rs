//! Error types for the retrieval core.
//!
//! Degenerate inputs (empty corpus, empty query, unfitted vectorizer) are
//! never errors; they resolve to zero vectors or empty result lists. The
//! variants here cover programmer errors and the corpus-loading boundary.

use thiserror::Error;

/// Result type for retrieval operations.
pub type Result<T> = std::result::Result<T, RetrievalError>;

/// Errors raised by similarity scoring and search.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RetrievalError {
    /// Two vectors of different lengths were compared.
    #[error("vector length mismatch: {left} != {right}")]
    DimensionMismatch { left: usize, right: usize },

    /// The caller's stop predicate fired during a linear scan.
    #[error("search cancelled after scoring {scored} of {total} fragments")]
    Cancelled { scored: usize, total: usize },
}

/// Errors raised while enumerating or reading a corpus.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CorpusError {
    /// The corpus as a whole could not be enumerated.
    #[error("corpus unavailable: {0}")]
    Unavailable(String),

    /// A single document could not be read.
    #[error("document '{id}' unreadable: {reason}")]
    Unreadable { id: String, reason: String },
}

impl CorpusError {
    /// Create an unavailable-corpus error
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }

    /// Create an unreadable-document error
    pub fn unreadable(id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Unreadable {
            id: id.into(),
            reason: reason.into(),
        }
    }
}

/// Rejected tunables for chunking or vectorizing.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("invalid configuration: {0}")]
pub struct ConfigError(pub String);
