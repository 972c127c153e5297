//! Corpus-source abstraction.
//!
//! The [`CorpusSource`] trait is how the indexer enumerates and reads
//! documents, so callers can plug in a filesystem tree, an in-memory list,
//! or anything else that yields text.
//!
//! Failures are split by scope: [`CorpusError::Unavailable`] from
//! [`list`](CorpusSource::list) means the whole source is unusable, and
//! [`CorpusError::Unreadable`] from [`read`](CorpusSource::read) affects a
//! single document, which the indexer skips.

use std::collections::BTreeMap;

use crate::error::CorpusError;
use crate::models::SourceDocument;

/// A readable collection of plain-text documents.
///
/// Implementations must be `Send + Sync` so one source can back indexing
/// from any thread.
pub trait CorpusSource: Send + Sync {
    /// Identifiers of every document in the source.
    ///
    /// Order is not significant; the indexer sorts identifiers before
    /// chunking.
    fn list(&self) -> Result<Vec<String>, CorpusError>;

    /// Full decoded text of one document.
    fn read(&self, id: &str) -> Result<String, CorpusError>;
}

/// Read every listed document, sorted by id, skipping unreadable ones.
///
/// Returns the loaded documents and the number skipped. An unavailable
/// source is returned as an error for the caller to degrade on.
pub fn load_documents(
    source: &dyn CorpusSource,
) -> Result<(Vec<SourceDocument>, usize), CorpusError> {
    let mut ids = source.list()?;
    ids.sort();
    ids.dedup();

    let mut documents = Vec::with_capacity(ids.len());
    let mut skipped = 0;
    for id in ids {
        match source.read(&id) {
            Ok(text) => documents.push(SourceDocument { id, text }),
            Err(e) => {
                tracing::warn!(document = %id, error = %e, "skipping unreadable document");
                skipped += 1;
            }
        }
    }
    Ok((documents, skipped))
}

/// In-memory corpus for tests, embedders, and WASM targets.
///
/// Documents are keyed by id; inserting an existing id replaces its text.
#[derive(Debug, Clone, Default)]
pub struct MemoryCorpus {
    docs: BTreeMap<String, String>,
}

impl MemoryCorpus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut corpus = Self::new();
        for (id, text) in pairs {
            corpus.insert(id, text);
        }
        corpus
    }

    pub fn insert(&mut self, id: impl Into<String>, text: impl Into<String>) {
        self.docs.insert(id.into(), text.into());
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }
}

impl CorpusSource for MemoryCorpus {
    fn list(&self) -> Result<Vec<String>, CorpusError> {
        Ok(self.docs.keys().cloned().collect())
    }

    fn read(&self, id: &str) -> Result<String, CorpusError> {
        self.docs
            .get(id)
            .cloned()
            .ok_or_else(|| CorpusError::unreadable(id, "no such document"))
    }
}
