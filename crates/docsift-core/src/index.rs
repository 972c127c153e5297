//! Index snapshots and the shared indexer.
//!
//! An [`IndexSnapshot`] is an immutable value holding a fitted
//! [`Vectorizer`] together with the parallel fragment and embedding
//! stores: position `i` of one always corresponds to position `i` of the
//! other. Snapshots are built from a whole corpus at once and never
//! mutated afterwards.
//!
//! The [`Indexer`] owns the current snapshot behind an `RwLock<Arc<_>>`.
//! A rebuild constructs the new snapshot off to the side and swaps it in
//! under the write lock, so searches always see one complete snapshot and
//! never a half-fitted vocabulary. Concurrent rebuilds are serialised by a
//! separate writer mutex.

use std::sync::{Arc, Mutex, PoisonError, RwLock};

use crate::chunk::{chunk_text, ChunkingConfig};
use crate::corpus::{load_documents, CorpusSource};
use crate::embedding::similarity;
use crate::error::{ConfigError, Result, RetrievalError};
use crate::models::{Fragment, ScoredFragment, SourceDocument};
use crate::search::{assemble_results, rank_scores};
use crate::vectorizer::{Vectorizer, VectorizerConfig};

/// Fragments scored between polls of a search's stop predicate.
const STOP_CHECK_INTERVAL: usize = 256;

/// Tunables for building a snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexConfig {
    pub vectorizer: VectorizerConfig,
    pub chunking: ChunkingConfig,
}

impl IndexConfig {
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        self.vectorizer.validate()?;
        self.chunking.validate()
    }
}

/// A fitted vocabulary plus the fragments and embeddings built with it.
#[derive(Debug, Clone)]
pub struct IndexSnapshot {
    vectorizer: Vectorizer,
    fragments: Vec<Fragment>,
    embeddings: Vec<Vec<f32>>,
    document_count: usize,
}

impl IndexSnapshot {
    /// A snapshot with no fragments and an unfitted vectorizer.
    pub fn empty(config: &IndexConfig) -> Self {
        Self {
            vectorizer: Vectorizer::new(config.vectorizer.clone()),
            fragments: Vec::new(),
            embeddings: Vec::new(),
            document_count: 0,
        }
    }

    /// Chunk every document in order, fit the vocabulary over all
    /// fragments, then embed each fragment.
    pub fn build(documents: &[SourceDocument], config: &IndexConfig) -> Self {
        let mut fragments = Vec::new();
        for doc in documents {
            let spans = chunk_text(&doc.text, &config.chunking);
            tracing::debug!(document = %doc.id, fragments = spans.len(), "chunked document");
            for (chunk_index, text) in spans.into_iter().enumerate() {
                fragments.push(Fragment {
                    text,
                    document_id: doc.id.clone(),
                    chunk_index,
                });
            }
        }

        let mut vectorizer = Vectorizer::new(config.vectorizer.clone());
        let texts: Vec<&str> = fragments.iter().map(|f| f.text.as_str()).collect();
        let embeddings = vectorizer.fit_transform(&texts);

        Self {
            vectorizer,
            fragments,
            embeddings,
            document_count: documents.len(),
        }
    }

    /// Rank every fragment against `query` and return the best `top_k`.
    ///
    /// Returns an empty list when nothing is indexed or `top_k` is 0. If
    /// the vocabulary matched nothing (for instance a corpus made only of
    /// stop words), every score is 0.0 and fragments come back in index
    /// order.
    pub fn search(&self, query: &str, top_k: usize) -> Result<Vec<ScoredFragment>> {
        self.search_until(query, top_k, || false)
    }

    /// Like [`search`](Self::search), but polls `should_stop` during the
    /// linear scan and abandons it with [`RetrievalError::Cancelled`] once
    /// the predicate returns true.
    pub fn search_until<F>(
        &self,
        query: &str,
        top_k: usize,
        should_stop: F,
    ) -> Result<Vec<ScoredFragment>>
    where
        F: Fn() -> bool,
    {
        if self.fragments.is_empty() || top_k == 0 {
            return Ok(Vec::new());
        }

        let query_vec = self.vectorizer.transform(query);
        let total = self.embeddings.len();
        let mut scores = Vec::with_capacity(total);
        for (i, embedding) in self.embeddings.iter().enumerate() {
            if i % STOP_CHECK_INTERVAL == 0 && should_stop() {
                return Err(RetrievalError::Cancelled { scored: i, total });
            }
            scores.push(similarity(&query_vec, embedding)?);
        }

        let ranked = rank_scores(&scores, top_k);
        let results = assemble_results(&self.fragments, &scores, &ranked);
        tracing::debug!(
            query,
            scanned = total,
            returned = results.len(),
            best = ?results.first().map(|r| r.score),
            "search completed"
        );
        Ok(results)
    }

    pub fn vectorizer(&self) -> &Vectorizer {
        &self.vectorizer
    }

    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    /// Embeddings, parallel to [`fragments`](Self::fragments).
    pub fn embeddings(&self) -> &[Vec<f32>] {
        &self.embeddings
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Number of documents the snapshot was built from.
    pub fn document_count(&self) -> usize {
        self.document_count
    }
}

/// Shared, rebuildable index.
///
/// Readers take the current snapshot with [`snapshot`](Self::snapshot)
/// (or search through the indexer, which does the same); writers replace
/// it wholesale with [`index`](Self::index).
#[derive(Debug)]
pub struct Indexer {
    config: IndexConfig,
    current: RwLock<Arc<IndexSnapshot>>,
    writer: Mutex<()>,
}

impl Default for Indexer {
    fn default() -> Self {
        Self::new(IndexConfig::default())
    }
}

impl Indexer {
    pub fn new(config: IndexConfig) -> Self {
        let empty = IndexSnapshot::empty(&config);
        Self {
            config,
            current: RwLock::new(Arc::new(empty)),
            writer: Mutex::new(()),
        }
    }

    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    /// Rebuild the index from `source` and return the fragment count.
    ///
    /// Document ids are sorted before chunking so rebuilds are
    /// reproducible. Unreadable documents are skipped. An unavailable
    /// source installs an empty snapshot and returns 0; it is up to the
    /// caller whether that is fatal.
    pub fn index(&self, source: &dyn CorpusSource) -> usize {
        let _writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);

        let (documents, skipped) = match load_documents(source) {
            Ok(loaded) => loaded,
            Err(e) => {
                tracing::warn!(error = %e, "corpus unavailable; index is now empty");
                (Vec::new(), 0)
            }
        };
        if documents.is_empty() {
            tracing::warn!("no documents found to index");
        }

        let snapshot = IndexSnapshot::build(&documents, &self.config);
        tracing::info!(
            documents = snapshot.document_count(),
            skipped,
            fragments = snapshot.len(),
            vocabulary = snapshot.vectorizer().vocabulary_size(),
            "index rebuilt"
        );
        self.install(snapshot)
    }

    /// Rebuild the index from already-loaded documents, in the given order.
    pub fn index_documents(&self, documents: &[SourceDocument]) -> usize {
        let _writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        self.install(IndexSnapshot::build(documents, &self.config))
    }

    fn install(&self, snapshot: IndexSnapshot) -> usize {
        let count = snapshot.len();
        let mut current = self
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        *current = Arc::new(snapshot);
        count
    }

    /// The snapshot current at the time of the call.
    pub fn snapshot(&self) -> Arc<IndexSnapshot> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn search(&self, query: &str, top_k: usize) -> Result<Vec<ScoredFragment>> {
        self.snapshot().search(query, top_k)
    }

    pub fn search_until<F>(
        &self,
        query: &str,
        top_k: usize,
        should_stop: F,
    ) -> Result<Vec<ScoredFragment>>
    where
        F: Fn() -> bool,
    {
        self.snapshot().search_until(query, top_k, should_stop)
    }

    pub fn fragment_count(&self) -> usize {
        self.snapshot().len()
    }
}
