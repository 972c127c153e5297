//! Term-weighted text vectorizer.
//!
//! Turns free text into fixed-length, L2-normalised vectors:
//!
//! 1. **Tokenize**: lowercase, replace everything outside `[a-z0-9]` with
//!    whitespace, split, drop short tokens and stop words.
//! 2. **Fit**: count each token's total occurrences and document frequency
//!    over the corpus, keep the `dimension` most frequent tokens (ties in
//!    first-seen order), and weight each as `log10((N + 1) / (df + 1)) + 1`.
//! 3. **Transform**: `(count / tokens_in_text) × weight` at the token's
//!    vocabulary slot, then L2-normalise.
//!
//! Vocabulary selection ranks by *total frequency*, not document frequency,
//! so frequent boilerplate terms win over rare distinctive ones when the
//! corpus has more than `dimension` distinct tokens.
//!
//! # Example
//!
//! ```rust
//! use docsift_core::vectorizer::{Vectorizer, VectorizerConfig};
//!
//! let mut vectorizer = Vectorizer::new(VectorizerConfig::default());
//! vectorizer.fit(&["Kotlin coroutines", "Jetpack Compose"]);
//! assert_eq!(vectorizer.vocabulary_size(), 4);
//!
//! let v = vectorizer.transform("coroutines in Kotlin");
//! assert_eq!(v.len(), 384);
//! ```

use std::collections::{HashMap, HashSet};

use crate::embedding::l2_normalize;
use crate::error::ConfigError;

/// Default embedding dimension (and vocabulary cap).
pub const DEFAULT_DIMENSION: usize = 384;
/// Tokens shorter than this many characters are discarded.
pub const DEFAULT_MIN_TOKEN_LEN: usize = 2;

/// Built-in stop words, removed after lowercasing.
pub const STOP_WORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "by", "for", "from", "has", "he", "in", "is", "it",
    "its", "of", "on", "that", "the", "to", "was", "will", "with", "this", "but", "they", "have",
    "had", "what", "when", "where", "who", "which", "why", "how", "been", "being", "do", "does",
    "did", "doing",
];

/// Number of terms reported in the post-fit debug log.
const LOGGED_TOP_TERMS: usize = 15;

/// Vectorizer tunables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VectorizerConfig {
    /// Length of every embedding and upper bound on vocabulary size.
    pub dimension: usize,
    pub min_token_len: usize,
    /// Stop words added to [`STOP_WORDS`].
    pub extra_stop_words: Vec<String>,
}

impl Default for VectorizerConfig {
    fn default() -> Self {
        Self {
            dimension: DEFAULT_DIMENSION,
            min_token_len: DEFAULT_MIN_TOKEN_LEN,
            extra_stop_words: Vec::new(),
        }
    }
}

impl VectorizerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.dimension == 0 {
            return Err(ConfigError("dimension must be > 0".to_string()));
        }
        Ok(())
    }
}

/// Lowercasing, stop-word-filtering tokenizer.
#[derive(Debug, Clone)]
pub struct Tokenizer {
    min_token_len: usize,
    stop_words: HashSet<String>,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_TOKEN_LEN, &[])
    }
}

impl Tokenizer {
    pub fn new(min_token_len: usize, extra_stop_words: &[String]) -> Self {
        let stop_words = STOP_WORDS
            .iter()
            .map(|w| w.to_string())
            .chain(extra_stop_words.iter().map(|w| w.to_lowercase()))
            .collect();
        Self {
            min_token_len,
            stop_words,
        }
    }

    /// Split text into normalised tokens.
    ///
    /// Empty or punctuation-only input yields an empty list.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let cleaned: String = text
            .to_lowercase()
            .chars()
            .map(|c| {
                if c.is_ascii_lowercase() || c.is_ascii_digit() {
                    c
                } else {
                    ' '
                }
            })
            .collect();

        cleaned
            .split_whitespace()
            .filter(|t| t.len() >= self.min_token_len && !self.stop_words.contains(*t))
            .map(str::to_string)
            .collect()
    }
}

/// A vocabulary entry: the term, its slot statistics, and its weight.
#[derive(Debug, Clone, PartialEq)]
pub struct TermEntry {
    pub term: String,
    /// Occurrences across the whole fitted corpus.
    pub total_count: usize,
    /// Number of fitted documents containing the term.
    pub document_frequency: usize,
    /// `log10((N + 1) / (df + 1)) + 1`.
    pub weight: f64,
}

/// Term → slot mapping with its weight table.
///
/// Built wholesale by [`Vocabulary::build`]; there is no incremental update.
/// Entries are stored in slot order, so a weight exists for every term and
/// no other.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Vocabulary {
    slots: HashMap<String, usize>,
    entries: Vec<TermEntry>,
}

impl Vocabulary {
    /// Select the `dimension` most frequent tokens of `documents`.
    ///
    /// Tokens with equal total frequency keep the order in which they were
    /// first encountered (documents in input order, tokens in text order).
    pub fn build<S: AsRef<str>>(tokenizer: &Tokenizer, documents: &[S], dimension: usize) -> Self {
        if documents.is_empty() {
            return Self::default();
        }

        // (term, total, df) in first-seen order.
        let mut counts: Vec<(String, usize, usize)> = Vec::new();
        let mut positions: HashMap<String, usize> = HashMap::new();

        for doc in documents {
            let mut seen_in_doc: HashSet<usize> = HashSet::new();
            for token in tokenizer.tokenize(doc.as_ref()) {
                let pos = match positions.get(&token) {
                    Some(&pos) => pos,
                    None => {
                        positions.insert(token.clone(), counts.len());
                        counts.push((token, 0, 0));
                        counts.len() - 1
                    }
                };
                counts[pos].1 += 1;
                if seen_in_doc.insert(pos) {
                    counts[pos].2 += 1;
                }
            }
        }

        // Stable sort: equal totals stay in first-seen order.
        let mut ranked: Vec<usize> = (0..counts.len()).collect();
        ranked.sort_by(|&a, &b| counts[b].1.cmp(&counts[a].1));
        ranked.truncate(dimension);

        let n = documents.len() as f64;
        let mut vocabulary = Self::default();
        for (slot, pos) in ranked.into_iter().enumerate() {
            let (term, total_count, df) = &counts[pos];
            let weight = ((n + 1.0) / (*df as f64 + 1.0)).log10() + 1.0;
            vocabulary.slots.insert(term.clone(), slot);
            vocabulary.entries.push(TermEntry {
                term: term.clone(),
                total_count: *total_count,
                document_frequency: *df,
                weight,
            });
        }
        vocabulary
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Slot assigned to `term`, if it was selected.
    pub fn slot(&self, term: &str) -> Option<usize> {
        self.slots.get(term).copied()
    }

    pub fn weight(&self, term: &str) -> Option<f64> {
        self.slot(term).map(|slot| self.entries[slot].weight)
    }

    /// Entries in slot order (descending total frequency).
    pub fn entries(&self) -> &[TermEntry] {
        &self.entries
    }
}

/// Fits a [`Vocabulary`] over a corpus and embeds text against it.
///
/// Before the first [`fit`](Vectorizer::fit), every text transforms to the
/// all-zero vector of length `dimension`.
#[derive(Debug, Clone)]
pub struct Vectorizer {
    config: VectorizerConfig,
    tokenizer: Tokenizer,
    vocabulary: Vocabulary,
    document_count: usize,
}

impl Default for Vectorizer {
    fn default() -> Self {
        Self::new(VectorizerConfig::default())
    }
}

impl Vectorizer {
    pub fn new(config: VectorizerConfig) -> Self {
        let tokenizer = Tokenizer::new(config.min_token_len, &config.extra_stop_words);
        Self {
            config,
            tokenizer,
            vocabulary: Vocabulary::default(),
            document_count: 0,
        }
    }

    /// Replace the vocabulary and weights with ones fitted on `documents`.
    ///
    /// An empty corpus leaves an empty vocabulary.
    pub fn fit<S: AsRef<str>>(&mut self, documents: &[S]) {
        self.vocabulary = Vocabulary::build(&self.tokenizer, documents, self.config.dimension);
        self.document_count = documents.len();

        tracing::debug!(
            documents = self.document_count,
            vocabulary = self.vocabulary.len(),
            top_terms = ?self.top_terms(LOGGED_TOP_TERMS),
            "vectorizer fitted"
        );
        tracing::trace!(
            discriminative = ?self.top_weighted_terms(LOGGED_TOP_TERMS),
            "highest-weight terms"
        );
    }

    /// Embed `text` as a `dimension`-length vector.
    ///
    /// The result is unit length, or all zeros when no vocabulary term
    /// occurs in the text (including when the vectorizer is unfitted).
    /// Out-of-vocabulary tokens still count towards the text's token total.
    pub fn transform(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0.0f32; self.config.dimension];
        if self.vocabulary.is_empty() {
            return vector;
        }

        let tokens = self.tokenizer.tokenize(text);
        if tokens.is_empty() {
            return vector;
        }

        let mut term_counts: HashMap<usize, usize> = HashMap::new();
        for token in &tokens {
            if let Some(slot) = self.vocabulary.slot(token) {
                *term_counts.entry(slot).or_insert(0) += 1;
            }
        }

        let total = tokens.len() as f64;
        for (slot, count) in term_counts {
            let weight = self.vocabulary.entries[slot].weight;
            vector[slot] = ((count as f64 / total) * weight) as f32;
        }

        l2_normalize(&mut vector);
        vector
    }

    /// Fit on `documents`, then transform each of them in order.
    pub fn fit_transform<S: AsRef<str>>(&mut self, documents: &[S]) -> Vec<Vec<f32>> {
        self.fit(documents);
        documents
            .iter()
            .map(|doc| self.transform(doc.as_ref()))
            .collect()
    }

    pub fn tokenize(&self, text: &str) -> Vec<String> {
        self.tokenizer.tokenize(text)
    }

    pub fn dimension(&self) -> usize {
        self.config.dimension
    }

    pub fn config(&self) -> &VectorizerConfig {
        &self.config
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn is_fitted(&self) -> bool {
        !self.vocabulary.is_empty()
    }

    /// Number of documents in the last fitted corpus.
    pub fn document_count(&self) -> usize {
        self.document_count
    }

    /// The `n` most frequent vocabulary terms with their corpus counts.
    pub fn top_terms(&self, n: usize) -> Vec<(&str, usize)> {
        self.vocabulary
            .entries
            .iter()
            .take(n)
            .map(|e| (e.term.as_str(), e.total_count))
            .collect()
    }

    /// The `n` highest-weight (most discriminative) terms; ties keep slot order.
    pub fn top_weighted_terms(&self, n: usize) -> Vec<(&str, f64)> {
        let mut entries: Vec<&TermEntry> = self.vocabulary.entries.iter().collect();
        entries.sort_by(|a, b| {
            b.weight
                .partial_cmp(&a.weight)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        entries
            .into_iter()
            .take(n)
            .map(|e| (e.term.as_str(), e.weight))
            .collect()
    }
}
