//! # docsift core
//!
//! Shared, WASM-safe retrieval logic for docsift: the term-weighted
//! vectorizer, overlapping text chunker, corpus-source abstraction,
//! immutable index snapshots, and ranked similarity search.
//!
//! This crate contains no filesystem I/O or other native-only
//! dependencies. Corpus loading from disk lives in the `docsift` app crate,
//! which implements [`corpus::CorpusSource`] over a directory tree.
//!
//! # Pipeline
//!
//! ```text
//! CorpusSource ──▶ chunk_text ──▶ Vectorizer::fit ──▶ Vectorizer::transform
//!                                                          │
//!                        query ──▶ transform ──▶ linear scan over embeddings
//!                                                          │
//!                                                 Vec<ScoredFragment>
//! ```
//!
//! # Example
//!
//! ```rust
//! use docsift_core::corpus::MemoryCorpus;
//! use docsift_core::index::{IndexConfig, Indexer};
//!
//! let corpus = MemoryCorpus::from_pairs([
//!     ("android.md", "Android application with Clean Architecture and MVVM pattern"),
//!     ("kotlin.md", "Kotlin coroutines for asynchronous operations"),
//! ]);
//!
//! let indexer = Indexer::new(IndexConfig::default());
//! assert_eq!(indexer.index(&corpus), 2);
//!
//! let hits = indexer.search("MVVM architecture", 1).unwrap();
//! assert_eq!(hits[0].fragment.document_id, "android.md");
//! assert_eq!(hits[0].rank, 1);
//! ```

pub mod chunk;
pub mod corpus;
pub mod embedding;
pub mod error;
pub mod index;
pub mod models;
pub mod search;
pub mod vectorizer;

pub use error::{ConfigError, CorpusError, RetrievalError};
