//! Index construction from the configured filesystem corpus.
//!
//! There is no persisted index: every command that needs one calls
//! [`build_index`], which walks the corpus, chunks, fits, and embeds in a
//! single pass.

use anyhow::{bail, Result};

use docsift_core::index::Indexer;

use crate::config::Config;
use crate::connector_fs::FsCorpus;

/// Build an in-memory index over `config.corpus`.
///
/// A missing corpus root is fatal here; the core indexer alone would
/// degrade to an empty index.
pub fn build_index(config: &Config) -> Result<Indexer> {
    let corpus = FsCorpus::from_config(&config.corpus)?;
    if !corpus.root().is_dir() {
        bail!("Corpus root does not exist: {}", corpus.root().display());
    }

    let indexer = Indexer::new(config.index_config());
    indexer.index(&corpus);
    Ok(indexer)
}

/// Run the index command: build the index and print a summary.
pub fn run_index(config: &Config) -> Result<()> {
    let indexer = build_index(config)?;
    let snapshot = indexer.snapshot();

    println!("index {}", config.corpus.root.display());
    println!("  documents: {}", snapshot.document_count());
    println!("  fragments: {}", snapshot.len());
    println!(
        "  vocabulary: {} / {}",
        snapshot.vectorizer().vocabulary_size(),
        snapshot.vectorizer().dimension()
    );
    println!("ok");
    Ok(())
}
