//! Index statistics and vocabulary overview.
//!
//! Provides a quick summary of what an index over the configured corpus
//! contains: document and fragment counts, vocabulary fill, and the terms
//! that dominate the vocabulary by frequency and by weight. Used by
//! `docsift stats` to sanity-check a corpus before relying on search.

use anyhow::Result;

use docsift_core::index::IndexSnapshot;

use crate::config::Config;
use crate::ingest::build_index;

/// Run the stats command: build the index and print a summary.
pub fn run_stats(config: &Config, terms: usize) -> Result<()> {
    let indexer = build_index(config)?;
    print!("{}", render_stats(config, &indexer.snapshot(), terms));
    Ok(())
}

pub fn render_stats(config: &Config, snapshot: &IndexSnapshot, terms: usize) -> String {
    let vectorizer = snapshot.vectorizer();
    let mut out = String::new();

    out.push_str("docsift — Index Stats\n");
    out.push_str("=====================\n\n");
    out.push_str(&format!("  Corpus:      {}\n", config.corpus.root.display()));
    out.push_str(&format!("  Documents:   {}\n", snapshot.document_count()));
    out.push_str(&format!("  Fragments:   {}\n", snapshot.len()));
    out.push_str(&format!(
        "  Vocabulary:  {} / {} ({}%)\n",
        vectorizer.vocabulary_size(),
        vectorizer.dimension(),
        (vectorizer.vocabulary_size() * 100) / vectorizer.dimension().max(1)
    ));
    out.push_str(&format!(
        "  Chunking:    {} chars, {} overlap\n",
        config.chunking.chunk_size, config.chunking.overlap
    ));

    if terms == 0 || !vectorizer.is_fitted() {
        return out;
    }

    out.push_str("\n  Most frequent terms:\n");
    for (i, (term, count)) in vectorizer.top_terms(terms).into_iter().enumerate() {
        out.push_str(&format!("    {:>3}. {:<24} {}\n", i + 1, term, count));
    }

    out.push_str("\n  Most discriminative terms:\n");
    for (i, (term, weight)) in vectorizer.top_weighted_terms(terms).into_iter().enumerate() {
        out.push_str(&format!("    {:>3}. {:<24} {:.3}\n", i + 1, term, weight));
    }

    out
}
