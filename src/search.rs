//! The `search` command: rank corpus fragments against a query.

use anyhow::{Context, Result};
use clap::ValueEnum;
use std::time::{Duration, Instant};

use docsift_core::models::ScoredFragment;
use docsift_core::RetrievalError;

use crate::config::Config;
use crate::ingest::build_index;

/// How search results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Numbered list with score, source, and excerpt.
    Text,
    /// Pretty-printed JSON array.
    Json,
    /// Prompt-ready context blocks, one per hit.
    Context,
}

pub fn run_search(
    config: &Config,
    query: &str,
    top_k: Option<usize>,
    format: OutputFormat,
) -> Result<()> {
    let indexer = build_index(config)?;
    let top_k = top_k.unwrap_or(config.retrieval.top_k);

    let results = match config.retrieval.search_timeout_ms {
        Some(ms) => {
            let deadline = Instant::now() + Duration::from_millis(ms);
            indexer
                .search_until(query, top_k, || Instant::now() >= deadline)
                .map_err(|e| match e {
                    RetrievalError::Cancelled { .. } => {
                        anyhow::anyhow!("search timed out after {} ms ({})", ms, e)
                    }
                    other => other.into(),
                })?
        }
        None => indexer.search(query, top_k)?,
    };

    print!("{}", render_results(&results, format)?);
    Ok(())
}

/// Format ranked results for stdout. Always ends with a newline.
pub fn render_results(results: &[ScoredFragment], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(results)
                .context("failed to serialize search results")?;
            Ok(format!("{}\n", json))
        }
        OutputFormat::Context => {
            let blocks: Vec<String> = results.iter().map(|r| r.context_block()).collect();
            Ok(format!("{}\n", blocks.join("\n\n")))
        }
        OutputFormat::Text => {
            if results.is_empty() {
                return Ok("No results.\n".to_string());
            }
            let mut out = String::new();
            for result in results {
                out.push_str(&format!(
                    "{}. [{:.2}] {} #{}\n",
                    result.rank,
                    result.score,
                    result.fragment.document_id,
                    result.fragment.chunk_index
                ));
                out.push_str(&format!(
                    "    excerpt: \"{}\"\n\n",
                    excerpt(&result.fragment.text, 240)
                ));
            }
            Ok(out)
        }
    }
}

fn excerpt(text: &str, max_chars: usize) -> String {
    let flat = text.replace('\n', " ");
    let trimmed = flat.trim();
    if trimmed.chars().count() <= max_chars {
        trimmed.to_string()
    } else {
        let cut: String = trimmed.chars().take(max_chars).collect();
        format!("{}…", cut.trim_end())
    }
}
