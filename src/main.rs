//! # docsift CLI
//!
//! The `docsift` binary indexes a directory of documents in memory and
//! queries it. Nothing is persisted: each command rebuilds the index from
//! the corpus.
//!
//! ## Usage
//!
//! ```bash
//! docsift [--config ./docsift.toml] [--root ./docs] [-v] <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `docsift index` | Build the index and report document, fragment, and vocabulary counts |
//! | `docsift search "<query>"` | Rank fragments by similarity to the query |
//! | `docsift stats` | Summarise the index and its dominant terms |

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use docsift::{config, ingest, search, stats};

/// docsift: term-weighted document retrieval over a local corpus.
///
/// Configuration is read from `--config`, else `./docsift.toml` if it
/// exists, else built-in defaults.
#[derive(Parser)]
#[command(
    name = "docsift",
    about = "docsift: term-weighted document retrieval over a local corpus",
    version
)]
struct Cli {
    /// Path to configuration file (TOML).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Corpus directory; overrides `[corpus].root`.
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    /// Log debug details (vocabulary, ranking) to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Build the index and print a summary.
    Index,

    /// Search the corpus.
    ///
    /// Prints the top-K fragments ranked by similarity to the query.
    Search {
        /// The search query string.
        query: String,

        /// Maximum number of results (defaults to `[retrieval].top_k`).
        #[arg(long)]
        top_k: Option<usize>,

        /// Output format.
        #[arg(long, value_enum, default_value = "text")]
        format: search::OutputFormat,
    },

    /// Show index statistics and dominant vocabulary terms.
    Stats {
        /// Number of top terms to list (0 to omit).
        #[arg(long, default_value_t = 10)]
        terms: usize,
    },
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut cfg = config::resolve_config(cli.config.as_deref())?;
    if let Some(root) = cli.root {
        cfg.corpus.root = root;
    }

    match cli.command {
        Commands::Index => {
            ingest::run_index(&cfg)?;
        }
        Commands::Search {
            query,
            top_k,
            format,
        } => {
            search::run_search(&cfg, &query, top_k, format)?;
        }
        Commands::Stats { terms } => {
            stats::run_stats(&cfg, terms)?;
        }
    }

    Ok(())
}
