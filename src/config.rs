//! TOML configuration.
//!
//! Every section and field has a default, so an empty file (or no file at
//! all) yields the reference tunables: 384 dimensions, 500-character
//! chunks with 50 characters of overlap, and top-5 retrieval over `*.md`
//! and `*.txt` files under `./docs`.
//!
//! ```toml
//! [corpus]
//! root = "./docs"
//! include_globs = ["**/*.md", "**/*.txt"]
//!
//! [vectorizer]
//! dimension = 384
//! min_token_len = 2
//! extra_stop_words = ["please"]
//!
//! [chunking]
//! chunk_size = 500
//! overlap = 50
//!
//! [retrieval]
//! top_k = 5
//! search_timeout_ms = 2000
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use docsift_core::chunk::{ChunkingConfig, DEFAULT_CHUNK_OVERLAP, DEFAULT_CHUNK_SIZE};
use docsift_core::index::IndexConfig;
use docsift_core::vectorizer::{VectorizerConfig, DEFAULT_DIMENSION, DEFAULT_MIN_TOKEN_LEN};

/// Config file picked up from the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_PATH: &str = "./docsift.toml";

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub corpus: CorpusConfig,
    #[serde(default)]
    pub vectorizer: VectorizerSection,
    #[serde(default)]
    pub chunking: ChunkingSection,
    #[serde(default)]
    pub retrieval: RetrievalConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CorpusConfig {
    #[serde(default = "default_root")]
    pub root: PathBuf,
    #[serde(default = "default_include_globs")]
    pub include_globs: Vec<String>,
    #[serde(default)]
    pub exclude_globs: Vec<String>,
    #[serde(default)]
    pub follow_symlinks: bool,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            include_globs: default_include_globs(),
            exclude_globs: Vec::new(),
            follow_symlinks: false,
        }
    }
}

fn default_root() -> PathBuf {
    PathBuf::from("./docs")
}

fn default_include_globs() -> Vec<String> {
    vec!["**/*.md".to_string(), "**/*.txt".to_string()]
}

#[derive(Debug, Deserialize, Clone)]
pub struct VectorizerSection {
    #[serde(default = "default_dimension")]
    pub dimension: usize,
    #[serde(default = "default_min_token_len")]
    pub min_token_len: usize,
    #[serde(default)]
    pub extra_stop_words: Vec<String>,
}

impl Default for VectorizerSection {
    fn default() -> Self {
        Self {
            dimension: DEFAULT_DIMENSION,
            min_token_len: DEFAULT_MIN_TOKEN_LEN,
            extra_stop_words: Vec::new(),
        }
    }
}

fn default_dimension() -> usize {
    DEFAULT_DIMENSION
}
fn default_min_token_len() -> usize {
    DEFAULT_MIN_TOKEN_LEN
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChunkingSection {
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
    #[serde(default = "default_overlap")]
    pub overlap: usize,
}

impl Default for ChunkingSection {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            overlap: DEFAULT_CHUNK_OVERLAP,
        }
    }
}

fn default_chunk_size() -> usize {
    DEFAULT_CHUNK_SIZE
}
fn default_overlap() -> usize {
    DEFAULT_CHUNK_OVERLAP
}

#[derive(Debug, Deserialize, Clone)]
pub struct RetrievalConfig {
    #[serde(default = "default_top_k")]
    pub top_k: usize,
    /// Abandon a search whose linear scan runs longer than this.
    #[serde(default)]
    pub search_timeout_ms: Option<u64>,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            top_k: default_top_k(),
            search_timeout_ms: None,
        }
    }
}

fn default_top_k() -> usize {
    5
}

impl Config {
    /// Core index tunables derived from the `[vectorizer]` and `[chunking]` sections.
    pub fn index_config(&self) -> IndexConfig {
        IndexConfig {
            vectorizer: VectorizerConfig {
                dimension: self.vectorizer.dimension,
                min_token_len: self.vectorizer.min_token_len,
                extra_stop_words: self.vectorizer.extra_stop_words.clone(),
            },
            chunking: ChunkingConfig {
                chunk_size: self.chunking.chunk_size,
                overlap: self.chunking.overlap,
            },
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.index_config().validate()?;

        if self.retrieval.top_k < 1 {
            anyhow::bail!("retrieval.top_k must be >= 1");
        }
        if self.retrieval.search_timeout_ms == Some(0) {
            anyhow::bail!("retrieval.search_timeout_ms must be > 0 when set");
        }
        if self.corpus.include_globs.is_empty() {
            anyhow::bail!("corpus.include_globs must not be empty");
        }

        Ok(())
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;
    config
        .validate()
        .with_context(|| format!("Invalid config file: {}", path.display()))?;

    Ok(config)
}

/// Load the explicit config file, else `./docsift.toml` if present, else defaults.
pub fn resolve_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => load_config(path),
        None => {
            let fallback = Path::new(DEFAULT_CONFIG_PATH);
            if fallback.exists() {
                load_config(fallback)
            } else {
                tracing::debug!("no config file found; using defaults");
                Ok(Config::default())
            }
        }
    }
}
