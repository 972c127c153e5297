//! Filesystem corpus connector.
//!
//! Walks a directory tree and exposes every file matching the configured
//! include globs (minus the excludes) as a document whose id is its path
//! relative to the root. Default excludes skip `.git`, `target`, and
//! `node_modules`.

use anyhow::{Context, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use docsift_core::corpus::CorpusSource;
use docsift_core::CorpusError;

use crate::config::CorpusConfig;

/// A directory of plain-text documents.
pub struct FsCorpus {
    root: PathBuf,
    include: GlobSet,
    exclude: GlobSet,
    follow_symlinks: bool,
}

impl FsCorpus {
    pub fn from_config(config: &CorpusConfig) -> Result<Self> {
        let include = build_globset(&config.include_globs).context("invalid corpus.include_globs")?;

        let mut default_excludes = vec![
            "**/.git/**".to_string(),
            "**/target/**".to_string(),
            "**/node_modules/**".to_string(),
        ];
        default_excludes.extend(config.exclude_globs.clone());
        let exclude = build_globset(&default_excludes).context("invalid corpus.exclude_globs")?;

        Ok(Self {
            root: config.root.clone(),
            include,
            exclude,
            follow_symlinks: config.follow_symlinks,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl CorpusSource for FsCorpus {
    fn list(&self) -> Result<Vec<String>, CorpusError> {
        if !self.root.is_dir() {
            return Err(CorpusError::unavailable(format!(
                "corpus root does not exist: {}",
                self.root.display()
            )));
        }

        let mut ids = Vec::new();
        let walker = WalkDir::new(&self.root).follow_links(self.follow_symlinks);
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!(error = %e, "skipping unreadable directory entry");
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            let relative = path.strip_prefix(&self.root).unwrap_or(path);
            let rel_str = relative.to_string_lossy().replace('\\', "/");

            if self.exclude.is_match(&rel_str) {
                continue;
            }
            if !self.include.is_match(&rel_str) {
                continue;
            }
            ids.push(rel_str);
        }

        // Sort for deterministic ordering
        ids.sort();
        Ok(ids)
    }

    fn read(&self, id: &str) -> Result<String, CorpusError> {
        let path = self.root.join(id);
        std::fs::read_to_string(&path).map_err(|e| CorpusError::unreadable(id, e.to_string()))
    }
}

fn build_globset(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(Glob::new(pattern)?);
    }
    Ok(builder.build()?)
}
