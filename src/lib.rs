//! # docsift
//!
//! A small in-memory document retrieval engine. docsift turns a directory
//! of plain-text documents into fixed-dimensional term-weighted
//! fingerprints and answers ranked similarity queries against them.
//!
//! The retrieval algorithms live in the `docsift-core` crate; this crate
//! adds configuration, the filesystem corpus connector, and the CLI.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐   ┌──────────────────────┐   ┌───────────────┐
//! │  FsCorpus   │──▶│ Indexer (core)       │──▶│ IndexSnapshot │
//! │ walk + glob │   │ chunk → fit → embed  │   │ frags + vecs  │
//! └─────────────┘   └──────────────────────┘   └───────┬───────┘
//!                                                      │
//!                                       query ──▶ linear-scan search
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! docsift --root ./docs index
//! docsift --root ./docs search "clean architecture" --top-k 5
//! docsift --root ./docs search "code review" --format context
//! docsift --root ./docs stats --terms 15
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`connector_fs`] | Filesystem corpus connector |
//! | [`ingest`] | Index construction |
//! | [`search`] | Search command and result rendering |
//! | [`stats`] | Index statistics |

pub mod config;
pub mod connector_fs;
pub mod ingest;
pub mod search;
pub mod stats;
