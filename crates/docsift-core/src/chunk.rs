//! Fixed-window text chunker with overlap.
//!
//! Splits document text into spans of at most `chunk_size` characters.
//! Consecutive spans share `overlap` characters so that a phrase crossing
//! a window boundary is still fully contained in at least one span.
//!
//! # Algorithm
//!
//! 1. If the text has at most `chunk_size` characters, return it whole.
//! 2. Otherwise emit the window `[start, start + chunk_size)`, clamped to
//!    the end of the text.
//! 3. Advance `start` by `chunk_size - overlap` (the stride).
//! 4. Stop once a window has reached the end of the text. Only the final
//!    window may be shorter than `chunk_size`.
//!
//! Lengths are counted in Unicode scalar values, so windows never split a
//! multi-byte UTF-8 sequence.
//!
//! # Example
//!
//! ```rust
//! use docsift_core::chunk::{chunk_text, ChunkingConfig};
//!
//! let text = "a".repeat(1500);
//! let chunks = chunk_text(&text, &ChunkingConfig::default());
//! assert_eq!(chunks.len(), 4);
//! assert_eq!(chunks[0].len(), 500);
//! assert_eq!(chunks[3].len(), 150);
//! ```

use crate::error::ConfigError;

/// Default window length in characters.
pub const DEFAULT_CHUNK_SIZE: usize = 500;
/// Default number of characters shared by consecutive windows.
pub const DEFAULT_CHUNK_OVERLAP: usize = 50;

/// Window size and overlap, in characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkingConfig {
    pub chunk_size: usize,
    pub overlap: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            overlap: DEFAULT_CHUNK_OVERLAP,
        }
    }
}

impl ChunkingConfig {
    /// Distance between the starts of consecutive windows.
    pub fn stride(&self) -> usize {
        self.chunk_size.saturating_sub(self.overlap)
    }

    /// Reject settings that would produce empty or non-advancing windows.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.chunk_size == 0 {
            return Err(ConfigError("chunk_size must be > 0".to_string()));
        }
        if self.overlap >= self.chunk_size {
            return Err(ConfigError(format!(
                "overlap ({}) must be smaller than chunk_size ({})",
                self.overlap, self.chunk_size
            )));
        }
        Ok(())
    }
}

/// Split text into overlapping windows.
///
/// # Guarantees
///
/// - At least one span is always returned (the empty string for empty text).
/// - No span is longer than `chunk_size` characters.
/// - For text longer than one window, span `i + 1` starts `stride`
///   characters after span `i`, so non-final neighbours share exactly
///   `overlap` characters.
/// - Pure and deterministic.
///
/// An invalid config (see [`ChunkingConfig::validate`]) is clamped to a
/// stride of one character rather than looping forever.
pub fn chunk_text(text: &str, config: &ChunkingConfig) -> Vec<String> {
    let chunk_size = config.chunk_size.max(1);
    let stride = config.stride().max(1);

    // Byte offset of every char, plus the end of the text.
    let offsets: Vec<usize> = text
        .char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(text.len()))
        .collect();
    let char_count = offsets.len() - 1;

    if char_count <= chunk_size {
        return vec![text.to_string()];
    }

    let mut chunks = Vec::with_capacity(char_count / stride + 1);
    let mut start = 0;
    while start < char_count {
        let end = (start + chunk_size).min(char_count);
        chunks.push(text[offsets[start]..offsets[end]].to_string());
        if end >= char_count {
            break;
        }
        start += stride;
    }

    chunks
}
