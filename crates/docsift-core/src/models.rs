//! Core data models shared by the indexer and its callers.
//!
//! These types represent the documents, fragments, and scored results that
//! flow through indexing and retrieval.

use serde::Serialize;

/// A raw document handed to the indexer, already decoded to text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDocument {
    /// Stable identifier (for filesystem corpora, the relative path).
    pub id: String,
    pub text: String,
}

impl SourceDocument {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }
}

/// A bounded span of a document, the unit of retrieval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Fragment {
    pub text: String,
    /// Identifier of the source document.
    pub document_id: String,
    /// Position of this fragment within its document, starting at 0.
    pub chunk_index: usize,
}

/// A fragment paired with its similarity to a query.
///
/// Produced per query and never stored. `rank` starts at 1.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredFragment {
    #[serde(flatten)]
    pub fragment: Fragment,
    pub score: f32,
    pub rank: usize,
}

impl ScoredFragment {
    /// Render the hit as a prompt-ready context block:
    /// `[<document id>] (similarity: 0.42)` followed by the fragment text.
    pub fn context_block(&self) -> String {
        format!(
            "[{}] (similarity: {:.2})\n{}",
            self.fragment.document_id, self.score, self.fragment.text
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit() -> ScoredFragment {
        ScoredFragment {
            fragment: Fragment {
                text: "Use MVVM for presentation.".to_string(),
                document_id: "architecture.md".to_string(),
                chunk_index: 2,
            },
            score: 0.4567,
            rank: 1,
        }
    }

    #[test]
    fn test_context_block_format() {
        assert_eq!(
            hit().context_block(),
            "[architecture.md] (similarity: 0.46)\nUse MVVM for presentation."
        );
    }

    #[test]
    fn test_serialize_flattens_fragment() {
        let json = serde_json::to_value(hit()).unwrap();
        assert_eq!(json["document_id"], "architecture.md");
        assert_eq!(json["chunk_index"], 2);
        assert_eq!(json["rank"], 1);
        assert!(json.get("fragment").is_none());
    }
}
