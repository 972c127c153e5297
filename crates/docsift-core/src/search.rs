//! Ranking for linear-scan similarity search.
//!
//! Scores are ordered descending with a *stable* sort, so fragments with
//! equal similarity keep their index order. This is what makes
//! results reproducible when many fragments score the same (for example
//! every fragment scores 0.0 against an unmatched query).

use crate::models::{Fragment, ScoredFragment};

/// Positions of the `top_k` highest scores, best first.
///
/// Ties keep ascending position order. `NaN` scores compare as equal to
/// everything and therefore never move ahead of earlier entries.
pub fn rank_scores(scores: &[f32], top_k: usize) -> Vec<usize> {
    let mut order: Vec<usize> = (0..scores.len()).collect();
    order.sort_by(|&a, &b| {
        scores[b]
            .partial_cmp(&scores[a])
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    order.truncate(top_k);
    order
}

/// Pair ranked positions with their fragments, assigning 1-based ranks.
pub fn assemble_results(
    fragments: &[Fragment],
    scores: &[f32],
    ranked: &[usize],
) -> Vec<ScoredFragment> {
    ranked
        .iter()
        .enumerate()
        .map(|(i, &pos)| ScoredFragment {
            fragment: fragments[pos].clone(),
            score: scores[pos],
            rank: i + 1,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fragment(i: usize) -> Fragment {
        Fragment {
            text: format!("fragment {}", i),
            document_id: "doc.md".to_string(),
            chunk_index: i,
        }
    }

    #[test]
    fn test_rank_descending() {
        assert_eq!(rank_scores(&[0.1, 0.9, 0.5], 3), vec![1, 2, 0]);
    }

    #[test]
    fn test_rank_ties_keep_index_order() {
        assert_eq!(rank_scores(&[0.5, 0.9, 0.5, 0.9, 0.5], 5), vec![1, 3, 0, 2, 4]);
        assert_eq!(rank_scores(&[0.0; 6], 3), vec![0, 1, 2]);
    }

    #[test]
    fn test_rank_truncates() {
        assert_eq!(rank_scores(&[0.3, 0.2, 0.1], 2), vec![0, 1]);
        assert_eq!(rank_scores(&[0.3, 0.2], 10), vec![0, 1]);
        assert!(rank_scores(&[0.3], 0).is_empty());
        assert!(rank_scores(&[], 5).is_empty());
    }

    #[test]
    fn test_assemble_assigns_contiguous_ranks() {
        let fragments: Vec<Fragment> = (0..3).map(fragment).collect();
        let scores = [0.2, 0.7, 0.4];
        let ranked = rank_scores(&scores, 3);
        let results = assemble_results(&fragments, &scores, &ranked);
        let ranks: Vec<usize> = results.iter().map(|r| r.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3]);
        assert_eq!(results[0].fragment.chunk_index, 1);
        assert_eq!(results[0].score, 0.7);
    }
}
