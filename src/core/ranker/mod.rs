//! # Ranker Module
//!
//! Orders best matches by strength, strongest first.

use crate::core::selector::BestMatch;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A best-match pair in ranked order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedPair {
    pub image_a: PathBuf,
    pub image_b: PathBuf,
    /// The pair's score; ranking uses its magnitude
    pub rank: f64,
}

/// Sort best matches by `|rank|` descending
///
/// The sort is stable, so equal magnitudes keep their input order and the
/// same input always gives the same sequence.
pub fn rank_pairs(best: &[BestMatch]) -> Vec<RankedPair> {
    let mut pairs: Vec<RankedPair> = best
        .iter()
        .filter_map(|m| {
            m.best.score.map(|rank| RankedPair {
                image_a: m.reference.clone(),
                image_b: m.best.candidate.clone(),
                rank,
            })
        })
        .collect();

    pairs.sort_by(|a, b| b.rank.abs().total_cmp(&a.rank.abs()));
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::comparator::PairScore;

    fn best(a: &str, b: &str, score: f64) -> BestMatch {
        BestMatch {
            reference: PathBuf::from(a),
            best: PairScore::new(a, b, Some(score)),
        }
    }

    #[test]
    fn sorts_by_magnitude_descending() {
        let ranked = rank_pairs(&[
            best("a", "b", 0.2),
            best("c", "d", -0.9),
            best("e", "f", 0.5),
        ]);

        let ranks: Vec<f64> = ranked.iter().map(|p| p.rank).collect();
        assert_eq!(ranks, vec![-0.9, 0.5, 0.2]);
    }

    #[test]
    fn equal_magnitudes_keep_input_order() {
        let ranked = rank_pairs(&[
            best("a", "b", 0.4),
            best("c", "d", -0.4),
            best("e", "f", 0.4),
        ]);

        let firsts: Vec<_> = ranked.iter().map(|p| p.image_a.clone()).collect();
        assert_eq!(
            firsts,
            vec![PathBuf::from("a"), PathBuf::from("c"), PathBuf::from("e")]
        );
    }

    #[test]
    fn rerun_is_identical() {
        let input = vec![
            best("a", "b", 0.1),
            best("c", "d", 0.3),
            best("e", "f", -0.3),
            best("g", "h", 0.7),
        ];

        assert_eq!(rank_pairs(&input), rank_pairs(&input));
    }

    #[test]
    fn empty_input_gives_empty_output() {
        assert!(rank_pairs(&[]).is_empty());
    }
}
