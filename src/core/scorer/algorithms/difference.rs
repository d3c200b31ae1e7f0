//! Absolute-difference scorer.
//!
//! Sums `|a[level] - b[level]|` over all levels and divides by the pixel
//! count of the second image. 0 means identical histograms, 2 means no
//! shared levels at all. Kept as an alternative: the value scales with
//! image size differences, so it ranks poorly across mixed resolutions.

use super::super::traits::{ScorerKind, SimilarityScorer};
use crate::core::histogram::Histogram;

/// Normalized absolute-difference scorer
#[derive(Debug, Clone, Copy, Default)]
pub struct AbsoluteDifferenceScorer;

impl AbsoluteDifferenceScorer {
    pub fn new() -> Self {
        Self
    }
}

impl SimilarityScorer for AbsoluteDifferenceScorer {
    fn score(&self, a: &Histogram, b: &Histogram) -> f64 {
        let cumulative: u64 = a
            .counts()
            .iter()
            .zip(b.counts().iter())
            .map(|(x, y)| x.abs_diff(*y))
            .sum();

        // 0 / 0 is NaN, the degenerate sentinel
        cumulative as f64 / b.total() as f64
    }

    fn kind(&self) -> ScorerKind {
        ScorerKind::AbsoluteDifference
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_histograms_score_zero() {
        let h = Histogram::from_counts(&[5, 0, 3, 2]);
        assert_eq!(AbsoluteDifferenceScorer.score(&h, &h), 0.0);
    }

    #[test]
    fn disjoint_histograms_score_two() {
        let a = Histogram::from_counts(&[10, 0]);
        let b = Histogram::from_counts(&[0, 10]);
        assert_eq!(AbsoluteDifferenceScorer.score(&a, &b), 2.0);
    }

    #[test]
    fn normalizes_by_second_total() {
        let a = Histogram::from_counts(&[6, 2]);
        let b = Histogram::from_counts(&[4, 4]);
        // |6-4| + |2-4| = 4, over 8 pixels
        assert_eq!(AbsoluteDifferenceScorer.score(&a, &b), 0.5);
    }

    #[test]
    fn empty_second_histogram_is_degenerate() {
        let a = Histogram::from_counts(&[1]);
        let empty = Histogram::from_counts(&[]);
        assert_eq!(AbsoluteDifferenceScorer.try_score(&a, &empty), None);
    }
}
