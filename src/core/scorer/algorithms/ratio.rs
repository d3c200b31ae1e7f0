//! Bin-ratio scorer.
//!
//! For each level present in both histograms take `min / max` of the two
//! counts (always <= 1), sum those ratios and divide by the number of
//! levels occupied in the first histogram. Levels present in only one image
//! contribute nothing, which under-penalizes large structural differences.

use super::super::traits::{ScorerKind, SimilarityScorer};
use crate::core::histogram::Histogram;

/// Mean per-level count ratio scorer
#[derive(Debug, Clone, Copy, Default)]
pub struct BinRatioScorer;

impl BinRatioScorer {
    pub fn new() -> Self {
        Self
    }
}

impl SimilarityScorer for BinRatioScorer {
    fn score(&self, a: &Histogram, b: &Histogram) -> f64 {
        let cumulative: f64 = a
            .counts()
            .iter()
            .zip(b.counts().iter())
            .filter(|(x, y)| **x > 0 && **y > 0)
            .map(|(&x, &y)| x.min(y) as f64 / x.max(y) as f64)
            .sum();

        cumulative / a.occupied_levels() as f64
    }

    fn kind(&self) -> ScorerKind {
        ScorerKind::BinRatio
    }
}
