//! Cross-correlation scorer.
//!
//! Treats the two histograms as 256-sample series and returns their
//! Pearson correlation coefficient:
//! 1. Compute the mean count of each series
//! 2. Sum the products of the deviations from the means
//! 3. Divide by the square root of the product of the squared deviations
//!
//! 1 means identical shape, 0 unrelated, negative opposite trends. A flat
//! histogram has zero variance and yields NaN.

use super::super::traits::{ScorerKind, SimilarityScorer};
use crate::core::histogram::Histogram;

/// Pearson correlation scorer
#[derive(Debug, Clone, Copy, Default)]
pub struct CorrelationScorer;

impl CorrelationScorer {
    pub fn new() -> Self {
        Self
    }
}

fn mean(x: &[f64]) -> f64 {
    x.iter().sum::<f64>() / x.len() as f64
}

/// Pearson correlation of two equal-length series
pub fn cross_correlation(x: &[f64], y: &[f64]) -> f64 {
    let mx = mean(x);
    let my = mean(y);

    let (mut sxy, mut sx, mut sy) = (0.0, 0.0, 0.0);
    for (xi, yi) in x.iter().zip(y.iter()) {
        let dx = xi - mx;
        let dy = yi - my;
        sxy += dx * dy;
        sx += dx * dx;
        sy += dy * dy;
    }

    sxy / (sx * sy).sqrt()
}

impl SimilarityScorer for CorrelationScorer {
    fn score(&self, a: &Histogram, b: &Histogram) -> f64 {
        cross_correlation(&a.as_samples(), &b.as_samples())
    }

    fn kind(&self) -> ScorerKind {
        ScorerKind::Correlation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spikes(spikes: &[(usize, u64)]) -> Histogram {
        let mut counts = vec![0u64; 256];
        for &(level, count) in spikes {
            counts[level] = count;
        }
        Histogram::from_counts(&counts)
    }

    #[test]
    fn self_correlation_is_one() {
        let h = spikes(&[(10, 50), (200, 30), (90, 5)]);
        let score = CorrelationScorer.score(&h, &h);
        assert!((score - 1.0).abs() < 1e-12);
    }

    #[test]
    fn correlation_is_symmetric() {
        let a = spikes(&[(10, 50), (200, 50)]);
        let b = spikes(&[(10, 34), (60, 33), (200, 33)]);

        assert_eq!(CorrelationScorer.score(&a, &b), CorrelationScorer.score(&b, &a));
    }

    #[test]
    fn disjoint_spikes_are_slightly_anti_correlated() {
        let a = spikes(&[(10, 50), (200, 50)]);
        let b = spikes(&[(128, 100)]);

        let score = CorrelationScorer.score(&a, &b);

        assert!(score < 0.0);
        assert!(score > -0.01);
    }

    #[test]
    fn scaled_histogram_correlates_perfectly() {
        let a = spikes(&[(10, 5), (20, 7), (30, 1)]);
        let b = spikes(&[(10, 50), (20, 70), (30, 10)]);

        assert!((CorrelationScorer.score(&a, &b) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn flat_histogram_is_degenerate() {
        let flat = Histogram::from_counts(&[4u64; 256]);
        let other = spikes(&[(3, 9)]);

        assert!(CorrelationScorer.score(&flat, &other).is_nan());
        assert_eq!(CorrelationScorer.try_score(&flat, &other), None);
    }
}
