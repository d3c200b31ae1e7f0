//! Trait definitions for histogram scoring.

use crate::core::histogram::Histogram;
use serde::{Deserialize, Serialize};

/// Available scoring algorithms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScorerKind {
    /// Pearson correlation of the two histograms (default)
    Correlation,
    /// Normalized sum of absolute per-level differences
    AbsoluteDifference,
    /// Mean min/max count ratio over shared levels
    BinRatio,
    /// A caller-supplied function
    Custom,
}

impl ScorerKind {
    /// Get a human-readable description of the algorithm
    pub fn description(&self) -> &'static str {
        match self {
            ScorerKind::Correlation => {
                "Cross-correlation - Pearson coefficient of the two histograms, in [-1, 1]"
            }
            ScorerKind::AbsoluteDifference => {
                "Absolute difference - per-level count differences over the pixel count"
            }
            ScorerKind::BinRatio => {
                "Bin ratio - average min/max count ratio over levels present in both images"
            }
            ScorerKind::Custom => "Custom scoring function",
        }
    }
}

impl std::fmt::Display for ScorerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScorerKind::Correlation => write!(f, "correlation"),
            ScorerKind::AbsoluteDifference => write!(f, "difference"),
            ScorerKind::BinRatio => write!(f, "ratio"),
            ScorerKind::Custom => write!(f, "custom"),
        }
    }
}

/// Computes a scalar similarity (or dissimilarity) between two histograms
///
/// Implementations are pure. A non-finite result means "no valid score";
/// callers must not feed it into ranking.
pub trait SimilarityScorer: Send + Sync {
    /// Score two histograms
    fn score(&self, a: &Histogram, b: &Histogram) -> f64;

    /// Get the algorithm kind
    fn kind(&self) -> ScorerKind;

    /// Score, mapping non-finite results to `None`
    fn try_score(&self, a: &Histogram, b: &Histogram) -> Option<f64> {
        let value = self.score(a, b);
        value.is_finite().then_some(value)
    }
}

/// Adapts a plain function into a scorer
pub struct FnScorer<F> {
    func: F,
}

impl<F> FnScorer<F>
where
    F: Fn(&Histogram, &Histogram) -> f64 + Send + Sync,
{
    pub fn new(func: F) -> Self {
        Self { func }
    }
}

impl<F> SimilarityScorer for FnScorer<F>
where
    F: Fn(&Histogram, &Histogram) -> f64 + Send + Sync,
{
    fn score(&self, a: &Histogram, b: &Histogram) -> f64 {
        (self.func)(a, b)
    }

    fn kind(&self) -> ScorerKind {
        ScorerKind::Custom
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fn_scorer_calls_function() {
        let scorer = FnScorer::new(|a: &Histogram, b: &Histogram| (a.total() + b.total()) as f64);
        let h = Histogram::from_counts(&[2, 3]);

        assert_eq!(scorer.score(&h, &h), 10.0);
        assert_eq!(scorer.kind(), ScorerKind::Custom);
    }

    #[test]
    fn try_score_filters_nan() {
        let scorer = FnScorer::new(|_: &Histogram, _: &Histogram| f64::NAN);
        let h = Histogram::from_counts(&[1]);

        assert_eq!(scorer.try_score(&h, &h), None);
    }

    #[test]
    fn kind_display() {
        assert_eq!(ScorerKind::Correlation.to_string(), "correlation");
        assert_eq!(ScorerKind::AbsoluteDifference.to_string(), "difference");
        assert_eq!(ScorerKind::BinRatio.to_string(), "ratio");
    }
}
