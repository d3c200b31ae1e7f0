//! # Scorer Module
//!
//! Computes a similarity value between two luminance histograms.
//!
//! ## Supported Algorithms
//! - **Cross-correlation** - Default. Pearson coefficient of the two
//!   256-level histograms. Empirically tracks perceived similarity much
//!   better than the alternatives, but is not a proven optimum.
//! - **Absolute difference** - Dominated by image size scaling
//! - **Bin ratio** - Under-penalizes large structural differences
//!
//! Every scorer is a pure function of two histograms, so alternatives can be
//! swapped without touching the comparator.
//!
//! ## Example
//! ```rust,ignore
//! use luma_pairs::core::scorer::{ScorerConfig, ScorerKind};
//!
//! let scorer = ScorerConfig::new().kind(ScorerKind::Correlation).build();
//! let value = scorer.score(&histogram_a, &histogram_b);
//! ```

mod algorithms;
mod traits;

pub use algorithms::{
    cross_correlation, AbsoluteDifferenceScorer, BinRatioScorer, CorrelationScorer,
};
pub use traits::{FnScorer, ScorerKind, SimilarityScorer};

use crate::error::LumaPairsError;

/// Configuration builder for scorers
#[derive(Debug, Clone)]
pub struct ScorerConfig {
    kind: ScorerKind,
}

impl ScorerConfig {
    /// Create a new scorer configuration with defaults
    pub fn new() -> Self {
        Self {
            kind: ScorerKind::Correlation,
        }
    }

    /// Set the scoring algorithm
    pub fn kind(mut self, kind: ScorerKind) -> Self {
        self.kind = kind;
        self
    }

    /// Build the scorer
    pub fn build(self) -> Result<Box<dyn SimilarityScorer>, LumaPairsError> {
        match self.kind {
            ScorerKind::Correlation => Ok(Box::new(CorrelationScorer::new())),
            ScorerKind::AbsoluteDifference => Ok(Box::new(AbsoluteDifferenceScorer::new())),
            ScorerKind::BinRatio => Ok(Box::new(BinRatioScorer::new())),
            ScorerKind::Custom => Err(LumaPairsError::Config(
                "custom scorers are built with FnScorer::new, not ScorerConfig".to_string(),
            )),
        }
    }
}

impl Default for ScorerConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults_to_correlation() {
        let config = ScorerConfig::new();
        assert_eq!(config.kind, ScorerKind::Correlation);
    }

    #[test]
    fn build_creates_requested_scorer() {
        for kind in [
            ScorerKind::Correlation,
            ScorerKind::AbsoluteDifference,
            ScorerKind::BinRatio,
        ] {
            let scorer = ScorerConfig::new().kind(kind).build().unwrap();
            assert_eq!(scorer.kind(), kind);
        }
    }

    #[test]
    fn build_rejects_custom_kind() {
        assert!(ScorerConfig::new().kind(ScorerKind::Custom).build().is_err());
    }
}
