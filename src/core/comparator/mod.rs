//! # Comparator Module
//!
//! Scores every unordered pair of candidate images.
//!
//! ## How It Works
//! 1. Order the candidates (the scanner sorts them by file name)
//! 2. Spawn one task per reference image `i`
//! 3. Each task scores `i` against every `j > i`, so each pair is scored
//!    once and only the `i -> j` direction is stored
//! 4. Merge the per-task entries into a [`MatchTable`] in enumeration order
//!
//! ## Failures
//! | Error                    | Effect                          |
//! |--------------------------|---------------------------------|
//! | Decode / IO error        | Pair skipped, logged, recorded  |
//! | Unsupported pixel format | Whole comparison aborted        |
//! | Degenerate score (NaN)   | Stored as `None`, never ranked  |

mod engine;
mod table;

pub use engine::{pair_count, PairwiseComparator};
pub use table::{MatchEntry, MatchTable};

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Score of one image pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairScore {
    /// The image earlier in enumeration order
    pub reference: PathBuf,
    /// The image later in enumeration order
    pub candidate: PathBuf,
    /// The score, or `None` when the scorer produced no valid value
    pub score: Option<f64>,
}

impl PairScore {
    pub fn new(
        reference: impl Into<PathBuf>,
        candidate: impl Into<PathBuf>,
        score: Option<f64>,
    ) -> Self {
        Self {
            reference: reference.into(),
            candidate: candidate.into(),
            score,
        }
    }

    /// Magnitude used for selection and ranking
    pub fn strength(&self) -> Option<f64> {
        self.score.map(f64::abs)
    }
}

/// A pair that could not be scored
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonFailure {
    pub reference: PathBuf,
    pub candidate: PathBuf,
    /// Why one of the two images could not be loaded
    pub reason: String,
}

/// Outcome of an all-pairs comparison
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonReport {
    /// Scored pairs, grouped by reference image
    pub table: MatchTable,
    /// Pairs that were skipped
    pub failures: Vec<ComparisonFailure>,
    /// Number of pairs stored in the table
    pub comparisons: usize,
    /// Histogram lookups served from the cache
    pub cache_hits: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strength_is_absolute_value() {
        assert_eq!(PairScore::new("a", "b", Some(-0.4)).strength(), Some(0.4));
        assert_eq!(PairScore::new("a", "b", None).strength(), None);
    }
}
