//! Histogram scoring algorithm implementations.

mod correlation;
mod difference;
mod ratio;

pub use correlation::{cross_correlation, CorrelationScorer};
pub use difference::AbsoluteDifferenceScorer;
pub use ratio::BinRatioScorer;
