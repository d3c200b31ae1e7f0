//! # Core Module
//!
//! The UI-agnostic pairing engine.
//!
//! ## Modules
//! - `scanner` - Lists candidate JPEG files in a directory
//! - `histogram` - Decodes images into luminance histograms
//! - `scorer` - Scores the similarity of two histograms
//! - `cache` - Keeps decoded histograms for the length of a run
//! - `comparator` - Scores every unordered pair of images
//! - `selector` - Picks each image's strongest match
//! - `ranker` - Orders best matches by strength
//! - `materialize` - Copies the ranked sequence under numbered names
//! - `pipeline` - Orchestrates the full workflow

pub mod cache;
pub mod comparator;
pub mod histogram;
pub mod materialize;
pub mod pipeline;
pub mod ranker;
pub mod scanner;
pub mod scorer;
pub mod selector;

// Re-export commonly used types
pub use comparator::{ComparisonReport, MatchTable, PairScore};
pub use histogram::Histogram;
pub use ranker::RankedPair;
pub use scanner::PhotoFile;
pub use scorer::{ScorerKind, SimilarityScorer};
pub use selector::BestMatch;
