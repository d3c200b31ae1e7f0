//! # Pipeline Module
//!
//! Runs the whole pairing workflow over one directory.
//!
//! ## Pipeline Stages
//! 1. **Scan** - List the JPEG files of the directory, sorted by name
//! 2. **Compare** - Score every unordered pair (in parallel, with caching)
//! 3. **Select** - Keep the strongest candidate of each reference image
//! 4. **Rank** - Order the best matches by score magnitude
//! 5. **Copy** - Write the numbered copies into the output directory
//!
//! ## Parallelism
//! Uses rayon for the comparison stage. Every other stage is sequential.

mod executor;

pub use executor::{Pipeline, PipelineBuilder, PipelineConfig, PipelineResult};
