//! # Cache Module
//!
//! Keeps histograms around for the duration of one run.
//!
//! Without a cache the comparator decodes both images of every pair, so
//! each image is decoded up to N-1 times. With it, each image is decoded
//! once. Nothing is persisted; the cache is dropped with the pipeline.
//!
//! Failed decodes are never cached, so every pair involving a broken file
//! reports its own failure.

mod memory;
mod traits;

pub use memory::InMemoryHistogramCache;
pub use traits::HistogramCache;

use serde::{Deserialize, Serialize};

/// Cache statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStats {
    /// Number of cached histograms
    pub total_entries: usize,
    /// Lookups that found an entry
    pub hits: usize,
    /// Lookups that did not
    pub misses: usize,
}
