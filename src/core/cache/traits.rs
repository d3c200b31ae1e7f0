//! Cache backend trait definition.

use super::CacheStats;
use crate::core::histogram::Histogram;
use std::path::Path;
use std::sync::Arc;

/// Stores histograms by image path for the lifetime of one run
pub trait HistogramCache: Send + Sync {
    /// Get the histogram previously built for `path`
    fn get(&self, path: &Path) -> Option<Arc<Histogram>>;

    /// Store the histogram built for `path`
    fn insert(&self, path: &Path, histogram: Arc<Histogram>);

    /// Drop every entry
    fn clear(&self);

    /// Get cache statistics
    fn stats(&self) -> CacheStats;
}
