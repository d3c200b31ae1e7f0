//! In-memory histogram cache.

use super::{CacheStats, HistogramCache};
use crate::core::histogram::Histogram;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

/// Histogram cache keyed by path
///
/// Readers share the lock, so workers looking up different images do not
/// block each other.
pub struct InMemoryHistogramCache {
    entries: RwLock<HashMap<PathBuf, Arc<Histogram>>>,
    hits: AtomicUsize,
    misses: AtomicUsize,
}

impl InMemoryHistogramCache {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            hits: AtomicUsize::new(0),
            misses: AtomicUsize::new(0),
        }
    }
}

impl Default for InMemoryHistogramCache {
    fn default() -> Self {
        Self::new()
    }
}

impl HistogramCache for InMemoryHistogramCache {
    fn get(&self, path: &Path) -> Option<Arc<Histogram>> {
        // A poisoned lock only means a worker panicked mid-insert; the map
        // itself is still consistent.
        let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());

        match entries.get(path) {
            Some(histogram) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                Some(Arc::clone(histogram))
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    fn insert(&self, path: &Path, histogram: Arc<Histogram>) {
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        entries.insert(path.to_path_buf(), histogram);
    }

    fn clear(&self) {
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        entries.clear();
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
    }

    fn stats(&self) -> CacheStats {
        let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
        CacheStats {
            total_entries: entries.len(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_returns_inserted_histogram() {
        let cache = InMemoryHistogramCache::new();
        let histogram = Arc::new(Histogram::from_counts(&[1, 2, 3]));

        cache.insert(Path::new("/a.jpg"), Arc::clone(&histogram));

        assert_eq!(cache.get(Path::new("/a.jpg")), Some(histogram));
        assert_eq!(cache.get(Path::new("/b.jpg")), None);
    }

    #[test]
    fn stats_track_hits_and_misses() {
        let cache = InMemoryHistogramCache::new();
        cache.insert(Path::new("/a.jpg"), Arc::new(Histogram::from_counts(&[1])));

        cache.get(Path::new("/a.jpg"));
        cache.get(Path::new("/a.jpg"));
        cache.get(Path::new("/missing.jpg"));

        let stats = cache.stats();
        assert_eq!(stats.total_entries, 1);
        assert_eq!(stats.hits, 2);
        assert_eq!(stats.misses, 1);
    }

    #[test]
    fn clear_removes_everything() {
        let cache = InMemoryHistogramCache::new();
        cache.insert(Path::new("/a.jpg"), Arc::new(Histogram::from_counts(&[1])));

        cache.clear();

        assert_eq!(cache.stats().total_entries, 0);
        assert_eq!(cache.get(Path::new("/a.jpg")), None);
    }

    #[test]
    fn shared_across_threads() {
        let cache = Arc::new(InMemoryHistogramCache::new());

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let cache = Arc::clone(&cache);
                std::thread::spawn(move || {
                    let path = PathBuf::from(format!("/{}.jpg", i));
                    cache.insert(&path, Arc::new(Histogram::from_counts(&[i])));
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(cache.stats().total_entries, 8);
    }
}
