//! Concurrent all-pairs comparison.

use super::{ComparisonFailure, ComparisonReport, MatchEntry, MatchTable, PairScore};
use crate::core::cache::HistogramCache;
use crate::core::histogram::{Histogram, ImageDecoder};
use crate::core::scorer::SimilarityScorer;
use crate::error::{CompareError, HistogramError};
use crate::events::{null_sender, CompareEvent, CompareProgress, Event, EventSender};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// A histogram, or the reason it could not be built.
///
/// The outer `Result` of [`PairwiseComparator::load`] carries fatal errors;
/// this inner one carries failures that only skip pairs.
type Loaded = Result<Arc<Histogram>, String>;

/// What one worker produced for its reference image
struct WorkerOutput {
    entry: MatchEntry,
    failures: Vec<ComparisonFailure>,
}

/// Shared progress counters, updated by every worker
struct Progress<'a> {
    completed: AtomicUsize,
    cache_hits: AtomicUsize,
    total: usize,
    interval: usize,
    events: &'a EventSender,
}

impl Progress<'_> {
    fn pair_done(&self) {
        let done = self.completed.fetch_add(1, Ordering::SeqCst) + 1;
        if done % self.interval == 0 || done == self.total {
            self.events
                .send(Event::Compare(CompareEvent::Progress(CompareProgress {
                    comparisons_completed: done,
                    total_comparisons: self.total,
                })));
        }
    }
}

/// Number of unordered pairs among `n` images
pub fn pair_count(n: usize) -> usize {
    n * n.saturating_sub(1) / 2
}

/// Scores every unordered pair of images exactly once
///
/// One rayon task per reference image compares it against every image that
/// comes later in the given order. Each task returns its own entry and the
/// entries are merged in order once all tasks have finished, so no two
/// workers ever write to the same place.
pub struct PairwiseComparator<'a> {
    decoder: &'a dyn ImageDecoder,
    scorer: &'a dyn SimilarityScorer,
    cache: Option<&'a dyn HistogramCache>,
    threads: Option<usize>,
}

impl<'a> PairwiseComparator<'a> {
    pub fn new(decoder: &'a dyn ImageDecoder, scorer: &'a dyn SimilarityScorer) -> Self {
        Self {
            decoder,
            scorer,
            cache: None,
            threads: None,
        }
    }

    /// Reuse histograms across pairs instead of decoding per pair
    pub fn with_cache(mut self, cache: &'a dyn HistogramCache) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Run on a dedicated pool of `threads` workers instead of the global one
    pub fn with_threads(mut self, threads: Option<usize>) -> Self {
        self.threads = threads;
        self
    }

    /// Compare all pairs without progress events
    pub fn compare_all(&self, images: &[PathBuf]) -> Result<ComparisonReport, CompareError> {
        self.compare_all_with_events(images, &null_sender())
    }

    /// Compare all pairs, reporting progress through `events`
    pub fn compare_all_with_events(
        &self,
        images: &[PathBuf],
        events: &EventSender,
    ) -> Result<ComparisonReport, CompareError> {
        match self.threads {
            Some(threads) => {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .build()
                    .map_err(|e| CompareError::ThreadPool(e.to_string()))?;
                pool.install(|| self.run(images, events))
            }
            None => self.run(images, events),
        }
    }

    /// Score a single pair, failing on any decode error
    pub fn compare_pair(&self, a: &Path, b: &Path) -> Result<Option<f64>, HistogramError> {
        let histogram_a = Histogram::from_file(self.decoder, a)?;
        let histogram_b = Histogram::from_file(self.decoder, b)?;
        Ok(self.scorer.try_score(&histogram_a, &histogram_b))
    }

    fn run(
        &self,
        images: &[PathBuf],
        events: &EventSender,
    ) -> Result<ComparisonReport, CompareError> {
        let total = pair_count(images.len());
        info!(
            images = images.len(),
            pairs = total,
            scorer = %self.scorer.kind(),
            "comparing all pairs"
        );

        events.send(Event::Compare(CompareEvent::Started {
            total_photos: images.len(),
            total_comparisons: total,
        }));

        let progress = Progress {
            completed: AtomicUsize::new(0),
            cache_hits: AtomicUsize::new(0),
            total,
            interval: (total / 50).clamp(1, 1000),
            events,
        };

        // Collecting is the join point: it returns once every worker is done,
        // or with the first fatal error.
        let outputs: Vec<WorkerOutput> = (0..images.len())
            .into_par_iter()
            .map(|i| self.compare_reference(i, images, &progress))
            .collect::<Result<_, _>>()?;

        let mut entries = Vec::with_capacity(outputs.len());
        let mut failures = Vec::new();
        for output in outputs {
            entries.push(output.entry);
            failures.extend(output.failures);
        }

        let table = MatchTable::from_entries(entries);
        let comparisons = table.comparison_count();
        let cache_hits = progress.cache_hits.load(Ordering::SeqCst);

        info!(comparisons, failures = failures.len(), cache_hits, "comparison finished");
        events.send(Event::Compare(CompareEvent::Completed {
            comparisons,
            failures: failures.len(),
            cache_hits,
        }));

        Ok(ComparisonReport {
            table,
            failures,
            comparisons,
            cache_hits,
        })
    }

    /// Compare image `i` against every later image
    fn compare_reference(
        &self,
        i: usize,
        images: &[PathBuf],
        progress: &Progress<'_>,
    ) -> Result<WorkerOutput, CompareError> {
        let reference = &images[i];
        let mut candidates = Vec::new();
        let mut failures = Vec::new();

        let later = &images[i + 1..];
        if later.is_empty() {
            return Ok(WorkerOutput {
                entry: MatchEntry::new(reference.clone(), candidates),
                failures,
            });
        }

        let reference_histogram = self.load(reference, progress)?;

        for candidate in later {
            let outcome = match &reference_histogram {
                Ok(a) => self
                    .load(candidate, progress)?
                    .map(|b| self.scorer.try_score(a, &b)),
                Err(reason) => Err(reason.clone()),
            };

            match outcome {
                Ok(score) => {
                    debug!(
                        reference = %reference.display(),
                        candidate = %candidate.display(),
                        ?score,
                        "scored pair"
                    );
                    candidates.push(PairScore::new(reference.clone(), candidate.clone(), score));
                }
                Err(reason) => {
                    warn!(
                        reference = %reference.display(),
                        candidate = %candidate.display(),
                        %reason,
                        "skipping pair"
                    );
                    progress
                        .events
                        .send(Event::Compare(CompareEvent::PairSkipped {
                            reference: reference.clone(),
                            candidate: candidate.clone(),
                            message: reason.clone(),
                        }));
                    failures.push(ComparisonFailure {
                        reference: reference.clone(),
                        candidate: candidate.clone(),
                        reason,
                    });
                }
            }

            progress.pair_done();
        }

        Ok(WorkerOutput {
            entry: MatchEntry::new(reference.clone(), candidates),
            failures,
        })
    }

    /// Build (or fetch) the histogram for one image
    fn load(&self, path: &Path, progress: &Progress<'_>) -> Result<Loaded, CompareError> {
        if let Some(cache) = self.cache {
            if let Some(histogram) = cache.get(path) {
                progress.cache_hits.fetch_add(1, Ordering::SeqCst);
                return Ok(Ok(histogram));
            }
        }

        match Histogram::from_file(self.decoder, path) {
            Ok(histogram) => {
                let histogram = Arc::new(histogram);
                if let Some(cache) = self.cache {
                    cache.insert(path, Arc::clone(&histogram));
                }
                Ok(Ok(histogram))
            }
            Err(HistogramError::UnsupportedPixelFormat { layout }) => {
                Err(CompareError::UnsupportedPixelFormat {
                    path: path.to_path_buf(),
                    layout,
                })
            }
            Err(e) => Ok(Err(e.to_string())),
        }
    }
}
