//! Pipeline execution implementation.

use crate::core::cache::InMemoryHistogramCache;
use crate::core::comparator::{ComparisonReport, PairwiseComparator};
use crate::core::histogram::{ImageDecoder, JpegDecoder};
use crate::core::materialize::{
    execute_plan_with_events, FsMaterializer, Materializer, RenamePlan, RenamePlanner,
};
use crate::core::ranker::{rank_pairs, RankedPair};
use crate::core::scanner::{DirectoryScanner, PhotoFile};
use crate::core::scorer::{ScorerConfig, ScorerKind, SimilarityScorer};
use crate::core::selector::{select_best, BestMatch};
use crate::error::{LumaPairsError, MaterializeError};
use crate::events::{
    null_sender, Event, EventSender, PipelineEvent, PipelinePhase, PipelineSummary,
};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;

/// Result of pipeline execution
#[derive(Debug, Serialize)]
pub struct PipelineResult {
    /// Eligible images, in enumeration order
    pub photos: Vec<PhotoFile>,
    /// Entries in the directory that were not eligible
    pub skipped_entries: usize,
    /// All-pairs scores and skipped pairs
    pub comparison: ComparisonReport,
    /// Strongest match per reference image
    pub best_matches: Vec<BestMatch>,
    /// Best matches, strongest first
    pub ranked: Vec<RankedPair>,
    /// Planned output names
    pub plan: RenamePlan,
    /// Files actually copied (0 on a dry run)
    pub files_copied: usize,
    /// Duration in milliseconds
    pub duration_ms: u64,
}

/// Configuration for the pipeline
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Directory holding the images to pair
    pub source_dir: PathBuf,
    /// Directory receiving the numbered copies
    pub output_dir: Option<PathBuf>,
    /// Scoring algorithm
    pub scorer: ScorerKind,
    /// Decode each image once instead of once per pair
    pub use_cache: bool,
    /// Worker threads (None = rayon default)
    pub threads: Option<usize>,
    /// Plan the copies without performing them
    pub dry_run: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::new(),
            output_dir: None,
            scorer: ScorerKind::Correlation,
            use_cache: true,
            threads: None,
            dry_run: false,
        }
    }
}

/// Builder for pipeline configuration
pub struct PipelineBuilder {
    config: PipelineConfig,
    decoder: Option<Box<dyn ImageDecoder>>,
    scorer: Option<Box<dyn SimilarityScorer>>,
    materializer: Option<Box<dyn Materializer>>,
}

impl PipelineBuilder {
    pub fn new() -> Self {
        Self {
            config: PipelineConfig::default(),
            decoder: None,
            scorer: None,
            materializer: None,
        }
    }

    /// Set the directory to pair
    pub fn source_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.source_dir = dir.into();
        self
    }

    /// Set the directory receiving the copies
    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.output_dir = Some(dir.into());
        self
    }

    /// Set the scoring algorithm
    pub fn scorer(mut self, kind: ScorerKind) -> Self {
        self.config.scorer = kind;
        self
    }

    /// Use a custom scorer instead of a built-in kind
    pub fn custom_scorer(mut self, scorer: Box<dyn SimilarityScorer>) -> Self {
        self.scorer = Some(scorer);
        self
    }

    /// Enable or disable the histogram cache
    pub fn use_cache(mut self, enabled: bool) -> Self {
        self.config.use_cache = enabled;
        self
    }

    /// Set the number of worker threads
    pub fn threads(mut self, threads: Option<usize>) -> Self {
        self.config.threads = threads;
        self
    }

    /// Plan without copying
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.config.dry_run = dry_run;
        self
    }

    /// Replace the JPEG decoder
    pub fn decoder(mut self, decoder: Box<dyn ImageDecoder>) -> Self {
        self.decoder = Some(decoder);
        self
    }

    /// Replace the filesystem materializer
    pub fn materializer(mut self, materializer: Box<dyn Materializer>) -> Self {
        self.materializer = Some(materializer);
        self
    }

    /// Build the pipeline
    pub fn build(self) -> Result<Pipeline, LumaPairsError> {
        if self.config.source_dir.as_os_str().is_empty() {
            return Err(LumaPairsError::Config(
                "a source directory is required".to_string(),
            ));
        }
        if self.config.output_dir.is_none() && !self.config.dry_run {
            return Err(MaterializeError::MissingOutputDirectory.into());
        }
        if self.config.threads == Some(0) {
            return Err(LumaPairsError::Config(
                "thread count must be at least 1".to_string(),
            ));
        }

        let scorer = match self.scorer {
            Some(scorer) => scorer,
            None => ScorerConfig::new().kind(self.config.scorer).build()?,
        };

        Ok(Pipeline {
            config: self.config,
            decoder: self.decoder.unwrap_or_else(|| Box::new(JpegDecoder::new())),
            scorer,
            materializer: self
                .materializer
                .unwrap_or_else(|| Box::new(FsMaterializer::new())),
        })
    }
}

impl Default for PipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// The pairing pipeline
pub struct Pipeline {
    config: PipelineConfig,
    decoder: Box<dyn ImageDecoder>,
    scorer: Box<dyn SimilarityScorer>,
    materializer: Box<dyn Materializer>,
}

impl Pipeline {
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::new()
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run the pipeline without events
    pub fn run(&self) -> Result<PipelineResult, LumaPairsError> {
        self.run_with_events(&null_sender())
    }

    /// Run the pipeline with event reporting
    pub fn run_with_events(&self, events: &EventSender) -> Result<PipelineResult, LumaPairsError> {
        let result = self.execute(events);
        if let Err(e) = &result {
            events.send(Event::Pipeline(PipelineEvent::Error {
                message: e.to_string(),
            }));
        }
        result
    }

    fn execute(&self, events: &EventSender) -> Result<PipelineResult, LumaPairsError> {
        let start_time = Instant::now();
        events.send(Event::Pipeline(PipelineEvent::Started));

        // Phase 1: Scanning
        Self::phase(events, PipelinePhase::Scanning);
        let scan = DirectoryScanner::new().list_with_events(&self.config.source_dir, events)?;
        info!(
            photos = scan.photos.len(),
            skipped = scan.skipped,
            dir = %self.config.source_dir.display(),
            "listed source directory"
        );

        // Phase 2: Comparing
        Self::phase(events, PipelinePhase::Comparing);
        let cache = InMemoryHistogramCache::new();
        let mut comparator = PairwiseComparator::new(self.decoder.as_ref(), self.scorer.as_ref())
            .with_threads(self.config.threads);
        if self.config.use_cache {
            comparator = comparator.with_cache(&cache);
        }
        let comparison = comparator.compare_all_with_events(&scan.paths(), events)?;

        // Phase 3: Selecting
        Self::phase(events, PipelinePhase::Selecting);
        let best_matches = select_best(&comparison.table);

        // Phase 4: Ranking
        Self::phase(events, PipelinePhase::Ranking);
        let ranked = rank_pairs(&best_matches);

        // Phase 5: Materializing
        Self::phase(events, PipelinePhase::Materializing);
        let destination = match (&self.config.output_dir, self.config.dry_run) {
            (Some(dir), _) => dir.clone(),
            (None, true) => PathBuf::new(),
            (None, false) => return Err(MaterializeError::MissingOutputDirectory.into()),
        };
        let plan = RenamePlanner::plan(&ranked, &destination);
        let files_copied = if self.config.dry_run {
            info!(planned = plan.len(), "dry run, nothing copied");
            0
        } else {
            execute_plan_with_events(&plan, self.materializer.as_ref(), events)?
        };

        let duration_ms = start_time.elapsed().as_millis() as u64;

        events.send(Event::Pipeline(PipelineEvent::Completed {
            summary: PipelineSummary {
                total_photos: scan.photos.len(),
                comparisons: comparison.comparisons,
                ranked_pairs: ranked.len(),
                files_copied,
                duration_ms,
            },
        }));

        Ok(PipelineResult {
            photos: scan.photos,
            skipped_entries: scan.skipped,
            comparison,
            best_matches,
            ranked,
            plan,
            files_copied,
            duration_ms,
        })
    }

    fn phase(events: &EventSender, phase: PipelinePhase) {
        info!(%phase, "entering phase");
        events.send(Event::Pipeline(PipelineEvent::PhaseChanged { phase }));
    }
}
