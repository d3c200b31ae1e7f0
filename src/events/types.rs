//! Event type definitions for progress reporting.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// All events emitted by the pairing pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    /// Directory listing events
    Scan(ScanEvent),
    /// All-pairs comparison events
    Compare(CompareEvent),
    /// Copying the ranked sequence into the output directory
    Materialize(MaterializeEvent),
    /// Pipeline-level events
    Pipeline(PipelineEvent),
}

/// Events during the directory listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ScanEvent {
    /// Listing has started
    Started { path: PathBuf },
    /// An eligible image was found
    PhotoFound { path: PathBuf },
    /// Listing completed
    Completed { total_photos: usize, skipped: usize },
}

/// Events during the all-pairs comparison
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum CompareEvent {
    /// Comparison has started
    Started {
        total_photos: usize,
        total_comparisons: usize,
    },
    /// One pair was scored (or skipped)
    Progress(CompareProgress),
    /// A pair was skipped because one of its images failed to load
    PairSkipped {
        reference: PathBuf,
        candidate: PathBuf,
        message: String,
    },
    /// Comparison completed
    Completed {
        comparisons: usize,
        failures: usize,
        cache_hits: usize,
    },
}

/// Progress information during comparison
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompareProgress {
    /// Number of pairs handled so far
    pub comparisons_completed: usize,
    /// Total number of pairs, N(N-1)/2
    pub total_comparisons: usize,
}

/// Events while materializing the ranked sequence
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum MaterializeEvent {
    /// Copying has started
    Started { total_files: usize, destination: PathBuf },
    /// One file was copied
    FileCopied { source: PathBuf, destination: PathBuf },
    /// Copying completed
    Completed { files_copied: usize },
}

/// Pipeline-level events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PipelineEvent {
    /// Pipeline has started
    Started,
    /// Moving to a new phase
    PhaseChanged { phase: PipelinePhase },
    /// Pipeline completed successfully
    Completed { summary: PipelineSummary },
    /// Pipeline encountered a fatal error
    Error { message: String },
}

/// Phases of the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PipelinePhase {
    Scanning,
    Comparing,
    Selecting,
    Ranking,
    Materializing,
}

/// Summary of pipeline results
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineSummary {
    /// Eligible images found in the directory
    pub total_photos: usize,
    /// Pairs that produced a score entry
    pub comparisons: usize,
    /// Number of ranked pairs
    pub ranked_pairs: usize,
    /// Files copied into the output directory
    pub files_copied: usize,
    /// Duration in milliseconds
    pub duration_ms: u64,
}

impl std::fmt::Display for PipelinePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PipelinePhase::Scanning => write!(f, "Scanning"),
            PipelinePhase::Comparing => write!(f, "Comparing"),
            PipelinePhase::Selecting => write!(f, "Selecting best matches"),
            PipelinePhase::Ranking => write!(f, "Ranking"),
            PipelinePhase::Materializing => write!(f, "Copying"),
        }
    }
}
