//! # Error Module
//!
//! Error types for the histogram pairing engine.
//!
//! ## Fatal vs. local
//! - `HistogramError::DecodeError` and friends are recovered inside the
//!   comparator (the pair is skipped and logged)
//! - `UnsupportedPixelFormat`, scan errors and copy errors abort the run

use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error
#[derive(Error, Debug)]
pub enum LumaPairsError {
    #[error("Scanning error: {0}")]
    Scan(#[from] ScanError),

    #[error("Histogram error: {0}")]
    Histogram(#[from] HistogramError),

    #[error("Comparison error: {0}")]
    Compare(#[from] CompareError),

    #[error("Materialization error: {0}")]
    Materialize(#[from] MaterializeError),

    #[error("Diagnostic output error: {0}")]
    Diagnostic(#[from] DiagnosticError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to serialize output: {0}")]
    Output(#[from] serde_json::Error),
}

/// Errors that occur while listing the source directory
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    #[error("Failed to read directory {path}: {source}")]
    ReadDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors that occur while decoding an image or building its histogram
#[derive(Error, Debug)]
pub enum HistogramError {
    #[error("Failed to decode image {path}: {reason}")]
    DecodeError { path: PathBuf, reason: String },

    #[error("Failed to open image file {path}: {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Pixel buffer is {actual} bytes, expected {expected} for a {width}x{height} {layout} image")]
    MalformedBuffer {
        width: u32,
        height: u32,
        layout: String,
        expected: usize,
        actual: usize,
    },

    #[error("Unsupported pixel format {layout}: no luminance channel can be derived")]
    UnsupportedPixelFormat { layout: String },
}

impl HistogramError {
    /// Whether this error must abort the whole run rather than skip one pair
    pub fn is_fatal(&self) -> bool {
        matches!(self, HistogramError::UnsupportedPixelFormat { .. })
    }
}

/// Errors that abort the all-pairs comparison
#[derive(Error, Debug)]
pub enum CompareError {
    #[error("Unsupported pixel format in {path}: {layout}")]
    UnsupportedPixelFormat { path: PathBuf, layout: String },

    #[error("Failed to build worker pool: {0}")]
    ThreadPool(String),
}

/// Errors that occur while copying the ranked sequence into place
#[derive(Error, Debug)]
pub enum MaterializeError {
    #[error("Failed to create output directory {path}: {source}")]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to copy {source_path} to {destination}: {source}")]
    CopyFailed {
        source_path: PathBuf,
        destination: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No output directory configured. Pass --output or use --dry-run.")]
    MissingOutputDirectory,
}

/// Errors that occur while writing the `.dat` diagnostic file
#[derive(Error, Debug)]
pub enum DiagnosticError {
    #[error("Failed to write histogram dump {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience Result type alias
pub type Result<T> = std::result::Result<T, LumaPairsError>;
