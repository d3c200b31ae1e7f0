//! # Luma Pairs
//!
//! Finds the most similar pairs among a directory of JPEG photos by
//! comparing their luminance histograms, then copies them into a new
//! directory under sequential numbers so the closest pairs come first.
//!
//! ## Architecture
//! - `core` - The pairing engine (scan, histogram, score, select, rank, copy)
//! - `events` - Channel-based progress reporting
//! - `error` - Error types for each stage
//! - `cli` - Command-line interface (binary only)
//!
//! Source images are only ever read. The output directory receives copies.

pub mod core;
pub mod error;
pub mod events;

// Re-export commonly used types at the crate root
pub use error::{LumaPairsError, Result};

/// Initialize tracing for the library
///
/// This should be called by the application entry point. `RUST_LOG` takes
/// precedence over `default_filter`. Calling it twice is a no-op.
pub fn init_tracing(default_filter: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
