//! # luma-pairs CLI
//!
//! Command-line interface for the histogram pairing engine.
//!
//! ## Usage
//! ```bash
//! luma-pairs pair ~/Photos --output ~/Photos-paired
//! luma-pairs pair ~/Photos --dry-run --format json
//! luma-pairs compare a.jpg b.jpg --scorer ratio
//! ```

mod cli;

use luma_pairs::Result;

fn main() -> Result<()> {
    cli::run()
}
