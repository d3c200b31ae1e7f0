//! # Scanner Module
//!
//! Lists the candidate images of a directory.
//!
//! Only the immediate entries of the directory are considered, and only
//! regular files named `*.jpg` / `*.jpeg` (any case). Anything else is
//! excluded before comparison begins.
//!
//! ## Example
//! ```rust,ignore
//! use luma_pairs::core::scanner::DirectoryScanner;
//!
//! let photos = DirectoryScanner::new().list("/photos/trip".as_ref())?.photos;
//! ```

mod filter;
mod walker;

pub use filter::{is_jpeg_name, is_jpeg_path};
pub use walker::DirectoryScanner;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// An eligible image found in the source directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoFile {
    /// Path to the image file
    pub path: PathBuf,
    /// File size in bytes
    pub size: u64,
}

/// Result of listing a directory
#[derive(Debug, Clone)]
pub struct ScanResult {
    /// Eligible images in enumeration order
    pub photos: Vec<PhotoFile>,
    /// Entries that were not eligible
    pub skipped: usize,
}

impl ScanResult {
    /// Paths of the eligible images, in enumeration order
    pub fn paths(&self) -> Vec<PathBuf> {
        self.photos.iter().map(|p| p.path.clone()).collect()
    }
}
