//! # Histogram Module
//!
//! Builds luminance histograms from decoded images.
//!
//! ## How It Works
//! 1. Decode the file into a `PixelGrid` (zune-jpeg, image crate fallback)
//! 2. Read or derive the luminance level of every pixel
//! 3. Count occurrences of each of the 256 levels
//!
//! A grid whose layout carries no luminance (CMYK, alpha layouts) fails
//! with `UnsupportedPixelFormat`. That error is never recovered per pixel.

pub mod decode;
mod dump;
mod grid;

pub use decode::{ImageDecoder, JpegDecoder};
pub use dump::dat_path_for;
pub use grid::{rgb_to_luma, PixelGrid, PixelLayout};

use crate::error::HistogramError;
use image::DynamicImage;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Number of luminance levels tracked
pub const LEVELS: usize = 256;

/// Occurrence count per luminance level
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Histogram {
    counts: Vec<u64>,
}

impl Histogram {
    /// Build from explicit per-level counts (missing trailing levels are 0)
    pub fn from_counts(counts: &[u64]) -> Self {
        let mut all = vec![0u64; LEVELS];
        for (slot, count) in all.iter_mut().zip(counts.iter()) {
            *slot = *count;
        }
        Self { counts: all }
    }

    /// Count the luminance levels of every pixel in the grid
    pub fn from_grid(grid: &PixelGrid) -> Result<Self, HistogramError> {
        let mut counts = vec![0u64; LEVELS];
        for level in grid.luma_levels()? {
            counts[level as usize] += 1;
        }
        Ok(Self { counts })
    }

    /// Build from an already-loaded image
    pub fn from_image(image: &DynamicImage) -> Result<Self, HistogramError> {
        Self::from_grid(&PixelGrid::from_dynamic(image)?)
    }

    /// Decode a file and build its histogram
    pub fn from_file(decoder: &dyn ImageDecoder, path: &Path) -> Result<Self, HistogramError> {
        let grid = decoder.decode(path)?;
        Self::from_grid(&grid)
    }

    /// Count at one level
    pub fn count(&self, level: u8) -> u64 {
        self.counts[level as usize]
    }

    /// All 256 counts, indexed by level
    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    /// Sum of all counts, equal to the source pixel count
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Number of levels with a non-zero count
    pub fn occupied_levels(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }

    /// Counts as floating point samples, level 0 first
    pub fn as_samples(&self) -> Vec<f64> {
        self.counts.iter().map(|&c| c as f64).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgb};

    #[test]
    fn counts_sum_to_pixel_count() {
        let levels: Vec<u8> = (0..120u32).map(|i| (i * 37 % 256) as u8).collect();
        let grid = PixelGrid::from_luma(12, 10, levels).unwrap();

        let histogram = Histogram::from_grid(&grid).unwrap();

        assert_eq!(histogram.total(), grid.pixel_count());
        assert_eq!(histogram.counts().len(), LEVELS);
    }

    #[test]
    fn counts_each_level() {
        let grid = PixelGrid::from_luma(3, 2, vec![0, 0, 255, 7, 7, 7]).unwrap();

        let histogram = Histogram::from_grid(&grid).unwrap();

        assert_eq!(histogram.count(0), 2);
        assert_eq!(histogram.count(7), 3);
        assert_eq!(histogram.count(255), 1);
        assert_eq!(histogram.occupied_levels(), 3);
    }

    #[test]
    fn empty_grid_gives_empty_histogram() {
        let grid = PixelGrid::from_luma(0, 0, Vec::new()).unwrap();
        let histogram = Histogram::from_grid(&grid).unwrap();
        assert_eq!(histogram.total(), 0);
    }

    #[test]
    fn unsupported_layout_fails_whole_image() {
        let grid = PixelGrid::new(1, 2, PixelLayout::Rgba, vec![9; 8]).unwrap();
        let result = Histogram::from_grid(&grid);
        assert!(matches!(
            result,
            Err(HistogramError::UnsupportedPixelFormat { .. })
        ));
    }

    #[test]
    fn from_image_derives_luma_from_rgb() {
        let img = ImageBuffer::from_fn(4, 4, |_, _| Rgb([128u8, 128, 128]));
        let histogram = Histogram::from_image(&DynamicImage::ImageRgb8(img)).unwrap();

        assert_eq!(histogram.count(128), 16);
        assert_eq!(histogram.total(), 16);
    }

    #[test]
    fn from_counts_pads_missing_levels() {
        let histogram = Histogram::from_counts(&[1, 2, 3]);
        assert_eq!(histogram.counts().len(), LEVELS);
        assert_eq!(histogram.count(2), 3);
        assert_eq!(histogram.count(200), 0);
    }
}
