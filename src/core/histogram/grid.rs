//! Decoded pixel buffers handed to the histogram extractor.

use crate::error::HistogramError;
use image::DynamicImage;
use serde::{Deserialize, Serialize};

/// Channel layout of a decoded pixel buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PixelLayout {
    /// One luminance sample per pixel
    Luma,
    /// Luminance plus alpha
    LumaAlpha,
    /// Y, Cb, Cr per pixel
    YCbCr,
    /// Red, green, blue per pixel
    Rgb,
    /// Red, green, blue, alpha per pixel
    Rgba,
    /// Cyan, magenta, yellow, key per pixel
    Cmyk,
}

impl PixelLayout {
    /// Number of interleaved samples per pixel
    pub fn channels(&self) -> usize {
        match self {
            PixelLayout::Luma => 1,
            PixelLayout::LumaAlpha => 2,
            PixelLayout::YCbCr | PixelLayout::Rgb => 3,
            PixelLayout::Rgba | PixelLayout::Cmyk => 4,
        }
    }

    /// Whether a luminance level can be read or derived from this layout
    pub fn has_luminance(&self) -> bool {
        matches!(self, PixelLayout::Luma | PixelLayout::YCbCr | PixelLayout::Rgb)
    }
}

impl std::fmt::Display for PixelLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PixelLayout::Luma => write!(f, "Luma"),
            PixelLayout::LumaAlpha => write!(f, "LumaA"),
            PixelLayout::YCbCr => write!(f, "YCbCr"),
            PixelLayout::Rgb => write!(f, "RGB"),
            PixelLayout::Rgba => write!(f, "RGBA"),
            PixelLayout::Cmyk => write!(f, "CMYK"),
        }
    }
}

/// Luma of an RGB triple using the JPEG (BT.601 full range) fixed-point weights
pub fn rgb_to_luma(r: u8, g: u8, b: u8) -> u8 {
    let y = 19595 * r as u32 + 38470 * g as u32 + 7471 * b as u32 + (1 << 15);
    (y >> 16) as u8
}

/// A width x height grid of interleaved 8-bit samples
#[derive(Debug, Clone)]
pub struct PixelGrid {
    width: u32,
    height: u32,
    layout: PixelLayout,
    samples: Vec<u8>,
}

impl PixelGrid {
    /// Wrap a raw sample buffer, checking its length against the dimensions
    pub fn new(
        width: u32,
        height: u32,
        layout: PixelLayout,
        samples: Vec<u8>,
    ) -> Result<Self, HistogramError> {
        let expected = width as usize * height as usize * layout.channels();
        if samples.len() != expected {
            return Err(HistogramError::MalformedBuffer {
                width,
                height,
                layout: layout.to_string(),
                expected,
                actual: samples.len(),
            });
        }

        Ok(Self {
            width,
            height,
            layout,
            samples,
        })
    }

    /// Single-channel grid built from luminance levels
    pub fn from_luma(width: u32, height: u32, levels: Vec<u8>) -> Result<Self, HistogramError> {
        Self::new(width, height, PixelLayout::Luma, levels)
    }

    /// Map an `image` buffer onto a grid without changing its color model
    ///
    /// Only 8-bit buffers are mapped as-is; deeper buffers are reduced to
    /// 8 bits per channel first.
    pub fn from_dynamic(image: &DynamicImage) -> Result<Self, HistogramError> {
        let (width, height) = (image.width(), image.height());
        match image {
            DynamicImage::ImageLuma8(buffer) => {
                Self::new(width, height, PixelLayout::Luma, buffer.as_raw().clone())
            }
            DynamicImage::ImageLumaA8(buffer) => {
                Self::new(width, height, PixelLayout::LumaAlpha, buffer.as_raw().clone())
            }
            DynamicImage::ImageRgb8(buffer) => {
                Self::new(width, height, PixelLayout::Rgb, buffer.as_raw().clone())
            }
            DynamicImage::ImageRgba8(buffer) => {
                Self::new(width, height, PixelLayout::Rgba, buffer.as_raw().clone())
            }
            DynamicImage::ImageLuma16(_) => {
                Self::new(width, height, PixelLayout::Luma, image.to_luma8().into_raw())
            }
            DynamicImage::ImageRgb16(_) | DynamicImage::ImageRgb32F(_) => {
                Self::new(width, height, PixelLayout::Rgb, image.to_rgb8().into_raw())
            }
            DynamicImage::ImageLumaA16(_) => Self::new(
                width,
                height,
                PixelLayout::LumaAlpha,
                image.to_luma_alpha8().into_raw(),
            ),
            _ => Self::new(width, height, PixelLayout::Rgba, image.to_rgba8().into_raw()),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn layout(&self) -> PixelLayout {
        self.layout
    }

    /// Number of pixels in the grid
    pub fn pixel_count(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Iterate the luminance level of every pixel in row-major order
    pub fn luma_levels(&self) -> Result<impl Iterator<Item = u8> + '_, HistogramError> {
        if !self.layout.has_luminance() {
            return Err(HistogramError::UnsupportedPixelFormat {
                layout: self.layout.to_string(),
            });
        }

        let layout = self.layout;
        Ok(self
            .samples
            .chunks_exact(layout.channels())
            .map(move |px| match layout {
                PixelLayout::Rgb => rgb_to_luma(px[0], px[1], px[2]),
                // Luma and YCbCr both carry the level in the first sample
                _ => px[0],
            }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Luma, Rgb, Rgba};

    #[test]
    fn new_rejects_short_buffer() {
        let result = PixelGrid::new(2, 2, PixelLayout::Rgb, vec![0; 11]);
        assert!(matches!(
            result,
            Err(HistogramError::MalformedBuffer {
                expected: 12,
                actual: 11,
                ..
            })
        ));
    }

    #[test]
    fn rgb_to_luma_matches_extremes() {
        assert_eq!(rgb_to_luma(0, 0, 0), 0);
        assert_eq!(rgb_to_luma(255, 255, 255), 255);
        assert_eq!(rgb_to_luma(128, 128, 128), 128);
    }

    #[test]
    fn ycbcr_levels_use_first_component() {
        let grid = PixelGrid::new(2, 1, PixelLayout::YCbCr, vec![10, 128, 128, 20, 90, 160]).unwrap();
        let levels: Vec<u8> = grid.luma_levels().unwrap().collect();
        assert_eq!(levels, vec![10, 20]);
    }

    #[test]
    fn cmyk_has_no_luminance() {
        let grid = PixelGrid::new(1, 1, PixelLayout::Cmyk, vec![0, 0, 0, 0]).unwrap();
        assert!(matches!(
            grid.luma_levels(),
            Err(HistogramError::UnsupportedPixelFormat { .. })
        ));
    }

    #[test]
    fn from_dynamic_keeps_color_model() {
        let gray = DynamicImage::ImageLuma8(ImageBuffer::from_fn(3, 2, |_, _| Luma([7u8])));
        let rgb = DynamicImage::ImageRgb8(ImageBuffer::from_fn(3, 2, |_, _| Rgb([1u8, 2, 3])));
        let rgba = DynamicImage::ImageRgba8(ImageBuffer::from_fn(3, 2, |_, _| Rgba([1u8, 2, 3, 4])));

        assert_eq!(PixelGrid::from_dynamic(&gray).unwrap().layout(), PixelLayout::Luma);
        assert_eq!(PixelGrid::from_dynamic(&rgb).unwrap().layout(), PixelLayout::Rgb);
        assert_eq!(PixelGrid::from_dynamic(&rgba).unwrap().layout(), PixelLayout::Rgba);
        assert_eq!(PixelGrid::from_dynamic(&rgb).unwrap().pixel_count(), 6);
    }
}
