//! Image decoding into pixel grids.
//!
//! Uses zune-jpeg for JPEG files (1.5-2x faster than image crate) and
//! keeps the encoded Y plane as the luminance level. Falls back to the
//! image crate's JPEG decoder when zune-jpeg rejects a file. Content that
//! is not JPEG is a decode error, whatever the file is called.

use super::grid::{PixelGrid, PixelLayout};
use crate::error::HistogramError;
use image::ImageFormat;
use std::fs;
use std::path::Path;
use zune_core::colorspace::ColorSpace;
use zune_core::options::DecoderOptions;
use zune_jpeg::JpegDecoder as ZuneJpegDecoder;

/// Decode collaborator used by the comparator
///
/// Implementations must be safe to call from several workers at once.
pub trait ImageDecoder: Send + Sync {
    /// Decode the file at `path` into a pixel grid
    fn decode(&self, path: &Path) -> Result<PixelGrid, HistogramError>;
}

/// Default decoder for JPEG photos
#[derive(Debug, Clone, Copy, Default)]
pub struct JpegDecoder;

impl JpegDecoder {
    pub fn new() -> Self {
        Self
    }

    /// JPEG decoding using zune-jpeg
    fn decode_jpeg(path: &Path) -> Result<PixelGrid, HistogramError> {
        let file_bytes = fs::read(path).map_err(|e| HistogramError::IoError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let options = DecoderOptions::default().jpeg_set_out_colorspace(ColorSpace::YCbCr);
        let mut decoder = ZuneJpegDecoder::new_with_options(&file_bytes, options);

        let pixels = decoder.decode().map_err(|e| HistogramError::DecodeError {
            path: path.to_path_buf(),
            reason: format!("zune-jpeg decode failed: {:?}", e),
        })?;

        let info = decoder.info().ok_or_else(|| HistogramError::DecodeError {
            path: path.to_path_buf(),
            reason: "Failed to get image info".to_string(),
        })?;

        // Grayscale and CMYK sources may not honour the requested colorspace
        let layout = match decoder.get_output_colorspace().unwrap_or(ColorSpace::YCbCr) {
            ColorSpace::RGB => PixelLayout::Rgb,
            ColorSpace::RGBA => PixelLayout::Rgba,
            ColorSpace::Luma => PixelLayout::Luma,
            ColorSpace::LumaA => PixelLayout::LumaAlpha,
            ColorSpace::YCbCr => PixelLayout::YCbCr,
            ColorSpace::CMYK => PixelLayout::Cmyk,
            other => {
                return Err(HistogramError::UnsupportedPixelFormat {
                    layout: format!("{:?}", other),
                })
            }
        };

        PixelGrid::new(info.width as u32, info.height as u32, layout, pixels)
    }

    /// Fallback to the image crate's JPEG decoder
    fn decode_fallback(path: &Path) -> Result<PixelGrid, HistogramError> {
        let mut reader =
            image::ImageReader::open(path).map_err(|e| HistogramError::IoError {
                path: path.to_path_buf(),
                source: e,
            })?;
        reader.set_format(ImageFormat::Jpeg);

        let image = reader.decode().map_err(|e| HistogramError::DecodeError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        PixelGrid::from_dynamic(&image)
    }
}

impl ImageDecoder for JpegDecoder {
    fn decode(&self, path: &Path) -> Result<PixelGrid, HistogramError> {
        match Self::decode_jpeg(path) {
            Ok(grid) => Ok(grid),
            Err(e) if e.is_fatal() => Err(e),
            Err(e @ HistogramError::IoError { .. }) => Err(e),
            Err(_) => Self::decode_fallback(path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, ImageBuffer, Luma, Rgb, RgbImage, Rgba, RgbaImage};
    use tempfile::TempDir;

    #[test]
    fn decodes_color_jpeg_to_luminance_grid() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("red.jpg");
        let img: RgbImage = ImageBuffer::from_fn(16, 8, |_, _| Rgb([200u8, 30, 30]));
        img.save(&path).unwrap();

        let grid = JpegDecoder::new().decode(&path).unwrap();

        assert_eq!(grid.width(), 16);
        assert_eq!(grid.height(), 8);
        assert!(grid.layout().has_luminance());
    }

    #[test]
    fn decodes_grayscale_jpeg() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("gray.jpeg");
        let img: GrayImage = ImageBuffer::from_fn(8, 8, |x, _| Luma([(x * 20) as u8]));
        img.save(&path).unwrap();

        let grid = JpegDecoder::new().decode(&path).unwrap();

        assert_eq!(grid.pixel_count(), 64);
        assert!(grid.layout().has_luminance());
    }

    #[test]
    fn png_content_with_jpeg_name_is_a_decode_error() {
        let dir = TempDir::new().unwrap();
        let png_path = dir.path().join("actually.png");
        let img: RgbaImage = ImageBuffer::from_fn(4, 4, |_, _| Rgba([90u8, 90, 90, 128]));
        img.save(&png_path).unwrap();
        let disguised = dir.path().join("actually.jpg");
        fs::rename(&png_path, &disguised).unwrap();

        let result = JpegDecoder::new().decode(&disguised);

        assert!(matches!(result, Err(HistogramError::DecodeError { .. })));
    }

    #[test]
    fn color_jpeg_levels_are_the_encoded_y_plane() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("gradient.jpg");
        let img: RgbImage = ImageBuffer::from_fn(64, 64, |x, y| {
            Rgb([(x * 4) as u8, (y * 4) as u8, ((x + y) * 2) as u8])
        });
        img.save(&path).unwrap();

        let bytes = fs::read(&path).unwrap();
        let options = DecoderOptions::default().jpeg_set_out_colorspace(ColorSpace::YCbCr);
        let mut reference = ZuneJpegDecoder::new_with_options(&bytes, options);
        let y_plane: Vec<u8> = reference
            .decode()
            .unwrap()
            .chunks_exact(3)
            .map(|px| px[0])
            .collect();

        let grid = JpegDecoder::new().decode(&path).unwrap();

        assert_eq!(grid.layout(), PixelLayout::YCbCr);
        assert_eq!(grid.luma_levels().unwrap().collect::<Vec<_>>(), y_plane);
    }

    #[test]
    fn garbage_is_a_decode_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.jpg");
        fs::write(&path, b"this is not a valid image file").unwrap();

        let result = JpegDecoder::new().decode(&path);

        assert!(matches!(result, Err(HistogramError::DecodeError { .. })));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let result = JpegDecoder::new().decode(Path::new("/nonexistent/photo.jpg"));
        assert!(matches!(result, Err(HistogramError::IoError { .. })));
    }
}
