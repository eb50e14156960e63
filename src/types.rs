//! Core types for background removal operations

use crate::error::{BgCutError, Result};
use image::{DynamicImage, GrayImage, RgbImage, RgbaImage};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Per-pixel foreground probability rendered as 8-bit grayscale
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SegmentationMask {
    /// Mask data as grayscale values (0-255), row-major
    pub data: Vec<u8>,

    /// Mask dimensions (width, height)
    pub dimensions: (u32, u32),
}

impl SegmentationMask {
    /// Create a new segmentation mask
    #[must_use]
    pub fn new(data: Vec<u8>, dimensions: (u32, u32)) -> Self {
        Self { data, dimensions }
    }

    /// Render the mask as a grayscale image (R=G=B=mask value on save)
    ///
    /// # Errors
    /// - Data length does not match the stated dimensions
    pub fn to_image(&self) -> Result<GrayImage> {
        let (width, height) = self.dimensions;
        GrayImage::from_raw(width, height, self.data.clone()).ok_or_else(|| {
            BgCutError::invalid_image("mask data length does not match dimensions")
        })
    }

    /// Save the mask as an 8-bit grayscale PNG
    ///
    /// # Errors
    /// - Mask data inconsistent with dimensions
    /// - PNG encoding or file I/O failures
    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let image = self.to_image()?;
        image.save_with_format(path, image::ImageFormat::Png)?;
        Ok(())
    }

    /// Foreground/background pixel counts and ratios
    #[must_use]
    pub fn statistics(&self) -> MaskStatistics {
        let total_pixels = self.data.len();
        let foreground_pixels = self.data.iter().filter(|&&x| x > 127).count();

        MaskStatistics {
            total_pixels,
            foreground_pixels,
            background_pixels: total_pixels - foreground_pixels,
            foreground_ratio: if total_pixels == 0 {
                0.0
            } else {
                foreground_pixels as f32 / total_pixels as f32
            },
        }
    }
}

/// Statistics about a segmentation mask
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaskStatistics {
    pub total_pixels: usize,
    pub foreground_pixels: usize,
    pub background_pixels: usize,
    pub foreground_ratio: f32,
}

/// Per-stage wall-clock timing breakdown for one image
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProcessingTimings {
    /// Image loading and decoding from file
    pub decode_ms: u64,

    /// Resize, normalization and tensor packing
    pub preprocessing_ms: u64,

    /// Inference execution in the backend
    pub inference_ms: u64,

    /// Sigmoid, clamp, resize-back and byte scaling
    pub postprocessing_ms: u64,

    /// Total end-to-end processing time
    pub total_ms: u64,
}

impl ProcessingTimings {
    /// One-line summary for logging
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "total {}ms (decode {}ms, preprocess {}ms, inference {}ms, postprocess {}ms)",
            self.total_ms,
            self.decode_ms,
            self.preprocessing_ms,
            self.inference_ms,
            self.postprocessing_ms
        )
    }
}

/// Result of a background removal operation
#[derive(Debug, Clone)]
pub struct RemovalResult {
    /// The decoded input image, unmodified
    pub original: DynamicImage,

    /// Segmentation mask at original image resolution
    pub mask: SegmentationMask,

    /// Original image dimensions (width, height)
    pub original_dimensions: (u32, u32),

    /// Timing breakdown for this image
    pub timings: ProcessingTimings,
}

impl RemovalResult {
    /// Render the mask as a grayscale image
    ///
    /// # Errors
    /// - Mask data inconsistent with dimensions
    pub fn mask_image(&self) -> Result<GrayImage> {
        self.mask.to_image()
    }

    /// Hard-threshold composite: background pixels become opaque white
    ///
    /// # Errors
    /// - Mask data inconsistent with dimensions
    pub fn masked_composite(&self, threshold: f32) -> Result<RgbImage> {
        crate::compositor::apply_mask(&self.original, &self.mask, threshold)
    }

    /// Soft alpha composite: mask bytes become the alpha channel directly
    ///
    /// # Errors
    /// - Image and mask dimensions do not match
    pub fn alpha_composite(&self) -> Result<RgbaImage> {
        crate::compositor::apply_mask_alpha(&self.original, &self.mask)
    }

    /// Save the grayscale mask as PNG
    ///
    /// # Errors
    /// - Encoding or file I/O failures
    pub fn save_mask_png<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.mask.save_png(path)
    }

    /// Save the white-background composite as PNG
    ///
    /// # Errors
    /// - Encoding or file I/O failures
    pub fn save_masked_png<P: AsRef<Path>>(&self, path: P, threshold: f32) -> Result<()> {
        let composite = self.masked_composite(threshold)?;
        composite.save_with_format(path, image::ImageFormat::Png)?;
        Ok(())
    }

    /// Save the alpha-matted composite as PNG
    ///
    /// # Errors
    /// - Encoding or file I/O failures
    pub fn save_alpha_png<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let composite = self.alpha_composite()?;
        composite.save_with_format(path, image::ImageFormat::Png)?;
        Ok(())
    }
}
