//! Mask compositing onto the original image
//!
//! Two deliberately separate code paths: a hard threshold-to-white cutout
//! and a soft alpha matte. Their semantics differ materially (opaque white
//! background vs. translucent alpha), so they are not unified.

use crate::error::{BgCutError, Result};
use crate::types::SegmentationMask;
use image::{DynamicImage, Rgb, RgbImage, Rgba, RgbaImage};

/// Convert a threshold in (0, 1] to its 8-bit comparison value,
/// `clamp(round(t * 255), 1, 255)`. The lower clamp keeps a near-zero
/// threshold from marking zero-probability pixels as foreground.
#[must_use]
pub fn threshold_to_byte(threshold: f32) -> u8 {
    (threshold * 255.0 + 0.5).clamp(1.0, 255.0) as u8
}

/// Hard cutout: pixels whose mask value falls below the byte threshold
/// become opaque white, the rest keep the original color.
///
/// The original is resized (bicubic stretch) to the mask dimensions if
/// they differ; the source buffer is never mutated.
///
/// # Errors
/// - Mask data inconsistent with its dimensions
pub fn apply_mask(
    original: &DynamicImage,
    mask: &SegmentationMask,
    threshold: f32,
) -> Result<RgbImage> {
    let (mask_width, mask_height) = mask.dimensions;
    if mask.data.len() != (mask_width as usize) * (mask_height as usize) {
        return Err(BgCutError::invalid_image(
            "mask data length does not match dimensions",
        ));
    }

    let rgb = original.to_rgb8();
    let rgb = if rgb.dimensions() == (mask_width, mask_height) {
        rgb
    } else {
        image::imageops::resize(
            &rgb,
            mask_width,
            mask_height,
            image::imageops::FilterType::CatmullRom,
        )
    };

    let cutoff = threshold_to_byte(threshold);
    let mut out = RgbImage::new(mask_width, mask_height);
    for (i, (pixel, out_pixel)) in rgb.pixels().zip(out.pixels_mut()).enumerate() {
        *out_pixel = if mask.data[i] < cutoff {
            Rgb([255, 255, 255])
        } else {
            *pixel
        };
    }
    Ok(out)
}

/// Soft alpha matte: the mask byte becomes the alpha channel directly,
/// no thresholding.
///
/// # Errors
/// - Image and mask dimensions do not match
/// - Mask data inconsistent with its dimensions
pub fn apply_mask_alpha(original: &DynamicImage, mask: &SegmentationMask) -> Result<RgbaImage> {
    let (mask_width, mask_height) = mask.dimensions;
    if mask.data.len() != (mask_width as usize) * (mask_height as usize) {
        return Err(BgCutError::invalid_image(
            "mask data length does not match dimensions",
        ));
    }

    let rgba = original.to_rgba8();
    if rgba.dimensions() != (mask_width, mask_height) {
        return Err(BgCutError::invalid_image(format!(
            "image dimensions {:?} do not match mask dimensions {:?}",
            rgba.dimensions(),
            mask.dimensions
        )));
    }

    let mut out = RgbaImage::new(mask_width, mask_height);
    for (i, (pixel, out_pixel)) in rgba.pixels().zip(out.pixels_mut()).enumerate() {
        *out_pixel = Rgba([pixel[0], pixel[1], pixel[2], mask.data[i]]);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::ImageBuffer;

    fn solid_rgb(width: u32, height: u32, rgb: [u8; 3]) -> DynamicImage {
        let img: ImageBuffer<Rgb<u8>, Vec<u8>> = ImageBuffer::from_pixel(width, height, Rgb(rgb));
        DynamicImage::ImageRgb8(img)
    }

    #[test]
    fn test_threshold_to_byte_boundaries() {
        assert_eq!(threshold_to_byte(1.0), 255);
        assert_eq!(threshold_to_byte(0.5), 128);
        // Near-zero thresholds clamp to the minimum comparison value of 1
        assert_eq!(threshold_to_byte(0.01), 3);
        assert_eq!(threshold_to_byte(0.001), 1);
    }

    #[test]
    fn test_apply_mask_hard_cutout() {
        let original = solid_rgb(2, 2, [10, 20, 30]);
        let mask = SegmentationMask::new(vec![0, 127, 128, 255], (2, 2));
        let out = apply_mask(&original, &mask, 0.5).unwrap();

        // Byte threshold is 128: values below become white, others keep color
        assert_eq!(out.get_pixel(0, 0).0, [255, 255, 255]);
        assert_eq!(out.get_pixel(1, 0).0, [255, 255, 255]);
        assert_eq!(out.get_pixel(0, 1).0, [10, 20, 30]);
        assert_eq!(out.get_pixel(1, 1).0, [10, 20, 30]);
    }

    #[test]
    fn test_apply_mask_resizes_mismatched_original() {
        let original = solid_rgb(8, 8, [50, 60, 70]);
        let mask = SegmentationMask::new(vec![255; 4], (2, 2));
        let out = apply_mask(&original, &mask, 0.5).unwrap();
        assert_eq!(out.dimensions(), (2, 2));
        assert_eq!(out.get_pixel(0, 0).0, [50, 60, 70]);
    }

    #[test]
    fn test_apply_mask_alpha_uses_mask_bytes() {
        let original = solid_rgb(2, 1, [10, 20, 30]);
        let mask = SegmentationMask::new(vec![0, 200], (2, 1));
        let out = apply_mask_alpha(&original, &mask).unwrap();
        assert_eq!(out.get_pixel(0, 0).0, [10, 20, 30, 0]);
        assert_eq!(out.get_pixel(1, 0).0, [10, 20, 30, 200]);
    }

    #[test]
    fn test_apply_mask_alpha_rejects_dimension_mismatch() {
        let original = solid_rgb(4, 4, [0, 0, 0]);
        let mask = SegmentationMask::new(vec![255; 4], (2, 2));
        assert!(apply_mask_alpha(&original, &mask).is_err());
    }

    #[test]
    fn test_apply_mask_does_not_mutate_original() {
        let original = solid_rgb(2, 2, [1, 2, 3]);
        let mask = SegmentationMask::new(vec![0; 4], (2, 2));
        let _ = apply_mask(&original, &mask, 0.9).unwrap();
        assert_eq!(original.to_rgb8().get_pixel(0, 0).0, [1, 2, 3]);
    }
}
