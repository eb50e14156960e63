//! Tensor packing and unpacking for model inference
//!
//! Converts decoded RGB images into the normalized NCHW float tensors the
//! model expects, and extracts a 2-D probability map from whatever tensor
//! shape the model returns.

use crate::error::{BgCutError, Result};
use image::DynamicImage;
use ndarray::{Array4, ArrayD};

/// ImageNet per-channel mean used for input normalization
pub const IMAGENET_MEAN: [f32; 3] = [0.485, 0.456, 0.406];

/// ImageNet per-channel standard deviation used for input normalization
pub const IMAGENET_STD: [f32; 3] = [0.229, 0.224, 0.225];

/// A 2-D float grid extracted from the model output.
///
/// Holds raw logits straight after extraction; probabilities in [0, 1]
/// once sigmoid and clamp have been applied.
#[derive(Debug, Clone)]
pub struct ProbabilityMap {
    /// Row-major values, `width * height` elements
    pub data: Vec<f32>,
    /// Grid width in elements
    pub width: u32,
    /// Grid height in elements
    pub height: u32,
}

/// Resize an image to the model input size and pack it into a normalized
/// NCHW tensor.
///
/// The resize is an independent stretch on each axis (no aspect-ratio
/// preservation) with a bicubic filter, matching the model's fixed-size
/// expectation. Returns the tensor together with the original dimensions
/// so the caller can map the mask back later.
///
/// # Errors
/// - [`BgCutError::InvalidImage`] if the source has zero width or height
pub fn pack_image(
    image: &DynamicImage,
    target_width: u32,
    target_height: u32,
) -> Result<(Array4<f32>, u32, u32)> {
    let rgb = image.to_rgb8();
    let (orig_width, orig_height) = rgb.dimensions();
    if orig_width == 0 || orig_height == 0 {
        return Err(BgCutError::invalid_image(format!(
            "zero-sized input ({orig_width}x{orig_height})"
        )));
    }

    let resized = image::imageops::resize(
        &rgb,
        target_width,
        target_height,
        image::imageops::FilterType::CatmullRom,
    );

    let (w, h) = (target_width as usize, target_height as usize);
    let mut tensor = Array4::<f32>::zeros((1, 3, h, w));
    for (y, row) in resized.rows().enumerate() {
        for (x, pixel) in row.enumerate() {
            for c in 0..3 {
                tensor[[0, c, y, x]] =
                    (f32::from(pixel[c]) / 255.0 - IMAGENET_MEAN[c]) / IMAGENET_STD[c];
            }
        }
    }

    Ok((tensor, orig_width, orig_height))
}

/// Extract the first channel of a model output tensor as a 2-D float grid.
///
/// Accepts rank 4 `(N, C, H, W)`, rank 3 `(C, H, W)`, and rank 2 `(H, W)`
/// outputs. Height and width are always taken from the trailing two shape
/// dimensions, never inferred from the element count.
///
/// # Errors
/// - [`BgCutError::UnsupportedOutputShape`] for any other rank, or when
///   either spatial dimension is zero
pub fn extract_first_channel(output: &ArrayD<f32>) -> Result<ProbabilityMap> {
    let shape = output.shape();
    let (height, width) = match shape.len() {
        4 | 3 | 2 => (shape[shape.len() - 2], shape[shape.len() - 1]),
        _ => return Err(BgCutError::unsupported_shape(shape)),
    };
    if height == 0 || width == 0 {
        return Err(BgCutError::unsupported_shape(shape));
    }

    let mut data = Vec::with_capacity(width * height);
    match shape.len() {
        4 => {
            for y in 0..height {
                for x in 0..width {
                    data.push(output[[0, 0, y, x]]);
                }
            }
        },
        3 => {
            for y in 0..height {
                for x in 0..width {
                    data.push(output[[0, y, x]]);
                }
            }
        },
        _ => {
            for y in 0..height {
                for x in 0..width {
                    data.push(output[[y, x]]);
                }
            }
        },
    }

    Ok(ProbabilityMap {
        data,
        width: width as u32,
        height: height as u32,
    })
}
