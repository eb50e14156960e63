//! Background removal processor
//!
//! Orchestrates the per-image pipeline: decode, pack at model resolution,
//! infer, extract the first output channel, sigmoid, clamp, bilinear
//! resize back to the original resolution, and scale to a byte mask.
//! Every buffer is created for one image and dropped with the result.

use crate::{
    activation, compositor,
    config::RemovalConfig,
    error::{BgCutError, Result},
    inference::InferenceBackend,
    resample, tensor,
    types::{ProcessingTimings, RemovalResult, SegmentationMask},
};
use image::DynamicImage;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, instrument};

/// Background removal pipeline over an injected inference backend
pub struct BackgroundRemovalProcessor {
    config: RemovalConfig,
    backend: Box<dyn InferenceBackend>,
    initialized: bool,
}

impl BackgroundRemovalProcessor {
    /// Create a processor with the given configuration and backend
    #[must_use]
    pub fn new(config: RemovalConfig, backend: Box<dyn InferenceBackend>) -> Self {
        Self {
            config,
            backend,
            initialized: false,
        }
    }

    /// Create a processor over the ONNX backend
    #[cfg(feature = "onnx")]
    #[must_use]
    pub fn with_onnx(config: RemovalConfig) -> Self {
        Self::new(config, Box::new(crate::backends::OnnxBackend::new()))
    }

    /// The active configuration
    #[must_use]
    pub fn config(&self) -> &RemovalConfig {
        &self.config
    }

    /// Initialize the backend (idempotent; done lazily on first use otherwise)
    ///
    /// # Errors
    /// - Model loading or session creation failures
    pub fn initialize(&mut self) -> Result<()> {
        if self.initialized {
            return Ok(());
        }
        debug!(model = %self.config.model_path.display(), "Initializing inference backend");
        self.backend.initialize(&self.config)?;
        let (w, h) = self.backend.input_spatial_size();
        info!(input_width = w, input_height = h, "Backend initialized");
        self.initialized = true;
        Ok(())
    }

    /// Process an image file
    ///
    /// # Errors
    /// - [`BgCutError::InvalidImage`] when the file cannot be decoded
    /// - Inference and postprocessing failures
    pub fn process_file<P: AsRef<Path>>(&mut self, path: P) -> Result<RemovalResult> {
        let path = path.as_ref();
        let decode_start = Instant::now();
        let image = image::open(path).map_err(|e| {
            BgCutError::invalid_image(format!("failed to decode '{}': {e}", path.display()))
        })?;
        let decode_ms = decode_start.elapsed().as_millis() as u64;
        self.process_decoded(&image, decode_ms)
    }

    /// Process an already-decoded image
    ///
    /// # Errors
    /// - [`BgCutError::InvalidImage`] for zero-dimension input
    /// - Inference and postprocessing failures
    pub fn process_image(&mut self, image: &DynamicImage) -> Result<RemovalResult> {
        self.process_decoded(image, 0)
    }

    #[instrument(
        skip(self, image),
        fields(dimensions = %format!("{}x{}", image.width(), image.height()))
    )]
    fn process_decoded(&mut self, image: &DynamicImage, decode_ms: u64) -> Result<RemovalResult> {
        if !self.initialized {
            self.initialize()?;
        }

        let total_start = Instant::now();
        let (target_width, target_height) = self.backend.input_spatial_size();

        let preprocess_start = Instant::now();
        let (input_tensor, orig_width, orig_height) =
            tensor::pack_image(image, target_width, target_height)?;
        let preprocessing_ms = preprocess_start.elapsed().as_millis() as u64;

        let inference_start = Instant::now();
        let output = self.backend.infer(&input_tensor)?;
        let inference_ms = inference_start.elapsed().as_millis() as u64;

        let postprocess_start = Instant::now();
        let mut prob_map = tensor::extract_first_channel(&output)?;
        activation::sigmoid_in_place(&mut prob_map.data);
        activation::clamp01_in_place(&mut prob_map.data);

        let resized = resample::resize_bilinear(
            prob_map.data,
            prob_map.width as usize,
            prob_map.height as usize,
            orig_width as usize,
            orig_height as usize,
        );
        let mask = SegmentationMask::new(activation::to_bytes(&resized), (orig_width, orig_height));
        let postprocessing_ms = postprocess_start.elapsed().as_millis() as u64;

        let timings = ProcessingTimings {
            decode_ms,
            preprocessing_ms,
            inference_ms,
            postprocessing_ms,
            total_ms: decode_ms + total_start.elapsed().as_millis() as u64,
        };
        debug!("Image processed: {}", timings.summary());

        Ok(RemovalResult {
            original: image.clone(),
            mask,
            original_dimensions: (orig_width, orig_height),
            timings,
        })
    }

    /// Hard-threshold composite using the configured threshold
    ///
    /// # Errors
    /// - Mask data inconsistent with its dimensions
    pub fn composite(&self, result: &RemovalResult) -> Result<image::RgbImage> {
        compositor::apply_mask(&result.original, &result.mask, self.config.threshold)
    }
}
