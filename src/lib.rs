#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::uninlined_format_args)]

//! # bgcut
//!
//! Background removal built around a pretrained `BiRefNet` segmentation
//! model executed through ONNX Runtime. The inference runtime is treated
//! as a black box behind the [`InferenceBackend`] trait; the value of
//! this crate is the deterministic image pipeline around it: bicubic
//! resize, ImageNet normalization, sigmoid activation, bilinear mask
//! upsampling, byte scaling, and threshold compositing, plus a batch
//! driver over directory trees.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use bgcut::{BackgroundRemovalProcessor, RemovalConfig};
//!
//! # fn example() -> bgcut::Result<()> {
//! let config = RemovalConfig::builder()
//!     .model_path("models/birefnet_fp16.onnx")
//!     .threshold(0.1)
//!     .build()?;
//!
//! let mut processor = BackgroundRemovalProcessor::with_onnx(config);
//! let result = processor.process_file("photo.jpg")?;
//! result.save_mask_png("photo_mask.png")?;
//! result.save_masked_png("photo_masked.png", 0.1)?;
//! result.save_alpha_png("photo_alpha.png")?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Batch processing
//!
//! ```rust,no_run
//! use bgcut::{batch, BackgroundRemovalProcessor, BatchOptions, RemovalConfig};
//! use std::path::Path;
//!
//! # fn example() -> bgcut::Result<()> {
//! let config = RemovalConfig::builder()
//!     .model_path("models/birefnet_fp16.onnx")
//!     .build()?;
//! let mut processor = BackgroundRemovalProcessor::with_onnx(config);
//! let summary = batch::process_directory(
//!     &mut processor,
//!     Path::new("photos/"),
//!     Path::new("out/"),
//!     &BatchOptions::default(),
//! )?;
//! println!("processed {} image(s)", summary.processed);
//! # Ok(())
//! # }
//! ```
//!
//! ## Feature flags
//!
//! - `onnx` (default): ONNX Runtime backend via `ort`
//! - `cli` (default): command-line interface and tracing subscriber setup

pub mod activation;
pub mod backends;
pub mod batch;
#[cfg(feature = "cli")]
pub mod cli;
pub mod compositor;
pub mod config;
pub mod error;
pub mod inference;
pub mod processor;
pub mod resample;
pub mod tensor;
#[cfg(feature = "cli")]
pub mod tracing_config;
pub mod types;

// Public API exports
pub use backends::MockBackend;
#[cfg(feature = "onnx")]
pub use backends::OnnxBackend;
pub use batch::{BatchOptions, BatchSummary, SUPPORTED_EXTENSIONS};
pub use compositor::{apply_mask, apply_mask_alpha, threshold_to_byte};
pub use config::{Device, RemovalConfig, RemovalConfigBuilder, FALLBACK_INPUT_SIZE};
pub use error::{BgCutError, Result};
pub use inference::InferenceBackend;
pub use processor::BackgroundRemovalProcessor;
pub use tensor::{ProbabilityMap, IMAGENET_MEAN, IMAGENET_STD};
pub use types::{MaskStatistics, ProcessingTimings, RemovalResult, SegmentationMask};

#[cfg(feature = "cli")]
pub use tracing_config::TracingConfig;

/// Remove the background from a single image file using the ONNX backend.
///
/// Convenience wrapper that builds a processor for one call; prefer
/// [`BackgroundRemovalProcessor`] when processing more than one image so
/// the session is reused.
#[cfg(feature = "onnx")]
pub fn remove_background<P: AsRef<std::path::Path>>(
    path: P,
    config: &RemovalConfig,
) -> Result<RemovalResult> {
    let mut processor = BackgroundRemovalProcessor::with_onnx(config.clone());
    processor.process_file(path)
}
