//! Inference backend abstraction
//!
//! The pipeline depends only on this trait; the concrete runtime (ONNX
//! Runtime, or the mock used in tests) stays behind it as a black box
//! that accepts a tensor and returns a tensor.

use crate::{config::RemovalConfig, error::Result};
use ndarray::{Array4, ArrayD};

/// Trait for inference backends.
///
/// Also carries the model-descriptor capability: the input layer name and
/// the expected spatial input size, both discovered from model metadata
/// rather than hard-coded.
pub trait InferenceBackend {
    /// Initialize the backend with the given configuration
    ///
    /// # Errors
    /// - Model file not found
    /// - Session creation or model parsing failures
    fn initialize(&mut self, config: &RemovalConfig) -> Result<()>;

    /// Run inference on the input tensor.
    ///
    /// The output keeps whatever rank the model produces; shape
    /// normalization happens downstream in the tensor unpacker.
    ///
    /// # Errors
    /// - Backend not initialized
    /// - Inference execution failures
    fn infer(&mut self, input: &Array4<f32>) -> Result<ArrayD<f32>>;

    /// Name of the model's declared input layer
    ///
    /// # Errors
    /// - Backend not initialized
    fn input_name(&self) -> Result<&str>;

    /// Expected spatial input size `(width, height)`, from model metadata
    /// with a 512x512 fallback when metadata is absent or malformed
    fn input_spatial_size(&self) -> (u32, u32);

    /// Check if backend is initialized
    fn is_initialized(&self) -> bool;
}
