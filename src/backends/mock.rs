//! Mock backend for testing without real model files
//!
//! Returns a constant-logit tensor of a configurable shape, which makes
//! pipeline behavior fully predictable in tests.

use crate::config::RemovalConfig;
use crate::error::{BgCutError, Result};
use crate::inference::InferenceBackend;
use ndarray::{Array4, ArrayD, IxDyn};

/// Deterministic mock inference backend
#[derive(Debug)]
pub struct MockBackend {
    input_size: (u32, u32),
    output_shape: Vec<usize>,
    logit: f32,
    initialized: bool,
}

impl MockBackend {
    /// Create a mock backend emitting zero logits at a 2x2 output,
    /// with a 64x64 input expectation
    #[must_use]
    pub fn new() -> Self {
        Self {
            input_size: (64, 64),
            output_shape: vec![1, 1, 2, 2],
            logit: 0.0,
            initialized: false,
        }
    }

    /// Set the constant logit value every output element carries
    #[must_use]
    pub fn with_logit(mut self, logit: f32) -> Self {
        self.logit = logit;
        self
    }

    /// Set the output tensor shape (any rank, to exercise the unpacker)
    #[must_use]
    pub fn with_output_shape(mut self, shape: &[usize]) -> Self {
        self.output_shape = shape.to_vec();
        self
    }

    /// Set the spatial input size reported to the pipeline
    #[must_use]
    pub fn with_input_size(mut self, width: u32, height: u32) -> Self {
        self.input_size = (width, height);
        self
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl InferenceBackend for MockBackend {
    fn initialize(&mut self, _config: &RemovalConfig) -> Result<()> {
        self.initialized = true;
        Ok(())
    }

    fn infer(&mut self, input: &Array4<f32>) -> Result<ArrayD<f32>> {
        if !self.initialized {
            return Err(BgCutError::inference("backend not initialized"));
        }
        let (_, channels, _, _) = input.dim();
        if channels != 3 {
            return Err(BgCutError::inference(format!(
                "expected 3 input channels, got {channels}"
            )));
        }
        Ok(ArrayD::from_elem(IxDyn(&self.output_shape), self.logit))
    }

    fn input_name(&self) -> Result<&str> {
        Ok("input_image")
    }

    fn input_spatial_size(&self) -> (u32, u32) {
        self.input_size
    }

    fn is_initialized(&self) -> bool {
        self.initialized
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_requires_initialization() {
        let mut backend = MockBackend::new();
        let input = Array4::<f32>::zeros((1, 3, 4, 4));
        assert!(backend.infer(&input).is_err());

        backend.initialize(&RemovalConfig::default()).unwrap();
        assert!(backend.is_initialized());
        assert!(backend.infer(&input).is_ok());
    }

    #[test]
    fn test_mock_emits_configured_shape_and_logit() {
        let mut backend = MockBackend::new()
            .with_output_shape(&[1, 3, 5])
            .with_logit(2.5);
        backend.initialize(&RemovalConfig::default()).unwrap();

        let input = Array4::<f32>::zeros((1, 3, 4, 4));
        let output = backend.infer(&input).unwrap();
        assert_eq!(output.shape(), &[1, 3, 5]);
        assert!(output.iter().all(|&v| (v - 2.5).abs() < f32::EPSILON));
    }

    #[test]
    fn test_mock_rejects_non_rgb_input() {
        let mut backend = MockBackend::new();
        backend.initialize(&RemovalConfig::default()).unwrap();
        let input = Array4::<f32>::zeros((1, 1, 4, 4));
        assert!(backend.infer(&input).is_err());
    }
}
