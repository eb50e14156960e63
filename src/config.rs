//! Configuration types for the background removal pipeline

use crate::error::{BgCutError, Result};
use std::path::PathBuf;

/// Execution device for inference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Device {
    /// CPU execution (the only device actually honored)
    #[default]
    Cpu,
    /// CUDA requested; accepted with a warning, CPU execution is forced
    Cuda,
}

impl Device {
    /// Parse a device string leniently. Anything that is not `cpu` maps to
    /// [`Device::Cuda`] so the caller can emit the forced-CPU warning.
    #[must_use]
    pub fn parse_lenient(s: &str) -> Self {
        if s.eq_ignore_ascii_case("cpu") {
            Self::Cpu
        } else {
            Self::Cuda
        }
    }
}

impl std::fmt::Display for Device {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cpu => write!(f, "cpu"),
            Self::Cuda => write!(f, "cuda"),
        }
    }
}

/// Spatial input size assumed when the model metadata carries no usable
/// static shape.
pub const FALLBACK_INPUT_SIZE: (u32, u32) = (512, 512);

/// Configuration for background removal operations
#[derive(Debug, Clone)]
pub struct RemovalConfig {
    /// Path to the ONNX model file
    pub model_path: PathBuf,

    /// Requested execution device
    pub device: Device,

    /// Foreground threshold in (0, 1] used by the hard composite path
    pub threshold: f32,
}

impl RemovalConfig {
    /// Create a configuration builder
    #[must_use]
    pub fn builder() -> RemovalConfigBuilder {
        RemovalConfigBuilder::default()
    }
}

impl Default for RemovalConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from("../models/onnx/model_fp16.onnx"),
            device: Device::Cpu,
            threshold: 0.1,
        }
    }
}

/// Builder for [`RemovalConfig`] with validation
#[derive(Debug, Clone, Default)]
pub struct RemovalConfigBuilder {
    model_path: Option<PathBuf>,
    device: Device,
    threshold: Option<f32>,
}

impl RemovalConfigBuilder {
    /// Set the ONNX model file path
    #[must_use]
    pub fn model_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.model_path = Some(path.into());
        self
    }

    /// Set the execution device
    #[must_use]
    pub fn device(mut self, device: Device) -> Self {
        self.device = device;
        self
    }

    /// Set the foreground threshold
    #[must_use]
    pub fn threshold(mut self, threshold: f32) -> Self {
        self.threshold = Some(threshold);
        self
    }

    /// Build the configuration, validating parameter ranges
    ///
    /// # Errors
    /// - Threshold outside `(0, 1]`
    pub fn build(self) -> Result<RemovalConfig> {
        let defaults = RemovalConfig::default();
        let threshold = self.threshold.unwrap_or(defaults.threshold);
        if !(threshold > 0.0 && threshold <= 1.0) {
            return Err(BgCutError::invalid_config(format!(
                "threshold must be in (0, 1], got {threshold}"
            )));
        }

        Ok(RemovalConfig {
            model_path: self.model_path.unwrap_or(defaults.model_path),
            device: self.device,
            threshold,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let config = RemovalConfig::builder().build().unwrap();
        assert_eq!(config.device, Device::Cpu);
        assert!((config.threshold - 0.1).abs() < f32::EPSILON);
    }

    #[test]
    fn test_threshold_validation() {
        assert!(RemovalConfig::builder().threshold(0.0).build().is_err());
        assert!(RemovalConfig::builder().threshold(-0.5).build().is_err());
        assert!(RemovalConfig::builder().threshold(1.1).build().is_err());
        assert!(RemovalConfig::builder().threshold(f32::NAN).build().is_err());
        assert!(RemovalConfig::builder().threshold(1.0).build().is_ok());
        assert!(RemovalConfig::builder().threshold(0.01).build().is_ok());
    }

    #[test]
    fn test_device_parse_lenient() {
        assert_eq!(Device::parse_lenient("cpu"), Device::Cpu);
        assert_eq!(Device::parse_lenient("CPU"), Device::Cpu);
        assert_eq!(Device::parse_lenient("cuda"), Device::Cuda);
        // Unknown values are treated like a non-CPU request
        assert_eq!(Device::parse_lenient("tpu"), Device::Cuda);
    }
}
