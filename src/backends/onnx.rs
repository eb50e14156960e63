//! ONNX Runtime backend for BiRefNet segmentation models
//!
//! Wraps an `ort` session behind the [`InferenceBackend`] trait. Input
//! layer name and expected spatial size are discovered from the session's
//! metadata instead of being hard-coded; the session handle is dropped
//! with the backend.

use crate::config::{Device, RemovalConfig, FALLBACK_INPUT_SIZE};
use crate::error::{BgCutError, Result};
use crate::inference::InferenceBackend;
use ndarray::{Array4, ArrayD};
use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::{Value, ValueType};
use tracing::{debug, info, warn};

/// ONNX Runtime backend
#[derive(Debug)]
pub struct OnnxBackend {
    session: Option<Session>,
    input_name: Option<String>,
    input_size: (u32, u32),
}

impl OnnxBackend {
    /// Create an uninitialized backend
    #[must_use]
    pub fn new() -> Self {
        Self {
            session: None,
            input_name: None,
            input_size: FALLBACK_INPUT_SIZE,
        }
    }

    /// Read the spatial input size from session metadata, falling back to
    /// 512x512 when the input is not a static 4-D tensor.
    fn probe_input_metadata(session: &Session) -> (Option<String>, (u32, u32)) {
        let Some(input) = session.inputs.first() else {
            warn!("Model declares no inputs; using fallback input size");
            return (None, FALLBACK_INPUT_SIZE);
        };

        let name = input.name.clone();
        let dims: Vec<i64> = match &input.input_type {
            ValueType::Tensor { shape, .. } => shape.iter().copied().collect(),
            other => {
                warn!(input_type = ?other, "Model input is not a tensor; using fallback input size");
                return (Some(name), FALLBACK_INPUT_SIZE);
            },
        };

        // NCHW with static spatial dims; dynamic dims are reported as <= 0
        if dims.len() == 4 && dims[2] > 0 && dims[3] > 0 {
            (Some(name), (dims[3] as u32, dims[2] as u32))
        } else {
            debug!(?dims, "No usable static input shape; using fallback input size");
            (Some(name), FALLBACK_INPUT_SIZE)
        }
    }
}

impl Default for OnnxBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl InferenceBackend for OnnxBackend {
    fn initialize(&mut self, config: &RemovalConfig) -> Result<()> {
        if self.session.is_some() {
            return Ok(());
        }

        if !config.model_path.is_file() {
            return Err(BgCutError::ModelNotFound(config.model_path.clone()));
        }

        if config.device == Device::Cuda {
            warn!("Device 'cuda' requested but only CPU execution is supported; forcing CPU");
        }

        let session = Session::builder()
            .map_err(|e| BgCutError::inference(format!("Failed to create session builder: {e}")))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| BgCutError::inference(format!("Failed to set optimization level: {e}")))?
            .commit_from_file(&config.model_path)
            .map_err(|e| {
                BgCutError::inference(format!(
                    "Failed to load model '{}': {e}",
                    config.model_path.display()
                ))
            })?;

        let (input_name, input_size) = Self::probe_input_metadata(&session);
        info!(
            model = %config.model_path.display(),
            input = input_name.as_deref().unwrap_or("<unnamed>"),
            width = input_size.0,
            height = input_size.1,
            "ONNX session created"
        );

        self.input_name = input_name;
        self.input_size = input_size;
        self.session = Some(session);
        Ok(())
    }

    fn infer(&mut self, input: &Array4<f32>) -> Result<ArrayD<f32>> {
        let session = self
            .session
            .as_mut()
            .ok_or_else(|| BgCutError::inference("backend not initialized"))?;

        debug!(shape = ?input.dim(), "Running ONNX inference");
        let input_value = Value::from_array(input.clone())
            .map_err(|e| BgCutError::inference(format!("Failed to convert input tensor: {e}")))?;

        // Positional inputs avoid a dependency on the exact tensor name
        let outputs = session
            .run(ort::inputs![input_value])
            .map_err(|e| BgCutError::inference(format!("ONNX inference failed: {e}")))?;

        let keys: Vec<_> = outputs.keys().collect();
        let first_key = keys
            .first()
            .ok_or_else(|| BgCutError::inference("model produced no outputs"))?;
        let output = outputs
            .get(first_key)
            .ok_or_else(|| BgCutError::inference("first output tensor not found"))?
            .try_extract_array::<f32>()
            .map_err(|e| BgCutError::inference(format!("Failed to extract output tensor: {e}")))?;

        Ok(output.to_owned())
    }

    fn input_name(&self) -> Result<&str> {
        self.input_name
            .as_deref()
            .ok_or_else(|| BgCutError::inference("backend not initialized"))
    }

    fn input_spatial_size(&self) -> (u32, u32) {
        self.input_size
    }

    fn is_initialized(&self) -> bool {
        self.session.is_some()
    }
}
