//! Error types for background removal operations

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for background removal operations
pub type Result<T> = std::result::Result<T, BgCutError>;

/// Error types for the background removal pipeline
#[derive(Error, Debug)]
pub enum BgCutError {
    /// Input/output errors (file not found, permission denied, etc.)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Image codec errors from the `image` crate
    #[error("Image processing error: {0}")]
    Image(#[from] image::ImageError),

    /// Model file does not exist at the configured path
    #[error("Model file not found: {}", .0.display())]
    ModelNotFound(PathBuf),

    /// Batch input directory does not exist
    #[error("Input directory not found: {}", .0.display())]
    InputDirNotFound(PathBuf),

    /// Image could not be decoded, or has zero width/height
    #[error("Invalid image: {0}")]
    InvalidImage(String),

    /// Inference output tensor has a rank outside {2, 3, 4}
    #[error("Unsupported output tensor shape: {0}")]
    UnsupportedOutputShape(String),

    /// Saving the masked composite failed (non-fatal, per-file)
    #[error("Composite save failed: {0}")]
    CompositeSaveFailed(String),

    /// Backend inference errors
    #[error("Inference error: {0}")]
    Inference(String),

    /// Invalid configuration or parameters
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl BgCutError {
    /// Create a new invalid image error
    pub fn invalid_image<S: Into<String>>(msg: S) -> Self {
        Self::InvalidImage(msg.into())
    }

    /// Create an unsupported output shape error from the offending shape
    pub fn unsupported_shape(shape: &[usize]) -> Self {
        Self::UnsupportedOutputShape(format!("{shape:?}"))
    }

    /// Create a new inference error
    pub fn inference<S: Into<String>>(msg: S) -> Self {
        Self::Inference(msg.into())
    }

    /// Create a new invalid configuration error
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Create a non-fatal composite save error with file context
    pub fn composite_save<P: AsRef<std::path::Path>>(path: P, cause: &dyn std::fmt::Display) -> Self {
        Self::CompositeSaveFailed(format!("'{}': {}", path.as_ref().display(), cause))
    }

    /// Whether the error aborts the whole run (configuration level)
    /// rather than a single file.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::ModelNotFound(_) | Self::InputDirNotFound(_) | Self::InvalidConfig(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_error_display() {
        let err = BgCutError::ModelNotFound(PathBuf::from("/models/missing.onnx"));
        assert_eq!(err.to_string(), "Model file not found: /models/missing.onnx");

        let err = BgCutError::invalid_image("zero width");
        assert_eq!(err.to_string(), "Invalid image: zero width");
    }

    #[test]
    fn test_unsupported_shape_reports_dims() {
        let err = BgCutError::unsupported_shape(&[1, 3, 4, 4, 4]);
        assert!(err.to_string().contains("[1, 3, 4, 4, 4]"));
    }

    #[test]
    fn test_composite_save_context() {
        let cause = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = BgCutError::composite_save(Path::new("/out/a_masked.png"), &cause);
        let msg = err.to_string();
        assert!(msg.contains("a_masked.png"));
        assert!(msg.contains("denied"));
    }

    #[test]
    fn test_fatality_classification() {
        assert!(BgCutError::ModelNotFound(PathBuf::new()).is_fatal());
        assert!(BgCutError::InputDirNotFound(PathBuf::new()).is_fatal());
        assert!(BgCutError::invalid_config("bad threshold").is_fatal());
        assert!(!BgCutError::invalid_image("truncated file").is_fatal());
        assert!(!BgCutError::inference("session failure").is_fatal());
    }
}
