//! Error types for the viewer crates.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using ViewerError.
pub type ViewerResult<T> = Result<T, ViewerError>;

/// Primary error type for loading, configuring and rendering.
#[derive(Debug, Error)]
pub enum ViewerError {
    // === Input Errors ===
    #[error("Raster input not found: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("Failed to decode raster {}: {message}", path.display())]
    DecodeError { path: PathBuf, message: String },

    // === Configuration Errors ===
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    // === Rendering Errors ===
    #[error("Rendering failed: {0}")]
    RenderError(String),
}

impl ViewerError {
    /// Shorthand for a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        ViewerError::ConfigurationError(message.into())
    }

    /// Short machine-readable code, used as a log field.
    pub fn kind(&self) -> &'static str {
        match self {
            ViewerError::InputNotFound(_) => "input_not_found",
            ViewerError::DecodeError { .. } => "decode_error",
            ViewerError::ConfigurationError(_) => "configuration_error",
            ViewerError::RenderError(_) => "render_error",
        }
    }
}

// Conversion from common error types
impl From<std::io::Error> for ViewerError {
    fn from(err: std::io::Error) -> Self {
        ViewerError::RenderError(format!("I/O error: {}", err))
    }
}

impl From<serde_yaml::Error> for ViewerError {
    fn from(err: serde_yaml::Error) -> Self {
        ViewerError::ConfigurationError(format!("YAML error: {}", err))
    }
}

impl From<serde_json::Error> for ViewerError {
    fn from(err: serde_json::Error) -> Self {
        ViewerError::RenderError(format!("JSON error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(
            ViewerError::InputNotFound(PathBuf::from("a.tif")).kind(),
            "input_not_found"
        );
        assert_eq!(ViewerError::config("bad").kind(), "configuration_error");
    }

    #[test]
    fn test_display_includes_path() {
        let err = ViewerError::DecodeError {
            path: PathBuf::from("data/msavi2_2011.tif"),
            message: "not a TIFF".to_string(),
        };
        let text = err.to_string();
        assert!(text.contains("data/msavi2_2011.tif"));
        assert!(text.contains("not a TIFF"));
    }
}
