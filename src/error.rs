//! Error types for dxf-lens

use std::io;
use thiserror::Error;

/// Main error type for dxf-lens operations.
///
/// Data-quality problems inside a recognised file never surface here; they
/// are counted in [`ParseDiagnostics`](crate::notification::ParseDiagnostics).
#[derive(Debug, Error)]
pub enum DxfError {
    /// IO error occurred while reading an input source
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Input is none of the accepted shapes
    #[error("Invalid input type: {0}")]
    InvalidInputType(String),

    /// Binary format requested while disabled by configuration
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// The DWG decoding bridge could not be acquired
    #[error("DWG bridge unavailable: {0}")]
    BridgeAcquisition(String),

    /// Serialization error (GeoJSON, options)
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with custom message
    #[error("{0}")]
    Custom(String),
}

/// Result type alias for dxf-lens operations
pub type Result<T> = std::result::Result<T, DxfError>;

impl From<String> for DxfError {
    fn from(s: String) -> Self {
        DxfError::Custom(s)
    }
}

impl From<&str> for DxfError {
    fn from(s: &str) -> Self {
        DxfError::Custom(s.to_string())
    }
}
