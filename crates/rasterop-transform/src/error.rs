//! Error types for rasterop-transform

use thiserror::Error;

/// Errors that can occur during resampling and block averaging
#[derive(Debug, Error)]
pub enum TransformError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] rasterop_core::Error),

    /// Target dimensions are zero
    #[error("invalid target dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    /// Invalid transformation parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    /// Filter name not recognized
    #[error("unknown filter: {0:?}")]
    UnknownFilter(String),

    /// Failure reported by a resample accelerator
    #[error("accelerator {name} failed: {reason}")]
    Accelerator { name: String, reason: String },
}

/// Result type for transform operations
pub type TransformResult<T> = Result<T, TransformError>;
