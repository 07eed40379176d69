//! Error types for rasterop-color

use thiserror::Error;

/// Errors that can occur during quantization, lookup and dithering
#[derive(Debug, Error)]
pub enum ColorError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] rasterop_core::Error),

    /// Sample layout not handled by this operation
    #[error("unsupported layout: expected {expected}, got {bands} bands of {bits} bits")]
    UnsupportedLayout {
        expected: &'static str,
        bands: u32,
        bits: u32,
    },

    /// Invalid parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    /// Palette cannot serve as a lookup target
    #[error("unusable palette: {0}")]
    UnusablePalette(String),

    /// Unknown mode name
    #[error("unknown {kind}: {name:?}")]
    UnknownName { kind: &'static str, name: String },
}

/// Result type for color operations
pub type ColorResult<T> = Result<T, ColorError>;
