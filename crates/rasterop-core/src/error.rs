//! Error types for rasterop-core
//!
//! Provides a unified error type for buffer and palette operations.
//! Each variant captures enough context for diagnostics without exposing
//! internal storage details.

use thiserror::Error;

/// rasterop-core error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Invalid image dimensions
    #[error("invalid image dimensions: {width}x{height}")]
    InvalidDimension { width: u32, height: u32 },

    /// Invalid band count
    #[error("invalid band count: {0} (expected 1..=4)")]
    InvalidBands(u32),

    /// Sample storage does not match the declared geometry
    #[error("sample length mismatch: expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// Index out of bounds
    #[error("index out of bounds: {index} >= {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// Image dimension mismatch
    #[error("dimension mismatch: expected {}x{}, got {}x{}", .expected.0, .expected.1, .actual.0, .actual.1)]
    DimensionMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },

    /// Band counts of two buffers or a pixel slice disagree
    #[error("incompatible band counts: {0} vs {1}")]
    IncompatibleBands(u32, u32),

    /// Sample layout not handled by this operation
    #[error("unsupported layout: {0}")]
    UnsupportedLayout(String),

    /// Palette required but not present
    #[error("palette required but not present")]
    PaletteRequired,

    /// Palette not allowed for this layout
    #[error("palette not allowed for {bands}-band {bits}-bit samples")]
    PaletteNotAllowed { bands: u32, bits: u32 },

    /// Palette has no room for another entry
    #[error("palette is full ({0} entries)")]
    PaletteFull(usize),

    /// Invalid parameter value
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Result type alias for rasterop-core operations
pub type Result<T> = std::result::Result<T, Error>;
