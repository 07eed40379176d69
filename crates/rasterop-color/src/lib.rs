//! rasterop Color - Palette construction and palette mapping
//!
//! This crate reduces truecolor buffers to indexed ones:
//!
//! - **Quantization** ([`quantize`]): adaptive palettes by box splitting over a color histogram
//! - **Inverse color map** ([`inverse`]): O(1) nearest-entry lookup on a 32x32x32 grid
//! - **Dithering** ([`dither`]): nearest-color copy and Floyd-Steinberg diffusion
//! - **Indexing** ([`index`]): any buffer to indexed in one call, with transparency handling

pub mod dither;
pub mod error;
pub mod index;
pub mod inverse;
pub mod lookup;
pub mod quantize;

// Re-export core types
pub use rasterop_core;

// Re-export error types
pub use error::{ColorError, ColorResult};

// Re-export lookup types
pub use inverse::InverseColorMap;
pub use lookup::{ALPHA_THRESHOLD, PaletteLookup};

// Re-export quantization
pub use quantize::{ColorSelection, QuantizeOptions, quantize, quantize_with_options};

// Re-export dithering
pub use dither::{
    // Types
    DiffusionOptions,
    DitherMode,
    DitherOp,
    ErrorSeed,
    // Functions
    dither_copy,
    dither_diffusion,
    dither_diffusion_with_options,
};

// Re-export indexing pipeline
pub use index::{IndexOp, IndexOptions, Transparency, index_image, index_image_with_palette};
