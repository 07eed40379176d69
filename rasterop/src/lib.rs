//! rasterop - Palette reduction and resampling over raw pixel buffers
//!
//! # Overview
//!
//! rasterop works on interleaved 8- or 16-bit sample buffers with 1 to 4
//! bands, optionally indexed through a palette. It provides:
//!
//! - Adaptive palette construction by box splitting ([`color::quantize`])
//! - Constant-time nearest-color lookup ([`color::InverseColorMap`])
//! - Nearest-color and Floyd-Steinberg dithering ([`color::dither_copy`], [`color::dither_diffusion`])
//! - One-call indexing with transparency handling ([`color::index_image`])
//! - Separable resampling with 15 filter kernels ([`transform::resample`])
//! - Area-average scaling and pixelization
//!
//! # Example
//!
//! ```
//! use rasterop::PixelBuffer;
//! use rasterop::color::{IndexOptions, index_image};
//! use rasterop::transform::{FilterType, resample};
//!
//! // 8x8 RGB image, red on top and blue below
//! let mut data = Vec::new();
//! for y in 0..8 {
//!     for _ in 0..8 {
//!         data.extend_from_slice(if y < 4 { &[255, 0, 0] } else { &[0, 0, 255] });
//!     }
//! }
//! let image = PixelBuffer::from_u8(8, 8, 3, data).unwrap();
//!
//! let small = resample(&image, 4, 4, FilterType::Box).unwrap();
//! let indexed = index_image(&small, &IndexOptions::default()).unwrap();
//! assert_eq!(indexed.palette().unwrap().len(), 2);
//! ```

// Re-export core types (primary data structures used everywhere)
pub use rasterop_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use rasterop_color as color;
pub use rasterop_transform as transform;
