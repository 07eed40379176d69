//! rasterop Core - Basic data structures for pixel processing
//!
//! This crate provides the data structures shared by the color and
//! transform engines:
//!
//! - [`PixelBuffer`] / [`PixelBufferMut`] - Interleaved sample container (immutable / mutable)
//! - [`Palette`] / [`Rgba`] - Color table for indexed images
//! - [`ImageOp`] - Buffer-to-buffer operation interface
//! - [`color`] - Packed `0xAARRGGBB` helpers

pub mod buffer;
pub mod error;
pub mod op;
pub mod palette;

pub use buffer::{PixelBuffer, PixelBufferMut, SampleType, Samples};
pub use error::{Error, Result};
pub use op::{ImageOp, apply_chain};
pub use palette::{MAX_PALETTE_SIZE, Palette, Rgba};

/// Color channel helpers for packed 32-bit pixels.
///
/// # Pixel format
///
/// Packed pixels are `0xAARRGGBB` (alpha in MSB, blue in LSB). Functions
/// that only care about color accept `0x..RRGGBB` and ignore the top byte.
pub mod color {
    pub const ALPHA_SHIFT: u32 = 24;
    pub const RED_SHIFT: u32 = 16;
    pub const GREEN_SHIFT: u32 = 8;
    pub const BLUE_SHIFT: u32 = 0;

    /// Mask selecting the color bits of a packed pixel.
    pub const RGB_MASK: u32 = 0x00ff_ffff;

    /// Extract red component.
    #[inline]
    pub fn red(pixel: u32) -> u8 {
        ((pixel >> RED_SHIFT) & 0xff) as u8
    }

    /// Extract green component.
    #[inline]
    pub fn green(pixel: u32) -> u8 {
        ((pixel >> GREEN_SHIFT) & 0xff) as u8
    }

    /// Extract blue component.
    #[inline]
    pub fn blue(pixel: u32) -> u8 {
        ((pixel >> BLUE_SHIFT) & 0xff) as u8
    }

    /// Extract alpha component.
    #[inline]
    pub fn alpha(pixel: u32) -> u8 {
        ((pixel >> ALPHA_SHIFT) & 0xff) as u8
    }

    /// Compose an opaque pixel (alpha = 255).
    #[inline]
    pub fn compose_rgb(r: u8, g: u8, b: u8) -> u32 {
        compose_argb(r, g, b, 255)
    }

    /// Compose a pixel with alpha.
    #[inline]
    pub fn compose_argb(r: u8, g: u8, b: u8, a: u8) -> u32 {
        ((a as u32) << ALPHA_SHIFT)
            | ((r as u32) << RED_SHIFT)
            | ((g as u32) << GREEN_SHIFT)
            | ((b as u32) << BLUE_SHIFT)
    }

    /// Extract RGB values.
    #[inline]
    pub fn extract_rgb(pixel: u32) -> (u8, u8, u8) {
        (red(pixel), green(pixel), blue(pixel))
    }

    /// Extract RGBA values.
    #[inline]
    pub fn extract_rgba(pixel: u32) -> (u8, u8, u8, u8) {
        (red(pixel), green(pixel), blue(pixel), alpha(pixel))
    }

    /// Rec. 601 luma, rounded: `0.299 R + 0.587 G + 0.114 B`.
    #[inline]
    pub fn luma(pixel: u32) -> u8 {
        let (r, g, b) = extract_rgb(pixel);
        ((299 * r as u32 + 587 * g as u32 + 114 * b as u32 + 500) / 1000) as u8
    }

}
