//! Indexing pipeline
//!
//! Turns any buffer into an indexed buffer in one call: convert to 8-bit
//! truecolor, optionally flatten onto a matte, build (or accept) a palette,
//! then dither.

use crate::dither::{DitherMode, dither_copy, dither_diffusion};
use crate::error::{ColorError, ColorResult};
use crate::quantize::{ColorSelection, QuantizeOptions, quantize_with_options};
use rasterop_core::{ImageOp, Palette, PixelBuffer, Rgba, color};

/// Alpha below this value becomes the transparent index under
/// [`Transparency::Bitmask`].
const BITMASK_THRESHOLD: u8 = 0x40;

/// How alpha is carried into the indexed output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Transparency {
    /// Alpha is ignored
    #[default]
    Opaque,
    /// One palette entry is transparent; low-alpha pixels map to it
    Bitmask,
}

/// Options for [`index_image`]
#[derive(Debug, Clone)]
pub struct IndexOptions {
    /// Maximum palette size (1..=256)
    pub max_colors: u32,
    /// Dithering mode
    pub dither: DitherMode,
    /// Histogram sampling strategy
    pub selection: ColorSelection,
    /// Alpha handling
    pub transparency: Transparency,
    /// Composite onto this color first
    pub matte: Option<Rgba>,
}

impl Default for IndexOptions {
    fn default() -> Self {
        Self {
            max_colors: 256,
            dither: DitherMode::default(),
            selection: ColorSelection::default(),
            transparency: Transparency::Opaque,
            matte: None,
        }
    }
}

fn prepare(src: &PixelBuffer, options: &IndexOptions) -> ColorResult<PixelBuffer> {
    let prepared = match options.matte {
        Some(matte) => src.composite_over(matte)?,
        None => src.to_truecolor()?,
    };
    Ok(prepared)
}

fn dither_with(src: &PixelBuffer, palette: &Palette, mode: DitherMode) -> ColorResult<PixelBuffer> {
    match mode {
        DitherMode::None => dither_copy(src, palette),
        DitherMode::Diffusion => dither_diffusion(src, palette, false),
        DitherMode::DiffusionAlternateScans => dither_diffusion(src, palette, true),
    }
}

/// Replace low-alpha pixels with the palette's transparent index.
fn apply_bitmask(indexed: PixelBuffer, rgba: &PixelBuffer) -> ColorResult<PixelBuffer> {
    let Some(t) = indexed.palette().and_then(|p| p.transparent_index()) else {
        return Ok(indexed);
    };
    let mut out = indexed.to_mut();
    let mut masked = 0usize;
    for y in 0..rgba.height() {
        for x in 0..rgba.width() {
            if color::alpha(rgba.argb_unchecked(x, y)) < BITMASK_THRESHOLD {
                out.set_sample_unchecked(x, y, 0, t as u32);
                masked += 1;
            }
        }
    }
    tracing::trace!(masked, transparent_index = t, "Applied transparency bitmask");
    Ok(out.into())
}

/// Quantize and dither any buffer into an indexed buffer.
///
/// When the generated palette has fewer colors than requested the image
/// already fits exactly, and dithering is downgraded to nearest-color copy.
///
/// # Errors
///
/// Returns [`ColorError::InvalidParameters`] for an out-of-range
/// `max_colors`, or a core error if the source cannot be converted.
pub fn index_image(src: &PixelBuffer, options: &IndexOptions) -> ColorResult<PixelBuffer> {
    let truecolor = prepare(src, options)?;
    let bitmask = options.transparency == Transparency::Bitmask && truecolor.has_alpha();

    let palette = quantize_with_options(
        &truecolor,
        &QuantizeOptions {
            max_colors: options.max_colors,
            transparency: bitmask,
            selection: options.selection,
        },
    )?;

    let mut mode = options.dither;
    if mode != DitherMode::None && (palette.len() as u32) < options.max_colors {
        tracing::debug!(
            colors = palette.len(),
            requested = options.max_colors,
            "Palette smaller than requested, dithering disabled"
        );
        mode = DitherMode::None;
    }

    let indexed = dither_with(&truecolor, &palette, mode)?;
    if bitmask {
        apply_bitmask(indexed, &truecolor)
    } else {
        Ok(indexed)
    }
}

/// Dither any buffer against a caller-supplied palette.
///
/// `max_colors` and `selection` are ignored. With
/// [`Transparency::Bitmask`] the palette must carry a transparent entry for
/// alpha to have an effect.
pub fn index_image_with_palette(
    src: &PixelBuffer,
    palette: &Palette,
    options: &IndexOptions,
) -> ColorResult<PixelBuffer> {
    if palette.is_empty() {
        return Err(ColorError::UnusablePalette("palette is empty".into()));
    }
    let truecolor = prepare(src, options)?;
    let indexed = dither_with(&truecolor, palette, options.dither)?;
    if options.transparency == Transparency::Bitmask && truecolor.has_alpha() {
        apply_bitmask(indexed, &truecolor)
    } else {
        Ok(indexed)
    }
}

/// [`index_image`] as an [`ImageOp`].
#[derive(Debug, Clone, Default)]
pub struct IndexOp {
    /// Palette size, dithering, transparency and matte settings
    pub options: IndexOptions,
}

impl IndexOp {
    /// Index with `options`.
    pub fn new(options: IndexOptions) -> Self {
        Self { options }
    }
}

impl ImageOp for IndexOp {
    type Error = ColorError;

    fn apply(&self, src: &PixelBuffer) -> ColorResult<PixelBuffer> {
        index_image(src, &self.options)
    }
}
