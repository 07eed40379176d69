//! Nearest-color mapping without error diffusion

use super::check_truecolor;
use crate::error::ColorResult;
use crate::lookup::PaletteLookup;
use rasterop_core::{Palette, PixelBuffer, color};

/// Map every pixel to its nearest palette entry.
///
/// # Errors
///
/// Returns [`crate::ColorError::UnsupportedLayout`] unless `src` is unindexed
/// 8-bit RGB or RGBA, and [`crate::ColorError::UnusablePalette`] if the
/// palette has no opaque entry.
pub fn dither_copy(src: &PixelBuffer, palette: &Palette) -> ColorResult<PixelBuffer> {
    check_truecolor(src)?;
    let lookup = PaletteLookup::new(palette)?;
    map_pixels(src, &lookup, |argb| lookup.index_of(argb & color::RGB_MASK))
}

/// Build an indexed buffer by mapping each packed pixel to an index.
pub(crate) fn map_pixels<F>(
    src: &PixelBuffer,
    lookup: &PaletteLookup,
    index_of: F,
) -> ColorResult<PixelBuffer>
where
    F: Fn(u32) -> usize,
{
    let (w, h) = (src.width(), src.height());
    let mut out = PixelBuffer::new_indexed(w, h, lookup.palette().clone())?.to_mut();
    for y in 0..h {
        for x in 0..w {
            let index = index_of(src.argb_unchecked(x, y));
            out.set_sample_unchecked(x, y, 0, index as u32);
        }
    }
    Ok(out.into())
}
