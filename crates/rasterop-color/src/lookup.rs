//! Palette lookup
//!
//! [`PaletteLookup`] bundles a palette with its inverse color map and two
//! shortcuts applied before the grid lookup:
//!
//! - pixels with alpha below [`ALPHA_THRESHOLD`] map to the transparent
//!   entry, when the palette has one
//! - exact opaque white maps to the palette's white entry, when present,
//!   so highlights survive the 5-bit quantization of the grid

use crate::error::ColorResult;
use crate::inverse::InverseColorMap;
use rasterop_core::{Palette, color};

/// Alpha below this value counts as transparent.
pub const ALPHA_THRESHOLD: u8 = 0x80;

const WHITE: u32 = 0x00ff_ffff;

/// Palette plus its precomputed nearest-color table.
#[derive(Debug, Clone)]
pub struct PaletteLookup {
    palette: Palette,
    inverse: InverseColorMap,
    white: Option<usize>,
    colors: Vec<u32>,
}

impl PaletteLookup {
    /// Build the lookup for `palette`.
    pub fn new(palette: &Palette) -> ColorResult<Self> {
        let inverse = InverseColorMap::new(palette)?;
        Ok(Self {
            palette: palette.clone(),
            inverse,
            white: palette.white_index(),
            colors: palette.entries().iter().map(|c| c.to_rgb()).collect(),
        })
    }

    /// Index for an opaque packed `0x..RRGGBB` color.
    #[inline]
    pub fn index_of(&self, rgb: u32) -> usize {
        let rgb = rgb & color::RGB_MASK;
        match self.white {
            Some(white) if rgb == WHITE => white,
            _ => self.inverse.nearest(rgb),
        }
    }

    /// Index for a packed `0xAARRGGBB` color, honoring alpha.
    #[inline]
    pub fn index_of_argb(&self, argb: u32) -> usize {
        match self.palette.transparent_index() {
            Some(t) if color::alpha(argb) < ALPHA_THRESHOLD => t,
            _ => self.index_of(argb),
        }
    }

    /// Packed `0x00RRGGBB` color of an entry.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not a valid palette index.
    #[inline]
    pub fn color(&self, index: usize) -> u32 {
        self.colors[index]
    }

    /// The palette this lookup was built from.
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// The underlying inverse color map.
    pub fn inverse(&self) -> &InverseColorMap {
        &self.inverse
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rasterop_core::Rgba;

    #[test]
    fn test_white_shortcut() {
        // 0xfafafa shares a grid cell with pure white and sorts first.
        let pal = Palette::from_rgb(&[0xfafafa, 0xffffff, 0x000000]).unwrap();
        let lookup = PaletteLookup::new(&pal).unwrap();
        assert_eq!(lookup.inverse().nearest(0xffffff), 0);
        assert_eq!(lookup.index_of(0xffffff), 1);
        assert_eq!(lookup.index_of(0xff_ffffff), 1);
        assert_eq!(lookup.index_of(0xfefefe), 0);
    }

    #[test]
    fn test_alpha_threshold() {
        let mut pal = Palette::from_rgb(&[0xff0000, 0x00ff00]).unwrap();
        pal.push(Rgba::TRANSPARENT).unwrap();
        pal.set_transparent_index(Some(2)).unwrap();
        let lookup = PaletteLookup::new(&pal).unwrap();
        assert_eq!(lookup.index_of_argb(0x7f_ff0000), 2);
        assert_eq!(lookup.index_of_argb(0x80_ff0000), 0);
        assert_eq!(lookup.index_of_argb(0x00_00ff00), 2);
    }

    #[test]
    fn test_alpha_ignored_without_transparent_entry() {
        let pal = Palette::from_rgb(&[0xff0000, 0x00ff00]).unwrap();
        let lookup = PaletteLookup::new(&pal).unwrap();
        assert_eq!(lookup.index_of_argb(0x00_00ff00), 1);
        assert_eq!(lookup.color(1), 0x00ff00);
    }
}
