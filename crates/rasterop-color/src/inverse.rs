//! Inverse color map
//!
//! Precomputes, for one palette, the nearest entry for every cell of a
//! 32x32x32 grid (5 bits per channel). Queries drop the low 3 bits of each
//! channel and index the grid directly, so lookup is O(1) and never
//! searches the palette.
//!
//! # Build
//!
//! For each non-transparent entry the squared distance to every cell center
//! is swept incrementally: moving one cell along an axis changes the
//! squared distance by a first difference that itself grows by a constant,
//! so no squares are recomputed inside the loops. A cell is claimed by an
//! entry only when strictly closer than the current owner, which makes the
//! lowest index win ties.

use crate::error::{ColorError, ColorResult};
use rasterop_core::{MAX_PALETTE_SIZE, Palette};

/// Bits kept per channel.
const QUANT_BITS: u32 = 5;
/// Bits dropped per channel.
const TRUNC_BITS: u32 = 8 - QUANT_BITS;
/// Cells per axis.
const GRID: usize = 1 << QUANT_BITS;
/// Total cell count.
const CELLS: usize = GRID * GRID * GRID;

/// Cell width in color units.
const CELL: i32 = 1 << TRUNC_BITS;
/// Cell width squared.
const CELL_SQ: i32 = 1 << (2 * TRUNC_BITS);
/// Growth of the first difference per step.
const STEP: i32 = 2 * CELL_SQ;

/// Grid cell holding a packed `0x..RRGGBB` color.
#[inline]
pub(crate) fn cell_index(rgb: u32) -> usize {
    (((rgb >> 9) & 0x7c00) | ((rgb >> 6) & 0x03e0) | ((rgb >> 3) & 0x001f)) as usize
}

/// Nearest-palette-entry lookup table.
#[derive(Debug, Clone)]
pub struct InverseColorMap {
    cells: Box<[u8]>,
    len: usize,
    transparent: Option<usize>,
}

impl InverseColorMap {
    /// Build the table for a palette, skipping its transparent entry.
    ///
    /// # Errors
    ///
    /// Returns [`ColorError::UnusablePalette`] if the palette has no
    /// non-transparent entry.
    pub fn new(palette: &Palette) -> ColorResult<Self> {
        let colors: Vec<u32> = palette.entries().iter().map(|c| c.to_rgb()).collect();
        Self::from_rgb(&colors, palette.transparent_index())
    }

    /// Build the table from packed `0x..RRGGBB` colors.
    ///
    /// # Errors
    ///
    /// Returns [`ColorError::InvalidParameters`] for more than 256 colors and
    /// [`ColorError::UnusablePalette`] if nothing but the transparent entry
    /// remains.
    pub fn from_rgb(colors: &[u32], transparent: Option<usize>) -> ColorResult<Self> {
        if colors.len() > MAX_PALETTE_SIZE {
            return Err(ColorError::InvalidParameters(format!(
                "inverse color map supports at most {MAX_PALETTE_SIZE} colors, got {}",
                colors.len()
            )));
        }
        if !(0..colors.len()).any(|i| Some(i) != transparent) {
            return Err(ColorError::UnusablePalette(
                "no opaque entry to map colors to".into(),
            ));
        }

        let mut cells = vec![0u8; CELLS].into_boxed_slice();
        let mut best = vec![0i32; CELLS];
        let mut seeded = false;

        for (i, &rgb) in colors.iter().enumerate() {
            if Some(i) == transparent {
                continue;
            }
            let red = ((rgb >> 16) & 0xff) as i32;
            let green = ((rgb >> 8) & 0xff) as i32;
            let blue = (rgb & 0xff) as i32;

            // Distance to the center of cell (0, 0, 0).
            let r0 = red - CELL / 2;
            let g0 = green - CELL / 2;
            let b0 = blue - CELL / 2;
            let start = r0 * r0 + g0 * g0 + b0 * b0;

            let rinc = 2 * (CELL_SQ - (red << TRUNC_BITS));
            let ginc = 2 * (CELL_SQ - (green << TRUNC_BITS));
            let binc = 2 * (CELL_SQ - (blue << TRUNC_BITS));

            let mut idx = 0usize;
            let mut rdist = start;
            let mut rxx = rinc;
            for _ in 0..GRID {
                let mut gdist = rdist;
                let mut gxx = ginc;
                for _ in 0..GRID {
                    let mut bdist = gdist;
                    let mut bxx = binc;
                    for _ in 0..GRID {
                        if !seeded || best[idx] > bdist {
                            best[idx] = bdist;
                            cells[idx] = i as u8;
                        }
                        idx += 1;
                        bdist += bxx;
                        bxx += STEP;
                    }
                    gdist += gxx;
                    gxx += STEP;
                }
                rdist += rxx;
                rxx += STEP;
            }
            seeded = true;
        }

        tracing::trace!(colors = colors.len(), ?transparent, "Built inverse color map");

        Ok(Self {
            cells,
            len: colors.len(),
            transparent,
        })
    }

    /// Index of the nearest entry for a packed `0x..RRGGBB` color.
    ///
    /// The top byte is ignored.
    #[inline]
    pub fn nearest(&self, rgb: u32) -> usize {
        self.cells[cell_index(rgb)] as usize
    }

    /// Index of the nearest entry for separate channels.
    #[inline]
    pub fn nearest_rgb(&self, r: u8, g: u8, b: u8) -> usize {
        self.nearest(((r as u32) << 16) | ((g as u32) << 8) | b as u32)
    }

    /// Number of palette entries the table was built from.
    pub fn palette_len(&self) -> usize {
        self.len
    }

    /// Transparent entry excluded from the table.
    pub fn transparent_index(&self) -> Option<usize> {
        self.transparent
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rasterop_core::Rgba;

    fn cell_center(idx: usize) -> (i32, i32, i32) {
        let r = (idx >> 10) & 0x1f;
        let g = (idx >> 5) & 0x1f;
        let b = idx & 0x1f;
        let c = |v: usize| (v as i32) * CELL + CELL / 2;
        (c(r), c(g), c(b))
    }

    fn dist(rgb: u32, center: (i32, i32, i32)) -> i32 {
        let dr = ((rgb >> 16) & 0xff) as i32 - center.0;
        let dg = ((rgb >> 8) & 0xff) as i32 - center.1;
        let db = (rgb & 0xff) as i32 - center.2;
        dr * dr + dg * dg + db * db
    }

    #[test]
    fn test_cell_index() {
        assert_eq!(cell_index(0x000000), 0);
        assert_eq!(cell_index(0xffffff), CELLS - 1);
        assert_eq!(cell_index(0xff000000), 0);
        assert_eq!(cell_index(0x080000), 1 << 10);
        assert_eq!(cell_index(0x000800), 1 << 5);
        assert_eq!(cell_index(0x000008), 1);
    }

    #[test]
    fn test_self_consistency() {
        let colors = [0x000000, 0xffffff, 0xff0000, 0x00ff00, 0x0000ff, 0x808080];
        let map = InverseColorMap::from_rgb(&colors, None).unwrap();
        for (i, &c) in colors.iter().enumerate() {
            assert_eq!(map.nearest(c), i, "color {c:06x}");
        }
    }

    #[test]
    fn test_cells_hold_nearest_to_center() {
        let colors = [0x102030, 0xc08040, 0x40c0a0, 0xe0e0e0, 0x202020];
        let map = InverseColorMap::from_rgb(&colors, None).unwrap();
        for idx in (0..CELLS).step_by(97) {
            let center = cell_center(idx);
            let got = map.cells[idx] as usize;
            let best = colors.iter().map(|&c| dist(c, center)).min().unwrap();
            assert_eq!(dist(colors[got], center), best, "cell {idx}");
        }
    }

    #[test]
    fn test_ties_keep_lowest_index() {
        let map = InverseColorMap::from_rgb(&[0x123456, 0x123456], None).unwrap();
        assert_eq!(map.nearest(0x123456), 0);
        assert_eq!(map.nearest(0xffffff), 0);
    }

    #[test]
    fn test_transparent_entry_never_returned() {
        let mut pal = Palette::new();
        pal.push(Rgba::TRANSPARENT).unwrap();
        pal.push(Rgba::rgb(255, 255, 255)).unwrap();
        pal.push(Rgba::rgb(200, 0, 0)).unwrap();
        pal.set_transparent_index(Some(0)).unwrap();
        let map = InverseColorMap::new(&pal).unwrap();
        for idx in 0..CELLS {
            assert_ne!(map.cells[idx], 0);
        }
        assert_eq!(map.nearest(0x000000), 2);
    }

    #[test]
    fn test_unusable_palettes() {
        assert!(matches!(
            InverseColorMap::from_rgb(&[], None),
            Err(ColorError::UnusablePalette(_))
        ));
        assert!(matches!(
            InverseColorMap::from_rgb(&[0], Some(0)),
            Err(ColorError::UnusablePalette(_))
        ));
        assert!(matches!(
            InverseColorMap::from_rgb(&[0; 257], None),
            Err(ColorError::InvalidParameters(_))
        ));
    }

    #[test]
    fn test_nearest_rgb_matches_packed() {
        let map = InverseColorMap::from_rgb(&[0xff0000, 0x0000ff], None).unwrap();
        assert_eq!(map.nearest_rgb(250, 3, 3), 0);
        assert_eq!(map.nearest_rgb(3, 3, 250), 1);
    }
}
