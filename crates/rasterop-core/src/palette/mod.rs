//! Palette - Color table for indexed images
//!
//! A palette holds up to [`MAX_PALETTE_SIZE`] RGBA entries and may mark one
//! entry as transparent. Indexed buffers (1 band, 8-bit) carry a palette
//! and store entry indices as their samples.

use crate::color;
use crate::error::{Error, Result};

/// Maximum number of entries a palette can hold.
pub const MAX_PALETTE_SIZE: usize = 256;

/// RGBA color entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgba {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: u8,
}

impl Rgba {
    /// Create a new RGBA color
    pub const fn new(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Create an opaque RGB color (alpha = 255)
    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self::new(red, green, blue, 255)
    }

    /// Create an opaque gray color
    pub const fn gray(value: u8) -> Self {
        Self::rgb(value, value, value)
    }

    /// Fully transparent black.
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);

    /// Create from a packed `0xAARRGGBB` value.
    pub fn from_argb(argb: u32) -> Self {
        Self::new(
            color::red(argb),
            color::green(argb),
            color::blue(argb),
            color::alpha(argb),
        )
    }

    /// Create an opaque color from a packed `0x..RRGGBB` value.
    pub fn from_rgb(rgb: u32) -> Self {
        Self::rgb(color::red(rgb), color::green(rgb), color::blue(rgb))
    }

    /// Packed `0x00RRGGBB` value (alpha dropped).
    #[inline]
    pub fn to_rgb(self) -> u32 {
        color::compose_rgb(self.red, self.green, self.blue) & 0x00ff_ffff
    }

    /// Packed `0xAARRGGBB` value.
    #[inline]
    pub fn to_argb(self) -> u32 {
        color::compose_argb(self.red, self.green, self.blue, self.alpha)
    }

    /// Squared Euclidean RGB distance to another color.
    #[inline]
    pub fn distance_sq(self, other: Rgba) -> u32 {
        let dr = self.red as i32 - other.red as i32;
        let dg = self.green as i32 - other.green as i32;
        let db = self.blue as i32 - other.blue as i32;
        (dr * dr + dg * dg + db * db) as u32
    }
}

/// Ordered color table with an optional transparent entry.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Palette {
    entries: Vec<Rgba>,
    transparent: Option<usize>,
}

impl Palette {
    /// Create an empty palette.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a palette from packed `0x..RRGGBB` colors, all opaque.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PaletteFull`] if more than [`MAX_PALETTE_SIZE`]
    /// colors are given.
    pub fn from_rgb(colors: &[u32]) -> Result<Self> {
        if colors.len() > MAX_PALETTE_SIZE {
            return Err(Error::PaletteFull(MAX_PALETTE_SIZE));
        }
        Ok(Self {
            entries: colors.iter().map(|&c| Rgba::from_rgb(c)).collect(),
            transparent: None,
        })
    }

    /// Create a palette from RGBA entries.
    pub fn from_entries(entries: Vec<Rgba>) -> Result<Self> {
        if entries.len() > MAX_PALETTE_SIZE {
            return Err(Error::PaletteFull(MAX_PALETTE_SIZE));
        }
        Ok(Self {
            entries,
            transparent: None,
        })
    }

    /// Two-entry black and white palette.
    pub fn monochrome() -> Self {
        Self {
            entries: vec![Rgba::gray(0), Rgba::gray(255)],
            transparent: None,
        }
    }

    /// Evenly spaced gray ramp from black to white.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] unless `2 <= levels <= 256`.
    pub fn grayscale(levels: usize) -> Result<Self> {
        if !(2..=MAX_PALETTE_SIZE).contains(&levels) {
            return Err(Error::InvalidParameter(format!(
                "gray levels must be in 2..=256, got {levels}"
            )));
        }
        let last = (levels - 1) as u32;
        let entries = (0..levels as u32)
            .map(|i| Rgba::gray(((i * 255 + last / 2) / last) as u8))
            .collect();
        Ok(Self {
            entries,
            transparent: None,
        })
    }

    /// Number of entries
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get an entry by index
    #[inline]
    pub fn get(&self, index: usize) -> Option<Rgba> {
        self.entries.get(index).copied()
    }

    /// All entries as a slice
    #[inline]
    pub fn entries(&self) -> &[Rgba] {
        &self.entries
    }

    /// Packed `0x00RRGGBB` value of an entry, or `None` if out of range.
    pub fn rgb(&self, index: usize) -> Option<u32> {
        self.get(index).map(Rgba::to_rgb)
    }

    /// Packed `0xAARRGGBB` value of an entry, or `None` if out of range.
    pub fn argb(&self, index: usize) -> Option<u32> {
        self.get(index).map(Rgba::to_argb)
    }

    /// Append an entry and return its index.
    pub fn push(&mut self, color: Rgba) -> Result<usize> {
        if self.entries.len() >= MAX_PALETTE_SIZE {
            return Err(Error::PaletteFull(MAX_PALETTE_SIZE));
        }
        self.entries.push(color);
        Ok(self.entries.len() - 1)
    }

    /// Return the index of an identical entry, appending the color if absent.
    pub fn push_unique(&mut self, color: Rgba) -> Result<usize> {
        match self.entries.iter().position(|&c| c == color) {
            Some(index) => Ok(index),
            None => self.push(color),
        }
    }

    /// Index of the transparent entry, if any.
    #[inline]
    pub fn transparent_index(&self) -> Option<usize> {
        self.transparent
    }

    /// Mark an entry as transparent, or clear the mark with `None`.
    pub fn set_transparent_index(&mut self, index: Option<usize>) -> Result<()> {
        if let Some(i) = index {
            if i >= self.entries.len() {
                return Err(Error::IndexOutOfBounds {
                    index: i,
                    len: self.entries.len(),
                });
            }
        }
        self.transparent = index;
        Ok(())
    }

    /// Index of the first opaque pure white entry.
    pub fn white_index(&self) -> Option<usize> {
        self.entries
            .iter()
            .enumerate()
            .position(|(i, c)| Some(i) != self.transparent && *c == Rgba::gray(255))
    }

    /// Exhaustive nearest-color search.
    ///
    /// The transparent entry never matches; ties go to the lowest index.
    pub fn find_nearest(&self, r: u8, g: u8, b: u8) -> Option<usize> {
        let target = Rgba::rgb(r, g, b);
        let mut best: Option<(usize, u32)> = None;
        for (i, &entry) in self.entries.iter().enumerate() {
            if Some(i) == self.transparent {
                continue;
            }
            let dist = entry.distance_sq(target);
            if best.map_or(true, |(_, d)| dist < d) {
                best = Some((i, dist));
            }
        }
        best.map(|(i, _)| i)
    }

    /// Check if every entry is gray (r == g == b).
    pub fn is_grayscale(&self) -> bool {
        self.entries
            .iter()
            .all(|c| c.red == c.green && c.green == c.blue)
    }
}
