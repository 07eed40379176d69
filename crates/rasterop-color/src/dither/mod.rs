//! Dithering
//!
//! Converts 8-bit RGB / RGBA buffers to indexed buffers against a fixed
//! palette:
//!
//! - [`dither_copy`] - nearest palette entry per pixel, no state between pixels
//! - [`dither_diffusion`] - Floyd-Steinberg error diffusion, optionally serpentine
//!
//! Both ignore alpha; use [`crate::index_image`] for transparency handling.
//! The output is a 1-band 8-bit buffer carrying a copy of the palette.

mod copy;
mod diffusion;

pub use copy::dither_copy;
pub use diffusion::{DiffusionOptions, ErrorSeed, dither_diffusion, dither_diffusion_with_options};

use crate::error::{ColorError, ColorResult};
use rasterop_core::{ImageOp, Palette, PixelBuffer, SampleType};
use std::fmt;
use std::str::FromStr;

/// Dithering mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DitherMode {
    /// Nearest color, no error diffusion
    None,
    /// Floyd-Steinberg, left to right on every row
    Diffusion,
    /// Floyd-Steinberg with serpentine scan
    #[default]
    DiffusionAlternateScans,
}

impl DitherMode {
    /// Canonical lowercase name
    pub fn name(self) -> &'static str {
        match self {
            DitherMode::None => "none",
            DitherMode::Diffusion => "diffusion",
            DitherMode::DiffusionAlternateScans => "diffusion-altscans",
        }
    }
}

impl fmt::Display for DitherMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DitherMode {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" | "copy" => Ok(DitherMode::None),
            "diffusion" => Ok(DitherMode::Diffusion),
            "diffusion-altscans" => Ok(DitherMode::DiffusionAlternateScans),
            _ => Err(ColorError::UnknownName {
                kind: "dither mode",
                name: s.to_string(),
            }),
        }
    }
}

/// Dither against a fixed palette as an [`ImageOp`].
#[derive(Debug, Clone)]
pub struct DitherOp {
    /// Target palette; its transparent entry is never chosen
    pub palette: Palette,
    /// Copy or error diffusion, with or without serpentine scans
    pub mode: DitherMode,
}

impl DitherOp {
    /// Dither against `palette` using `mode`.
    pub fn new(palette: Palette, mode: DitherMode) -> Self {
        Self { palette, mode }
    }
}

impl ImageOp for DitherOp {
    type Error = ColorError;

    fn apply(&self, src: &PixelBuffer) -> ColorResult<PixelBuffer> {
        match self.mode {
            DitherMode::None => dither_copy(src, &self.palette),
            DitherMode::Diffusion => dither_diffusion(src, &self.palette, false),
            DitherMode::DiffusionAlternateScans => dither_diffusion(src, &self.palette, true),
        }
    }
}

/// Reject anything but unindexed 8-bit RGB / RGBA.
pub(crate) fn check_truecolor(src: &PixelBuffer) -> ColorResult<()> {
    let ok = src.sample_type() == SampleType::U8
        && !src.is_indexed()
        && (src.bands() == 3 || src.bands() == 4);
    if !ok {
        return Err(ColorError::UnsupportedLayout {
            expected: "8-bit RGB or RGBA",
            bands: src.bands(),
            bits: src.sample_type().bits(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_names_roundtrip() {
        for mode in [
            DitherMode::None,
            DitherMode::Diffusion,
            DitherMode::DiffusionAlternateScans,
        ] {
            assert_eq!(mode.to_string().parse::<DitherMode>().unwrap(), mode);
        }
        assert!("ordered".parse::<DitherMode>().is_err());
    }

    #[test]
    fn test_check_truecolor() {
        let rgb = PixelBuffer::new(1, 1, 3, SampleType::U8).unwrap();
        assert!(check_truecolor(&rgb).is_ok());
        let gray = PixelBuffer::new(1, 1, 1, SampleType::U8).unwrap();
        assert!(matches!(
            check_truecolor(&gray),
            Err(ColorError::UnsupportedLayout { bands: 1, .. })
        ));
        let rgb16 = PixelBuffer::new(1, 1, 3, SampleType::U16).unwrap();
        assert!(check_truecolor(&rgb16).is_err());
        let indexed = PixelBuffer::new_indexed(1, 1, Palette::monochrome()).unwrap();
        assert!(check_truecolor(&indexed).is_err());
    }

    #[test]
    fn test_dither_op_dispatch() {
        let src = PixelBuffer::from_u8(2, 1, 3, vec![0, 0, 0, 255, 255, 255]).unwrap();
        for mode in [DitherMode::None, DitherMode::Diffusion] {
            let out = DitherOp::new(Palette::monochrome(), mode).apply(&src).unwrap();
            assert_eq!(out.samples().as_u8(), Some(&[0u8, 1][..]));
        }
    }
}
