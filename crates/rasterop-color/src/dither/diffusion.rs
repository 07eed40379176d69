//! Floyd-Steinberg error diffusion
//!
//! Two error rows (current and next) hold per-channel 8.8 fixed-point
//! accumulators, `width + 2` wide so the kernel never needs a bounds check;
//! slot `x + 1` belongs to pixel `x`. Error pushed into the halo slots is
//! dropped.
//!
//! ```text
//!            *    7/16          7/16    *
//!   3/16   5/16   1/16    1/16  5/16  3/16
//!      left to right           right to left
//! ```

use super::check_truecolor;
use crate::error::ColorResult;
use crate::lookup::PaletteLookup;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rasterop_core::{Palette, PixelBuffer, color};

/// One color level in 8.8 fixed point.
const FS_ONE: i32 = 1 << 8;
/// Weight units: a weight of `w` sixteenths adds `diff * w * ERR_UNIT`.
const ERR_UNIT: i32 = FS_ONE / 16;

/// Initial contents of the first error row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorSeed {
    /// Start from zero error
    #[default]
    Zero,
    /// Uniform random error in `[-1, 1)` levels per channel from a seeded generator
    Random(u64),
}

/// Options for error-diffusion dithering
#[derive(Debug, Clone)]
pub struct DiffusionOptions {
    /// Reverse the scan direction on every other row
    pub alternate_scans: bool,
    /// First-row error seeding
    pub seed: ErrorSeed,
}

impl Default for DiffusionOptions {
    fn default() -> Self {
        Self {
            alternate_scans: true,
            seed: ErrorSeed::Zero,
        }
    }
}

/// Dither with Floyd-Steinberg error diffusion and a zero-error first row.
pub fn dither_diffusion(
    src: &PixelBuffer,
    palette: &Palette,
    alternate_scans: bool,
) -> ColorResult<PixelBuffer> {
    dither_diffusion_with_options(
        src,
        palette,
        &DiffusionOptions {
            alternate_scans,
            ..Default::default()
        },
    )
}

/// Dither with Floyd-Steinberg error diffusion.
///
/// # Errors
///
/// Returns [`crate::ColorError::UnsupportedLayout`] unless `src` is unindexed
/// 8-bit RGB or RGBA, and [`crate::ColorError::UnusablePalette`] if the
/// palette has no opaque entry.
pub fn dither_diffusion_with_options(
    src: &PixelBuffer,
    palette: &Palette,
    options: &DiffusionOptions,
) -> ColorResult<PixelBuffer> {
    check_truecolor(src)?;
    let lookup = PaletteLookup::new(palette)?;
    let (w, h) = (src.width(), src.height());
    let mut out = PixelBuffer::new_indexed(w, h, palette.clone())?.to_mut();

    let wu = w as usize;
    let mut curr = vec![[0i32; 3]; wu + 2];
    let mut next = vec![[0i32; 3]; wu + 2];

    if let ErrorSeed::Random(seed) = options.seed {
        let mut rng = StdRng::seed_from_u64(seed);
        for slot in curr.iter_mut() {
            for e in slot.iter_mut() {
                *e = rng.gen_range(-FS_ONE..FS_ONE);
            }
        }
    }

    let mut forward = true;
    for y in 0..h {
        for e in next.iter_mut() {
            *e = [0; 3];
        }

        for step in 0..wu {
            let x = if forward { step } else { wu - 1 - step };
            let (r, g, b) = color::extract_rgb(src.argb_unchecked(x as u32, y));
            let mut adjusted = [r as i32, g as i32, b as i32];
            for (ch, v) in adjusted.iter_mut().enumerate() {
                *v = (((*v << 8) + curr[x + 1][ch] + FS_ONE / 2) >> 8).clamp(0, 255);
            }

            let rgb = color::compose_rgb(adjusted[0] as u8, adjusted[1] as u8, adjusted[2] as u8);
            let index = lookup.index_of(rgb);
            out.set_sample_unchecked(x as u32, y, 0, index as u32);

            let (pr, pg, pb) = color::extract_rgb(lookup.color(index));
            let actual = [pr as i32, pg as i32, pb as i32];
            for ch in 0..3 {
                let diff = (adjusted[ch] - actual[ch]) * ERR_UNIT;
                if forward {
                    curr[x + 2][ch] += diff * 7;
                    next[x][ch] += diff * 3;
                    next[x + 1][ch] += diff * 5;
                    next[x + 2][ch] += diff;
                } else {
                    curr[x][ch] += diff * 7;
                    next[x + 2][ch] += diff * 3;
                    next[x + 1][ch] += diff * 5;
                    next[x][ch] += diff;
                }
            }
        }

        std::mem::swap(&mut curr, &mut next);
        if options.alternate_scans {
            forward = !forward;
        }
    }

    tracing::trace!(
        width = w,
        height = h,
        colors = palette.len(),
        alternate_scans = options.alternate_scans,
        seed = ?options.seed,
        "Diffusion dither complete"
    );

    Ok(out.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniform(w: u32, h: u32, v: u8) -> PixelBuffer {
        PixelBuffer::from_u8(w, h, 3, vec![v; (w * h * 3) as usize]).unwrap()
    }

    fn mean_gray(out: &PixelBuffer) -> f64 {
        let rgb = out.expand_palette().unwrap();
        let n = (rgb.width() * rgb.height()) as f64;
        rgb.samples().as_u8().unwrap().iter().step_by(3).map(|&v| v as f64).sum::<f64>() / n
    }

    #[test]
    fn test_exact_palette_colors_carry_no_error() {
        let pal = Palette::from_rgb(&[0x000000, 0xffffff, 0xff0000]).unwrap();
        let src =
            PixelBuffer::from_u8(3, 1, 3, vec![255, 0, 0, 0, 0, 0, 255, 255, 255]).unwrap();
        for alt in [false, true] {
            let out = dither_diffusion(&src, &pal, alt).unwrap();
            assert_eq!(out.samples().as_u8(), Some(&[2u8, 0, 1][..]));
        }
    }

    #[test]
    fn test_mid_gray_mixes_black_and_white() {
        let out = dither_diffusion(&uniform(32, 32, 128), &Palette::monochrome(), true).unwrap();
        let whites = out.samples().as_u8().unwrap().iter().filter(|&&i| i == 1).count();
        assert!(whites > 400 && whites < 624, "whites = {whites}");
    }

    #[test]
    fn test_mean_brightness_preserved() {
        for level in [40u8, 100, 200] {
            let out =
                dither_diffusion(&uniform(64, 64, level), &Palette::monochrome(), true).unwrap();
            let mean = mean_gray(&out);
            assert!(
                (mean - level as f64).abs() < 6.0,
                "level {level} mean {mean}"
            );
        }
    }

    #[test]
    fn test_serpentine_differs_from_raster() {
        let mut data = Vec::new();
        for _ in 0..16 {
            for x in 0..16u8 {
                data.extend_from_slice(&[x * 12, x * 12, x * 12]);
            }
        }
        let src = PixelBuffer::from_u8(16, 16, 3, data).unwrap();
        let pal = Palette::grayscale(3).unwrap();
        let raster = dither_diffusion(&src, &pal, false).unwrap();
        let serpentine = dither_diffusion(&src, &pal, true).unwrap();
        let first_row = |b: &PixelBuffer| b.row_u8(0).unwrap().to_vec();
        assert_eq!(first_row(&raster), first_row(&serpentine));
        assert_ne!(raster.samples(), serpentine.samples());
    }

    #[test]
    fn test_random_seed_is_deterministic() {
        let src = uniform(16, 16, 77);
        let opts = DiffusionOptions {
            alternate_scans: true,
            seed: ErrorSeed::Random(42),
        };
        let a = dither_diffusion_with_options(&src, &Palette::monochrome(), &opts).unwrap();
        let b = dither_diffusion_with_options(&src, &Palette::monochrome(), &opts).unwrap();
        assert_eq!(a.samples(), b.samples());
    }

    #[test]
    fn test_rejects_gray_input() {
        let gray = PixelBuffer::from_u8(2, 2, 1, vec![0; 4]).unwrap();
        assert!(dither_diffusion(&gray, &Palette::monochrome(), true).is_err());
    }
}
