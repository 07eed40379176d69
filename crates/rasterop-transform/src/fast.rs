//! Fast scaling
//!
//! Direct nearest / bilinear / bicubic scaling with pixel-center mapping
//! (`src = (dst + 0.5) / scale - 0.5`) and edge clamping. Large reductions
//! are done progressively: first to a power-of-two multiple of the target,
//! then by repeated bilinear halving, so no step drops more than half the
//! samples along an axis.

use crate::error::{TransformError, TransformResult};
use rasterop_core::PixelBuffer;

/// Bicubic (Keys) sharpness parameter.
const BICUBIC_A: f64 = -0.5;

/// Interpolation used by [`fast_resample`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interpolation {
    /// Nearest sample, no blending
    Nearest,
    /// Two-tap linear interpolation per axis
    Bilinear,
    /// Four-tap cubic convolution per axis
    Bicubic,
}

type Taps = Vec<(usize, f64)>;

fn cubic_weight(t: f64) -> f64 {
    let t = t.abs();
    let a = BICUBIC_A;
    if t <= 1.0 {
        ((a + 2.0) * t - (a + 3.0)) * t * t + 1.0
    } else if t < 2.0 {
        ((a * t - 5.0 * a) * t + 8.0 * a) * t - 4.0 * a
    } else {
        0.0
    }
}

/// Source taps for every destination index along one axis.
fn axis_taps(src_len: u32, dst_len: u32, interp: Interpolation) -> Vec<Taps> {
    let scale = dst_len as f64 / src_len as f64;
    let last = src_len as i64 - 1;
    let clamp = |i: i64| i.clamp(0, last) as usize;

    (0..dst_len)
        .map(|d| {
            let center = (d as f64 + 0.5) / scale;
            match interp {
                Interpolation::Nearest => vec![(clamp(center.floor() as i64), 1.0)],
                Interpolation::Bilinear => {
                    let s = center - 0.5;
                    let i0 = s.floor();
                    let f = s - i0;
                    let i0 = i0 as i64;
                    vec![(clamp(i0), 1.0 - f), (clamp(i0 + 1), f)]
                }
                Interpolation::Bicubic => {
                    let s = center - 0.5;
                    let i0 = s.floor();
                    let f = s - i0;
                    let i0 = i0 as i64;
                    (-1..=2)
                        .map(|k| (clamp(i0 + k), cubic_weight(f - k as f64)))
                        .collect()
                }
            }
        })
        .collect()
}

/// One direct scaling step; palette is carried for nearest sampling.
fn scale_step(
    src: &PixelBuffer,
    width: u32,
    height: u32,
    interp: Interpolation,
) -> TransformResult<PixelBuffer> {
    let xs = axis_taps(src.width(), width, interp);
    let ys = axis_taps(src.height(), height, interp);
    let bands = src.bands();
    let max = src.sample_type().max_value() as f64;

    let mut out = PixelBuffer::new(width, height, bands, src.sample_type())?.to_mut();
    if interp == Interpolation::Nearest {
        out.set_palette(src.palette().cloned())?;
    }

    for (y, ytaps) in ys.iter().enumerate() {
        for (x, xtaps) in xs.iter().enumerate() {
            for band in 0..bands {
                let value = if interp == Interpolation::Nearest {
                    src.sample_unchecked(xtaps[0].0 as u32, ytaps[0].0 as u32, band)
                } else {
                    let mut sum = 0.0;
                    for &(sy, wy) in ytaps {
                        for &(sx, wx) in xtaps {
                            sum += wy * wx * src.sample_unchecked(sx as u32, sy as u32, band) as f64;
                        }
                    }
                    sum.round().clamp(0.0, max) as u32
                };
                out.set_sample_unchecked(x as u32, y as u32, band, value);
            }
        }
    }

    Ok(out.into())
}

/// Scale with nearest, bilinear or bicubic interpolation.
///
/// Nearest sampling keeps indexed buffers indexed; the other modes expand
/// the palette first.
///
/// # Errors
///
/// Returns [`TransformError::InvalidDimensions`] if either target
/// dimension is zero.
pub fn fast_resample(
    src: &PixelBuffer,
    width: u32,
    height: u32,
    interp: Interpolation,
) -> TransformResult<PixelBuffer> {
    if width == 0 || height == 0 {
        return Err(TransformError::InvalidDimensions { width, height });
    }
    if interp == Interpolation::Nearest {
        return scale_step(src, width, height, interp);
    }

    let mut current = if src.is_indexed() {
        src.expand_palette()?
    } else {
        src.clone()
    };

    let (sw, sh) = (current.width(), current.height());
    if width < sw || height < sh {
        // Smallest power-of-two multiple of the target at least half the source.
        let mut w = width;
        while w < sw / 2 {
            w *= 2;
        }
        let mut h = height;
        while h < sh / 2 {
            h *= 2;
        }
        if (w, h) != (sw, sh) {
            current = scale_step(&current, w, h, Interpolation::Bilinear)?;
        }

        let mut halvings = 0u32;
        while current.width() > 2 * width || current.height() > 2 * height {
            let w = if current.width() > 2 * width {
                current.width() / 2
            } else {
                current.width()
            };
            let h = if current.height() > 2 * height {
                current.height() / 2
            } else {
                current.height()
            };
            current = scale_step(&current, w, h, Interpolation::Bilinear)?;
            halvings += 1;
        }
        tracing::trace!(
            from_width = sw,
            from_height = sh,
            via_width = current.width(),
            via_height = current.height(),
            halvings,
            "Progressive reduction"
        );
    }

    if (current.width(), current.height()) == (width, height) {
        return Ok(current);
    }
    scale_step(&current, width, height, interp)
}
