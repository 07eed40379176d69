//! Synthetic test images
//!
//! Deterministic builders for the buffers used across the regression tests.
//! Colors are given as packed `0x..RRGGBB` values.

use crate::error::{TestError, TestResult};
use rasterop_core::{PixelBuffer, Samples, color};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn rgb_from_fn<F>(name: &'static str, width: u32, height: u32, f: F) -> TestResult<PixelBuffer>
where
    F: Fn(u32, u32) -> u32,
{
    let mut data = Vec::with_capacity(width as usize * height as usize * 3);
    for y in 0..height {
        for x in 0..width {
            let (r, g, b) = color::extract_rgb(f(x, y));
            data.extend_from_slice(&[r, g, b]);
        }
    }
    PixelBuffer::from_u8(width, height, 3, data)
        .map_err(|source| TestError::ImageBuild { name, source })
}

/// Uniform 8-bit RGB image.
pub fn solid_rgb(width: u32, height: u32, rgb: u32) -> TestResult<PixelBuffer> {
    rgb_from_fn("solid_rgb", width, height, |_, _| rgb)
}

/// Uniform image with arbitrary bands and sample type.
pub fn solid(width: u32, height: u32, samples: Samples, bands: u32) -> TestResult<PixelBuffer> {
    PixelBuffer::from_samples(width, height, bands, samples).map_err(|source| {
        TestError::ImageBuild {
            name: "solid",
            source,
        }
    })
}

/// Uniform 16-bit image with every sample set to `value`.
pub fn solid_u16(width: u32, height: u32, bands: u32, value: u16) -> TestResult<PixelBuffer> {
    let len = width as usize * height as usize * bands as usize;
    solid(width, height, Samples::U16(vec![value; len]), bands)
}

/// Checkerboard of `cell`-sized squares alternating between two colors,
/// starting with `a` at the origin.
pub fn checkerboard(width: u32, height: u32, cell: u32, a: u32, b: u32) -> TestResult<PixelBuffer> {
    let cell = cell.max(1);
    rgb_from_fn("checkerboard", width, height, |x, y| {
        if (x / cell + y / cell) % 2 == 0 { a } else { b }
    })
}

/// Left half `left`, right half `right`.
pub fn two_color_split(width: u32, height: u32, left: u32, right: u32) -> TestResult<PixelBuffer> {
    rgb_from_fn("two_color_split", width, height, |x, _| {
        if x < width / 2 { left } else { right }
    })
}

/// Smooth RGB gradient: red grows with x, green with y, blue along the diagonal.
pub fn gradient_rgb(width: u32, height: u32) -> TestResult<PixelBuffer> {
    let wmax = width.saturating_sub(1).max(1);
    let hmax = height.saturating_sub(1).max(1);
    rgb_from_fn("gradient_rgb", width, height, |x, y| {
        let r = (x * 255 / wmax) as u8;
        let g = (y * 255 / hmax) as u8;
        let b = ((x + y) * 255 / (wmax + hmax)) as u8;
        color::compose_rgb(r, g, b)
    })
}

/// Horizontal 8-bit gray ramp.
pub fn gray_ramp(width: u32, height: u32) -> TestResult<PixelBuffer> {
    let wmax = width.saturating_sub(1).max(1);
    let mut data = Vec::with_capacity(width as usize * height as usize);
    for _ in 0..height {
        for x in 0..width {
            data.push((x * 255 / wmax) as u8);
        }
    }
    PixelBuffer::from_u8(width, height, 1, data).map_err(|source| TestError::ImageBuild {
        name: "gray_ramp",
        source,
    })
}

/// Uniformly random RGB noise from a fixed seed.
pub fn noise_rgb(width: u32, height: u32, seed: u64) -> TestResult<PixelBuffer> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut data = vec![0u8; width as usize * height as usize * 3];
    rng.fill(&mut data[..]);
    PixelBuffer::from_u8(width, height, 3, data).map_err(|source| TestError::ImageBuild {
        name: "noise_rgb",
        source,
    })
}

/// RGBA image of one color whose left half is fully transparent.
pub fn half_transparent(width: u32, height: u32, rgb: u32) -> TestResult<PixelBuffer> {
    let (r, g, b) = color::extract_rgb(rgb);
    let mut data = Vec::with_capacity(width as usize * height as usize * 4);
    for _ in 0..height {
        for x in 0..width {
            let a = if x < width / 2 { 0 } else { 255 };
            data.extend_from_slice(&[r, g, b, a]);
        }
    }
    PixelBuffer::from_u8(width, height, 4, data).map_err(|source| TestError::ImageBuild {
        name: "half_transparent",
        source,
    })
}

/// Number of distinct RGB colors in a buffer.
pub fn distinct_colors(buf: &PixelBuffer) -> usize {
    let mut seen = std::collections::HashSet::new();
    for y in 0..buf.height() {
        for x in 0..buf.width() {
            seen.insert(buf.argb_unchecked(x, y) & color::RGB_MASK);
        }
    }
    seen.len()
}

/// Mean of every sample in one band.
pub fn band_mean(buf: &PixelBuffer, band: u32) -> f64 {
    let mut sum = 0.0;
    for y in 0..buf.height() {
        for x in 0..buf.width() {
            sum += buf.sample_unchecked(x, y, band) as f64;
        }
    }
    sum / (buf.width() as f64 * buf.height() as f64)
}
