//! Pixel access functions
//!
//! Per-sample and per-pixel getters and setters. Checked variants return
//! `Option` / `Result`; `_unchecked` variants panic on out-of-range
//! coordinates and are meant for inner loops that have already validated
//! their bounds.
//!
//! # Packed colors
//!
//! [`PixelBuffer::argb`] converts any layout to a packed `0xAARRGGBB`
//! value: gray is replicated, 16-bit samples are reduced to their high
//! byte, indexed samples are looked up through the palette and a missing
//! alpha band reads as opaque.

use super::{PixelBuffer, PixelBufferMut, SampleType};
use crate::color;
use crate::error::{Error, Result};
use crate::palette::Palette;

/// Reduce one sample to 8 bits.
#[inline]
fn to_byte(val: u32, sample_type: SampleType) -> u8 {
    match sample_type {
        SampleType::U8 => val as u8,
        SampleType::U16 => (val >> 8) as u8,
    }
}

/// Pack the samples of one pixel into `0xAARRGGBB`.
#[inline]
fn pack_argb(px: &[u32], sample_type: SampleType, palette: Option<&Palette>) -> u32 {
    if let Some(pal) = palette {
        return pal
            .argb(px[0] as usize)
            .unwrap_or(color::compose_rgb(0, 0, 0));
    }
    let b = |i: usize| to_byte(px[i], sample_type);
    match px.len() {
        1 => color::compose_rgb(b(0), b(0), b(0)),
        2 => color::compose_argb(b(0), b(0), b(0), b(1)),
        3 => color::compose_rgb(b(0), b(1), b(2)),
        _ => color::compose_argb(b(0), b(1), b(2), b(3)),
    }
}

impl PixelBuffer {
    /// Get one sample at (x, y, band).
    ///
    /// Returns `None` if the coordinates or band are out of bounds.
    pub fn sample(&self, x: u32, y: u32, band: u32) -> Option<u32> {
        if x >= self.width() || y >= self.height() || band >= self.bands() {
            return None;
        }
        Some(self.sample_unchecked(x, y, band))
    }

    /// Get one sample without bounds checking.
    ///
    /// # Panics
    ///
    /// Panics if the sample lies outside the buffer.
    #[inline]
    pub fn sample_unchecked(&self, x: u32, y: u32, band: u32) -> u32 {
        self.inner.samples.get(self.offset(x, y) + band as usize)
    }

    /// Copy all samples of the pixel at (x, y) into `out`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] for bad coordinates and
    /// [`Error::IncompatibleBands`] if `out.len() != bands`.
    pub fn pixel(&self, x: u32, y: u32, out: &mut [u32]) -> Result<()> {
        self.check_xy(x, y)?;
        if out.len() != self.bands() as usize {
            return Err(Error::IncompatibleBands(self.bands(), out.len() as u32));
        }
        let base = self.offset(x, y);
        for (band, slot) in out.iter_mut().enumerate() {
            *slot = self.inner.samples.get(base + band);
        }
        Ok(())
    }

    /// Get the pixel at (x, y) as packed `0xAARRGGBB`.
    pub fn argb(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        Some(self.argb_unchecked(x, y))
    }

    /// Get the pixel at (x, y) as packed `0xAARRGGBB` without bounds checking.
    #[inline]
    pub fn argb_unchecked(&self, x: u32, y: u32) -> u32 {
        let base = self.offset(x, y);
        let mut px = [0u32; 4];
        let n = self.bands() as usize;
        for (band, slot) in px[..n].iter_mut().enumerate() {
            *slot = self.inner.samples.get(base + band);
        }
        pack_argb(&px[..n], self.sample_type(), self.palette())
    }

    /// Get RGB values at (x, y).
    pub fn rgb(&self, x: u32, y: u32) -> Option<(u8, u8, u8)> {
        self.argb(x, y).map(color::extract_rgb)
    }

    /// Borrow one row of 8-bit samples.
    ///
    /// Returns `None` for 16-bit buffers or an out-of-range row.
    pub fn row_u8(&self, y: u32) -> Option<&[u8]> {
        if y >= self.height() {
            return None;
        }
        let stride = self.width() as usize * self.bands() as usize;
        let start = y as usize * stride;
        self.inner
            .samples
            .as_u8()
            .map(|data| &data[start..start + stride])
    }

    fn check_xy(&self, x: u32, y: u32) -> Result<()> {
        if x >= self.width() {
            return Err(Error::IndexOutOfBounds {
                index: x as usize,
                len: self.width() as usize,
            });
        }
        if y >= self.height() {
            return Err(Error::IndexOutOfBounds {
                index: y as usize,
                len: self.height() as usize,
            });
        }
        Ok(())
    }
}

impl PixelBufferMut {
    /// Get one sample at (x, y, band).
    pub fn sample(&self, x: u32, y: u32, band: u32) -> Option<u32> {
        if x >= self.width() || y >= self.height() || band >= self.bands() {
            return None;
        }
        Some(self.inner.samples.get(self.offset(x, y) + band as usize))
    }

    /// Set one sample at (x, y, band).
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] for bad coordinates or band and
    /// [`Error::InvalidParameter`] if `val` exceeds the sample range.
    pub fn set_sample(&mut self, x: u32, y: u32, band: u32, val: u32) -> Result<()> {
        self.check_xy(x, y)?;
        if band >= self.bands() {
            return Err(Error::IndexOutOfBounds {
                index: band as usize,
                len: self.bands() as usize,
            });
        }
        let max = self.sample_type().max_value();
        if val > max {
            return Err(Error::InvalidParameter(format!(
                "sample value {val} exceeds {max}"
            )));
        }
        self.set_sample_unchecked(x, y, band, val);
        Ok(())
    }

    /// Set one sample without bounds or range checking.
    ///
    /// # Panics
    ///
    /// Panics if the sample lies outside the buffer.
    #[inline]
    pub fn set_sample_unchecked(&mut self, x: u32, y: u32, band: u32, val: u32) {
        let i = self.offset(x, y) + band as usize;
        self.inner.samples.set(i, val);
    }

    /// Set all samples of the pixel at (x, y).
    pub fn set_pixel(&mut self, x: u32, y: u32, px: &[u32]) -> Result<()> {
        if px.len() != self.bands() as usize {
            return Err(Error::IncompatibleBands(self.bands(), px.len() as u32));
        }
        for (band, &val) in px.iter().enumerate() {
            self.set_sample(x, y, band as u32, val)?;
        }
        Ok(())
    }

    /// Set an RGB pixel at (x, y).
    ///
    /// Only valid for 8-bit buffers with 3 or 4 bands; alpha, if present,
    /// is set to opaque.
    pub fn set_rgb(&mut self, x: u32, y: u32, r: u8, g: u8, b: u8) -> Result<()> {
        self.check_truecolor()?;
        self.check_xy(x, y)?;
        let base = self.offset(x, y);
        let samples = &mut self.inner.samples;
        samples.set(base, r as u32);
        samples.set(base + 1, g as u32);
        samples.set(base + 2, b as u32);
        if self.inner.bands == 4 {
            samples.set(base + 3, 255);
        }
        Ok(())
    }

    /// Set a pixel from a packed `0xAARRGGBB` value.
    ///
    /// Only valid for 8-bit buffers with 3 or 4 bands; alpha is dropped for
    /// 3-band buffers.
    pub fn set_argb(&mut self, x: u32, y: u32, argb: u32) -> Result<()> {
        self.check_truecolor()?;
        self.check_xy(x, y)?;
        let base = self.offset(x, y);
        let bands = self.inner.bands;
        let samples = &mut self.inner.samples;
        samples.set(base, color::red(argb) as u32);
        samples.set(base + 1, color::green(argb) as u32);
        samples.set(base + 2, color::blue(argb) as u32);
        if bands == 4 {
            samples.set(base + 3, color::alpha(argb) as u32);
        }
        Ok(())
    }

    /// Fill every pixel with the same samples.
    pub fn fill(&mut self, px: &[u32]) -> Result<()> {
        if px.len() != self.bands() as usize {
            return Err(Error::IncompatibleBands(self.bands(), px.len() as u32));
        }
        let n = px.len();
        let samples = &mut self.inner.samples;
        for i in 0..samples.len() {
            samples.set(i, px[i % n]);
        }
        Ok(())
    }

    fn check_truecolor(&self) -> Result<()> {
        if self.sample_type() != SampleType::U8 || self.bands() < 3 {
            return Err(Error::UnsupportedLayout(format!(
                "expected 8-bit RGB or RGBA, got {} bands of {} bits",
                self.bands(),
                self.sample_type().bits()
            )));
        }
        Ok(())
    }

    fn check_xy(&self, x: u32, y: u32) -> Result<()> {
        if x >= self.width() {
            return Err(Error::IndexOutOfBounds {
                index: x as usize,
                len: self.width() as usize,
            });
        }
        if y >= self.height() {
            return Err(Error::IndexOutOfBounds {
                index: y as usize,
                len: self.height() as usize,
            });
        }
        Ok(())
    }
}
