//! Layout conversions
//!
//! Conversions between sample types, band counts and indexed/truecolor
//! representations:
//!
//! - [`PixelBuffer::to_u8`] - 16-bit to 8-bit by high byte
//! - [`PixelBuffer::expand_palette`] - indexed to RGB / RGBA
//! - [`PixelBuffer::to_rgb`] / [`PixelBuffer::to_rgba`] - any layout to 8-bit truecolor
//! - [`PixelBuffer::to_truecolor`] - RGB or RGBA depending on [`PixelBuffer::has_alpha`]
//! - [`PixelBuffer::composite_over`] - flatten alpha onto a matte color
//! - [`PixelBuffer::to_grayscale`] - 8-bit luma

use super::{BufferData, PixelBuffer, SampleType, Samples};
use crate::color;
use crate::error::{Error, Result};
use crate::palette::Rgba;

impl PixelBuffer {
    /// Reduce 16-bit samples to 8 bits by keeping the high byte.
    ///
    /// 8-bit buffers are returned as a shared clone.
    pub fn to_u8(&self) -> PixelBuffer {
        match self.samples() {
            Samples::U8(_) => self.clone(),
            Samples::U16(data) => {
                let reduced = data.iter().map(|&v| (v >> 8) as u8).collect();
                PixelBuffer::from_data(BufferData {
                    width: self.width(),
                    height: self.height(),
                    bands: self.bands(),
                    samples: Samples::U8(reduced),
                    palette: None,
                })
            }
        }
    }

    /// Expand an indexed buffer to truecolor.
    ///
    /// The result has 4 bands when the palette carries alpha, 3 otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PaletteRequired`] if the buffer is not indexed.
    pub fn expand_palette(&self) -> Result<PixelBuffer> {
        if !self.is_indexed() {
            return Err(Error::PaletteRequired);
        }
        tracing::trace!(
            width = self.width(),
            height = self.height(),
            alpha = self.has_alpha(),
            "Expanding palette to truecolor"
        );
        if self.has_alpha() {
            self.to_rgba()
        } else {
            self.to_rgb()
        }
    }

    /// Convert any layout to 8-bit RGB.
    pub fn to_rgb(&self) -> Result<PixelBuffer> {
        self.map_argb(3, |argb, out| {
            out[0] = color::red(argb);
            out[1] = color::green(argb);
            out[2] = color::blue(argb);
        })
    }

    /// Convert any layout to 8-bit RGBA.
    pub fn to_rgba(&self) -> Result<PixelBuffer> {
        self.map_argb(4, |argb, out| {
            out[0] = color::red(argb);
            out[1] = color::green(argb);
            out[2] = color::blue(argb);
            out[3] = color::alpha(argb);
        })
    }

    /// Convert to 8-bit RGBA if the buffer has alpha, 8-bit RGB otherwise.
    ///
    /// 8-bit RGB and RGBA buffers are returned as a shared clone.
    pub fn to_truecolor(&self) -> Result<PixelBuffer> {
        if self.sample_type() == SampleType::U8 && !self.is_indexed() && self.bands() >= 3 {
            return Ok(self.clone());
        }
        if self.has_alpha() {
            self.to_rgba()
        } else {
            self.to_rgb()
        }
    }

    /// Blend every pixel onto an opaque `matte` color.
    ///
    /// The result is 8-bit RGB.
    pub fn composite_over(&self, matte: Rgba) -> Result<PixelBuffer> {
        self.map_argb(3, |argb, out| {
            let a = color::alpha(argb) as u32;
            let blend = |c: u8, m: u8| ((c as u32 * a + m as u32 * (255 - a) + 127) / 255) as u8;
            out[0] = blend(color::red(argb), matte.red);
            out[1] = blend(color::green(argb), matte.green);
            out[2] = blend(color::blue(argb), matte.blue);
        })
    }

    /// Convert to 8-bit gray using `0.299 R + 0.587 G + 0.114 B`.
    pub fn to_grayscale(&self) -> Result<PixelBuffer> {
        self.map_argb(1, |argb, out| {
            out[0] = color::luma(argb);
        })
    }

    fn map_argb<F>(&self, bands: u32, mut f: F) -> Result<PixelBuffer>
    where
        F: FnMut(u32, &mut [u8]),
    {
        let (w, h) = (self.width(), self.height());
        let n = bands as usize;
        let mut data = vec![0u8; w as usize * h as usize * n];
        for y in 0..h {
            for x in 0..w {
                let i = (y as usize * w as usize + x as usize) * n;
                f(self.argb_unchecked(x, y), &mut data[i..i + n]);
            }
        }
        PixelBuffer::from_u8(w, h, bands, data)
    }
}
