//! PixelBuffer - The main image container
//!
//! A `PixelBuffer` is a flat, row-major array of interleaved samples with a
//! declared sample type and band count.
//!
//! # Sample layout
//!
//! - Samples are stored interleaved: `(y * width + x) * bands + band`
//! - 1 band = gray, 2 = gray + alpha, 3 = RGB, 4 = RGBA
//! - A 1-band 8-bit buffer with an attached [`Palette`] is an indexed image;
//!   its samples are palette indices
//!
//! # Ownership model
//!
//! `PixelBuffer` uses `Arc` for cheap cloning (shared ownership).
//! To modify sample data, convert to `PixelBufferMut` via
//! [`PixelBuffer::try_into_mut`] or [`PixelBuffer::to_mut`], then convert
//! back with `Into<PixelBuffer>`.

mod access;
pub mod convert;

use crate::error::{Error, Result};
use crate::palette::Palette;
use std::sync::Arc;

/// Sample type (bits per sample)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SampleType {
    /// 8-bit unsigned samples
    U8,
    /// 16-bit unsigned samples
    U16,
}

impl SampleType {
    /// Number of bits per sample.
    #[inline]
    pub fn bits(self) -> u32 {
        match self {
            SampleType::U8 => 8,
            SampleType::U16 => 16,
        }
    }

    /// Largest representable sample value.
    #[inline]
    pub fn max_value(self) -> u32 {
        (1u32 << self.bits()) - 1
    }
}

/// Owned sample storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Samples {
    U8(Vec<u8>),
    U16(Vec<u16>),
}

impl Samples {
    fn zeroed(sample_type: SampleType, len: usize) -> Self {
        match sample_type {
            SampleType::U8 => Samples::U8(vec![0; len]),
            SampleType::U16 => Samples::U16(vec![0; len]),
        }
    }

    /// Sample type of this storage.
    #[inline]
    pub fn sample_type(&self) -> SampleType {
        match self {
            Samples::U8(_) => SampleType::U8,
            Samples::U16(_) => SampleType::U16,
        }
    }

    /// Number of samples.
    #[inline]
    pub fn len(&self) -> usize {
        match self {
            Samples::U8(v) => v.len(),
            Samples::U16(v) => v.len(),
        }
    }

    /// Check if empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Read the sample at a flat offset.
    ///
    /// # Panics
    ///
    /// Panics if `i` is out of range.
    #[inline]
    pub fn get(&self, i: usize) -> u32 {
        match self {
            Samples::U8(v) => v[i] as u32,
            Samples::U16(v) => v[i] as u32,
        }
    }

    /// Write the sample at a flat offset, truncating to the sample width.
    ///
    /// # Panics
    ///
    /// Panics if `i` is out of range.
    #[inline]
    pub fn set(&mut self, i: usize, val: u32) {
        match self {
            Samples::U8(v) => v[i] = val as u8,
            Samples::U16(v) => v[i] = val as u16,
        }
    }

    /// Borrow as 8-bit samples, if that is the storage type.
    pub fn as_u8(&self) -> Option<&[u8]> {
        match self {
            Samples::U8(v) => Some(v),
            Samples::U16(_) => None,
        }
    }

    /// Borrow as 16-bit samples, if that is the storage type.
    pub fn as_u16(&self) -> Option<&[u16]> {
        match self {
            Samples::U16(v) => Some(v),
            Samples::U8(_) => None,
        }
    }
}

/// Internal buffer data
#[derive(Debug, Clone)]
struct BufferData {
    width: u32,
    height: u32,
    bands: u32,
    samples: Samples,
    palette: Option<Palette>,
}

impl BufferData {
    fn check_geometry(width: u32, height: u32, bands: u32) -> Result<usize> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        if !(1..=4).contains(&bands) {
            return Err(Error::InvalidBands(bands));
        }
        Ok(width as usize * height as usize * bands as usize)
    }

    fn check_palette(&self, palette: &Option<Palette>) -> Result<()> {
        if palette.is_some() && (self.bands != 1 || self.samples.sample_type() != SampleType::U8)
        {
            return Err(Error::PaletteNotAllowed {
                bands: self.bands,
                bits: self.samples.sample_type().bits(),
            });
        }
        Ok(())
    }
}

/// PixelBuffer - Main image container
///
/// # Examples
///
/// ```
/// use rasterop_core::{PixelBuffer, SampleType};
///
/// // Create a new 8-bit RGB buffer
/// let buf = PixelBuffer::new(640, 480, 3, SampleType::U8).unwrap();
/// assert_eq!(buf.width(), 640);
/// assert_eq!(buf.height(), 480);
/// ```
#[derive(Debug, Clone)]
pub struct PixelBuffer {
    inner: Arc<BufferData>,
}

impl PixelBuffer {
    /// Create a new zero-filled buffer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0 and
    /// [`Error::InvalidBands`] unless `1 <= bands <= 4`.
    pub fn new(width: u32, height: u32, bands: u32, sample_type: SampleType) -> Result<Self> {
        let len = BufferData::check_geometry(width, height, bands)?;
        Ok(Self::from_data(BufferData {
            width,
            height,
            bands,
            samples: Samples::zeroed(sample_type, len),
            palette: None,
        }))
    }

    /// Wrap existing 8-bit samples.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LengthMismatch`] if `data.len() != width * height * bands`.
    pub fn from_u8(width: u32, height: u32, bands: u32, data: Vec<u8>) -> Result<Self> {
        Self::from_samples(width, height, bands, Samples::U8(data))
    }

    /// Wrap existing 16-bit samples.
    pub fn from_u16(width: u32, height: u32, bands: u32, data: Vec<u16>) -> Result<Self> {
        Self::from_samples(width, height, bands, Samples::U16(data))
    }

    /// Wrap existing sample storage.
    pub fn from_samples(width: u32, height: u32, bands: u32, samples: Samples) -> Result<Self> {
        let expected = BufferData::check_geometry(width, height, bands)?;
        if samples.len() != expected {
            return Err(Error::LengthMismatch {
                expected,
                actual: samples.len(),
            });
        }
        Ok(Self::from_data(BufferData {
            width,
            height,
            bands,
            samples,
            palette: None,
        }))
    }

    /// Create an indexed buffer (all indices 0) carrying `palette`.
    pub fn new_indexed(width: u32, height: u32, palette: Palette) -> Result<Self> {
        if palette.is_empty() {
            return Err(Error::InvalidParameter("palette is empty".into()));
        }
        let mut buf = Self::new(width, height, 1, SampleType::U8)?.to_mut();
        buf.set_palette(Some(palette))?;
        Ok(buf.into())
    }

    fn from_data(data: BufferData) -> Self {
        PixelBuffer {
            inner: Arc::new(data),
        }
    }

    /// Width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Samples per pixel.
    #[inline]
    pub fn bands(&self) -> u32 {
        self.inner.bands
    }

    /// Sample type.
    #[inline]
    pub fn sample_type(&self) -> SampleType {
        self.inner.samples.sample_type()
    }

    /// Attached palette, if this is an indexed buffer.
    #[inline]
    pub fn palette(&self) -> Option<&Palette> {
        self.inner.palette.as_ref()
    }

    /// Check whether this buffer is indexed.
    #[inline]
    pub fn is_indexed(&self) -> bool {
        self.inner.palette.is_some()
    }

    /// Check whether pixels carry alpha.
    ///
    /// Indexed buffers have alpha when the palette marks a transparent entry
    /// or holds a non-opaque color.
    pub fn has_alpha(&self) -> bool {
        match &self.inner.palette {
            Some(pal) => {
                pal.transparent_index().is_some() || pal.entries().iter().any(|c| c.alpha != 255)
            }
            None => self.inner.bands == 2 || self.inner.bands == 4,
        }
    }

    /// Raw sample storage.
    #[inline]
    pub fn samples(&self) -> &Samples {
        &self.inner.samples
    }

    /// Number of strong references to the shared data.
    pub fn ref_count(&self) -> usize {
        Arc::strong_count(&self.inner)
    }

    /// Check if two buffers have the same width, height, bands and sample type.
    pub fn sizes_equal(&self, other: &PixelBuffer) -> bool {
        self.inner.width == other.inner.width
            && self.inner.height == other.inner.height
            && self.inner.bands == other.inner.bands
            && self.sample_type() == other.sample_type()
    }

    /// Create a zero-filled buffer with the same geometry and palette.
    pub fn create_template(&self) -> Self {
        Self::from_data(BufferData {
            width: self.inner.width,
            height: self.inner.height,
            bands: self.inner.bands,
            samples: Samples::zeroed(self.sample_type(), self.inner.samples.len()),
            palette: self.inner.palette.clone(),
        })
    }

    /// Create a completely independent copy.
    pub fn deep_clone(&self) -> Self {
        Self::from_data((*self.inner).clone())
    }

    /// Try to get mutable access to the sample data.
    ///
    /// Succeeds only if there is exactly one reference to the data.
    pub fn try_into_mut(self) -> std::result::Result<PixelBufferMut, Self> {
        match Arc::try_unwrap(self.inner) {
            Ok(data) => Ok(PixelBufferMut { inner: data }),
            Err(arc) => Err(PixelBuffer { inner: arc }),
        }
    }

    /// Create a mutable copy of this buffer.
    pub fn to_mut(&self) -> PixelBufferMut {
        PixelBufferMut {
            inner: (*self.inner).clone(),
        }
    }

    #[inline]
    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.inner.width as usize + x as usize) * self.inner.bands as usize
    }
}

/// Mutable PixelBuffer
///
/// Allows modification of sample data. Convert back to an immutable
/// [`PixelBuffer`] using `Into<PixelBuffer>`.
#[derive(Debug)]
pub struct PixelBufferMut {
    inner: BufferData,
}

impl PixelBufferMut {
    /// Width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Samples per pixel.
    #[inline]
    pub fn bands(&self) -> u32 {
        self.inner.bands
    }

    /// Sample type.
    #[inline]
    pub fn sample_type(&self) -> SampleType {
        self.inner.samples.sample_type()
    }

    /// Attached palette.
    #[inline]
    pub fn palette(&self) -> Option<&Palette> {
        self.inner.palette.as_ref()
    }

    /// Attach or remove a palette.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PaletteNotAllowed`] unless the buffer is 1-band 8-bit.
    pub fn set_palette(&mut self, palette: Option<Palette>) -> Result<()> {
        self.inner.check_palette(&palette)?;
        self.inner.palette = palette;
        Ok(())
    }

    /// Raw sample storage.
    #[inline]
    pub fn samples(&self) -> &Samples {
        &self.inner.samples
    }

    /// Mutable raw sample storage.
    #[inline]
    pub fn samples_mut(&mut self) -> &mut Samples {
        &mut self.inner.samples
    }

    #[inline]
    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.inner.width as usize + x as usize) * self.inner.bands as usize
    }
}

impl From<PixelBufferMut> for PixelBuffer {
    fn from(buf: PixelBufferMut) -> Self {
        PixelBuffer::from_data(buf.inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::Rgba;

    #[test]
    fn test_new_rejects_bad_geometry() {
        assert_eq!(
            PixelBuffer::new(0, 4, 3, SampleType::U8).unwrap_err(),
            Error::InvalidDimension {
                width: 0,
                height: 4
            }
        );
        assert_eq!(
            PixelBuffer::new(4, 4, 5, SampleType::U8).unwrap_err(),
            Error::InvalidBands(5)
        );
    }

    #[test]
    fn test_from_u8_length_mismatch() {
        let err = PixelBuffer::from_u8(2, 2, 3, vec![0; 11]).unwrap_err();
        assert_eq!(
            err,
            Error::LengthMismatch {
                expected: 12,
                actual: 11
            }
        );
    }

    #[test]
    fn test_sample_type_range() {
        assert_eq!(SampleType::U8.max_value(), 255);
        assert_eq!(SampleType::U16.max_value(), 65535);
    }

    #[test]
    fn test_try_into_mut_shared() {
        let buf = PixelBuffer::new(2, 2, 1, SampleType::U8).unwrap();
        let other = buf.clone();
        assert_eq!(buf.ref_count(), 2);
        let buf = buf.try_into_mut().unwrap_err();
        drop(other);
        assert!(buf.try_into_mut().is_ok());
    }

    #[test]
    fn test_palette_only_on_indexed_layout() {
        let mut rgb = PixelBuffer::new(2, 2, 3, SampleType::U8).unwrap().to_mut();
        assert!(rgb.set_palette(Some(Palette::monochrome())).is_err());

        let mut gray16 = PixelBuffer::new(2, 2, 1, SampleType::U16).unwrap().to_mut();
        assert!(gray16.set_palette(Some(Palette::monochrome())).is_err());

        let indexed = PixelBuffer::new_indexed(2, 2, Palette::monochrome()).unwrap();
        assert!(indexed.is_indexed());
        assert!(!indexed.has_alpha());
    }

    #[test]
    fn test_has_alpha() {
        let rgba = PixelBuffer::new(1, 1, 4, SampleType::U8).unwrap();
        assert!(rgba.has_alpha());
        let mut pal = Palette::monochrome();
        pal.push(Rgba::TRANSPARENT).unwrap();
        pal.set_transparent_index(Some(2)).unwrap();
        let indexed = PixelBuffer::new_indexed(1, 1, pal).unwrap();
        assert!(indexed.has_alpha());
    }

    #[test]
    fn test_create_template_keeps_palette() {
        let indexed = PixelBuffer::new_indexed(3, 2, Palette::monochrome()).unwrap();
        let t = indexed.create_template();
        assert!(t.sizes_equal(&indexed));
        assert_eq!(t.palette(), indexed.palette());
    }
}
