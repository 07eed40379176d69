//! Separable resampling
//!
//! Rescales a buffer with a selectable [`FilterType`] in two 1-D passes:
//! rows into an intermediate buffer of the target width, then columns into
//! the target height. Every band is filtered independently and each pass
//! rounds and clamps to the sample range.
//!
//! # Path selection
//!
//! 1. Point, triangle and quadratic filters use [`fast_resample`]
//!    (nearest, bilinear and bicubic) unless the fast path is disabled.
//! 2. If either image is no larger than the filter support, bilinear
//!    [`fast_resample`] is used instead of the filter.
//! 3. A configured [`ResampleAccelerator`] is offered the job.
//! 4. The separable filter runs.

use crate::accelerator::{ResampleAccelerator, try_accelerate};
use crate::contrib::contribution_table;
use crate::error::{TransformError, TransformResult};
use crate::fast::{Interpolation, fast_resample};
use crate::filter::FilterType;
use rasterop_core::{ImageOp, PixelBuffer};
use std::fmt;
use std::sync::Arc;

/// Resample to a fixed size with a chosen filter.
///
/// ```ignore
/// let op = ResampleOp::new(320, 240)?.filter(FilterType::Mitchell);
/// let small = op.apply(&image)?;
/// ```
#[derive(Clone)]
pub struct ResampleOp {
    width: u32,
    height: u32,
    filter: FilterType,
    fast_path: bool,
    accelerator: Option<Arc<dyn ResampleAccelerator>>,
}

impl fmt::Debug for ResampleOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResampleOp")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("filter", &self.filter)
            .field("fast_path", &self.fast_path)
            .field("accelerator", &self.accelerator.as_ref().map(|a| a.name()))
            .finish()
    }
}

impl ResampleOp {
    /// Target `width` x `height` with the default filter.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::InvalidDimensions`] if either is zero.
    pub fn new(width: u32, height: u32) -> TransformResult<Self> {
        if width == 0 || height == 0 {
            return Err(TransformError::InvalidDimensions { width, height });
        }
        Ok(Self {
            width,
            height,
            filter: FilterType::Undefined,
            fast_path: true,
            accelerator: None,
        })
    }

    /// Set the filter kernel.
    pub fn filter(mut self, filter: impl Into<FilterType>) -> Self {
        self.filter = filter.into();
        self
    }

    /// Allow or forbid the nearest / bilinear / bicubic shortcut.
    pub fn fast_path(mut self, enabled: bool) -> Self {
        self.fast_path = enabled;
        self
    }

    /// Offer every resample to `accelerator` first.
    pub fn accelerator(mut self, accelerator: Arc<dyn ResampleAccelerator>) -> Self {
        self.accelerator = Some(accelerator);
        self
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Filter after resolving [`FilterType::Undefined`]
    pub fn filter_type(&self) -> FilterType {
        self.filter.resolve()
    }

    /// Resample `src` to the configured size.
    pub fn resample(&self, src: &PixelBuffer) -> TransformResult<PixelBuffer> {
        let (width, height) = (self.width, self.height);
        let filter = self.filter.resolve();

        if self.fast_path {
            let interp = match filter {
                FilterType::Point => Some(Interpolation::Nearest),
                FilterType::Triangle => Some(Interpolation::Bilinear),
                FilterType::Quadratic => Some(Interpolation::Bicubic),
                _ => None,
            };
            if let Some(interp) = interp {
                tracing::debug!(%filter, ?interp, width, height, "Resample via fast path");
                return fast_resample(src, width, height, interp);
            }
        }

        let support = filter.support();
        let src_min = src.width().min(src.height()) as f64;
        let dst_min = width.min(height) as f64;
        if src_min <= support || dst_min <= support {
            tracing::debug!(
                %filter,
                support,
                src_width = src.width(),
                src_height = src.height(),
                width,
                height,
                "Image smaller than filter support, using bilinear"
            );
            return fast_resample(src, width, height, Interpolation::Bilinear);
        }

        if let Some(accelerator) = &self.accelerator {
            if let Some(out) = try_accelerate(accelerator.as_ref(), src, width, height, filter) {
                return Ok(out);
            }
        }

        let expanded;
        let input = if src.is_indexed() && filter != FilterType::Point {
            expanded = src.expand_palette()?;
            &expanded
        } else {
            src
        };
        tracing::debug!(%filter, width, height, "Resample via separable filter");
        separable(input, width, height, filter)
    }
}

impl ImageOp for ResampleOp {
    type Error = TransformError;

    fn apply(&self, src: &PixelBuffer) -> TransformResult<PixelBuffer> {
        self.resample(src)
    }
}

/// Resample `src` to `width` x `height` with `filter`.
///
/// # Errors
///
/// Returns [`TransformError::InvalidDimensions`] if either target
/// dimension is zero.
pub fn resample(
    src: &PixelBuffer,
    width: u32,
    height: u32,
    filter: FilterType,
) -> TransformResult<PixelBuffer> {
    ResampleOp::new(width, height)?.filter(filter).resample(src)
}

/// Two-pass filter: horizontal into `width x src.height()`, then vertical.
fn separable(
    src: &PixelBuffer,
    width: u32,
    height: u32,
    filter: FilterType,
) -> TransformResult<PixelBuffer> {
    let (sw, sh) = (src.width(), src.height());
    let bands = src.bands() as usize;
    let max = src.sample_type().max_value();
    let samples = src.samples();

    let xs = contribution_table(sw, width, filter);
    let ys = contribution_table(sh, height, filter);

    let w = width as usize;
    let mut tmp = vec![0u32; w * sh as usize * bands];
    for y in 0..sh as usize {
        let row = y * sw as usize * bands;
        for (x, list) in xs.iter().enumerate() {
            for b in 0..bands {
                tmp[(y * w + x) * bands + b] = list.apply(max, |i| samples.get(row + i * bands + b));
            }
        }
    }

    let mut out = PixelBuffer::new(width, height, src.bands(), src.sample_type())?.to_mut();
    out.set_palette(src.palette().cloned())?;
    let dst = out.samples_mut();
    for (y, list) in ys.iter().enumerate() {
        for x in 0..w {
            for b in 0..bands {
                let v = list.apply(max, |i| tmp[(i * w + x) * bands + b]);
                dst.set((y * w + x) * bands + b, v);
            }
        }
    }

    Ok(out.into())
}
