//! Pluggable resample acceleration
//!
//! A [`ResampleAccelerator`] is consulted by [`crate::ResampleOp`] before the
//! built-in separable filter runs. It may decline (`Ok(None)`), succeed, or
//! fail; a failure or a result of the wrong size is logged and the
//! built-in path takes over, so an accelerator can never make a resample
//! fail.

use crate::error::TransformResult;
use crate::filter::FilterType;
use rasterop_core::PixelBuffer;

/// Optional external resampling backend
pub trait ResampleAccelerator: Send + Sync {
    /// Short name used in log output
    fn name(&self) -> &str;

    /// Resample `src` to `width` x `height` with `filter`.
    ///
    /// Return `Ok(None)` to decline, for example for an unsupported layout.
    fn resample(
        &self,
        src: &PixelBuffer,
        width: u32,
        height: u32,
        filter: FilterType,
    ) -> TransformResult<Option<PixelBuffer>>;
}

/// Ask `accelerator` for a result, swallowing failures.
pub(crate) fn try_accelerate(
    accelerator: &dyn ResampleAccelerator,
    src: &PixelBuffer,
    width: u32,
    height: u32,
    filter: FilterType,
) -> Option<PixelBuffer> {
    match accelerator.resample(src, width, height, filter) {
        Ok(Some(out)) if out.width() == width && out.height() == height => {
            tracing::debug!(accelerator = accelerator.name(), %filter, "Accelerated resample");
            Some(out)
        }
        Ok(Some(out)) => {
            tracing::warn!(
                accelerator = accelerator.name(),
                expected_width = width,
                expected_height = height,
                actual_width = out.width(),
                actual_height = out.height(),
                "Accelerator returned wrong size, using built-in filter"
            );
            None
        }
        Ok(None) => {
            tracing::trace!(accelerator = accelerator.name(), %filter, "Accelerator declined");
            None
        }
        Err(e) => {
            tracing::warn!(
                accelerator = accelerator.name(),
                error = %e,
                "Accelerator failed, using built-in filter"
            );
            None
        }
    }
}
