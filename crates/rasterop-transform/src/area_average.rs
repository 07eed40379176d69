//! Area-average scaling
//!
//! Each destination pixel is the truncated mean of the source block it
//! covers: `[x * sw / w, (x + 1) * sw / w)` horizontally and likewise
//! vertically, widened to at least one pixel. Cheap and alias-free for
//! integer-ish reductions; upscaling degenerates to block replication.

use crate::error::{TransformError, TransformResult};
use rasterop_core::{ImageOp, PixelBuffer};

/// Block boundaries `[start, end)` along one axis.
fn spans(src_len: u32, dst_len: u32) -> Vec<(usize, usize)> {
    let (s, d) = (src_len as u64, dst_len as u64);
    (0..d)
        .map(|i| {
            let start = i * s / d;
            let end = ((i + 1) * s / d).max(start + 1).min(s);
            (start as usize, end as usize)
        })
        .collect()
}

/// Scale by averaging source blocks.
///
/// Indexed buffers are expanded to truecolor first.
///
/// # Errors
///
/// Returns [`TransformError::InvalidDimensions`] if either target
/// dimension is zero.
pub fn area_average(src: &PixelBuffer, width: u32, height: u32) -> TransformResult<PixelBuffer> {
    if width == 0 || height == 0 {
        return Err(TransformError::InvalidDimensions { width, height });
    }
    let expanded;
    let src = if src.is_indexed() {
        expanded = src.expand_palette()?;
        &expanded
    } else {
        src
    };

    let xs = spans(src.width(), width);
    let ys = spans(src.height(), height);
    let bands = src.bands();
    let mut out = PixelBuffer::new(width, height, bands, src.sample_type())?.to_mut();
    let mut sums = vec![0u64; bands as usize];

    for (y, &(y0, y1)) in ys.iter().enumerate() {
        for (x, &(x0, x1)) in xs.iter().enumerate() {
            sums.iter_mut().for_each(|s| *s = 0);
            for sy in y0..y1 {
                for sx in x0..x1 {
                    for (b, sum) in sums.iter_mut().enumerate() {
                        *sum += src.sample_unchecked(sx as u32, sy as u32, b as u32) as u64;
                    }
                }
            }
            let count = ((y1 - y0) * (x1 - x0)) as u64;
            for (b, sum) in sums.iter().enumerate() {
                out.set_sample_unchecked(x as u32, y as u32, b as u32, (sum / count) as u32);
            }
        }
    }

    tracing::trace!(
        src_width = src.width(),
        src_height = src.height(),
        width,
        height,
        "Area average complete"
    );
    Ok(out.into())
}

/// [`area_average`] as an [`ImageOp`]
#[derive(Debug, Clone, Copy)]
pub struct AreaAverageOp {
    /// Target width
    pub width: u32,
    /// Target height
    pub height: u32,
}

impl AreaAverageOp {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl ImageOp for AreaAverageOp {
    type Error = TransformError;

    fn apply(&self, src: &PixelBuffer) -> TransformResult<PixelBuffer> {
        area_average(src, self.width, self.height)
    }
}
