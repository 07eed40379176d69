//! Pixelize
//!
//! Replaces every `block_w x block_h` block with its mean color, keeping
//! the image size. Blocks are anchored at the top-left of the affected
//! region; blocks on the right and bottom edges may be smaller.

use crate::error::{TransformError, TransformResult};
use rasterop_core::{ImageOp, PixelBuffer};

/// Axis-aligned rectangle in pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    /// Left edge
    pub x: u32,
    /// Top edge
    pub y: u32,
    /// Width in pixels
    pub w: u32,
    /// Height in pixels
    pub h: u32,
}

impl Region {
    pub fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    /// Whether the region is non-empty and lies inside a `width x height` image.
    pub fn fits(&self, width: u32, height: u32) -> bool {
        self.w > 0
            && self.h > 0
            && self.x.checked_add(self.w).is_some_and(|r| r <= width)
            && self.y.checked_add(self.h).is_some_and(|b| b <= height)
    }
}

/// Pixelize the whole image.
pub fn pixelize(src: &PixelBuffer, block_w: u32, block_h: u32) -> TransformResult<PixelBuffer> {
    let region = Region::new(0, 0, src.width(), src.height());
    pixelize_region(src, block_w, block_h, region)
}

/// Pixelize only `region`; pixels outside it are copied unchanged.
///
/// Indexed buffers are expanded to truecolor first.
///
/// # Errors
///
/// Returns [`TransformError::InvalidParameters`] for a zero block size or a
/// region that does not fit inside the image.
pub fn pixelize_region(
    src: &PixelBuffer,
    block_w: u32,
    block_h: u32,
    region: Region,
) -> TransformResult<PixelBuffer> {
    if block_w == 0 || block_h == 0 {
        return Err(TransformError::InvalidParameters(format!(
            "block size must be at least 1x1, got {block_w}x{block_h}"
        )));
    }
    if !region.fits(src.width(), src.height()) {
        return Err(TransformError::InvalidParameters(format!(
            "region {region:?} outside {}x{} image",
            src.width(),
            src.height()
        )));
    }

    let mut out = if src.is_indexed() {
        src.expand_palette()?.to_mut()
    } else {
        src.to_mut()
    };
    let bands = out.bands();
    let mut sums = vec![0u64; bands as usize];

    let (x_end, y_end) = (region.x + region.w, region.y + region.h);
    for by in (region.y..y_end).step_by(block_h as usize) {
        let by1 = (by + block_h).min(y_end);
        for bx in (region.x..x_end).step_by(block_w as usize) {
            let bx1 = (bx + block_w).min(x_end);
            sums.iter_mut().for_each(|s| *s = 0);
            for y in by..by1 {
                for x in bx..bx1 {
                    for (b, sum) in sums.iter_mut().enumerate() {
                        *sum += out.sample(x, y, b as u32).unwrap_or(0) as u64;
                    }
                }
            }
            let count = ((by1 - by) * (bx1 - bx)) as u64;
            for y in by..by1 {
                for x in bx..bx1 {
                    for (b, sum) in sums.iter().enumerate() {
                        out.set_sample_unchecked(x, y, b as u32, (sum / count) as u32);
                    }
                }
            }
        }
    }

    Ok(out.into())
}

/// [`pixelize`] as an [`ImageOp`], optionally limited to a region
#[derive(Debug, Clone, Copy)]
pub struct PixelizeOp {
    /// Block width, at least 1
    pub block_w: u32,
    /// Block height, at least 1
    pub block_h: u32,
    /// Area to pixelize; the whole image when `None`
    pub region: Option<Region>,
}

impl PixelizeOp {
    /// Square blocks over the whole image
    pub fn new(block: u32) -> Self {
        Self {
            block_w: block,
            block_h: block,
            region: None,
        }
    }

    /// Rectangular `block_w x block_h` blocks over the whole image
    pub fn with_blocks(block_w: u32, block_h: u32) -> Self {
        Self {
            block_w,
            block_h,
            region: None,
        }
    }

    /// Restrict the effect to `region`.
    pub fn region(mut self, region: Region) -> Self {
        self.region = Some(region);
        self
    }
}

impl ImageOp for PixelizeOp {
    type Error = TransformError;

    fn apply(&self, src: &PixelBuffer) -> TransformResult<PixelBuffer> {
        match self.region {
            Some(region) => pixelize_region(src, self.block_w, self.block_h, region),
            None => pixelize(src, self.block_w, self.block_h),
        }
    }
}
