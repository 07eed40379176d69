//! rasterop-transform - Resampling for rasterop
//!
//! This crate provides size-changing operations on pixel buffers:
//!
//! - Separable resampling with 15 filter kernels ([`resample`], [`ResampleOp`])
//! - Nearest / bilinear / bicubic fast scaling with progressive halving
//! - Optional accelerator hook consulted before the built-in filter
//! - Area-average scaling and block pixelization

pub mod accelerator;
pub mod area_average;
pub mod contrib;
mod error;
pub mod fast;
pub mod filter;
pub mod pixelize;
pub mod resample;

pub use accelerator::ResampleAccelerator;
pub use area_average::{AreaAverageOp, area_average};
pub use contrib::{Contribution, ContributionList, contributions};
pub use error::{TransformError, TransformResult};
pub use fast::{Interpolation, fast_resample};
pub use filter::{FilterType, InterpolationHint};
pub use pixelize::{PixelizeOp, Region, pixelize, pixelize_region};
pub use resample::{ResampleOp, resample};
