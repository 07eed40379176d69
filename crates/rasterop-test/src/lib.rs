//! rasterop-test - Regression test framework for rasterop
//!
//! This crate provides a small regression harness shared by the
//! integration tests of every rasterop crate, supporting two modes:
//!
//! - **Compare**: Check every recorded comparison and fail on mismatch
//! - **Display**: Run the comparisons and log them without failing
//!
//! Test images are synthesized in memory by the builders in [`images`];
//! no image files are read or written.
//!
//! # Usage
//!
//! ```ignore
//! use rasterop_test::RegParams;
//!
//! let mut rp = RegParams::new("quantize");
//! rp.compare_values(2.0, palette.len() as f64, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: Set to "compare" or "display"
//! - `RUST_LOG`: Filter for the tracing subscriber installed by [`init_tracing`]

mod error;
pub mod images;
mod params;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};

use std::sync::Once;

static TRACING: Once = Once::new();

/// Install a test-writer tracing subscriber once per process.
///
/// Honors `RUST_LOG`; defaults to `warn` when unset.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}
