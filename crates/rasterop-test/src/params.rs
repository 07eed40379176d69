//! Regression test parameters and operations

use crate::error::{TestError, TestResult};
use rasterop_core::PixelBuffer;

/// Regression test mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegTestMode {
    /// Compare and record failures (default)
    #[default]
    Compare,
    /// Display mode - log comparisons, never fail
    Display,
}

impl RegTestMode {
    /// Parse mode from the `REGTEST_MODE` environment variable
    pub fn from_env() -> Self {
        Self::parse(&std::env::var("REGTEST_MODE").unwrap_or_default())
    }

    fn parse(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "display" => Self::Display,
            _ => Self::Compare,
        }
    }
}

/// Regression test parameters
///
/// This structure tracks the state of a regression test, including
/// the test name, current index, mode, and success status.
pub struct RegParams {
    /// Name of the test (e.g., "quantize")
    pub test_name: String,
    /// Current test index (incremented before each comparison)
    index: usize,
    /// Test mode
    pub mode: RegTestMode,
    /// Overall success status
    success: bool,
    /// Recorded failures
    failures: Vec<TestError>,
}

impl RegParams {
    /// Create new regression test parameters
    ///
    /// Installs the test tracing subscriber and reads the mode from
    /// `REGTEST_MODE`.
    pub fn new(test_name: &str) -> Self {
        crate::init_tracing();
        let mode = RegTestMode::from_env();
        tracing::info!(test = test_name, ?mode, "Starting regression test");

        Self {
            test_name: test_name.to_string(),
            index: 0,
            mode,
            success: true,
            failures: Vec::new(),
        }
    }

    /// Get the current test index
    pub fn index(&self) -> usize {
        self.index
    }

    /// Check if in display mode
    pub fn display(&self) -> bool {
        self.mode == RegTestMode::Display
    }

    /// Compare two floating-point values
    ///
    /// Returns `true` if `|expected - actual| <= delta`.
    pub fn compare_values(&mut self, expected: f64, actual: f64, delta: f64) -> bool {
        self.index += 1;
        let diff = (expected - actual).abs();

        if diff > delta {
            self.record(TestError::ValueMismatch {
                index: self.index,
                expected,
                actual,
                delta,
            });
            false
        } else {
            true
        }
    }

    /// Compare two buffers for exact equality of geometry, samples and palette
    pub fn compare_buffers(&mut self, buf1: &PixelBuffer, buf2: &PixelBuffer) -> bool {
        self.compare_buffers_within(buf1, buf2, 0)
    }

    /// Compare two buffers allowing each sample to differ by at most `max_diff`
    ///
    /// Palettes must still match exactly.
    pub fn compare_buffers_within(
        &mut self,
        buf1: &PixelBuffer,
        buf2: &PixelBuffer,
        max_diff: u32,
    ) -> bool {
        self.index += 1;

        if !buf1.sizes_equal(buf2) {
            let reason = format!(
                "geometry mismatch: {}x{}x{} {:?} vs {}x{}x{} {:?}",
                buf1.width(),
                buf1.height(),
                buf1.bands(),
                buf1.sample_type(),
                buf2.width(),
                buf2.height(),
                buf2.bands(),
                buf2.sample_type()
            );
            self.record(TestError::BufferMismatch {
                index: self.index,
                reason,
            });
            return false;
        }
        if buf1.palette() != buf2.palette() {
            self.record(TestError::BufferMismatch {
                index: self.index,
                reason: "palette mismatch".into(),
            });
            return false;
        }

        let (s1, s2) = (buf1.samples(), buf2.samples());
        let bands = buf1.bands() as usize;
        let width = buf1.width() as usize;
        for i in 0..s1.len() {
            let (a, b) = (s1.get(i), s2.get(i));
            if a.abs_diff(b) > max_diff {
                let pixel = i / bands;
                let reason = format!(
                    "sample mismatch at ({}, {}) band {}: {} vs {}",
                    pixel % width,
                    pixel / width,
                    i % bands,
                    a,
                    b
                );
                self.record(TestError::BufferMismatch {
                    index: self.index,
                    reason,
                });
                return false;
            }
        }

        true
    }

    /// Compare two byte strings
    pub fn compare_strings(&mut self, data1: &[u8], data2: &[u8]) -> bool {
        self.index += 1;

        if data1 != data2 {
            let reason = format!(
                "string mismatch, sizes {} vs {}: {:?} vs {:?}",
                data1.len(),
                data2.len(),
                String::from_utf8_lossy(data1),
                String::from_utf8_lossy(data2)
            );
            self.record(TestError::BufferMismatch {
                index: self.index,
                reason,
            });
            false
        } else {
            true
        }
    }

    /// Unwrap a fallible step, recording the error as a failure.
    pub fn check<T, E: std::fmt::Display>(&mut self, result: Result<T, E>) -> Option<T> {
        self.index += 1;
        match result {
            Ok(val) => Some(val),
            Err(e) => {
                self.record(TestError::BufferMismatch {
                    index: self.index,
                    reason: format!("operation failed: {e}"),
                });
                None
            }
        }
    }

    fn record(&mut self, failure: TestError) {
        tracing::error!(test = %self.test_name, "{failure}");
        if self.mode == RegTestMode::Compare {
            self.success = false;
        }
        self.failures.push(failure);
    }

    /// Clean up and report results
    ///
    /// Returns `true` if all comparisons passed (always `true` in display mode).
    pub fn cleanup(self) -> bool {
        if self.success {
            tracing::info!(test = %self.test_name, comparisons = self.index, "SUCCESS");
        } else {
            tracing::error!(
                test = %self.test_name,
                failures = self.failures.len(),
                "FAILURE"
            );
            for failure in &self.failures {
                eprintln!("  {failure}");
            }
        }

        self.success
    }

    /// Check if all comparisons have passed so far
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Get list of failures
    pub fn failures(&self) -> &[TestError] {
        &self.failures
    }

    /// Convert the outcome into a result carrying the first failure.
    pub fn into_result(self) -> TestResult<()> {
        if self.success {
            return Ok(());
        }
        match self.failures.into_iter().next() {
            Some(failure) => Err(failure),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(mode: RegTestMode) -> RegParams {
        let mut rp = RegParams::new("test");
        rp.mode = mode;
        rp
    }

    #[test]
    fn test_mode_parse() {
        assert_eq!(RegTestMode::parse("display"), RegTestMode::Display);
        assert_eq!(RegTestMode::parse("DISPLAY"), RegTestMode::Display);
        assert_eq!(RegTestMode::parse(""), RegTestMode::Compare);
        assert_eq!(RegTestMode::parse("compare"), RegTestMode::Compare);
    }

    #[test]
    fn test_compare_values_within_delta() {
        let mut rp = params(RegTestMode::Compare);
        assert!(rp.compare_values(100.0, 100.0, 0.0));
        assert!(rp.compare_values(100.0, 100.5, 1.0));
        assert!(rp.is_success());
        assert_eq!(rp.index(), 2);
    }

    #[test]
    fn test_compare_values_failure() {
        let mut rp = params(RegTestMode::Compare);
        assert!(!rp.compare_values(100.0, 200.0, 0.0));
        assert!(!rp.is_success());
        assert!(matches!(
            rp.failures()[0],
            TestError::ValueMismatch { index: 1, .. }
        ));
        assert!(rp.into_result().is_err());
    }

    #[test]
    fn test_display_mode_never_fails() {
        let mut rp = params(RegTestMode::Display);
        assert!(!rp.compare_values(1.0, 2.0, 0.0));
        assert_eq!(rp.failures().len(), 1);
        assert!(rp.cleanup());
    }

    #[test]
    fn test_compare_buffers() {
        let a = PixelBuffer::from_u8(2, 1, 1, vec![10, 20]).unwrap();
        let b = PixelBuffer::from_u8(2, 1, 1, vec![10, 22]).unwrap();
        let c = PixelBuffer::from_u8(1, 2, 1, vec![10, 20]).unwrap();
        let mut rp = params(RegTestMode::Compare);
        assert!(rp.compare_buffers(&a, &a.deep_clone()));
        assert!(rp.compare_buffers_within(&a, &b, 2));
        assert!(!rp.compare_buffers(&a, &b));
        assert!(!rp.compare_buffers(&a, &c));
        assert_eq!(rp.failures().len(), 2);
    }

    #[test]
    fn test_check_records_errors() {
        let mut rp = params(RegTestMode::Compare);
        assert_eq!(rp.check::<u32, String>(Ok(3)), Some(3));
        assert_eq!(rp.check::<u32, String>(Err("boom".into())), None);
        assert!(!rp.is_success());
    }
}
