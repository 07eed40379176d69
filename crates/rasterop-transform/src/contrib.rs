//! Contribution lists
//!
//! For one destination index along an axis, the source indices that feed
//! it and their weights. When shrinking, the kernel is stretched by the
//! inverse scale and the weights are normalized to sum to one; when
//! expanding, the kernel is used as is.
//!
//! Source indices outside `[0, len)` are mirrored back into range
//! (`-1 -> 1`, `len -> len - 1`), then wrapped as a last resort for
//! kernels wider than the source.

use crate::filter::FilterType;

/// Support at or below which a shrinking kernel degenerates to point sampling.
const POINT_SUPPORT: f64 = 0.5;

/// One weighted source sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contribution {
    /// Source index along the axis
    pub index: usize,
    /// Weight applied to the sample
    pub weight: f64,
}

/// Weighted source samples for one destination index
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContributionList {
    entries: Vec<Contribution>,
}

impl ContributionList {
    /// The contributions, in ascending source order before mirroring
    pub fn entries(&self) -> &[Contribution] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all weights
    pub fn total_weight(&self) -> f64 {
        self.entries.iter().map(|c| c.weight).sum()
    }

    /// Apply the list to one line of samples.
    ///
    /// If every contributing sample has the same value that value is
    /// returned unchanged; otherwise the weighted sum is rounded half away
    /// from zero and clamped to `[0, max]`.
    #[inline]
    pub fn apply<F>(&self, max: u32, sample: F) -> u32
    where
        F: Fn(usize) -> u32,
    {
        let Some(first) = self.entries.first() else {
            return 0;
        };
        let pel = sample(first.index);
        let mut varies = false;
        let mut sum = 0.0;
        for c in &self.entries {
            let v = sample(c.index);
            if v != pel {
                varies = true;
            }
            sum += v as f64 * c.weight;
        }
        if !varies {
            return pel;
        }
        sum.round().clamp(0.0, max as f64) as u32
    }
}

/// Fold an out-of-range source index back into `[0, len)`.
#[inline]
fn reflect(j: i64, len: i64) -> usize {
    let mut n = if j < 0 {
        -j
    } else if j >= len {
        (len - j) + len - 1
    } else {
        j
    };
    if n >= len {
        n %= len;
    } else if n < 0 {
        n = len - 1;
    }
    n as usize
}

/// Contribution list for destination index `dst_index`.
///
/// `scale` is `dst_len / src_len`; `src_len` must be non-zero.
pub fn contributions(
    scale: f64,
    filter: FilterType,
    src_len: u32,
    dst_index: u32,
) -> ContributionList {
    let len = src_len as i64;
    let support = filter.support();
    let center = dst_index as f64 / scale;

    let (width, fscale) = if scale < 1.0 {
        let width = support / scale;
        if width <= POINT_SUPPORT {
            (POINT_SUPPORT + 1.0e-6, 1.0)
        } else {
            (width, 1.0 / scale)
        }
    } else {
        (support, 1.0)
    };

    let left = (center - width).ceil() as i64;
    let right = (center + width).floor() as i64;
    let mut entries = Vec::with_capacity((right - left + 1).max(0) as usize);
    for j in left..=right {
        let weight = filter.weight((center - j as f64) / fscale) / fscale;
        entries.push(Contribution {
            index: reflect(j, len),
            weight,
        });
    }

    if scale < 1.0 {
        let density: f64 = entries.iter().map(|c| c.weight).sum();
        if density != 0.0 && density != 1.0 {
            for c in &mut entries {
                c.weight /= density;
            }
        }
    }

    if entries.is_empty() {
        let nearest = ((center + 0.5).floor() as i64).clamp(0, len - 1);
        entries.push(Contribution {
            index: nearest as usize,
            weight: 1.0,
        });
    }

    ContributionList { entries }
}

/// Contribution lists for every destination index along one axis.
pub(crate) fn contribution_table(
    src_len: u32,
    dst_len: u32,
    filter: FilterType,
) -> Vec<ContributionList> {
    let scale = dst_len as f64 / src_len as f64;
    (0..dst_len)
        .map(|i| contributions(scale, filter, src_len, i))
        .collect()
}
