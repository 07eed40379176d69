//! Interpolation filter kernels
//!
//! Each [`FilterType`] is a symmetric 1-D kernel with a fixed support
//! radius. The resampler evaluates [`FilterType::weight`] only inside
//! `[-support, support]`, scaled by the shrink factor when downsampling.
//!
//! | Filter | Support |
//! |---|---|
//! | point | 0.0 |
//! | box | 0.5 |
//! | triangle, hermite, hanning, hamming, blackman | 1.0 |
//! | gaussian | 1.25 |
//! | quadratic | 1.5 |
//! | cubic, catrom, mitchell | 2.0 |
//! | lanczos | 3.0 |
//! | blackman-bessel | 3.2383 |
//! | blackman-sinc | 4.0 |

use crate::error::TransformError;
use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

/// Resampling filter kernel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FilterType {
    /// No explicit choice; resolves to [`FilterType::Lanczos`]
    #[default]
    Undefined,
    /// Nearest neighbor
    Point,
    /// Box, 1 on `[-0.5, 0.5)`
    Box,
    /// Triangle (tent), linear interpolation
    Triangle,
    /// Hermite cubic, `2|t|^3 - 3|t|^2 + 1`
    Hermite,
    /// Hanning window
    Hanning,
    /// Hamming window
    Hamming,
    /// Blackman window
    Blackman,
    /// Gaussian
    Gaussian,
    /// Quadratic B-spline (bell)
    Quadratic,
    /// Cubic B-spline
    Cubic,
    /// Catmull-Rom spline
    Catrom,
    /// Mitchell-Netravali with B = C = 1/3
    Mitchell,
    /// Lanczos with 3 lobes
    Lanczos,
    /// Blackman-windowed Bessel
    BlackmanBessel,
    /// Blackman-windowed sinc
    BlackmanSinc,
}

impl FilterType {
    /// Every filter, [`FilterType::Undefined`] first.
    pub const ALL: [FilterType; 16] = [
        FilterType::Undefined,
        FilterType::Point,
        FilterType::Box,
        FilterType::Triangle,
        FilterType::Hermite,
        FilterType::Hanning,
        FilterType::Hamming,
        FilterType::Blackman,
        FilterType::Gaussian,
        FilterType::Quadratic,
        FilterType::Cubic,
        FilterType::Catrom,
        FilterType::Mitchell,
        FilterType::Lanczos,
        FilterType::BlackmanBessel,
        FilterType::BlackmanSinc,
    ];

    /// Replace [`FilterType::Undefined`] with the default kernel.
    pub fn resolve(self) -> Self {
        match self {
            FilterType::Undefined => FilterType::Lanczos,
            other => other,
        }
    }

    /// Canonical lowercase name
    pub fn name(self) -> &'static str {
        match self {
            FilterType::Undefined => "undefined",
            FilterType::Point => "point",
            FilterType::Box => "box",
            FilterType::Triangle => "triangle",
            FilterType::Hermite => "hermite",
            FilterType::Hanning => "hanning",
            FilterType::Hamming => "hamming",
            FilterType::Blackman => "blackman",
            FilterType::Gaussian => "gaussian",
            FilterType::Quadratic => "quadratic",
            FilterType::Cubic => "cubic",
            FilterType::Catrom => "catrom",
            FilterType::Mitchell => "mitchell",
            FilterType::Lanczos => "lanczos",
            FilterType::BlackmanBessel => "blackman-bessel",
            FilterType::BlackmanSinc => "blackman-sinc",
        }
    }

    /// Support radius in source samples
    pub fn support(self) -> f64 {
        match self.resolve() {
            FilterType::Point => 0.0,
            FilterType::Box => 0.5,
            FilterType::Triangle
            | FilterType::Hermite
            | FilterType::Hanning
            | FilterType::Hamming
            | FilterType::Blackman => 1.0,
            FilterType::Gaussian => 1.25,
            FilterType::Quadratic => 1.5,
            FilterType::Cubic | FilterType::Catrom | FilterType::Mitchell => 2.0,
            FilterType::Lanczos | FilterType::Undefined => 3.0,
            FilterType::BlackmanBessel => BLACKMAN_BESSEL_SUPPORT,
            FilterType::BlackmanSinc => BLACKMAN_SINC_SUPPORT,
        }
    }

    /// Kernel value at offset `t` from the center.
    pub fn weight(self, t: f64) -> f64 {
        match self.resolve() {
            FilterType::Point | FilterType::Box => {
                if (-0.5..0.5).contains(&t) {
                    1.0
                } else {
                    0.0
                }
            }
            FilterType::Triangle => {
                let t = t.abs();
                if t < 1.0 { 1.0 - t } else { 0.0 }
            }
            FilterType::Hermite => {
                let t = t.abs();
                if t < 1.0 {
                    (2.0 * t - 3.0) * t * t + 1.0
                } else {
                    0.0
                }
            }
            FilterType::Hanning => 0.5 + 0.5 * (PI * t).cos(),
            FilterType::Hamming => 0.54 + 0.46 * (PI * t).cos(),
            FilterType::Blackman => blackman(t),
            FilterType::Gaussian => (-2.0 * t * t).exp() * (2.0 / PI).sqrt(),
            FilterType::Quadratic => {
                let t = t.abs();
                if t < 0.5 {
                    0.75 - t * t
                } else if t < 1.5 {
                    let t = t - 1.5;
                    0.5 * t * t
                } else {
                    0.0
                }
            }
            FilterType::Cubic => {
                let t = t.abs();
                if t < 1.0 {
                    let tt = t * t;
                    0.5 * tt * t - tt + 2.0 / 3.0
                } else if t < 2.0 {
                    let t = 2.0 - t;
                    t * t * t / 6.0
                } else {
                    0.0
                }
            }
            FilterType::Catrom => {
                let t = t.abs();
                if t < 1.0 {
                    0.5 * (2.0 + t * t * (-5.0 + t * 3.0))
                } else if t < 2.0 {
                    0.5 * (4.0 + t * (-8.0 + t * (5.0 - t)))
                } else {
                    0.0
                }
            }
            FilterType::Mitchell => mitchell(t),
            FilterType::Lanczos | FilterType::Undefined => {
                let t = t.abs();
                if t < 3.0 {
                    sinc(t) * sinc(t / 3.0)
                } else {
                    0.0
                }
            }
            FilterType::BlackmanBessel => blackman(t / BLACKMAN_BESSEL_SUPPORT) * bessel(t),
            FilterType::BlackmanSinc => blackman(t / BLACKMAN_SINC_SUPPORT) * sinc(t),
        }
    }
}

impl fmt::Display for FilterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FilterType {
    type Err = TransformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        FilterType::ALL
            .iter()
            .copied()
            .find(|f| f.name() == lower)
            .ok_or_else(|| TransformError::UnknownFilter(s.to_string()))
    }
}

// =============================================================================
// Rendering hints
// =============================================================================

/// Coarse interpolation preference, mapped onto a concrete filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InterpolationHint {
    /// No preference
    #[default]
    None,
    /// Nearest-neighbor interpolation
    NearestNeighbor,
    /// Bilinear interpolation
    Bilinear,
    /// Bicubic interpolation
    Bicubic,
    /// Favor speed over quality
    Speed,
    /// Favor quality over speed
    Quality,
}

impl InterpolationHint {
    /// Filter selected by this hint
    pub fn filter(self) -> FilterType {
        match self {
            InterpolationHint::NearestNeighbor | InterpolationHint::Speed => FilterType::Point,
            InterpolationHint::Bilinear => FilterType::Triangle,
            InterpolationHint::Bicubic => FilterType::Quadratic,
            InterpolationHint::Quality => FilterType::Mitchell,
            InterpolationHint::None => FilterType::Undefined,
        }
    }
}

impl From<InterpolationHint> for FilterType {
    fn from(hint: InterpolationHint) -> Self {
        hint.filter()
    }
}

// =============================================================================
// Kernel helpers
// =============================================================================

const BLACKMAN_BESSEL_SUPPORT: f64 = 3.2383;
const BLACKMAN_SINC_SUPPORT: f64 = 4.0;

const MITCHELL_B: f64 = 1.0 / 3.0;
const MITCHELL_C: f64 = 1.0 / 3.0;
const P0: f64 = (6.0 - 2.0 * MITCHELL_B) / 6.0;
const P2: f64 = (-18.0 + 12.0 * MITCHELL_B + 6.0 * MITCHELL_C) / 6.0;
const P3: f64 = (12.0 - 9.0 * MITCHELL_B - 6.0 * MITCHELL_C) / 6.0;
const Q0: f64 = (8.0 * MITCHELL_B + 24.0 * MITCHELL_C) / 6.0;
const Q1: f64 = (-12.0 * MITCHELL_B - 48.0 * MITCHELL_C) / 6.0;
const Q2: f64 = (6.0 * MITCHELL_B + 30.0 * MITCHELL_C) / 6.0;
const Q3: f64 = (-MITCHELL_B - 6.0 * MITCHELL_C) / 6.0;

fn mitchell(t: f64) -> f64 {
    let t = t.abs();
    if t < 1.0 {
        P0 + t * t * (P2 + t * P3)
    } else if t < 2.0 {
        Q0 + t * (Q1 + t * (Q2 + t * Q3))
    } else {
        0.0
    }
}

fn sinc(x: f64) -> f64 {
    let x = x * PI;
    if x != 0.0 { x.sin() / x } else { 1.0 }
}

fn blackman(t: f64) -> f64 {
    0.42 + 0.50 * (PI * t).cos() + 0.08 * (2.0 * PI * t).cos()
}

/// Evaluate a rational function of `x^2`; coefficients lowest order first.
fn rational(num: &[f64], den: &[f64], x: f64) -> f64 {
    let xx = x * x;
    let p = num.iter().rev().fold(0.0, |acc, &c| acc * xx + c);
    let q = den.iter().rev().fold(0.0, |acc, &c| acc * xx + c);
    p / q
}

const J1_NUM: [f64; 9] = [
    0.581199354001606143928050809e+21,
    -0.6672106568924916298020941484e+20,
    0.2316433580634002297931815435e+19,
    -0.3588817569910106050743641413e+17,
    0.2908795263834775409737601689e+15,
    -0.1322983480332126453125473247e+13,
    0.3413234182301700539091292655e+10,
    -0.4695753530642995859767162166e+7,
    0.270112271089232341485679099e+4,
];
const J1_DEN: [f64; 9] = [
    0.11623987080032122878585294e+22,
    0.1185770712190320999837113348e+20,
    0.6092061398917521746105196863e+17,
    0.2081661221307607351240184229e+15,
    0.5243710262167649715406728642e+12,
    0.1013863514358673989967045588e+10,
    0.1501793594998585505921097578e+7,
    0.1606931573481487801970916749e+4,
    0.1e+1,
];
const P1_NUM: [f64; 6] = [
    0.352246649133679798341724373e+5,
    0.62758845247161281269005675e+5,
    0.313539631109159574238669888e+5,
    0.49854832060594338434500455e+4,
    0.2111529182853962382105718e+3,
    0.12571716929145341558495e+1,
];
const P1_DEN: [f64; 6] = [
    0.352246649133679798068390431e+5,
    0.626943469593560511888833731e+5,
    0.312404063819041039923015703e+5,
    0.4930396490181088979386097e+4,
    0.2030775189134759322293574e+3,
    0.1e+1,
];
const Q1_NUM: [f64; 6] = [
    0.3511751914303552822533318e+3,
    0.7210391804904475039280863e+3,
    0.4259873011654442389886993e+3,
    0.831898957673850827325226e+2,
    0.45681716295512267064405e+1,
    0.3532840052740123642735e-1,
];
const Q1_DEN: [f64; 6] = [
    0.74917374171809127714519505e+4,
    0.154141773392650970499848051e+5,
    0.91522317015169922705904727e+4,
    0.18111867005523513506724158e+4,
    0.1038187585462133728776636e+3,
    0.1e+1,
];

/// Bessel function of the first kind, order one.
fn bessel_j1(t: f64) -> f64 {
    if t == 0.0 {
        return 0.0;
    }
    let x = t.abs();
    if x < 8.0 {
        return t * rational(&J1_NUM, &J1_DEN, x);
    }
    let z = 8.0 / x;
    let (s, c) = x.sin_cos();
    let p = rational(&P1_NUM, &P1_DEN, z);
    let q = rational(&Q1_NUM, &Q1_DEN, z);
    let v = (2.0 / (PI * x)).sqrt()
        * (p * std::f64::consts::FRAC_1_SQRT_2 * (s - c)
            + z * q * std::f64::consts::FRAC_1_SQRT_2 * (s + c));
    if t < 0.0 { -v } else { v }
}

/// Jinc-style kernel: `J1(pi t) / 2t`, `pi / 4` at the origin.
fn bessel(t: f64) -> f64 {
    if t == 0.0 {
        PI / 4.0
    } else {
        bessel_j1(PI * t) / (2.0 * t)
    }
}
