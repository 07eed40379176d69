//! Color quantization
//!
//! Builds an adaptive palette by box splitting over a coarse color
//! histogram:
//!
//! 1. Sample pixels into 4096 buckets keyed by the high nibble of each
//!    channel; each bucket lists the exact colors seen and their counts.
//! 2. Start from one cube spanning the whole RGB range.
//! 3. Repeatedly split the most populated cube that is not done along its
//!    longest axis, at the value that divides its population closest to
//!    half. Cubes are kept ordered by descending population.
//! 4. Each final cube contributes the population-weighted average of the
//!    colors inside its bounds.
//!
//! When transparency is requested one slot is reserved and a transparent
//! entry is appended after the cube colors.

use crate::error::{ColorError, ColorResult};
use rasterop_core::{MAX_PALETTE_SIZE, Palette, PixelBuffer, Rgba, color};
use std::fmt;
use std::str::FromStr;

// =============================================================================
// Options
// =============================================================================

/// Pixel sampling strategy for histogram construction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorSelection {
    /// Sample a sparse subset of rows per column, bounding cost on large images
    Fast,
    /// Sample every pixel
    #[default]
    Quality,
}

impl ColorSelection {
    /// Canonical lowercase name
    pub fn name(self) -> &'static str {
        match self {
            ColorSelection::Fast => "fast",
            ColorSelection::Quality => "quality",
        }
    }
}

impl fmt::Display for ColorSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ColorSelection {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "fast" => Ok(ColorSelection::Fast),
            "quality" => Ok(ColorSelection::Quality),
            _ => Err(ColorError::UnknownName {
                kind: "color selection",
                name: s.to_string(),
            }),
        }
    }
}

/// Options for palette construction
#[derive(Debug, Clone)]
pub struct QuantizeOptions {
    /// Maximum palette size, including the transparent entry (1..=256)
    pub max_colors: u32,
    /// Reserve the last palette entry for transparency
    pub transparency: bool,
    /// Pixel sampling strategy
    pub selection: ColorSelection,
}

impl Default for QuantizeOptions {
    fn default() -> Self {
        Self {
            max_colors: 256,
            transparency: false,
            selection: ColorSelection::Quality,
        }
    }
}

/// Pixel count above which fast selection starts skipping rows.
const FAST_SAMPLE_AREA: u64 = 16384;

// =============================================================================
// Histogram
// =============================================================================

const BUCKETS: usize = 1 << 12;

#[derive(Debug, Clone, Copy)]
struct ColorCount {
    rgb: u32,
    count: u64,
}

/// Sparse color histogram: 4 bits per channel select a bucket, each bucket
/// lists exact colors in first-seen order.
struct Histogram {
    buckets: Vec<Vec<ColorCount>>,
    samples: u64,
}

#[inline]
fn bucket_key(rgb: u32) -> usize {
    (((rgb & 0xf0_0000) >> 12) | ((rgb & 0x00_f000) >> 8) | ((rgb & 0x00_00f0) >> 4)) as usize
}

#[inline]
fn channel(rgb: u32, ch: usize) -> i32 {
    ((rgb >> (16 - 8 * ch)) & 0xff) as i32
}

impl Histogram {
    fn new() -> Self {
        Self {
            buckets: vec![Vec::new(); BUCKETS],
            samples: 0,
        }
    }

    fn add(&mut self, rgb: u32) {
        let rgb = rgb & color::RGB_MASK;
        self.samples += 1;
        let bucket = &mut self.buckets[bucket_key(rgb)];
        match bucket.iter_mut().find(|c| c.rgb == rgb) {
            Some(entry) => entry.count += 1,
            None => bucket.push(ColorCount { rgb, count: 1 }),
        }
    }

    fn from_buffer(buf: &PixelBuffer, selection: ColorSelection) -> Self {
        let (w, h) = (buf.width(), buf.height());
        let step = match selection {
            ColorSelection::Quality => 1,
            ColorSelection::Fast => 1 + (w as u64 * h as u64 / FAST_SAMPLE_AREA) as u32,
        };

        let mut hist = Self::new();
        for x in 0..w {
            let mut y = x % step;
            while y < h {
                hist.add(buf.argb_unchecked(x, y));
                y += step;
            }
        }
        hist
    }

    /// Colors inside `[min, max]` whose `order[0]` channel falls in the
    /// bucket slice `outer` (high nibble), walking `order[1]` then `order[2]`.
    fn slice<'a>(
        &'a self,
        min: &'a [i32; 3],
        max: &'a [i32; 3],
        order: [usize; 3],
        outer: i32,
    ) -> impl Iterator<Item = &'a ColorCount> + 'a {
        let shift = |ch: usize| (2 - ch) * 4;
        let [a, b, c] = order;
        let key_a = (outer as usize) << shift(a);
        ((min[b] >> 4)..=(max[b] >> 4))
            .flat_map(move |j| {
                let key_b = key_a | ((j as usize) << shift(b));
                ((min[c] >> 4)..=(max[c] >> 4)).map(move |k| key_b | ((k as usize) << shift(c)))
            })
            .flat_map(move |key| self.buckets[key].iter())
            .filter(move |e| {
                (0..3).all(|ch| {
                    let v = channel(e.rgb, ch);
                    v >= min[ch] && v <= max[ch]
                })
            })
    }

    /// All colors inside `[min, max]`.
    fn colors_in<'a>(
        &'a self,
        min: &'a [i32; 3],
        max: &'a [i32; 3],
    ) -> impl Iterator<Item = &'a ColorCount> + 'a {
        ((min[RED] >> 4)..=(max[RED] >> 4))
            .flat_map(move |i| self.slice(min, max, [RED, GREEN, BLUE], i))
    }
}

// =============================================================================
// Cube
// =============================================================================

const RED: usize = 0;
const GREEN: usize = 1;
const BLUE: usize = 2;

/// Axis-aligned sub-range of RGB space with the number of samples inside.
#[derive(Debug, Clone)]
struct Cube {
    min: [i32; 3],
    max: [i32; 3],
    count: u64,
    done: bool,
}

impl Cube {
    fn full(count: u64) -> Self {
        Self {
            min: [0; 3],
            max: [255; 3],
            count,
            done: false,
        }
    }

    /// Split along the longest axis, falling back to the other two.
    ///
    /// On success this cube keeps the upper part and the lower part is
    /// returned. Marks the cube done when no axis can be split.
    fn split(&mut self, hist: &Histogram) -> Option<Cube> {
        let dr = self.max[RED] - self.min[RED] + 1;
        let dg = self.max[GREEN] - self.min[GREEN] + 1;
        let db = self.max[BLUE] - self.min[BLUE] + 1;

        let (axis, c0, c1) = if dr >= dg {
            if dr >= db {
                (RED, GREEN, BLUE)
            } else {
                (BLUE, GREEN, RED)
            }
        } else if dg >= db {
            (GREEN, RED, BLUE)
        } else {
            (BLUE, RED, GREEN)
        };

        let found = self
            .split_channel(hist, axis, c0, c1)
            .or_else(|| self.split_channel(hist, c0, axis, c1))
            .or_else(|| self.split_channel(hist, c1, axis, c0));
        if found.is_none() {
            self.done = true;
        }
        found
    }

    fn split_channel(&mut self, hist: &Histogram, axis: usize, c0: usize, c1: usize) -> Option<Cube> {
        if self.min[axis] == self.max[axis] {
            return None;
        }
        let half = self.count / 2;

        // Population per value of the split axis, filled only until half of
        // the cube (and at least one populated value) has been seen. The
        // floor-raising walk below never passes the filled part.
        let mut counts = [0u64; 256];
        let mut seen = 0u64;
        for outer in (self.min[axis] >> 4)..=(self.max[axis] >> 4) {
            for entry in hist.slice(&self.min, &self.max, [axis, c0, c1], outer) {
                counts[channel(entry.rgb, axis) as usize] += entry.count;
                seen += entry.count;
            }
            if seen > 0 && seen >= half {
                break;
            }
        }

        let mut taken = 0u64;
        let mut last_add: Option<i32> = None;
        let mut bounds: Option<(i32, i32)> = None;

        let mut i = self.min[axis];
        while i <= self.max[axis] {
            let c = counts[i as usize];
            if c == 0 {
                // Nothing below this value yet, so raise the floor.
                if taken == 0 && i < self.max[axis] {
                    self.min[axis] = i + 1;
                }
                i += 1;
                continue;
            }
            if taken + c < half {
                last_add = Some(i);
                taken += c;
                i += 1;
                continue;
            }
            if half - taken <= taken + c - half {
                // Splitting below i is at least as balanced as above it.
                match last_add {
                    None if c == self.count => {
                        self.max[axis] = i;
                        return None;
                    }
                    None => {
                        taken += c;
                        bounds = Some((i, i + 1));
                    }
                    Some(last) => bounds = Some((last, i)),
                }
            } else if i == self.max[axis] {
                if c == self.count {
                    return None;
                }
                bounds = last_add.map(|last| (last, i));
            } else {
                taken += c;
                bounds = Some((i, i + 1));
            }
            break;
        }

        let (lo, hi) = bounds?;
        if taken == 0 || taken >= self.count {
            return None;
        }

        let mut lower = self.clone();
        lower.count = taken;
        lower.max[axis] = lo;
        lower.done = false;
        self.count -= taken;
        self.min[axis] = hi;
        Some(lower)
    }

    /// Population-weighted mean color, rounded half up.
    ///
    /// Returns `None` if no histogram color lies inside the cube.
    fn average(&self, hist: &Histogram) -> Option<Rgba> {
        let mut sums = [0f64; 3];
        let mut total = 0u64;
        for entry in hist.colors_in(&self.min, &self.max) {
            for (ch, sum) in sums.iter_mut().enumerate() {
                *sum += channel(entry.rgb, ch) as f64 * entry.count as f64;
            }
            total += entry.count;
        }
        if total == 0 {
            return None;
        }
        let total = total as f64;
        let mean = |s: f64| ((s / total) + 0.5).min(255.0) as u8;
        Some(Rgba::rgb(mean(sums[RED]), mean(sums[GREEN]), mean(sums[BLUE])))
    }
}

// =============================================================================
// Public API
// =============================================================================

/// Build an adaptive palette of at most `max_colors` entries.
///
/// With `use_transparency`, the last entry is a transparent slot and at most
/// `max_colors - 1` entries come from the image.
pub fn quantize(buf: &PixelBuffer, max_colors: u32, use_transparency: bool) -> ColorResult<Palette> {
    quantize_with_options(
        buf,
        &QuantizeOptions {
            max_colors,
            transparency: use_transparency,
            ..Default::default()
        },
    )
}

/// Build an adaptive palette with explicit options.
///
/// # Errors
///
/// Returns [`ColorError::InvalidParameters`] unless `1 <= max_colors <= 256`,
/// or if transparency is requested with fewer than 2 colors.
pub fn quantize_with_options(buf: &PixelBuffer, options: &QuantizeOptions) -> ColorResult<Palette> {
    if options.max_colors == 0 || options.max_colors as usize > MAX_PALETTE_SIZE {
        return Err(ColorError::InvalidParameters(format!(
            "max_colors must be between 1 and 256, got {}",
            options.max_colors
        )));
    }
    if options.transparency && options.max_colors < 2 {
        return Err(ColorError::InvalidParameters(
            "transparency requires max_colors >= 2".to_string(),
        ));
    }
    let target = if options.transparency {
        options.max_colors - 1
    } else {
        options.max_colors
    } as usize;

    let hist = Histogram::from_buffer(buf, options.selection);

    let mut cubes = vec![Cube::full(hist.samples)];
    let mut first = 0;
    while cubes.len() < target {
        while first < cubes.len() && cubes[first].done {
            first += 1;
        }
        if first == cubes.len() {
            break;
        }

        let Some(mut smaller) = cubes[first].split(&hist) else {
            continue;
        };
        let mut larger = cubes.remove(first);
        if smaller.count > larger.count {
            std::mem::swap(&mut larger, &mut smaller);
        }

        let mut j = first;
        while j < cubes.len() && cubes[j].count >= larger.count {
            j += 1;
        }
        cubes.insert(j, larger);
        j += 1;
        while j < cubes.len() && cubes[j].count >= smaller.count {
            j += 1;
        }
        cubes.insert(j, smaller);
    }

    let mut palette = Palette::new();
    for cube in &cubes {
        match cube.average(&hist) {
            Some(color) => {
                palette.push_unique(color)?;
            }
            None => tracing::warn!(
                min = ?cube.min,
                max = ?cube.max,
                count = cube.count,
                "Skipping empty cube"
            ),
        }
    }
    if options.transparency {
        let t = palette.push(Rgba::TRANSPARENT)?;
        palette.set_transparent_index(Some(t))?;
    }

    tracing::debug!(
        samples = hist.samples,
        cubes = cubes.len(),
        colors = palette.len(),
        selection = %options.selection,
        transparency = options.transparency,
        "Quantized palette"
    );

    Ok(palette)
}
