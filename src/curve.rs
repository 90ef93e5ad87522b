//! Lissajous sample buffer generation.
//!
//! Produces the fixed sequence of normalized mirror positions a scanning
//! device plays back, one full period per buffer:
//!
//! ```text
//! dt   = 2π / n
//! x[i] = sin(10·k·i·dt)
//! y[i] = 0.9·sin((5·(k+1) + 1)·i·dt)
//! ```
//!
//! The buffer is generated once and shared read-only by every consumer.

use crate::error::{Error, Result};
use std::f64::consts::TAU;
use std::ops::Index;
use std::sync::Arc;
use trueno::Vector;

/// Number of distinct patterns the device demo cycles through.
pub const PATTERN_CYCLE_LEN: i32 = 8;

/// Lowest laser modulation level emitted by the demo pattern.
const MODULATION_BASE: u8 = 156;

/// Number of modulation steps before the ramp wraps around.
const MODULATION_STEPS: usize = 100;

/// Samples sharing one modulation level.
const MODULATION_HOLD: usize = 4;

/// Vertical amplitude relative to the horizontal axis.
const Y_AMPLITUDE: f64 = 0.9;

/// One normalized sample of the scan buffer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplePoint {
    /// Horizontal mirror position in [-1, 1].
    pub x: f64,
    /// Vertical mirror position in [-0.9, 0.9].
    pub y: f64,
    /// 8-bit laser modulation level.
    pub m: u8,
}

/// Bounding box of a sample buffer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    /// Smallest x value.
    pub x_min: f32,
    /// Largest x value.
    pub x_max: f32,
    /// Smallest y value.
    pub y_min: f32,
    /// Largest y value.
    pub y_max: f32,
}

/// Immutable, cheaply clonable buffer of scan samples.
///
/// Clones share the same storage, so the buffer can be handed to the
/// animator and to any number of renderers without copying.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleBuffer {
    pattern_index: i32,
    points: Arc<[SamplePoint]>,
}

impl SampleBuffer {
    /// Number of samples in the buffer.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the buffer holds no samples. Never true for a generated buffer.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Pattern index `k` the buffer was generated with.
    #[must_use]
    pub const fn pattern_index(&self) -> i32 {
        self.pattern_index
    }

    /// Sample at `index`, if in range.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&SamplePoint> {
        self.points.get(index)
    }

    /// All samples in playback order.
    #[must_use]
    pub fn points(&self) -> &[SamplePoint] {
        &self.points
    }

    /// Iterate over samples in playback order.
    pub fn iter(&self) -> std::slice::Iter<'_, SamplePoint> {
        self.points.iter()
    }

    /// Horizontal positions.
    #[must_use]
    pub fn xs(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.x).collect()
    }

    /// Vertical positions.
    #[must_use]
    pub fn ys(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.y).collect()
    }

    /// Laser modulation levels.
    #[must_use]
    pub fn modulation(&self) -> Vec<u8> {
        self.points.iter().map(|p| p.m).collect()
    }

    /// Bounding box of all samples, computed with SIMD reductions.
    #[must_use]
    pub fn extent(&self) -> Extent {
        let xs = Vector::from_vec(self.points.iter().map(|p| p.x as f32).collect());
        let ys = Vector::from_vec(self.points.iter().map(|p| p.y as f32).collect());

        Extent {
            x_min: xs.min().unwrap_or(0.0),
            x_max: xs.max().unwrap_or(0.0),
            y_min: ys.min().unwrap_or(0.0),
            y_max: ys.max().unwrap_or(0.0),
        }
    }
}

impl Index<usize> for SampleBuffer {
    type Output = SamplePoint;

    fn index(&self, index: usize) -> &Self::Output {
        &self.points[index]
    }
}

impl<'a> IntoIterator for &'a SampleBuffer {
    type Item = &'a SamplePoint;
    type IntoIter = std::slice::Iter<'a, SamplePoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

/// Generate the sample buffer for `n` points and pattern index `k`.
///
/// Pure and deterministic: equal arguments always yield equal buffers.
///
/// # Errors
///
/// Returns [`Error::InvalidConfiguration`] if `n` is zero.
///
/// # Example
///
/// ```
/// use scan_viz::curve::generate;
///
/// let buffer = generate(512, 1).unwrap();
/// assert_eq!(buffer.len(), 512);
/// assert!(buffer.iter().all(|p| p.x.abs() <= 1.0 && p.y.abs() <= 0.9));
/// ```
pub fn generate(n: usize, k: i32) -> Result<SampleBuffer> {
    if n == 0 {
        return Err(Error::invalid_config(
            "point_count",
            "must be greater than zero",
        ));
    }

    let dt = TAU / n as f64;
    let fx = 10.0 * f64::from(k);
    let fy = 5.0 * (f64::from(k) + 1.0) + 1.0;

    let points: Arc<[SamplePoint]> = (0..n)
        .map(|i| {
            let t = i as f64 * dt;
            SamplePoint {
                x: (fx * t).sin(),
                y: Y_AMPLITUDE * (fy * t).sin(),
                m: modulation_level(i),
            }
        })
        .collect();

    Ok(SampleBuffer {
        pattern_index: k,
        points,
    })
}

/// Laser power for sample `i`: a ramp that steps up every four samples.
#[must_use]
pub fn modulation_level(i: usize) -> u8 {
    // 156 + 99 = 255 at most.
    MODULATION_BASE + ((i / MODULATION_HOLD) % MODULATION_STEPS) as u8
}

/// Endless sequence of pattern indices `1, 2, ..., 8, 1, 2, ...`.
///
/// Mirrors the device demo, which switches to the next Lissajous figure each
/// time the operator requests a new buffer.
#[derive(Debug, Clone, Default)]
pub struct PatternCycle {
    iteration: u64,
}

impl PatternCycle {
    /// Start a new cycle at pattern 1.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pattern index for a given iteration.
    #[must_use]
    pub fn pattern_for(iteration: u64) -> i32 {
        (iteration % PATTERN_CYCLE_LEN as u64) as i32 + 1
    }
}

impl Iterator for PatternCycle {
    type Item = i32;

    fn next(&mut self) -> Option<Self::Item> {
        let k = Self::pattern_for(self.iteration);
        self.iteration += 1;
        Some(k)
    }
}
