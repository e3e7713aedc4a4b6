//! Seeded 2D coherent noise sampled into bitmaps.
//!
//! Layer generators threshold these bitmaps into masks with
//! `greater_than_scalar`. The seed is always explicit; see [`crate::seeds`]
//! for how each layer gets its own.

use noise::{NoiseFn, OpenSimplex};
use serde::{Deserialize, Serialize};

use crate::bitmap::Bitmap;
use crate::clamp::Clamp;
use crate::error::Result;
use crate::grid::Grid;

/// Sampling frequency along each axis (lower = smoother)
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Frequency {
    pub x: f64,
    pub y: f64,
}

impl Frequency {
    pub const fn uniform(frequency: f64) -> Self {
        Self { x: frequency, y: frequency }
    }

    pub const fn axes(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Parameters for one noise field
#[derive(Clone, Debug, PartialEq)]
pub struct NoiseParams {
    pub frequency: Frequency,
    /// Output multiplier (range is roughly [-1, 1] * scale when normalised)
    pub scale: f64,
    /// Applied to every sample after scaling
    pub clamp: Clamp,
    /// Stretch the raw output by [`RAW_PEAK`] so it fills [-1, 1]
    pub normalize: bool,
    /// Number of fBm octaves (1 = plain noise)
    pub octaves: u32,
}

/// Largest magnitude `OpenSimplex` produces in practice (about 0.544).
/// Normalised samples are divided by this and saturated to [-1, 1].
pub const RAW_PEAK: f64 = 0.544;

/// Amplitude decay per octave
const PERSISTENCE: f64 = 0.5;
/// Frequency multiplier per octave
const LACUNARITY: f64 = 2.0;

impl NoiseParams {
    pub fn new(frequency: Frequency) -> Self {
        Self {
            frequency,
            scale: 1.0,
            clamp: Clamp::NONE,
            normalize: true,
            octaves: 1,
        }
    }

    pub fn scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    pub fn clamp(mut self, clamp: Clamp) -> Self {
        self.clamp = clamp;
        self
    }

    pub fn normalize(mut self, normalize: bool) -> Self {
        self.normalize = normalize;
        self
    }

    pub fn octaves(mut self, octaves: u32) -> Self {
        self.octaves = octaves.max(1);
        self
    }
}

impl Default for NoiseParams {
    fn default() -> Self {
        Self::new(Frequency::uniform(0.1))
    }
}

/// Generate a `width` x `height` bitmap of noise.
///
/// Cell `(row, col)` samples the noise at `(col * frequency.x, row * frequency.y)`.
/// Fails only if the clamp sees a non-finite sample.
pub fn generate_2d(width: usize, height: usize, params: &NoiseParams, seed: u64) -> Result<Bitmap> {
    let simplex = OpenSimplex::new(seed as u32);

    let samples = Grid::from_fn(width, height, |_, row, col| {
        let x = col as f64 * params.frequency.x;
        let y = row as f64 * params.frequency.y;
        let raw = fbm(&simplex, x, y, params.octaves);
        let value = if params.normalize {
            (raw / RAW_PEAK).clamp(-1.0, 1.0)
        } else {
            raw
        };
        value * params.scale
    });

    samples.try_map(|&value, _, _, _| params.clamp.apply(value))
}

/// Fractional Brownian motion, normalised by the total amplitude.
fn fbm(noise: &impl NoiseFn<f64, 2>, x: f64, y: f64, octaves: u32) -> f64 {
    let mut total = 0.0;
    let mut amplitude = 1.0;
    let mut frequency = 1.0;
    let mut max_value = 0.0;

    for _ in 0..octaves.max(1) {
        total += amplitude * noise.get([x * frequency, y * frequency]);
        max_value += amplitude;
        amplitude *= PERSISTENCE;
        frequency *= LACUNARITY;
    }

    total / max_value
}
