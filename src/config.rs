//! World generation configuration
//!
//! Every field has a default, so a JSON config only needs the fields it
//! changes. Values are not validated: out-of-range settings give degenerate
//! worlds (e.g. `quality` below 3 samples a single direction).

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::noise_field::Frequency;
use crate::raycast::DEFAULT_MAX_STEPS;

/// Top-level configuration for one world
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// World width in tiles
    pub width: usize,
    /// World height in tiles
    pub height: usize,
    /// Tile art width in pixels
    pub tile_width: usize,
    /// Tile art height in pixels
    pub tile_height: usize,
    /// On-screen scale factor for tile art
    pub tile_scale: usize,
    /// Chance (0..1) that a grass cell becomes a root instead
    pub root_grass_probability: f64,
    pub illumination: IlluminationParams,
    /// Lights used by the shadow pass
    pub lights: Vec<LightSource>,
    pub layers: LayerParams,
    /// Use the fixed debug seed when no seed is given
    pub debug: bool,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 32,
            height: 24,
            tile_width: 5,
            tile_height: 5,
            tile_scale: 5,
            root_grass_probability: 0.2,
            illumination: IlluminationParams::default(),
            lights: vec![LightSource::Directional { angle_degrees: 270.0 }],
            layers: LayerParams::default(),
            debug: false,
        }
    }
}

impl WorldConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// On-screen size of one tile in pixels (width, height)
    pub fn scaled_tile_size(&self) -> (usize, usize) {
        (self.tile_width * self.tile_scale, self.tile_height * self.tile_scale)
    }
}

/// Global illumination settings
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IlluminationParams {
    /// Rays cast per cell over the upper half circle
    pub quality: usize,
    /// Bounces allowed per ray
    pub reflections: usize,
    /// Distance in tiles over which light fades to nothing
    pub falloff: f64,
    /// Floor for every cell's light level
    pub minimum: f64,
    /// Step budget for each cast
    pub max_steps: usize,
}

impl Default for IlluminationParams {
    fn default() -> Self {
        Self {
            quality: 9,
            reflections: 1,
            falloff: 20.0,
            minimum: 0.15,
            max_steps: DEFAULT_MAX_STEPS,
        }
    }
}

impl IlluminationParams {
    /// Cheap settings for tests and previews
    pub fn fast() -> Self {
        Self {
            quality: 3,
            reflections: 0,
            ..Default::default()
        }
    }
}

/// A light used by the shadow pass
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum LightSource {
    /// Parallel light shining along this angle (math orientation, 270 = straight down)
    Directional { angle_degrees: f64 },
    /// Light at a grid cell
    Point { row: usize, col: usize },
}

/// Noise threshold and frequency for one mask
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct NoiseThreshold {
    pub frequency: Frequency,
    /// Cells with noise above this are set
    pub threshold: f64,
}

impl NoiseThreshold {
    pub const fn new(frequency: Frequency, threshold: f64) -> Self {
        Self { frequency, threshold }
    }
}

/// Per-layer generation constants
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayerParams {
    /// Land boundary ellipse scale (both axes)
    pub land_ellipse_scale: f64,
    pub land: NoiseThreshold,
    pub rock: NoiseThreshold,
    pub vines: NoiseThreshold,
    pub grass: NoiseThreshold,
    pub ores: NoiseThreshold,
    /// Background boundary ellipse scale (both axes)
    pub background_ellipse_scale: f64,
    pub background: NoiseThreshold,
}

impl Default for LayerParams {
    fn default() -> Self {
        Self {
            land_ellipse_scale: 0.8,
            land: NoiseThreshold::new(Frequency::uniform(0.2), -0.1),
            rock: NoiseThreshold::new(Frequency::uniform(0.4), 0.1),
            vines: NoiseThreshold::new(Frequency::uniform(0.1), 0.5),
            grass: NoiseThreshold::new(Frequency::uniform(0.8), -0.5),
            ores: NoiseThreshold::new(Frequency::uniform(2.0), 0.75),
            background_ellipse_scale: 0.9,
            // Stretched horizontally
            background: NoiseThreshold::new(Frequency::axes(0.9, 0.2), -0.4),
        }
    }
}
