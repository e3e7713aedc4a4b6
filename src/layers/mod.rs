//! World layer generators
//!
//! Each generator composes noise, mask algebra and cardinal lookups into a
//! sparse [`WorldLayer`](crate::world::WorldLayer). Stacking order is
//! background, land, ores, foliage.

pub mod background;
pub mod foliage;
pub mod land;
pub mod ores;

use crate::config::NoiseThreshold;
use crate::error::Result;
use crate::mask::Mask;
use crate::noise_field::{self, NoiseParams};

/// Noise field thresholded into a mask
pub(crate) fn threshold_mask(
    width: usize,
    height: usize,
    threshold: &NoiseThreshold,
    seed: u64,
) -> Result<Mask> {
    let params = NoiseParams::new(threshold.frequency);
    let field = noise_field::generate_2d(width, height, &params, seed)?;
    Ok(field.greater_than_scalar(threshold.threshold))
}
