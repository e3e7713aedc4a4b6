//! Foliage: vines hanging beside dirt and grass or roots sitting on top of it.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::threshold_mask;
use crate::cardinals::{cardinals_from_mask, Boundary, Cardinals};
use crate::config::WorldConfig;
use crate::error::Result;
use crate::kernels;
use crate::mask::Mask;
use crate::seeds::WorldSeeds;
use crate::tile::{Position, Tile, TileType};
use crate::world::{presence_mask, type_mask, WorldLayer};

/// Grow foliage into the empty cells around the dirt of a land layer.
pub fn generate(land: &WorldLayer, config: &WorldConfig, seeds: &WorldSeeds) -> Result<WorldLayer> {
    let (width, height) = (land.width, land.height);
    let params = &config.layers;

    let dirt = type_mask(land, TileType::Dirt);
    let land_mask = presence_mask(land);
    let voids = land_mask.complement();

    // Dilating with this reaches one cell up
    let above_kernel = Mask::from_bits(1, 3, &[1, 1, 0])?;
    let above_dirt = dirt.dilate(&above_kernel).intersect(&voids)?;
    let next_to_dirt = dirt.dilate(&kernels::square3x3()).intersect(&voids)?;

    let vines = threshold_mask(width, height, &params.vines, seeds.vines)?.intersect(&next_to_dirt)?;
    let grass = threshold_mask(width, height, &params.grass, seeds.grass)?
        .intersect(&above_dirt)?
        .intersect(&vines.complement())?;

    let mut rng = ChaCha8Rng::seed_from_u64(seeds.roots);
    let root_probability = config.root_grass_probability;

    grass.try_map(|&is_grass, i, row, col| {
        // One draw per cell, so a cell's root roll doesn't depend on its neighbours
        let is_root = rng.gen::<f64>() < root_probability;

        let (tile_type, cardinals) = if is_grass && is_root {
            (TileType::Root, Cardinals::NONE)
        } else if is_grass {
            // Grass tiles against the ground it sits on
            let ground = cardinals_from_mask(&land_mask, row + 1, col, Boundary::OPEN)?;
            (TileType::Grass, ground)
        } else if vines[i] {
            (TileType::Vine, cardinals_from_mask(&vines, row, col, Boundary::OPEN)?)
        } else {
            return Ok(None);
        };

        Ok(Some(Tile::new(Position::new(row, col), tile_type, cardinals)))
    })
}
