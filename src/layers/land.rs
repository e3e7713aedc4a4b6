//! Land: the solid ground of the world.
//!
//! A noise mask inside an ellipse, opened to remove specks. A second noise
//! field picks rock over dirt, and cells whose four neighbours are all land
//! become dark interior tiles.

use super::threshold_mask;
use crate::cardinals::{cardinals_from_mask, Boundary};
use crate::config::WorldConfig;
use crate::error::Result;
use crate::kernels;
use crate::seeds::WorldSeeds;
use crate::tile::{Position, Tile, TileType};
use crate::world::WorldLayer;

pub fn generate(config: &WorldConfig, seeds: &WorldSeeds) -> Result<WorldLayer> {
    let (width, height) = (config.width, config.height);
    let params = &config.layers;
    let cleanup = kernels::plus3x3();

    let scale = params.land_ellipse_scale;
    let circle = kernels::ellipse_mask(width, height, 0, 0, scale, scale);
    let land = threshold_mask(width, height, &params.land, seeds.land)?
        .intersect(&circle)?
        .open(&cleanup);
    let rock = threshold_mask(width, height, &params.rock, seeds.rock)?;
    // The grid edge counts as open sky
    let dark = land.erode(&cleanup, false);

    land.try_map(|&is_land, i, row, col| {
        if !is_land {
            return Ok(None);
        }

        let (tile_type, cardinal_source) = if dark[i] {
            (TileType::Dark, &dark)
        } else if rock[i] {
            (TileType::Rock, &land)
        } else {
            (TileType::Dirt, &land)
        };

        let cardinals = cardinals_from_mask(cardinal_source, row, col, Boundary::OPEN)?;
        Ok(Some(Tile::new(Position::new(row, col), tile_type, cardinals)))
    })
}
