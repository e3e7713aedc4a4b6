//! Background: decorative wall tiles behind the land.

use super::threshold_mask;
use crate::cardinals::{cardinals_from_mask, Boundary};
use crate::config::WorldConfig;
use crate::error::Result;
use crate::kernels;
use crate::mask::Mask;
use crate::seeds::WorldSeeds;
use crate::tile::{Position, Tile, TileType};
use crate::world::WorldLayer;

/// Drop set cells with no set orthogonal neighbour.
pub fn remove_lonely_cells(mask: &Mask) -> Result<Mask> {
    let centre = Mask::from_bits(3, 3, &[0, 0, 0, 0, 1, 0, 0, 0, 0])?;
    let ring = Mask::from_bits(3, 3, &[0, 1, 0, 1, 0, 1, 0, 1, 0])?;
    mask.intersect(&mask.hit_or_miss(&centre, &ring).complement())
}

pub fn generate(config: &WorldConfig, seeds: &WorldSeeds) -> Result<WorldLayer> {
    let (width, height) = (config.width, config.height);
    let params = &config.layers;

    let scale = params.background_ellipse_scale;
    let circle = kernels::ellipse_mask(width, height, 0, 0, scale, scale);
    let mask = threshold_mask(width, height, &params.background, seeds.background)?
        .intersect(&circle)?
        .erode(&kernels::plus3x3(), true);
    let mask = remove_lonely_cells(&mask)?;

    mask.try_map(|&bit, _, row, col| {
        if !bit {
            return Ok(None);
        }
        let cardinals = cardinals_from_mask(&mask, row, col, Boundary::OPEN)?;
        Ok(Some(Tile::new(Position::new(row, col), TileType::Back, cardinals)))
    })
}
