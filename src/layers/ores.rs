//! Ores: sparse single-variant tiles embedded in exposed rock.

use super::threshold_mask;
use crate::cardinals::Cardinals;
use crate::config::WorldConfig;
use crate::error::Result;
use crate::kernels;
use crate::seeds::WorldSeeds;
use crate::tile::{Position, Tile, TileType};
use crate::world::{presence_mask, type_mask, WorldLayer};

/// Place ores in rock cells of a land layer that are backed by land along
/// at least one axis.
pub fn generate(land: &WorldLayer, config: &WorldConfig, seeds: &WorldSeeds) -> Result<WorldLayer> {
    let land_mask = presence_mask(land);
    let rock = type_mask(land, TileType::Rock);

    let vertical = land_mask.erode(&kernels::rectangular(1, 3), true);
    let horizontal = land_mask.erode(&kernels::rectangular(3, 1), true);
    let valid = vertical.union(&horizontal)?.intersect(&rock)?;

    let ores = threshold_mask(land.width, land.height, &config.layers.ores, seeds.ores)?.intersect(&valid)?;

    Ok(ores.map(|&is_ore, _, row, col| {
        is_ore.then(|| Tile::new(Position::new(row, col), TileType::Ore, Cardinals::NONE))
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NoiseThreshold;
    use crate::grid::Grid;
    use crate::layers::land;
    use crate::noise_field::Frequency;

    #[test]
    fn test_ores_only_in_rock() {
        let config = WorldConfig::default();
        for master in [1, 2, 3] {
            let seeds = WorldSeeds::from_master(master);
            let land_layer = land::generate(&config, &seeds).unwrap();
            let ores = generate(&land_layer, &config, &seeds).unwrap();
            let ore_mask = presence_mask(&ores);
            assert!(ore_mask.is_subset_of(&type_mask(&land_layer, TileType::Rock)).unwrap());
        }
    }

    #[test]
    fn test_default_worlds_place_ore() {
        let config = WorldConfig::default();
        let total: usize = (0..100)
            .map(|master| {
                let seeds = WorldSeeds::from_master(master);
                let land_layer = land::generate(&config, &seeds).unwrap();
                presence_mask(&generate(&land_layer, &config, &seeds).unwrap()).count()
            })
            .sum();
        assert!(total >= 5, "only {total} ore tiles over 100 worlds");
    }

    #[test]
    fn test_isolated_rock_gets_no_ore() {
        // A single rock cell has no land above/below or left/right
        let land_layer: WorldLayer = Grid::from_fn(5, 5, |_, row, col| {
            (row == 2 && col == 2).then(|| Tile::new(Position::new(row, col), TileType::Rock, Cardinals::NONE))
        });
        let mut config = WorldConfig::default();
        config.layers.ores = NoiseThreshold::new(Frequency::uniform(2.0), -10.0);
        let ores = generate(&land_layer, &config, &WorldSeeds::debug()).unwrap();
        assert_eq!(presence_mask(&ores).count(), 0);
    }

    #[test]
    fn test_rock_column_can_hold_ore() {
        let land_layer: WorldLayer = Grid::from_fn(3, 3, |_, row, col| {
            (col == 1).then(|| Tile::new(Position::new(row, col), TileType::Rock, Cardinals::NONE))
        });
        let mut config = WorldConfig::default();
        config.layers.ores = NoiseThreshold::new(Frequency::uniform(2.0), -10.0);
        let ores = generate(&land_layer, &config, &WorldSeeds::debug()).unwrap();
        // Edges read as solid, so the whole column qualifies
        assert_eq!(presence_mask(&ores).count(), 3);
        assert!(ores.fields().iter().flatten().all(|t| t.cardinals == Cardinals::NONE));
    }
}
