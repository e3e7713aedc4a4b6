//! World data container and generation pipeline
//!
//! Layers are generated independently, stacked in z-order and flattened into a
//! single fully populated tile grid, which then feeds the lighting passes.

use crate::bitmap::Bitmap;
use crate::cardinals::Cardinals;
use crate::config::WorldConfig;
use crate::error::{Result, WorldError};
use crate::grid::Grid;
use crate::illumination;
use crate::layers;
use crate::mask::Mask;
use crate::seeds::WorldSeeds;
use crate::tile::{Position, Tile, TileType};

/// One generation pass: `None` defers to the layer below
pub type WorldLayer = Grid<Option<Tile>>;

/// Flattened world, every cell has a tile
pub type World = Grid<Tile>;

/// Flatten layers listed bottom to top. The topmost `Some` wins; cells empty
/// in every layer become void tiles. No layers gives an empty world.
pub fn flatten_layers(layers: &[&WorldLayer]) -> Result<World> {
    let Some(&bottom) = layers.first() else {
        return Ok(Grid::from_fn(0, 0, |_, row, col| Tile::void(Position::new(row, col))));
    };

    for layer in layers {
        if !layer.same_size(bottom) {
            return Err(WorldError::SizeMismatch {
                expected: (bottom.width, bottom.height),
                found: (layer.width, layer.height),
            });
        }
    }

    Ok(Grid::from_fn(bottom.width, bottom.height, |i, row, col| {
        layers
            .iter()
            .rev()
            .find_map(|layer| layer[i])
            .unwrap_or_else(|| Tile::void(Position::new(row, col)))
    }))
}

/// Opaque cells of a world (`true` blocks light and movement)
pub fn opacity_mask(world: &World) -> Mask {
    world.map(|tile, _, _, _| !tile.is_transparent())
}

/// Cells where a layer has placed anything
pub fn presence_mask(layer: &WorldLayer) -> Mask {
    layer.map(|tile, _, _, _| tile.is_some())
}

/// Cells of a layer holding a given tile type
pub fn type_mask(layer: &WorldLayer, tile_type: TileType) -> Mask {
    layer.map(|tile, _, _, _| matches!(tile, Some(t) if t.tile_type == tile_type))
}

/// The generated layers, kept for inspection and export
#[derive(Clone, Debug)]
pub struct WorldLayers {
    pub background: WorldLayer,
    pub land: WorldLayer,
    pub ores: WorldLayer,
    pub foliage: WorldLayer,
}

impl WorldLayers {
    /// Layers bottom to top
    pub fn ordered(&self) -> [&WorldLayer; 4] {
        [&self.background, &self.land, &self.ores, &self.foliage]
    }
}

/// All generated world data bundled together
#[derive(Clone, Debug)]
pub struct WorldData {
    /// Seeds used for generation (allows recreation)
    pub seeds: WorldSeeds,
    /// Map width in tiles
    pub width: usize,
    /// Map height in tiles
    pub height: usize,
    pub layers: WorldLayers,
    /// Flattened tiles
    pub world: World,
    /// Global illumination, 0..1 per cell
    pub light: Bitmap,
    /// Shadow hit counts per cell (0 = lit by at least one light)
    pub shadows: Bitmap,
}

impl WorldData {
    /// Convenience accessor for master seed
    pub fn seed(&self) -> u64 {
        self.seeds.master
    }

    /// Get tile info at coordinates
    pub fn tile_info(&self, row: usize, col: usize) -> Result<TileInfo> {
        let tile = *self.world.get(row, col)?;
        Ok(TileInfo {
            position: tile.position,
            tile_type: tile.tile_type,
            cardinals: tile.cardinals,
            light: *self.light.get(row, col)?,
            shadow: *self.shadows.get(row, col)?,
        })
    }

    /// Count of each tile type in the flattened world
    pub fn type_counts(&self) -> Vec<(TileType, usize)> {
        TileType::ALL
            .iter()
            .map(|&tile_type| {
                let count = self.world.fields().iter().filter(|t| t.tile_type == tile_type).count();
                (tile_type, count)
            })
            .collect()
    }
}

/// Information about a single tile
#[derive(Clone, Debug)]
pub struct TileInfo {
    pub position: Position,
    pub tile_type: TileType,
    pub cardinals: Cardinals,
    pub light: f64,
    pub shadow: f64,
}

impl TileInfo {
    /// Format light level as string
    pub fn light_str(&self) -> String {
        let desc = if self.light < 0.25 {
            "dark"
        } else if self.light < 0.5 {
            "dim"
        } else if self.light < 0.75 {
            "lit"
        } else {
            "bright"
        };
        format!("{:.2} ({})", self.light, desc)
    }

    /// Format shadow as string
    pub fn shadow_str(&self) -> String {
        if self.shadow == 0.0 {
            "in light".to_string()
        } else {
            format!("behind {} walls", self.shadow)
        }
    }
}

/// Generate a complete world: layers, flattening, then lighting.
pub fn generate_world(config: &WorldConfig, seeds: &WorldSeeds) -> Result<WorldData> {
    log::info!("Generating {}x{} world with seed {}", config.width, config.height, seeds.master);

    log::info!("Generating background...");
    let background = layers::background::generate(config, seeds)?;
    log::debug!("Background: {} cells", presence_mask(&background).count());

    log::info!("Generating land...");
    let land = layers::land::generate(config, seeds)?;
    let land_mask = presence_mask(&land);
    log::info!(
        "Land: {} cells ({:.1}%)",
        land_mask.count(),
        100.0 * land_mask.count() as f64 / land_mask.len().max(1) as f64
    );

    log::info!("Placing ores...");
    let ores = layers::ores::generate(&land, config, seeds)?;
    log::debug!("Ores: {} cells", presence_mask(&ores).count());

    log::info!("Growing foliage...");
    let foliage = layers::foliage::generate(&land, config, seeds)?;
    log::debug!(
        "Foliage: {} vines, {} grass, {} roots",
        type_mask(&foliage, TileType::Vine).count(),
        type_mask(&foliage, TileType::Grass).count(),
        type_mask(&foliage, TileType::Root).count()
    );

    let layers = WorldLayers {
        background,
        land,
        ores,
        foliage,
    };
    let world = flatten_layers(&layers.ordered())?;

    log::info!(
        "Computing illumination (quality {}, reflections {})...",
        config.illumination.quality,
        config.illumination.reflections
    );
    let light = illumination::compute_global_illumination(&world, &config.illumination);
    if let Some((lo, hi)) = light.min_max() {
        log::info!("Light range: {:.2} to {:.2}", lo, hi);
    }

    // Shadows come from land only; background walls still dim global light
    log::info!("Casting shadows from {} lights...", config.lights.len());
    let shadows = illumination::compute_shadows(&land_mask, &config.lights, config.illumination.max_steps);

    Ok(WorldData {
        seeds: seeds.clone(),
        width: world.width,
        height: world.height,
        layers,
        world,
        light,
        shadows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tile(row: usize, col: usize, tile_type: TileType) -> Option<Tile> {
        Some(Tile::new(Position::new(row, col), tile_type, Cardinals::NONE))
    }

    #[test]
    fn test_lower_layer_shows_through_gaps() {
        let mut lower: WorldLayer = Grid::new(2, 1, None);
        lower.set(0, 0, tile(0, 0, TileType::Dirt)).unwrap();
        let mut upper: WorldLayer = Grid::new(2, 1, None);
        upper.set(0, 1, tile(0, 1, TileType::Grass)).unwrap();

        let world = flatten_layers(&[&lower, &upper]).unwrap();
        assert_eq!(world.get(0, 0).unwrap().tile_type, TileType::Dirt);
        assert_eq!(world.get(0, 1).unwrap().tile_type, TileType::Grass);
    }

    #[test]
    fn test_upper_layer_wins() {
        let lower: WorldLayer = Grid::from_fn(2, 2, |_, row, col| tile(row, col, TileType::Back));
        let upper: WorldLayer = Grid::from_fn(2, 2, |_, row, col| tile(row, col, TileType::Rock));
        let world = flatten_layers(&[&lower, &upper]).unwrap();
        assert!(world.fields().iter().all(|t| t.tile_type == TileType::Rock));
    }

    #[test]
    fn test_empty_everywhere_is_void() {
        let a: WorldLayer = Grid::new(3, 2, None);
        let b: WorldLayer = Grid::new(3, 2, None);
        let world = flatten_layers(&[&a, &b]).unwrap();
        assert_eq!(world.len(), 6);
        for (row, col, tile) in world.iter() {
            assert_eq!(tile.tile_type, TileType::Void);
            assert_eq!(tile.position, Position::new(row, col));
        }
    }

    #[test]
    fn test_no_layers_is_empty_world() {
        let world = flatten_layers(&[]).unwrap();
        assert!(world.is_empty());
    }

    #[test]
    fn test_mismatched_layers_rejected() {
        let a: WorldLayer = Grid::new(3, 2, None);
        let b: WorldLayer = Grid::new(2, 3, None);
        assert!(matches!(flatten_layers(&[&a, &b]), Err(WorldError::SizeMismatch { .. })));
    }

    #[test]
    fn test_opacity_follows_transparency() {
        let layer: WorldLayer = Grid::from_fn(3, 1, |_, row, col| match col {
            0 => tile(row, col, TileType::Rock),
            1 => tile(row, col, TileType::Vine),
            _ => None,
        });
        let world = flatten_layers(&[&layer]).unwrap();
        assert_eq!(opacity_mask(&world), Mask::from_bits(3, 1, &[1, 0, 0]).unwrap());
    }

    #[test]
    fn test_light_and_shadow_occluders() {
        let config = WorldConfig {
            width: 16,
            height: 12,
            illumination: crate::config::IlluminationParams::fast(),
            ..Default::default()
        };
        let data = generate_world(&config, &WorldSeeds::from_master(5)).unwrap();

        let land_only = illumination::compute_shadows(
            &presence_mask(&data.layers.land),
            &config.lights,
            config.illumination.max_steps,
        );
        assert_eq!(data.shadows, land_only);

        let all_walls = illumination::compute_global_illumination(&data.world, &config.illumination);
        assert_eq!(data.light, all_walls);
    }

    #[test]
    fn test_tile_info_descriptions() {
        let info = TileInfo {
            position: Position::new(0, 0),
            tile_type: TileType::Dirt,
            cardinals: Cardinals::NONE,
            light: 0.8,
            shadow: 0.0,
        };
        assert_eq!(info.light_str(), "0.80 (bright)");
        assert_eq!(info.shadow_str(), "in light");

        let shaded = TileInfo { light: 0.2, shadow: 2.0, ..info };
        assert_eq!(shaded.light_str(), "0.20 (dark)");
        assert_eq!(shaded.shadow_str(), "behind 2 walls");
    }

    #[test]
    fn test_generate_world_is_deterministic() {
        let config = WorldConfig {
            width: 16,
            height: 12,
            illumination: crate::config::IlluminationParams::fast(),
            ..Default::default()
        };
        let seeds = WorldSeeds::debug();
        let a = generate_world(&config, &seeds).unwrap();
        let b = generate_world(&config, &seeds).unwrap();
        assert_eq!(a.world, b.world);
        assert_eq!(a.light, b.light);
        assert_eq!((a.width, a.height), (16, 12));

        let info = a.tile_info(0, 0).unwrap();
        assert!(info.light >= config.illumination.minimum);
        assert!(a.tile_info(12, 0).is_err());
    }
}
