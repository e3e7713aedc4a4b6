use tile_world::cardinals::{cardinals_from_mask, Boundary};
use tile_world::config::{IlluminationParams, WorldConfig};
use tile_world::grid::Grid;
use tile_world::illumination::compute_global_illumination;
use tile_world::layers;
use tile_world::seeds::WorldSeeds;
use tile_world::tile::{Position, Tile, TileType};
use tile_world::world::{flatten_layers, generate_world, presence_mask, type_mask, WorldLayer};

#[test]
fn land_layer_cardinals_match_masks() {
    let config = WorldConfig::default();
    assert_eq!((config.width, config.height), (32, 24));

    for master in [1, 7, 42] {
        let layer = layers::land::generate(&config, &WorldSeeds::from_master(master)).unwrap();
        let land = presence_mask(&layer);
        let dark = type_mask(&layer, TileType::Dark);

        for (row, col, tile) in layer.iter() {
            let Some(tile) = tile else { continue };
            let source = match tile.tile_type {
                TileType::Dark => &dark,
                TileType::Dirt | TileType::Rock => &land,
                other => panic!("unexpected {other} in land layer"),
            };
            let expected = cardinals_from_mask(source, row, col, Boundary::OPEN).unwrap();
            assert_eq!(tile.cardinals, expected, "seed {master} at ({row}, {col})");
        }
    }
}

#[test]
fn flatten_keeps_topmost_and_fills_void() {
    let bottom: WorldLayer = Grid::from_fn(4, 3, |_, row, col| {
        (col < 2).then(|| Tile::new(Position::new(row, col), TileType::Back, Default::default()))
    });
    let top: WorldLayer = Grid::from_fn(4, 3, |_, row, col| {
        (row == 0).then(|| Tile::new(Position::new(row, col), TileType::Grass, Default::default()))
    });

    let world = flatten_layers(&[&bottom, &top]).unwrap();
    for (row, col, tile) in world.iter() {
        let expected = match (row, col) {
            (0, _) => TileType::Grass,
            (_, 0) | (_, 1) => TileType::Back,
            _ => TileType::Void,
        };
        assert_eq!(tile.tile_type, expected, "({row}, {col})");
        assert_eq!(tile.position, Position::new(row, col));
    }
}

#[test]
fn generated_world_light_is_bounded() {
    let params = IlluminationParams::fast();
    let config = WorldConfig {
        illumination: params.clone(),
        ..Default::default()
    };
    let data = generate_world(&config, &WorldSeeds::debug()).unwrap();

    assert_eq!(data.world.len(), 32 * 24);
    for &value in data.light.fields() {
        assert!(value >= params.minimum && value <= 1.0, "{value}");
    }
    assert_eq!(compute_global_illumination(&data.world, &params), data.light);
    assert!(data.shadows.fields().iter().all(|&v| v >= 0.0));
}

#[test]
fn same_seed_same_world() {
    let config = WorldConfig {
        illumination: IlluminationParams::fast(),
        ..Default::default()
    };
    let a = generate_world(&config, &WorldSeeds::from_master(99)).unwrap();
    let b = generate_world(&config, &WorldSeeds::from_master(99)).unwrap();
    assert_eq!(a.world, b.world);
    assert_eq!(a.shadows, b.shadows);
}
