//! Tile types and the per-type lookup tables derived from them.

use serde::{Deserialize, Serialize};

use crate::cardinals::Cardinals;

/// Kinds of tile a layer generator can place
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TileType {
    Dirt,
    Rock,
    Vine,
    Dark,
    Back,
    Grass,
    Root,
    Ore,
    Void,
}

/// Which variant table a tile type's art is keyed by
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BitmaskScheme {
    Four,
    Eleven,
    Thirteen,
    Sixteen,
    /// Only `"0000"`, with this many interchangeable variants
    Indexed(usize),
    /// No art variants
    None,
}

/// Light given off by an emissive tile
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Emission {
    /// Radius in tiles
    pub radius: f64,
    /// RGB colour, 0xRRGGBB
    pub tint: u32,
}

impl TileType {
    pub const ALL: [TileType; 9] = [
        TileType::Dirt,
        TileType::Rock,
        TileType::Vine,
        TileType::Dark,
        TileType::Back,
        TileType::Grass,
        TileType::Root,
        TileType::Ore,
        TileType::Void,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            TileType::Dirt => "dirt",
            TileType::Rock => "rock",
            TileType::Vine => "vine",
            TileType::Dark => "dark",
            TileType::Back => "back",
            TileType::Grass => "grass",
            TileType::Root => "root",
            TileType::Ore => "ore",
            TileType::Void => "void",
        }
    }

    /// Transparent tiles let light and movement through
    pub fn is_transparent(&self) -> bool {
        matches!(
            self,
            TileType::Vine | TileType::Grass | TileType::Root | TileType::Void
        )
    }

    pub fn emission(&self) -> Option<Emission> {
        match self {
            TileType::Ore => Some(Emission {
                radius: 2.0,
                tint: 0x3030BB,
            }),
            _ => None,
        }
    }

    pub fn bitmask_scheme(&self) -> BitmaskScheme {
        match self {
            TileType::Dirt | TileType::Rock => BitmaskScheme::Eleven,
            TileType::Vine | TileType::Dark | TileType::Back => BitmaskScheme::Sixteen,
            TileType::Grass => BitmaskScheme::Four,
            TileType::Root => BitmaskScheme::Indexed(10),
            TileType::Ore => BitmaskScheme::Indexed(1),
            TileType::Void => BitmaskScheme::None,
        }
    }

    /// Single character used by the ASCII export
    pub fn ascii_char(&self) -> char {
        match self {
            TileType::Dirt => '#',
            TileType::Rock => '%',
            TileType::Vine => '|',
            TileType::Dark => '@',
            TileType::Back => ':',
            TileType::Grass => '"',
            TileType::Root => ',',
            TileType::Ore => '*',
            TileType::Void => ' ',
        }
    }

    /// RGB colour used by the PNG export
    pub fn palette_color(&self) -> [u8; 3] {
        match self {
            TileType::Dirt => [121, 85, 58],
            TileType::Rock => [110, 110, 118],
            TileType::Vine => [46, 125, 50],
            TileType::Dark => [38, 30, 26],
            TileType::Back => [64, 52, 70],
            TileType::Grass => [104, 170, 60],
            TileType::Root => [150, 120, 70],
            TileType::Ore => [48, 48, 187],
            TileType::Void => [180, 210, 235],
        }
    }
}

impl std::fmt::Display for TileType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Grid position of a tile
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// One placed tile. Only position, type and cardinals are stored, everything
/// else is looked up from the type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub position: Position,
    pub tile_type: TileType,
    pub cardinals: Cardinals,
}

impl Tile {
    pub const fn new(position: Position, tile_type: TileType, cardinals: Cardinals) -> Self {
        Self {
            position,
            tile_type,
            cardinals,
        }
    }

    /// Empty tile substituted where no layer placed anything
    pub const fn void(position: Position) -> Self {
        Self::new(position, TileType::Void, Cardinals::NONE)
    }

    pub fn is_transparent(&self) -> bool {
        self.tile_type.is_transparent()
    }

    pub fn emission(&self) -> Option<Emission> {
        self.tile_type.emission()
    }
}
