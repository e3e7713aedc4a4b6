//! Tile art variant lookup ("autotiling").
//!
//! A variant table maps a cardinal key (`"0101"`) to one suffix or a list of
//! interchangeable suffixes. The tile name is the type name plus the suffix,
//! e.g. `"vine-0101"`. Tables can be loaded from JSON in the same shape:
//!
//! ```json
//! { "0000": "-basic", "0101": ["-h-a", "-h-b"] }
//! ```

use std::collections::HashMap;
use std::path::Path;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::cardinals::Cardinals;
use crate::error::{Result, WorldError};
use crate::tile::{BitmaskScheme, TileType};

/// Name returned when a tile has no art to show
pub const PLACEHOLDER: &str = "placeholder";

/// One or many suffixes for a cardinal key
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VariantChoice {
    One(String),
    Many(Vec<String>),
}

impl VariantChoice {
    /// Pick a suffix, uniformly among many. `None` for an empty list.
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&str> {
        match self {
            VariantChoice::One(suffix) => Some(suffix.as_str()),
            VariantChoice::Many(options) if options.is_empty() => None,
            VariantChoice::Many(options) => Some(options[rng.gen_range(0..options.len())].as_str()),
        }
    }
}

pub type VariantTable = HashMap<String, VariantChoice>;

/// Parse a variant table from JSON text.
pub fn table_from_json_str(json: &str) -> Result<VariantTable> {
    Ok(serde_json::from_str(json)?)
}

/// Load a variant table from a JSON file.
pub fn load_table(path: &Path) -> Result<VariantTable> {
    let text = std::fs::read_to_string(path)?;
    table_from_json_str(&text)
}

/// Identity suffix for a cardinal code, `-NESW` as binary
fn identity_suffix(code: u8) -> String {
    format!("-{}", Cardinals::from_number(code).as_binary_string())
}

fn table_from_fn(mut suffix: impl FnMut(u8) -> VariantChoice) -> VariantTable {
    (0u8..16)
        .map(|code| (Cardinals::from_number(code).as_binary_string(), suffix(code)))
        .collect()
}

/// Full 4-bit arrangement
pub fn sixteen_table() -> VariantTable {
    table_from_fn(|code| VariantChoice::One(identity_suffix(code)))
}

/// Isolated, end-cap and straight pieces share one basic tile
pub fn eleven_table() -> VariantTable {
    table_from_fn(|code| match code {
        0b0000 | 0b0100 | 0b0010 | 0b0001 | 0b0101 | 0b1010 => VariantChoice::One("-basic".into()),
        _ => VariantChoice::One(identity_suffix(code)),
    })
}

/// No basic tile; straights borrow their end caps
pub fn thirteen_table() -> VariantTable {
    table_from_fn(|code| match code {
        0b1010 => VariantChoice::Many(vec![identity_suffix(0b1000), identity_suffix(0b0010)]),
        0b0101 => VariantChoice::Many(vec![identity_suffix(0b0100), identity_suffix(0b0001)]),
        _ => VariantChoice::One(identity_suffix(code)),
    })
}

/// Horizontal run pieces keyed by east/west only
pub fn four_table() -> VariantTable {
    table_from_fn(|code| {
        let cardinals = Cardinals::from_number(code);
        let suffix = match (cardinals.west, cardinals.east) {
            (false, false) => "-single",
            (false, true) => "-left",
            (true, true) => "-middle",
            (true, false) => "-right",
        };
        VariantChoice::One(suffix.into())
    })
}

/// `"0000"` only, with suffixes `-0` to `-(size - 1)`
pub fn indexed_table(size: usize) -> VariantTable {
    let options = (0..size).map(|i| format!("-{i}")).collect();
    HashMap::from([(Cardinals::NONE.as_binary_string(), VariantChoice::Many(options))])
}

/// Variant tables for every bitmask scheme
#[derive(Clone, Debug)]
pub struct Tileset {
    tables: HashMap<BitmaskScheme, VariantTable>,
}

impl Tileset {
    /// Tileset with no tables at all; every lookup is missing.
    pub fn empty() -> Self {
        Self {
            tables: HashMap::new(),
        }
    }

    /// Built-in tables for the 4/11/13/16 schemes. Indexed schemes are always
    /// generated from their size unless a table was set explicitly.
    pub fn builtin() -> Self {
        Self::empty()
            .with_table(BitmaskScheme::Four, four_table())
            .with_table(BitmaskScheme::Eleven, eleven_table())
            .with_table(BitmaskScheme::Thirteen, thirteen_table())
            .with_table(BitmaskScheme::Sixteen, sixteen_table())
    }

    pub fn with_table(mut self, scheme: BitmaskScheme, table: VariantTable) -> Self {
        self.tables.insert(scheme, table);
        self
    }

    /// Look up the tile name for a type and its cardinals.
    ///
    /// Types without art (`BitmaskScheme::None`) give `Ok(None)`. A key with no
    /// entry, or an entry with no options, is a `MissingVariant` error.
    pub fn variant<R: Rng + ?Sized>(
        &self,
        tile_type: TileType,
        cardinals: Cardinals,
        rng: &mut R,
    ) -> Result<Option<String>> {
        let scheme = tile_type.bitmask_scheme();
        let key = cardinals.as_binary_string();
        let missing = || WorldError::MissingVariant {
            tile: tile_type.name().to_string(),
            key: key.clone(),
        };

        let generated;
        let table = match (scheme, self.tables.get(&scheme)) {
            (BitmaskScheme::None, _) => return Ok(None),
            (_, Some(table)) => table,
            (BitmaskScheme::Indexed(size), None) => {
                generated = indexed_table(size);
                &generated
            }
            (_, None) => return Err(missing()),
        };

        let suffix = table
            .get(&key)
            .and_then(|choice| choice.pick(rng))
            .ok_or_else(missing)?;

        Ok(Some(format!("{}{}", tile_type.name(), suffix)))
    }

    /// Like [`Tileset::variant`], but never fails: missing art is logged and
    /// replaced by [`PLACEHOLDER`], as are types without art.
    pub fn variant_or_placeholder<R: Rng + ?Sized>(
        &self,
        tile_type: TileType,
        cardinals: Cardinals,
        rng: &mut R,
    ) -> String {
        match self.variant(tile_type, cardinals, rng) {
            Ok(Some(name)) => name,
            Ok(None) => PLACEHOLDER.to_string(),
            Err(err) => {
                log::warn!("{err}, using placeholder");
                PLACEHOLDER.to_string()
            }
        }
    }
}

impl Default for Tileset {
    fn default() -> Self {
        Self::builtin()
    }
}
