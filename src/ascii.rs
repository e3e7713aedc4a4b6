//! ASCII rendering and export module for worlds
//!
//! Provides functions to render world data as ASCII text and export to files.

use std::fs::File;
use std::io::{self, Write};

use chrono::Local;

use crate::bitmap::Bitmap;
use crate::tile::TileType;
use crate::world::{World, WorldData};

/// ASCII rendering modes
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AsciiMode {
    /// Show tile type characters
    Tiles,
    /// Show global illumination gradient
    Light,
    /// Show shadow hit counts
    Shadow,
}

impl AsciiMode {
    pub fn name(&self) -> &'static str {
        match self {
            AsciiMode::Tiles => "Tiles",
            AsciiMode::Light => "Light",
            AsciiMode::Shadow => "Shadow",
        }
    }

    pub fn all() -> &'static [AsciiMode] {
        &[AsciiMode::Tiles, AsciiMode::Light, AsciiMode::Shadow]
    }
}

/// Get ASCII character for a light level (0 = dark, 1 = full)
pub fn light_char(light: f64) -> char {
    const CHARS: [char; 10] = [' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];
    let idx = (light.clamp(0.0, 1.0) * (CHARS.len() - 1) as f64).round() as usize;
    CHARS[idx.min(CHARS.len() - 1)]
}

/// Get ASCII character for a shadow hit count
pub fn shadow_char(hits: f64) -> char {
    match hits as usize {
        0 => ' ',
        1 => '░',
        2 => '▒',
        _ => '▓',
    }
}

fn render_rows(width: usize, height: usize, mut ch: impl FnMut(usize) -> char) -> String {
    let mut result = String::with_capacity((width + 1) * height);
    for row in 0..height {
        for col in 0..width {
            result.push(ch(row * width + col));
        }
        result.push('\n');
    }
    result
}

/// Render the tile types of a world, one character per tile
pub fn render_tiles(world: &World) -> String {
    render_rows(world.width, world.height, |i| world[i].tile_type.ascii_char())
}

/// Render a light bitmap as a character gradient
pub fn render_light(light: &Bitmap) -> String {
    render_rows(light.width, light.height, |i| light_char(light[i]))
}

/// Render a shadow bitmap
pub fn render_shadows(shadows: &Bitmap) -> String {
    render_rows(shadows.width, shadows.height, |i| shadow_char(shadows[i]))
}

pub fn render_ascii_map(data: &WorldData, mode: AsciiMode) -> String {
    match mode {
        AsciiMode::Tiles => render_tiles(&data.world),
        AsciiMode::Light => render_light(&data.light),
        AsciiMode::Shadow => render_shadows(&data.shadows),
    }
}

/// Generate legend for tile characters
pub fn tile_legend() -> String {
    let mut legend = String::new();
    legend.push_str("=== TILE LEGEND ===\n");
    for tile_type in TileType::ALL {
        legend.push_str(&format!("  '{}' {}\n", tile_type.ascii_char(), tile_type.name()));
    }
    legend
}

/// Full text report for a world: header, maps, legend and statistics
pub fn render_world_report(data: &WorldData, verbose: bool) -> String {
    let total = data.width * data.height;
    let mut out = String::new();

    out.push_str("=== TILE WORLD FILE ===\n");
    out.push_str(&format!("Seed: {}\n", data.seed()));
    out.push_str(&format!("Size: {}x{}\n", data.width, data.height));
    out.push_str(&format!("Generated: {}\n\n", Local::now().format("%Y-%m-%d %H:%M:%S")));

    for &mode in AsciiMode::all() {
        out.push_str(&format!("=== MAP ({} View) ===\n", mode.name()));
        out.push_str(&render_ascii_map(data, mode));
        out.push('\n');
    }

    out.push_str(&tile_legend());
    out.push('\n');

    out.push_str("=== STATISTICS ===\n");
    out.push_str(&format!("Total tiles: {}\n", total));
    let mut counts = data.type_counts();
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    for (tile_type, count) in counts {
        let pct = 100.0 * count as f64 / total.max(1) as f64;
        out.push_str(&format!("  {:8} {} {:>6} ({:>5.1}%)\n", tile_type.name(), tile_type.ascii_char(), count, pct));
    }
    if let Some((lo, hi)) = data.light.min_max() {
        out.push_str(&format!("Light: {:.2} to {:.2}\n", lo, hi));
    }
    out.push('\n');

    if verbose {
        out.push_str("=== TILE DATA ===\n");
        out.push_str("[row,col,type,cardinals,light,shadow]\n");
        for (row, col, tile) in data.world.iter() {
            let i = row * data.width + col;
            out.push_str(&format!(
                "{},{},{},{},{:.3},{}\n",
                row,
                col,
                tile.tile_type.name(),
                tile.cardinals,
                data.light[i],
                data.shadows[i]
            ));
        }
    }

    out
}

/// Write the text report for a world to a file
pub fn export_world_file(data: &WorldData, path: &str, verbose: bool) -> io::Result<()> {
    let mut file = File::create(path)?;
    write!(file, "{}", render_world_report(data, verbose))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cardinals::Cardinals;
    use crate::grid::Grid;
    use crate::tile::{Position, Tile};

    #[test]
    fn test_light_char_range() {
        assert_eq!(light_char(0.0), ' ');
        assert_eq!(light_char(1.0), '@');
        assert_eq!(light_char(7.0), '@');
        assert_eq!(light_char(-1.0), ' ');
    }

    #[test]
    fn test_render_tiles_rows() {
        let world: World = Grid::from_fn(3, 2, |_, row, col| {
            let tile_type = if row == 1 { TileType::Dirt } else { TileType::Void };
            Tile::new(Position::new(row, col), tile_type, Cardinals::NONE)
        });
        assert_eq!(render_tiles(&world), "   \n###\n");
    }

    #[test]
    fn test_legend_lists_every_type() {
        let legend = tile_legend();
        for tile_type in TileType::ALL {
            assert!(legend.contains(tile_type.name()));
        }
    }
}
