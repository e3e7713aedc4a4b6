//! PNG and JSON export of worlds, masks and light bitmaps.

use std::path::Path;

use image::{GrayImage, ImageBuffer, Luma, Rgb, RgbImage};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::bitmap::Bitmap;
use crate::error::Result;
use crate::mask::Mask;
use crate::tile::{BitmaskScheme, TileType};
use crate::tileset::Tileset;
use crate::world::{World, WorldData};

/// Render a 0..1 bitmap as greyscale.
pub fn render_bitmap(bitmap: &Bitmap) -> Result<GrayImage> {
    let grey = bitmap.to_greyscale()?;
    let mut img: GrayImage = ImageBuffer::new(bitmap.width as u32, bitmap.height as u32);
    for (row, col, &value) in grey.iter() {
        img.put_pixel(col as u32, row as u32, Luma([value]));
    }
    Ok(img)
}

/// Export a light bitmap (values 0..1) as a greyscale PNG.
pub fn export_light_map(light: &Bitmap, path: &Path) -> Result<()> {
    render_bitmap(light)?.save(path)?;
    Ok(())
}

/// Export shadow hit counts, normalised so the deepest shadow is black.
pub fn export_shadow_map(shadows: &Bitmap, path: &Path) -> Result<()> {
    let lit = shadows.normalized().map(|&v, _, _, _| 1.0 - v);
    render_bitmap(&lit)?.save(path)?;
    Ok(())
}

/// Render a mask in black (unset) and white (set)
pub fn render_mask(mask: &Mask) -> GrayImage {
    let mut img: GrayImage = ImageBuffer::new(mask.width as u32, mask.height as u32);
    for (row, col, &bit) in mask.iter() {
        img.put_pixel(col as u32, row as u32, Luma([if bit { 255 } else { 0 }]));
    }
    img
}

pub fn export_mask(mask: &Mask, path: &Path) -> Result<()> {
    render_mask(mask).save(path)?;
    Ok(())
}

/// Render a world with one palette colour per tile type, `scale` pixels per
/// tile. With a light bitmap each tile is darkened by its light level.
pub fn render_world(world: &World, light: Option<&Bitmap>, scale: u32) -> RgbImage {
    let scale = scale.max(1);
    let mut img: RgbImage = ImageBuffer::new(world.width as u32 * scale, world.height as u32 * scale);

    for (row, col, tile) in world.iter() {
        let level = light
            .and_then(|l| l.get(row, col).ok())
            .map_or(1.0, |&v| v.clamp(0.0, 1.0));
        let base = tile.tile_type.palette_color();
        let color = Rgb([
            (base[0] as f64 * level) as u8,
            (base[1] as f64 * level) as u8,
            (base[2] as f64 * level) as u8,
        ]);

        for dy in 0..scale {
            for dx in 0..scale {
                img.put_pixel(col as u32 * scale + dx, row as u32 * scale + dy, color);
            }
        }
    }

    img
}

pub fn export_world_png(world: &World, light: Option<&Bitmap>, scale: u32, path: &Path) -> Result<()> {
    render_world(world, light, scale).save(path)?;
    Ok(())
}

/// Export a 2x2 grid of views: tiles, light, shadows and the lit world.
pub fn export_combined_grid(data: &WorldData, scale: u32, path: &Path) -> Result<()> {
    let scale = scale.max(1);
    let tile_w = data.width as u32 * scale;
    let tile_h = data.height as u32 * scale;
    let border = 4u32;

    let grey_to_rgb = |img: GrayImage| -> RgbImage {
        ImageBuffer::from_fn(tile_w, tile_h, |x, y| {
            let Luma([v]) = *img.get_pixel(x / scale, y / scale);
            Rgb([v, v, v])
        })
    };

    let shadows_lit = data.shadows.normalized().map(|&v, _, _, _| 1.0 - v);
    let views = [
        render_world(&data.world, None, scale),
        grey_to_rgb(render_bitmap(&data.light)?),
        grey_to_rgb(render_bitmap(&shadows_lit)?),
        render_world(&data.world, Some(&data.light), scale),
    ];

    let grid_w = tile_w * 2 + border * 3;
    let grid_h = tile_h * 2 + border * 3;
    let mut grid: RgbImage = ImageBuffer::from_pixel(grid_w, grid_h, Rgb([30, 30, 30]));

    for (idx, view) in views.iter().enumerate() {
        let offset_x = border + (idx as u32 % 2) * (tile_w + border);
        let offset_y = border + (idx as u32 / 2) * (tile_h + border);
        for (x, y, pixel) in view.enumerate_pixels() {
            grid.put_pixel(offset_x + x, offset_y + y, *pixel);
        }
    }

    grid.save(path)?;
    Ok(())
}

/// One tile as handed to a renderer
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TileRecord {
    pub row: usize,
    pub col: usize,
    pub tile_type: TileType,
    /// Cardinal key, e.g. `"0101"`
    pub cardinals: String,
    pub transparent: bool,
    /// Art name from the tileset, `None` for types without art
    pub variant: Option<String>,
}

/// World as handed to a renderer
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorldRecord {
    pub seed: u64,
    pub width: usize,
    pub height: usize,
    /// Row-major
    pub tiles: Vec<TileRecord>,
    /// Row-major light levels
    pub light: Vec<f64>,
}

impl WorldRecord {
    /// Variant picks are seeded from the world's variant seed, so the same
    /// world and tileset always give the same art.
    pub fn from_world_data(data: &WorldData, tileset: &Tileset) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(data.seeds.variants);
        let tiles = data
            .world
            .iter()
            .map(|(row, col, tile)| {
                let variant = (tile.tile_type.bitmask_scheme() != BitmaskScheme::None)
                    .then(|| tileset.variant_or_placeholder(tile.tile_type, tile.cardinals, &mut rng));
                TileRecord {
                    row,
                    col,
                    tile_type: tile.tile_type,
                    cardinals: tile.cardinals.as_binary_string(),
                    transparent: tile.is_transparent(),
                    variant,
                }
            })
            .collect();

        Self {
            seed: data.seed(),
            width: data.width,
            height: data.height,
            tiles,
            light: data.light.fields().to_vec(),
        }
    }
}

pub fn export_world_json(data: &WorldData, tileset: &Tileset, path: &Path) -> Result<()> {
    let record = WorldRecord::from_world_data(data, tileset);
    std::fs::write(path, serde_json::to_string_pretty(&record)?)?;
    Ok(())
}
