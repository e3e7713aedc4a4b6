use std::path::PathBuf;

use clap::Parser;

use tile_world::ascii;
use tile_world::config::WorldConfig;
use tile_world::error::Result;
use tile_world::export;
use tile_world::seeds::WorldSeeds;
use tile_world::tile::BitmaskScheme;
use tile_world::tileset::{self, Tileset};
use tile_world::world;

#[derive(Parser, Debug)]
#[command(name = "tile_world")]
#[command(about = "Generate lit 2D tile worlds")]
struct Args {
    /// JSON config file (defaults are used for missing fields)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Width of the world in tiles
    #[arg(short = 'W', long)]
    width: Option<usize>,

    /// Height of the world in tiles
    #[arg(short = 'H', long)]
    height: Option<usize>,

    /// Random seed (uses the clock if not specified)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Use the fixed debug seed when no seed is given
    #[arg(long)]
    debug: bool,

    /// Rays cast per cell for global illumination
    #[arg(long)]
    quality: Option<usize>,

    /// Bounces per illumination ray
    #[arg(long)]
    reflections: Option<usize>,

    /// Distance at which light falls to zero
    #[arg(long)]
    falloff: Option<f64>,

    /// Export the lit world to a PNG
    #[arg(long)]
    png: Option<PathBuf>,

    /// Export a 2x2 overview (tiles, light, shadows, lit) to a PNG
    #[arg(long)]
    grid: Option<PathBuf>,

    /// Export shadow hit counts to a greyscale PNG
    #[arg(long)]
    shadows: Option<PathBuf>,

    /// Export the opacity mask (walls white) to a PNG
    #[arg(long)]
    mask: Option<PathBuf>,

    /// Pixels per tile in PNG exports
    #[arg(long, default_value = "8")]
    scale: u32,

    /// Export ASCII maps to a text file
    #[arg(long)]
    ascii: Option<String>,

    /// Include per-tile data in the ASCII export
    #[arg(short, long)]
    verbose: bool,

    /// Export tiles and light as JSON for a renderer
    #[arg(long)]
    json: Option<PathBuf>,

    /// JSON variant table for dirt and rock art, replacing the built-in one
    #[arg(long)]
    eleven_table: Option<PathBuf>,

    /// Print tile, light and shadow info for one cell
    #[arg(long, num_args = 2, value_names = ["ROW", "COL"])]
    inspect: Option<Vec<usize>>,
}

impl Args {
    fn world_config(&self) -> Result<WorldConfig> {
        let mut config = match &self.config {
            Some(path) => WorldConfig::from_json_file(path)?,
            None => WorldConfig::default(),
        };

        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(quality) = self.quality {
            config.illumination.quality = quality;
        }
        if let Some(reflections) = self.reflections {
            config.illumination.reflections = reflections;
        }
        if let Some(falloff) = self.falloff {
            config.illumination.falloff = falloff;
        }
        config.debug |= self.debug;

        Ok(config)
    }

    fn tileset(&self) -> Result<Tileset> {
        let builtin = Tileset::builtin();
        Ok(match &self.eleven_table {
            Some(path) => builtin.with_table(BitmaskScheme::Eleven, tileset::load_table(path)?),
            None => builtin,
        })
    }

    fn has_export(&self) -> bool {
        self.png.is_some()
            || self.grid.is_some()
            || self.shadows.is_some()
            || self.mask.is_some()
            || self.ascii.is_some()
            || self.json.is_some()
    }

    fn world_seeds(&self, config: &WorldConfig) -> WorldSeeds {
        match self.seed {
            Some(seed) => WorldSeeds::from_master(seed),
            None if config.debug => WorldSeeds::debug(),
            None => WorldSeeds::from_clock(),
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = args.world_config()?;
    let seeds = args.world_seeds(&config);

    println!("Generating world with seed: {}", seeds.master);
    println!("World size: {}x{}", config.width, config.height);

    let data = world::generate_world(&config, &seeds)?;

    for (tile_type, count) in data.type_counts() {
        if count > 0 {
            log::debug!("{}: {} tiles", tile_type.name(), count);
        }
    }

    if let Some(path) = &args.png {
        export::export_world_png(&data.world, Some(&data.light), args.scale, path)?;
        println!("Exported world to: {}", path.display());
    }

    if let Some(path) = &args.grid {
        export::export_combined_grid(&data, args.scale, path)?;
        println!("Exported overview to: {}", path.display());
    }

    if let Some(path) = &args.shadows {
        export::export_shadow_map(&data.shadows, path)?;
        println!("Exported shadows to: {}", path.display());
    }

    if let Some(path) = &args.mask {
        export::export_mask(&world::opacity_mask(&data.world), path)?;
        println!("Exported opacity mask to: {}", path.display());
    }

    if let Some(path) = &args.ascii {
        ascii::export_world_file(&data, path, args.verbose)?;
        println!("Exported ASCII maps to: {}", path);
    }

    if let Some(path) = &args.json {
        export::export_world_json(&data, &args.tileset()?, path)?;
        println!("Exported world JSON to: {}", path.display());
    }

    if let Some(&[row, col]) = args.inspect.as_deref() {
        let info = data.tile_info(row, col)?;
        println!("Tile ({}, {}): {} [{}]", row, col, info.tile_type, info.cardinals);
        println!("  Light: {}", info.light_str());
        println!("  Shadow: {}", info.shadow_str());
    }

    if !args.has_export() && args.inspect.is_none() {
        print!("{}", ascii::render_tiles(&data.world));
    }

    Ok(())
}
