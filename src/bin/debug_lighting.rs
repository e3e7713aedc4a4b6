//! Debug tool for comparing illumination parameters visually
//! Lights one world at several quality/reflection settings, one PNG each

use std::path::PathBuf;
use std::time::Instant;

use tile_world::config::{IlluminationParams, WorldConfig};
use tile_world::error::Result;
use tile_world::export;
use tile_world::illumination;
use tile_world::seeds::WorldSeeds;
use tile_world::world;

const WIDTH: usize = 64;
const HEIGHT: usize = 48;
const SEED: u64 = 42;
const SCALE: u32 = 8;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    println!("Generating lighting comparison...");

    let config = WorldConfig {
        width: WIDTH,
        height: HEIGHT,
        illumination: IlluminationParams::fast(),
        ..Default::default()
    };
    let data = world::generate_world(&config, &WorldSeeds::from_master(SEED))?;

    let variants: [(usize, usize); 6] = [(3, 0), (5, 0), (9, 0), (9, 1), (17, 1), (17, 3)];

    for (quality, reflections) in variants {
        let params = IlluminationParams {
            quality,
            reflections,
            ..config.illumination.clone()
        };

        let start = Instant::now();
        let light = illumination::compute_global_illumination(&data.world, &params);
        let elapsed = start.elapsed();

        let (lo, hi) = light.min_max().unwrap_or((0.0, 0.0));
        println!(
            "  quality {:>2}, reflections {}: {:>8.1?}, light {:.2} to {:.2}",
            quality, reflections, elapsed, lo, hi
        );

        let path = PathBuf::from(format!("lighting_q{quality}_r{reflections}.png"));
        export::export_world_png(&data.world, Some(&light), SCALE, &path)?;
    }

    export::export_world_png(&data.world, None, SCALE, &PathBuf::from("lighting_unlit.png"))?;
    println!("Saved {} comparison images", variants.len() + 1);

    Ok(())
}
