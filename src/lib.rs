//! Tile world generation library
//!
//! Re-exports modules for use by binaries and tools.

pub mod angle;
pub mod ascii;
pub mod bitmap;
pub mod cardinals;
pub mod clamp;
pub mod collision;
pub mod config;
pub mod error;
pub mod export;
pub mod grid;
pub mod illumination;
pub mod kernels;
pub mod layers;
pub mod mask;
pub mod noise_field;
pub mod raycast;
pub mod seeds;
pub mod tile;
pub mod tileset;
pub mod world;
