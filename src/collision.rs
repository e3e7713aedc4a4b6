//! Screen-space collision against opaque world tiles.
//!
//! Positions are in pixels with +y down, `tile_size` is the on-screen size of
//! one tile. Transparent tiles never block.

use std::f64::consts::SQRT_2;
use std::ops::{BitOr, BitOrAssign};

use glam::DVec2;

use crate::error::Result;
use crate::raycast::{cast_ray, DEFAULT_MAX_STEPS};
use crate::world::{opacity_mask, World};

/// Which axes of a move are blocked
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct CollideFlags(u8);

impl CollideFlags {
    pub const NONE: CollideFlags = CollideFlags(0b00);
    pub const X: CollideFlags = CollideFlags(0b01);
    pub const Y: CollideFlags = CollideFlags(0b10);
    pub const XY: CollideFlags = CollideFlags(0b11);

    pub const fn bits(&self) -> u8 {
        self.0
    }

    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub const fn contains(&self, other: CollideFlags) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for CollideFlags {
    type Output = CollideFlags;

    fn bitor(self, rhs: CollideFlags) -> CollideFlags {
        CollideFlags(self.0 | rhs.0)
    }
}

impl BitOrAssign for CollideFlags {
    fn bitor_assign(&mut self, rhs: CollideFlags) {
        self.0 |= rhs.0;
    }
}

/// Tile containing a screen position, as `(col, row)` in x/y
fn screen_to_tile(position: DVec2, tile_size: DVec2) -> DVec2 {
    (position / tile_size).floor()
}

fn on_screen(world: &World, tile_size: DVec2, position: DVec2) -> bool {
    let size = DVec2::new(world.width as f64, world.height as f64) * tile_size;
    position.x >= 0.0 && position.y >= 0.0 && position.x < size.x && position.y < size.y
}

/// -1, 0 or 1 per axis
fn cardinalise(v: DVec2) -> DVec2 {
    let sign = |c: f64| if c > 0.0 { 1.0 } else if c < 0.0 { -1.0 } else { 0.0 };
    DVec2::new(sign(v.x), sign(v.y))
}

fn clamp_index(value: f64, len: usize) -> usize {
    value.clamp(0.0, len.saturating_sub(1) as f64) as usize
}

/// Opacity of the tiles one x-step and one y-step from `from` towards `to`
fn neighbour_flags(world: &World, from: DVec2, to: DVec2) -> Result<CollideFlags> {
    let step = cardinalise(to - from);
    let x_tile = world.get(
        clamp_index(from.y, world.height),
        clamp_index(from.x + step.x, world.width),
    )?;
    let y_tile = world.get(
        clamp_index(from.y + step.y, world.height),
        clamp_index(from.x, world.width),
    )?;

    let mut flags = CollideFlags::NONE;
    if !x_tile.is_transparent() {
        flags |= CollideFlags::X;
    }
    if !y_tile.is_transparent() {
        flags |= CollideFlags::Y;
    }
    Ok(flags)
}

/// Check a move from `previous` to `current` for collision.
///
/// Moves to a neighbouring tile (or within one) test the tiles one step along
/// x and along y. Longer moves raycast between the two tiles and report both
/// axes on any hit. Moves ending off screen never collide.
pub fn check_collision(world: &World, tile_size: DVec2, previous: DVec2, current: DVec2) -> Result<CollideFlags> {
    if world.is_empty() || !on_screen(world, tile_size, current) {
        return Ok(CollideFlags::NONE);
    }

    let previous_tile = screen_to_tile(previous, tile_size);
    let current_tile = screen_to_tile(current, tile_size);

    if current_tile.distance(previous_tile) <= SQRT_2 {
        return neighbour_flags(world, previous_tile, current_tile);
    }

    let start_row = clamp_index(previous_tile.y, world.height);
    let start_col = clamp_index(previous_tile.x, world.width);
    let delta = current_tile - DVec2::new(start_col as f64, start_row as f64);
    // Screen y is down, rays are +y up
    let ray = DVec2::new(delta.x, -delta.y);

    let cast = cast_ray(&opacity_mask(world), start_row, start_col, ray, true, DEFAULT_MAX_STEPS);
    Ok(if cast.hit_count > 0 {
        CollideFlags::XY
    } else {
        CollideFlags::NONE
    })
}

/// Axes that differ between two tiles
pub fn collision_orientation(start_tile: DVec2, end_tile: DVec2) -> CollideFlags {
    let delta = end_tile - start_tile;
    let mut flags = CollideFlags::NONE;
    if delta.x != 0.0 {
        flags |= CollideFlags::X;
    }
    if delta.y != 0.0 {
        flags |= CollideFlags::Y;
    }
    flags
}

/// Snap a position to the top-left corner of its tile
pub fn align_to_world(position: DVec2, tile_size: DVec2) -> DVec2 {
    screen_to_tile(position, tile_size) * tile_size
}

/// Where a blocked move should end up.
///
/// Blocked axes snap to the tile grid, a free axis keeps the previous
/// position. Unblocked, long or off-screen moves return `current` unchanged.
pub fn collision_location(world: &World, tile_size: DVec2, previous: DVec2, current: DVec2) -> Result<DVec2> {
    if world.is_empty() || !on_screen(world, tile_size, current) {
        return Ok(current);
    }

    let previous_tile = screen_to_tile(previous, tile_size);
    let current_tile = screen_to_tile(current, tile_size);
    if current_tile.distance(previous_tile) > SQRT_2 {
        return Ok(current);
    }

    let aligned = align_to_world(current, tile_size);
    Ok(match neighbour_flags(world, previous_tile, current_tile)? {
        CollideFlags::X => DVec2::new(aligned.x, previous.y),
        CollideFlags::Y => DVec2::new(previous.x, aligned.y),
        CollideFlags::XY => aligned,
        _ => current,
    })
}
