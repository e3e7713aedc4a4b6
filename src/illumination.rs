//! Global illumination and shadows by raycasting over the opacity mask.
//!
//! Global light assumes a very large sun overhead: every open cell casts a fan
//! of rays over the upper half circle, letting each bounce off walls a few
//! times, and keeps the brightest path found with linear falloff by distance.
//! It is an ambient occlusion approximation, not a radiosity solve.

use rayon::prelude::*;

use crate::angle::{vector_from_angle, Angle};
use crate::bitmap::Bitmap;
use crate::config::{IlluminationParams, LightSource};
use crate::error::{Result, WorldError};
use crate::grid::Grid;
use crate::kernels;
use crate::mask::Mask;
use crate::raycast::{cast_ray, ray_between};
use crate::world::{opacity_mask, World};

/// Magnitude of sampling rays, effectively unbounded for a game-sized grid
pub const RAY_MAGNITUDE: f64 = 1000.0;

/// Light level per cell, in `[params.minimum, 1]`.
///
/// Cells enclosed on all four sides by walls get the minimum without casting.
/// Cells are evaluated in parallel; the output is the same as a sequential pass.
pub fn compute_global_illumination(world: &World, params: &IlluminationParams) -> Bitmap {
    let wall_mask = opacity_mask(world);
    // Grid edge is open sky
    let enclosed = wall_mask.erode(&kernels::plus3x3(), false);

    let values: Vec<f64> = (0..wall_mask.len())
        .into_par_iter()
        .map(|i| {
            if enclosed[i] {
                return params.minimum;
            }
            let (row, col) = wall_mask.index_to_row_col(i);
            compute_global_light_at_point(&wall_mask, row, col, params)
        })
        .collect();

    Grid::from_fn(wall_mask.width, wall_mask.height, |i, _, _| values[i])
}

/// Global illumination for a world that may not have been generated yet.
pub fn compute_illumination_checked(world: Option<&World>, params: &IlluminationParams) -> Result<Bitmap> {
    let world = world.ok_or(WorldError::Uninitialized("world"))?;
    Ok(compute_global_illumination(world, params))
}

/// Light reaching one cell.
///
/// `params.quality` rays are spread evenly from 0 to 180 degrees. Each ray is
/// cast up to `reflections + 1` times, bouncing from the last open cell before
/// each hit. A ray contributes `(falloff - travelled) / falloff` once it escapes
/// or has travelled past `falloff`; a ray still bouncing when its casts run
/// out contributes nothing.
pub fn compute_global_light_at_point(
    wall_mask: &Mask,
    row: usize,
    col: usize,
    params: &IlluminationParams,
) -> f64 {
    let angle_step = if params.quality > 1 {
        180.0 / (params.quality - 1) as f64
    } else {
        0.0
    };

    let mut brightest = 0.0_f64;
    for i in 0..params.quality {
        let mut travelled = 0.0;
        let mut origin = (row, col);
        let mut angle = Angle::from_degrees(angle_step * i as f64);

        for _ in 0..=params.reflections {
            let ray = vector_from_angle(angle, RAY_MAGNITUDE);
            let cast = cast_ray(wall_mask, origin.0, origin.1, ray, true, params.max_steps);
            travelled += cast.distance_travelled;

            if cast.hit_count == 0 || travelled > params.falloff {
                brightest = brightest.max((params.falloff - travelled) / params.falloff);
                break;
            }

            origin = cast.last_free_cell;
            angle = cast.reflection_angle;
        }
    }

    brightest.max(params.minimum)
}

/// Walls between every cell and the nearest light.
///
/// Each cell gets the minimum hit count over all lights, so 0 means at least
/// one light reaches it. With no lights every cell is 0.
pub fn compute_shadows(mask: &Mask, lights: &[LightSource], max_steps: usize) -> Bitmap {
    let values: Vec<f64> = (0..mask.len())
        .into_par_iter()
        .map(|i| {
            let (row, col) = mask.index_to_row_col(i);
            lights
                .iter()
                .map(|light| walls_towards(mask, row, col, light, max_steps))
                .min()
                .unwrap_or(0) as f64
        })
        .collect();

    Grid::from_fn(mask.width, mask.height, |i, _, _| values[i])
}

fn walls_towards(mask: &Mask, row: usize, col: usize, light: &LightSource, max_steps: usize) -> usize {
    let ray = match *light {
        // Back along the light's direction of travel
        LightSource::Directional { angle_degrees } => {
            -vector_from_angle(Angle::from_degrees(angle_degrees), RAY_MAGNITUDE)
        }
        LightSource::Point { row: light_row, col: light_col } => {
            ray_between((row, col), (light_row, light_col))
        }
    };
    cast_ray(mask, row, col, ray, false, max_steps).hit_count
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cardinals::Cardinals;
    use crate::tile::{Position, Tile, TileType};

    fn world_from_mask(walls: &Mask) -> World {
        walls.map(|&wall, _, row, col| {
            let tile_type = if wall { TileType::Rock } else { TileType::Void };
            Tile::new(Position::new(row, col), tile_type, Cardinals::NONE)
        })
    }

    fn boxed(size: usize) -> Mask {
        Grid::from_fn(size, size, |_, row, col| {
            row == 0 || col == 0 || row == size - 1 || col == size - 1
        })
    }

    #[test]
    fn test_open_grid_is_bounded() {
        let params = IlluminationParams::fast();
        let world = world_from_mask(&Grid::new(12, 9, false));
        let light = compute_global_illumination(&world, &params);
        for &value in light.fields() {
            assert!(value >= params.minimum && value <= 1.0, "{value}");
        }
    }

    #[test]
    fn test_top_row_sees_the_sky() {
        let params = IlluminationParams::fast();
        let mask = Grid::new(11, 11, false);
        // Straight up leaves the grid after one cell
        let value = compute_global_light_at_point(&mask, 0, 5, &params);
        assert!((value - 0.95).abs() < 1e-9);
    }

    #[test]
    fn test_closed_box_gets_minimum() {
        let mask = boxed(7);
        for reflections in [0, 1, 3] {
            let params = IlluminationParams {
                quality: 9,
                reflections,
                ..Default::default()
            };
            let value = compute_global_light_at_point(&mask, 3, 3, &params);
            assert_eq!(value, params.minimum);
        }
    }

    #[test]
    fn test_enclosed_walls_use_minimum() {
        let params = IlluminationParams::default();
        let mut walls = Grid::new(5, 5, false);
        for row in 1..4 {
            for col in 1..4 {
                walls.set(row, col, true).unwrap();
            }
        }
        let light = compute_global_illumination(&world_from_mask(&walls), &params);
        assert_eq!(*light.get(2, 2).unwrap(), params.minimum);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let params = IlluminationParams {
            quality: 5,
            reflections: 1,
            ..Default::default()
        };
        let walls = Mask::from_bits(
            6,
            4,
            &[
                0, 0, 0, 0, 0, 0, //
                0, 1, 1, 0, 0, 0, //
                0, 0, 1, 0, 1, 0, //
                1, 1, 1, 1, 1, 1, //
            ],
        )
        .unwrap();
        let world = world_from_mask(&walls);
        let enclosed = walls.erode(&kernels::plus3x3(), false);

        let parallel = compute_global_illumination(&world, &params);
        let sequential = walls.map(|_, i, row, col| {
            if enclosed[i] {
                params.minimum
            } else {
                compute_global_light_at_point(&walls, row, col, &params)
            }
        });
        assert_eq!(parallel, sequential);
    }

    #[test]
    fn test_zero_quality_is_minimum() {
        let params = IlluminationParams {
            quality: 0,
            ..Default::default()
        };
        let mask = Grid::new(4, 4, false);
        assert_eq!(compute_global_light_at_point(&mask, 1, 1, &params), params.minimum);
    }

    #[test]
    fn test_checked_requires_world() {
        let params = IlluminationParams::fast();
        assert!(matches!(
            compute_illumination_checked(None, &params),
            Err(WorldError::Uninitialized("world"))
        ));
        let world = world_from_mask(&Grid::new(3, 3, false));
        assert!(compute_illumination_checked(Some(&world), &params).is_ok());
    }

    #[test]
    fn test_directional_shadow_under_roof() {
        let mask = Mask::from_bits(
            3,
            4,
            &[
                0, 0, 0, //
                1, 1, 1, //
                0, 0, 0, //
                0, 0, 0, //
            ],
        )
        .unwrap();
        let sun = [LightSource::Directional { angle_degrees: 270.0 }];
        let shadows = compute_shadows(&mask, &sun, 100);
        assert_eq!(*shadows.get(0, 1).unwrap(), 0.0);
        assert_eq!(*shadows.get(2, 1).unwrap(), 1.0);
        assert_eq!(*shadows.get(3, 1).unwrap(), 1.0);
    }

    #[test]
    fn test_point_light_takes_minimum() {
        let mask = Mask::from_bits(5, 1, &[0, 0, 1, 0, 0]).unwrap();
        let left = LightSource::Point { row: 0, col: 0 };
        let right = LightSource::Point { row: 0, col: 4 };

        let only_left = compute_shadows(&mask, &[left], 100);
        assert_eq!(*only_left.get(0, 4).unwrap(), 1.0);
        assert_eq!(*only_left.get(0, 1).unwrap(), 0.0);

        let both = compute_shadows(&mask, &[left, right], 100);
        assert_eq!(*both.get(0, 4).unwrap(), 0.0);
        assert_eq!(*both.get(0, 0).unwrap(), 0.0);
    }

    #[test]
    fn test_no_lights_no_shadows() {
        let mask = Grid::new(3, 3, true);
        let shadows = compute_shadows(&mask, &[], 100);
        assert!(shadows.fields().iter().all(|&v| v == 0.0));
    }
}
