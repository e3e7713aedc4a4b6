//! Grid raycasting (DDA traversal) over an occupancy mask.
//!
//! Rays start at the centre of a cell and step cell to cell along whichever
//! axis boundary is nearer, testing each entered cell against the mask
//! (`true` = wall). Directions are in math orientation (+y up, so 90 degrees
//! points north / towards row 0).
//!
//! When a ray passes exactly through a grid corner it steps diagonally in one
//! move. The diagonal cell blocks it as usual. The two cells sharing the corner
//! only block it together, a single one of them is grazed and ignored.

use glam::DVec2;

use crate::angle::{angle_of, Angle};
use crate::mask::Mask;

/// Default step budget for a single cast
pub const DEFAULT_MAX_STEPS: usize = 100;

/// Side distances closer than this count as a corner crossing
const CORNER_EPSILON: f64 = 1e-9;

/// Outcome of a single cast
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CastResult {
    pub hit_count: usize,
    /// Distance from the start cell to the first wall cell
    pub first_hit_distance: f64,
    /// Distance from the start cell to the last wall cell
    pub last_hit_distance: f64,
    /// Distance to the last cell the ray entered
    pub distance_travelled: f64,
    /// Direction of the ray mirrored off the first wall face it hit
    pub reflection_angle: Angle,
    /// Last open cell `(row, col)` before the first hit, the origin for a bounce
    pub last_free_cell: (usize, usize),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Side {
    /// Crossed a vertical grid line
    X,
    /// Crossed a horizontal grid line
    Y,
    /// Crossed both at once
    Corner,
}

/// Cast `ray` from the centre of `(start_row, start_col)`.
///
/// The ray's magnitude is its range. The walk stops when the range is used up,
/// after `max_steps` steps, when it leaves the grid, or at the first hit if
/// `stop_early` is set. A zero or non-finite ray never moves.
pub fn cast_ray(
    mask: &Mask,
    start_row: usize,
    start_col: usize,
    ray: DVec2,
    stop_early: bool,
    max_steps: usize,
) -> CastResult {
    let mut result = CastResult {
        hit_count: 0,
        first_hit_distance: 0.0,
        last_hit_distance: 0.0,
        distance_travelled: 0.0,
        reflection_angle: Angle::ZERO,
        last_free_cell: (start_row, start_col),
    };

    let max_length = ray.length();
    if !max_length.is_finite() || max_length == 0.0 {
        return result;
    }

    // +y in a mask is down
    let direction = ray.normalize() * DVec2::new(1.0, -1.0);
    let step_col = axis_step(direction.x);
    let step_row = axis_step(direction.y);
    let delta = DVec2::new(direction.x.recip().abs(), direction.y.recip().abs());
    let mut side_dist = delta * 0.5;

    let start = DVec2::new(start_col as f64, start_row as f64);
    let mut row = start_row as isize;
    let mut col = start_col as isize;
    let mut length = 0.0;

    for _ in 0..max_steps {
        if length >= max_length {
            break;
        }

        let gap = side_dist.x - side_dist.y;
        let side = if gap.abs() < CORNER_EPSILON {
            Side::Corner
        } else if gap < 0.0 {
            Side::X
        } else {
            Side::Y
        };

        let (prev_row, prev_col) = (row, col);
        match side {
            Side::X => {
                side_dist.x += delta.x;
                col += step_col;
            }
            Side::Y => {
                side_dist.y += delta.y;
                row += step_row;
            }
            Side::Corner => {
                side_dist += delta;
                col += step_col;
                row += step_row;
            }
        }

        length = DVec2::new(col as f64, row as f64).distance(start);
        result.distance_travelled = length;

        if row < 0 || col < 0 || row >= mask.height as isize || col >= mask.width as isize {
            break;
        }

        let wall = |r: isize, c: isize| mask[r as usize * mask.width + c as usize];
        let blocked = match side {
            Side::Corner => wall(row, col) || (wall(prev_row, col) && wall(row, prev_col)),
            _ => wall(row, col),
        };

        if !blocked {
            if result.hit_count == 0 {
                result.last_free_cell = (row as usize, col as usize);
            }
            continue;
        }

        if result.hit_count == 0 {
            result.first_hit_distance = length;
            let mirrored = match side {
                Side::X => ray * DVec2::new(-1.0, 1.0),
                Side::Y => ray * DVec2::new(1.0, -1.0),
                Side::Corner => -ray,
            };
            result.reflection_angle = angle_of(mirrored);
        }

        result.last_hit_distance = length;
        result.hit_count += 1;

        if stop_early {
            break;
        }
    }

    result
}

/// Ray in math orientation from one cell centre to another.
pub fn ray_between(from: (usize, usize), to: (usize, usize)) -> DVec2 {
    let (from_row, from_col) = from;
    let (to_row, to_col) = to;
    DVec2::new(
        to_col as f64 - from_col as f64,
        from_row as f64 - to_row as f64,
    )
}

fn axis_step(component: f64) -> isize {
    if component > 0.0 {
        1
    } else if component < 0.0 {
        -1
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::angle::{rotate, vector_from_angle};
    use crate::grid::Grid;

    fn mask3(bits: [u8; 9]) -> Mask {
        Mask::from_bits(3, 3, &bits).unwrap()
    }

    #[test]
    fn test_empty_mask_never_hits() {
        let mask = Grid::new(16, 16, false);
        for degrees in (0..360).step_by(15) {
            let ray = vector_from_angle(Angle::from_degrees(degrees as f64), 5.0);
            let result = cast_ray(&mask, 8, 8, ray, false, 1000);
            assert_eq!(result.hit_count, 0);
        }
    }

    #[test]
    fn test_hits_wall_to_the_north() {
        let mask = mask3([0, 1, 0, 0, 0, 0, 0, 0, 0]);
        let ray = rotate(DVec2::new(1.0, 0.0), Angle::from_degrees(90.0));
        let result = cast_ray(&mask, 1, 1, ray, true, DEFAULT_MAX_STEPS);
        assert_eq!(result.hit_count, 1);
        assert!((result.first_hit_distance - 1.0).abs() < 1e-9);
        assert!((result.reflection_angle.degrees() - 270.0).abs() < 1e-6);
    }

    #[test]
    fn test_sealed_diagonal_seams_block() {
        let cases = [
            ([0, 1, 0, 1, 0, 0, 0, 0, 0], 135.0),
            ([0, 1, 0, 0, 0, 1, 0, 0, 0], 45.0),
            ([0, 0, 0, 1, 0, 0, 0, 1, 0], 225.0),
            ([0, 0, 0, 0, 0, 1, 0, 1, 0], -45.0),
        ];
        for (bits, degrees) in cases {
            let ray = rotate(DVec2::new(1.0, 0.0), Angle::from_degrees(degrees));
            let result = cast_ray(&mask3(bits), 1, 1, ray, true, DEFAULT_MAX_STEPS);
            assert_eq!(result.hit_count, 1, "seam at {degrees} degrees");
        }
    }

    #[test]
    fn test_single_corner_neighbour_is_grazed() {
        let ray = DVec2::new(0.5, -0.5);
        let right = mask3([0, 0, 0, 0, 0, 1, 0, 0, 0]);
        assert_eq!(cast_ray(&right, 1, 1, ray, true, DEFAULT_MAX_STEPS).hit_count, 0);
        let below = mask3([0, 0, 0, 0, 0, 0, 0, 1, 0]);
        assert_eq!(cast_ray(&below, 1, 1, ray, true, DEFAULT_MAX_STEPS).hit_count, 0);
    }

    #[test]
    fn test_diagonal_cell_blocks() {
        let mask = mask3([0, 0, 0, 0, 0, 0, 0, 0, 1]);
        let result = cast_ray(&mask, 1, 1, DVec2::new(2.0, -2.0), true, DEFAULT_MAX_STEPS);
        assert_eq!(result.hit_count, 1);
        assert!((result.first_hit_distance - 2f64.sqrt()).abs() < 1e-9);
        assert!((result.reflection_angle.degrees() - 135.0).abs() < 1e-6);
    }

    #[test]
    fn test_counts_every_wall_without_stop_early() {
        let mask = Mask::from_bits(6, 1, &[0, 1, 0, 1, 1, 0]).unwrap();
        let ray = DVec2::new(10.0, 0.0);
        let result = cast_ray(&mask, 0, 0, ray, false, DEFAULT_MAX_STEPS);
        assert_eq!(result.hit_count, 3);
        assert!((result.first_hit_distance - 1.0).abs() < 1e-9);
        assert!((result.last_hit_distance - 4.0).abs() < 1e-9);
        assert_eq!(result.last_free_cell, (0, 0));
        // East wall mirrors the ray west
        assert!((result.reflection_angle.degrees() - 180.0).abs() < 1e-6);

        let early = cast_ray(&mask, 0, 0, ray, true, DEFAULT_MAX_STEPS);
        assert_eq!(early.hit_count, 1);
    }

    #[test]
    fn test_stops_at_grid_edge_and_step_budget() {
        let mask = Grid::new(5, 1, false);
        let result = cast_ray(&mask, 0, 0, DVec2::new(1000.0, 0.0), true, DEFAULT_MAX_STEPS);
        assert!((result.distance_travelled - 5.0).abs() < 1e-9);
        assert_eq!(result.last_free_cell, (0, 4));

        let wide = Grid::new(500, 1, false);
        let capped = cast_ray(&wide, 0, 0, DVec2::new(1000.0, 0.0), true, 10);
        assert!((capped.distance_travelled - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_range_limits_travel() {
        let mask = Mask::from_bits(8, 1, &[0, 0, 0, 0, 0, 1, 0, 0]).unwrap();
        let short = cast_ray(&mask, 0, 0, DVec2::new(3.0, 0.0), true, DEFAULT_MAX_STEPS);
        assert_eq!(short.hit_count, 0);
        assert!((short.distance_travelled - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_degenerate_rays() {
        let mask = Grid::new(3, 3, true);
        assert_eq!(cast_ray(&mask, 1, 1, DVec2::ZERO, true, 10).hit_count, 0);
        assert_eq!(cast_ray(&mask, 1, 1, DVec2::new(f64::NAN, 1.0), true, 10).hit_count, 0);
    }

    #[test]
    fn test_ray_between_is_math_oriented() {
        let ray = ray_between((5, 5), (2, 5));
        assert_eq!(ray, DVec2::new(0.0, 3.0));
    }
}
