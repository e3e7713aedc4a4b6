//! Structuring elements and shape tests for mask generation.

use crate::grid::Grid;
use crate::mask::{Kernel, Mask};

/// 3x3 cross: centre plus the four orthogonal neighbours
pub fn plus3x3() -> Kernel {
    Mask::from_fn(3, 3, |i, _, _| i % 2 == 1 || i == 4)
}

pub fn square2x2() -> Kernel {
    Grid::new(2, 2, true)
}

pub fn square3x3() -> Kernel {
    Grid::new(3, 3, true)
}

/// Fully set rectangular kernel.
pub fn rectangular(width: usize, height: usize) -> Kernel {
    Grid::new(width, height, true)
}

/// Elliptic (circular when square) kernel.
pub fn elliptic(width: usize, height: usize) -> Kernel {
    ellipse_mask(width, height, 0, 0, 1.0, 1.0)
}

/// Build a predicate testing whether `(row, col)` lies inside an ellipse
/// inscribed in a `width` x `height` grid.
///
/// The centre can be shifted with the offsets and each semi-axis scaled
/// independently (0.8 keeps the ellipse well inside the grid).
pub fn ellipse_test(
    width: usize,
    height: usize,
    offset_x: i64,
    offset_y: i64,
    scale_x: f64,
    scale_y: f64,
) -> impl Fn(usize, usize) -> bool {
    let cx = (width / 2) as i64 + offset_x;
    let cy = (height / 2) as i64 + offset_y;
    let a2 = ((width as i64 - (cx + 1)) as f64 * scale_x).powi(2);
    let b2 = ((height as i64 - (cy + 1)) as f64 * scale_y).powi(2);

    move |row, col| {
        let dy = row as f64 - cy as f64;
        let dx = col as f64 - cx as f64;
        dy * dy / b2 + dx * dx / a2 < 1.0
    }
}

/// Mask of the cells inside an ellipse, see [`ellipse_test`].
pub fn ellipse_mask(
    width: usize,
    height: usize,
    offset_x: i64,
    offset_y: i64,
    scale_x: f64,
    scale_y: f64,
) -> Mask {
    let inside = ellipse_test(width, height, offset_x, offset_y, scale_x, scale_y);
    Grid::from_fn(width, height, |_, row, col| inside(row, col))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plus_shape() {
        let plus = plus3x3();
        assert_eq!(plus, Mask::from_bits(3, 3, &[0, 1, 0, 1, 1, 1, 0, 1, 0]).unwrap());
        assert_eq!(plus.reflect(true, true), plus);
    }

    #[test]
    fn test_square2x2_anchors_bottom_right() {
        let block = Mask::from_bits(
            4,
            4,
            &[
                0, 0, 0, 0, //
                0, 1, 1, 0, //
                0, 1, 1, 0, //
                0, 0, 0, 0, //
            ],
        )
        .unwrap();
        let eroded = block.erode(&square2x2(), false);
        assert_eq!(eroded.count(), 1);
        assert!(*eroded.get(2, 2).unwrap());

        let point = Mask::from_bits(3, 3, &[0, 0, 0, 0, 1, 0, 0, 0, 0]).unwrap();
        let grown = point.dilate(&square2x2());
        assert_eq!(grown, Mask::from_bits(3, 3, &[0, 0, 0, 0, 1, 1, 0, 1, 1]).unwrap());
    }

    #[test]
    fn test_ellipse_is_centred() {
        let mask = ellipse_mask(32, 24, 0, 0, 0.8, 0.8);
        assert!(*mask.get(12, 16).unwrap());
        assert!(!*mask.get(0, 0).unwrap());
        assert!(!*mask.get(23, 31).unwrap());
        assert!(!*mask.get(12, 0).unwrap());
    }

    #[test]
    fn test_elliptic_kernel_symmetric() {
        let kernel = elliptic(5, 5);
        assert!(*kernel.get(2, 2).unwrap());
        assert_eq!(kernel.reflect(true, true), kernel);
        assert!(kernel.count() < 25);
    }
}
