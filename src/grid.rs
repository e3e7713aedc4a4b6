//! Dense row-major 2D grid.
//!
//! `Grid<T>` is the container every generation stage works on. Its size is
//! fixed at construction; transformations return new grids. Masks and bitmaps
//! are `Grid<bool>` and `Grid<f64>` with their own inherent methods in
//! [`crate::mask`] and [`crate::bitmap`].

use std::ops::Index;

use crate::error::{Result, WorldError};

/// A 2D grid stored row-major (`index = row * width + col`).
#[derive(Clone, Debug, PartialEq)]
pub struct Grid<T> {
    pub width: usize,
    pub height: usize,
    fields: Vec<T>,
}

impl<T: Clone> Grid<T> {
    /// Create a grid filled with a single value.
    pub fn new(width: usize, height: usize, value: T) -> Self {
        Self {
            width,
            height,
            fields: vec![value; width * height],
        }
    }

    /// Create a copy flipped about its centre. Used to reflect kernels.
    ///
    /// `mirror_x` reverses the columns of every row, `mirror_y` reverses the
    /// order of the rows. Both together is a 180 degree rotation.
    pub fn reflect(&self, mirror_x: bool, mirror_y: bool) -> Self {
        let (width, height) = (self.width, self.height);
        Grid::from_fn(width, height, |_, row, col| {
            let src_row = if mirror_y { height - 1 - row } else { row };
            let src_col = if mirror_x { width - 1 - col } else { col };
            self.fields[src_row * width + src_col].clone()
        })
    }

    /// Extract a `width` x `height` window centred on a point.
    /// Cells falling outside this grid take `edge_value`.
    pub fn rect_around(
        &self,
        row: usize,
        col: usize,
        width: usize,
        height: usize,
        edge_value: T,
    ) -> Grid<T> {
        let left = -((width / 2) as isize);
        let up = -((height / 2) as isize);

        Grid::from_fn(width, height, |_, k_row, k_col| {
            let test_row = row as isize + up + k_row as isize;
            let test_col = col as isize + left + k_col as isize;
            match self.row_col_to_index(test_row, test_col) {
                Ok(i) => self.fields[i].clone(),
                Err(_) => edge_value.clone(),
            }
        })
    }
}

impl<T> Grid<T> {
    /// Create a grid from a flat row-major sequence of `width * height` fields.
    pub fn from_vec(width: usize, height: usize, fields: Vec<T>) -> Result<Self> {
        if fields.len() != width * height {
            return Err(WorldError::InvalidLength {
                expected: width * height,
                found: fields.len(),
            });
        }
        Ok(Self { width, height, fields })
    }

    /// Create a grid by calling a generator with `(index, row, col)` for every cell.
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize, usize) -> T) -> Self {
        let mut fields = Vec::with_capacity(width * height);
        for row in 0..height {
            for col in 0..width {
                fields.push(f(row * width + col, row, col));
            }
        }
        Self { width, height, fields }
    }

    /// Translate a row/column position to a field index.
    ///
    /// Positions outside the grid are an error rather than being clamped or
    /// wrapped; callers that need edge handling must do it themselves.
    pub fn row_col_to_index(&self, row: isize, col: isize) -> Result<usize> {
        if row < 0 || col < 0 || row as usize >= self.height || col as usize >= self.width {
            return Err(WorldError::OutOfBounds {
                row,
                col,
                width: self.width,
                height: self.height,
            });
        }
        Ok(row as usize * self.width + col as usize)
    }

    /// Translate a field index to `(row, col)`.
    pub fn index_to_row_col(&self, i: usize) -> (usize, usize) {
        (i / self.width, i % self.width)
    }

    pub fn get(&self, row: usize, col: usize) -> Result<&T> {
        let i = self.row_col_to_index(row as isize, col as isize)?;
        Ok(&self.fields[i])
    }

    pub fn get_index(&self, i: usize) -> Option<&T> {
        self.fields.get(i)
    }

    pub fn set(&mut self, row: usize, col: usize, value: T) -> Result<()> {
        let i = self.row_col_to_index(row as isize, col as isize)?;
        self.fields[i] = value;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn fields(&self) -> &[T] {
        &self.fields
    }

    /// Check whether another grid matches this size.
    pub fn same_size<U>(&self, other: &Grid<U>) -> bool {
        self.width == other.width && self.height == other.height
    }

    pub(crate) fn ensure_same_size<U>(&self, other: &Grid<U>) -> Result<()> {
        if self.same_size(other) {
            Ok(())
        } else {
            Err(WorldError::SizeMismatch {
                expected: (self.width, self.height),
                found: (other.width, other.height),
            })
        }
    }

    /// Apply a function to every field as `(value, index, row, col)`,
    /// possibly mapping to another type.
    pub fn map<U>(&self, mut f: impl FnMut(&T, usize, usize, usize) -> U) -> Grid<U> {
        let width = self.width;
        let fields = self
            .fields
            .iter()
            .enumerate()
            .map(|(i, value)| f(value, i, i / width, i % width))
            .collect();
        Grid {
            width: self.width,
            height: self.height,
            fields,
        }
    }

    /// Like [`Grid::map`] but short-circuits on the first error.
    pub fn try_map<U>(
        &self,
        mut f: impl FnMut(&T, usize, usize, usize) -> Result<U>,
    ) -> Result<Grid<U>> {
        let width = self.width;
        let fields = self
            .fields
            .iter()
            .enumerate()
            .map(|(i, value)| f(value, i, i / width, i % width))
            .collect::<Result<Vec<U>>>()?;
        Ok(Grid {
            width: self.width,
            height: self.height,
            fields,
        })
    }

    /// Run a function on every field as `(value, index, row, col)`.
    pub fn for_each(&self, mut f: impl FnMut(&T, usize, usize, usize)) {
        let width = self.width;
        for (i, value) in self.fields.iter().enumerate() {
            f(value, i, i / width, i % width);
        }
    }

    /// Iterate over all cells as `(row, col, &value)`.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &T)> {
        let width = self.width;
        self.fields
            .iter()
            .enumerate()
            .map(move |(i, value)| (i / width, i % width, value))
    }
}

impl<T> Index<usize> for Grid<T> {
    type Output = T;

    fn index(&self, i: usize) -> &T {
        &self.fields[i]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered(width: usize, height: usize) -> Grid<usize> {
        Grid::from_fn(width, height, |i, _, _| i)
    }

    #[test]
    fn test_row_major_indexing() {
        let grid = numbered(4, 3);
        assert_eq!(*grid.get(0, 0).unwrap(), 0);
        assert_eq!(*grid.get(1, 0).unwrap(), 4);
        assert_eq!(*grid.get(2, 3).unwrap(), 11);
        assert_eq!(grid.index_to_row_col(6), (1, 2));
    }

    #[test]
    fn test_out_of_range_is_error() {
        let grid = numbered(4, 3);
        assert!(matches!(
            grid.row_col_to_index(3, 0),
            Err(WorldError::OutOfBounds { row: 3, col: 0, .. })
        ));
        assert!(grid.row_col_to_index(0, 4).is_err());
        assert!(grid.row_col_to_index(-1, 0).is_err());
        assert!(grid.get(0, 4).is_err());
    }

    #[test]
    fn test_from_vec_length_checked() {
        assert!(Grid::from_vec(2, 2, vec![1, 2, 3]).is_err());
        let grid = Grid::from_vec(2, 2, vec![1, 2, 3, 4]).unwrap();
        assert_eq!(*grid.get(1, 0).unwrap(), 3);
    }

    #[test]
    fn test_generator_receives_positions() {
        let grid = Grid::from_fn(3, 2, |i, row, col| (i, row, col));
        assert_eq!(*grid.get(1, 2).unwrap(), (5, 1, 2));
    }

    #[test]
    fn test_reflect_both_twice_is_identity() {
        let grid = numbered(5, 3);
        let flipped = grid.reflect(true, true);
        assert_eq!(flipped.fields()[0], 14);
        assert_eq!(flipped.reflect(true, true), grid);
    }

    #[test]
    fn test_reflect_single_axis() {
        let grid = Grid::from_vec(3, 2, vec![1, 2, 3, 4, 5, 6]).unwrap();
        assert_eq!(grid.reflect(true, false).fields(), &[3, 2, 1, 6, 5, 4]);
        assert_eq!(grid.reflect(false, true).fields(), &[4, 5, 6, 1, 2, 3]);
    }

    #[test]
    fn test_map_and_same_size() {
        let grid = numbered(3, 3);
        let doubled = grid.map(|v, _, _, _| v * 2);
        assert!(grid.same_size(&doubled));
        assert_eq!(*doubled.get(2, 2).unwrap(), 16);
        assert!(!grid.same_size(&numbered(3, 2)));
    }

    #[test]
    fn test_rect_around_uses_edge_value() {
        let grid = numbered(3, 3);
        let window = grid.rect_around(0, 0, 3, 3, 99);
        assert_eq!(window.fields(), &[99, 99, 99, 99, 0, 1, 99, 3, 4]);
    }
}
