//! Boolean masks and binary morphology.
//!
//! A mask marks occupancy, opacity or a selection of cells. Kernels are just
//! small masks used as structuring elements.

use crate::error::{Result, WorldError};
use crate::grid::Grid;

/// Dense boolean grid
pub type Mask = Grid<bool>;

/// Structuring element for morphological operators (typically 3x3)
pub type Kernel = Mask;

impl Grid<bool> {
    /// Build a mask from 0/1 literals, row-major. Any non-zero value is `true`.
    pub fn from_bits(width: usize, height: usize, bits: &[u8]) -> Result<Mask> {
        Grid::from_vec(width, height, bits.iter().map(|&b| b != 0).collect())
    }

    /// Number of `true` cells.
    pub fn count(&self) -> usize {
        self.fields().iter().filter(|&&bit| bit).count()
    }

    /// Cell-wise AND
    pub fn intersect(&self, rhs: &Mask) -> Result<Mask> {
        self.ensure_same_size(rhs)?;
        Ok(self.map(|&bit, i, _, _| bit && rhs[i]))
    }

    /// Cell-wise OR
    pub fn union(&self, rhs: &Mask) -> Result<Mask> {
        self.ensure_same_size(rhs)?;
        Ok(self.map(|&bit, i, _, _| bit || rhs[i]))
    }

    /// Cell-wise NOT
    pub fn complement(&self) -> Mask {
        self.map(|&bit, _, _, _| !bit)
    }

    /// Morphological erosion.
    ///
    /// A cell stays set only if every cell under the kernel's set positions is
    /// set. Positions that fall off the grid read as `include_edges`, so `true`
    /// treats the outside as solid and `false` treats it as open.
    pub fn erode(&self, kernel: &Kernel, include_edges: bool) -> Mask {
        let k_left = -((kernel.width / 2) as isize);
        let k_up = -((kernel.height / 2) as isize);

        // Only the set kernel positions matter
        let offsets: Vec<(isize, isize)> = kernel
            .iter()
            .filter(|(_, _, &bit)| bit)
            .map(|(k_row, k_col, _)| (k_row as isize + k_up, k_col as isize + k_left))
            .collect();

        self.map(|_, _, row, col| {
            offsets.iter().all(|&(d_row, d_col)| {
                match self.row_col_to_index(row as isize + d_row, col as isize + d_col) {
                    Ok(i) => self[i],
                    Err(_) => include_edges,
                }
            })
        })
    }

    /// Morphological dilation: the complement eroded by the point-reflected kernel.
    pub fn dilate(&self, kernel: &Kernel) -> Mask {
        self.complement()
            .erode(&kernel.reflect(true, true), true)
            .complement()
    }

    /// Erode then dilate. Removes protrusions and specks smaller than the kernel.
    pub fn open(&self, kernel: &Kernel) -> Mask {
        self.erode(kernel, true).dilate(kernel)
    }

    /// Dilate then erode. Fills holes smaller than the kernel.
    pub fn close(&self, kernel: &Kernel) -> Mask {
        self.dilate(kernel).erode(kernel, true)
    }

    /// Hit-or-miss transform with two disjoint kernels: cells where `hit` fits
    /// inside the mask and `miss` fits inside its complement.
    pub fn hit_or_miss(&self, hit: &Kernel, miss: &Kernel) -> Mask {
        let hits = self.erode(hit, true);
        let misses = self.complement().erode(miss, true);
        hits.map(|&bit, i, _, _| bit && misses[i])
    }

    /// Hit-or-miss using the complement of `hit` as the miss kernel.
    pub fn hit_or_miss_exact(&self, hit: &Kernel) -> Mask {
        self.hit_or_miss(hit, &hit.complement())
    }

    /// Resize to an absolute size with nearest-neighbour sampling.
    pub fn resize(&self, width: usize, height: usize) -> Mask {
        if self.is_empty() {
            return Grid::new(width, height, false);
        }
        let col_ratio = width as f64 / self.width as f64;
        let row_ratio = height as f64 / self.height as f64;

        Grid::from_fn(width, height, |_, row, col| {
            let sample_row = ((row as f64 / row_ratio) as usize).min(self.height - 1);
            let sample_col = ((col as f64 / col_ratio) as usize).min(self.width - 1);
            self[sample_row * self.width + sample_col]
        })
    }

    /// Resize by a relative scale factor.
    pub fn resize_scale(&self, scale: f64) -> Mask {
        let width = (self.width as f64 * scale).floor() as usize;
        let height = (self.height as f64 * scale).floor() as usize;
        self.resize(width, height)
    }

    /// Subset test, used mostly by tests and sanity checks.
    pub fn is_subset_of(&self, other: &Mask) -> Result<bool> {
        if !self.same_size(other) {
            return Err(WorldError::SizeMismatch {
                expected: (self.width, self.height),
                found: (other.width, other.height),
            });
        }
        Ok(self.fields().iter().zip(other.fields()).all(|(&a, &b)| !a || b))
    }
}
