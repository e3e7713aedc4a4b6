//! Numeric grids: noise fields, light intensity and other continuous values.

use crate::clamp::Clamp;
use crate::error::Result;
use crate::grid::Grid;
use crate::mask::Mask;

/// Dense numeric grid
pub type Bitmap = Grid<f64>;

impl Grid<f64> {
    pub fn less_than(&self, rhs: &Bitmap) -> Result<Mask> {
        self.ensure_same_size(rhs)?;
        Ok(self.map(|&value, i, _, _| value < rhs[i]))
    }

    pub fn less_than_scalar(&self, rhs: f64) -> Mask {
        self.map(|&value, _, _, _| value < rhs)
    }

    pub fn greater_than(&self, rhs: &Bitmap) -> Result<Mask> {
        self.ensure_same_size(rhs)?;
        Ok(self.map(|&value, i, _, _| value > rhs[i]))
    }

    pub fn greater_than_scalar(&self, rhs: f64) -> Mask {
        self.map(|&value, _, _, _| value > rhs)
    }

    /// Element-wise addition, clamped afterwards.
    pub fn add(&self, rhs: &Bitmap, clamp: &Clamp) -> Result<Bitmap> {
        self.ensure_same_size(rhs)?;
        self.try_map(|&value, i, _, _| clamp.apply(value + rhs[i]))
    }

    pub fn add_scalar(&self, rhs: f64, clamp: &Clamp) -> Result<Bitmap> {
        self.try_map(|&value, _, _, _| clamp.apply(value + rhs))
    }

    /// Element-wise subtraction, clamped afterwards.
    pub fn subtract(&self, rhs: &Bitmap, clamp: &Clamp) -> Result<Bitmap> {
        self.ensure_same_size(rhs)?;
        self.try_map(|&value, i, _, _| clamp.apply(value - rhs[i]))
    }

    pub fn subtract_scalar(&self, rhs: f64, clamp: &Clamp) -> Result<Bitmap> {
        self.try_map(|&value, _, _, _| clamp.apply(value - rhs))
    }

    /// Element-wise multiplication, clamped afterwards.
    pub fn multiply(&self, rhs: &Bitmap, clamp: &Clamp) -> Result<Bitmap> {
        self.ensure_same_size(rhs)?;
        self.try_map(|&value, i, _, _| clamp.apply(value * rhs[i]))
    }

    pub fn multiply_scalar(&self, rhs: f64, clamp: &Clamp) -> Result<Bitmap> {
        self.try_map(|&value, _, _, _| clamp.apply(value * rhs))
    }

    /// Sample at fractional `(x, y)` = `(col, row)` using bilinear interpolation.
    /// Coordinates are clamped to the grid. An empty bitmap samples as 0.
    pub fn sample_bilinear(&self, x: f64, y: f64) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        let max_x = (self.width - 1) as f64;
        let max_y = (self.height - 1) as f64;
        let x = x.clamp(0.0, max_x);
        let y = y.clamp(0.0, max_y);

        let x0 = x.floor();
        let y0 = y.floor();
        let fx = x - x0;
        let fy = y - y0;
        let x1 = (x0 + 1.0).min(max_x);
        let y1 = (y0 + 1.0).min(max_y);

        let at = |x: f64, y: f64| self[y as usize * self.width + x as usize];
        let v00 = at(x0, y0);
        let v10 = at(x1, y0);
        let v01 = at(x0, y1);
        let v11 = at(x1, y1);

        let v0 = v00 * (1.0 - fx) + v10 * fx;
        let v1 = v01 * (1.0 - fx) + v11 * fx;
        v0 * (1.0 - fy) + v1 * fy
    }

    /// Resize to an absolute size with bilinear sampling.
    pub fn resize(&self, width: usize, height: usize) -> Bitmap {
        if self.is_empty() {
            return Grid::new(width, height, 0.0);
        }
        let col_ratio = width as f64 / self.width as f64;
        let row_ratio = height as f64 / self.height as f64;

        Grid::from_fn(width, height, |_, row, col| {
            self.sample_bilinear(col as f64 / col_ratio, row as f64 / row_ratio)
        })
    }

    /// Resize by a relative scale factor.
    pub fn resize_scale(&self, scale: f64) -> Bitmap {
        let width = (self.width as f64 * scale).floor() as usize;
        let height = (self.height as f64 * scale).floor() as usize;
        self.resize(width, height)
    }

    /// Smallest and largest values, `None` for an empty bitmap.
    pub fn min_max(&self) -> Option<(f64, f64)> {
        self.fields().iter().fold(None, |acc, &v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
    }

    /// Linearly rescale so the values span 0..1. A flat bitmap maps to zeros.
    pub fn normalized(&self) -> Bitmap {
        match self.min_max() {
            Some((lo, hi)) if hi > lo => self.map(|&v, _, _, _| (v - lo) / (hi - lo)),
            _ => Grid::new(self.width, self.height, 0.0),
        }
    }

    /// Convert 0..1 values to 8-bit greyscale, clamping to the byte range.
    pub fn to_greyscale(&self) -> Result<Grid<u8>> {
        self.try_map(|&v, _, _, _| Ok(Clamp::UINT8_NOWRAP.apply(v * 255.0)?.round() as u8))
    }
}
