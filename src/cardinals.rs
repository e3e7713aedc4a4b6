//! Four-neighbour adjacency codes used to pick tile art variants.
//!
//! Bits follow the NESW convention with north as the most significant bit, so
//! `"1000"` is "north only" and `"0001"` is "west only". The binary string is
//! the key into the variant tables in [`crate::tileset`].

use serde::{Deserialize, Serialize};

use crate::error::{Result, WorldError};
use crate::mask::Mask;

/// Which orthogonal neighbours are set
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cardinals {
    pub north: bool,
    pub east: bool,
    pub south: bool,
    pub west: bool,
}

impl Cardinals {
    pub const NONE: Cardinals = Cardinals::from_bits(false, false, false, false);

    pub const fn from_bits(north: bool, east: bool, south: bool, west: bool) -> Self {
        Self { north, east, south, west }
    }

    /// Decode a 4-bit code (only the low four bits are read).
    pub const fn from_number(code: u8) -> Self {
        Self {
            north: code & 0b1000 != 0,
            east: code & 0b0100 != 0,
            south: code & 0b0010 != 0,
            west: code & 0b0001 != 0,
        }
    }

    /// Parse a 4-character string of `0`/`1`.
    pub fn from_binary_string(binary: &str) -> Result<Self> {
        if binary.len() != 4 || !binary.bytes().all(|b| b == b'0' || b == b'1') {
            return Err(WorldError::InvalidBinaryString(binary.to_string()));
        }
        let code = u8::from_str_radix(binary, 2)
            .map_err(|_| WorldError::InvalidBinaryString(binary.to_string()))?;
        Ok(Self::from_number(code))
    }

    pub const fn as_number(&self) -> u8 {
        (self.north as u8) << 3 | (self.east as u8) << 2 | (self.south as u8) << 1 | self.west as u8
    }

    /// Zero-padded 4-character key, e.g. `"0101"`.
    pub fn as_binary_string(&self) -> String {
        format!("{:04b}", self.as_number())
    }
}

impl std::fmt::Display for Cardinals {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04b}", self.as_number())
    }
}

/// How neighbours beyond the mask edge are read
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Boundary {
    /// Off-grid neighbours read as this value
    Value(bool),
    /// Wrap to the opposite edge (toroidal)
    Wrap,
}

impl Boundary {
    /// Off-grid is absent
    pub const OPEN: Boundary = Boundary::Value(false);
    /// Off-grid is present
    pub const SOLID: Boundary = Boundary::Value(true);
}

impl Default for Boundary {
    fn default() -> Self {
        Boundary::OPEN
    }
}

/// Compute the adjacency code of one cell in a mask.
///
/// The cell itself must lie inside the mask; only its neighbours get the
/// boundary treatment.
pub fn cardinals_from_mask(mask: &Mask, row: usize, col: usize, boundary: Boundary) -> Result<Cardinals> {
    // Fails for a centre outside the grid
    mask.row_col_to_index(row as isize, col as isize)?;

    let neighbour = |d_row: isize, d_col: isize| -> Result<bool> {
        let n_row = row as isize + d_row;
        let n_col = col as isize + d_col;
        let off_grid = n_row < 0
            || n_col < 0
            || n_row >= mask.height as isize
            || n_col >= mask.width as isize;

        match (off_grid, boundary) {
            (false, _) => Ok(mask[mask.row_col_to_index(n_row, n_col)?]),
            (true, Boundary::Value(value)) => Ok(value),
            (true, Boundary::Wrap) => {
                let w_row = n_row.rem_euclid(mask.height as isize);
                let w_col = n_col.rem_euclid(mask.width as isize);
                Ok(mask[mask.row_col_to_index(w_row, w_col)?])
            }
        }
    };

    Ok(Cardinals {
        north: neighbour(-1, 0)?,
        east: neighbour(0, 1)?,
        south: neighbour(1, 0)?,
        west: neighbour(0, -1)?,
    })
}
