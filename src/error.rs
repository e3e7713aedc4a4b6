//! Error types for world generation

use thiserror::Error;

/// Main error type for the generator
#[derive(Debug, Error)]
pub enum WorldError {
    #[error("Row or column indices out of bounds ({row}, {col}) for {width}x{height} grid")]
    OutOfBounds {
        row: isize,
        col: isize,
        width: usize,
        height: usize,
    },

    #[error("Grid size mismatch: expected {}x{}, found {}x{}", expected.0, expected.1, found.0, found.1)]
    SizeMismatch {
        expected: (usize, usize),
        found: (usize, usize),
    },

    #[error("Expected {expected} fields, found {found}")]
    InvalidLength { expected: usize, found: usize },

    #[error("Value {0} must be finite and real")]
    NonFinite(f64),

    #[error("Invalid cardinal binary string: {0:?}")]
    InvalidBinaryString(String),

    #[error("No tile variant for {tile} with key {key}")]
    MissingVariant { tile: String, key: String },

    #[error("{0} must be initialised first")]
    Uninitialized(&'static str),

    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, WorldError>;
