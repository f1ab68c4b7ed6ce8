//! Error types for the graphics crate

use retrodoc_bitmap::BitmapError;
use thiserror::Error;

/// Errors raised while building or rasterizing styles.
#[derive(Error, Debug)]
pub enum StyleError {
    /// Bit patterns are square with a side of 8, 16 or 32 pixels
    #[error("Invalid pattern dimension {0}, expected 8, 16 or 32")]
    InvalidPatternDimension(i32),

    /// The packed bits do not cover the pattern
    #[error("Pattern data has {actual} bytes, expected {expected}")]
    PatternDataLength { expected: usize, actual: usize },

    /// The pattern is neither a bit grid nor a picture
    #[error("Pattern is not rasterizable: {0}")]
    NotRasterizable(String),

    /// The bitmap encoder failed
    #[error(transparent)]
    Bitmap(#[from] BitmapError),
}

pub type Result<T> = std::result::Result<T, StyleError>;
