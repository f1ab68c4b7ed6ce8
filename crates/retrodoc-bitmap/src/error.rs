//! Error types for the bitmap crate.
//!
//! Every precondition is checked before an output buffer is allocated, so a
//! failed encode never leaves partial image data behind.

use std::io;
use thiserror::Error;

/// Errors that can occur while building or encoding a bitmap.
#[derive(Error, Debug)]
pub enum BitmapError {
    /// Width or height is zero or negative.
    #[error("Invalid bitmap dimensions {width}x{height}")]
    InvalidDimensions { width: i64, height: i64 },

    /// A byte count does not fit in memory or in the file format's fields.
    #[error("Bitmap size overflow while computing {what}")]
    SizeOverflow { what: &'static str },

    /// An indexed bitmap was given no palette.
    #[error("Indexed bitmap has an empty palette")]
    EmptyPalette,

    /// A pixel references a palette entry that does not exist.
    #[error("Palette index {index} out of range (palette has {len} entries)")]
    IndexOutOfRange { index: usize, len: usize },

    /// A cell or row outside the bitmap was addressed.
    #[error("Position {x}x{y} is outside the bitmap")]
    OutOfBounds { x: usize, y: usize },

    /// A row of the wrong length was supplied.
    #[error("Row has {actual} cells, expected {expected}")]
    RowLength { expected: usize, actual: usize },

    /// I/O error from the compressor.
    #[error("Compression error: {0}")]
    Compression(#[from] io::Error),

    /// An embedded picture could not be decoded.
    #[error("Cannot decode picture: {0}")]
    Decode(#[from] image::ImageError),
}

impl BitmapError {
    /// True for conditions caused by bitmap dimensions.
    pub fn is_degenerate(&self) -> bool {
        matches!(
            self,
            BitmapError::InvalidDimensions { .. } | BitmapError::SizeOverflow { .. }
        )
    }
}
