//! # Retrodoc Bitmap
//!
//! Pixel buffers decoded from legacy documents and the encoders that turn
//! them into interchange images.
//!
//! Two back ends are always compiled:
//! - [`EncoderBackend::Png`]: palette, RGB or RGBA PNG
//! - [`EncoderBackend::Pnm`]: PBM for monochrome, PPM for indexed and opaque
//!   color, 32-bit BMP for color with alpha
//!
//! The `png` cargo feature (on by default) decides which one
//! [`EncoderBackend::default`] returns.

pub mod bitmap;
pub mod error;
pub mod picture;
pub mod png;
pub mod pnm;

use serde::{Deserialize, Serialize};

pub use bitmap::{Bitmap, BitmapBw, BitmapColor, BitmapIndexed, PixelGrid};
pub use error::BitmapError;
pub use picture::{average_color, guess_mime, summarize, PictureSummary};

/// Largest width or height accepted by the encoders.
pub const MAX_DIMENSION: usize = i32::MAX as usize;

pub(crate) fn checked_mul(a: usize, b: usize, what: &'static str) -> Result<usize, BitmapError> {
    a.checked_mul(b).ok_or(BitmapError::SizeOverflow { what })
}

/// Output family used by [`Bitmap::encode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EncoderBackend {
    Png,
    Pnm,
}

impl Default for EncoderBackend {
    fn default() -> Self {
        if cfg!(feature = "png") {
            EncoderBackend::Png
        } else {
            EncoderBackend::Pnm
        }
    }
}

/// Encoded bytes together with their MIME type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    pub mime: String,
    pub data: Vec<u8>,
}

impl Bitmap {
    /// Encodes the bitmap with the given back end.
    pub fn encode(&self, backend: EncoderBackend) -> Result<EncodedImage, BitmapError> {
        let (mime, data) = match (backend, self) {
            (EncoderBackend::Png, Bitmap::Monochrome(b)) => ("image/png", png::encode_monochrome(b)?),
            (EncoderBackend::Png, Bitmap::Indexed(b)) => ("image/png", png::encode_indexed(b)?),
            (EncoderBackend::Png, Bitmap::Color(b)) => ("image/png", png::encode_color(b)?),
            (EncoderBackend::Pnm, Bitmap::Monochrome(b)) => ("image/pbm", pnm::encode_pbm(b)?),
            (EncoderBackend::Pnm, Bitmap::Indexed(b)) => ("image/ppm", pnm::encode_ppm_indexed(b)?),
            (EncoderBackend::Pnm, Bitmap::Color(b)) if b.has_alpha() => {
                ("image/bmp", pnm::encode_bmp(b)?)
            }
            (EncoderBackend::Pnm, Bitmap::Color(b)) => ("image/ppm", pnm::encode_ppm_color(b)?),
        };
        tracing::trace!(mime, bytes = data.len(), size = %self.size(), "Encoded bitmap");
        Ok(EncodedImage {
            mime: mime.to_string(),
            data,
        })
    }
}
