//! Embedded pictures
//!
//! Patterns may hold an already encoded picture instead of a bit grid. The
//! picture is decoded only to learn its size and the color used when a fill
//! must fall back to a solid.

use retrodoc_core::{Color, Vec2i};

use crate::error::BitmapError;

/// What the style layer needs to know about an encoded picture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PictureSummary {
    pub size: Vec2i,
    pub average: Color,
    /// `None` when the decoder accepted data whose format it cannot name.
    pub mime: Option<&'static str>,
}

/// Decodes a picture (PNG, JPEG, BMP, GIF, PNM, TIFF) and averages its pixels.
pub fn summarize(data: &[u8]) -> Result<PictureSummary, BitmapError> {
    let image = image::load_from_memory(data)?.to_rgba8();
    let (width, height) = image.dimensions();
    let count = u64::from(width) * u64::from(height);
    if count == 0 {
        return Err(BitmapError::InvalidDimensions {
            width: i64::from(width),
            height: i64::from(height),
        });
    }
    let size = match (i32::try_from(width), i32::try_from(height)) {
        (Ok(w), Ok(h)) => Vec2i::new(w, h),
        _ => return Err(BitmapError::SizeOverflow { what: "picture dimensions" }),
    };

    let mut sums = [0u64; 4];
    for pixel in image.pixels() {
        for (sum, &channel) in sums.iter_mut().zip(pixel.0.iter()) {
            *sum += u64::from(channel);
        }
    }
    let [r, g, b, a] = sums.map(|sum| ((sum + count / 2) / count) as u8);
    Ok(PictureSummary {
        size,
        average: Color::rgba(r, g, b, 255 - a),
        mime: guess_mime(data),
    })
}

/// Average of every pixel of an encoded picture.
pub fn average_color(data: &[u8]) -> Result<Color, BitmapError> {
    summarize(data).map(|summary| summary.average)
}

/// MIME type of an encoded picture, `None` when the format is not recognized.
pub fn guess_mime(data: &[u8]) -> Option<&'static str> {
    image::guess_format(data).ok().map(|format| format.to_mime_type())
}
