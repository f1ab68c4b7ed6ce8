//! PBM, PPM and BMP writers
//!
//! Uncompressed formats used when PNG output is not selected.

use retrodoc_core::Color;

use crate::bitmap::{BitmapBw, BitmapColor, BitmapIndexed, PixelGrid};
use crate::error::BitmapError;
use crate::png::pack_bits;
use crate::{checked_mul, MAX_DIMENSION};

fn check_dimensions(width: usize, height: usize) -> Result<(), BitmapError> {
    if width > MAX_DIMENSION || height > MAX_DIMENSION {
        return Err(BitmapError::SizeOverflow { what: "image dimensions" });
    }
    Ok(())
}

/// Binary PBM (`P4`), a set bit is black.
pub fn encode_pbm(bitmap: &BitmapBw) -> Result<Vec<u8>, BitmapError> {
    check_dimensions(bitmap.width(), bitmap.height())?;
    let row_bytes = bitmap.width().div_ceil(8);
    let image_size = checked_mul(row_bytes, bitmap.height(), "PBM image size")?;

    let header = format!("P4\n{} {}\n", bitmap.width(), bitmap.height());
    let mut out = Vec::with_capacity(header.len() + image_size);
    out.extend_from_slice(header.as_bytes());
    for row in bitmap.rows() {
        out.extend(pack_bits(row));
    }
    Ok(out)
}

fn write_ppm<T>(
    pixels: &PixelGrid<T>,
    color_of: impl Fn(&T) -> Color,
) -> Result<Vec<u8>, BitmapError> {
    check_dimensions(pixels.width(), pixels.height())?;
    let row_bytes = checked_mul(pixels.width(), 3, "PPM scanline")?;
    let image_size = checked_mul(row_bytes, pixels.height(), "PPM image size")?;

    let header = format!("P6\n{} {}\n255\n", pixels.width(), pixels.height());
    let mut out = Vec::with_capacity(header.len() + image_size);
    out.extend_from_slice(header.as_bytes());
    for cell in pixels.cells() {
        let c = color_of(cell);
        out.extend_from_slice(&[c.red(), c.green(), c.blue()]);
    }
    Ok(out)
}

/// Binary PPM (`P6`) with the palette inlined.
pub fn encode_ppm_indexed(bitmap: &BitmapIndexed) -> Result<Vec<u8>, BitmapError> {
    bitmap.validate()?;
    let palette = bitmap.palette();
    write_ppm(bitmap.pixels(), |&index| palette[index])
}

/// Binary PPM (`P6`), alpha is dropped.
pub fn encode_ppm_color(bitmap: &BitmapColor) -> Result<Vec<u8>, BitmapError> {
    write_ppm(bitmap.pixels(), |&c| c)
}

const BMP_HEADER_SIZE: usize = 14 + 40;

/// 32 bits per pixel BMP, keeping the alpha channel.
///
/// BMP stores the bottom row first, so rows are emitted in reverse order.
pub fn encode_bmp(bitmap: &BitmapColor) -> Result<Vec<u8>, BitmapError> {
    let pixels = bitmap.pixels();
    check_dimensions(pixels.width(), pixels.height())?;
    let row_bytes = checked_mul(pixels.width(), 4, "BMP scanline")?;
    let image_size = checked_mul(row_bytes, pixels.height(), "BMP image size")?;
    let file_size = image_size
        .checked_add(BMP_HEADER_SIZE)
        .and_then(|size| u32::try_from(size).ok())
        .ok_or(BitmapError::SizeOverflow { what: "BMP file size" })?;

    let mut out = Vec::with_capacity(file_size as usize);
    // file header
    out.extend_from_slice(b"BM");
    out.extend_from_slice(&file_size.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes());
    out.extend_from_slice(&(BMP_HEADER_SIZE as u32).to_le_bytes());
    // info header
    out.extend_from_slice(&40u32.to_le_bytes());
    out.extend_from_slice(&(pixels.width() as i32).to_le_bytes());
    out.extend_from_slice(&(pixels.height() as i32).to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes());
    out.extend_from_slice(&32u16.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes());
    out.extend_from_slice(&(image_size as u32).to_le_bytes());
    // 72 dpi
    out.extend_from_slice(&2835i32.to_le_bytes());
    out.extend_from_slice(&2835i32.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes());

    for row in pixels.rows().rev() {
        for c in row {
            out.extend_from_slice(&[c.blue(), c.green(), c.red(), 255 - c.alpha()]);
        }
    }
    Ok(out)
}
