//! PNG writer
//!
//! A minimal encoder: one IHDR, an optional PLTE, a single IDAT holding the
//! zlib stream of unfiltered scanlines, and IEND. Each chunk carries the
//! CRC32 of its type and data.

use flate2::write::ZlibEncoder;
use flate2::{Compression, Crc};
use retrodoc_core::Color;
use std::io::Write;

use crate::bitmap::{BitmapBw, BitmapColor, BitmapIndexed};
use crate::error::BitmapError;
use crate::{checked_mul, MAX_DIMENSION};

const SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

/// Palette used for monochrome bitmaps: index 1 is a set (black) pixel.
const MONOCHROME_PALETTE: [Color; 2] = [Color::white(), Color::black()];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
enum ColorType {
    Rgb = 2,
    Palette = 3,
    Rgba = 6,
}

struct Header {
    width: usize,
    height: usize,
    bit_depth: u8,
    color_type: ColorType,
}

impl Header {
    fn bytes(&self) -> Result<[u8; 13], BitmapError> {
        if self.width > MAX_DIMENSION || self.height > MAX_DIMENSION {
            return Err(BitmapError::SizeOverflow { what: "PNG dimensions" });
        }
        let mut out = [0u8; 13];
        out[0..4].copy_from_slice(&(self.width as u32).to_be_bytes());
        out[4..8].copy_from_slice(&(self.height as u32).to_be_bytes());
        out[8] = self.bit_depth;
        out[9] = self.color_type as u8;
        // compression, filter and interlace methods are all 0
        Ok(out)
    }
}

fn write_chunk(out: &mut Vec<u8>, kind: &[u8; 4], data: &[u8]) -> Result<(), BitmapError> {
    let len = u32::try_from(data.len())
        .map_err(|_| BitmapError::SizeOverflow { what: "PNG chunk length" })?;
    let mut crc = Crc::new();
    crc.update(kind);
    crc.update(data);
    out.extend_from_slice(&len.to_be_bytes());
    out.extend_from_slice(kind);
    out.extend_from_slice(data);
    out.extend_from_slice(&crc.sum().to_be_bytes());
    Ok(())
}

/// Assembles the file once every scanline is known.
fn assemble(header: Header, palette: Option<&[Color]>, raw: &[u8]) -> Result<Vec<u8>, BitmapError> {
    let ihdr = header.bytes()?;

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(raw)?;
    let compressed = encoder.finish()?;

    let mut out = Vec::with_capacity(compressed.len() + 64);
    out.extend_from_slice(&SIGNATURE);
    write_chunk(&mut out, b"IHDR", &ihdr)?;
    if let Some(palette) = palette {
        let plte: Vec<u8> = palette
            .iter()
            .flat_map(|c| [c.red(), c.green(), c.blue()])
            .collect();
        write_chunk(&mut out, b"PLTE", &plte)?;
    }
    write_chunk(&mut out, b"IDAT", &compressed)?;
    write_chunk(&mut out, b"IEND", &[])?;
    Ok(out)
}

/// Allocates the filtered scanline buffer after checking its size.
fn scanline_buffer(row_bytes: usize, height: usize) -> Result<Vec<u8>, BitmapError> {
    let line = row_bytes
        .checked_add(1)
        .ok_or(BitmapError::SizeOverflow { what: "PNG scanline" })?;
    let total = checked_mul(line, height, "PNG image size")?;
    Ok(Vec::with_capacity(total))
}

/// 1 bit per pixel, palette `[white, black]`.
pub fn encode_monochrome(bitmap: &BitmapBw) -> Result<Vec<u8>, BitmapError> {
    let width = bitmap.width();
    let row_bytes = width.div_ceil(8);
    let mut raw = scanline_buffer(row_bytes, bitmap.height())?;
    for row in bitmap.rows() {
        raw.push(0);
        raw.extend(pack_bits(row));
    }
    assemble(
        Header {
            width,
            height: bitmap.height(),
            bit_depth: 1,
            color_type: ColorType::Palette,
        },
        Some(&MONOCHROME_PALETTE[..]),
        &raw,
    )
}

/// Packs a row of pixels MSB first, padding the last byte with zeros.
pub(crate) fn pack_bits(row: &[bool]) -> impl Iterator<Item = u8> + '_ {
    row.chunks(8).map(|bits| {
        bits.iter()
            .enumerate()
            .fold(0u8, |acc, (i, &set)| if set { acc | (0x80 >> i) } else { acc })
    })
}

/// 8-bit palette image, or RGB when the palette has more than 256 entries.
pub fn encode_indexed(bitmap: &BitmapIndexed) -> Result<Vec<u8>, BitmapError> {
    bitmap.validate()?;
    let pixels = bitmap.pixels();
    let palette = bitmap.palette();
    let width = pixels.width();
    let height = pixels.height();

    if palette.len() <= 256 {
        let mut raw = scanline_buffer(width, height)?;
        for row in pixels.rows() {
            raw.push(0);
            raw.extend(row.iter().map(|&index| index as u8));
        }
        return assemble(
            Header {
                width,
                height,
                bit_depth: 8,
                color_type: ColorType::Palette,
            },
            Some(palette),
            &raw,
        );
    }

    let mut raw = scanline_buffer(checked_mul(width, 3, "PNG scanline")?, height)?;
    for row in pixels.rows() {
        raw.push(0);
        for &index in row {
            let c = palette[index];
            raw.extend_from_slice(&[c.red(), c.green(), c.blue()]);
        }
    }
    assemble(
        Header {
            width,
            height,
            bit_depth: 8,
            color_type: ColorType::Rgb,
        },
        None,
        &raw,
    )
}

/// RGB, or RGBA when the bitmap carries alpha.
pub fn encode_color(bitmap: &BitmapColor) -> Result<Vec<u8>, BitmapError> {
    let pixels = bitmap.pixels();
    let channels = if bitmap.has_alpha() { 4 } else { 3 };
    let mut raw = scanline_buffer(
        checked_mul(pixels.width(), channels, "PNG scanline")?,
        pixels.height(),
    )?;
    for row in pixels.rows() {
        raw.push(0);
        for c in row {
            raw.extend_from_slice(&[c.red(), c.green(), c.blue()]);
            if bitmap.has_alpha() {
                raw.push(255 - c.alpha());
            }
        }
    }
    assemble(
        Header {
            width: pixels.width(),
            height: pixels.height(),
            bit_depth: 8,
            color_type: if bitmap.has_alpha() {
                ColorType::Rgba
            } else {
                ColorType::Rgb
            },
        },
        None,
        &raw,
    )
}
