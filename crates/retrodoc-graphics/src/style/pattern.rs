//! Pattern fills
//!
//! A pattern is either a small two color bit grid, as drawn by the paint
//! programs of the time, or an embedded picture tiled over the surface.

use std::cmp::Ordering;
use std::fmt;

use retrodoc_bitmap::{summarize, Bitmap, BitmapIndexed, EncodedImage, EncoderBackend};
use retrodoc_core::{Color, Vec2i};
use serde::{Deserialize, Serialize};

use crate::error::{Result, StyleError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Pattern {
    /// A `dim × dim` grid packed row by row, most significant bit first;
    /// a set bit selects `colors[1]`.
    Bits {
        dim: i32,
        colors: [Color; 2],
        data: Vec<u8>,
    },
    /// An encoded picture with its pixel size and average color.
    Picture {
        size: Vec2i,
        data: Vec<u8>,
        mime: String,
        average: Color,
    },
}

impl Pattern {
    /// Builds a bit pattern; `dim` must be 8, 16 or 32 and `data` must hold
    /// exactly `dim * dim / 8` bytes.
    pub fn new(dim: i32, colors: [Color; 2], data: Vec<u8>) -> Result<Self> {
        if !matches!(dim, 8 | 16 | 32) {
            return Err(StyleError::InvalidPatternDimension(dim));
        }
        let side = dim as usize;
        let expected = side * side / 8;
        if data.len() != expected {
            return Err(StyleError::PatternDataLength {
                expected,
                actual: data.len(),
            });
        }
        Ok(Pattern::Bits { dim, colors, data })
    }

    /// An 8×8 pattern from its eight rows.
    pub fn from_rows(rows: [u8; 8], colors: [Color; 2]) -> Self {
        Pattern::Bits {
            dim: 8,
            colors,
            data: rows.to_vec(),
        }
    }

    pub fn from_picture(size: Vec2i, data: Vec<u8>, mime: impl Into<String>, average: Color) -> Self {
        Pattern::Picture {
            size,
            data,
            mime: mime.into(),
            average,
        }
    }

    /// Decodes `data` to learn its size and average color. `mime` overrides
    /// the detected format. Returns `None` for undecodable data.
    pub fn from_picture_bytes(data: Vec<u8>, mime: Option<&str>) -> Option<Self> {
        let summary = match summarize(&data) {
            Ok(summary) => summary,
            Err(err) => {
                tracing::debug!(error = %err, "Cannot decode pattern picture");
                return None;
            }
        };
        let mime = mime.or(summary.mime)?.to_string();
        Some(Pattern::Picture {
            size: summary.size,
            data,
            mime,
            average: summary.average,
        })
    }

    /// Pixel size of one tile.
    pub fn dim(&self) -> Vec2i {
        match self {
            Pattern::Bits { dim, .. } => Vec2i::new(*dim, *dim),
            Pattern::Picture { size, .. } => *size,
        }
    }

    /// Whether the pixel at (`x`, `y`) uses the second color; `None` for
    /// pictures and coordinates outside the tile.
    pub fn bit(&self, x: usize, y: usize) -> Option<bool> {
        let Pattern::Bits { dim, data, .. } = self else {
            return None;
        };
        let side = *dim as usize;
        if x >= side || y >= side {
            return None;
        }
        let byte = data.get(y * (side / 8) + x / 8)?;
        Some(byte & (0x80 >> (x % 8)) != 0)
    }

    /// The color of the pattern when it draws a single one.
    pub fn unique_color(&self) -> Option<Color> {
        let Pattern::Bits { colors, data, .. } = self else {
            return None;
        };
        if colors[0] == colors[1] || data.iter().all(|b| *b == 0) {
            Some(colors[0])
        } else if data.iter().all(|b| *b == 0xff) {
            Some(colors[1])
        } else {
            None
        }
    }

    /// Mix of the two colors weighted by how many pixels use each, or the
    /// average of the picture.
    pub fn average_color(&self) -> Color {
        match self {
            Pattern::Bits { colors, data, .. } => {
                if let Some(color) = self.unique_color() {
                    return color;
                }
                let ones: u32 = data.iter().map(|b| b.count_ones()).sum();
                let total = (data.len() * 8) as f32;
                let beta = ones as f32 / total;
                Color::barycenter(1.0 - beta, colors[0], beta, colors[1])
            }
            Pattern::Picture { average, .. } => *average,
        }
    }

    /// The tile as an image: bit patterns are rasterized with `backend`,
    /// pictures are returned as stored.
    pub fn get_binary(&self, backend: EncoderBackend) -> Result<EncodedImage> {
        match self {
            Pattern::Bits { dim, colors, .. } => {
                let side = *dim as usize;
                let mut bitmap = BitmapIndexed::new(self.dim(), colors.to_vec())?;
                for y in 0..side {
                    let row: Vec<usize> = (0..side)
                        .map(|x| usize::from(self.bit(x, y).unwrap_or(false)))
                        .collect();
                    bitmap.pixels_mut().set_row(y, &row)?;
                }
                Ok(Bitmap::Indexed(bitmap).encode(backend)?)
            }
            Pattern::Picture { data, mime, .. } => {
                if data.is_empty() {
                    return Err(StyleError::NotRasterizable("empty picture".to_string()));
                }
                Ok(EncodedImage {
                    mime: mime.clone(),
                    data: data.clone(),
                })
            }
        }
    }

    pub fn cmp_total(&self, other: &Self) -> Ordering {
        match (self, other) {
            (
                Pattern::Bits {
                    dim: d1,
                    colors: c1,
                    data: b1,
                },
                Pattern::Bits {
                    dim: d2,
                    colors: c2,
                    data: b2,
                },
            ) => d1.cmp(d2).then_with(|| c1.cmp(c2)).then_with(|| b1.cmp(b2)),
            (
                Pattern::Picture {
                    size: s1,
                    data: d1,
                    mime: m1,
                    average: a1,
                },
                Pattern::Picture {
                    size: s2,
                    data: d2,
                    mime: m2,
                    average: a2,
                },
            ) => s1
                .cmp_y_major(s2)
                .then_with(|| a1.cmp(a2))
                .then_with(|| m1.cmp(m2))
                .then_with(|| d1.cmp(d2)),
            (Pattern::Bits { .. }, Pattern::Picture { .. }) => Ordering::Less,
            (Pattern::Picture { .. }, Pattern::Bits { .. }) => Ordering::Greater,
        }
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pattern::Bits { dim, colors, data } => {
                write!(f, "{dim}x{dim},[{},{}],", colors[0], colors[1])?;
                for byte in data {
                    write!(f, "{byte:02x}")?;
                }
                Ok(())
            }
            Pattern::Picture { size, mime, average, .. } => {
                write!(f, "picture:{mime},{size},avg={average}")
            }
        }
    }
}
