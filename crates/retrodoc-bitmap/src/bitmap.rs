//! Raw pixel buffers
//!
//! Three flavours exist, matching what the legacy formats store:
//! monochrome bit planes, palette indices and direct colors. Cells are kept
//! row-major, one value per pixel; packing happens in the encoders.

use retrodoc_core::{Color, Vec2i};

use crate::error::BitmapError;

/// A `width × height` grid of cells stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid<T> {
    width: usize,
    height: usize,
    cells: Vec<T>,
}

impl<T: Clone + Default> PixelGrid<T> {
    /// Allocates a grid filled with `T::default()`.
    ///
    /// Fails on non-positive dimensions or when the cell count overflows.
    pub fn new(size: Vec2i) -> Result<Self, BitmapError> {
        if size.x <= 0 || size.y <= 0 {
            return Err(BitmapError::InvalidDimensions {
                width: i64::from(size.x),
                height: i64::from(size.y),
            });
        }
        let width = size.x as usize;
        let height = size.y as usize;
        let count = width
            .checked_mul(height)
            .ok_or(BitmapError::SizeOverflow { what: "cell count" })?;
        Ok(Self {
            width,
            height,
            cells: vec![T::default(); count],
        })
    }
}

impl<T> PixelGrid<T> {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn size(&self) -> Vec2i {
        Vec2i::new(self.width as i32, self.height as i32)
    }

    pub fn get(&self, x: usize, y: usize) -> Option<&T> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.cells.get(y * self.width + x)
    }

    pub fn set(&mut self, x: usize, y: usize, value: T) -> Result<(), BitmapError> {
        if x >= self.width || y >= self.height {
            return Err(BitmapError::OutOfBounds { x, y });
        }
        self.cells[y * self.width + x] = value;
        Ok(())
    }

    pub fn row(&self, y: usize) -> Option<&[T]> {
        if y >= self.height {
            return None;
        }
        Some(&self.cells[y * self.width..(y + 1) * self.width])
    }

    pub fn rows(&self) -> impl DoubleEndedIterator<Item = &[T]> + ExactSizeIterator {
        self.cells.chunks_exact(self.width)
    }

    pub fn cells(&self) -> &[T] {
        &self.cells
    }
}

impl<T: Clone> PixelGrid<T> {
    /// Replaces row `y`; `values` must hold exactly one cell per column.
    pub fn set_row(&mut self, y: usize, values: &[T]) -> Result<(), BitmapError> {
        if y >= self.height {
            return Err(BitmapError::OutOfBounds { x: 0, y });
        }
        if values.len() != self.width {
            return Err(BitmapError::RowLength {
                expected: self.width,
                actual: values.len(),
            });
        }
        self.cells[y * self.width..(y + 1) * self.width].clone_from_slice(values);
        Ok(())
    }
}

/// One bit per pixel, `true` is black.
pub type BitmapBw = PixelGrid<bool>;

/// Palette indices plus the palette they refer to.
#[derive(Debug, Clone, PartialEq)]
pub struct BitmapIndexed {
    pixels: PixelGrid<usize>,
    palette: Vec<Color>,
}

impl BitmapIndexed {
    pub fn new(size: Vec2i, palette: Vec<Color>) -> Result<Self, BitmapError> {
        Ok(Self {
            pixels: PixelGrid::new(size)?,
            palette,
        })
    }

    pub fn pixels(&self) -> &PixelGrid<usize> {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut PixelGrid<usize> {
        &mut self.pixels
    }

    pub fn palette(&self) -> &[Color] {
        &self.palette
    }

    pub fn set_palette(&mut self, palette: Vec<Color>) {
        self.palette = palette;
    }

    /// Checks that the palette is non empty and covers every index.
    pub fn validate(&self) -> Result<(), BitmapError> {
        if self.palette.is_empty() {
            return Err(BitmapError::EmptyPalette);
        }
        let len = self.palette.len();
        match self.pixels.cells().iter().find(|&&index| index >= len) {
            Some(&index) => Err(BitmapError::IndexOutOfRange { index, len }),
            None => Ok(()),
        }
    }

    /// The color of pixel `(x, y)`, when both the pixel and its palette entry exist.
    pub fn color(&self, x: usize, y: usize) -> Option<Color> {
        self.pixels
            .get(x, y)
            .and_then(|&index| self.palette.get(index).copied())
    }
}

/// Direct colors, optionally with meaningful alpha.
#[derive(Debug, Clone, PartialEq)]
pub struct BitmapColor {
    pixels: PixelGrid<Color>,
    has_alpha: bool,
}

impl BitmapColor {
    pub fn new(size: Vec2i, has_alpha: bool) -> Result<Self, BitmapError> {
        Ok(Self {
            pixels: PixelGrid::new(size)?,
            has_alpha,
        })
    }

    pub fn pixels(&self) -> &PixelGrid<Color> {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut PixelGrid<Color> {
        &mut self.pixels
    }

    pub fn has_alpha(&self) -> bool {
        self.has_alpha
    }
}

/// Any of the three bitmap kinds.
#[derive(Debug, Clone, PartialEq)]
pub enum Bitmap {
    Monochrome(BitmapBw),
    Indexed(BitmapIndexed),
    Color(BitmapColor),
}

impl Bitmap {
    pub fn size(&self) -> Vec2i {
        match self {
            Bitmap::Monochrome(b) => b.size(),
            Bitmap::Indexed(b) => b.pixels.size(),
            Bitmap::Color(b) => b.pixels.size(),
        }
    }
}

impl From<BitmapBw> for Bitmap {
    fn from(b: BitmapBw) -> Self {
        Bitmap::Monochrome(b)
    }
}

impl From<BitmapIndexed> for Bitmap {
    fn from(b: BitmapIndexed) -> Self {
        Bitmap::Indexed(b)
    }
}

impl From<BitmapColor> for Bitmap {
    fn from(b: BitmapColor) -> Self {
        Bitmap::Color(b)
    }
}
