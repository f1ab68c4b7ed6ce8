//! Packed ARGB colors

use serde::{Deserialize, Serialize};
use std::fmt;

/// A color stored as `0xAARRGGBB`.
///
/// Alpha 0 is opaque (the legacy formats store transparency, not opacity).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Color(u32);

impl Color {
    pub const fn from_argb(value: u32) -> Self {
        Self(value)
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 0)
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self(((a as u32) << 24) | ((r as u32) << 16) | ((g as u32) << 8) | b as u32)
    }

    pub const fn black() -> Self {
        Self(0)
    }

    pub const fn white() -> Self {
        Self(0x00ff_ffff)
    }

    pub const fn value(&self) -> u32 {
        self.0
    }

    pub const fn alpha(&self) -> u8 {
        (self.0 >> 24) as u8
    }

    pub const fn red(&self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub const fn green(&self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub const fn blue(&self) -> u8 {
        self.0 as u8
    }

    pub const fn is_black(&self) -> bool {
        self.0 & 0x00ff_ffff == 0
    }

    pub const fn is_white(&self) -> bool {
        self.0 & 0x00ff_ffff == 0x00ff_ffff
    }

    /// Weighted mix `alpha * c1 + beta * c2`, per channel and clamped to `[0, 255]`.
    pub fn barycenter(alpha: f32, c1: Color, beta: f32, c2: Color) -> Color {
        let mix = |l: u8, r: u8| -> u8 {
            let value = alpha * f32::from(l) + beta * f32::from(r);
            value.round().clamp(0.0, 255.0) as u8
        };
        Color::rgba(
            mix(c1.red(), c2.red()),
            mix(c1.green(), c2.green()),
            mix(c1.blue(), c2.blue()),
            mix(c1.alpha(), c2.alpha()),
        )
    }
}

impl From<[u8; 3]> for Color {
    fn from(rgb: [u8; 3]) -> Self {
        Color::rgb(rgb[0], rgb[1], rgb[2])
    }
}

/// Formats as `#rrggbb`, the form expected by the property sink.
impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06x}", self.0 & 0x00ff_ffff)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channels() {
        let c = Color::rgba(0x12, 0x34, 0x56, 0x78);
        assert_eq!(c.value(), 0x7812_3456);
        assert_eq!((c.red(), c.green(), c.blue(), c.alpha()), (0x12, 0x34, 0x56, 0x78));
        assert_eq!(c.to_string(), "#123456");
    }

    #[test]
    fn test_black_white() {
        assert!(Color::black().is_black());
        assert!(Color::white().is_white());
        assert_eq!(Color::white().to_string(), "#ffffff");
        assert!(Color::rgba(0, 0, 0, 0x80).is_black());
    }

    #[test]
    fn test_barycenter() {
        let grey = Color::barycenter(0.5, Color::black(), 0.5, Color::white());
        assert_eq!(grey, Color::rgb(128, 128, 128));
        let red = Color::barycenter(1.0, Color::rgb(255, 0, 0), 0.0, Color::white());
        assert_eq!(red, Color::rgb(255, 0, 0));
    }
}
