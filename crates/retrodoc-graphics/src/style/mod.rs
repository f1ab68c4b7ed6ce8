//! Graphic styles
//!
//! [`GraphicStyle`] gathers everything needed to draw a shape or a frame:
//! the line (width, dashes, cap, join, arrows), the surface (solid color,
//! pattern, gradient or hatch), the shadow and the frame decorations
//! (background, borders, linked frame names).
//!
//! Serialization follows the property vocabulary of the document sink.
//! Features the sink cannot express are approximated and reported to a
//! [`DiagnosticSink`].

pub mod arrow;
pub mod border;
pub mod gradient;
pub mod hatch;
pub mod pattern;

use std::cmp::Ordering;
use std::fmt;

use retrodoc_bitmap::EncoderBackend;
use retrodoc_core::{Color, DiagnosticKind, DiagnosticSink, PropertyList, Vec2d};
use serde::{Deserialize, Serialize};

pub use arrow::Arrow;
pub use border::{Border, BorderStyle, BorderType};
pub use gradient::{Gradient, GradientStop, GradientType};
pub use hatch::{Hatch, HatchType};
pub use pattern::Pattern;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LineCap {
    #[default]
    Butt,
    Round,
    Square,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LineJoin {
    #[default]
    Miter,
    Round,
    Bevel,
}

/// Decoded form of a dash array: at most two distinct dash lengths.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DashPattern {
    pub dots1: i32,
    pub dots1_length: f64,
    pub dots2: i32,
    pub dots2_length: f64,
    /// Mean gap between two dashes
    pub distance: f64,
}

impl DashPattern {
    /// Decodes alternating dash and gap lengths.
    ///
    /// Dashes of the first length are counted until a different one shows
    /// up; from then on every dash must have that second length. A third
    /// distinct length ends the decoding and is reported. Returns `None`
    /// when the array holds no complete dash/gap pair.
    pub fn decode(widths: &[f64], sink: &mut dyn DiagnosticSink) -> Option<Self> {
        if widths.len() < 2 {
            return None;
        }
        let mut res = DashPattern {
            dots1: 0,
            dots1_length: 0.0,
            dots2: 0,
            dots2_length: 0.0,
            distance: 0.0,
        };
        let mut total_gap = 0.0;
        for pair in widths.chunks_exact(2) {
            let (dash, gap) = (pair[0], pair[1]);
            if res.dots2 > 0 {
                if dash != res.dots2_length {
                    sink.report(
                        DiagnosticKind::UnsupportedDash,
                        &format!("dash lengths {widths:?} use more than two values"),
                    );
                    break;
                }
                res.dots2 += 1;
            } else if res.dots1 == 0 || dash == res.dots1_length {
                res.dots1 += 1;
                res.dots1_length = dash;
            } else {
                res.dots2 = 1;
                res.dots2_length = dash;
            }
            total_gap += gap;
        }
        let count = res.dots1 + res.dots2;
        res.distance = if count > 0 {
            total_gap / f64::from(count)
        } else {
            total_gap
        };
        Some(res)
    }

    pub fn add_to(&self, list: &mut PropertyList) {
        list.insert_string("draw:stroke", "dash");
        list.insert_int("draw:dots1", self.dots1);
        list.insert_point("draw:dots1-length", self.dots1_length);
        if self.dots2 > 0 {
            list.insert_int("draw:dots2", self.dots2);
            list.insert_point("draw:dots2-length", self.dots2_length);
        }
        list.insert_point("draw:distance", self.distance);
    }
}

/// Line, surface, shadow and frame attributes of a drawing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphicStyle {
    /// Line width in points
    pub line_width: f64,
    /// Alternating dash and gap lengths, in points; empty for a solid line
    pub line_dash: Vec<f64>,
    pub line_cap: LineCap,
    pub line_join: LineJoin,
    pub line_opacity: f64,
    pub line_color: Color,
    pub fill_rule_even_odd: bool,
    pub surface_color: Color,
    pub surface_opacity: f64,
    pub shadow_color: Color,
    pub shadow_opacity: f64,
    /// Shadow offset in points
    pub shadow_offset: Vec2d,
    pub pattern: Option<Pattern>,
    pub gradient: Option<Gradient>,
    pub hatch: Option<Hatch>,
    pub background_color: Color,
    /// Negative when the frame has no background
    pub background_opacity: f64,
    /// Left, right, top and bottom borders
    pub borders: [Option<Border>; 4],
    pub frame_name: String,
    pub next_frame_name: String,
    /// Rotation in degrees
    pub rotate: f64,
    /// Horizontal and vertical flips
    pub flip: [bool; 2],
    /// Start and end arrows
    pub arrows: [Arrow; 2],
}

impl Default for GraphicStyle {
    fn default() -> Self {
        Self {
            line_width: 1.0,
            line_dash: Vec::new(),
            line_cap: LineCap::Butt,
            line_join: LineJoin::Miter,
            line_opacity: 1.0,
            line_color: Color::black(),
            fill_rule_even_odd: false,
            surface_color: Color::white(),
            surface_opacity: 0.0,
            shadow_color: Color::black(),
            shadow_opacity: 0.0,
            shadow_offset: Vec2d::new(1.0, 1.0),
            pattern: None,
            gradient: None,
            hatch: None,
            background_color: Color::white(),
            background_opacity: -1.0,
            borders: Default::default(),
            frame_name: String::new(),
            next_frame_name: String::new(),
            rotate: 0.0,
            flip: [false; 2],
            arrows: Default::default(),
        }
    }
}

const SIDE_NAMES: [&str; 4] = ["left", "right", "top", "bottom"];

impl GraphicStyle {
    pub const LEFT: u8 = 1;
    pub const RIGHT: u8 = 2;
    pub const TOP: u8 = 4;
    pub const BOTTOM: u8 = 8;

    /// A style drawing nothing.
    pub fn empty() -> Self {
        Self {
            line_width: 0.0,
            ..Self::default()
        }
    }

    pub fn has_line(&self) -> bool {
        self.line_width > 0.0 && self.line_opacity > 0.0
    }

    pub fn has_surface_color(&self) -> bool {
        self.surface_opacity > 0.0
    }

    pub fn has_pattern(&self) -> bool {
        self.pattern.is_some()
    }

    pub fn has_gradient(&self, complex: bool) -> bool {
        self.gradient.as_ref().is_some_and(|g| g.has_gradient(complex))
    }

    pub fn has_hatch(&self) -> bool {
        self.hatch.as_ref().is_some_and(Hatch::has_hatch)
    }

    pub fn has_surface(&self) -> bool {
        self.has_surface_color() || self.has_pattern() || self.has_gradient(false) || self.has_hatch()
    }

    pub fn has_shadow(&self) -> bool {
        self.shadow_opacity > 0.0
    }

    pub fn has_background_color(&self) -> bool {
        self.background_opacity > 0.0
    }

    pub fn has_borders(&self) -> bool {
        self.borders.iter().flatten().any(|b| !b.is_empty())
    }

    /// Whether the four sides cannot be written as one uniform border.
    pub fn has_different_borders(&self) -> bool {
        if !self.has_borders() {
            return false;
        }
        let first = &self.borders[0];
        self.borders[1..].iter().any(|b| b != first)
    }

    pub fn set_surface_color(&mut self, color: Color, opacity: f64) {
        self.surface_color = color;
        self.surface_opacity = opacity;
    }

    pub fn set_background_color(&mut self, color: Color, opacity: f64) {
        self.background_color = color;
        self.background_opacity = opacity;
    }

    /// Sets the border of every side whose bit is in `sides`.
    pub fn set_borders(&mut self, sides: u8, border: &Border) {
        for (i, slot) in self.borders.iter_mut().enumerate() {
            if sides & (1 << i) != 0 {
                *slot = Some(border.clone());
            }
        }
    }

    /// Serializes the style of a shape, see [`add_to_with`](Self::add_to_with).
    pub fn add_to(&self, list: &mut PropertyList, only_1d: bool, sink: &mut dyn DiagnosticSink) {
        self.add_to_with(list, only_1d, EncoderBackend::default(), sink)
    }

    /// Serializes the line, arrows and shadow, then (unless `only_1d`) the
    /// surface. Surfaces use the first available of gradient, hatch,
    /// pattern and solid color; non uniform bit patterns are rasterized with
    /// `backend`.
    pub fn add_to_with(
        &self,
        list: &mut PropertyList,
        only_1d: bool,
        backend: EncoderBackend,
        sink: &mut dyn DiagnosticSink,
    ) {
        if !self.has_line() {
            list.insert_string("draw:stroke", "none");
        } else if let Some(dash) = DashPattern::decode(&self.line_dash, sink) {
            dash.add_to(list);
        } else {
            list.insert_string("draw:stroke", "solid");
        }
        list.insert_string("svg:stroke-color", self.line_color.to_string());
        list.insert_point("svg:stroke-width", self.line_width);
        if self.line_opacity < 1.0 {
            list.insert_percent("svg:stroke-opacity", self.line_opacity);
        }
        match self.line_cap {
            LineCap::Round => list.insert_string("svg:stroke-linecap", "round"),
            LineCap::Square => list.insert_string("svg:stroke-linecap", "square"),
            LineCap::Butt => {}
        }
        match self.line_join {
            LineJoin::Round => list.insert_string("svg:stroke-linejoin", "round"),
            LineJoin::Bevel => list.insert_string("svg:stroke-linejoin", "bevel"),
            LineJoin::Miter => {}
        }
        self.arrows[0].add_to(list, "start");
        self.arrows[1].add_to(list, "end");

        if self.has_shadow() {
            list.insert_string("draw:shadow", "visible");
            list.insert_string("draw:shadow-color", self.shadow_color.to_string());
            list.insert_percent("draw:shadow-opacity", self.shadow_opacity);
            // offsets in cm
            list.insert_generic("draw:shadow-offset-x", self.shadow_offset.x / 72.0 * 2.54);
            list.insert_generic("draw:shadow-offset-y", self.shadow_offset.y / 72.0 * 2.54);
        }

        if only_1d || !self.has_surface() {
            list.insert_string("draw:fill", "none");
            return;
        }
        list.insert_string(
            "svg:fill-rule",
            if self.fill_rule_even_odd { "evenodd" } else { "nonzero" },
        );
        if let Some(gradient) = self.gradient.as_ref().filter(|g| g.has_gradient(false)) {
            gradient.add_to(list, sink);
            return;
        }
        if let Some(hatch) = self.hatch.as_ref().filter(|h| h.has_hatch()) {
            hatch.add_to(list);
            if self.has_surface_color() {
                list.insert_bool("draw:fill-hatch-solid", true);
                list.insert_string("draw:fill-color", self.surface_color.to_string());
                list.insert_percent("draw:opacity", self.surface_opacity);
            }
            return;
        }
        if let Some(pattern) = &self.pattern {
            // a pattern without surface opacity is opaque
            let opacity = if self.has_surface_color() { self.surface_opacity } else { 1.0 };
            if let Some(color) = pattern.unique_color() {
                insert_solid(list, color, opacity);
                return;
            }
            match pattern.get_binary(backend) {
                Ok(image) => {
                    let dim = pattern.dim();
                    list.insert_string("draw:fill", "bitmap");
                    list.insert_binary("draw:fill-image", image.data);
                    list.insert_point("draw:fill-image-width", f64::from(dim.x));
                    list.insert_point("draw:fill-image-height", f64::from(dim.y));
                    list.insert_point("draw:fill-image-ref-point-x", 0.0);
                    list.insert_point("draw:fill-image-ref-point-y", 0.0);
                    list.insert_string("draw:fill-image-ref-point", "top-left");
                    list.insert_string("librevenge:mime-type", image.mime);
                    list.insert_percent("draw:opacity", opacity);
                }
                Err(err) => {
                    sink.report(DiagnosticKind::PatternNotRasterizable, &err.to_string());
                    insert_solid(list, pattern.average_color(), opacity);
                }
            }
            return;
        }
        insert_solid(list, self.surface_color, self.surface_opacity);
    }

    /// Serializes the frame decorations: background, borders, shadow and
    /// linked frame names.
    pub fn add_frame_to(&self, list: &mut PropertyList, sink: &mut dyn DiagnosticSink) {
        if self.background_opacity >= 0.0 {
            if self.background_opacity > 0.0 {
                list.insert_string("fo:background-color", self.background_color.to_string());
            }
            if self.background_opacity < 1.0 {
                list.insert_percent("style:background-transparency", 1.0 - self.background_opacity);
            }
        }
        if self.has_borders() {
            if self.has_different_borders() {
                for (border, side) in self.borders.iter().zip(SIDE_NAMES) {
                    if let Some(border) = border.as_ref().filter(|b| !b.is_empty()) {
                        border.add_to(list, side, sink);
                    }
                }
            } else if let Some(border) = &self.borders[0] {
                border.add_to(list, "", sink);
            }
        }
        if self.has_shadow() {
            list.insert_string(
                "style:shadow",
                format!(
                    "{} {}in {}in",
                    self.shadow_color,
                    self.shadow_offset.x / 72.0,
                    self.shadow_offset.y / 72.0
                ),
            );
        }
        if !self.frame_name.is_empty() {
            list.insert_string("librevenge:frame-name", self.frame_name.clone());
        }
        if !self.next_frame_name.is_empty() {
            list.insert_string("librevenge:next-frame-name", self.next_frame_name.clone());
        }
    }

    /// Total order over every attribute.
    pub fn cmp_total(&self, other: &Self) -> Ordering {
        self.line_width
            .total_cmp(&other.line_width)
            .then_with(|| cmp_slices(&self.line_dash, &other.line_dash, f64::total_cmp))
            .then_with(|| self.line_cap.cmp(&other.line_cap))
            .then_with(|| self.line_join.cmp(&other.line_join))
            .then_with(|| self.line_opacity.total_cmp(&other.line_opacity))
            .then_with(|| self.line_color.cmp(&other.line_color))
            .then_with(|| self.fill_rule_even_odd.cmp(&other.fill_rule_even_odd))
            .then_with(|| self.surface_color.cmp(&other.surface_color))
            .then_with(|| self.surface_opacity.total_cmp(&other.surface_opacity))
            .then_with(|| self.shadow_color.cmp(&other.shadow_color))
            .then_with(|| self.shadow_opacity.total_cmp(&other.shadow_opacity))
            .then_with(|| self.shadow_offset.cmp_y_major(&other.shadow_offset))
            .then_with(|| cmp_options(&self.pattern, &other.pattern, Pattern::cmp_total))
            .then_with(|| cmp_options(&self.gradient, &other.gradient, Gradient::cmp_total))
            .then_with(|| cmp_options(&self.hatch, &other.hatch, Hatch::cmp_total))
            .then_with(|| self.background_color.cmp(&other.background_color))
            .then_with(|| self.background_opacity.total_cmp(&other.background_opacity))
            .then_with(|| cmp_slices(&self.borders, &other.borders, |a, b| cmp_options(a, b, Border::cmp_total)))
            .then_with(|| self.frame_name.cmp(&other.frame_name))
            .then_with(|| self.next_frame_name.cmp(&other.next_frame_name))
            .then_with(|| self.rotate.total_cmp(&other.rotate))
            .then_with(|| self.flip.cmp(&other.flip))
            .then_with(|| cmp_slices(&self.arrows, &other.arrows, Arrow::cmp_total))
    }
}

fn insert_solid(list: &mut PropertyList, color: Color, opacity: f64) {
    list.insert_string("draw:fill", "solid");
    list.insert_string("draw:fill-color", color.to_string());
    list.insert_percent("draw:opacity", opacity);
}

fn cmp_slices<T>(l: &[T], r: &[T], cmp: impl Fn(&T, &T) -> Ordering) -> Ordering {
    l.len().cmp(&r.len()).then_with(|| {
        l.iter()
            .zip(r)
            .map(|(a, b)| cmp(a, b))
            .find(|o| o.is_ne())
            .unwrap_or(Ordering::Equal)
    })
}

fn cmp_options<T>(l: &Option<T>, r: &Option<T>, cmp: impl Fn(&T, &T) -> Ordering) -> Ordering {
    match (l, r) {
        (Some(a), Some(b)) => cmp(a, b),
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
    }
}

impl fmt::Display for GraphicStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.has_line() {
            write!(f, "line=[w={},{}", self.line_width, self.line_color)?;
            if self.line_opacity < 1.0 {
                write!(f, ",op={}", self.line_opacity)?;
            }
            if !self.line_dash.is_empty() {
                write!(f, ",dash={:?}", self.line_dash)?;
            }
            write!(f, "],")?;
        } else {
            write!(f, "line=none,")?;
        }
        for (arrow, which) in self.arrows.iter().zip(["start", "end"]) {
            if !arrow.is_empty() {
                write!(f, "arrow[{which}]=[{arrow}],")?;
            }
        }
        if self.has_surface_color() {
            write!(f, "surface=[{},op={}],", self.surface_color, self.surface_opacity)?;
        }
        if let Some(gradient) = &self.gradient {
            write!(f, "gradient=[{gradient}],")?;
        }
        if let Some(hatch) = &self.hatch {
            write!(f, "hatch=[{hatch}],")?;
        }
        if let Some(pattern) = &self.pattern {
            write!(f, "pattern=[{pattern}],")?;
        }
        if self.has_shadow() {
            write!(f, "shadow=[{},op={},offset={}],", self.shadow_color, self.shadow_opacity, self.shadow_offset)?;
        }
        if self.has_background_color() {
            write!(f, "background=[{},op={}],", self.background_color, self.background_opacity)?;
        }
        for (border, side) in self.borders.iter().zip(SIDE_NAMES) {
            if let Some(border) = border {
                write!(f, "border[{side}]=[{border}],")?;
            }
        }
        if self.rotate != 0.0 {
            write!(f, "rotate={},", self.rotate)?;
        }
        if self.flip[0] {
            write!(f, "flipX,")?;
        }
        if self.flip[1] {
            write!(f, "flipY,")?;
        }
        if !self.frame_name.is_empty() {
            write!(f, "frame={},", self.frame_name)?;
        }
        if !self.next_frame_name.is_empty() {
            write!(f, "next={},", self.next_frame_name)?;
        }
        Ok(())
    }
}
