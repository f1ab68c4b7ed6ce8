//! Gradient fills

use std::cmp::Ordering;
use std::fmt;

use retrodoc_core::{Color, DiagnosticKind, DiagnosticSink, PropertyList, Vec2d};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum GradientType {
    Axial,
    #[default]
    Linear,
    Radial,
    Rectangular,
    Square,
    Ellipsoid,
}

impl GradientType {
    pub fn as_str(&self) -> &'static str {
        match self {
            GradientType::Axial => "axial",
            GradientType::Linear => "linear",
            GradientType::Radial => "radial",
            GradientType::Rectangular => "rectangular",
            GradientType::Square => "square",
            GradientType::Ellipsoid => "ellipsoid",
        }
    }

    /// Linear and axial gradients run from the first stop to the last one;
    /// the others run from the border towards the center.
    fn starts_at_first_stop(&self) -> bool {
        matches!(self, GradientType::Linear | GradientType::Axial)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    /// Position in `[0, 1]`
    pub offset: f64,
    pub color: Color,
    pub opacity: f64,
}

impl GradientStop {
    pub fn new(offset: f64, color: Color, opacity: f64) -> Self {
        Self {
            offset,
            color,
            opacity,
        }
    }

    fn cmp_total(&self, other: &Self) -> Ordering {
        self.offset
            .total_cmp(&other.offset)
            .then_with(|| self.color.cmp(&other.color))
            .then_with(|| self.opacity.total_cmp(&other.opacity))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gradient {
    pub kind: GradientType,
    pub stops: Vec<GradientStop>,
    /// Angle in degrees
    pub angle: f64,
    /// Fraction of the shape covered by the first color before blending
    pub border: f64,
    /// Center of non linear gradients, relative to the shape box
    pub percent_center: Vec2d,
    pub radius: f64,
}

impl Default for Gradient {
    fn default() -> Self {
        Self {
            kind: GradientType::Linear,
            stops: vec![
                GradientStop::new(0.0, Color::black(), 1.0),
                GradientStop::new(1.0, Color::white(), 1.0),
            ],
            angle: 0.0,
            border: 0.0,
            percent_center: Vec2d::new(0.5, 0.5),
            radius: 1.0,
        }
    }
}

impl Gradient {
    /// A gradient needs two stops, three when `complex` is requested.
    pub fn has_gradient(&self, complex: bool) -> bool {
        self.stops.len() >= if complex { 3 } else { 2 }
    }

    /// Mean of the stop colors, the fill used when the gradient is dropped.
    pub fn average_color(&self) -> Option<Color> {
        let (first, rest) = self.stops.split_first()?;
        let mut color = first.color;
        for (i, stop) in rest.iter().enumerate() {
            let weight = 1.0 / (i as f32 + 2.0);
            color = Color::barycenter(1.0 - weight, color, weight, stop.color);
        }
        Some(color)
    }

    /// Writes the `draw:fill=gradient` properties.
    ///
    /// Two stops at 0 and 1 are written as start and end colors. Any other
    /// stop list goes into `svg:linearGradient`, which some consumers ignore.
    pub fn add_to(&self, list: &mut PropertyList, sink: &mut dyn DiagnosticSink) -> bool {
        if !self.has_gradient(false) {
            return false;
        }
        list.insert_string("draw:fill", "gradient");
        list.insert_string("draw:style", self.kind.as_str());
        let canonical = self.stops.len() == 2 && self.stops[0].offset <= 0.0 && self.stops[1].offset >= 1.0;
        if canonical {
            let (start, end) = if self.kind.starts_at_first_stop() {
                (self.stops[0], self.stops[1])
            } else {
                (self.stops[1], self.stops[0])
            };
            list.insert_string("draw:start-color", start.color.to_string());
            list.insert_percent("librevenge:start-opacity", start.opacity);
            list.insert_string("draw:end-color", end.color.to_string());
            list.insert_percent("librevenge:end-opacity", end.opacity);
        } else {
            sink.report(
                DiagnosticKind::NonCanonicalGradient,
                &format!("{} stops written as a stop list", self.stops.len()),
            );
            let stops = self
                .stops
                .iter()
                .map(|stop| {
                    let mut entry = PropertyList::new();
                    entry.insert_percent("svg:offset", stop.offset);
                    entry.insert_string("svg:stop-color", stop.color.to_string());
                    entry.insert_percent("svg:stop-opacity", stop.opacity);
                    entry
                })
                .collect();
            list.insert_list("svg:linearGradient", stops);
        }
        list.insert_generic("draw:angle", self.angle);
        list.insert_percent("draw:border", self.border);
        if self.kind != GradientType::Linear {
            list.insert_percent("svg:cx", self.percent_center.x);
            list.insert_percent("svg:cy", self.percent_center.y);
        }
        if self.kind == GradientType::Radial {
            list.insert_percent("svg:r", self.radius);
        }
        true
    }

    pub fn cmp_total(&self, other: &Self) -> Ordering {
        self.kind
            .cmp(&other.kind)
            .then_with(|| self.angle.total_cmp(&other.angle))
            .then_with(|| self.stops.len().cmp(&other.stops.len()))
            .then_with(|| {
                self.stops
                    .iter()
                    .zip(&other.stops)
                    .map(|(a, b)| a.cmp_total(b))
                    .find(|o| o.is_ne())
                    .unwrap_or(Ordering::Equal)
            })
            .then_with(|| self.border.total_cmp(&other.border))
            .then_with(|| self.percent_center.cmp_x_major(&other.percent_center))
            .then_with(|| self.radius.total_cmp(&other.radius))
    }
}

impl fmt::Display for Gradient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind.as_str())?;
        if self.angle != 0.0 {
            write!(f, ",angle={}", self.angle)?;
        }
        write!(f, ",stops=[")?;
        for stop in &self.stops {
            write!(f, "({},{},{})", stop.offset, stop.color, stop.opacity)?;
        }
        write!(f, "]")?;
        if self.border > 0.0 {
            write!(f, ",border={}", self.border)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use retrodoc_core::{Collector, Ignore};

    #[test]
    fn test_linear_two_stops() {
        let mut list = PropertyList::new();
        assert!(Gradient::default().add_to(&mut list, &mut Ignore));
        assert_eq!(list.get_str("draw:fill").unwrap(), "gradient");
        assert_eq!(list.get_str("draw:style").unwrap(), "linear");
        assert_eq!(list.get_str("draw:start-color").unwrap(), "#000000");
        assert_eq!(list.get_str("draw:end-color").unwrap(), "#ffffff");
        assert!(!list.contains_key("svg:cx"));
        assert!(!list.contains_key("svg:r"));
    }

    #[test]
    fn test_radial_swaps_colors_and_writes_center() {
        let gradient = Gradient {
            kind: GradientType::Radial,
            radius: 0.75,
            ..Gradient::default()
        };
        let mut list = PropertyList::new();
        gradient.add_to(&mut list, &mut Ignore);
        assert_eq!(list.get_str("draw:start-color").unwrap(), "#ffffff");
        assert_eq!(list.get_str("draw:end-color").unwrap(), "#000000");
        assert_eq!(list.get("svg:cx").unwrap().as_string(), "50%");
        assert_eq!(list.get("svg:r").unwrap().as_string(), "75%");
    }

    #[test]
    fn test_three_stops_are_reported() {
        let mut gradient = Gradient::default();
        gradient
            .stops
            .insert(1, GradientStop::new(0.5, Color::rgb(255, 0, 0), 1.0));
        assert!(gradient.has_gradient(true));
        let mut list = PropertyList::new();
        let mut sink = Collector::new();
        gradient.add_to(&mut list, &mut sink);
        assert_eq!(list.get_list("svg:linearGradient").unwrap().len(), 3);
        assert!(!list.contains_key("draw:start-color"));
        assert_eq!(sink.count(DiagnosticKind::NonCanonicalGradient), 1);
    }

    #[test]
    fn test_single_stop_is_not_a_gradient() {
        let gradient = Gradient {
            stops: vec![GradientStop::new(0.0, Color::black(), 1.0)],
            ..Gradient::default()
        };
        let mut list = PropertyList::new();
        assert!(!gradient.add_to(&mut list, &mut Ignore));
        assert!(list.is_empty());
    }

    #[test]
    fn test_average_color() {
        assert_eq!(
            Gradient::default().average_color(),
            Some(Color::rgb(128, 128, 128))
        );
    }
}
