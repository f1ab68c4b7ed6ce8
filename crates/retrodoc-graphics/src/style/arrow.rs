//! Line end markers

use std::cmp::Ordering;
use std::fmt;

use retrodoc_core::{Box2d, PropertyList, Vec2d};
use serde::{Deserialize, Serialize};

/// A marker drawn at one end of a line, described by an SVG path in its
/// own view box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Arrow {
    /// Displayed width in points
    pub width: f64,
    pub viewbox: Box2d,
    pub path: String,
    /// The marker is centered on the line end instead of starting there
    pub is_centered: bool,
}

impl Default for Arrow {
    fn default() -> Self {
        Self {
            width: 0.0,
            viewbox: Box2d::default(),
            path: String::new(),
            is_centered: false,
        }
    }
}

impl Arrow {
    pub fn new(width: f64, viewbox: Box2d, path: impl Into<String>, is_centered: bool) -> Self {
        Self {
            width,
            viewbox,
            path: path.into(),
            is_centered,
        }
    }

    /// The stock triangular arrow.
    pub fn plain() -> Self {
        Self::new(
            5.0,
            Box2d::new(Vec2d::zero(), Vec2d::new(20.0, 30.0)),
            "m10 0-10 30h20z",
            false,
        )
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.path.is_empty()
    }

    /// Writes the `draw:marker-{which}-*` properties, `which` being `start`
    /// or `end`. Empty arrows write nothing.
    pub fn add_to(&self, list: &mut PropertyList, which: &str) {
        if self.is_empty() {
            return;
        }
        let (min, max) = (self.viewbox.min(), self.viewbox.max());
        list.insert_string(
            format!("draw:marker-{which}-viewbox"),
            format!("{} {} {} {}", min.x, min.y, max.x, max.y),
        );
        list.insert_string(format!("draw:marker-{which}-path"), self.path.clone());
        list.insert_point(format!("draw:marker-{which}-width"), self.width);
        if self.is_centered {
            list.insert_bool(format!("draw:marker-{which}-center"), true);
        }
    }

    pub fn cmp_total(&self, other: &Self) -> Ordering {
        self.width
            .total_cmp(&other.width)
            .then_with(|| self.viewbox.cmp_lexicographic(&other.viewbox))
            .then_with(|| self.path.cmp(&other.path))
            .then_with(|| self.is_centered.cmp(&other.is_centered))
    }
}

impl fmt::Display for Arrow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "none");
        }
        write!(f, "w={},viewbox={},path={}", self.width, self.viewbox, self.path)?;
        if self.is_centered {
            write!(f, ",centered")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_arrow_properties() {
        let mut list = PropertyList::new();
        Arrow::plain().add_to(&mut list, "start");
        assert_eq!(list.get_str("draw:marker-start-viewbox").unwrap(), "0 0 20 30");
        assert_eq!(list.get_str("draw:marker-start-path").unwrap(), "m10 0-10 30h20z");
        assert_eq!(list.get_double("draw:marker-start-width").unwrap(), 5.0);
        assert!(!list.contains_key("draw:marker-start-center"));
    }

    #[test]
    fn test_empty_arrow_writes_nothing() {
        let mut list = PropertyList::new();
        Arrow::default().add_to(&mut list, "end");
        assert!(list.is_empty());
        let zero_width = Arrow {
            width: 0.0,
            ..Arrow::plain()
        };
        assert!(zero_width.is_empty());
    }

    #[test]
    fn test_order() {
        let small = Arrow::plain();
        let large = Arrow {
            width: 8.0,
            ..Arrow::plain()
        };
        assert_eq!(small.cmp_total(&large), Ordering::Less);
        assert_eq!(small.cmp_total(&small.clone()), Ordering::Equal);
    }
}
