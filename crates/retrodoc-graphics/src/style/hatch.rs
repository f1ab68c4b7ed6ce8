//! Hatch fills

use std::cmp::Ordering;
use std::fmt;

use retrodoc_core::{Color, PropertyList};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HatchType {
    #[default]
    Single,
    Double,
    Triple,
}

impl HatchType {
    pub fn as_str(&self) -> &'static str {
        match self {
            HatchType::Single => "single",
            HatchType::Double => "double",
            HatchType::Triple => "triple",
        }
    }
}

/// Parallel lines (crossed for double and triple hatches) filling a surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hatch {
    pub kind: HatchType,
    pub color: Color,
    /// Distance between two lines, in inches
    pub distance: f64,
    /// Rotation in degrees
    pub rotation: f64,
}

impl Default for Hatch {
    fn default() -> Self {
        Self {
            kind: HatchType::Single,
            color: Color::black(),
            distance: 1.0 / 72.0,
            rotation: 0.0,
        }
    }
}

impl Hatch {
    pub fn has_hatch(&self) -> bool {
        self.distance > 0.0
    }

    pub fn add_to(&self, list: &mut PropertyList) {
        list.insert_string("draw:fill", "hatch");
        list.insert_string("draw:style", self.kind.as_str());
        list.insert_string("draw:color", self.color.to_string());
        list.insert_inch("draw:distance", self.distance);
        if self.rotation != 0.0 {
            list.insert_generic("draw:rotation", self.rotation);
        }
    }

    pub fn cmp_total(&self, other: &Self) -> Ordering {
        self.kind
            .cmp(&other.kind)
            .then_with(|| self.color.cmp(&other.color))
            .then_with(|| self.distance.total_cmp(&other.distance))
            .then_with(|| self.rotation.total_cmp(&other.rotation))
    }
}

impl fmt::Display for Hatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},dist={}in", self.kind.as_str(), self.color, self.distance)?;
        if self.rotation != 0.0 {
            write!(f, ",rot={}", self.rotation)?;
        }
        Ok(())
    }
}
