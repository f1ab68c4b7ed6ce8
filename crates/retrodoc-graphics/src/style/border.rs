//! Frame and cell borders

use std::cmp::Ordering;
use std::fmt;

use retrodoc_core::{Color, DiagnosticKind, DiagnosticSink, PropertyList};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BorderStyle {
    None,
    #[default]
    Simple,
    Dot,
    LargeDot,
    Dash,
}

impl BorderStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            BorderStyle::None => "none",
            BorderStyle::Simple => "solid",
            BorderStyle::Dot | BorderStyle::LargeDot => "dotted",
            BorderStyle::Dash => "dashed",
        }
    }
}

/// Number of parallel lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BorderType {
    #[default]
    Single,
    Double,
    Triple,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Border {
    pub style: BorderStyle,
    pub kind: BorderType,
    /// Total width in points
    pub width: f64,
    /// Relative widths of the lines and gaps of a multiple border
    pub widths: Vec<f64>,
    pub color: Color,
}

impl Default for Border {
    fn default() -> Self {
        Self {
            style: BorderStyle::Simple,
            kind: BorderType::Single,
            width: 1.0,
            widths: Vec::new(),
            color: Color::black(),
        }
    }
}

impl Border {
    pub fn is_empty(&self) -> bool {
        self.style == BorderStyle::None || self.width <= 0.0
    }

    /// Writes `fo:border[-side]` and, for double borders with three relative
    /// widths, `style:border-line-width[-side]`. An empty `side` targets the
    /// four sides at once.
    pub fn add_to(&self, list: &mut PropertyList, side: &str, sink: &mut dyn DiagnosticSink) {
        let suffix = if side.is_empty() {
            String::new()
        } else {
            format!("-{side}")
        };
        let style = match self.kind {
            BorderType::Double | BorderType::Triple => {
                if self.style != BorderStyle::Simple {
                    tracing::debug!(style = ?self.style, "Multiple border drawn as plain double");
                }
                "double"
            }
            BorderType::Single => self.style.as_str(),
        };
        list.insert_string(
            format!("fo:border{suffix}"),
            format!("{}pt {} {}", self.width, style, self.color),
        );

        if self.widths.is_empty() {
            return;
        }
        if self.kind != BorderType::Double || self.widths.len() != 3 {
            sink.report(
                DiagnosticKind::UnsupportedBorderWidths,
                &format!("{} relative widths for a {:?} border", self.widths.len(), self.kind),
            );
            return;
        }
        let total: f64 = self.widths.iter().sum();
        if total <= 0.0 {
            sink.report(DiagnosticKind::UnsupportedBorderWidths, "relative widths sum to zero");
            return;
        }
        let factor = self.width / total;
        let widths: Vec<String> = self.widths.iter().map(|w| format!("{}pt", w * factor)).collect();
        list.insert_string(format!("style:border-line-width{suffix}"), widths.join(" "));
    }

    pub fn cmp_total(&self, other: &Self) -> Ordering {
        self.style
            .cmp(&other.style)
            .then_with(|| self.kind.cmp(&other.kind))
            .then_with(|| self.width.total_cmp(&other.width))
            .then_with(|| self.widths.len().cmp(&other.widths.len()))
            .then_with(|| {
                self.widths
                    .iter()
                    .zip(&other.widths)
                    .map(|(a, b)| a.total_cmp(b))
                    .find(|o| o.is_ne())
                    .unwrap_or(Ordering::Equal)
            })
            .then_with(|| self.color.cmp(&other.color))
    }
}

impl fmt::Display for Border {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}:{:?},w={},{}", self.style, self.kind, self.width, self.color)?;
        if !self.widths.is_empty() {
            write!(f, ",widths={:?}", self.widths)?;
        }
        Ok(())
    }
}
