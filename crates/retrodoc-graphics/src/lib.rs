//! # Retrodoc Graphics
//!
//! Shapes and styles of the drawings found in legacy documents.
//!
//! - [`shape`]: [`GraphicShape`] (lines, rectangles, ellipses, arcs,
//!   polygons and paths), the [`PathCommand`] algebra and path offsetting
//! - [`style`]: [`GraphicStyle`] with its arrows, borders, gradients,
//!   hatches and patterns
//!
//! Both serialize into a [`retrodoc_core::PropertyList`] for the document
//! sink.

pub mod error;
pub mod shape;
pub mod style;

pub use error::{Result, StyleError};
pub use shape::{
    offset_vertices, path_to_lists, path_to_svg, DrawPrimitive, GraphicShape, PathCommand, ShapeKind,
    ShapeType, DEFAULT_ROTATION_EPSILON,
};
pub use style::{
    Arrow, Border, BorderStyle, BorderType, DashPattern, Gradient, GradientStop, GradientType,
    GraphicStyle, Hatch, HatchType, LineCap, LineJoin, Pattern,
};
