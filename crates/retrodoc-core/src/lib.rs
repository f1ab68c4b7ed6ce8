//! # Retrodoc Core
//!
//! Value types shared by every legacy document importer:
//! - integer and floating point vectors, boxes and affine transformations
//! - packed colors
//! - the property list handed to the document sink
//! - diagnostic sinks used to report degraded input

pub mod bbox;
pub mod color;
pub mod diagnostics;
pub mod error;
pub mod property;
pub mod transform;
pub mod vector;

pub use bbox::{Box2, Box2d, Box2f, Box2i, Box2l};
pub use color::Color;
pub use diagnostics::{Collector, Deduplicate, DiagnosticKind, DiagnosticSink, Ignore, LogAll, LogOnce};
pub use error::{Error, GeometryError, PropertyError, Result};
pub use property::{PropertyList, PropertyValue, Unit};
pub use transform::{Decomposition, Transformation};
pub use vector::{Scalar, Vec2d, Vec2f, Vec2i, Vec2l, Vec3d, Vec3f, Vec3i, Vector2, Vector3};
