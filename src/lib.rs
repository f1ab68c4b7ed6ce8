//! # Retrodoc
//!
//! Geometry, shape, style and bitmap core shared by the legacy document
//! importers.
//!
//! ## Architecture
//!
//! Retrodoc is organized as a workspace with multiple crates:
//!
//! 1. **retrodoc-core** - Vectors, boxes, transformations, colors, property lists, diagnostics
//! 2. **retrodoc-bitmap** - Pixel buffers and the PNG / PBM / PPM / BMP encoders
//! 3. **retrodoc-graphics** - Graphic shapes, path algebra and graphic styles
//! 4. **retrodoc-settings** - Import settings persisted as TOML or JSON
//!
//! Parsers build [`GraphicShape`]s and [`GraphicStyle`]s from the records
//! they decode, then serialize them into a [`PropertyList`] for the document
//! sink. Degraded input never aborts a conversion: it is reported to a
//! [`DiagnosticSink`]. An [`ImportContext`] applies the [`ImportSettings`]
//! of an import to those calls.

mod context;

pub use context::ImportContext;

pub use retrodoc_bitmap as bitmap;
pub use retrodoc_core as core;
pub use retrodoc_graphics as graphics;
pub use retrodoc_settings as settings;

pub use retrodoc_core::{
    Box2d, Box2i, Collector, Color, Deduplicate, DiagnosticKind, DiagnosticSink, Error, GeometryError, Ignore,
    LogAll, LogOnce, PropertyList, PropertyValue, Result, Transformation, Unit, Vec2d, Vec2i,
};

pub use retrodoc_bitmap::{
    Bitmap, BitmapBw, BitmapColor, BitmapError, BitmapIndexed, EncodedImage, EncoderBackend,
};

pub use retrodoc_graphics::{
    Arrow, Border, BorderStyle, BorderType, DrawPrimitive, Gradient, GradientStop, GradientType,
    GraphicShape, GraphicStyle, Hatch, HatchType, LineCap, LineJoin, PathCommand, Pattern,
    ShapeKind, ShapeType, StyleError,
};

pub use retrodoc_settings::{ImportSettings, SettingsError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize logging at INFO, see [`init_logging_with_level`].
pub fn init_logging() -> anyhow::Result<()> {
    init_logging_with_level("info")
}

/// Initialize logging with the given default level
///
/// Sets up structured logging with:
/// - Console output on stderr
/// - RUST_LOG environment variable support, taking precedence over `level`
///
/// Calling it again once a subscriber is installed does nothing.
pub fn init_logging_with_level(level: &str) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(level)?,
    };

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true);

    if tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .is_err()
    {
        tracing::debug!("Logging already initialized");
    }

    Ok(())
}

/// Initialize logging from the `logging` section of `settings`.
pub fn init_logging_from(settings: &ImportSettings) -> anyhow::Result<()> {
    init_logging_with_level(&settings.logging.level)
}
