//! Import context
//!
//! Bundles the settings of one import with its diagnostic sink, so parsers
//! apply the configured tolerances, encoder backend and deduplication
//! without threading each of them through every call.

use std::path::Path;

use retrodoc_core::{DiagnosticSink, PropertyList, Transformation, Vec2d};
use retrodoc_graphics::{DrawPrimitive, GraphicShape, GraphicStyle};
use retrodoc_settings::{ImportSettings, SettingsResult};

pub struct ImportContext<'a> {
    settings: ImportSettings,
    sink: Box<dyn DiagnosticSink + 'a>,
}

impl ImportContext<'static> {
    /// Context logging its diagnostics through `tracing`.
    pub fn new(settings: ImportSettings) -> Self {
        let sink = settings.diagnostic_sink();
        Self { settings, sink }
    }

    /// Loads the settings at `path`, or uses the defaults when it does not
    /// exist.
    pub fn load(path: &Path) -> SettingsResult<Self> {
        Ok(Self::new(ImportSettings::load_or_default(path)?))
    }
}

impl<'a> ImportContext<'a> {
    /// Context reporting to `sink`, deduplicated as the settings ask.
    pub fn with_sink<S: DiagnosticSink + 'a>(settings: ImportSettings, sink: S) -> Self {
        let sink = settings.wrap_sink(sink);
        Self { settings, sink }
    }

    pub fn settings(&self) -> &ImportSettings {
        &self.settings
    }

    pub fn sink(&mut self) -> &mut dyn DiagnosticSink {
        self.sink.as_mut()
    }

    /// Rotates `shape`, treating turns within `geometry.rotation_epsilon`
    /// of a full turn as no rotation.
    pub fn rotate(&self, shape: &GraphicShape, angle: f64, center: Vec2d) -> GraphicShape {
        shape.rotate_with_epsilon(angle, center, self.settings.geometry.rotation_epsilon)
    }

    pub fn transform(&mut self, shape: &GraphicShape, matrix: &Transformation) -> GraphicShape {
        shape.transform_reporting(matrix, self.sink.as_mut())
    }

    pub fn add_shape(
        &mut self,
        shape: &GraphicShape,
        origin: Vec2d,
        as_surface: bool,
        list: &mut PropertyList,
    ) -> DrawPrimitive {
        shape.add_to(origin, as_surface, list, self.sink.as_mut())
    }

    /// Serializes `style` with the configured bitmap backend.
    pub fn add_style(&mut self, style: &GraphicStyle, only_1d: bool, list: &mut PropertyList) {
        style.add_to_with(list, only_1d, self.settings.bitmap.backend, self.sink.as_mut());
    }

    pub fn add_frame(&mut self, style: &GraphicStyle, list: &mut PropertyList) {
        style.add_frame_to(list, self.sink.as_mut());
    }
}
