//! Import settings
//!
//! Settings are grouped by concern:
//! - bitmap encoding (PNG or PBM/PPM/BMP)
//! - geometry tolerances
//! - diagnostics deduplication
//! - logging level
//!
//! Files are TOML or JSON, chosen by extension. Missing keys take their
//! default value.

use std::path::{Path, PathBuf};

use retrodoc_bitmap::EncoderBackend;
use retrodoc_core::{Deduplicate, DiagnosticSink, LogAll};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, SettingsError, SettingsResult};

const LOG_LEVELS: [&str; 6] = ["trace", "debug", "info", "warn", "error", "off"];

/// Bitmap encoding settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct BitmapSettings {
    /// Image family used for rasterized patterns and bitmaps
    pub backend: EncoderBackend,
}

/// Geometry tolerances
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeometrySettings {
    /// Rotations closer than this (degrees) to a full turn are skipped
    pub rotation_epsilon: f64,
}

impl Default for GeometrySettings {
    fn default() -> Self {
        Self {
            rotation_epsilon: 1e-3,
        }
    }
}

/// Diagnostics reporting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiagnosticsSettings {
    /// Warn only on the first occurrence of each condition
    pub dedupe: bool,
}

impl Default for DiagnosticsSettings {
    fn default() -> Self {
        Self { dedupe: true }
    }
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Default filter, overridden by `RUST_LOG`
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Json,
    Toml,
}

impl Format {
    fn from_path(path: &Path) -> SettingsResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Format::Json),
            Some("toml") => Ok(Format::Toml),
            other => Err(ConfigError::UnsupportedFormat(other.unwrap_or("").to_string()).into()),
        }
    }
}

/// Complete importer configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ImportSettings {
    pub bitmap: BitmapSettings,
    pub geometry: GeometrySettings,
    pub diagnostics: DiagnosticsSettings,
    pub logging: LoggingSettings,
}

impl ImportSettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// `<config dir>/retrodoc/settings.toml`
    pub fn default_config_path() -> SettingsResult<PathBuf> {
        let mut path = dirs::config_dir().ok_or(ConfigError::NoConfigDirectory)?;
        path.push("retrodoc");
        path.push("settings.toml");
        Ok(path)
    }

    /// Load settings from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = Format::from_path(path)?;
        let content = std::fs::read_to_string(path)?;
        let settings: Self = match format {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };
        settings.validate()?;
        tracing::debug!(path = %path.display(), "Loaded settings");
        Ok(settings)
    }

    /// Like [`load_from_file`](Self::load_from_file), but a missing file
    /// yields the defaults.
    pub fn load_or_default(path: &Path) -> SettingsResult<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No settings file, using defaults");
            return Ok(Self::default());
        }
        Self::load_from_file(path)
    }

    /// Save settings to file (JSON or TOML), creating parent directories
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;
        let content = match Format::from_path(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> SettingsResult<()> {
        let epsilon = self.geometry.rotation_epsilon;
        if !epsilon.is_finite() || !(0.0..180.0).contains(&epsilon) {
            return Err(ConfigError::ValueOutOfRange {
                key: "geometry.rotation_epsilon".to_string(),
                value: epsilon.to_string(),
            }
            .into());
        }
        let level = self.logging.level.to_ascii_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(SettingsError::InvalidSetting {
                key: "logging.level".to_string(),
                reason: format!("unknown level '{}'", self.logging.level),
            });
        }
        Ok(())
    }

    /// The logging diagnostic sink matching `diagnostics.dedupe`.
    pub fn diagnostic_sink(&self) -> Box<dyn DiagnosticSink> {
        self.wrap_sink(LogAll)
    }

    /// Applies the `diagnostics.dedupe` policy to `sink`: with it, only the
    /// first report of each kind reaches `sink`.
    pub fn wrap_sink<'a, S: DiagnosticSink + 'a>(&self, sink: S) -> Box<dyn DiagnosticSink + 'a> {
        if self.diagnostics.dedupe {
            Box::new(Deduplicate::wrap(sink))
        } else {
            Box::new(sink)
        }
    }
}
