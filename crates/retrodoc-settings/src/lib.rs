//! Retrodoc Settings Crate
//!
//! Importer configuration: bitmap backend, geometry tolerances, diagnostics
//! and logging, persisted as TOML or JSON.

pub mod config;
pub mod error;

pub use config::{
    BitmapSettings, DiagnosticsSettings, GeometrySettings, ImportSettings, LoggingSettings,
};
pub use error::{ConfigError, SettingsError, SettingsResult};
