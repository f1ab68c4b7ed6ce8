//! Error types for the settings crate.

use std::io;
use thiserror::Error;

/// Errors that can occur while loading or saving settings.
#[derive(Error, Debug)]
pub enum SettingsError {
    /// A settings value is invalid.
    #[error("Invalid setting '{key}': {reason}")]
    InvalidSetting { key: String, reason: String },

    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// TOML deserialization error.
    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// TOML serialization error.
    #[error("TOML error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// A configuration error occurred.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// Errors related to the settings file itself.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file extension is neither `.toml` nor `.json`.
    #[error("Unsupported config format: {0}")]
    UnsupportedFormat(String),

    /// A value is out of its valid range.
    #[error("Value out of range for '{key}': {value}")]
    ValueOutOfRange { key: String, value: String },

    /// No configuration directory exists on this platform.
    #[error("Unsupported platform: no configuration directory")]
    NoConfigDirectory,
}

/// Result type alias for settings operations.
pub type SettingsResult<T> = Result<T, SettingsError>;
