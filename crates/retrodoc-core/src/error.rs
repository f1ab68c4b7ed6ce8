//! Error handling for retrodoc
//!
//! Provides the error types shared by every layer of the importer core:
//! - Geometry errors (vector arithmetic, matrix inversion)
//! - Sink errors (property values of the wrong kind)
//!
//! Most malformed input is *not* an error here: shapes, styles and bitmaps
//! degrade to an empty result and report through a
//! [`DiagnosticSink`](crate::diagnostics::DiagnosticSink) instead.
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Geometry error type
///
/// Raised by the vector/box/transformation kernel when an operation cannot
/// produce a meaningful value.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// Integer addition or subtraction left the scalar's range
    #[error("Arithmetic overflow while computing {operation}")]
    Overflow {
        /// The operation that overflowed ("add", "sub", ...).
        operation: &'static str,
    },

    /// The matrix has no inverse
    #[error("Transformation is not invertible (determinant {determinant})")]
    Singular {
        /// The determinant of the linear part.
        determinant: f64,
    },
}

/// Property sink error type
///
/// Represents lookups into a [`PropertyList`](crate::property::PropertyList)
/// that found a value of an unexpected kind.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PropertyError {
    /// The key is not present
    #[error("Property {key} not found")]
    Missing {
        /// The requested key.
        key: String,
    },

    /// The key holds another kind of value
    #[error("Property {key} is not a {expected}")]
    WrongKind {
        /// The requested key.
        key: String,
        /// The kind the caller asked for.
        expected: &'static str,
    },
}

/// Main error type for retrodoc
///
/// A unified error type that can represent any error raised by the core.
#[derive(Error, Debug)]
pub enum Error {
    /// Geometry error
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    /// Property sink error
    #[error(transparent)]
    Property(#[from] PropertyError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is an arithmetic overflow
    pub fn is_overflow(&self) -> bool {
        matches!(self, Error::Geometry(GeometryError::Overflow { .. }))
    }

    /// Check if this is a geometry error
    pub fn is_geometry_error(&self) -> bool {
        matches!(self, Error::Geometry(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
