//! Error types for scan-viz operations.

use std::io;
use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in scan-viz operations.
///
/// Only [`Error::InvalidConfiguration`] can come out of the core (curve
/// generation, classification, animation). The remaining variants belong to
/// configuration loading and the rendering/export collaborators.
#[derive(Error, Debug)]
pub enum Error {
    /// A configuration value is outside its valid range.
    #[error("invalid configuration value for '{field}': {message}")]
    InvalidConfiguration {
        /// The offending configuration field.
        field: &'static str,
        /// Why the value was rejected.
        message: String,
    },

    /// Configuration parsing error with line number.
    #[error("configuration error at line {line}: {message}")]
    ConfigParse {
        /// Line number where the error occurred (1-indexed, 0 if unknown).
        line: usize,
        /// Parser message.
        message: String,
    },

    /// Configuration file not found or unreadable.
    #[error("configuration file not found: {0}")]
    ConfigNotFound(String),

    /// I/O error (file operations, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// PNG encoding error.
    #[error("PNG encoding error: {0}")]
    PngEncoding(#[from] png::EncodingError),

    /// Invalid dimensions for a framebuffer or output surface.
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions {
        /// Width value.
        width: u32,
        /// Height value.
        height: u32,
    },

    /// Export was requested before any snapshot was drawn.
    #[error("nothing to export: no frames were drawn")]
    NothingToExport,
}

impl Error {
    /// Shorthand for an [`Error::InvalidConfiguration`].
    pub(crate) fn invalid_config(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            field,
            message: message.into(),
        }
    }
}
