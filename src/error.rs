//! Error types for drawable pixel checks

use thiserror::Error;

use crate::assert::MismatchReport;

/// Result type alias for drawcheck operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while rendering or checking a drawable
#[derive(Error, Debug)]
pub enum Error {
    /// Width or height is non-positive or above the configured limit
    #[error("Drawable must be configured to have non-zero size (got {width}x{height})")]
    InvalidDimensions { width: i64, height: i64 },

    /// A rendered pixel differs from the expected color
    #[error("{0}")]
    ColorMismatch(Box<MismatchReport>),

    /// The renderable failed while painting
    #[error("Rendering failed: {0}")]
    RenderError(String),

    /// Invalid scene description or color literal
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// Failed to read a scene file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn invalid_dimensions(width: impl Into<i64>, height: impl Into<i64>) -> Self {
        Error::InvalidDimensions {
            width: width.into(),
            height: height.into(),
        }
    }

    /// The mismatch report carried by a `ColorMismatch` error, if any.
    pub fn mismatch(&self) -> Option<&MismatchReport> {
        match self {
            Error::ColorMismatch(report) => Some(report),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::ConfigError(err.to_string())
    }
}
