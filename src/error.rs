//! Error types for detection runs.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for detection operations.
pub type Result<T> = std::result::Result<T, DetectError>;

/// Errors that abort a detection run.
///
/// Degenerate contours and scenes without change are not errors; they show up
/// as empty or fallback results instead.
#[derive(Debug, Error)]
pub enum DetectError {
    #[error("Invalid input {}: {reason}", path.display())]
    InvalidInput { path: PathBuf, reason: String },

    #[error(
        "Image dimensions differ: background is {}x{}, foreground is {}x{}",
        background.0, background.1, foreground.0, foreground.1
    )]
    DimensionMismatch {
        background: (u32, u32),
        foreground: (u32, u32),
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl DetectError {
    /// Create an invalid input error for a file.
    pub fn invalid_input(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig(message.into())
    }
}
