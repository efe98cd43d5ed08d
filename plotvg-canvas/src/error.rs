//! Error types for plotvg-canvas.

use thiserror::Error;

/// Result type alias using CanvasError.
pub type CanvasResult<T> = Result<T, CanvasError>;

/// Errors that can occur in canvas operations.
#[derive(Debug, Error)]
pub enum CanvasError {
    /// A font referenced by a drawing call is absent from the canvas font registry.
    #[error("unknown font: {typeface}")]
    UnknownFont { typeface: String },

    /// Pop was called without a matching Push.
    #[error("unbalanced pop: no matching push")]
    UnbalancedPop,

    /// Invalid canvas dimensions (must be positive and within limits).
    #[error("Invalid dimensions: width={width}, height={height}")]
    InvalidDimensions { width: u32, height: u32 },

    /// Font data could not be parsed into glyph outlines.
    #[error("Failed to parse font data: {0}")]
    FontParse(String),

    /// PNG encoding error.
    #[error("PNG encoding error: {0}")]
    PngError(String),

    /// I/O error while writing canvas output.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<png::EncodingError> for CanvasError {
    fn from(err: png::EncodingError) -> Self {
        CanvasError::PngError(err.to_string())
    }
}
