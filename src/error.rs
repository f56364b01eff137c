//! Error types for crispcanvas
//!
//! The error policy mirrors the drawing model it implements: API misuse and
//! malformed input fail loudly with a descriptive error, while geometric
//! edge cases (shapes partly or fully off-canvas, zero-length lines,
//! zero-radius circles) are clamped or skipped and never produce an error.
//!
//! All errors use the `thiserror` crate for minimal boilerplate and proper
//! error trait implementations.

use crate::color::ColorParseError;
use thiserror::Error;

/// Result type alias for crispcanvas operations
///
/// # Examples
///
/// ```
/// use crispcanvas::Result;
///
/// fn draw_something() -> Result<()> {
///     Ok(())
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for crispcanvas
///
/// Each variant wraps a more specific error type for that subsystem.
#[derive(Error, Debug)]
pub enum Error {
  /// Color string parsing error
  #[error("Color error: {0}")]
  Color(#[from] ColorParseError),

  /// Canvas API usage error
  #[error("Canvas error: {0}")]
  Canvas(#[from] CanvasError),

  /// Image encoding or output error
  #[error("Output error: {0}")]
  Output(#[from] OutputError),
}

/// Errors raised while encoding or writing rendered output
#[derive(Error, Debug)]
pub enum OutputError {
  /// The encoder rejected the pixel data
  #[error("Failed to encode {format}: {reason}")]
  EncodeFailed { format: String, reason: String },

  /// Writing the encoded bytes to disk failed
  #[error("Failed to write output file: {0}")]
  Io(#[from] std::io::Error),
}

/// Errors raised by the Canvas API surface
///
/// These are programmer errors or invalid parameters; none of them are
/// produced by geometry that merely falls outside the canvas.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CanvasError {
  /// Canvas creation failed (zero or overflowing dimensions)
  #[error("Failed to create canvas: {width}x{height}")]
  CanvasCreationFailed { width: u32, height: u32 },

  /// `restore()` called without a matching `save()`
  #[error("restore() called with no saved state on the stack")]
  EmptyStateStack,

  /// Operation intentionally unsupported by this engine
  #[error("'{operation}' is not supported; use {replacement} instead")]
  UnsupportedOperation {
    operation: String,
    replacement: String,
  },

  /// `get_image_data` called with non-positive dimensions
  #[error("Invalid ImageData dimensions: {width}x{height}")]
  InvalidImageDataBounds { width: i32, height: i32 },
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_canvas_error_creation_failed() {
    let error = CanvasError::CanvasCreationFailed {
      width: 0,
      height: 600,
    };
    assert!(format!("{}", error).contains("0x600"));
  }

  #[test]
  fn test_canvas_error_empty_state_stack() {
    let error = CanvasError::EmptyStateStack;
    assert!(format!("{}", error).contains("restore()"));
  }

  #[test]
  fn test_canvas_error_unsupported_operation() {
    let error = CanvasError::UnsupportedOperation {
      operation: "fill".to_string(),
      replacement: "fill_rect".to_string(),
    };
    let display = format!("{}", error);
    assert!(display.contains("fill"));
    assert!(display.contains("fill_rect"));
  }

  #[test]
  fn test_canvas_error_invalid_image_data_bounds() {
    let error = CanvasError::InvalidImageDataBounds {
      width: -5,
      height: 10,
    };
    assert!(format!("{}", error).contains("-5"));
  }

  #[test]
  fn test_error_from_canvas_error() {
    let error: Error = CanvasError::EmptyStateStack.into();
    assert!(matches!(error, Error::Canvas(_)));
  }

  #[test]
  fn test_error_from_color_error() {
    let color_error = ColorParseError::InvalidHex("#12345".to_string());
    let error: Error = color_error.into();
    assert!(matches!(error, Error::Color(_)));
  }

  #[test]
  fn test_error_trait_implemented() {
    let error: Error = CanvasError::EmptyStateStack.into();
    let _: &dyn std::error::Error = &error;
  }
}
