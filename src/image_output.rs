//! Encoding rendered canvases to image files
//!
//! The buffer is already straight-alpha RGBA, which is exactly what the
//! encoders expect, so encoding is a direct handoff with no per-pixel
//! conversion. JPEG has no alpha channel; it gets the color channels as-is
//! with transparency dropped.

use std::io::Cursor;
use std::path::Path;

use image::{ImageFormat, RgbImage, RgbaImage};

use crate::error::{Error, OutputError, Result};
use crate::paint::canvas::Canvas;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputFormat {
  Png,
  Jpeg(u8), // quality 0-100
}

impl Default for OutputFormat {
  fn default() -> Self {
    OutputFormat::Png
  }
}

fn encode_failed(format: &str, reason: impl ToString) -> Error {
  Error::Output(OutputError::EncodeFailed {
    format: format.to_string(),
    reason: reason.to_string(),
  })
}

/// Encodes the canvas contents into an in-memory image file
pub fn encode_image(canvas: &Canvas, format: OutputFormat) -> Result<Vec<u8>> {
  let width = canvas.width();
  let height = canvas.height();
  let mut buffer = Vec::new();

  match format {
    OutputFormat::Png => {
      let img = RgbaImage::from_raw(width, height, canvas.data().to_vec())
        .ok_or_else(|| encode_failed("PNG", "Failed to create RGBA image"))?;
      let mut cursor = Cursor::new(&mut buffer);
      img
        .write_to(&mut cursor, ImageFormat::Png)
        .map_err(|e| encode_failed("PNG", e))?;
    }
    OutputFormat::Jpeg(quality) => {
      let rgb_data: Vec<u8> = canvas
        .data()
        .chunks_exact(4)
        .flat_map(|px| [px[0], px[1], px[2]])
        .collect();
      let img = RgbImage::from_raw(width, height, rgb_data)
        .ok_or_else(|| encode_failed("JPEG", "Failed to create RGB image"))?;
      let mut cursor = Cursor::new(&mut buffer);
      let encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut cursor, quality);
      img
        .write_with_encoder(encoder)
        .map_err(|e| encode_failed("JPEG", e))?;
    }
  }

  Ok(buffer)
}

/// Encodes the canvas and writes it to `path`
pub fn write_image(canvas: &Canvas, path: impl AsRef<Path>, format: OutputFormat) -> Result<()> {
  let bytes = encode_image(canvas, format)?;
  std::fs::write(path, bytes).map_err(|e| Error::Output(OutputError::Io(e)))?;
  Ok(())
}
