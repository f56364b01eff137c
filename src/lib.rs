//! crispcanvas: a crisp, CPU-only 2D rasterizer
//!
//! A software implementation of a small canvas-style drawing API with one
//! defining constraint: no antialiasing, ever. Every pixel is either fully
//! painted or untouched, so rendered output is bit-exact and diffable
//! across runs and platforms.
//!
//! The engine draws rectangles, rounded rectangles, circles, arcs, and
//! lines, with affine transforms, rectangular clip regions, straight-alpha
//! compositing, and a save/restore state stack. Shapes whose geometry
//! lands on the pixel grid are adjusted by parity rules so 1px strokes
//! occupy exactly one pixel column instead of smearing across two.
//!
//! # Example
//!
//! ```
//! use crispcanvas::Canvas;
//!
//! let mut canvas = Canvas::new(200, 200)?;
//! canvas.set_fill_style("#2d8f4e")?;
//! canvas.fill_rect(20.0, 20.0, 160.0, 160.0);
//! canvas.set_stroke_style("rgba(0, 0, 0, 0.8)")?;
//! canvas.set_line_width(3.0);
//! canvas.stroke_circle(100.0, 100.0, 60.0);
//! # Ok::<(), crispcanvas::Error>(())
//! ```

pub mod color;
pub mod error;
pub mod geometry;
pub mod image_output;
pub mod paint;
pub mod transform;

pub use color::{ColorParseError, Rgba};
pub use error::{CanvasError, Error, OutputError, Result};
pub use geometry::{Point, Rect, Size};
pub use image_output::{encode_image, write_image, OutputFormat};
pub use paint::{Canvas, ClipMask, FrameBuffer, ImageData, PaintStyle, PixelRun, Shape};
pub use transform::AffineTransform;
