//! Painting and rasterization
//!
//! This module turns drawing calls into pixels, with no antialiasing
//! anywhere: every pixel is either fully painted or untouched, and pixel
//! output is deterministic for a given call sequence.
//!
//! # Architecture
//!
//! Drawing flows top-down through three layers:
//!
//! 1. **Canvas** ([`canvas::Canvas`]): the stateful API surface. Holds the
//!    transform, styles, global alpha, clip region, and the state stack.
//! 2. **Shape dispatch** ([`shape`]): maps user-space geometry through the
//!    current transform and picks the right rasterizer, preferring the
//!    axis-aligned crisp paths whenever the rotation snaps to a quarter
//!    turn.
//! 3. **Rasterizers** ([`line`], [`rect`], [`circle`]): per-shape scanline
//!    algorithms that reduce each shape to batched horizontal pixel runs.
//!
//! All writes funnel through the compositor in [`buffer`], which applies
//! the clip mask and source-over blending in one place. The [`crisp`]
//! helpers hold the parity rules that keep integer-aligned strokes exactly
//! on the pixel grid.

pub mod buffer;
pub mod canvas;
pub mod circle;
pub mod clip;
pub mod crisp;
pub mod line;
pub mod rect;
pub mod scanline;
pub mod shape;

pub use buffer::{FrameBuffer, PixelRun};
pub use canvas::{Canvas, ImageData};
pub use clip::ClipMask;
pub use scanline::ScanlineSpans;
pub use shape::{PaintStyle, Shape};
