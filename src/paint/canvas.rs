//! The Canvas drawing surface
//!
//! This is the public face of the engine: an HTML-canvas-shaped API over
//! the shape rasterizers. A `Canvas` owns the pixel buffer plus one mutable
//! drawing state (transform, styles, line width, global alpha, clip
//! region); `save`/`restore` manage a stack of state snapshots, clip
//! regions included.
//!
//! Path support is deliberately minimal: `begin_path` + `rect` + `clip` is
//! the only path pipeline, and `fill()`/`stroke()` return an error pointing
//! at their shape-specific replacements. Everything this engine draws goes
//! through one of the direct shape calls below.

use crate::color::Rgba;
use crate::error::{CanvasError, Result};
use crate::geometry::{Point, Rect};
use crate::paint::buffer::FrameBuffer;
use crate::paint::clip::ClipMask;
use crate::paint::shape::{self, PaintStyle, Shape};
use crate::transform::AffineTransform;

/// Largest canvas edge accepted by [`Canvas::new`]
const MAX_DIMENSION: u32 = 32_768;

/// A rectangle of raw RGBA pixels copied out of a canvas
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData {
  pub width: u32,
  pub height: u32,
  /// Row-major RGBA bytes, straight alpha
  pub data: Vec<u8>,
}

/// One entry of the drawing state stack
#[derive(Debug, Clone)]
struct CanvasState {
  transform: AffineTransform,
  fill_style: Rgba,
  stroke_style: Rgba,
  line_width: f32,
  global_alpha: f32,
  clip: ClipMask,
}

impl CanvasState {
  fn new(width: u32, height: u32) -> Self {
    Self {
      transform: AffineTransform::identity(),
      fill_style: Rgba::BLACK,
      stroke_style: Rgba::BLACK,
      line_width: 1.0,
      global_alpha: 1.0,
      clip: ClipMask::filled(width, height),
    }
  }
}

/// A CPU-rasterized 2D drawing surface
///
/// # Examples
///
/// ```
/// use crispcanvas::Canvas;
///
/// let mut canvas = Canvas::new(100, 100).unwrap();
/// canvas.set_fill_style("#f00").unwrap();
/// canvas.fill_rect(10.0, 10.0, 20.0, 20.0);
/// assert_eq!(canvas.data()[(10 * 100 + 10) * 4], 255);
/// ```
pub struct Canvas {
  width: u32,
  height: u32,
  buffer: FrameBuffer,
  state: CanvasState,
  stack: Vec<CanvasState>,
  /// Path coverage accumulated since the last `begin_path`. Only
  /// `begin_path` clears it; `clip()` does not, so repeated clips without
  /// an intervening `begin_path` keep intersecting against the
  /// accumulated union. That accumulation is a documented contract of the
  /// drawing model, not an accident.
  temp_mask: ClipMask,
}

impl Canvas {
  /// Creates a canvas of the given pixel dimensions, all transparent black
  pub fn new(width: u32, height: u32) -> Result<Self> {
    if width == 0 || height == 0 || width > MAX_DIMENSION || height > MAX_DIMENSION {
      return Err(CanvasError::CanvasCreationFailed { width, height }.into());
    }
    Ok(Self {
      width,
      height,
      buffer: FrameBuffer::new(width, height),
      state: CanvasState::new(width, height),
      stack: Vec::new(),
      temp_mask: ClipMask::empty(width, height),
    })
  }

  /// Canvas width in pixels
  pub fn width(&self) -> u32 {
    self.width
  }

  /// Canvas height in pixels
  pub fn height(&self) -> u32 {
    self.height
  }

  /// The raw RGBA bytes of the whole canvas
  pub fn data(&self) -> &[u8] {
    self.buffer.data()
  }

  /// Reads one pixel; out-of-bounds reads return transparent black
  pub fn pixel(&self, x: u32, y: u32) -> Rgba {
    self.buffer.pixel(x, y)
  }

  // State stack

  /// Pushes a snapshot of the current drawing state, clip included
  pub fn save(&mut self) {
    self.stack.push(self.state.clone());
  }

  /// Restores the most recently saved state
  pub fn restore(&mut self) -> Result<()> {
    match self.stack.pop() {
      Some(state) => {
        self.state = state;
        Ok(())
      }
      None => Err(CanvasError::EmptyStateStack.into()),
    }
  }

  // Transforms

  /// Translates the current transform
  pub fn translate(&mut self, dx: f32, dy: f32) {
    self.state.transform = self.state.transform.pre_translate(dx, dy);
  }

  /// Scales the current transform
  pub fn scale(&mut self, sx: f32, sy: f32) {
    self.state.transform = self.state.transform.pre_scale(sx, sy);
  }

  /// Rotates the current transform clockwise by `angle` radians
  pub fn rotate(&mut self, angle: f32) {
    self.state.transform = self.state.transform.pre_rotate(angle);
  }

  /// Replaces the current transform with the given matrix components
  pub fn set_transform(&mut self, sx: f32, ky: f32, kx: f32, sy: f32, tx: f32, ty: f32) {
    self.state.transform = AffineTransform {
      sx,
      kx,
      ky,
      sy,
      tx,
      ty,
    };
  }

  /// Resets the current transform to the identity
  pub fn reset_transform(&mut self) {
    self.state.transform = AffineTransform::identity();
  }

  /// The current transform matrix
  pub fn transform(&self) -> AffineTransform {
    self.state.transform
  }

  // Styles

  /// Sets the fill color from a CSS-style color string
  pub fn set_fill_style(&mut self, css: &str) -> Result<()> {
    self.state.fill_style = Rgba::parse(css)?;
    Ok(())
  }

  /// Sets the fill color directly
  pub fn set_fill_color(&mut self, color: Rgba) {
    self.state.fill_style = color;
  }

  /// Sets the stroke color from a CSS-style color string
  pub fn set_stroke_style(&mut self, css: &str) -> Result<()> {
    self.state.stroke_style = Rgba::parse(css)?;
    Ok(())
  }

  /// Sets the stroke color directly
  pub fn set_stroke_color(&mut self, color: Rgba) {
    self.state.stroke_style = color;
  }

  /// Sets the stroke width in user-space units; non-positive values are
  /// ignored, matching the canvas model
  pub fn set_line_width(&mut self, width: f32) {
    if width > 0.0 && width.is_finite() {
      self.state.line_width = width;
    }
  }

  /// Sets the global alpha, clamped to `[0, 1]`
  pub fn set_global_alpha(&mut self, alpha: f32) {
    self.state.global_alpha = alpha.clamp(0.0, 1.0);
  }

  /// The current global alpha
  pub fn global_alpha(&self) -> f32 {
    self.state.global_alpha
  }

  // Drawing

  fn fill_only(&self) -> PaintStyle {
    PaintStyle {
      fill: Some(self.state.fill_style),
      stroke: None,
      stroke_width: self.state.line_width,
      global_alpha: self.state.global_alpha,
    }
  }

  fn stroke_only(&self) -> PaintStyle {
    PaintStyle {
      fill: None,
      stroke: Some(self.state.stroke_style),
      stroke_width: self.state.line_width,
      global_alpha: self.state.global_alpha,
    }
  }

  fn fill_and_stroke(&self) -> PaintStyle {
    PaintStyle {
      fill: Some(self.state.fill_style),
      stroke: Some(self.state.stroke_style),
      stroke_width: self.state.line_width,
      global_alpha: self.state.global_alpha,
    }
  }

  fn paint(&mut self, shape: Shape, style: PaintStyle) {
    shape::paint_shape(
      &mut self.buffer,
      &self.state.clip,
      &self.state.transform,
      &shape,
      &style,
    );
  }

  /// Fills a rectangle with the current fill style
  pub fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
    let style = self.fill_only();
    self.paint(
      Shape::Rect {
        rect: Rect::from_xywh(x, y, w, h),
      },
      style,
    );
  }

  /// Strokes a rectangle outline with the current stroke style
  pub fn stroke_rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
    let style = self.stroke_only();
    self.paint(
      Shape::Rect {
        rect: Rect::from_xywh(x, y, w, h),
      },
      style,
    );
  }

  /// Fills then strokes a rectangle in one crisp-consistent pass
  pub fn fill_and_stroke_rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
    let style = self.fill_and_stroke();
    self.paint(
      Shape::Rect {
        rect: Rect::from_xywh(x, y, w, h),
      },
      style,
    );
  }

  /// Clears a rectangle to transparent black, honoring transform and clip
  pub fn clear_rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
    let shape = Shape::Rect {
      rect: Rect::from_xywh(x, y, w, h),
    };
    let runs = shape::shape_coverage(&self.state.transform, &shape, self.height);
    for run in &runs {
      for px in run.x..run.x.saturating_add(run.len as i32) {
        self.buffer.clear_pixel(px, run.y, &self.state.clip);
      }
    }
  }

  /// Strokes a line segment with the current stroke style
  pub fn stroke_line(&mut self, x0: f32, y0: f32, x1: f32, y1: f32) {
    let style = self.stroke_only();
    self.paint(
      Shape::Line {
        from: Point::new(x0, y0),
        to: Point::new(x1, y1),
      },
      style,
    );
  }

  /// Fills a circle with the current fill style
  pub fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32) {
    let style = self.fill_only();
    self.paint(
      Shape::Circle {
        center: Point::new(cx, cy),
        radius,
      },
      style,
    );
  }

  /// Strokes a circle outline with the current stroke style
  pub fn stroke_circle(&mut self, cx: f32, cy: f32, radius: f32) {
    let style = self.stroke_only();
    self.paint(
      Shape::Circle {
        center: Point::new(cx, cy),
        radius,
      },
      style,
    );
  }

  /// Fills then strokes a circle, blending each pixel exactly once
  pub fn fill_and_stroke_circle(&mut self, cx: f32, cy: f32, radius: f32) {
    let style = self.fill_and_stroke();
    self.paint(
      Shape::Circle {
        center: Point::new(cx, cy),
        radius,
      },
      style,
    );
  }

  /// Strokes a circular arc; angles are degrees, clockwise, half-open
  /// `[start, end)`
  pub fn stroke_arc(&mut self, cx: f32, cy: f32, radius: f32, start_deg: f32, end_deg: f32) {
    let style = self.stroke_only();
    self.paint(
      Shape::Arc {
        center: Point::new(cx, cy),
        radius,
        start_deg,
        end_deg,
      },
      style,
    );
  }

  /// Fills a pie slice; angles as in [`Canvas::stroke_arc`]
  pub fn fill_arc(&mut self, cx: f32, cy: f32, radius: f32, start_deg: f32, end_deg: f32) {
    let style = self.fill_only();
    self.paint(
      Shape::Arc {
        center: Point::new(cx, cy),
        radius,
        start_deg,
        end_deg,
      },
      style,
    );
  }

  /// Fills a rounded rectangle with uniform corner radius
  pub fn fill_rounded_rect(&mut self, x: f32, y: f32, w: f32, h: f32, radius: f32) {
    let style = self.fill_only();
    self.paint(
      Shape::RoundedRect {
        rect: Rect::from_xywh(x, y, w, h),
        radius,
      },
      style,
    );
  }

  /// Strokes a rounded rectangle outline
  pub fn stroke_rounded_rect(&mut self, x: f32, y: f32, w: f32, h: f32, radius: f32) {
    let style = self.stroke_only();
    self.paint(
      Shape::RoundedRect {
        rect: Rect::from_xywh(x, y, w, h),
        radius,
      },
      style,
    );
  }

  /// Fills then strokes a rounded rectangle
  pub fn fill_and_stroke_rounded_rect(&mut self, x: f32, y: f32, w: f32, h: f32, radius: f32) {
    let style = self.fill_and_stroke();
    self.paint(
      Shape::RoundedRect {
        rect: Rect::from_xywh(x, y, w, h),
        radius,
      },
      style,
    );
  }

  // Paths and clipping

  /// Starts a new path, discarding accumulated path coverage
  pub fn begin_path(&mut self) {
    self.temp_mask.clear();
  }

  fn add_path_coverage(&mut self, shape: Shape) {
    // Coverage is resolved under the transform active at the time of the
    // path call, as the drawing model requires
    let runs = shape::shape_coverage(&self.state.transform, &shape, self.height);
    for run in &runs {
      self
        .temp_mask
        .set_run(run.x, run.x.saturating_add(run.len as i32), run.y);
    }
  }

  /// Adds a rectangle's coverage to the current path
  pub fn rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
    self.add_path_coverage(Shape::Rect {
      rect: Rect::from_xywh(x, y, w, h),
    });
  }

  /// Adds a rounded rectangle's coverage to the current path
  pub fn rounded_rect(&mut self, x: f32, y: f32, w: f32, h: f32, radius: f32) {
    self.add_path_coverage(Shape::RoundedRect {
      rect: Rect::from_xywh(x, y, w, h),
      radius,
    });
  }

  /// Intersects the clip region with the current path's coverage
  ///
  /// Subsequent drawing only touches pixels inside both the previous clip
  /// and the path. The path coverage itself stays accumulated until the
  /// next `begin_path`; `save`/`restore` is the only way back to a wider
  /// clip.
  pub fn clip(&mut self) {
    self.state.clip.intersect(&self.temp_mask);
  }

  /// Unsupported: arbitrary path filling
  pub fn fill(&mut self) -> Result<()> {
    Err(
      CanvasError::UnsupportedOperation {
        operation: "fill".to_string(),
        replacement: "fill_rect / fill_circle / fill_rounded_rect".to_string(),
      }
      .into(),
    )
  }

  /// Unsupported: arbitrary path stroking
  pub fn stroke(&mut self) -> Result<()> {
    Err(
      CanvasError::UnsupportedOperation {
        operation: "stroke".to_string(),
        replacement: "stroke_rect / stroke_line / stroke_circle".to_string(),
      }
      .into(),
    )
  }

  // Pixel access

  /// Copies a rectangle of pixels out of the canvas
  ///
  /// The requested rectangle is clamped to the canvas; the returned
  /// dimensions shrink accordingly. Non-positive requested dimensions are
  /// an error.
  pub fn get_image_data(&self, x: i32, y: i32, w: i32, h: i32) -> Result<ImageData> {
    if w <= 0 || h <= 0 {
      return Err(CanvasError::InvalidImageDataBounds { width: w, height: h }.into());
    }
    let x0 = x.clamp(0, self.width as i32);
    let y0 = y.clamp(0, self.height as i32);
    let x1 = x.saturating_add(w).clamp(x0, self.width as i32);
    let y1 = y.saturating_add(h).clamp(y0, self.height as i32);
    let out_w = (x1 - x0) as u32;
    let out_h = (y1 - y0) as u32;
    if out_w == 0 || out_h == 0 {
      // Request lies entirely off the canvas
      return Ok(ImageData {
        width: out_w,
        height: out_h,
        data: Vec::new(),
      });
    }

    let mut data = Vec::with_capacity((out_w * out_h * 4) as usize);
    let src = self.buffer.data();
    for row in y0..y1 {
      let start = ((row as u32 * self.width + x0 as u32) * 4) as usize;
      let end = start + (out_w * 4) as usize;
      data.extend_from_slice(&src[start..end]);
    }
    Ok(ImageData {
      width: out_w,
      height: out_h,
      data,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_new_rejects_zero_dimensions() {
    assert!(Canvas::new(0, 100).is_err());
    assert!(Canvas::new(100, 0).is_err());
    assert!(Canvas::new(100, 100).is_ok());
  }

  #[test]
  fn test_fill_rect_device_pixels() {
    let mut canvas = Canvas::new(100, 100).unwrap();
    canvas.set_fill_color(Rgba::RED);
    canvas.fill_rect(10.0, 10.0, 20.0, 20.0);
    assert_eq!(canvas.pixel(10, 10), Rgba::RED);
    assert_eq!(canvas.pixel(29, 29), Rgba::RED);
    assert_eq!(canvas.pixel(30, 30), Rgba::TRANSPARENT);
  }

  #[test]
  fn test_set_fill_style_parses_css() {
    let mut canvas = Canvas::new(10, 10).unwrap();
    canvas.set_fill_style("rgb(0, 128, 255)").unwrap();
    canvas.fill_rect(0.0, 0.0, 1.0, 1.0);
    assert_eq!(canvas.pixel(0, 0), Rgba::new(0, 128, 255, 255));
    assert!(canvas.set_fill_style("not-a-color").is_err());
  }

  #[test]
  fn test_save_restore_round_trip() {
    let mut canvas = Canvas::new(10, 10).unwrap();
    canvas.set_fill_color(Rgba::RED);
    canvas.save();
    canvas.set_fill_color(Rgba::BLUE);
    canvas.translate(3.0, 0.0);
    canvas.restore().unwrap();
    canvas.fill_rect(0.0, 0.0, 1.0, 1.0);
    // Fill color and transform both restored
    assert_eq!(canvas.pixel(0, 0), Rgba::RED);
  }

  #[test]
  fn test_restore_on_empty_stack_errors() {
    let mut canvas = Canvas::new(10, 10).unwrap();
    assert!(canvas.restore().is_err());
  }

  #[test]
  fn test_global_alpha_clamped() {
    let mut canvas = Canvas::new(10, 10).unwrap();
    canvas.set_global_alpha(2.0);
    assert_eq!(canvas.global_alpha(), 1.0);
    canvas.set_global_alpha(-1.0);
    assert_eq!(canvas.global_alpha(), 0.0);
  }

  #[test]
  fn test_global_alpha_halves_fill() {
    let mut canvas = Canvas::new(10, 10).unwrap();
    canvas.set_fill_color(Rgba::RED);
    canvas.set_global_alpha(0.5);
    canvas.fill_rect(0.0, 0.0, 10.0, 10.0);
    assert_eq!(canvas.pixel(5, 5), Rgba::new(255, 0, 0, 128));
  }

  #[test]
  fn test_clip_limits_drawing() {
    let mut canvas = Canvas::new(20, 20).unwrap();
    canvas.begin_path();
    canvas.rect(5.0, 5.0, 5.0, 5.0);
    canvas.clip();
    canvas.set_fill_color(Rgba::RED);
    canvas.fill_rect(0.0, 0.0, 20.0, 20.0);
    assert_eq!(canvas.pixel(5, 5), Rgba::RED);
    assert_eq!(canvas.pixel(9, 9), Rgba::RED);
    assert_eq!(canvas.pixel(4, 4), Rgba::TRANSPARENT);
    assert_eq!(canvas.pixel(10, 10), Rgba::TRANSPARENT);
  }

  #[test]
  fn test_nested_clips_intersect() {
    let mut canvas = Canvas::new(20, 20).unwrap();
    canvas.begin_path();
    canvas.rect(0.0, 0.0, 10.0, 20.0);
    canvas.clip();
    canvas.begin_path();
    canvas.rect(5.0, 0.0, 10.0, 20.0);
    canvas.clip();
    canvas.set_fill_color(Rgba::RED);
    canvas.fill_rect(0.0, 0.0, 20.0, 20.0);
    // Only the overlap [5, 10) is drawable
    assert_eq!(canvas.pixel(7, 10), Rgba::RED);
    assert_eq!(canvas.pixel(3, 10), Rgba::TRANSPARENT);
    assert_eq!(canvas.pixel(12, 10), Rgba::TRANSPARENT);
  }

  #[test]
  fn test_path_coverage_accumulates_without_begin_path() {
    let mut canvas = Canvas::new(20, 20).unwrap();
    canvas.begin_path();
    canvas.rect(0.0, 0.0, 10.0, 20.0);
    canvas.clip();
    // No begin_path: the second rect joins the accumulated coverage, so
    // this clip intersects against the union and does not narrow to the
    // new rect alone
    canvas.rect(10.0, 0.0, 5.0, 20.0);
    canvas.clip();
    canvas.set_fill_color(Rgba::RED);
    canvas.fill_rect(0.0, 0.0, 20.0, 20.0);
    assert_eq!(canvas.pixel(5, 10), Rgba::RED);
    assert_eq!(canvas.pixel(12, 10), Rgba::TRANSPARENT);
  }

  #[test]
  fn test_save_restore_reopens_clip() {
    let mut canvas = Canvas::new(20, 20).unwrap();
    canvas.save();
    canvas.begin_path();
    canvas.rect(0.0, 0.0, 5.0, 5.0);
    canvas.clip();
    canvas.restore().unwrap();
    canvas.set_fill_color(Rgba::RED);
    canvas.fill_rect(0.0, 0.0, 20.0, 20.0);
    // The clip from inside the save/restore no longer applies
    assert_eq!(canvas.pixel(15, 15), Rgba::RED);
  }

  #[test]
  fn test_fill_and_stroke_are_unsupported() {
    let mut canvas = Canvas::new(10, 10).unwrap();
    assert!(canvas.fill().is_err());
    assert!(canvas.stroke().is_err());
  }

  #[test]
  fn test_get_image_data_rejects_non_positive() {
    let canvas = Canvas::new(10, 10).unwrap();
    assert!(canvas.get_image_data(0, 0, 0, 5).is_err());
    assert!(canvas.get_image_data(0, 0, 5, -1).is_err());
  }

  #[test]
  fn test_get_image_data_clamps_to_canvas() {
    let mut canvas = Canvas::new(10, 10).unwrap();
    canvas.set_fill_color(Rgba::GREEN);
    canvas.fill_rect(0.0, 0.0, 10.0, 10.0);
    let img = canvas.get_image_data(8, 8, 5, 5).unwrap();
    assert_eq!(img.width, 2);
    assert_eq!(img.height, 2);
    assert_eq!(img.data.len(), 16);
    assert_eq!(&img.data[0..4], &[0, 255, 0, 255]);
  }

  #[test]
  fn test_get_image_data_off_canvas_is_empty() {
    let canvas = Canvas::new(10, 10).unwrap();
    let img = canvas.get_image_data(10_000, 0, 5, 5).unwrap();
    assert_eq!(img.width, 0);
    assert!(img.data.is_empty());
    let img = canvas.get_image_data(0, -20, 5, 5).unwrap();
    assert_eq!(img.height, 0);
    assert!(img.data.is_empty());
  }

  #[test]
  fn test_get_image_data_copies_pixels() {
    let mut canvas = Canvas::new(10, 10).unwrap();
    canvas.set_fill_color(Rgba::BLUE);
    canvas.fill_rect(2.0, 2.0, 2.0, 2.0);
    let img = canvas.get_image_data(2, 2, 2, 2).unwrap();
    assert!(img.data.chunks_exact(4).all(|px| px == [0, 0, 255, 255]));
  }

  #[test]
  fn test_line_width_ignores_non_positive() {
    let mut canvas = Canvas::new(10, 10).unwrap();
    canvas.set_line_width(3.0);
    canvas.set_line_width(0.0);
    canvas.set_line_width(-2.0);
    canvas.set_fill_color(Rgba::RED);
    // A 3px stroke still applies: band [3.5, 6.5) covers columns 3..=5
    canvas.stroke_line(5.0, 1.0, 5.0, 9.0);
    assert_eq!(canvas.pixel(3, 5), Rgba::BLACK);
    assert_eq!(canvas.pixel(5, 5), Rgba::BLACK);
    assert_eq!(canvas.pixel(6, 5), Rgba::TRANSPARENT);
  }

  #[test]
  fn test_translate_then_fill() {
    let mut canvas = Canvas::new(20, 20).unwrap();
    canvas.translate(5.0, 5.0);
    canvas.set_fill_color(Rgba::RED);
    canvas.fill_rect(0.0, 0.0, 5.0, 5.0);
    assert_eq!(canvas.pixel(5, 5), Rgba::RED);
    assert_eq!(canvas.pixel(4, 4), Rgba::TRANSPARENT);
  }

  #[test]
  fn test_clear_rect_honors_clip() {
    let mut canvas = Canvas::new(20, 20).unwrap();
    canvas.set_fill_color(Rgba::RED);
    canvas.fill_rect(0.0, 0.0, 20.0, 20.0);
    canvas.begin_path();
    canvas.rect(0.0, 0.0, 10.0, 20.0);
    canvas.clip();
    canvas.clear_rect(0.0, 0.0, 20.0, 20.0);
    assert_eq!(canvas.pixel(5, 5), Rgba::TRANSPARENT);
    assert_eq!(canvas.pixel(15, 5), Rgba::RED);
  }
}
