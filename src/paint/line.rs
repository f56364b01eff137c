//! Line rasterizer
//!
//! 1px lines dispatch on slope into four specialized integer-stepping
//! loops: horizontal, vertical, 45 degree, and generic Bresenham. Endpoints
//! are floored, and axis-aligned lines are shortened by one pixel on the
//! far end so that grid-line counting matches the canvas model (`n+1` grid
//! lines enclose `n` pixel spans): a line from y=5 to y=15 paints rows
//! 5..=14.
//!
//! Thick lines (stroke width != 1) are modeled as a 4-corner stroke
//! rectangle and rasterized by a per-scanline edge intersection scan, which
//! emits batched horizontal runs: O(thickness x length) work with cache
//! friendly row order. The degenerate zero-length case emits a filled
//! square of runs directly.

use crate::color::Rgba;
use crate::geometry::Point;
use crate::paint::buffer::{FrameBuffer, PixelRun};
use crate::paint::clip::ClipMask;

/// Strokes a line in device space
pub fn stroke_line(
  buffer: &mut FrameBuffer,
  clip: &ClipMask,
  from: Point,
  to: Point,
  color: Rgba,
  stroke_width: f32,
  global_alpha: f32,
) {
  if stroke_width <= 0.0 || color.is_transparent() {
    return;
  }

  if stroke_width.round() as i32 == 1 {
    stroke_thin_line(buffer, clip, from, to, color, global_alpha);
  } else {
    stroke_thick_line(buffer, clip, from, to, color, stroke_width, global_alpha);
  }
}

/// 1px line: floor endpoints, dispatch on slope
fn stroke_thin_line(
  buffer: &mut FrameBuffer,
  clip: &ClipMask,
  from: Point,
  to: Point,
  color: Rgba,
  global_alpha: f32,
) {
  let x0 = from.x.floor() as i32;
  let y0 = from.y.floor() as i32;
  let x1 = to.x.floor() as i32;
  let y1 = to.y.floor() as i32;

  if x0 == x1 && y0 == y1 {
    // Zero-length stroke paints nothing (butt caps)
    return;
  }

  if y0 == y1 {
    horizontal_thin(buffer, clip, x0, x1, y0, color, global_alpha);
  } else if x0 == x1 {
    vertical_thin(buffer, clip, x0, y0, y1, color, global_alpha);
  } else if (x1 - x0).abs() == (y1 - y0).abs() {
    diagonal_thin(buffer, clip, x0, y0, x1, y1, color, global_alpha);
  } else {
    bresenham_thin(buffer, clip, x0, y0, x1, y1, color, global_alpha);
  }
}

/// Horizontal 1px line, shortened by 1px on the far end, as one run
fn horizontal_thin(
  buffer: &mut FrameBuffer,
  clip: &ClipMask,
  x0: i32,
  x1: i32,
  y: i32,
  color: Rgba,
  global_alpha: f32,
) {
  let (start, len) = if x1 > x0 {
    (x0, (x1 - x0) as u32)
  } else {
    (x1 + 1, (x0 - x1) as u32)
  };
  buffer.set_pixel_runs(&[PixelRun::new(start, y, len)], color, global_alpha, clip);
}

/// Vertical 1px line, shortened by 1px on the far end
fn vertical_thin(
  buffer: &mut FrameBuffer,
  clip: &ClipMask,
  x: i32,
  y0: i32,
  y1: i32,
  color: Rgba,
  global_alpha: f32,
) {
  let (start, end) = if y1 > y0 { (y0, y1) } else { (y1 + 1, y0 + 1) };
  for y in start..end {
    buffer.set_pixel(x, y, color, global_alpha, clip);
  }
}

/// 45 degree 1px line, both endpoints inclusive
fn diagonal_thin(
  buffer: &mut FrameBuffer,
  clip: &ClipMask,
  x0: i32,
  y0: i32,
  x1: i32,
  y1: i32,
  color: Rgba,
  global_alpha: f32,
) {
  let steps = (x1 - x0).abs();
  let sx = (x1 - x0).signum();
  let sy = (y1 - y0).signum();
  for i in 0..=steps {
    buffer.set_pixel(x0 + i * sx, y0 + i * sy, color, global_alpha, clip);
  }
}

/// Generic 1px Bresenham, both endpoints inclusive
fn bresenham_thin(
  buffer: &mut FrameBuffer,
  clip: &ClipMask,
  x0: i32,
  y0: i32,
  x1: i32,
  y1: i32,
  color: Rgba,
  global_alpha: f32,
) {
  let dx = (x1 - x0).abs();
  let dy = -(y1 - y0).abs();
  let sx = (x1 - x0).signum();
  let sy = (y1 - y0).signum();
  let mut err = dx + dy;
  let (mut x, mut y) = (x0, y0);

  loop {
    buffer.set_pixel(x, y, color, global_alpha, clip);
    if x == x1 && y == y1 {
      break;
    }
    let e2 = 2 * err;
    if e2 >= dy {
      err += dy;
      x += sx;
    }
    if e2 <= dx {
      err += dx;
      y += sy;
    }
  }
}

/// Pixels whose centers fall inside the half-open interval `[min, max)`
///
/// Pixel x has its center at x + 0.5, so the covered range is
/// `[ceil(min - 0.5), ceil(max - 0.5))`.
#[inline]
pub(crate) fn center_span(min: f32, max: f32) -> (i32, i32) {
  ((min - 0.5).ceil() as i32, (max - 0.5).ceil() as i32)
}

/// Thick line as a 4-corner stroke rectangle, scanned row by row
fn stroke_thick_line(
  buffer: &mut FrameBuffer,
  clip: &ClipMask,
  from: Point,
  to: Point,
  color: Rgba,
  stroke_width: f32,
  global_alpha: f32,
) {
  let dx = to.x - from.x;
  let dy = to.y - from.y;
  let len = (dx * dx + dy * dy).sqrt();
  let half = stroke_width / 2.0;

  if len < 1e-6 {
    // Degenerate zero-length stroke: a filled square around the point
    let (px0, px1) = center_span(from.x - half, from.x + half);
    let (py0, py1) = center_span(from.y - half, from.y + half);
    let width = (px1 - px0).max(0) as u32;
    let runs: Vec<PixelRun> = (py0..py1).map(|y| PixelRun::new(px0, y, width)).collect();
    buffer.set_pixel_runs(&runs, color, global_alpha, clip);
    return;
  }

  // Unit normal scaled to half the stroke width
  let nx = -dy / len * half;
  let ny = dx / len * half;
  let corners = [
    Point::new(from.x + nx, from.y + ny),
    Point::new(to.x + nx, to.y + ny),
    Point::new(to.x - nx, to.y - ny),
    Point::new(from.x - nx, from.y - ny),
  ];

  let runs = scan_convex_quad(&corners, buffer.height());
  buffer.set_pixel_runs(&runs, color, global_alpha, clip);
}

/// Rasterizes a convex quad into per-row runs by edge intersection
///
/// Four precomputed edges, at most two x-intersections per scanline. The
/// half-open edge test (`ay <= cy < by` in either direction) counts each
/// vertex crossing once and skips horizontal edges. Rows are clamped to
/// `[0, rows)` so a huge quad costs at most the canvas height.
pub(crate) fn scan_convex_quad(corners: &[Point; 4], rows: u32) -> Vec<PixelRun> {
  let min_y = corners.iter().map(|p| p.y).fold(f32::INFINITY, f32::min);
  let max_y = corners
    .iter()
    .map(|p| p.y)
    .fold(f32::NEG_INFINITY, f32::max);

  let (y_start, y_end) = center_span(min_y, max_y);
  let y_start = y_start.max(0);
  let y_end = y_end.min(rows as i32);

  let mut runs = Vec::with_capacity((y_end - y_start).max(0) as usize);
  for y in y_start..y_end {
    let cy = y as f32 + 0.5;
    let mut min_x = f32::INFINITY;
    let mut max_x = f32::NEG_INFINITY;

    for i in 0..4 {
      let a = corners[i];
      let b = corners[(i + 1) % 4];
      let crosses = (a.y <= cy && cy < b.y) || (b.y <= cy && cy < a.y);
      if !crosses {
        continue;
      }
      let t = (cy - a.y) / (b.y - a.y);
      let x = a.x + t * (b.x - a.x);
      min_x = min_x.min(x);
      max_x = max_x.max(x);
    }

    if min_x > max_x {
      continue;
    }
    let (x0, x1) = center_span(min_x, max_x);
    if x1 > x0 {
      runs.push(PixelRun::new(x0, y, (x1 - x0) as u32));
    }
  }
  runs
}
