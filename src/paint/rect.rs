//! Rectangle and rounded-rectangle rasterizers
//!
//! Axis-aligned rectangles are the fast path: their geometry is rounded to
//! the pixel grid, strokes are parity-adjusted so the stroke band lands on
//! whole pixels, and every shape reduces to batched horizontal runs.
//! Callers that pass non-integer fill bounds get the rounded result plus a
//! log warning, since the rounding is observable.
//!
//! Rotated rectangles (any angle not snapping to a quarter turn) map their
//! four corners to device space and reuse the convex-quad scanline fill.
//!
//! Rounded rectangles are composed per row: straight edge spans plus
//! analytic quarter-circle extents, accumulated through [`ScanlineSpans`]
//! so adjacent pieces merge and semi-transparent colors never double-blend.

use tracing::warn;

use crate::color::Rgba;
use crate::geometry::{Point, Rect};
use crate::paint::buffer::{FrameBuffer, PixelRun};
use crate::paint::clip::ClipMask;
use crate::paint::crisp::{adjust_center_for_crisp_stroke, adjust_dimensions_for_crisp_stroke};
use crate::paint::line::{center_span, scan_convex_quad};
use crate::paint::scanline::ScanlineSpans;

/// Rounds one fill bound to the grid, warning when the input was not
/// already integer-aligned
fn crisp_bound(value: f32, what: &str) -> i32 {
  let rounded = value.round();
  if (value - rounded).abs() > 0.001 {
    warn!(value, "rect {what} is not pixel-aligned, rounding");
  }
  rounded as i32
}

/// Integer pixel bounds of a filled rectangle
fn fill_bounds(rect: Rect) -> (i32, i32, i32, i32) {
  let x0 = crisp_bound(rect.min_x(), "left edge");
  let y0 = crisp_bound(rect.min_y(), "top edge");
  let x1 = crisp_bound(rect.max_x(), "right edge");
  let y1 = crisp_bound(rect.max_y(), "bottom edge");
  (x0, y0, x1, y1)
}

/// Runs covering the filled rectangle, one per row
pub fn fill_rect_runs(rect: Rect) -> Vec<PixelRun> {
  let (x0, y0, x1, y1) = fill_bounds(rect);
  if x1 <= x0 || y1 <= y0 {
    return Vec::new();
  }
  let len = (x1 - x0) as u32;
  (y0..y1).map(|y| PixelRun::new(x0, y, len)).collect()
}

/// The crisp stroke geometry shared by stroked rect variants
///
/// Returns the integer outer and inner band edges after the parity
/// adjustment: `(ox0, oy0, ox1, oy1, ix0, iy0, ix1, iy1)`.
fn stroke_band_bounds(rect: Rect, stroke_width: f32) -> (i32, i32, i32, i32, i32, i32, i32, i32) {
  let center = rect.center();
  let size = adjust_dimensions_for_crisp_stroke(rect.width(), rect.height(), stroke_width, center);
  let center = adjust_center_for_crisp_stroke(size.width, size.height, stroke_width, center);
  let sw = stroke_width.round().max(1.0);
  let (hw, hh, hs) = (size.width / 2.0, size.height / 2.0, sw / 2.0);

  let ox0 = (center.x - hw - hs).round() as i32;
  let oy0 = (center.y - hh - hs).round() as i32;
  let ox1 = (center.x + hw + hs).round() as i32;
  let oy1 = (center.y + hh + hs).round() as i32;
  let ix0 = (center.x - hw + hs).round() as i32;
  let iy0 = (center.y - hh + hs).round() as i32;
  let ix1 = (center.x + hw - hs).round() as i32;
  let iy1 = (center.y + hh - hs).round() as i32;
  (ox0, oy0, ox1, oy1, ix0, iy0, ix1, iy1)
}

/// Runs covering the stroke band of a rectangle outline
///
/// The band straddles the rectangle boundary: half the stroke width
/// outside, half inside, after the crisp parity adjustment. Corner pixels
/// appear exactly once.
pub fn stroke_rect_runs(rect: Rect, stroke_width: f32) -> Vec<PixelRun> {
  let (ox0, oy0, ox1, oy1, ix0, iy0, ix1, iy1) = stroke_band_bounds(rect, stroke_width);
  if ox1 <= ox0 || oy1 <= oy0 {
    return Vec::new();
  }

  let mut spans = ScanlineSpans::new(oy0, oy1);
  for y in oy0..oy1 {
    if y < iy0 || y >= iy1 || ix1 <= ix0 {
      // Top band, bottom band, or a rect too thin to have an interior
      spans.add(y, ox0, ox1);
    } else {
      spans.add(y, ox0, ix0);
      spans.add(y, ix1, ox1);
    }
  }
  spans.to_runs()
}

/// Fill and stroke runs for one rectangle, sharing the crisp geometry
///
/// The fill covers the parity-adjusted rectangle, the stroke band overlays
/// its boundary; painting fill first then stroke gives the layering the
/// canvas model requires.
pub fn fill_and_stroke_rect_runs(rect: Rect, stroke_width: f32) -> (Vec<PixelRun>, Vec<PixelRun>) {
  let (_, _, _, _, ix0, iy0, ix1, iy1) = stroke_band_bounds(rect, stroke_width);
  let fill = if ix1 > ix0 && iy1 > iy0 {
    let len = (ix1 - ix0) as u32;
    (iy0..iy1).map(|y| PixelRun::new(ix0, y, len)).collect()
  } else {
    Vec::new()
  };
  (fill, stroke_rect_runs(rect, stroke_width))
}

/// Fills an axis-aligned rectangle
pub fn fill_rect(
  buffer: &mut FrameBuffer,
  clip: &ClipMask,
  rect: Rect,
  color: Rgba,
  global_alpha: f32,
) {
  buffer.set_pixel_runs(&fill_rect_runs(rect), color, global_alpha, clip);
}

/// Strokes an axis-aligned rectangle outline
pub fn stroke_rect(
  buffer: &mut FrameBuffer,
  clip: &ClipMask,
  rect: Rect,
  color: Rgba,
  stroke_width: f32,
  global_alpha: f32,
) {
  if stroke_width <= 0.0 {
    return;
  }
  buffer.set_pixel_runs(&stroke_rect_runs(rect, stroke_width), color, global_alpha, clip);
}

/// Fills and strokes an axis-aligned rectangle in one pass
pub fn fill_and_stroke_rect(
  buffer: &mut FrameBuffer,
  clip: &ClipMask,
  rect: Rect,
  fill_color: Rgba,
  stroke_color: Rgba,
  stroke_width: f32,
  global_alpha: f32,
) {
  if stroke_width <= 0.0 {
    fill_rect(buffer, clip, rect, fill_color, global_alpha);
    return;
  }
  let (fill, stroke) = fill_and_stroke_rect_runs(rect, stroke_width);
  buffer.set_pixel_fill_and_stroke_runs(&fill, fill_color, &stroke, stroke_color, global_alpha, clip);
}

/// Runs covering a rotated rectangle given its mapped corners
pub fn quad_runs(corners: &[Point; 4], rows: u32) -> Vec<PixelRun> {
  scan_convex_quad(corners, rows)
}

/// Fills a rotated rectangle from its device-space corners
pub fn fill_quad(
  buffer: &mut FrameBuffer,
  clip: &ClipMask,
  corners: &[Point; 4],
  color: Rgba,
  global_alpha: f32,
) {
  let runs = scan_convex_quad(corners, buffer.height());
  buffer.set_pixel_runs(&runs, color, global_alpha, clip);
}

/// Clears an axis-aligned rectangle to transparent black, honoring the clip
pub fn clear_rect(buffer: &mut FrameBuffer, clip: &ClipMask, rect: Rect) {
  clear_runs(buffer, clip, &fill_rect_runs(rect));
}

/// Clears a rotated rectangle to transparent black, honoring the clip
pub fn clear_quad(buffer: &mut FrameBuffer, clip: &ClipMask, corners: &[Point; 4]) {
  let runs = scan_convex_quad(corners, buffer.height());
  clear_runs(buffer, clip, &runs);
}

fn clear_runs(buffer: &mut FrameBuffer, clip: &ClipMask, runs: &[PixelRun]) {
  for run in runs {
    for x in run.x..run.x.saturating_add(run.len as i32) {
      buffer.clear_pixel(x, run.y, clip);
    }
  }
}

/// Clamps a corner radius to what the rectangle can carry
fn clamp_radius(radius: f32, width: f32, height: f32) -> f32 {
  radius.max(0.0).min(width / 2.0).min(height / 2.0)
}

/// Horizontal extent of a circle of radius `r` at vertical offset `dy`
#[inline]
fn circle_extent(r: f32, dy: f32) -> Option<f32> {
  let rem = r * r - dy * dy;
  if rem < 0.0 { None } else { Some(rem.sqrt()) }
}

/// Per-row spans of a rounded rectangle with edges `x0..x1`, `y0..y1` and
/// uniform corner radius `r` (all in float device space)
///
/// Corner rows shrink toward the quarter-circle extent, interior rows span
/// the full width. The span end points use pixel-center coverage, so
/// integer-aligned geometry reproduces the circle rasterizer's rows.
fn rounded_rect_spans(x0: f32, y0: f32, x1: f32, y1: f32, r: f32, spans: &mut ScanlineSpans) {
  let (row0, row1) = center_span(y0, y1);
  for y in row0..row1 {
    let cy = y as f32 + 0.5;
    // Vertical distance into the top or bottom corner band, if any
    let dy = if cy < y0 + r {
      Some((y0 + r) - cy)
    } else if cy > y1 - r {
      Some(cy - (y1 - r))
    } else {
      None
    };
    let (left, right) = match dy {
      Some(dy) => match circle_extent(r, dy) {
        Some(dx) => (x0 + r - dx, x1 - r + dx),
        None => continue,
      },
      None => (x0, x1),
    };
    let (sx0, sx1) = center_span(left, right);
    spans.add(y, sx0, sx1);
  }
}

/// Runs covering a filled rounded rectangle
pub fn fill_rounded_rect_runs(rect: Rect, radius: f32) -> Vec<PixelRun> {
  let r = clamp_radius(radius, rect.width(), rect.height());
  if r <= 0.0 {
    return fill_rect_runs(rect);
  }
  let (row0, row1) = center_span(rect.min_y(), rect.max_y());
  let mut spans = ScanlineSpans::new(row0, row1);
  rounded_rect_spans(
    rect.min_x(),
    rect.min_y(),
    rect.max_x(),
    rect.max_y(),
    r,
    &mut spans,
  );
  spans.to_runs()
}

/// Runs covering the stroke band of a rounded rectangle outline
///
/// Built row by row as the outer rounded rect minus the inner one: the
/// outer boundary grows by half the stroke width (and so does its corner
/// radius), the inner shrinks by the same amount. Rows where the inner
/// shape is absent paint the full outer span.
pub fn stroke_rounded_rect_runs(rect: Rect, radius: f32, stroke_width: f32) -> Vec<PixelRun> {
  let center = rect.center();
  let size = adjust_dimensions_for_crisp_stroke(rect.width(), rect.height(), stroke_width, center);
  let center = adjust_center_for_crisp_stroke(size.width, size.height, stroke_width, center);
  let sw = stroke_width.round().max(1.0);
  let (hw, hh, hs) = (size.width / 2.0, size.height / 2.0, sw / 2.0);
  let r = clamp_radius(radius, size.width, size.height);

  let (ox0, oy0) = (center.x - hw - hs, center.y - hh - hs);
  let (ox1, oy1) = (center.x + hw + hs, center.y + hh + hs);
  let ro = r + hs;
  let (ix0, iy0) = (center.x - hw + hs, center.y - hh + hs);
  let (ix1, iy1) = (center.x + hw - hs, center.y + hh - hs);
  let ri = (r - hs).max(0.0);

  let (row0, row1) = center_span(oy0, oy1);
  let mut spans = ScanlineSpans::new(row0, row1);
  for y in row0..row1 {
    let cy = y as f32 + 0.5;

    let outer_dy = if cy < oy0 + ro {
      Some((oy0 + ro) - cy)
    } else if cy > oy1 - ro {
      Some(cy - (oy1 - ro))
    } else {
      None
    };
    let (ol, or_) = match outer_dy {
      Some(dy) => match circle_extent(ro, dy) {
        Some(dx) => (ox0 + ro - dx, ox1 - ro + dx),
        None => continue,
      },
      None => (ox0, ox1),
    };

    // Inner span on this row, if the row crosses the inner shape at all
    let inner = if cy < iy0 || cy >= iy1 || ix1 <= ix0 {
      None
    } else {
      let inner_dy = if cy < iy0 + ri {
        Some((iy0 + ri) - cy)
      } else if cy > iy1 - ri {
        Some(cy - (iy1 - ri))
      } else {
        None
      };
      match inner_dy {
        Some(dy) => circle_extent(ri, dy).map(|dx| (ix0 + ri - dx, ix1 - ri + dx)),
        None => Some((ix0, ix1)),
      }
    };

    match inner {
      Some((il, ir)) => {
        let (a0, a1) = center_span(ol, il);
        let (b0, b1) = center_span(ir, or_);
        spans.add(y, a0, a1);
        spans.add(y, b0, b1);
      }
      None => {
        let (s0, s1) = center_span(ol, or_);
        spans.add(y, s0, s1);
      }
    }
  }
  spans.to_runs()
}

/// Fills a rounded rectangle
pub fn fill_rounded_rect(
  buffer: &mut FrameBuffer,
  clip: &ClipMask,
  rect: Rect,
  radius: f32,
  color: Rgba,
  global_alpha: f32,
) {
  buffer.set_pixel_runs(&fill_rounded_rect_runs(rect, radius), color, global_alpha, clip);
}

/// Strokes a rounded rectangle outline
pub fn stroke_rounded_rect(
  buffer: &mut FrameBuffer,
  clip: &ClipMask,
  rect: Rect,
  radius: f32,
  color: Rgba,
  stroke_width: f32,
  global_alpha: f32,
) {
  if stroke_width <= 0.0 {
    return;
  }
  buffer.set_pixel_runs(
    &stroke_rounded_rect_runs(rect, radius, stroke_width),
    color,
    global_alpha,
    clip,
  );
}

/// Fills and strokes a rounded rectangle in one pass
#[allow(clippy::too_many_arguments)]
pub fn fill_and_stroke_rounded_rect(
  buffer: &mut FrameBuffer,
  clip: &ClipMask,
  rect: Rect,
  radius: f32,
  fill_color: Rgba,
  stroke_color: Rgba,
  stroke_width: f32,
  global_alpha: f32,
) {
  if stroke_width <= 0.0 {
    fill_rounded_rect(buffer, clip, rect, radius, fill_color, global_alpha);
    return;
  }
  let fill = fill_rounded_rect_runs(rect, radius);
  let stroke = stroke_rounded_rect_runs(rect, radius, stroke_width);
  buffer.set_pixel_fill_and_stroke_runs(&fill, fill_color, &stroke, stroke_color, global_alpha, clip);
}
