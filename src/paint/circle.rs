//! Circle and arc rasterizers
//!
//! Circles dispatch on how they will be painted:
//!
//! - 1px strokes on integer geometry walk the classic midpoint circle,
//!   mirroring each computed point into all eight octants. Opaque colors
//!   write points directly (octant overlap at the axes is harmless);
//!   semi-transparent colors deduplicate through a hash set first, since
//!   blending the same pixel twice doubles its coverage.
//! - Fills on integer geometry reuse the midpoint walk to find each row's
//!   half-extent and emit one run per row.
//! - Everything else (thick strokes, fractional geometry, fill+stroke)
//!   goes through an analytic row scan: per scanline, the outer and inner
//!   radii give at most two stroke spans and one fill span, all computed
//!   with pixel-center coverage.
//!
//! Arcs reuse the circle paths pixel by pixel, keeping only pixels whose
//! polar angle falls in the half-open sweep. Angles are degrees, measured
//! clockwise from the positive x axis in y-down device space.

use rustc_hash::FxHashSet;

use crate::color::Rgba;
use crate::geometry::Point;
use crate::paint::buffer::{FrameBuffer, PixelRun};
use crate::paint::clip::ClipMask;
use crate::paint::line::center_span;
use crate::paint::scanline::ScanlineSpans;

/// True when `value` is close enough to an integer to use lattice walks
#[inline]
fn near_integer(value: f32) -> bool {
  (value - value.round()).abs() < 0.01
}

/// Horizontal extent of a circle of radius `r` at vertical offset `dy`
#[inline]
fn extent(r: f32, dy: f32) -> Option<f32> {
  let rem = r * r - dy * dy;
  if rem < 0.0 { None } else { Some(rem.sqrt()) }
}

/// Visits every lattice point of the midpoint circle, one octant mirrored
/// eight ways, with duplicates suppressed at the axes and diagonals
fn midpoint_circle_points(cx: i32, cy: i32, r: i32, mut visit: impl FnMut(i32, i32)) {
  if r <= 0 {
    visit(cx, cy);
    return;
  }
  let mut x = r;
  let mut y = 0;
  let mut err = 1 - r;
  while y <= x {
    if y == 0 {
      visit(cx + x, cy);
      visit(cx - x, cy);
      visit(cx, cy + x);
      visit(cx, cy - x);
    } else if y == x {
      visit(cx + x, cy + y);
      visit(cx - x, cy + y);
      visit(cx + x, cy - y);
      visit(cx - x, cy - y);
    } else {
      visit(cx + x, cy + y);
      visit(cx - x, cy + y);
      visit(cx + x, cy - y);
      visit(cx - x, cy - y);
      visit(cx + y, cy + x);
      visit(cx - y, cy + x);
      visit(cx + y, cy - x);
      visit(cx - y, cy - x);
    }
    y += 1;
    if err < 0 {
      err += 2 * y + 1;
    } else {
      x -= 1;
      err += 2 * (y - x) + 1;
    }
  }
}

/// Per-row half-extents of the midpoint circle, widest extent per row
fn midpoint_row_extents(r: i32) -> Vec<i32> {
  // Index dy in 0..=r, value half-width
  let mut half = vec![0i32; (r + 1).max(1) as usize];
  let mut x = r;
  let mut y = 0;
  let mut err = 1 - r;
  while y <= x {
    half[y as usize] = half[y as usize].max(x);
    half[x as usize] = half[x as usize].max(y);
    y += 1;
    if err < 0 {
      err += 2 * y + 1;
    } else {
      x -= 1;
      err += 2 * (y - x) + 1;
    }
  }
  half
}

/// Runs covering a filled integer-lattice circle
fn lattice_fill_runs(cx: i32, cy: i32, r: i32) -> Vec<PixelRun> {
  let half = midpoint_row_extents(r);
  let mut spans = ScanlineSpans::new(cy - r, cy + r + 1);
  for (dy, hw) in half.iter().enumerate() {
    let dy = dy as i32;
    spans.add(cy + dy, cx - hw, cx + hw + 1);
    spans.add(cy - dy, cx - hw, cx + hw + 1);
  }
  spans.to_runs()
}

/// Stroke ring spans for one scanline, as float x intervals
///
/// Returns up to two intervals: the row's slice of the annulus between
/// the inner and outer radius. `None` means the row misses the ring.
fn ring_row(center: Point, ro: f32, ri: f32, cy: f32) -> Option<((f32, f32), Option<(f32, f32)>)> {
  let dy = cy - center.y;
  let dxo = extent(ro, dy)?;
  match extent(ri, dy) {
    Some(dxi) if dxi > 0.0 => Some((
      (center.x - dxo, center.x - dxi),
      Some((center.x + dxi, center.x + dxo)),
    )),
    _ => Some(((center.x - dxo, center.x + dxo), None)),
  }
}

/// Runs covering the stroke ring of a circle outline
pub fn stroke_circle_runs(center: Point, radius: f32, stroke_width: f32) -> Vec<PixelRun> {
  let sw = stroke_width.round().max(1.0);
  let ro = radius + sw / 2.0;
  let ri = (radius - sw / 2.0).max(0.0);

  let (row0, row1) = center_span(center.y - ro, center.y + ro);
  let mut spans = ScanlineSpans::new(row0, row1);
  for y in row0..row1 {
    let cy = y as f32 + 0.5;
    if let Some((left, right)) = ring_row(center, ro, ri, cy) {
      let (a0, a1) = center_span(left.0, left.1);
      spans.add(y, a0, a1);
      if let Some((r0, r1)) = right {
        let (b0, b1) = center_span(r0, r1);
        spans.add(y, b0, b1);
      }
    }
  }
  spans.to_runs()
}

/// Analytic per-row fill of a disc, pixel-center coverage
fn analytic_fill_runs(center: Point, radius: f32) -> Vec<PixelRun> {
  let (row0, row1) = center_span(center.y - radius, center.y + radius);
  let mut spans = ScanlineSpans::new(row0, row1);
  for y in row0..row1 {
    let cy = y as f32 + 0.5;
    if let Some(dx) = extent(radius, cy - center.y) {
      let (x0, x1) = center_span(center.x - dx, center.x + dx);
      spans.add(y, x0, x1);
    }
  }
  spans.to_runs()
}

/// Runs covering a filled disc of the given float center and radius
pub fn fill_circle_runs(center: Point, radius: f32) -> Vec<PixelRun> {
  if near_integer(center.x) && near_integer(center.y) && near_integer(radius) {
    return lattice_fill_runs(
      center.x.round() as i32,
      center.y.round() as i32,
      radius.round().max(0.0) as i32,
    );
  }
  analytic_fill_runs(center, radius)
}

/// Fills a circle
pub fn fill_circle(
  buffer: &mut FrameBuffer,
  clip: &ClipMask,
  center: Point,
  radius: f32,
  color: Rgba,
  global_alpha: f32,
) {
  if radius <= 0.0 {
    return;
  }
  buffer.set_pixel_runs(&fill_circle_runs(center, radius), color, global_alpha, clip);
}

/// Strokes a circle outline
pub fn stroke_circle(
  buffer: &mut FrameBuffer,
  clip: &ClipMask,
  center: Point,
  radius: f32,
  color: Rgba,
  stroke_width: f32,
  global_alpha: f32,
) {
  if radius <= 0.0 || stroke_width <= 0.0 {
    return;
  }

  let one_px = stroke_width.round() as i32 == 1;
  let lattice = near_integer(center.x) && near_integer(center.y) && near_integer(radius);
  if one_px && lattice {
    let cx = center.x.round() as i32;
    let cy = center.y.round() as i32;
    let r = radius.round() as i32;
    let opaque = color.a == 255 && global_alpha >= 1.0;
    if opaque {
      midpoint_circle_points(cx, cy, r, |x, y| {
        buffer.set_pixel(x, y, color, global_alpha, clip);
      });
    } else {
      // Deduplicate so octant seams never blend a pixel twice
      let mut seen = FxHashSet::default();
      midpoint_circle_points(cx, cy, r, |x, y| {
        seen.insert((x, y));
      });
      for (x, y) in seen {
        buffer.set_pixel(x, y, color, global_alpha, clip);
      }
    }
    return;
  }

  buffer.set_pixel_runs(
    &stroke_circle_runs(center, radius, stroke_width),
    color,
    global_alpha,
    clip,
  );
}

/// Fills and strokes a circle in one pass
///
/// The fill disc stops at the stroke's inner edge and the ring continues
/// to the outer edge, so the union has no overlap: semi-transparent
/// combinations blend each pixel exactly once.
#[allow(clippy::too_many_arguments)]
pub fn fill_and_stroke_circle(
  buffer: &mut FrameBuffer,
  clip: &ClipMask,
  center: Point,
  radius: f32,
  fill_color: Rgba,
  stroke_color: Rgba,
  stroke_width: f32,
  global_alpha: f32,
) {
  if radius <= 0.0 {
    return;
  }
  if stroke_width <= 0.0 {
    fill_circle(buffer, clip, center, radius, fill_color, global_alpha);
    return;
  }

  let sw = stroke_width.round().max(1.0);
  let ri = (radius - sw / 2.0).max(0.0);
  // Analytic fill always, so the disc edge tiles exactly against the
  // ring's inner edge
  let fill = if ri > 0.0 {
    analytic_fill_runs(center, ri)
  } else {
    Vec::new()
  };
  let stroke = stroke_circle_runs(center, radius, stroke_width);
  buffer.set_pixel_fill_and_stroke_runs(&fill, fill_color, &stroke, stroke_color, global_alpha, clip);
}

/// Normalized sweep of an arc, in degrees
///
/// `Full` when the raw sweep covers the whole circle; otherwise the
/// half-open clockwise range `[start, end)` with both ends in `[0, 360)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ArcSweep {
  Full,
  Partial { start: f32, end: f32 },
}

impl ArcSweep {
  /// Builds a sweep from raw start/end angles in degrees
  pub fn new(start_deg: f32, end_deg: f32) -> Self {
    if (end_deg - start_deg).abs() >= 360.0 {
      return Self::Full;
    }
    Self::Partial {
      start: start_deg.rem_euclid(360.0),
      end: end_deg.rem_euclid(360.0),
    }
  }

  /// Returns true if the sweep covers no angle at all
  pub fn is_empty(self) -> bool {
    matches!(self, Self::Partial { start, end } if start == end)
  }

  /// Tests whether the pixel at (x, y) falls inside the sweep, measured
  /// from `center` in y-down clockwise degrees
  pub fn contains(self, center: Point, x: i32, y: i32) -> bool {
    let (start, end) = match self {
      Self::Full => return true,
      Self::Partial { start, end } => (start, end),
    };
    let dx = x as f32 + 0.5 - center.x;
    let dy = y as f32 + 0.5 - center.y;
    let angle = dy.atan2(dx).to_degrees().rem_euclid(360.0);
    if start <= end {
      start <= angle && angle < end
    } else {
      angle >= start || angle < end
    }
  }
}

/// Per-pixel paint of a run list filtered by an arc sweep
fn paint_runs_in_sweep(
  buffer: &mut FrameBuffer,
  clip: &ClipMask,
  runs: &[PixelRun],
  center: Point,
  sweep: ArcSweep,
  color: Rgba,
  global_alpha: f32,
) {
  for run in runs {
    for x in run.x..run.x.saturating_add(run.len as i32) {
      if sweep.contains(center, x, run.y) {
        buffer.set_pixel(x, run.y, color, global_alpha, clip);
      }
    }
  }
}

/// Strokes a circular arc between two angles in degrees
pub fn stroke_arc(
  buffer: &mut FrameBuffer,
  clip: &ClipMask,
  center: Point,
  radius: f32,
  start_deg: f32,
  end_deg: f32,
  color: Rgba,
  stroke_width: f32,
  global_alpha: f32,
) {
  if radius <= 0.0 || stroke_width <= 0.0 {
    return;
  }
  let sweep = ArcSweep::new(start_deg, end_deg);
  if sweep.is_empty() {
    return;
  }
  if sweep == ArcSweep::Full {
    stroke_circle(buffer, clip, center, radius, color, stroke_width, global_alpha);
    return;
  }

  let one_px = stroke_width.round() as i32 == 1;
  let lattice = near_integer(center.x) && near_integer(center.y) && near_integer(radius);
  if one_px && lattice {
    let cx = center.x.round() as i32;
    let cy = center.y.round() as i32;
    let r = radius.round() as i32;
    // Always dedup: the sweep test must see each pixel once
    let mut seen = FxHashSet::default();
    midpoint_circle_points(cx, cy, r, |x, y| {
      seen.insert((x, y));
    });
    for (x, y) in seen {
      if sweep.contains(center, x, y) {
        buffer.set_pixel(x, y, color, global_alpha, clip);
      }
    }
    return;
  }

  let runs = stroke_circle_runs(center, radius, stroke_width);
  paint_runs_in_sweep(buffer, clip, &runs, center, sweep, color, global_alpha);
}

/// Fills a pie slice between two angles in degrees
pub fn fill_arc(
  buffer: &mut FrameBuffer,
  clip: &ClipMask,
  center: Point,
  radius: f32,
  start_deg: f32,
  end_deg: f32,
  color: Rgba,
  global_alpha: f32,
) {
  if radius <= 0.0 {
    return;
  }
  let sweep = ArcSweep::new(start_deg, end_deg);
  if sweep.is_empty() {
    return;
  }
  if sweep == ArcSweep::Full {
    fill_circle(buffer, clip, center, radius, color, global_alpha);
    return;
  }
  let runs = fill_circle_runs(center, radius);
  paint_runs_in_sweep(buffer, clip, &runs, center, sweep, color, global_alpha);
}
