//! Shape model and transform-aware paint dispatch
//!
//! A [`Shape`] is geometry in user space. Painting maps it through the
//! current transform and picks a rasterizer:
//!
//! - Transforms whose rotation snaps to a quarter turn keep shapes
//!   axis-aligned: corners are mapped individually and the axis-aligned
//!   fast paths (and their crisp adjustments) apply.
//! - Any other rotation sends rectangles down the convex-quad scan.
//!   Circles stay circles, with the radius scaled by the transform's
//!   uniform scale factor, and arcs additionally rotate their sweep.
//!
//! The per-row run subtraction used for rotated outline strokes lives
//! here too, shared by the stroke and clear paths.

use tracing::warn;

use crate::color::Rgba;
use crate::geometry::{Point, Rect};
use crate::paint::buffer::{FrameBuffer, PixelRun};
use crate::paint::circle;
use crate::paint::clip::ClipMask;
use crate::paint::crisp::is_near_multiple_of_90_degrees;
use crate::paint::line;
use crate::paint::rect;
use crate::transform::AffineTransform;

/// Geometry in user space, before the canvas transform
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
  Line {
    from: Point,
    to: Point,
  },
  Rect {
    rect: Rect,
  },
  RoundedRect {
    rect: Rect,
    radius: f32,
  },
  Circle {
    center: Point,
    radius: f32,
  },
  Arc {
    center: Point,
    radius: f32,
    start_deg: f32,
    end_deg: f32,
  },
}

/// How a shape is painted: fill, stroke, or both
#[derive(Debug, Clone, Copy)]
pub struct PaintStyle {
  pub fill: Option<Rgba>,
  pub stroke: Option<Rgba>,
  pub stroke_width: f32,
  pub global_alpha: f32,
}

impl PaintStyle {
  fn has_fill(&self) -> bool {
    matches!(self.fill, Some(c) if !c.is_transparent())
  }

  fn has_stroke(&self) -> bool {
    self.stroke_width > 0.0 && matches!(self.stroke, Some(c) if !c.is_transparent())
  }
}

/// True when the transform keeps axis-aligned geometry axis-aligned
fn preserves_axes(transform: &AffineTransform) -> bool {
  is_near_multiple_of_90_degrees(transform.rotation())
}

/// Maps an axis-aligned rect through an axis-preserving transform
fn map_rect(transform: &AffineTransform, r: Rect) -> Rect {
  let a = transform.map_point(Point::new(r.min_x(), r.min_y()));
  let b = transform.map_point(Point::new(r.max_x(), r.max_y()));
  Rect::from_xywh(
    a.x.min(b.x),
    a.y.min(b.y),
    (b.x - a.x).abs(),
    (b.y - a.y).abs(),
  )
}

/// Maps a rect's corners through an arbitrary transform, in winding order
fn map_corners(transform: &AffineTransform, r: Rect) -> [Point; 4] {
  [
    transform.map_point(Point::new(r.min_x(), r.min_y())),
    transform.map_point(Point::new(r.max_x(), r.min_y())),
    transform.map_point(Point::new(r.max_x(), r.max_y())),
    transform.map_point(Point::new(r.min_x(), r.max_y())),
  ]
}

/// Per-row subtraction of `inner` coverage from `outer` coverage
///
/// Both inputs must hold at most one run per row (the convex-quad scan
/// guarantees this). The result is the outline band of a rotated rect.
fn subtract_runs(outer: &[PixelRun], inner: &[PixelRun]) -> Vec<PixelRun> {
  let mut out = Vec::with_capacity(outer.len() + inner.len());
  for o in outer {
    let (ox0, ox1) = (o.x, o.x + o.len as i32);
    match inner.iter().find(|i| i.y == o.y) {
      None => out.push(*o),
      Some(i) => {
        let (ix0, ix1) = (i.x, i.x + i.len as i32);
        if ix0 > ox0 {
          out.push(PixelRun::new(ox0, o.y, (ix0.min(ox1) - ox0) as u32));
        }
        if ix1 < ox1 {
          out.push(PixelRun::new(ix1.max(ox0), o.y, (ox1 - ix1.max(ox0)) as u32));
        }
      }
    }
  }
  out
}

/// Corners of the stroke band boundary of a rotated rect
///
/// `grow` is positive for the outer boundary and negative for the inner
/// one: each edge moves by that amount along its outward normal, which for
/// a rectangle is the same as inflating it in user space before mapping.
fn inflated_corners(transform: &AffineTransform, r: Rect, grow: f32) -> [Point; 4] {
  let inflated = Rect::from_xywh(
    r.min_x() - grow,
    r.min_y() - grow,
    r.width() + 2.0 * grow,
    r.height() + 2.0 * grow,
  );
  map_corners(transform, inflated)
}

/// Paints one shape through the current transform
pub fn paint_shape(
  buffer: &mut FrameBuffer,
  clip: &ClipMask,
  transform: &AffineTransform,
  shape: &Shape,
  style: &PaintStyle,
) {
  let ga = style.global_alpha;
  if ga <= 0.0 || (!style.has_fill() && !style.has_stroke()) {
    return;
  }
  let scale = transform.scale_factor();

  match *shape {
    Shape::Line { from, to } => {
      if let Some(color) = style.stroke
        && style.has_stroke()
      {
        line::stroke_line(
          buffer,
          clip,
          transform.map_point(from),
          transform.map_point(to),
          color,
          style.stroke_width * scale,
          ga,
        );
      }
    }

    Shape::Rect { rect: r } => {
      if preserves_axes(transform) {
        let device = map_rect(transform, r);
        let sw = style.stroke_width * scale;
        match (style.has_fill(), style.has_stroke()) {
          (true, true) => rect::fill_and_stroke_rect(
            buffer,
            clip,
            device,
            style.fill.unwrap_or(Rgba::TRANSPARENT),
            style.stroke.unwrap_or(Rgba::TRANSPARENT),
            sw,
            ga,
          ),
          (true, false) => {
            rect::fill_rect(buffer, clip, device, style.fill.unwrap_or(Rgba::TRANSPARENT), ga)
          }
          (false, true) => rect::stroke_rect(
            buffer,
            clip,
            device,
            style.stroke.unwrap_or(Rgba::TRANSPARENT),
            sw,
            ga,
          ),
          (false, false) => {}
        }
      } else {
        paint_rotated_rect(buffer, clip, transform, r, style);
      }
    }

    Shape::RoundedRect { rect: r, radius } => {
      if !preserves_axes(transform) {
        // Arbitrary rotation drops the corner rounding
        warn!(radius, "rotated rounded rect painted with sharp corners");
        paint_rotated_rect(buffer, clip, transform, r, style);
        return;
      }
      let device = map_rect(transform, r);
      let dr = radius * scale;
      let sw = style.stroke_width * scale;
      match (style.has_fill(), style.has_stroke()) {
        (true, true) => rect::fill_and_stroke_rounded_rect(
          buffer,
          clip,
          device,
          dr,
          style.fill.unwrap_or(Rgba::TRANSPARENT),
          style.stroke.unwrap_or(Rgba::TRANSPARENT),
          sw,
          ga,
        ),
        (true, false) => rect::fill_rounded_rect(
          buffer,
          clip,
          device,
          dr,
          style.fill.unwrap_or(Rgba::TRANSPARENT),
          ga,
        ),
        (false, true) => rect::stroke_rounded_rect(
          buffer,
          clip,
          device,
          dr,
          style.stroke.unwrap_or(Rgba::TRANSPARENT),
          sw,
          ga,
        ),
        (false, false) => {}
      }
    }

    Shape::Circle { center, radius } => {
      let c = transform.map_point(center);
      let r = radius * scale;
      let sw = style.stroke_width * scale;
      match (style.has_fill(), style.has_stroke()) {
        (true, true) => circle::fill_and_stroke_circle(
          buffer,
          clip,
          c,
          r,
          style.fill.unwrap_or(Rgba::TRANSPARENT),
          style.stroke.unwrap_or(Rgba::TRANSPARENT),
          sw,
          ga,
        ),
        (true, false) => {
          circle::fill_circle(buffer, clip, c, r, style.fill.unwrap_or(Rgba::TRANSPARENT), ga)
        }
        (false, true) => circle::stroke_circle(
          buffer,
          clip,
          c,
          r,
          style.stroke.unwrap_or(Rgba::TRANSPARENT),
          sw,
          ga,
        ),
        (false, false) => {}
      }
    }

    Shape::Arc {
      center,
      radius,
      start_deg,
      end_deg,
    } => {
      let c = transform.map_point(center);
      let r = radius * scale;
      let rot = transform.rotation().to_degrees();
      let (s, e) = (start_deg + rot, end_deg + rot);
      if let Some(color) = style.fill
        && style.has_fill()
      {
        circle::fill_arc(buffer, clip, c, r, s, e, color, ga);
      }
      if let Some(color) = style.stroke
        && style.has_stroke()
      {
        circle::stroke_arc(buffer, clip, c, r, s, e, color, style.stroke_width * scale, ga);
      }
    }
  }
}

/// Inner stroke-boundary runs of a rotated rect, empty when the stroke
/// swallows the rect entirely
///
/// Deflating by more than half the rect's extent would invert the quad, so
/// the inner region degenerates to nothing and the stroke band covers the
/// whole outer quad.
fn inner_quad_runs(
  transform: &AffineTransform,
  r: Rect,
  stroke_width: f32,
  rows: u32,
) -> Vec<PixelRun> {
  if r.width() <= stroke_width || r.height() <= stroke_width {
    return Vec::new();
  }
  line::scan_convex_quad(&inflated_corners(transform, r, -stroke_width / 2.0), rows)
}

fn paint_rotated_rect(
  buffer: &mut FrameBuffer,
  clip: &ClipMask,
  transform: &AffineTransform,
  r: Rect,
  style: &PaintStyle,
) {
  let ga = style.global_alpha;
  let sw = style.stroke_width;

  if style.has_fill() && style.has_stroke() {
    // Partition: fill up to the stroke's inner boundary, band on top
    let inner = inner_quad_runs(transform, r, sw, buffer.height());
    let outer = line::scan_convex_quad(&inflated_corners(transform, r, sw / 2.0), buffer.height());
    let band = subtract_runs(&outer, &inner);
    buffer.set_pixel_fill_and_stroke_runs(
      &inner,
      style.fill.unwrap_or(Rgba::TRANSPARENT),
      &band,
      style.stroke.unwrap_or(Rgba::TRANSPARENT),
      ga,
      clip,
    );
  } else if style.has_fill() {
    rect::fill_quad(
      buffer,
      clip,
      &map_corners(transform, r),
      style.fill.unwrap_or(Rgba::TRANSPARENT),
      ga,
    );
  } else if style.has_stroke() {
    let outer = line::scan_convex_quad(&inflated_corners(transform, r, sw / 2.0), buffer.height());
    let inner = inner_quad_runs(transform, r, sw, buffer.height());
    let band = subtract_runs(&outer, &inner);
    buffer.set_pixel_runs(&band, style.stroke.unwrap_or(Rgba::TRANSPARENT), ga, clip);
  }
}

/// Device-space fill coverage of a shape, used by clip region building
/// and `clear_rect`
pub fn shape_coverage(transform: &AffineTransform, shape: &Shape, rows: u32) -> Vec<PixelRun> {
  match *shape {
    Shape::Rect { rect: r } => {
      if preserves_axes(transform) {
        rect::fill_rect_runs(map_rect(transform, r))
      } else {
        rect::quad_runs(&map_corners(transform, r), rows)
      }
    }
    Shape::RoundedRect { rect: r, radius } => {
      if preserves_axes(transform) {
        rect::fill_rounded_rect_runs(map_rect(transform, r), radius * transform.scale_factor())
      } else {
        rect::quad_runs(&map_corners(transform, r), rows)
      }
    }
    Shape::Circle { center, radius } => {
      circle::fill_circle_runs(transform.map_point(center), radius * transform.scale_factor())
    }
    Shape::Line { .. } | Shape::Arc { .. } => Vec::new(),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn setup(w: u32, h: u32) -> (FrameBuffer, ClipMask) {
    (FrameBuffer::new(w, h), ClipMask::filled(w, h))
  }

  fn fill_style(color: Rgba) -> PaintStyle {
    PaintStyle {
      fill: Some(color),
      stroke: None,
      stroke_width: 1.0,
      global_alpha: 1.0,
    }
  }

  fn painted_count(buffer: &FrameBuffer) -> usize {
    buffer.pixels().iter().filter(|px| px[3] != 0).count()
  }

  #[test]
  fn test_translated_rect_stays_axis_aligned() {
    let (mut buf, clip) = setup(40, 40);
    let t = AffineTransform::from_translate(5.0, 7.0);
    paint_shape(
      &mut buf,
      &clip,
      &t,
      &Shape::Rect {
        rect: Rect::from_xywh(0.0, 0.0, 10.0, 10.0),
      },
      &fill_style(Rgba::RED),
    );
    assert_eq!(buf.pixel(5, 7), Rgba::RED);
    assert_eq!(buf.pixel(14, 16), Rgba::RED);
    assert_eq!(buf.pixel(15, 17), Rgba::TRANSPARENT);
    assert_eq!(painted_count(&buf), 100);
  }

  #[test]
  fn test_quarter_turn_rect_stays_axis_aligned() {
    let (mut buf, clip) = setup(40, 40);
    // Rotate 90 degrees around (20, 20)
    let t = AffineTransform::from_translate(20.0, 20.0)
      .pre_rotate(std::f32::consts::FRAC_PI_2)
      .pre_translate(-20.0, -20.0);
    paint_shape(
      &mut buf,
      &clip,
      &t,
      &Shape::Rect {
        rect: Rect::from_xywh(10.0, 15.0, 10.0, 4.0),
      },
      &fill_style(Rgba::BLUE),
    );
    // A 10x4 rect becomes 4x10; crisp fill count is preserved
    assert_eq!(painted_count(&buf), 40);
  }

  #[test]
  fn test_rotated_stroke_wider_than_rect_has_no_hole() {
    let (mut buf, clip) = setup(60, 60);
    let t = AffineTransform::from_translate(30.0, 30.0)
      .pre_rotate(std::f32::consts::FRAC_PI_4)
      .pre_translate(-30.0, -30.0);
    let style = PaintStyle {
      fill: None,
      stroke: Some(Rgba::BLACK),
      stroke_width: 30.0,
      global_alpha: 1.0,
    };
    paint_shape(
      &mut buf,
      &clip,
      &t,
      &Shape::Rect {
        rect: Rect::from_xywh(25.0, 25.0, 10.0, 10.0),
      },
      &style,
    );
    // The stroke swallows the whole rect; its center is solid band
    assert_eq!(buf.pixel(30, 30), Rgba::BLACK);
  }

  #[test]
  fn test_rotated_rect_takes_quad_path() {
    let (mut buf, clip) = setup(60, 60);
    let t = AffineTransform::from_translate(30.0, 30.0)
      .pre_rotate(std::f32::consts::FRAC_PI_4)
      .pre_translate(-30.0, -30.0);
    paint_shape(
      &mut buf,
      &clip,
      &t,
      &Shape::Rect {
        rect: Rect::from_xywh(20.0, 20.0, 20.0, 20.0),
      },
      &fill_style(Rgba::BLACK),
    );
    // Area is preserved under rotation, up to edge rounding
    let count = painted_count(&buf);
    assert!((370..=430).contains(&count), "count = {count}");
    // Center stays covered
    assert_eq!(buf.pixel(30, 30), Rgba::BLACK);
  }

  #[test]
  fn test_rotated_stroke_band_is_hollow() {
    let (mut buf, clip) = setup(60, 60);
    let t = AffineTransform::from_translate(30.0, 30.0)
      .pre_rotate(0.5)
      .pre_translate(-30.0, -30.0);
    let style = PaintStyle {
      fill: None,
      stroke: Some(Rgba::BLACK),
      stroke_width: 2.0,
      global_alpha: 1.0,
    };
    paint_shape(
      &mut buf,
      &clip,
      &t,
      &Shape::Rect {
        rect: Rect::from_xywh(15.0, 15.0, 30.0, 30.0),
      },
      &style,
    );
    assert_eq!(buf.pixel(30, 30), Rgba::TRANSPARENT);
    assert!(painted_count(&buf) > 0);
  }

  #[test]
  fn test_scaled_circle_radius() {
    let (mut buf, clip) = setup(80, 80);
    let t = AffineTransform::from_scale(2.0, 2.0);
    paint_shape(
      &mut buf,
      &clip,
      &t,
      &Shape::Circle {
        center: Point::new(20.0, 20.0),
        radius: 8.0,
      },
      &fill_style(Rgba::GREEN),
    );
    // Center maps to (40, 40), radius to 16
    assert_eq!(buf.pixel(40, 40), Rgba::GREEN);
    assert_eq!(buf.pixel(55, 40), Rgba::GREEN);
    assert_eq!(buf.pixel(57, 40), Rgba::TRANSPARENT);
  }

  #[test]
  fn test_arc_sweep_rotates_with_transform() {
    let (mut buf, clip) = setup(50, 50);
    // Quarter turn moves the [0, 90) sweep into the [90, 180) quadrant
    let t = AffineTransform::from_translate(25.0, 25.0)
      .pre_rotate(std::f32::consts::FRAC_PI_2)
      .pre_translate(-25.0, -25.0);
    let style = PaintStyle {
      fill: None,
      stroke: Some(Rgba::BLACK),
      stroke_width: 1.0,
      global_alpha: 1.0,
    };
    paint_shape(
      &mut buf,
      &clip,
      &t,
      &Shape::Arc {
        center: Point::new(25.0, 25.0),
        radius: 10.0,
        start_deg: 0.0,
        end_deg: 90.0,
      },
      &style,
    );
    for (y, row) in (0..50).map(|y| (y, (0..50u32).filter(|&x| buf.pixel(x, y).a != 0).count())) {
      if row > 0 {
        assert!(y >= 25, "painted row {y} above center");
      }
    }
    assert_eq!(buf.pixel(15, 25), Rgba::BLACK);
  }

  #[test]
  fn test_subtract_runs_leaves_band() {
    let outer = vec![PixelRun::new(0, 0, 10)];
    let inner = vec![PixelRun::new(3, 0, 4)];
    assert_eq!(
      subtract_runs(&outer, &inner),
      vec![PixelRun::new(0, 0, 3), PixelRun::new(7, 0, 3)]
    );
  }

  #[test]
  fn test_shape_coverage_rect() {
    let runs = shape_coverage(
      &AffineTransform::identity(),
      &Shape::Rect {
        rect: Rect::from_xywh(2.0, 3.0, 4.0, 2.0),
      },
      10,
    );
    assert_eq!(runs, vec![PixelRun::new(2, 3, 4), PixelRun::new(2, 4, 4)]);
  }

  #[test]
  fn test_zero_global_alpha_paints_nothing() {
    let (mut buf, clip) = setup(10, 10);
    let mut style = fill_style(Rgba::RED);
    style.global_alpha = 0.0;
    paint_shape(
      &mut buf,
      &clip,
      &AffineTransform::identity(),
      &Shape::Rect {
        rect: Rect::from_xywh(0.0, 0.0, 5.0, 5.0),
      },
      &style,
    );
    assert_eq!(painted_count(&buf), 0);
  }
}
