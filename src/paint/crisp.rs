//! Crisp-alignment helpers
//!
//! Pure functions that place rectangle geometry on the pixel grid so that
//! fill and stroke rasterize with binary coverage (every pixel either fully
//! painted or untouched), matching how a browser canvas looks when its
//! arguments land exactly on pixel boundaries.
//!
//! The central parity rule: a stroke band of width `w` centered on an edge
//! covers whole pixels exactly when the edge sits on a half-pixel for odd
//! `w` and on the grid for even `w`. An edge sits at `center +/- size/2`,
//! which gives, per axis:
//!
//! ```text
//! size is odd  <=>  (center on the integer grid) == (stroke width odd)
//! ```

use crate::geometry::{Point, Size};

/// Tolerance for the rotation-snap predicate, in radians
pub const ROTATION_SNAP_TOLERANCE: f32 = 0.001;

/// Returns true if `value` is closer to an integer than to a half-pixel
#[inline]
fn on_grid(value: f32) -> bool {
  (value - value.round()).abs() < 0.25
}

/// Snaps `value` to the nearest half-pixel (x.5) position
#[inline]
fn to_half_pixel(value: f32) -> f32 {
  (value - 0.5).round() + 0.5
}

#[inline]
fn is_odd(value: i32) -> bool {
  value.rem_euclid(2) == 1
}

/// Forces one dimension to the parity the crispness rule requires
fn adjust_dimension(size: f32, center: f32, stroke_odd: bool) -> f32 {
  let rounded = size.round().max(0.0) as i32;
  let want_odd = on_grid(center) == stroke_odd;
  if is_odd(rounded) == want_odd {
    rounded as f32
  } else {
    (rounded + 1) as f32
  }
}

/// Rounds `width`/`height` to integers with the parity that makes a
/// fill+stroke at `center` rasterize crisply
///
/// # Examples
///
/// ```
/// use crispcanvas::paint::crisp::adjust_dimensions_for_crisp_stroke;
/// use crispcanvas::{Point, Size};
///
/// // Grid-point center and a 1px stroke want odd sizes
/// let size = adjust_dimensions_for_crisp_stroke(20.0, 20.0, 1.0, Point::new(20.0, 20.0));
/// assert_eq!(size, Size::new(21.0, 21.0));
///
/// // A half-pixel center with the same stroke wants even sizes
/// let size = adjust_dimensions_for_crisp_stroke(20.0, 20.0, 1.0, Point::new(20.5, 20.5));
/// assert_eq!(size, Size::new(20.0, 20.0));
/// ```
pub fn adjust_dimensions_for_crisp_stroke(
  width: f32,
  height: f32,
  stroke_width: f32,
  center: Point,
) -> Size {
  let stroke_odd = is_odd(stroke_width.round() as i32);
  Size::new(
    adjust_dimension(width, center.x, stroke_odd),
    adjust_dimension(height, center.y, stroke_odd),
  )
}

/// Derives a crisp center from the width/height/stroke parity
///
/// The dual of [`adjust_dimensions_for_crisp_stroke`]: dimensions are taken
/// as given (rounded) and the center snaps to the grid or the half-pixel,
/// whichever satisfies the parity rule.
pub fn adjust_center_for_crisp_stroke(
  width: f32,
  height: f32,
  stroke_width: f32,
  center: Point,
) -> Point {
  let stroke_odd = is_odd(stroke_width.round() as i32);
  let snap = |size: f32, c: f32| -> f32 {
    let size_odd = is_odd(size.round() as i32);
    if size_odd == stroke_odd {
      c.round()
    } else {
      to_half_pixel(c)
    }
  };
  Point::new(snap(width, center.x), snap(height, center.y))
}

/// Returns true if `angle` (radians) is within tolerance of a multiple of
/// 90 degrees
///
/// Rect and rounded-rect drawing snaps to the axis-aligned fast path when
/// this holds.
pub fn is_near_multiple_of_90_degrees(angle: f32) -> bool {
  let quarter = std::f32::consts::FRAC_PI_2;
  let rem = angle.rem_euclid(quarter);
  rem < ROTATION_SNAP_TOLERANCE || quarter - rem < ROTATION_SNAP_TOLERANCE
}
