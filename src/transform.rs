//! 2D affine transform
//!
//! Maps user coordinates to device coordinates before rasterization. The
//! transform is the affine part of a 3x3 homogeneous matrix (no perspective
//! terms), stored as six coefficients:
//!
//! ```text
//! | sx  kx  tx |   | x |
//! | ky  sy  ty | * | y |
//! |  0   0   1 |   | 1 |
//! ```
//!
//! Composition is by right-multiplication: the `pre_*` methods append an
//! operation that applies to points *before* the existing transform, which
//! is exactly the Canvas-2D `translate`/`scale`/`rotate` call semantics.

use crate::geometry::Point;

/// An affine 2D transform
///
/// # Examples
///
/// ```
/// use crispcanvas::{AffineTransform, Point};
///
/// let t = AffineTransform::identity().pre_translate(10.0, 0.0);
/// assert_eq!(t.map_point(Point::new(1.0, 2.0)), Point::new(11.0, 2.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AffineTransform {
  /// Horizontal scale
  pub sx: f32,
  /// Horizontal skew (x contribution from y)
  pub kx: f32,
  /// Vertical skew (y contribution from x)
  pub ky: f32,
  /// Vertical scale
  pub sy: f32,
  /// Horizontal translation
  pub tx: f32,
  /// Vertical translation
  pub ty: f32,
}

impl Default for AffineTransform {
  fn default() -> Self {
    Self::identity()
  }
}

impl AffineTransform {
  /// The identity transform
  pub const fn identity() -> Self {
    Self {
      sx: 1.0,
      kx: 0.0,
      ky: 0.0,
      sy: 1.0,
      tx: 0.0,
      ty: 0.0,
    }
  }

  /// Creates a pure translation
  pub const fn from_translate(tx: f32, ty: f32) -> Self {
    Self {
      sx: 1.0,
      kx: 0.0,
      ky: 0.0,
      sy: 1.0,
      tx,
      ty,
    }
  }

  /// Creates a pure scale about the origin
  pub const fn from_scale(sx: f32, sy: f32) -> Self {
    Self {
      sx,
      kx: 0.0,
      ky: 0.0,
      sy,
      tx: 0.0,
      ty: 0.0,
    }
  }

  /// Creates a rotation about the origin
  ///
  /// The angle is in radians. With the y-down canvas coordinate system a
  /// positive angle rotates clockwise on screen, matching Canvas-2D
  /// `rotate()`.
  pub fn from_rotate(angle: f32) -> Self {
    let (sin, cos) = angle.sin_cos();
    Self {
      sx: cos,
      kx: -sin,
      ky: sin,
      sy: cos,
      tx: 0.0,
      ty: 0.0,
    }
  }

  /// Returns true if this is the identity transform
  pub fn is_identity(&self) -> bool {
    *self == Self::identity()
  }

  /// Maps a point through the transform
  #[inline]
  pub fn map_point(&self, p: Point) -> Point {
    Point::new(
      p.x * self.sx + p.y * self.kx + self.tx,
      p.x * self.ky + p.y * self.sy + self.ty,
    )
  }

  /// Composes `self * other` so that `other` applies to points first
  pub fn pre_concat(&self, other: AffineTransform) -> Self {
    Self {
      sx: self.sx * other.sx + self.kx * other.ky,
      kx: self.sx * other.kx + self.kx * other.sy,
      ky: self.ky * other.sx + self.sy * other.ky,
      sy: self.ky * other.kx + self.sy * other.sy,
      tx: self.sx * other.tx + self.kx * other.ty + self.tx,
      ty: self.ky * other.tx + self.sy * other.ty + self.ty,
    }
  }

  /// Appends a translation that applies before the existing transform
  pub fn pre_translate(&self, dx: f32, dy: f32) -> Self {
    self.pre_concat(Self::from_translate(dx, dy))
  }

  /// Appends a scale that applies before the existing transform
  pub fn pre_scale(&self, sx: f32, sy: f32) -> Self {
    self.pre_concat(Self::from_scale(sx, sy))
  }

  /// Appends a rotation that applies before the existing transform
  pub fn pre_rotate(&self, angle: f32) -> Self {
    self.pre_concat(Self::from_rotate(angle))
  }

  /// Extracts the rotation angle in radians
  ///
  /// Valid for transforms composed of translate/scale/rotate (no
  /// independent skew), which is all this engine produces.
  pub fn rotation(&self) -> f32 {
    self.ky.atan2(self.sx)
  }

  /// Isotropic scale factor, `sqrt(|det|)`
  ///
  /// Used to scale radii and stroke widths that have no independent axis.
  pub fn scale_factor(&self) -> f32 {
    (self.sx * self.sy - self.kx * self.ky).abs().sqrt()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn assert_point_near(a: Point, b: Point) {
    assert!(
      (a.x - b.x).abs() < 1e-4 && (a.y - b.y).abs() < 1e-4,
      "expected {} to be near {}",
      a,
      b
    );
  }

  #[test]
  fn test_identity_maps_points_unchanged() {
    let t = AffineTransform::identity();
    assert_eq!(t.map_point(Point::new(3.0, 4.0)), Point::new(3.0, 4.0));
    assert!(t.is_identity());
  }

  #[test]
  fn test_translate() {
    let t = AffineTransform::from_translate(10.0, -5.0);
    assert_eq!(t.map_point(Point::new(1.0, 1.0)), Point::new(11.0, -4.0));
  }

  #[test]
  fn test_scale() {
    let t = AffineTransform::from_scale(2.0, 3.0);
    assert_eq!(t.map_point(Point::new(4.0, 4.0)), Point::new(8.0, 12.0));
  }

  #[test]
  fn test_rotate_quarter_turn() {
    let t = AffineTransform::from_rotate(std::f32::consts::FRAC_PI_2);
    // 90 degrees clockwise on screen: +x axis maps to +y
    assert_point_near(t.map_point(Point::new(1.0, 0.0)), Point::new(0.0, 1.0));
  }

  #[test]
  fn test_pre_translate_applies_first() {
    let t = AffineTransform::from_scale(2.0, 2.0).pre_translate(5.0, 0.0);
    // Translation happens in user space, then the scale doubles everything
    assert_point_near(t.map_point(Point::new(1.0, 0.0)), Point::new(12.0, 0.0));
  }

  #[test]
  fn test_compose_translate_then_rotate() {
    let t = AffineTransform::from_translate(10.0, 0.0)
      .pre_rotate(std::f32::consts::FRAC_PI_2);
    assert_point_near(t.map_point(Point::new(1.0, 0.0)), Point::new(10.0, 1.0));
  }

  #[test]
  fn test_rotation_extraction() {
    let angle = 0.7_f32;
    let t = AffineTransform::from_rotate(angle).pre_scale(2.0, 2.0);
    assert!((t.rotation() - angle).abs() < 1e-5);
  }

  #[test]
  fn test_scale_factor() {
    let t = AffineTransform::from_scale(2.0, 2.0).pre_rotate(0.3);
    assert!((t.scale_factor() - 2.0).abs() < 1e-5);
  }
}
