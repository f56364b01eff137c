//! Core geometry types for the rasterizer
//!
//! All coordinates are in canvas pixels with the origin at the top-left
//! corner: positive X extends to the right, positive Y extends downward.
//! This matches the HTML5 Canvas coordinate system.

use std::fmt;

/// A 2D point in canvas pixel space
///
/// # Examples
///
/// ```
/// use crispcanvas::Point;
///
/// let p = Point::new(10.0, 20.0);
/// assert_eq!(p.x, 10.0);
/// assert_eq!(Point::ZERO, Point::new(0.0, 0.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
  /// X coordinate (increases to the right)
  pub x: f32,
  /// Y coordinate (increases downward)
  pub y: f32,
}

impl Point {
  /// The origin (0, 0)
  pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

  /// Creates a new point at the given coordinates
  pub const fn new(x: f32, y: f32) -> Self {
    Self { x, y }
  }

  /// Translates this point by another point's coordinates
  pub fn translate(self, other: Point) -> Self {
    Self {
      x: self.x + other.x,
      y: self.y + other.y,
    }
  }

  /// Euclidean distance to another point
  ///
  /// # Examples
  ///
  /// ```
  /// use crispcanvas::Point;
  ///
  /// let p1 = Point::new(0.0, 0.0);
  /// let p2 = Point::new(3.0, 4.0);
  /// assert_eq!(p1.distance_to(p2), 5.0);
  /// ```
  pub fn distance_to(self, other: Point) -> f32 {
    let dx = other.x - self.x;
    let dy = other.y - self.y;
    (dx * dx + dy * dy).sqrt()
  }
}

impl fmt::Display for Point {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "({}, {})", self.x, self.y)
  }
}

/// A 2D size in canvas pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
  /// Width (horizontal extent)
  pub width: f32,
  /// Height (vertical extent)
  pub height: f32,
}

impl Size {
  /// A size with zero width and height
  pub const ZERO: Self = Self {
    width: 0.0,
    height: 0.0,
  };

  /// Creates a new size with the given dimensions
  pub const fn new(width: f32, height: f32) -> Self {
    Self { width, height }
  }

  /// Returns true if either width or height is zero or negative
  pub fn is_empty(self) -> bool {
    self.width <= 0.0 || self.height <= 0.0
  }
}

impl fmt::Display for Size {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}x{}", self.width, self.height)
  }
}

/// An axis-aligned rectangle defined by its top-left corner and size
///
/// # Examples
///
/// ```
/// use crispcanvas::Rect;
///
/// let rect = Rect::from_xywh(10.0, 20.0, 100.0, 50.0);
/// assert_eq!(rect.max_x(), 110.0);
/// assert_eq!(rect.center().y, 45.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
  /// The top-left corner of the rectangle
  pub origin: Point,
  /// The size (width and height) of the rectangle
  pub size: Size,
}

impl Rect {
  /// A zero-sized rectangle at the origin
  pub const ZERO: Self = Self {
    origin: Point::ZERO,
    size: Size::ZERO,
  };

  /// Creates a new rectangle from an origin point and size
  pub const fn new(origin: Point, size: Size) -> Self {
    Self { origin, size }
  }

  /// Creates a rectangle from x, y, width, height components
  pub const fn from_xywh(x: f32, y: f32, width: f32, height: f32) -> Self {
    Self {
      origin: Point::new(x, y),
      size: Size::new(width, height),
    }
  }

  /// Returns the x coordinate of the left edge
  pub fn x(self) -> f32 {
    self.origin.x
  }

  /// Returns the y coordinate of the top edge
  pub fn y(self) -> f32 {
    self.origin.y
  }

  /// Returns the width
  pub fn width(self) -> f32 {
    self.size.width
  }

  /// Returns the height
  pub fn height(self) -> f32 {
    self.size.height
  }

  /// Returns the x coordinate of the left edge (same as x())
  pub fn min_x(self) -> f32 {
    self.origin.x
  }

  /// Returns the x coordinate of the right edge
  pub fn max_x(self) -> f32 {
    self.origin.x + self.size.width
  }

  /// Returns the y coordinate of the top edge (same as y())
  pub fn min_y(self) -> f32 {
    self.origin.y
  }

  /// Returns the y coordinate of the bottom edge
  pub fn max_y(self) -> f32 {
    self.origin.y + self.size.height
  }

  /// Returns the center point of the rectangle
  pub fn center(self) -> Point {
    Point::new(
      self.origin.x + self.size.width / 2.0,
      self.origin.y + self.size.height / 2.0,
    )
  }

  /// Returns true if this rectangle intersects another rectangle
  ///
  /// Rectangles that touch at an edge or corner are considered intersecting.
  pub fn intersects(self, other: Rect) -> bool {
    self.min_x() <= other.max_x()
      && self.max_x() >= other.min_x()
      && self.min_y() <= other.max_y()
      && self.max_y() >= other.min_y()
  }

  /// Computes the intersection of two rectangles
  ///
  /// Returns None if the rectangles don't intersect.
  pub fn intersection(self, other: Rect) -> Option<Rect> {
    if !self.intersects(other) {
      return None;
    }

    let min_x = self.min_x().max(other.min_x());
    let min_y = self.min_y().max(other.min_y());
    let max_x = self.max_x().min(other.max_x());
    let max_y = self.max_y().min(other.max_y());

    Some(Rect::from_xywh(min_x, min_y, max_x - min_x, max_y - min_y))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_point_translate() {
    let p1 = Point::new(10.0, 20.0);
    let p2 = Point::new(5.0, 3.0);
    assert_eq!(p1.translate(p2), Point::new(15.0, 23.0));
  }

  #[test]
  fn test_point_distance() {
    let p1 = Point::new(0.0, 0.0);
    let p2 = Point::new(3.0, 4.0);
    assert!((p1.distance_to(p2) - 5.0).abs() < 0.001);
  }

  #[test]
  fn test_size_is_empty() {
    assert!(Size::ZERO.is_empty());
    assert!(Size::new(0.0, 10.0).is_empty());
    assert!(Size::new(-1.0, 10.0).is_empty());
    assert!(!Size::new(10.0, 10.0).is_empty());
  }

  #[test]
  fn test_rect_accessors() {
    let rect = Rect::from_xywh(10.0, 20.0, 100.0, 50.0);
    assert_eq!(rect.min_x(), 10.0);
    assert_eq!(rect.max_x(), 110.0);
    assert_eq!(rect.min_y(), 20.0);
    assert_eq!(rect.max_y(), 70.0);
  }

  #[test]
  fn test_rect_center() {
    let rect = Rect::from_xywh(0.0, 0.0, 100.0, 50.0);
    assert_eq!(rect.center(), Point::new(50.0, 25.0));
  }

  #[test]
  fn test_rect_intersection() {
    let rect1 = Rect::from_xywh(0.0, 0.0, 10.0, 10.0);
    let rect2 = Rect::from_xywh(5.0, 5.0, 10.0, 10.0);
    let rect3 = Rect::from_xywh(20.0, 20.0, 10.0, 10.0);

    assert_eq!(
      rect1.intersection(rect2),
      Some(Rect::from_xywh(5.0, 5.0, 5.0, 5.0))
    );
    assert_eq!(rect1.intersection(rect3), None);
  }
}
