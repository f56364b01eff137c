//! RGBA color type and CSS color-string parsing
//!
//! Colors are stored as four u8 channels with straight (non-premultiplied)
//! alpha, the same representation the pixel buffer uses, so no conversion
//! happens on the way into the compositor.
//!
//! The parser accepts the color formats the canvas API supports:
//! `#rgb`, `#rrggbb`, `rgb(r, g, b)` and `rgba(r, g, b, a)`. Anything else
//! is a parse error; malformed input is never silently coerced.
//!
//! # Examples
//!
//! ```
//! use crispcanvas::Rgba;
//!
//! let red = Rgba::parse("#f00").unwrap();
//! assert_eq!(red, Rgba::rgb(255, 0, 0));
//!
//! let half = Rgba::parse("rgba(0, 0, 0, 0.5)").unwrap();
//! assert_eq!(half.a, 128);
//! ```

use std::fmt;
use thiserror::Error;

/// RGBA color with u8 channels and straight alpha
///
/// Alpha 0 is fully transparent, 255 fully opaque.
///
/// # Examples
///
/// ```
/// use crispcanvas::Rgba;
///
/// let orange = Rgba::new(255, 128, 0, 255);
/// assert!(orange.is_opaque());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba {
  /// Red component (0-255)
  pub r: u8,
  /// Green component (0-255)
  pub g: u8,
  /// Blue component (0-255)
  pub b: u8,
  /// Alpha component (0-255, straight alpha)
  pub a: u8,
}

impl Rgba {
  /// Fully transparent black
  pub const TRANSPARENT: Self = Self {
    r: 0,
    g: 0,
    b: 0,
    a: 0,
  };

  /// Opaque black
  pub const BLACK: Self = Self {
    r: 0,
    g: 0,
    b: 0,
    a: 255,
  };

  /// Opaque white
  pub const WHITE: Self = Self {
    r: 255,
    g: 255,
    b: 255,
    a: 255,
  };

  /// Opaque red
  pub const RED: Self = Self {
    r: 255,
    g: 0,
    b: 0,
    a: 255,
  };

  /// Opaque green
  pub const GREEN: Self = Self {
    r: 0,
    g: 255,
    b: 0,
    a: 255,
  };

  /// Opaque blue
  pub const BLUE: Self = Self {
    r: 0,
    g: 0,
    b: 255,
    a: 255,
  };

  /// Creates a new RGBA color
  pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
    Self { r, g, b, a }
  }

  /// Creates an opaque RGB color (alpha = 255)
  pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
    Self { r, g, b, a: 255 }
  }

  /// Returns true if the color is fully transparent
  pub fn is_transparent(self) -> bool {
    self.a == 0
  }

  /// Returns true if the color is fully opaque
  pub fn is_opaque(self) -> bool {
    self.a == 255
  }

  /// Returns a new color with the given alpha value
  pub fn with_alpha(self, alpha: u8) -> Self {
    Self { a: alpha, ..self }
  }

  /// Returns the channels as `[r, g, b, a]`, the buffer byte order
  #[inline]
  pub const fn to_array(self) -> [u8; 4] {
    [self.r, self.g, self.b, self.a]
  }

  /// Parses a CSS color string
  ///
  /// Supports `#rgb`, `#rrggbb`, `rgb(r, g, b)` and `rgba(r, g, b, a)`
  /// where the rgba alpha is a float in 0.0-1.0.
  ///
  /// # Examples
  ///
  /// ```
  /// use crispcanvas::Rgba;
  ///
  /// assert_eq!(Rgba::parse("#ff0000").unwrap(), Rgba::RED);
  /// assert_eq!(Rgba::parse("rgb(0, 255, 0)").unwrap(), Rgba::GREEN);
  /// assert_eq!(Rgba::parse("rgba(0, 0, 255, 1)").unwrap(), Rgba::BLUE);
  /// assert!(Rgba::parse("#12345").is_err());
  /// ```
  pub fn parse(s: &str) -> Result<Self, ColorParseError> {
    let s = s.trim();

    if s.starts_with('#') {
      return parse_hex(s);
    }

    if s.starts_with("rgb(") || s.starts_with("rgba(") {
      return parse_rgb(s);
    }

    Err(ColorParseError::InvalidFormat(s.to_string()))
  }
}

impl fmt::Display for Rgba {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if self.a == 255 {
      write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    } else {
      write!(
        f,
        "rgba({}, {}, {}, {:.3})",
        self.r,
        self.g,
        self.b,
        self.a as f32 / 255.0
      )
    }
  }
}

/// Parse error for color strings
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ColorParseError {
  /// The string matches no supported color format
  #[error("Invalid color format: {0}")]
  InvalidFormat(String),

  /// Hex color with a bad length or non-hex digits
  #[error("Invalid hex color: {0}")]
  InvalidHex(String),

  /// A component inside rgb()/rgba() failed to parse
  #[error("Invalid color component: {0}")]
  InvalidComponent(String),
}

/// Parse hex color (#rgb or #rrggbb)
fn parse_hex(s: &str) -> Result<Rgba, ColorParseError> {
  let hex = &s[1..];
  if !hex.is_ascii() {
    return Err(ColorParseError::InvalidHex(s.to_string()));
  }

  let channel = |range: &str| -> Result<u8, ColorParseError> {
    u8::from_str_radix(range, 16).map_err(|_| ColorParseError::InvalidHex(s.to_string()))
  };

  match hex.len() {
    3 => {
      let r = channel(&hex[0..1].repeat(2))?;
      let g = channel(&hex[1..2].repeat(2))?;
      let b = channel(&hex[2..3].repeat(2))?;
      Ok(Rgba::rgb(r, g, b))
    }
    6 => {
      let r = channel(&hex[0..2])?;
      let g = channel(&hex[2..4])?;
      let b = channel(&hex[4..6])?;
      Ok(Rgba::rgb(r, g, b))
    }
    _ => Err(ColorParseError::InvalidHex(s.to_string())),
  }
}

/// Parse rgb() or rgba() function
fn parse_rgb(s: &str) -> Result<Rgba, ColorParseError> {
  let is_rgba = s.starts_with("rgba");
  let start = if is_rgba { 5 } else { 4 };

  let end = s
    .find(')')
    .ok_or_else(|| ColorParseError::InvalidFormat(s.to_string()))?;
  // The closing paren must end the string and the opening one must sit
  // right after the function name
  if end != s.len() - 1 || end < start || !s[..start].ends_with('(') {
    return Err(ColorParseError::InvalidFormat(s.to_string()));
  }
  let inner = &s[start..end];

  let parts: Vec<&str> = inner.split(',').map(|p| p.trim()).collect();

  let expected = if is_rgba { 4 } else { 3 };
  if parts.len() != expected {
    return Err(ColorParseError::InvalidFormat(s.to_string()));
  }

  let component = |p: &str| -> Result<u8, ColorParseError> {
    p.parse::<u8>()
      .map_err(|_| ColorParseError::InvalidComponent(p.to_string()))
  };

  let r = component(parts[0])?;
  let g = component(parts[1])?;
  let b = component(parts[2])?;
  let a = if is_rgba {
    let alpha = parts[3]
      .parse::<f32>()
      .map_err(|_| ColorParseError::InvalidComponent(parts[3].to_string()))?;
    (alpha.clamp(0.0, 1.0) * 255.0).round() as u8
  } else {
    255
  };

  Ok(Rgba::new(r, g, b, a))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_parse_hex_short() {
    assert_eq!(Rgba::parse("#f00").unwrap(), Rgba::RED);
    assert_eq!(Rgba::parse("#fff").unwrap(), Rgba::WHITE);
    assert_eq!(Rgba::parse("#abc").unwrap(), Rgba::rgb(0xaa, 0xbb, 0xcc));
  }

  #[test]
  fn test_parse_hex_long() {
    assert_eq!(Rgba::parse("#ff0000").unwrap(), Rgba::RED);
    assert_eq!(Rgba::parse("#102030").unwrap(), Rgba::rgb(0x10, 0x20, 0x30));
  }

  #[test]
  fn test_parse_hex_bad_length() {
    assert!(matches!(
      Rgba::parse("#12345"),
      Err(ColorParseError::InvalidHex(_))
    ));
    assert!(matches!(
      Rgba::parse("#ff00ff00"),
      Err(ColorParseError::InvalidHex(_))
    ));
  }

  #[test]
  fn test_parse_hex_bad_digit() {
    assert!(Rgba::parse("#ggg").is_err());
    assert!(Rgba::parse("#aé").is_err());
  }

  #[test]
  fn test_parse_rgb() {
    assert_eq!(Rgba::parse("rgb(255, 0, 0)").unwrap(), Rgba::RED);
    assert_eq!(Rgba::parse("rgb(1,2,3)").unwrap(), Rgba::rgb(1, 2, 3));
  }

  #[test]
  fn test_parse_rgba() {
    assert_eq!(
      Rgba::parse("rgba(10, 20, 30, 0.5)").unwrap(),
      Rgba::new(10, 20, 30, 128)
    );
    assert_eq!(Rgba::parse("rgba(0, 0, 0, 1)").unwrap(), Rgba::BLACK);
    assert_eq!(
      Rgba::parse("rgba(0, 0, 0, 0)").unwrap(),
      Rgba::TRANSPARENT
    );
  }

  #[test]
  fn test_parse_rgb_wrong_arity() {
    assert!(Rgba::parse("rgb(255, 0)").is_err());
    assert!(Rgba::parse("rgb(255, 0, 0, 1)").is_err());
    assert!(Rgba::parse("rgba(255, 0, 0)").is_err());
  }

  #[test]
  fn test_parse_unmatched_paren() {
    assert!(matches!(
      Rgba::parse("rgb(255, 0, 0"),
      Err(ColorParseError::InvalidFormat(_))
    ));
  }

  #[test]
  fn test_parse_rgb_rejects_trailing_text() {
    assert!(matches!(
      Rgba::parse("rgb(1,2,3)garbage"),
      Err(ColorParseError::InvalidFormat(_))
    ));
    assert!(Rgba::parse("rgba(1,2,3,0.5))").is_err());
    assert!(Rgba::parse("rgb)").is_err());
  }

  #[test]
  fn test_parse_unknown_format() {
    assert!(matches!(
      Rgba::parse("red"),
      Err(ColorParseError::InvalidFormat(_))
    ));
    assert!(Rgba::parse("hsl(0, 100%, 50%)").is_err());
  }

  #[test]
  fn test_parse_component_out_of_range() {
    assert!(matches!(
      Rgba::parse("rgb(256, 0, 0)"),
      Err(ColorParseError::InvalidComponent(_))
    ));
  }

  #[test]
  fn test_display_round_trips_through_parse() {
    let c = Rgba::rgb(12, 34, 56);
    assert_eq!(Rgba::parse(&c.to_string()).unwrap(), c);
  }

  #[test]
  fn test_opacity_predicates() {
    assert!(Rgba::TRANSPARENT.is_transparent());
    assert!(Rgba::BLACK.is_opaque());
    assert!(!Rgba::new(0, 0, 0, 128).is_opaque());
  }
}
