//! Bit-per-pixel clip mask
//!
//! One bit per pixel, 1 = visible, packed LSB-first in row-major order so a
//! horizontal pixel run maps onto a contiguous bit range. The compositor
//! exploits this: a clip byte of `0x00` rejects 8 pixels at once and a byte
//! of `0xFF` admits 8 pixels without per-pixel testing.
//!
//! Two roles share this type: the persistent mask owned by each saved canvas
//! state, and the scratch mask that accumulates `rect()` regions between
//! `begin_path()` and `clip()`.

/// A 1-bit-per-pixel visibility mask
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipMask {
  width: u32,
  height: u32,
  bits: Vec<u8>,
}

impl ClipMask {
  /// Creates a mask with every pixel visible
  pub fn filled(width: u32, height: u32) -> Self {
    let len = Self::byte_len(width, height);
    Self {
      width,
      height,
      bits: vec![0xFF; len],
    }
  }

  /// Creates a mask with every pixel hidden
  pub fn empty(width: u32, height: u32) -> Self {
    let len = Self::byte_len(width, height);
    Self {
      width,
      height,
      bits: vec![0x00; len],
    }
  }

  fn byte_len(width: u32, height: u32) -> usize {
    let pixels = width as usize * height as usize;
    pixels.div_ceil(8)
  }

  /// Mask width in pixels
  pub fn width(&self) -> u32 {
    self.width
  }

  /// Mask height in pixels
  pub fn height(&self) -> u32 {
    self.height
  }

  #[inline]
  fn bit_index(&self, x: u32, y: u32) -> usize {
    y as usize * self.width as usize + x as usize
  }

  /// Tests the bit for pixel (x, y); out-of-bounds pixels are hidden
  #[inline]
  pub fn test(&self, x: u32, y: u32) -> bool {
    if x >= self.width || y >= self.height {
      return false;
    }
    let idx = self.bit_index(x, y);
    self.bits[idx / 8] & (1 << (idx % 8)) != 0
  }

  /// Sets the bit for pixel (x, y); out-of-bounds coordinates are ignored
  #[inline]
  pub fn set(&mut self, x: u32, y: u32) {
    if x >= self.width || y >= self.height {
      return;
    }
    let idx = self.bit_index(x, y);
    self.bits[idx / 8] |= 1 << (idx % 8);
  }

  /// Sets the bits for the horizontal pixel run `[x0, x1)` on row `y`
  ///
  /// The run is clamped to the mask; full interior bytes are set in one
  /// store each.
  pub fn set_run(&mut self, x0: i32, x1: i32, y: i32) {
    if y < 0 || y as u32 >= self.height {
      return;
    }
    let x0 = x0.max(0) as u32;
    let x1 = (x1.min(self.width as i32)).max(0) as u32;
    if x0 >= x1 {
      return;
    }

    let mut idx = self.bit_index(x0, y as u32);
    let end = idx + (x1 - x0) as usize;
    while idx < end {
      if idx % 8 == 0 && idx + 8 <= end {
        self.bits[idx / 8] = 0xFF;
        idx += 8;
      } else {
        self.bits[idx / 8] |= 1 << (idx % 8);
        idx += 1;
      }
    }
  }

  /// Clears every bit
  pub fn clear(&mut self) {
    self.bits.fill(0);
  }

  /// Intersects this mask with another of the same dimensions
  pub fn intersect(&mut self, other: &ClipMask) {
    debug_assert_eq!(self.width, other.width);
    debug_assert_eq!(self.height, other.height);
    for (dst, src) in self.bits.iter_mut().zip(other.bits.iter()) {
      *dst &= src;
    }
  }

  /// Returns the mask byte containing the given bit index
  ///
  /// Used by the compositor's batched run path to test 8 pixels at a time.
  #[inline]
  pub fn byte_at(&self, bit_index: usize) -> u8 {
    self.bits[bit_index / 8]
  }

  /// Bit index for pixel (x, y), for use with [`ClipMask::byte_at`]
  #[inline]
  pub fn index_of(&self, x: u32, y: u32) -> usize {
    self.bit_index(x, y)
  }

  /// Number of visible pixels (test helper; O(bytes))
  pub fn count_visible(&self) -> usize {
    let full: usize = self.bits.iter().map(|b| b.count_ones() as usize).sum();
    // Trailing bits past width*height may be set in a filled mask
    let pixels = self.width as usize * self.height as usize;
    let tail_bits = self.bits.len() * 8 - pixels;
    if tail_bits == 0 {
      return full;
    }
    let last = self.bits[self.bits.len() - 1];
    let tail_mask = !(0xFFu8 >> tail_bits);
    full - (last & tail_mask).count_ones() as usize
  }
}
