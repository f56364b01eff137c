//! Pixel buffer and compositor
//!
//! Owns the RGBA8 byte buffer (straight alpha) and implements every pixel
//! write in the engine: single pixels, batched horizontal runs, and the
//! fill-then-stroke run pairs the shape rasterizers emit.
//!
//! Two views share one allocation: the flat byte slice and 4-byte pixel
//! groups over the same memory. A fully opaque write (source alpha 255 and
//! global alpha >= 1) stores the whole group at once; everything else goes
//! through straight-alpha source-over compositing in byte space:
//!
//! ```text
//! outA = srcA + dstA * (1 - srcA)
//! outC = (srcC * srcA + dstC * dstA * (1 - srcA)) / outA
//! ```
//!
//! This is deliberately not gamma-correct; the engine trades colorimetric
//! accuracy for speed and for bit-exact agreement with the reference
//! renderer it mirrors.
//!
//! The compositor never reads or writes outside `[0,width) x [0,height)`:
//! out-of-range coordinates are clamped or skipped, never an error.

use crate::color::Rgba;
use crate::paint::clip::ClipMask;

/// A horizontal span of same-color pixels, the unit of batched compositing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRun {
  /// Leftmost pixel x
  pub x: i32,
  /// Row
  pub y: i32,
  /// Number of pixels
  pub len: u32,
}

impl PixelRun {
  /// Creates a run covering `[x, x + len)` on row `y`
  pub const fn new(x: i32, y: i32, len: u32) -> Self {
    Self { x, y, len }
  }
}

/// RGBA8 pixel buffer with straight alpha
pub struct FrameBuffer {
  width: u32,
  height: u32,
  data: Vec<u8>,
}

impl FrameBuffer {
  /// Creates a transparent-black buffer of the given dimensions
  pub fn new(width: u32, height: u32) -> Self {
    Self {
      width,
      height,
      data: vec![0; width as usize * height as usize * 4],
    }
  }

  /// Buffer width in pixels
  #[inline]
  pub fn width(&self) -> u32 {
    self.width
  }

  /// Buffer height in pixels
  #[inline]
  pub fn height(&self) -> u32 {
    self.height
  }

  /// The raw bytes, row-major RGBA
  #[inline]
  pub fn data(&self) -> &[u8] {
    &self.data
  }

  /// The buffer as 4-byte pixel groups over the same allocation
  ///
  /// This is the checked equivalent of a packed-word alias: group `i`
  /// addresses exactly the 4 bytes the blend path would touch for pixel
  /// `i`, in the same channel order.
  #[inline]
  pub fn pixels(&self) -> &[[u8; 4]] {
    self.data.as_chunks::<4>().0
  }

  #[inline]
  fn pixels_mut(&mut self) -> &mut [[u8; 4]] {
    self.data.as_chunks_mut::<4>().0
  }

  /// Reads pixel (x, y); out-of-bounds returns transparent black
  #[inline]
  pub fn pixel(&self, x: u32, y: u32) -> Rgba {
    if x >= self.width || y >= self.height {
      return Rgba::TRANSPARENT;
    }
    let [r, g, b, a] = self.pixels()[(y * self.width + x) as usize];
    Rgba::new(r, g, b, a)
  }

  /// Effective source alpha after global alpha, rounded to a byte
  #[inline]
  fn effective_alpha(color: Rgba, global_alpha: f32) -> u8 {
    if global_alpha >= 1.0 {
      color.a
    } else if global_alpha <= 0.0 {
      0
    } else {
      (color.a as f32 * global_alpha).round() as u8
    }
  }

  /// Writes one pixel, honoring bounds, the clip mask, and global alpha
  pub fn set_pixel(&mut self, x: i32, y: i32, color: Rgba, global_alpha: f32, clip: &ClipMask) {
    if x < 0 || y < 0 {
      return;
    }
    let (ux, uy) = (x as u32, y as u32);
    if ux >= self.width || uy >= self.height || !clip.test(ux, uy) {
      return;
    }

    let alpha = Self::effective_alpha(color, global_alpha);
    let idx = (uy * self.width + ux) as usize;
    if alpha == 255 {
      self.pixels_mut()[idx] = color.to_array();
    } else if alpha > 0 {
      self.blend_at(idx, color, alpha);
    }
  }

  /// Source-over blend of `color` (with effective alpha) into pixel `idx`
  #[inline]
  fn blend_at(&mut self, idx: usize, color: Rgba, alpha: u8) {
    let dst = &mut self.pixels_mut()[idx];
    let sa = alpha as f32 / 255.0;
    let da = dst[3] as f32 / 255.0;
    let out_a = sa + da * (1.0 - sa);
    if out_a <= 0.0 {
      *dst = [0, 0, 0, 0];
      return;
    }
    let blend = |src: u8, d: u8| -> u8 {
      ((src as f32 * sa + d as f32 * da * (1.0 - sa)) / out_a).round() as u8
    };
    *dst = [
      blend(color.r, dst[0]),
      blend(color.g, dst[1]),
      blend(color.b, dst[2]),
      (out_a * 255.0).round() as u8,
    ];
  }

  /// Writes a batch of horizontal runs in one color
  ///
  /// Each run is clipped to the buffer. The clip mask is scanned a byte at
  /// a time wherever the run covers a whole mask byte: `0x00` skips 8
  /// pixels, `0xFF` writes 8 opaque pixels without per-pixel tests.
  pub fn set_pixel_runs(
    &mut self,
    runs: &[PixelRun],
    color: Rgba,
    global_alpha: f32,
    clip: &ClipMask,
  ) {
    let alpha = Self::effective_alpha(color, global_alpha);
    if alpha == 0 {
      return;
    }
    let opaque = alpha == 255;
    let packed = color.to_array();

    for run in runs {
      if run.y < 0 || run.y as u32 >= self.height || run.len == 0 {
        continue;
      }
      let y = run.y as u32;
      let x0 = run.x.max(0);
      let x1 = (run.x.saturating_add(run.len as i32)).min(self.width as i32);
      if x0 >= x1 {
        continue;
      }

      let row = (y * self.width) as usize;
      let mut x = x0 as u32;
      let x_end = x1 as u32;
      while x < x_end {
        let bit = clip.index_of(x, y);
        if bit % 8 == 0 && x + 8 <= x_end {
          match clip.byte_at(bit) {
            0x00 => {
              x += 8;
              continue;
            }
            0xFF if opaque => {
              let base = row + x as usize;
              self.pixels_mut()[base..base + 8].fill(packed);
              x += 8;
              continue;
            }
            _ => {}
          }
        }
        if clip.test(x, y) {
          let idx = row + x as usize;
          if opaque {
            self.pixels_mut()[idx] = packed;
          } else {
            self.blend_at(idx, color, alpha);
          }
        }
        x += 1;
      }
    }
  }

  /// Writes fill runs, then stroke runs, so the stroke overlays the fill
  #[allow(clippy::too_many_arguments)]
  pub fn set_pixel_fill_and_stroke_runs(
    &mut self,
    fill_runs: &[PixelRun],
    fill_color: Rgba,
    stroke_runs: &[PixelRun],
    stroke_color: Rgba,
    global_alpha: f32,
    clip: &ClipMask,
  ) {
    self.set_pixel_runs(fill_runs, fill_color, global_alpha, clip);
    self.set_pixel_runs(stroke_runs, stroke_color, global_alpha, clip);
  }

  /// Zeroes all four channels of one pixel (used by `clear_rect`)
  pub fn clear_pixel(&mut self, x: i32, y: i32, clip: &ClipMask) {
    if x < 0 || y < 0 {
      return;
    }
    let (ux, uy) = (x as u32, y as u32);
    if ux >= self.width || uy >= self.height || !clip.test(ux, uy) {
      return;
    }
    let idx = (uy * self.width + ux) as usize;
    self.pixels_mut()[idx] = [0, 0, 0, 0];
  }
}
