//! Row-indexed span accumulation
//!
//! Shape rasterizers that build a region out of several geometric pieces
//! (rounded-rect corner arcs plus edge bands, circle rows) accumulate the
//! pieces here before painting. Overlapping or touching spans on a row are
//! merged as they are added, so the final batched paint has no 1px seam
//! gaps and never double-draws a pixel, which matters for semi-transparent
//! colors.

use crate::paint::buffer::PixelRun;

/// Disjoint horizontal spans indexed by row
#[derive(Debug, Clone)]
pub struct ScanlineSpans {
  y0: i32,
  rows: Vec<Vec<(i32, i32)>>,
}

impl ScanlineSpans {
  /// Creates an accumulator covering rows `[y0, y1)`
  pub fn new(y0: i32, y1: i32) -> Self {
    let len = (y1 - y0).max(0) as usize;
    Self {
      y0,
      rows: vec![Vec::new(); len],
    }
  }

  /// Adds the span `[x0, x1)` on row `y`, merging with existing spans
  ///
  /// Rows outside the accumulator's range and empty spans are ignored.
  pub fn add(&mut self, y: i32, x0: i32, x1: i32) {
    if x0 >= x1 || y < self.y0 {
      return;
    }
    let row_idx = (y - self.y0) as usize;
    if row_idx >= self.rows.len() {
      return;
    }

    let row = &mut self.rows[row_idx];
    let mut new_span = (x0, x1);
    // Merge every span that overlaps or touches the new one
    row.retain(|&(sx0, sx1)| {
      if sx0 <= new_span.1 && sx1 >= new_span.0 {
        new_span.0 = new_span.0.min(sx0);
        new_span.1 = new_span.1.max(sx1);
        false
      } else {
        true
      }
    });
    row.push(new_span);
  }

  /// Converts the accumulated spans into pixel runs for batched painting
  pub fn to_runs(&self) -> Vec<PixelRun> {
    let mut runs = Vec::new();
    for (i, row) in self.rows.iter().enumerate() {
      let y = self.y0 + i as i32;
      let mut spans = row.clone();
      spans.sort_unstable();
      for (x0, x1) in spans {
        runs.push(PixelRun::new(x0, y, (x1 - x0) as u32));
      }
    }
    runs
  }

  /// Returns true if no spans were accumulated
  pub fn is_empty(&self) -> bool {
    self.rows.iter().all(|row| row.is_empty())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_single_span_round_trip() {
    let mut spans = ScanlineSpans::new(2, 5);
    spans.add(3, 1, 4);
    assert_eq!(spans.to_runs(), vec![PixelRun::new(1, 3, 3)]);
  }

  #[test]
  fn test_overlapping_spans_merge() {
    let mut spans = ScanlineSpans::new(0, 1);
    spans.add(0, 0, 5);
    spans.add(0, 3, 8);
    assert_eq!(spans.to_runs(), vec![PixelRun::new(0, 0, 8)]);
  }

  #[test]
  fn test_touching_spans_merge_without_seam() {
    let mut spans = ScanlineSpans::new(0, 1);
    spans.add(0, 0, 4);
    spans.add(0, 4, 8);
    assert_eq!(spans.to_runs(), vec![PixelRun::new(0, 0, 8)]);
  }

  #[test]
  fn test_disjoint_spans_stay_separate() {
    let mut spans = ScanlineSpans::new(0, 1);
    spans.add(0, 10, 12);
    spans.add(0, 0, 2);
    assert_eq!(
      spans.to_runs(),
      vec![PixelRun::new(0, 0, 2), PixelRun::new(10, 0, 2)]
    );
  }

  #[test]
  fn test_bridging_span_merges_three() {
    let mut spans = ScanlineSpans::new(0, 1);
    spans.add(0, 0, 2);
    spans.add(0, 6, 8);
    spans.add(0, 2, 6);
    assert_eq!(spans.to_runs(), vec![PixelRun::new(0, 0, 8)]);
  }

  #[test]
  fn test_rows_outside_range_ignored() {
    let mut spans = ScanlineSpans::new(1, 3);
    spans.add(0, 0, 4);
    spans.add(3, 0, 4);
    assert!(spans.is_empty());
  }

  #[test]
  fn test_empty_span_ignored() {
    let mut spans = ScanlineSpans::new(0, 1);
    spans.add(0, 5, 5);
    spans.add(0, 6, 4);
    assert!(spans.is_empty());
  }
}
