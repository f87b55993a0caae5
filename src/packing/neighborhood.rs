//! Packing-ball regions on the square grid.
//!
//! A region is a set of cells in which any two cells are at taxicab distance
//! at most `k`, so at most one of them may carry color `k`. The anchor is the
//! topmost cell of the region; the diamond hangs below it.
//!
//! * Even `k`: the diamond of radius `k / 2` centered `k / 2` rows below the
//!   anchor.
//! * Odd `k`: the diamond of radius `(k + 1) / 2` with its central row
//!   removed. The rows above the center keep their place and the rows below
//!   move up by one. The result is the union of two diamonds of radius
//!   `(k - 1) / 2` centered on two vertically adjacent cells.
//!
//! Cells falling outside `[1, n] × [1, n]` are dropped.

use std::ops::RangeInclusive;

use super::error::{PackingError, Result};
use super::Cell;

/// Enumerates packing-ball regions for an `n × n` grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NeighborhoodEnumerator {
    n: usize,
}

impl NeighborhoodEnumerator {
    pub fn new(n: usize) -> Result<Self> {
        if n == 0 {
            return Err(PackingError::InvalidArgument(
                "grid size must be at least 1".to_string(),
            ));
        }
        Ok(Self { n })
    }

    /// Radius of the diamond the region is cut from
    pub fn radius(color: usize) -> usize {
        if color % 2 == 0 {
            color / 2
        } else {
            (color + 1) / 2
        }
    }

    /// Anchor rows swept for `color`
    ///
    /// Anchors further down only produce regions already covered by the
    /// transposed sweep, so the sweep stops at row `max(n - k, 1)`.
    pub fn anchor_rows(&self, color: usize) -> RangeInclusive<usize> {
        1..=self.n.saturating_sub(color).max(1)
    }

    /// Cells of the region anchored at `anchor` for `color`, in row-major
    /// sweep order and without duplicates
    pub fn region(&self, anchor: Cell, color: usize) -> Result<Vec<Cell>> {
        if color == 0 {
            return Err(PackingError::InvalidArgument(
                "colors start at 1".to_string(),
            ));
        }
        if !anchor.in_square(self.n) {
            return Err(PackingError::InvalidArgument(format!(
                "anchor {} lies outside the {}x{} grid",
                anchor, self.n, self.n
            )));
        }

        let i0 = anchor.row as i64;
        let d = Self::radius(color) as i64;
        let mut cells = Vec::new();

        if color % 2 == 0 {
            self.sweep(&mut cells, anchor, d, i0 - d..=i0 + d, d);
        } else {
            // central row i0 is skipped; the lower half closes the gap
            self.sweep(&mut cells, anchor, d, i0 - d..=i0 - 1, d);
            self.sweep(&mut cells, anchor, d, i0 + 1..=i0 + d, d - 1);
        }

        Ok(cells)
    }

    /// Push every in-grid cell of the anchor-centered diamond of radius `d`
    /// whose row lies in `rows`, shifted down by `shift` rows
    fn sweep(
        &self,
        out: &mut Vec<Cell>,
        anchor: Cell,
        d: i64,
        rows: RangeInclusive<i64>,
        shift: i64,
    ) {
        let n = self.n as i64;
        let (i0, j0) = (anchor.row as i64, anchor.col as i64);

        for i in rows {
            let row = i + shift;
            if !(1..=n).contains(&row) {
                continue;
            }
            for j in j0 - d..=j0 + d {
                if (1..=n).contains(&j) && (i0 - i).abs() + (j0 - j).abs() <= d {
                    out.push(Cell::new(row as usize, j as usize));
                }
            }
        }
    }
}
