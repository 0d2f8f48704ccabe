use std::ops::Range;

use crate::cell::CellState;
use crate::grid::Grid;

/// Moore neighborhood of one cell, clipped at the board edges (no wrapping).
///
/// `rows`/`cols` are half-open board ranges; `local_row`/`local_col` locate
/// the target inside the extracted block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Window {
    pub rows: Range<usize>,
    pub cols: Range<usize>,
    pub local_row: usize,
    pub local_col: usize,
}

impl Window {
    /// `max_row`/`max_col` are the largest valid indices (`h - 1`, `w - 1`).
    pub fn for_cell(row: usize, col: usize, max_row: usize, max_col: usize) -> Self {
        let (rows, local_row) = clamp_axis(row, max_row);
        let (cols, local_col) = clamp_axis(col, max_col);
        Self {
            rows,
            cols,
            local_row,
            local_col,
        }
    }

    /// Copy of the covered block. Rule evaluation mutates this, never the board.
    pub fn extract(&self, board: &Grid<CellState>) -> Grid<CellState> {
        board.sub_grid(self.rows.clone(), self.cols.clone())
    }
}

// Local index is the target's offset from the window start. On a 2-long axis
// both cells get the window 0..2, so an edge test alone cannot tell them apart.
// A 1-wide axis degenerates to the single index 0.
#[inline]
fn clamp_axis(i: usize, max: usize) -> (Range<usize>, usize) {
    let lo = i.saturating_sub(1);
    let hi = (i + 1).min(max) + 1;
    (lo..hi, i - lo)
}
