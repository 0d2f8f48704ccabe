use std::ops::Range;

/// Row-major flat grid. No per-cell objects.
/// Addressed as (row, col); edges are hard (no wrapping).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid<T> {
    pub data: Vec<T>,
    pub w: usize,
    pub h: usize,
}

impl<T: Copy + Default> Grid<T> {
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            data: vec![T::default(); w * h],
            w,
            h,
        }
    }

    /// Build from nested rows. Caller guarantees the rows are rectangular.
    pub fn from_rows(rows: &[Vec<T>]) -> Self {
        let h = rows.len();
        let w = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(w * h);
        for row in rows {
            debug_assert_eq!(row.len(), w);
            data.extend_from_slice(row);
        }
        Self { data, w, h }
    }

    #[inline]
    pub fn idx(&self, row: usize, col: usize) -> usize {
        debug_assert!(row < self.h && col < self.w);
        row * self.w + col
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> T {
        self.data[self.idx(row, col)]
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, v: T) {
        let i = self.idx(row, col);
        self.data[i] = v;
    }

    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        // chunks(0) panics, and a zero-width grid has no cells to yield anyway
        self.data.chunks(self.w.max(1)).take(self.h)
    }

    pub fn to_rows(&self) -> Vec<Vec<T>> {
        self.rows().map(<[T]>::to_vec).collect()
    }

    /// Copy out the half-open block `rows` x `cols`.
    pub fn sub_grid(&self, rows: Range<usize>, cols: Range<usize>) -> Self {
        let w = cols.len();
        let h = rows.len();
        let mut data = Vec::with_capacity(w * h);
        for r in rows {
            let start = self.idx(r, cols.start);
            data.extend_from_slice(&self.data[start..start + w]);
        }
        Self { data, w, h }
    }
}
