//! Conway's Game of Life rule (B3/S23).
//!
//! 1. A live cell with fewer than two live neighbors dies (underpopulation).
//! 2. A live cell with two or three live neighbors lives on.
//! 3. A live cell with more than three live neighbors dies (overpopulation).
//! 4. A dead cell with exactly three live neighbors becomes alive.

use crate::cell::CellState;
use crate::grid::Grid;

/// Next state of the cell at (`local_row`, `local_col`) of `window`.
///
/// Takes the window by value: it is a copy, and the target is cleared in
/// place so the sum only counts neighbors.
pub fn evaluate(mut window: Grid<CellState>, local_row: usize, local_col: usize) -> CellState {
    let current = window.get(local_row, local_col);
    window.set(local_row, local_col, CellState::Dead);

    let alive_neighbors = window.data.iter().filter(|c| c.is_alive()).count();

    next_state(current, alive_neighbors)
}

#[inline]
pub fn next_state(current: CellState, alive_neighbors: usize) -> CellState {
    let alive = match current {
        CellState::Alive => matches!(alive_neighbors, 2 | 3),
        CellState::Dead => alive_neighbors == 3,
    };
    CellState::from_alive(alive)
}
