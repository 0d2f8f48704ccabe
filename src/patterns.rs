use std::str::FromStr;

use crate::cell::CellState;
use crate::grid::Grid;
use crate::rng::Rng;

/// Canonical starting patterns.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pattern {
    /// 2x2 still life
    Block,
    /// Period-2 oscillator, three in a row
    Blinker,
    /// Period-2 oscillator
    Toad,
    /// Diagonal spaceship
    Glider,
}

impl Pattern {
    pub const ALL: [Pattern; 4] = [Pattern::Block, Pattern::Blinker, Pattern::Toad, Pattern::Glider];

    /// Live cells as (row, col) offsets from the pattern's top-left corner.
    pub fn cells(self) -> &'static [(usize, usize)] {
        match self {
            Pattern::Block => &[(0, 0), (0, 1), (1, 0), (1, 1)],
            Pattern::Blinker => &[(0, 0), (0, 1), (0, 2)],
            Pattern::Toad => &[(0, 1), (0, 2), (0, 3), (1, 0), (1, 1), (1, 2)],
            Pattern::Glider => &[(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)],
        }
    }

    /// Bounding box as (rows, cols).
    pub fn size(self) -> (usize, usize) {
        self.cells()
            .iter()
            .fold((0, 0), |(h, w), &(r, c)| (h.max(r + 1), w.max(c + 1)))
    }

    pub fn name(self) -> &'static str {
        match self {
            Pattern::Block => "block",
            Pattern::Blinker => "blinker",
            Pattern::Toad => "toad",
            Pattern::Glider => "glider",
        }
    }
}

impl FromStr for Pattern {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Pattern::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(s))
            .ok_or(())
    }
}

/// Stamp `pattern` with its top-left at (`row`, `col`). Cells falling off the
/// board are dropped.
pub fn place(board: &mut Grid<CellState>, pattern: Pattern, row: usize, col: usize) {
    for &(r, c) in pattern.cells() {
        let (r, c) = (row + r, col + c);
        if r < board.h && c < board.w {
            board.set(r, c, CellState::Alive);
        }
    }
}

/// The pattern alone on a board with `margin` dead cells on every side.
pub fn padded(pattern: Pattern, margin: usize) -> Grid<CellState> {
    let (h, w) = pattern.size();
    let mut board = Grid::new(w + 2 * margin, h + 2 * margin);
    place(&mut board, pattern, margin, margin);
    board
}

/// Deterministic random board; each cell alive with probability `density`.
pub fn random_soup(w: usize, h: usize, density: f32, seed: u64) -> Grid<CellState> {
    let mut rng = Rng::new(seed);
    let mut board = Grid::new(w, h);
    for cell in &mut board.data {
        *cell = CellState::from_alive(rng.next_f32() < density);
    }
    board
}
