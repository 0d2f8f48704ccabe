use rayon::prelude::*;

use crate::cell::CellState;
use crate::config::SimConfig;
use crate::error::ValidationError;
use crate::grid::Grid;
use crate::rules::evaluate;
use crate::validate::ingest;
use crate::window::Window;

/// Collaborator notified with every generation, including the initial board
/// (step 0) when the engine is configured to do so.
///
/// The engine ignores whatever the collaborator does; failures are its own
/// business.
pub trait Renderer {
    fn on_generation(&mut self, board: &Grid<CellState>, step: usize);
}

impl<F> Renderer for F
where
    F: FnMut(&Grid<CellState>, usize),
{
    fn on_generation(&mut self, board: &Grid<CellState>, step: usize) {
        self(board, step)
    }
}

/// Renderer that does nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoRender;

impl Renderer for NoRender {
    fn on_generation(&mut self, _board: &Grid<CellState>, _step: usize) {}
}

/// Owns the board and advances it one generation at a time.
pub struct Engine<R> {
    board: Grid<CellState>,
    generation: usize,
    evaluations: u64,
    renderer: R,
}

impl<R: Renderer> Engine<R> {
    /// Validate the raw board and take ownership of it. Nothing is accepted
    /// (and the renderer is not called) unless the whole board is valid.
    pub fn new(config: SimConfig, renderer: R) -> Result<Self, ValidationError> {
        let board = ingest(&config.initial_board)?;
        Ok(Self::start(board, config.notify_on_construct, renderer))
    }

    /// Start from an already typed board, e.g. one of [`crate::patterns`].
    pub fn from_board(
        board: Grid<CellState>,
        notify_on_construct: bool,
        renderer: R,
    ) -> Result<Self, ValidationError> {
        if board.w == 0 || board.h == 0 {
            return Err(ValidationError::EmptyBoard);
        }
        Ok(Self::start(board, notify_on_construct, renderer))
    }

    fn start(board: Grid<CellState>, notify_on_construct: bool, renderer: R) -> Self {
        log::info!(
            "board {}x{} accepted, {} alive",
            board.h,
            board.w,
            live_count(&board)
        );
        let mut engine = Self {
            board,
            generation: 0,
            evaluations: 0,
            renderer,
        };
        if notify_on_construct {
            engine.renderer.on_generation(&engine.board, 0);
        }
        engine
    }

    /// Replace the board with its next generation and notify the renderer.
    pub fn step(&mut self) -> &Grid<CellState> {
        let (next, evaluated) = compute_next(&self.board);
        self.board = next;
        self.generation += 1;
        self.evaluations += evaluated;

        log::debug!(
            "generation {}: {} alive",
            self.generation,
            live_count(&self.board)
        );
        self.renderer.on_generation(&self.board, self.generation);
        &self.board
    }

    /// Apply [`Engine::step`] `n` times. `n == 0` is a no-op.
    pub fn advance(&mut self, n: usize) {
        for _ in 0..n {
            self.step();
        }
    }

    pub fn board(&self) -> &Grid<CellState> {
        &self.board
    }

    /// Steps taken since construction.
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Total rule evaluations so far (`generation * h * w`).
    pub fn evaluations(&self) -> u64 {
        self.evaluations
    }

    pub fn live_count(&self) -> usize {
        live_count(&self.board)
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn into_renderer(self) -> R {
        self.renderer
    }
}

/// Pure transition: the next generation of `board`.
pub fn next_generation(board: &Grid<CellState>) -> Grid<CellState> {
    compute_next(board).0
}

pub fn live_count(board: &Grid<CellState>) -> usize {
    board.data.iter().filter(|c| c.is_alive()).count()
}

// Every cell reads only the frozen `board`, so rows are filled in parallel
// into a fresh grid that is handed back once all rows are done.
fn compute_next(board: &Grid<CellState>) -> (Grid<CellState>, u64) {
    let w = board.w;
    let h = board.h;
    let mut next = Grid::<CellState>::new(w, h);
    if w == 0 || h == 0 {
        return (next, 0);
    }

    let evaluated: usize = next
        .data
        .par_chunks_mut(w)
        .enumerate()
        .map(|(row, out)| {
            for (col, cell) in out.iter_mut().enumerate() {
                let window = Window::for_cell(row, col, h - 1, w - 1);
                *cell = evaluate(window.extract(board), window.local_row, window.local_col);
            }
            out.len()
        })
        .sum();

    (next, evaluated as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(rows: &[&[u8]], notify: bool) -> SimConfig {
        SimConfig {
            notify_on_construct: notify,
            initial_board: rows
                .iter()
                .map(|r| r.iter().map(|&v| v as f64).collect())
                .collect(),
        }
    }

    fn as_u8(board: &Grid<CellState>) -> Vec<Vec<u8>> {
        board
            .rows()
            .map(|r| r.iter().map(|&c| u8::from(c)).collect())
            .collect()
    }

    #[derive(Default)]
    struct Recorder {
        steps: Vec<usize>,
        snapshots: Vec<Grid<CellState>>,
    }

    impl Renderer for Recorder {
        fn on_generation(&mut self, board: &Grid<CellState>, step: usize) {
            self.steps.push(step);
            self.snapshots.push(board.clone());
        }
    }

    #[test]
    fn construction_keeps_board_and_notifies_once() {
        let mut rows = vec![vec![0u8; 7]; 5];
        rows[3][4] = 1;
        let rows: Vec<&[u8]> = rows.iter().map(Vec::as_slice).collect();
        let engine = Engine::new(config(&rows, true), Recorder::default()).unwrap();

        assert_eq!(engine.board().h, 5);
        assert_eq!(engine.board().w, 7);
        assert_eq!(engine.board().get(3, 4), CellState::Alive);
        assert_eq!(engine.generation(), 0);
        assert_eq!(engine.renderer().steps, vec![0]);
    }

    #[test]
    fn construction_without_notification() {
        let engine = Engine::new(config(&[&[0, 1]], false), Recorder::default()).unwrap();
        assert!(engine.renderer().steps.is_empty());
    }

    #[test]
    fn invalid_board_never_reaches_renderer() {
        let mut calls = 0;
        let cfg = SimConfig {
            notify_on_construct: true,
            initial_board: vec![vec![0.0, 6.0]],
        };
        let result = Engine::new(cfg, |_: &Grid<CellState>, _: usize| calls += 1);
        assert!(matches!(result, Err(ValidationError::ValueTooHigh { .. })));
        drop(result);
        assert_eq!(calls, 0);
    }

    #[test]
    fn advance_counts_evaluations_and_notifications() {
        let (h, w, n) = (2, 4, 2);
        let rows = vec![vec![0u8; w]; h];
        let rows: Vec<&[u8]> = rows.iter().map(Vec::as_slice).collect();
        let mut engine = Engine::new(config(&rows, true), Recorder::default()).unwrap();

        engine.advance(n);

        assert_eq!(engine.evaluations(), (n * h * w) as u64);
        assert_eq!(engine.generation(), n);
        assert_eq!(engine.renderer().steps, vec![0, 1, 2]);
    }

    #[test]
    fn zero_step_advance_is_noop() {
        let mut engine =
            Engine::new(config(&[&[0, 1, 0], &[0, 1, 0]], true), Recorder::default()).unwrap();
        let before = engine.board().clone();

        engine.advance(0);

        assert_eq!(engine.board(), &before);
        assert_eq!(engine.generation(), 0);
        assert_eq!(engine.evaluations(), 0);
        assert_eq!(engine.renderer().steps, vec![0]);
    }

    #[test]
    fn block_is_still_life() {
        let block: &[&[u8]] = &[&[1, 1, 0], &[1, 1, 0], &[0, 0, 0]];
        let mut engine = Engine::new(config(block, false), NoRender).unwrap();
        for _ in 0..5 {
            engine.step();
            assert_eq!(as_u8(engine.board()), vec![vec![1, 1, 0], vec![1, 1, 0], vec![0, 0, 0]]);
        }
    }

    #[test]
    fn blinker_has_period_two() {
        let start: &[&[u8]] = &[
            &[0, 0, 0, 0, 0],
            &[0, 0, 0, 0, 0],
            &[0, 1, 1, 1, 0],
            &[0, 0, 0, 0, 0],
            &[0, 0, 0, 0, 0],
        ];
        let mut engine = Engine::new(config(start, true), Recorder::default()).unwrap();

        engine.step();
        assert_eq!(
            as_u8(engine.board()),
            vec![
                vec![0, 0, 0, 0, 0],
                vec![0, 0, 1, 0, 0],
                vec![0, 0, 1, 0, 0],
                vec![0, 0, 1, 0, 0],
                vec![0, 0, 0, 0, 0],
            ]
        );
        engine.step();

        let snapshots = &engine.renderer().snapshots;
        assert_eq!(snapshots[0], snapshots[2]);
        assert_ne!(snapshots[0], snapshots[1]);
    }

    #[test]
    fn blinker_against_edge_is_clamped() {
        // Blinker filling a 3x3 board: every window touches an edge.
        let start: &[&[u8]] = &[&[0, 1, 0], &[0, 1, 0], &[0, 1, 0]];
        let mut engine = Engine::new(config(start, false), NoRender).unwrap();
        engine.step();
        assert_eq!(as_u8(engine.board()), vec![vec![0, 0, 0], vec![1, 1, 1], vec![0, 0, 0]]);
    }

    #[test]
    fn degenerate_sizes() {
        let mut lone = Engine::new(config(&[&[1]], false), NoRender).unwrap();
        lone.step();
        assert_eq!(lone.live_count(), 0);

        let mut line = Engine::new(config(&[&[1, 1, 1]], false), NoRender).unwrap();
        line.step();
        assert_eq!(as_u8(line.board()), vec![vec![0, 1, 0]]);

        let mut column = Engine::new(config(&[&[1], &[1], &[1]], false), NoRender).unwrap();
        column.step();
        assert_eq!(as_u8(column.board()), vec![vec![0], vec![1], vec![0]]);

        let empty = Engine::from_board(Grid::new(0, 3), true, NoRender);
        assert!(matches!(empty, Err(ValidationError::EmptyBoard)));
    }

    #[test]
    fn step_returns_new_board() {
        let mut engine = Engine::new(config(&[&[1, 1], &[1, 0]], false), NoRender).unwrap();
        let next = engine.step().clone();
        assert_eq!(as_u8(&next), vec![vec![1, 1], vec![1, 1]]);
        assert_eq!(&next, engine.board());
    }

    #[test]
    fn two_row_board_evaluates_own_cell() {
        // Row 1 must read its own cell, not the one above it.
        let mut engine = Engine::new(config(&[&[1, 1, 1], &[0, 0, 0]], false), NoRender).unwrap();
        engine.step();
        assert_eq!(as_u8(engine.board()), vec![vec![0, 1, 0], vec![0, 1, 0]]);

        let mut engine = Engine::new(config(&[&[1, 0], &[1, 0], &[1, 0]], false), NoRender).unwrap();
        engine.step();
        assert_eq!(as_u8(engine.board()), vec![vec![0, 0], vec![1, 1], vec![0, 0]]);
    }

    #[test]
    fn next_generation_matches_sequential_reference() {
        let board = crate::patterns::random_soup(23, 17, 0.4, 7);
        let next = next_generation(&board);
        for row in 0..board.h {
            for col in 0..board.w {
                let mut n = 0;
                for dr in -1i64..=1 {
                    for dc in -1i64..=1 {
                        let (r, c) = (row as i64 + dr, col as i64 + dc);
                        if (dr, dc) != (0, 0)
                            && (0..board.h as i64).contains(&r)
                            && (0..board.w as i64).contains(&c)
                            && board.get(r as usize, c as usize).is_alive()
                        {
                            n += 1;
                        }
                    }
                }
                let expected = crate::rules::next_state(board.get(row, col), n);
                assert_eq!(next.get(row, col), expected, "cell ({row}, {col})");
            }
        }
    }
}
