use crate::cell::CellState;
use crate::error::ValidationError;
use crate::grid::Grid;

/// Check a raw numeric board: rectangular, non-empty, every value 0 or 1.
///
/// Value checks are whole-board passes run in a fixed order:
/// integrality, then upper bound, then lower bound. A board holding both
/// `1.5` and `-3` reports `NonIntegerValue`.
pub fn validate(rows: &[Vec<f64>]) -> Result<(), ValidationError> {
    let width = rows.first().map_or(0, Vec::len);
    if width == 0 {
        return Err(ValidationError::EmptyBoard);
    }
    for (row, cells) in rows.iter().enumerate() {
        if cells.len() != width {
            return Err(ValidationError::RaggedRows {
                row,
                expected: width,
                found: cells.len(),
            });
        }
    }

    if let Some((row, col, value)) = find(rows, |v| !v.is_finite() || v.fract() != 0.0) {
        return Err(ValidationError::NonIntegerValue { row, col, value });
    }
    if let Some((row, col, value)) = find(rows, |v| v > 1.0) {
        return Err(ValidationError::ValueTooHigh { row, col, value });
    }
    if let Some((row, col, value)) = find(rows, |v| v < 0.0) {
        return Err(ValidationError::ValueTooLow { row, col, value });
    }
    Ok(())
}

/// Validate and convert into the typed board. The only way raw numbers
/// become cells.
pub fn ingest(rows: &[Vec<f64>]) -> Result<Grid<CellState>, ValidationError> {
    validate(rows)?;
    let typed: Vec<Vec<CellState>> = rows
        .iter()
        .map(|r| r.iter().map(|&v| CellState::from_alive(v == 1.0)).collect())
        .collect();
    Ok(Grid::from_rows(&typed))
}

fn find(rows: &[Vec<f64>], bad: impl Fn(f64) -> bool) -> Option<(usize, usize, f64)> {
    rows.iter().enumerate().find_map(|(r, cells)| {
        cells
            .iter()
            .position(|&v| bad(v))
            .map(|c| (r, c, cells[c]))
    })
}
