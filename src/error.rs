//! Error types for board ingestion.

use thiserror::Error;

/// Rejection of a raw board at the ingestion boundary.
///
/// Value checks report the first offending cell in row-major order.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A cell holds a number with a fractional part (or NaN/infinity).
    #[error("initial board elements are not all integers: {value} at ({row}, {col})")]
    NonIntegerValue { row: usize, col: usize, value: f64 },

    /// A cell holds an integer greater than 1.
    #[error("initial board contains an integer greater than 1: {value} at ({row}, {col})")]
    ValueTooHigh { row: usize, col: usize, value: f64 },

    /// A cell holds an integer less than 0.
    #[error("initial board contains an integer less than 0: {value} at ({row}, {col})")]
    ValueTooLow { row: usize, col: usize, value: f64 },

    /// Zero rows or zero columns.
    #[error("initial board is empty")]
    EmptyBoard,

    /// Rows of differing length.
    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        found: usize,
    },
}

/// Failure to turn an external source into a validated board.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read board: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid board JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unparseable cell {token:?} on line {line}")]
    Parse { line: usize, token: String },

    #[error("unknown pattern: {0}")]
    UnknownPattern(String),

    #[error(transparent)]
    Invalid(#[from] ValidationError),
}
