use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Two-state cell. Numerically 0 (dead) or 1 (alive).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum CellState {
    #[default]
    Dead,
    Alive,
}

impl CellState {
    #[inline]
    pub fn is_alive(self) -> bool {
        self == CellState::Alive
    }

    #[inline]
    pub fn from_alive(alive: bool) -> Self {
        if alive {
            CellState::Alive
        } else {
            CellState::Dead
        }
    }
}

impl From<CellState> for u8 {
    fn from(cell: CellState) -> u8 {
        match cell {
            CellState::Dead => 0,
            CellState::Alive => 1,
        }
    }
}

/// A numeric cell outside `{0, 1}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("cell value must be 0 or 1, got {0}")]
pub struct InvalidCell(pub u8);

impl TryFrom<u8> for CellState {
    type Error = InvalidCell;

    fn try_from(v: u8) -> Result<Self, Self::Error> {
        match v {
            0 => Ok(CellState::Dead),
            1 => Ok(CellState::Alive),
            other => Err(InvalidCell(other)),
        }
    }
}
