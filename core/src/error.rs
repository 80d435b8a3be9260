use thiserror::Error;

use crate::CellCount;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Board dimensions must be non-zero")]
    InvalidDimensions,
    #[error("Too many mines, requested {mines} but only {available} cells lie outside the safe zone")]
    TooManyMines {
        mines: CellCount,
        available: CellCount,
    },
    #[error("Mine layout does not match the board")]
    InvalidLayout,
    #[error("Rewind rules must grant at least one credit and need at least one safe click")]
    InvalidRules,
}

pub type Result<T> = core::result::Result<T, GameError>;

#[derive(Error, Debug)]
pub enum StatsError {
    #[error("Could not encode or decode stats")]
    Codec(#[from] serde_json::Error),
    #[error("Stats storage failed: {0}")]
    Storage(String),
}
