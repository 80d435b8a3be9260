use serde::{Deserialize, Serialize};

use crate::Coord2;

/// One square of the board as seen by both the engine and the host.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub coords: Coord2,
    pub is_mine: bool,
    pub is_revealed: bool,
    pub is_flagged: bool,
    /// Set on the mine that forced a rewind, so the host can warn about it.
    pub is_danger: bool,
    pub adjacent_mines: u8,
}

impl Cell {
    pub const fn new(coords: Coord2) -> Self {
        Self {
            coords,
            is_mine: false,
            is_revealed: false,
            is_flagged: false,
            is_danger: false,
            adjacent_mines: 0,
        }
    }

    /// A reveal on this cell would do something.
    pub const fn is_revealable(&self) -> bool {
        !self.is_revealed && !self.is_flagged
    }
}
