use crate::*;
pub use fixed::*;
pub use random::*;

mod fixed;
mod random;

/// Places the mines of a game once the first click is known.
pub trait MineGenerator {
    /// Returns a copy of `board` holding exactly `mine_count` mines, none of
    /// them within the safe zone around `safe`, with adjacency counts filled
    /// in. `board` itself is left untouched.
    fn place_mines(
        &mut self,
        board: &Board,
        mine_count: CellCount,
        safe: Coord2,
    ) -> Result<Board>;
}

impl<G: MineGenerator + ?Sized> MineGenerator for Box<G> {
    fn place_mines(
        &mut self,
        board: &Board,
        mine_count: CellCount,
        safe: Coord2,
    ) -> Result<Board> {
        (**self).place_mines(board, mine_count, safe)
    }
}

/// Whether `coords` is in the 3x3 neighborhood centered on the first click.
pub const fn in_safe_zone(coords: Coord2, anchor: Coord2) -> bool {
    chebyshev(coords, anchor) <= 1
}

/// Cells that may receive a mine for a first click at `anchor`.
pub fn available_cells(size: Coord2, anchor: Coord2) -> CellCount {
    let zone = NeighborIter::with_center(anchor, size).count() as CellCount;
    mult(size.0, size.1) - zone
}

/// Rejects a mine count that cannot leave a cell to play outside the safe
/// zone, before any placement is attempted.
pub fn check_capacity(board: &Board, mine_count: CellCount, anchor: Coord2) -> Result<()> {
    let anchor = board.validate_coords(anchor)?;
    let available = available_cells(board.size(), anchor);
    if mine_count >= available {
        log::warn!(
            "Cannot place {} mines around {:?}, only {} cells available",
            mine_count,
            anchor,
            available
        );
        return Err(GameError::TooManyMines {
            mines: mine_count,
            available,
        });
    }
    Ok(())
}
