use std::collections::VecDeque;

use crate::*;

/// Reveals `origin` and flood-fills outwards through zero-count cells.
///
/// Flagged and already revealed cells are skipped and do not propagate, so
/// every cell is revealed at most once. A numbered origin reveals only itself.
/// Returns how many cells were newly revealed.
pub fn reveal_empty_area(board: &mut Board, origin: Coord2) -> CellCount {
    let mut opened: CellCount = 0;
    let mut to_visit = VecDeque::from([origin]);

    while let Some(coords) = to_visit.pop_front() {
        let Some(cell) = board.get(coords) else {
            continue;
        };
        if cell.is_revealed || cell.is_flagged {
            continue;
        }

        let cell = &mut board[coords];
        cell.is_revealed = true;
        opened += 1;

        if !cell.is_mine && cell.adjacent_mines == 0 {
            to_visit.extend(
                board
                    .iter_neighbors(coords)
                    .filter(|&pos| board[pos].is_revealable()),
            );
            log::trace!("Flood from {:?}, queue {}", coords, to_visit.len());
        }
    }

    log::debug!("Revealed {} cells from {:?}", opened, origin);
    opened
}

/// Every non-mine cell has been revealed. Flags play no part.
pub fn check_win(board: &Board, mine_count: CellCount) -> bool {
    board.revealed_count() == board.total_cells().saturating_sub(mine_count)
}
