use super::*;

/// Places a scripted set of mines, for replays and deterministic tests.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FixedMineGenerator {
    mines: Vec<Coord2>,
}

impl FixedMineGenerator {
    pub fn new(mines: impl IntoIterator<Item = Coord2>) -> Self {
        let mut mines: Vec<_> = mines.into_iter().collect();
        mines.sort_unstable();
        mines.dedup();
        Self { mines }
    }

    pub fn mines(&self) -> &[Coord2] {
        &self.mines
    }
}

impl MineGenerator for FixedMineGenerator {
    fn place_mines(
        &mut self,
        board: &Board,
        mine_count: CellCount,
        safe: Coord2,
    ) -> Result<Board> {
        check_capacity(board, mine_count, safe)?;

        if self.mines.len() != usize::from(mine_count) {
            log::warn!(
                "Scripted layout has {} mines, game expects {}",
                self.mines.len(),
                mine_count
            );
            return Err(GameError::InvalidLayout);
        }

        let mut placed = board.clone();
        for &coords in &self.mines {
            if !board.contains(coords) || in_safe_zone(coords, safe) || board[coords].is_mine {
                return Err(GameError::InvalidLayout);
            }
            placed[coords].is_mine = true;
        }
        placed.recompute_adjacency();
        Ok(placed)
    }
}
