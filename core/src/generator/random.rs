use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::seq::index;

use super::*;

/// Uniform placement over every cell outside the safe zone.
#[derive(Clone, Debug)]
pub struct RandomMineGenerator {
    rng: SmallRng,
}

impl RandomMineGenerator {
    /// Reproducible layouts, handy for replays and tests.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn from_os_rng() -> Self {
        Self {
            rng: SmallRng::from_os_rng(),
        }
    }
}

impl Default for RandomMineGenerator {
    fn default() -> Self {
        Self::from_os_rng()
    }
}

impl MineGenerator for RandomMineGenerator {
    fn place_mines(
        &mut self,
        board: &Board,
        mine_count: CellCount,
        safe: Coord2,
    ) -> Result<Board> {
        check_capacity(board, mine_count, safe)?;

        let candidates: Vec<Coord2> = board
            .iter()
            .map(|cell| cell.coords)
            .filter(|&coords| !in_safe_zone(coords, safe) && !board[coords].is_mine)
            .collect();
        if usize::from(mine_count) > candidates.len() {
            // only reachable when the input board was already mined
            return Err(GameError::TooManyMines {
                mines: mine_count,
                available: candidates.len() as CellCount,
            });
        }

        let mut placed = board.clone();
        // distinct indices, so this always terminates
        for i in index::sample(&mut self.rng, candidates.len(), mine_count.into()) {
            placed[candidates[i]].is_mine = true;
        }
        placed.recompute_adjacency();

        log::debug!(
            "Placed {} mines on {:?} board, safe around {:?}",
            mine_count,
            placed.size(),
            safe
        );
        Ok(placed)
    }
}
