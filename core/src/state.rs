use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - Idle -> Playing
/// - Playing -> RewindPrompt
/// - Playing -> Won
/// - Playing -> Lost
/// - RewindPrompt -> Playing
/// - RewindPrompt -> Lost
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GameStatus {
    /// Waiting for the first click, no mines yet
    Idle,
    Playing,
    /// A mine was hit and a rewind decision is pending
    RewindPrompt,
    Won,
    Lost,
}

impl GameStatus {
    pub const fn is_final(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }

    /// Reveals are accepted.
    pub const fn accepts_reveal(self) -> bool {
        matches!(self, Self::Idle | Self::Playing)
    }

    /// Flags can be toggled.
    pub const fn accepts_flag(self) -> bool {
        matches!(self, Self::Idle | Self::Playing)
    }
}

impl Default for GameStatus {
    fn default() -> Self {
        Self::Idle
    }
}

/// Everything the host needs to render a game. Only the session mutates it.
#[derive(Clone, Debug)]
pub struct GameState {
    pub(crate) board: Board,
    pub(crate) status: GameStatus,
    pub(crate) config: DifficultyConfig,
    pub(crate) flag_count: CellCount,
    pub(crate) revealed_count: CellCount,
    pub(crate) rewind_count: u8,
    pub(crate) rewinds_used: u32,
    pub(crate) safe_click_streak: u8,
    pub(crate) elapsed_secs: u32,
    pub(crate) is_first_click: bool,
    pub(crate) last_mine_position: Option<Coord2>,
    pub(crate) snapshots: SnapshotStore,
}

impl GameState {
    /// Fresh idle state; `config` must already be validated.
    pub(crate) fn new(config: DifficultyConfig, snapshot_capacity: usize) -> Self {
        Self {
            board: Board::blank(config.size()),
            status: GameStatus::Idle,
            config,
            flag_count: 0,
            revealed_count: 0,
            rewind_count: config.initial_rewinds,
            rewinds_used: 0,
            safe_click_streak: 0,
            elapsed_secs: 0,
            is_first_click: true,
            last_mine_position: None,
            snapshots: SnapshotStore::new(snapshot_capacity),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn config(&self) -> &DifficultyConfig {
        &self.config
    }

    pub fn difficulty(&self) -> Difficulty {
        self.config.difficulty
    }

    pub fn mine_count(&self) -> CellCount {
        self.config.mines
    }

    pub fn flag_count(&self) -> CellCount {
        self.flag_count
    }

    /// Mines not yet accounted for by a flag; negative when over-flagged.
    pub fn mines_left(&self) -> i32 {
        i32::from(self.config.mines) - i32::from(self.flag_count)
    }

    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count
    }

    /// Remaining rewind credits.
    pub fn rewind_count(&self) -> u8 {
        self.rewind_count
    }

    /// Rewinds performed in this game.
    pub fn rewinds_used(&self) -> u32 {
        self.rewinds_used
    }

    pub fn safe_click_streak(&self) -> u8 {
        self.safe_click_streak
    }

    pub fn elapsed_secs(&self) -> u32 {
        self.elapsed_secs
    }

    pub fn is_first_click(&self) -> bool {
        self.is_first_click
    }

    /// The mine awaiting a rewind decision.
    pub fn last_mine_position(&self) -> Option<Coord2> {
        self.last_mine_position
    }

    pub fn snapshots(&self) -> &SnapshotStore {
        &self.snapshots
    }

    pub fn cell_at(&self, coords: Coord2) -> Option<&Cell> {
        self.board.get(coords)
    }

    pub(crate) fn win_record(&self) -> WinRecord {
        WinRecord {
            difficulty: self.config.difficulty,
            elapsed_secs: self.elapsed_secs,
            rewinds_used: self.rewinds_used,
        }
    }

    pub(crate) fn loss_record(&self) -> LossRecord {
        LossRecord {
            difficulty: self.config.difficulty,
            rewinds_used: self.rewinds_used,
        }
    }
}
