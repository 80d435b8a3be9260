use core::time::Duration;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

/// What the statistics collaborator records for a won game.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinRecord {
    pub difficulty: Difficulty,
    pub elapsed_secs: u32,
    /// Rewinds actually performed. Credits earned back by safe clicks do not
    /// lower it, so this can exceed `initial_rewinds - rewind_count`.
    pub rewinds_used: u32,
}

/// What the statistics collaborator records for a lost game.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LossRecord {
    pub difficulty: Difficulty,
    pub rewinds_used: u32,
}

/// Notification emitted by a session transition, in the order things happened.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// First reveal placed the mines and started the timers.
    Started { difficulty: Difficulty },
    /// A safe reveal opened `count` cells starting at `origin`.
    Revealed { origin: Coord2, count: CellCount },
    FlagToggled { coords: Coord2, flagged: bool },
    /// A mine went off; `rewinds_left` > 0 means a rewind is on offer.
    MineHit { coords: Coord2, rewinds_left: u8 },
    /// Board went back to a snapshot taken `age` before the rewind.
    Rewound { age: Duration, rewinds_left: u8 },
    CreditRestored { rewinds_left: u8 },
    /// One elapsed-time tick counted.
    Tick { elapsed_secs: u32 },
    Won(WinRecord),
    Lost(LossRecord),
    NewGame { difficulty: Difficulty },
}

/// Events of one transition. Rarely more than a handful.
pub type Events = SmallVec<[GameEvent; 4]>;
