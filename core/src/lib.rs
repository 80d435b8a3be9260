//! Game core for a Minesweeper variant where hitting a mine can be undone
//! by rewinding the board a few seconds.
//!
//! [`GameSession`] is the entry point: it owns the [`GameState`], places
//! mines on the first reveal, keeps rolling board snapshots and answers
//! every player action with a list of [`GameEvent`]s for the host.

pub use board::*;
pub use cell::*;
pub use difficulty::*;
pub use engine::*;
pub use error::*;
pub use event::*;
pub use generator::*;
pub use reveal::*;
pub use snapshot::*;
pub use state::*;
pub use stats::*;
pub use timer::*;
pub use types::*;

mod board;
mod cell;
mod difficulty;
mod engine;
mod error;
mod event;
mod generator;
mod reveal;
mod snapshot;
mod state;
mod stats;
mod timer;
mod types;
