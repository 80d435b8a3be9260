use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::*;

/// Lifetime counters across games. Persisted by the host, see [`StatsStore`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GameStats {
    pub total_games: u32,
    pub wins: u32,
    pub losses: u32,
    /// Fastest win in seconds per tier; `None` (stored as `null`) until won.
    pub best_times: BTreeMap<Difficulty, Option<u32>>,
    pub total_rewinds_used: u32,
    pub longest_win_streak: u32,
    pub current_win_streak: u32,
}

impl GameStats {
    pub fn record_win(&mut self, difficulty: Difficulty, elapsed_secs: u32, rewinds_used: u32) {
        self.total_games += 1;
        self.wins += 1;
        let best = self.best_times.entry(difficulty).or_default();
        *best = Some(best.map_or(elapsed_secs, |prev| prev.min(elapsed_secs)));
        self.total_rewinds_used += rewinds_used;
        self.current_win_streak += 1;
        self.longest_win_streak = self.longest_win_streak.max(self.current_win_streak);
    }

    pub fn record_loss(&mut self, rewinds_used: u32) {
        self.total_games += 1;
        self.losses += 1;
        self.total_rewinds_used += rewinds_used;
        self.current_win_streak = 0;
    }

    /// Folds a session event in; returns whether anything changed.
    pub fn apply(&mut self, event: &GameEvent) -> bool {
        match *event {
            GameEvent::Won(record) => {
                self.record_win(record.difficulty, record.elapsed_secs, record.rewinds_used);
                true
            }
            GameEvent::Lost(record) => {
                self.record_loss(record.rewinds_used);
                true
            }
            _ => false,
        }
    }

    pub fn best_time(&self, difficulty: Difficulty) -> Option<u32> {
        self.best_times.get(&difficulty).copied().flatten()
    }

    /// Percentage of games won, rounded; zero before the first game.
    pub fn win_rate(&self) -> u32 {
        if self.total_games == 0 {
            return 0;
        }
        let rate = f64::from(self.wins) * 100.0 / f64::from(self.total_games);
        rate.round() as u32
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn to_json(&self) -> core::result::Result<String, StatsError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decodes stored stats; fields missing from older data take defaults.
    pub fn from_json(json: &str) -> core::result::Result<Self, StatsError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Where encoded stats live between sessions, e.g. browser local storage.
pub trait StatsStore {
    fn load(&self) -> core::result::Result<Option<String>, StatsError>;
    fn save(&mut self, encoded: &str) -> core::result::Result<(), StatsError>;
}

/// Keeps stats in memory only.
#[derive(Clone, Debug, Default)]
pub struct MemoryStatsStore {
    slot: Option<String>,
}

impl MemoryStatsStore {
    pub fn contents(&self) -> Option<&str> {
        self.slot.as_deref()
    }
}

impl StatsStore for MemoryStatsStore {
    fn load(&self) -> core::result::Result<Option<String>, StatsError> {
        Ok(self.slot.clone())
    }

    fn save(&mut self, encoded: &str) -> core::result::Result<(), StatsError> {
        self.slot = Some(encoded.to_owned());
        Ok(())
    }
}

/// Keeps [`GameStats`] in sync with a store while games finish.
///
/// Storage failures never reach gameplay: they are logged and the in-memory
/// stats stay authoritative.
#[derive(Debug)]
pub struct StatsRecorder<S> {
    stats: GameStats,
    store: S,
}

impl<S: StatsStore> StatsRecorder<S> {
    /// Loads saved stats, starting from zero if there are none or they are unreadable.
    pub fn open(store: S) -> Self {
        let loaded = store
            .load()
            .and_then(|saved| saved.as_deref().map(GameStats::from_json).transpose());
        let stats = match loaded {
            Ok(stats) => stats.unwrap_or_default(),
            Err(err) => {
                log::error!("Could not load game stats: {}", err);
                GameStats::default()
            }
        };
        Self { stats, store }
    }

    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Records finished games found in `events`.
    pub fn observe(&mut self, events: &[GameEvent]) {
        let mut changed = false;
        for event in events {
            changed |= self.stats.apply(event);
        }
        if changed {
            self.persist();
        }
    }

    pub fn reset(&mut self) {
        self.stats.reset();
        self.persist();
    }

    fn persist(&mut self) {
        let saved = self
            .stats
            .to_json()
            .and_then(|json| self.store.save(&json));
        if let Err(err) = saved {
            log::error!("Could not save game stats: {}", err);
        }
    }
}
