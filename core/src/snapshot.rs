use core::time::Duration;
use std::collections::VecDeque;
use web_time::Instant;

use crate::*;

/// Board state captured at one sampling tick.
#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot {
    pub board: Board,
    pub taken_at: Instant,
    pub flag_count: CellCount,
    pub revealed_count: CellCount,
}

/// Bounded, time-ordered history of recent snapshots: the rewind window.
#[derive(Clone, Debug)]
pub struct SnapshotStore {
    entries: VecDeque<Snapshot>,
    capacity: usize,
}

impl SnapshotStore {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Snapshot> {
        self.entries.iter()
    }

    pub fn oldest(&self) -> Option<&Snapshot> {
        self.entries.front()
    }

    pub fn newest(&self) -> Option<&Snapshot> {
        self.entries.back()
    }

    /// Appends, evicting the oldest entry once full.
    pub fn push(&mut self, snapshot: Snapshot) {
        debug_assert!(
            self.newest()
                .is_none_or(|last| last.taken_at <= snapshot.taken_at),
            "snapshots must be pushed in time order"
        );
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(snapshot);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// The snapshot a rewind at `now` goes back to.
    ///
    /// That is the latest one taken at or before `now - window`; when none is
    /// that old, the oldest one kept.
    pub fn rewind_target(&self, now: Instant, window: Duration) -> Option<&Snapshot> {
        let oldest = self.oldest()?;
        let Some(bound) = now.checked_sub(window) else {
            return Some(oldest);
        };
        Some(
            self.entries
                .iter()
                .rev()
                .find(|snapshot| snapshot.taken_at <= bound)
                .unwrap_or(oldest),
        )
    }
}
