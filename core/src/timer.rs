use core::cell::Cell;
use core::time::Duration;
use serde::{Deserialize, Serialize};
use std::rc::Rc;
use web_time::Instant;

/// Source of the current instant for a session.
pub trait Clock {
    fn now(&self) -> Instant;
}

/// Wall clock, works natively and in the browser.
#[derive(Copy, Clone, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Clock that only moves when told to; clones share the same time.
#[derive(Clone, Debug)]
pub struct ManualClock {
    now: Rc<Cell<Instant>>,
}

impl ManualClock {
    pub fn new(start: Instant) -> Self {
        Self {
            now: Rc::new(Cell::new(start)),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }

    pub fn set(&self, now: Instant) {
        self.now.set(now);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new(Instant::now())
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.now.get()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> Instant {
        (**self).now()
    }
}

/// Timing of the rewind mechanic and the background tickers.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewindTiming {
    /// How far back a rewind reaches.
    pub window: Duration,
    pub snapshot_interval: Duration,
    /// Period of the elapsed-time counter.
    pub tick: Duration,
}

impl RewindTiming {
    pub const DEFAULT: Self = Self {
        window: Duration::from_millis(3000),
        snapshot_interval: Duration::from_millis(500),
        tick: Duration::from_secs(1),
    };

    /// Snapshots needed to cover the window, at least one.
    pub fn capacity(&self) -> usize {
        let interval = self.snapshot_interval.as_nanos().max(1);
        let slots = self.window.as_nanos().div_ceil(interval);
        usize::try_from(slots).unwrap_or(usize::MAX).max(1)
    }
}

impl Default for RewindTiming {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Fixed-period schedule that reports the ticks that fell due.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Ticker {
    period: Duration,
    next_due: Instant,
}

impl Ticker {
    pub(crate) fn start(now: Instant, period: Duration) -> Self {
        let period = period.max(Duration::from_millis(1));
        Self {
            period,
            next_due: now + period,
        }
    }

    pub(crate) fn next_due(&self) -> Instant {
        self.next_due
    }

    /// Consumes every tick due at or before `now`, oldest first.
    pub(crate) fn take_due(&mut self, now: Instant) -> DueTicks {
        let first = self.next_due;
        let count = if now < first {
            0
        } else {
            let behind = (now - first).as_nanos() / self.period.as_nanos();
            u32::try_from(behind).unwrap_or(u32::MAX - 1) + 1
        };
        if count > 0 {
            self.next_due = first + self.period * count;
        }
        DueTicks {
            next: first,
            period: self.period,
            remaining: count,
        }
    }
}

/// Instants of ticks that fell due, oldest first.
#[derive(Clone, Debug)]
pub(crate) struct DueTicks {
    next: Instant,
    period: Duration,
    remaining: u32,
}

impl DueTicks {
    pub(crate) fn pending(&self) -> u32 {
        self.remaining
    }

    /// Drops all but the newest `keep` ticks.
    pub(crate) fn newest(mut self, keep: usize) -> Self {
        let keep = u32::try_from(keep).unwrap_or(u32::MAX);
        let skip = self.remaining.saturating_sub(keep);
        self.next += self.period * skip;
        self.remaining -= skip;
        self
    }
}

impl Iterator for DueTicks {
    type Item = Instant;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let due = self.next;
        self.next += self.period;
        self.remaining -= 1;
        Some(due)
    }
}

/// The two periodic timers of a running game. Dropping them cancels them.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Timers {
    pub(crate) elapsed: Ticker,
    pub(crate) snapshot: Ticker,
}

impl Timers {
    pub(crate) fn start(now: Instant, timing: &RewindTiming) -> Self {
        Self {
            elapsed: Ticker::start(now, timing.tick),
            snapshot: Ticker::start(now, timing.snapshot_interval),
        }
    }
}
