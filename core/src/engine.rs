use web_time::Instant;

use crate::*;

/// One game at a time, from first click to win or loss, plus its timers.
///
/// Every operation first runs the timer ticks that fell due since the last
/// call, so snapshots capture the board as it was at their scheduled instant,
/// then applies the transition and returns what happened. Operations that are
/// not allowed in the current status change nothing and return no events.
pub struct GameSession<G = RandomMineGenerator, C = SystemClock> {
    state: GameState,
    timing: RewindTiming,
    generator: G,
    clock: C,
    timers: Option<Timers>,
}

impl GameSession {
    /// Session with OS-seeded mine placement and the wall clock.
    pub fn new(config: DifficultyConfig) -> Result<Self> {
        Self::with_parts(
            config,
            RewindTiming::default(),
            RandomMineGenerator::default(),
            SystemClock,
        )
    }
}

impl<G: MineGenerator, C: Clock> GameSession<G, C> {
    pub fn with_parts(
        config: DifficultyConfig,
        timing: RewindTiming,
        generator: G,
        clock: C,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            state: GameState::new(config, timing.capacity()),
            timing,
            generator,
            clock,
            timers: None,
        })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn timing(&self) -> &RewindTiming {
        &self.timing
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Whether the periodic timers are scheduled.
    pub fn timers_running(&self) -> bool {
        self.timers.is_some()
    }

    /// When the host should call [`Self::advance`] next, if at all.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers
            .as_ref()
            .map(|timers| timers.elapsed.next_due().min(timers.snapshot.next_due()))
    }

    /// Runs due timer ticks without any player action.
    pub fn advance(&mut self) -> Events {
        let mut events = Events::new();
        self.run_due_timers(self.clock.now(), &mut events);
        events
    }

    pub fn reveal_cell(&mut self, coords: Coord2) -> Result<Events> {
        let coords = self.state.board.validate_coords(coords)?;
        let now = self.clock.now();
        let mut events = Events::new();
        self.run_due_timers(now, &mut events);

        if !self.state.status.accepts_reveal() || !self.state.board[coords].is_revealable() {
            return Ok(events);
        }

        if self.state.is_first_click {
            self.start_game(coords, now, &mut events)?;
        }

        if self.state.board[coords].is_mine {
            self.hit_mine(coords, &mut events);
        } else {
            self.reveal_safe(coords, &mut events);
        }
        self.state.revealed_count = self.state.board.revealed_count();

        Ok(events)
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<Events> {
        let coords = self.state.board.validate_coords(coords)?;
        let mut events = Events::new();
        self.run_due_timers(self.clock.now(), &mut events);

        if !self.state.status.accepts_flag() || self.state.board[coords].is_revealed {
            return Ok(events);
        }

        let cell = &mut self.state.board[coords];
        cell.is_flagged = !cell.is_flagged;
        let flagged = cell.is_flagged;
        if flagged {
            self.state.flag_count += 1;
        } else {
            self.state.flag_count = self.state.flag_count.saturating_sub(1);
        }
        events.push(GameEvent::FlagToggled { coords, flagged });

        Ok(events)
    }

    /// Takes back the last few seconds after a mine hit, spending a credit.
    pub fn perform_rewind(&mut self) -> Events {
        let now = self.clock.now();
        let mut events = Events::new();
        self.run_due_timers(now, &mut events);

        if !matches!(self.state.status, GameStatus::RewindPrompt) {
            return events;
        }
        let Some(rewinds_left) = self.state.rewind_count.checked_sub(1) else {
            return events;
        };
        let Some(target) = self.state.snapshots.rewind_target(now, self.timing.window) else {
            log::debug!("No snapshot to rewind to yet");
            return events;
        };

        let age = now.saturating_duration_since(target.taken_at);
        let mut board = target.board.clone();
        let flag_count = target.flag_count;
        let revealed_count = target.revealed_count;
        if let Some(coords) = self.state.last_mine_position.take() {
            board[coords].is_danger = true;
        }

        self.state.board = board;
        self.state.flag_count = flag_count;
        self.state.revealed_count = revealed_count;
        self.state.rewind_count = rewinds_left;
        self.state.rewinds_used += 1;
        self.state.safe_click_streak = 0;
        self.state.status = GameStatus::Playing;
        log::debug!("Rewound {:?}, {} credits left", age, rewinds_left);
        events.push(GameEvent::Rewound { age, rewinds_left });

        events
    }

    /// Declines the rewind offer: the game is lost.
    pub fn skip_rewind(&mut self) -> Events {
        let mut events = Events::new();
        self.run_due_timers(self.clock.now(), &mut events);

        if !matches!(
            self.state.status,
            GameStatus::RewindPrompt | GameStatus::Playing
        ) {
            return events;
        }

        self.state.board.reveal_all_mines();
        self.state.revealed_count = self.state.board.revealed_count();
        self.state.last_mine_position = None;
        self.end_game(false, &mut events);

        events
    }

    /// Resets to a fresh board, with the given preset or the current rules.
    pub fn start_new_game(&mut self, difficulty: Option<Difficulty>) -> Events {
        let config = difficulty
            .and_then(Difficulty::preset)
            .unwrap_or(self.state.config);
        self.reset(config)
    }

    pub fn start_custom_game(&mut self, config: DifficultyConfig) -> Result<Events> {
        config.validate()?;
        Ok(self.reset(config))
    }

    fn reset(&mut self, config: DifficultyConfig) -> Events {
        self.stop_timers();
        self.state = GameState::new(config, self.timing.capacity());
        log::debug!("New {} game", config.difficulty.name());

        let mut events = Events::new();
        events.push(GameEvent::NewGame {
            difficulty: config.difficulty,
        });
        events
    }

    /// Places the mines around the first click and starts the timers.
    fn start_game(&mut self, coords: Coord2, now: Instant, events: &mut Events) -> Result<()> {
        let mine_count = self.state.config.mines;
        check_capacity(&self.state.board, mine_count, coords)?;
        let board = self
            .generator
            .place_mines(&self.state.board, mine_count, coords)?;

        self.state.board = board;
        self.state.is_first_click = false;
        self.state.status = GameStatus::Playing;
        self.timers = Some(Timers::start(now, &self.timing));
        log::debug!("Game started at {:?}", coords);
        events.push(GameEvent::Started {
            difficulty: self.state.config.difficulty,
        });
        Ok(())
    }

    fn hit_mine(&mut self, coords: Coord2, events: &mut Events) {
        self.state.board[coords].is_revealed = true;
        self.state.safe_click_streak = 0;
        let rewinds_left = self.state.rewind_count;
        events.push(GameEvent::MineHit {
            coords,
            rewinds_left,
        });

        if rewinds_left > 0 {
            self.state.status = GameStatus::RewindPrompt;
            self.state.last_mine_position = Some(coords);
            log::debug!("Mine at {:?}, offering rewind", coords);
        } else {
            self.state.board.reveal_all_mines();
            self.end_game(false, events);
        }
    }

    fn reveal_safe(&mut self, coords: Coord2, events: &mut Events) {
        let count = reveal_empty_area(&mut self.state.board, coords);
        events.push(GameEvent::Revealed {
            origin: coords,
            count,
        });

        let config = self.state.config;
        let threshold = config.safe_clicks_to_restore;
        self.state.safe_click_streak = self
            .state
            .safe_click_streak
            .saturating_add(1)
            .min(threshold);
        if self.state.safe_click_streak >= threshold
            && self.state.rewind_count < config.initial_rewinds
        {
            self.state.rewind_count += 1;
            self.state.safe_click_streak = 0;
            log::debug!("Credit restored, {} available", self.state.rewind_count);
            events.push(GameEvent::CreditRestored {
                rewinds_left: self.state.rewind_count,
            });
        }

        if check_win(&self.state.board, config.mines) {
            self.end_game(true, events);
        }
    }

    fn end_game(&mut self, won: bool, events: &mut Events) {
        if self.state.status.is_final() {
            return;
        }

        self.stop_timers();
        if won {
            self.state.status = GameStatus::Won;
            events.push(GameEvent::Won(self.state.win_record()));
        } else {
            self.state.status = GameStatus::Lost;
            events.push(GameEvent::Lost(self.state.loss_record()));
        }
        log::debug!(
            "Game ended {:?} after {}s",
            self.state.status,
            self.state.elapsed_secs
        );
    }

    fn stop_timers(&mut self) {
        if self.timers.take().is_some() {
            log::trace!("Timers stopped");
        }
    }

    /// Fires the elapsed and snapshot ticks due at or before `now`.
    ///
    /// Both are no-ops unless the game is playing. Status cannot change
    /// between two operations, so checking it once covers every due tick.
    fn run_due_timers(&mut self, now: Instant, events: &mut Events) {
        let Some(timers) = self.timers.as_mut() else {
            return;
        };
        let elapsed_ticks = timers.elapsed.take_due(now).pending();
        let snapshot_ticks = timers
            .snapshot
            .take_due(now)
            .newest(self.state.snapshots.capacity());

        if !matches!(self.state.status, GameStatus::Playing) {
            return;
        }

        if elapsed_ticks > 0 {
            self.state.elapsed_secs = self.state.elapsed_secs.saturating_add(elapsed_ticks);
            events.push(GameEvent::Tick {
                elapsed_secs: self.state.elapsed_secs,
            });
        }

        for taken_at in snapshot_ticks {
            self.state.snapshots.push(Snapshot {
                board: self.state.board.clone(),
                taken_at,
                flag_count: self.state.flag_count,
                revealed_count: self.state.revealed_count,
            });
        }
    }
}
