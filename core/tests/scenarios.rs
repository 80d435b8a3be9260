use core::time::Duration;

use rewindsweeper_core::*;

const MS: Duration = Duration::from_millis(1);

type FixedSession = GameSession<FixedMineGenerator, ManualClock>;

fn fixed_session(config: DifficultyConfig, mines: &[Coord2]) -> (FixedSession, ManualClock) {
    let clock = ManualClock::default();
    let session = GameSession::with_parts(
        config,
        RewindTiming::default(),
        FixedMineGenerator::new(mines.iter().copied()),
        clock.clone(),
    )
    .unwrap();
    (session, clock)
}

/// Single row where most safe cells touch a mine, so each reveal opens one cell.
fn striped_row(rewinds: u8, safe_clicks: u8) -> (FixedSession, ManualClock) {
    let config = DifficultyConfig::custom((1, 12), 3, rewinds, safe_clicks).unwrap();
    fixed_session(config, &[(0, 3), (0, 6), (0, 9)])
}

fn mines_near(board: &Board, center: Coord2) -> usize {
    NeighborIter::with_center(center, board.size())
        .filter(|&coords| board[coords].is_mine)
        .count()
}

#[test]
fn easy_first_click_is_safe_then_mine_prompts() {
    let mines = [
        (0, 5),
        (0, 6),
        (0, 7),
        (3, 3),
        (3, 4),
        (4, 3),
        (4, 4),
        (6, 6),
        (6, 7),
        (7, 6),
    ];
    let (mut game, _) = fixed_session(DifficultyConfig::EASY, &mines);

    let events = game.reveal_cell((0, 0)).unwrap();
    let state = game.state();

    assert_eq!(
        events[0],
        GameEvent::Started {
            difficulty: Difficulty::Easy
        }
    );
    assert_eq!(state.status(), GameStatus::Playing);
    assert_eq!(state.board().mine_count(), 10);
    assert_eq!(mines_near(state.board(), (0, 0)), 0);
    assert!(state.board()[(0, 0)].is_revealed);
    // boxed in by mines, out of reach of the cascade
    assert!(!state.board()[(7, 7)].is_revealed);

    let events = game.reveal_cell((3, 3)).unwrap();
    let state = game.state();

    assert_eq!(state.status(), GameStatus::RewindPrompt);
    assert_eq!(state.rewind_count(), 5);
    assert_eq!(state.last_mine_position(), Some((3, 3)));
    assert_eq!(
        events.as_slice(),
        &[GameEvent::MineHit {
            coords: (3, 3),
            rewinds_left: 5
        }]
    );
}

#[test]
fn random_boards_keep_first_click_clear() {
    for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
        let config = difficulty.preset().unwrap();
        let (rows, cols) = config.size();
        for seed in 0..32 {
            for click in [(0, 0), (rows / 2, cols / 2), (rows - 1, cols - 1)] {
                let mut game = GameSession::with_parts(
                    config,
                    RewindTiming::default(),
                    RandomMineGenerator::from_seed(seed),
                    ManualClock::default(),
                )
                .unwrap();

                game.reveal_cell(click).unwrap();
                let board = game.state().board();

                assert_eq!(board.mine_count(), config.mines);
                assert_eq!(mines_near(board, click), 0);
                assert_ne!(game.state().status(), GameStatus::RewindPrompt);
            }
        }
    }
}

#[test]
fn out_of_credits_loses_and_shows_every_mine() {
    let config = DifficultyConfig::custom((2, 6), 2, 1, 3).unwrap();
    let (mut game, clock) = fixed_session(config, &[(0, 4), (1, 5)]);
    game.reveal_cell((0, 0)).unwrap();
    clock.advance(MS * 600);
    game.reveal_cell((0, 4)).unwrap();
    game.perform_rewind();
    assert_eq!(game.state().rewind_count(), 0);

    let events = game.reveal_cell((0, 4)).unwrap();
    let state = game.state();

    assert_eq!(state.status(), GameStatus::Lost);
    assert!(state.board()[(0, 4)].is_revealed);
    assert!(state.board()[(1, 5)].is_revealed);
    assert!(!game.timers_running());
    assert_eq!(
        events.as_slice(),
        &[
            GameEvent::MineHit {
                coords: (0, 4),
                rewinds_left: 0
            },
            GameEvent::Lost(LossRecord {
                difficulty: Difficulty::Custom,
                rewinds_used: 1
            }),
        ]
    );
}

#[test]
fn four_safe_reveals_restore_a_credit() {
    let (mut game, clock) = striped_row(2, 4);
    game.reveal_cell((0, 0)).unwrap();
    clock.advance(MS * 600);
    game.reveal_cell((0, 3)).unwrap();
    assert_eq!(game.state().safe_click_streak(), 0);
    game.perform_rewind();
    assert_eq!(game.state().rewind_count(), 1);

    for (step, coords) in [(0, 4), (0, 5), (0, 7)].into_iter().enumerate() {
        let events = game.reveal_cell(coords).unwrap();
        assert_eq!(
            events.as_slice(),
            &[GameEvent::Revealed {
                origin: coords,
                count: 1
            }]
        );
        assert_eq!(usize::from(game.state().safe_click_streak()), step + 1);
    }

    let events = game.reveal_cell((0, 8)).unwrap();
    let state = game.state();

    assert_eq!(state.rewind_count(), 2);
    assert_eq!(state.safe_click_streak(), 0);
    assert_eq!(state.status(), GameStatus::Playing);
    assert_eq!(
        events.last(),
        Some(&GameEvent::CreditRestored { rewinds_left: 2 })
    );
}

#[test]
fn streak_stops_at_threshold_with_full_credits() {
    let (mut game, _) = striped_row(2, 4);

    for coords in [(0, 0), (0, 4), (0, 5), (0, 7), (0, 8)] {
        let events = game.reveal_cell(coords).unwrap();
        assert!(
            !events
                .iter()
                .any(|event| matches!(event, GameEvent::CreditRestored { .. }))
        );
    }

    assert_eq!(game.state().safe_click_streak(), 4);
    assert_eq!(game.state().rewind_count(), 2);
}

#[test]
fn rewind_goes_back_three_seconds_and_marks_danger() {
    let (mut game, clock) = striped_row(2, 4);
    let start = clock.now();
    game.reveal_cell((0, 0)).unwrap();
    clock.set(start + MS * 1200);
    game.reveal_cell((0, 4)).unwrap();
    clock.set(start + MS * 3999);
    game.reveal_cell((0, 3)).unwrap();

    let snapshots = game.state().snapshots();
    assert_eq!(snapshots.len(), 6);
    assert_eq!(snapshots.oldest().unwrap().taken_at, start + MS * 1000);
    assert_eq!(snapshots.newest().unwrap().taken_at, start + MS * 3500);

    clock.set(start + MS * 4000);
    let events = game.perform_rewind();
    let state = game.state();

    assert_eq!(
        events.as_slice(),
        &[GameEvent::Rewound {
            age: MS * 3000,
            rewinds_left: 1
        }]
    );
    assert_eq!(state.status(), GameStatus::Playing);
    assert_eq!(state.rewinds_used(), 1);
    // taken before the reveal at 1.2s
    assert!(!state.board()[(0, 4)].is_revealed);
    assert_eq!(state.revealed_count(), 3);
    let exploded = &state.board()[(0, 3)];
    assert!(exploded.is_danger);
    assert!(!exploded.is_revealed);
    assert!(exploded.is_mine);
}

#[test]
fn rewind_then_win_reports_rewinds_used() {
    let (mut game, clock) = striped_row(1, 4);
    game.reveal_cell((0, 0)).unwrap();
    clock.advance(MS * 600);
    game.reveal_cell((0, 3)).unwrap();
    game.perform_rewind();

    for coords in [(0, 4), (0, 5), (0, 7), (0, 8)] {
        game.reveal_cell(coords).unwrap();
    }
    // the four safe reveals earned the spent credit back
    assert_eq!(game.state().rewind_count(), 1);
    let events = game.reveal_cell((0, 11)).unwrap();

    assert_eq!(game.state().status(), GameStatus::Won);
    assert_eq!(
        events.last(),
        Some(&GameEvent::Won(WinRecord {
            difficulty: Difficulty::Custom,
            elapsed_secs: 0,
            rewinds_used: 1
        }))
    );
}

#[test]
fn finished_games_feed_stats() {
    let mut recorder = StatsRecorder::open(MemoryStatsStore::default());
    let (mut game, clock) = striped_row(1, 4);

    let mut observe = |events: Events| recorder.observe(&events);
    observe(game.reveal_cell((0, 0)).unwrap());
    clock.advance(MS * 600);
    observe(game.reveal_cell((0, 3)).unwrap());
    observe(game.skip_rewind());
    observe(game.start_new_game(None));

    let stats = recorder.stats();
    assert_eq!(stats.total_games, 1);
    assert_eq!(stats.losses, 1);
    assert_eq!(stats.win_rate(), 0);
    assert!(recorder.store().contents().is_some());
}
