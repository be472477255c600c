use maze_runner_core::{
    CellCoord, Direction, Event, GameOverCause, Grid, LayoutError, LevelLayout, LevelStatus,
    TileCategory, TileRegistry,
};
use maze_runner_session::{Config, Session, SessionError};
use maze_runner_system_generation::{
    ConnectivityRepair, FallbackPolicy, GenerationError, GeneratorTuning,
};
use maze_runner_system_progression as progression;
use maze_runner_system_scoring::ScoreTuning;

fn manual_session() -> Session {
    Session::new(Config::new(17).with_progression(progression::Config::new(false, false)))
}

fn five_by_five(level: u32, tiles: TileRegistry, time_limit: u32) -> LevelLayout {
    LevelLayout::new(
        level,
        Grid::new(5, 5),
        tiles,
        CellCoord::new(0, 0),
        CellCoord::new(4, 4),
        time_limit,
    )
}

fn walk(session: &mut Session, steps: &[(Direction, usize)]) -> Vec<Event> {
    let mut events = Vec::new();
    for (direction, count) in steps {
        for _ in 0..*count {
            events.extend(session.move_player(*direction).expect("move"));
        }
    }
    events
}

const RIGHT_THEN_DOWN: [(Direction, usize); 2] = [(Direction::East, 4), (Direction::South, 4)];

#[test]
fn generated_level_starts_fresh() {
    let mut session = Session::new(Config::new(1));

    let snapshot = session.start_level(1).expect("level one");

    assert_eq!(snapshot.level, 1);
    assert_eq!(snapshot.player, CellCoord::new(0, 0));
    assert_eq!(snapshot.visited, vec![CellCoord::new(0, 0)]);
    assert_eq!(snapshot.moves, 0);
    assert!(!snapshot.has_key);
    assert_eq!(snapshot.time_limit, 90);
    assert_eq!(snapshot.time_remaining, 90);
    assert_eq!(snapshot.status, LevelStatus::InProgress);
    assert_eq!(session.total_score(), 0);
    assert_eq!(session.welcome_banner(), maze_runner_core::WELCOME_BANNER);
}

#[test]
fn straight_walk_completes_open_level() {
    let mut session = manual_session();
    let _ = session
        .load_layout(five_by_five(1, TileRegistry::new(), 60))
        .expect("layout loads");

    let events = walk(&mut session, &RIGHT_THEN_DOWN);

    assert_eq!(
        events.last(),
        Some(&Event::LevelCompleted {
            level: 1,
            time_remaining: 60,
        })
    );
    assert_eq!(session.status(), LevelStatus::Completed);
    assert_eq!(session.moves(), 8);
    assert_eq!(session.total_score(), 700);
}

#[test]
fn lock_on_route_opens_with_collected_key() {
    let mut tiles = TileRegistry::new();
    tiles.push(TileCategory::Key, CellCoord::new(1, 0));
    tiles.push(TileCategory::Lock, CellCoord::new(4, 2));
    let mut session = manual_session();
    let _ = session
        .load_layout(five_by_five(1, tiles, 60))
        .expect("layout loads");

    let events = walk(&mut session, &RIGHT_THEN_DOWN);

    assert!(events.contains(&Event::KeyCollected {
        cell: CellCoord::new(1, 0)
    }));
    assert!(events.contains(&Event::LockOpened {
        cell: CellCoord::new(4, 2)
    }));
    assert_eq!(session.status(), LevelStatus::Completed);
    assert!(!session.has_key());
}

#[test]
fn goal_stays_closed_while_a_lock_remains() {
    let mut tiles = TileRegistry::new();
    tiles.push(TileCategory::Key, CellCoord::new(1, 0));
    tiles.push(TileCategory::Lock, CellCoord::new(2, 2));
    let mut session = manual_session();
    let _ = session
        .load_layout(five_by_five(1, tiles, 60))
        .expect("layout loads");

    let _ = walk(&mut session, &RIGHT_THEN_DOWN);
    assert_eq!(session.status(), LevelStatus::InProgress);
    assert!(session.has_key());

    let detour = walk(
        &mut session,
        &[
            (Direction::West, 2),
            (Direction::North, 2),
            (Direction::South, 2),
            (Direction::East, 2),
        ],
    );

    assert!(detour.contains(&Event::LockOpened {
        cell: CellCoord::new(2, 2)
    }));
    assert_eq!(session.status(), LevelStatus::Completed);
    assert_eq!(session.moves(), 16);
}

#[test]
fn scores_accumulate_across_levels() {
    let mut session = manual_session();
    let _ = session
        .load_layout(five_by_five(1, TileRegistry::new(), 12))
        .expect("level one");
    let _ = session.tick().expect("tick");
    let _ = session.tick().expect("tick");
    let _ = walk(&mut session, &RIGHT_THEN_DOWN);
    assert_eq!(session.total_score(), 200);

    let _ = session
        .load_layout(five_by_five(2, TileRegistry::new(), 5))
        .expect("level two");
    let _ = walk(&mut session, &RIGHT_THEN_DOWN);

    assert_eq!(session.total_score(), 450);
    assert_eq!(session.hud().total_score, 450);
    assert_eq!(session.hud().level, 2);
}

#[test]
fn trap_ends_the_run_until_restart() {
    let mut tiles = TileRegistry::new();
    tiles.push(TileCategory::Trap, CellCoord::new(1, 0));
    let mut session = manual_session();
    let _ = session
        .load_layout(five_by_five(1, tiles, 60))
        .expect("layout loads");

    let events = session.move_player(Direction::East).expect("move");

    assert_eq!(
        events,
        vec![Event::GameOver {
            level: 1,
            cause: GameOverCause::Trap,
        }]
    );
    assert_eq!(session.status(), LevelStatus::Failed);
    assert!(session
        .move_player(Direction::South)
        .expect("ignored move")
        .is_empty());

    let snapshot = session.restart().expect("restart");
    assert_eq!(snapshot.level, 1);
    assert_eq!(snapshot.moves, 0);
    assert!(!snapshot.has_key);
    assert_eq!(snapshot.status, LevelStatus::InProgress);
    assert_eq!(session.total_score(), 0);
}

#[test]
fn countdown_expiry_is_a_game_over() {
    let mut session = manual_session();
    let _ = session
        .load_layout(five_by_five(1, TileRegistry::new(), 2))
        .expect("layout loads");

    assert_eq!(
        session.tick().expect("tick"),
        vec![Event::TimeAdvanced { remaining: 1 }]
    );
    assert_eq!(
        session.tick().expect("tick"),
        vec![
            Event::TimeAdvanced { remaining: 0 },
            Event::GameOver {
                level: 1,
                cause: GameOverCause::Time,
            },
        ]
    );
    assert!(session.tick().expect("tick").is_empty());
}

#[test]
fn automatic_progression_advances_and_restarts() {
    let mut session = Session::new(Config::new(5));
    let _ = session
        .load_layout(five_by_five(1, TileRegistry::new(), 60))
        .expect("layout loads");

    let events = walk(&mut session, &RIGHT_THEN_DOWN);

    assert!(events.contains(&Event::LevelRequested { level: 2 }));
    assert!(events
        .iter()
        .any(|event| matches!(event, Event::LevelStarted { level: 2, .. })));
    assert_eq!(session.level(), 2);
    assert_eq!(session.moves(), 0);
    assert_eq!(session.total_score(), 700);

    let mut expired = Vec::new();
    for _ in 0..120 {
        expired.extend(session.tick().expect("tick"));
    }

    assert!(expired.contains(&Event::GameOver {
        level: 2,
        cause: GameOverCause::Time,
    }));
    assert!(expired.contains(&Event::GameRestarted));
    assert_eq!(session.level(), 1);
    assert_eq!(session.total_score(), 0);
    assert_eq!(session.status(), LevelStatus::InProgress);
}

#[test]
fn restart_discards_progress() {
    let mut session = Session::new(Config::new(9));
    let _ = session
        .load_layout(five_by_five(3, TileRegistry::new(), 60))
        .expect("layout loads");
    let _ = walk(&mut session, &RIGHT_THEN_DOWN);
    assert!(session.total_score() > 0);

    let snapshot = session.restart().expect("restart");

    assert_eq!(snapshot.level, 1);
    assert_eq!(snapshot.requested_level, 1);
    assert_eq!(snapshot.grid.columns(), 22);
    assert_eq!(snapshot.moves, 0);
    assert_eq!(session.total_score(), 0);
}

#[test]
fn invalid_layout_is_reported() {
    let mut tiles = TileRegistry::new();
    tiles.push(TileCategory::Teleporter, CellCoord::new(2, 2));
    let mut session = manual_session();

    let error = session
        .load_layout(five_by_five(1, tiles, 60))
        .expect_err("odd teleporter count");

    assert_eq!(
        error,
        SessionError::Rejected {
            level: 1,
            reason: LayoutError::UnpairedTeleporter,
        }
    );
}

/// Every generated level is solid wall apart from start and goal.
fn sealed_tuning() -> GeneratorTuning {
    let mut tuning = GeneratorTuning::default();
    tuning.density.base = 1.0;
    tuning.density.per_level = 0.0;
    tuning.density.wave_amplitude = 0.0;
    tuning.tiles.traps_per_level = 0;
    tuning.tiles.teleporter_pairs_base = 0;
    tuning.tiles.teleporter_pairs_divisor = 0;
    tuning.tiles.key_lock_pairs_base = 0;
    tuning.tiles.key_lock_pairs_divisor = 0;
    tuning.repair = ConnectivityRepair::Verify;
    tuning.fallback = FallbackPolicy::RetrySameLevel;
    tuning.max_attempts = 4;
    tuning
}

#[test]
fn failed_advance_still_reports_completion() {
    let mut session = Session::new(Config::new(3).with_generator_tuning(sealed_tuning()));
    let layout = LevelLayout::new(
        1,
        Grid::new(2, 1),
        TileRegistry::new(),
        CellCoord::new(0, 0),
        CellCoord::new(1, 0),
        60,
    );
    let _ = session.load_layout(layout).expect("layout loads");

    let error = session
        .move_player(Direction::East)
        .expect_err("level two cannot be generated");

    let SessionError::Generation { source, events } = &error else {
        panic!("unexpected error {error:?}");
    };
    assert_eq!(
        *source,
        GenerationError::AttemptsExhausted {
            level: 2,
            attempts: 4,
        }
    );
    assert_eq!(error.events(), events.as_slice());
    assert!(events.contains(&Event::LevelCompleted {
        level: 1,
        time_remaining: 60,
    }));
    assert_eq!(events.last(), Some(&Event::LevelRequested { level: 2 }));
    assert_eq!(session.total_score(), 700);
    assert_eq!(session.status(), LevelStatus::Pending);

    let snapshot = session
        .load_layout(five_by_five(2, TileRegistry::new(), 60))
        .expect("a prepared layout recovers the session");
    assert_eq!(snapshot.status, LevelStatus::InProgress);
    assert_eq!(session.total_score(), 700);
}

#[test]
fn huge_level_number_is_an_error() {
    let mut session = Session::new(Config::new(1));

    let error = session
        .start_level(u32::MAX)
        .expect_err("grid would not fit in memory");

    assert!(matches!(
        error,
        SessionError::Generation {
            source: GenerationError::GridTooLarge {
                level: u32::MAX,
                ..
            },
            ..
        }
    ));
    assert_eq!(error.events(), &[Event::LevelRequested { level: u32::MAX }]);

    let snapshot = session.start_level(1).expect("small levels still generate");
    assert_eq!(snapshot.level, 1);
}

#[test]
fn custom_score_tuning_is_applied() {
    let mut session = Session::new(
        Config::new(4)
            .with_progression(progression::Config::new(false, false))
            .with_score_tuning(ScoreTuning {
                per_level: 7,
                per_second: 1,
            }),
    );
    let _ = session
        .load_layout(five_by_five(3, TileRegistry::new(), 40))
        .expect("layout loads");

    let _ = walk(&mut session, &RIGHT_THEN_DOWN);

    assert_eq!(session.total_score(), 61);
}
