#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Maze Runner.
//!
//! The world owns exactly one level at a time. Every mutation arrives as a
//! [`Command`] through [`apply`] and is reported back as a batch of [`Event`]
//! values; a new layout replaces the previous level wholesale.

mod clock;
mod level;
mod navigation;

use maze_runner_core::{
    Command, Direction, Event, GameOverCause, LayoutError, LevelLayout, LevelStatus,
    WELCOME_BANNER,
};
use tracing::{debug, error, info, trace};

use crate::{
    clock::{Clock, ClockTick},
    level::{Level, MoveOutcome, TileEffect},
    navigation::DistanceField,
};

/// Represents the authoritative Maze Runner world state.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    level_number: u32,
    status: LevelStatus,
    level: Option<Level>,
    clock: Clock,
    hint_field: DistanceField,
}

impl World {
    /// Creates an idle world that has not requested a level yet.
    #[must_use]
    pub fn new() -> Self {
        Self {
            banner: WELCOME_BANNER,
            level_number: 1,
            status: LevelStatus::Idle,
            level: None,
            clock: Clock::default(),
            hint_field: DistanceField::default(),
        }
    }

    fn request_level(&mut self, level: u32, out_events: &mut Vec<Event>) {
        self.clock.stop();
        self.level_number = level;
        self.status = LevelStatus::Pending;
        out_events.push(Event::LevelRequested { level });
    }

    fn load_level(&mut self, layout: LevelLayout, out_events: &mut Vec<Event>) {
        let validation = layout.validate().and_then(|()| {
            if navigation::goal_reachable(layout.grid(), layout.start(), layout.goal()) {
                Ok(())
            } else {
                Err(LayoutError::GoalUnreachable)
            }
        });
        if let Err(reason) = validation {
            error!(level = layout.level(), %reason, "rejected level layout");
            out_events.push(Event::LevelRejected {
                level: layout.level(),
                reason,
            });
            return;
        }

        let level = Level::from_layout(layout);
        info!(
            level = level.number(),
            requested_level = level.requested_level(),
            columns = level.grid().columns(),
            rows = level.grid().rows(),
            traps = level.tiles().traps().len(),
            teleporters = level.tiles().teleporters().len(),
            locks = level.tiles().locks().len(),
            "level started"
        );

        self.clock.start(level.time_limit());
        self.level_number = level.number();
        self.status = LevelStatus::InProgress;
        out_events.push(Event::LevelStarted {
            level: level.number(),
            requested_level: level.requested_level(),
            time_limit: level.time_limit(),
            columns: level.grid().columns(),
            rows: level.grid().rows(),
        });
        self.level = Some(level);
        self.refresh_hint();
    }

    fn move_player(&mut self, direction: Direction, out_events: &mut Vec<Event>) {
        if self.status != LevelStatus::InProgress {
            trace!(?direction, status = ?self.status, "ignored move outside active level");
            return;
        }
        let Some(level) = self.level.as_mut() else {
            return;
        };

        match level.attempt_move(direction) {
            MoveOutcome::Blocked(reason) => {
                trace!(?direction, ?reason, "move blocked");
            }
            MoveOutcome::Trapped { trap } => {
                info!(level = self.level_number, ?trap, "player stepped onto a trap");
                self.fail(GameOverCause::Trap, out_events);
            }
            MoveOutcome::Advanced(advance) => {
                debug!(from = ?advance.from, to = ?advance.to, effect = ?advance.effect, "player moved");
                out_events.push(Event::PlayerMoved {
                    from: advance.from,
                    to: advance.to,
                });
                match advance.effect {
                    TileEffect::None => {}
                    TileEffect::Teleported { entry } => out_events.push(Event::Teleported {
                        entry,
                        exit: advance.to,
                    }),
                    TileEffect::KeyCollected { cell } => {
                        out_events.push(Event::KeyCollected { cell });
                    }
                    TileEffect::LockOpened { cell } => {
                        out_events.push(Event::LockOpened { cell });
                    }
                }

                if advance.reached_goal {
                    self.clock.stop();
                    self.status = LevelStatus::Completed;
                    let time_remaining = self.clock.remaining();
                    info!(level = self.level_number, time_remaining, "level completed");
                    out_events.push(Event::LevelCompleted {
                        level: self.level_number,
                        time_remaining,
                    });
                } else {
                    self.refresh_hint();
                }
            }
        }
    }

    fn tick(&mut self, out_events: &mut Vec<Event>) {
        if self.status != LevelStatus::InProgress {
            return;
        }

        match self.clock.tick() {
            ClockTick::Idle => {}
            ClockTick::Running { remaining } => {
                out_events.push(Event::TimeAdvanced { remaining });
            }
            ClockTick::Expired => {
                out_events.push(Event::TimeAdvanced { remaining: 0 });
                info!(level = self.level_number, "countdown expired");
                self.fail(GameOverCause::Time, out_events);
            }
        }
    }

    fn fail(&mut self, cause: GameOverCause, out_events: &mut Vec<Event>) {
        self.clock.stop();
        self.status = LevelStatus::Failed;
        out_events.push(Event::GameOver {
            level: self.level_number,
            cause,
        });
    }

    fn refresh_hint(&mut self) {
        match self.level.as_ref() {
            Some(level) => {
                self.hint_field
                    .rebuild(level.grid(), level.goal(), |cell| level.blocks_hint(cell));
            }
            None => self.hint_field = DistanceField::default(),
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::StartLevel { level } => world.request_level(level.max(1), out_events),
        Command::LoadLevel { layout } => world.load_level(*layout, out_events),
        Command::Move { direction } => world.move_player(direction, out_events),
        Command::Tick => world.tick(out_events),
        Command::Restart => {
            info!(from_level = world.level_number, "restarting run");
            world.clock.stop();
            out_events.push(Event::GameRestarted);
            world.request_level(1, out_events);
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use maze_runner_core::{CellCoord, Direction, LevelSnapshot, LevelStatus};

    use super::World;

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Level currently requested or being played.
    #[must_use]
    pub fn level(world: &World) -> u32 {
        world.level_number
    }

    /// Lifecycle of the current level.
    #[must_use]
    pub fn status(world: &World) -> LevelStatus {
        world.status
    }

    /// Moves completed on the current level.
    #[must_use]
    pub fn moves(world: &World) -> u32 {
        world.level.as_ref().map_or(0, |level| level.moves())
    }

    /// Seconds left on the countdown.
    #[must_use]
    pub fn time_remaining(world: &World) -> u32 {
        world.clock.remaining()
    }

    /// Reports whether the player carries an unspent key.
    #[must_use]
    pub fn has_key(world: &World) -> bool {
        world.level.as_ref().is_some_and(|level| level.has_key())
    }

    /// Cell the player occupies, if a level has been loaded.
    #[must_use]
    pub fn player(world: &World) -> Option<CellCoord> {
        world.level.as_ref().map(|level| level.player())
    }

    /// Direction of a step that brings the player closer to the goal.
    ///
    /// The route avoids walls, traps, teleporters and locks the player cannot
    /// open yet. Returns `None` when no such route exists or no level is active.
    #[must_use]
    pub fn hint(world: &World) -> Option<Direction> {
        if world.status != LevelStatus::InProgress {
            return None;
        }
        let player = player(world)?;
        world.hint_field.descent(player)
    }

    /// Length of the hinted route from the player to the goal.
    #[must_use]
    pub fn distance_to_goal(world: &World) -> Option<u32> {
        let player = player(world)?;
        world.hint_field.distance(player)
    }

    /// Captures the full state of the loaded level for rendering.
    #[must_use]
    pub fn level_snapshot(world: &World) -> Option<LevelSnapshot> {
        let level = world.level.as_ref()?;
        Some(LevelSnapshot {
            level: level.number(),
            requested_level: level.requested_level(),
            grid: level.grid().clone(),
            tiles: level.tiles().clone(),
            start: level.start(),
            goal: level.goal(),
            player: level.player(),
            visited: level.visited().to_vec(),
            has_key: level.has_key(),
            moves: level.moves(),
            time_limit: level.time_limit(),
            time_remaining: world.clock.remaining(),
            status: world.status,
        })
    }
}

#[cfg(test)]
mod tests {
    use maze_runner_core::{CellCoord, Grid, TileCategory, TileRegistry};

    use super::*;

    fn open_layout(columns: u32, rows: u32) -> LevelLayout {
        LevelLayout::new(
            1,
            Grid::new(columns, rows),
            TileRegistry::new(),
            CellCoord::new(0, 0),
            CellCoord::new(columns - 1, rows - 1),
            3,
        )
    }

    fn loaded(layout: LevelLayout) -> World {
        let mut world = World::new();
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::LoadLevel {
                layout: Box::new(layout),
            },
            &mut events,
        );
        world
    }

    #[test]
    fn start_level_requests_generation() {
        let mut world = World::new();
        let mut events = Vec::new();

        apply(&mut world, Command::StartLevel { level: 4 }, &mut events);

        assert_eq!(events, vec![Event::LevelRequested { level: 4 }]);
        assert_eq!(query::status(&world), LevelStatus::Pending);
        assert_eq!(query::level(&world), 4);
    }

    #[test]
    fn level_zero_is_promoted_to_one() {
        let mut world = World::new();
        let mut events = Vec::new();

        apply(&mut world, Command::StartLevel { level: 0 }, &mut events);

        assert_eq!(events, vec![Event::LevelRequested { level: 1 }]);
    }

    #[test]
    fn load_level_installs_layout_and_arms_clock() {
        let mut world = World::new();
        let mut events = Vec::new();

        apply(
            &mut world,
            Command::LoadLevel {
                layout: Box::new(open_layout(4, 3).with_requested_level(2)),
            },
            &mut events,
        );

        assert_eq!(
            events,
            vec![Event::LevelStarted {
                level: 1,
                requested_level: 2,
                time_limit: 3,
                columns: 4,
                rows: 3,
            }]
        );
        assert_eq!(query::status(&world), LevelStatus::InProgress);
        assert_eq!(query::time_remaining(&world), 3);
        assert_eq!(query::player(&world), Some(CellCoord::new(0, 0)));
    }

    #[test]
    fn unreachable_goal_is_rejected() {
        let grid = Grid::from_ascii(&[".#.", "##.", "..."]).expect("grid");
        let layout = LevelLayout::new(
            1,
            grid,
            TileRegistry::new(),
            CellCoord::new(0, 0),
            CellCoord::new(2, 2),
            60,
        );
        let mut world = World::new();
        let mut events = Vec::new();

        apply(
            &mut world,
            Command::LoadLevel {
                layout: Box::new(layout),
            },
            &mut events,
        );

        assert_eq!(
            events,
            vec![Event::LevelRejected {
                level: 1,
                reason: LayoutError::GoalUnreachable,
            }]
        );
        assert_eq!(query::status(&world), LevelStatus::Idle);
        assert!(query::level_snapshot(&world).is_none());
    }

    #[test]
    fn reaching_goal_completes_and_freezes_level() {
        let mut world = loaded(open_layout(2, 1));
        let mut events = Vec::new();

        apply(
            &mut world,
            Command::Move {
                direction: Direction::East,
            },
            &mut events,
        );

        assert_eq!(
            events,
            vec![
                Event::PlayerMoved {
                    from: CellCoord::new(0, 0),
                    to: CellCoord::new(1, 0),
                },
                Event::LevelCompleted {
                    level: 1,
                    time_remaining: 3,
                },
            ]
        );

        events.clear();
        apply(&mut world, Command::Tick, &mut events);
        apply(
            &mut world,
            Command::Move {
                direction: Direction::West,
            },
            &mut events,
        );
        assert!(events.is_empty());
        assert_eq!(query::time_remaining(&world), 3);
        assert_eq!(query::moves(&world), 1);
    }

    #[test]
    fn trap_ends_the_run() {
        let mut tiles = TileRegistry::new();
        tiles.push(TileCategory::Trap, CellCoord::new(1, 0));
        let layout = LevelLayout::new(
            1,
            Grid::new(3, 2),
            tiles,
            CellCoord::new(0, 0),
            CellCoord::new(2, 1),
            30,
        );
        let mut world = loaded(layout);
        let mut events = Vec::new();

        apply(
            &mut world,
            Command::Move {
                direction: Direction::East,
            },
            &mut events,
        );

        assert_eq!(
            events,
            vec![Event::GameOver {
                level: 1,
                cause: GameOverCause::Trap,
            }]
        );
        assert_eq!(query::status(&world), LevelStatus::Failed);
        assert_eq!(query::player(&world), Some(CellCoord::new(0, 0)));
    }

    #[test]
    fn countdown_expiry_ends_the_run() {
        let mut world = loaded(open_layout(3, 3));
        let mut events = Vec::new();

        for _ in 0..3 {
            apply(&mut world, Command::Tick, &mut events);
        }

        assert_eq!(
            events,
            vec![
                Event::TimeAdvanced { remaining: 2 },
                Event::TimeAdvanced { remaining: 1 },
                Event::TimeAdvanced { remaining: 0 },
                Event::GameOver {
                    level: 1,
                    cause: GameOverCause::Time,
                },
            ]
        );
    }

    #[test]
    fn restart_resets_to_level_one() {
        let mut world = loaded(open_layout(3, 3));
        let mut events = Vec::new();

        apply(&mut world, Command::StartLevel { level: 5 }, &mut events);
        events.clear();
        apply(&mut world, Command::Restart, &mut events);

        assert_eq!(
            events,
            vec![Event::GameRestarted, Event::LevelRequested { level: 1 }]
        );
        assert_eq!(query::level(&world), 1);
    }

    #[test]
    fn hint_routes_around_walls() {
        let grid = Grid::from_ascii(&[".#", ".."]).expect("grid");
        let layout = LevelLayout::new(
            1,
            grid,
            TileRegistry::new(),
            CellCoord::new(0, 0),
            CellCoord::new(1, 1),
            30,
        );
        let world = loaded(layout);

        assert_eq!(query::hint(&world), Some(Direction::South));
        assert_eq!(query::distance_to_goal(&world), Some(2));
    }
}
