#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! In-process game session wiring the world to its systems.
//!
//! A [`Session`] owns the authoritative [`World`] together with the
//! generation, scoring and progression systems. Every public operation submits
//! a single command and then pumps the resulting events through the systems
//! until no follow-up commands remain, returning every event observed along
//! the way.

use maze_runner_core::{
    Command, Direction, Event, LayoutError, LevelLayout, LevelSnapshot, LevelStatus,
};
use maze_runner_system_bootstrap::{Bootstrap, HudSnapshot};
use maze_runner_system_generation::{self as generation, GenerationError, GeneratorTuning};
use maze_runner_system_progression as progression;
use maze_runner_system_scoring::{ScoreKeeper, ScoreTuning};
use maze_runner_world::{self as world, query, World};
use thiserror::Error;
use tracing::{trace, warn};

/// Errors surfaced by session operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    /// The generation system could not produce a layout.
    ///
    /// The world is left waiting for a level; `start_level`, `restart` or
    /// `load_layout` recover it.
    #[error("level generation failed")]
    Generation {
        /// Failure reported by the generator.
        #[source]
        source: GenerationError,
        /// Events observed before generation failed, such as the completion
        /// that requested the next level.
        events: Vec<Event>,
    },
    /// The world refused a layout.
    #[error("level {level} was rejected: {reason}")]
    Rejected {
        /// Level carried by the rejected layout.
        level: u32,
        /// Validation failure reported by the world.
        reason: LayoutError,
    },
    /// The operation finished without a level being loaded.
    #[error("no level is loaded")]
    NoActiveLevel,
}

impl SessionError {
    /// Events the world emitted before the operation failed.
    #[must_use]
    pub fn events(&self) -> &[Event] {
        match self {
            Self::Generation { events, .. } => events,
            Self::Rejected { .. } | Self::NoActiveLevel => &[],
        }
    }
}

/// Configuration bundling every system the session drives.
#[derive(Clone, Debug)]
pub struct Config {
    generation: generation::Config,
    scoring: ScoreTuning,
    progression: progression::Config,
}

impl Config {
    /// Creates a configuration with default tuning and the provided generator seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            generation: generation::Config::new(seed),
            scoring: ScoreTuning::default(),
            progression: progression::Config::default(),
        }
    }

    /// Replaces the maze generator tuning.
    #[must_use]
    pub fn with_generator_tuning(mut self, tuning: GeneratorTuning) -> Self {
        self.generation = self.generation.with_tuning(tuning);
        self
    }

    /// Replaces the score tuning.
    #[must_use]
    pub fn with_score_tuning(mut self, scoring: ScoreTuning) -> Self {
        self.scoring = scoring;
        self
    }

    /// Replaces the progression configuration.
    #[must_use]
    pub fn with_progression(mut self, progression: progression::Config) -> Self {
        self.progression = progression;
        self
    }
}

/// A single player's run through consecutive levels.
pub struct Session {
    world: World,
    generation: generation::Generation,
    scoring: ScoreKeeper,
    progression: progression::Progression,
    bootstrap: Bootstrap,
}

impl Session {
    /// Creates an idle session; call [`Session::start_level`] to begin playing.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            world: World::new(),
            generation: generation::Generation::new(config.generation),
            scoring: ScoreKeeper::new(config.scoring),
            progression: progression::Progression::new(config.progression),
            bootstrap: Bootstrap,
        }
    }

    /// Generates and loads `level`, returning the freshly started level.
    pub fn start_level(&mut self, level: u32) -> Result<LevelSnapshot, SessionError> {
        let events = self.submit(Command::StartLevel { level })?;
        self.loaded_snapshot(&events)
    }

    /// Loads a prepared layout instead of generating one.
    pub fn load_layout(&mut self, layout: LevelLayout) -> Result<LevelSnapshot, SessionError> {
        let events = self.submit(Command::LoadLevel {
            layout: Box::new(layout),
        })?;
        self.loaded_snapshot(&events)
    }

    /// Attempts to move the player one cell.
    ///
    /// Blocked moves yield no events. With automatic progression enabled the
    /// returned events also cover the next level or the restart that follows.
    pub fn move_player(&mut self, direction: Direction) -> Result<Vec<Event>, SessionError> {
        self.submit(Command::Move { direction })
    }

    /// Advances the countdown by one second.
    pub fn tick(&mut self) -> Result<Vec<Event>, SessionError> {
        self.submit(Command::Tick)
    }

    /// Starts over from level 1 with a zero score.
    pub fn restart(&mut self) -> Result<LevelSnapshot, SessionError> {
        let events = self.submit(Command::Restart)?;
        self.loaded_snapshot(&events)
    }

    /// Level currently requested or being played.
    #[must_use]
    pub fn level(&self) -> u32 {
        query::level(&self.world)
    }

    /// Moves made on the current level.
    #[must_use]
    pub fn moves(&self) -> u32 {
        query::moves(&self.world)
    }

    /// Seconds left on the countdown.
    #[must_use]
    pub fn time_remaining(&self) -> u32 {
        query::time_remaining(&self.world)
    }

    /// Score accumulated since the last restart.
    #[must_use]
    pub fn total_score(&self) -> u64 {
        self.scoring.total()
    }

    /// Whether the player holds an unspent key.
    #[must_use]
    pub fn has_key(&self) -> bool {
        query::has_key(&self.world)
    }

    /// Lifecycle of the current level.
    #[must_use]
    pub fn status(&self) -> LevelStatus {
        query::status(&self.world)
    }

    /// Suggested next step towards the goal.
    #[must_use]
    pub fn hint(&self) -> Option<Direction> {
        query::hint(&self.world)
    }

    /// Full state of the loaded level.
    #[must_use]
    pub fn snapshot(&self) -> Option<LevelSnapshot> {
        query::level_snapshot(&self.world)
    }

    /// Heads-up display readout.
    #[must_use]
    pub fn hud(&self) -> HudSnapshot {
        self.bootstrap.hud(&self.world, self.scoring.total())
    }

    /// Greeting shown when the session starts.
    #[must_use]
    pub fn welcome_banner(&self) -> &'static str {
        self.bootstrap.welcome_banner(&self.world)
    }

    fn submit(&mut self, command: Command) -> Result<Vec<Event>, SessionError> {
        let mut log = Vec::new();
        let mut events = Vec::new();
        world::apply(&mut self.world, command, &mut events);

        loop {
            if events.is_empty() {
                break;
            }
            log.extend(events.iter().cloned());

            let mut commands = Vec::new();
            self.scoring.handle(&events);
            if let Err(source) = self.generation.handle(&events, &mut commands) {
                warn!(%source, "level generation failed; waiting for a new level request");
                return Err(SessionError::Generation { source, events: log });
            }
            self.progression.handle(&events, &mut commands);

            if commands.is_empty() {
                break;
            }

            events.clear();
            for command in commands {
                trace!(?command, "applying follow-up command");
                world::apply(&mut self.world, command, &mut events);
            }
        }

        Ok(log)
    }

    fn loaded_snapshot(&self, events: &[Event]) -> Result<LevelSnapshot, SessionError> {
        if let Some((level, reason)) = events.iter().rev().find_map(|event| match event {
            Event::LevelRejected { level, reason } => Some((*level, *reason)),
            _ => None,
        }) {
            return Err(SessionError::Rejected { level, reason });
        }
        query::level_snapshot(&self.world).ok_or(SessionError::NoActiveLevel)
    }
}
