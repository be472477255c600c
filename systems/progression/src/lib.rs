#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Progression system that advances or restarts the run after a level ends.

use maze_runner_core::{Command, Event};
use tracing::debug;

/// Configuration parameters required to construct the progression system.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    auto_advance: bool,
    auto_restart: bool,
}

impl Config {
    /// Creates a configuration with explicit advance and restart behaviour.
    #[must_use]
    pub const fn new(auto_advance: bool, auto_restart: bool) -> Self {
        Self {
            auto_advance,
            auto_restart,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(true, true)
    }
}

/// Pure system reacting to level completion and game over.
#[derive(Debug, Default)]
pub struct Progression {
    config: Config,
}

impl Progression {
    /// Creates a progression system using the supplied configuration.
    #[must_use]
    pub const fn new(config: Config) -> Self {
        Self { config }
    }

    /// Consumes events and emits follow-up level or restart commands.
    pub fn handle(&self, events: &[Event], out: &mut Vec<Command>) {
        for event in events {
            match event {
                Event::LevelCompleted { level, .. } if self.config.auto_advance => {
                    let next = level.saturating_add(1);
                    debug!(completed = level, next, "advancing to next level");
                    out.push(Command::StartLevel { level: next });
                }
                Event::GameOver { level, cause } if self.config.auto_restart => {
                    debug!(level, ?cause, "restarting after game over");
                    out.push(Command::Restart);
                }
                _ => {}
            }
        }
    }
}
