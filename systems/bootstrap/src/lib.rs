#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure bootstrap system that prepares the Maze Runner heads-up display.

use std::fmt;

use maze_runner_core::LevelStatus;
use maze_runner_world::{query, World};

/// Values shown on the heads-up display.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HudSnapshot {
    /// Level being played.
    pub level: u32,
    /// Moves made on the level.
    pub moves: u32,
    /// Seconds left on the countdown.
    pub time_remaining: u32,
    /// Score accumulated during the run.
    pub total_score: u64,
    /// Whether the player holds an unspent key.
    pub has_key: bool,
    /// Lifecycle of the level.
    pub status: LevelStatus,
}

impl fmt::Display for HudSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Level {} | Moves {} | Time {}s | Score {} | Key {}",
            self.level,
            self.moves,
            self.time_remaining,
            self.total_score,
            if self.has_key { "yes" } else { "no" },
        )?;
        match self.status {
            LevelStatus::Completed => f.write_str(" | Level complete"),
            LevelStatus::Failed => f.write_str(" | Game over"),
            LevelStatus::Idle | LevelStatus::Pending | LevelStatus::InProgress => Ok(()),
        }
    }
}

/// Produces data required to greet and inform the player.
#[derive(Debug, Default)]
pub struct Bootstrap;

impl Bootstrap {
    /// Derives the banner that should be shown when the experience starts.
    #[must_use]
    pub fn welcome_banner(&self, world: &World) -> &'static str {
        query::welcome_banner(world)
    }

    /// Gathers the heads-up display readout for the current level.
    #[must_use]
    pub fn hud(&self, world: &World, total_score: u64) -> HudSnapshot {
        HudSnapshot {
            level: query::level(world),
            moves: query::moves(world),
            time_remaining: query::time_remaining(world),
            total_score,
            has_key: query::has_key(world),
            status: query::status(world),
        }
    }
}
