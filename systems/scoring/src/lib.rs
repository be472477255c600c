#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Scoring system that accumulates points for completed levels.

use maze_runner_core::Event;
use tracing::info;

/// Point values awarded for completing a level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScoreTuning {
    /// Points per level number.
    pub per_level: u64,
    /// Points per second left on the countdown.
    pub per_second: u64,
}

impl Default for ScoreTuning {
    fn default() -> Self {
        Self {
            per_level: 100,
            per_second: 10,
        }
    }
}

impl ScoreTuning {
    /// Points earned by finishing `level` with `time_remaining` seconds to spare.
    #[must_use]
    pub fn score(&self, level: u32, time_remaining: u32) -> u64 {
        self.per_level
            .saturating_mul(u64::from(level))
            .saturating_add(self.per_second.saturating_mul(u64::from(time_remaining)))
    }
}

/// Points earned by finishing `level` with `time_remaining` seconds to spare, using default tuning.
#[must_use]
pub fn score_for_level(level: u32, time_remaining: u32) -> u64 {
    ScoreTuning::default().score(level, time_remaining)
}

/// Running score across the levels of a single run.
#[derive(Debug, Default)]
pub struct ScoreKeeper {
    tuning: ScoreTuning,
    total: u64,
}

impl ScoreKeeper {
    /// Creates a keeper awarding points according to `tuning`.
    #[must_use]
    pub const fn new(tuning: ScoreTuning) -> Self {
        Self { tuning, total: 0 }
    }

    /// Total accumulated since the last restart.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.total
    }

    /// Adds completion awards and clears the total when the run restarts.
    pub fn handle(&mut self, events: &[Event]) {
        for event in events {
            match event {
                Event::LevelCompleted {
                    level,
                    time_remaining,
                } => {
                    let award = self.tuning.score(*level, *time_remaining);
                    self.total = self.total.saturating_add(award);
                    info!(level, time_remaining, award, total = self.total, "level scored");
                }
                Event::GameRestarted => self.total = 0,
                _ => {}
            }
        }
    }
}
