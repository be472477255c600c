#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Seeded maze generation system.
//!
//! The system listens for [`Event::LevelRequested`] and answers each request
//! with a [`Command::LoadLevel`] carrying a freshly generated layout. All
//! randomness flows from a single seeded generator so a run can be replayed
//! exactly from its seed.

mod generator;
mod placement;
mod repair;
mod tuning;

use maze_runner_core::{Command, Event};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use thiserror::Error;

pub use generator::MazeGenerator;
pub use tuning::{
    ConnectivityRepair, DensityTuning, FallbackPolicy, GeneratorTuning, GridTuning, TileCounts,
    TileTuning, TimeTuning,
};

/// Errors produced while generating a level.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum GenerationError {
    /// The special tiles demanded by the tuning cannot fit in the grid.
    #[error("level {level} needs {required} free cells for special tiles but only {available} exist")]
    GridTooSmall {
        /// Level whose demand was checked.
        level: u32,
        /// Cells the special tiles would occupy.
        required: u64,
        /// Cells available once start and goal are reserved.
        available: u64,
    },
    /// The grid for the level would exceed the tuning's cell cap.
    #[error("level {level} needs a grid larger than {max_cells} cells")]
    GridTooLarge {
        /// Level whose grid was sized.
        level: u32,
        /// Largest grid the tuning allows.
        max_cells: u64,
    },
    /// Every generation attempt was discarded.
    #[error("gave up generating level {level} after {attempts} attempts")]
    AttemptsExhausted {
        /// Level that was requested.
        level: u32,
        /// Attempts made before giving up.
        attempts: u32,
    },
}

/// Configuration parameters required to construct the generation system.
#[derive(Clone, Debug)]
pub struct Config {
    seed: u64,
    tuning: GeneratorTuning,
}

impl Config {
    /// Creates a configuration that seeds the generator with `seed` and uses default tuning.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            tuning: GeneratorTuning::default(),
        }
    }

    /// Replaces the generator tuning.
    #[must_use]
    pub fn with_tuning(mut self, tuning: GeneratorTuning) -> Self {
        self.tuning = tuning;
        self
    }

    /// Seed used for the random source.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }
}

/// Pure system that turns level requests into generated layouts.
#[derive(Debug)]
pub struct Generation {
    generator: MazeGenerator,
    rng: ChaCha8Rng,
}

impl Generation {
    /// Creates a generation system seeded from the provided configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        let seed = config.seed();
        Self {
            generator: MazeGenerator::new(config.tuning),
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Consumes world events and emits a load command for every level request.
    pub fn handle(
        &mut self,
        events: &[Event],
        out: &mut Vec<Command>,
    ) -> Result<(), GenerationError> {
        for event in events {
            if let Event::LevelRequested { level } = event {
                let layout = self.generator.generate(*level, &mut self.rng)?;
                out.push(Command::LoadLevel {
                    layout: Box::new(layout),
                });
            }
        }
        Ok(())
    }
}
