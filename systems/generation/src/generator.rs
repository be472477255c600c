//! Level generator combining wall density, tile placement and connectivity repair.

use maze_runner_core::{CellCoord, Grid, LevelLayout};
use rand::Rng;
use tracing::{debug, warn};

use crate::{
    placement::{self, PlacementExhausted},
    repair::{self, Repair},
    tuning::{FallbackPolicy, GeneratorTuning},
    GenerationError,
};

/// Builds playable [`LevelLayout`]s from a [`GeneratorTuning`].
#[derive(Clone, Debug, Default)]
pub struct MazeGenerator {
    tuning: GeneratorTuning,
}

enum AttemptFailure {
    Placement(PlacementExhausted),
    Disconnected,
}

impl MazeGenerator {
    /// Creates a generator that follows the provided tuning.
    #[must_use]
    pub fn new(tuning: GeneratorTuning) -> Self {
        Self { tuning }
    }

    /// Tuning the generator follows.
    #[must_use]
    pub fn tuning(&self) -> &GeneratorTuning {
        &self.tuning
    }

    /// Generates a layout for `level`, drawing all randomness from `rng`.
    ///
    /// Level zero is promoted to level one. The returned layout has its start
    /// at the top-left cell, its goal at the bottom-right cell and every special
    /// tile on a distinct open cell. When connectivity cannot be established the
    /// [`FallbackPolicy`] picks the level of the next attempt; the layout then
    /// reports both the effective and the requested level.
    pub fn generate<R: Rng + ?Sized>(
        &self,
        level: u32,
        rng: &mut R,
    ) -> Result<LevelLayout, GenerationError> {
        let requested = level.max(1);
        let _ = self.grid_size(requested)?;

        let mut current = requested;
        let mut relief = 1.0;
        for attempt in 1..=self.tuning.max_attempts {
            let size = self.grid_size(current)?;
            match self.attempt(current, size, relief, rng) {
                Ok(layout) => {
                    debug!(
                        level = current,
                        requested_level = requested,
                        attempt,
                        walls = layout.grid().wall_count(),
                        "generated level layout"
                    );
                    return Ok(layout.with_requested_level(requested));
                }
                Err(AttemptFailure::Placement(exhausted)) => {
                    relief *= self.tuning.density_relief;
                    warn!(
                        level = current,
                        attempt,
                        category = ?exhausted.category,
                        placed = exhausted.placed,
                        relief,
                        "special tile placement ran out of draws; thinning walls"
                    );
                }
                Err(AttemptFailure::Disconnected) => {
                    let next = match self.tuning.fallback {
                        FallbackPolicy::RestartAtLevelOne => 1,
                        FallbackPolicy::RetrySameLevel => current,
                    };
                    warn!(
                        requested_level = requested,
                        level = current,
                        next_level = next,
                        attempt,
                        "goal unreachable after connectivity repair; regenerating"
                    );
                    current = next;
                    relief = 1.0;
                }
            }
        }

        Err(GenerationError::AttemptsExhausted {
            level: requested,
            attempts: self.tuning.max_attempts,
        })
    }

    /// Grid dimensions for `level`, once they are known to fit the tuning's limits.
    fn grid_size(&self, level: u32) -> Result<(u32, u32), GenerationError> {
        let too_large = GenerationError::GridTooLarge {
            level,
            max_cells: self.tuning.max_cells,
        };
        let (columns, rows) = self.tuning.dimensions(level).ok_or(too_large)?;
        let area = u64::from(columns) * u64::from(rows);
        if area > self.tuning.max_cells {
            return Err(too_large);
        }
        let required = self.tuning.tile_counts(level).cells();
        // start and goal may share a cell only on a 1x1 grid, which holds no tiles anyway
        let available = area.saturating_sub(2);
        if area == 0 || required > available {
            return Err(GenerationError::GridTooSmall {
                level,
                required,
                available,
            });
        }
        Ok((columns, rows))
    }

    fn attempt<R: Rng + ?Sized>(
        &self,
        level: u32,
        (columns, rows): (u32, u32),
        relief: f64,
        rng: &mut R,
    ) -> Result<LevelLayout, AttemptFailure> {
        let mut grid = Grid::new(columns, rows);
        for row in 0..rows {
            for column in 0..columns {
                let probability = self.tuning.wall_probability(level, row, column) * relief;
                if rng.gen::<f64>() < probability {
                    grid.set_wall(CellCoord::new(column, row));
                }
            }
        }

        let start = CellCoord::new(0, 0);
        let goal = CellCoord::new(columns.saturating_sub(1), rows.saturating_sub(1));
        let _ = grid.clear_wall(start);
        let _ = grid.clear_wall(goal);

        let tiles = placement::place_special_tiles(
            &grid,
            start,
            goal,
            self.tuning.tile_counts(level),
            self.tuning.placement_budget(grid.area()),
            rng,
        )
        .map_err(AttemptFailure::Placement)?;

        match repair::connect(&mut grid, start, goal, self.tuning.repair) {
            Repair::Connected { carved } => {
                debug!(level, carved, "connectivity repair finished");
            }
            Repair::Disconnected => return Err(AttemptFailure::Disconnected),
        }

        Ok(LevelLayout::new(
            level,
            grid,
            tiles,
            start,
            goal,
            self.tuning.time_limit(level),
        ))
    }
}
