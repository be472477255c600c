//! Generated level bundles and their structural validation.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{CellCoord, Grid, TileCategory, TileRegistry};

/// Everything required to begin playing a level.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LevelLayout {
    level: u32,
    requested_level: u32,
    grid: Grid,
    tiles: TileRegistry,
    start: CellCoord,
    goal: CellCoord,
    time_limit: u32,
}

impl LevelLayout {
    /// Bundles a grid, its special tiles and the level parameters.
    #[must_use]
    pub fn new(
        level: u32,
        grid: Grid,
        tiles: TileRegistry,
        start: CellCoord,
        goal: CellCoord,
        time_limit: u32,
    ) -> Self {
        Self {
            level,
            requested_level: level,
            grid,
            tiles,
            start,
            goal,
            time_limit,
        }
    }

    /// Records the level that was originally asked for.
    #[must_use]
    pub fn with_requested_level(mut self, requested_level: u32) -> Self {
        self.requested_level = requested_level;
        self
    }

    /// Level the layout was generated for.
    #[must_use]
    pub const fn level(&self) -> u32 {
        self.level
    }

    /// Level that was requested; differs from [`Self::level`] after a fallback.
    #[must_use]
    pub const fn requested_level(&self) -> u32 {
        self.requested_level
    }

    /// Wall layout.
    #[must_use]
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Special tiles.
    #[must_use]
    pub const fn tiles(&self) -> &TileRegistry {
        &self.tiles
    }

    /// Cell the player starts from.
    #[must_use]
    pub const fn start(&self) -> CellCoord {
        self.start
    }

    /// Cell the player must reach.
    #[must_use]
    pub const fn goal(&self) -> CellCoord {
        self.goal
    }

    /// Countdown for the level, in seconds.
    #[must_use]
    pub const fn time_limit(&self) -> u32 {
        self.time_limit
    }

    /// Consumes the layout, yielding its grid and tiles.
    #[must_use]
    pub fn into_grid_and_tiles(self) -> (Grid, TileRegistry) {
        (self.grid, self.tiles)
    }

    /// Checks the structural invariants every playable layout must satisfy.
    ///
    /// Reachability of the goal is not checked here; the world verifies it with
    /// its navigation field before accepting a layout.
    pub fn validate(&self) -> Result<(), LayoutError> {
        if self.grid.is_empty() {
            return Err(LayoutError::EmptyGrid);
        }
        if !self.grid.contains(self.start) {
            return Err(LayoutError::StartOutOfBounds);
        }
        if !self.grid.contains(self.goal) {
            return Err(LayoutError::GoalOutOfBounds);
        }
        if self.grid.is_wall(self.start) {
            return Err(LayoutError::StartBlocked);
        }
        if self.grid.is_wall(self.goal) {
            return Err(LayoutError::GoalBlocked);
        }
        if self.tiles.teleporters().len() % 2 != 0 {
            return Err(LayoutError::UnpairedTeleporter);
        }

        let mut claimed: HashSet<CellCoord> = HashSet::with_capacity(self.tiles.len() + 2);
        let _ = claimed.insert(self.start);
        let _ = claimed.insert(self.goal);
        for (_, cell) in self.tiles.iter() {
            if !self.grid.contains(cell) {
                return Err(LayoutError::TileOutOfBounds { cell });
            }
            if self.grid.is_wall(cell) {
                return Err(LayoutError::TileOnWall { cell });
            }
            if !claimed.insert(cell) {
                return Err(LayoutError::OverlappingTiles { cell });
            }
        }

        Ok(())
    }

    /// Number of tiles of the provided category.
    #[must_use]
    pub fn tile_count(&self, category: TileCategory) -> usize {
        self.tiles.cells(category).len()
    }
}

/// Reasons a layout may be rejected by the world.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LayoutError {
    /// The grid has zero columns or zero rows.
    #[error("grid has no cells")]
    EmptyGrid,
    /// The start cell lies outside the grid.
    #[error("start cell lies outside the grid")]
    StartOutOfBounds,
    /// The goal cell lies outside the grid.
    #[error("goal cell lies outside the grid")]
    GoalOutOfBounds,
    /// The start cell is a wall.
    #[error("start cell is a wall")]
    StartBlocked,
    /// The goal cell is a wall.
    #[error("goal cell is a wall")]
    GoalBlocked,
    /// A special tile lies outside the grid.
    #[error("special tile at {cell:?} lies outside the grid")]
    TileOutOfBounds {
        /// Offending tile coordinate.
        cell: CellCoord,
    },
    /// A special tile sits on a wall.
    #[error("special tile at {cell:?} sits on a wall")]
    TileOnWall {
        /// Offending tile coordinate.
        cell: CellCoord,
    },
    /// A coordinate is claimed twice by start, goal or special tiles.
    #[error("cell {cell:?} is claimed more than once")]
    OverlappingTiles {
        /// Coordinate claimed more than once.
        cell: CellCoord,
    },
    /// The teleporter collection has an odd length.
    #[error("teleporter without a partner")]
    UnpairedTeleporter,
    /// No open path connects start and goal.
    #[error("goal is unreachable from start")]
    GoalUnreachable,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_layout() -> LevelLayout {
        LevelLayout::new(
            1,
            Grid::new(5, 5),
            TileRegistry::new(),
            CellCoord::new(0, 0),
            CellCoord::new(4, 4),
            90,
        )
    }

    fn with_tiles(tiles: TileRegistry) -> LevelLayout {
        LevelLayout::new(
            1,
            Grid::new(5, 5),
            tiles,
            CellCoord::new(0, 0),
            CellCoord::new(4, 4),
            90,
        )
    }

    #[test]
    fn open_layout_is_valid() {
        assert_eq!(open_layout().validate(), Ok(()));
    }

    #[test]
    fn requested_level_defaults_to_level() {
        let layout = open_layout();
        assert_eq!(layout.requested_level(), 1);
        assert_eq!(layout.with_requested_level(4).requested_level(), 4);
    }

    #[test]
    fn walled_goal_is_rejected() {
        let grid = Grid::from_ascii(&["...", "...", "..#"]).expect("grid");
        let layout = LevelLayout::new(
            1,
            grid,
            TileRegistry::new(),
            CellCoord::new(0, 0),
            CellCoord::new(2, 2),
            90,
        );
        assert_eq!(layout.validate(), Err(LayoutError::GoalBlocked));
    }

    #[test]
    fn odd_teleporter_count_is_rejected() {
        let mut tiles = TileRegistry::new();
        tiles.push(TileCategory::Teleporter, CellCoord::new(2, 2));
        assert_eq!(
            with_tiles(tiles).validate(),
            Err(LayoutError::UnpairedTeleporter)
        );
    }

    #[test]
    fn tile_on_goal_is_rejected() {
        let mut tiles = TileRegistry::new();
        tiles.push(TileCategory::Trap, CellCoord::new(4, 4));
        assert_eq!(
            with_tiles(tiles).validate(),
            Err(LayoutError::OverlappingTiles {
                cell: CellCoord::new(4, 4)
            })
        );
    }

    #[test]
    fn tile_shared_between_categories_is_rejected() {
        let mut tiles = TileRegistry::new();
        tiles.push(TileCategory::Key, CellCoord::new(1, 3));
        tiles.push(TileCategory::Lock, CellCoord::new(1, 3));
        assert_eq!(
            with_tiles(tiles).validate(),
            Err(LayoutError::OverlappingTiles {
                cell: CellCoord::new(1, 3)
            })
        );
    }

    #[test]
    fn tile_outside_grid_is_rejected() {
        let mut tiles = TileRegistry::new();
        tiles.push(TileCategory::Trap, CellCoord::new(7, 1));
        assert_eq!(
            with_tiles(tiles).validate(),
            Err(LayoutError::TileOutOfBounds {
                cell: CellCoord::new(7, 1)
            })
        );
    }
}
