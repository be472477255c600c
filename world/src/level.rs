//! Per-level session state and the tile-effect movement rules.

use maze_runner_core::{CellCoord, Direction, Grid, LevelLayout, TileCategory, TileRegistry};

/// Why a move left the level untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum BlockReason {
    /// The target lies outside the grid.
    OutOfBounds,
    /// The target is a wall.
    Wall,
    /// The target is a lock and the player carries no key.
    Locked,
    /// The target is a teleporter whose partner is missing.
    UnpairedTeleporter,
}

/// Side effect applied by the tile the player stepped onto.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum TileEffect {
    None,
    Teleported { entry: CellCoord },
    KeyCollected { cell: CellCoord },
    LockOpened { cell: CellCoord },
}

/// A completed move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Advance {
    pub(crate) from: CellCoord,
    pub(crate) to: CellCoord,
    pub(crate) effect: TileEffect,
    pub(crate) reached_goal: bool,
}

/// Result of a single move attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum MoveOutcome {
    Blocked(BlockReason),
    /// The target is a trap. The player stays where it was.
    Trapped {
        trap: CellCoord,
    },
    Advanced(Advance),
}

/// Mutable state of the level being played.
#[derive(Clone, Debug)]
pub(crate) struct Level {
    number: u32,
    requested_level: u32,
    grid: Grid,
    tiles: TileRegistry,
    start: CellCoord,
    goal: CellCoord,
    player: CellCoord,
    has_key: bool,
    visited: Vec<CellCoord>,
    moves: u32,
    time_limit: u32,
}

impl Level {
    /// Starts a level at the layout's start cell with no key and no moves.
    pub(crate) fn from_layout(layout: LevelLayout) -> Self {
        let number = layout.level();
        let requested_level = layout.requested_level();
        let start = layout.start();
        let goal = layout.goal();
        let time_limit = layout.time_limit();
        let (grid, tiles) = layout.into_grid_and_tiles();

        Self {
            number,
            requested_level,
            grid,
            tiles,
            start,
            goal,
            player: start,
            has_key: false,
            visited: vec![start],
            moves: 0,
            time_limit,
        }
    }

    /// Resolves a single step in `direction`.
    ///
    /// Checks run against the target cell in this order: bounds and walls,
    /// traps, teleporters, keys, locks. Blocked and trapped moves leave every
    /// field untouched.
    pub(crate) fn attempt_move(&mut self, direction: Direction) -> MoveOutcome {
        let Some(target) = self.grid.neighbor(self.player, direction) else {
            return MoveOutcome::Blocked(BlockReason::OutOfBounds);
        };
        if self.grid.is_wall(target) {
            return MoveOutcome::Blocked(BlockReason::Wall);
        }
        if self.tiles.contains(TileCategory::Trap, target) {
            return MoveOutcome::Trapped { trap: target };
        }

        let (resolved, effect) = if self.tiles.contains(TileCategory::Teleporter, target) {
            let Some(exit) = self.tiles.pair_of(target) else {
                debug_assert!(false, "teleporter at {target:?} has no partner");
                return MoveOutcome::Blocked(BlockReason::UnpairedTeleporter);
            };
            (exit, TileEffect::Teleported { entry: target })
        } else if self.tiles.contains(TileCategory::Key, target) {
            self.has_key = true;
            let _ = self.tiles.remove(TileCategory::Key, target);
            (target, TileEffect::KeyCollected { cell: target })
        } else if self.tiles.contains(TileCategory::Lock, target) {
            if !self.has_key {
                return MoveOutcome::Blocked(BlockReason::Locked);
            }
            self.has_key = false;
            let _ = self.tiles.remove(TileCategory::Lock, target);
            (target, TileEffect::LockOpened { cell: target })
        } else {
            (target, TileEffect::None)
        };

        let from = self.player;
        self.player = resolved;
        self.moves = self.moves.saturating_add(1);
        self.visited.push(resolved);

        MoveOutcome::Advanced(Advance {
            from,
            to: resolved,
            effect,
            reached_goal: self.is_complete(),
        })
    }

    /// Reports whether the player stands on the goal with every lock opened.
    pub(crate) fn is_complete(&self) -> bool {
        self.player == self.goal && self.tiles.locks().is_empty()
    }

    /// Reports whether the hint search should route around `cell`.
    pub(crate) fn blocks_hint(&self, cell: CellCoord) -> bool {
        if self.grid.is_wall(cell) {
            return true;
        }
        match self.tiles.category_at(cell) {
            Some(TileCategory::Trap | TileCategory::Teleporter) => true,
            Some(TileCategory::Lock) => !self.has_key,
            Some(TileCategory::Key) | None => false,
        }
    }

    pub(crate) fn number(&self) -> u32 {
        self.number
    }

    pub(crate) fn requested_level(&self) -> u32 {
        self.requested_level
    }

    pub(crate) fn grid(&self) -> &Grid {
        &self.grid
    }

    pub(crate) fn tiles(&self) -> &TileRegistry {
        &self.tiles
    }

    pub(crate) fn start(&self) -> CellCoord {
        self.start
    }

    pub(crate) fn goal(&self) -> CellCoord {
        self.goal
    }

    pub(crate) fn player(&self) -> CellCoord {
        self.player
    }

    pub(crate) fn has_key(&self) -> bool {
        self.has_key
    }

    pub(crate) fn visited(&self) -> &[CellCoord] {
        &self.visited
    }

    pub(crate) fn moves(&self) -> u32 {
        self.moves
    }

    pub(crate) fn time_limit(&self) -> u32 {
        self.time_limit
    }
}
