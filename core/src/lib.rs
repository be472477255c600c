#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Maze Runner engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems to
//! react to deterministically. Systems consume event streams, query immutable
//! snapshots, and respond exclusively with new command batches.
//!
//! The maze data model itself ([`Grid`], [`TileRegistry`], [`LevelLayout`])
//! lives here as well so that the generator system and the world agree on a
//! single representation without depending on each other.

mod grid;
mod layout;
mod tiles;

pub use grid::{Cell, Grid};
pub use layout::{LayoutError, LevelLayout};
pub use tiles::{TileCategory, TileRegistry};

use serde::{Deserialize, Serialize};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Maze Runner.";

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Requests that a fresh maze be generated for the provided level.
    StartLevel {
        /// One-based level number to generate. Zero is treated as level one.
        level: u32,
    },
    /// Installs a fully generated layout as the active level.
    LoadLevel {
        /// Layout produced by the generation system or supplied by an adapter.
        layout: Box<LevelLayout>,
    },
    /// Requests that the player advance a single cell in the given direction.
    Move {
        /// Direction of travel for the attempted step.
        direction: Direction,
    },
    /// Advances the level countdown by one second.
    Tick,
    /// Resets the run to level one and discards all progress.
    Restart,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Announces that a new level must be generated before play can resume.
    LevelRequested {
        /// Level the generator should build.
        level: u32,
    },
    /// Confirms that a layout became the active level.
    LevelStarted {
        /// Level that is actually being played.
        level: u32,
        /// Level originally requested; differs from `level` after a fallback.
        requested_level: u32,
        /// Countdown assigned to the level, in seconds.
        time_limit: u32,
        /// Number of grid columns in the new level.
        columns: u32,
        /// Number of grid rows in the new level.
        rows: u32,
    },
    /// Reports that a submitted layout violated a structural invariant.
    LevelRejected {
        /// Level carried by the rejected layout.
        level: u32,
        /// Specific reason the layout was rejected.
        reason: LayoutError,
    },
    /// Confirms that the player completed a move.
    PlayerMoved {
        /// Cell the player occupied before moving.
        from: CellCoord,
        /// Cell the player occupies after the move resolved.
        to: CellCoord,
    },
    /// Reports that the player stepped onto a teleporter and was relocated.
    Teleported {
        /// Teleporter tile the player stepped onto.
        entry: CellCoord,
        /// Paired teleporter tile the player arrived at.
        exit: CellCoord,
    },
    /// Reports that the player picked up a key.
    KeyCollected {
        /// Cell that held the key.
        cell: CellCoord,
    },
    /// Reports that the player spent a key to open a lock.
    LockOpened {
        /// Cell that held the lock.
        cell: CellCoord,
    },
    /// Indicates that the level countdown advanced by one second.
    TimeAdvanced {
        /// Seconds left on the countdown after the tick.
        remaining: u32,
    },
    /// Signals that the player reached the goal with every lock opened.
    LevelCompleted {
        /// Level that was completed.
        level: u32,
        /// Seconds left on the countdown when the goal was reached.
        time_remaining: u32,
    },
    /// Signals that the run ended and requires a restart.
    GameOver {
        /// Level being played when the run ended.
        level: u32,
        /// What ended the run.
        cause: GameOverCause,
    },
    /// Confirms that the run was reset to level one.
    GameRestarted,
}

/// Reasons a run may end.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameOverCause {
    /// The player attempted to step onto a trap.
    Trap,
    /// The countdown reached zero.
    Time,
}

/// Lifecycle of the level currently owned by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LevelStatus {
    /// No level has been requested yet.
    Idle,
    /// A level was requested and the world awaits its layout.
    Pending,
    /// The level accepts movement and ticks.
    InProgress,
    /// The player reached the goal; the level is frozen.
    Completed,
    /// The run ended on this level; the level is frozen.
    Failed,
}

/// Cardinal movement directions available to the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    North,
    /// Movement toward increasing column indices.
    East,
    /// Movement toward increasing row indices.
    South,
    /// Movement toward decreasing column indices.
    West,
}

impl Direction {
    /// Every direction, in clockwise order starting from north.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Column and row offsets applied by a single step in this direction.
    #[must_use]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Self::North => (0, -1),
            Self::East => (1, 0),
            Self::South => (0, 1),
            Self::West => (-1, 0),
        }
    }
}

/// Location of a single grid cell expressed as column and row coordinates.
///
/// Equality and hashing are structural, so tile membership checks compare
/// coordinates by value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Cell reached by stepping once in `direction`.
    ///
    /// Returns `None` when the step would leave the non-negative quadrant. Upper
    /// bounds are the grid's concern.
    #[must_use]
    pub fn step(self, direction: Direction) -> Option<CellCoord> {
        let (column_delta, row_delta) = direction.delta();
        let column = self.column.checked_add_signed(column_delta)?;
        let row = self.row.checked_add_signed(row_delta)?;
        Some(Self::new(column, row))
    }
}

/// Read-only snapshot of the active level, sufficient for rendering.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LevelSnapshot {
    /// Level being played.
    pub level: u32,
    /// Level that was requested before any generation fallback.
    pub requested_level: u32,
    /// Wall layout of the level.
    pub grid: Grid,
    /// Remaining special tiles.
    pub tiles: TileRegistry,
    /// Cell the player started from.
    pub start: CellCoord,
    /// Cell the player must reach.
    pub goal: CellCoord,
    /// Cell the player currently occupies.
    pub player: CellCoord,
    /// Every cell the player has occupied, in order, starting with `start`.
    pub visited: Vec<CellCoord>,
    /// Indicates whether the player carries an unspent key.
    pub has_key: bool,
    /// Number of completed moves.
    pub moves: u32,
    /// Countdown assigned to the level, in seconds.
    pub time_limit: u32,
    /// Seconds left on the countdown.
    pub time_remaining: u32,
    /// Lifecycle of the level.
    pub status: LevelStatus,
}
