//! Depth-first connectivity repair between start and goal.

use maze_runner_core::{CellCoord, Direction, Grid};

use crate::tuning::ConnectivityRepair;

/// Neighbour expansion order: down, right, up, left.
const EXPANSION_ORDER: [Direction; 4] = [
    Direction::South,
    Direction::East,
    Direction::North,
    Direction::West,
];

/// Outcome of a repair pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Repair {
    /// The goal is reachable; `carved` walls were cleared on the way.
    Connected { carved: usize },
    /// The search exhausted its frontier without reaching the goal.
    Disconnected,
}

/// Runs a depth-first search from `start` and reports whether `goal` was reached.
///
/// In [`ConnectivityRepair::Carve`] mode every unvisited neighbour has its
/// wall cleared before it is pushed, so the goal is always reached on a
/// non-empty grid. [`ConnectivityRepair::Verify`] leaves the grid untouched and
/// only walks open cells.
pub(crate) fn connect(
    grid: &mut Grid,
    start: CellCoord,
    goal: CellCoord,
    mode: ConnectivityRepair,
) -> Repair {
    let mut visited = vec![false; grid.area()];
    let mut stack = vec![start];
    let mut carved = 0;

    while let Some(cell) = stack.pop() {
        if cell == goal {
            return Repair::Connected { carved };
        }
        let Some(index) = grid.index(cell) else {
            continue;
        };
        if visited[index] {
            continue;
        }
        visited[index] = true;

        for direction in EXPANSION_ORDER {
            let Some(next) = grid.neighbor(cell, direction) else {
                continue;
            };
            if grid.index(next).is_some_and(|next_index| visited[next_index]) {
                continue;
            }
            match mode {
                ConnectivityRepair::Carve => {
                    if grid.clear_wall(next) {
                        carved += 1;
                    }
                }
                ConnectivityRepair::Verify => {
                    if grid.is_wall(next) {
                        continue;
                    }
                }
            }
            stack.push(next);
        }
    }

    Repair::Disconnected
}
