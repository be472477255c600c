//! Breadth-first distance field seeded from the goal cell.

use std::collections::VecDeque;

use maze_runner_core::{CellCoord, Direction, Grid};

const UNREACHABLE: u32 = u32::MAX;

/// Dense step-count grid measuring how far each cell is from the goal.
///
/// The field mirrors the level grid and stores the results of a reverse
/// breadth-first search. Cells the search never reached hold `UNREACHABLE`
/// so callers can tell blocked regions apart from traversable ones.
#[derive(Clone, Debug, Default)]
pub(crate) struct DistanceField {
    columns: u32,
    rows: u32,
    distances: Vec<u32>,
}

impl DistanceField {
    /// Recomputes distances from `goal` over every cell `is_blocked` rejects.
    pub(crate) fn rebuild<F>(&mut self, grid: &Grid, goal: CellCoord, mut is_blocked: F)
    where
        F: FnMut(CellCoord) -> bool,
    {
        self.columns = grid.columns();
        self.rows = grid.rows();
        self.distances.clear();
        self.distances.resize(grid.area(), UNREACHABLE);

        let Some(goal_index) = grid.index(goal) else {
            return;
        };
        if is_blocked(goal) {
            return;
        }

        self.distances[goal_index] = 0;
        let mut queue = VecDeque::from([goal]);

        while let Some(cell) = queue.pop_front() {
            let Some(current) = grid.index(cell).map(|index| self.distances[index]) else {
                continue;
            };
            let next_distance = current.saturating_add(1);

            for direction in Direction::ALL {
                let Some(neighbor) = grid.neighbor(cell, direction) else {
                    continue;
                };
                if is_blocked(neighbor) {
                    continue;
                }
                let Some(index) = grid.index(neighbor) else {
                    continue;
                };
                if self.distances[index] <= next_distance {
                    continue;
                }

                self.distances[index] = next_distance;
                queue.push_back(neighbor);
            }
        }
    }

    /// Steps from `cell` to the goal, or `None` when it cannot be reached.
    pub(crate) fn distance(&self, cell: CellCoord) -> Option<u32> {
        if cell.column() >= self.columns || cell.row() >= self.rows {
            return None;
        }
        let width = usize::try_from(self.columns).ok()?;
        let row = usize::try_from(cell.row()).ok()?;
        let column = usize::try_from(cell.column()).ok()?;
        self.distances
            .get(row * width + column)
            .copied()
            .filter(|distance| *distance != UNREACHABLE)
    }

    /// Direction whose neighbour lies strictly closer to the goal than `from`.
    ///
    /// Ties resolve in [`Direction::ALL`] order.
    pub(crate) fn descent(&self, from: CellCoord) -> Option<Direction> {
        let here = self.distance(from)?;
        Direction::ALL.into_iter().find(|direction| {
            from.step(*direction)
                .and_then(|neighbor| self.distance(neighbor))
                .is_some_and(|distance| distance < here)
        })
    }
}

/// Reports whether an open 4-connected path joins `start` and `goal`.
pub(crate) fn goal_reachable(grid: &Grid, start: CellCoord, goal: CellCoord) -> bool {
    let mut field = DistanceField::default();
    field.rebuild(grid, goal, |cell| grid.is_wall(cell));
    field.distance(start).is_some()
}
