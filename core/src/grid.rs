//! Dense wall/open storage for a single maze level.

use serde::{Deserialize, Serialize};

use crate::{CellCoord, Direction};

/// State of a single maze cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    /// Traversable floor.
    #[default]
    Open,
    /// Impassable wall.
    Wall,
}

impl Cell {
    /// Reports whether the cell blocks movement.
    #[must_use]
    pub const fn is_wall(self) -> bool {
        matches!(self, Self::Wall)
    }
}

/// Row-major grid of cells with fixed dimensions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    columns: u32,
    rows: u32,
    cells: Vec<Cell>,
}

impl Grid {
    /// Creates a grid with every cell open.
    ///
    /// A zero dimension, or an area that cannot be addressed on this platform,
    /// yields the empty 0x0 grid so the dimensions always match the storage.
    #[must_use]
    pub fn new(columns: u32, rows: u32) -> Self {
        let capacity = usize::try_from(u64::from(columns) * u64::from(rows)).unwrap_or(0);
        if capacity == 0 {
            return Self {
                columns: 0,
                rows: 0,
                cells: Vec::new(),
            };
        }
        Self {
            columns,
            rows,
            cells: vec![Cell::Open; capacity],
        }
    }

    /// Parses a grid drawn with `#` for walls and any other character for floor.
    ///
    /// Returns `None` when no rows are supplied or the rows differ in width.
    #[must_use]
    pub fn from_ascii(lines: &[&str]) -> Option<Self> {
        let first = lines.first()?;
        let width = first.chars().count();
        if width == 0 {
            return None;
        }

        let columns = u32::try_from(width).ok()?;
        let rows = u32::try_from(lines.len()).ok()?;
        let mut cells = Vec::with_capacity(width * lines.len());
        for line in lines {
            if line.chars().count() != width {
                return None;
            }
            cells.extend(line.chars().map(|symbol| {
                if symbol == '#' {
                    Cell::Wall
                } else {
                    Cell::Open
                }
            }));
        }

        Some(Self {
            columns,
            rows,
            cells,
        })
    }

    /// Number of columns contained in the grid.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of rows contained in the grid.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Total number of cells.
    #[must_use]
    pub fn area(&self) -> usize {
        self.cells.len()
    }

    /// Reports whether the grid holds no cells at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Reports whether the coordinate lies inside the grid.
    #[must_use]
    pub const fn contains(&self, cell: CellCoord) -> bool {
        cell.column() < self.columns && cell.row() < self.rows
    }

    /// Returns the cell stored at the coordinate, if it lies inside the grid.
    #[must_use]
    pub fn cell(&self, cell: CellCoord) -> Option<Cell> {
        self.index(cell)
            .and_then(|index| self.cells.get(index).copied())
    }

    /// Reports whether the coordinate lies inside the grid and is not a wall.
    #[must_use]
    pub fn is_open(&self, cell: CellCoord) -> bool {
        matches!(self.cell(cell), Some(Cell::Open))
    }

    /// Reports whether the coordinate lies inside the grid and is a wall.
    #[must_use]
    pub fn is_wall(&self, cell: CellCoord) -> bool {
        matches!(self.cell(cell), Some(Cell::Wall))
    }

    /// Turns the cell into a wall. Coordinates outside the grid are ignored.
    pub fn set_wall(&mut self, cell: CellCoord) {
        if let Some(slot) = self.slot_mut(cell) {
            *slot = Cell::Wall;
        }
    }

    /// Opens the cell, returning whether a wall was removed.
    pub fn clear_wall(&mut self, cell: CellCoord) -> bool {
        match self.slot_mut(cell) {
            Some(slot) if slot.is_wall() => {
                *slot = Cell::Open;
                true
            }
            _ => false,
        }
    }

    /// Neighbouring cell in `direction`, if it lies inside the grid.
    #[must_use]
    pub fn neighbor(&self, cell: CellCoord, direction: Direction) -> Option<CellCoord> {
        cell.step(direction).filter(|next| self.contains(*next))
    }

    /// Counts the wall cells in the grid.
    #[must_use]
    pub fn wall_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_wall()).count()
    }

    /// Iterates over every cell in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (CellCoord, Cell)> + '_ {
        let columns = self.columns.max(1);
        self.cells.iter().enumerate().map(move |(index, cell)| {
            let index = index as u32;
            (CellCoord::new(index % columns, index / columns), *cell)
        })
    }

    /// Row-major offset of the coordinate, if it lies inside the grid.
    #[must_use]
    pub fn index(&self, cell: CellCoord) -> Option<usize> {
        if !self.contains(cell) {
            return None;
        }
        let row = usize::try_from(cell.row()).ok()?;
        let column = usize::try_from(cell.column()).ok()?;
        let width = usize::try_from(self.columns).ok()?;
        row.checked_mul(width)?.checked_add(column)
    }

    fn slot_mut(&mut self, cell: CellCoord) -> Option<&mut Cell> {
        let index = self.index(cell)?;
        self.cells.get_mut(index)
    }
}
