//! Rejection-sampled placement of traps, teleporters, keys and locks.

use maze_runner_core::{CellCoord, Grid, TileCategory, TileRegistry};
use rand::Rng;

use crate::tuning::TileCounts;

/// Placement ran out of draws before finding a free cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct PlacementExhausted {
    pub(crate) category: TileCategory,
    pub(crate) placed: usize,
}

/// Places every tile in `counts` on free open cells of `grid`.
///
/// Order is fixed: traps, then both ends of each teleporter pair, then a key
/// followed by its lock for each key/lock pair. Every tile receives at most
/// `budget` draws.
pub(crate) fn place_special_tiles<R: Rng + ?Sized>(
    grid: &Grid,
    start: CellCoord,
    goal: CellCoord,
    counts: TileCounts,
    budget: usize,
    rng: &mut R,
) -> Result<TileRegistry, PlacementExhausted> {
    let mut tiles = TileRegistry::new();
    let mut sequence = Vec::new();
    sequence.extend((0..counts.traps).map(|_| TileCategory::Trap));
    for _ in 0..counts.teleporter_pairs {
        sequence.extend([TileCategory::Teleporter, TileCategory::Teleporter]);
    }
    for _ in 0..counts.key_lock_pairs {
        sequence.extend([TileCategory::Key, TileCategory::Lock]);
    }

    for category in sequence {
        let Some(cell) = sample_free_cell(grid, &tiles, start, goal, budget, rng) else {
            return Err(PlacementExhausted {
                category,
                placed: tiles.len(),
            });
        };
        tiles.push(category, cell);
    }

    Ok(tiles)
}

fn sample_free_cell<R: Rng + ?Sized>(
    grid: &Grid,
    tiles: &TileRegistry,
    start: CellCoord,
    goal: CellCoord,
    budget: usize,
    rng: &mut R,
) -> Option<CellCoord> {
    if grid.is_empty() {
        return None;
    }
    (0..budget).find_map(|_| {
        let column = rng.gen_range(0..grid.columns());
        let row = rng.gen_range(0..grid.rows());
        let cell = CellCoord::new(column, row);
        let free = grid.is_open(cell) && cell != start && cell != goal && !tiles.is_special(cell);
        free.then_some(cell)
    })
}
