//! Special-tile collections placed on top of the maze grid.

use serde::{Deserialize, Serialize};

use crate::CellCoord;

/// Categories of special tiles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileCategory {
    /// Ends the run when the player attempts to step onto it.
    Trap,
    /// Relocates the player to its paired teleporter.
    Teleporter,
    /// Grants the player a key when collected.
    Key,
    /// Blocks the player unless a key is spent on it.
    Lock,
}

impl TileCategory {
    /// Every category, in placement order.
    pub const ALL: [TileCategory; 4] = [
        TileCategory::Trap,
        TileCategory::Teleporter,
        TileCategory::Key,
        TileCategory::Lock,
    ];
}

/// Ordered special-tile collections for a single level.
///
/// Teleporters pair by index: the tile at `2k` leads to `2k + 1` and back.
/// Keys and locks are removed as they are consumed, so the registry only
/// shrinks while a level is played.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TileRegistry {
    traps: Vec<CellCoord>,
    teleporters: Vec<CellCoord>,
    keys: Vec<CellCoord>,
    locks: Vec<CellCoord>,
}

impl TileRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a tile to the end of the category's collection.
    pub fn push(&mut self, category: TileCategory, cell: CellCoord) {
        self.collection_mut(category).push(cell);
    }

    /// Reports whether the category contains the coordinate.
    #[must_use]
    pub fn contains(&self, category: TileCategory, cell: CellCoord) -> bool {
        self.collection(category).contains(&cell)
    }

    /// Removes the first occurrence of the coordinate, returning whether one existed.
    pub fn remove(&mut self, category: TileCategory, cell: CellCoord) -> bool {
        let collection = self.collection_mut(category);
        match collection.iter().position(|entry| *entry == cell) {
            Some(index) => {
                let _ = collection.remove(index);
                true
            }
            None => false,
        }
    }

    /// First category that contains the coordinate, in [`TileCategory::ALL`] order.
    #[must_use]
    pub fn category_at(&self, cell: CellCoord) -> Option<TileCategory> {
        TileCategory::ALL
            .into_iter()
            .find(|category| self.contains(*category, cell))
    }

    /// Reports whether any category contains the coordinate.
    #[must_use]
    pub fn is_special(&self, cell: CellCoord) -> bool {
        self.category_at(cell).is_some()
    }

    /// Index of the teleporter paired with the one at `cell`.
    ///
    /// Returns `None` when `cell` is not a teleporter or its partner is missing.
    #[must_use]
    pub fn pair_index_of(&self, cell: CellCoord) -> Option<usize> {
        let index = self.teleporters.iter().position(|entry| *entry == cell)?;
        let partner = if index % 2 == 0 {
            index + 1
        } else {
            index - 1
        };
        (partner < self.teleporters.len()).then_some(partner)
    }

    /// Coordinate of the teleporter paired with the one at `cell`.
    #[must_use]
    pub fn pair_of(&self, cell: CellCoord) -> Option<CellCoord> {
        self.pair_index_of(cell)
            .and_then(|index| self.teleporters.get(index).copied())
    }

    /// Tiles of the provided category, in placement order.
    #[must_use]
    pub fn cells(&self, category: TileCategory) -> &[CellCoord] {
        self.collection(category)
    }

    /// Trap tiles in placement order.
    #[must_use]
    pub fn traps(&self) -> &[CellCoord] {
        &self.traps
    }

    /// Teleporter tiles in placement order.
    #[must_use]
    pub fn teleporters(&self) -> &[CellCoord] {
        &self.teleporters
    }

    /// Uncollected key tiles.
    #[must_use]
    pub fn keys(&self) -> &[CellCoord] {
        &self.keys
    }

    /// Unopened lock tiles.
    #[must_use]
    pub fn locks(&self) -> &[CellCoord] {
        &self.locks
    }

    /// Total number of tiles across every category.
    #[must_use]
    pub fn len(&self) -> usize {
        self.traps.len() + self.teleporters.len() + self.keys.len() + self.locks.len()
    }

    /// Reports whether the registry holds no tiles at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates over every tile together with its category.
    pub fn iter(&self) -> impl Iterator<Item = (TileCategory, CellCoord)> + '_ {
        TileCategory::ALL.into_iter().flat_map(move |category| {
            self.collection(category)
                .iter()
                .map(move |cell| (category, *cell))
        })
    }

    fn collection(&self, category: TileCategory) -> &Vec<CellCoord> {
        match category {
            TileCategory::Trap => &self.traps,
            TileCategory::Teleporter => &self.teleporters,
            TileCategory::Key => &self.keys,
            TileCategory::Lock => &self.locks,
        }
    }

    fn collection_mut(&mut self, category: TileCategory) -> &mut Vec<CellCoord> {
        match category {
            TileCategory::Trap => &mut self.traps,
            TileCategory::Teleporter => &mut self.teleporters,
            TileCategory::Key => &mut self.keys,
            TileCategory::Lock => &mut self.locks,
        }
    }
}
