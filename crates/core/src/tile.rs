//! Tile module - one cell's value plus per-turn presentation metadata
//!
//! A tile is a small `Copy` value. Equality is by value and position only,
//! which is what a renderer diffs on; the id and the transient `merged` /
//! `is_new` flags are metadata for animation.

use crate::types::Position;

/// Stable identity of a physical tile across turns.
///
/// Ids are minted by the [`Grid`](crate::grid::Grid) that owns the tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct TileId(pub u64);

impl TileId {
    /// Id carried by empty cells
    pub const NONE: TileId = TileId(0);

    pub fn is_none(&self) -> bool {
        *self == Self::NONE
    }
}

/// One cell of the grid
#[derive(Debug, Clone, Copy)]
pub struct Tile {
    value: u32,
    position: Position,
    merged: bool,
    is_new: bool,
    id: TileId,
}

impl Tile {
    /// Create a non-empty tile with an already minted id
    pub fn new(value: u32, position: Position, id: TileId) -> Self {
        Self {
            value,
            position,
            merged: false,
            is_new: false,
            id,
        }
    }

    /// Create an empty cell
    pub fn empty(position: Position) -> Self {
        Self {
            value: 0,
            position,
            merged: false,
            is_new: false,
            id: TileId::NONE,
        }
    }

    /// Mark as produced by a merge this turn
    pub fn with_merged(mut self) -> Self {
        self.merged = true;
        self
    }

    /// Mark as spawned this turn
    pub fn with_new(mut self) -> Self {
        self.is_new = true;
        self
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn merged(&self) -> bool {
        self.merged
    }

    pub fn is_new(&self) -> bool {
        self.is_new
    }

    pub fn id(&self) -> TileId {
        self.id
    }

    pub fn is_empty(&self) -> bool {
        self.value == 0
    }

    pub(crate) fn set_position(&mut self, position: Position) {
        self.position = position;
    }

    /// Drop the per-turn flags; the tile is carried over unchanged otherwise
    pub(crate) fn settle(&mut self) {
        self.merged = false;
        self.is_new = false;
    }
}

impl PartialEq for Tile {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value && self.position == other.position
    }
}

impl Eq for Tile {}
