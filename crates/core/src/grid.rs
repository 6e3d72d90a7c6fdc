//! Grid module - the 4x4 playfield
//!
//! The grid is a flat, row-major array of 16 [`Tile`]s (`row * 4 + col`), so it
//! is `Clone` without heap allocation and cheap to pass by value between the
//! engine, the spawn policy and the session.
//!
//! The grid also owns the counter that mints [`TileId`]s, which keeps the
//! transformation engine a pure function of its input grid.

use std::fmt;

use arrayvec::ArrayVec;

use crate::tile::{Tile, TileId};
use crate::types::{Position, CELL_COUNT, GRID_SIZE};

/// One row or column of tiles, ordered by index
pub type Line = [Tile; GRID_SIZE];

/// The 4x4 playfield
#[derive(Debug, Clone)]
pub struct Grid {
    /// Flat array of cells, row-major order
    cells: [Tile; CELL_COUNT],
    /// Next id to hand out; ids start at 1 because 0 is `TileId::NONE`
    next_id: u64,
}

impl Grid {
    /// Create a grid with every cell empty
    pub fn empty() -> Self {
        Self {
            cells: std::array::from_fn(|i| Tile::empty(Position::from_index(i))),
            next_id: 1,
        }
    }

    /// The fixed opening position: a 2 at (0, 0) and a 2 at (2, 3)
    pub fn opening() -> Self {
        let mut grid = Self::empty();
        grid.place(2, Position::new(0, 0));
        grid.place(2, Position::new(2, 3));
        grid
    }

    /// Build a grid from plain values, minting ids for the non-empty cells
    ///
    /// ```
    /// use tui_2048_core::Grid;
    ///
    /// let grid = Grid::from_values([
    ///     [2, 0, 0, 0],
    ///     [0, 4, 0, 0],
    ///     [0, 0, 0, 0],
    ///     [0, 0, 0, 8],
    /// ]);
    /// assert_eq!(grid.mass(), 14);
    /// assert_eq!(grid.tiles().count(), 3);
    /// ```
    pub fn from_values(values: [[u32; GRID_SIZE]; GRID_SIZE]) -> Self {
        let mut grid = Self::empty();
        for (row, line) in values.iter().enumerate() {
            for (col, &value) in line.iter().enumerate() {
                if value != 0 {
                    grid.place(value, Position::new(row as u8, col as u8));
                }
            }
        }
        grid
    }

    /// Plain values, row-major
    pub fn values(&self) -> [[u32; GRID_SIZE]; GRID_SIZE] {
        let mut out = [[0u32; GRID_SIZE]; GRID_SIZE];
        for tile in &self.cells {
            let p = tile.position();
            out[p.row as usize][p.col as usize] = tile.value();
        }
        out
    }

    /// Get the tile at `position`, or `None` when out of bounds
    pub fn get(&self, position: Position) -> Option<&Tile> {
        if position.row as usize >= GRID_SIZE || position.col as usize >= GRID_SIZE {
            return None;
        }
        self.cells.get(position.index())
    }

    /// All 16 cells, row-major
    pub fn cells(&self) -> &[Tile] {
        &self.cells
    }

    /// Non-empty tiles, row-major
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> + '_ {
        self.cells.iter().filter(|t| !t.is_empty())
    }

    /// Positions of the empty cells, row-major (stack-only)
    pub fn empty_positions(&self) -> ArrayVec<Position, CELL_COUNT> {
        self.cells
            .iter()
            .filter(|t| t.is_empty())
            .map(|t| t.position())
            .collect()
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|t| !t.is_empty())
    }

    /// Sum of all tile values
    pub fn mass(&self) -> u32 {
        self.cells.iter().map(|t| t.value()).sum()
    }

    /// Highest tile value on the grid (0 when empty)
    pub fn highest_value(&self) -> u32 {
        self.cells.iter().map(|t| t.value()).max().unwrap_or(0)
    }

    /// Put a freshly minted tile at `position`, replacing whatever was there
    ///
    /// Returns `None` (and leaves the grid untouched) when out of bounds.
    pub fn place(&mut self, value: u32, position: Position) -> Option<Tile> {
        self.get(position)?;
        let id = self.mint_id();
        let tile = Tile::new(value, position, id);
        self.cells[position.index()] = tile;
        Some(tile)
    }

    pub(crate) fn replace(&mut self, tile: Tile) {
        let index = tile.position().index();
        self.cells[index] = tile;
    }

    pub(crate) fn mint_id(&mut self) -> TileId {
        let id = TileId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1).max(1);
        id
    }

    /// Same grid mirrored along the main diagonal
    pub fn transposed(&self) -> Self {
        let mut out = self.clone();
        for tile in &self.cells {
            let mut t = *tile;
            t.set_position(tile.position().transposed());
            out.replace(t);
        }
        out
    }

    pub(crate) fn row(&self, row: usize) -> Line {
        let start = row * GRID_SIZE;
        std::array::from_fn(|col| self.cells[start + col])
    }

    pub(crate) fn set_row(&mut self, row: usize, line: Line) {
        let start = row * GRID_SIZE;
        self.cells[start..start + GRID_SIZE].copy_from_slice(&line);
    }

    /// Rewrite every tile's position to match its slot
    pub(crate) fn reindex(&mut self) {
        for (index, tile) in self.cells.iter_mut().enumerate() {
            tile.set_position(Position::from_index(index));
        }
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::empty()
    }
}

impl PartialEq for Grid {
    fn eq(&self, other: &Self) -> bool {
        self.cells == other.cells
    }
}

impl Eq for Grid {}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..GRID_SIZE {
            for (col, tile) in self.row(row).iter().enumerate() {
                if col > 0 {
                    f.write_str("|")?;
                }
                if tile.is_empty() {
                    write!(f, "{:>5}", ".")?;
                } else {
                    write!(f, "{:>5}", tile.value())?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
