//! Grid transformation engine - slide and merge tiles in one direction
//!
//! [`transform`] is a pure function: it takes a grid and a direction and
//! returns the next grid plus the score gained by merges. Nothing is spawned
//! here; see [`crate::spawn`].
//!
//! # Algorithm
//!
//! Every move is reduced to one line algorithm run on four independent lines.
//! LEFT/RIGHT work on rows directly; UP/DOWN transpose the grid, run the row
//! algorithm (UP as LEFT, DOWN as RIGHT) and transpose back.
//!
//! For a single line, with the "near edge" being the edge tiles travel toward:
//!
//! 1. Scan from the near edge outward. For each non-empty cell, look further
//!    outward past empty cells for the next non-empty cell.
//! 2. Equal values merge: the far cell becomes a new tile of double value
//!    (`merged`, fresh id), the current cell becomes empty, and the doubled
//!    value is added to the score. The scan resumes after the merged tile, so
//!    a tile merges at most once per move.
//! 3. Compact: non-empty tiles slide to the near edge keeping their order.
//!
//! Finally every tile's position is rewritten to its slot, `is_new` is cleared
//! and `merged` remains only on tiles produced by this move.
//!
//! ```
//! use tui_2048_core::{transform, Grid};
//! use tui_2048_core::types::Direction;
//!
//! let grid = Grid::from_values([
//!     [2, 2, 2, 2],
//!     [0, 2, 0, 2],
//!     [2, 0, 0, 4],
//!     [0, 0, 0, 0],
//! ]);
//! let out = transform(&grid, Direction::Left);
//! assert_eq!(out.grid.values(), [
//!     [4, 4, 0, 0],
//!     [4, 0, 0, 0],
//!     [2, 4, 0, 0],
//!     [0, 0, 0, 0],
//! ]);
//! assert_eq!(out.score_gained, 12);
//! ```

use crate::grid::{Grid, Line};
use crate::tile::{Tile, TileId};
use crate::types::{Direction, GRID_SIZE};

/// Result of applying one direction to a grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transformed {
    pub grid: Grid,
    /// Sum of the values produced by merges
    pub score_gained: u32,
}

impl Transformed {
    /// Whether any tile moved or merged relative to `before`
    pub fn changed(&self, before: &Grid) -> bool {
        self.grid != *before
    }
}

/// Slide and merge every line of `grid` toward `direction`
pub fn transform(grid: &Grid, direction: Direction) -> Transformed {
    let vertical = direction.is_vertical();
    let toward_start = direction.toward_start();

    let mut work = if vertical {
        grid.transposed()
    } else {
        grid.clone()
    };

    let mut score_gained = 0u32;
    for row in 0..GRID_SIZE {
        let line = work.row(row);
        let (line, gained) = slide_line(line, toward_start, || work.mint_id());
        work.set_row(row, line);
        score_gained += gained;
    }

    if vertical {
        work = work.transposed();
    }
    work.reindex();

    Transformed {
        grid: work,
        score_gained,
    }
}

/// True if at least one direction would change the grid
pub fn can_move(grid: &Grid) -> bool {
    Direction::ALL
        .iter()
        .any(|&d| transform(grid, d).changed(grid))
}

/// Merge then compact one line. Tiles travel toward index 0 when
/// `toward_start`, toward the last index otherwise.
fn slide_line(
    mut line: Line,
    toward_start: bool,
    mut mint: impl FnMut() -> TileId,
) -> (Line, u32) {
    // Line indices in travel order: near edge first.
    let order: [usize; GRID_SIZE] = if toward_start {
        std::array::from_fn(|k| k)
    } else {
        std::array::from_fn(|k| GRID_SIZE - 1 - k)
    };

    for tile in line.iter_mut() {
        tile.settle();
    }

    let mut gained = 0u32;
    let mut k = 0;
    while k < GRID_SIZE {
        let here = order[k];
        if line[here].is_empty() {
            k += 1;
            continue;
        }

        let next = (k + 1..GRID_SIZE).find(|&j| !line[order[j]].is_empty());
        match next {
            Some(j) if line[order[j]].value() == line[here].value() => {
                let far = order[j];
                let value = line[here].value() * 2;
                line[far] = Tile::new(value, line[far].position(), mint()).with_merged();
                line[here] = Tile::empty(line[here].position());
                gained += value;
                // The merged tile is done for this move.
                k = j + 1;
            }
            _ => k += 1,
        }
    }

    let mut compacted: Line = std::array::from_fn(|i| Tile::empty(line[i].position()));
    let mut slot = 0;
    for &i in &order {
        if !line[i].is_empty() {
            compacted[order[slot]] = line[i];
            slot += 1;
        }
    }

    (compacted, gained)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Position;

    fn row_grid(row: [u32; 4]) -> Grid {
        Grid::from_values([row, [0; 4], [0; 4], [0; 4]])
    }

    fn col_grid(col: [u32; 4]) -> Grid {
        Grid::from_values(std::array::from_fn(|r| [col[r], 0, 0, 0]))
    }

    fn first_row(grid: &Grid) -> [u32; 4] {
        grid.values()[0]
    }

    fn first_col(grid: &Grid) -> [u32; 4] {
        let v = grid.values();
        std::array::from_fn(|r| v[r][0])
    }

    #[test]
    fn four_equal_tiles_merge_pairwise_without_chaining() {
        let out = transform(&row_grid([2, 2, 2, 2]), Direction::Left);
        assert_eq!(first_row(&out.grid), [4, 4, 0, 0]);
        assert_eq!(out.score_gained, 8);
    }

    #[test]
    fn merge_across_gaps() {
        let out = transform(&row_grid([0, 2, 0, 2]), Direction::Left);
        assert_eq!(first_row(&out.grid), [4, 0, 0, 0]);
        assert_eq!(out.score_gained, 4);
    }

    #[test]
    fn different_values_only_compact() {
        let out = transform(&row_grid([2, 0, 0, 4]), Direction::Left);
        assert_eq!(first_row(&out.grid), [2, 4, 0, 0]);
        assert_eq!(out.score_gained, 0);
    }

    #[test]
    fn fresh_merge_does_not_merge_again() {
        let out = transform(&row_grid([2, 2, 4, 0]), Direction::Left);
        assert_eq!(first_row(&out.grid), [4, 4, 0, 0]);
        assert_eq!(out.score_gained, 4);
    }

    #[test]
    fn right_mirrors_left() {
        let out = transform(&row_grid([2, 2, 2, 0]), Direction::Right);
        assert_eq!(first_row(&out.grid), [0, 0, 2, 4]);
        assert_eq!(out.score_gained, 4);

        let out = transform(&row_grid([4, 4, 8, 8]), Direction::Right);
        assert_eq!(first_row(&out.grid), [0, 0, 8, 16]);
        assert_eq!(out.score_gained, 24);
    }

    #[test]
    fn up_and_down_work_on_columns() {
        let out = transform(&col_grid([2, 0, 2, 8]), Direction::Up);
        assert_eq!(first_col(&out.grid), [4, 8, 0, 0]);
        assert_eq!(out.score_gained, 4);

        let out = transform(&col_grid([2, 0, 2, 8]), Direction::Down);
        assert_eq!(first_col(&out.grid), [0, 0, 4, 8]);
        assert_eq!(out.score_gained, 4);
    }

    #[test]
    fn empty_grid_is_a_no_op() {
        let grid = Grid::empty();
        for d in Direction::ALL {
            let out = transform(&grid, d);
            assert!(!out.changed(&grid));
            assert_eq!(out.score_gained, 0);
        }
    }

    #[test]
    fn positions_are_rewritten_after_moves() {
        let grid = Grid::from_values([
            [0, 0, 0, 2],
            [0, 4, 0, 0],
            [0, 0, 0, 0],
            [8, 0, 0, 8],
        ]);
        for d in Direction::ALL {
            let out = transform(&grid, d);
            for (index, tile) in out.grid.cells().iter().enumerate() {
                assert_eq!(tile.position(), Position::from_index(index), "{d:?}");
            }
        }
    }

    #[test]
    fn moved_tiles_keep_id_and_merges_mint_new_ids() {
        let grid = row_grid([0, 0, 0, 2]);
        let id = grid.get(Position::new(0, 3)).unwrap().id();
        let out = transform(&grid, Direction::Left);
        let moved = out.grid.get(Position::new(0, 0)).unwrap();
        assert_eq!(moved.id(), id);
        assert!(!moved.merged());

        let grid = row_grid([2, 2, 0, 0]);
        let parents: Vec<_> = grid.tiles().map(|t| t.id()).collect();
        let out = transform(&grid, Direction::Left);
        let merged = out.grid.get(Position::new(0, 0)).unwrap();
        assert!(merged.merged());
        assert!(!parents.contains(&merged.id()));
    }

    #[test]
    fn flags_do_not_survive_the_next_move() {
        let grid = row_grid([2, 2, 0, 0]);
        let first = transform(&grid, Direction::Left).grid;
        assert!(first.tiles().any(|t| t.merged()));

        let second = transform(&first, Direction::Right).grid;
        assert!(second.tiles().all(|t| !t.merged() && !t.is_new()));
    }

    #[test]
    fn can_move_detects_stuck_boards() {
        let stuck = Grid::from_values([
            [2, 4, 2, 4],
            [4, 2, 4, 2],
            [2, 4, 2, 4],
            [4, 2, 4, 2],
        ]);
        assert!(!can_move(&stuck));

        let mergeable = Grid::from_values([
            [2, 2, 4, 8],
            [4, 8, 16, 32],
            [8, 16, 32, 64],
            [16, 32, 64, 128],
        ]);
        assert!(mergeable.is_full());
        assert!(can_move(&mergeable));
    }
}
