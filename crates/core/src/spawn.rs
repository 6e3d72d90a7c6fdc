//! Spawn policy - drop a new 2 or 4 into a random empty cell
//!
//! Randomness is injected so that a seeded RNG makes every turn reproducible.

use rand::Rng;

use crate::grid::Grid;
use crate::tile::Tile;
use crate::types::{Position, SPAWN_HIGH_PROBABILITY, SPAWN_HIGH_VALUE, SPAWN_LOW_VALUE};

/// Outcome of a spawn attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Spawn {
    /// A tile was placed; `grid` is the grid with the new tile
    Placed {
        grid: Grid,
        position: Position,
        value: u32,
    },
    /// Every cell is occupied; the session has no continuation
    NoEmptyCell,
}

/// Pick an empty cell uniformly and place a 2 (90%) or a 4 (10%) there.
///
/// The new tile gets a fresh id and `is_new = true`.
///
/// ```
/// use rand::{rngs::StdRng, SeedableRng};
/// use tui_2048_core::{spawn, Grid, Spawn};
///
/// let mut rng = StdRng::seed_from_u64(7);
/// match spawn(Grid::empty(), &mut rng) {
///     Spawn::Placed { grid, value, .. } => {
///         assert!(value == 2 || value == 4);
///         assert_eq!(grid.tiles().count(), 1);
///     }
///     Spawn::NoEmptyCell => unreachable!(),
/// }
/// ```
pub fn spawn<R: Rng + ?Sized>(mut grid: Grid, rng: &mut R) -> Spawn {
    let empties = grid.empty_positions();
    if empties.is_empty() {
        return Spawn::NoEmptyCell;
    }

    let position = empties[rng.gen_range(0..empties.len())];
    let value = if rng.gen_bool(SPAWN_HIGH_PROBABILITY) {
        SPAWN_HIGH_VALUE
    } else {
        SPAWN_LOW_VALUE
    };

    let id = grid.mint_id();
    grid.replace(Tile::new(value, position, id).with_new());

    Spawn::Placed {
        grid,
        position,
        value,
    }
}
