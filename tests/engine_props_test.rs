//! Property tests for the slide + merge engine.

use proptest::prelude::*;

use tui_2048::core::{transform, Grid};
use tui_2048::types::Direction;

fn tile_value() -> impl Strategy<Value = u32> {
    prop_oneof![
        3 => Just(0u32),
        5 => (1u32..=11).prop_map(|exp| 1 << exp),
    ]
}

fn grid_values() -> impl Strategy<Value = [[u32; 4]; 4]> {
    prop::array::uniform4(prop::array::uniform4(tile_value()))
}

fn direction() -> impl Strategy<Value = Direction> {
    prop::sample::select(Direction::ALL.to_vec())
}

fn row_left(values: [u32; 4]) -> ([u32; 4], u32) {
    let grid = Grid::from_values([values, [0; 4], [0; 4], [0; 4]]);
    let out = transform(&grid, Direction::Left);
    (out.grid.values()[0], out.score_gained)
}

#[test]
fn four_equal_tiles_merge_pairwise_without_chaining() {
    assert_eq!(row_left([2, 2, 2, 2]), ([4, 4, 0, 0], 8));
}

#[test]
fn gapped_pair_merges() {
    assert_eq!(row_left([0, 2, 0, 2]), ([4, 0, 0, 0], 4));
}

#[test]
fn unequal_tiles_only_compact() {
    assert_eq!(row_left([2, 0, 0, 4]), ([2, 4, 0, 0], 0));
}

#[test]
fn merged_tile_does_not_absorb_next_equal() {
    assert_eq!(row_left([4, 2, 2, 0]), ([4, 4, 0, 0], 4));
    assert_eq!(row_left([2, 2, 4, 4]), ([4, 8, 0, 0], 12));
}

proptest! {
    #[test]
    fn mass_is_conserved(values in grid_values(), dir in direction()) {
        let grid = Grid::from_values(values);
        let out = transform(&grid, dir);
        prop_assert_eq!(out.grid.mass(), grid.mass());
    }

    #[test]
    fn score_is_the_sum_of_merged_tiles(values in grid_values(), dir in direction()) {
        let grid = Grid::from_values(values);
        let out = transform(&grid, dir);
        let merged: u32 = out.grid.tiles().filter(|t| t.merged()).map(|t| t.value()).sum();
        prop_assert_eq!(out.score_gained, merged);

        // Every merge removes exactly one tile.
        let merges = out.grid.tiles().filter(|t| t.merged()).count();
        prop_assert_eq!(grid.tiles().count(), out.grid.tiles().count() + merges);
    }

    #[test]
    fn values_stay_zero_or_powers_of_two(values in grid_values(), dir in direction()) {
        let out = transform(&Grid::from_values(values), dir);
        for row in out.grid.values() {
            for v in row {
                prop_assert!(v == 0 || (v >= 2 && v.is_power_of_two()), "bad value {}", v);
            }
        }
    }

    #[test]
    fn positions_match_slots_and_no_tile_is_new(values in grid_values(), dir in direction()) {
        let out = transform(&Grid::from_values(values), dir);
        for (index, tile) in out.grid.cells().iter().enumerate() {
            prop_assert_eq!(tile.position().index(), index);
            prop_assert!(!tile.is_new());
        }
    }

    #[test]
    fn settled_grid_is_idempotent(values in grid_values(), dir in direction()) {
        let first = transform(&Grid::from_values(values), dir);
        if first.score_gained == 0 {
            let second = transform(&first.grid, dir);
            prop_assert!(!second.changed(&first.grid));
            prop_assert_eq!(second.score_gained, 0);
        }
    }

    #[test]
    fn unchanged_move_means_equal_grid(values in grid_values(), dir in direction()) {
        let grid = Grid::from_values(values);
        let out = transform(&grid, dir);
        prop_assert_eq!(out.changed(&grid), out.grid != grid);
    }

    #[test]
    fn right_mirrors_left(values in grid_values()) {
        let grid = Grid::from_values(values);
        let mirrored = Grid::from_values(values.map(|mut row| { row.reverse(); row }));

        let right = transform(&grid, Direction::Right);
        let left = transform(&mirrored, Direction::Left);
        let back = left.grid.values().map(|mut row| { row.reverse(); row });

        prop_assert_eq!(right.grid.values(), back);
        prop_assert_eq!(right.score_gained, left.score_gained);
    }
}
