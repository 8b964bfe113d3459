//! Recorded scrambles.
//!
//! The expected step lists and layouts below were recorded from the
//! generator and pin its output: any change to the RNG, the draw order or
//! the operation table shows up here.

use mosaic_puzzle::{TransformStep, generate};
use mosaic_render::{Axis, PixelImage, Rgba, Rotation, TileCoord, TileGrid};
use pretty_assertions::assert_eq;

fn rotate(x: u32, y: u32, degrees: i32) -> TransformStep {
    TransformStep::Rotate {
        tile: TileCoord::new(x, y),
        rotation: Rotation::from_degrees(degrees).expect("multiple of 90"),
    }
}

fn flip(x: u32, y: u32, axis: Axis) -> TransformStep {
    TransformStep::Flip {
        tile: TileCoord::new(x, y),
        axis,
    }
}

fn swap(a: (u32, u32), b: (u32, u32)) -> TransformStep {
    TransformStep::Swap {
        a: a.into(),
        b: b.into(),
    }
}

/// Solid colour for the tile that starts at `(x, y)` in a 4x4 grid.
fn solid(x: u32, y: u32) -> Rgba {
    Rgba::rgb(x as u8 * 60, y as u8 * 60, 200)
}

/// 4x4 grid of 10x10 solid-colour tiles.
fn solid_grid() -> TileGrid {
    let mut img = PixelImage::new(40, 40);
    for ty in 0..4 {
        for tx in 0..4 {
            img.fill_rect(
                mosaic_core::geometry::Rect::new(tx * 10, ty * 10, 10, 10),
                solid(tx, ty),
            );
        }
    }
    TileGrid::from_image(&img, 10).expect("40 is divisible by 10")
}

/// 4x4 grid of 2x2 tiles where every pixel carries a unique id in its red
/// channel: `(tile_y * 4 + tile_x) * 4 + py * 2 + px`.
fn marked_grid() -> TileGrid {
    let mut img = PixelImage::new(8, 8);
    for y in 0..8 {
        for x in 0..8 {
            let (tx, ty, px, py) = (x / 2, y / 2, x % 2, y % 2);
            let id = (ty * 4 + tx) * 4 + py * 2 + px;
            img.set(x, y, Rgba::rgb(id as u8, 0, 0));
        }
    }
    TileGrid::from_image(&img, 2).expect("8 is divisible by 2")
}

/// Pixel ids of every tile, row by row, each tile read
/// top-left, top-right, bottom-left, bottom-right.
fn marked_layout(grid: &TileGrid) -> Vec<Vec<[u8; 4]>> {
    (0..grid.tiles_y())
        .map(|y| {
            (0..grid.tiles_x())
                .map(|x| {
                    let tile = grid.tile(TileCoord::new(x, y)).expect("in grid");
                    let id = |px, py| tile.get(px, py).expect("in tile").r;
                    [id(0, 0), id(1, 0), id(0, 1), id(1, 1)]
                })
                .collect()
        })
        .collect()
}

#[test]
fn solid_tiles_seed_42_difficulty_2() {
    let mut grid = solid_grid();
    let original = grid.clone();
    let puzzle = generate(&mut grid, 2, Some(42)).expect("valid grid");

    assert_eq!(
        puzzle.inverse_steps(),
        &[
            rotate(0, 2, 270),
            rotate(0, 2, 90),
            flip(0, 0, Axis::Vertical),
            rotate(2, 2, 270),
            flip(2, 0, Axis::Vertical),
            flip(0, 3, Axis::Vertical),
            rotate(1, 0, 90),
            flip(2, 0, Axis::Horizontal),
        ]
    );

    // No swaps were drawn and solid tiles are invariant under rotation and
    // flips, so the scrambled grid still shows every tile in place.
    for y in 0..4 {
        for x in 0..4 {
            let tile = puzzle.puzzle_tiles().tile(TileCoord::new(x, y)).expect("in grid");
            assert_eq!(tile.get(5, 5), Some(solid(x, y)));
        }
    }

    let solved = puzzle.replay_solution().expect("steps in bounds");
    assert_eq!(solved.to_image().as_bytes(), original.to_image().as_bytes());
}

#[test]
fn marked_tiles_seed_1_difficulty_2() {
    let mut grid = marked_grid();
    let puzzle = generate(&mut grid, 2, Some(1)).expect("valid grid");

    assert_eq!(
        puzzle.inverse_steps(),
        &[
            swap((2, 2), (0, 1)),
            swap((0, 1), (2, 3)),
            rotate(0, 2, 180),
            flip(1, 2, Axis::Vertical),
            rotate(3, 1, 270),
            flip(3, 2, Axis::Horizontal),
            rotate(1, 1, 180),
            rotate(2, 2, 90),
        ]
    );

    assert_eq!(
        marked_layout(puzzle.puzzle_tiles()),
        vec![
            vec![[0, 1, 2, 3], [4, 5, 6, 7], [8, 9, 10, 11], [12, 13, 14, 15]],
            vec![[42, 40, 43, 41], [23, 22, 21, 20], [24, 25, 26, 27], [29, 31, 28, 30]],
            vec![[35, 34, 33, 32], [38, 39, 36, 37], [56, 57, 58, 59], [45, 44, 47, 46]],
            vec![[48, 49, 50, 51], [52, 53, 54, 55], [16, 17, 18, 19], [60, 61, 62, 63]],
        ]
    );

    let solved = puzzle.replay_solution().expect("steps in bounds");
    assert_eq!(marked_layout(&solved), marked_layout(&marked_grid()));
    assert!(puzzle.is_solved(&solved));
}
