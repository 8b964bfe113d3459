#![forbid(unsafe_code)]

//! Scramble generation.
//!
//! Each scramble step picks a target tile, then one of six equally likely
//! operations: swap with a second random tile, horizontal flip, vertical
//! flip, or a counter-clockwise rotation by 90, 180 or 270 degrees. The
//! inverse of every applied step is recorded and the list is reversed at the
//! end, so replaying it front to back undoes the scramble.
//!
//! Draw order per step is fixed (target x, target y, operation, then the
//! second tile for swaps). Changing it changes every recorded puzzle.

use mosaic_render::{Axis, Rotation, ShapeError, TileCoord, TileGrid};
use rand::Rng;
use tracing::{debug, info, info_span};

use crate::rng::SplitMix64;
use crate::step::TransformStep;

/// Scramble steps per unit of difficulty.
pub const STEPS_PER_DIFFICULTY: u32 = 4;

/// Upper bound on the inverse-step buffer reserved up front. Longer
/// scrambles grow it as they go.
const RESERVED_STEPS: usize = 1024;

/// A scrambled grid together with the way back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Puzzle {
    seed: u64,
    difficulty: u32,
    original_tiles: TileGrid,
    puzzle_tiles: TileGrid,
    inverse_steps: Vec<TransformStep>,
}

impl Puzzle {
    /// Seed that reproduces this puzzle.
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    pub const fn difficulty(&self) -> u32 {
        self.difficulty
    }

    /// Snapshot taken before any mutation.
    pub fn original_tiles(&self) -> &TileGrid {
        &self.original_tiles
    }

    /// Snapshot taken after the scramble.
    pub fn puzzle_tiles(&self) -> &TileGrid {
        &self.puzzle_tiles
    }

    /// Steps that take `puzzle_tiles` back to `original_tiles`, in order.
    pub fn inverse_steps(&self) -> &[TransformStep] {
        &self.inverse_steps
    }

    /// Replay the inverse steps against a copy of the scrambled grid.
    pub fn replay_solution(&self) -> Result<TileGrid, ShapeError> {
        let mut grid = self.puzzle_tiles.clone();
        for step in &self.inverse_steps {
            step.apply(&mut grid)?;
        }
        Ok(grid)
    }

    /// Whether `grid` is pixel-identical to the unscrambled image.
    pub fn is_solved(&self, grid: &TileGrid) -> bool {
        *grid == self.original_tiles
    }
}

/// Pick a fresh seed from the process-wide random source.
pub fn random_seed() -> u64 {
    rand::rng().random()
}

fn random_tile(rng: &mut SplitMix64, grid: &TileGrid) -> TileCoord {
    let x = rng.below(grid.tiles_x());
    let y = rng.below(grid.tiles_y());
    TileCoord::new(x, y)
}

/// Scramble `grid` in place and return the resulting [`Puzzle`].
///
/// `difficulty * 4` steps are applied. Without a seed one is drawn at random
/// and recorded on the puzzle. The same grid, difficulty and seed always
/// produce the same scramble and the same inverse steps.
pub fn generate(
    grid: &mut TileGrid,
    difficulty: u32,
    seed: Option<u64>,
) -> Result<Puzzle, ShapeError> {
    let seed = seed.unwrap_or_else(random_seed);
    let step_count = difficulty.saturating_mul(STEPS_PER_DIFFICULTY);
    let _span = info_span!("mosaic.puzzle.generate", seed, difficulty, step_count).entered();

    let original_tiles = grid.clone();
    let mut rng = SplitMix64::new(seed);
    let reserve = if grid.is_empty() {
        0
    } else {
        (step_count as usize).min(RESERVED_STEPS)
    };
    let mut inverse_steps = Vec::with_capacity(reserve);

    if !grid.is_empty() {
        for _ in 0..step_count {
            let tile = random_tile(&mut rng, grid);
            let step = match rng.below(6) {
                0 => TransformStep::Swap {
                    a: tile,
                    b: random_tile(&mut rng, grid),
                },
                1 => TransformStep::Flip {
                    tile,
                    axis: Axis::Horizontal,
                },
                2 => TransformStep::Flip {
                    tile,
                    axis: Axis::Vertical,
                },
                n => TransformStep::Rotate {
                    tile,
                    rotation: Rotation::quarter_turns(n as i32 - 2),
                },
            };
            step.apply(grid)?;
            debug!(%step, "scramble step");
            inverse_steps.push(step.inverse());
        }
    }
    inverse_steps.reverse();

    info!(
        seed,
        difficulty,
        steps = inverse_steps.len(),
        "generated puzzle"
    );

    Ok(Puzzle {
        seed,
        difficulty,
        original_tiles,
        puzzle_tiles: grid.clone(),
        inverse_steps,
    })
}
