#![forbid(unsafe_code)]

//! Reversible tile puzzles.
//!
//! [`generate`] scrambles a [`TileGrid`](mosaic_render::TileGrid) with a
//! seeded sequence of rotations, flips and swaps and records the exact
//! inverse. [`SolveReplay`] plays that inverse back at a fixed cadence.
//!
//! ```
//! use mosaic_puzzle::generate;
//! use mosaic_render::{PixelImage, Rgba, TileGrid};
//!
//! let image = PixelImage::filled(8, 8, Rgba::WHITE);
//! let mut grid = TileGrid::from_image(&image, 4).unwrap();
//! let puzzle = generate(&mut grid, 2, Some(42)).unwrap();
//! assert_eq!(puzzle.inverse_steps().len(), 8);
//! assert!(puzzle.is_solved(&puzzle.replay_solution().unwrap()));
//! ```

pub mod generator;
pub mod rng;
pub mod solver;
pub mod step;

pub use generator::{Puzzle, STEPS_PER_DIFFICULTY, generate, random_seed};
pub use rng::SplitMix64;
pub use solver::SolveReplay;
pub use step::TransformStep;
