#![forbid(unsafe_code)]

//! Game settings.

use std::path::PathBuf;
use std::time::Duration;

use mosaic_core::geometry::{Sides, Size};
use mosaic_render::Rgba;

/// How a puzzle is built and shown.
#[derive(Debug, Clone, PartialEq)]
pub struct PuzzleConfig {
    /// Tile edge in source-image pixels.
    pub tile_size: u32,
    /// Scramble difficulty; each level adds four transforms.
    pub difficulty: u32,
    /// Seed for the first puzzle. Later puzzles draw a fresh one.
    pub seed: Option<u64>,
    /// Source image. A generated picture is used when unset.
    pub image: Option<PathBuf>,
    /// Delay between steps while solving.
    pub solve_interval: Duration,
    pub outline_thickness: u32,
    pub outline_color: Rgba,
    /// Outline of the tile marked as swap anchor.
    pub anchor_color: Rgba,
    /// Nine-slice border of the button panel.
    pub button_border: Sides,
    pub button_size: Size,
}

impl Default for PuzzleConfig {
    fn default() -> Self {
        Self {
            tile_size: 16,
            difficulty: 2,
            seed: None,
            image: None,
            solve_interval: Duration::from_millis(150),
            outline_thickness: 1,
            outline_color: Rgba::rgb(255, 214, 10),
            anchor_color: Rgba::rgb(64, 200, 255),
            button_border: Sides::all(2),
            button_size: Size::new(9, 9),
        }
    }
}

impl PuzzleConfig {
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    #[must_use]
    pub fn with_difficulty(mut self, difficulty: u32) -> Self {
        self.difficulty = difficulty;
        self
    }

    #[must_use]
    pub fn with_tile_size(mut self, tile_size: u32) -> Self {
        self.tile_size = tile_size;
        self
    }
}
