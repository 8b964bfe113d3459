#![forbid(unsafe_code)]

//! Fixed-cadence solve playback.

use std::collections::VecDeque;
use std::time::Duration;

use mosaic_render::{ShapeError, TileGrid};
use tracing::{debug, info};

use crate::generator::Puzzle;
use crate::step::TransformStep;

/// Plays a list of steps back onto a live grid, one per `interval`.
///
/// Each step is applied to completion before the queue is looked at again,
/// so cancelling between calls never leaves a half-applied step.
#[derive(Debug, Clone)]
pub struct SolveReplay {
    steps: VecDeque<TransformStep>,
    interval: Duration,
    elapsed: Duration,
    applied: usize,
}

impl SolveReplay {
    pub fn new(steps: impl IntoIterator<Item = TransformStep>, interval: Duration) -> Self {
        Self {
            steps: steps.into_iter().collect(),
            interval,
            elapsed: Duration::ZERO,
            applied: 0,
        }
    }

    /// Playback of a puzzle's inverse steps.
    pub fn for_puzzle(puzzle: &Puzzle, interval: Duration) -> Self {
        Self::new(puzzle.inverse_steps().iter().copied(), interval)
    }

    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Steps still queued.
    pub fn remaining(&self) -> usize {
        self.steps.len()
    }

    /// Steps applied so far.
    pub const fn applied(&self) -> usize {
        self.applied
    }

    pub fn is_finished(&self) -> bool {
        self.steps.is_empty()
    }

    /// Advance the clock by `dt` and apply every step that has come due.
    ///
    /// Returns how many steps were applied during this call.
    pub fn advance(&mut self, grid: &mut TileGrid, dt: Duration) -> Result<usize, ShapeError> {
        if self.is_finished() {
            return Ok(0);
        }
        self.elapsed += dt;
        let mut count = 0;
        while self.elapsed >= self.interval {
            let Some(step) = self.steps.pop_front() else {
                break;
            };
            step.apply(grid)?;
            debug!(%step, remaining = self.steps.len(), "solve step");
            self.elapsed -= self.interval;
            self.applied += 1;
            count += 1;
        }
        if self.is_finished() {
            self.elapsed = Duration::ZERO;
            info!(steps = self.applied, "solve replay finished");
        }
        Ok(count)
    }

    /// Drop every queued step. Returns how many were discarded.
    pub fn cancel(&mut self) -> usize {
        let dropped = self.steps.len();
        self.steps.clear();
        self.elapsed = Duration::ZERO;
        dropped
    }
}
