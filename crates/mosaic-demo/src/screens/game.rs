#![forbid(unsafe_code)]

//! The puzzle screen.
//!
//! Layout: a row of buttons along the bottom edge and the picture centred in
//! the space above, keeping its aspect ratio.
//!
//! Difficulty comes from the level picked on the levels screen, or from the
//! configuration when the game was started with Play.

use std::time::Duration;

use mosaic_core::event::{Event, KeyCode};
use mosaic_core::geometry::{Point, Rect, Size};
use mosaic_puzzle::{Puzzle, SolveReplay, generate};
use mosaic_render::{Axis, Filter, PixelImage, Rotation, TileGrid};
use mosaic_runtime::{Cmd, ComponentId, EngineError, EngineResult, Screen, Stage};
use tracing::{debug, info, warn};

use super::{GAP, MARGIN, resized};
use crate::app::{MENU, Msg, Session};
use crate::art::Icon;
use crate::components::{Button, OutlineStyle, ScrambledImage};
use crate::config::PuzzleConfig;

const BUTTONS: [(Icon, Msg, KeyCode); 7] = [
    (Icon::Flip, Msg::Flip, KeyCode::Char('q')),
    (Icon::Rotate, Msg::Rotate, KeyCode::Char('w')),
    (Icon::Swap, Msg::Swap, KeyCode::Char('e')),
    (Icon::Filter, Msg::Filter, KeyCode::Char('f')),
    (Icon::Solve, Msg::Solve, KeyCode::Char('s')),
    (Icon::New, Msg::NewPuzzle, KeyCode::Char('n')),
    (Icon::Back, Msg::Back, KeyCode::Escape),
];

#[derive(Debug)]
pub struct GameScreen {
    config: PuzzleConfig,
    picture: PixelImage,
    session: Session,
    difficulty: u32,
    next_seed: Option<u64>,
    puzzle: Option<Puzzle>,
    replay: Option<SolveReplay>,
    image: Option<ComponentId>,
    buttons: Vec<ComponentId>,
}

impl GameScreen {
    pub fn new(config: PuzzleConfig, picture: PixelImage, session: Session) -> Self {
        Self {
            next_seed: config.seed,
            difficulty: config.difficulty,
            config,
            picture,
            session,
            puzzle: None,
            replay: None,
            image: None,
            buttons: Vec::new(),
        }
    }

    /// The puzzle currently in play.
    pub fn puzzle(&self) -> Option<&Puzzle> {
        self.puzzle.as_ref()
    }

    pub fn difficulty(&self) -> u32 {
        self.difficulty
    }

    pub fn is_solving(&self) -> bool {
        self.replay.is_some()
    }

    /// Scramble a fresh grid from the picture. The configured seed is used
    /// once; later puzzles draw their own.
    fn new_puzzle(&mut self) -> EngineResult<TileGrid> {
        let mut grid = TileGrid::from_image(&self.picture, self.config.tile_size)?;
        let puzzle = generate(&mut grid, self.difficulty, self.next_seed.take())?;
        self.puzzle = Some(puzzle);
        Ok(grid)
    }

    fn image_id(&self) -> EngineResult<ComponentId> {
        self.image
            .ok_or_else(|| EngineError::NotFound("puzzle image".into()))
    }

    fn layout(&self, stage: &mut Stage<Msg>) -> EngineResult<()> {
        let frame = stage.size();
        let button = self.config.button_size;
        let count = self.buttons.len() as u32;
        let row = count * button.width + count.saturating_sub(1) * GAP;
        let y = frame.height.saturating_sub(MARGIN + button.height);
        let mut x = frame.width.saturating_sub(row) / 2;
        for &id in &self.buttons {
            let bounds = Rect::from_parts(Point::new(x, y), button);
            stage.expect_mut::<Button>(id)?.set_bounds(bounds)?;
            x += button.width + GAP;
        }

        let room = Size::new(
            frame.width.saturating_sub(2 * MARGIN),
            y.saturating_sub(2 * MARGIN),
        );
        let fitted = fit_within(self.picture.size(), room);
        let bounds = Rect::new(
            (frame.width - fitted.width) / 2,
            MARGIN + (room.height - fitted.height) / 2,
            fitted.width,
            fitted.height,
        );
        let id = self.image_id()?;
        stage.expect_mut::<ScrambledImage>(id)?.fit(bounds)?;
        debug!(?bounds, "laid out puzzle");
        Ok(())
    }

    fn advance_replay(&mut self, stage: &mut Stage<Msg>, dt: f64) -> EngineResult<()> {
        let (Some(id), Some(replay)) = (self.image, self.replay.as_mut()) else {
            return Ok(());
        };
        let image = stage.expect_mut::<ScrambledImage>(id)?;
        if replay.advance(image.grid_mut(), Duration::from_secs_f64(dt))? > 0 {
            image.render()?;
        }
        if !replay.is_finished() {
            return Ok(());
        }
        self.replay = None;
        match &self.puzzle {
            Some(puzzle) if puzzle.is_solved(image.grid()) => {
                info!(seed = puzzle.seed(), "puzzle solved");
            }
            Some(puzzle) => warn!(seed = puzzle.seed(), "replay finished but grid differs"),
            None => {}
        }
        Ok(())
    }

    fn apply(&mut self, stage: &mut Stage<Msg>, msg: Msg) -> EngineResult<()> {
        let id = self.image_id()?;
        match msg {
            Msg::NewPuzzle => {
                if let Some(mut replay) = self.replay.take() {
                    let dropped = replay.cancel();
                    debug!(dropped, "solve cancelled");
                }
                let grid = self.new_puzzle()?;
                stage.expect_mut::<ScrambledImage>(id)?.set_grid(grid)?;
            }
            Msg::Solve if self.replay.is_none() => {
                let Some(puzzle) = &self.puzzle else {
                    return Ok(());
                };
                info!(steps = puzzle.inverse_steps().len(), "solving");
                let image = stage.expect_mut::<ScrambledImage>(id)?;
                image.set_grid(puzzle.puzzle_tiles().clone())?;
                self.replay = Some(SolveReplay::for_puzzle(puzzle, self.config.solve_interval));
            }
            _ if self.replay.is_some() => debug!(%msg, "ignored while solving"),
            Msg::Select(coord) => {
                let image = stage.expect_mut::<ScrambledImage>(id)?;
                if image.select(coord) {
                    debug!(%coord, "tile selected");
                    image.render()?;
                }
            }
            Msg::Flip | Msg::Rotate | Msg::Swap | Msg::Filter => {
                let image = stage.expect_mut::<ScrambledImage>(id)?;
                let selected = image.selected();
                match msg {
                    Msg::Flip => image.grid_mut().flip(&[selected], Axis::Horizontal)?,
                    Msg::Rotate => image.grid_mut().rotate(&[selected], Rotation::R90)?,
                    Msg::Filter => image.grid_mut().filter(&[selected], &Filter::Grayscale)?,
                    _ => match image.anchor() {
                        None => image.set_anchor(Some(selected)),
                        Some(anchor) if anchor == selected => image.set_anchor(None),
                        Some(anchor) => {
                            image.grid_mut().swap(anchor, selected)?;
                            image.set_anchor(None);
                        }
                    },
                }
                image.render()?;
            }
            _ => {}
        }
        Ok(())
    }
}

/// Largest size with `source`'s aspect ratio that fits in `room`.
fn fit_within(source: Size, room: Size) -> Size {
    if source.is_empty() || room.is_empty() {
        return Size::default();
    }
    let by_height = source.width as u64 * room.height as u64 / source.height as u64;
    if by_height <= room.width as u64 {
        Size::new(by_height as u32, room.height)
    } else {
        let by_width = source.height as u64 * room.width as u64 / source.width as u64;
        Size::new(room.width, by_width as u32)
    }
}

impl Screen<Msg> for GameScreen {
    fn on_init(&mut self, stage: &mut Stage<Msg>) -> EngineResult<()> {
        self.difficulty = self.session.level().unwrap_or(self.config.difficulty);
        info!(
            tile_size = self.config.tile_size,
            difficulty = self.difficulty,
            "initializing game"
        );
        stage.add_layer("image", Some(0))?;
        stage.add_layer("buttons", Some(1))?;

        let grid = self.new_puzzle()?;
        let image = ScrambledImage::new(grid, OutlineStyle::from(&self.config))?;
        self.image = Some(stage.add_component("image", image)?);

        let bounds = Rect::from_parts(Point::default(), self.config.button_size);
        self.buttons.clear();
        for (icon, msg, key) in BUTTONS {
            let button = Button::new(bounds, self.config.button_border, icon, msg)?
                .with_hotkey(key);
            self.buttons.push(stage.add_component("buttons", button)?);
        }
        self.layout(stage)
    }

    fn on_event(
        &mut self,
        stage: &mut Stage<Msg>,
        dt: f64,
        events: &[Event],
    ) -> EngineResult<Cmd<Msg>> {
        if resized(events) {
            self.layout(stage)?;
        }
        self.advance_replay(stage, dt)?;
        Ok(Cmd::none())
    }

    fn on_message(&mut self, stage: &mut Stage<Msg>, msg: Msg) -> EngineResult<Cmd<Msg>> {
        match msg {
            Msg::Back => Ok(Cmd::set_screen(MENU)),
            Msg::Quit => Ok(Cmd::quit()),
            _ => {
                self.apply(stage, msg)?;
                Ok(Cmd::none())
            }
        }
    }

    fn on_end(&mut self, _stage: &mut Stage<Msg>) {
        self.replay = None;
        self.puzzle = None;
        self.image = None;
        self.buttons.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_keeps_aspect_ratio() {
        assert_eq!(fit_within(Size::new(64, 64), Size::new(76, 33)), Size::new(33, 33));
        assert_eq!(fit_within(Size::new(64, 32), Size::new(40, 40)), Size::new(40, 20));
        assert_eq!(fit_within(Size::new(64, 64), Size::new(0, 10)), Size::default());
    }
}
