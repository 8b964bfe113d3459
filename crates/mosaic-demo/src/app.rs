#![forbid(unsafe_code)]

//! Messages, screen names and engine assembly.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use mosaic_render::asset::DirAssets;
use mosaic_render::{PixelImage, TileCoord};
use mosaic_runtime::{Engine, EngineConfig, EngineResult};
use tracing::info;

use crate::art;
use crate::config::PuzzleConfig;
use crate::screens::{CreditsScreen, GameScreen, LevelsScreen, MenuScreen};

pub const MENU: &str = "menu";
pub const LEVELS: &str = "levels";
pub const CREDITS: &str = "credits";
pub const GAME: &str = "game";

/// Everything components and screens say to each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Msg {
    Play,
    Levels,
    Credits,
    Quit,
    Back,
    /// Start a puzzle at this level.
    Level(u32),
    Select(TileCoord),
    Flip,
    Rotate,
    Swap,
    Filter,
    Solve,
    NewPuzzle,
}

impl fmt::Display for Msg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Play => f.write_str("play"),
            Self::Levels => f.write_str("levels"),
            Self::Credits => f.write_str("credits"),
            Self::Quit => f.write_str("quit"),
            Self::Back => f.write_str("back"),
            Self::Level(level) => write!(f, "level {level}"),
            Self::Select(coord) => write!(f, "select {coord}"),
            Self::Flip => f.write_str("flip"),
            Self::Rotate => f.write_str("rotate"),
            Self::Swap => f.write_str("swap"),
            Self::Filter => f.write_str("filter"),
            Self::Solve => f.write_str("solve"),
            Self::NewPuzzle => f.write_str("new puzzle"),
        }
    }
}

/// State handed from one screen to the next.
///
/// Clones share the same cell, so a choice made on the levels screen is
/// seen by the game screen when it initialises.
#[derive(Debug, Clone, Default)]
pub struct Session {
    level: Rc<Cell<Option<u32>>>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Level picked on the levels screen, if any.
    pub fn level(&self) -> Option<u32> {
        self.level.get()
    }

    pub fn choose_level(&self, level: u32) {
        self.level.set(Some(level));
    }

    /// Forget the picked level; the configured difficulty applies again.
    pub fn clear_level(&self) {
        self.level.set(None);
    }
}

/// Load the configured picture, or draw the built-in one.
///
/// The built-in picture is four tiles on each side.
pub fn load_picture(config: &PuzzleConfig) -> EngineResult<PixelImage> {
    match &config.image {
        Some(path) => {
            info!(path = %path.display(), "loading puzzle image");
            Ok(DirAssets::load_path(path)?)
        }
        None => {
            let side = config.tile_size.saturating_mul(4);
            Ok(art::picture(side, side))
        }
    }
}

/// Engine with every screen registered, starting on the menu.
pub fn build_engine(
    engine_config: EngineConfig,
    puzzle_config: PuzzleConfig,
    picture: PixelImage,
) -> EngineResult<Engine<Msg>> {
    let session = Session::new();
    let mut engine = Engine::new(engine_config);
    engine.add_screen(MENU, MenuScreen::new(puzzle_config.clone(), session.clone()))?;
    engine.add_screen(LEVELS, LevelsScreen::new(puzzle_config.clone(), session.clone()))?;
    engine.add_screen(CREDITS, CreditsScreen::new(puzzle_config.clone()))?;
    engine.add_screen(GAME, GameScreen::new(puzzle_config, picture, session))?;
    engine.set_screen(MENU);
    Ok(engine)
}
