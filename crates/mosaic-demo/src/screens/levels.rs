#![forbid(unsafe_code)]

//! Level picker.
//!
//! Ten numbered buttons in a grid, at most five to a row. Level `n`
//! starts a puzzle at difficulty `n`. Digits pick a level from the
//! keyboard, `0` standing for level 10.

use mosaic_core::event::{Event, KeyCode};
use mosaic_core::geometry::{Point, Rect, Size};
use mosaic_render::Rgba;
use mosaic_runtime::{Cmd, Component, ComponentId, EngineError, EngineResult, Screen, Stage};
use tracing::info;

use super::{GAP, MARGIN, resized, uniform_label_size};
use crate::app::{GAME, MENU, Msg, Session};
use crate::art::Icon;
use crate::components::{Button, Label};
use crate::config::PuzzleConfig;

pub const LEVEL_COUNT: u32 = 10;
const COLUMNS: u32 = 5;
const TITLE: &str = "LEVELS";
const TITLE_COLOR: Rgba = Rgba::rgb(236, 236, 244);

fn hotkey(level: u32) -> Option<KeyCode> {
    char::from_digit(level % 10, 10).map(KeyCode::Char)
}

#[derive(Debug)]
pub struct LevelsScreen {
    config: PuzzleConfig,
    session: Session,
    button_size: Size,
    title: Option<ComponentId>,
    back: Option<ComponentId>,
    levels: Vec<ComponentId>,
}

impl LevelsScreen {
    pub fn new(config: PuzzleConfig, session: Session) -> Self {
        Self {
            config,
            session,
            button_size: Size::default(),
            title: None,
            back: None,
            levels: Vec::new(),
        }
    }

    fn layout(&self, stage: &mut Stage<Msg>) -> EngineResult<()> {
        let frame = stage.size();
        let back_size = self.config.button_size;
        let back = self
            .back
            .ok_or_else(|| EngineError::NotFound("levels back button".into()))?;
        stage
            .expect_mut::<Button>(back)?
            .set_bounds(Rect::from_parts(Point::new(MARGIN, MARGIN), back_size))?;

        if let Some(id) = self.title {
            let title = stage.expect_mut::<Label>(id)?;
            let width = title.sprite().size().width;
            let y = MARGIN + back_size.height.saturating_sub(title.sprite().size().height) / 2;
            title
                .sprite_mut()
                .set_position(Point::new(frame.width.saturating_sub(width) / 2, y));
        }

        let size = self.button_size;
        let fit = (frame.width.saturating_sub(2 * MARGIN) + GAP) / (size.width + GAP);
        let columns = fit.clamp(1, COLUMNS);
        let rows = (self.levels.len() as u32).div_ceil(columns);
        let grid = Size::new(
            columns * size.width + (columns - 1) * GAP,
            rows * size.height + rows.saturating_sub(1) * GAP,
        );
        let top = MARGIN + back_size.height + GAP;
        let left = frame.width.saturating_sub(grid.width) / 2;
        let y0 = top + frame.height.saturating_sub(top + grid.height) / 2;
        for (i, &id) in self.levels.iter().enumerate() {
            let i = i as u32;
            let at = Point::new(
                left + (i % columns) * (size.width + GAP),
                y0 + (i / columns) * (size.height + GAP),
            );
            stage
                .expect_mut::<Button>(id)?
                .set_bounds(Rect::from_parts(at, size))?;
        }
        Ok(())
    }
}

impl Screen<Msg> for LevelsScreen {
    fn on_init(&mut self, stage: &mut Stage<Msg>) -> EngineResult<()> {
        info!(levels = LEVEL_COUNT, "initializing levels");
        stage.add_layer("labels", Some(0))?;
        stage.add_layer("buttons", Some(1))?;

        let title = Label::new(TITLE, TITLE_COLOR, Point::default())?;
        self.title = Some(stage.add_component("labels", title)?);

        let border = self.config.button_border;
        let back = Button::new(
            Rect::from_parts(Point::default(), self.config.button_size),
            border,
            Icon::Back,
            Msg::Back,
        )?
        .with_hotkey(KeyCode::Escape);
        self.back = Some(stage.add_component("buttons", back)?);

        let labels: Vec<String> = (1..=LEVEL_COUNT).map(|n| n.to_string()).collect();
        self.button_size = uniform_label_size(labels.iter().map(String::as_str), border)?;
        let bounds = Rect::from_parts(Point::default(), self.button_size);
        self.levels.clear();
        for (level, label) in (1..=LEVEL_COUNT).zip(labels) {
            let mut button = Button::new(bounds, border, label, Msg::Level(level))?;
            if let Some(key) = hotkey(level) {
                button = button.with_hotkey(key);
            }
            self.levels.push(stage.add_component("buttons", button)?);
        }
        self.layout(stage)
    }

    fn on_event(
        &mut self,
        stage: &mut Stage<Msg>,
        _dt: f64,
        events: &[Event],
    ) -> EngineResult<Cmd<Msg>> {
        if resized(events) {
            self.layout(stage)?;
        }
        Ok(Cmd::none())
    }

    fn on_message(&mut self, _stage: &mut Stage<Msg>, msg: Msg) -> EngineResult<Cmd<Msg>> {
        Ok(match msg {
            Msg::Level(level) => {
                info!(level, "level chosen");
                self.session.choose_level(level);
                Cmd::set_screen(GAME)
            }
            Msg::Back => Cmd::set_screen(MENU),
            Msg::Quit => Cmd::quit(),
            _ => Cmd::none(),
        })
    }

    fn on_end(&mut self, _stage: &mut Stage<Msg>) {
        self.title = None;
        self.back = None;
        self.levels.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digits_pick_levels() {
        assert_eq!(hotkey(1), Some(KeyCode::Char('1')));
        assert_eq!(hotkey(9), Some(KeyCode::Char('9')));
        assert_eq!(hotkey(10), Some(KeyCode::Char('0')));
    }
}
