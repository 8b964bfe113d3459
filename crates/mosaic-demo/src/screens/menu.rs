#![forbid(unsafe_code)]

//! Start menu: Play, Levels, Credits and Quit.

use mosaic_core::event::{Event, KeyCode};
use mosaic_core::geometry::{Point, Rect, Size};
use mosaic_runtime::{Cmd, ComponentId, EngineResult, Screen, Stage};
use tracing::info;

use super::{GAP, resized, uniform_label_size};
use crate::app::{CREDITS, GAME, LEVELS, Msg, Session};
use crate::components::Button;
use crate::config::PuzzleConfig;

const ENTRIES: [(&str, Msg, KeyCode); 4] = [
    ("PLAY", Msg::Play, KeyCode::Enter),
    ("LEVELS", Msg::Levels, KeyCode::Char('l')),
    ("CREDITS", Msg::Credits, KeyCode::Char('c')),
    ("QUIT", Msg::Quit, KeyCode::Escape),
];

#[derive(Debug)]
pub struct MenuScreen {
    config: PuzzleConfig,
    session: Session,
    button_size: Size,
    buttons: Vec<ComponentId>,
}

impl MenuScreen {
    pub fn new(config: PuzzleConfig, session: Session) -> Self {
        Self {
            config,
            session,
            button_size: Size::default(),
            buttons: Vec::new(),
        }
    }

    /// Stack the buttons in the middle of the frame.
    fn layout(&self, stage: &mut Stage<Msg>) -> EngineResult<()> {
        let frame = stage.size();
        let size = self.button_size;
        let count = self.buttons.len() as u32;
        let column = count * size.height + count.saturating_sub(1) * GAP;
        let x = frame.width.saturating_sub(size.width) / 2;
        let mut y = frame.height.saturating_sub(column) / 2;
        for &id in &self.buttons {
            let bounds = Rect::from_parts(Point::new(x, y), size);
            stage.expect_mut::<Button>(id)?.set_bounds(bounds)?;
            y += size.height + GAP;
        }
        Ok(())
    }
}

impl Screen<Msg> for MenuScreen {
    fn on_init(&mut self, stage: &mut Stage<Msg>) -> EngineResult<()> {
        info!("initializing menu");
        stage.add_layer("buttons", None)?;
        let border = self.config.button_border;
        self.button_size = uniform_label_size(ENTRIES.iter().map(|(label, _, _)| *label), border)?;
        let bounds = Rect::from_parts(Point::default(), self.button_size);
        self.buttons.clear();
        for (label, msg, key) in ENTRIES {
            let button = Button::new(bounds, border, label, msg)?.with_hotkey(key);
            self.buttons.push(stage.add_component("buttons", button)?);
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
            Msg::Play => {
                self.session.clear_level();
                Cmd::set_screen(GAME)
            }
            Msg::Levels => Cmd::set_screen(LEVELS),
            Msg::Credits => Cmd::set_screen(CREDITS),
            Msg::Quit => Cmd::quit(),
            _ => Cmd::none(),
        })
    }

    fn on_end(&mut self, _stage: &mut Stage<Msg>) {
        self.buttons.clear();
    }
}
