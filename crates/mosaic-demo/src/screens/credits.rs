#![forbid(unsafe_code)]

//! Credits: wrapped, centred lines of text and a Back button.

use mosaic_core::event::{Event, KeyCode};
use mosaic_core::geometry::{Point, Rect};
use mosaic_render::text::{GLYPH_HEIGHT, LINE_SPACING};
use mosaic_render::{Font, Rgba};
use mosaic_runtime::{Cmd, ComponentId, EngineResult, Screen, Stage};
use tracing::{debug, info};

use super::{GAP, MARGIN, resized};
use crate::app::{MENU, Msg};
use crate::art::Icon;
use crate::components::{Button, Label};
use crate::config::PuzzleConfig;

const TEXT: &str = "MOSAIC\n\n\
A TILE PUZZLE ON A LAYERED SPRITE ENGINE.\n\n\
SCRAMBLE A PICTURE, THEN PUT IT BACK TOGETHER.\n\n\
MADE WITH RUST";
const TEXT_COLOR: Rgba = Rgba::rgb(236, 236, 244);

#[derive(Debug)]
pub struct CreditsScreen {
    config: PuzzleConfig,
    lines: Vec<ComponentId>,
}

impl CreditsScreen {
    pub fn new(config: PuzzleConfig) -> Self {
        Self {
            config,
            lines: Vec::new(),
        }
    }

    /// Replace the text labels with ones wrapped to the current frame.
    fn rebuild(&mut self, stage: &mut Stage<Msg>) -> EngineResult<()> {
        for id in self.lines.drain(..) {
            stage.remove_component(id)?;
        }
        let frame = stage.size();
        let font = Font::builtin();
        let top = MARGIN + self.config.button_size.height + GAP;
        let width = frame.width.saturating_sub(2 * MARGIN);
        let lines = font.wrap(TEXT, width, 1)?;
        let line_height = GLYPH_HEIGHT + LINE_SPACING;

        let block = lines.len() as u32 * line_height;
        let mut y = top + frame.height.saturating_sub(top + block) / 2;
        for line in &lines {
            if !line.is_empty() {
                let text_width = font.measure(line, 1)?.width;
                let at = Point::new(frame.width.saturating_sub(text_width) / 2, y);
                let label = Label::new(line.as_str(), TEXT_COLOR, at)?;
                self.lines.push(stage.add_component("credits", label)?);
            }
            y += line_height;
        }
        debug!(lines = lines.len(), width, "credits laid out");
        Ok(())
    }
}

impl Screen<Msg> for CreditsScreen {
    fn on_init(&mut self, stage: &mut Stage<Msg>) -> EngineResult<()> {
        info!("initializing credits");
        stage.add_layer("credits", Some(0))?;
        stage.add_layer("buttons", Some(1))?;
        let back = Button::new(
            Rect::from_parts(Point::new(MARGIN, MARGIN), self.config.button_size),
            self.config.button_border,
            Icon::Back,
            Msg::Back,
        )?
        .with_hotkey(KeyCode::Escape);
        stage.add_component("buttons", back)?;
        self.lines.clear();
        self.rebuild(stage)
    }

    fn on_event(
        &mut self,
        stage: &mut Stage<Msg>,
        _dt: f64,
        events: &[Event],
    ) -> EngineResult<Cmd<Msg>> {
        if resized(events) {
            self.rebuild(stage)?;
        }
        Ok(Cmd::none())
    }

    fn on_message(&mut self, _stage: &mut Stage<Msg>, msg: Msg) -> EngineResult<Cmd<Msg>> {
        Ok(match msg {
            Msg::Back => Cmd::set_screen(MENU),
            Msg::Quit => Cmd::quit(),
            _ => Cmd::none(),
        })
    }

    fn on_end(&mut self, _stage: &mut Stage<Msg>) {
        self.lines.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credits_use_only_known_glyphs() {
        assert!(Font::builtin().supports(TEXT));
    }
}
