#![forbid(unsafe_code)]

//! Static line of text.

use mosaic_core::geometry::Point;
use mosaic_render::{Font, Rgba};
use mosaic_runtime::{Component, EngineResult, Sprite};

use crate::app::Msg;

/// Text drawn once with the built-in font. Ignores input.
#[derive(Debug, Clone)]
pub struct Label {
    sprite: Sprite,
    text: String,
}

impl Label {
    pub fn new(text: impl Into<String>, color: Rgba, at: Point) -> EngineResult<Self> {
        let text = text.into();
        let surface = Font::builtin().render(&text, color, 1)?;
        Ok(Self {
            sprite: Sprite::with_surface(at, surface),
            text,
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl Component<Msg> for Label {
    fn sprite(&self) -> &Sprite {
        &self.sprite
    }

    fn sprite_mut(&mut self) -> &mut Sprite {
        &mut self.sprite
    }
}
