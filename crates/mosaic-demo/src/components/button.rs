#![forbid(unsafe_code)]

//! Nine-slice push button with an icon or text label and an optional hotkey.

use mosaic_core::event::{KeyCode, KeyEvent, MouseEvent};
use mosaic_core::geometry::{Rect, Sides, Size};
use mosaic_render::nine_slice::NineSlice;
use mosaic_render::{Filter, Font, PixelImage, Rgba};
use mosaic_runtime::{Cmd, Component, EngineResult, Fit, Sprite};
use tracing::{debug, warn};

use crate::app::Msg;
use crate::art::{self, Icon};

const FACE: Rgba = Rgba::rgb(58, 92, 140);
const GLYPH: Rgba = Rgba::rgb(236, 236, 244);
const HOVER: Filter = Filter::Tint {
    color: Rgba::WHITE,
    strength: 0.2,
};

/// Blank columns either side of a label.
const LABEL_PADDING: u32 = 1;

/// What a button shows on its panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Face {
    Icon(Icon),
    Label(String),
}

impl Face {
    fn render(&self, color: Rgba) -> EngineResult<PixelImage> {
        match self {
            Self::Icon(icon) => Ok(icon.render(color)),
            Self::Label(text) => Ok(Font::builtin().render(text, color, 1)?),
        }
    }
}

impl From<Icon> for Face {
    fn from(icon: Icon) -> Self {
        Self::Icon(icon)
    }
}

impl From<&str> for Face {
    fn from(text: &str) -> Self {
        Self::Label(text.to_string())
    }
}

impl From<String> for Face {
    fn from(text: String) -> Self {
        Self::Label(text)
    }
}

/// A button that sends one message when clicked or when its hotkey is hit.
#[derive(Debug, Clone)]
pub struct Button {
    sprite: Sprite,
    face: Face,
    msg: Msg,
    hotkey: Option<KeyCode>,
    slice: NineSlice,
    idle: PixelImage,
    hover: PixelImage,
}

impl Button {
    pub fn new(bounds: Rect, border: Sides, face: impl Into<Face>, msg: Msg) -> EngineResult<Self> {
        let mut button = Self {
            sprite: Sprite::new(bounds),
            face: face.into(),
            msg,
            hotkey: None,
            slice: NineSlice::new(border),
            idle: PixelImage::default(),
            hover: PixelImage::default(),
        };
        button.render()?;
        Ok(button)
    }

    #[must_use]
    pub fn with_hotkey(mut self, key: KeyCode) -> Self {
        self.hotkey = Some(key);
        self
    }

    /// Smallest button that shows `label` inside `border`.
    pub fn label_size(label: &str, border: Sides) -> EngineResult<Size> {
        let text = Font::builtin().measure(label, 1)?;
        Ok(Size::new(
            text.width + border.horizontal_sum() + 2 * LABEL_PADDING,
            text.height + border.vertical_sum(),
        ))
    }

    pub fn face(&self) -> &Face {
        &self.face
    }

    pub fn msg(&self) -> Msg {
        self.msg
    }

    pub fn hotkey(&self) -> Option<KeyCode> {
        self.hotkey
    }

    /// Move and resize, rebuilding the faces.
    pub fn set_bounds(&mut self, bounds: Rect) -> EngineResult<()> {
        let resized = bounds.size() != self.sprite.size();
        self.sprite.set_bounds(bounds);
        if resized {
            self.render()?;
        }
        Ok(())
    }

    fn render(&mut self) -> EngineResult<()> {
        let size = self.sprite.size();
        let mut idle = self.slice.render(&art::panel(FACE), size)?;
        let glyph = self.face.render(GLYPH)?;
        idle.blend(
            &glyph,
            size.width.saturating_sub(glyph.width()) / 2,
            size.height.saturating_sub(glyph.height()) / 2,
        );
        let mut hover = idle.clone();
        hover.apply_filter(&HOVER);
        self.idle = idle;
        self.hover = hover;
        self.show_face();
        Ok(())
    }

    fn show_face(&mut self) {
        let face = if self.sprite.is_hovered() {
            self.hover.clone()
        } else {
            self.idle.clone()
        };
        if let Err(err) = self.sprite.set_surface(face, Fit::Exact) {
            warn!(%err, "button face does not fit");
        }
    }
}

impl Component<Msg> for Button {
    fn sprite(&self) -> &Sprite {
        &self.sprite
    }

    fn sprite_mut(&mut self) -> &mut Sprite {
        &mut self.sprite
    }

    fn on_click(&mut self, _event: &MouseEvent) -> Cmd<Msg> {
        debug!(msg = %self.msg, "button clicked");
        Cmd::msg(self.msg)
    }

    fn on_key_press(&mut self, key: &KeyEvent) -> Cmd<Msg> {
        match self.hotkey {
            Some(code) if code == key.code && !key.ctrl() => {
                debug!(msg = %self.msg, "button hotkey");
                Cmd::msg(self.msg)
            }
            _ => Cmd::none(),
        }
    }

    fn on_mouse_enter(&mut self, _event: &MouseEvent) -> Cmd<Msg> {
        self.show_face();
        Cmd::none()
    }

    fn on_mouse_leave(&mut self, _event: &MouseEvent) -> Cmd<Msg> {
        self.show_face();
        Cmd::none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mosaic_core::event::Event;
    use mosaic_runtime::component::dispatch_events;

    fn button() -> Button {
        Button::new(Rect::new(4, 4, 11, 9), Sides::all(2), Icon::Flip, Msg::Flip)
            .unwrap()
            .with_hotkey(KeyCode::Char('q'))
    }

    #[test]
    fn click_sends_message() {
        let mut b = button();
        let cmd = dispatch_events(&mut b, &[Event::mouse_down(5, 5), Event::mouse_up(6, 6)]);
        assert!(matches!(cmd, Cmd::Msg(Msg::Flip)));
    }

    #[test]
    fn hotkey_sends_message_without_ctrl() {
        let mut b = button();
        let cmd = dispatch_events(&mut b, &[Event::key(KeyCode::Char('q'))]);
        assert!(matches!(cmd, Cmd::Msg(Msg::Flip)));

        let ctrl_q = Event::Key(
            KeyEvent::new(KeyCode::Char('q')).with_modifiers(mosaic_core::event::Modifiers::CTRL),
        );
        assert!(dispatch_events(&mut b, &[ctrl_q]).is_none());
        assert!(dispatch_events(&mut b, &[Event::key(KeyCode::Char('w'))]).is_none());
    }

    #[test]
    fn hover_lightens_face() {
        let mut b = button();
        let idle = b.sprite().surface().get(5, 4).unwrap();
        dispatch_events(&mut b, &[Event::mouse_move(6, 6)]);
        let hovered = b.sprite().surface().get(5, 4).unwrap();
        assert!(hovered.r > idle.r);
        dispatch_events(&mut b, &[Event::mouse_move(40, 40)]);
        assert_eq!(b.sprite().surface().get(5, 4), Some(idle));
    }

    #[test]
    fn too_small_for_border_is_rejected() {
        let err = Button::new(Rect::new(0, 0, 3, 3), Sides::all(2), Icon::Back, Msg::Back);
        assert!(err.is_err());
    }

    #[test]
    fn label_is_centred_on_the_panel() {
        let size = Button::label_size("GO", Sides::all(2)).unwrap();
        assert_eq!(size, mosaic_core::geometry::Size::new(13, 9));
        let b = Button::new(Rect::from_size(size.width, size.height), Sides::all(2), "GO", Msg::Play)
            .unwrap();
        assert_eq!(b.face(), &Face::Label("GO".to_string()));
        // The label starts at (3, 2); the G's top row is ".##".
        assert_eq!(b.sprite().surface().get(4, 2), Some(GLYPH));
        assert_ne!(b.sprite().surface().get(3, 2), Some(GLYPH));
    }

    #[test]
    fn unknown_label_glyph_fails() {
        let err = Button::new(Rect::new(0, 0, 20, 9), Sides::all(2), "A#B", Msg::Play);
        assert!(matches!(
            err,
            Err(mosaic_runtime::EngineError::Text(mosaic_render::TextError::MissingGlyph('#')))
        ));
    }

    #[test]
    fn resize_rebuilds_faces() {
        let mut b = button();
        b.set_bounds(Rect::new(0, 0, 20, 10)).unwrap();
        assert_eq!(b.sprite().surface().size(), mosaic_core::geometry::Size::new(20, 10));
    }
}
