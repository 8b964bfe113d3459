#![forbid(unsafe_code)]

//! Components: positioned, drawable, input-reactive rectangles.
//!
//! A component owns a [`Sprite`] (bounds, surface and pointer state) and
//! overrides whichever hooks it cares about. The default
//! [`Component::update`] runs [`dispatch_events`], which implements the
//! pointer state machine:
//!
//! - press inside the bounds arms the component;
//! - release inside the bounds while armed fires `on_click`;
//! - moving outside the bounds while armed disarms it without a click.
//!
//! Hover is tracked separately and only on movement: `on_mouse_enter` and
//! `on_mouse_leave` fire once per crossing. Key presses reach every
//! component; there is no focus model.

use std::any::Any;

use mosaic_core::event::{Event, KeyEvent, MouseEvent, MouseEventKind};
use mosaic_core::geometry::{Point, Rect, Size};
use mosaic_render::nine_slice::NineSlice;
use mosaic_render::{PixelImage, ShapeError};

use crate::cmd::Cmd;

/// How [`Sprite::set_surface`] treats an image whose size differs from the
/// component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Fit {
    /// Sizes must match exactly.
    #[default]
    Exact,
    /// Resample to the component size.
    Stretch,
}

/// Geometry, pixels and interaction state shared by every component.
///
/// The surface is always exactly the size of the bounds.
#[derive(Debug, Clone)]
pub struct Sprite {
    bounds: Rect,
    surface: PixelImage,
    is_down: bool,
    is_hovered: bool,
    visible: bool,
}

impl Sprite {
    /// Sprite with a transparent surface covering `bounds`.
    pub fn new(bounds: Rect) -> Self {
        Self {
            bounds,
            surface: PixelImage::new(bounds.width, bounds.height),
            is_down: false,
            is_hovered: false,
            visible: true,
        }
    }

    /// Sprite at `position` sized to `surface`.
    pub fn with_surface(position: Point, surface: PixelImage) -> Self {
        let mut sprite = Self::new(Rect::from_parts(position, surface.size()));
        sprite.surface = surface;
        sprite
    }

    #[inline]
    pub const fn bounds(&self) -> Rect {
        self.bounds
    }

    #[inline]
    pub const fn position(&self) -> Point {
        self.bounds.position()
    }

    #[inline]
    pub const fn size(&self) -> Size {
        self.bounds.size()
    }

    #[inline]
    pub const fn center(&self) -> Point {
        self.bounds.center()
    }

    pub fn set_position(&mut self, position: Point) {
        self.bounds = self.bounds.with_position(position);
    }

    /// Resize. The surface is reset to transparent when the size changes.
    pub fn set_size(&mut self, size: Size) {
        if size == self.size() {
            return;
        }
        self.bounds = Rect::from_parts(self.position(), size);
        self.surface = PixelImage::new(size.width, size.height);
    }

    pub fn set_bounds(&mut self, bounds: Rect) {
        self.set_size(bounds.size());
        self.set_position(bounds.position());
    }

    #[inline]
    pub fn surface(&self) -> &PixelImage {
        &self.surface
    }

    /// Replace the surface.
    ///
    /// With [`Fit::Exact`] the image must already be the component size;
    /// with [`Fit::Stretch`] it is resampled to fit.
    pub fn set_surface(&mut self, image: PixelImage, fit: Fit) -> Result<(), ShapeError> {
        let size = self.size();
        if image.size() == size {
            self.surface = image;
            return Ok(());
        }
        match fit {
            Fit::Stretch => {
                self.surface = image.stretched(size);
                Ok(())
            }
            Fit::Exact => Err(ShapeError::SizeMismatch {
                expected: size,
                actual: image.size(),
            }),
        }
    }

    /// Nine-slice `image` to the component size and use it as the surface.
    pub fn set_nine_slice_surface(
        &mut self,
        image: &PixelImage,
        slice: &NineSlice,
    ) -> Result<(), ShapeError> {
        self.surface = slice.render(image, self.size())?;
        Ok(())
    }

    /// Whether the primary button was pressed inside and not yet released.
    #[inline]
    pub const fn is_down(&self) -> bool {
        self.is_down
    }

    #[inline]
    pub const fn is_hovered(&self) -> bool {
        self.is_hovered
    }

    #[inline]
    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    /// Hidden sprites are not drawn and ignore the pointer.
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
        if !visible {
            self.is_down = false;
            self.is_hovered = false;
        }
    }

    #[inline]
    pub fn contains(&self, point: Point) -> bool {
        self.bounds.contains(point.x, point.y)
    }

    /// Convert a frame position into surface-local coordinates.
    pub fn to_local(&self, point: Point) -> Option<Point> {
        self.contains(point)
            .then(|| Point::new(point.x - self.bounds.x, point.y - self.bounds.y))
    }
}

/// Type-erasure helper so stages can hand out concrete component types.
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// A drawable, input-reactive element owned by exactly one layer.
///
/// Every hook defaults to a no-op returning [`Cmd::None`].
pub trait Component<M>: AsAny {
    fn sprite(&self) -> &Sprite;

    fn sprite_mut(&mut self) -> &mut Sprite;

    /// Per-frame update with the whole event batch.
    fn update(&mut self, dt: f64, events: &[Event]) -> Cmd<M> {
        let tick = self.on_tick(dt);
        tick.and(dispatch_events(self, events))
    }

    /// Called once per frame before events are dispatched.
    fn on_tick(&mut self, _dt: f64) -> Cmd<M> {
        Cmd::None
    }

    fn on_click(&mut self, _event: &MouseEvent) -> Cmd<M> {
        Cmd::None
    }

    fn on_key_press(&mut self, _key: &KeyEvent) -> Cmd<M> {
        Cmd::None
    }

    fn on_mouse_enter(&mut self, _event: &MouseEvent) -> Cmd<M> {
        Cmd::None
    }

    fn on_mouse_leave(&mut self, _event: &MouseEvent) -> Cmd<M> {
        Cmd::None
    }
}

/// Run the pointer and key state machine for one event batch.
pub fn dispatch_events<M, C>(component: &mut C, events: &[Event]) -> Cmd<M>
where
    C: Component<M> + ?Sized,
{
    let mut cmds = Vec::new();
    for event in events {
        match event {
            Event::Key(key) => cmds.push(component.on_key_press(key)),
            Event::Mouse(mouse) if component.sprite().is_visible() => {
                cmds.push(dispatch_mouse(component, mouse));
            }
            _ => {}
        }
    }
    Cmd::batch(cmds)
}

fn dispatch_mouse<M, C>(component: &mut C, mouse: &MouseEvent) -> Cmd<M>
where
    C: Component<M> + ?Sized,
{
    let inside = component.sprite().contains(mouse.position());
    match mouse.kind {
        MouseEventKind::Down => {
            if inside {
                component.sprite_mut().is_down = true;
            }
            Cmd::None
        }
        MouseEventKind::Up => {
            let was_down = std::mem::replace(&mut component.sprite_mut().is_down, false);
            if was_down && inside {
                component.on_click(mouse)
            } else {
                Cmd::None
            }
        }
        MouseEventKind::Moved => {
            let sprite = component.sprite_mut();
            if !inside {
                sprite.is_down = false;
            }
            match (inside, sprite.is_hovered) {
                (true, false) => {
                    sprite.is_hovered = true;
                    component.on_mouse_enter(mouse)
                }
                (false, true) => {
                    sprite.is_hovered = false;
                    component.on_mouse_leave(mouse)
                }
                _ => Cmd::None,
            }
        }
    }
}
