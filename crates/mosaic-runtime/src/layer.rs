#![forbid(unsafe_code)]

//! Named, prioritised component collections.

use std::fmt;

use mosaic_core::event::Event;
use mosaic_render::dirty::DirtyRegion;
use mosaic_render::frame::FrameBuffer;
use tracing::trace;

use crate::cmd::Cmd;
use crate::component::Component;

/// Stable handle to a component inside a [`Stage`](crate::stage::Stage).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentId(pub(crate) u64);

impl ComponentId {
    #[inline]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "component#{}", self.0)
    }
}

/// A named layer of components, updated and drawn in insertion order.
pub struct Layer<M> {
    name: String,
    priority: i32,
    components: Vec<(ComponentId, Box<dyn Component<M>>)>,
}

impl<M> fmt::Debug for Layer<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Layer")
            .field("name", &self.name)
            .field("priority", &self.priority)
            .field("components", &self.components.len())
            .finish()
    }
}

impl<M: 'static> Layer<M> {
    pub(crate) fn new(name: String, priority: i32) -> Self {
        Self {
            name,
            priority,
            components: Vec::new(),
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub const fn priority(&self) -> i32 {
        self.priority
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.components.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Component ids in draw order.
    pub fn ids(&self) -> impl Iterator<Item = ComponentId> + '_ {
        self.components.iter().map(|(id, _)| *id)
    }

    pub fn contains(&self, id: ComponentId) -> bool {
        self.components.iter().any(|(c, _)| *c == id)
    }

    pub(crate) fn push(&mut self, id: ComponentId, component: Box<dyn Component<M>>) {
        self.components.push((id, component));
    }

    pub(crate) fn remove(&mut self, id: ComponentId) -> Option<Box<dyn Component<M>>> {
        let index = self.components.iter().position(|(c, _)| *c == id)?;
        Some(self.components.remove(index).1)
    }

    pub(crate) fn get(&self, id: ComponentId) -> Option<&dyn Component<M>> {
        self.components
            .iter()
            .find(|(c, _)| *c == id)
            .map(|(_, component)| component.as_ref())
    }

    pub(crate) fn get_mut(&mut self, id: ComponentId) -> Option<&mut dyn Component<M>> {
        self.components
            .iter_mut()
            .find(|(c, _)| *c == id)
            .map(|(_, component)| component.as_mut())
    }

    /// Give `dt` and the full event batch to every component.
    pub fn update(&mut self, dt: f64, events: &[Event], out: &mut Vec<Cmd<M>>) {
        trace!(layer = %self.name, components = self.components.len(), "update layer");
        for (_, component) in &mut self.components {
            let cmd = component.update(dt, events);
            if !cmd.is_none() {
                out.push(cmd);
            }
        }
    }

    /// Draw every visible component into `target`.
    ///
    /// Returns the rectangles touched, clipped to the target.
    pub fn draw(&self, target: &mut FrameBuffer) -> DirtyRegion {
        trace!(layer = %self.name, "draw layer");
        let mut dirty = DirtyRegion::new();
        for (_, component) in &self.components {
            let sprite = component.sprite();
            if !sprite.is_visible() {
                continue;
            }
            dirty.push(target.blit(sprite.surface(), sprite.position()));
        }
        dirty
    }
}
