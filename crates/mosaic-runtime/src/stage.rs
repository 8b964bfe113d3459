#![forbid(unsafe_code)]

//! The engine's layer registry.
//!
//! Layers are kept sorted by priority, ascending, with creation order
//! breaking ties. Components are addressed through [`ComponentId`] handles
//! that stay valid until the component is removed or its layer is cleared.

use mosaic_core::geometry::Size;
use mosaic_render::Rgba;
use tracing::{debug, info};

use crate::component::Component;
use crate::error::{EngineError, EngineResult};
use crate::layer::{ComponentId, Layer};

/// Named layers plus frame metadata visible to screens.
pub struct Stage<M> {
    layers: Vec<Layer<M>>,
    next_id: u64,
    size: Size,
    background: Rgba,
}

impl<M> std::fmt::Debug for Stage<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stage")
            .field("layers", &self.layers)
            .field("size", &self.size)
            .finish()
    }
}

impl<M: 'static> Stage<M> {
    pub fn new(size: Size, background: Rgba) -> Self {
        Self {
            layers: Vec::new(),
            next_id: 0,
            size,
            background,
        }
    }

    /// Frame size in pixels.
    #[inline]
    pub const fn size(&self) -> Size {
        self.size
    }

    pub(crate) fn set_size(&mut self, size: Size) {
        self.size = size;
    }

    #[inline]
    pub const fn background(&self) -> Rgba {
        self.background
    }

    /// Change the colour the frame is cleared to.
    pub fn set_background(&mut self, background: Rgba) {
        self.background = background;
    }

    /// Create a layer.
    ///
    /// Without an explicit priority the layer goes one above the current
    /// highest (0 for the first layer).
    pub fn add_layer(&mut self, name: impl Into<String>, priority: Option<i32>) -> EngineResult<()> {
        let name = name.into();
        if self.has_layer(&name) {
            return Err(EngineError::DuplicateName(name));
        }
        let priority = priority.unwrap_or_else(|| {
            self.layers
                .iter()
                .map(Layer::priority)
                .max()
                .map_or(0, |p| p.saturating_add(1))
        });
        debug!(layer = %name, priority, "add layer");
        // After every layer of equal priority, so ties keep creation order.
        let at = self.layers.partition_point(|l| l.priority() <= priority);
        self.layers.insert(at, Layer::new(name, priority));
        Ok(())
    }

    /// Remove a layer and every component on it.
    pub fn remove_layer(&mut self, name: &str) -> EngineResult<Layer<M>> {
        let index = self
            .layers
            .iter()
            .position(|l| l.name() == name)
            .ok_or_else(|| EngineError::NotFound(format!("layer {name}")))?;
        Ok(self.layers.remove(index))
    }

    /// Remove every layer.
    pub fn clear_layers(&mut self) {
        if !self.layers.is_empty() {
            info!(layers = self.layers.len(), "clear layers");
        }
        self.layers.clear();
    }

    pub fn has_layer(&self, name: &str) -> bool {
        self.layers.iter().any(|l| l.name() == name)
    }

    pub fn layer(&self, name: &str) -> Option<&Layer<M>> {
        self.layers.iter().find(|l| l.name() == name)
    }

    /// Layers in update/draw order.
    pub fn layers(&self) -> impl Iterator<Item = &Layer<M>> {
        self.layers.iter()
    }

    pub(crate) fn layers_mut(&mut self) -> impl Iterator<Item = &mut Layer<M>> {
        self.layers.iter_mut()
    }

    /// Layer names in update/draw order.
    pub fn layer_names(&self) -> Vec<&str> {
        self.layers.iter().map(Layer::name).collect()
    }

    /// Put a component on `layer`.
    pub fn add_component<C>(&mut self, layer: &str, component: C) -> EngineResult<ComponentId>
    where
        C: Component<M>,
    {
        self.add_boxed(layer, Box::new(component))
    }

    /// Put an already boxed component on `layer`.
    pub fn add_boxed(
        &mut self,
        layer: &str,
        component: Box<dyn Component<M>>,
    ) -> EngineResult<ComponentId> {
        let id = ComponentId(self.next_id);
        let target = self
            .layers
            .iter_mut()
            .find(|l| l.name() == layer)
            .ok_or_else(|| EngineError::NotFound(format!("layer {layer}")))?;
        self.next_id += 1;
        target.push(id, component);
        Ok(id)
    }

    /// Take a component off whichever layer holds it.
    pub fn remove_component(&mut self, id: ComponentId) -> EngineResult<Box<dyn Component<M>>> {
        self.layers
            .iter_mut()
            .find_map(|l| l.remove(id))
            .ok_or_else(|| EngineError::NotFound(id.to_string()))
    }

    pub fn component(&self, id: ComponentId) -> Option<&dyn Component<M>> {
        self.layers.iter().find_map(|l| l.get(id))
    }

    pub fn component_mut(&mut self, id: ComponentId) -> Option<&mut dyn Component<M>> {
        self.layers.iter_mut().find_map(|l| l.get_mut(id))
    }

    /// Borrow a component as its concrete type.
    pub fn get<C: Component<M>>(&self, id: ComponentId) -> Option<&C> {
        self.component(id)?.as_any().downcast_ref::<C>()
    }

    /// Mutably borrow a component as its concrete type.
    pub fn get_mut<C: Component<M>>(&mut self, id: ComponentId) -> Option<&mut C> {
        self.component_mut(id)?.as_any_mut().downcast_mut::<C>()
    }

    /// Like [`get_mut`](Self::get_mut), failing with `NotFound` when the id
    /// is stale or the type does not match.
    pub fn expect_mut<C: Component<M>>(&mut self, id: ComponentId) -> EngineResult<&mut C> {
        self.get_mut(id)
            .ok_or_else(|| EngineError::NotFound(format!("{id} as {}", std::any::type_name::<C>())))
    }
}
