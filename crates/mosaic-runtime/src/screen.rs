#![forbid(unsafe_code)]

//! Screens and the screen state machine.
//!
//! The manager holds `current` and `pending` separately: [`ScreenManager::set_screen`]
//! only records the request, and [`ScreenManager::apply_pending`] performs the
//! transition at a fixed point in the frame. Unregistered names are accepted
//! at request time and rejected when applied.

use std::collections::HashMap;

use mosaic_core::event::Event;
use tracing::{info, info_span};

use crate::cmd::Cmd;
use crate::error::{EngineError, EngineResult};
use crate::stage::Stage;

/// A scene definition. Configures layers and components when it becomes
/// current; owns no rendering state of its own.
pub trait Screen<M> {
    /// Populate the stage. Called after the previous screen's teardown.
    fn on_init(&mut self, stage: &mut Stage<M>) -> EngineResult<()>;

    /// Called once per frame, before layers update, with the frame's events.
    fn on_event(&mut self, _stage: &mut Stage<M>, _dt: f64, _events: &[Event]) -> EngineResult<Cmd<M>> {
        Ok(Cmd::None)
    }

    /// A message sent by a component or by this screen.
    fn on_message(&mut self, _stage: &mut Stage<M>, _msg: M) -> EngineResult<Cmd<M>> {
        Ok(Cmd::None)
    }

    /// Teardown when another screen takes over.
    fn on_end(&mut self, _stage: &mut Stage<M>) {}
}

/// State machine over named screens.
pub struct ScreenManager<M> {
    screens: HashMap<String, Box<dyn Screen<M>>>,
    current: Option<String>,
    pending: Option<String>,
}

impl<M> Default for ScreenManager<M> {
    fn default() -> Self {
        Self {
            screens: HashMap::new(),
            current: None,
            pending: None,
        }
    }
}

impl<M> std::fmt::Debug for ScreenManager<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<&String> = self.screens.keys().collect();
        names.sort();
        f.debug_struct("ScreenManager")
            .field("screens", &names)
            .field("current", &self.current)
            .field("pending", &self.pending)
            .finish()
    }
}

impl<M: 'static> ScreenManager<M> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a screen under a unique name.
    pub fn add_screen<S>(&mut self, name: impl Into<String>, screen: S) -> EngineResult<()>
    where
        S: Screen<M> + 'static,
    {
        let name = name.into();
        if self.screens.contains_key(&name) {
            return Err(EngineError::DuplicateName(name));
        }
        self.screens.insert(name, Box::new(screen));
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.screens.contains_key(name)
    }

    /// Request a transition. Never fails; the name is checked when applied.
    pub fn set_screen(&mut self, name: impl Into<String>) {
        self.pending = Some(name.into());
    }

    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn pending(&self) -> Option<&str> {
        self.pending.as_deref()
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Whether a transition is waiting to be applied.
    ///
    /// An unregistered target fails with `ScreenNotFound` and the request is
    /// dropped; the current screen and the stage are left as they are.
    pub fn check_pending(&mut self) -> EngineResult<bool> {
        match self.pending.as_deref() {
            None => Ok(false),
            Some(name) if self.screens.contains_key(name) => Ok(true),
            Some(_) => {
                let name = self.pending.take().unwrap_or_default();
                Err(EngineError::ScreenNotFound(name))
            }
        }
    }

    /// The current screen, if any.
    pub fn current_screen_mut(&mut self) -> Option<&mut (dyn Screen<M> + 'static)> {
        let name = self.current.as_ref()?;
        self.screens.get_mut(name).map(|s| s.as_mut())
    }

    /// Perform the pending transition, if any.
    ///
    /// Tears down the current screen, makes the pending one current, clears
    /// the request and initialises the new screen. Returns whether a
    /// transition happened.
    pub fn apply_pending(&mut self, stage: &mut Stage<M>) -> EngineResult<bool> {
        let Some(next) = self.pending.take() else {
            return Ok(false);
        };
        if !self.screens.contains_key(&next) {
            return Err(EngineError::ScreenNotFound(next));
        }

        let from = self.current.take();
        let _span = info_span!(
            "mosaic.screen.transition",
            from = from.as_deref().unwrap_or("<none>"),
            to = %next
        )
        .entered();

        if let Some(screen) = from.as_ref().and_then(|name| self.screens.get_mut(name)) {
            screen.on_end(stage);
        }
        info!(
            from = from.as_deref().unwrap_or("<none>"),
            to = %next,
            "screen transition"
        );
        let screen = self
            .screens
            .get_mut(&next)
            .ok_or_else(|| EngineError::ScreenNotFound(next.clone()))?;
        self.current = Some(next);
        screen.on_init(stage)?;
        Ok(true)
    }
}
