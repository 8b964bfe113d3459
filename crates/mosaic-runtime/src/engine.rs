#![forbid(unsafe_code)]

//! The frame loop.
//!
//! One frame, in order:
//!
//! 1. scan the event batch for quit and resize;
//! 2. if a transition is pending, clear every layer and apply it;
//! 3. hand dt and the events to the current screen, then to every layer;
//! 4. apply the commands returned by those hooks;
//! 5. clear the frame buffer and composite layers by ascending priority;
//! 6. report what changed.
//!
//! A transition requested during steps 3-4 only becomes visible in the next
//! frame: the current frame finishes with the old layers intact.

use std::collections::VecDeque;
use std::time::Duration;

use mosaic_core::event::Event;
use mosaic_core::geometry::Size;
use mosaic_render::dirty::DirtyRegion;
use mosaic_render::frame::FrameBuffer;
use tracing::{debug, debug_span, info};

use crate::backend::{EventSource, FrameClock, Presenter};
use crate::clock::FramePacer;
use crate::cmd::Cmd;
use crate::config::EngineConfig;
use crate::error::EngineResult;
use crate::screen::{Screen, ScreenManager};
use crate::stage::Stage;

/// Outcome of one [`Engine::step`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameReport {
    /// 1-based frame counter.
    pub frame: u64,
    /// Region to present.
    pub dirty: DirtyRegion,
    /// Whether a screen transition ran at the start of this frame.
    pub transitioned: bool,
    /// False once a quit was seen; the caller should stop after presenting.
    pub running: bool,
}

/// Layered sprite engine with a screen state machine.
pub struct Engine<M: 'static = ()> {
    config: EngineConfig,
    stage: Stage<M>,
    screens: ScreenManager<M>,
    frame: FrameBuffer,
    running: bool,
    frame_index: u64,
    previous_dirty: DirtyRegion,
    force_full: bool,
}

impl<M: 'static> std::fmt::Debug for Engine<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("config", &self.config)
            .field("stage", &self.stage)
            .field("screens", &self.screens)
            .field("running", &self.running)
            .field("frame_index", &self.frame_index)
            .finish()
    }
}

impl<M: 'static> Engine<M> {
    pub fn new(config: EngineConfig) -> Self {
        let Size { width, height } = config.size;
        Self {
            stage: Stage::new(config.size, config.background),
            screens: ScreenManager::new(),
            frame: FrameBuffer::new(width, height, config.background),
            running: true,
            frame_index: 0,
            previous_dirty: DirtyRegion::new(),
            force_full: true,
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn stage(&self) -> &Stage<M> {
        &self.stage
    }

    pub fn stage_mut(&mut self) -> &mut Stage<M> {
        &mut self.stage
    }

    pub fn screens(&self) -> &ScreenManager<M> {
        &self.screens
    }

    pub fn screens_mut(&mut self) -> &mut ScreenManager<M> {
        &mut self.screens
    }

    /// Register a screen.
    pub fn add_screen<S>(&mut self, name: impl Into<String>, screen: S) -> EngineResult<()>
    where
        S: Screen<M> + 'static,
    {
        self.screens.add_screen(name, screen)
    }

    /// Request a transition at the start of the next frame.
    pub fn set_screen(&mut self, name: impl Into<String>) {
        self.screens.set_screen(name);
    }

    /// The composited frame.
    pub fn frame(&self) -> &FrameBuffer {
        &self.frame
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Stop after the current frame.
    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Frames stepped so far.
    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }

    /// Run exactly one frame with the given input and delta time.
    pub fn step(&mut self, events: &[Event], dt: Duration) -> EngineResult<FrameReport> {
        self.frame_index += 1;
        let _span = debug_span!(
            "mosaic.engine.frame",
            frame = self.frame_index,
            events = events.len()
        )
        .entered();

        for event in events {
            match *event {
                Event::Quit => {
                    info!(frame = self.frame_index, "quit requested");
                    self.running = false;
                }
                Event::Resize { width, height } => self.resize(width, height),
                _ => {}
            }
        }

        let mut transitioned = false;
        if self.screens.check_pending()? {
            self.stage.clear_layers();
            transitioned = self.screens.apply_pending(&mut self.stage)?;
            self.force_full |= transitioned;
        }

        let dt_secs = dt.as_secs_f64();
        let mut cmds = Vec::new();
        if let Some(screen) = self.screens.current_screen_mut() {
            cmds.push(screen.on_event(&mut self.stage, dt_secs, events)?);
        }
        for layer in self.stage.layers_mut() {
            layer.update(dt_secs, events, &mut cmds);
        }
        self.apply_commands(cmds)?;

        let dirty = self.draw();
        Ok(FrameReport {
            frame: self.frame_index,
            dirty,
            transitioned,
            running: self.running,
        })
    }

    fn resize(&mut self, width: u32, height: u32) {
        debug!(width, height, "resize");
        self.frame.resize(width, height);
        self.stage.set_size(Size::new(width, height));
        self.force_full = true;
    }

    fn apply_commands(&mut self, cmds: Vec<Cmd<M>>) -> EngineResult<()> {
        let mut queue: VecDeque<Cmd<M>> = cmds.into();
        while let Some(cmd) = queue.pop_front() {
            match cmd {
                Cmd::None => {}
                Cmd::Quit => self.running = false,
                Cmd::SetScreen(name) => {
                    debug!(screen = %name, "screen change requested");
                    self.screens.set_screen(name);
                }
                Cmd::Msg(msg) => {
                    if let Some(screen) = self.screens.current_screen_mut() {
                        queue.push_back(screen.on_message(&mut self.stage, msg)?);
                    }
                }
                Cmd::Batch(batch) => {
                    for cmd in batch.into_iter().rev() {
                        queue.push_front(cmd);
                    }
                }
            }
        }
        Ok(())
    }

    /// Composite every layer and work out what to present.
    ///
    /// The presented region covers this frame's sprites and last frame's, so
    /// anything that moved or vanished is repainted.
    fn draw(&mut self) -> DirtyRegion {
        self.frame.set_background(self.stage.background());
        self.frame.clear();

        let mut current = DirtyRegion::new();
        for layer in self.stage.layers() {
            current.merge(&layer.draw(&mut self.frame));
        }

        let present = if self.force_full {
            DirtyRegion::full(self.frame.bounds())
        } else {
            let mut present = current.clone();
            present.merge(&self.previous_dirty);
            present
        };
        self.previous_dirty = current;
        self.force_full = false;
        present
    }

    /// Drive frames from `backend` until a quit, pacing against `clock`.
    pub fn run<B, C>(&mut self, backend: &mut B, clock: &mut C) -> EngineResult<()>
    where
        B: EventSource + Presenter + ?Sized,
        C: FrameClock + ?Sized,
    {
        let size = backend.size()?;
        if size != self.frame.size() {
            self.resize(size.width, size.height);
        }
        self.running = true;
        info!(width = size.width, height = size.height, fps = self.config.fps, "engine started");

        let mut pacer = FramePacer::new(self.config.frame_budget(), self.config.max_dt);
        let mut events = Vec::new();
        while self.running {
            events.clear();
            backend.drain_events(&mut events)?;
            let dt = pacer.tick(clock);
            let report = self.step(&events, dt)?;
            backend.present(&self.frame, &report.dirty)?;
        }
        info!(frames = self.frame_index, "engine stopped");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::{Component, Sprite};
    use mosaic_core::geometry::Rect;
    use tracing_test::traced_test;

    struct Quitter {
        sprite: Sprite,
    }

    impl Component<()> for Quitter {
        fn sprite(&self) -> &Sprite {
            &self.sprite
        }

        fn sprite_mut(&mut self) -> &mut Sprite {
            &mut self.sprite
        }

        fn on_tick(&mut self, _dt: f64) -> Cmd<()> {
            Cmd::batch(vec![Cmd::msg(()), Cmd::quit()])
        }
    }

    #[derive(Default)]
    struct Counter {
        messages: usize,
    }

    impl Screen<()> for Counter {
        fn on_init(&mut self, stage: &mut Stage<()>) -> EngineResult<()> {
            stage.add_layer("main", None)?;
            stage.add_component(
                "main",
                Quitter {
                    sprite: Sprite::new(Rect::new(0, 0, 2, 2)),
                },
            )?;
            Ok(())
        }

        fn on_message(&mut self, _stage: &mut Stage<()>, _msg: ()) -> EngineResult<Cmd<()>> {
            self.messages += 1;
            Ok(Cmd::none())
        }
    }

    #[test]
    #[traced_test]
    fn batch_commands_and_quit_are_applied() {
        let mut engine: Engine = Engine::new(EngineConfig::default().with_size(8, 8));
        engine.add_screen("main", Counter::default()).unwrap();
        engine.set_screen("main");

        let report = engine.step(&[], Duration::from_millis(16)).unwrap();

        assert!(!report.running);
        assert!(report.transitioned);
        assert!(logs_contain("screen transition"));
    }

    #[test]
    fn step_without_screen_clears_to_background() {
        let config = EngineConfig::default()
            .with_size(4, 4)
            .with_background(mosaic_render::Rgba::WHITE);
        let mut engine: Engine = Engine::new(config);

        let report = engine.step(&[], Duration::ZERO).unwrap();

        assert!(!report.transitioned);
        assert_eq!(engine.frame().pixel(3, 3), Some(mosaic_render::Rgba::WHITE));
        assert_eq!(report.dirty.bounds(), Rect::from_size(4, 4));
    }
}
