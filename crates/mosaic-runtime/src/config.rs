#![forbid(unsafe_code)]

//! Engine configuration.

use std::time::Duration;

use mosaic_core::geometry::Size;
use mosaic_render::Rgba;

/// Engine settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Target frame rate. Zero disables pacing.
    pub fps: u32,
    /// Initial frame size in pixels (the host may resize later).
    pub size: Size,
    /// Colour the frame is cleared to before compositing.
    pub background: Rgba,
    /// Upper bound on the delta time handed to screens and components.
    pub max_dt: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            fps: 60,
            size: Size::new(320, 200),
            background: Rgba::rgb(24, 24, 32),
            max_dt: Duration::from_millis(250),
        }
    }
}

impl EngineConfig {
    #[must_use]
    pub fn with_fps(mut self, fps: u32) -> Self {
        self.fps = fps;
        self
    }

    #[must_use]
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.size = Size::new(width, height);
        self
    }

    #[must_use]
    pub fn with_background(mut self, background: Rgba) -> Self {
        self.background = background;
        self
    }

    #[must_use]
    pub fn with_max_dt(mut self, max_dt: Duration) -> Self {
        self.max_dt = max_dt;
        self
    }

    /// Time budget of one frame, or zero when pacing is off.
    pub fn frame_budget(&self) -> Duration {
        if self.fps == 0 {
            Duration::ZERO
        } else {
            Duration::from_secs(1) / self.fps
        }
    }
}
