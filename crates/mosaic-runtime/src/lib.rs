#![forbid(unsafe_code)]

//! Layered sprite engine.
//!
//! An [`Engine`](engine::Engine) owns a frame buffer, a [`Stage`](stage::Stage)
//! of named, prioritised layers and a [`ScreenManager`](screen::ScreenManager).
//! Each frame it applies any pending screen transition, feeds input to the
//! current screen and every component, and composites the layers.
//!
//! Hosts plug in through the traits in [`backend`]; [`headless`] provides a
//! scripted implementation for tests.

pub mod backend;
pub mod clock;
pub mod cmd;
pub mod component;
pub mod config;
pub mod engine;
pub mod error;
pub mod headless;
pub mod layer;
pub mod screen;
pub mod stage;

pub use cmd::Cmd;
pub use component::{Component, Fit, Sprite};
pub use config::EngineConfig;
pub use engine::{Engine, FrameReport};
pub use error::{EngineError, EngineResult};
pub use layer::{ComponentId, Layer};
pub use screen::{Screen, ScreenManager};
pub use stage::Stage;
