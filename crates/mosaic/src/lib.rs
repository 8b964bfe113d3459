#![forbid(unsafe_code)]

//! mosaic public facade crate.
//!
//! Re-exports the common types from the internal crates and offers a
//! prelude for day-to-day use.
//!
//! ```
//! use mosaic::prelude::*;
//!
//! struct Title;
//!
//! impl Screen<()> for Title {
//!     fn on_init(&mut self, stage: &mut Stage<()>) -> mosaic::Result<()> {
//!         stage.add_layer("background", None)
//!     }
//! }
//!
//! let mut engine: Engine = Engine::new(EngineConfig::default().with_size(32, 16));
//! engine.add_screen("title", Title)?;
//! engine.set_screen("title");
//! let report = engine.step(&[], std::time::Duration::ZERO)?;
//! assert!(report.transitioned);
//! # Ok::<(), mosaic::Error>(())
//! ```

// --- Core re-exports -------------------------------------------------------

pub use mosaic_core::event::{Event, KeyCode, KeyEvent, Modifiers, MouseEvent, MouseEventKind};
pub use mosaic_core::geometry::{Point, Rect, Sides, Size};

// --- Render re-exports -----------------------------------------------------

pub use mosaic_render::asset::{AssetError, AssetSource, MemoryAssets};
#[cfg(feature = "assets")]
pub use mosaic_render::asset::DirAssets;
pub use mosaic_render::dirty::DirtyRegion;
pub use mosaic_render::frame::FrameBuffer;
pub use mosaic_render::nine_slice::NineSlice;
pub use mosaic_render::{
    Axis, Filter, Font, PixelImage, Rgba, Rotation, ShapeError, TextError, TileCoord, TileGrid,
    ops,
};

// --- Runtime re-exports ----------------------------------------------------

pub use mosaic_runtime::backend::{EventSource, FrameClock, Presenter};
pub use mosaic_runtime::clock::{FramePacer, ManualClock, SystemClock};
pub use mosaic_runtime::headless::HeadlessBackend;
pub use mosaic_runtime::{
    Cmd, Component, ComponentId, Engine, EngineConfig, Fit, FrameReport, Layer, Screen,
    ScreenManager, Sprite, Stage,
};

// --- Puzzle re-exports -----------------------------------------------------

#[cfg(feature = "puzzle")]
pub use mosaic_puzzle::{Puzzle, SolveReplay, TransformStep, generate};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for mosaic apps.
pub use mosaic_runtime::EngineError as Error;

/// Standard result type for mosaic APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Cmd, Component, ComponentId, Engine, EngineConfig, Error, Event, KeyCode, PixelImage,
        Point, Rect, Result, Rgba, Screen, Size, Sprite, Stage,
    };

    #[cfg(feature = "puzzle")]
    pub use crate::{Puzzle, TileGrid, generate};

    pub use crate::{core, render, runtime};
}

pub use mosaic_core as core;
#[cfg(feature = "puzzle")]
pub use mosaic_puzzle as puzzle;
pub use mosaic_render as render;
pub use mosaic_runtime as runtime;
