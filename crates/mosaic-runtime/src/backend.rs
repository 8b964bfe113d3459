#![forbid(unsafe_code)]

//! Host seams: where events come from, where frames go, and what time it is.

use std::io;
use std::time::Duration;

use mosaic_core::event::Event;
use mosaic_core::geometry::Size;
use mosaic_render::dirty::DirtyRegion;
use mosaic_render::frame::FrameBuffer;

/// Source of canonical input events.
pub trait EventSource {
    /// Current presentation size in pixels.
    fn size(&self) -> io::Result<Size>;

    /// Append every event that arrived since the last call, in order.
    /// Must not block.
    fn drain_events(&mut self, out: &mut Vec<Event>) -> io::Result<()>;
}

/// Sink for composited frames.
pub trait Presenter {
    /// Show the dirty part of `frame`.
    fn present(&mut self, frame: &FrameBuffer, dirty: &DirtyRegion) -> io::Result<()>;
}

/// Monotonic clock the frame pacer sleeps against.
pub trait FrameClock {
    /// Time since an arbitrary fixed origin.
    fn now_mono(&self) -> Duration;

    /// Block for `duration`.
    fn sleep(&mut self, duration: Duration);
}
