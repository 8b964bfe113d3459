#![forbid(unsafe_code)]

//! Scripted in-memory backend for tests and CI runs.

use std::collections::VecDeque;
use std::io;

use mosaic_core::event::Event;
use mosaic_core::geometry::Size;
use mosaic_render::PixelImage;
use mosaic_render::dirty::DirtyRegion;
use mosaic_render::frame::FrameBuffer;

use crate::backend::{EventSource, Presenter};

/// Backend that replays one scripted event batch per frame and records
/// every present.
///
/// Once the script runs out it emits [`Event::Quit`] (unless told not to),
/// so a scripted [`Engine::run`](crate::engine::Engine::run) always ends.
#[derive(Debug, Clone)]
pub struct HeadlessBackend {
    size: Size,
    script: VecDeque<Vec<Event>>,
    quit_when_exhausted: bool,
    presents: Vec<DirtyRegion>,
    last_frame: Option<PixelImage>,
}

impl HeadlessBackend {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: Size::new(width, height),
            script: VecDeque::new(),
            quit_when_exhausted: true,
            presents: Vec::new(),
            last_frame: None,
        }
    }

    /// Queue one batch per frame.
    #[must_use]
    pub fn with_script(mut self, frames: impl IntoIterator<Item = Vec<Event>>) -> Self {
        self.script.extend(frames);
        self
    }

    /// Run `count` frames with no input before quitting.
    #[must_use]
    pub fn with_idle_frames(mut self, count: usize) -> Self {
        self.script.extend(std::iter::repeat_with(Vec::new).take(count));
        self
    }

    #[must_use]
    pub fn quit_when_exhausted(mut self, quit: bool) -> Self {
        self.quit_when_exhausted = quit;
        self
    }

    /// Queue another frame of input.
    pub fn push_frame(&mut self, events: Vec<Event>) {
        self.script.push_back(events);
    }

    /// Change the reported size; emits a resize on the next drain.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.size = Size::new(width, height);
        self.script.push_back(vec![Event::Resize { width, height }]);
    }

    /// Dirty regions of every present so far.
    pub fn presents(&self) -> &[DirtyRegion] {
        &self.presents
    }

    /// Pixels of the most recent present.
    pub fn last_frame(&self) -> Option<&PixelImage> {
        self.last_frame.as_ref()
    }

    pub fn remaining_frames(&self) -> usize {
        self.script.len()
    }
}

impl EventSource for HeadlessBackend {
    fn size(&self) -> io::Result<Size> {
        Ok(self.size)
    }

    fn drain_events(&mut self, out: &mut Vec<Event>) -> io::Result<()> {
        match self.script.pop_front() {
            Some(batch) => out.extend(batch),
            None if self.quit_when_exhausted => out.push(Event::Quit),
            None => {}
        }
        Ok(())
    }
}

impl Presenter for HeadlessBackend {
    fn present(&mut self, frame: &FrameBuffer, dirty: &DirtyRegion) -> io::Result<()> {
        self.presents.push(dirty.clone());
        self.last_frame = Some(frame.image().clone());
        Ok(())
    }
}
