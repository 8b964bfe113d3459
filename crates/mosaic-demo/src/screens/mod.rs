#![forbid(unsafe_code)]

//! Menu, levels, credits and game screens.

mod credits;
mod game;
mod levels;
mod menu;

pub use credits::CreditsScreen;
pub use game::GameScreen;
pub use levels::LevelsScreen;
pub use menu::MenuScreen;

use mosaic_core::event::Event;
use mosaic_core::geometry::{Sides, Size};
use mosaic_runtime::EngineResult;

use crate::components::Button;

const MARGIN: u32 = 2;
const GAP: u32 = 2;

fn resized(events: &[Event]) -> bool {
    events.iter().any(|e| matches!(e, Event::Resize { .. }))
}

/// One button size that fits every label.
fn uniform_label_size<'a>(
    labels: impl IntoIterator<Item = &'a str>,
    border: Sides,
) -> EngineResult<Size> {
    let mut size = Size::default();
    for label in labels {
        let fits = Button::label_size(label, border)?;
        size = Size::new(size.width.max(fits.width), size.height.max(fits.height));
    }
    Ok(size)
}
