#![forbid(unsafe_code)]

//! Game components.

mod button;
mod label;
mod scrambled;

pub use button::{Button, Face};
pub use label::Label;
pub use scrambled::{OutlineStyle, ScrambledImage};
