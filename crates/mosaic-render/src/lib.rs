#![forbid(unsafe_code)]

//! Pixel kernel for the mosaic engine.
//!
//! - [`image::PixelImage`]: owned RGBA arrays with lossless transforms
//! - [`tile::TileGrid`]: images cut into square tiles, transformed per tile
//! - [`ops`] and [`nine_slice`]: stretch, alpha merge, outlines, nine-slice
//! - [`frame::FrameBuffer`] and [`dirty::DirtyRegion`]: the compositing target
//!   and the record of what changed
//! - [`text`]: bitmap font for labels
//! - [`asset`]: named image ingestion

pub mod asset;
pub mod color;
pub mod dirty;
pub mod error;
pub mod frame;
pub mod image;
pub mod nine_slice;
pub mod ops;
pub mod text;
pub mod tile;
pub mod transform;

pub use color::Rgba;
pub use error::ShapeError;
pub use image::PixelImage;
pub use text::{Font, TextError};
pub use tile::{TileCoord, TileGrid};
pub use transform::{Axis, Filter, Rotation};
