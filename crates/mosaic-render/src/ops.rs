#![forbid(unsafe_code)]

//! Whole-image operations: resampling, compositing and primitive shapes.
//!
//! Tile-level operations (rotate, flip, swap, filter) live on
//! [`TileGrid`](crate::tile::TileGrid).

use mosaic_core::geometry::{Rect, Sides, Size};

use crate::color::Rgba;
use crate::error::ShapeError;
use crate::image::PixelImage;
use crate::nine_slice::NineSlice;
use crate::tile::TileGrid;

/// Split `image` into a grid of `tile_size` squares.
pub fn tile(image: &PixelImage, tile_size: u32) -> Result<TileGrid, ShapeError> {
    TileGrid::from_image(image, tile_size)
}

/// Nearest-neighbour resample to `size`. Deterministic for identical inputs.
pub fn stretch(image: &PixelImage, size: Size) -> PixelImage {
    image.stretched(size)
}

/// Compose `image` as a nine-slice of `target` size.
pub fn nine_slice(
    image: &PixelImage,
    border: Sides,
    scale: u32,
    target: Size,
) -> Result<PixelImage, ShapeError> {
    NineSlice::new(border).with_scale(scale).render(image, target)
}

/// Alpha-composite `top` over `bottom`. Both must have the same size.
pub fn merge_over(top: &PixelImage, bottom: &PixelImage) -> Result<PixelImage, ShapeError> {
    if top.size() != bottom.size() {
        return Err(ShapeError::SizeMismatch {
            expected: bottom.size(),
            actual: top.size(),
        });
    }
    let mut out = bottom.clone();
    out.blend(top, 0, 0);
    Ok(out)
}

/// Hollow rectangle with a solid `width`-pixel border and a transparent
/// interior.
pub fn outline_rect(size: Size, color: Rgba, width: u32) -> PixelImage {
    let mut out = PixelImage::new(size.width, size.height);
    out.fill(color);
    let hole = Rect::from_size(size.width, size.height).inner(Sides::all(width));
    out.fill_rect(hole, Rgba::TRANSPARENT);
    out
}
