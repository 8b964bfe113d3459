#![forbid(unsafe_code)]

//! Shape errors raised by pixel and tile operations.

use std::fmt;

use mosaic_core::geometry::{Sides, Size};

use crate::tile::TileCoord;

/// Pixel array dimensions inconsistent with the expected grid, tile or
/// component geometry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShapeError {
    /// Image width or height is not a multiple of the tile size.
    TileMisfit { size: Size, tile_size: u32 },
    /// Tile size of zero.
    ZeroTileSize,
    /// Two images (or an image and a component) disagree on size.
    SizeMismatch { expected: Size, actual: Size },
    /// Nine-slice target is smaller than the scaled border.
    NineSliceTooSmall { target: Size, border: Sides },
    /// Nine-slice border does not fit inside the source image.
    BorderExceedsSource { border: Sides, source: Size },
    /// Tile coordinate outside the grid.
    TileOutOfBounds { coord: TileCoord, tiles: Size },
    /// Raw buffer has the wrong number of bytes for its declared size.
    BufferLength { expected: usize, actual: usize },
    /// Raw buffer has a channel count other than 3 or 4.
    ChannelCount(usize),
}

impl fmt::Display for ShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TileMisfit { size, tile_size } => write!(
                f,
                "image {}x{} is not divisible into {tile_size}px tiles",
                size.width, size.height
            ),
            Self::ZeroTileSize => write!(f, "tile size must be non-zero"),
            Self::SizeMismatch { expected, actual } => write!(
                f,
                "size mismatch: expected {}x{}, got {}x{}",
                expected.width, expected.height, actual.width, actual.height
            ),
            Self::NineSliceTooSmall { target, border } => write!(
                f,
                "nine-slice target {}x{} is smaller than border {}+{} x {}+{}",
                target.width, target.height, border.left, border.right, border.top, border.bottom
            ),
            Self::BorderExceedsSource { border, source } => write!(
                f,
                "nine-slice border {}+{} x {}+{} exceeds source {}x{}",
                border.left, border.right, border.top, border.bottom, source.width, source.height
            ),
            Self::TileOutOfBounds { coord, tiles } => write!(
                f,
                "tile {coord} outside {}x{} grid",
                tiles.width, tiles.height
            ),
            Self::BufferLength { expected, actual } => {
                write!(f, "pixel buffer has {actual} bytes, expected {expected}")
            }
            Self::ChannelCount(n) => write!(f, "unsupported channel count {n} (expected 3 or 4)"),
        }
    }
}

impl std::error::Error for ShapeError {}
