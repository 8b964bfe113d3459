#![forbid(unsafe_code)]

//! Regular grids of square tiles cut from an image.
//!
//! A [`TileGrid`] owns its tiles outright (copy-on-tile); nothing aliases the
//! source image after construction. Transforms mutate tiles in place and
//! validate every coordinate before touching any pixel, so a failed call
//! leaves the grid unchanged.

use std::fmt;

use mosaic_core::geometry::{Rect, Size};

use crate::error::ShapeError;
use crate::image::PixelImage;
use crate::transform::{Axis, Filter, Rotation};

/// Grid cell address, `(x, y)` = (column, row).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct TileCoord {
    pub x: u32,
    pub y: u32,
}

impl TileCoord {
    #[inline]
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

impl From<(u32, u32)> for TileCoord {
    fn from((x, y): (u32, u32)) -> Self {
        Self::new(x, y)
    }
}

impl fmt::Display for TileCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// An image split into `tiles_x * tiles_y` square tiles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileGrid {
    tiles_x: u32,
    tiles_y: u32,
    tile_size: u32,
    /// Row-major by tile coordinate.
    tiles: Vec<PixelImage>,
}

impl TileGrid {
    /// Cut `image` into `tile_size` squares.
    ///
    /// Fails when either image dimension is not a multiple of `tile_size`.
    pub fn from_image(image: &PixelImage, tile_size: u32) -> Result<Self, ShapeError> {
        if tile_size == 0 {
            return Err(ShapeError::ZeroTileSize);
        }
        if image.width() % tile_size != 0 || image.height() % tile_size != 0 {
            return Err(ShapeError::TileMisfit {
                size: image.size(),
                tile_size,
            });
        }
        let tiles_x = image.width() / tile_size;
        let tiles_y = image.height() / tile_size;
        let mut tiles = Vec::with_capacity(tiles_x as usize * tiles_y as usize);
        for ty in 0..tiles_y {
            for tx in 0..tiles_x {
                let cell = Rect::new(tx * tile_size, ty * tile_size, tile_size, tile_size);
                tiles.push(image.crop(cell));
            }
        }
        Ok(Self {
            tiles_x,
            tiles_y,
            tile_size,
            tiles,
        })
    }

    /// Re-flatten into a single image.
    pub fn to_image(&self) -> PixelImage {
        let size = self.pixel_size();
        let mut out = PixelImage::new(size.width, size.height);
        for coord in self.coords() {
            let tile = &self.tiles[self.index(coord)];
            out.paste(tile, coord.x * self.tile_size, coord.y * self.tile_size);
        }
        out
    }

    #[inline]
    pub const fn tiles_x(&self) -> u32 {
        self.tiles_x
    }

    #[inline]
    pub const fn tiles_y(&self) -> u32 {
        self.tiles_y
    }

    #[inline]
    pub const fn tile_size(&self) -> u32 {
        self.tile_size
    }

    /// Grid extent in tiles.
    #[inline]
    pub const fn dimensions(&self) -> Size {
        Size::new(self.tiles_x, self.tiles_y)
    }

    /// Extent of the flattened image in pixels.
    #[inline]
    pub const fn pixel_size(&self) -> Size {
        Size::new(self.tiles_x * self.tile_size, self.tiles_y * self.tile_size)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    #[inline]
    pub const fn contains(&self, coord: TileCoord) -> bool {
        coord.x < self.tiles_x && coord.y < self.tiles_y
    }

    /// Every coordinate in row-major order.
    pub fn coords(&self) -> impl Iterator<Item = TileCoord> + use<> {
        let (w, h) = (self.tiles_x, self.tiles_y);
        (0..h).flat_map(move |y| (0..w).map(move |x| TileCoord::new(x, y)))
    }

    #[inline]
    fn index(&self, coord: TileCoord) -> usize {
        coord.y as usize * self.tiles_x as usize + coord.x as usize
    }

    fn check(&self, coord: TileCoord) -> Result<usize, ShapeError> {
        if self.contains(coord) {
            Ok(self.index(coord))
        } else {
            Err(ShapeError::TileOutOfBounds {
                coord,
                tiles: self.dimensions(),
            })
        }
    }

    fn check_all(&self, coords: &[TileCoord]) -> Result<(), ShapeError> {
        coords.iter().try_for_each(|&c| self.check(c).map(|_| ()))
    }

    pub fn tile(&self, coord: TileCoord) -> Option<&PixelImage> {
        self.contains(coord).then(|| &self.tiles[self.index(coord)])
    }

    pub fn tile_mut(&mut self, coord: TileCoord) -> Option<&mut PixelImage> {
        if self.contains(coord) {
            let i = self.index(coord);
            Some(&mut self.tiles[i])
        } else {
            None
        }
    }

    /// Rotate each addressed tile counter-clockwise.
    pub fn rotate(&mut self, coords: &[TileCoord], rotation: Rotation) -> Result<(), ShapeError> {
        self.check_all(coords)?;
        if rotation.is_identity() {
            return Ok(());
        }
        for &c in coords {
            let i = self.index(c);
            self.tiles[i] = self.tiles[i].rotated(rotation);
        }
        Ok(())
    }

    /// Mirror each addressed tile.
    pub fn flip(&mut self, coords: &[TileCoord], axis: Axis) -> Result<(), ShapeError> {
        self.check_all(coords)?;
        for &c in coords {
            let i = self.index(c);
            self.tiles[i].flip(axis);
        }
        Ok(())
    }

    /// Exchange the contents of two tiles.
    pub fn swap(&mut self, a: TileCoord, b: TileCoord) -> Result<(), ShapeError> {
        let ia = self.check(a)?;
        let ib = self.check(b)?;
        self.tiles.swap(ia, ib);
        Ok(())
    }

    /// Colour-filter each addressed tile.
    pub fn filter(&mut self, coords: &[TileCoord], filter: &Filter) -> Result<(), ShapeError> {
        self.check_all(coords)?;
        for &c in coords {
            let i = self.index(c);
            self.tiles[i].apply_filter(filter);
        }
        Ok(())
    }
}
