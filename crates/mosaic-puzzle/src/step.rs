#![forbid(unsafe_code)]

//! Recorded, reversible tile transforms.

use std::fmt;

use mosaic_render::{Axis, Rotation, ShapeError, TileCoord, TileGrid};

/// One reversible operation on a [`TileGrid`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransformStep {
    /// Counter-clockwise rotation of a single tile.
    Rotate { tile: TileCoord, rotation: Rotation },
    /// Mirror of a single tile.
    Flip { tile: TileCoord, axis: Axis },
    /// Exchange of two tiles.
    Swap { a: TileCoord, b: TileCoord },
}

impl TransformStep {
    /// Apply to `grid` in place.
    pub fn apply(&self, grid: &mut TileGrid) -> Result<(), ShapeError> {
        match *self {
            Self::Rotate { tile, rotation } => grid.rotate(&[tile], rotation),
            Self::Flip { tile, axis } => grid.flip(&[tile], axis),
            Self::Swap { a, b } => grid.swap(a, b),
        }
    }

    /// The step that undoes this one.
    ///
    /// Rotation by θ is undone by 360 − θ. Flips are self-inverse. A swap is
    /// undone by swapping the same pair, recorded with the operands reversed.
    pub const fn inverse(&self) -> Self {
        match *self {
            Self::Rotate { tile, rotation } => Self::Rotate {
                tile,
                rotation: rotation.inverse(),
            },
            Self::Flip { tile, axis } => Self::Flip { tile, axis },
            Self::Swap { a, b } => Self::Swap { a: b, b: a },
        }
    }

    /// Tiles this step touches.
    pub fn tiles(&self) -> impl Iterator<Item = TileCoord> + use<> {
        let (first, second) = match *self {
            Self::Rotate { tile, .. } | Self::Flip { tile, .. } => (tile, None),
            Self::Swap { a, b } => (a, Some(b)),
        };
        std::iter::once(first).chain(second)
    }
}

impl fmt::Display for TransformStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rotate { tile, rotation } => write!(f, "rotate {tile} by {rotation}"),
            Self::Flip { tile, axis } => write!(f, "flip {tile} {axis}"),
            Self::Swap { a, b } => write!(f, "swap {a} <-> {b}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mosaic_render::{PixelImage, Rgba};

    fn grid() -> TileGrid {
        let mut img = PixelImage::new(4, 2);
        for y in 0..2 {
            for x in 0..4 {
                img.set(x, y, Rgba::rgb(x as u8, y as u8, 9));
            }
        }
        TileGrid::from_image(&img, 2).unwrap()
    }

    #[test]
    fn every_step_is_undone_by_its_inverse() {
        let a = TileCoord::new(0, 0);
        let b = TileCoord::new(1, 0);
        let steps = [
            TransformStep::Rotate {
                tile: a,
                rotation: Rotation::R90,
            },
            TransformStep::Rotate {
                tile: b,
                rotation: Rotation::R180,
            },
            TransformStep::Flip {
                tile: a,
                axis: Axis::Horizontal,
            },
            TransformStep::Flip {
                tile: b,
                axis: Axis::Vertical,
            },
            TransformStep::Swap { a, b },
        ];
        for step in steps {
            let mut g = grid();
            step.apply(&mut g).unwrap();
            step.inverse().apply(&mut g).unwrap();
            assert_eq!(g, grid(), "{step} not undone");
        }
    }

    #[test]
    fn inverse_parameters() {
        let t = TileCoord::new(1, 1);
        assert_eq!(
            TransformStep::Rotate {
                tile: t,
                rotation: Rotation::R90
            }
            .inverse(),
            TransformStep::Rotate {
                tile: t,
                rotation: Rotation::R270
            }
        );
        let swap = TransformStep::Swap {
            a: TileCoord::new(0, 1),
            b: t,
        };
        assert_eq!(
            swap.inverse(),
            TransformStep::Swap {
                a: t,
                b: TileCoord::new(0, 1)
            }
        );
    }

    #[test]
    fn out_of_bounds_step_fails() {
        let mut g = grid();
        let step = TransformStep::Flip {
            tile: TileCoord::new(3, 3),
            axis: Axis::Vertical,
        };
        assert!(matches!(
            step.apply(&mut g),
            Err(ShapeError::TileOutOfBounds { .. })
        ));
    }

    #[test]
    fn display_reads_naturally() {
        let step = TransformStep::Rotate {
            tile: TileCoord::new(2, 0),
            rotation: Rotation::R270,
        };
        assert_eq!(step.to_string(), "rotate (2, 0) by 270°");
        let swap = TransformStep::Swap {
            a: TileCoord::new(0, 0),
            b: TileCoord::new(1, 0),
        };
        assert_eq!(swap.tiles().count(), 2);
    }
}
