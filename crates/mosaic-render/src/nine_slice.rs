#![forbid(unsafe_code)]

//! Nine-slice scaling.
//!
//! The source is cut along its border into four corners, four edges and a
//! centre. Corners are copied unchanged, top and bottom edges stretch
//! horizontally, left and right edges stretch vertically, and the centre
//! stretches both ways.

use mosaic_core::geometry::{Rect, Sides, Size};

use crate::error::ShapeError;
use crate::image::PixelImage;

/// Nine-slice parameters: border widths in source pixels plus an integer
/// pre-scale applied to both the source and the border.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NineSlice {
    pub border: Sides,
    pub scale: u32,
}

impl Default for NineSlice {
    fn default() -> Self {
        Self::new(Sides::default())
    }
}

/// One axis of the slicing: `(src_start, src_len, dst_start, dst_len)` for
/// the leading band, the middle band and the trailing band.
type Bands = [(u32, u32, u32, u32); 3];

fn bands(src_len: u32, dst_len: u32, lead: u32, trail: u32) -> Bands {
    [
        (0, lead, 0, lead),
        (lead, src_len - lead - trail, lead, dst_len - lead - trail),
        (src_len - trail, trail, dst_len - trail, trail),
    ]
}

impl NineSlice {
    pub const fn new(border: Sides) -> Self {
        Self { border, scale: 1 }
    }

    #[must_use]
    pub const fn with_scale(mut self, scale: u32) -> Self {
        self.scale = scale;
        self
    }

    /// Border after scaling.
    pub const fn scaled_border(&self) -> Sides {
        self.border.scaled(self.scale)
    }

    /// Smallest target that can hold the scaled border.
    pub const fn min_size(&self) -> Size {
        let b = self.scaled_border();
        Size::new(b.horizontal_sum(), b.vertical_sum())
    }

    /// Compose `source` into an image of exactly `target` size.
    pub fn render(&self, source: &PixelImage, target: Size) -> Result<PixelImage, ShapeError> {
        let src = source.scale(self.scale.max(1));
        let border = self.scaled_border();

        if border.horizontal_sum() > src.width() || border.vertical_sum() > src.height() {
            return Err(ShapeError::BorderExceedsSource {
                border,
                source: src.size(),
            });
        }
        let min = self.min_size();
        if target.width < min.width || target.height < min.height {
            return Err(ShapeError::NineSliceTooSmall { target, border });
        }

        let cols = bands(src.width(), target.width, border.left, border.right);
        let rows = bands(src.height(), target.height, border.top, border.bottom);

        let mut out = PixelImage::new(target.width, target.height);
        for &(sy, sh, dy, dh) in &rows {
            for &(sx, sw, dx, dw) in &cols {
                if dw == 0 || dh == 0 {
                    continue;
                }
                let piece = src.crop(Rect::new(sx, sy, sw, sh));
                out.paste(&piece.stretched(Size::new(dw, dh)), dx, dy);
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgba;

    /// 3x3 source with a unique colour per pixel.
    fn source() -> PixelImage {
        let mut img = PixelImage::new(3, 3);
        for y in 0..3 {
            for x in 0..3 {
                img.set(x, y, Rgba::rgb(x as u8 * 100, y as u8 * 100, 7));
            }
        }
        img
    }

    #[test]
    fn corners_stay_fixed_edges_stretch() {
        let out = NineSlice::new(Sides::all(1))
            .render(&source(), Size::new(5, 4))
            .unwrap();
        let src = source();
        assert_eq!(out.get(0, 0), src.get(0, 0));
        assert_eq!(out.get(4, 0), src.get(2, 0));
        assert_eq!(out.get(0, 3), src.get(0, 2));
        assert_eq!(out.get(4, 3), src.get(2, 2));
        // top edge
        for x in 1..4 {
            assert_eq!(out.get(x, 0), src.get(1, 0));
        }
        // left edge
        for y in 1..3 {
            assert_eq!(out.get(0, y), src.get(0, 1));
        }
        // centre
        assert_eq!(out.get(2, 2), src.get(1, 1));
    }

    #[test]
    fn scale_multiplies_border() {
        let slice = NineSlice::new(Sides::all(1)).with_scale(2);
        assert_eq!(slice.min_size(), Size::new(4, 4));
        let out = slice.render(&source(), Size::new(8, 6)).unwrap();
        let src = source();
        for (x, y) in [(0, 0), (1, 1), (0, 1)] {
            assert_eq!(out.get(x, y), src.get(0, 0));
        }
        assert_eq!(out.get(7, 5), src.get(2, 2));
        assert_eq!(out.get(6, 4), src.get(2, 2));
    }

    #[test]
    fn target_smaller_than_border_fails() {
        let err = NineSlice::new(Sides::new(1, 2, 1, 1))
            .render(&source(), Size::new(2, 5))
            .unwrap_err();
        assert!(matches!(err, ShapeError::NineSliceTooSmall { .. }));
    }

    #[test]
    fn border_larger_than_source_fails() {
        let err = NineSlice::new(Sides::all(2))
            .render(&source(), Size::new(10, 10))
            .unwrap_err();
        assert!(matches!(err, ShapeError::BorderExceedsSource { .. }));
    }

    #[test]
    fn exact_border_size_has_no_middle() {
        let out = NineSlice::new(Sides::all(1))
            .render(&source(), Size::new(2, 2))
            .unwrap();
        let src = source();
        assert_eq!(out.get(1, 1), src.get(2, 2));
    }
}
