#![forbid(unsafe_code)]

//! Built-in pictures: the fallback puzzle image, button panels and icons.

use mosaic_core::geometry::{Rect, Size};
use mosaic_render::{PixelImage, Rgba, ops};

/// Button glyphs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Icon {
    Flip,
    Rotate,
    Swap,
    Filter,
    Solve,
    New,
    Back,
}

impl Icon {
    fn rows(self) -> &'static [&'static str] {
        match self {
            Self::Flip => &[".#.#.", "##.##", "#...#", "##.##", ".#.#."],
            Self::Rotate => &[".###.", "#...#", "#...#", "#..#.", "#.###"],
            Self::Swap => &["...#.", "#####", ".....", "#####", ".#..."],
            Self::Filter => &["#####", "#.###", "#..##", "#...#", "#####"],
            Self::Solve => &["....#", "...#.", "#.#..", ".#...", "....."],
            Self::New => &["..#..", "#.#.#", ".###.", "#.#.#", "..#.."],
            Self::Back => &["..#..", ".#...", "#####", ".#...", "..#.."],
        }
    }

    /// Rasterise the glyph in `color` on a transparent background.
    pub fn render(self, color: Rgba) -> PixelImage {
        let rows = self.rows();
        let width = rows.iter().map(|r| r.len()).max().unwrap_or(0) as u32;
        let mut out = PixelImage::new(width, rows.len() as u32);
        for (y, row) in rows.iter().enumerate() {
            for (x, cell) in row.bytes().enumerate() {
                if cell == b'#' {
                    out.set(x as u32, y as u32, color);
                }
            }
        }
        out
    }
}

/// 6×6 bevelled panel meant to be nine-sliced with a 2-pixel border.
pub fn panel(fill: Rgba) -> PixelImage {
    let size = Size::new(6, 6);
    let highlight = Rgba::rgb(
        fill.r.saturating_add(60),
        fill.g.saturating_add(60),
        fill.b.saturating_add(60),
    );
    let mut out = PixelImage::filled(size.width, size.height, fill);
    out.fill_rect(Rect::new(1, 1, 4, 1), highlight);
    out.fill_rect(Rect::new(1, 1, 1, 4), highlight);
    out.blend(&ops::outline_rect(size, Rgba::rgb(16, 16, 24), 1), 0, 0);
    out
}

/// Fallback puzzle picture.
///
/// A two-axis gradient with a checker overlay and a diagonal band, so every
/// tile looks different and its orientation is visible.
pub fn picture(width: u32, height: u32) -> PixelImage {
    let mut out = PixelImage::new(width, height);
    let w = width.max(1);
    let h = height.max(1);
    for y in 0..height {
        for x in 0..width {
            let r = 40 + x * 200 / w;
            let g = 40 + y * 200 / h;
            let checker = ((x / 8 + y / 8) % 2) * 70;
            let band = (x + 2 * y) % 23 < 3;
            let px = if band {
                Rgba::rgb(245, 245, 235)
            } else {
                Rgba::rgb(r as u8, g as u8, (90 + checker) as u8)
            };
            out.set(x, y, px);
        }
    }
    out
}
