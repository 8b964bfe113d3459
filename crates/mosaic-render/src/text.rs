#![forbid(unsafe_code)]

//! Bitmap text.
//!
//! A fixed table of 5-pixel-tall glyphs, built once on first use and shared
//! by reference. Glyph widths vary; letters are separated by one blank
//! column and lines by one blank row. Lowercase letters render with the
//! uppercase glyph.

use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

use mosaic_core::geometry::{Point, Rect, Size};

use crate::color::Rgba;
use crate::image::PixelImage;

/// Height of every glyph, in unscaled pixels.
pub const GLYPH_HEIGHT: u32 = 5;
/// Blank columns between letters.
pub const LETTER_SPACING: u32 = 1;
/// Blank rows between lines.
pub const LINE_SPACING: u32 = 1;

type GlyphRows = [&'static str; GLYPH_HEIGHT as usize];

#[rustfmt::skip]
const GLYPHS: &[(char, GlyphRows)] = &[
    ('A', [".#.", "#.#", "###", "#.#", "#.#"]),
    ('B', ["##.", "#.#", "##.", "#.#", "##."]),
    ('C', [".##", "#..", "#..", "#..", ".##"]),
    ('D', ["##.", "#.#", "#.#", "#.#", "##."]),
    ('E', ["###", "#..", "##.", "#..", "###"]),
    ('F', ["###", "#..", "##.", "#..", "#.."]),
    ('G', [".##", "#..", "#.#", "#.#", ".##"]),
    ('H', ["#.#", "#.#", "###", "#.#", "#.#"]),
    ('I', ["###", ".#.", ".#.", ".#.", "###"]),
    ('J', ["..#", "..#", "..#", "#.#", ".#."]),
    ('K', ["#.#", "#.#", "##.", "#.#", "#.#"]),
    ('L', ["#..", "#..", "#..", "#..", "###"]),
    ('M', ["#...#", "##.##", "#.#.#", "#...#", "#...#"]),
    ('N', ["#..#", "##.#", "#.##", "#..#", "#..#"]),
    ('O', [".#.", "#.#", "#.#", "#.#", ".#."]),
    ('P', ["##.", "#.#", "##.", "#..", "#.."]),
    ('Q', [".#.", "#.#", "#.#", "##.", ".##"]),
    ('R', ["##.", "#.#", "##.", "#.#", "#.#"]),
    ('S', [".##", "#..", ".#.", "..#", "##."]),
    ('T', ["###", ".#.", ".#.", ".#.", ".#."]),
    ('U', ["#.#", "#.#", "#.#", "#.#", "###"]),
    ('V', ["#.#", "#.#", "#.#", "#.#", ".#."]),
    ('W', ["#...#", "#...#", "#.#.#", "##.##", "#...#"]),
    ('X', ["#.#", "#.#", ".#.", "#.#", "#.#"]),
    ('Y', ["#.#", "#.#", ".#.", ".#.", ".#."]),
    ('Z', ["###", "..#", ".#.", "#..", "###"]),
    ('0', ["###", "#.#", "#.#", "#.#", "###"]),
    ('1', [".#.", "##.", ".#.", ".#.", "###"]),
    ('2', ["##.", "..#", ".#.", "#..", "###"]),
    ('3', ["##.", "..#", ".#.", "..#", "##."]),
    ('4', ["#.#", "#.#", "###", "..#", "..#"]),
    ('5', ["###", "#..", "##.", "..#", "##."]),
    ('6', [".##", "#..", "###", "#.#", "###"]),
    ('7', ["###", "..#", ".#.", ".#.", ".#."]),
    ('8', ["###", "#.#", "###", "#.#", "###"]),
    ('9', ["###", "#.#", "###", "..#", "##."]),
    (' ', ["..", "..", "..", "..", ".."]),
    ('.', [".", ".", ".", ".", "#"]),
    (',', ["..", "..", "..", ".#", "#."]),
    (':', [".", "#", ".", "#", "."]),
    ('!', ["#", "#", "#", ".", "#"]),
    ('?', ["##.", "..#", ".#.", "...", ".#."]),
    ('-', ["...", "...", "###", "...", "..."]),
    ('/', ["..#", "..#", ".#.", "#..", "#.."]),
    ('\'', ["#", "#", ".", ".", "."]),
    ('(', [".#", "#.", "#.", "#.", ".#"]),
    (')', ["#.", ".#", ".#", ".#", "#."]),
];

/// Text that cannot be rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextError {
    /// The font has no glyph for this character.
    MissingGlyph(char),
    /// Rendered text would extend past the target image.
    DoesNotFit { text: Rect, target: Size },
}

impl fmt::Display for TextError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingGlyph(ch) => write!(f, "font has no glyph for {ch:?}"),
            Self::DoesNotFit { text, target } => write!(
                f,
                "text {}x{} at ({}, {}) does not fit in {}x{}",
                text.width, text.height, text.x, text.y, target.width, target.height
            ),
        }
    }
}

impl std::error::Error for TextError {}

/// One glyph: a row bitmask per line, bit 0 being the leftmost column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    width: u32,
    rows: [u8; GLYPH_HEIGHT as usize],
}

impl Glyph {
    fn from_rows(rows: &GlyphRows) -> Self {
        let width = rows.iter().map(|r| r.len()).max().unwrap_or(0) as u32;
        let mut bits = [0u8; GLYPH_HEIGHT as usize];
        for (y, row) in rows.iter().enumerate() {
            for (x, cell) in row.bytes().enumerate() {
                if cell == b'#' {
                    bits[y] |= 1 << x;
                }
            }
        }
        Self { width, rows: bits }
    }

    #[inline]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Whether the glyph covers column `x` of row `y`.
    pub fn is_set(&self, x: u32, y: u32) -> bool {
        x < self.width && y < GLYPH_HEIGHT && self.rows[y as usize] & (1 << x) != 0
    }
}

/// Glyph lookup table.
#[derive(Debug, Clone)]
pub struct Font {
    glyphs: HashMap<char, Glyph>,
}

impl Font {
    /// The built-in font.
    pub fn builtin() -> &'static Font {
        static FONT: OnceLock<Font> = OnceLock::new();
        FONT.get_or_init(|| Font {
            glyphs: GLYPHS
                .iter()
                .map(|(ch, rows)| (*ch, Glyph::from_rows(rows)))
                .collect(),
        })
    }

    /// Glyph for `ch`, folding lowercase to uppercase.
    pub fn glyph(&self, ch: char) -> Option<&Glyph> {
        self.glyphs.get(&ch.to_ascii_uppercase())
    }

    /// Whether every character of `text` (newlines aside) has a glyph.
    pub fn supports(&self, text: &str) -> bool {
        text.chars().all(|ch| ch == '\n' || self.glyph(ch).is_some())
    }

    fn line_width(&self, line: &str) -> Result<u32, TextError> {
        let mut width = 0u32;
        let mut count = 0u32;
        for ch in line.chars() {
            let glyph = self.glyph(ch).ok_or(TextError::MissingGlyph(ch))?;
            width += glyph.width();
            count += 1;
        }
        Ok(width + count.saturating_sub(1) * LETTER_SPACING)
    }

    /// Size of `text` rendered at `scale`. Lines are split on `'\n'`.
    pub fn measure(&self, text: &str, scale: u32) -> Result<Size, TextError> {
        let scale = scale.max(1);
        let mut width = 0;
        let mut lines = 0u32;
        for line in text.split('\n') {
            width = width.max(self.line_width(line)?);
            lines += 1;
        }
        let height = lines * GLYPH_HEIGHT + lines.saturating_sub(1) * LINE_SPACING;
        Ok(Size::new(width * scale, height * scale))
    }

    /// Rasterise `text` in `color` on a transparent background.
    ///
    /// Each font pixel becomes a `scale` x `scale` block.
    pub fn render(&self, text: &str, color: Rgba, scale: u32) -> Result<PixelImage, TextError> {
        let size = self.measure(text, 1)?;
        let mut out = PixelImage::new(size.width, size.height);
        for (row, line) in text.split('\n').enumerate() {
            let top = row as u32 * (GLYPH_HEIGHT + LINE_SPACING);
            let mut left = 0;
            for ch in line.chars() {
                let glyph = self.glyph(ch).ok_or(TextError::MissingGlyph(ch))?;
                for y in 0..GLYPH_HEIGHT {
                    for x in 0..glyph.width() {
                        if glyph.is_set(x, y) {
                            out.set(left + x, top + y, color);
                        }
                    }
                }
                left += glyph.width() + LETTER_SPACING;
            }
        }
        Ok(out.scale(scale.max(1)))
    }

    /// Composite `text` over `target` with its top-left corner at `at`.
    ///
    /// Fails without touching `target` when the text would not fit.
    pub fn draw(
        &self,
        target: &mut PixelImage,
        text: &str,
        at: Point,
        color: Rgba,
        scale: u32,
    ) -> Result<Rect, TextError> {
        let rendered = self.render(text, color, scale)?;
        let area = Rect::from_parts(at, rendered.size());
        if !target.bounds().contains_rect(&area) {
            return Err(TextError::DoesNotFit {
                text: area,
                target: target.size(),
            });
        }
        target.blend(&rendered, at.x, at.y);
        Ok(area)
    }

    /// Greedy word wrap to lines no wider than `max_width` at `scale`.
    ///
    /// A single word wider than the limit gets a line of its own.
    pub fn wrap(&self, text: &str, max_width: u32, scale: u32) -> Result<Vec<String>, TextError> {
        let scale = scale.max(1);
        let mut lines = Vec::new();
        for paragraph in text.split('\n') {
            let mut line = String::new();
            for word in paragraph.split_whitespace() {
                self.line_width(word)?;
                if line.is_empty() {
                    line = word.to_string();
                    continue;
                }
                let candidate = format!("{line} {word}");
                if self.line_width(&candidate)? * scale <= max_width {
                    line = candidate;
                } else {
                    lines.push(std::mem::take(&mut line));
                    line = word.to_string();
                }
            }
            lines.push(line);
        }
        Ok(lines)
    }
}
