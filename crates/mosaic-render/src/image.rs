#![forbid(unsafe_code)]

//! Dense RGBA pixel arrays.
//!
//! Storage is y-major: the pixel at `(x, y)` starts at byte
//! `(y * width + x) * 4`. Every image carries exactly four channels; three
//! channel sources get an opaque alpha appended on ingestion.

use mosaic_core::geometry::{Rect, Size};

use crate::color::Rgba;
use crate::error::ShapeError;
use crate::transform::{Axis, Filter, Rotation};

/// Bytes per pixel.
pub const CHANNELS: usize = 4;

/// An owned RGBA image.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct PixelImage {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl std::fmt::Debug for PixelImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixelImage")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.data.len())
            .finish()
    }
}

impl PixelImage {
    /// Fully transparent image.
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, Rgba::TRANSPARENT)
    }

    /// Image filled with one colour.
    pub fn filled(width: u32, height: u32, color: Rgba) -> Self {
        let px = color.to_bytes();
        let count = width as usize * height as usize;
        let mut data = Vec::with_capacity(count * CHANNELS);
        for _ in 0..count {
            data.extend_from_slice(&px);
        }
        Self {
            width,
            height,
            data,
        }
    }

    /// Take ownership of an RGBA buffer.
    pub fn from_rgba(width: u32, height: u32, data: Vec<u8>) -> Result<Self, ShapeError> {
        let expected = width as usize * height as usize * CHANNELS;
        if data.len() != expected {
            return Err(ShapeError::BufferLength {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Ingest an RGB buffer, appending an opaque alpha channel.
    pub fn from_rgb(width: u32, height: u32, data: &[u8]) -> Result<Self, ShapeError> {
        Self::from_channels(width, height, 3, data)
    }

    /// Ingest a buffer with 3 or 4 interleaved channels.
    pub fn from_channels(
        width: u32,
        height: u32,
        channels: usize,
        data: &[u8],
    ) -> Result<Self, ShapeError> {
        let count = width as usize * height as usize;
        match channels {
            4 => Self::from_rgba(width, height, data.to_vec()),
            3 => {
                if data.len() != count * 3 {
                    return Err(ShapeError::BufferLength {
                        expected: count * 3,
                        actual: data.len(),
                    });
                }
                let mut out = Vec::with_capacity(count * CHANNELS);
                for px in data.chunks_exact(3) {
                    out.extend_from_slice(&[px[0], px[1], px[2], 255]);
                }
                Self::from_rgba(width, height, out)
            }
            n => Err(ShapeError::ChannelCount(n)),
        }
    }

    #[inline]
    pub const fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub const fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Rectangle covering the whole image, at the origin.
    #[inline]
    pub const fn bounds(&self) -> Rect {
        Rect::from_size(self.width, self.height)
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Raw RGBA bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Consume the image, returning its RGBA bytes.
    #[inline]
    pub fn into_rgba_bytes(self) -> Vec<u8> {
        self.data
    }

    #[inline]
    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * CHANNELS
    }

    /// Pixel at `(x, y)`, or `None` when out of bounds.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = self.offset(x, y);
        Some(Rgba::rgba(
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ))
    }

    /// Overwrite the pixel at `(x, y)`. Out-of-bounds writes are ignored.
    #[inline]
    pub fn set(&mut self, x: u32, y: u32, color: Rgba) {
        if x >= self.width || y >= self.height {
            return;
        }
        let i = self.offset(x, y);
        self.data[i..i + CHANNELS].copy_from_slice(&color.to_bytes());
    }

    /// Fill every pixel with `color`.
    pub fn fill(&mut self, color: Rgba) {
        let px = color.to_bytes();
        for chunk in self.data.chunks_exact_mut(CHANNELS) {
            chunk.copy_from_slice(&px);
        }
    }

    /// Fill a rectangle, clipped to the image.
    pub fn fill_rect(&mut self, rect: Rect, color: Rgba) {
        let Some(area) = rect.intersection_opt(&self.bounds()) else {
            return;
        };
        let px = color.to_bytes();
        for y in area.y..area.bottom() {
            let start = self.offset(area.x, y);
            let end = start + area.width as usize * CHANNELS;
            for chunk in self.data[start..end].chunks_exact_mut(CHANNELS) {
                chunk.copy_from_slice(&px);
            }
        }
    }

    /// Copy of the region `rect`, clipped to the image.
    pub fn crop(&self, rect: Rect) -> PixelImage {
        let area = rect.intersection(&self.bounds());
        let mut out = PixelImage::new(area.width, area.height);
        let row = area.width as usize * CHANNELS;
        for dy in 0..area.height {
            let src = self.offset(area.x, area.y + dy);
            let dst = out.offset(0, dy);
            out.data[dst..dst + row].copy_from_slice(&self.data[src..src + row]);
        }
        out
    }

    /// Visible part of `src` placed at `(x, y)` and clipped to this image.
    fn clip_region(&self, src: &PixelImage, x: u32, y: u32) -> Option<Rect> {
        Rect::new(x, y, src.width, src.height).intersection_opt(&self.bounds())
    }

    /// Copy `src` into this image at `(x, y)`, replacing pixels (alpha included).
    ///
    /// Returns the area that was written.
    pub fn paste(&mut self, src: &PixelImage, x: u32, y: u32) -> Rect {
        let Some(area) = self.clip_region(src, x, y) else {
            return Rect::default();
        };
        let row = area.width as usize * CHANNELS;
        for dy in 0..area.height {
            let s = src.offset(area.x - x, area.y - y + dy);
            let d = self.offset(area.x, area.y + dy);
            self.data[d..d + row].copy_from_slice(&src.data[s..s + row]);
        }
        area
    }

    /// Composite `src` over this image at `(x, y)`.
    ///
    /// Returns the area that was touched.
    pub fn blend(&mut self, src: &PixelImage, x: u32, y: u32) -> Rect {
        let Some(area) = self.clip_region(src, x, y) else {
            return Rect::default();
        };
        for dy in 0..area.height {
            for dx in 0..area.width {
                let s = src.offset(area.x - x + dx, area.y - y + dy);
                let top = Rgba::rgba(
                    src.data[s],
                    src.data[s + 1],
                    src.data[s + 2],
                    src.data[s + 3],
                );
                if top.a == 0 {
                    continue;
                }
                let d = self.offset(area.x + dx, area.y + dy);
                let bottom = Rgba::rgba(
                    self.data[d],
                    self.data[d + 1],
                    self.data[d + 2],
                    self.data[d + 3],
                );
                self.data[d..d + CHANNELS].copy_from_slice(&top.over(bottom).to_bytes());
            }
        }
        area
    }

    /// Counter-clockwise rotation. A quarter turn swaps width and height.
    pub fn rotated(&self, rotation: Rotation) -> PixelImage {
        let (w, h) = (self.width, self.height);
        match rotation.turns() {
            0 => self.clone(),
            2 => {
                let mut data = Vec::with_capacity(self.data.len());
                for px in self.data.chunks_exact(CHANNELS).rev() {
                    data.extend_from_slice(px);
                }
                PixelImage {
                    width: w,
                    height: h,
                    data,
                }
            }
            turns => {
                let mut out = PixelImage::new(h, w);
                for ny in 0..w {
                    for nx in 0..h {
                        // 90°: (x, y) -> (y, w-1-x); 270°: (x, y) -> (h-1-y, x)
                        let (sx, sy) = if turns == 1 {
                            (w - 1 - ny, nx)
                        } else {
                            (ny, h - 1 - nx)
                        };
                        let s = self.offset(sx, sy);
                        let d = out.offset(nx, ny);
                        out.data[d..d + CHANNELS].copy_from_slice(&self.data[s..s + CHANNELS]);
                    }
                }
                out
            }
        }
    }

    /// Mirror in place.
    pub fn flip(&mut self, axis: Axis) {
        let (w, h) = (self.width as usize, self.height as usize);
        let row = w * CHANNELS;
        match axis {
            Axis::Horizontal => {
                for line in self.data.chunks_exact_mut(row.max(1)) {
                    for x in 0..w / 2 {
                        let (a, b) = (x * CHANNELS, (w - 1 - x) * CHANNELS);
                        for c in 0..CHANNELS {
                            line.swap(a + c, b + c);
                        }
                    }
                }
            }
            Axis::Vertical => {
                for y in 0..h / 2 {
                    let (top, rest) = self.data.split_at_mut((h - 1 - y) * row);
                    top[y * row..(y + 1) * row].swap_with_slice(&mut rest[..row]);
                }
            }
        }
    }

    /// Apply a colour filter to every pixel in place.
    pub fn apply_filter(&mut self, filter: &Filter) {
        for chunk in self.data.chunks_exact_mut(CHANNELS) {
            let px = Rgba::rgba(chunk[0], chunk[1], chunk[2], chunk[3]);
            chunk.copy_from_slice(&filter.apply(px).to_bytes());
        }
    }

    /// Integer nearest-neighbour upscale: each pixel becomes a
    /// `factor` x `factor` block.
    pub fn scale(&self, factor: u32) -> PixelImage {
        if factor == 1 {
            return self.clone();
        }
        let mut out = PixelImage::new(self.width * factor, self.height * factor);
        for y in 0..out.height {
            for x in 0..out.width {
                let s = self.offset(x / factor, y / factor);
                let d = out.offset(x, y);
                out.data[d..d + CHANNELS].copy_from_slice(&self.data[s..s + CHANNELS]);
            }
        }
        out
    }

    /// Nearest-neighbour resample to an arbitrary size.
    ///
    /// Destination pixel `(x, y)` samples source `(x * w / W, y * h / H)`.
    /// An empty source yields a transparent image of the requested size.
    pub fn stretched(&self, size: Size) -> PixelImage {
        if size == self.size() {
            return self.clone();
        }
        let mut out = PixelImage::new(size.width, size.height);
        if self.is_empty() {
            return out;
        }
        let (sw, sh) = (self.width as u64, self.height as u64);
        let (dw, dh) = (size.width as u64, size.height as u64);
        for y in 0..size.height {
            let sy = (y as u64 * sh / dh) as u32;
            for x in 0..size.width {
                let sx = (x as u64 * sw / dw) as u32;
                let s = self.offset(sx, sy);
                let d = out.offset(x, y);
                out.data[d..d + CHANNELS].copy_from_slice(&self.data[s..s + CHANNELS]);
            }
        }
        out
    }
}
