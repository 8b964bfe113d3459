#![forbid(unsafe_code)]

//! Frame buffer: the pixel surface the engine composites into each frame.

use mosaic_core::geometry::{Point, Rect, Size};

use crate::color::Rgba;
use crate::image::PixelImage;

/// An RGBA surface plus the colour it is cleared to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    image: PixelImage,
    background: Rgba,
}

impl FrameBuffer {
    /// New buffer cleared to `background`.
    pub fn new(width: u32, height: u32, background: Rgba) -> Self {
        Self {
            image: PixelImage::filled(width, height, background),
            background,
        }
    }

    #[inline]
    pub const fn size(&self) -> Size {
        self.image.size()
    }

    #[inline]
    pub const fn bounds(&self) -> Rect {
        self.image.bounds()
    }

    #[inline]
    pub const fn background(&self) -> Rgba {
        self.background
    }

    /// Change the clear colour. Takes effect on the next clear.
    pub fn set_background(&mut self, background: Rgba) {
        self.background = background;
    }

    /// The composited pixels.
    #[inline]
    pub fn image(&self) -> &PixelImage {
        &self.image
    }

    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        self.image.get(x, y)
    }

    /// Clear the whole buffer to the background colour.
    pub fn clear(&mut self) {
        self.image.fill(self.background);
    }

    /// Clear a region to the background colour.
    pub fn clear_rect(&mut self, rect: Rect) {
        self.image.fill_rect(rect, self.background);
    }

    /// Alpha-blit `src` with its top-left at `at`.
    ///
    /// Returns the on-screen area touched, which is empty when `src` lies
    /// wholly outside the buffer.
    pub fn blit(&mut self, src: &PixelImage, at: Point) -> Rect {
        self.image.blend(src, at.x, at.y)
    }

    /// Reallocate to a new size and clear. A no-op when the size is unchanged.
    pub fn resize(&mut self, width: u32, height: u32) {
        if self.size() == Size::new(width, height) {
            return;
        }
        self.image = PixelImage::filled(width, height, self.background);
    }

    /// Copy of the pixels inside `rect`, clipped to the buffer.
    pub fn region(&self, rect: Rect) -> PixelImage {
        self.image.crop(rect)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blit_clips_and_reports_area() {
        let mut fb = FrameBuffer::new(4, 4, Rgba::BLACK);
        let sprite = PixelImage::filled(3, 3, Rgba::WHITE);
        let area = fb.blit(&sprite, Point::new(2, 3));
        assert_eq!(area, Rect::new(2, 3, 2, 1));
        assert_eq!(fb.pixel(3, 3), Some(Rgba::WHITE));
        assert_eq!(fb.pixel(1, 3), Some(Rgba::BLACK));
        assert!(fb.blit(&sprite, Point::new(9, 9)).is_empty());
    }

    #[test]
    fn clear_restores_background() {
        let mut fb = FrameBuffer::new(2, 2, Rgba::rgb(1, 2, 3));
        fb.blit(&PixelImage::filled(2, 2, Rgba::WHITE), Point::new(0, 0));
        fb.clear_rect(Rect::new(0, 0, 1, 1));
        assert_eq!(fb.pixel(0, 0), Some(Rgba::rgb(1, 2, 3)));
        assert_eq!(fb.pixel(1, 1), Some(Rgba::WHITE));
        fb.clear();
        assert_eq!(fb.pixel(1, 1), Some(Rgba::rgb(1, 2, 3)));
    }

    #[test]
    fn resize_reallocates() {
        let mut fb = FrameBuffer::new(2, 2, Rgba::BLACK);
        fb.resize(5, 1);
        assert_eq!(fb.size(), Size::new(5, 1));
        assert_eq!(fb.pixel(4, 0), Some(Rgba::BLACK));
    }
}
