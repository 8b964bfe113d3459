#![forbid(unsafe_code)]

//! Dirty-rectangle accumulation.

use mosaic_core::geometry::Rect;
use smallvec::SmallVec;

/// Rectangles changed since the last present.
///
/// Empty rectangles are dropped, as are rectangles already covered by one
/// that was pushed earlier. Pushing a rectangle that covers earlier ones
/// replaces them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirtyRegion {
    rects: SmallVec<[Rect; 8]>,
}

impl DirtyRegion {
    pub fn new() -> Self {
        Self::default()
    }

    /// Region covering exactly `rect`.
    pub fn full(rect: Rect) -> Self {
        let mut region = Self::new();
        region.push(rect);
        region
    }

    /// Add a rectangle.
    pub fn push(&mut self, rect: Rect) {
        if rect.is_empty() || self.rects.iter().any(|r| r.contains_rect(&rect)) {
            return;
        }
        self.rects.retain(|r| !rect.contains_rect(r));
        self.rects.push(rect);
    }

    /// Merge another region into this one.
    pub fn merge(&mut self, other: &DirtyRegion) {
        for r in other.iter() {
            self.push(*r);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rect> {
        self.rects.iter()
    }

    pub fn as_slice(&self) -> &[Rect] {
        &self.rects
    }

    pub fn len(&self) -> usize {
        self.rects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    pub fn clear(&mut self) {
        self.rects.clear();
    }

    /// Smallest rectangle covering every dirty rectangle.
    pub fn bounds(&self) -> Rect {
        self.rects.iter().fold(Rect::default(), |acc, r| acc.union(r))
    }

    /// Restrict every rectangle to `clip`, dropping those outside it.
    pub fn clip_to(&mut self, clip: Rect) {
        let rects = std::mem::take(&mut self.rects);
        for r in rects {
            self.push(r.intersection(&clip));
        }
    }
}

impl Extend<Rect> for DirtyRegion {
    fn extend<T: IntoIterator<Item = Rect>>(&mut self, iter: T) {
        for r in iter {
            self.push(r);
        }
    }
}

impl FromIterator<Rect> for DirtyRegion {
    fn from_iter<T: IntoIterator<Item = Rect>>(iter: T) -> Self {
        let mut region = Self::new();
        Extend::extend(&mut region, iter);
        region
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drops_empty_and_contained() {
        let mut d = DirtyRegion::new();
        d.push(Rect::new(0, 0, 0, 5));
        d.push(Rect::new(0, 0, 10, 10));
        d.push(Rect::new(2, 2, 3, 3));
        assert_eq!(d.as_slice(), &[Rect::new(0, 0, 10, 10)]);
    }

    #[test]
    fn covering_rect_replaces_earlier() {
        let mut d = DirtyRegion::new();
        d.push(Rect::new(1, 1, 2, 2));
        d.push(Rect::new(5, 5, 1, 1));
        d.push(Rect::new(0, 0, 4, 4));
        assert_eq!(d.as_slice(), &[Rect::new(5, 5, 1, 1), Rect::new(0, 0, 4, 4)]);
        assert_eq!(d.bounds(), Rect::new(0, 0, 6, 6));
    }

    #[test]
    fn clip_drops_outside() {
        let mut d: DirtyRegion = [Rect::new(0, 0, 4, 4), Rect::new(20, 20, 2, 2)]
            .into_iter()
            .collect();
        d.clip_to(Rect::new(2, 2, 10, 10));
        assert_eq!(d.as_slice(), &[Rect::new(2, 2, 2, 2)]);
    }
}
