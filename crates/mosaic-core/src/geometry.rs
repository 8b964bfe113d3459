#![forbid(unsafe_code)]

//! Geometric primitives in pixel space.
//!
//! All coordinates are `(x, y)` with the origin at the top-left corner and
//! `y` growing downwards. Extents are `(width, height)`.

/// A point in pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: u32,
    pub y: u32,
}

impl Point {
    /// Create a new point.
    #[inline]
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

impl From<(u32, u32)> for Point {
    fn from((x, y): (u32, u32)) -> Self {
        Self::new(x, y)
    }
}

/// A `(width, height)` extent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    /// Create a new size.
    #[inline]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Number of pixels covered.
    #[inline]
    pub const fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Check if either dimension is zero.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl From<(u32, u32)> for Size {
    fn from((width, height): (u32, u32)) -> Self {
        Self::new(width, height)
    }
}

/// An axis-aligned rectangle used for bounds, hit testing and dirty tracking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    /// Left edge (inclusive).
    pub x: u32,
    /// Top edge (inclusive).
    pub y: u32,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a rectangle at the origin with the given size.
    #[inline]
    pub const fn from_size(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Create a rectangle from a position and an extent.
    #[inline]
    pub const fn from_parts(position: Point, size: Size) -> Self {
        Self::new(position.x, position.y, size.width, size.height)
    }

    /// Top-left corner.
    #[inline]
    pub const fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Extent of the rectangle.
    #[inline]
    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Right edge (exclusive).
    #[inline]
    pub const fn right(&self) -> u32 {
        self.x.saturating_add(self.width)
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub const fn bottom(&self) -> u32 {
        self.y.saturating_add(self.height)
    }

    /// Centre point, rounded towards the origin.
    #[inline]
    pub const fn center(&self) -> Point {
        Point::new(self.x + self.width / 2, self.y + self.height / 2)
    }

    /// Area in pixels.
    #[inline]
    pub const fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Check if the rectangle has zero area.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Check if a point lies inside the rectangle.
    #[inline]
    pub const fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Check if `other` lies entirely inside this rectangle.
    ///
    /// Empty rectangles are contained by everything.
    #[inline]
    pub const fn contains_rect(&self, other: &Rect) -> bool {
        other.is_empty()
            || (other.x >= self.x
                && other.y >= self.y
                && other.right() <= self.right()
                && other.bottom() <= self.bottom())
    }

    /// Compute the intersection, or an empty rectangle when there is no overlap.
    #[inline]
    pub fn intersection(&self, other: &Rect) -> Rect {
        self.intersection_opt(other).unwrap_or_default()
    }

    /// Compute the intersection, returning `None` if the rectangles don't overlap.
    #[inline]
    pub fn intersection_opt(&self, other: &Rect) -> Option<Rect> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if x < right && y < bottom {
            Some(Rect::new(x, y, right - x, bottom - y))
        } else {
            None
        }
    }

    /// Smallest rectangle containing both.
    ///
    /// An empty operand does not contribute.
    pub fn union(&self, other: &Rect) -> Rect {
        if self.is_empty() {
            return *other;
        }
        if other.is_empty() {
            return *self;
        }
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        Rect::new(x, y, right - x, bottom - y)
    }

    /// Shrink by the given margin, clamping at zero extent.
    pub fn inner(&self, margin: Sides) -> Rect {
        Rect {
            x: self.x.saturating_add(margin.left),
            y: self.y.saturating_add(margin.top),
            width: self.width.saturating_sub(margin.horizontal_sum()),
            height: self.height.saturating_sub(margin.vertical_sum()),
        }
    }

    /// Move the rectangle so its origin is at `position`.
    #[inline]
    pub const fn with_position(self, position: Point) -> Rect {
        Rect::new(position.x, position.y, self.width, self.height)
    }
}

/// Per-side widths, ordered like CSS: top, right, bottom, left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Sides {
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
    pub left: u32,
}

impl Sides {
    /// Create new sides with specific values.
    pub const fn new(top: u32, right: u32, bottom: u32, left: u32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Same width on every side.
    pub const fn all(val: u32) -> Self {
        Self::new(val, val, val, val)
    }

    /// Multiply every side by `factor`.
    pub const fn scaled(self, factor: u32) -> Self {
        Self::new(
            self.top.saturating_mul(factor),
            self.right.saturating_mul(factor),
            self.bottom.saturating_mul(factor),
            self.left.saturating_mul(factor),
        )
    }

    /// Sum of left and right.
    #[inline]
    pub const fn horizontal_sum(&self) -> u32 {
        self.left.saturating_add(self.right)
    }

    /// Sum of top and bottom.
    #[inline]
    pub const fn vertical_sum(&self) -> u32 {
        self.top.saturating_add(self.bottom)
    }
}

impl From<u32> for Sides {
    fn from(val: u32) -> Self {
        Self::all(val)
    }
}

impl From<(u32, u32, u32, u32)> for Sides {
    fn from((top, right, bottom, left): (u32, u32, u32, u32)) -> Self {
        Self::new(top, right, bottom, left)
    }
}

#[cfg(test)]
mod tests {
    use super::{Point, Rect, Sides, Size};

    #[test]
    fn rect_contains_edges() {
        let rect = Rect::new(10, 10, 20, 20);
        assert!(rect.contains(10, 10));
        assert!(rect.contains(29, 29));
        assert!(!rect.contains(30, 10));
        assert!(!rect.contains(10, 30));
        assert!(!rect.contains(9, 15));
    }

    #[test]
    fn rect_contains_empty_rect() {
        let r = Rect::new(5, 5, 0, 0);
        assert!(!r.contains(5, 5));
    }

    #[test]
    fn rect_intersection_overlaps() {
        let a = Rect::new(0, 0, 4, 4);
        let b = Rect::new(2, 2, 4, 4);
        assert_eq!(a.intersection(&b), Rect::new(2, 2, 2, 2));
    }

    #[test]
    fn rect_intersection_adjacent_is_empty() {
        let a = Rect::new(0, 0, 5, 5);
        let b = Rect::new(5, 0, 5, 5);
        assert!(a.intersection(&b).is_empty());
        assert_eq!(a.intersection_opt(&b), None);
    }

    #[test]
    fn rect_union_disjoint() {
        let a = Rect::new(0, 0, 2, 2);
        let b = Rect::new(10, 10, 3, 3);
        assert_eq!(a.union(&b), Rect::new(0, 0, 13, 13));
    }

    #[test]
    fn rect_union_ignores_empty() {
        let a = Rect::new(4, 4, 2, 2);
        assert_eq!(a.union(&Rect::default()), a);
        assert_eq!(Rect::default().union(&a), a);
    }

    #[test]
    fn rect_contains_rect() {
        let outer = Rect::new(0, 0, 10, 10);
        assert!(outer.contains_rect(&Rect::new(2, 2, 3, 3)));
        assert!(outer.contains_rect(&outer));
        assert!(!outer.contains_rect(&Rect::new(8, 8, 3, 3)));
        assert!(outer.contains_rect(&Rect::new(50, 50, 0, 0)));
    }

    #[test]
    fn rect_inner_reduces() {
        let rect = Rect::new(0, 0, 10, 10);
        assert_eq!(rect.inner(Sides::new(1, 2, 3, 4)), Rect::new(4, 1, 4, 6));
        assert_eq!(rect.inner(Sides::all(20)).size(), Size::new(0, 0));
    }

    #[test]
    fn rect_parts_round_trip() {
        let r = Rect::from_parts(Point::new(3, 4), Size::new(5, 6));
        assert_eq!(r.position(), Point::new(3, 4));
        assert_eq!(r.size(), Size::new(5, 6));
        assert_eq!(r.center(), Point::new(5, 7));
        assert_eq!(r.with_position(Point::new(0, 0)), Rect::from_size(5, 6));
    }

    #[test]
    fn sides_sums_and_scale() {
        let s = Sides::from((1, 2, 3, 4));
        assert_eq!(s.horizontal_sum(), 6);
        assert_eq!(s.vertical_sum(), 4);
        assert_eq!(s.scaled(2), Sides::new(2, 4, 6, 8));
        assert_eq!(Sides::from(3), Sides::all(3));
    }
}
