// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Integer rectangle algebra.
//!
//! A [`Rectangle`] covers the half-open pixel ranges `x ∈ [left, right)` and
//! `y ∈ [top, bottom)`. Pixel `(x, y)` is the unit cell `[x, x + 1) × [y, y + 1)`,
//! so the right and bottom edges are exclusive.
//!
//! A rectangle is *valid* when `right >= left` and `bottom >= top`. An invalid
//! rectangle stands for "no region" and is what [`Rectangle::intersection`]
//! returns for rectangles that do not overlap. Zero-area rectangles are valid.
//! Every consumer of rectangles in this crate treats an invalid rectangle as a
//! no-op rather than an error.

/// An axis-aligned, half-open integer rectangle in window pixel coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rectangle {
    /// Left edge (inclusive).
    pub left: i32,
    /// Right edge (exclusive).
    pub right: i32,
    /// Top edge (inclusive).
    pub top: i32,
    /// Bottom edge (exclusive).
    pub bottom: i32,
}

impl Rectangle {
    /// The canonical invalid rectangle.
    pub const INVALID: Self = Self {
        left: 0,
        right: -1,
        top: 0,
        bottom: -1,
    };

    /// Creates a rectangle from its edges, in `left, right, top, bottom` order.
    #[inline]
    #[must_use]
    pub const fn new(left: i32, right: i32, top: i32, bottom: i32) -> Self {
        Self {
            left,
            right,
            top,
            bottom,
        }
    }

    /// Creates the rectangle `{0, width, 0, height}`.
    ///
    /// Dimensions beyond `i32::MAX` saturate.
    #[must_use]
    pub fn from_size(width: u32, height: u32) -> Self {
        Self::new(
            0,
            i32::try_from(width).unwrap_or(i32::MAX),
            0,
            i32::try_from(height).unwrap_or(i32::MAX),
        )
    }

    /// Returns whether the rectangle describes a region (possibly of zero area).
    #[inline]
    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.right >= self.left && self.bottom >= self.top
    }

    /// Returns whether the rectangle covers no pixels.
    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.right <= self.left || self.bottom <= self.top
    }

    /// Width in pixels, or 0 for an invalid rectangle.
    #[inline]
    #[must_use]
    pub const fn width(self) -> i32 {
        if self.right > self.left {
            self.right - self.left
        } else {
            0
        }
    }

    /// Height in pixels, or 0 for an invalid rectangle.
    #[inline]
    #[must_use]
    pub const fn height(self) -> i32 {
        if self.bottom > self.top {
            self.bottom - self.top
        } else {
            0
        }
    }

    /// The biggest rectangle contained in both inputs.
    ///
    /// The result is invalid (see [`is_valid`](Self::is_valid)) when the inputs
    /// do not overlap, and stays invalid whenever either input is invalid.
    #[must_use]
    pub fn intersection(self, other: Self) -> Self {
        Self {
            left: self.left.max(other.left),
            right: self.right.min(other.right),
            top: self.top.max(other.top),
            bottom: self.bottom.min(other.bottom),
        }
    }

    /// The smallest rectangle containing both inputs.
    ///
    /// Only meaningful for valid inputs; used to merge damage, never to clip.
    #[must_use]
    pub fn bounding(self, other: Self) -> Self {
        Self {
            left: self.left.min(other.left),
            right: self.right.max(other.right),
            top: self.top.min(other.top),
            bottom: self.bottom.max(other.bottom),
        }
    }

    /// Returns whether the pixel whose top-left corner is `(x, y)` lies inside.
    #[inline]
    #[must_use]
    pub const fn contains(self, x: i32, y: i32) -> bool {
        self.left <= x && self.right > x && self.top <= y && self.bottom > y
    }

    /// Returns whether `other` lies entirely inside `self`.
    ///
    /// An invalid `other` is contained in everything.
    #[must_use]
    pub fn contains_rect(self, other: Self) -> bool {
        !other.is_valid()
            || (self.is_valid()
                && self.left <= other.left
                && self.right >= other.right
                && self.top <= other.top
                && self.bottom >= other.bottom)
    }

    /// Shrinks every edge inwards by `amount` (negative values grow it).
    ///
    /// Edges saturate at the `i32` range.
    #[must_use]
    pub const fn inset(self, amount: i32) -> Self {
        Self::new(
            self.left.saturating_add(amount),
            self.right.saturating_sub(amount),
            self.top.saturating_add(amount),
            self.bottom.saturating_sub(amount),
        )
    }

    /// Offsets the rectangle by `(dx, dy)`, saturating at the `i32` range.
    #[must_use]
    pub const fn translate(self, dx: i32, dy: i32) -> Self {
        Self::new(
            self.left.saturating_add(dx),
            self.right.saturating_add(dx),
            self.top.saturating_add(dy),
            self.bottom.saturating_add(dy),
        )
    }

    /// The smallest integer rectangle covering a floating-point rectangle.
    ///
    /// Edges are rounded outwards; values outside the `i32` range saturate.
    #[must_use]
    pub fn enclosing(rect: kurbo::Rect) -> Self {
        let rect = rect.abs().expand();
        Self::new(
            saturate(rect.x0),
            saturate(rect.x1),
            saturate(rect.y0),
            saturate(rect.y1),
        )
    }
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "float-to-int casts saturate, which is the intended clamping"
)]
fn saturate(v: f64) -> i32 {
    v as i32
}

impl From<Rectangle> for kurbo::Rect {
    fn from(r: Rectangle) -> Self {
        Self::new(
            f64::from(r.left),
            f64::from(r.top),
            f64::from(r.right),
            f64::from(r.bottom),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: Rectangle = Rectangle::new(0, 100, 0, 50);
    const B: Rectangle = Rectangle::new(40, 140, 20, 90);
    const C: Rectangle = Rectangle::new(-10, 60, 30, 200);

    #[test]
    fn validity() {
        assert!(A.is_valid());
        assert!(Rectangle::new(5, 5, 5, 5).is_valid(), "zero area is valid");
        assert!(!Rectangle::new(5, 4, 0, 10).is_valid());
        assert!(!Rectangle::new(0, 10, 5, 4).is_valid());
        assert!(!Rectangle::INVALID.is_valid());
    }

    #[test]
    fn intersection_of_overlapping() {
        assert_eq!(A.intersection(B), Rectangle::new(40, 100, 20, 50));
    }

    #[test]
    fn intersection_of_disjoint_is_invalid() {
        let far = Rectangle::new(200, 300, 200, 300);
        assert!(!A.intersection(far).is_valid());
    }

    #[test]
    fn adjacent_rectangles_touch_in_zero_area() {
        let right = Rectangle::new(100, 150, 0, 50);
        let touch = A.intersection(right);
        assert!(touch.is_valid());
        assert!(touch.is_empty());
    }

    #[test]
    fn intersection_laws() {
        assert_eq!(A.intersection(B), B.intersection(A));
        assert_eq!(
            A.intersection(B).intersection(C),
            A.intersection(B.intersection(C))
        );
        assert_eq!(A.intersection(A), A);
    }

    #[test]
    fn invalid_stays_invalid_under_intersection() {
        let invalid = Rectangle::new(10, 0, 10, 0);
        for other in [A, B, C, Rectangle::new(-1000, 1000, -1000, 1000)] {
            assert!(!invalid.intersection(other).is_valid());
            assert!(!other.intersection(invalid).is_valid());
        }
    }

    #[test]
    fn bounding_laws() {
        assert_eq!(A.bounding(B), Rectangle::new(0, 140, 0, 90));
        assert_eq!(A.bounding(B), B.bounding(A));
        assert_eq!(A.bounding(B).bounding(C), A.bounding(B.bounding(C)));
        assert_eq!(A.bounding(A), A);
    }

    #[test]
    fn contains_excludes_right_and_bottom() {
        assert!(A.contains(0, 0));
        assert!(A.contains(99, 49));
        assert!(!A.contains(100, 0));
        assert!(!A.contains(0, 50));
        assert!(!A.contains(-1, 10));
    }

    #[test]
    fn contains_rect() {
        assert!(A.contains_rect(Rectangle::new(10, 20, 10, 20)));
        assert!(!A.contains_rect(B));
        assert!(A.contains_rect(Rectangle::INVALID));
    }

    #[test]
    fn size_of_invalid_is_zero() {
        assert_eq!(A.width(), 100);
        assert_eq!(A.height(), 50);
        assert_eq!(Rectangle::INVALID.width(), 0);
        assert_eq!(Rectangle::INVALID.height(), 0);
    }

    #[test]
    fn inset_and_translate() {
        let window = Rectangle::from_size(300, 200);
        assert_eq!(window.inset(20), Rectangle::new(20, 280, 20, 180));
        assert_eq!(window.translate(5, -5), Rectangle::new(5, 305, -5, 195));
    }

    #[test]
    fn inset_and_translate_saturate() {
        let wide = Rectangle::new(i32::MIN, i32::MAX, -10, 10);
        assert_eq!(
            wide.inset(-5),
            Rectangle::new(i32::MIN, i32::MAX, -15, 15)
        );
        assert_eq!(
            wide.translate(i32::MAX, i32::MIN),
            Rectangle::new(-1, i32::MAX, i32::MIN, i32::MIN + 10)
        );
    }

    #[test]
    fn enclosing_rounds_outwards() {
        let r = Rectangle::enclosing(kurbo::Rect::new(0.5, 1.2, 9.1, 9.9));
        assert_eq!(r, Rectangle::new(0, 10, 1, 10));
        assert_eq!(kurbo::Rect::from(r), kurbo::Rect::new(0.0, 1.0, 10.0, 10.0));
    }
}
