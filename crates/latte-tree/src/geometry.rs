//! Rectangle primitives over screen pixel coordinates.

use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle `(left, top, right, bottom)`.
///
/// Input rectangles are not guaranteed to have `right >= left` or
/// `bottom >= top`; use [`Rect::normalized`] before geometric tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "[i32; 4]", into = "[i32; 4]")]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Rect {
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn width(&self) -> i64 {
        self.right as i64 - self.left as i64
    }

    pub fn height(&self) -> i64 {
        self.bottom as i64 - self.top as i64
    }

    /// Signed area; zero or negative for degenerate rectangles. Widened so
    /// that full-range `i32` coordinates cannot overflow.
    pub fn area(&self) -> i128 {
        self.width() as i128 * self.height() as i128
    }

    /// Strictly positive width, height and area.
    pub fn is_valid(&self) -> bool {
        self.area() > 0 && self.width() > 0 && self.height() > 0
    }

    /// Rectangle with edges swapped where they were inverted.
    pub fn normalized(&self) -> Self {
        Self {
            left: self.left.min(self.right),
            top: self.top.min(self.bottom),
            right: self.left.max(self.right),
            bottom: self.top.max(self.bottom),
        }
    }

    /// Per-edge containment; a rectangle contains itself.
    pub fn contains(&self, inner: &Rect) -> bool {
        inner.left >= self.left
            && inner.top >= self.top
            && inner.right <= self.right
            && inner.bottom <= self.bottom
    }

    /// Overlap of two rectangles, or `None` when they only touch or are disjoint.
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let left = self.left.max(other.left);
        let top = self.top.max(other.top);
        let right = self.right.min(other.right);
        let bottom = self.bottom.min(other.bottom);

        let dx = right as i64 - left as i64;
        let dy = bottom as i64 - top as i64;
        if dx < 0 || dy < 0 {
            return None;
        }

        let overlap = Rect::new(left, top, right, bottom);
        (overlap.width() > 0 && overlap.height() > 0).then_some(overlap)
    }

    /// True if any edge lies outside `screen`.
    pub fn is_outside(&self, screen: &Rect) -> bool {
        self.left < screen.left
            || self.top < screen.top
            || self.right > screen.right
            || self.bottom > screen.bottom
    }
}

impl From<[i32; 4]> for Rect {
    fn from([left, top, right, bottom]: [i32; 4]) -> Self {
        Self::new(left, top, right, bottom)
    }
}

impl From<Rect> for [i32; 4] {
    fn from(rect: Rect) -> Self {
        [rect.left, rect.top, rect.right, rect.bottom]
    }
}

impl std::fmt::Display for Rect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{},{}][{},{}]",
            self.left, self.top, self.right, self.bottom
        )
    }
}
