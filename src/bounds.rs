//! Geometry value types: points and axis-aligned layer bounds.
//!
//! `Bounds` is a plain `Copy` struct. Every "mutation" returns a new value
//! through one of the `with_*` constructors; width, height and centers are
//! always derived from the four edges.
//!
//! During an interactive resize the edges may be inverted (`left > right` or
//! `top > bottom`); width and height are then negative. Call
//! [`Bounds::normalize`] to resolve that before handing bounds to anything that
//! expects a well-formed rectangle.

#[cfg(test)]
#[path = "bounds_test.rs"]
mod bounds_test;

use serde::{Deserialize, Serialize};

/// A point in document (canvas) coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Axis-aligned rectangle describing a layer's extent.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bounds {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Bounds {
    #[must_use]
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self { left, top, right, bottom }
    }

    /// Build bounds from a top-left origin and a size.
    #[must_use]
    pub fn from_origin_size(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, right: left + width, bottom: top + height }
    }

    /// Signed width; negative while the rectangle is inverted.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    /// Signed height; negative while the rectangle is inverted.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    #[must_use]
    pub fn x_center(&self) -> f64 {
        self.left + self.width() / 2.0
    }

    #[must_use]
    pub fn y_center(&self) -> f64 {
        self.top + self.height() / 2.0
    }

    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.x_center(), self.y_center())
    }

    /// A layer with no visible extent in either direction.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width() == 0.0 && self.height() == 0.0
    }

    /// Resolve inverted edges so that `left <= right` and `top <= bottom`.
    #[must_use]
    pub fn normalize(&self) -> Self {
        Self {
            left: self.left.min(self.right),
            top: self.top.min(self.bottom),
            right: self.left.max(self.right),
            bottom: self.top.max(self.bottom),
        }
    }

    #[must_use]
    pub fn with_left(&self, left: f64) -> Self {
        Self { left, ..*self }
    }

    #[must_use]
    pub fn with_top(&self, top: f64) -> Self {
        Self { top, ..*self }
    }

    #[must_use]
    pub fn with_right(&self, right: f64) -> Self {
        Self { right, ..*self }
    }

    #[must_use]
    pub fn with_bottom(&self, bottom: f64) -> Self {
        Self { bottom, ..*self }
    }

    #[must_use]
    pub fn with_left_right(&self, left: f64, right: f64) -> Self {
        Self { left, right, ..*self }
    }

    #[must_use]
    pub fn with_top_bottom(&self, top: f64, bottom: f64) -> Self {
        Self { top, bottom, ..*self }
    }

    #[must_use]
    pub fn with_left_top(&self, left: f64, top: f64) -> Self {
        Self { left, top, ..*self }
    }

    #[must_use]
    pub fn with_right_top(&self, right: f64, top: f64) -> Self {
        Self { right, top, ..*self }
    }

    #[must_use]
    pub fn with_right_bottom(&self, right: f64, bottom: f64) -> Self {
        Self { right, bottom, ..*self }
    }

    #[must_use]
    pub fn with_left_bottom(&self, left: f64, bottom: f64) -> Self {
        Self { left, bottom, ..*self }
    }

    /// Shift all four edges by `(dx, dy)`.
    #[must_use]
    pub fn translate(&self, dx: f64, dy: f64) -> Self {
        Self {
            left: self.left + dx,
            top: self.top + dy,
            right: self.right + dx,
            bottom: self.bottom + dy,
        }
    }

    /// Move the top-left corner to `(left, top)`, keeping the size.
    #[must_use]
    pub fn moved_to(&self, left: f64, top: f64) -> Self {
        Self::from_origin_size(left, top, self.width(), self.height())
    }

    /// Smallest bounds containing both `self` and `other` (both normalized first).
    #[must_use]
    pub fn union(&self, other: &Bounds) -> Self {
        let a = self.normalize();
        let b = other.normalize();
        Self {
            left: a.left.min(b.left),
            top: a.top.min(b.top),
            right: a.right.max(b.right),
            bottom: a.bottom.max(b.bottom),
        }
    }
}
