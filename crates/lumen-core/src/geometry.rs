#![forbid(unsafe_code)]

//! Geometric primitives in host point space.
//!
//! Unlike cell grids, overlay geometry routinely leaves the visible area (the
//! outer highlight disc is twice as wide as the overlay itself), so every
//! coordinate here is a signed `f64`.
//!
//! # Invariants
//!
//! 1. [`Rect::intersection`] of disjoint rectangles is [`Rect::ZERO`].
//! 2. [`Rect::inset`] never produces a negative size and keeps the origin
//!    inside the source rectangle.
//! 3. [`centered`] only depends on the two sizes, so re-centering a result
//!    within the same container is a no-op.

/// A point in host coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Create a new point.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A width/height pair.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    /// Create a new size.
    #[inline]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// An axis-aligned rectangle (origin at top-left, y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// The zero rectangle at the origin.
    pub const ZERO: Rect = Rect::new(0.0, 0.0, 0.0, 0.0);

    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a rectangle at the origin with the given size.
    #[inline]
    pub const fn from_size(width: f64, height: f64) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    /// Square of side `side` centered on `center`.
    pub fn square_around(center: Point, side: f64) -> Self {
        Self::new(center.x - side / 2.0, center.y - side / 2.0, side, side)
    }

    #[inline]
    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    #[inline]
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Right edge (exclusive).
    #[inline]
    pub fn max_x(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub fn max_y(&self) -> f64 {
        self.y + self.height
    }

    #[inline]
    pub fn mid_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    #[inline]
    pub fn mid_y(&self) -> f64 {
        self.y + self.height / 2.0
    }

    #[inline]
    pub fn center(&self) -> Point {
        Point::new(self.mid_x(), self.mid_y())
    }

    /// Same size, moved so that its center is `center`.
    pub fn with_center(&self, center: Point) -> Rect {
        Rect::new(
            center.x - self.width / 2.0,
            center.y - self.height / 2.0,
            self.width,
            self.height,
        )
    }

    /// Translate by `(dx, dy)`.
    #[inline]
    pub fn offset(&self, dx: f64, dy: f64) -> Rect {
        Rect::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    /// Check if the rectangle has no area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    /// Area of the rectangle (zero for empty rectangles).
    #[inline]
    pub fn area(&self) -> f64 {
        if self.is_empty() {
            0.0
        } else {
            self.width * self.height
        }
    }

    /// Check if a point lies inside (left/top inclusive, right/bottom exclusive).
    #[inline]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x < self.max_x() && point.y >= self.y && point.y < self.max_y()
    }

    /// Check if `other` lies entirely inside, within `tolerance`.
    ///
    /// Empty rectangles are contained when their origin is.
    pub fn contains_rect(&self, other: &Rect, tolerance: f64) -> bool {
        other.x >= self.x - tolerance
            && other.y >= self.y - tolerance
            && other.max_x() <= self.max_x() + tolerance
            && other.max_y() <= self.max_y() + tolerance
    }

    /// Check if the two rectangles overlap with positive area.
    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        self.intersection_opt(other).is_some()
    }

    /// Compute the intersection with another rectangle.
    ///
    /// Returns [`Rect::ZERO`] if the rectangles don't overlap.
    #[inline]
    pub fn intersection(&self, other: &Rect) -> Rect {
        self.intersection_opt(other).unwrap_or(Rect::ZERO)
    }

    /// Compute the intersection with another rectangle, returning `None` if no overlap.
    pub fn intersection_opt(&self, other: &Rect) -> Option<Rect> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.max_x().min(other.max_x());
        let bottom = self.max_y().min(other.max_y());

        if x < right && y < bottom {
            Some(Rect::new(x, y, right - x, bottom - y))
        } else {
            None
        }
    }

    /// Smallest rectangle with integral coordinates that contains this one.
    ///
    /// Origin is floored, far edges are ceiled.
    pub fn integral(&self) -> Rect {
        let x = self.x.floor();
        let y = self.y.floor();
        let right = self.max_x().ceil();
        let bottom = self.max_y().ceil();
        Rect::new(x, y, (right - x).max(0.0), (bottom - y).max(0.0))
    }

    /// Shrink by `insets`.
    ///
    /// When the insets exceed the size, the result collapses to zero along
    /// that axis with its origin clamped to the source's far edge.
    pub fn inset(&self, insets: Insets) -> Rect {
        let width = (self.width - insets.left - insets.right).max(0.0);
        let height = (self.height - insets.top - insets.bottom).max(0.0);
        let x = (self.x + insets.left).min(self.max_x() - width).max(self.x);
        let y = (self.y + insets.top).min(self.max_y() - height).max(self.y);
        Rect::new(x, y, width, height)
    }

    /// Scale width and height by `factor`, keeping the center fixed.
    pub fn scaled_about_center(&self, factor: f64) -> Rect {
        let factor = factor.max(0.0);
        Rect::new(0.0, 0.0, self.width * factor, self.height * factor).with_center(self.center())
    }

    /// Center this rectangle within `outer`. See [`centered`].
    #[inline]
    pub fn centered_in(&self, outer: &Rect) -> Rect {
        centered(self, outer)
    }

    /// Scale every coordinate by `factor` (point space to pixel space).
    pub fn scale(&self, factor: f64) -> Rect {
        Rect::new(
            self.x * factor,
            self.y * factor,
            self.width * factor,
            self.height * factor,
        )
    }
}

/// Edge insets for padding/margin.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Insets {
    pub top: f64,
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
}

impl Insets {
    /// Create new insets (top, left, bottom, right).
    pub const fn new(top: f64, left: f64, bottom: f64, right: f64) -> Self {
        Self {
            top,
            left,
            bottom,
            right,
        }
    }

    /// Equal insets on every side.
    pub const fn all(val: f64) -> Self {
        Self::new(val, val, val, val)
    }

    /// Sum of left and right.
    #[inline]
    pub fn horizontal_sum(&self) -> f64 {
        self.left + self.right
    }

    /// Sum of top and bottom.
    #[inline]
    pub fn vertical_sum(&self) -> f64 {
        self.top + self.bottom
    }
}

/// Center `inner` within `outer`.
///
/// The result keeps `inner`'s size. Its origin is relative to `outer`'s
/// origin and floored to whole units. When `inner` is larger than `outer` the
/// origin goes negative; callers clip downstream.
pub fn centered(inner: &Rect, outer: &Rect) -> Rect {
    let x = ((outer.width - inner.width) / 2.0).floor();
    let y = ((outer.height - inner.height) / 2.0).floor();
    Rect::new(x, y, inner.width, inner.height)
}

/// Text band inside a circle of the given `diameter`.
///
/// The band is the rectangle spanned by an equilateral triangle inscribed in
/// the circle: `radius * sqrt(3)` wide and `radius` tall, horizontally
/// centered and starting half a radius below the circle's top. The result is
/// relative to the circle's bounding square.
pub fn inscribed_rect(diameter: f64) -> Rect {
    let diameter = diameter.max(0.0);
    let radius = diameter / 2.0;
    let width = radius * 3f64.sqrt();
    let height = radius;
    Rect::new((diameter - width) / 2.0, radius / 2.0, width, height)
}
