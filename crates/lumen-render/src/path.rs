#![forbid(unsafe_code)]

//! Closed vector paths built from rounded rectangles.
//!
//! A [`Path`] is a list of closed sub-paths, each a rounded rectangle (a
//! disc when the corner radius is half the side) traversed in a
//! [`Winding`] direction. [`Path::to_skia`] emits the contours for
//! rasterisation with [`tiny_skia::FillRule::Winding`], so appending a
//! reversed sub-path inside a clockwise disc punches a hole in it.
//!
//! # Invariants
//!
//! 1. Corner radii are clamped to half the shorter side.
//! 2. `reversed()` flips every sub-path's winding and nothing else.
//! 3. `bounds()` is the union of sub-path rectangles, [`Rect::ZERO`] when empty.

use lumen_core::geometry::{Point, Rect};
use smallvec::SmallVec;
use tiny_skia::PathBuilder;

/// Cubic control distance approximating a quarter circle of radius 1.
const KAPPA: f64 = 0.552_284_749_831;

/// Traversal direction of a closed sub-path (y axis pointing down).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Winding {
    Clockwise,
    CounterClockwise,
}

impl Winding {
    #[inline]
    pub fn reversed(self) -> Self {
        match self {
            Self::Clockwise => Self::CounterClockwise,
            Self::CounterClockwise => Self::Clockwise,
        }
    }
}

/// A closed rounded rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubPath {
    pub rect: Rect,
    pub corner_radius: f64,
    pub winding: Winding,
}

/// One rounded corner: a quarter arc from `from` to `to`.
struct Corner {
    from: Point,
    c1: Point,
    c2: Point,
    to: Point,
}

impl SubPath {
    /// Corners in clockwise order, starting top-right.
    fn corners(&self) -> [Corner; 4] {
        let r = &self.rect;
        let (left, top, right, bottom) = (r.x, r.y, r.max_x(), r.max_y());
        let rad = self.corner_radius;
        let k = rad * KAPPA;
        [
            Corner {
                from: Point::new(right - rad, top),
                c1: Point::new(right - rad + k, top),
                c2: Point::new(right, top + rad - k),
                to: Point::new(right, top + rad),
            },
            Corner {
                from: Point::new(right, bottom - rad),
                c1: Point::new(right, bottom - rad + k),
                c2: Point::new(right - rad + k, bottom),
                to: Point::new(right - rad, bottom),
            },
            Corner {
                from: Point::new(left + rad, bottom),
                c1: Point::new(left + rad - k, bottom),
                c2: Point::new(left, bottom - rad + k),
                to: Point::new(left, bottom - rad),
            },
            Corner {
                from: Point::new(left, top + rad),
                c1: Point::new(left, top + rad - k),
                c2: Point::new(left + rad - k, top),
                to: Point::new(left + rad, top),
            },
        ]
    }

    fn push_to(&self, pb: &mut PathBuilder) {
        if self.rect.is_empty() {
            return;
        }
        let corners = self.corners();
        match self.winding {
            Winding::Clockwise => {
                move_to(pb, corners[3].to);
                for c in &corners {
                    line_to(pb, c.from);
                    cubic_to(pb, c.c1, c.c2, c.to);
                }
            }
            Winding::CounterClockwise => {
                move_to(pb, corners[0].from);
                for c in corners.iter().rev() {
                    line_to(pb, c.to);
                    cubic_to(pb, c.c2, c.c1, c.from);
                }
            }
        }
        pb.close();
    }
}

#[inline]
fn move_to(pb: &mut PathBuilder, p: Point) {
    pb.move_to(p.x as f32, p.y as f32);
}

#[inline]
fn line_to(pb: &mut PathBuilder, p: Point) {
    pb.line_to(p.x as f32, p.y as f32);
}

#[inline]
fn cubic_to(pb: &mut PathBuilder, c1: Point, c2: Point, p: Point) {
    pb.cubic_to(
        c1.x as f32,
        c1.y as f32,
        c2.x as f32,
        c2.y as f32,
        p.x as f32,
        p.y as f32,
    );
}

/// A fillable shape made of closed sub-paths.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Path {
    subpaths: SmallVec<[SubPath; 2]>,
}

impl Path {
    /// An empty path.
    pub fn new() -> Self {
        Self::default()
    }

    /// Clockwise rounded rectangle.
    pub fn rounded_rect(rect: Rect, corner_radius: f64) -> Self {
        let max_radius = rect.width.min(rect.height).max(0.0) / 2.0;
        let mut subpaths = SmallVec::new();
        subpaths.push(SubPath {
            rect,
            corner_radius: corner_radius.clamp(0.0, max_radius),
            winding: Winding::Clockwise,
        });
        Self { subpaths }
    }

    /// Clockwise disc inscribed in `rect` (rounded rect with radius `height / 2`).
    pub fn disc(rect: Rect) -> Self {
        Self::rounded_rect(rect, rect.height / 2.0)
    }

    /// Append every sub-path of `other`.
    pub fn append(&mut self, other: Path) {
        self.subpaths.extend(other.subpaths);
    }

    /// The same path traversed in the opposite direction.
    #[must_use]
    pub fn reversed(mut self) -> Self {
        for sub in &mut self.subpaths {
            sub.winding = sub.winding.reversed();
        }
        self
    }

    /// Translate every sub-path.
    #[must_use]
    pub fn translated(mut self, dx: f64, dy: f64) -> Self {
        for sub in &mut self.subpaths {
            sub.rect = sub.rect.offset(dx, dy);
        }
        self
    }

    pub fn subpaths(&self) -> &[SubPath] {
        &self.subpaths
    }

    pub fn is_empty(&self) -> bool {
        self.subpaths.is_empty()
    }

    /// Union of all sub-path rectangles.
    pub fn bounds(&self) -> Rect {
        let mut iter = self.subpaths.iter().map(|s| s.rect);
        let Some(first) = iter.next() else {
            return Rect::ZERO;
        };
        iter.fold(first, |acc, r| {
            let x = acc.x.min(r.x);
            let y = acc.y.min(r.y);
            let right = acc.max_x().max(r.max_x());
            let bottom = acc.max_y().max(r.max_y());
            Rect::new(x, y, right - x, bottom - y)
        })
    }

    /// Contours for rasterisation, `None` when every sub-path is empty.
    pub fn to_skia(&self) -> Option<tiny_skia::Path> {
        let mut pb = PathBuilder::new();
        for sub in &self.subpaths {
            sub.push_to(&mut pb);
        }
        pb.finish()
    }
}
