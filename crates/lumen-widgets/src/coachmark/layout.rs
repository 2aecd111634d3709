#![forbid(unsafe_code)]

//! Frame computations for one layout pass.
//!
//! All rectangles are in the coachmark's coordinate space, which is assumed
//! to coincide with the host surface's point space.

use lumen_core::geometry::{Insets, Point, Rect, Size, centered, inscribed_rect};
use lumen_render::Path;

use crate::circular_mask::CircularMask;

/// Square with the focus rect's origin and side `max(width, height)`.
pub fn focus_square(focus: Rect) -> Rect {
    let side = focus.width.max(focus.height).max(0.0);
    Rect::new(focus.x, focus.y, side, side)
}

/// Outer disc frame: side `ceil(2 * widget_width)` centered on the focus.
pub fn outer_frame(widget_width: f64, focus: Rect) -> Rect {
    let side = (widget_width.max(0.0) * 2.0).ceil();
    Rect::square_around(focus.center(), side)
}

/// Inner disc frame: the focus square moved onto `center`.
pub fn inner_frame(focus: Rect, center: Point) -> Rect {
    focus_square(focus).with_center(center)
}

/// Region to snapshot: the square whose side is the focus diagonal,
/// centered on the focus, made integral and clipped to `surface_bounds`.
pub fn snapshot_rect(focus: Rect, surface_bounds: Rect) -> Rect {
    let side = focus.width.hypot(focus.height);
    Rect::new(
        focus.x + (focus.width - side) / 2.0,
        focus.y + (focus.height - side) / 2.0,
        side,
        side,
    )
    .integral()
    .intersection(&surface_bounds)
}

/// Append a reversed rounded square the size of the focus square, centered
/// in the disc, so the disc shows a round hole.
pub fn default_cutout(mut path: Path, focus: Rect) -> Path {
    let square = focus_square(focus);
    let hole = centered(&square, &path.bounds()).integral();
    path.append(Path::rounded_rect(hole, square.width / 2.0).reversed());
    path
}

/// Text band inscribed in the outer disc, in the mask's parent space.
pub fn text_band(outer: &CircularMask) -> Rect {
    let diameter = outer.diameter();
    let bounds = outer.bounds();
    let frame = outer.frame();
    inscribed_rect(diameter)
        .offset(
            (bounds.width - diameter) / 2.0,
            (bounds.height - diameter) / 2.0,
        )
        .integral()
        .offset(frame.x, frame.y)
}

/// Final label frame.
///
/// The band is clipped to `bounds`, moved off the inner disc frame when one
/// is shown, padded by `insets`, then shrunk to the text's natural height.
/// A label in the upper half of the outer disc is centered vertically in
/// the space it gave up.
pub fn label_frame(
    band: Rect,
    bounds: Rect,
    inner: Option<Rect>,
    insets: Insets,
    outer_mid_y: f64,
    fit: impl FnOnce(Size) -> Size,
) -> Rect {
    let mut area = band.intersection(&bounds);

    if let Some(inner) = inner
        && area.intersects(&inner)
    {
        if area.mid_y() < inner.mid_y() {
            // Above the disc: give up the bottom.
            area.height = (inner.y - area.y).clamp(0.0, area.height);
        } else {
            let top = inner.max_y().clamp(area.y, area.max_y());
            area.height = area.max_y() - top;
            area.y = top;
        }
    }

    let mut frame = area.inset(insets);
    let natural = fit(frame.size()).height.max(0.0);
    let height = natural.min(frame.height);
    if frame.mid_y() < outer_mid_y {
        frame.y += (frame.height - height) / 2.0;
    }
    frame.height = height;
    frame
}
