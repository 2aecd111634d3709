#![forbid(unsafe_code)]

//! Circular mask element: a filled disc that animates its scale.
//!
//! A [`CircularMask`] occupies a frame in its parent's coordinate space and
//! draws a disc whose diameter is `min(width, height) * scale_extent`,
//! centered in that frame. The disc path can be rewritten by a
//! [`PathCustomizer`] (for example to punch a hole in it) every time it is
//! recomputed.
//!
//! Scale animations go through a single slot:
//!
//! - starting a new animation replaces the one in flight, which reports
//!   `finished = false` under its own tag;
//! - a natural or forced finish reports `finished = true`;
//! - [`CircularMask::cancel_animation`] drops the animation without a report.
//!
//! Reports are queued and handed out by the next [`CircularMask::tick`], the
//! way a compositor delivers animation callbacks on the following frame.
//!
//! # Invariants
//!
//! 1. At most one scale animation is in flight.
//! 2. Every started animation yields at most one completion report.
//! 3. After a finished animation the presentation scale holds its end value.

use std::time::Duration;

use lumen_core::animation::{
    Animation, AnimationCompletion, AnimationTag, ScaleAnimation, ScaleCurve,
};
use lumen_core::geometry::{Rect, centered};
use lumen_render::{Canvas, PackedRgba, Path, Transform};

/// Scale extent used when none is configured.
pub const DEFAULT_SCALE_EXTENT: f64 = 0.9;

/// Hook that rewrites the raw disc path of a mask.
///
/// The input is the disc in layer-local coordinates (origin at the disc's
/// bounding square).
pub trait PathCustomizer {
    fn customize(&self, path: Path) -> Path;
}

impl<F> PathCustomizer for F
where
    F: Fn(Path) -> Path,
{
    fn customize(&self, path: Path) -> Path {
        self(path)
    }
}

/// Animated disc drawn inside a frame.
#[derive(Debug, Clone)]
pub struct CircularMask {
    frame: Rect,
    scale_extent: f64,
    /// Disc bounding square relative to `frame`.
    layer_frame: Rect,
    /// Disc path relative to `layer_frame`.
    path: Path,
    fill: PackedRgba,
    hidden: bool,
    scale: f64,
    animation: Option<ScaleAnimation>,
    pending: Vec<AnimationCompletion>,
}

impl Default for CircularMask {
    fn default() -> Self {
        Self::new(PackedRgba::TRANSPARENT)
    }
}

impl CircularMask {
    /// A visible mask with an empty frame.
    pub fn new(fill: PackedRgba) -> Self {
        Self {
            frame: Rect::ZERO,
            scale_extent: DEFAULT_SCALE_EXTENT,
            layer_frame: Rect::ZERO,
            path: Path::disc(Rect::ZERO),
            fill,
            hidden: false,
            scale: 1.0,
            animation: None,
            pending: Vec::new(),
        }
    }

    /// Builder form of [`Self::set_scale_extent`].
    #[must_use]
    pub fn scale_extent(mut self, ratio: f64) -> Self {
        self.set_scale_extent(ratio);
        self
    }

    /// Fraction of the frame's shorter side used as the disc diameter.
    ///
    /// Negative or non-finite ratios collapse the disc. Takes effect on the
    /// next [`Self::recompute_path`].
    pub fn set_scale_extent(&mut self, ratio: f64) {
        self.scale_extent = if ratio.is_finite() { ratio.max(0.0) } else { 0.0 };
    }

    #[inline]
    pub fn extent(&self) -> f64 {
        self.scale_extent
    }

    #[inline]
    pub fn fill(&self) -> PackedRgba {
        self.fill
    }

    pub fn set_fill(&mut self, fill: PackedRgba) {
        self.fill = fill;
    }

    #[inline]
    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn set_hidden(&mut self, hidden: bool) {
        self.hidden = hidden;
    }

    /// Frame in the parent's coordinate space.
    #[inline]
    pub fn frame(&self) -> Rect {
        self.frame
    }

    /// Local bounds: the frame's size at the origin.
    pub fn bounds(&self) -> Rect {
        Rect::from_size(self.frame.width, self.frame.height)
    }

    /// Disc bounding square relative to the frame.
    #[inline]
    pub fn layer_frame(&self) -> Rect {
        self.layer_frame
    }

    /// Current path, relative to [`Self::layer_frame`].
    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Width of the current path's bounding box.
    pub fn diameter(&self) -> f64 {
        self.path.bounds().width
    }

    /// Scale currently shown on screen.
    #[inline]
    pub fn presentation_scale(&self) -> f64 {
        self.scale
    }

    #[inline]
    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Tag of the animation in flight, if any.
    pub fn animation_tag(&self) -> Option<AnimationTag> {
        self.animation.as_ref().map(ScaleAnimation::tag)
    }

    /// Move the mask and rebuild its path.
    pub fn set_frame(&mut self, frame: Rect, customizer: Option<&dyn PathCustomizer>) {
        self.frame = frame;
        self.recompute_path(customizer);
    }

    /// Rebuild the disc from the current frame and scale extent.
    pub fn recompute_path(&mut self, customizer: Option<&dyn PathCustomizer>) {
        let side = self.frame.width.min(self.frame.height).max(0.0) * self.scale_extent;
        let layer_bounds = Rect::from_size(side, side).integral();
        self.layer_frame = centered(&layer_bounds, &self.bounds()).integral();

        let disc = Path::disc(layer_bounds);
        self.path = match customizer {
            Some(customizer) => customizer.customize(disc),
            None => disc,
        };
    }

    /// Disc bounding square in the parent's coordinate space.
    fn parent_layer_frame(&self) -> Rect {
        self.layer_frame.offset(self.frame.x, self.frame.y)
    }

    /// Path in the parent's coordinate space, at rest scale.
    pub fn parent_path(&self) -> Path {
        let origin = self.parent_layer_frame().origin();
        self.path.clone().translated(origin.x, origin.y)
    }

    /// Presentation scale about the disc center, in parent coordinates.
    pub fn presentation_transform(&self) -> Transform {
        let center = self.parent_layer_frame().center();
        let (cx, cy) = (center.x as f32, center.y as f32);
        let s = self.scale.max(0.0) as f32;
        Transform::from_translate(cx, cy)
            .pre_scale(s, s)
            .pre_translate(-cx, -cy)
    }

    /// Bounds of the path as displayed.
    pub fn presented_bounds(&self) -> Rect {
        let bounds = self.parent_path().bounds();
        let center = self.parent_layer_frame().center();
        let s = self.scale.max(0.0);
        Rect::new(
            center.x + (bounds.x - center.x) * s,
            center.y + (bounds.y - center.y) * s,
            bounds.width * s,
            bounds.height * s,
        )
    }

    /// Start animating the scale from `from` to `to`.
    ///
    /// Any animation already in flight is replaced and reports
    /// `finished = false` on the next tick.
    pub fn animate_scale(&mut self, from: f64, to: f64, curve: ScaleCurve, tag: AnimationTag) {
        if let Some(previous) = self.animation.take() {
            self.pending.push(previous.completion(false));
        }
        self.scale = from;
        self.animation = Some(ScaleAnimation::new(from, to, curve, tag));
    }

    /// Drop the animation in flight without reporting it.
    ///
    /// The presentation scale stays at the last value a tick produced.
    pub fn cancel_animation(&mut self) {
        self.animation = None;
    }

    /// Jump the animation in flight to its end; it reports `finished = true`.
    pub fn complete_animation(&mut self) {
        if let Some(mut animation) = self.animation.take() {
            animation.finish();
            self.scale = animation.to_scale();
            self.pending.push(animation.completion(true));
        }
    }

    /// Advance the animation by `dt` and collect every report due.
    pub fn tick(&mut self, dt: Duration) -> Vec<AnimationCompletion> {
        let mut reports = std::mem::take(&mut self.pending);
        if let Some(mut animation) = self.animation.take() {
            animation.tick(dt);
            if animation.is_complete() {
                self.scale = animation.to_scale();
                reports.push(animation.completion(true));
            } else {
                self.scale = animation.scale();
                self.animation = Some(animation);
            }
        }
        reports
    }

    /// Fill the path at the presentation scale.
    pub fn paint(&self, canvas: &mut Canvas) {
        if self.hidden || self.scale <= 0.0 {
            return;
        }
        canvas.fill_path_with(&self.parent_path(), self.fill, self.presentation_transform());
    }
}
