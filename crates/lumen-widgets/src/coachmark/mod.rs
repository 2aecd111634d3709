#![forbid(unsafe_code)]

//! Coach-mark focus overlay.
//!
//! A [`Coachmark`] covers the host surface with a large tinted disc (the
//! outer mask) centered on a focus rectangle. When focusing on an element it
//! also shows a frozen snapshot of that element on a white disc (the inner
//! mask) and punches a matching hole in the outer disc. A wrapped text label
//! sits in the band inscribed in the outer disc, moved clear of the inner
//! disc.
//!
//! # State machine
//!
//! ```text
//! Hidden ──present──▶ Presenting ──entrances finished──▶ Visible
//!   ▲                    │  ▲                              │
//!   │                 dismiss└──────────present────────────┤
//!   │                    ▼                                 │
//!   └──outer dismissal── Dismissing ◀──────dismiss─────────┘
//!        finished
//! ```
//!
//! Time only moves through [`Coachmark::tick`]. Completions reported by the
//! masks during a tick are dispatched after both masks have advanced:
//!
//! - an outer `(Dismissal, finished)` while dismissing hides everything and
//!   notifies the [`CoachmarkDelegate`] once;
//! - `(Entrance, finished)` while presenting counts toward `Visible`;
//! - every other report (replaced animations, inner dismissal) is ignored.
//!
//! # Invariants
//!
//! 1. The inner mask is visible only while a snapshot is held.
//! 2. The label frame lies inside the widget bounds after every layout pass.
//! 3. One dismissal yields at most one delegate notification.

pub mod config;
pub mod delegate;
pub mod layout;

use std::fmt;
use std::rc::Weak;
use std::time::Duration;

use lumen_core::animation::{
    Animation, AnimationCompletion, AnimationTag, Easing, ScaleCurve, Tween,
};
use lumen_core::event::Event;
use lumen_core::geometry::{Insets, Rect};
use lumen_core::gesture::TapRecognizer;
use lumen_render::{Canvas, PackedRgba, Path, Snapshot, Surface};

use crate::circular_mask::CircularMask;
use crate::label::{GlyphPainter, TextLabel};

pub use config::{CoachmarkConfig, DEFAULT_ANIMATION_DURATION};
pub use delegate::{CoachmarkAppearanceDelegate, CoachmarkDelegate};

/// Rewrites the outer disc given the focus rect. Applied only while the
/// inner mask is shown.
pub type CutoutFn = Box<dyn Fn(Path, Rect) -> Path>;

/// Lifecycle phase of a [`Coachmark`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PresentationState {
    /// Not shown. Initial and terminal.
    #[default]
    Hidden,
    /// Entrance animations in flight.
    Presenting,
    /// Fully shown and waiting for a tap.
    Visible,
    /// Exit animations in flight.
    Dismissing,
}

impl PresentationState {
    /// Whether a tap may dismiss the overlay in this phase.
    pub fn accepts_dismiss(self) -> bool {
        matches!(self, Self::Presenting | Self::Visible)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mask {
    Outer,
    Inner,
}

/// Entrance animations that have not yet reported `finished = true`.
#[derive(Debug, Clone, Copy, Default)]
struct PendingEntrance {
    outer: bool,
    inner: bool,
}

impl PendingEntrance {
    fn clear(&mut self, mask: Mask) {
        match mask {
            Mask::Outer => self.outer = false,
            Mask::Inner => self.inner = false,
        }
    }

    fn is_empty(self) -> bool {
        !self.outer && !self.inner
    }
}

#[derive(Debug, Clone)]
struct LabelFade {
    tween: Tween,
    /// Set on the exit fade; its completion releases the snapshot.
    releases_snapshot: bool,
}

/// Focus overlay widget.
pub struct Coachmark {
    config: CoachmarkConfig,
    bounds: Rect,
    focus: Rect,
    state: PresentationState,
    hidden: bool,
    interactive: bool,
    outer: CircularMask,
    inner: CircularMask,
    label: TextLabel,
    label_fade: Option<LabelFade>,
    snapshot: Option<Snapshot>,
    snapshot_frame: Rect,
    pending: PendingEntrance,
    taps: TapRecognizer,
    cutout: CutoutFn,
    delegate: Option<Weak<dyn CoachmarkDelegate>>,
    appearance_delegate: Option<Weak<dyn CoachmarkAppearanceDelegate>>,
}

impl fmt::Debug for Coachmark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Coachmark")
            .field("bounds", &self.bounds)
            .field("focus", &self.focus)
            .field("state", &self.state)
            .field("hidden", &self.hidden)
            .field("interactive", &self.interactive)
            .field("outer", &self.outer)
            .field("inner", &self.inner)
            .field("label", &self.label)
            .field("has_snapshot", &self.snapshot.is_some())
            .finish_non_exhaustive()
    }
}

impl Default for Coachmark {
    fn default() -> Self {
        Self::new(CoachmarkConfig::default())
    }
}

impl Coachmark {
    /// A hidden, non-interactive overlay with empty bounds.
    pub fn new(config: CoachmarkConfig) -> Self {
        let mut outer = CircularMask::new(config.tint).scale_extent(config.outer_scale_extent);
        outer.set_hidden(true);
        let mut inner =
            CircularMask::new(config.spotlight_fill).scale_extent(config.inner_scale_extent);
        inner.set_hidden(true);
        let label = TextLabel::default()
            .color(config.text_color)
            .metrics(config.text_metrics);
        let taps = TapRecognizer::new(config.gesture);

        Self {
            config,
            bounds: Rect::ZERO,
            focus: Rect::ZERO,
            state: PresentationState::Hidden,
            hidden: true,
            interactive: false,
            outer,
            inner,
            label,
            label_fade: None,
            snapshot: None,
            snapshot_frame: Rect::ZERO,
            pending: PendingEntrance::default(),
            taps,
            cutout: Box::new(layout::default_cutout),
            delegate: None,
            appearance_delegate: None,
        }
    }

    /// Builder form of [`Self::set_bounds`].
    #[must_use]
    pub fn with_bounds(mut self, bounds: Rect) -> Self {
        self.set_bounds(bounds);
        self
    }

    /// Builder form of [`Self::set_text`].
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.set_text(text);
        self
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    #[inline]
    pub fn state(&self) -> PresentationState {
        self.state
    }

    #[inline]
    pub fn config(&self) -> &CoachmarkConfig {
        &self.config
    }

    /// Widget bounds; the label never leaves them.
    #[inline]
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Rectangle currently in focus.
    #[inline]
    pub fn focus_rect(&self) -> Rect {
        self.focus
    }

    #[inline]
    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    /// Whether taps are being recognized.
    #[inline]
    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    /// Tinted highlight disc.
    #[inline]
    pub fn outer(&self) -> &CircularMask {
        &self.outer
    }

    /// Spotlight disc behind the snapshot.
    #[inline]
    pub fn inner(&self) -> &CircularMask {
        &self.inner
    }

    #[inline]
    pub fn label(&self) -> &TextLabel {
        &self.label
    }

    #[inline]
    pub fn snapshot(&self) -> Option<&Snapshot> {
        self.snapshot.as_ref()
    }

    /// Where the snapshot is drawn.
    #[inline]
    pub fn snapshot_frame(&self) -> Rect {
        self.snapshot_frame
    }

    #[inline]
    pub fn text_insets(&self) -> Insets {
        self.config.text_insets
    }

    #[inline]
    pub fn tint(&self) -> PackedRgba {
        self.config.tint
    }

    /// Duration of timed animations: the appearance delegate's answer, or
    /// the configured default when it is absent or dropped.
    pub fn animation_duration(&self) -> Duration {
        self.appearance_delegate
            .as_ref()
            .and_then(Weak::upgrade)
            .map_or(self.config.default_duration, |delegate| {
                delegate.animation_duration(self)
            })
    }

    // ========================================================================
    // Configuration
    // ========================================================================

    pub fn set_delegate(&mut self, delegate: Option<Weak<dyn CoachmarkDelegate>>) {
        self.delegate = delegate;
    }

    pub fn set_appearance_delegate(
        &mut self,
        delegate: Option<Weak<dyn CoachmarkAppearanceDelegate>>,
    ) {
        self.appearance_delegate = delegate;
    }

    /// Resize the widget and lay it out again.
    pub fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
        self.recompute_layout();
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.label.set_text(text);
        self.recompute_layout();
    }

    /// Change the label padding. Lays out again only when the value changed.
    pub fn set_text_insets(&mut self, insets: Insets) {
        if self.config.text_insets == insets {
            return;
        }
        self.config.text_insets = insets;
        self.recompute_layout();
    }

    /// Repaint the outer disc with a new tint.
    pub fn set_tint(&mut self, tint: PackedRgba) {
        self.config.tint = tint;
        self.outer.set_fill(tint);
    }

    /// Replace the hole-punching hook and lay out again.
    pub fn set_cutout(&mut self, cutout: CutoutFn) {
        self.cutout = cutout;
        self.recompute_layout();
    }

    // ========================================================================
    // Presentation
    // ========================================================================

    /// Show the overlay centered on `from`.
    ///
    /// With `focusing_on_element`, the region around `from` is captured from
    /// `surface` and shown on the inner disc. A failed capture falls back to
    /// presenting without it. Calling this mid-dismissal takes over the
    /// masks; the dismissal never completes.
    pub fn present(&mut self, surface: &dyn Surface, from: Rect, focusing_on_element: bool) {
        let duration = self.animation_duration();

        self.interactive = true;
        self.hidden = false;
        self.taps.reset();
        self.focus = from;
        self.set_state(PresentationState::Presenting);

        self.label.set_alpha(0.0);
        self.label_fade = Some(LabelFade {
            tween: Tween::new(0.0, 1.0, duration).easing(Easing::EaseInOut),
            releases_snapshot: false,
        });

        let snapshot_rect = layout::snapshot_rect(from, surface.bounds());
        self.snapshot = if focusing_on_element {
            match lumen_render::capture(surface, snapshot_rect) {
                Ok(snapshot) => Some(snapshot),
                Err(_err) => {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(
                        message = "coachmark.snapshot_failed",
                        error = %_err,
                        x = snapshot_rect.x,
                        y = snapshot_rect.y,
                        w = snapshot_rect.width,
                        h = snapshot_rect.height
                    );
                    None
                }
            }
        } else {
            None
        };
        self.snapshot_frame = if self.snapshot.is_some() {
            snapshot_rect
        } else {
            Rect::ZERO
        };

        let spotlight = self.snapshot.is_some();
        self.inner.set_hidden(!spotlight);
        self.outer.set_hidden(false);
        self.recompute_layout();

        self.pending = PendingEntrance {
            outer: true,
            inner: spotlight,
        };
        if spotlight {
            self.inner.animate_scale(
                0.0,
                1.0,
                ScaleCurve::timed(duration),
                AnimationTag::Entrance,
            );
        } else {
            self.inner.cancel_animation();
        }
        self.outer
            .animate_scale(0.0, 1.0, self.config.outer_curve, AnimationTag::Entrance);
    }

    /// Start the exit animations. Ignored unless presenting or visible.
    pub fn dismiss(&mut self) {
        if !self.state.accepts_dismiss() {
            return;
        }
        let duration = self.animation_duration();

        self.interactive = false;
        self.taps.reset();
        self.pending = PendingEntrance::default();
        self.set_state(PresentationState::Dismissing);

        self.outer.animate_scale(
            1.0,
            0.0,
            ScaleCurve::timed(duration),
            AnimationTag::Dismissal,
        );
        if !self.inner.is_hidden() {
            self.inner.animate_scale(
                1.0,
                0.0,
                ScaleCurve::timed(duration),
                AnimationTag::Dismissal,
            );
        }
        self.label_fade = Some(LabelFade {
            tween: Tween::new(self.label.alpha(), 0.0, duration).easing(Easing::EaseInOut),
            releases_snapshot: true,
        });
    }

    /// The host removed the overlay: drop the snapshot and go inert.
    ///
    /// In-flight animations are cancelled without notifying the delegate.
    pub fn detach(&mut self) {
        self.snapshot = None;
        self.snapshot_frame = Rect::ZERO;
        self.hidden = true;
        self.interactive = false;
        self.taps.reset();
        self.label_fade = None;
        self.pending = PendingEntrance::default();
        self.outer.cancel_animation();
        self.inner.cancel_animation();
        self.outer.set_hidden(true);
        self.inner.set_hidden(true);
        self.set_state(PresentationState::Hidden);
    }

    /// Route an input event. Returns `true` when the overlay consumed it.
    pub fn handle_event(&mut self, event: &Event) -> bool {
        match event {
            Event::Resize(size) => {
                self.set_bounds(Rect::new(
                    self.bounds.x,
                    self.bounds.y,
                    size.width,
                    size.height,
                ));
                false
            }
            Event::Mouse(_) => {
                if !self.interactive {
                    return false;
                }
                if self.taps.process(event).is_some() {
                    self.dismiss();
                }
                true
            }
        }
    }

    /// Advance every animation by `dt` and dispatch their completions.
    pub fn tick(&mut self, dt: Duration) {
        let outer_reports = self.outer.tick(dt);
        let inner_reports = self.inner.tick(dt);

        if let Some(fade) = self.label_fade.as_mut() {
            fade.tween.tick(dt);
            self.label.set_alpha(fade.tween.current());
            if fade.tween.is_complete() {
                if fade.releases_snapshot {
                    self.snapshot = None;
                }
                self.label_fade = None;
            }
        }

        for report in outer_reports {
            self.on_mask_completion(Mask::Outer, report);
        }
        for report in inner_reports {
            self.on_mask_completion(Mask::Inner, report);
        }
    }

    fn on_mask_completion(&mut self, mask: Mask, report: AnimationCompletion) {
        match (mask, report) {
            (
                Mask::Outer,
                AnimationCompletion {
                    tag: AnimationTag::Dismissal,
                    finished: true,
                },
            ) if self.state == PresentationState::Dismissing => self.finish_dismissal(),
            (
                _,
                AnimationCompletion {
                    tag: AnimationTag::Entrance,
                    finished: true,
                },
            ) if self.state == PresentationState::Presenting => {
                self.pending.clear(mask);
                if self.pending.is_empty() {
                    self.set_state(PresentationState::Visible);
                }
            }
            _ => {
                #[cfg(feature = "tracing")]
                tracing::debug!(
                    message = "coachmark.completion_ignored",
                    mask = ?mask,
                    tag = ?report.tag,
                    finished = report.finished,
                    state = ?self.state
                );
            }
        }
    }

    fn finish_dismissal(&mut self) {
        self.outer.set_hidden(true);
        self.inner.set_hidden(true);
        self.hidden = true;
        self.interactive = false;
        self.snapshot = None;
        self.snapshot_frame = Rect::ZERO;
        self.set_state(PresentationState::Hidden);

        if let Some(delegate) = self.delegate.as_ref().and_then(Weak::upgrade) {
            delegate.coachmark_did_complete(self);
        }
    }

    fn set_state(&mut self, next: PresentationState) {
        #[cfg(feature = "tracing")]
        {
            if self.state != next {
                tracing::debug!(
                    message = "coachmark.transition",
                    from = ?self.state,
                    to = ?next
                );
            }
        }
        self.state = next;
    }

    // ========================================================================
    // Layout
    // ========================================================================

    /// Recompute both disc frames, the cutout and the label frame from the
    /// current bounds and focus rect. Idempotent.
    pub fn recompute_layout(&mut self) {
        let focus = self.focus;
        let outer_frame = layout::outer_frame(self.bounds.width, focus);

        if self.inner.is_hidden() {
            self.outer.set_frame(outer_frame, None);
        } else {
            let cutout = &self.cutout;
            let punch = |path: Path| cutout(path, focus);
            self.outer.set_frame(outer_frame, Some(&punch));
        }

        let inner_frame = layout::inner_frame(focus, outer_frame.center());
        self.inner.set_frame(inner_frame, None);

        let band = layout::text_band(&self.outer);
        let avoid = (!self.inner.is_hidden()).then_some(inner_frame);
        let label = &self.label;
        let frame = layout::label_frame(
            band,
            self.bounds,
            avoid,
            self.config.text_insets,
            outer_frame.mid_y(),
            |size| label.size_that_fits(size),
        );
        self.label.set_frame(frame);
    }

    // ========================================================================
    // Rendering
    // ========================================================================

    /// Paint the scene: inner disc, snapshot, outer disc, then the label
    /// text when a glyph painter is supplied.
    pub fn paint(&self, canvas: &mut Canvas, glyphs: Option<&dyn GlyphPainter>) {
        if self.hidden {
            return;
        }

        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "widget_render",
            widget = "Coachmark",
            x = self.bounds.x,
            y = self.bounds.y,
            w = self.bounds.width,
            h = self.bounds.height
        )
        .entered();

        self.inner.paint(canvas);
        if let Some(snapshot) = &self.snapshot {
            canvas.draw_image(snapshot.image(), self.snapshot_frame, 1.0);
        }
        self.outer.paint(canvas);
        if !self.outer.is_hidden()
            && let Some(glyphs) = glyphs
        {
            self.label.paint(canvas, glyphs);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_core::event::{MouseButton, MouseEvent, MouseEventKind};
    use lumen_core::geometry::{Point, Size};
    use std::cell::Cell;
    use std::rc::Rc;

    const MS_16: Duration = Duration::from_millis(16);

    struct Screen(Rect);

    impl Surface for Screen {
        fn bounds(&self) -> Rect {
            self.0
        }

        fn render(&self, canvas: &mut Canvas) {
            canvas.clear(PackedRgba::rgb(30, 30, 30));
        }
    }

    #[derive(Default)]
    struct Counter(Cell<u32>);

    impl CoachmarkDelegate for Counter {
        fn coachmark_did_complete(&self, _: &Coachmark) {
            self.0.set(self.0.get() + 1);
        }
    }

    struct Slow;

    impl CoachmarkAppearanceDelegate for Slow {
        fn animation_duration(&self, _: &Coachmark) -> Duration {
            Duration::from_millis(500)
        }
    }

    fn screen() -> Screen {
        Screen(Rect::from_size(400.0, 800.0))
    }

    fn coachmark() -> Coachmark {
        Coachmark::default()
            .with_bounds(Rect::from_size(400.0, 800.0))
            .with_text("Tap to continue")
    }

    fn run(c: &mut Coachmark, frames: usize) {
        for _ in 0..frames {
            c.tick(MS_16);
        }
    }

    fn click(c: &mut Coachmark, at: Point) -> bool {
        let down = Event::Mouse(MouseEvent::new(MouseEventKind::Down(MouseButton::Left), at));
        let up = Event::Mouse(MouseEvent::new(MouseEventKind::Up(MouseButton::Left), at));
        c.handle_event(&down) | c.handle_event(&up)
    }

    #[test]
    fn starts_hidden() {
        let c = Coachmark::default();
        assert_eq!(c.state(), PresentationState::Hidden);
        assert!(c.is_hidden());
        assert!(!c.is_interactive());
        assert_eq!(c.focus_rect(), Rect::ZERO);
    }

    #[test]
    fn default_duration_without_delegate() {
        assert_eq!(Coachmark::default().animation_duration(), DEFAULT_ANIMATION_DURATION);
    }

    #[test]
    fn appearance_delegate_sets_duration() {
        let mut c = Coachmark::default();
        let slow: Rc<dyn CoachmarkAppearanceDelegate> = Rc::new(Slow);
        c.set_appearance_delegate(Some(Rc::downgrade(&slow)));
        assert_eq!(c.animation_duration(), Duration::from_millis(500));
        drop(slow);
        assert_eq!(c.animation_duration(), DEFAULT_ANIMATION_DURATION);
    }

    #[test]
    fn present_without_focus_hides_inner() {
        let mut c = coachmark();
        c.present(&screen(), Rect::new(100.0, 100.0, 40.0, 40.0), false);
        assert_eq!(c.state(), PresentationState::Presenting);
        assert!(c.inner().is_hidden());
        assert!(!c.outer().is_hidden());
        assert!(c.snapshot().is_none());
        assert_eq!(c.outer().path().subpaths().len(), 1);
    }

    #[test]
    fn present_with_focus_shows_inner_and_cuts_hole() {
        let mut c = coachmark();
        c.present(&screen(), Rect::new(100.0, 100.0, 40.0, 20.0), true);
        assert!(!c.inner().is_hidden());
        assert!(c.snapshot().is_some());
        assert_eq!(c.inner().frame().center(), c.outer().frame().center());
        assert_eq!(c.outer().path().subpaths().len(), 2);
        assert_eq!(c.snapshot_frame(), Rect::new(97.0, 87.0, 46.0, 46.0));
    }

    #[test]
    fn failed_capture_falls_back() {
        let mut c = coachmark();
        c.present(&screen(), Rect::new(-500.0, -500.0, 10.0, 10.0), true);
        assert!(c.inner().is_hidden());
        assert!(c.snapshot().is_none());
        assert_eq!(c.state(), PresentationState::Presenting);
    }

    #[test]
    fn entrance_reaches_visible() {
        let mut c = coachmark();
        c.present(&screen(), Rect::new(100.0, 100.0, 40.0, 40.0), true);
        run(&mut c, 400);
        assert_eq!(c.state(), PresentationState::Visible);
        assert_eq!(c.label().alpha(), 1.0);
        assert_eq!(c.outer().presentation_scale(), 1.0);
        assert_eq!(c.inner().presentation_scale(), 1.0);
    }

    #[test]
    fn timed_outer_curve_is_honored() {
        let config = CoachmarkConfig::default().outer_curve(ScaleCurve::timed(MS_16));
        let mut c = Coachmark::new(config).with_bounds(Rect::from_size(400.0, 800.0));
        c.present(&screen(), Rect::new(10.0, 10.0, 10.0, 10.0), false);
        c.tick(MS_16);
        assert_eq!(c.state(), PresentationState::Visible);
    }

    #[test]
    fn dismiss_from_hidden_is_noop() {
        let mut c = coachmark();
        c.dismiss();
        assert_eq!(c.state(), PresentationState::Hidden);
        assert!(!c.outer().is_animating());
    }

    #[test]
    fn tap_dismisses_only_while_interactive() {
        let mut c = coachmark();
        assert!(!click(&mut c, Point::new(10.0, 10.0)));

        c.present(&screen(), Rect::new(100.0, 100.0, 40.0, 40.0), false);
        assert!(click(&mut c, Point::new(10.0, 10.0)));
        assert_eq!(c.state(), PresentationState::Dismissing);
        assert!(!c.is_interactive());
        assert!(!click(&mut c, Point::new(10.0, 10.0)));
    }

    #[test]
    fn dismissal_completion_hides_and_notifies_once() {
        let counter = Rc::new(Counter::default());
        let weak: Weak<dyn CoachmarkDelegate> = Rc::downgrade(&counter) as Weak<dyn CoachmarkDelegate>;
        let mut c = coachmark();
        c.set_delegate(Some(weak));
        c.present(&screen(), Rect::new(100.0, 100.0, 40.0, 40.0), true);
        run(&mut c, 200);
        c.dismiss();
        c.dismiss();
        run(&mut c, 30);
        assert_eq!(c.state(), PresentationState::Hidden);
        assert!(c.is_hidden());
        assert!(c.outer().is_hidden());
        assert!(c.inner().is_hidden());
        assert!(c.snapshot().is_none());
        assert_eq!(c.label().alpha(), 0.0);
        assert_eq!(counter.0.get(), 1);
    }

    #[test]
    fn present_during_dismissal_overrides_it() {
        let counter = Rc::new(Counter::default());
        let weak: Weak<dyn CoachmarkDelegate> = Rc::downgrade(&counter) as Weak<dyn CoachmarkDelegate>;
        let mut c = coachmark();
        c.set_delegate(Some(weak));
        c.present(&screen(), Rect::new(100.0, 100.0, 40.0, 40.0), true);
        run(&mut c, 200);
        c.dismiss();
        c.tick(MS_16);
        c.present(&screen(), Rect::new(200.0, 300.0, 40.0, 40.0), true);
        run(&mut c, 400);
        assert_eq!(c.state(), PresentationState::Visible);
        assert!(c.snapshot().is_some());
        assert_eq!(counter.0.get(), 0);
    }

    #[test]
    fn dropped_delegate_is_skipped() {
        let counter = Rc::new(Counter::default());
        let weak: Weak<dyn CoachmarkDelegate> = Rc::downgrade(&counter) as Weak<dyn CoachmarkDelegate>;
        let mut c = coachmark();
        c.set_delegate(Some(weak));
        drop(counter);
        c.present(&screen(), Rect::new(100.0, 100.0, 40.0, 40.0), false);
        c.dismiss();
        run(&mut c, 30);
        assert_eq!(c.state(), PresentationState::Hidden);
    }

    #[test]
    fn detach_goes_inert() {
        let mut c = coachmark();
        c.present(&screen(), Rect::new(100.0, 100.0, 40.0, 40.0), true);
        c.detach();
        assert!(c.is_hidden());
        assert!(!c.is_interactive());
        assert!(c.snapshot().is_none());
        assert_eq!(c.state(), PresentationState::Hidden);
        run(&mut c, 100);
        assert_eq!(c.state(), PresentationState::Hidden);
    }

    #[test]
    fn set_tint_updates_outer_fill() {
        let mut c = coachmark();
        let red = PackedRgba::rgb(255, 0, 0);
        c.set_tint(red);
        assert_eq!(c.outer().fill(), red);
        assert_eq!(c.tint(), red);
    }

    #[test]
    fn set_text_insets_relayouts_on_change() {
        let mut c = coachmark();
        c.present(&screen(), Rect::new(180.0, 600.0, 40.0, 40.0), false);
        let before = c.label().frame();
        c.set_text_insets(Insets::new(10.0, 60.0, 10.0, 60.0));
        let after = c.label().frame();
        assert_eq!(after.x, before.x + 40.0);
        assert_eq!(after.width, before.width - 80.0);
    }

    #[test]
    fn resize_event_relayouts() {
        let mut c = coachmark();
        c.present(&screen(), Rect::new(100.0, 100.0, 40.0, 40.0), false);
        assert!(!c.handle_event(&Event::Resize(Size::new(300.0, 600.0))));
        assert_eq!(c.outer().frame().width, 600.0);
    }

    #[test]
    fn custom_cutout_is_used() {
        let mut c = coachmark();
        c.set_cutout(Box::new(|path, _| path));
        c.present(&screen(), Rect::new(100.0, 100.0, 40.0, 40.0), true);
        assert_eq!(c.outer().path().subpaths().len(), 1);
    }

    #[test]
    fn paint_draws_tint_and_hole() {
        let config = CoachmarkConfig::default()
            .tint(PackedRgba::rgb(0, 0, 255))
            .outer_curve(ScaleCurve::timed(MS_16));
        let mut c = Coachmark::new(config).with_bounds(Rect::from_size(400.0, 800.0));
        c.present(&screen(), Rect::new(100.0, 100.0, 40.0, 40.0), true);
        run(&mut c, 20);
        let mut canvas = Canvas::new(Rect::from_size(400.0, 800.0), 1.0).unwrap();
        c.paint(&mut canvas, None);
        // Far from the focus: tint.
        assert_eq!(
            canvas.pixel_at(Point::new(300.0, 300.0)),
            Some(PackedRgba::rgb(0, 0, 255))
        );
        // Focus center: the snapshot shows through the hole.
        assert_eq!(
            canvas.pixel_at(Point::new(120.0, 120.0)),
            Some(PackedRgba::rgb(30, 30, 30))
        );
    }

    #[test]
    fn hidden_overlay_paints_nothing() {
        let c = coachmark();
        let mut canvas = Canvas::new(Rect::from_size(10.0, 10.0), 1.0).unwrap();
        c.paint(&mut canvas, None);
        assert!(canvas.pixmap().pixels().iter().all(|p| p.alpha() == 0));
    }

    #[cfg(feature = "tracing")]
    mod trace {
        use super::*;
        use std::sync::{Arc, Mutex};
        use tracing::Subscriber;
        use tracing_subscriber::Layer;
        use tracing_subscriber::layer::{Context, SubscriberExt};

        #[derive(Default)]
        struct Seen {
            spans: Vec<String>,
            events: Vec<String>,
        }

        struct Capture(Arc<Mutex<Seen>>);

        impl<S: Subscriber> Layer<S> for Capture {
            fn on_new_span(
                &self,
                attrs: &tracing::span::Attributes<'_>,
                _id: &tracing::Id,
                _ctx: Context<'_, S>,
            ) {
                let name = attrs.metadata().name().to_string();
                self.0.lock().expect("trace lock").spans.push(name);
            }

            fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
                struct Msg(Option<String>);
                impl tracing::field::Visit for Msg {
                    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
                        if field.name() == "message" {
                            self.0 = Some(value.to_string());
                        }
                    }

                    fn record_debug(
                        &mut self,
                        field: &tracing::field::Field,
                        value: &dyn std::fmt::Debug,
                    ) {
                        if field.name() == "message" {
                            self.0 = Some(format!("{value:?}").trim_matches('"').to_string());
                        }
                    }
                }
                let mut msg = Msg(None);
                event.record(&mut msg);
                if let Some(message) = msg.0 {
                    self.0.lock().expect("trace lock").events.push(message);
                }
            }
        }

        fn capture() -> (Arc<Mutex<Seen>>, tracing::subscriber::DefaultGuard) {
            let seen = Arc::new(Mutex::new(Seen::default()));
            let subscriber = tracing_subscriber::registry().with(Capture(Arc::clone(&seen)));
            (seen, tracing::subscriber::set_default(subscriber))
        }

        #[test]
        fn failed_snapshot_is_traced() {
            let (seen, _guard) = capture();
            let mut c = coachmark();
            c.present(&screen(), Rect::new(-500.0, -500.0, 10.0, 10.0), true);
            assert!(c.snapshot().is_none());

            let seen = seen.lock().expect("trace lock");
            assert!(
                seen.events.iter().any(|m| m == "coachmark.snapshot_failed"),
                "events: {:?}",
                seen.events
            );
        }

        #[test]
        fn each_state_change_is_traced_once() {
            let (seen, _guard) = capture();
            let mut c = coachmark();
            c.present(&screen(), Rect::new(100.0, 100.0, 40.0, 40.0), true);
            run(&mut c, 400);
            assert_eq!(c.state(), PresentationState::Visible);
            c.dismiss();
            c.dismiss();
            run(&mut c, 100);
            assert_eq!(c.state(), PresentationState::Hidden);

            let seen = seen.lock().expect("trace lock");
            let transitions = seen
                .events
                .iter()
                .filter(|m| *m == "coachmark.transition")
                .count();
            // Presenting, Visible, Dismissing, Hidden.
            assert_eq!(transitions, 4, "events: {:?}", seen.events);
            assert!(seen.spans.iter().any(|s| s == "snapshot_capture"));
        }

        #[test]
        fn paint_opens_render_span() {
            let mut c = coachmark();
            c.present(&screen(), Rect::new(100.0, 100.0, 40.0, 40.0), true);
            let (seen, _guard) = capture();
            let mut canvas = Canvas::new(Rect::from_size(400.0, 800.0), 1.0).unwrap();
            c.paint(&mut canvas, None);
            assert!(
                seen.lock()
                    .expect("trace lock")
                    .spans
                    .iter()
                    .any(|s| s == "widget_render")
            );
        }
    }
}
