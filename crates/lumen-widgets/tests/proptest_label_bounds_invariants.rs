//! Property-based invariant tests for the coach-mark layout pass.
//!
//! 1. The label frame lies inside the widget bounds after every layout pass.
//! 2. The label never overlaps the inner disc frame when a spotlight is shown.
//! 3. Layout is idempotent: a second pass changes nothing.
//! 4. The inner and outer frames share a center.
//! 5. Degenerate focus rects never panic.

use lumen_core::geometry::{Insets, Rect};
use lumen_render::{Canvas, PackedRgba, Surface};
use lumen_widgets::{Coachmark, CoachmarkConfig};
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

const TOLERANCE: f64 = 1e-6;

struct Blank(Rect);

impl Surface for Blank {
    fn bounds(&self) -> Rect {
        self.0
    }

    fn render(&self, canvas: &mut Canvas) {
        canvas.clear(PackedRgba::BLACK);
    }
}

fn widget_size() -> impl Strategy<Value = (f64, f64)> {
    (40.0f64..600.0, 40.0f64..900.0)
}

/// Focus rects that may straddle, or miss, any edge of the widget.
fn focus_in(w: f64, h: f64) -> impl Strategy<Value = Rect> {
    (-150.0..w, -150.0..h, 0.0f64..150.0, 0.0f64..150.0)
        .prop_map(|(x, y, fw, fh)| Rect::new(x, y, fw, fh))
}

fn insets() -> impl Strategy<Value = Insets> {
    (0.0f64..40.0, 0.0f64..40.0, 0.0f64..40.0, 0.0f64..40.0)
        .prop_map(|(t, l, b, r)| Insets::new(t, l, b, r))
}

fn text() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        Just("Tap".to_string()),
        "[a-z ]{1,120}",
    ]
}

fn scenario() -> impl Strategy<Value = (f64, f64, Rect, Insets, String, bool)> {
    widget_size().prop_flat_map(|(w, h)| {
        (
            Just(w),
            Just(h),
            focus_in(w, h),
            insets(),
            text(),
            any::<bool>(),
        )
    })
}

fn present(w: f64, h: f64, focus: Rect, insets: Insets, text: &str, spot: bool) -> Coachmark {
    let bounds = Rect::from_size(w, h);
    let config = CoachmarkConfig::default().text_insets(insets);
    let mut c = Coachmark::new(config).with_bounds(bounds).with_text(text);
    c.present(&Blank(bounds), focus, spot);
    c
}

// ═════════════════════════════════════════════════════════════════════════
// 1, 5. Label stays inside the widget
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn label_inside_bounds((w, h, focus, insets, text, spot) in scenario()) {
        let c = present(w, h, focus, insets, &text, spot);
        let frame = c.label().frame();
        prop_assert!(frame.width >= 0.0 && frame.height >= 0.0);
        prop_assert!(
            c.bounds().contains_rect(&frame, TOLERANCE),
            "label {:?} escapes bounds {:?}", frame, c.bounds()
        );
    }

    #[test]
    fn degenerate_focus_is_harmless(
        (w, h) in widget_size(),
        x in -1000.0f64..1000.0,
        y in -1000.0f64..1000.0,
    ) {
        let c = present(w, h, Rect::new(x, y, 0.0, 0.0), Insets::default(), "Hi", true);
        prop_assert!(c.inner().diameter() <= 0.0);
        prop_assert!(c.bounds().contains_rect(&c.label().frame(), TOLERANCE));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Label avoids the spotlight
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn label_clear_of_inner_disc((w, h, focus, insets, text, _) in scenario()) {
        let c = present(w, h, focus, insets, &text, true);
        prop_assume!(!c.inner().is_hidden());
        let label = c.label().frame();
        prop_assume!(!label.is_empty());
        let overlap = label.intersection(&c.inner().frame());
        prop_assert!(overlap.height <= TOLERANCE || overlap.is_empty());
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3-4. Idempotence and concentric discs
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn layout_is_idempotent((w, h, focus, insets, text, spot) in scenario()) {
        let mut c = present(w, h, focus, insets, &text, spot);
        let before = (c.outer().frame(), c.inner().frame(), c.label().frame(), c.outer().path().clone());
        c.recompute_layout();
        let after = (c.outer().frame(), c.inner().frame(), c.label().frame(), c.outer().path().clone());
        prop_assert_eq!(before, after);
    }

    #[test]
    fn discs_are_concentric((w, h, focus, _insets, _text, spot) in scenario()) {
        let c = present(w, h, focus, Insets::default(), "", spot);
        let a = c.outer().frame().center();
        let b = c.inner().frame().center();
        prop_assert!((a.x - b.x).abs() <= TOLERANCE && (a.y - b.y).abs() <= TOLERANCE);
    }
}
