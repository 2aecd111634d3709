#![forbid(unsafe_code)]

//! Appearance and timing configuration.

use std::time::Duration;

use lumen_core::animation::ScaleCurve;
use lumen_core::geometry::Insets;
use lumen_core::gesture::GestureConfig;
use lumen_render::PackedRgba;

use crate::label::TextMetrics;

/// Default timed animation length when no appearance delegate answers.
pub const DEFAULT_ANIMATION_DURATION: Duration = Duration::from_millis(200);

/// Configuration for a [`super::Coachmark`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CoachmarkConfig {
    /// Fill of the outer highlight disc.
    pub tint: PackedRgba,
    /// Fill of the inner disc behind the snapshot.
    pub spotlight_fill: PackedRgba,
    /// Outer disc diameter as a fraction of its frame.
    pub outer_scale_extent: f64,
    /// Inner disc diameter as a fraction of the focus square.
    pub inner_scale_extent: f64,
    /// Padding between the text band and the label.
    pub text_insets: Insets,
    pub text_color: PackedRgba,
    pub text_metrics: TextMetrics,
    /// Used when no appearance delegate is set.
    pub default_duration: Duration,
    /// Entrance curve of the outer disc.
    pub outer_curve: ScaleCurve,
    pub gesture: GestureConfig,
}

impl Default for CoachmarkConfig {
    fn default() -> Self {
        Self {
            tint: PackedRgba::rgba(0, 122, 255, 230),
            spotlight_fill: PackedRgba::WHITE,
            outer_scale_extent: 0.95,
            inner_scale_extent: 1.2,
            text_insets: Insets::new(10.0, 20.0, 10.0, 20.0),
            text_color: PackedRgba::WHITE,
            text_metrics: TextMetrics::default(),
            default_duration: DEFAULT_ANIMATION_DURATION,
            outer_curve: ScaleCurve::default(),
            gesture: GestureConfig::default(),
        }
    }
}

impl CoachmarkConfig {
    #[must_use]
    pub fn tint(mut self, tint: PackedRgba) -> Self {
        self.tint = tint;
        self
    }

    #[must_use]
    pub fn spotlight_fill(mut self, fill: PackedRgba) -> Self {
        self.spotlight_fill = fill;
        self
    }

    #[must_use]
    pub fn outer_scale_extent(mut self, ratio: f64) -> Self {
        self.outer_scale_extent = ratio;
        self
    }

    #[must_use]
    pub fn inner_scale_extent(mut self, ratio: f64) -> Self {
        self.inner_scale_extent = ratio;
        self
    }

    #[must_use]
    pub fn text_insets(mut self, insets: Insets) -> Self {
        self.text_insets = insets;
        self
    }

    #[must_use]
    pub fn text_color(mut self, color: PackedRgba) -> Self {
        self.text_color = color;
        self
    }

    #[must_use]
    pub fn text_metrics(mut self, metrics: TextMetrics) -> Self {
        self.text_metrics = metrics;
        self
    }

    #[must_use]
    pub fn default_duration(mut self, duration: Duration) -> Self {
        self.default_duration = duration;
        self
    }

    /// Entrance curve of the outer disc; [`ScaleCurve::timed`] disables the spring.
    #[must_use]
    pub fn outer_curve(mut self, curve: ScaleCurve) -> Self {
        self.outer_curve = curve;
        self
    }

    #[must_use]
    pub fn gesture(mut self, gesture: GestureConfig) -> Self {
        self.gesture = gesture;
        self
    }
}
