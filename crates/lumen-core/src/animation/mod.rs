#![forbid(unsafe_code)]

//! Time-driven animation primitives.
//!
//! Every animation is advanced explicitly with [`Animation::tick`]; nothing
//! here owns a clock. The host's event loop measures elapsed time and feeds
//! it in, which keeps the whole overlay deterministic under test.
//!
//! - [`Fade`] / [`Tween`]: fixed-duration eased progress.
//! - [`Spring`]: damped harmonic oscillator.
//! - [`ScaleAnimation`]: a tagged scale transition driven by either curve,
//!   reporting an [`AnimationCompletion`] when it stops.

pub mod fade;
pub mod scale;
pub mod spring;

use std::time::Duration;

pub use fade::{Fade, Tween};
pub use scale::{AnimationCompletion, AnimationTag, ScaleAnimation, ScaleCurve};
pub use spring::{Spring, SpringConfig};

/// A value that evolves over time.
pub trait Animation {
    /// Advance by `dt`.
    fn tick(&mut self, dt: Duration);

    /// Whether the animation has reached its end state.
    fn is_complete(&self) -> bool;

    /// Current normalized value, nominally in [0.0, 1.0].
    fn value(&self) -> f32;

    /// Return to the initial state.
    fn reset(&mut self);

    /// Time consumed past the end on the last tick.
    fn overshoot(&self) -> Duration {
        Duration::ZERO
    }
}

/// Easing curve applied to linear progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Easing {
    /// Linear interpolation.
    Linear,
    /// Cubic ease-in (accelerating).
    EaseIn,
    /// Cubic ease-out (decelerating).
    EaseOut,
    /// Cubic S-curve.
    #[default]
    EaseInOut,
}

impl Easing {
    /// Apply the curve to `t`, clamped to [0.0, 1.0].
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseIn => t * t * t,
            Self::EaseOut => {
                let inv = 1.0 - t;
                1.0 - inv * inv * inv
            }
            Self::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let inv = -2.0 * t + 2.0;
                    1.0 - inv * inv * inv / 2.0
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn easing_endpoints() {
        for easing in [
            Easing::Linear,
            Easing::EaseIn,
            Easing::EaseOut,
            Easing::EaseInOut,
        ] {
            assert_eq!(easing.apply(0.0), 0.0, "{easing:?}");
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-12, "{easing:?}");
        }
    }

    #[test]
    fn easing_clamps_input() {
        assert_eq!(Easing::Linear.apply(-1.0), 0.0);
        assert_eq!(Easing::Linear.apply(2.0), 1.0);
    }

    #[test]
    fn ease_in_out_is_symmetric() {
        let a = Easing::EaseInOut.apply(0.25);
        let b = Easing::EaseInOut.apply(0.75);
        assert!((a + b - 1.0).abs() < 1e-12);
    }
}
