#![forbid(unsafe_code)]

//! Damped harmonic oscillator (spring) animation.
//!
//! Drives the highlight disc's entrance so it overshoots slightly and
//! settles, instead of stopping dead at full size:
//!
//!   F = -stiffness × (position - target) - damping × velocity
//!
//! # Parameters
//!
//! - **stiffness** (k): restoring force strength.
//! - **damping** (c): velocity drag. Below `2√k` the spring oscillates past
//!   the target before settling.
//! - **initial_velocity**: launch velocity in units of the total travel
//!   distance per second, so `5.0` means "five full distances per second"
//!   regardless of the endpoints.
//!
//! # Invariants
//!
//! 1. `position()` is unclamped; scale animations rely on the overshoot.
//! 2. A spring at rest stays at rest until `set_target()` or `reset()`.
//! 3. Stiffness is always at least [`MIN_STIFFNESS`], damping never negative.
//!
//! # Failure Modes
//!
//! - Large dt: capped at 100ms per call, then subdivided into steps of at
//!   most 4ms for stability. A stalled host resumes where it left off.
//! - Zero damping: the spring never comes to rest. Not rejected, but the
//!   owning animation will never report completion.

use std::time::Duration;

use super::Animation;

/// Maximum dt per integration step (4ms).
const MAX_STEP_SECS: f64 = 0.004;

/// Maximum dt honored by a single [`Spring::advance`] call (100ms).
const MAX_FRAME_SECS: f64 = 0.1;

/// Position delta (relative to travel distance) below which the spring may rest.
const DEFAULT_REST_THRESHOLD: f64 = 0.001;

/// Velocity (relative to travel distance) below which the spring may rest.
const DEFAULT_VELOCITY_THRESHOLD: f64 = 0.01;

/// Minimum stiffness to prevent degenerate springs.
pub const MIN_STIFFNESS: f64 = 0.1;

/// Physical parameters of a [`Spring`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpringConfig {
    pub stiffness: f64,
    pub damping: f64,
    pub initial_velocity: f64,
}

impl Default for SpringConfig {
    /// Unit mass, stiffness 100, damping 8, launched at 5 distances/second.
    fn default() -> Self {
        Self {
            stiffness: 100.0,
            damping: 8.0,
            initial_velocity: 5.0,
        }
    }
}

impl SpringConfig {
    /// Set stiffness (builder pattern).
    #[must_use]
    pub fn stiffness(mut self, k: f64) -> Self {
        self.stiffness = k;
        self
    }

    /// Set damping (builder pattern).
    #[must_use]
    pub fn damping(mut self, c: f64) -> Self {
        self.damping = c;
        self
    }

    /// Set the initial velocity (builder pattern).
    #[must_use]
    pub fn initial_velocity(mut self, v: f64) -> Self {
        self.initial_velocity = v;
        self
    }

    /// Damping at which the spring converges without oscillating.
    #[must_use]
    pub fn critical_damping(&self) -> f64 {
        2.0 * self.stiffness.max(MIN_STIFFNESS).sqrt()
    }
}

/// A damped harmonic oscillator producing physically-based motion.
#[derive(Debug, Clone)]
pub struct Spring {
    position: f64,
    velocity: f64,
    target: f64,
    initial: f64,
    initial_velocity: f64,
    stiffness: f64,
    damping: f64,
    rest_threshold: f64,
    velocity_threshold: f64,
    at_rest: bool,
}

impl Spring {
    /// Create a spring starting at `initial` and targeting `target` with
    /// [`SpringConfig::default`] parameters.
    #[must_use]
    pub fn new(initial: f64, target: f64) -> Self {
        Self::with_config(initial, target, SpringConfig::default())
    }

    /// Create a spring from explicit parameters.
    #[must_use]
    pub fn with_config(initial: f64, target: f64, config: SpringConfig) -> Self {
        let distance = (target - initial).abs().max(f64::EPSILON);
        let initial_velocity = config.initial_velocity * (target - initial);
        Self {
            position: initial,
            velocity: initial_velocity,
            target,
            initial,
            initial_velocity,
            stiffness: config.stiffness.max(MIN_STIFFNESS),
            damping: config.damping.max(0.0),
            rest_threshold: DEFAULT_REST_THRESHOLD * distance,
            velocity_threshold: DEFAULT_VELOCITY_THRESHOLD * distance,
            at_rest: false,
        }
    }

    /// Current position (unclamped).
    #[inline]
    #[must_use]
    pub fn position(&self) -> f64 {
        self.position
    }

    /// Current velocity.
    #[inline]
    #[must_use]
    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    /// Current target.
    #[inline]
    #[must_use]
    pub fn target(&self) -> f64 {
        self.target
    }

    /// Whether the spring has settled at the target.
    #[inline]
    #[must_use]
    pub fn is_at_rest(&self) -> bool {
        self.at_rest
    }

    /// Change the target. Wakes the spring if it was at rest.
    pub fn set_target(&mut self, target: f64) {
        if (self.target - target).abs() > self.rest_threshold {
            self.target = target;
            self.at_rest = false;
        }
    }

    /// Snap to the target and stop.
    pub fn settle(&mut self) {
        self.position = self.target;
        self.velocity = 0.0;
        self.at_rest = true;
    }

    /// Single semi-implicit Euler step of `dt` seconds.
    fn step(&mut self, dt: f64) {
        let displacement = self.position - self.target;
        let acceleration = -self.stiffness * displacement - self.damping * self.velocity;

        self.velocity += acceleration * dt;
        self.position += self.velocity * dt;
    }

    /// Advance the spring by `dt` (capped at 100ms), subdividing if
    /// necessary for stability.
    pub fn advance(&mut self, dt: Duration) {
        if self.at_rest {
            return;
        }

        let mut remaining = dt.as_secs_f64().min(MAX_FRAME_SECS);
        while remaining > 0.0 {
            let step_dt = remaining.min(MAX_STEP_SECS);
            self.step(step_dt);
            remaining -= step_dt;
        }

        let pos_delta = (self.position - self.target).abs();
        if pos_delta < self.rest_threshold && self.velocity.abs() < self.velocity_threshold {
            self.settle();
        }
    }
}

impl Animation for Spring {
    fn tick(&mut self, dt: Duration) {
        self.advance(dt);
    }

    fn is_complete(&self) -> bool {
        self.at_rest
    }

    /// Progress from the initial position toward the target, clamped to [0.0, 1.0].
    fn value(&self) -> f32 {
        let span = self.target - self.initial;
        if span.abs() < f64::EPSILON {
            return 1.0;
        }
        (((self.position - self.initial) / span) as f32).clamp(0.0, 1.0)
    }

    fn reset(&mut self) {
        self.position = self.initial;
        self.velocity = self.initial_velocity;
        self.at_rest = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS_16: Duration = Duration::from_millis(16);

    fn simulate(spring: &mut Spring, frames: usize) {
        for _ in 0..frames {
            spring.tick(MS_16);
        }
    }

    #[test]
    fn spring_reaches_target() {
        let mut spring = Spring::new(0.0, 1.0);
        simulate(&mut spring, 300);
        assert!(spring.is_complete(), "position: {}", spring.position());
        assert_eq!(spring.position(), 1.0);
    }

    #[test]
    fn default_spring_overshoots() {
        let mut spring = Spring::new(0.0, 1.0);
        let mut max_pos = 0.0_f64;
        for _ in 0..120 {
            spring.tick(MS_16);
            max_pos = max_pos.max(spring.position());
        }
        assert!(max_pos > 1.05, "expected visible bounce, got {max_pos}");
    }

    #[test]
    fn critical_spring_barely_overshoots() {
        let base = SpringConfig::default().initial_velocity(0.0);
        let config = base.damping(base.critical_damping());
        let mut spring = Spring::with_config(0.0, 1.0, config);
        let mut max_pos = 0.0_f64;
        for _ in 0..300 {
            spring.tick(MS_16);
            max_pos = max_pos.max(spring.position());
        }
        assert!(max_pos < 1.01, "got {max_pos}");
    }

    #[test]
    fn zero_travel_rests_immediately() {
        let mut spring = Spring::new(1.0, 1.0);
        spring.tick(MS_16);
        assert!(spring.is_complete());
    }

    #[test]
    fn large_dt_is_stable() {
        let mut spring = Spring::with_config(0.0, 1.0, SpringConfig::default().stiffness(1000.0));
        for _ in 0..50 {
            spring.tick(Duration::from_secs(5));
        }
        assert!(spring.position().is_finite());
        assert!((spring.position() - 1.0).abs() < 0.01);
    }

    #[test]
    fn stalled_frame_is_capped() {
        let mut stalled = Spring::new(0.0, 1.0);
        let mut capped = Spring::new(0.0, 1.0);
        stalled.tick(Duration::from_secs(3600));
        capped.tick(Duration::from_millis(100));
        assert_eq!(stalled.position(), capped.position());
        assert_eq!(stalled.velocity(), capped.velocity());
    }

    #[test]
    fn reset_restores_launch_state() {
        let mut spring = Spring::new(0.0, 1.0);
        simulate(&mut spring, 20);
        spring.reset();
        assert_eq!(spring.position(), 0.0);
        assert_eq!(spring.velocity(), 5.0);
        assert!(!spring.is_complete());
    }

    #[test]
    fn value_tracks_downward_travel() {
        let mut spring = Spring::new(1.0, 0.0);
        assert_eq!(spring.value(), 0.0);
        simulate(&mut spring, 400);
        assert_eq!(spring.value(), 1.0);
    }

    #[test]
    fn stiffness_is_clamped() {
        let spring = Spring::with_config(0.0, 1.0, SpringConfig::default().stiffness(0.0));
        assert!(spring.stiffness >= MIN_STIFFNESS);
    }
}
