#![forbid(unsafe_code)]

//! Fixed-duration progress animations.

use std::time::Duration;

use super::{Animation, Easing};

/// Eased 0.0 → 1.0 progress over a fixed duration.
///
/// A zero duration completes on the first tick, not on construction, so a
/// completion observer always sees at least one frame.
#[derive(Debug, Clone)]
pub struct Fade {
    elapsed: Duration,
    duration: Duration,
    easing: Easing,
    overshoot: Duration,
    done: bool,
}

impl Fade {
    /// Create a fade lasting `duration` with linear easing.
    #[must_use]
    pub fn new(duration: Duration) -> Self {
        Self {
            elapsed: Duration::ZERO,
            duration,
            easing: Easing::Linear,
            overshoot: Duration::ZERO,
            done: false,
        }
    }

    /// Set the easing curve (builder pattern).
    #[must_use]
    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Total duration.
    #[inline]
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Time elapsed so far, capped at the duration.
    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Linear progress in [0.0, 1.0].
    pub fn progress(&self) -> f64 {
        if self.done {
            return 1.0;
        }
        if self.duration.is_zero() {
            return 0.0;
        }
        (self.elapsed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0)
    }

    /// Eased progress.
    pub fn eased(&self) -> f64 {
        self.easing.apply(self.progress())
    }

    /// Jump to the end.
    pub fn finish(&mut self) {
        self.elapsed = self.duration;
        self.done = true;
    }
}

impl Animation for Fade {
    fn tick(&mut self, dt: Duration) {
        if self.done {
            return;
        }
        let next = self.elapsed.saturating_add(dt);
        if next >= self.duration {
            self.overshoot = next - self.duration;
            self.elapsed = self.duration;
            self.done = true;
        } else {
            self.elapsed = next;
        }
    }

    fn is_complete(&self) -> bool {
        self.done
    }

    fn value(&self) -> f32 {
        self.eased() as f32
    }

    fn reset(&mut self) {
        self.elapsed = Duration::ZERO;
        self.overshoot = Duration::ZERO;
        self.done = false;
    }

    fn overshoot(&self) -> Duration {
        self.overshoot
    }
}

/// Interpolates a scalar between two endpoints along a [`Fade`].
#[derive(Debug, Clone)]
pub struct Tween {
    from: f64,
    to: f64,
    fade: Fade,
}

impl Tween {
    #[must_use]
    pub fn new(from: f64, to: f64, duration: Duration) -> Self {
        Self {
            from,
            to,
            fade: Fade::new(duration),
        }
    }

    /// Set the easing curve (builder pattern).
    #[must_use]
    pub fn easing(mut self, easing: Easing) -> Self {
        self.fade = self.fade.easing(easing);
        self
    }

    /// Start value.
    #[inline]
    pub fn start(&self) -> f64 {
        self.from
    }

    /// End value.
    #[inline]
    pub fn end(&self) -> f64 {
        self.to
    }

    /// Current interpolated value.
    pub fn current(&self) -> f64 {
        self.from + (self.to - self.from) * self.fade.eased()
    }

    /// Jump to the end value.
    pub fn finish(&mut self) {
        self.fade.finish();
    }
}

impl Animation for Tween {
    fn tick(&mut self, dt: Duration) {
        self.fade.tick(dt);
    }

    fn is_complete(&self) -> bool {
        self.fade.is_complete()
    }

    fn value(&self) -> f32 {
        self.fade.value()
    }

    fn reset(&mut self) {
        self.fade.reset();
    }

    fn overshoot(&self) -> Duration {
        self.fade.overshoot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS_50: Duration = Duration::from_millis(50);
    const MS_200: Duration = Duration::from_millis(200);

    #[test]
    fn fade_completes_after_duration() {
        let mut fade = Fade::new(MS_200);
        for _ in 0..3 {
            fade.tick(MS_50);
        }
        assert!(!fade.is_complete());
        fade.tick(MS_50);
        assert!(fade.is_complete());
        assert_eq!(fade.value(), 1.0);
    }

    #[test]
    fn fade_records_overshoot() {
        let mut fade = Fade::new(MS_50);
        fade.tick(Duration::from_millis(80));
        assert_eq!(fade.overshoot(), Duration::from_millis(30));
    }

    #[test]
    fn zero_duration_completes_on_first_tick() {
        let mut fade = Fade::new(Duration::ZERO);
        assert!(!fade.is_complete());
        assert_eq!(fade.progress(), 0.0);
        fade.tick(Duration::ZERO);
        assert!(fade.is_complete());
        assert_eq!(fade.progress(), 1.0);
    }

    #[test]
    fn reset_restarts() {
        let mut fade = Fade::new(MS_50);
        fade.tick(MS_200);
        fade.reset();
        assert!(!fade.is_complete());
        assert_eq!(fade.progress(), 0.0);
    }

    #[test]
    fn tween_interpolates_downward() {
        let mut tween = Tween::new(1.0, 0.0, MS_200);
        tween.tick(Duration::from_millis(100));
        assert!((tween.current() - 0.5).abs() < 1e-9);
        tween.tick(Duration::from_millis(100));
        assert_eq!(tween.current(), 0.0);
    }

    #[test]
    fn tween_finish_jumps_to_end() {
        let mut tween = Tween::new(0.0, 1.0, MS_200).easing(Easing::EaseOut);
        tween.finish();
        assert!(tween.is_complete());
        assert_eq!(tween.current(), 1.0);
    }
}
