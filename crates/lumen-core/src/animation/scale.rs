#![forbid(unsafe_code)]

//! Tagged scale transitions.
//!
//! A [`ScaleAnimation`] moves a scale factor from one value to another using
//! either a timed eased curve or a spring, and carries an [`AnimationTag`]
//! so that whoever receives its [`AnimationCompletion`] can tell an exit
//! animation apart from an entrance that happened to stop on the same layer.

use std::time::Duration;

use super::{Animation, Easing, Spring, SpringConfig, Tween};

/// Marker attached to an animation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AnimationTag {
    /// Presentation animation.
    Entrance,
    /// Exit animation whose completion ends the presentation cycle.
    Dismissal,
    /// Anything else.
    #[default]
    Other,
}

/// Report delivered when a scale animation stops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationCompletion {
    pub tag: AnimationTag,
    /// `true` when the animation ran to its end (or was forced there),
    /// `false` when another request replaced it mid-flight.
    pub finished: bool,
}

/// Timing curve of a scale animation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScaleCurve {
    /// Fixed duration with an easing curve.
    Timed { duration: Duration, easing: Easing },
    /// Physically modeled spring; runs until it settles.
    Spring(SpringConfig),
}

impl ScaleCurve {
    /// Timed curve with the default easing.
    pub fn timed(duration: Duration) -> Self {
        Self::Timed {
            duration,
            easing: Easing::default(),
        }
    }
}

impl Default for ScaleCurve {
    fn default() -> Self {
        Self::Spring(SpringConfig::default())
    }
}

#[derive(Debug, Clone)]
enum Motion {
    Timed(Tween),
    Spring(Spring),
}

/// Scale transition from `from` to `to`.
#[derive(Debug, Clone)]
pub struct ScaleAnimation {
    from: f64,
    to: f64,
    tag: AnimationTag,
    motion: Motion,
}

impl ScaleAnimation {
    #[must_use]
    pub fn new(from: f64, to: f64, curve: ScaleCurve, tag: AnimationTag) -> Self {
        let motion = match curve {
            ScaleCurve::Timed { duration, easing } => {
                Motion::Timed(Tween::new(from, to, duration).easing(easing))
            }
            ScaleCurve::Spring(config) => Motion::Spring(Spring::with_config(from, to, config)),
        };
        Self {
            from,
            to,
            tag,
            motion,
        }
    }

    #[inline]
    pub fn tag(&self) -> AnimationTag {
        self.tag
    }

    #[inline]
    pub fn from_scale(&self) -> f64 {
        self.from
    }

    #[inline]
    pub fn to_scale(&self) -> f64 {
        self.to
    }

    /// Current scale; may overshoot `to` while a spring oscillates.
    pub fn scale(&self) -> f64 {
        match &self.motion {
            Motion::Timed(tween) => tween.current(),
            Motion::Spring(spring) => spring.position(),
        }
    }

    /// Jump to the end value.
    pub fn finish(&mut self) {
        match &mut self.motion {
            Motion::Timed(tween) => tween.finish(),
            Motion::Spring(spring) => spring.settle(),
        }
    }

    /// Completion report for this animation.
    pub fn completion(&self, finished: bool) -> AnimationCompletion {
        AnimationCompletion {
            tag: self.tag,
            finished,
        }
    }
}

impl Animation for ScaleAnimation {
    fn tick(&mut self, dt: Duration) {
        match &mut self.motion {
            Motion::Timed(tween) => tween.tick(dt),
            Motion::Spring(spring) => spring.tick(dt),
        }
    }

    fn is_complete(&self) -> bool {
        match &self.motion {
            Motion::Timed(tween) => tween.is_complete(),
            Motion::Spring(spring) => spring.is_complete(),
        }
    }

    fn value(&self) -> f32 {
        match &self.motion {
            Motion::Timed(tween) => tween.value(),
            Motion::Spring(spring) => spring.value(),
        }
    }

    fn reset(&mut self) {
        match &mut self.motion {
            Motion::Timed(tween) => tween.reset(),
            Motion::Spring(spring) => spring.reset(),
        }
    }

    fn overshoot(&self) -> Duration {
        match &self.motion {
            Motion::Timed(tween) => tween.overshoot(),
            Motion::Spring(_) => Duration::ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS_16: Duration = Duration::from_millis(16);

    #[test]
    fn timed_scale_reaches_target() {
        let curve = ScaleCurve::timed(Duration::from_millis(200));
        let mut anim = ScaleAnimation::new(1.0, 0.0, curve, AnimationTag::Dismissal);
        assert_eq!(anim.scale(), 1.0);
        for _ in 0..13 {
            anim.tick(MS_16);
        }
        assert!(anim.is_complete());
        assert_eq!(anim.scale(), 0.0);
    }

    #[test]
    fn spring_scale_settles_on_target() {
        let mut anim = ScaleAnimation::new(0.0, 1.0, ScaleCurve::default(), AnimationTag::Entrance);
        for _ in 0..400 {
            anim.tick(MS_16);
        }
        assert!(anim.is_complete());
        assert_eq!(anim.scale(), 1.0);
    }

    #[test]
    fn finish_forces_end_value() {
        let mut anim = ScaleAnimation::new(0.0, 1.0, ScaleCurve::default(), AnimationTag::Entrance);
        anim.tick(MS_16);
        anim.finish();
        assert!(anim.is_complete());
        assert_eq!(anim.scale(), 1.0);
    }

    #[test]
    fn completion_carries_tag() {
        let anim = ScaleAnimation::new(
            1.0,
            0.0,
            ScaleCurve::timed(Duration::ZERO),
            AnimationTag::Dismissal,
        );
        assert_eq!(
            anim.completion(false),
            AnimationCompletion {
                tag: AnimationTag::Dismissal,
                finished: false
            }
        );
    }
}
