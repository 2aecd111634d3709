#![forbid(unsafe_code)]

//! Observer contracts for a [`Coachmark`].
//!
//! The coachmark keeps only [`std::rc::Weak`] references to its delegates; a
//! dropped delegate is treated as absent.

use std::time::Duration;

use super::Coachmark;

/// Supplies animation timing.
pub trait CoachmarkAppearanceDelegate {
    /// Duration of the timed presentation and dismissal animations.
    fn animation_duration(&self, coachmark: &Coachmark) -> Duration;
}

/// Receives lifecycle notifications.
pub trait CoachmarkDelegate {
    /// Called once per dismissal, after the overlay has hidden itself.
    fn coachmark_did_complete(&self, coachmark: &Coachmark);
}
