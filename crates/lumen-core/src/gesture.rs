#![forbid(unsafe_code)]

//! Single-tap recognition.
//!
//! [`TapRecognizer`] turns a press/release pair of the primary button into a
//! [`Tap`]. Drags and long presses are not recognized; a press that travels
//! farther than the drag threshold simply never becomes a tap.
//!
//! # Invariants
//!
//! 1. At most one `Tap` per press.
//! 2. A release without a matching press emits nothing.
//! 3. After `reset()` the recognizer is idle.

use crate::event::{Event, MouseButton, MouseEventKind};
use crate::geometry::Point;

/// Thresholds for tap recognition.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GestureConfig {
    /// Maximum pointer travel (points, manhattan) between press and release.
    pub drag_threshold: f64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            drag_threshold: 10.0,
        }
    }
}

/// A recognized single tap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tap {
    pub position: Point,
}

/// Stateful single-tap recognizer.
#[derive(Debug, Clone, Default)]
pub struct TapRecognizer {
    config: GestureConfig,
    pressed_at: Option<Point>,
}

impl TapRecognizer {
    #[must_use]
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            pressed_at: None,
        }
    }

    /// Feed one event; returns a tap when a press completes in place.
    pub fn process(&mut self, event: &Event) -> Option<Tap> {
        let Event::Mouse(mouse) = event else {
            return None;
        };

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.pressed_at = Some(mouse.position);
                None
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                if let Some(start) = self.pressed_at
                    && self.exceeds_threshold(start, mouse.position)
                {
                    self.pressed_at = None;
                }
                None
            }
            MouseEventKind::Up(MouseButton::Left) => {
                let start = self.pressed_at.take()?;
                if self.exceeds_threshold(start, mouse.position) {
                    None
                } else {
                    Some(Tap {
                        position: mouse.position,
                    })
                }
            }
            _ => None,
        }
    }

    /// Whether a press is being tracked.
    pub fn is_tracking(&self) -> bool {
        self.pressed_at.is_some()
    }

    /// Drop any tracked press.
    pub fn reset(&mut self) {
        self.pressed_at = None;
    }

    fn exceeds_threshold(&self, a: Point, b: Point) -> bool {
        (a.x - b.x).abs() + (a.y - b.y).abs() > self.config.drag_threshold
    }
}
