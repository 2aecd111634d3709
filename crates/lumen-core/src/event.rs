#![forbid(unsafe_code)]

//! Canonical input events delivered by the host.

use crate::geometry::{Point, Size};

/// An input event in host point space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    /// Pointer activity.
    Mouse(MouseEvent),
    /// The overlay's container changed size.
    Resize(Size),
}

/// Pointer event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseEvent {
    pub kind: MouseEventKind,
    pub position: Point,
}

impl MouseEvent {
    pub const fn new(kind: MouseEventKind, position: Point) -> Self {
        Self { kind, position }
    }
}

/// What the pointer did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseEventKind {
    Down(MouseButton),
    Up(MouseButton),
    Drag(MouseButton),
    Moved,
}

/// Pointer button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}
