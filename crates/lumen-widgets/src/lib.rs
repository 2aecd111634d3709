#![forbid(unsafe_code)]

//! Widgets: the circular mask, the text label, and the coach-mark overlay.
//!
//! # Role in Lumen
//! `lumen-widgets` composes the geometry and animation primitives of
//! `lumen-core` with the paths and snapshots of `lumen-render` into the
//! [`Coachmark`] focus overlay.
//!
//! # Primary responsibilities
//! - **CircularMask**: animated disc with a single tagged animation slot.
//! - **TextLabel**: word-wrapped text with natural sizing.
//! - **Coachmark**: presentation state machine, layout pass, scene painting.
//!
//! # How it fits in the system
//! The host owns the event loop. It forwards input through
//! [`Coachmark::handle_event`], advances time with [`Coachmark::tick`], and
//! draws with [`Coachmark::paint`] into a `lumen_render::Canvas`.

pub mod circular_mask;
pub mod coachmark;
pub mod label;

pub use circular_mask::{CircularMask, PathCustomizer};
pub use coachmark::{
    Coachmark, CoachmarkAppearanceDelegate, CoachmarkConfig, CoachmarkDelegate, CutoutFn,
    PresentationState,
};
pub use label::{GlyphPainter, TextLabel, TextMetrics};
