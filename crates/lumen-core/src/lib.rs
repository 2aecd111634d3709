#![forbid(unsafe_code)]

//! Core: geometry, animation primitives, and input events.
//!
//! # Role in Lumen
//! `lumen-core` holds everything the focus overlay computes without touching
//! pixels: signed point-space rectangles, the layout helpers that place the
//! highlight disc and its text band, time-driven animations, and tap
//! recognition.
//!
//! # How it fits in the system
//! `lumen-render` draws paths and captures snapshots in the geometry defined
//! here; `lumen-widgets` composes both into the `Coachmark` overlay and drives
//! its animations with host-supplied time deltas.

pub mod animation;
pub mod event;
pub mod geometry;
pub mod gesture;
