#![forbid(unsafe_code)]

//! Render layer: colors, paths, a raster canvas, and region snapshots.
//!
//! # Role in Lumen
//! `lumen-render` turns point-space geometry into pixels. It owns the
//! vector [`path::Path`] model used for the highlight disc and its cutout,
//! the off-screen [`canvas::Canvas`] those paths are filled into, and the
//! [`snapshot`] capturer that freezes part of a host [`snapshot::Surface`].
//!
//! # Primary responsibilities
//! - **PackedRgba**: straight-alpha colors, converted to tiny-skia's
//!   premultiplied form at the drawing boundary.
//! - **Path**: rounded-rect sub-paths with winding, emitted as
//!   `tiny_skia::Path` contours and filled with the nonzero rule.
//! - **Canvas**: anti-aliased `tiny_skia::Pixmap` target with
//!   point-to-pixel scaling.
//! - **Snapshot**: render a surface, crop to a rectangle, keep scale metadata.
//!
//! # How it fits in the system
//! `lumen-widgets` builds mask paths here, paints the overlay scene into a
//! `Canvas`, and asks the capturer for the snapshot shown inside the focus
//! disc.

pub mod canvas;
pub mod color;
pub mod path;
pub mod snapshot;

pub use canvas::{Canvas, CanvasError};
pub use color::PackedRgba;
pub use path::{Path, SubPath, Winding};
pub use snapshot::{Orientation, Snapshot, SnapshotError, Surface, capture, try_capture};
pub use tiny_skia::Transform;
