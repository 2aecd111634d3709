#![forbid(unsafe_code)]

//! Region snapshots of a host surface.
//!
//! [`capture`] renders the whole [`Surface`] into an off-screen [`Canvas`] at
//! the surface's pixel density, then crops the pixels under the requested
//! rectangle. The canvas is an owned temporary, released on every path out of
//! the function.

use std::io::Cursor;

use image::{ImageFormat, RgbaImage, imageops};
use lumen_core::geometry::Rect;

use crate::canvas::{Canvas, CanvasError};

/// Orientation metadata carried alongside a captured image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    #[default]
    Up,
    Down,
    Left,
    Right,
    UpMirrored,
    DownMirrored,
    LeftMirrored,
    RightMirrored,
}

/// Something that can draw itself into a [`Canvas`].
///
/// `bounds` is the surface's extent in its own point space; the canvas
/// handed to `render` covers exactly that extent.
pub trait Surface {
    fn bounds(&self) -> Rect;

    /// Pixels per point.
    fn scale(&self) -> f64 {
        1.0
    }

    fn orientation(&self) -> Orientation {
        Orientation::Up
    }

    fn render(&self, canvas: &mut Canvas);
}

/// An immutable cropped raster of a surface region.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    image: RgbaImage,
    scale: f64,
    orientation: Orientation,
}

impl Snapshot {
    pub fn new(image: RgbaImage, scale: f64, orientation: Orientation) -> Self {
        Self {
            image,
            scale,
            orientation,
        }
    }

    #[inline]
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    #[inline]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    #[inline]
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Width and height in pixels.
    pub fn pixel_size(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    /// Encode the snapshot as PNG bytes.
    pub fn to_png_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
        let mut bytes = Vec::new();
        self.image
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .map_err(|e| SnapshotError::EncodingFailed(e.to_string()))?;
        Ok(bytes)
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SnapshotError {
    #[error("snapshot region has zero width or height")]
    ZeroDimension,

    #[error("off-screen canvas could not be allocated: {0}")]
    Allocation(#[from] CanvasError),

    #[error(
        "crop rectangle ({},{},{},{}) exceeds rendered image ({}x{})",
        requested.0, requested.1, requested.2, requested.3,
        image_size.0, image_size.1
    )]
    OutOfBounds {
        requested: (u32, u32, u32, u32),
        image_size: (u32, u32),
    },

    #[error("PNG encoding failed: {0}")]
    EncodingFailed(String),
}

/// Capture the pixels of `surface` under `rect`.
///
/// `rect` is clipped to the surface bounds first; an empty clip is a
/// [`SnapshotError::ZeroDimension`].
pub fn capture(surface: &dyn Surface, rect: Rect) -> Result<Snapshot, SnapshotError> {
    let bounds = surface.bounds();
    let scale = surface.scale();

    #[cfg(feature = "tracing")]
    let _span = tracing::debug_span!(
        "snapshot_capture",
        x = rect.x,
        y = rect.y,
        w = rect.width,
        h = rect.height,
        scale
    )
    .entered();

    let clipped = rect
        .intersection_opt(&bounds)
        .ok_or(SnapshotError::ZeroDimension)?;

    let mut canvas = Canvas::new(bounds, scale)?;
    surface.render(&mut canvas);
    let full = canvas.into_image();

    let px = clipped
        .offset(-bounds.x, -bounds.y)
        .scale(scale)
        .integral();
    let (x, y) = (px.x.max(0.0) as u32, px.y.max(0.0) as u32);
    let (width, height) = (px.width as u32, px.height as u32);
    if width == 0 || height == 0 {
        return Err(SnapshotError::ZeroDimension);
    }

    // Rounding outward can overshoot the canvas by a pixel; trim it.
    let width = width.min(full.width().saturating_sub(x));
    let height = height.min(full.height().saturating_sub(y));
    if width == 0 || height == 0 {
        return Err(SnapshotError::OutOfBounds {
            requested: (x, y, px.width as u32, px.height as u32),
            image_size: full.dimensions(),
        });
    }

    let cropped = imageops::crop_imm(&full, x, y, width, height).to_image();

    #[cfg(feature = "tracing")]
    tracing::debug!(width, height, "snapshot captured");

    Ok(Snapshot::new(cropped, scale, surface.orientation()))
}

/// [`capture`], discarding the error.
pub fn try_capture(surface: &dyn Surface, rect: Rect) -> Option<Snapshot> {
    capture(surface, rect).ok()
}
