#![forbid(unsafe_code)]

//! Raster render target in point space.
//!
//! A [`Canvas`] wraps a [`tiny_skia::Pixmap`] whose pixel grid covers a
//! point-space rectangle at a fixed pixel density (`scale` pixels per
//! point). Drawing calls take point-space geometry and an optional extra
//! point-space [`Transform`]; the canvas prepends its own point-to-pixel
//! mapping. Fills are anti-aliased and clipped to the pixmap.

use image::{Rgba, RgbaImage};
use lumen_core::geometry::{Point, Rect};
use tiny_skia::{
    FillRule, FilterQuality, IntSize, Paint, Pixmap, PixmapPaint, PremultipliedColorU8, Transform,
};

use crate::color::PackedRgba;
use crate::path::Path;

/// Largest pixel buffer a canvas will allocate (bytes).
const MAX_CANVAS_BYTES: u64 = 1 << 30;

/// Reasons a canvas cannot be allocated.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CanvasError {
    #[error("canvas has zero width or height ({width}x{height} px)")]
    ZeroDimension { width: u64, height: u64 },

    #[error("canvas of {width}x{height} px exceeds the allocation limit")]
    TooLarge { width: u64, height: u64 },

    #[error("pixel density must be positive and finite, got {0}")]
    InvalidScale(f64),
}

/// Off-screen RGBA render target.
#[derive(Debug, Clone)]
pub struct Canvas {
    pixmap: Pixmap,
    origin: Point,
    scale: f64,
}

impl Canvas {
    /// Allocate a transparent canvas covering `area` at `scale` pixels per point.
    pub fn new(area: Rect, scale: f64) -> Result<Self, CanvasError> {
        if !(scale.is_finite() && scale > 0.0) {
            return Err(CanvasError::InvalidScale(scale));
        }

        let width = (area.width.max(0.0) * scale).ceil();
        let height = (area.height.max(0.0) * scale).ceil();
        if !(width.is_finite() && height.is_finite()) {
            return Err(CanvasError::TooLarge {
                width: u64::MAX,
                height: u64::MAX,
            });
        }
        let (width, height) = (width as u64, height as u64);
        if width == 0 || height == 0 {
            return Err(CanvasError::ZeroDimension { width, height });
        }
        let too_large = width
            .checked_mul(height)
            .and_then(|px| px.checked_mul(4))
            .is_none_or(|bytes| bytes > MAX_CANVAS_BYTES);
        if too_large || width > u32::MAX as u64 || height > u32::MAX as u64 {
            return Err(CanvasError::TooLarge { width, height });
        }

        let pixmap =
            Pixmap::new(width as u32, height as u32).ok_or(CanvasError::TooLarge { width, height })?;
        Ok(Self {
            pixmap,
            origin: area.origin(),
            scale,
        })
    }

    /// Pixels per point.
    #[inline]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Point-space area covered by the pixel grid.
    pub fn area(&self) -> Rect {
        Rect::new(
            self.origin.x,
            self.origin.y,
            self.pixmap.width() as f64 / self.scale,
            self.pixmap.height() as f64 / self.scale,
        )
    }

    /// Width and height in pixels.
    pub fn pixel_size(&self) -> (u32, u32) {
        (self.pixmap.width(), self.pixmap.height())
    }

    /// Premultiplied pixel storage.
    #[inline]
    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    /// Point-to-pixel mapping applied to every drawing call.
    pub fn transform(&self) -> Transform {
        let s = self.scale as f32;
        Transform::from_row(
            s,
            0.0,
            0.0,
            s,
            (-self.origin.x * self.scale) as f32,
            (-self.origin.y * self.scale) as f32,
        )
    }

    /// Straight-alpha copy of the pixels.
    pub fn into_image(self) -> RgbaImage {
        let pixmap = self.pixmap;
        RgbaImage::from_fn(pixmap.width(), pixmap.height(), |x, y| {
            let color = pixmap
                .pixel(x, y)
                .map_or(PackedRgba::TRANSPARENT, PackedRgba::from);
            Rgba(color.to_array())
        })
    }

    /// Pixel at integer pixel coordinates.
    pub fn pixel(&self, px: u32, py: u32) -> Option<PackedRgba> {
        self.pixmap.pixel(px, py).map(PackedRgba::from)
    }

    /// Pixel under a point-space location.
    pub fn pixel_at(&self, point: Point) -> Option<PackedRgba> {
        let px = (point.x - self.origin.x) * self.scale;
        let py = (point.y - self.origin.y) * self.scale;
        if px < 0.0 || py < 0.0 {
            return None;
        }
        self.pixel(px.floor() as u32, py.floor() as u32)
    }

    /// Overwrite every pixel.
    pub fn clear(&mut self, color: PackedRgba) {
        self.pixmap.fill(color.into());
    }

    /// Blend `color` over a rectangle.
    pub fn fill_rect(&mut self, rect: Rect, color: PackedRgba) {
        let Some(rect) = tiny_skia::Rect::from_xywh(
            rect.x as f32,
            rect.y as f32,
            rect.width as f32,
            rect.height as f32,
        ) else {
            return;
        };
        let transform = self.transform();
        self.pixmap.fill_rect(rect, &paint(color), transform, None);
    }

    /// Blend `color` over the nonzero interior of `path`.
    pub fn fill_path(&mut self, path: &Path, color: PackedRgba) {
        self.fill_path_with(path, color, Transform::identity());
    }

    /// [`Self::fill_path`] with `transform` applied in point space first.
    pub fn fill_path_with(&mut self, path: &Path, color: PackedRgba, transform: Transform) {
        if color.a() == 0 {
            return;
        }
        let Some(path) = path.to_skia() else {
            return;
        };
        let transform = self.transform().pre_concat(transform);
        self.pixmap
            .fill_path(&path, &paint(color), FillRule::Winding, transform, None);
    }

    /// Draw `src` stretched into `dest` (nearest neighbour) at `opacity`.
    pub fn draw_image(&mut self, src: &RgbaImage, dest: Rect, opacity: f64) {
        if dest.is_empty() || opacity <= 0.0 {
            return;
        }
        let Some(src) = pixmap_from_image(src) else {
            return;
        };
        let paint = PixmapPaint {
            opacity: opacity.clamp(0.0, 1.0) as f32,
            quality: FilterQuality::Nearest,
            ..PixmapPaint::default()
        };
        let transform = self
            .transform()
            .pre_translate(dest.x as f32, dest.y as f32)
            .pre_scale(
                (dest.width / src.width() as f64) as f32,
                (dest.height / src.height() as f64) as f32,
            );
        self.pixmap
            .draw_pixmap(0, 0, src.as_ref(), &paint, transform, None);
    }
}

fn paint(color: PackedRgba) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color(color.into());
    paint.anti_alias = true;
    paint
}

/// Premultiplied copy of a straight-alpha image; `None` when it is empty.
fn pixmap_from_image(src: &RgbaImage) -> Option<Pixmap> {
    let size = IntSize::from_wh(src.width(), src.height())?;
    let data = src
        .pixels()
        .flat_map(|p| {
            let c = PremultipliedColorU8::from(PackedRgba::from_array(p.0));
            [c.red(), c.green(), c.blue(), c.alpha()]
        })
        .collect();
    Pixmap::from_vec(data, size)
}
