#![forbid(unsafe_code)]

//! Packed straight-alpha RGBA colors and their tiny-skia conversions.

use tiny_skia::{Color, ColorU8, PremultipliedColorU8};

/// A color packed as `0xRRGGBBAA`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PackedRgba(pub u32);

impl PackedRgba {
    pub const TRANSPARENT: PackedRgba = PackedRgba::rgba(0, 0, 0, 0);
    pub const BLACK: PackedRgba = PackedRgba::rgb(0, 0, 0);
    pub const WHITE: PackedRgba = PackedRgba::rgb(255, 255, 255);

    /// Opaque color.
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    #[inline]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self(((r as u32) << 24) | ((g as u32) << 16) | ((b as u32) << 8) | a as u32)
    }

    #[inline]
    pub const fn r(self) -> u8 {
        (self.0 >> 24) as u8
    }

    #[inline]
    pub const fn g(self) -> u8 {
        (self.0 >> 16) as u8
    }

    #[inline]
    pub const fn b(self) -> u8 {
        (self.0 >> 8) as u8
    }

    #[inline]
    pub const fn a(self) -> u8 {
        self.0 as u8
    }

    /// Same color with alpha multiplied by `opacity` (clamped to [0, 1]).
    pub fn with_opacity(self, opacity: f64) -> Self {
        let a = (self.a() as f64 * opacity.clamp(0.0, 1.0)).round() as u8;
        Self::rgba(self.r(), self.g(), self.b(), a)
    }

    /// Channels as `[r, g, b, a]`.
    #[inline]
    pub const fn to_array(self) -> [u8; 4] {
        [self.r(), self.g(), self.b(), self.a()]
    }

    #[inline]
    pub const fn from_array([r, g, b, a]: [u8; 4]) -> Self {
        Self::rgba(r, g, b, a)
    }
}

impl From<PackedRgba> for Color {
    fn from(c: PackedRgba) -> Self {
        Color::from_rgba8(c.r(), c.g(), c.b(), c.a())
    }
}

impl From<PackedRgba> for PremultipliedColorU8 {
    fn from(c: PackedRgba) -> Self {
        ColorU8::from_rgba(c.r(), c.g(), c.b(), c.a()).premultiply()
    }
}

impl From<PremultipliedColorU8> for PackedRgba {
    fn from(p: PremultipliedColorU8) -> Self {
        let c = p.demultiply();
        PackedRgba::rgba(c.red(), c.green(), c.blue(), c.alpha())
    }
}
