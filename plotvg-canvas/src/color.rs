//! Backend-neutral drawing color.

use std::fmt;

/// A backend-neutral RGBA color with 8-bit, non-premultiplied components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// Opaque black, the initial drawing color of every canvas.
    pub const BLACK: Color = Color::from_rgba8(0, 0, 0, 0xff);
    /// Opaque white.
    pub const WHITE: Color = Color::from_rgba8(0xff, 0xff, 0xff, 0xff);
    /// Fully transparent black.
    pub const TRANSPARENT: Color = Color::from_rgba8(0, 0, 0, 0);

    /// Create a color from 8-bit RGBA components.
    pub const fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// CSS `rgb(...)` notation without alpha, used by the SVG backend.
    pub(crate) fn to_css_rgb(self) -> String {
        format!("rgb({},{},{})", self.r, self.g, self.b)
    }

    /// Alpha as a fraction in `0.0..=1.0`.
    pub(crate) fn opacity(self) -> f64 {
        f64::from(self.a) / 255.0
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

impl From<Color> for tiny_skia::Color {
    fn from(c: Color) -> Self {
        tiny_skia::Color::from_rgba8(c.r, c.g, c.b, c.a)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}
