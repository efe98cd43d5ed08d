//! Raster canvas backed by a tiny-skia pixmap.

mod drawing;
mod image_ops;
mod text_rendering;

use crate::canvas::{Canvas, CanvasSizer};
use crate::color::Color;
use crate::drawing_state::DrawingState;
use crate::error::{CanvasError, CanvasResult};
use crate::font::{Font, FontRegistry};
use crate::geometry::{Point, Rectangle};
use crate::path::Path;
use crate::units::Length;
use image::DynamicImage;
use std::sync::Arc;
use tiny_skia::{Pixmap, Transform};

/// Maximum canvas dimension in device pixels.
const MAX_DIMENSION: u32 = 32767;

/// Resolution used when none is given.
pub const DEFAULT_DPI: f64 = 96.0;

/// A canvas drawing into an in-memory RGBA pixmap.
pub struct ImageCanvas {
    /// Width of the pixmap in pixels.
    pub(crate) width: u32,
    /// Height of the pixmap in pixels.
    pub(crate) height: u32,
    dpi: f64,
    size: (Length, Length),
    /// Pixel buffer (premultiplied alpha).
    pub(crate) pixmap: Pixmap,
    pub(crate) fonts: Arc<FontRegistry>,
    /// Current drawing state.
    pub(crate) state: DrawingState,
    /// Stack of saved drawing states.
    state_stack: Vec<DrawingState>,
}

impl ImageCanvas {
    /// Create a transparent canvas of the given page size, rasterized at `dpi`.
    pub fn new(
        width: Length,
        height: Length,
        dpi: f64,
        fonts: Arc<FontRegistry>,
    ) -> CanvasResult<Self> {
        let px = |l: Length| {
            let d = l.dots(dpi).ceil();
            if d.is_finite() && d > 0.0 && d <= f64::from(MAX_DIMENSION) {
                d as u32
            } else {
                0
            }
        };
        let (w, h) = (px(width), px(height));

        // Validate dimensions
        if w == 0 || h == 0 {
            return Err(CanvasError::InvalidDimensions {
                width: w,
                height: h,
            });
        }
        let pixmap = Pixmap::new(w, h).ok_or(CanvasError::InvalidDimensions {
            width: w,
            height: h,
        })?;

        // y-up points to y-down pixels
        let s = (dpi / Length::INCH.0) as f32;
        let base = Transform::from_row(s, 0.0, 0.0, -s, 0.0, h as f32);

        log::debug!(target: "canvas", "image canvas {}x{} px at {} dpi", w, h, dpi);
        Ok(Self {
            width: w,
            height: h,
            dpi,
            size: (width, height),
            pixmap,
            fonts,
            state: DrawingState::with_transform(base),
            state_stack: Vec::new(),
        })
    }

    /// Get canvas width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get canvas height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Resolution in dots per inch.
    pub fn dpi(&self) -> f64 {
        self.dpi
    }

    /// Fill the whole canvas with `color`, ignoring the current transform.
    pub fn clear(&mut self, color: Color) {
        self.pixmap.fill(color.into());
    }
}

impl Canvas for ImageCanvas {
    fn set_line_width(&mut self, width: Length) {
        log::debug!(target: "canvas", "lineWidth {}", width);
        self.state.line_width = width.0 as f32;
    }

    fn set_line_dash(&mut self, pattern: &[Length], offset: Length) {
        log::debug!(target: "canvas", "lineDash {:?} {}", pattern, offset);
        self.state.set_line_dash(pattern, offset);
    }

    fn set_color(&mut self, color: Color) {
        log::debug!(target: "canvas", "color {}", color);
        self.state.color = color;
    }

    fn rotate(&mut self, radians: f64) {
        log::debug!(target: "canvas", "rotate {}", radians);
        self.state.rotate(radians);
    }

    fn translate(&mut self, point: Point) {
        log::debug!(target: "canvas", "translate {} {}", point.x, point.y);
        self.state.translate(point.x, point.y);
    }

    fn scale(&mut self, x: f64, y: f64) {
        log::debug!(target: "canvas", "scale {} {}", x, y);
        self.state.scale(x, y);
    }

    fn push(&mut self) {
        log::debug!(target: "canvas", "save");
        self.state_stack.push(self.state.clone());
    }

    fn pop(&mut self) -> CanvasResult<()> {
        log::debug!(target: "canvas", "restore");
        self.state = self.state_stack.pop().ok_or(CanvasError::UnbalancedPop)?;
        Ok(())
    }

    fn stroke(&mut self, path: &Path) {
        self.stroke_path(path);
    }

    fn fill(&mut self, path: &Path) {
        self.fill_path(path);
    }

    fn fill_string(
        &mut self,
        font: &Font,
        size: Length,
        point: Point,
        text: &str,
    ) -> CanvasResult<()> {
        self.draw_text(font, size, point, text)
    }

    fn draw_image(&mut self, rect: Rectangle, image: &DynamicImage) {
        self.draw_image_scaled(rect, image);
    }

    fn fonts(&self) -> &FontRegistry {
        &self.fonts
    }
}

impl CanvasSizer for ImageCanvas {
    fn size(&self) -> (Length, Length) {
        self.size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canvas(w: f64, h: f64, dpi: f64) -> CanvasResult<ImageCanvas> {
        ImageCanvas::new(
            Length(w),
            Length(h),
            dpi,
            Arc::new(FontRegistry::new()),
        )
    }

    #[test]
    fn test_pixel_size_follows_dpi() {
        let c = canvas(72.0, 36.0, 144.0).unwrap();
        assert_eq!((c.width(), c.height()), (144, 72));
        assert_eq!(c.size(), (Length(72.0), Length(36.0)));
    }

    #[test]
    fn test_invalid_dimensions() {
        assert!(matches!(
            canvas(0.0, 10.0, 72.0),
            Err(CanvasError::InvalidDimensions { .. })
        ));
        assert!(canvas(10.0, 10.0, 0.0).is_err());
        assert!(canvas(40000.0, 10.0, 72.0).is_err());
    }

    #[test]
    fn test_pop_without_push() {
        let mut c = canvas(10.0, 10.0, 72.0).unwrap();
        assert!(matches!(c.pop(), Err(CanvasError::UnbalancedPop)));
        c.push();
        assert!(c.pop().is_ok());
    }

    #[test]
    fn test_pop_restores_state() {
        let mut c = canvas(10.0, 10.0, 72.0).unwrap();
        c.set_color(Color::WHITE);
        c.push();
        c.set_color(Color::from_rgba8(1, 2, 3, 4));
        c.translate(Point::pt(5.0, 5.0));
        c.pop().unwrap();
        assert_eq!(c.state.color, Color::WHITE);
        assert_eq!(c.state.transform.tx, 0.0);
    }
}
