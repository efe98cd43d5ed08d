//! Text rendering for ImageCanvas.
//!
//! Glyphs are drawn as filled outlines taken from the resolved face with
//! ttf-parser. There is no shaping: each character maps to one glyph and the
//! pen advances by the glyph's horizontal advance.

use super::ImageCanvas;
use crate::error::{CanvasError, CanvasResult};
use crate::font::Font;
use crate::geometry::Point;
use crate::units::Length;

/// Collects glyph outlines into one user-space path.
struct GlyphOutline {
    pb: tiny_skia::PathBuilder,
    origin_x: f32,
    origin_y: f32,
    scale: f32,
}

impl GlyphOutline {
    fn map(&self, x: f32, y: f32) -> (f32, f32) {
        (self.origin_x + x * self.scale, self.origin_y + y * self.scale)
    }
}

impl ttf_parser::OutlineBuilder for GlyphOutline {
    fn move_to(&mut self, x: f32, y: f32) {
        let (x, y) = self.map(x, y);
        self.pb.move_to(x, y);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        let (x, y) = self.map(x, y);
        self.pb.line_to(x, y);
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        let (x1, y1) = self.map(x1, y1);
        let (x, y) = self.map(x, y);
        self.pb.quad_to(x1, y1, x, y);
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        let (x1, y1) = self.map(x1, y1);
        let (x2, y2) = self.map(x2, y2);
        let (x, y) = self.map(x, y);
        self.pb.cubic_to(x1, y1, x2, y2, x, y);
    }

    fn close(&mut self) {
        self.pb.close();
    }
}

impl ImageCanvas {
    pub(crate) fn draw_text(
        &mut self,
        font: &Font,
        size: Length,
        point: Point,
        text: &str,
    ) -> CanvasResult<()> {
        log::debug!(target: "canvas", "fillText {:?} {} at {}", text, font, point);
        let face = self.fonts.resolve(font).ok_or_else(|| CanvasError::UnknownFont {
            typeface: font.typeface.clone(),
        })?;
        let parsed = ttf_parser::Face::parse(&face.data, face.index)
            .map_err(|e| CanvasError::FontParse(format!("{}: {}", font.name(), e)))?;

        // Font units are y-up like user space, so no flip is needed here.
        let scale = size.0 as f32 / f32::from(parsed.units_per_em());
        let mut outline = GlyphOutline {
            pb: tiny_skia::PathBuilder::new(),
            origin_x: point.x.0 as f32,
            origin_y: point.y.0 as f32,
            scale,
        };
        for c in text.chars() {
            let glyph = parsed.glyph_index(c).unwrap_or(ttf_parser::GlyphId(0));
            parsed.outline_glyph(glyph, &mut outline);
            let advance = parsed.glyph_hor_advance(glyph).unwrap_or(0);
            outline.origin_x += f32::from(advance) * scale;
        }

        let Some(path) = outline.pb.finish() else {
            return Ok(());
        };
        let paint = self.paint();
        self.pixmap.fill_path(
            &path,
            &paint,
            tiny_skia::FillRule::Winding,
            self.state.transform,
            None,
        );
        Ok(())
    }
}
