//! Fill and stroke operations for ImageCanvas.

use super::ImageCanvas;
use crate::path::Path;
use kurbo::{BezPath, PathEl};

impl ImageCanvas {
    /// Paint with the current color.
    pub(crate) fn paint(&self) -> tiny_skia::Paint<'static> {
        let mut paint = tiny_skia::Paint::default();
        paint.set_color(self.state.color.into());
        paint.anti_alias = true;
        paint
    }

    pub(crate) fn stroke_path(&mut self, path: &Path) {
        log::debug!(target: "canvas", "stroke {}", path);
        if self.state.line_width <= 0.0 {
            return;
        }
        let Some(p) = to_skia_path(&path.to_bezpath()) else {
            return;
        };
        let stroke = tiny_skia::Stroke {
            width: self.state.line_width,
            dash: self.state.stroke_dash(),
            ..Default::default()
        };
        let paint = self.paint();
        self.pixmap
            .stroke_path(&p, &paint, &stroke, self.state.transform, None);
    }

    pub(crate) fn fill_path(&mut self, path: &Path) {
        log::debug!(target: "canvas", "fill {}", path);
        let Some(p) = to_skia_path(&path.to_bezpath()) else {
            return;
        };
        let paint = self.paint();
        self.pixmap.fill_path(
            &p,
            &paint,
            tiny_skia::FillRule::Winding,
            self.state.transform,
            None,
        );
    }
}

/// Convert a kurbo path to a tiny-skia path. Returns None for empty paths.
pub(crate) fn to_skia_path(bez: &BezPath) -> Option<tiny_skia::Path> {
    let mut pb = tiny_skia::PathBuilder::new();
    for el in bez.elements() {
        match *el {
            PathEl::MoveTo(p) => pb.move_to(p.x as f32, p.y as f32),
            PathEl::LineTo(p) => pb.line_to(p.x as f32, p.y as f32),
            PathEl::QuadTo(a, p) => pb.quad_to(a.x as f32, a.y as f32, p.x as f32, p.y as f32),
            PathEl::CurveTo(a, b, p) => pb.cubic_to(
                a.x as f32, a.y as f32, b.x as f32, b.y as f32, p.x as f32, p.y as f32,
            ),
            PathEl::ClosePath => pb.close(),
        }
    }
    pb.finish()
}
