//! Drawing state that can be saved and restored.

use crate::color::Color;
use crate::units::Length;
use tiny_skia::Transform;

/// Drawing state that can be saved and restored with push/pop.
#[derive(Debug, Clone)]
pub(crate) struct DrawingState {
    /// Current stroke, fill and text color.
    pub color: Color,
    /// Current line width in user space.
    pub line_width: f32,
    /// Current line dash pattern in user space. Always of even length.
    pub line_dash: Vec<f32>,
    /// Current line dash offset.
    pub line_dash_offset: f32,
    /// Current transform from user space to device space.
    pub transform: Transform,
}

impl DrawingState {
    /// Default state on top of the given base transform.
    pub fn with_transform(transform: Transform) -> Self {
        Self {
            transform,
            ..Self::default()
        }
    }

    pub fn set_line_dash(&mut self, pattern: &[Length], offset: Length) {
        let mut segments: Vec<f32> = pattern.iter().map(|l| l.0 as f32).collect();
        // Reject if any value is non-finite or negative
        if segments.iter().any(|&v| !v.is_finite() || v < 0.0) {
            log::warn!(target: "canvas", "ignoring invalid dash pattern {:?}", segments);
            return;
        }
        // Odd-length patterns repeat once
        if segments.len() % 2 != 0 {
            let copy = segments.clone();
            segments.extend(copy);
        }
        self.line_dash = segments;
        let offset = offset.0 as f32;
        self.line_dash_offset = if offset.is_finite() { offset } else { 0.0 };
    }

    /// The tiny-skia dash for the current pattern, or None for solid lines.
    pub fn stroke_dash(&self) -> Option<tiny_skia::StrokeDash> {
        if self.line_dash.is_empty() {
            None
        } else {
            tiny_skia::StrokeDash::new(self.line_dash.clone(), self.line_dash_offset)
        }
    }

    /// Rotate counter-clockwise (in y-up user space) by `radians`.
    pub fn rotate(&mut self, radians: f64) {
        let (sin, cos) = (radians as f32).sin_cos();
        let rotation = Transform::from_row(cos, sin, -sin, cos, 0.0, 0.0);
        self.transform = self.transform.pre_concat(rotation);
    }

    pub fn translate(&mut self, x: Length, y: Length) {
        self.transform = self.transform.pre_translate(x.0 as f32, y.0 as f32);
    }

    pub fn scale(&mut self, x: f64, y: f64) {
        self.transform = self.transform.pre_scale(x as f32, y as f32);
    }
}

impl Default for DrawingState {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            line_width: 1.0,
            line_dash: Vec::new(),
            line_dash_offset: 0.0,
            transform: Transform::identity(),
        }
    }
}
