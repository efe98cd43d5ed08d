//! SVG canvas.
//!
//! The drawing is emitted as SVG elements inside a group that flips the
//! y-axis, so element coordinates are user-space points. Each `push` opens
//! a `<g>`, transforms open nested `<g transform=...>` groups, and `pop`
//! closes everything opened since the matching `push`.

use crate::canvas::{Canvas, CanvasSizer};
use crate::color::Color;
use crate::drawing_state::DrawingState;
use crate::encoding::png_data_uri;
use crate::error::{CanvasError, CanvasResult};
use crate::font::{Font, FontRegistry, FontStyle, FontWeight};
use crate::geometry::{Point, Rectangle};
use crate::path::Path;
use crate::units::Length;
use image::DynamicImage;
use std::fmt::Write as _;
use std::io::Write;
use std::sync::Arc;

/// Style state plus the number of groups opened by transforms.
#[derive(Debug, Clone, Default)]
struct Frame {
    state: DrawingState,
    groups: usize,
}

/// A canvas producing an SVG document.
pub struct SvgCanvas {
    size: (Length, Length),
    fonts: Arc<FontRegistry>,
    body: String,
    frame: Frame,
    stack: Vec<Frame>,
}

impl SvgCanvas {
    /// Create an empty SVG page of the given size.
    pub fn new(width: Length, height: Length, fonts: Arc<FontRegistry>) -> CanvasResult<Self> {
        let valid = |l: Length| l.0.is_finite() && l.0 > 0.0 && l.0 <= 32767.0;
        if !valid(width) || !valid(height) {
            return Err(CanvasError::InvalidDimensions {
                width: width.0.max(0.0).ceil() as u32,
                height: height.0.max(0.0).ceil() as u32,
            });
        }
        Ok(Self {
            size: (width, height),
            fonts,
            body: String::new(),
            frame: Frame::default(),
            stack: Vec::new(),
        })
    }

    /// The complete SVG document for everything drawn so far.
    ///
    /// Groups left open by unbalanced pushes are closed.
    pub fn to_svg(&self) -> String {
        let (w, h) = self.size;
        let mut out = String::new();
        let _ = writeln!(out, r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        let _ = writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" width="{w}pt" height="{h}pt" viewBox="0 0 {w} {h}">"#
        );
        let _ = writeln!(out, r#"<g transform="scale(1, -1) translate(0, -{h})">"#);
        out.push_str(&self.body);
        let open = self.frame.groups
            + self
                .stack
                .iter()
                .map(|f| f.groups + 1)
                .sum::<usize>();
        for _ in 0..open {
            out.push_str("</g>\n");
        }
        out.push_str("</g>\n</svg>\n");
        out
    }

    /// Write the SVG document to `w`.
    pub fn write_to<W: Write>(&self, mut w: W) -> CanvasResult<()> {
        w.write_all(self.to_svg().as_bytes())?;
        Ok(())
    }

    fn open_group(&mut self, transform: String) {
        let _ = writeln!(self.body, r#"<g transform="{transform}">"#);
        self.frame.groups += 1;
    }

    fn stroke_style(&self) -> String {
        let state = &self.frame.state;
        let mut style = format!(
            "fill:none;stroke:{};stroke-width:{}",
            state.color.to_css_rgb(),
            state.line_width
        );
        if state.color.a != 0xff {
            let _ = write!(style, ";stroke-opacity:{}", state.color.opacity());
        }
        if !state.line_dash.is_empty() {
            let dashes: Vec<String> = state.line_dash.iter().map(f32::to_string).collect();
            let _ = write!(
                style,
                ";stroke-dasharray:{};stroke-dashoffset:{}",
                dashes.join(","),
                state.line_dash_offset
            );
        }
        style
    }

    fn fill_style(&self) -> String {
        let color = self.frame.state.color;
        let mut style = format!("fill:{}", color.to_css_rgb());
        if color.a != 0xff {
            let _ = write!(style, ";fill-opacity:{}", color.opacity());
        }
        style
    }
}

impl Canvas for SvgCanvas {
    fn set_line_width(&mut self, width: Length) {
        self.frame.state.line_width = width.0 as f32;
    }

    fn set_line_dash(&mut self, pattern: &[Length], offset: Length) {
        self.frame.state.set_line_dash(pattern, offset);
    }

    fn set_color(&mut self, color: Color) {
        self.frame.state.color = color;
    }

    fn rotate(&mut self, radians: f64) {
        self.open_group(format!("rotate({})", radians.to_degrees()));
    }

    fn translate(&mut self, point: Point) {
        self.open_group(format!("translate({}, {})", point.x, point.y));
    }

    fn scale(&mut self, x: f64, y: f64) {
        self.open_group(format!("scale({x}, {y})"));
    }

    fn push(&mut self) {
        log::debug!(target: "canvas", "svg push");
        self.body.push_str("<g>\n");
        let saved = Frame {
            state: self.frame.state.clone(),
            groups: 0,
        };
        self.stack.push(std::mem::replace(&mut self.frame, saved));
    }

    fn pop(&mut self) -> CanvasResult<()> {
        log::debug!(target: "canvas", "svg pop");
        let outer = self.stack.pop().ok_or(CanvasError::UnbalancedPop)?;
        for _ in 0..=self.frame.groups {
            self.body.push_str("</g>\n");
        }
        self.frame = outer;
        Ok(())
    }

    fn stroke(&mut self, path: &Path) {
        if path.is_empty() || self.frame.state.line_width <= 0.0 {
            return;
        }
        let d = path.to_bezpath().to_svg();
        let style = self.stroke_style();
        let _ = writeln!(self.body, r#"<path d="{d}" style="{style}"/>"#);
    }

    fn fill(&mut self, path: &Path) {
        if path.is_empty() {
            return;
        }
        let d = path.to_bezpath().to_svg();
        let style = self.fill_style();
        let _ = writeln!(self.body, r#"<path d="{d}" style="{style}"/>"#);
    }

    fn fill_string(
        &mut self,
        font: &Font,
        size: Length,
        point: Point,
        text: &str,
    ) -> CanvasResult<()> {
        if !self.fonts.has(font) {
            return Err(CanvasError::UnknownFont {
                typeface: font.typeface.clone(),
            });
        }
        let weight = match font.weight {
            FontWeight::Normal => "normal",
            FontWeight::Bold => "bold",
        };
        let style = match font.style {
            FontStyle::Normal => "normal",
            FontStyle::Italic => "italic",
        };
        let fill = self.fill_style();
        let _ = writeln!(
            self.body,
            r#"<text x="{}" y="{}" transform="scale(1, -1)" font-family="{}" font-weight="{}" font-style="{}" font-size="{}" style="{}">{}</text>"#,
            point.x,
            -point.y.0,
            escape(&font.family()),
            weight,
            style,
            size,
            fill,
            escape(text)
        );
        Ok(())
    }

    fn draw_image(&mut self, rect: Rectangle, image: &DynamicImage) {
        let rect = rect.normalize();
        let uri = match png_data_uri(image) {
            Ok(uri) => uri,
            Err(err) => {
                log::warn!(target: "canvas", "skipping image that failed to encode: {}", err);
                return;
            }
        };
        let size = rect.size();
        let _ = writeln!(
            self.body,
            r#"<image x="{}" y="{}" width="{}" height="{}" preserveAspectRatio="none" transform="scale(1, -1)" xlink:href="{}"/>"#,
            rect.min.x,
            -rect.max.y.0,
            size.x,
            size.y,
            uri
        );
    }

    fn comment(&mut self, text: &str) {
        let _ = writeln!(self.body, "<!-- {} -->", text.replace("--", "- -"));
    }

    fn fonts(&self) -> &FontRegistry {
        &self.fonts
    }
}

impl CanvasSizer for SvgCanvas {
    fn size(&self) -> (Length, Length) {
        self.size
    }
}

/// Escape text for use in XML content and attribute values.
fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}
