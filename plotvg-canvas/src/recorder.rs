//! A canvas that records drawing calls instead of performing them.
//!
//! Every call on a [`Recorder`] is stored as an [`Action`]. The recording
//! can be rendered to a stable textual form (one line per call, used by
//! snapshot tests) and replayed onto any other [`Canvas`].

use crate::canvas::Canvas;
use crate::color::Color;
use crate::encoding::png_base64;
use crate::error::{CanvasError, CanvasResult};
use crate::font::{Font, FontRegistry};
use crate::geometry::{Point, Rectangle};
use crate::path::Path;
use crate::units::Length;
use image::{DynamicImage, GenericImageView};
use std::fmt;
use std::panic::Location;
use std::sync::Arc;

/// One reified canvas call.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SetLineWidth(Length),
    SetLineDash { pattern: Vec<Length>, offset: Length },
    SetColor(Color),
    Rotate(f64),
    Translate(Point),
    Scale { x: f64, y: f64 },
    Push,
    Pop,
    Stroke(Path),
    Fill(Path),
    FillString {
        font: Font,
        size: Length,
        point: Point,
        text: String,
    },
    DrawImage {
        rect: Rectangle,
        image: Arc<DynamicImage>,
    },
    /// A marker with no drawing effect.
    Comment(String),
}

impl Action {
    /// Issue the call this action represents on `canvas`.
    pub fn apply_to(&self, canvas: &mut dyn Canvas) -> CanvasResult<()> {
        match self {
            Action::SetLineWidth(width) => canvas.set_line_width(*width),
            Action::SetLineDash { pattern, offset } => canvas.set_line_dash(pattern, *offset),
            Action::SetColor(color) => canvas.set_color(*color),
            Action::Rotate(radians) => canvas.rotate(*radians),
            Action::Translate(point) => canvas.translate(*point),
            Action::Scale { x, y } => canvas.scale(*x, *y),
            Action::Push => canvas.push(),
            Action::Pop => canvas.pop()?,
            Action::Stroke(path) => canvas.stroke(path),
            Action::Fill(path) => canvas.fill(path),
            Action::FillString {
                font,
                size,
                point,
                text,
            } => canvas.fill_string(font, *size, *point, text)?,
            Action::DrawImage { rect, image } => canvas.draw_image(*rect, image),
            Action::Comment(text) => canvas.comment(text),
        }
        Ok(())
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::SetLineWidth(width) => write!(f, "SetLineWidth({width})"),
            Action::SetLineDash { pattern, offset } => {
                write!(f, "SetLineDash([")?;
                for (i, dash) in pattern.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{dash}")?;
                }
                write!(f, "], {offset})")
            }
            Action::SetColor(color) => write!(f, "SetColor({color})"),
            Action::Rotate(radians) => write!(f, "Rotate({radians})"),
            Action::Translate(point) => write!(f, "Translate({}, {})", point.x, point.y),
            Action::Scale { x, y } => write!(f, "Scale({x}, {y})"),
            Action::Push => write!(f, "Push()"),
            Action::Pop => write!(f, "Pop()"),
            Action::Stroke(path) => write!(f, "Stroke({path})"),
            Action::Fill(path) => write!(f, "Fill({path})"),
            Action::FillString {
                font,
                size,
                point,
                text,
            } => write!(
                f,
                "FillString({:?}, {}, {}, {}, {:?})",
                font.name(),
                size,
                point.x,
                point.y,
                text
            ),
            Action::DrawImage { rect, image } => {
                let (w, h) = image.dimensions();
                match png_base64(image) {
                    Ok(data) => write!(f, "DrawImage({rect}, {{{w}x{h} IMAGE:{data}}})"),
                    Err(err) => write!(f, "DrawImage({rect}, {{{w}x{h} IMAGE:<invalid: {err}>}})"),
                }
            }
            Action::Comment(text) => write!(f, "Comment({text:?})"),
        }
    }
}

/// An action together with the source location that issued it, if captured.
#[derive(Debug, Clone, PartialEq)]
pub struct Recorded {
    pub action: Action,
    pub caller: Option<&'static Location<'static>>,
}

impl Recorded {
    /// The textual form of the call, prefixed with `file:line ` when the
    /// call site was captured.
    pub fn call(&self) -> String {
        match self.caller {
            Some(loc) => format!("{}:{} {}", loc.file(), loc.line(), self.action),
            None => self.action.to_string(),
        }
    }
}

impl From<Action> for Recorded {
    fn from(action: Action) -> Self {
        Self {
            action,
            caller: None,
        }
    }
}

/// A canvas that stores every call as a [`Recorded`] action.
///
/// A recorder is owned by one drawing pass at a time. The font registry is
/// shared and only consulted for `fill_string` validation.
#[derive(Debug, Clone)]
pub struct Recorder {
    /// Recorded actions in call order.
    pub actions: Vec<Recorded>,
    /// Capture the call site of actions recorded while set.
    pub keep_caller: bool,
    fonts: Arc<FontRegistry>,
    depth: usize,
}

impl Default for Recorder {
    fn default() -> Self {
        Self::new(Arc::new(FontRegistry::new()))
    }
}

impl Recorder {
    /// Create an empty recorder resolving fonts against `fonts`.
    pub fn new(fonts: Arc<FontRegistry>) -> Self {
        Self {
            actions: Vec::new(),
            keep_caller: false,
            fonts,
            depth: 0,
        }
    }

    /// Drop all recorded actions.
    pub fn reset(&mut self) {
        self.actions.clear();
        self.depth = 0;
    }

    /// Record a comment marker.
    #[track_caller]
    pub fn comment(&mut self, text: impl Into<String>) {
        self.record(Action::Comment(text.into()));
    }

    /// Current `push` nesting depth.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// The textual form of every recorded action.
    pub fn calls(&self) -> Vec<String> {
        self.actions.iter().map(Recorded::call).collect()
    }

    /// Re-issue the recorded actions, in order, on `target`.
    ///
    /// Fonts used by text actions are checked against the target's registry
    /// before anything is drawn; a missing font fails with
    /// [`CanvasError::UnknownFont`] and leaves the target untouched. Any
    /// other error stops the replay at the failing action.
    pub fn replay_on(&self, target: &mut dyn Canvas) -> CanvasResult<()> {
        for recorded in &self.actions {
            if let Action::FillString { font, .. } = &recorded.action {
                if !target.fonts().has(font) {
                    log::debug!(target: "recorder", "replay target lacks font {}", font.name());
                    return Err(CanvasError::UnknownFont {
                        typeface: font.typeface.clone(),
                    });
                }
            }
        }

        log::debug!(target: "recorder", "replaying {} actions", self.actions.len());
        for recorded in &self.actions {
            recorded.action.apply_to(target)?;
        }
        Ok(())
    }

    #[track_caller]
    fn record(&mut self, action: Action) {
        let caller = if self.keep_caller {
            Some(Location::caller())
        } else {
            None
        };
        self.actions.push(Recorded { action, caller });
    }
}

impl Canvas for Recorder {
    #[track_caller]
    fn set_line_width(&mut self, width: Length) {
        self.record(Action::SetLineWidth(width));
    }

    #[track_caller]
    fn set_line_dash(&mut self, pattern: &[Length], offset: Length) {
        self.record(Action::SetLineDash {
            pattern: pattern.to_vec(),
            offset,
        });
    }

    #[track_caller]
    fn set_color(&mut self, color: Color) {
        self.record(Action::SetColor(color));
    }

    #[track_caller]
    fn rotate(&mut self, radians: f64) {
        self.record(Action::Rotate(radians));
    }

    #[track_caller]
    fn translate(&mut self, point: Point) {
        self.record(Action::Translate(point));
    }

    #[track_caller]
    fn scale(&mut self, x: f64, y: f64) {
        self.record(Action::Scale { x, y });
    }

    #[track_caller]
    fn push(&mut self) {
        self.depth += 1;
        self.record(Action::Push);
    }

    #[track_caller]
    fn pop(&mut self) -> CanvasResult<()> {
        if self.depth == 0 {
            return Err(CanvasError::UnbalancedPop);
        }
        self.depth -= 1;
        self.record(Action::Pop);
        Ok(())
    }

    #[track_caller]
    fn stroke(&mut self, path: &Path) {
        self.record(Action::Stroke(path.clone()));
    }

    #[track_caller]
    fn fill(&mut self, path: &Path) {
        self.record(Action::Fill(path.clone()));
    }

    #[track_caller]
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
        self.record(Action::FillString {
            font: font.clone(),
            size,
            point,
            text: text.to_string(),
        });
        Ok(())
    }

    #[track_caller]
    fn draw_image(&mut self, rect: Rectangle, image: &DynamicImage) {
        self.record(Action::DrawImage {
            rect,
            image: Arc::new(image.clone()),
        });
    }

    #[track_caller]
    fn comment(&mut self, text: &str) {
        Recorder::comment(self, text);
    }

    fn fonts(&self) -> &FontRegistry {
        &self.fonts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::Face;
    use crate::path::PathComponent;
    use image::{GrayImage, ImageBuffer, Luma};

    fn liberation_serif() -> Font {
        Font::new("Liberation", "Serif")
    }

    fn registry() -> Arc<FontRegistry> {
        let fonts = FontRegistry::new();
        fonts.add([Face::new(liberation_serif(), Vec::new())]);
        Arc::new(fonts)
    }

    #[test]
    fn test_recorder() {
        let fonts = registry();
        let img = DynamicImage::ImageLuma8(GrayImage::new(20, 20));

        let mut rec = Recorder::new(fonts.clone());
        rec.actions.push(
            Action::FillString {
                font: liberation_serif(),
                size: Length(12.0),
                point: Point::pt(0.0, 10.0),
                text: "Text".to_string(),
            }
            .into(),
        );
        rec.comment("End of preamble");
        rec.scale(1.0, 2.0);
        rec.rotate(0.72);
        rec.keep_caller = true;
        rec.stroke(&Path(vec![PathComponent::Move(Point::pt(3.0, 4.0))]));
        let stroke_line = line!() - 1;
        rec.push();
        let push_line = line!() - 1;
        rec.pop().unwrap();
        let pop_line = line!() - 1;
        rec.translate(Point::pt(3.0, 4.0));
        let translate_line = line!() - 1;
        rec.keep_caller = false;
        rec.set_line_width(Length(100.0));
        rec.set_line_dash(&[Length(2.0), Length(5.0)], Length(6.0));
        rec.set_color(Color::from_rgba8(0x65, 0x23, 0xf2, 0));
        rec.fill(&Path(vec![
            PathComponent::Move(Point::pt(3.0, 4.0)),
            PathComponent::Line(Point::pt(2.0, 3.0)),
            PathComponent::Close,
        ]));
        rec.draw_image(
            Rectangle::new(Point::pt(0.0, 0.0), Point::pt(10.0, 10.0)),
            &img,
        );

        let want = vec![
            r#"FillString("LiberationSerif-Regular", 12, 0, 10, "Text")"#.to_string(),
            r#"Comment("End of preamble")"#.to_string(),
            "Scale(1, 2)".to_string(),
            "Rotate(0.72)".to_string(),
            format!("{}:{} Stroke([Move(3, 4)])", file!(), stroke_line),
            format!("{}:{} Push()", file!(), push_line),
            format!("{}:{} Pop()", file!(), pop_line),
            format!("{}:{} Translate(3, 4)", file!(), translate_line),
            "SetLineWidth(100)".to_string(),
            "SetLineDash([2, 5], 6)".to_string(),
            "SetColor(rgba(101, 35, 242, 0))".to_string(),
            "Fill([Move(3, 4), Line(2, 3), Close])".to_string(),
            format!(
                "DrawImage({{(0, 0), (10, 10)}}, {{20x20 IMAGE:{}}})",
                png_base64(&img).unwrap()
            ),
        ];
        assert_eq!(rec.calls(), want);

        let mut replay = Recorder::new(fonts.clone());
        rec.replay_on(&mut replay).unwrap();
        assert_eq!(replay.actions.len(), rec.actions.len());
        for (got, want) in replay.actions.iter().zip(&rec.actions) {
            assert!(
                want.call().ends_with(&got.call()),
                "got {:?}, want {:?}",
                got.call(),
                want.call()
            );
        }

        replay.reset();
        rec.actions.push(
            Action::FillString {
                font: Font::new("Foo", ""),
                size: Length(12.0),
                point: Point::pt(0.0, 10.0),
                text: "Bar".to_string(),
            }
            .into(),
        );
        let err = rec.replay_on(&mut replay).unwrap_err();
        assert_eq!(err.to_string(), "unknown font: Foo");
        assert!(replay.actions.is_empty());
    }

    #[test]
    fn test_image_encoding_is_png_base64() {
        let mut rec = Recorder::default();
        let img = DynamicImage::ImageLuma8(GrayImage::new(20, 20));
        rec.draw_image(Rectangle::default(), &img);
        let call = &rec.calls()[0];
        assert!(call.starts_with("DrawImage({(0, 0), (0, 0)}, {20x20 IMAGE:iVBORw0KGgo"));
        assert!(call.ends_with("})"));
    }

    #[test]
    fn test_sixteen_bit_images_record_distinct_text() {
        let dark = DynamicImage::ImageLuma16(ImageBuffer::from_pixel(2, 2, Luma([0x1200])));
        let light = DynamicImage::ImageLuma16(ImageBuffer::from_pixel(2, 2, Luma([0x1240])));

        let mut rec = Recorder::default();
        rec.draw_image(Rectangle::default(), &dark);
        rec.draw_image(Rectangle::default(), &light);
        assert_ne!(rec.actions[0].action, rec.actions[1].action);
        let calls = rec.calls();
        assert_ne!(calls[0], calls[1]);
    }

    #[test]
    fn test_unbalanced_pop_is_rejected() {
        let mut rec = Recorder::default();
        assert!(matches!(rec.pop(), Err(CanvasError::UnbalancedPop)));
        assert!(rec.actions.is_empty());

        rec.push();
        rec.push();
        assert_eq!(rec.depth(), 2);
        rec.pop().unwrap();
        rec.pop().unwrap();
        assert_eq!(rec.depth(), 0);
        assert!(rec.pop().is_err());
    }

    #[test]
    fn test_replay_stops_at_unbalanced_pop() {
        let mut rec = Recorder::default();
        rec.rotate(1.0);
        rec.actions.push(Action::Pop.into());
        rec.scale(2.0, 2.0);

        let mut target = Recorder::default();
        let err = rec.replay_on(&mut target).unwrap_err();
        assert!(matches!(err, CanvasError::UnbalancedPop));
        assert_eq!(target.calls(), vec!["Rotate(1)".to_string()]);
    }

    #[test]
    fn test_fill_string_requires_known_font() {
        let mut rec = Recorder::default();
        let err = rec
            .fill_string(&liberation_serif(), Length(12.0), Point::default(), "x")
            .unwrap_err();
        assert_eq!(err.to_string(), "unknown font: Liberation");
        assert!(rec.actions.is_empty());

        let mut rec = Recorder::new(registry());
        rec.fill_string(&liberation_serif(), Length(12.0), Point::default(), "x")
            .unwrap();
        assert_eq!(rec.actions.len(), 1);
    }

    #[test]
    fn test_keep_caller_only_affects_later_actions() {
        let mut rec = Recorder::default();
        rec.push();
        rec.keep_caller = true;
        rec.pop().unwrap();
        assert!(rec.actions[0].caller.is_none());
        assert!(rec.actions[1].caller.is_some());

        rec.reset();
        assert!(rec.actions.is_empty());
        assert_eq!(rec.depth(), 0);
    }
}
