//! The backend-independent drawing surface.

use crate::color::Color;
use crate::error::CanvasResult;
use crate::font::{Font, FontRegistry};
use crate::geometry::{Point, Rectangle};
use crate::path::Path;
use crate::units::Length;
use image::DynamicImage;

/// A drawing surface.
///
/// User space is y-up with the origin at the bottom-left corner and all
/// lengths in points. Transformations compose onto the current
/// transformation and apply to every later drawing call until the
/// matching [`Canvas::pop`].
pub trait Canvas {
    /// Set the width of stroked lines.
    fn set_line_width(&mut self, width: Length);

    /// Set the dash pattern for stroked lines. An empty pattern draws solid lines.
    fn set_line_dash(&mut self, pattern: &[Length], offset: Length);

    /// Set the color used by stroke, fill and text operations.
    fn set_color(&mut self, color: Color);

    /// Rotate user space counter-clockwise by `radians`.
    fn rotate(&mut self, radians: f64);

    /// Move the origin of user space to `point`.
    fn translate(&mut self, point: Point);

    /// Scale user space.
    fn scale(&mut self, x: f64, y: f64);

    /// Save the transformation and style state.
    fn push(&mut self);

    /// Restore the state saved by the matching [`Canvas::push`].
    ///
    /// Returns [`CanvasError::UnbalancedPop`](crate::CanvasError::UnbalancedPop)
    /// when there is no saved state.
    fn pop(&mut self) -> CanvasResult<()>;

    /// Draw the outline of `path` with the current line style.
    fn stroke(&mut self, path: &Path);

    /// Fill the interior of `path` with the current color, non-zero winding.
    fn fill(&mut self, path: &Path);

    /// Draw `text` with its baseline starting at `point`.
    ///
    /// Fails with [`CanvasError::UnknownFont`](crate::CanvasError::UnknownFont)
    /// when the font is not in [`Canvas::fonts`].
    fn fill_string(&mut self, font: &Font, size: Length, point: Point, text: &str)
        -> CanvasResult<()>;

    /// Draw `image` scaled to fill `rect`.
    fn draw_image(&mut self, rect: Rectangle, image: &DynamicImage);

    /// Annotate the drawing. Backends without a notion of comments ignore it.
    fn comment(&mut self, _text: &str) {}

    /// The font registry text is resolved against.
    fn fonts(&self) -> &FontRegistry;
}

/// A canvas with a fixed page size.
pub trait CanvasSizer: Canvas {
    /// Width and height of the drawable area.
    fn size(&self) -> (Length, Length);
}

impl<C: Canvas + ?Sized> Canvas for &mut C {
    #[track_caller]
    fn set_line_width(&mut self, width: Length) {
        (**self).set_line_width(width)
    }

    #[track_caller]
    fn set_line_dash(&mut self, pattern: &[Length], offset: Length) {
        (**self).set_line_dash(pattern, offset)
    }

    #[track_caller]
    fn set_color(&mut self, color: Color) {
        (**self).set_color(color)
    }

    #[track_caller]
    fn rotate(&mut self, radians: f64) {
        (**self).rotate(radians)
    }

    #[track_caller]
    fn translate(&mut self, point: Point) {
        (**self).translate(point)
    }

    #[track_caller]
    fn scale(&mut self, x: f64, y: f64) {
        (**self).scale(x, y)
    }

    #[track_caller]
    fn push(&mut self) {
        (**self).push()
    }

    #[track_caller]
    fn pop(&mut self) -> CanvasResult<()> {
        (**self).pop()
    }

    #[track_caller]
    fn stroke(&mut self, path: &Path) {
        (**self).stroke(path)
    }

    #[track_caller]
    fn fill(&mut self, path: &Path) {
        (**self).fill(path)
    }

    #[track_caller]
    fn fill_string(
        &mut self,
        font: &Font,
        size: Length,
        point: Point,
        text: &str,
    ) -> CanvasResult<()> {
        (**self).fill_string(font, size, point, text)
    }

    #[track_caller]
    fn draw_image(&mut self, rect: Rectangle, image: &DynamicImage) {
        (**self).draw_image(rect, image)
    }

    #[track_caller]
    fn comment(&mut self, text: &str) {
        (**self).comment(text)
    }

    fn fonts(&self) -> &FontRegistry {
        (**self).fonts()
    }
}

impl<C: CanvasSizer + ?Sized> CanvasSizer for &mut C {
    fn size(&self) -> (Length, Length) {
        (**self).size()
    }
}
