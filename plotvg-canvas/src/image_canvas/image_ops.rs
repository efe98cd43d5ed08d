//! Image drawing, pixel data, and PNG output operations for ImageCanvas.

use super::ImageCanvas;
use crate::error::CanvasResult;
use crate::geometry::Rectangle;
use image::{DynamicImage, Rgba, RgbaImage};
use std::io::Write;

impl ImageCanvas {
    /// Draw `img` stretched over `rect`, top row of the image at `rect.max.y`.
    pub(crate) fn draw_image_scaled(&mut self, rect: Rectangle, img: &DynamicImage) {
        let rect = rect.normalize();
        log::debug!(target: "canvas", "drawImage {}x{} into {}", img.width(), img.height(), rect);
        let size = rect.size();
        if img.width() == 0 || img.height() == 0 || size.x.0 <= 0.0 || size.y.0 <= 0.0 {
            log::warn!(target: "canvas", "skipping empty image blit into {}", rect);
            return;
        }
        let Some(src) = to_pixmap(img) else {
            return;
        };

        let scale_x = size.x.0 as f32 / img.width() as f32;
        let scale_y = size.y.0 as f32 / img.height() as f32;
        let transform = self
            .state
            .transform
            .pre_translate(rect.min.x.0 as f32, rect.max.y.0 as f32)
            .pre_scale(scale_x, -scale_y);

        let paint = tiny_skia::PixmapPaint {
            quality: tiny_skia::FilterQuality::Bilinear,
            ..Default::default()
        };
        self.pixmap
            .draw_pixmap(0, 0, src.as_ref(), &paint, transform, None);
    }

    /// The canvas contents as a straight-alpha RGBA image.
    pub fn image(&self) -> RgbaImage {
        RgbaImage::from_fn(self.width, self.height, |x, y| {
            // Convert from premultiplied alpha to straight alpha
            self.pixmap.pixel(x, y).map_or(Rgba([0, 0, 0, 0]), |p| {
                let c = p.demultiply();
                Rgba([c.red(), c.green(), c.blue(), c.alpha()])
            })
        })
    }

    /// Encode the canvas contents as PNG, tagged with the canvas resolution.
    pub fn to_png(&self) -> CanvasResult<Vec<u8>> {
        let mut buf = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut buf, self.width, self.height);
            encoder.set_color(png::ColorType::Rgba);
            encoder.set_depth(png::BitDepth::Eight);

            // Set pixel density metadata (pixels per meter)
            let ppm = (self.dpi.max(0.0) / 0.0254).round() as u32;
            encoder.set_pixel_dims(Some(png::PixelDimensions {
                xppu: ppm,
                yppu: ppm,
                unit: png::Unit::Meter,
            }));

            let mut writer = encoder.write_header()?;
            writer.write_image_data(self.image().as_raw())?;
        }
        Ok(buf)
    }

    /// Write the canvas as PNG to `w`.
    pub fn write_to<W: Write>(&self, mut w: W) -> CanvasResult<()> {
        w.write_all(&self.to_png()?)?;
        Ok(())
    }
}

/// Copy an image into a premultiplied-alpha pixmap.
fn to_pixmap(img: &DynamicImage) -> Option<tiny_skia::Pixmap> {
    let rgba = img.to_rgba8();
    let mut pixmap = tiny_skia::Pixmap::new(rgba.width(), rgba.height())?;
    for (dst, src) in pixmap.pixels_mut().iter_mut().zip(rgba.pixels()) {
        let [r, g, b, a] = src.0;
        *dst = tiny_skia::ColorU8::from_rgba(r, g, b, a).premultiply();
    }
    Some(pixmap)
}
