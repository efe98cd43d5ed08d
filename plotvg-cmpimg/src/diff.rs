//! Visual diffs between two images.

use crate::error::{CmpImgError, CmpImgResult};
use crate::pixels::premultiplied_rgba16;
use image::{DynamicImage, GenericImageView, ImageBuffer, ImageFormat, Rgb, Rgba};
use std::io::Cursor;

/// A 16-bit-per-channel RGBA image, the output type of [`diff`].
pub type Rgba64Image = ImageBuffer<Rgba<u16>, Vec<u16>>;

/// An integer pixel rectangle, `min` inclusive and `max` exclusive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Bounds {
    pub min_x: u32,
    pub min_y: u32,
    pub max_x: u32,
    pub max_y: u32,
}

impl Bounds {
    pub fn new(min_x: u32, min_y: u32, max_x: u32, max_y: u32) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// The bounds of an image, anchored at the origin.
    pub fn of<I: GenericImageView>(img: &I) -> Self {
        let (w, h) = img.dimensions();
        Self::new(0, 0, w, h)
    }

    /// The smallest bounds containing both.
    pub fn union(&self, other: &Bounds) -> Bounds {
        if self.is_empty() {
            return *other;
        }
        if other.is_empty() {
            return *self;
        }
        Bounds {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    pub fn width(&self) -> u32 {
        self.max_x.saturating_sub(self.min_x)
    }

    pub fn height(&self) -> u32 {
        self.max_y.saturating_sub(self.min_y)
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    pub fn contains(&self, x: u32, y: u32) -> bool {
        self.min_x <= x && x < self.max_x && self.min_y <= y && y < self.max_y
    }
}

/// Write a visual diff of `a` and `b` into `dst` and return the covered bounds.
///
/// Each output pixel holds the absolute difference of the two inputs' red,
/// green and blue channels, taken at 16 bits with color premultiplied by
/// alpha. Pixels outside one image's bounds read as transparent black.
/// When the largest difference is at most half of full intensity, every
/// channel is multiplied by the integer factor `0xffff / max` so faint
/// differences stay visible; larger differences are kept as they are.
/// Output alpha is always opaque, so identical inputs give opaque black.
///
/// # Panics
///
/// Panics if `dst` is not exactly the size of the union of both bounds.
pub fn diff(dst: &mut Rgba64Image, a: &DynamicImage, b: &DynamicImage) -> Bounds {
    let bounds = Bounds::of(a).union(&Bounds::of(b));
    assert_eq!(
        (dst.width(), dst.height()),
        (bounds.width(), bounds.height()),
        "diff destination must cover the union of both image bounds"
    );

    let a = premultiplied_rgba16(a);
    let b = premultiplied_rgba16(b);
    let mut max = 0u16;
    for (x, y, out) in dst.enumerate_pixels_mut() {
        let pa = sample(&a, x, y);
        let pb = sample(&b, x, y);
        let d = [0, 1, 2].map(|i| pa[i].abs_diff(pb[i]));
        max = max.max(d[0]).max(d[1]).max(d[2]);
        *out = Rgba([d[0], d[1], d[2], u16::MAX]);
    }

    let factor = if max == 0 { 1 } else { u16::MAX / max };
    if factor > 1 {
        for out in dst.pixels_mut() {
            for c in &mut out.0[..3] {
                *c *= factor;
            }
        }
    }

    log::debug!(
        target: "cmpimg",
        "diff over {}x{}, max channel difference {}, scaled by {}",
        bounds.width(),
        bounds.height(),
        max,
        factor
    );
    bounds
}

/// Allocate a destination of the right size and diff `a` against `b`.
pub fn diff_images(a: &DynamicImage, b: &DynamicImage) -> (Rgba64Image, Bounds) {
    let bounds = Bounds::of(a).union(&Bounds::of(b));
    let mut dst = Rgba64Image::new(bounds.width(), bounds.height());
    let bounds = diff(&mut dst, a, b);
    (dst, bounds)
}

/// Encode a diff image as a 16-bit PNG.
///
/// Diff pixels are always opaque, so alpha is dropped and the image is
/// written as 16-bit RGB.
pub fn encode_png(img: &Rgba64Image) -> CmpImgResult<Vec<u8>> {
    let rgb: ImageBuffer<Rgb<u16>, Vec<u16>> =
        ImageBuffer::from_fn(img.width(), img.height(), |x, y| {
            let [r, g, b, _] = img.get_pixel(x, y).0;
            Rgb([r, g, b])
        });
    let mut buf = Cursor::new(Vec::new());
    rgb.write_to(&mut buf, ImageFormat::Png)
        .map_err(CmpImgError::Encode)?;
    Ok(buf.into_inner())
}

fn sample(img: &Rgba64Image, x: u32, y: u32) -> [u16; 4] {
    if x < img.width() && y < img.height() {
        img.get_pixel(x, y).0
    } else {
        [0; 4]
    }
}
