//! Stable PNG and base64 encoding of raster images.
//!
//! Recorded `DrawImage` calls and SVG `<image>` elements embed images as
//! base64 PNG. Encoder settings are fixed so the same pixels always give the
//! same bytes.

use crate::error::CanvasResult;
use base64::prelude::BASE64_STANDARD;
use base64::Engine;
use image::DynamicImage;
use std::borrow::Cow;

/// Encode an image as PNG, keeping its color type and bit depth where PNG
/// has them. Float images are stored as 16-bit RGBA.
pub(crate) fn encode_png(img: &DynamicImage) -> CanvasResult<Vec<u8>> {
    use png::BitDepth::{Eight, Sixteen};
    use png::ColorType::{Grayscale, GrayscaleAlpha, Rgb, Rgba};

    let (color, depth, data): (png::ColorType, png::BitDepth, Cow<'_, [u8]>) = match img {
        DynamicImage::ImageLuma8(i) => (Grayscale, Eight, Cow::Borrowed(i.as_raw())),
        DynamicImage::ImageLumaA8(i) => (GrayscaleAlpha, Eight, Cow::Borrowed(i.as_raw())),
        DynamicImage::ImageRgb8(i) => (Rgb, Eight, Cow::Borrowed(i.as_raw())),
        DynamicImage::ImageRgba8(i) => (Rgba, Eight, Cow::Borrowed(i.as_raw())),
        DynamicImage::ImageLuma16(i) => (Grayscale, Sixteen, Cow::Owned(big_endian(i.as_raw()))),
        DynamicImage::ImageLumaA16(i) => {
            (GrayscaleAlpha, Sixteen, Cow::Owned(big_endian(i.as_raw())))
        }
        DynamicImage::ImageRgb16(i) => (Rgb, Sixteen, Cow::Owned(big_endian(i.as_raw()))),
        DynamicImage::ImageRgba16(i) => (Rgba, Sixteen, Cow::Owned(big_endian(i.as_raw()))),
        other => (
            Rgba,
            Sixteen,
            Cow::Owned(big_endian(other.to_rgba16().as_raw())),
        ),
    };

    let mut buf = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut buf, img.width(), img.height());
        encoder.set_color(color);
        encoder.set_depth(depth);
        encoder.set_compression(png::Compression::Default);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(&data)?;
    }
    Ok(buf)
}

/// PNG stores 16-bit samples most significant byte first.
fn big_endian(samples: &[u16]) -> Vec<u8> {
    samples.iter().flat_map(|s| s.to_be_bytes()).collect()
}

/// PNG bytes of the image, base64-encoded with the standard alphabet.
pub(crate) fn png_base64(img: &DynamicImage) -> CanvasResult<String> {
    Ok(BASE64_STANDARD.encode(encode_png(img)?))
}

/// A `data:` URI holding the image as PNG.
pub(crate) fn png_data_uri(img: &DynamicImage) -> CanvasResult<String> {
    let mut uri = String::from("data:image/png;base64,");
    BASE64_STANDARD.encode_string(encode_png(img)?, &mut uri);
    Ok(uri)
}
