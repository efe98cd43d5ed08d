//! Exact and tolerance-based image equality.

use crate::codec::Codec;
use crate::error::CmpImgResult;
use crate::pixels::premultiplied_rgba16;
use image::{DynamicImage, GenericImageView};

/// Whether two encoded images are identical, pixel for pixel.
///
/// SVG inputs are compared byte for byte.
pub fn equal(codec: &str, a: &[u8], b: &[u8]) -> CmpImgResult<bool> {
    equal_approx(codec, a, b, 0)
}

/// Whether two encoded images match within `delta` per channel.
///
/// Both images are decoded with the named codec and normalized to 16 bits
/// per channel with color premultiplied by alpha, so fully transparent
/// pixels match whatever color they store. `delta` is in 8-bit units: a
/// channel matches when it differs by at most `delta * 257`. Images with
/// different bounds never match. SVG inputs are compared byte for byte and
/// `delta` is ignored.
pub fn equal_approx(codec: &str, a: &[u8], b: &[u8], delta: u8) -> CmpImgResult<bool> {
    let codec = Codec::from_name(codec)?;
    if codec == Codec::Svg {
        return Ok(a == b);
    }
    let a = codec.decode(a)?;
    let b = codec.decode(b)?;
    Ok(equal_images(&a, &b, delta))
}

/// Tolerance comparison of already decoded images. See [`equal_approx`].
pub fn equal_images(a: &DynamicImage, b: &DynamicImage, delta: u8) -> bool {
    if a.dimensions() != b.dimensions() {
        log::debug!(
            target: "cmpimg",
            "bounds differ: {:?} vs {:?}",
            a.dimensions(),
            b.dimensions()
        );
        return false;
    }

    let tolerance = u16::from(delta) * 257;
    let a = premultiplied_rgba16(a);
    let b = premultiplied_rgba16(b);
    let mismatch = a
        .as_raw()
        .iter()
        .zip(b.as_raw())
        .position(|(x, y)| x.abs_diff(*y) > tolerance);
    match mismatch {
        Some(i) => {
            let px = (i / 4) as u32;
            log::debug!(
                target: "cmpimg",
                "pixel ({}, {}) differs by more than {}",
                px % a.width(),
                px / a.width(),
                delta
            );
            false
        }
        None => true,
    }
}
