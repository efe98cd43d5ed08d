//! Premultiplied 16-bit pixels, the common form for comparing and diffing.

use crate::diff::Rgba64Image;
use image::DynamicImage;

/// Convert to 16-bit RGBA with color channels premultiplied by alpha.
///
/// Fully transparent pixels become zero whatever color they store.
pub(crate) fn premultiplied_rgba16(img: &DynamicImage) -> Rgba64Image {
    let mut out = img.to_rgba16();
    for px in out.pixels_mut() {
        let alpha = u32::from(px.0[3]);
        for c in &mut px.0[..3] {
            *c = (u32::from(*c) * alpha / 0xffff) as u16;
        }
    }
    out
}
