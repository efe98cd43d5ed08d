//! Integration tests for plotvg-cmpimg.

use image::{DynamicImage, ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};
use plotvg_cmpimg::{
    diff, diff_images, encode_png, equal, equal_approx, Bounds, CmpImgError, Rgba64Image,
};
use rstest::rstest;
use std::io::Cursor;

fn encode(img: &DynamicImage, format: ImageFormat) -> Vec<u8> {
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, format).unwrap();
    buf.into_inner()
}

fn gradient(w: u32, h: u32) -> RgbaImage {
    RgbaImage::from_fn(w, h, |x, y| {
        Rgba([(x * 16) as u8, (y * 16) as u8, ((x + y) * 4) as u8, 255])
    })
}

/// Two PNGs whose largest per-channel difference is exactly 7.
fn approx_pair() -> (Vec<u8>, Vec<u8>) {
    let got = gradient(16, 16);
    let mut want = got.clone();
    want.get_pixel_mut(3, 5).0[0] += 7;
    want.get_pixel_mut(9, 2).0[1] += 3;
    want.get_pixel_mut(12, 12).0[2] -= 5;
    (
        encode(&DynamicImage::ImageRgba8(got), ImageFormat::Png),
        encode(&DynamicImage::ImageRgba8(want), ImageFormat::Png),
    )
}

#[rstest]
#[case(0, false)]
#[case(1, false)]
#[case(2, false)]
#[case(3, false)]
#[case(4, false)]
#[case(5, false)]
#[case(6, false)]
#[case(7, true)]
#[case(8, true)]
#[case(9, true)]
#[case(10, true)]
#[case(255, true)]
fn test_equal_approx_threshold(#[case] delta: u8, #[case] ok: bool) {
    let (got, want) = approx_pair();
    assert_eq!(equal_approx("png", &got, &want, delta).unwrap(), ok);
}

#[test]
fn test_equal_approx_is_monotonic() {
    let (got, want) = approx_pair();
    let results: Vec<bool> = (0..=255u8)
        .map(|delta| equal_approx("png", &got, &want, delta).unwrap())
        .collect();
    let first = results.iter().position(|&ok| ok).unwrap();
    assert_eq!(first, 7);
    assert!(results[first..].iter().all(|&ok| ok));
}

#[rstest]
#[case("png", ImageFormat::Png)]
#[case("bmp", ImageFormat::Bmp)]
#[case("tiff", ImageFormat::Tiff)]
#[case("jpeg", ImageFormat::Jpeg)]
fn test_equal_is_reflexive(#[case] codec: &str, #[case] format: ImageFormat) {
    let img = DynamicImage::ImageRgb8(RgbImage::from_fn(8, 8, |x, y| {
        Rgb([(x * 30) as u8, (y * 30) as u8, 128])
    }));
    let data = encode(&img, format);
    assert!(equal(codec, &data, &data).unwrap());
}

#[test]
fn test_different_bounds_never_equal() {
    let a = encode(&DynamicImage::ImageRgba8(gradient(4, 4)), ImageFormat::Png);
    let b = encode(&DynamicImage::ImageRgba8(gradient(4, 5)), ImageFormat::Png);
    assert!(!equal_approx("png", &a, &b, 255).unwrap());
}

#[test]
fn test_decode_error_surfaces() {
    let (got, _) = approx_pair();
    let err = equal("png", &got, b"definitely not a png").unwrap_err();
    assert!(matches!(err, CmpImgError::Decode { .. }));
}

#[test]
fn test_unknown_codec() {
    let (got, want) = approx_pair();
    assert!(matches!(
        equal("xyz", &got, &want),
        Err(CmpImgError::UnknownCodec(_))
    ));
}

#[test]
fn test_diff_bounds_are_union() {
    let a = DynamicImage::ImageRgba8(gradient(30, 10));
    let b = DynamicImage::ImageRgba8(gradient(20, 25));
    let mut dst = Rgba64Image::new(30, 25);
    let bounds = diff(&mut dst, &a, &b);
    assert_eq!(bounds, Bounds::of(&a).union(&Bounds::of(&b)));
    assert_eq!(bounds, Bounds::new(0, 0, 30, 25));
}

#[test]
fn test_diff_scales_faint_differences() {
    let a = DynamicImage::ImageRgba8(RgbaImage::from_fn(2, 1, |x, _| {
        Rgba([if x == 0 { 10 } else { 5 }, 0, 0, 255])
    }));
    let b = DynamicImage::ImageRgba8(RgbaImage::from_pixel(2, 1, Rgba([0, 0, 0, 255])));
    let (dst, _) = diff_images(&a, &b);
    // Largest difference is 2570, scaled by 0xffff / 2570 = 25.
    assert_eq!(dst.get_pixel(0, 0).0, [64250, 0, 0, 0xffff]);
    assert_eq!(dst.get_pixel(1, 0).0, [32125, 0, 0, 0xffff]);
}

#[test]
fn test_diff_keeps_large_differences() {
    let a = DynamicImage::ImageRgba8(RgbaImage::from_fn(2, 1, |x, _| {
        Rgba([if x == 0 { 231 } else { 77 }, 0, 0, 255])
    }));
    let b = DynamicImage::ImageRgba8(RgbaImage::from_pixel(2, 1, Rgba([0, 0, 0, 255])));
    let (dst, _) = diff_images(&a, &b);
    assert_eq!(dst.get_pixel(0, 0).0, [231 * 257, 0, 0, 0xffff]);
    assert_eq!(dst.get_pixel(1, 0).0, [77 * 257, 0, 0, 0xffff]);
}

#[test]
fn test_diff_of_identical_images_is_black() {
    let a = DynamicImage::ImageRgba8(gradient(5, 5));
    let (dst, _) = diff_images(&a, &a);
    assert!(dst.pixels().all(|p| p.0 == [0, 0, 0, 0xffff]));
}

#[test]
fn test_diff_encoding_is_deterministic() {
    let (got, want) = approx_pair();
    let a = image::load_from_memory(&got).unwrap();
    let b = image::load_from_memory(&want).unwrap();

    let (first, _) = diff_images(&a, &b);
    let (second, _) = diff_images(&a, &b);
    let first = encode_png(&first).unwrap();
    assert_eq!(first, encode_png(&second).unwrap());

    let decoded = image::load_from_memory(&first).unwrap();
    assert_eq!(decoded.color(), image::ColorType::Rgb16);
    // 7 * 257 = 1799, scaled by 0xffff / 1799 = 36.
    assert_eq!(decoded.to_rgba16().get_pixel(3, 5).0, [64764, 0, 0, 0xffff]);
}

#[test]
fn test_diff_golden() {
    // The second column is half transparent in `got`; `want` is narrower and taller.
    let got = DynamicImage::ImageRgba8(RgbaImage::from_fn(4, 3, |x, y| {
        Rgba([(x * 60) as u8, (y * 80) as u8, 200, if x == 1 { 128 } else { 255 }])
    }));
    let want = DynamicImage::ImageRgba8(RgbaImage::from_fn(3, 4, |x, y| {
        Rgba([(x * 60) as u8, (y * 80 + 10) as u8, 190, 255])
    }));

    let mut dst = Rgba64Image::new(4, 4);
    let bounds = diff(&mut dst, &got, &want);
    assert_eq!(bounds, Bounds::new(0, 0, 4, 4));

    let png = encode_png(&dst).unwrap();
    assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
    assert_eq!(&png[12..16], b"IHDR");
    // 4x4, 16-bit truecolor, no interlace.
    assert_eq!(&png[16..29], &[0, 0, 0, 4, 0, 0, 0, 4, 16, 2, 0, 0, 0]);

    #[rustfmt::skip]
    let expected: [[[u16; 3]; 4]; 4] = [
        [[0, 2570, 2570], [7680, 2570, 23030], [0, 2570, 2570], [46260, 0, 51400]],
        [[0, 2570, 2570], [7680, 12810, 23030], [0, 2570, 2570], [46260, 20560, 51400]],
        [[0, 2570, 2570], [7680, 23050, 23030], [0, 2570, 2570], [46260, 41120, 51400]],
        [[0, 64250, 48830], [15420, 64250, 48830], [30840, 64250, 48830], [0, 0, 0]],
    ];
    let decoded = image::load_from_memory(&png).unwrap().to_rgb16();
    for (y, row) in expected.iter().enumerate() {
        for (x, px) in row.iter().enumerate() {
            assert_eq!(
                &decoded.get_pixel(x as u32, y as u32).0,
                px,
                "pixel ({x}, {y})"
            );
        }
    }
}
