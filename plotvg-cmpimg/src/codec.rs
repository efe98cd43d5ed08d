//! Codec lookup by name.

use crate::error::{CmpImgError, CmpImgResult};
use image::{DynamicImage, ImageFormat};
use std::path::Path;

/// A named image format the comparison functions accept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Codec {
    /// A raster format decoded through the `image` crate.
    Raster(ImageFormat),
    /// SVG documents, compared as encoded bytes.
    Svg,
}

impl Codec {
    /// Look up a codec by name or file extension, ignoring case and a leading dot.
    ///
    /// ```
    /// use plotvg_cmpimg::Codec;
    /// assert_eq!(Codec::from_name("PNG").unwrap(), Codec::Raster(image::ImageFormat::Png));
    /// assert_eq!(Codec::from_name("svg").unwrap(), Codec::Svg);
    /// assert!(Codec::from_name("nope").is_err());
    /// ```
    pub fn from_name(name: &str) -> CmpImgResult<Codec> {
        let lower = name.trim_start_matches('.').to_ascii_lowercase();
        if lower == "svg" {
            return Ok(Codec::Svg);
        }
        match ImageFormat::from_extension(&lower) {
            Some(format) if format.reading_enabled() => Ok(Codec::Raster(format)),
            _ => Err(CmpImgError::UnknownCodec(name.to_string())),
        }
    }

    /// The codec matching a file's extension.
    pub fn from_path(path: &Path) -> CmpImgResult<Codec> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| CmpImgError::UnknownCodec(path.display().to_string()))?;
        Codec::from_name(ext)
    }

    /// Canonical name of the codec.
    pub fn name(&self) -> &'static str {
        match self {
            Codec::Svg => "svg",
            Codec::Raster(format) => format.extensions_str().first().copied().unwrap_or("raster"),
        }
    }

    /// Decode `data` into pixels.
    pub fn decode(&self, data: &[u8]) -> CmpImgResult<DynamicImage> {
        match self {
            Codec::Svg => Err(CmpImgError::NotRaster(self.name().to_string())),
            Codec::Raster(format) => image::load_from_memory_with_format(data, *format).map_err(
                |source| CmpImgError::Decode {
                    codec: self.name().to_string(),
                    source,
                },
            ),
        }
    }
}

/// Decode `data` with the codec registered under `codec`.
pub fn decode(codec: &str, data: &[u8]) -> CmpImgResult<DynamicImage> {
    Codec::from_name(codec)?.decode(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("png", ImageFormat::Png)]
    #[case(".png", ImageFormat::Png)]
    #[case("JPG", ImageFormat::Jpeg)]
    #[case("jpeg", ImageFormat::Jpeg)]
    #[case("gif", ImageFormat::Gif)]
    #[case("bmp", ImageFormat::Bmp)]
    #[case("tif", ImageFormat::Tiff)]
    fn test_raster_codec_names(#[case] name: &str, #[case] format: ImageFormat) {
        assert_eq!(Codec::from_name(name).unwrap(), Codec::Raster(format));
    }

    #[test]
    fn test_unknown_codec() {
        let err = Codec::from_name("webp").unwrap_err();
        assert_eq!(err.to_string(), "unknown codec: webp");
    }

    #[test]
    fn test_from_path() {
        assert_eq!(
            Codec::from_path(Path::new("plots/golden.PNG")).unwrap(),
            Codec::Raster(ImageFormat::Png)
        );
        assert!(Codec::from_path(Path::new("README")).is_err());
    }

    #[test]
    fn test_svg_does_not_decode() {
        assert!(matches!(
            decode("svg", b"<svg/>"),
            Err(CmpImgError::NotRaster(_))
        ));
    }

    #[test]
    fn test_decode_error_names_codec() {
        let err = decode("png", b"not a png").unwrap_err();
        assert!(matches!(err, CmpImgError::Decode { ref codec, .. } if codec == "png"));
    }
}
