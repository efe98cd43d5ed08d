//! Error types for plotvg-cmpimg.

use thiserror::Error;

/// Result type alias using CmpImgError.
pub type CmpImgResult<T> = Result<T, CmpImgError>;

/// Errors that can occur while comparing or diffing images.
#[derive(Debug, Error)]
pub enum CmpImgError {
    /// No codec is registered under the name.
    #[error("unknown codec: {0}")]
    UnknownCodec(String),

    /// The codec compares encoded text and has no pixel representation.
    #[error("codec {0} does not decode to pixels")]
    NotRaster(String),

    /// A buffer is not valid for the declared codec.
    #[error("could not decode {codec} image: {source}")]
    Decode {
        codec: String,
        #[source]
        source: image::ImageError,
    },

    /// Encoding the diff image failed.
    #[error("could not encode image: {0}")]
    Encode(#[source] image::ImageError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
