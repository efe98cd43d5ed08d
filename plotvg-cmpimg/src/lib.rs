//! Image comparison for plot golden-file tests.
//!
//! - [`equal`] and [`equal_approx`] compare two encoded buffers through a
//!   named [`Codec`], exactly or within a per-channel tolerance.
//! - [`diff`] renders a 16-bit-per-channel image highlighting where two
//!   images differ.
//!
//! All functions are stateless: decode, compare, return.

mod codec;
mod compare;
mod diff;
mod error;
mod pixels;

pub use codec::{decode, Codec};
pub use compare::{equal, equal_approx, equal_images};
pub use diff::{diff, diff_images, encode_png, Bounds, Rgba64Image};
pub use error::{CmpImgError, CmpImgResult};
