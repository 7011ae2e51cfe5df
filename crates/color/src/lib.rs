//! Representative color extraction for texture images.
//!
//! An image is reduced to the single color a map renderer would paint it as:
//! fully transparent pixels are ignored and the remaining pixels are grouped
//! into buckets of near-equal colors, the fullest bucket winning (see
//! [`Policy`] for the alternatives). Images with no visible pixels produce
//! [`Color::TRANSPARENT`], the "unknown color" sentinel.

mod color;
mod decode;
pub mod error;
mod extract;

pub use crate::color::{Color, Hsv};
pub use crate::decode::{Image, decode};
use crate::error::Result;
pub use crate::extract::{DEFAULT_TOLERANCE, Extractor, Policy};

/// Easy, top-level entrypoint for extracting a [`Color`] from a raw RGBA
/// pixel buffer using the default [`Extractor`].
///
/// # Errors
///
/// Fails if `pixels` is not exactly `width * height * 4` bytes long.
pub fn extract(pixels: &[u8], width: u32, height: u32) -> Result<Color> {
    Extractor::default().extract(pixels, width, height)
}

/// Decodes an encoded image and extracts its [`Color`] using the default
/// [`Extractor`].
pub fn sample(bytes: impl AsRef<[u8]>) -> Result<Color> {
    Extractor::default().sample(bytes.as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_uses_defaults() {
        let pixels = [0, 255, 0, 255, 0, 250, 5, 255, 9, 9, 9, 255];
        assert_eq!(extract(&pixels, 3, 1).unwrap(), Color::rgb(0, 255, 0));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_policy_serde_names() {
        assert_eq!(serde_json::to_string(&Policy::Mean).unwrap(), "\"mean\"");
        assert_eq!(serde_json::from_str::<Policy>("\"mode\"").unwrap(), Policy::Mode);
    }
}
