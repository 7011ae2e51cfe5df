//! Image decoding into flat RGBA buffers.

use exn::ResultExt;
use tracing::instrument;

use crate::error::{ErrorKind, Result};

/// A decoded image: interleaved RGBA8 pixels, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

/// Decodes an encoded image (PNG) into RGBA8, converting from whatever
/// color type the file was stored as.
///
/// # Errors
///
/// Returns [`ErrorKind::Decode`] if the bytes are not a well-formed image.
#[instrument(level = "trace", skip(bytes), fields(input_size = bytes.len(), width, height))]
pub fn decode(bytes: &[u8]) -> Result<Image> {
    let decoded = image::load_from_memory(bytes)
        .or_raise(|| ErrorKind::Decode("not a well-formed image".to_string()))?
        .into_rgba8();
    let (width, height) = decoded.dimensions();
    tracing::Span::current().record("width", width).record("height", height);
    Ok(Image {
        width,
        height,
        pixels: decoded.into_raw(),
    })
}
