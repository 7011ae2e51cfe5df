//! Representative color extraction from RGBA pixel buffers.

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use exn::OptionExt;
use tracing::instrument;

use crate::decode::{Image, decode};
use crate::error::{Error, ErrorKind, Result};
use crate::Color;

/// Two colors land in the same bucket when each of R, G and B differs by
/// less than this.
pub const DEFAULT_TOLERANCE: u8 = 20;

/// How a single color is derived from the opaque pixels of an image.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(rename_all = "lowercase"))]
pub enum Policy {
    /// The most common color, grouping near-equal colors into buckets.
    /// Tolerates anti-aliased edge pixels.
    #[default]
    Mode,
    /// Arithmetic mean of all opaque pixels.
    Mean,
}
impl Policy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Policy::Mode => "mode",
            Policy::Mean => "mean",
        }
    }
}
impl FromStr for Policy {
    type Err = Error;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mode" => Ok(Policy::Mode),
            "mean" | "average" => Ok(Policy::Mean),
            _ => exn::bail!(ErrorKind::UnknownPolicy(s.to_string())),
        }
    }
}
impl Display for Policy {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

/// A group of near-equal colors. The key is whichever color opened the
/// bucket and never moves afterwards.
struct Bucket {
    key: Color,
    count: u64,
}
impl Bucket {
    fn admits(&self, color: &Color, tolerance: u8) -> bool {
        self.key.r.abs_diff(color.r) < tolerance
            && self.key.g.abs_diff(color.g) < tolerance
            && self.key.b.abs_diff(color.b) < tolerance
    }
}

/// Derives one representative [`Color`] from a decoded image.
///
/// Fully transparent pixels are ignored; an image with no other pixels
/// yields [`Color::TRANSPARENT`]. Any other result is fully opaque.
///
/// # Examples
///
/// ```rust
/// use swatch_color::{Color, Extractor, Policy};
///
/// let red = [255, 0, 0, 255];
/// let pixels: Vec<u8> = red.iter().copied().cycle().take(4 * 4).collect();
/// let color = Extractor::default().extract(&pixels, 2, 2).unwrap();
/// assert_eq!(color, Color::rgb(255, 0, 0));
///
/// let mean = Extractor::default().with_policy(Policy::Mean);
/// assert_eq!(mean.extract(&pixels, 2, 2).unwrap(), Color::rgb(255, 0, 0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Extractor {
    policy: Policy,
    tolerance: u8,
}
impl Default for Extractor {
    fn default() -> Self {
        Self {
            policy: Policy::default(),
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}
impl Extractor {
    pub fn new(policy: Policy, tolerance: u8) -> Self {
        Self::default().with_policy(policy).with_tolerance(tolerance)
    }

    #[must_use]
    pub fn with_policy(mut self, policy: Policy) -> Self {
        self.policy = policy;
        self
    }

    /// Sets the bucket tolerance. A tolerance of zero would never group
    /// anything (not even identical colors) so it is raised to one.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: u8) -> Self {
        self.tolerance = tolerance.max(1);
        self
    }

    pub fn policy(&self) -> Policy {
        self.policy
    }

    pub fn tolerance(&self) -> u8 {
        self.tolerance
    }

    /// Extracts a color from interleaved RGBA bytes.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::Decode`] if `pixels` is not exactly
    /// `width * height * 4` bytes long.
    #[instrument(level = "trace", skip(self, pixels), fields(policy = %self.policy, buffer_size = pixels.len()))]
    pub fn extract(&self, pixels: &[u8], width: u32, height: u32) -> Result<Color> {
        let expected = usize::try_from(width)
            .ok()
            .zip(usize::try_from(height).ok())
            .and_then(|(w, h)| w.checked_mul(h))
            .and_then(|n| n.checked_mul(4))
            .ok_or_raise(|| ErrorKind::Decode(format!("{width}x{height} image is too large")))?;
        if pixels.len() != expected {
            exn::bail!(ErrorKind::Decode(format!(
                "{width}x{height} RGBA image needs {expected} bytes, found {}",
                pixels.len()
            )));
        }
        let opaque = pixels
            .chunks_exact(4)
            .map(|p| Color::new(p[0], p[1], p[2], p[3]))
            .filter(|color| color.a != 0);
        Ok(match self.policy {
            Policy::Mode => self.mode(opaque),
            Policy::Mean => Self::mean(opaque),
        })
    }

    /// Extracts a color from an already decoded [`Image`].
    pub fn extract_image(&self, image: &Image) -> Result<Color> {
        self.extract(&image.pixels, image.width, image.height)
    }

    /// Decodes encoded image bytes (PNG) and extracts their color.
    #[instrument(level = "debug", skip(self, bytes), fields(input_size = bytes.len()))]
    pub fn sample(&self, bytes: &[u8]) -> Result<Color> {
        self.extract_image(&decode(bytes)?)
    }

    fn mode(&self, pixels: impl Iterator<Item = Color>) -> Color {
        let mut buckets: Vec<Bucket> = Vec::new();
        for pixel in pixels {
            match buckets.iter_mut().find(|bucket| bucket.admits(&pixel, self.tolerance)) {
                Some(bucket) => bucket.count += 1,
                None => buckets.push(Bucket { key: pixel, count: 1 }),
            }
        }
        tracing::trace!(buckets = buckets.len(), "grouped opaque pixels");
        // `max_by_key` keeps the last of equal maximums; reversing first means
        // ties go to the bucket that was opened earliest.
        buckets
            .iter()
            .rev()
            .max_by_key(|bucket| bucket.count)
            .map(|bucket| bucket.key.opaque())
            .unwrap_or(Color::TRANSPARENT)
    }

    fn mean(pixels: impl Iterator<Item = Color>) -> Color {
        let (mut r, mut g, mut b, mut count) = (0u64, 0u64, 0u64, 0u64);
        for pixel in pixels {
            r += u64::from(pixel.r);
            g += u64::from(pixel.g);
            b += u64::from(pixel.b);
            count += 1;
        }
        if count == 0 {
            return Color::TRANSPARENT;
        }
        // Rounded to nearest; the mean of u8 values always fits back in a u8.
        let channel = |sum: u64| u8::try_from((sum + count / 2) / count).unwrap_or(u8::MAX);
        Color::rgb(channel(r), channel(g), channel(b))
    }
}
