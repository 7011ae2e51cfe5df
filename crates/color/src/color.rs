use std::fmt::{Display, Formatter, Result as FmtResult};

/// An 8-bit-per-channel RGBA color.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

/// Hue/saturation/value representation of a [`Color`] (alpha is dropped).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsv {
    /// Degrees, in the range `0.0..360.0`.
    pub hue: f32,
    /// In the range `0.0..=1.0`.
    pub saturation: f32,
    /// The brightest channel.
    pub value: u8,
}

impl Color {
    /// Fully transparent black, reserved to mean "no known color".
    pub const TRANSPARENT: Color = Color::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, u8::MAX)
    }

    /// Returns `true` for the "no known color" sentinel.
    pub fn is_unknown(&self) -> bool {
        *self == Self::TRANSPARENT
    }

    /// Same color with the alpha channel forced to fully opaque.
    #[must_use]
    pub fn opaque(self) -> Self {
        Self { a: u8::MAX, ..self }
    }

    /// Packs the channels into a single integer as `0xRRGGBBAA`.
    ///
    /// ```rust
    /// use swatch_color::Color;
    /// assert_eq!(Color::new(0x12, 0x34, 0x56, 0x78).pack(), 0x1234_5678);
    /// ```
    pub fn pack(self) -> u32 {
        u32::from_be_bytes([self.r, self.g, self.b, self.a])
    }

    /// Inverse of [`pack`](Self::pack).
    pub fn unpack(packed: u32) -> Self {
        let [r, g, b, a] = packed.to_be_bytes();
        Self { r, g, b, a }
    }

    pub fn to_hsv(&self) -> Hsv {
        let (r, g, b) = (f32::from(self.r), f32::from(self.g), f32::from(self.b));
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let delta = max - min;
        let hue = if delta == 0.0 {
            0.0
        } else if max == r {
            60.0 * ((g - b) / delta).rem_euclid(6.0)
        } else if max == g {
            60.0 * ((b - r) / delta + 2.0)
        } else {
            60.0 * ((r - g) / delta + 4.0)
        };
        let saturation = if max == 0.0 { 0.0 } else { delta / max };
        Hsv {
            hue,
            saturation,
            value: self.r.max(self.g).max(self.b),
        }
    }
}

impl From<[u8; 4]> for Color {
    fn from([r, g, b, a]: [u8; 4]) -> Self {
        Self { r, g, b, a }
    }
}

impl From<Color> for [u8; 4] {
    fn from(color: Color) -> Self {
        [color.r, color.g, color.b, color.a]
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
    }
}

impl Display for Hsv {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "hsv({:.0}, {:.0}%, {})", self.hue, self.saturation * 100.0, self.value)
    }
}
