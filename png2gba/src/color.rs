use crate::utils::{bgr555_to_rgb888, decode_555, encode_555_unchecked, rgb888_to_555};
use core::{fmt, str::FromStr};
use snafu::{ensure, OptionExt, Snafu};

/// A 15-bit GBA color, packed as `(B5 << 10) | (G5 << 5) | R5`. Bit 15 is always clear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(transparent)]
pub struct Color15(u16);

impl Color15 {
    pub const BLACK: Color15 = Color15(0);

    /// Wraps a raw BGR555 word, dropping bit 15.
    #[inline]
    pub const fn from_raw(raw: u16) -> Self {
        Self(raw & 0x7FFF)
    }

    #[inline]
    pub const fn raw(self) -> u16 {
        self.0
    }

    #[inline]
    pub const fn from_rgb888(rgb: [u8; 3]) -> Self {
        Self(encode_555_unchecked(rgb888_to_555(rgb)))
    }

    /// The 5-bit `[r, g, b]` fields.
    #[inline]
    pub const fn components(self) -> [u8; 3] {
        decode_555(self.0)
    }

    /// Expands back to 8 bits per channel. Lossy colors come back with their low bits
    /// reconstructed, not the original values.
    #[inline]
    pub const fn to_rgb888(self) -> [u8; 3] {
        bgr555_to_rgb888(self.components())
    }
}

impl From<Color15> for u16 {
    #[inline]
    fn from(color: Color15) -> Self {
        color.0
    }
}

impl fmt::UpperHex for Color15 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::UpperHex::fmt(&self.0, f)
    }
}

impl fmt::LowerHex for Color15 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.0, f)
    }
}

/// Truncates a 24-bit color to 15 bits: `(b >> 3) << 10 | (g >> 3) << 5 | (r >> 3)`.
#[inline]
pub const fn quantize(r: u8, g: u8, b: u8) -> Color15 {
    Color15::from_rgb888([r, g, b])
}

#[derive(Debug, Snafu)]
#[snafu(module)]
pub enum ParseColorError {
    #[snafu(display("color must start with '#'"))]
    MissingHash,
    #[snafu(display("expected 6 hex digits after '#', found {len} bytes"))]
    InvalidLength { len: usize },
    #[snafu(display("invalid hex digit at position {position}"))]
    InvalidDigit { position: usize },
}

/// Parses a `#RRGGBB` color and quantizes it.
pub fn parse_hex_color(input: &str) -> Result<Color15, ParseColorError> {
    let digits = input
        .strip_prefix('#')
        .context(parse_color_error::MissingHashSnafu)?
        .as_bytes();
    ensure!(
        digits.len() == 6,
        parse_color_error::InvalidLengthSnafu { len: digits.len() }
    );

    let mut rgb = [0u8; 3];
    for (i, channel) in rgb.iter_mut().enumerate() {
        let hi = hex_digit(digits[2 * i], 2 * i + 1)?;
        let lo = hex_digit(digits[2 * i + 1], 2 * i + 2)?;
        *channel = hi << 4 | lo;
    }

    Ok(Color15::from_rgb888(rgb))
}

fn hex_digit(byte: u8, position: usize) -> Result<u8, ParseColorError> {
    match byte {
        b'0'..=b'9' => Ok(byte - b'0'),
        b'a'..=b'f' => Ok(byte - b'a' + 10),
        b'A'..=b'F' => Ok(byte - b'A' + 10),
        _ => parse_color_error::InvalidDigitSnafu { position }.fail(),
    }
}

impl FromStr for Color15 {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_hex_color(s)
    }
}
