pub use byteorder::{BigEndian, ByteOrder, LittleEndian};

const MASK_5: u16 = 0b1_1111;

/// Splits a BGR555 word into its 5-bit R, G, and B components. Bit 15 is ignored.
#[inline]
pub const fn decode_555(pixel: u16) -> [u8; 3] {
    let r = pixel & MASK_5;
    let g = (pixel >> 5) & MASK_5;
    let b = (pixel >> 10) & MASK_5;

    [r as u8, g as u8, b as u8]
}

/// Composes 5-bit R, G, and B values into a BGR555 word. Does not mask off higher bits if they
/// are set.
#[inline]
pub const fn encode_555_unchecked([r, g, b]: [u8; 3]) -> u16 {
    ((b as u16) << 10) | ((g as u16) << 5) | (r as u16)
}

/// Truncates an RGB888 pixel to 5 bits per channel (`channel >> 3`, no rounding).
#[inline]
pub const fn rgb888_to_555([r, g, b]: [u8; 3]) -> [u8; 3] {
    [r >> 3, g >> 3, b >> 3]
}

/// Expands 5-bit components back to 8 bits by replicating the high bits into the low ones, so
/// that `0x1F` maps to `0xFF` and `0` to `0`.
#[inline]
pub const fn bgr555_to_rgb888([r, g, b]: [u8; 3]) -> [u8; 3] {
    [(r << 3) | (r >> 2), (g << 3) | (g >> 2), (b << 3) | (b >> 2)]
}
