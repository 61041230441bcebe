use crate::{
    consts::{PALETTE_SIZE, PALETTE_USABLE},
    Color15,
};
use snafu::{ensure, Snafu};

#[derive(Debug, Snafu)]
#[snafu(module)]
pub enum PaletteError {
    #[snafu(display(
        "too many colors for a palette: color 0x{color:04X} would be entry {}, but only {} fit",
        PALETTE_USABLE + 1,
        PALETTE_USABLE
    ))]
    CapacityExceeded { color: Color15 },
}

/// An insertion-ordered, deduplicating color table with the color key pinned at index 0.
///
/// Lookup is a linear scan over the assigned entries.
#[derive(Debug, Clone)]
pub struct PaletteTable {
    entries: [Color15; PALETTE_SIZE],
    len: usize,
}

impl PaletteTable {
    pub fn new(key_color: Color15) -> Self {
        let mut entries = [Color15::BLACK; PALETTE_SIZE];
        entries[0] = key_color;
        Self { entries, len: 1 }
    }

    /// Returns the index of `color`, appending it if it has not been seen yet.
    ///
    /// Fails once the table holds [`PALETTE_USABLE`] entries and `color` is new. The table is
    /// left unchanged in that case.
    pub fn insert_or_lookup(&mut self, color: Color15) -> Result<u8, PaletteError> {
        if let Some(index) = self.position(color) {
            return Ok(index);
        }

        ensure!(
            self.len < PALETTE_USABLE,
            palette_error::CapacityExceededSnafu { color }
        );

        let index = self.len;
        self.entries[index] = color;
        self.len += 1;

        Ok(index as u8)
    }

    /// Index of `color`, if present.
    #[inline]
    pub fn position(&self, color: Color15) -> Option<u8> {
        self.entries()
            .iter()
            .position(|&entry| entry == color)
            .map(|index| index as u8)
    }

    #[inline]
    pub fn contains(&self, color: Color15) -> bool {
        self.position(color).is_some()
    }

    #[inline]
    pub fn key_color(&self) -> Color15 {
        self.entries[0]
    }

    #[inline]
    pub fn get(&self, index: u8) -> Option<Color15> {
        self.entries().get(usize::from(index)).copied()
    }

    /// Number of assigned entries, color key included. Never zero.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Always `false`, the color key occupies slot 0 from construction on.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The assigned entries, in index order.
    #[inline]
    pub fn entries(&self) -> &[Color15] {
        &self.entries[..self.len]
    }

    /// All [`PALETTE_SIZE`] slots, unassigned ones zeroed.
    #[inline]
    pub fn table(&self) -> &[Color15; PALETTE_SIZE] {
        &self.entries
    }
}
