//! Converts decoded RGB/RGBA rasters into the data layouts the Game Boy Advance expects.
//!
//! The GBA stores colors as 15-bit `xBBBBBGGGGGRRRRR` words (see [`Color15`]). Bitmap modes read
//! them straight from memory, while tiled modes read 8-bit indices into a 256-entry palette whose
//! slot 0 is the transparent color. Tile memory is addressed in 8x8 blocks, so sprite and
//! background data must be emitted block by block rather than row by row.
//!
//! # Pipeline
//!
//! ```plain
//! PixelGrid --PixelTraversal--> (row, col) --quantize--> Color15 --PaletteTable--> u8 index
//!                                                            |                        |
//!                                                            `------> EncodedImage <--'
//!                                                                          |
//!                                                                     Declaration
//! ```
//!
//! - [`grid::PixelGrid`] borrows the decoded bytes (3 or 4 channels, alpha is ignored).
//! - [`traverse::PixelTraversal`] yields coordinates in [linear](traverse::TraversalOrder::Linear)
//!   or [tiled](traverse::TraversalOrder::Tiled) order. Edge tiles of images whose size is not a
//!   multiple of 8 are clipped, so every pixel is visited exactly once.
//! - [`color::quantize`] truncates each 8-bit channel to 5 bits.
//! - [`palette::PaletteTable`] assigns indices in first-seen order, with the color key fixed at
//!   index 0. At most 255 distinct colors fit.
//! - [`encode::EncodeContext`] drives the above for one image, or for several images sharing one
//!   palette.
//! - [`declaration::Declaration`] renders the result as a C header:
//!
//! ```c
//! #define logo_width 2
//! #define logo_height 2
//!
//! const unsigned char logo_data[4] = {
//!     0x01, 0x01, 0x01, 0x01,
//! };
//!
//! const unsigned short logo_palette[256] = {
//!     0x7C1F, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000,
//!     ...
//! };
//! ```
#![cfg_attr(not(any(test, feature = "std")), no_std)]

#[cfg(feature = "alloc")]
extern crate alloc;

#[cfg(feature = "alloc")]
pub mod batch;
#[cfg(feature = "alloc")]
pub mod declaration;
#[cfg(feature = "alloc")]
pub mod encode;

pub mod color;
pub mod grid;
pub mod palette;
pub mod traverse;
pub mod utils;

pub use color::{parse_hex_color, quantize, Color15};
pub use grid::PixelGrid;
pub use palette::PaletteTable;
pub use traverse::{PixelTraversal, TraversalOrder};

#[cfg(feature = "alloc")]
pub use batch::Batch;
#[cfg(feature = "alloc")]
pub use declaration::Declaration;
#[cfg(feature = "alloc")]
pub use encode::{EncodeContext, EncodeOptions, EncodedImage};

pub mod consts {
    /// Edge length of a hardware tile, in pixels.
    pub const TILE_SIZE: usize = 8;

    /// Number of slots in a GBA palette bank, including the color key at index 0.
    pub const PALETTE_SIZE: usize = 256;

    /// Highest number of entries a [`PaletteTable`](crate::PaletteTable) will hold.
    ///
    /// Insertion stops one short of [`PALETTE_SIZE`]: a table holding 255 colors (color key
    /// included) rejects the next new color.
    pub const PALETTE_USABLE: usize = PALETTE_SIZE - 1;

    /// Tokens per emitted row for 8-bit palette indices.
    pub const INDICES_PER_ROW: usize = 12;

    /// Tokens per emitted row for 16-bit values (raw colors and palette entries).
    pub const COLORS_PER_ROW: usize = 9;

    /// Color key used when none is configured.
    pub const DEFAULT_COLORKEY: &str = "#ff00ff";
}
