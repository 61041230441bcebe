use crate::{
    consts::{COLORS_PER_ROW, INDICES_PER_ROW},
    grid::{ChannelLayout, PixelGrid},
    palette::{PaletteError, PaletteTable},
    quantize,
    traverse::{PixelTraversal, TraversalOrder},
    Color15,
};
use alloc::vec::Vec;
use log::{debug, warn};
use snafu::{ResultExt, Snafu};

#[cfg(feature = "std")]
mod std_api;
#[cfg(feature = "std")]
pub use std_api::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeOptions {
    /// Emit palette indices instead of raw colors.
    pub palette: bool,
    pub order: TraversalOrder,
    /// Palette slot 0. Unused without `palette`.
    pub colorkey: Color15,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            palette: false,
            order: TraversalOrder::Linear,
            // consts::DEFAULT_COLORKEY
            colorkey: quantize(0xFF, 0x00, 0xFF),
        }
    }
}

#[derive(Debug, Snafu)]
pub enum EncodeError {
    #[snafu(display("could not build palette: {source}"))]
    Palette { source: PaletteError },
}

/// Pixel values in emission order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PixelData {
    Colors(Vec<Color15>),
    Indices(Vec<u8>),
}

impl PixelData {
    #[inline]
    pub fn len(&self) -> usize {
        match self {
            PixelData::Colors(colors) => colors.len(),
            PixelData::Indices(indices) => indices.len(),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Tokens per line when rendered.
    #[inline]
    pub fn per_row(&self) -> usize {
        match self {
            PixelData::Colors(_) => COLORS_PER_ROW,
            PixelData::Indices(_) => INDICES_PER_ROW,
        }
    }
}

#[derive(Debug, Clone)]
pub struct EncodedImage {
    pub width: usize,
    pub height: usize,
    pub data: PixelData,
    /// The palette as it stood after this image, when encoding with a palette.
    pub palette: Option<PaletteTable>,
}

/// Encoder state that may outlive a single image: the palette, if one is in use.
///
/// Traversal state is never part of the context; every image gets a fresh traversal.
#[derive(Debug, Clone)]
pub struct EncodeContext {
    options: EncodeOptions,
    palette: Option<PaletteTable>,
}

impl EncodeContext {
    pub fn new(options: EncodeOptions) -> Self {
        Self {
            options,
            palette: options.palette.then(|| PaletteTable::new(options.colorkey)),
        }
    }

    /// Encodes a single image with a fresh palette.
    pub fn encode(grid: &PixelGrid, options: EncodeOptions) -> Result<EncodedImage, EncodeError> {
        let mut ctx = EncodeContext::new(options);
        ctx.encode_with_state(grid)
    }

    #[inline]
    pub fn options(&self) -> &EncodeOptions {
        &self.options
    }

    #[inline]
    pub fn palette(&self) -> Option<&PaletteTable> {
        self.palette.as_ref()
    }

    /// Drops all colors collected so far, keeping only the color key.
    pub fn reset(&mut self) {
        *self = EncodeContext::new(self.options);
    }

    /// Encodes an image, resolving colors through the palette collected so far.
    ///
    /// If the palette overflows, the error is returned and the palette is restored to its state
    /// before this call.
    pub fn encode_with_state(&mut self, grid: &PixelGrid) -> Result<EncodedImage, EncodeError> {
        let (width, height) = (grid.width(), grid.height());

        if grid.layout() == ChannelLayout::Rgba {
            warn!("ignoring alpha channel of {width}x{height} image");
        }

        let colors = PixelTraversal::new(width, height, self.options.order).map(|(row, col)| {
            let [r, g, b] = grid.rgb(row, col);
            quantize(r, g, b)
        });

        let data = match &mut self.palette {
            Some(palette) => {
                let before = palette.clone();
                let indices = colors
                    .map(|color| palette.insert_or_lookup(color))
                    .collect::<Result<Vec<_>, _>>();

                match indices {
                    Ok(indices) => {
                        debug!(
                            "{width}x{height} image uses a palette of {} colors",
                            palette.len()
                        );
                        PixelData::Indices(indices)
                    }
                    Err(e) => {
                        *palette = before;
                        return Err(e).context(PaletteSnafu);
                    }
                }
            }
            None => PixelData::Colors(colors.collect()),
        };

        Ok(EncodedImage {
            width,
            height,
            data,
            palette: self.palette.clone(),
        })
    }
}
