//! Pixel visiting orders.
//!
//! Both orders are a walk over rectangular blocks: blocks left to right and top to bottom, and
//! pixels row-major inside each block. [`TraversalOrder::Linear`] uses a single block covering
//! the whole image, [`TraversalOrder::Tiled`] uses [`TILE_SIZE`]-square blocks. Blocks in the
//! last block column and row are clipped to the image, so images whose size is not a multiple
//! of the tile size still have every pixel visited exactly once.
//!
//! For a 10x3 image the tiled order is:
//!
//! ```plain
//!   0  1  2  3  4  5  6  7 | 24 25
//!   8  9 10 11 12 13 14 15 | 26 27
//!  16 17 18 19 20 21 22 23 | 28 29
//! ```
use crate::consts::TILE_SIZE;
use core::iter::FusedIterator;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TraversalOrder {
    /// Row-major over the whole image.
    #[default]
    Linear,
    /// 8x8 blocks, block-row-major, row-major within each block.
    Tiled,
}

/// Where a paused traversal resumes.
///
/// `block_row`/`block_col` index the current block, `row`/`col` are offsets inside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TraversalCursor {
    pub block_row: usize,
    pub block_col: usize,
    pub row: usize,
    pub col: usize,
}

/// Yields every `(row, col)` of a `width` x `height` grid once, in the requested order.
///
/// Each traversal owns its cursor, so traversals of different images never share state.
#[derive(Debug, Clone)]
pub struct PixelTraversal {
    width: usize,
    height: usize,
    block_width: usize,
    block_height: usize,
    cursor: TraversalCursor,
    remaining: usize,
}

impl PixelTraversal {
    pub fn new(width: usize, height: usize, order: TraversalOrder) -> Self {
        let (block_width, block_height) = match order {
            TraversalOrder::Linear => (width, height),
            TraversalOrder::Tiled => (TILE_SIZE, TILE_SIZE),
        };

        Self {
            width,
            height,
            block_width,
            block_height,
            cursor: TraversalCursor::default(),
            remaining: width * height,
        }
    }

    #[inline]
    pub fn linear(width: usize, height: usize) -> Self {
        Self::new(width, height, TraversalOrder::Linear)
    }

    #[inline]
    pub fn tiled(width: usize, height: usize) -> Self {
        Self::new(width, height, TraversalOrder::Tiled)
    }

    /// Rewinds to the first pixel.
    pub fn reset(&mut self) {
        self.cursor = TraversalCursor::default();
        self.remaining = self.width * self.height;
    }

    #[inline]
    pub fn cursor(&self) -> TraversalCursor {
        self.cursor
    }

    /// Width of the current block, clipped to the right edge.
    #[inline]
    fn clipped_block_width(&self) -> usize {
        let left = self.cursor.block_col * self.block_width;
        self.block_width.min(self.width - left)
    }

    /// Height of the current block, clipped to the bottom edge.
    #[inline]
    fn clipped_block_height(&self) -> usize {
        let top = self.cursor.block_row * self.block_height;
        self.block_height.min(self.height - top)
    }

    fn advance(&mut self) {
        self.cursor.col += 1;
        if self.cursor.col < self.clipped_block_width() {
            return;
        }
        self.cursor.col = 0;

        self.cursor.row += 1;
        if self.cursor.row < self.clipped_block_height() {
            return;
        }
        self.cursor.row = 0;

        self.cursor.block_col += 1;
        if self.cursor.block_col * self.block_width < self.width {
            return;
        }
        self.cursor.block_col = 0;

        self.cursor.block_row += 1;
    }
}

impl Iterator for PixelTraversal {
    type Item = (usize, usize);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        debug_assert!(self.cursor.col < self.clipped_block_width());
        debug_assert!(self.cursor.row < self.clipped_block_height());

        let TraversalCursor {
            block_row,
            block_col,
            row,
            col,
        } = self.cursor;
        let position = (
            block_row * self.block_height + row,
            block_col * self.block_width + col,
        );

        self.remaining -= 1;
        self.advance();

        Some(position)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for PixelTraversal {}

impl FusedIterator for PixelTraversal {}
