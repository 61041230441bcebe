use snafu::{ensure, OptionExt, Snafu};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelLayout {
    Rgb,
    /// The alpha channel is carried along but never read.
    Rgba,
}

impl ChannelLayout {
    pub const fn from_channels(channels: usize) -> Option<Self> {
        match channels {
            3 => Some(Self::Rgb),
            4 => Some(Self::Rgba),
            _ => None,
        }
    }

    #[inline]
    pub const fn channels(self) -> usize {
        match self {
            Self::Rgb => 3,
            Self::Rgba => 4,
        }
    }
}

#[derive(Debug, Snafu)]
#[snafu(module)]
pub enum GridError {
    #[snafu(display("unsupported channel layout: {channels} channels per pixel, expected 3 or 4"))]
    UnsupportedChannelLayout { channels: usize },
    #[snafu(display(
        "pixel data has {len} bytes, but a {width}x{height} image with {channels} channels needs {}",
        width * height * channels
    ))]
    DimensionMismatch {
        width: usize,
        height: usize,
        channels: usize,
        len: usize,
    },
}

/// A decoded image: `height` rows of `width` pixels, stored contiguously, each pixel 3 or 4 bytes.
#[derive(Debug, Clone, Copy)]
pub struct PixelGrid<'a> {
    width: usize,
    height: usize,
    layout: ChannelLayout,
    data: &'a [u8],
}

impl<'a> PixelGrid<'a> {
    pub fn new(
        width: usize,
        height: usize,
        channels: usize,
        data: &'a [u8],
    ) -> Result<Self, GridError> {
        let layout = ChannelLayout::from_channels(channels)
            .context(grid_error::UnsupportedChannelLayoutSnafu { channels })?;

        ensure!(
            width * height * channels == data.len(),
            grid_error::DimensionMismatchSnafu {
                width,
                height,
                channels,
                len: data.len()
            }
        );

        Ok(Self {
            width,
            height,
            layout,
            data,
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn layout(&self) -> ChannelLayout {
        self.layout
    }

    /// Bytes of row `row`.
    ///
    /// # Panics
    ///
    /// If `row` is out of bounds.
    #[inline]
    pub fn row(&self, row: usize) -> &'a [u8] {
        let stride = self.width * self.layout.channels();
        &self.data[row * stride..][..stride]
    }

    /// The red, green, and blue samples at `(row, col)`; alpha is dropped.
    ///
    /// # Panics
    ///
    /// If the coordinate is out of bounds.
    #[inline]
    pub fn rgb(&self, row: usize, col: usize) -> [u8; 3] {
        assert!(col < self.width, "column {col} out of bounds");
        let channels = self.layout.channels();
        let &[r, g, b, ..] = &self.row(row)[col * channels..] else {
            unreachable!("pixel has at least 3 channels")
        };
        [r, g, b]
    }
}
