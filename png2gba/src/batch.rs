use crate::{
    declaration::{DeclaredImage, Declaration},
    encode::{EncodeContext, EncodeError, EncodeOptions, EncodedImage},
    grid::PixelGrid,
    palette::PaletteTable,
};
use alloc::{string::String, vec::Vec};
use log::debug;
use snafu::{ensure, ResultExt, Snafu};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaletteSharing {
    /// Every image starts from a palette holding only the color key.
    #[default]
    PerImage,
    /// Colors accumulate in one palette across the whole batch.
    Shared,
}

#[derive(Debug, Snafu)]
pub enum BatchError {
    #[snafu(display("could not encode `{name}`: {source}"))]
    Encode { name: String, source: EncodeError },
    #[snafu(display("an image named `{name}` is already part of the batch"))]
    DuplicateName { name: String },
}

/// Several images written to one header.
///
/// Images are encoded as they are pushed; [`Batch::finish`] closes the declaration.
#[derive(Debug, Clone)]
pub struct Batch {
    name: String,
    sharing: PaletteSharing,
    context: EncodeContext,
    images: Vec<DeclaredImage>,
    palettes: Vec<PaletteTable>,
}

impl Batch {
    pub fn new(name: impl Into<String>, options: EncodeOptions, sharing: PaletteSharing) -> Self {
        Self {
            name: name.into(),
            sharing,
            context: EncodeContext::new(options),
            images: Vec::new(),
            palettes: Vec::new(),
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.images.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Encodes `grid` as the next image of the batch.
    ///
    /// Names must be unique within a batch, since each one becomes a pair of `#define`s.
    ///
    /// On error the batch is unchanged, so the caller may skip the image and carry on.
    pub fn push(&mut self, name: impl Into<String>, grid: &PixelGrid) -> Result<(), BatchError> {
        let name = name.into();
        ensure!(
            !self.images.iter().any(|image| image.name == name),
            DuplicateNameSnafu { name }
        );

        if self.sharing == PaletteSharing::PerImage {
            self.context.reset();
        }

        let EncodedImage {
            width,
            height,
            data,
            palette,
        } = self
            .context
            .encode_with_state(grid)
            .context(EncodeSnafu { name: &name })?;

        debug!(
            "`{}` #{}: `{name}` ({width}x{height})",
            self.name,
            self.images.len()
        );

        if self.sharing == PaletteSharing::PerImage {
            self.palettes.extend(palette);
        }
        self.images.push(DeclaredImage {
            name,
            width,
            height,
            data,
        });

        Ok(())
    }

    pub fn finish(self) -> Declaration {
        let Batch {
            name,
            sharing,
            context,
            mut images,
            palettes,
        } = self;

        let palettes = match sharing {
            PaletteSharing::PerImage => palettes,
            PaletteSharing::Shared => context.palette().cloned().into_iter().collect(),
        };

        // a lone image is declared under the batch name
        if let [image] = images.as_mut_slice() {
            image.name.clone_from(&name);
        }

        Declaration {
            name,
            images,
            palettes,
            guard: None,
        }
    }
}
