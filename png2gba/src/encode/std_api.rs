use crate::{
    encode::PixelData,
    palette::PaletteTable,
    utils::ByteOrder,
};
use byteorder::WriteBytesExt;
use snafu::{ResultExt, Snafu};
use std::io::Write;

#[derive(Debug, Snafu)]
pub enum WriteError {
    WriteIo { source: std::io::Error },
}

impl PixelData {
    /// Writes the pixel data as a raw blob: one byte per palette index, or one 16-bit word per
    /// color in byte order `B`. The GBA is little-endian.
    pub fn write_binary<B: ByteOrder, W: Write>(&self, mut w: W) -> Result<(), WriteError> {
        match self {
            PixelData::Indices(indices) => w.write_all(indices).context(WriteIoSnafu),
            PixelData::Colors(colors) => colors
                .iter()
                .try_for_each(|color| w.write_u16::<B>(color.raw()))
                .context(WriteIoSnafu),
        }
    }
}

impl PaletteTable {
    /// Writes all 256 slots as 16-bit words in byte order `B`.
    pub fn write_binary<B: ByteOrder, W: Write>(&self, mut w: W) -> Result<(), WriteError> {
        self.table()
            .iter()
            .try_for_each(|color| w.write_u16::<B>(color.raw()))
            .context(WriteIoSnafu)
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        utils::{BigEndian, LittleEndian},
        Color15, EncodeContext, EncodeOptions, PixelGrid,
    };

    #[test]
    fn colors_are_written_as_words() {
        let data = [0xFF, 0, 0xFF, 0xFF, 0xFF, 0xFF];
        let grid = PixelGrid::new(2, 1, 3, &data).unwrap();
        let image = EncodeContext::encode(&grid, EncodeOptions::default()).unwrap();

        let mut le = Vec::new();
        image.data.write_binary::<LittleEndian, _>(&mut le).unwrap();
        assert_eq!(le, [0x1F, 0x7C, 0xFF, 0x7F]);

        let mut be = Vec::new();
        image.data.write_binary::<BigEndian, _>(&mut be).unwrap();
        assert_eq!(be, [0x7C, 0x1F, 0x7F, 0xFF]);
    }

    #[test]
    fn indices_are_written_as_bytes_and_palette_in_full() {
        let data = [0, 0, 0, 0xFF, 0, 0xFF, 0, 0, 0];
        let grid = PixelGrid::new(3, 1, 3, &data).unwrap();
        let options = EncodeOptions {
            palette: true,
            ..Default::default()
        };
        let image = EncodeContext::encode(&grid, options).unwrap();

        let mut indices = Vec::new();
        image.data.write_binary::<LittleEndian, _>(&mut indices).unwrap();
        assert_eq!(indices, [1, 0, 1]);

        let mut palette = Vec::new();
        image
            .palette
            .as_ref()
            .unwrap()
            .write_binary::<LittleEndian, _>(&mut palette)
            .unwrap();
        assert_eq!(palette.len(), 512);
        assert_eq!(&palette[..4], &[0x1F, 0x7C, 0x00, 0x00]);
        assert!(palette[4..].iter().all(|&b| b == 0));
        assert_eq!(
            Color15::from_raw(u16::from_le_bytes([palette[0], palette[1]])),
            options.colorkey
        );
    }
}
