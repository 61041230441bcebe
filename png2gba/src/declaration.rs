//! C header rendering.
//!
//! A [`Declaration`] describes everything that goes into one header: the `#define`s for each
//! image, one data array, and zero or more palette tables. [`Declaration::render`] is the only
//! place that turns it into text.
use crate::{
    consts::COLORS_PER_ROW,
    encode::{EncodedImage, PixelData},
    palette::PaletteTable,
};
use alloc::{string::String, vec::Vec};
use core::fmt::{self, UpperHex, Write};
use itertools::Itertools;

#[derive(Debug, Clone)]
pub struct DeclaredImage {
    pub name: String,
    pub width: usize,
    pub height: usize,
    pub data: PixelData,
}

#[derive(Debug, Clone)]
pub struct Declaration {
    /// Prefix of the `_data` and `_palette` arrays. With a single image, also the prefix of its
    /// `#define`s.
    pub name: String,
    pub images: Vec<DeclaredImage>,
    /// One table shared by all images, or one per image.
    pub palettes: Vec<PaletteTable>,
    /// Include guard macro, if any.
    pub guard: Option<String>,
}

impl Declaration {
    pub fn from_image(name: impl Into<String>, image: EncodedImage) -> Self {
        let name = name.into();
        let EncodedImage {
            width,
            height,
            data,
            palette,
        } = image;

        Self {
            images: alloc::vec![DeclaredImage {
                name: name.clone(),
                width,
                height,
                data,
            }],
            palettes: palette.into_iter().collect(),
            name,
            guard: None,
        }
    }

    /// Wraps the header in `#ifndef`/`#define`/`#endif`, using [`guard_token`] of the name.
    pub fn with_guard(mut self) -> Self {
        self.guard = Some(guard_token(&self.name));
        self
    }

    /// Length of the longest image's data, i.e. the inner array dimension.
    pub fn entry_count(&self) -> usize {
        self.images
            .iter()
            .map(|image| image.data.len())
            .max()
            .unwrap_or(0)
    }

    pub fn render<W: Write>(&self, w: &mut W) -> fmt::Result {
        if let Some(guard) = &self.guard {
            writeln!(w, "#ifndef {guard}")?;
            writeln!(w, "#define {guard}")?;
            writeln!(w)?;
        }

        for image in &self.images {
            writeln!(w, "#define {}_width {}", image.name, image.width)?;
            writeln!(w, "#define {}_height {}", image.name, image.height)?;
            writeln!(w)?;
        }

        self.render_data(w)?;

        match self.palettes.as_slice() {
            [] => {}
            [palette] => {
                writeln!(w)?;
                writeln!(w, "const unsigned short {}_palette[256] = {{", self.name)?;
                write_rows(w, palette.table(), 4, COLORS_PER_ROW, "    ")?;
                writeln!(w, "}};")?;
            }
            palettes => {
                writeln!(w)?;
                writeln!(
                    w,
                    "const unsigned short {}_palette[{}][256] = {{",
                    self.name,
                    palettes.len()
                )?;
                for palette in palettes {
                    writeln!(w, "    {{")?;
                    write_rows(w, palette.table(), 4, COLORS_PER_ROW, "        ")?;
                    writeln!(w, "    }},")?;
                }
                writeln!(w, "}};")?;
            }
        }

        if self.guard.is_some() {
            writeln!(w)?;
            writeln!(w, "#endif")?;
        }

        Ok(())
    }

    fn render_data<W: Write>(&self, w: &mut W) -> fmt::Result {
        let element = match self.images.first().map(|image| &image.data) {
            Some(PixelData::Indices(_)) => "char",
            Some(PixelData::Colors(_)) | None => "short",
        };

        match self.images.as_slice() {
            [image] => {
                writeln!(
                    w,
                    "const unsigned {element} {}_data[{}] = {{",
                    self.name,
                    image.data.len()
                )?;
                write_data(w, &image.data, "    ")?;
            }
            images => {
                writeln!(
                    w,
                    "const unsigned {element} {}_data[{}][{}] = {{",
                    self.name,
                    images.len(),
                    self.entry_count()
                )?;
                for image in images {
                    writeln!(w, "    {{")?;
                    write_data(w, &image.data, "        ")?;
                    writeln!(w, "    }},")?;
                }
            }
        }

        writeln!(w, "}};")
    }
}

impl fmt::Display for Declaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.render(f)
    }
}

fn write_data<W: Write>(w: &mut W, data: &PixelData, indent: &str) -> fmt::Result {
    match data {
        PixelData::Colors(colors) => write_rows(w, colors, 4, data.per_row(), indent),
        PixelData::Indices(indices) => write_rows(w, indices, 2, data.per_row(), indent),
    }
}

/// Writes `values` as `0x..,` tokens, `per_row` to a line. The last line may be shorter.
fn write_rows<W, I>(w: &mut W, values: I, digits: usize, per_row: usize, indent: &str) -> fmt::Result
where
    W: Write,
    I: IntoIterator,
    I::Item: UpperHex,
{
    let rows = values.into_iter().chunks(per_row);
    for row in &rows {
        writeln!(
            w,
            "{indent}{}",
            row.format_with(" ", |value, f| f(&format_args!(
                "0x{:0digits$X},",
                value,
                digits = digits
            )))
        )?;
    }

    Ok(())
}

/// Derives a C identifier from an input path: the file name without directories or extension,
/// with anything that cannot appear in an identifier replaced by `_`.
///
/// ```
/// # use png2gba::declaration::declaration_name;
/// assert_eq!(declaration_name("art/player-walk.png"), "player_walk");
/// assert_eq!(declaration_name("C:\\gfx\\8x8.font.png"), "_8x8_font");
/// ```
pub fn declaration_name(path: &str) -> String {
    let base = path.rsplit(['/', '\\']).next().unwrap_or(path);
    let stem = match base.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => base,
    };

    let mut name: String = stem
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();

    if name.is_empty() {
        name.push_str("image");
    } else if name.starts_with(|c: char| c.is_ascii_digit()) {
        name.insert(0, '_');
    }

    name
}

/// `player_walk` becomes `PLAYER_WALK_H`.
pub fn guard_token(name: &str) -> String {
    let mut guard = name.to_ascii_uppercase();
    guard.push_str("_H");
    guard
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Color15;

    fn declared(name: &str, data: PixelData) -> DeclaredImage {
        DeclaredImage {
            name: name.to_string(),
            width: data.len(),
            height: 1,
            data,
        }
    }

    #[test]
    fn wraps_rows_at_fixed_width() {
        let mut out = String::new();
        write_rows(&mut out, 0..14u8, 2, 12, "    ").unwrap();
        assert_eq!(
            out,
            "    0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0A, 0x0B,\n    0x0C, 0x0D,\n"
        );

        let mut out = String::new();
        write_rows(&mut out, [0x7C1Fu16, 0x1], 4, 9, "").unwrap();
        assert_eq!(out, "0x7C1F, 0x0001,\n");

        let mut out = String::new();
        write_rows(&mut out, core::iter::empty::<u8>(), 2, 12, "    ").unwrap();
        assert_eq!(out, "");
    }

    #[test]
    fn renders_raw_image() {
        let declaration = Declaration {
            name: "dot".to_string(),
            images: vec![declared(
                "dot",
                PixelData::Colors(vec![Color15::from_raw(0x7FFF)]),
            )],
            palettes: vec![],
            guard: None,
        };

        assert_eq!(
            declaration.to_string(),
            "#define dot_width 1\n\
             #define dot_height 1\n\
             \n\
             const unsigned short dot_data[1] = {\n    0x7FFF,\n};\n"
        );
    }

    #[test]
    fn renders_guard_and_palette() {
        let mut palette = PaletteTable::new(Color15::from_raw(0x7C1F));
        palette.insert_or_lookup(Color15::BLACK).unwrap();
        let declaration = Declaration {
            name: "dot".to_string(),
            images: vec![declared("dot", PixelData::Indices(vec![1]))],
            palettes: vec![palette],
            guard: None,
        }
        .with_guard();

        let text = declaration.to_string();
        assert!(text.starts_with("#ifndef DOT_H\n#define DOT_H\n\n#define dot_width 1\n"));
        assert!(text.contains("const unsigned char dot_data[1] = {\n    0x01,\n};\n"));
        assert!(text.contains(
            "\nconst unsigned short dot_palette[256] = {\n    0x7C1F, 0x0000, 0x0000,"
        ));
        assert!(text.ends_with("};\n\n#endif\n"));
        // 256 entries at 9 per row
        let palette_rows = text
            .lines()
            .skip_while(|line| !line.contains("_palette"))
            .skip(1)
            .take_while(|line| *line != "};")
            .count();
        assert_eq!(palette_rows, 29);
    }

    #[test]
    fn renders_batches_as_two_dimensional_arrays() {
        let declaration = Declaration {
            name: "sprites".to_string(),
            images: vec![
                declared("a", PixelData::Indices(vec![1, 2])),
                declared("b", PixelData::Indices(vec![3])),
            ],
            palettes: vec![
                PaletteTable::new(Color15::BLACK),
                PaletteTable::new(Color15::BLACK),
            ],
            guard: None,
        };

        let text = declaration.to_string();
        assert!(text.starts_with(
            "#define a_width 2\n#define a_height 1\n\n#define b_width 1\n#define b_height 1\n\n"
        ));
        assert!(text.contains(
            "const unsigned char sprites_data[2][2] = {\n    {\n        0x01, 0x02,\n    },\n    {\n        0x03,\n    },\n};\n"
        ));
        assert!(text.contains("const unsigned short sprites_palette[2][256] = {\n    {\n"));
    }

    #[test]
    fn derives_identifiers_from_paths() {
        assert_eq!(declaration_name("logo.png"), "logo");
        assert_eq!(declaration_name("/tmp/a.b/logo"), "logo");
        assert_eq!(declaration_name("gfx\\title screen.PNG"), "title_screen");
        assert_eq!(declaration_name(".png"), "_png");
        assert_eq!(declaration_name("dir/"), "image");
        assert_eq!(guard_token("logo_2"), "LOGO_2_H");
    }
}
