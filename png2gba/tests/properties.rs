use png2gba::{
    encode::PixelData, quantize, Color15, Declaration, EncodeContext, EncodeOptions, PaletteTable,
    PixelGrid, PixelTraversal, TraversalOrder,
};
use std::collections::HashSet;

/// Every pixel gets a distinct 15-bit color derived from its position.
fn gradient(width: usize, height: usize, channels: usize) -> Vec<u8> {
    let mut data = Vec::with_capacity(width * height * channels);
    for row in 0..height {
        for col in 0..width {
            data.extend_from_slice(&[(col * 8) as u8, (row * 8) as u8, 0x80]);
            if channels == 4 {
                data.push((row * width + col) as u8);
            }
        }
    }
    data
}

fn palette_options() -> EncodeOptions {
    EncodeOptions {
        palette: true,
        ..Default::default()
    }
}

#[test]
fn quantize_ignores_low_bits() {
    for r in (0..=255u8).step_by(5) {
        for g in (0..=255u8).step_by(17) {
            let b = r ^ g;
            assert_eq!(
                quantize(r, g, b),
                quantize(r & !7, g & !7, b & !7),
                "({r}, {g}, {b})"
            );
        }
    }
}

#[test]
fn linear_traversal_is_strict_row_major() {
    for (width, height) in [(1, 1), (3, 5), (8, 8), (13, 2)] {
        let visited: Vec<_> = PixelTraversal::linear(width, height).collect();
        let expected: Vec<_> = (0..height)
            .flat_map(|row| (0..width).map(move |col| (row, col)))
            .collect();
        assert_eq!(visited, expected, "{width}x{height}");
    }
}

#[test]
fn tiled_traversal_visits_every_pixel_once() {
    for width in 1..=20 {
        for height in 1..=20 {
            let visited: Vec<_> = PixelTraversal::tiled(width, height).collect();
            assert_eq!(visited.len(), width * height, "{width}x{height}");

            let unique: HashSet<_> = visited.iter().copied().collect();
            assert_eq!(unique.len(), width * height, "{width}x{height}");
            assert!(visited.iter().all(|&(row, col)| row < height && col < width));
        }
    }
}

#[test]
fn tiled_traversal_stays_inside_one_tile_at_a_time() {
    let visited: Vec<_> = PixelTraversal::tiled(20, 11).collect();
    let tiles: Vec<_> = visited.iter().map(|&(row, col)| (row / 8, col / 8)).collect();

    // each tile is one contiguous run, tiles in block-row-major order
    let mut runs = tiles.clone();
    runs.dedup();
    assert_eq!(runs, [(0, 0), (0, 1), (0, 2), (1, 0), (1, 1), (1, 2)]);
    // the bottom-right tile is clipped to 4x3
    assert_eq!(tiles.iter().filter(|&&t| t == (1, 2)).count(), 12);
}

#[test]
fn palette_never_grows_past_255_entries() {
    let mut palette = PaletteTable::new(Color15::from_raw(0x7C1F));
    let mut failures = 0;
    for raw in 0..300u16 {
        if palette.insert_or_lookup(Color15::from_raw(raw)).is_err() {
            failures += 1;
        }
        assert!(palette.len() <= 255);
    }
    assert_eq!(palette.len(), 255);
    assert_eq!(failures, 300 - 254);
}

#[test]
fn palette_indices_are_stable() {
    let mut palette = PaletteTable::new(Color15::BLACK);
    let colors: Vec<_> = (0..100u16).map(|i| Color15::from_raw(i * 37 + 1)).collect();
    let first: Vec<_> = colors
        .iter()
        .map(|&c| palette.insert_or_lookup(c).unwrap())
        .collect();
    let again: Vec<_> = colors
        .iter()
        .rev()
        .map(|&c| palette.insert_or_lookup(c).unwrap())
        .collect();

    assert_eq!(first, (1..=100).collect::<Vec<u8>>());
    assert_eq!(again, (1..=100).rev().collect::<Vec<u8>>());
}

#[test]
fn black_square_with_default_colorkey() {
    let data = [0u8; 2 * 2 * 3];
    let grid = PixelGrid::new(2, 2, 3, &data).unwrap();
    let image = EncodeContext::encode(&grid, palette_options()).unwrap();

    assert_eq!(image.data, PixelData::Indices(vec![0x01; 4]));
    let palette = image.palette.as_ref().unwrap();
    assert_eq!(palette.table()[0].raw(), 0x7C1F);
    assert_eq!(palette.table()[1].raw(), 0x0000);

    let header = Declaration::from_image("black", image).to_string();
    assert!(header.starts_with("#define black_width 2\n#define black_height 2\n\n"));
    assert!(header.contains(
        "const unsigned char black_data[4] = {\n    0x01, 0x01, 0x01, 0x01,\n};\n"
    ));
    assert!(header.contains(
        "const unsigned short black_palette[256] = {\n    \
         0x7C1F, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000,\n"
    ));
}

#[test]
fn tiling_reorders_but_keeps_content() {
    let data = gradient(16, 16, 3);
    let grid = PixelGrid::new(16, 16, 3, &data).unwrap();

    let encode = |order| {
        let options = EncodeOptions {
            order,
            ..Default::default()
        };
        match EncodeContext::encode(&grid, options).unwrap().data {
            PixelData::Colors(colors) => colors,
            PixelData::Indices(_) => unreachable!(),
        }
    };
    let linear = encode(TraversalOrder::Linear);
    let tiled = encode(TraversalOrder::Tiled);

    assert_ne!(linear, tiled);
    // second row of the first tile
    assert_eq!(tiled[8], linear[16]);

    let (mut linear, mut tiled) = (linear, tiled);
    linear.sort();
    tiled.sort();
    assert_eq!(linear, tiled);
}

#[test]
fn alpha_does_not_change_output() {
    let rgb = gradient(9, 7, 3);
    let rgba = gradient(9, 7, 4);

    for options in [
        EncodeOptions::default(),
        EncodeOptions {
            order: TraversalOrder::Tiled,
            ..palette_options()
        },
    ] {
        let from_rgb = EncodeContext::encode(&PixelGrid::new(9, 7, 3, &rgb).unwrap(), options)
            .unwrap();
        let from_rgba = EncodeContext::encode(&PixelGrid::new(9, 7, 4, &rgba).unwrap(), options)
            .unwrap();

        assert_eq!(from_rgb.data, from_rgba.data);
        assert_eq!(
            from_rgb.palette.map(|p| p.entries().to_vec()),
            from_rgba.palette.map(|p| p.entries().to_vec())
        );
    }
}
