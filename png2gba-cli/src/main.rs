use argh::FromArgs;
use image::DynamicImage;
use log::{error, info, LevelFilter};
use log4rs::{
    append::console::{ConsoleAppender, Target},
    config::{Appender, Config, Root},
    encode::pattern::PatternEncoder,
};
use png2gba::{
    batch::{Batch, PaletteSharing},
    consts::DEFAULT_COLORKEY,
    declaration::{declaration_name, Declaration},
    utils::LittleEndian,
    Color15, EncodeOptions, PixelGrid, TraversalOrder,
};
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

/// PNG to GBA image conversion utility.
#[derive(FromArgs)]
struct Cli {
    /// emit 8-bit indices into a 256-color palette instead of raw 15-bit colors
    #[argh(switch, short = 'p')]
    palette: bool,

    /// emit pixels in 8x8 tile order instead of row by row
    #[argh(switch, short = 't')]
    tileize: bool,

    /// color key stored in palette slot 0, as #RRGGBB
    #[argh(option, short = 'c', default = "String::from(DEFAULT_COLORKEY)")]
    colorkey: String,

    /// output header file. Defaults to stdout.
    #[argh(option, short = 'o')]
    output: Option<String>,

    /// prefix for the generated declarations. Defaults to the output or first input file name.
    #[argh(option, short = 'n')]
    name: Option<String>,

    /// with --palette and several inputs, collect all colors into one palette
    #[argh(switch)]
    shared_palette: bool,

    /// skip inputs that fail to convert instead of aborting
    #[argh(switch)]
    keep_going: bool,

    /// also write raw little-endian `.img.bin` and `.pal.bin` files
    #[argh(switch)]
    binary: bool,

    /// log debug output
    #[argh(switch, short = 'v')]
    verbose: bool,

    /// the input images (PNG, BMP, TIFF, or JPG)
    #[argh(positional)]
    inputs: Vec<String>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli: Cli = argh::from_env();
    init_logger(cli.verbose)?;

    let colorkey: Color15 = cli
        .colorkey
        .parse()
        .map_err(|e| format!("invalid color key `{}`: {e}", cli.colorkey))?;

    let Some(first_input) = cli.inputs.first() else {
        return Err("must pass at least one input file".into());
    };

    let options = EncodeOptions {
        palette: cli.palette,
        order: if cli.tileize {
            TraversalOrder::Tiled
        } else {
            TraversalOrder::Linear
        },
        colorkey,
    };
    let sharing = if cli.shared_palette {
        PaletteSharing::Shared
    } else {
        PaletteSharing::PerImage
    };

    let name = match (&cli.name, &cli.output) {
        (Some(name), _) => name.clone(),
        (None, Some(output)) if cli.inputs.len() > 1 => declaration_name(output),
        (None, _) => declaration_name(first_input),
    };

    let mut batch = Batch::new(name, options, sharing);
    for input in &cli.inputs {
        match convert(&mut batch, input) {
            Ok(()) => {}
            Err(e) if cli.keep_going => error!("skipping `{input}`: {e}"),
            Err(e) => return Err(e),
        }
    }

    if batch.is_empty() {
        return Err("no image could be converted".into());
    }

    let declaration = match &cli.output {
        Some(_) => batch.finish().with_guard(),
        None => batch.finish(),
    };

    match &cli.output {
        Some(output) => {
            std::fs::write(output, declaration.to_string())?;
            info!(
                "Written {} declaration(s) to `{output}`",
                declaration.images.len()
            );
        }
        None => print!("{declaration}"),
    }

    if cli.binary {
        let dir = cli
            .output
            .as_deref()
            .and_then(|output| Path::new(output).parent())
            .map(Path::to_path_buf)
            .unwrap_or_default();
        write_binaries(&declaration, &dir)?;
    }

    Ok(())
}

fn init_logger(verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new("{h({l})}: {m}{n}")))
        .build();

    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let config = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .build(Root::builder().appender("stderr").build(level))?;
    log4rs::init_config(config)?;

    Ok(())
}

/// Decodes `input` and adds it to the batch.
fn convert(batch: &mut Batch, input: &str) -> Result<(), Box<dyn std::error::Error>> {
    let image = image::io::Reader::open(input)
        .map_err(|e| format!("cannot open `{input}` for reading: {e}"))?
        .with_guessed_format()?
        .decode()
        .map_err(|e| format!("`{input}` does not seem to be a valid image: {e}"))?;

    let (width, height) = (image.width() as usize, image.height() as usize);
    info!("Converting {width}x{height} image `{input}`");

    let (channels, bytes) = into_rgb_bytes(image);
    let grid = PixelGrid::new(width, height, channels, &bytes)
        .map_err(|e| format!("cannot convert `{input}`: {e}"))?;

    batch.push(declaration_name(input), &grid)?;

    Ok(())
}

/// 8-bit RGB(A) is passed through, deeper RGB(A) is reduced to 8 bits per channel. Everything
/// else keeps its own channel count and is rejected by [`PixelGrid::new`].
fn into_rgb_bytes(image: DynamicImage) -> (usize, Vec<u8>) {
    match image {
        DynamicImage::ImageRgb8(rgb) => (3, rgb.into_raw()),
        DynamicImage::ImageRgba8(rgba) => (4, rgba.into_raw()),
        image @ (DynamicImage::ImageRgb16(_) | DynamicImage::ImageRgb32F(_)) => {
            (3, image.into_rgb8().into_raw())
        }
        image @ (DynamicImage::ImageRgba16(_) | DynamicImage::ImageRgba32F(_)) => {
            (4, image.into_rgba8().into_raw())
        }
        image => (usize::from(image.color().channel_count()), image.into_bytes()),
    }
}

fn write_binaries(declaration: &Declaration, dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let create = |file_name: String| -> Result<BufWriter<File>, Box<dyn std::error::Error>> {
        let path: PathBuf = dir.join(file_name);
        info!("Writing `{}`", path.display());
        Ok(BufWriter::new(File::create(path)?))
    };

    for image in &declaration.images {
        let mut w = create(format!("{}.img.bin", image.name))?;
        image.data.write_binary::<LittleEndian, _>(&mut w)?;
        w.flush()?;
    }

    match declaration.palettes.as_slice() {
        [palette] => {
            let mut w = create(format!("{}.pal.bin", declaration.name))?;
            palette.write_binary::<LittleEndian, _>(&mut w)?;
            w.flush()?;
        }
        palettes => {
            for (image, palette) in declaration.images.iter().zip(palettes) {
                let mut w = create(format!("{}.pal.bin", image.name))?;
                palette.write_binary::<LittleEndian, _>(&mut w)?;
                w.flush()?;
            }
        }
    }

    Ok(())
}
