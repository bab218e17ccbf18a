//! `sdf -in glyphs.png -out glyphs_sdf.png`
//!
//! Reads a PNG, treats pixels darker than the threshold as ink and writes the
//! distance field as an 8-bit grayscale PNG of the same size.

use anyhow::Context as _;
use sdfgen::DistanceFieldGenerator;
use sdfgen::Options;
use std::path::Path;
use std::path::PathBuf;

mod png_io;

const USAGE: &str = "\
usage: sdf -in <input.png> -out <output.png> [-threshold <u16>] [-scale <i32>] [-bias <i32>]

  -in         the png to calculate the sdf for
  -out        the png to output sdf to
  -threshold  red channel (16-bit scale) below which a pixel is ink (default 128)
  -scale      gray levels per pixel of distance (default 3)
  -bias       gray level of the boundary (default 128)

Set RUST_LOG=info (or debug) for progress output.";

#[derive(thiserror::Error, Debug)]
pub enum CliError {
    #[error("{0}\n\n{usage}", usage = USAGE)]
    Usage(String),

    #[error("in/out file should be png: \"{}\"", .0.display())]
    Extension(PathBuf),

    #[error("file \"{}\" could not be opened", .path.display())]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("file \"{}\" could not be decoded", .path.display())]
    Decode {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("file \"{}\" could not be created", .path.display())]
    Create {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("file \"{}\" could not be encoded", .path.display())]
    Encode {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("file \"{}\" could not be flushed", .path.display())]
    Flush {
        path: PathBuf,
        source: std::io::Error,
    },
}

#[derive(Debug, PartialEq)]
enum Command {
    Run(CliArgs),
    Help,
}

#[derive(Debug, PartialEq)]
struct CliArgs {
    input: PathBuf,
    output: PathBuf,
    options: Options,
}

fn flag_value<T: std::str::FromStr>(
    flag: &str,
    value: Option<String>,
) -> Result<T, CliError> {
    let value = value.ok_or_else(|| CliError::Usage(format!("missing value for {flag}")))?;
    value
        .parse()
        .map_err(|_err| CliError::Usage(format!("invalid value for {flag}: {value:?}")))
}

fn is_png(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "png")
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Result<Command, CliError> {
    let mut input = None;
    let mut output = None;
    let mut options = Options::default();

    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        // accept both `-flag` and `--flag`
        let flag = arg.strip_prefix("--").unwrap_or(arg.strip_prefix('-').unwrap_or(&arg));
        match flag {
            "in" => input = iter.next().map(PathBuf::from),
            "out" => output = iter.next().map(PathBuf::from),
            "threshold" => options.threshold = flag_value(&arg, iter.next())?,
            "scale" => options.scale = flag_value(&arg, iter.next())?,
            "bias" => options.bias = flag_value(&arg, iter.next())?,
            "h" | "help" => return Ok(Command::Help),
            _ => return Err(CliError::Usage(format!("unexpected argument {arg:?}"))),
        }
    }

    let (Some(input), Some(output)) = (input, output) else {
        return Err(CliError::Usage("both -in and -out are required".to_owned()));
    };
    for path in [&input, &output] {
        if !is_png(path) {
            return Err(CliError::Extension(path.clone()));
        }
    }

    Ok(Command::Run(CliArgs {
        input,
        output,
        options,
    }))
}

fn run(args: &CliArgs) -> anyhow::Result<()> {
    let source = png_io::load_png(&args.input)?;

    let generator = DistanceFieldGenerator::new(args.options);
    let field = generator
        .generate_image(&source)
        .with_context(|| format!("could not generate sdf for \"{}\"", args.input.display()))?;

    png_io::save_png(&field, &args.output)?;
    Ok(())
}

#[allow(clippy::print_stdout)] // help text
fn main() -> anyhow::Result<()> {
    env_logger::init();

    match parse_args(std::env::args().skip(1))? {
        Command::Run(args) => {
            log::debug!("{:?}", args);
            run(&args)
        }
        Command::Help => {
            println!("{USAGE}");
            Ok(())
        }
    }
}
