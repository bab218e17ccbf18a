use crate::CliError;
use image::codecs::png::PngEncoder;
use image::DynamicImage;
use image::GrayImage;
use image::ImageFormat;
use std::fs::File;
use std::io::BufReader;
use std::io::BufWriter;
use std::io::Write;
use std::path::Path;

pub fn load_png(path: &Path) -> Result<DynamicImage, CliError> {
    let file = File::open(path).map_err(|source| CliError::Open {
        path: path.to_owned(),
        source,
    })?;

    let image = image::load(BufReader::new(file), ImageFormat::Png).map_err(|source| {
        CliError::Decode {
            path: path.to_owned(),
            source,
        }
    })?;

    log::info!(
        "Loaded {} ({}x{}, {:?})",
        path.display(),
        image.width(),
        image.height(),
        image.color()
    );
    Ok(image)
}

pub fn save_png(image: &GrayImage, path: &Path) -> Result<(), CliError> {
    let file = File::create(path).map_err(|source| CliError::Create {
        path: path.to_owned(),
        source,
    })?;

    let mut writer = BufWriter::new(file);
    image
        .write_with_encoder(PngEncoder::new(&mut writer))
        .map_err(|source| CliError::Encode {
            path: path.to_owned(),
            source,
        })?;
    writer.flush().map_err(|source| CliError::Flush {
        path: path.to_owned(),
        source,
    })?;

    log::info!(
        "Saved {} ({}x{})",
        path.display(),
        image.width(),
        image.height()
    );
    Ok(())
}
