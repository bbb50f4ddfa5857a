//! PNG export of debug preview images.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use relief_terrain::debug_viz::DebugImage;

/// Errors raised while writing a preview image.
#[derive(Debug, thiserror::Error)]
pub enum PreviewError {
    /// The output file or its directory could not be created.
    #[error("failed to create preview file: {0}")]
    Io(#[from] std::io::Error),

    /// The PNG encoder rejected the image.
    #[error("failed to encode preview: {0}")]
    Encoding(#[from] png::EncodingError),
}

/// Write `image` as an 8-bit RGBA PNG, creating parent directories as needed.
pub fn write_png(image: &DebugImage, path: &Path) -> Result<(), PreviewError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }

    let (width, height) = image.dimensions();
    let file = BufWriter::new(File::create(path)?);
    let mut encoder = png::Encoder::new(file, width, height);
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);

    let mut writer = encoder.write_header()?;
    writer.write_image_data(image.as_bytes())?;
    writer.finish()?;
    Ok(())
}
