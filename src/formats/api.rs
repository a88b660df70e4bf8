use std::path::Path;

use super::raster::RasterReader;
use super::tiff::TiffReader;
use super::util::extension;
use super::{FormatError, FormatProvider, FormatReader, Result};

pub fn open_reader(path: impl AsRef<Path>) -> Result<Box<dyn FormatReader>> {
    let path = path.as_ref();
    let extension = extension(path)?;
    match extension.as_str() {
        "png" | "jpg" | "jpeg" => Ok(Box::new(RasterReader::open(path)?)),
        "tif" | "tiff" => Ok(Box::new(TiffReader::open(path)?)),
        other => Err(FormatError::UnsupportedFormat(other.to_string())),
    }
}

pub fn supported_formats() -> &'static [&'static str] {
    &["png", "jpg", "jpeg", "tif", "tiff"]
}

#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultFormatProvider;

impl FormatProvider for DefaultFormatProvider {
    fn supports_extension(&self, extension: &str) -> bool {
        supported_formats().contains(&extension)
    }

    fn open(&self, path: &Path) -> Result<Box<dyn FormatReader>> {
        open_reader(path)
    }
}
