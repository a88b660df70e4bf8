mod api;
mod error;
mod memory;
mod position;
mod raster;
mod reader;
mod tiff;
mod util;

#[cfg(test)]
mod tests;

pub use api::{DefaultFormatProvider, open_reader, supported_formats};
pub use error::{FormatError, Result};
pub use memory::MemoryReader;
pub use position::{position_to_raster, raster_to_position};
pub use raster::RasterReader;
pub use reader::{FormatProvider, FormatReader, RawPlane};
pub use tiff::TiffReader;
