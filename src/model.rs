mod axis;
mod coordinate;
mod error;
mod image;
mod plane;
mod summary;


pub use axis::{
    AxisDescriptor, AxisKey, AxisRole, AxisSet, CHANNEL_LABEL, ReaderAxis, TIME_LABEL, X_LABEL,
    Y_LABEL, Z_LABEL, classify,
};
pub use coordinate::Coordinate;
pub use error::{CoreError, Result};
pub use image::{Image, ImageMetadata, PlanePixels};
pub use plane::{ByteOrder, PixelType, PlaneDescriptor};
pub use summary::{DatasetSummary, display_name};
