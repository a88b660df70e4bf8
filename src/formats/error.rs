use crate::model::CoreError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, FormatError>;

#[derive(Debug, Error)]
pub enum FormatError {
    #[error("unsupported image format: {0}")]
    UnsupportedFormat(String),

    #[error("unsupported plane layout for this format: {0}")]
    UnsupportedLayout(String),

    #[error("plane {index} is out of range for {count} plane(s)")]
    PlaneOutOfRange { index: u64, count: u64 },

    #[error("invalid raster position {position:?} for axis lengths {lengths:?}")]
    InvalidPosition {
        position: Vec<u64>,
        lengths: Vec<u64>,
    },

    #[error("axis lengths {0:?} describe more planes than a raster index can address")]
    RasterOverflow(Vec<u64>),

    #[error("reader is closed")]
    Closed,

    #[error("I/O failure: {0}")]
    Io(#[from] std::io::Error),

    #[error("image decode failure: {0}")]
    Image(#[from] image::ImageError),

    #[error("TIFF decode failure: {0}")]
    Tiff(#[from] tiff::TiffError),

    #[error("malformed axis metadata: {0}")]
    Core(#[from] CoreError),
}
