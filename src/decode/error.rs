use crate::model::PixelType;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, DecodeError>;

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("{pixel_type:?} planes use {bytes}-byte samples; only 8- and 16-bit output is supported")]
    UnsupportedSampleWidth { pixel_type: PixelType, bytes: usize },

    #[error("cannot extract a channel from {0} interleaved samples per pixel")]
    UnsupportedInterleave(u32),

    #[error("channel {channel} is out of range for {count} interleaved channel(s)")]
    ChannelOutOfRange { channel: u64, count: u32 },

    #[error("plane holds {actual} bytes but its descriptor requires {expected}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("plane of {width}x{height} with {interleave} sample(s) per pixel is too large to address")]
    PlaneTooLarge {
        width: u64,
        height: u64,
        interleave: u32,
    },

    #[error("plane descriptor has no length for planar axis at position {0}")]
    MissingPlanarAxis(usize),

    #[error("sample array shape error: {0}")]
    Shape(#[from] ndarray::ShapeError),
}
