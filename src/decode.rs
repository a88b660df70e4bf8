mod decoder;
mod error;

#[cfg(test)]
mod tests;

pub use decoder::{PixelDecoder, PlaneLayout, select_channel, unpack_u16};
pub use error::{DecodeError, Result};
