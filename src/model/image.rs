use ndarray::Array2;
use serde::{Deserialize, Serialize};

use super::Coordinate;

/// Decoded samples of one plane, shaped `(height, width)`.
#[derive(Debug, Clone, PartialEq)]
pub enum PlanePixels {
    U8(Array2<u8>),
    U16(Array2<u16>),
}

impl PlanePixels {
    pub fn width(&self) -> usize {
        match self {
            Self::U8(data) => data.ncols(),
            Self::U16(data) => data.ncols(),
        }
    }

    pub fn height(&self) -> usize {
        match self {
            Self::U8(data) => data.nrows(),
            Self::U16(data) => data.nrows(),
        }
    }

    pub fn bytes_per_pixel(&self) -> usize {
        match self {
            Self::U8(_) => 1,
            Self::U16(_) => 2,
        }
    }

    pub fn as_u8(&self) -> Option<&Array2<u8>> {
        match self {
            Self::U8(data) => Some(data),
            Self::U16(_) => None,
        }
    }

    pub fn as_u16(&self) -> Option<&Array2<u16>> {
        match self {
            Self::U16(data) => Some(data),
            Self::U8(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageMetadata {
    pub bit_depth: u32,
    pub pixel_size_um: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    pub pixels: PlanePixels,
    pub coordinate: Coordinate,
    pub metadata: ImageMetadata,
}

impl Image {
    pub fn width(&self) -> usize {
        self.pixels.width()
    }

    pub fn height(&self) -> usize {
        self.pixels.height()
    }

    pub fn bytes_per_pixel(&self) -> usize {
        self.pixels.bytes_per_pixel()
    }
}
