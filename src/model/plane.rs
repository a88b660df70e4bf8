use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PixelType {
    #[default]
    U8,
    U16,
    U32,
    F32,
}

impl PixelType {
    pub fn bytes_per_sample(self) -> usize {
        match self {
            Self::U8 => 1,
            Self::U16 => 2,
            Self::U32 | Self::F32 => 4,
        }
    }

    pub fn bits_per_sample(self) -> u32 {
        self.bytes_per_sample() as u32 * 8
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ByteOrder {
    #[default]
    LittleEndian,
    BigEndian,
}

/// Per-plane metadata returned by a reader alongside the raw bytes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaneDescriptor {
    pub pixel_type: PixelType,
    /// Significant bits per sample, which may be lower than the storage width.
    pub bits_per_pixel: u32,
    pub byte_order: ByteOrder,
    pub multichannel: bool,
    /// Channel samples stored per pixel position; 1 when not interleaved.
    pub interleave_count: u32,
    /// Lengths of the planar axes, indexed by axis position.
    pub lengths: Vec<u64>,
}

impl PlaneDescriptor {
    /// Single-channel plane with X at position 0 and Y at position 1.
    pub fn gray(pixel_type: PixelType, width: u64, height: u64) -> Self {
        Self {
            pixel_type,
            bits_per_pixel: pixel_type.bits_per_sample(),
            byte_order: ByteOrder::LittleEndian,
            multichannel: false,
            interleave_count: 1,
            lengths: vec![width, height],
        }
    }

    /// Channel-first interleaved plane: lengths are `[channels, width, height]`.
    pub fn interleaved(pixel_type: PixelType, channels: u32, width: u64, height: u64) -> Self {
        Self {
            pixel_type,
            bits_per_pixel: pixel_type.bits_per_sample(),
            byte_order: ByteOrder::LittleEndian,
            multichannel: true,
            interleave_count: channels,
            lengths: vec![u64::from(channels), width, height],
        }
    }

    pub fn with_byte_order(mut self, byte_order: ByteOrder) -> Self {
        self.byte_order = byte_order;
        self
    }

    pub fn with_bits_per_pixel(mut self, bits: u32) -> Self {
        self.bits_per_pixel = bits;
        self
    }

    pub fn length(&self, position: usize) -> Option<u64> {
        self.lengths.get(position).copied()
    }
}
