use byteorder::{BigEndian, ByteOrder as _, LittleEndian};
use ndarray::Array2;
use tracing::debug;

use crate::model::{
    AxisSet, ByteOrder, Coordinate, Image, ImageMetadata, PixelType, PlaneDescriptor, PlanePixels,
};

use super::{DecodeError, Result};

/// Positions of the planar axes inside a plane's own layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaneLayout {
    pub x_position: usize,
    pub y_position: usize,
    pub channel_position: Option<usize>,
}

impl PlaneLayout {
    pub fn from_axes(axes: &AxisSet) -> Self {
        Self {
            x_position: axes.x_position(),
            y_position: axes.y_position(),
            channel_position: axes.channel_position(),
        }
    }

    /// Channel samples are interleaved only when the channel axis varies
    /// fastest within the plane.
    fn channel_first(&self) -> bool {
        self.channel_position == Some(0)
    }
}

/// Turns raw plane bytes into typed samples for a single target channel.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelDecoder {
    layout: PlaneLayout,
    pixel_size_um: Option<f64>,
}

impl PixelDecoder {
    pub fn new(layout: PlaneLayout, pixel_size_um: Option<f64>) -> Self {
        Self {
            layout,
            pixel_size_um,
        }
    }

    pub fn decode(
        &self,
        bytes: &[u8],
        descriptor: &PlaneDescriptor,
        target: &Coordinate,
    ) -> Result<Image> {
        let width = self.planar_length(descriptor, self.layout.x_position)?;
        let height = self.planar_length(descriptor, self.layout.y_position)?;
        let sample_width = descriptor.pixel_type.bytes_per_sample();
        let interleave = if descriptor.multichannel && self.layout.channel_first() {
            descriptor.interleave_count.max(1)
        } else {
            1
        };

        let expected = [height, interleave as usize, sample_width]
            .into_iter()
            .try_fold(width, usize::checked_mul)
            .ok_or(DecodeError::PlaneTooLarge {
                width: width as u64,
                height: height as u64,
                interleave,
            })?;
        if bytes.len() != expected {
            return Err(DecodeError::LengthMismatch {
                expected,
                actual: bytes.len(),
            });
        }

        let channel = match interleave {
            1 => 0,
            3 => {
                let channel = target.channel_index().unwrap_or(0);
                if channel >= u64::from(interleave) {
                    return Err(DecodeError::ChannelOutOfRange {
                        channel,
                        count: interleave,
                    });
                }
                channel as usize
            }
            other => return Err(DecodeError::UnsupportedInterleave(other)),
        };
        let stride = interleave as usize;

        let pixels = match descriptor.pixel_type {
            PixelType::U8 => {
                let samples = select_channel(bytes, stride, channel);
                PlanePixels::U8(Array2::from_shape_vec((height, width), samples)?)
            }
            PixelType::U16 => {
                let samples = unpack_u16(bytes, descriptor.byte_order);
                let samples = select_channel(&samples, stride, channel);
                PlanePixels::U16(Array2::from_shape_vec((height, width), samples)?)
            }
            pixel_type @ (PixelType::U32 | PixelType::F32) => {
                return Err(DecodeError::UnsupportedSampleWidth {
                    pixel_type,
                    bytes: sample_width,
                });
            }
        };
        debug!(width, height, interleave, channel, coordinate = %target, "decoded plane");

        Ok(Image {
            pixels,
            coordinate: target.clone(),
            metadata: ImageMetadata {
                bit_depth: descriptor.bits_per_pixel,
                pixel_size_um: self.pixel_size_um,
            },
        })
    }

    fn planar_length(&self, descriptor: &PlaneDescriptor, position: usize) -> Result<usize> {
        let length = descriptor
            .length(position)
            .ok_or(DecodeError::MissingPlanarAxis(position))?;
        usize::try_from(length).map_err(|_| DecodeError::PlaneTooLarge {
            width: descriptor.length(self.layout.x_position).unwrap_or(0),
            height: descriptor.length(self.layout.y_position).unwrap_or(0),
            interleave: descriptor.interleave_count,
        })
    }
}

/// Converts 16-bit samples from the plane's declared byte order.
pub fn unpack_u16(bytes: &[u8], byte_order: ByteOrder) -> Vec<u16> {
    let mut samples = vec![0; bytes.len() / 2];
    match byte_order {
        ByteOrder::LittleEndian => LittleEndian::read_u16_into(bytes, &mut samples),
        ByteOrder::BigEndian => BigEndian::read_u16_into(bytes, &mut samples),
    }
    samples
}

/// Keeps sample `stride * i + channel` for every pixel position `i`.
pub fn select_channel<T: Copy>(samples: &[T], stride: usize, channel: usize) -> Vec<T> {
    if stride == 1 {
        return samples.to_vec();
    }
    samples
        .iter()
        .skip(channel)
        .step_by(stride)
        .copied()
        .collect()
}
