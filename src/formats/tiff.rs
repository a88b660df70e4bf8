use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use tiff::ColorType;
use tiff::decoder::{Decoder, DecodingResult};
use tracing::debug;

use crate::model::{CHANNEL_LABEL, PixelType, PlaneDescriptor, ReaderAxis, X_LABEL, Y_LABEL, Z_LABEL};

use super::util::{f32_to_le_bytes, u16_to_le_bytes, u32_to_le_bytes};
use super::{FormatError, FormatReader, RawPlane, Result};

/// Multi-page TIFF. Pages form a Z axis; RGB pages carry an interleaved
/// channel axis ahead of X and Y.
pub struct TiffReader {
    name: String,
    decoder: Option<Decoder<BufReader<File>>>,
    axes: Vec<ReaderAxis>,
    width: u32,
    height: u32,
    samples_per_pixel: u32,
    bits_per_sample: u32,
    pages: u64,
}

impl TiffReader {
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let mut decoder = Decoder::new(BufReader::new(file))?;
        let (width, height) = decoder.dimensions()?;
        let color = decoder.colortype()?;
        let (samples_per_pixel, bits_per_sample) = layout(color)?;

        let mut pages = 1_u64;
        while decoder.more_images() {
            decoder.next_image()?;
            if decoder.dimensions()? != (width, height) || decoder.colortype()? != color {
                return Err(FormatError::UnsupportedLayout(
                    "TIFF pages must have identical dimensions and sample layout".into(),
                ));
            }
            pages += 1;
        }
        decoder.seek_to_image(0)?;

        let mut axes = Vec::with_capacity(4);
        if samples_per_pixel > 1 {
            axes.push(ReaderAxis::new(CHANNEL_LABEL, u64::from(samples_per_pixel)));
        }
        axes.push(ReaderAxis::new(X_LABEL, u64::from(width)));
        axes.push(ReaderAxis::new(Y_LABEL, u64::from(height)));
        if pages > 1 {
            axes.push(ReaderAxis::new(Z_LABEL, pages));
        }

        Ok(Self {
            name: path.to_string_lossy().to_string(),
            decoder: Some(decoder),
            axes,
            width,
            height,
            samples_per_pixel,
            bits_per_sample,
            pages,
        })
    }

    fn descriptor(&self, pixel_type: PixelType) -> PlaneDescriptor {
        let descriptor = if self.samples_per_pixel > 1 {
            PlaneDescriptor::interleaved(
                pixel_type,
                self.samples_per_pixel,
                u64::from(self.width),
                u64::from(self.height),
            )
        } else {
            PlaneDescriptor::gray(pixel_type, u64::from(self.width), u64::from(self.height))
        };
        descriptor.with_bits_per_pixel(self.bits_per_sample)
    }
}

fn layout(color: ColorType) -> Result<(u32, u32)> {
    match color {
        ColorType::Gray(bits) => Ok((1, u32::from(bits))),
        ColorType::RGB(bits) => Ok((3, u32::from(bits))),
        other => Err(FormatError::UnsupportedLayout(format!(
            "unsupported TIFF color type: {other:?}"
        ))),
    }
}

impl FormatReader for TiffReader {
    fn format_name(&self) -> &str {
        "Tagged Image File Format"
    }

    fn dataset_name(&self) -> &str {
        &self.name
    }

    fn axes(&self) -> &[ReaderAxis] {
        &self.axes
    }

    fn plane_count(&self) -> u64 {
        self.pages
    }

    fn raster_lengths(&self) -> Vec<u64> {
        if self.pages > 1 {
            vec![self.pages]
        } else {
            Vec::new()
        }
    }

    fn read_plane(&mut self, raster: u64) -> Result<RawPlane> {
        if raster >= self.pages {
            return Err(FormatError::PlaneOutOfRange {
                index: raster,
                count: self.pages,
            });
        }
        let decoder = self.decoder.as_mut().ok_or(FormatError::Closed)?;
        decoder.seek_to_image(raster as usize)?;
        let (pixel_type, bytes) = match decoder.read_image()? {
            DecodingResult::U8(buffer) => (PixelType::U8, buffer),
            DecodingResult::U16(buffer) => (PixelType::U16, u16_to_le_bytes(&buffer)),
            DecodingResult::U32(buffer) => (PixelType::U32, u32_to_le_bytes(&buffer)),
            DecodingResult::F32(buffer) => (PixelType::F32, f32_to_le_bytes(&buffer)),
            _ => {
                return Err(FormatError::UnsupportedLayout(
                    "TIFF samples must be unsigned 8/16/32-bit or 32-bit float".into(),
                ));
            }
        };
        debug!(raster, bytes = bytes.len(), "read TIFF page");
        Ok(RawPlane {
            bytes,
            descriptor: self.descriptor(pixel_type),
        })
    }

    fn close(&mut self) -> Result<()> {
        self.decoder = None;
        Ok(())
    }
}
