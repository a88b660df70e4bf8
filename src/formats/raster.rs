use std::path::Path;

use image::DynamicImage;

use crate::model::{CHANNEL_LABEL, PixelType, PlaneDescriptor, ReaderAxis, X_LABEL, Y_LABEL};

use super::util::u16_to_le_bytes;
use super::{FormatError, FormatReader, RawPlane, Result};

/// Single-plane PNG/JPEG. Color images become a 3-sample interleaved plane.
pub struct RasterReader {
    name: String,
    image: Option<DynamicImage>,
    axes: Vec<ReaderAxis>,
}

impl RasterReader {
    pub fn open(path: &Path) -> Result<Self> {
        let image = match image::open(path)? {
            gray @ (DynamicImage::ImageLuma8(_) | DynamicImage::ImageLuma16(_)) => gray,
            rgb @ (DynamicImage::ImageRgb8(_) | DynamicImage::ImageRgb16(_)) => rgb,
            other => DynamicImage::ImageRgb8(other.to_rgb8()),
        };
        let mut axes = Vec::with_capacity(3);
        if image.color().has_color() {
            axes.push(ReaderAxis::new(CHANNEL_LABEL, 3));
        }
        axes.push(ReaderAxis::new(X_LABEL, u64::from(image.width())));
        axes.push(ReaderAxis::new(Y_LABEL, u64::from(image.height())));
        Ok(Self {
            name: path.to_string_lossy().to_string(),
            image: Some(image),
            axes,
        })
    }
}

impl FormatReader for RasterReader {
    fn format_name(&self) -> &str {
        "Raster (PNG/JPEG)"
    }

    fn dataset_name(&self) -> &str {
        &self.name
    }

    fn axes(&self) -> &[ReaderAxis] {
        &self.axes
    }

    fn plane_count(&self) -> u64 {
        1
    }

    fn raster_lengths(&self) -> Vec<u64> {
        Vec::new()
    }

    fn read_plane(&mut self, raster: u64) -> Result<RawPlane> {
        if raster != 0 {
            return Err(FormatError::PlaneOutOfRange {
                index: raster,
                count: 1,
            });
        }
        let image = self.image.as_ref().ok_or(FormatError::Closed)?;
        let (width, height) = (u64::from(image.width()), u64::from(image.height()));
        let plane = match image {
            DynamicImage::ImageLuma8(buffer) => RawPlane {
                bytes: buffer.as_raw().clone(),
                descriptor: PlaneDescriptor::gray(PixelType::U8, width, height),
            },
            DynamicImage::ImageLuma16(buffer) => RawPlane {
                bytes: u16_to_le_bytes(buffer.as_raw()),
                descriptor: PlaneDescriptor::gray(PixelType::U16, width, height),
            },
            DynamicImage::ImageRgb8(buffer) => RawPlane {
                bytes: buffer.as_raw().clone(),
                descriptor: PlaneDescriptor::interleaved(PixelType::U8, 3, width, height),
            },
            DynamicImage::ImageRgb16(buffer) => RawPlane {
                bytes: u16_to_le_bytes(buffer.as_raw()),
                descriptor: PlaneDescriptor::interleaved(PixelType::U16, 3, width, height),
            },
            other => {
                return Err(FormatError::UnsupportedLayout(format!(
                    "unexpected raster color type {:?}",
                    other.color()
                )));
            }
        };
        Ok(plane)
    }

    fn close(&mut self) -> Result<()> {
        self.image = None;
        Ok(())
    }
}
