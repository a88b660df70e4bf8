use byteorder::{BigEndian, ByteOrder as _, LittleEndian};

use crate::model::{AxisSet, ByteOrder, PixelType, PlaneDescriptor, ReaderAxis};

use super::position::plane_count;
use super::{FormatError, FormatReader, RawPlane, Result};

/// Dataset held entirely in memory, addressed like any other reader.
#[derive(Debug, Clone)]
pub struct MemoryReader {
    name: String,
    axes: Vec<ReaderAxis>,
    raster_lengths: Vec<u64>,
    planes: Vec<RawPlane>,
    closed: bool,
}

impl MemoryReader {
    /// Fails when the number of planes does not match the raster axes.
    pub fn new(name: impl Into<String>, axes: Vec<ReaderAxis>, planes: Vec<RawPlane>) -> Result<Self> {
        let raster_lengths = AxisSet::classify_all(&axes)?
            .raster_axes()
            .map(|d| d.length)
            .collect::<Vec<_>>();
        let expected = plane_count(&raster_lengths)?;
        if expected != planes.len() as u64 {
            return Err(FormatError::UnsupportedLayout(format!(
                "axes describe {expected} plane(s) but {} were supplied",
                planes.len()
            )));
        }
        Ok(Self {
            name: name.into(),
            axes,
            raster_lengths,
            planes,
            closed: false,
        })
    }

    /// Every sample of plane `i` holds the value `i`, encoded as `template`
    /// describes.
    pub fn synthetic(
        name: impl Into<String>,
        axes: Vec<ReaderAxis>,
        template: PlaneDescriptor,
    ) -> Result<Self> {
        let raster_lengths = AxisSet::classify_all(&axes)?
            .raster_axes()
            .map(|d| d.length)
            .collect::<Vec<_>>();
        let count = plane_count(&raster_lengths)?;
        let samples = plane_count(&template.lengths)
            .ok()
            .and_then(|samples| usize::try_from(samples).ok())
            .filter(|samples| {
                samples
                    .checked_mul(template.pixel_type.bytes_per_sample())
                    .is_some()
            })
            .ok_or_else(|| {
                FormatError::UnsupportedLayout(format!(
                    "synthetic plane {:?} is too large to allocate",
                    template.lengths
                ))
            })?;
        let planes = (0..count)
            .map(|raster| RawPlane {
                bytes: fill(&template, samples, raster),
                descriptor: template.clone(),
            })
            .collect();
        Self::new(name, axes, planes)
    }

    /// Addresses planes purely by frame number, the way video containers do.
    pub fn frame_addressed(mut self) -> Self {
        self.raster_lengths = vec![self.planes.len() as u64];
        self
    }
}

fn fill(template: &PlaneDescriptor, samples: usize, raster: u64) -> Vec<u8> {
    let width = template.pixel_type.bytes_per_sample();
    let mut bytes = vec![0; samples * width];
    let big = template.byte_order == ByteOrder::BigEndian;
    for chunk in bytes.chunks_exact_mut(width) {
        match (template.pixel_type, big) {
            (PixelType::U8, _) => chunk[0] = raster as u8,
            (PixelType::U16, false) => LittleEndian::write_u16(chunk, raster as u16),
            (PixelType::U16, true) => BigEndian::write_u16(chunk, raster as u16),
            (PixelType::U32, false) => LittleEndian::write_u32(chunk, raster as u32),
            (PixelType::U32, true) => BigEndian::write_u32(chunk, raster as u32),
            (PixelType::F32, false) => LittleEndian::write_f32(chunk, raster as f32),
            (PixelType::F32, true) => BigEndian::write_f32(chunk, raster as f32),
        }
    }
    bytes
}

impl FormatReader for MemoryReader {
    fn format_name(&self) -> &str {
        "memory"
    }

    fn dataset_name(&self) -> &str {
        &self.name
    }

    fn axes(&self) -> &[ReaderAxis] {
        &self.axes
    }

    fn plane_count(&self) -> u64 {
        self.planes.len() as u64
    }

    fn raster_lengths(&self) -> Vec<u64> {
        self.raster_lengths.clone()
    }

    fn read_plane(&mut self, raster: u64) -> Result<RawPlane> {
        if self.closed {
            return Err(FormatError::Closed);
        }
        self.planes
            .get(raster as usize)
            .cloned()
            .ok_or(FormatError::PlaneOutOfRange {
                index: raster,
                count: self.planes.len() as u64,
            })
    }

    fn close(&mut self) -> Result<()> {
        self.closed = true;
        self.planes.clear();
        Ok(())
    }
}
