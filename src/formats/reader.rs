use std::path::Path;

use crate::model::{PlaneDescriptor, ReaderAxis};

use super::Result;
use super::position::{position_to_raster, raster_to_position};

/// Raw bytes of one plane together with the metadata needed to decode them.
#[derive(Debug, Clone, PartialEq)]
pub struct RawPlane {
    pub bytes: Vec<u8>,
    pub descriptor: PlaneDescriptor,
}

/// Access to one opened dataset in its native linear plane order.
pub trait FormatReader {
    fn format_name(&self) -> &str;

    /// Dataset name as reported by the format, usually the source path.
    fn dataset_name(&self) -> &str;

    /// Axes in plane-layout order, including X and Y.
    fn axes(&self) -> &[ReaderAxis];

    fn plane_count(&self) -> u64;

    /// Lengths of the axes the raster index decomposes into, fastest first.
    fn raster_lengths(&self) -> Vec<u64>;

    fn raster_to_position(&self, raster: u64) -> Result<Vec<u64>> {
        raster_to_position(&self.raster_lengths(), raster)
    }

    fn position_to_raster(&self, position: &[u64]) -> Result<u64> {
        position_to_raster(&self.raster_lengths(), position)
    }

    fn read_plane(&mut self, raster: u64) -> Result<RawPlane>;

    fn close(&mut self) -> Result<()> {
        Ok(())
    }
}

pub trait FormatProvider {
    fn supports_extension(&self, extension: &str) -> bool;
    fn open(&self, path: &Path) -> Result<Box<dyn FormatReader>>;
}
