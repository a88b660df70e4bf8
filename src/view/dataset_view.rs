use std::fmt;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::decode::{PixelDecoder, PlaneLayout};
use crate::formats::{DefaultFormatProvider, FormatError, FormatProvider, FormatReader};
use crate::mapping::{Addressing, CoordinateMapper};
use crate::model::{AxisKey, AxisRole, AxisSet, Coordinate, DatasetSummary, Image, classify};

use super::{Result, ViewError};

/// Read-only view of one dataset, addressed by coordinates.
///
/// Axis metadata and the summary are computed once in [`DatasetView::from_reader`];
/// every image query reads and decodes its plane afresh. The view owns its
/// reader exclusively, so queries that touch pixels take `&mut self`.
pub struct DatasetView {
    reader: Option<Box<dyn FormatReader>>,
    axes: AxisSet,
    mapper: CoordinateMapper,
    decoder: PixelDecoder,
    summary: DatasetSummary,
}

impl fmt::Debug for DatasetView {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("DatasetView")
            .field("name", &self.summary.prefix)
            .field("planes", &self.summary.plane_count)
            .field("addressing", &self.mapper.addressing())
            .field("open", &self.reader.is_some())
            .finish()
    }
}

impl DatasetView {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with(&DefaultFormatProvider, path)
    }

    pub fn open_with(provider: &dyn FormatProvider, path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let open_error = |source: FormatError| ViewError::Open {
            path: path.to_path_buf(),
            source,
        };
        let extension = path
            .extension()
            .and_then(|value| value.to_str())
            .map(|value| value.to_ascii_lowercase())
            .unwrap_or_default();
        if !provider.supports_extension(&extension) {
            return Err(open_error(FormatError::UnsupportedFormat(extension)));
        }
        let reader = provider.open(path).map_err(open_error)?;
        Self::from_reader(reader)
    }

    pub fn from_reader(reader: Box<dyn FormatReader>) -> Result<Self> {
        let open_error = |source: FormatError| ViewError::Open {
            path: PathBuf::from(reader.dataset_name()),
            source,
        };
        let axes = AxisSet::classify_all(reader.axes())
            .map_err(|error| open_error(error.into()))?;
        let mapper = CoordinateMapper::for_reader(&axes, &*reader).map_err(open_error)?;
        let summary = DatasetSummary::from_axes(
            &axes,
            reader.dataset_name(),
            reader.format_name(),
            reader.plane_count(),
        );
        let decoder = PixelDecoder::new(PlaneLayout::from_axes(&axes), summary.pixel_size_um);

        info!(
            dataset = %summary.prefix,
            format = %summary.format_name,
            planes = summary.plane_count,
            axes = ?axes.keys(),
            "opened dataset"
        );

        Ok(Self {
            reader: Some(reader),
            axes,
            mapper,
            decoder,
            summary,
        })
    }

    pub fn summary(&self) -> &DatasetSummary {
        &self.summary
    }

    pub fn name(&self) -> &str {
        &self.summary.prefix
    }

    pub fn axis_set(&self) -> &AxisSet {
        &self.axes
    }

    /// Structural axes in plane-layout order.
    pub fn axes(&self) -> Vec<AxisKey> {
        self.axes.keys()
    }

    pub fn num_images(&self) -> u64 {
        self.summary.plane_count
    }

    pub fn addressing(&self) -> Addressing {
        self.mapper.addressing()
    }

    /// Datasets are never written through a view.
    pub fn is_frozen(&self) -> bool {
        true
    }

    pub fn is_open(&self) -> bool {
        self.reader.is_some()
    }

    pub fn axis_length(&self, role: &AxisRole) -> u64 {
        self.axes.length(role)
    }

    pub fn axis_length_by_label(&self, label: &str) -> u64 {
        self.axis_length(&classify(label))
    }

    pub fn max_indices(&self) -> Coordinate {
        self.mapper.max_indices()
    }

    pub fn raster_to_coordinate(&self, raster: u64) -> Result<Coordinate> {
        let reader = self.reader.as_deref().ok_or(ViewError::Closed)?;
        Ok(self.mapper.raster_to_coordinate(reader, raster)?)
    }

    pub fn coordinate_to_raster(&self, coordinate: &Coordinate) -> Result<u64> {
        let reader = self.reader.as_deref().ok_or(ViewError::Closed)?;
        Ok(self.mapper.coordinate_to_raster(reader, coordinate)?)
    }

    pub fn get_image(&mut self, coordinate: &Coordinate) -> Result<Image> {
        let reader = self.reader.as_deref_mut().ok_or(ViewError::Closed)?;
        if !self.mapper.contains(coordinate) {
            return Err(ViewError::NotFound(coordinate.clone()));
        }
        let raster = self.mapper.coordinate_to_raster(reader, coordinate)?;
        if raster >= self.summary.plane_count {
            return Err(ViewError::NotFound(coordinate.clone()));
        }
        debug!(raster, coordinate = %coordinate, "reading plane");
        let plane = reader.read_plane(raster)?;
        Ok(self
            .decoder
            .decode(&plane.bytes, &plane.descriptor, coordinate)?)
    }

    pub fn any_image(&mut self) -> Result<Image> {
        let reader = self.reader.as_deref_mut().ok_or(ViewError::Closed)?;
        if self.summary.plane_count == 0 {
            return Err(ViewError::NotFound(Coordinate::new()));
        }
        let coordinate = self.mapper.raster_to_coordinate(reader, 0)?;
        let target = self
            .mapper
            .expand_channels(coordinate)
            .into_iter()
            .next()
            .unwrap_or_default();
        let plane = reader.read_plane(0)?;
        Ok(self
            .decoder
            .decode(&plane.bytes, &plane.descriptor, &target)?)
    }

    /// Decodes every image whose coordinate matches `query`, in raster order.
    /// Scans all planes; each matching plane is read once.
    pub fn get_images_matching(&mut self, query: &Coordinate) -> Result<Vec<Image>> {
        let reader = self.reader.as_deref_mut().ok_or(ViewError::Closed)?;
        let mut images = Vec::new();
        for raster in 0..self.summary.plane_count {
            let coordinate = self.mapper.raster_to_coordinate(reader, raster)?;
            let targets = self
                .mapper
                .expand_channels(coordinate)
                .into_iter()
                .filter(|candidate| query.is_subspace_of(candidate))
                .collect::<Vec<_>>();
            if targets.is_empty() {
                continue;
            }
            let plane = reader.read_plane(raster)?;
            for target in &targets {
                images.push(self.decoder.decode(&plane.bytes, &plane.descriptor, target)?);
            }
        }
        debug!(query = %query, matches = images.len(), "matched images");
        Ok(images)
    }

    pub fn has_image(&self, query: &Coordinate) -> Result<bool> {
        let reader = self.reader.as_deref().ok_or(ViewError::Closed)?;
        for raster in 0..self.summary.plane_count {
            let coordinate = self.mapper.raster_to_coordinate(reader, raster)?;
            if self
                .mapper
                .expand_channels(coordinate)
                .iter()
                .any(|candidate| query.is_subspace_of(candidate))
            {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Coordinates of every image in raster order.
    pub fn image_coordinates(&self) -> Result<Vec<Coordinate>> {
        let reader = self.reader.as_deref().ok_or(ViewError::Closed)?;
        let mut coordinates = Vec::new();
        for raster in 0..self.summary.plane_count {
            let coordinate = self.mapper.raster_to_coordinate(reader, raster)?;
            coordinates.extend(self.mapper.expand_channels(coordinate));
        }
        Ok(coordinates)
    }

    /// Releases the reader. Pixel queries fail with [`ViewError::Closed`]
    /// afterwards; closing twice is a no-op.
    pub fn close(&mut self) -> Result<()> {
        if let Some(mut reader) = self.reader.take() {
            reader.close()?;
            info!(dataset = %self.summary.prefix, "closed dataset");
        }
        Ok(())
    }
}
