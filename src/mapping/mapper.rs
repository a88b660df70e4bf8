use serde::Serialize;
use tracing::warn;

use crate::formats::{FormatError, FormatReader, Result};
use crate::model::{AxisKey, AxisRole, AxisSet, Coordinate};

/// How raster indices relate to the dataset's axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Addressing {
    /// The reader decomposes raster indices along the structural axes.
    Axes,
    /// The reader only counts frames. Raster index is taken as the time
    /// index and every other axis is pinned to 0. This loses information for
    /// datasets with more than one structural axis.
    FrameSequence,
}

/// Translates between raster indices and coordinates for one dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct CoordinateMapper {
    raster_keys: Vec<AxisKey>,
    structural: Vec<(AxisKey, u64)>,
    interleaved_channels: Option<u64>,
    plane_count: u64,
    addressing: Addressing,
}

impl CoordinateMapper {
    /// Probes the reader's native decomposition once to pick the addressing
    /// mode.
    pub fn for_reader(axes: &AxisSet, reader: &dyn FormatReader) -> Result<Self> {
        let raster_keys = axes
            .raster_axes()
            .filter_map(|d| d.role.key())
            .collect::<Vec<_>>();
        let plane_count = reader.plane_count();
        let addressing = if plane_count == 0 {
            Addressing::Axes
        } else {
            let arity = reader.raster_to_position(0)?.len();
            if arity == raster_keys.len() {
                Addressing::Axes
            } else {
                warn!(
                    format = reader.format_name(),
                    arity,
                    axes = raster_keys.len(),
                    "raster decomposition does not match axis metadata, \
                     falling back to lossy frame-sequence addressing"
                );
                Addressing::FrameSequence
            }
        };
        Ok(Self::with_addressing(axes, plane_count, addressing))
    }

    pub fn with_addressing(axes: &AxisSet, plane_count: u64, addressing: Addressing) -> Self {
        let raster_keys = axes
            .raster_axes()
            .filter_map(|d| d.role.key())
            .collect();
        let structural = axes
            .structural()
            .filter_map(|d| d.role.key().map(|key| (key, d.length)))
            .collect();
        let interleaved_channels = axes
            .channel_interleaved()
            .then(|| axes.length(&AxisRole::Channel));
        Self {
            raster_keys,
            structural,
            interleaved_channels,
            plane_count,
            addressing,
        }
    }

    pub fn addressing(&self) -> Addressing {
        self.addressing
    }

    pub fn raster_keys(&self) -> &[AxisKey] {
        &self.raster_keys
    }

    pub fn position_to_coordinate(&self, position: &[u64]) -> Coordinate {
        self.raster_keys
            .iter()
            .zip(position)
            .fold(Coordinate::new(), |coordinate, (key, index)| {
                coordinate.with(key.clone(), *index)
            })
    }

    pub fn coordinate_to_position(&self, coordinate: &Coordinate) -> Vec<u64> {
        self.raster_keys
            .iter()
            .map(|key| coordinate.get_or_zero(key))
            .collect()
    }

    pub fn raster_to_coordinate(&self, reader: &dyn FormatReader, raster: u64) -> Result<Coordinate> {
        match self.addressing {
            Addressing::Axes => {
                let position = reader.raster_to_position(raster)?;
                Ok(self.position_to_coordinate(&position))
            }
            Addressing::FrameSequence => {
                if raster >= self.plane_count {
                    return Err(FormatError::PlaneOutOfRange {
                        index: raster,
                        count: self.plane_count,
                    });
                }
                Ok(frame_coordinate(raster))
            }
        }
    }

    pub fn coordinate_to_raster(&self, reader: &dyn FormatReader, coordinate: &Coordinate) -> Result<u64> {
        match self.addressing {
            Addressing::Axes => reader.position_to_raster(&self.coordinate_to_position(coordinate)),
            Addressing::FrameSequence => Ok(coordinate.time_index().unwrap_or(0)),
        }
    }

    /// True when every index of `coordinate` lies inside the declared extent
    /// of its axis. Axes the dataset lacks only admit index 0.
    pub fn contains(&self, coordinate: &Coordinate) -> bool {
        coordinate.iter().all(|(key, index)| match self.addressing {
            Addressing::Axes => index < self.length(key),
            Addressing::FrameSequence => match key {
                AxisKey::Time => index < self.plane_count,
                AxisKey::Channel => index < self.interleaved_channels.unwrap_or(1),
                _ => index == 0,
            },
        })
    }

    fn length(&self, key: &AxisKey) -> u64 {
        self.structural
            .iter()
            .find(|(candidate, _)| candidate == key)
            .map(|(_, length)| *length)
            .unwrap_or(1)
    }

    /// Zero-based maximum index along every structural axis.
    pub fn max_indices(&self) -> Coordinate {
        match self.addressing {
            Addressing::Axes => self
                .structural
                .iter()
                .fold(Coordinate::new(), |coordinate, (key, length)| {
                    coordinate.with(key.clone(), length.saturating_sub(1))
                }),
            Addressing::FrameSequence => frame_coordinate(self.plane_count.saturating_sub(1)),
        }
    }

    /// One coordinate per channel when channels are interleaved inside the
    /// plane; otherwise the coordinate itself.
    pub fn expand_channels(&self, coordinate: Coordinate) -> Vec<Coordinate> {
        match self.interleaved_channels {
            Some(channels) => (0..channels)
                .map(|channel| coordinate.clone().channel(channel))
                .collect(),
            None => vec![coordinate],
        }
    }
}

fn frame_coordinate(frame: u64) -> Coordinate {
    Coordinate::new().channel(0).time(frame).z(0)
}
