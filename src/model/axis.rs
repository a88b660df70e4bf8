use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::{CoreError, Result};

pub const X_LABEL: &str = "X";
pub const Y_LABEL: &str = "Y";
pub const CHANNEL_LABEL: &str = "Channel";
pub const TIME_LABEL: &str = "Time";
pub const Z_LABEL: &str = "Z";

/// Semantic role of one axis of a dataset.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AxisRole {
    X,
    Y,
    Channel,
    Time,
    Z,
    Named(String),
}

impl AxisRole {
    pub fn label(&self) -> &str {
        match self {
            Self::X => X_LABEL,
            Self::Y => Y_LABEL,
            Self::Channel => CHANNEL_LABEL,
            Self::Time => TIME_LABEL,
            Self::Z => Z_LABEL,
            Self::Named(name) => name,
        }
    }

    pub fn is_planar(&self) -> bool {
        matches!(self, Self::X | Self::Y)
    }

    /// The coordinate key for this role; `None` for the planar X/Y roles.
    pub fn key(&self) -> Option<AxisKey> {
        match self {
            Self::X | Self::Y => None,
            Self::Channel => Some(AxisKey::Channel),
            Self::Time => Some(AxisKey::Time),
            Self::Z => Some(AxisKey::Z),
            Self::Named(name) => Some(AxisKey::Named(name.clone())),
        }
    }
}

impl fmt::Display for AxisRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Maps a reader axis label onto its role. Unknown labels are kept verbatim.
pub fn classify(label: &str) -> AxisRole {
    match label {
        X_LABEL => AxisRole::X,
        Y_LABEL => AxisRole::Y,
        CHANNEL_LABEL => AxisRole::Channel,
        TIME_LABEL => AxisRole::Time,
        Z_LABEL => AxisRole::Z,
        other => AxisRole::Named(other.to_string()),
    }
}

/// Structural axis a coordinate can address. X and Y address pixels inside a
/// plane and therefore have no key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AxisKey {
    Channel,
    Time,
    Z,
    Named(String),
}

impl AxisKey {
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    /// Resolves a label the same way axis metadata is classified.
    pub fn from_label(label: &str) -> Option<Self> {
        classify(label).key()
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Channel => CHANNEL_LABEL,
            Self::Time => TIME_LABEL,
            Self::Z => Z_LABEL,
            Self::Named(name) => name,
        }
    }
}

impl fmt::Display for AxisKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Axis as reported by a format reader, in plane-layout order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReaderAxis {
    pub label: String,
    pub length: u64,
    pub calibration: Option<f64>,
    pub unit: Option<String>,
}

impl ReaderAxis {
    pub fn new(label: impl Into<String>, length: u64) -> Self {
        Self {
            label: label.into(),
            length,
            calibration: None,
            unit: None,
        }
    }

    pub fn calibrated(mut self, step: f64, unit: impl Into<String>) -> Self {
        self.calibration = Some(step);
        self.unit = Some(unit.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisDescriptor {
    pub role: AxisRole,
    pub position: usize,
    pub length: u64,
    pub calibration: Option<f64>,
    pub unit: Option<String>,
}

/// Classified axes of one dataset. Built once when the dataset is opened.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisSet {
    descriptors: Vec<AxisDescriptor>,
    x_position: usize,
    y_position: usize,
    channel_position: Option<usize>,
}

impl AxisSet {
    pub fn classify_all(axes: &[ReaderAxis]) -> Result<Self> {
        let mut descriptors = Vec::with_capacity(axes.len());
        let mut x_position = None;
        let mut y_position = None;
        let mut channel_position = None;

        for (position, axis) in axes.iter().enumerate() {
            if axis.length == 0 {
                return Err(CoreError::ZeroSizedAxis {
                    label: axis.label.clone(),
                    position,
                });
            }
            let role = classify(&axis.label);
            let slot = match role {
                AxisRole::X => Some(&mut x_position),
                AxisRole::Y => Some(&mut y_position),
                AxisRole::Channel => Some(&mut channel_position),
                _ => None,
            };
            if let Some(slot) = slot {
                if slot.is_some() {
                    warn!(
                        label = %axis.label,
                        position, "duplicate axis in metadata, keeping the first occurrence"
                    );
                    continue;
                }
                *slot = Some(position);
            } else if descriptors
                .iter()
                .any(|existing: &AxisDescriptor| existing.role == role)
            {
                warn!(
                    label = %axis.label,
                    position, "duplicate axis in metadata, keeping the first occurrence"
                );
                continue;
            }
            descriptors.push(AxisDescriptor {
                role,
                position,
                length: axis.length,
                calibration: axis.calibration,
                unit: axis.unit.clone(),
            });
        }

        let x_position = x_position.unwrap_or_else(|| {
            warn!("axis metadata has no X axis, assuming position 0");
            0
        });
        let y_position = y_position.unwrap_or_else(|| {
            warn!("axis metadata has no Y axis, assuming position 1");
            1
        });

        Ok(Self {
            descriptors,
            x_position,
            y_position,
            channel_position,
        })
    }

    pub fn descriptors(&self) -> &[AxisDescriptor] {
        &self.descriptors
    }

    pub fn x_position(&self) -> usize {
        self.x_position
    }

    pub fn y_position(&self) -> usize {
        self.y_position
    }

    pub fn channel_position(&self) -> Option<usize> {
        self.channel_position
    }

    /// True when channel samples are interleaved inside each plane, i.e. the
    /// channel axis varies fastest.
    pub fn channel_interleaved(&self) -> bool {
        self.channel_position == Some(0)
    }

    pub fn descriptor(&self, role: &AxisRole) -> Option<&AxisDescriptor> {
        self.descriptors.iter().find(|d| &d.role == role)
    }

    /// All non-X/Y axes in position order.
    pub fn structural(&self) -> impl Iterator<Item = &AxisDescriptor> {
        self.descriptors.iter().filter(|d| !d.role.is_planar())
    }

    /// Structural axes that the reader addresses through its raster index.
    /// An interleaved channel axis lives inside the plane and is excluded.
    pub fn raster_axes(&self) -> impl Iterator<Item = &AxisDescriptor> {
        let interleaved = self.channel_interleaved();
        self.structural()
            .filter(move |d| !(interleaved && d.role == AxisRole::Channel))
    }

    pub fn keys(&self) -> Vec<AxisKey> {
        self.structural().filter_map(|d| d.role.key()).collect()
    }

    /// Extent along `role`; a dataset without such an axis has length 1.
    pub fn length(&self, role: &AxisRole) -> u64 {
        self.descriptor(role).map(|d| d.length).unwrap_or(1)
    }

    pub fn calibration(&self, role: &AxisRole) -> Option<f64> {
        self.descriptor(role).and_then(|d| d.calibration)
    }
}
