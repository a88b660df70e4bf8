use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{AxisKey, CoreError};

/// Position of one plane along the structural axes of a dataset.
///
/// A coordinate may be partial: axes it does not carry are treated as index 0
/// when it describes a plane, and as "any value" when it is used as a query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<String, u64>", into = "BTreeMap<String, u64>")]
pub struct Coordinate {
    indices: BTreeMap<AxisKey, u64>,
}

impl Coordinate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn channel(self, index: u64) -> Self {
        self.with(AxisKey::Channel, index)
    }

    pub fn time(self, index: u64) -> Self {
        self.with(AxisKey::Time, index)
    }

    pub fn z(self, index: u64) -> Self {
        self.with(AxisKey::Z, index)
    }

    /// Sets the axis `name` resolves to. Planar labels (`X`, `Y`) address
    /// pixels rather than planes and leave the coordinate unchanged; parse
    /// with [`str::parse`] to have them rejected instead.
    pub fn index(self, name: &str, index: u64) -> Self {
        match AxisKey::from_label(name) {
            Some(key) => self.with(key, index),
            None => self,
        }
    }

    pub fn with(mut self, key: AxisKey, index: u64) -> Self {
        self.set(key, index);
        self
    }

    pub fn set(&mut self, key: AxisKey, index: u64) {
        self.indices.insert(key, index);
    }

    pub fn get(&self, key: &AxisKey) -> Option<u64> {
        self.indices.get(key).copied()
    }

    pub fn get_or_zero(&self, key: &AxisKey) -> u64 {
        self.get(key).unwrap_or(0)
    }

    pub fn channel_index(&self) -> Option<u64> {
        self.get(&AxisKey::Channel)
    }

    pub fn time_index(&self) -> Option<u64> {
        self.get(&AxisKey::Time)
    }

    pub fn z_index(&self) -> Option<u64> {
        self.get(&AxisKey::Z)
    }

    pub fn contains(&self, key: &AxisKey) -> bool {
        self.indices.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&AxisKey, u64)> {
        self.indices.iter().map(|(key, index)| (key, *index))
    }

    /// True when every axis of this coordinate is present in `other` with the
    /// same index. Axes only `other` carries are ignored, so a partial query
    /// is a subspace of each full coordinate it selects.
    pub fn is_subspace_of(&self, other: &Coordinate) -> bool {
        self.iter()
            .all(|(key, index)| other.get(key) == Some(index))
    }

    /// Short label used in file names, e.g. `Channel1_Time3`.
    pub fn file_stem(&self) -> String {
        if self.is_empty() {
            return "plane".to_string();
        }
        self.iter()
            .map(|(key, index)| format!("{}{index}", sanitize(key.label())))
            .collect::<Vec<_>>()
            .join("_")
    }
}

fn sanitize(label: &str) -> String {
    label
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect()
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (position, (key, index)) in self.iter().enumerate() {
            if position > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{key}={index}")?;
        }
        f.write_str("}")
    }
}

impl TryFrom<BTreeMap<String, u64>> for Coordinate {
    type Error = CoreError;

    fn try_from(map: BTreeMap<String, u64>) -> Result<Self, Self::Error> {
        let mut coordinate = Self::new();
        for (label, index) in map {
            coordinate.set(planar_checked(&label)?, index);
        }
        Ok(coordinate)
    }
}

fn planar_checked(label: &str) -> Result<AxisKey, CoreError> {
    AxisKey::from_label(label).ok_or_else(|| {
        CoreError::InvalidCoordinate(format!("`{label}` addresses pixels, not planes"))
    })
}

impl From<Coordinate> for BTreeMap<String, u64> {
    fn from(coordinate: Coordinate) -> Self {
        coordinate
            .indices
            .into_iter()
            .map(|(key, index)| (key.label().to_string(), index))
            .collect()
    }
}

/// Parses `Channel=1,Time=3`. Labels resolve like axis metadata.
impl FromStr for Coordinate {
    type Err = CoreError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let mut coordinate = Self::new();
        for part in raw.split(',').map(str::trim).filter(|part| !part.is_empty()) {
            let (label, value) = part
                .split_once('=')
                .ok_or_else(|| CoreError::InvalidCoordinate(format!("missing `=` in `{part}`")))?;
            let label = label.trim();
            let key = planar_checked(label)?;
            let index = value.trim().parse::<u64>().map_err(|error| {
                CoreError::InvalidCoordinate(format!("invalid index for `{label}`: {error}"))
            })?;
            coordinate.set(key, index);
        }
        Ok(coordinate)
    }
}
