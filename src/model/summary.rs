use serde::{Deserialize, Serialize};

use super::{AxisRole, AxisSet, Coordinate};

/// Dataset-wide constants computed once when a dataset is opened.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetSummary {
    pub prefix: String,
    pub format_name: String,
    pub plane_count: u64,
    pub channel_names: Vec<String>,
    pub pixel_size_um: Option<f64>,
    pub z_step_um: Option<f64>,
    pub intended_dimensions: Coordinate,
}

impl DatasetSummary {
    pub fn from_axes(
        axes: &AxisSet,
        dataset_name: &str,
        format_name: &str,
        plane_count: u64,
    ) -> Self {
        let channel_count = axes
            .descriptor(&AxisRole::Channel)
            .map(|d| d.length)
            .unwrap_or(0);
        let mut channel_names = (0..channel_count)
            .map(|index| format!("Ch: {index}"))
            .collect::<Vec<_>>();
        // Consumers always expect at least one channel name.
        if channel_names.is_empty() {
            channel_names.push("Ch: 0".to_string());
        }

        let intended_dimensions = axes.structural().fold(
            Coordinate::new().channel(1).time(1).z(1),
            |dims, descriptor| match descriptor.role.key() {
                Some(key) => dims.with(key, descriptor.length),
                None => dims,
            },
        );

        Self {
            prefix: display_name(dataset_name),
            format_name: format_name.to_string(),
            plane_count,
            channel_names,
            pixel_size_um: axes.calibration(&AxisRole::X),
            z_step_um: axes.calibration(&AxisRole::Z),
            intended_dimensions,
        }
    }
}

/// Base name of a dataset path, with everything up to the last separator
/// removed.
pub fn display_name(dataset_name: &str) -> String {
    match dataset_name.rfind(['/', '\\']) {
        Some(index) => dataset_name[index + 1..].to_string(),
        None => dataset_name.to_string(),
    }
}
