use serde::{Deserialize, Serialize};

use crate::model::Coordinate;

use super::{ExportError, Result};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExportRecipe {
    pub name: Option<String>,
    #[serde(default)]
    pub queries: Vec<ExportQuery>,
}

/// One partial coordinate; every image matching it is exported.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExportQuery {
    #[serde(default)]
    pub coordinate: Coordinate,
    pub label: Option<String>,
}

impl ExportQuery {
    /// File-name prefix for this query's images.
    pub fn prefix(&self, dataset_name: &str) -> String {
        match &self.label {
            Some(label) => label.trim().to_string(),
            None => dataset_name
                .rsplit_once('.')
                .map(|(stem, _)| stem)
                .unwrap_or(dataset_name)
                .to_string(),
        }
    }
}

impl ExportRecipe {
    pub fn validate(&self) -> Result<()> {
        if self.queries.is_empty() {
            return Err(ExportError::Parse(
                "export recipe must include at least one query".to_string(),
            ));
        }
        for (index, query) in self.queries.iter().enumerate() {
            if let Some(label) = &query.label {
                if label.trim().is_empty() {
                    return Err(ExportError::Parse(format!(
                        "query at index {index} has an empty label"
                    )));
                }
                if label.contains(['/', '\\']) {
                    return Err(ExportError::Parse(format!(
                        "query label `{label}` must not contain path separators"
                    )));
                }
            }
        }
        Ok(())
    }
}
