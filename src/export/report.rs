use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::model::Coordinate;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExportedImage {
    pub coordinate: Coordinate,
    pub path: PathBuf,
    pub width: usize,
    pub height: usize,
    pub bit_depth: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QueryReport {
    pub query: Coordinate,
    pub label: Option<String>,
    pub duration_ms: u128,
    pub images: Vec<ExportedImage>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExportReport {
    pub recipe_name: Option<String>,
    pub dataset: String,
    pub format: String,
    pub queries: Vec<QueryReport>,
    pub total_images: usize,
}
