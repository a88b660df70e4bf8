use crate::view::ViewError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ExportError>;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("export recipe parse failure: {0}")]
    Parse(String),

    #[error("export I/O failure: {0}")]
    Io(#[from] std::io::Error),

    #[error("export serialization failure: {0}")]
    SerdeJson(#[from] serde_json::Error),

    #[error("export YAML serialization failure: {0}")]
    SerdeYaml(#[from] serde_yaml::Error),

    #[error("image layout cannot be written: {0}")]
    Layout(String),

    #[error("failed to write image: {0}")]
    Image(#[from] image::ImageError),

    #[error("dataset query failed: {0}")]
    View(#[from] ViewError),
}
