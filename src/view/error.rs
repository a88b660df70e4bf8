use std::path::PathBuf;

use crate::decode::DecodeError;
use crate::formats::FormatError;
use crate::model::Coordinate;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ViewError>;

#[derive(Debug, Error)]
pub enum ViewError {
    #[error("failed to open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: FormatError,
    },

    #[error("plane read failed: {0}")]
    Read(#[from] FormatError),

    #[error("plane decode failed: {0}")]
    Decode(#[from] DecodeError),

    #[error("no image at {0}")]
    NotFound(Coordinate),

    #[error("dataset has been closed")]
    Closed,
}

impl ViewError {
    /// Missing images are an expected outcome of a query, not a fault.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}
