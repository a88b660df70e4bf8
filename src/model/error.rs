use thiserror::Error;

pub type Result<T> = std::result::Result<T, CoreError>;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid axis `{label}` at position {position}: length 0")]
    ZeroSizedAxis { label: String, position: usize },

    #[error("invalid coordinate: {0}")]
    InvalidCoordinate(String),
}
