mod dataset_view;
mod error;


pub use dataset_view::DatasetView;
pub use error::{Result, ViewError};
