mod error;
mod execute;
mod io;
mod recipe;
mod report;

#[cfg(test)]
mod tests;

pub use error::{ExportError, Result};
pub use execute::{run_export, write_png};
pub use io::{load_recipe, save_report};
pub use recipe::{ExportQuery, ExportRecipe};
pub use report::{ExportReport, ExportedImage, QueryReport};
