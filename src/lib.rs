pub mod cli;
pub mod decode;
pub mod export;
pub mod formats;
pub mod logging;
pub mod mapping;
pub mod model;
pub mod view;

pub use view::DatasetView;

pub fn run_cli() -> Result<(), String> {
    cli::run_cli()
}
