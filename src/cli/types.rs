use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::Serialize;

use crate::mapping::Addressing;
use crate::model::{AxisDescriptor, Coordinate, DatasetSummary};

#[derive(Debug, Parser)]
#[command(
    name = "planeview",
    version,
    about = "Inspect and extract planes of multi-dimensional microscopy datasets"
)]
pub(super) struct Cli {
    /// Log filter, e.g. `debug` or `planeview=trace`. Overrides RUST_LOG.
    #[arg(long, global = true)]
    pub(super) log_level: Option<String>,

    #[command(subcommand)]
    pub(super) command: Commands,
}

#[derive(Debug, Subcommand)]
pub(super) enum Commands {
    /// Prints axes, summary and addressing of a dataset as JSON.
    Info {
        input: PathBuf,
    },
    /// Lists the coordinate of every image, optionally restricted to a
    /// partial coordinate such as `Time=3`.
    Coords {
        input: PathBuf,
        #[arg(long)]
        query: Option<String>,
    },
    Extract {
        input: PathBuf,
        #[arg(long)]
        coordinate: String,
        #[arg(long)]
        output: PathBuf,
    },
    Export {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        recipe: PathBuf,
        #[arg(long)]
        output_dir: PathBuf,
        #[arg(long)]
        report: Option<PathBuf>,
    },
}

#[derive(Debug, Serialize)]
pub(super) struct DatasetInfo {
    pub(super) summary: DatasetSummary,
    pub(super) axes: Vec<AxisDescriptor>,
    pub(super) addressing: Addressing,
    pub(super) max_indices: Coordinate,
    pub(super) frozen: bool,
}
