use clap::Parser;
use serde_json::{Value, json};

use crate::export::{load_recipe, run_export, save_report, write_png};
use crate::logging;
use crate::model::Coordinate;
use crate::view::DatasetView;

use super::types::{Cli, Commands, DatasetInfo};

pub fn run_cli() -> Result<(), String> {
    let cli = Cli::parse();
    logging::init(cli.log_level.as_deref())?;
    let output = execute(cli.command)?;
    println!(
        "{}",
        serde_json::to_string_pretty(&output).map_err(|error| error.to_string())?
    );
    Ok(())
}

pub(super) fn execute(command: Commands) -> Result<Value, String> {
    match command {
        Commands::Info { input } => {
            let view = DatasetView::open(&input).map_err(|error| error.to_string())?;
            let info = DatasetInfo {
                summary: view.summary().clone(),
                axes: view.axis_set().descriptors().to_vec(),
                addressing: view.addressing(),
                max_indices: view.max_indices(),
                frozen: view.is_frozen(),
            };
            serde_json::to_value(&info).map_err(|error| error.to_string())
        }
        Commands::Coords { input, query } => {
            let view = DatasetView::open(&input).map_err(|error| error.to_string())?;
            let query = parse_coordinate(query.as_deref().unwrap_or_default())?;
            let coordinates = view
                .image_coordinates()
                .map_err(|error| error.to_string())?
                .into_iter()
                .filter(|coordinate| query.is_subspace_of(coordinate))
                .collect::<Vec<_>>();
            serde_json::to_value(&coordinates).map_err(|error| error.to_string())
        }
        Commands::Extract {
            input,
            coordinate,
            output,
        } => {
            let mut view = DatasetView::open(&input).map_err(|error| error.to_string())?;
            let coordinate = parse_coordinate(&coordinate)?;
            let image = view
                .get_image(&coordinate)
                .map_err(|error| error.to_string())?;
            write_png(&image, &output).map_err(|error| error.to_string())?;
            view.close().map_err(|error| error.to_string())?;
            Ok(json!({
                "status": "ok",
                "coordinate": image.coordinate,
                "width": image.width(),
                "height": image.height(),
                "output": output,
            }))
        }
        Commands::Export {
            input,
            recipe,
            output_dir,
            report,
        } => {
            let mut view = DatasetView::open(&input).map_err(|error| error.to_string())?;
            let recipe = load_recipe(&recipe).map_err(|error| error.to_string())?;
            let export_report =
                run_export(&mut view, &recipe, &output_dir).map_err(|error| error.to_string())?;
            view.close().map_err(|error| error.to_string())?;
            if let Some(report_path) = report {
                save_report(report_path, &export_report).map_err(|error| error.to_string())?;
            }
            serde_json::to_value(&export_report).map_err(|error| error.to_string())
        }
    }
}

fn parse_coordinate(raw: &str) -> Result<Coordinate, String> {
    raw.parse::<Coordinate>()
        .map_err(|error| error.to_string())
}
