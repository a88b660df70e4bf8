use std::fs;
use std::path::Path;
use std::time::Instant;

use image::{ImageBuffer, Luma};
use tracing::{debug, info};

use crate::model::{Image, PlanePixels};
use crate::view::DatasetView;

use super::{ExportError, ExportRecipe, ExportReport, ExportedImage, QueryReport, Result};

/// Runs every query of `recipe` against `view` and writes each matching image
/// as `<prefix>_<coordinate>.png` into `output_dir`.
pub fn run_export(
    view: &mut DatasetView,
    recipe: &ExportRecipe,
    output_dir: impl AsRef<Path>,
) -> Result<ExportReport> {
    recipe.validate()?;
    let output_dir = output_dir.as_ref();
    fs::create_dir_all(output_dir)?;

    let mut queries = Vec::with_capacity(recipe.queries.len());
    for query in &recipe.queries {
        let started = Instant::now();
        let prefix = query.prefix(view.name());
        let mut images = Vec::new();
        for image in view.get_images_matching(&query.coordinate)? {
            let path = output_dir.join(format!("{prefix}_{}.png", image.coordinate.file_stem()));
            write_png(&image, &path)?;
            debug!(path = %path.display(), "exported image");
            images.push(ExportedImage {
                coordinate: image.coordinate.clone(),
                path,
                width: image.width(),
                height: image.height(),
                bit_depth: image.metadata.bit_depth,
            });
        }
        queries.push(QueryReport {
            query: query.coordinate.clone(),
            label: query.label.clone(),
            duration_ms: started.elapsed().as_millis(),
            images,
        });
    }

    let total_images = queries.iter().map(|query| query.images.len()).sum();
    info!(
        dataset = view.name(),
        queries = queries.len(),
        images = total_images,
        "export finished"
    );
    Ok(ExportReport {
        recipe_name: recipe.name.clone(),
        dataset: view.name().to_string(),
        format: view.summary().format_name.clone(),
        queries,
        total_images,
    })
}

/// Writes one decoded plane as 8- or 16-bit grayscale, keeping its samples
/// unscaled.
pub fn write_png(image: &Image, path: &Path) -> Result<()> {
    let (width, height) = (image.width() as u32, image.height() as u32);
    let layout_error = || {
        ExportError::Layout(format!(
            "plane at {} does not fill {width}x{height}",
            image.coordinate
        ))
    };
    match &image.pixels {
        PlanePixels::U8(data) => {
            let samples = data.iter().copied().collect::<Vec<_>>();
            ImageBuffer::<Luma<u8>, _>::from_vec(width, height, samples)
                .ok_or_else(layout_error)?
                .save(path)?;
        }
        PlanePixels::U16(data) => {
            let samples = data.iter().copied().collect::<Vec<_>>();
            ImageBuffer::<Luma<u16>, _>::from_vec(width, height, samples)
                .ok_or_else(layout_error)?
                .save(path)?;
        }
    }
    Ok(())
}
