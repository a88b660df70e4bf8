use std::fs;

use tempfile::tempdir;

use crate::formats::MemoryReader;
use crate::model::{Coordinate, PixelType, PlaneDescriptor, ReaderAxis};
use crate::view::DatasetView;

use super::{ExportQuery, ExportRecipe, load_recipe, run_export, save_report};

fn test_view() -> DatasetView {
    let axes = vec![
        ReaderAxis::new("X", 3),
        ReaderAxis::new("Y", 2),
        ReaderAxis::new("Channel", 2),
        ReaderAxis::new("Time", 4),
    ];
    let reader = MemoryReader::synthetic(
        "runs/embryo.tif",
        axes,
        PlaneDescriptor::gray(PixelType::U16, 3, 2),
    )
    .expect("reader");
    DatasetView::from_reader(Box::new(reader)).expect("view")
}

#[test]
fn export_writes_one_png_per_matching_image() {
    let dir = tempdir().expect("tempdir");
    let recipe = ExportRecipe {
        name: Some("frames".to_string()),
        queries: vec![
            ExportQuery {
                coordinate: Coordinate::new().time(3),
                label: None,
            },
            ExportQuery {
                coordinate: Coordinate::new().channel(1).time(0),
                label: Some("first".to_string()),
            },
        ],
    };
    let mut view = test_view();
    let report = run_export(&mut view, &recipe, dir.path()).expect("export");

    assert_eq!(report.recipe_name.as_deref(), Some("frames"));
    assert_eq!(report.total_images, 3);
    assert_eq!(report.queries[0].images.len(), 2);
    assert!(dir.path().join("embryo_Channel0_Time3.png").exists());
    assert!(dir.path().join("first_Channel1_Time0.png").exists());

    let written = image::open(dir.path().join("embryo_Channel1_Time3.png"))
        .expect("read back")
        .into_luma16();
    assert_eq!(written.dimensions(), (3, 2));
    // Raster index of Channel 1, Time 3.
    assert!(written.pixels().all(|pixel| pixel.0[0] == 7));
}

#[test]
fn queries_without_matches_export_nothing() {
    let dir = tempdir().expect("tempdir");
    let recipe = ExportRecipe {
        name: None,
        queries: vec![ExportQuery {
            coordinate: Coordinate::new().time(9),
            label: None,
        }],
    };
    let report = run_export(&mut test_view(), &recipe, dir.path()).expect("export");
    assert_eq!(report.total_images, 0);
    assert!(report.queries[0].images.is_empty());
}

#[test]
fn recipe_loads_from_yaml_and_report_saves_as_json() {
    let dir = tempdir().expect("tempdir");
    let recipe_path = dir.path().join("recipe.yaml");
    fs::write(
        &recipe_path,
        "name: late\nqueries:\n  - coordinate: {Channel: 0, Time: 2}\n    label: late\n",
    )
    .expect("write recipe");
    let recipe = load_recipe(&recipe_path).expect("recipe");
    assert_eq!(recipe.queries[0].coordinate, Coordinate::new().channel(0).time(2));

    let out = dir.path().join("out");
    let report = run_export(&mut test_view(), &recipe, &out).expect("export");
    let report_path = dir.path().join("report.json");
    save_report(&report_path, &report).expect("save");
    let raw = fs::read_to_string(&report_path).expect("read report");
    let parsed: serde_json::Value = serde_json::from_str(&raw).expect("json");
    assert_eq!(parsed["total_images"], 1);
    assert_eq!(parsed["queries"][0]["images"][0]["coordinate"]["Time"], 2);
}

#[test]
fn invalid_recipes_are_rejected() {
    let empty = ExportRecipe {
        name: None,
        queries: vec![],
    };
    assert!(empty.validate().is_err());

    let escaping = ExportRecipe {
        name: None,
        queries: vec![ExportQuery {
            coordinate: Coordinate::new(),
            label: Some("../up".to_string()),
        }],
    };
    assert!(escaping.validate().is_err());

    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("recipe.json");
    fs::write(&path, r#"{"queries": [{"coordinate": {"X": 1}}]}"#).expect("write");
    assert!(load_recipe(&path).is_err());
}
