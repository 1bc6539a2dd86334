//! Integration test: Full run (CSV → features → train → artifacts → reload)

use catlocator_ml::cli::cmd_train;
use catlocator_ml::export::{load_pipeline, read_metadata, METADATA_FILE_NAME, MODEL_FILE_NAME};
use catlocator_ml::feature_engineering::feature_engineering;
use catlocator_ml::dataset::load_dataset;
use polars::prelude::*;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const HEADER: &str = "beacon_id,tag_id,rssi,beacon_x,beacon_y,beacon_z,room";

/// Three rooms, each dominated by its own beacon
fn telemetry_rows() -> Vec<String> {
    let rooms = [
        ("kitchen", "b1", 0.0, 0.0, -45.0),
        ("office", "b2", 6.0, 0.0, -50.0),
        ("bedroom", "b3", -3.0, -4.0, -55.0),
    ];
    let mut rows = Vec::new();
    for (room, beacon, x, y, rssi) in rooms {
        for i in 0..10 {
            let tag = if i % 2 == 0 { "cat-1" } else { "cat-2" };
            rows.push(format!(
                "{},{},{},{},{},1.0,{}",
                beacon,
                tag,
                rssi - i as f64,
                x,
                y,
                room
            ));
        }
    }
    rows
}

fn write_csv(dir: &Path, name: &str, header: &str, rows: &[String]) -> PathBuf {
    let path = dir.join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(file, "{}", header).unwrap();
    for row in rows {
        writeln!(file, "{}", row).unwrap();
    }
    path
}

#[test]
fn test_end_to_end_writes_both_artifacts() {
    let tmp = TempDir::new().unwrap();
    let csv = write_csv(tmp.path(), "telemetry.csv", HEADER, &telemetry_rows());
    let out = tmp.path().join("artifacts");

    cmd_train(&csv, &out).unwrap();

    assert!(out.join(MODEL_FILE_NAME).exists());
    assert!(out.join(METADATA_FILE_NAME).exists());

    let metadata = read_metadata(&out.join(METADATA_FILE_NAME)).unwrap();
    assert_eq!(metadata.label_column, "room");
    assert_eq!(
        metadata.feature_columns,
        vec!["beacon_id", "tag_id", "rssi", "beacon_x", "beacon_y", "beacon_z", "beacon_xy_mag"]
    );
    assert!(metadata.classification_report.contains("precision"));
    assert!(metadata.classification_report.contains("kitchen"));
}

#[test]
fn test_missing_room_writes_nothing() {
    let tmp = TempDir::new().unwrap();
    let rows: Vec<String> = telemetry_rows()
        .iter()
        .map(|r| r.rsplit_once(',').unwrap().0.to_string())
        .collect();
    let csv = write_csv(
        tmp.path(),
        "no_room.csv",
        "beacon_id,tag_id,rssi,beacon_x,beacon_y,beacon_z",
        &rows,
    );
    let out = tmp.path().join("artifacts");

    let err = cmd_train(&csv, &out).unwrap_err();
    assert!(err.to_string().contains("CSV missing 'room' column"));
    assert!(!out.exists());
}

#[test]
fn test_singleton_room_aborts_before_persisting() {
    let tmp = TempDir::new().unwrap();
    let mut rows = telemetry_rows();
    rows.push("b4,cat-1,-60.0,9.0,9.0,1.0,attic".to_string());
    let csv = write_csv(tmp.path(), "telemetry.csv", HEADER, &rows);
    let out = tmp.path().join("artifacts");

    assert!(cmd_train(&csv, &out).is_err());
    assert!(!out.exists());
}

#[test]
fn test_reloaded_model_predicts_rooms() {
    let tmp = TempDir::new().unwrap();
    let csv = write_csv(tmp.path(), "telemetry.csv", HEADER, &telemetry_rows());
    let out = tmp.path().join("artifacts");
    cmd_train(&csv, &out).unwrap();

    let pipeline = load_pipeline(&out.join(MODEL_FILE_NAME)).unwrap();
    assert_eq!(pipeline.classes(), &["bedroom", "kitchen", "office"]);

    let df = load_dataset(&csv).unwrap();
    let (features, labels) = feature_engineering(&df).unwrap();
    let predicted = pipeline.predict(&features).unwrap();

    let correct = predicted.iter().zip(&labels).filter(|(p, t)| p == t).count();
    assert!(correct as f64 / labels.len() as f64 > 0.9);
}

#[test]
fn test_reloaded_model_tolerates_unseen_categories() {
    let tmp = TempDir::new().unwrap();
    let csv = write_csv(tmp.path(), "telemetry.csv", HEADER, &telemetry_rows());
    let out = tmp.path().join("artifacts");
    cmd_train(&csv, &out).unwrap();

    let pipeline = load_pipeline(&out.join(MODEL_FILE_NAME)).unwrap();
    let unseen = df!(
        "beacon_id" => &["b99"],
        "tag_id" => &["cat-new"],
        "rssi" => &[-47.0],
        "beacon_x" => &[0.0],
        "beacon_y" => &[0.0],
        "beacon_z" => &[1.0],
        "beacon_xy_mag" => &[0.0]
    )
    .unwrap();

    let predicted = pipeline.predict(&unseen).unwrap();
    assert_eq!(predicted.len(), 1);
    assert!(pipeline.classes().contains(&predicted[0]));
}

#[test]
fn test_malformed_numeric_cell_aborts_run() {
    let tmp = TempDir::new().unwrap();
    let mut rows = telemetry_rows();
    rows[3] = "b1,cat-1,strong,0,0,1.0,kitchen".to_string();
    rows[12] = "b2,cat-2,-52,abc,0,1.0,office".to_string();
    let csv = write_csv(tmp.path(), "telemetry.csv", HEADER, &rows);
    let out = tmp.path().join("artifacts");

    assert!(cmd_train(&csv, &out).is_err());
    assert!(!out.exists());
}
