//! Integration test: feature engineering and column preprocessing

use approx::assert_relative_eq;
use catlocator_ml::feature_engineering::{
    feature_engineering, CATEGORICAL_FEATURES, FEATURE_COLUMNS, NUMERIC_FEATURES,
};
use catlocator_ml::preprocessing::{ColumnTransformer, HandleUnknown};
use polars::prelude::*;

fn raw_frame() -> DataFrame {
    df!(
        "beacon_id" => &["b2", "b1", "b2", "b3"],
        "tag_id" => &["cat", "cat", "dog", "cat"],
        "rssi" => &[-60.0, -70.0, -80.0, -90.0],
        "beacon_x" => &[3.0, 0.0, -3.0, 1.0],
        "beacon_y" => &[4.0, 0.0, -4.0, 0.0],
        "beacon_z" => &[1.0, 1.0, 2.0, 2.0],
        "extra" => &[1, 2, 3, 4],
        "room" => &["hall", "hall", "office", "office"]
    )
    .unwrap()
}

#[test]
fn test_feature_frame_has_fixed_columns() {
    let (features, labels) = feature_engineering(&raw_frame()).unwrap();

    let names: Vec<String> = features
        .get_column_names()
        .iter()
        .map(|n| n.to_string())
        .collect();
    assert_eq!(names, FEATURE_COLUMNS);
    assert_eq!(labels, vec!["hall", "hall", "office", "office"]);
}

#[test]
fn test_magnitude_handles_negative_coordinates() {
    let (features, _) = feature_engineering(&raw_frame()).unwrap();
    let mag: Vec<f64> = features
        .column("beacon_xy_mag")
        .unwrap()
        .as_materialized_series()
        .f64()
        .unwrap()
        .into_no_null_iter()
        .collect();

    assert_relative_eq!(mag[0], 5.0);
    assert_relative_eq!(mag[1], 0.0);
    assert_relative_eq!(mag[2], 5.0);
    assert_relative_eq!(mag[3], 1.0);
}

#[test]
fn test_transformed_matrix_layout() {
    let (features, _) = feature_engineering(&raw_frame()).unwrap();
    let mut ct = ColumnTransformer::new(&CATEGORICAL_FEATURES, &NUMERIC_FEATURES, HandleUnknown::Ignore);
    let x = ct.fit_transform(&features).unwrap();

    // beacon_id: b1 b2 b3, tag_id: cat dog, then 5 numeric
    assert_eq!(x.shape(), &[4, 10]);
    assert_eq!(
        ct.feature_names_out()[..5],
        ["beacon_id_b1", "beacon_id_b2", "beacon_id_b3", "tag_id_cat", "tag_id_dog"]
    );

    // Row 0 is b2 / cat
    assert_eq!(x.row(0).to_vec()[..5], [0.0, 1.0, 0.0, 1.0, 0.0]);

    // Standardized columns have zero mean
    for col in 5..10 {
        assert_relative_eq!(x.column(col).sum(), 0.0, epsilon = 1e-9);
    }
}

#[test]
fn test_unseen_category_encodes_as_zeros() {
    let (features, _) = feature_engineering(&raw_frame()).unwrap();
    let mut ct = ColumnTransformer::new(&CATEGORICAL_FEATURES, &NUMERIC_FEATURES, HandleUnknown::Ignore);
    ct.fit(&features).unwrap();

    let unseen = df!(
        "beacon_id" => &["b9"],
        "tag_id" => &["cat"],
        "rssi" => &[-75.0],
        "beacon_x" => &[0.0],
        "beacon_y" => &[0.0],
        "beacon_z" => &[1.5],
        "beacon_xy_mag" => &[0.0]
    )
    .unwrap();
    let x = ct.transform(&unseen).unwrap();

    assert_eq!(x.row(0).to_vec()[..3], [0.0, 0.0, 0.0]);
    assert_eq!(x[[0, 3]], 1.0);
}
