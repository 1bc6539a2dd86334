//! Beacon feature engineering
//!
//! Derives the planar distance of each beacon from the origin and selects the
//! fixed feature set used by the room classifier:
//! - `beacon_id`, `tag_id` (categorical)
//! - `rssi`, `beacon_x`, `beacon_y`, `beacon_z`, `beacon_xy_mag` (numeric)

use crate::error::{LocatorError, Result};
use polars::prelude::*;
use tracing::debug;

/// Label column holding the room name
pub const LABEL_COLUMN: &str = "room";

/// Derived planar magnitude column
pub const XY_MAGNITUDE_COLUMN: &str = "beacon_xy_mag";

/// Columns one-hot encoded by the preprocessing stage
pub const CATEGORICAL_FEATURES: [&str; 2] = ["beacon_id", "tag_id"];

/// Columns standardized by the preprocessing stage
pub const NUMERIC_FEATURES: [&str; 5] = [
    "rssi",
    "beacon_x",
    "beacon_y",
    "beacon_z",
    XY_MAGNITUDE_COLUMN,
];

/// Feature columns in model order
pub const FEATURE_COLUMNS: [&str; 7] = [
    "beacon_id",
    "tag_id",
    "rssi",
    "beacon_x",
    "beacon_y",
    "beacon_z",
    XY_MAGNITUDE_COLUMN,
];

/// sqrt(x² + y²). NaN in either input yields NaN.
pub fn xy_magnitude(x: f64, y: f64) -> f64 {
    (x * x + y * y).sqrt()
}

/// Split a loaded frame into the feature frame and the room labels.
///
/// Numeric features come back as Float64; a cell that does not parse as a
/// number fails with [`LocatorError::DataError`].
pub fn feature_engineering(df: &DataFrame) -> Result<(DataFrame, Vec<String>)> {
    let with_derived = add_beacon_xy_mag(df)?;
    let mut features = with_derived.select(FEATURE_COLUMNS)?;
    for name in NUMERIC_FEATURES {
        let values = float_series(&features, name)?;
        features.replace(name, values)?;
    }
    let labels = extract_labels(df)?;

    debug!(
        rows = features.height(),
        features = features.width(),
        "Derived feature matrix"
    );
    Ok((features, labels))
}

/// Return a copy of `df` with the `beacon_xy_mag` column appended
pub fn add_beacon_xy_mag(df: &DataFrame) -> Result<DataFrame> {
    let x = float_series(df, "beacon_x")?;
    let y = float_series(df, "beacon_y")?;

    let magnitude: Float64Chunked = x
        .f64()?
        .into_iter()
        .zip(y.f64()?.into_iter())
        .map(|pair| match pair {
            (Some(x), Some(y)) => Some(xy_magnitude(x, y)),
            _ => None,
        })
        .collect();

    let mut result = df.clone();
    result.with_column(magnitude.with_name(XY_MAGNITUDE_COLUMN.into()).into_series())?;
    Ok(result)
}

/// Read the room column as strings, one per record
pub fn extract_labels(df: &DataFrame) -> Result<Vec<String>> {
    let column = df
        .column(LABEL_COLUMN)
        .map_err(|_| LocatorError::MissingColumn(LABEL_COLUMN.to_string()))?
        .cast(&DataType::String)?;
    let values = column.as_materialized_series().str()?;

    values
        .into_iter()
        .enumerate()
        .map(|(row, value)| {
            value.map(str::to_string).ok_or_else(|| {
                LocatorError::DataError(format!("missing '{}' label at row {}", LABEL_COLUMN, row))
            })
        })
        .collect()
}

/// Strict Float64 view of a column. Nulls stay null, unparsable values fail.
fn float_series(df: &DataFrame, name: &str) -> Result<Series> {
    let column = df
        .column(name)
        .map_err(|_| LocatorError::FeatureNotFound(name.to_string()))?
        .strict_cast(&DataType::Float64)?;
    Ok(column.as_materialized_series().clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_df() -> DataFrame {
        df!(
            "room" => &["kitchen", "hall", "office"],
            "beacon_z" => &[0.5, 0.5, 1.0],
            "beacon_y" => &[4.0, 0.0, -12.0],
            "beacon_x" => &[3.0, 0.0, -5.0],
            "rssi" => &[-60i64, -70, -80],
            "tag_id" => &["t1", "t1", "t2"],
            "beacon_id" => &["b1", "b2", "b3"]
        )
        .unwrap()
    }

    #[test]
    fn test_xy_magnitude() {
        assert_eq!(xy_magnitude(3.0, 4.0), 5.0);
        assert_eq!(xy_magnitude(0.0, 0.0), 0.0);
        assert_eq!(xy_magnitude(-5.0, -12.0), 13.0);
        assert!(xy_magnitude(f64::NAN, 1.0).is_nan());
    }

    #[test]
    fn test_feature_columns_in_fixed_order() {
        let (features, labels) = feature_engineering(&sample_df()).unwrap();

        let names: Vec<String> = features
            .get_column_names()
            .iter()
            .map(|n| n.to_string())
            .collect();
        assert_eq!(names, FEATURE_COLUMNS.to_vec());
        assert_eq!(labels, vec!["kitchen", "hall", "office"]);
    }

    #[test]
    fn test_magnitude_column_values() {
        let derived = add_beacon_xy_mag(&sample_df()).unwrap();
        let mag: Vec<Option<f64>> = derived
            .column(XY_MAGNITUDE_COLUMN)
            .unwrap()
            .as_materialized_series()
            .f64()
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(mag, vec![Some(5.0), Some(0.0), Some(13.0)]);
    }

    #[test]
    fn test_null_coordinate_gives_null_magnitude() {
        let df = df!(
            "beacon_x" => &[Some(3.0), None, Some(1.0)],
            "beacon_y" => &[Some(4.0), Some(2.0), None]
        )
        .unwrap();
        let derived = add_beacon_xy_mag(&df).unwrap();
        let mag: Vec<Option<f64>> = derived
            .column(XY_MAGNITUDE_COLUMN)
            .unwrap()
            .as_materialized_series()
            .f64()
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(mag, vec![Some(5.0), None, None]);
    }

    #[test]
    fn test_non_numeric_coordinate_fails() {
        let mut df = sample_df();
        df.replace("beacon_x", Series::new("beacon_x".into(), &["3", "abc", "-5"]))
            .unwrap();
        let err = feature_engineering(&df).unwrap_err();
        assert!(matches!(err, LocatorError::DataError(_)));
    }

    #[test]
    fn test_non_numeric_rssi_fails() {
        let mut df = sample_df();
        df.replace("rssi", Series::new("rssi".into(), &["-60", "strong", "-80"]))
            .unwrap();
        let err = feature_engineering(&df).unwrap_err();
        assert!(matches!(err, LocatorError::DataError(_)));
    }

    #[test]
    fn test_numeric_strings_are_parsed() {
        let mut df = sample_df();
        df.replace("rssi", Series::new("rssi".into(), &["-60", "-70.5", "-80"]))
            .unwrap();
        let (features, _) = feature_engineering(&df).unwrap();
        assert_eq!(features.column("rssi").unwrap().dtype(), &DataType::Float64);
    }

    #[test]
    fn test_missing_feature_column() {
        let df = df!(
            "room" => &["kitchen"],
            "beacon_x" => &[1.0]
        )
        .unwrap();
        let err = feature_engineering(&df).unwrap_err();
        assert!(matches!(err, LocatorError::FeatureNotFound(ref c) if c == "beacon_y"));
    }

    #[test]
    fn test_numeric_room_labels_become_strings() {
        let df = df!("room" => &[1i64, 2, 2]).unwrap();
        let labels = extract_labels(&df).unwrap();
        assert_eq!(labels, vec!["1", "2", "2"]);
    }
}
