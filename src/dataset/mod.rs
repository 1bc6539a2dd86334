//! Telemetry dataset loading
//!
//! Reads CSV exports produced by the CatLocator server and checks that the
//! label column is present before anything else touches the data.

use crate::error::{LocatorError, Result};
use crate::feature_engineering::LABEL_COLUMN;
use polars::prelude::*;
use std::path::Path;
use tracing::debug;

/// Rows scanned when inferring the CSV schema
const INFER_SCHEMA_ROWS: usize = 1000;

/// Load a headered CSV export into a DataFrame.
///
/// Fails with [`LocatorError::MissingColumn`] when the `room` column is
/// absent. Feature columns are not checked here.
pub fn load_dataset(path: &Path) -> Result<DataFrame> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(INFER_SCHEMA_ROWS))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()?;

    validate_label_column(&df)?;

    debug!(
        path = %path.display(),
        rows = df.height(),
        cols = df.width(),
        "Loaded telemetry export"
    );
    Ok(df)
}

/// Check that the label column exists in the frame
pub fn validate_label_column(df: &DataFrame) -> Result<()> {
    let has_label = df
        .get_column_names()
        .iter()
        .any(|name| name.as_str() == LABEL_COLUMN);

    if !has_label {
        return Err(LocatorError::MissingColumn(LABEL_COLUMN.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_csv(lines: &[&str]) -> NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".csv")
            .tempfile()
            .unwrap();
        for line in lines {
            writeln!(file, "{}", line).unwrap();
        }
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_valid_csv() {
        let file = write_csv(&[
            "beacon_id,tag_id,rssi,beacon_x,beacon_y,beacon_z,room",
            "b1,t1,-60,1.0,2.0,0.5,kitchen",
            "b2,t1,-72,4.0,0.0,0.5,hall",
        ]);

        let df = load_dataset(file.path()).unwrap();
        assert_eq!(df.height(), 2);
        assert_eq!(df.width(), 7);
    }

    #[test]
    fn test_missing_room_column() {
        let file = write_csv(&[
            "beacon_id,tag_id,rssi,beacon_x,beacon_y,beacon_z",
            "b1,t1,-60,1.0,2.0,0.5",
        ]);

        let err = load_dataset(file.path()).unwrap_err();
        assert!(matches!(err, LocatorError::MissingColumn(ref col) if col == "room"));
    }

    #[test]
    fn test_label_only_csv_is_accepted() {
        // Feature columns are validated later, during selection
        let file = write_csv(&["room", "kitchen", "hall"]);
        assert!(load_dataset(file.path()).is_ok());
    }

    #[test]
    fn test_unreadable_file() {
        let result = load_dataset(Path::new("/nonexistent/telemetry.csv"));
        assert!(result.is_err());
    }
}
