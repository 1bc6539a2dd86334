//! Feature preprocessing
//!
//! Turns the mixed-type feature frame into a dense numeric matrix:
//! - One-hot encoding for categorical columns (unknown categories ignored)
//! - Standard scaling for numeric columns
//! - A column transformer that applies both and concatenates the output

mod column_transformer;
mod encoder;
mod scaler;

pub use column_transformer::ColumnTransformer;
pub use encoder::{HandleUnknown, OneHotEncoder};
pub use scaler::StandardScaler;

use crate::error::{LocatorError, Result};
use polars::prelude::*;

/// Read a column as strings. Missing values stay `None`.
pub(crate) fn string_values(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>> {
    let column = df
        .column(name)
        .map_err(|_| LocatorError::FeatureNotFound(name.to_string()))?
        .cast(&DataType::String)?;
    let values = column.as_materialized_series().str()?;
    Ok(values.into_iter().map(|v| v.map(str::to_string)).collect())
}

/// Read a column as floats. Missing values become NaN; unparsable values fail.
pub(crate) fn float_values(df: &DataFrame, name: &str) -> Result<Vec<f64>> {
    let column = df
        .column(name)
        .map_err(|_| LocatorError::FeatureNotFound(name.to_string()))?
        .strict_cast(&DataType::Float64)?;
    let values = column.as_materialized_series().f64()?;
    Ok(values.into_iter().map(|v| v.unwrap_or(f64::NAN)).collect())
}
