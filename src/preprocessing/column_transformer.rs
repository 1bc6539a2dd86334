//! Column-wise preprocessing stage

use super::{HandleUnknown, OneHotEncoder, StandardScaler};
use crate::error::{LocatorError, Result};
use ndarray::{concatenate, Array2, Axis};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Applies one-hot encoding to the categorical columns and standard scaling
/// to the numeric columns, then concatenates the results (encoded first).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnTransformer {
    categorical_columns: Vec<String>,
    numeric_columns: Vec<String>,
    encoder: OneHotEncoder,
    scaler: StandardScaler,
    is_fitted: bool,
}

impl ColumnTransformer {
    /// Create an unfit transformer over the given column groups
    pub fn new(categorical: &[&str], numeric: &[&str], handle_unknown: HandleUnknown) -> Self {
        Self {
            categorical_columns: categorical.iter().map(|c| c.to_string()).collect(),
            numeric_columns: numeric.iter().map(|c| c.to_string()).collect(),
            encoder: OneHotEncoder::new(handle_unknown),
            scaler: StandardScaler::new(),
            is_fitted: false,
        }
    }

    /// Fit the encoder and scaler on `df`
    pub fn fit(&mut self, df: &DataFrame) -> Result<&mut Self> {
        let categorical: Vec<&str> = self.categorical_columns.iter().map(String::as_str).collect();
        let numeric: Vec<&str> = self.numeric_columns.iter().map(String::as_str).collect();

        self.encoder.fit(df, &categorical)?;
        self.scaler.fit(df, &numeric)?;
        self.is_fitted = true;

        debug!(
            encoded = self.encoder.n_output_features(),
            scaled = self.numeric_columns.len(),
            "Fitted column transformer"
        );
        Ok(self)
    }

    /// Produce the dense model input matrix
    pub fn transform(&self, df: &DataFrame) -> Result<Array2<f64>> {
        if !self.is_fitted {
            return Err(LocatorError::ModelNotFitted);
        }

        let encoded = self.encoder.transform(df)?;
        let scaled = self.scaler.transform(df)?;
        Ok(concatenate(Axis(1), &[encoded.view(), scaled.view()])?)
    }

    /// Fit and transform in one step
    pub fn fit_transform(&mut self, df: &DataFrame) -> Result<Array2<f64>> {
        self.fit(df)?;
        self.transform(df)
    }

    /// Output column names in matrix order
    pub fn feature_names_out(&self) -> Vec<String> {
        let mut names = self.encoder.feature_names();
        names.extend(self.numeric_columns.iter().cloned());
        names
    }

    /// Number of output columns
    pub fn n_features_out(&self) -> usize {
        self.encoder.n_output_features() + self.numeric_columns.len()
    }

    pub fn encoder(&self) -> &OneHotEncoder {
        &self.encoder
    }

    pub fn scaler(&self) -> &StandardScaler {
        &self.scaler
    }

    pub fn is_fitted(&self) -> bool {
        self.is_fitted
    }
}
