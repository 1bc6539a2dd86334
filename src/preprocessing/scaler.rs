//! Standard (z-score) feature scaling

use super::float_values;
use crate::error::{LocatorError, Result};
use ndarray::Array2;
use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// Parameters for a fitted column
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
struct ScalerParams {
    mean: f64,
    scale: f64,
}

/// Standard scaler: (x - mean) / std.
///
/// Uses the population standard deviation. NaN values are skipped when
/// fitting and stay NaN after transform. Constant columns keep a scale of 1.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StandardScaler {
    columns: Vec<String>,
    params: Vec<ScalerParams>,
    is_fitted: bool,
}

impl StandardScaler {
    /// Create a new scaler
    pub fn new() -> Self {
        Self::default()
    }

    /// Fit the scaler to the named columns
    pub fn fit(&mut self, df: &DataFrame, columns: &[&str]) -> Result<&mut Self> {
        let params = columns
            .iter()
            .map(|col_name| float_values(df, col_name).map(|values| Self::compute_params(&values)))
            .collect::<Result<Vec<_>>>()?;

        self.columns = columns.iter().map(|c| c.to_string()).collect();
        self.params = params;
        self.is_fitted = true;
        Ok(self)
    }

    /// Scale the fitted columns of `df`, one output column per input column
    pub fn transform(&self, df: &DataFrame) -> Result<Array2<f64>> {
        if !self.is_fitted {
            return Err(LocatorError::ModelNotFitted);
        }

        let mut scaled = Array2::zeros((df.height(), self.columns.len()));
        for (j, (col_name, params)) in self.columns.iter().zip(&self.params).enumerate() {
            let values = float_values(df, col_name)?;
            for (i, v) in values.into_iter().enumerate() {
                scaled[[i, j]] = (v - params.mean) / params.scale;
            }
        }

        Ok(scaled)
    }

    /// Fit and transform in one step
    pub fn fit_transform(&mut self, df: &DataFrame, columns: &[&str]) -> Result<Array2<f64>> {
        self.fit(df, columns)?;
        self.transform(df)
    }

    /// Fitted mean of a column
    pub fn mean(&self, column: &str) -> Option<f64> {
        self.param(column).map(|p| p.mean)
    }

    /// Fitted scale (standard deviation) of a column
    pub fn scale(&self, column: &str) -> Option<f64> {
        self.param(column).map(|p| p.scale)
    }

    pub fn is_fitted(&self) -> bool {
        self.is_fitted
    }

    fn param(&self, column: &str) -> Option<&ScalerParams> {
        self.columns
            .iter()
            .position(|c| c == column)
            .map(|idx| &self.params[idx])
    }

    fn compute_params(values: &[f64]) -> ScalerParams {
        let observed: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
        if observed.is_empty() {
            return ScalerParams { mean: 0.0, scale: 1.0 };
        }

        let n = observed.len() as f64;
        let mean = observed.iter().sum::<f64>() / n;
        let variance = observed.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
        let std = variance.sqrt();

        ScalerParams {
            mean,
            scale: if std == 0.0 { 1.0 } else { std },
        }
    }
}
