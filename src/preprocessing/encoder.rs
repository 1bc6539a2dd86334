//! One-hot categorical encoding

use super::string_values;
use crate::error::{LocatorError, Result};
use ndarray::Array2;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// What to do with a category that was not seen during fit
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum HandleUnknown {
    /// Encode as all zeros for that column
    #[default]
    Ignore,
    /// Fail the transform
    Error,
}

/// One-hot encoder over string categories.
///
/// Categories are kept sorted per column, with the missing-value category
/// (if any) last. Each column expands into one indicator per category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OneHotEncoder {
    handle_unknown: HandleUnknown,
    columns: Vec<String>,
    categories: Vec<Vec<Option<String>>>,
    is_fitted: bool,
}

fn compare_categories(a: &Option<String>, b: &Option<String>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

impl OneHotEncoder {
    /// Create a new encoder
    pub fn new(handle_unknown: HandleUnknown) -> Self {
        Self {
            handle_unknown,
            columns: Vec::new(),
            categories: Vec::new(),
            is_fitted: false,
        }
    }

    /// Learn the category set of each column
    pub fn fit(&mut self, df: &DataFrame, columns: &[&str]) -> Result<&mut Self> {
        let mut categories = Vec::with_capacity(columns.len());
        for col_name in columns {
            let mut values = string_values(df, col_name)?;
            values.sort_by(compare_categories);
            values.dedup();
            categories.push(values);
        }

        self.columns = columns.iter().map(|c| c.to_string()).collect();
        self.categories = categories;
        self.is_fitted = true;
        Ok(self)
    }

    /// Encode the fitted columns of `df` into indicator columns
    pub fn transform(&self, df: &DataFrame) -> Result<Array2<f64>> {
        if !self.is_fitted {
            return Err(LocatorError::ModelNotFitted);
        }

        let mut encoded = Array2::zeros((df.height(), self.n_output_features()));
        let mut offset = 0;

        for (col_name, categories) in self.columns.iter().zip(&self.categories) {
            let values = string_values(df, col_name)?;
            for (row, value) in values.iter().enumerate() {
                match categories.binary_search_by(|c| compare_categories(c, value)) {
                    Ok(idx) => encoded[[row, offset + idx]] = 1.0,
                    Err(_) => {
                        if self.handle_unknown == HandleUnknown::Error {
                            return Err(LocatorError::UnknownCategory {
                                column: col_name.clone(),
                                value: value.clone().unwrap_or_else(|| "null".to_string()),
                            });
                        }
                    }
                }
            }
            offset += categories.len();
        }

        Ok(encoded)
    }

    /// Fit and transform in one step
    pub fn fit_transform(&mut self, df: &DataFrame, columns: &[&str]) -> Result<Array2<f64>> {
        self.fit(df, columns)?;
        self.transform(df)
    }

    /// Total number of indicator columns produced
    pub fn n_output_features(&self) -> usize {
        self.categories.iter().map(Vec::len).sum()
    }

    /// Names of the indicator columns, `<column>_<category>`
    pub fn feature_names(&self) -> Vec<String> {
        self.columns
            .iter()
            .zip(&self.categories)
            .flat_map(|(col, cats)| {
                cats.iter().map(move |cat| match cat {
                    Some(cat) => format!("{}_{}", col, cat),
                    None => format!("{}_null", col),
                })
            })
            .collect()
    }

    /// Categories learned for a column
    pub fn categories(&self, column: &str) -> Option<&[Option<String>]> {
        self.columns
            .iter()
            .position(|c| c == column)
            .map(|idx| self.categories[idx].as_slice())
    }

    pub fn is_fitted(&self) -> bool {
        self.is_fitted
    }
}
