//! Room classifier pipeline: column preprocessing followed by a random forest

use super::random_forest::RandomForest;
use super::TrainingConfig;
use crate::error::{LocatorError, Result};
use crate::feature_engineering::{CATEGORICAL_FEATURES, NUMERIC_FEATURES};
use crate::preprocessing::ColumnTransformer;
use ndarray::Array2;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::debug;

/// Preprocessing and classifier fitted together on string room labels
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomClassifierPipeline {
    preprocess: ColumnTransformer,
    model: RandomForest,
    /// Sorted room labels; model outputs index into this list
    classes: Vec<String>,
    is_fitted: bool,
}

/// Build the default unfit pipeline
pub fn build_model() -> RoomClassifierPipeline {
    build_model_with(&TrainingConfig::default())
}

/// Build an unfit pipeline from an explicit configuration
pub fn build_model_with(config: &TrainingConfig) -> RoomClassifierPipeline {
    let preprocess = ColumnTransformer::new(
        &CATEGORICAL_FEATURES,
        &NUMERIC_FEATURES,
        config.handle_unknown,
    );

    let mut model = RandomForest::new(config.n_estimators)
        .with_random_state(config.random_state)
        .with_max_features(config.max_features)
        .with_criterion(config.criterion);
    if let Some(depth) = config.max_depth {
        model = model.with_max_depth(depth);
    }

    RoomClassifierPipeline {
        preprocess,
        model,
        classes: Vec::new(),
        is_fitted: false,
    }
}

impl RoomClassifierPipeline {
    /// Fit preprocessing and the forest on `x` with room labels `y`
    pub fn fit(&mut self, x: &DataFrame, y: &[String]) -> Result<&mut Self> {
        if x.height() != y.len() {
            return Err(LocatorError::ShapeError {
                expected: format!("{} labels", x.height()),
                actual: format!("{} labels", y.len()),
            });
        }

        let classes: Vec<String> = y
            .iter()
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let encoded_y = y
            .iter()
            .map(|label| {
                classes
                    .binary_search(label)
                    .map_err(|_| LocatorError::DataError(format!("unindexed label '{}'", label)))
            })
            .collect::<Result<Vec<usize>>>()?;

        let matrix = self.preprocess.fit_transform(x)?;
        self.model.fit(&matrix, &encoded_y, classes.len())?;

        debug!(
            samples = matrix.nrows(),
            inputs = matrix.ncols(),
            classes = classes.len(),
            "Fitted room classifier"
        );

        self.classes = classes;
        self.is_fitted = true;
        Ok(self)
    }

    /// Class probabilities per row, columns ordered as [`Self::classes`]
    pub fn predict_proba(&self, x: &DataFrame) -> Result<Array2<f64>> {
        if !self.is_fitted {
            return Err(LocatorError::ModelNotFitted);
        }
        let matrix = self.preprocess.transform(x)?;
        self.model.predict_proba(&matrix)
    }

    /// Predicted room label per row
    pub fn predict(&self, x: &DataFrame) -> Result<Vec<String>> {
        if !self.is_fitted {
            return Err(LocatorError::ModelNotFitted);
        }
        let matrix = self.preprocess.transform(x)?;
        let predicted = self.model.predict(&matrix)?;
        Ok(predicted
            .iter()
            .map(|&idx| self.classes[idx].clone())
            .collect())
    }

    /// Forest importances keyed by the transformed feature name, highest first
    pub fn feature_importances(&self) -> Option<Vec<(String, f64)>> {
        let importances = self.model.feature_importances()?;
        let mut named: Vec<(String, f64)> = self
            .preprocess
            .feature_names_out()
            .into_iter()
            .zip(importances.iter().copied())
            .collect();
        named.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        Some(named)
    }

    /// Room labels seen during fit, sorted
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn preprocess(&self) -> &ColumnTransformer {
        &self.preprocess
    }

    pub fn model(&self) -> &RandomForest {
        &self.model
    }

    pub fn is_fitted(&self) -> bool {
        self.is_fitted
    }
}
