//! Training engine: split, fit and evaluate the room classifier

use super::metrics::ClassificationReport;
use super::pipeline::{build_model_with, RoomClassifierPipeline};
use super::split::{take_labels, take_rows, train_test_split};
use super::TrainingConfig;
use crate::error::{LocatorError, Result};
use polars::prelude::*;
use std::time::Instant;
use tracing::{debug, info};

/// Everything a training run produces
#[derive(Debug, Clone)]
pub struct TrainingOutcome {
    /// Pipeline fitted on the training partition
    pub pipeline: RoomClassifierPipeline,
    /// Rendered classification report on the held-out partition
    pub report: String,
    /// Held-out accuracy
    pub accuracy: f64,
    pub n_train: usize,
    pub n_test: usize,
}

/// Runs a single split-fit-evaluate cycle
#[derive(Debug, Clone, Default)]
pub struct TrainEngine {
    config: TrainingConfig,
}

impl TrainEngine {
    /// Create a new training engine
    pub fn new(config: TrainingConfig) -> Self {
        Self { config }
    }

    /// Split `features`/`labels` with stratification, fit on the training
    /// partition and evaluate on the held-out partition.
    pub fn fit(&self, features: &DataFrame, labels: &[String]) -> Result<TrainingOutcome> {
        self.config.validate()?;
        if features.height() != labels.len() {
            return Err(LocatorError::ShapeError {
                expected: format!("{} labels", features.height()),
                actual: format!("{} labels", labels.len()),
            });
        }

        let start = Instant::now();
        let split = train_test_split(labels, self.config.test_size, self.config.random_state)?;

        let x_train = take_rows(features, &split.train_indices)?;
        let y_train = take_labels(labels, &split.train_indices);
        let x_test = take_rows(features, &split.test_indices)?;
        let y_test = take_labels(labels, &split.test_indices);

        info!(
            train = y_train.len(),
            test = y_test.len(),
            trees = self.config.n_estimators,
            "Training room classifier"
        );

        let mut pipeline = build_model_with(&self.config);
        pipeline.fit(&x_train, &y_train)?;

        let y_pred = pipeline.predict(&x_test)?;
        let report = ClassificationReport::compute(&y_test, &y_pred);

        debug!(
            accuracy = report.accuracy,
            elapsed_secs = start.elapsed().as_secs_f64(),
            "Evaluated on held-out partition"
        );

        Ok(TrainingOutcome {
            pipeline,
            accuracy: report.accuracy,
            report: report.to_string(),
            n_train: y_train.len(),
            n_test: y_test.len(),
        })
    }
}
