//! Training configuration

use super::decision_tree::Criterion;
use super::random_forest::MaxFeatures;
use crate::error::{LocatorError, Result};
use crate::preprocessing::HandleUnknown;
use serde::{Deserialize, Serialize};

/// Default number of trees in the forest
pub const DEFAULT_N_ESTIMATORS: usize = 200;

/// Seed shared by the split and the forest
pub const DEFAULT_RANDOM_STATE: u64 = 42;

/// Fraction of records held out for evaluation
pub const DEFAULT_TEST_SIZE: f64 = 0.2;

/// Configuration for a training run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingConfig {
    /// Number of trees
    pub n_estimators: usize,

    /// Random seed for split and forest
    pub random_state: u64,

    /// Held-out fraction, in (0, 1)
    pub test_size: f64,

    /// Candidate features per split
    pub max_features: MaxFeatures,

    /// Split quality measure
    pub criterion: Criterion,

    /// Maximum depth of trees (None = grow until pure)
    pub max_depth: Option<usize>,

    /// Policy for categories unseen during fit
    pub handle_unknown: HandleUnknown,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            n_estimators: DEFAULT_N_ESTIMATORS,
            random_state: DEFAULT_RANDOM_STATE,
            test_size: DEFAULT_TEST_SIZE,
            max_features: MaxFeatures::Sqrt,
            criterion: Criterion::Gini,
            max_depth: None,
            handle_unknown: HandleUnknown::Ignore,
        }
    }
}

impl TrainingConfig {
    /// Set number of trees
    pub fn with_n_estimators(mut self, n: usize) -> Self {
        self.n_estimators = n;
        self
    }

    /// Set random seed
    pub fn with_random_state(mut self, seed: u64) -> Self {
        self.random_state = seed;
        self
    }

    /// Set held-out fraction
    pub fn with_test_size(mut self, test_size: f64) -> Self {
        self.test_size = test_size;
        self
    }

    /// Set maximum tree depth
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Set unknown category policy
    pub fn with_handle_unknown(mut self, policy: HandleUnknown) -> Self {
        self.handle_unknown = policy;
        self
    }

    /// Reject parameter combinations that cannot train
    pub fn validate(&self) -> Result<()> {
        if self.n_estimators == 0 {
            return Err(LocatorError::InvalidParameter {
                name: "n_estimators".to_string(),
                value: self.n_estimators.to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        if !(self.test_size > 0.0 && self.test_size < 1.0) {
            return Err(LocatorError::InvalidParameter {
                name: "test_size".to_string(),
                value: self.test_size.to_string(),
                reason: "must be in (0, 1)".to_string(),
            });
        }
        Ok(())
    }
}
