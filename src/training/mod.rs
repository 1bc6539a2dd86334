//! Model training module
//!
//! Provides everything between the feature frame and a fitted classifier:
//! - Training configuration
//! - Decision trees and random forests
//! - Stratified train/test splitting
//! - The preprocessing + forest pipeline
//! - Classification metrics and the text report

mod config;
mod engine;
pub mod decision_tree;
pub mod metrics;
pub mod pipeline;
pub mod random_forest;
pub mod split;

pub use config::{TrainingConfig, DEFAULT_N_ESTIMATORS, DEFAULT_RANDOM_STATE, DEFAULT_TEST_SIZE};
pub use decision_tree::{Criterion, DecisionTree, TreeNode};
pub use engine::{TrainEngine, TrainingOutcome};
pub use metrics::{classification_report, AverageMetrics, ClassMetrics, ClassificationReport};
pub use pipeline::{build_model, build_model_with, RoomClassifierPipeline};
pub use random_forest::{MaxFeatures, RandomForest};
pub use split::{take_labels, take_rows, train_test_split, TrainTestSplit};
