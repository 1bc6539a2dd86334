//! CatLocator ML - room classifier trainer
//!
//! Turns beacon telemetry (signal strength and beacon coordinates) into a
//! classifier that predicts which room a tag is in.
//!
//! # Modules
//!
//! - [`dataset`] - CSV loading and label column validation
//! - [`feature_engineering`] - Derived features and the fixed feature set
//! - [`preprocessing`] - One-hot encoding and standard scaling
//! - [`training`] - Stratified split, random forest, evaluation report
//! - [`export`] - Model and metadata persistence
//! - [`cli`] - Command-line interface

// Core error handling
pub mod error;

// Data
pub mod dataset;
pub mod feature_engineering;
pub mod preprocessing;

// Model
pub mod training;
pub mod export;

// Services
pub mod cli;

pub use error::{LocatorError, Result};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::error::{LocatorError, Result};

    pub use crate::dataset::load_dataset;
    pub use crate::feature_engineering::{feature_engineering, FEATURE_COLUMNS, LABEL_COLUMN};
    pub use crate::preprocessing::{ColumnTransformer, HandleUnknown, OneHotEncoder, StandardScaler};

    pub use crate::training::{
        build_model, build_model_with, classification_report, RoomClassifierPipeline, TrainEngine,
        TrainingConfig, TrainingOutcome,
    };

    pub use crate::export::{load_pipeline, read_metadata, ArtifactWriter, TrainingMetadata};
}
