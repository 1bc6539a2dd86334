//! Artifact persistence
//!
//! A training run leaves two files in the output directory:
//! - `room_classifier.joblib`: the fitted pipeline, bincode-encoded
//! - `metadata.json`: feature order, label column and the evaluation report

use crate::error::{LocatorError, Result};
use crate::feature_engineering::{FEATURE_COLUMNS, LABEL_COLUMN};
use crate::training::RoomClassifierPipeline;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use tracing::info;

/// File name of the serialized pipeline
pub const MODEL_FILE_NAME: &str = "room_classifier.joblib";

/// File name of the run metadata
pub const METADATA_FILE_NAME: &str = "metadata.json";

/// Run metadata written next to the model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingMetadata {
    /// Feature columns in the order the model consumes them
    pub feature_columns: Vec<String>,
    /// Name of the label column
    pub label_column: String,
    /// Text report from the held-out evaluation
    pub classification_report: String,
}

impl TrainingMetadata {
    /// Metadata for the fixed feature set with the given report
    pub fn new(classification_report: impl Into<String>) -> Self {
        Self {
            feature_columns: FEATURE_COLUMNS.iter().map(|c| c.to_string()).collect(),
            label_column: LABEL_COLUMN.to_string(),
            classification_report: classification_report.into(),
        }
    }
}

/// Paths of the files written by [`ArtifactWriter::write`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedArtifacts {
    pub model_path: PathBuf,
    pub metadata_path: PathBuf,
}

/// Writes run artifacts under an output directory
#[derive(Debug, Clone)]
pub struct ArtifactWriter {
    out_dir: PathBuf,
}

impl ArtifactWriter {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
        }
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    /// Create the output directory and write the model, then the metadata.
    ///
    /// The two writes are independent: a failure on the second leaves the
    /// first in place.
    pub fn write(
        &self,
        pipeline: &RoomClassifierPipeline,
        metadata: &TrainingMetadata,
    ) -> Result<SavedArtifacts> {
        fs::create_dir_all(&self.out_dir)?;

        let model_path = self.out_dir.join(MODEL_FILE_NAME);
        let bytes = bincode::serialize(pipeline)?;
        let mut file = BufWriter::new(File::create(&model_path)?);
        file.write_all(&bytes)?;
        file.flush()?;
        info!(path = %model_path.display(), bytes = bytes.len(), "Wrote model");

        let metadata_path = self.out_dir.join(METADATA_FILE_NAME);
        let json = serde_json::to_string_pretty(metadata)?;
        fs::write(&metadata_path, json)?;
        info!(path = %metadata_path.display(), "Wrote metadata");

        Ok(SavedArtifacts {
            model_path,
            metadata_path,
        })
    }
}

/// Load a pipeline written by [`ArtifactWriter::write`]
pub fn load_pipeline(path: &Path) -> Result<RoomClassifierPipeline> {
    let mut bytes = Vec::new();
    BufReader::new(File::open(path)?).read_to_end(&mut bytes)?;
    let pipeline: RoomClassifierPipeline = bincode::deserialize(&bytes)?;
    if !pipeline.is_fitted() {
        return Err(LocatorError::ModelNotFitted);
    }
    Ok(pipeline)
}

/// Read a metadata file
pub fn read_metadata(path: &Path) -> Result<TrainingMetadata> {
    let file = File::open(path)?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}
