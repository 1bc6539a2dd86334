//! CatLocator trainer CLI
//!
//! Loads a beacon telemetry CSV, trains the room classifier and writes the
//! artifacts to an output directory.

use clap::Parser;
use colored::*;
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::dataset::load_dataset;
use crate::export::{ArtifactWriter, TrainingMetadata};
use crate::feature_engineering::feature_engineering;
use crate::training::{TrainEngine, TrainingConfig};

// ─── Styling helpers ───────────────────────────────────────────────────────────

fn dim(s: &str) -> ColoredString    { s.truecolor(100, 100, 100) }
fn accent(s: &str) -> ColoredString { s.truecolor(120, 170, 255) }
fn muted(s: &str) -> ColoredString  { s.truecolor(140, 140, 140) }
fn ok(s: &str) -> ColoredString     { s.truecolor(100, 210, 120) }

fn step_ok(msg: &str) {
    println!("  {} {}", ok("✓"), msg);
}

fn step_run(msg: &str) {
    println!("  {} {}", accent("›"), msg);
}

fn step_done(detail: &str) {
    println!("    {} {}", ok("done"), dim(detail));
}

fn section(title: &str) {
    println!();
    println!("  {}", title.white().bold());
    println!("  {}", dim(&"─".repeat(56)));
}

// ─── CLI definition ────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "catlocator-train")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Train the CatLocator room classifier from beacon telemetry")]
#[command(long_about = None)]
pub struct Cli {
    /// Path to the exported telemetry CSV
    pub csv: PathBuf,

    /// Directory for the model and metadata files
    #[arg(long, default_value = "artifacts")]
    pub out: PathBuf,
}

// ─── Commands ──────────────────────────────────────────────────────────────────

/// Run a full training job: LOADING, TRAINING, PERSISTING
pub fn cmd_train(csv_path: &Path, out_dir: &Path) -> anyhow::Result<()> {
    section("Train");

    step_run(&format!("Loading dataset from {}", csv_path.display()));
    let start = Instant::now();
    let df = load_dataset(csv_path)?;
    let (features, labels) = feature_engineering(&df)?;
    step_done(&format!(
        "{} rows × {} features in {:?}",
        features.height(),
        features.width(),
        start.elapsed()
    ));

    step_run("Training model…");
    let start = Instant::now();
    let engine = TrainEngine::new(TrainingConfig::default());
    let outcome = engine.fit(&features, &labels)?;
    step_done(&format!(
        "{} train / {} test rows in {:?}",
        outcome.n_train,
        outcome.n_test,
        start.elapsed()
    ));

    step_run("Evaluating…");
    println!("{}", outcome.report);
    println!(
        "  {:<16} {}",
        muted("Accuracy"),
        format!("{:.4}", outcome.accuracy).white().bold()
    );

    section("Artifacts");
    let metadata = TrainingMetadata::new(outcome.report.clone());
    let saved = ArtifactWriter::new(out_dir).write(&outcome.pipeline, &metadata)?;
    step_ok(&format!("Saved model to {}", saved.model_path.display()));
    step_ok(&format!("Saved metadata to {}", saved.metadata_path.display()));
    println!();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_out_dir() {
        let cli = Cli::try_parse_from(["catlocator-train", "data.csv"]).unwrap();
        assert_eq!(cli.csv, PathBuf::from("data.csv"));
        assert_eq!(cli.out, PathBuf::from("artifacts"));
    }

    #[test]
    fn test_explicit_out_dir() {
        let cli = Cli::try_parse_from(["catlocator-train", "data.csv", "--out", "models/run1"]).unwrap();
        assert_eq!(cli.out, PathBuf::from("models/run1"));
    }

    #[test]
    fn test_csv_is_required() {
        assert!(Cli::try_parse_from(["catlocator-train"]).is_err());
    }
}
