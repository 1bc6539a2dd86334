//! CatLocator room classifier trainer - Main Entry Point

use clap::Parser;
use catlocator_ml::cli::{cmd_train, Cli};

fn main() -> anyhow::Result<()> {
    // Diagnostics go to stderr; stdout carries progress and the report
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "catlocator=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    cmd_train(&cli.csv, &cli.out)?;

    Ok(())
}
