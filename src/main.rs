// Copyright 2025 N. Dornseif
//
// Dual-licensed under Apache 2.0 and MIT terms.

//! Evaluates the bundled PRNGs and writes images and test reports.

use std::path::PathBuf;

use prng_lab::{config, error::LabError, strings, utils};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), LabError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let start = std::time::Instant::now();
    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(config::DEFAULT_CONFIG_FILE));
    let config = config::Config::load(&config_path)?;
    tracing::info!(?config, "configuration loaded");

    let registry = prng_lab::default_registry()?;
    prng_lab::run(&config, &registry)?;

    println!("{}", strings::SUCCESS_STR);
    tracing::info!(
        "Full program runtime: {}",
        utils::format_elapsed_time(start.elapsed())
    );
    Ok(())
}
