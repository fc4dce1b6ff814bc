// Copyright 2025 N. Dornseif
//
// Dual-licensed under Apache 2.0 and MIT terms.

//! Statistical evaluation and visualization of PRNGs.

pub mod conditioning;
pub mod config;
pub mod error;
pub mod pixels;
pub mod registry;
pub mod rng_testing;
pub mod rngs;
pub mod sampler;
pub mod stats;
pub mod strings;
pub mod utils;

use tracing::info;

use config::Config;
use error::LabError;
use registry::GeneratorRegistry;
use rng_testing::{ChiSquareEvaluator, TestReport};
use rngs::{lcg::LinearCongruentialGenerator, SystemGenerator};
use sampler::ImageSampler;

/// Registry holding every generator shipped with this crate.
pub fn default_registry() -> Result<GeneratorRegistry, LabError> {
    let mut registry = GeneratorRegistry::new();
    registry.register_generator::<SystemGenerator>()?;
    registry.register_generator::<LinearCongruentialGenerator>()?;
    Ok(registry)
}

/// Render all images, then run the chi-squared test for all generators.
pub fn run(config: &Config, registry: &GeneratorRegistry) -> Result<Vec<TestReport>, LabError> {
    let sampler = ImageSampler::new(config);
    let images = sampler.create_images(registry)?;
    info!(count = images.len(), dir = %sampler.images_dir().display(), "images written");
    let evaluator = ChiSquareEvaluator::new(config);
    let reports = evaluator.run(registry)?;
    info!(count = reports.len(), dir = %evaluator.results_dir().display(), "reports written");
    Ok(reports)
}
