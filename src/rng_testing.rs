// Copyright 2025 N. Dornseif
//
// Dual-licensed under Apache 2.0 and MIT terms.

//! Statistical testing of every registered generator.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
    time::{Duration, Instant},
};

use tracing::{debug, info};

use crate::{
    config::Config,
    error::LabError,
    registry::{GeneratorRegistry, RegisteredGenerator},
    rngs::RandomGenerator,
    stats::{self, ChiSquareVerdict},
    strings, utils,
};

pub const DEFAULT_SAMPLE_SIZE: usize = 1000;

/// Result of testing one generator.
#[derive(Debug, Clone)]
pub struct TestReport {
    pub generator: &'static str,
    pub verdict: ChiSquareVerdict,
    pub time_used: Duration,
}

impl TestReport {
    /// The six fixed report lines.
    pub fn format(&self) -> String {
        let v = &self.verdict;
        format!(
            "{}{}\n{}{}\n{}{}\n{}{}\n{}{}\n{}\n",
            strings::TEST_LABEL,
            self.generator,
            strings::CHI_SQUARED_LABEL,
            v.chi_squared,
            strings::DEGREES_OF_FREEDOM_LABEL,
            v.degrees_of_freedom,
            strings::CRITICAL_VALUE_LABEL,
            v.critical_value,
            strings::SIGNIFICANCE_LABEL,
            v.significance_level,
            if v.is_ok {
                strings::ACCEPT_STR
            } else {
                strings::REJECT_STR
            }
        )
    }

    /// Supplementary block appended after the fixed lines.
    fn format_details(&self, generated_at: &str) -> String {
        let histogram = self
            .verdict
            .histogram
            .iter()
            .map(|count| count.to_string())
            .collect::<Vec<String>>()
            .join(" ");
        format!(
            "{}{:.6}\n{}{}\n{}{}\n{}{}\n",
            strings::P_VALUE_LABEL,
            self.verdict.p_value,
            strings::SAMPLE_SIZE_LABEL,
            self.verdict.sample_size,
            strings::HISTOGRAM_LABEL,
            histogram,
            strings::GENERATED_LABEL,
            generated_at,
        )
    }

    /// One line summary for logging.
    pub fn summary(&self) -> String {
        format!(
            "{:<28}: Time: {}     chi2: {:.4}     p: {:.6}   - {}",
            self.generator,
            utils::format_elapsed_time(self.time_used),
            self.verdict.chi_squared,
            self.verdict.p_value,
            if self.verdict.is_ok {
                strings::PASS_STR
            } else {
                strings::FAIL_STR
            }
        )
    }
}

/// Draw `sample_size` doubles from `test_rng`.
pub fn sample_doubles(test_rng: &mut dyn RandomGenerator, sample_size: usize) -> Vec<f64> {
    (0..sample_size).map(|_| test_rng.next_double()).collect()
}

/// Runs the chi-squared test for every registered generator
/// and writes one report file per generator.
#[derive(Debug, Clone)]
pub struct ChiSquareEvaluator {
    seed: i32,
    sample_size: usize,
    num_bins: usize,
    results_dir: PathBuf,
}

impl ChiSquareEvaluator {
    pub fn new(config: &Config) -> Self {
        ChiSquareEvaluator {
            seed: config.seed,
            sample_size: DEFAULT_SAMPLE_SIZE,
            num_bins: stats::DEFAULT_NUM_BINS,
            results_dir: config.test_results_dir(),
        }
    }

    /// Panics if `sample_size` is zero.
    pub fn with_sample_size(mut self, sample_size: usize) -> Self {
        assert!(sample_size > 0, "sample size must be positive");
        self.sample_size = sample_size;
        self
    }

    /// Panics if `num_bins` is below two.
    pub fn with_num_bins(mut self, num_bins: usize) -> Self {
        assert!(num_bins >= 2, "chi-squared test needs at least two bins");
        self.num_bins = num_bins;
        self
    }

    pub fn results_dir(&self) -> &Path {
        &self.results_dir
    }

    /// Test a fresh instance of `generator` seeded with the configured seed.
    pub fn evaluate(&self, generator: &RegisteredGenerator) -> TestReport {
        let start = Instant::now();
        let mut test_rng = generator.instantiate(self.seed);
        let samples = sample_doubles(test_rng.as_mut(), self.sample_size);
        let verdict = stats::chi_square_test(&samples, self.num_bins);
        TestReport {
            generator: generator.name(),
            verdict,
            time_used: start.elapsed(),
        }
    }

    /// Test all registered generators and persist their reports.
    pub fn run(&self, registry: &GeneratorRegistry) -> Result<Vec<TestReport>, LabError> {
        utils::ensure_dir(&self.results_dir)?;
        let mut reports = Vec::with_capacity(registry.len());
        for generator in registry.generators() {
            debug!(
                generator = generator.name(),
                seed = self.seed,
                "running chi-squared test"
            );
            let report = self.evaluate(generator);
            let path = self.write_report(&report)?;
            info!(report = %path.display(), "{}", report.summary());
            reports.push(report);
        }
        Ok(reports)
    }

    /// Write the report to `results_dir/<generator name>`.
    fn write_report(&self, report: &TestReport) -> Result<PathBuf, LabError> {
        let path = self.results_dir.join(report.generator);
        let generated_at = chrono::Local::now().to_rfc3339();
        let file = File::create(&path).map_err(LabError::io(&path))?;
        let mut writer = BufWriter::new(file);
        write_report_text(&mut writer, report, &generated_at).map_err(LabError::io(&path))?;
        Ok(path)
    }
}

fn write_report_text(
    writer: &mut BufWriter<File>,
    report: &TestReport,
    generated_at: &str,
) -> std::io::Result<()> {
    writer.write_all(report.format().as_bytes())?;
    writer.write_all(b"\n")?;
    writer.write_all(report.format_details(generated_at).as_bytes())?;
    writer.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rngs::{lcg::LinearCongruentialGenerator, SeededGenerator, SystemGenerator};

    fn test_config() -> Config {
        Config {
            resources_path: std::env::temp_dir(),
            ..Config::default()
        }
    }

    #[test]
    fn evaluate_uses_configured_seed() {
        let mut registry = GeneratorRegistry::new();
        registry
            .register_generator::<LinearCongruentialGenerator>()
            .unwrap();
        let config = Config {
            seed: 42,
            ..test_config()
        };
        let evaluator = ChiSquareEvaluator::new(&config);
        let generator = registry.get::<LinearCongruentialGenerator>().unwrap();
        let first = evaluator.evaluate(generator);
        let second = evaluator.evaluate(generator);
        assert_eq!(first.verdict, second.verdict);
        assert_eq!(first.verdict.sample_size, DEFAULT_SAMPLE_SIZE);
        assert_eq!(first.verdict.degrees_of_freedom, 9);
        assert_eq!(first.verdict.histogram.iter().sum::<usize>(), 1000);
        assert_eq!(first.generator, "LinearCongruentialGenerator");
    }

    #[test]
    fn report_has_six_fixed_lines() {
        let mut registry = GeneratorRegistry::new();
        registry.register_generator::<SystemGenerator>().unwrap();
        let evaluator = ChiSquareEvaluator::new(&test_config()).with_num_bins(4);
        let report = evaluator.evaluate(registry.get::<SystemGenerator>().unwrap());
        let text = report.format();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[0], "Chi-squared test for generator: SystemGenerator");
        assert_eq!(lines[2], "Degrees of freedom: 3");
        assert_eq!(lines[3], "Critical value: 7.815");
        assert_eq!(lines[4], "Significance level: 0.05");
        let expected = if report.verdict.is_ok {
            strings::ACCEPT_STR
        } else {
            strings::REJECT_STR
        };
        assert_eq!(lines[5], expected);
    }

    #[test]
    fn sample_size_is_configurable() {
        let mut r = LinearCongruentialGenerator::new(3);
        assert_eq!(sample_doubles(&mut r, 17).len(), 17);
        let mut registry = GeneratorRegistry::new();
        registry
            .register_generator::<LinearCongruentialGenerator>()
            .unwrap();
        let evaluator = ChiSquareEvaluator::new(&test_config()).with_sample_size(250);
        let generator = registry.get::<LinearCongruentialGenerator>().unwrap();
        let report = evaluator.evaluate(generator);
        assert_eq!(report.verdict.sample_size, 250);
    }

    #[test]
    #[should_panic(expected = "sample size must be positive")]
    fn zero_sample_size_is_rejected() {
        let _ = ChiSquareEvaluator::new(&test_config()).with_sample_size(0);
    }

    #[test]
    #[should_panic(expected = "at least two bins")]
    fn single_bin_is_rejected() {
        let _ = ChiSquareEvaluator::new(&test_config()).with_num_bins(1);
    }
}
