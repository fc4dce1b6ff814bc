// Copyright 2025 N. Dornseif
//
// Dual-licensed under Apache 2.0 and MIT terms.

//! Chi-squared goodness of fit testing against the uniform distribution.

use statrs::distribution::{ChiSquared, ContinuousCDF};

/// Significance level used for every verdict.
pub const SIGNIFICANCE_LEVEL: f64 = 0.05;
pub const DEFAULT_NUM_BINS: usize = 10;

/// Published critical values at the 0.05 level for 1 to 9 degrees of freedom.
const CRITICAL_VALUES: [f64; 9] = [
    3.841, 5.991, 7.815, 9.488, 11.070, 12.592, 14.067, 15.507, 16.919,
];

/// Outcome of one chi-squared test.
#[derive(Debug, Clone, PartialEq)]
pub struct ChiSquareVerdict {
    /// True if uniformity is not rejected.
    pub is_ok: bool,
    pub chi_squared: f64,
    pub degrees_of_freedom: usize,
    pub critical_value: f64,
    pub significance_level: f64,
    /// Upper tail probability of `chi_squared`.
    pub p_value: f64,
    pub sample_size: usize,
    pub histogram: Vec<usize>,
}

/// Count samples into `num_bins` equally wide bins spanning min to max.
/// If all samples are equal everything lands in bin 0.
pub fn histogram(samples: &[f64], num_bins: usize) -> Vec<usize> {
    assert!(num_bins > 0);
    let mut counts = vec![0usize; num_bins];
    let min = samples.iter().copied().fold(f64::INFINITY, f64::min);
    let max = samples.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    for &value in samples {
        counts[bin_index(value, min, max, num_bins)] += 1;
    }
    counts
}

/// Bin of `value`, clamped to 0..num_bins.
/// `value == max` would otherwise compute `num_bins`.
pub fn bin_index(value: f64, min: f64, max: f64, num_bins: usize) -> usize {
    if max == min {
        return 0;
    }
    let bin = ((value - min) / (max - min) * num_bins as f64).floor();
    // The float to int cast saturates, negative values become 0.
    (bin as usize).min(num_bins - 1)
}

/// Sum of (observed - expected)^2 / expected with uniform expectation.
pub fn chi_squared_statistic(counts: &[usize], sample_size: usize) -> f64 {
    let expected: f64 = sample_size as f64 / counts.len() as f64;
    let mut chi_squared: f64 = 0.0;
    for &value in counts {
        chi_squared += (value as f64 - expected).powi(2) / expected;
    }
    chi_squared
}

/// Critical value at `SIGNIFICANCE_LEVEL` for `df` degrees of freedom.
/// Uses the published table where available and the chi-squared
/// quantile function otherwise.
pub fn critical_value(df: usize) -> f64 {
    match df {
        1..=9 => CRITICAL_VALUES[df - 1],
        _ => chi_squared_dist(df).inverse_cdf(1.0 - SIGNIFICANCE_LEVEL),
    }
}

fn chi_squared_dist(df: usize) -> ChiSquared {
    assert!(df > 0, "chi-squared needs at least one degree of freedom");
    // Only fails for non positive df, excluded above.
    ChiSquared::new(df as f64).unwrap()
}

/// Get upper tail p value for given degrees of freedom and chi squared value.
fn chi_squared_p_value(df: usize, chi_squared: f64) -> f64 {
    chi_squared_dist(df).sf(chi_squared)
}

/// Run the chi-squared test on `samples` using `num_bins` bins.
/// Requires a non empty sample set and at least two bins.
pub fn chi_square_test(samples: &[f64], num_bins: usize) -> ChiSquareVerdict {
    assert!(!samples.is_empty(), "chi-squared test needs samples");
    assert!(num_bins >= 2, "chi-squared test needs at least two bins");
    let counts = histogram(samples, num_bins);
    let chi_squared = chi_squared_statistic(&counts, samples.len());
    let degrees_of_freedom = num_bins - 1;
    let critical_value = critical_value(degrees_of_freedom);
    ChiSquareVerdict {
        is_ok: chi_squared <= critical_value,
        chi_squared,
        degrees_of_freedom,
        critical_value,
        significance_level: SIGNIFICANCE_LEVEL,
        p_value: chi_squared_p_value(degrees_of_freedom, chi_squared),
        sample_size: samples.len(),
        histogram: counts,
    }
}
