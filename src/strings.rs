// Copyright 2025 N. Dornseif
//
// Dual-licensed under Apache 2.0 and MIT terms.

//! User interaction strings are stored here.

pub const TEST_LABEL: &str = "Chi-squared test for generator: ";
pub const CHI_SQUARED_LABEL: &str = "Chi-squared value: ";
pub const DEGREES_OF_FREEDOM_LABEL: &str = "Degrees of freedom: ";
pub const CRITICAL_VALUE_LABEL: &str = "Critical value: ";
pub const SIGNIFICANCE_LABEL: &str = "Significance level: ";
pub const ACCEPT_STR: &str =
    "The test does not reject the null hypothesis of a uniform distribution";
pub const REJECT_STR: &str = "The test rejects the null hypothesis of a uniform distribution";

pub const P_VALUE_LABEL: &str = "p value: ";
pub const SAMPLE_SIZE_LABEL: &str = "Sample size: ";
pub const HISTOGRAM_LABEL: &str = "Histogram: ";
pub const GENERATED_LABEL: &str = "Generated: ";

pub const PASS_STR: &str = "PASSED";
pub const FAIL_STR: &str = "FAILED!!";

pub const SUCCESS_STR: &str = "Success";
