// Copyright 2025 N. Dornseif
//
// Dual-licensed under Apache 2.0 and MIT terms.

//! Misc utility functions.

use std::{fs, path::Path, time::Duration};

use crate::error::LabError;

/// Create `dir` and all missing parents.
pub fn ensure_dir(dir: &Path) -> Result<(), LabError> {
    fs::create_dir_all(dir).map_err(LabError::io(dir))
}

/// Format a duration into a pretty String.
/// e.g. 1.5 seconds is 1.500 s
pub fn format_elapsed_time(elapsed: Duration) -> String {
    let secs = elapsed.as_secs_f64();
    if secs >= 1.0 {
        format!("{:.3} s", secs)
    } else if secs >= 1e-3 {
        format!("{:.3} ms", secs * 1e3)
    } else {
        format!("{:.3} µs", secs * 1e6)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elapsed_time_units() {
        assert_eq!(format_elapsed_time(Duration::from_millis(1500)), "1.500 s");
        assert_eq!(format_elapsed_time(Duration::from_micros(2500)), "2.500 ms");
        assert_eq!(format_elapsed_time(Duration::from_nanos(1500)), "1.500 µs");
    }
}
