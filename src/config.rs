// Copyright 2025 N. Dornseif
//
// Dual-licensed under Apache 2.0 and MIT terms.

//! Run configuration, read from a JSON file with environment overrides.

use std::{
    env,
    fmt::Display,
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};

use serde::Deserialize;
use tracing::{info, warn};

use crate::error::LabError;

pub const DEFAULT_CONFIG_FILE: &str = "appSettings.json";
pub const DEFAULT_IMAGES_PATH: &str = "/images/";
pub const DEFAULT_TEST_PATH: &str = "/testResults/";
pub const DEFAULT_SEED: i32 = 0;
pub const DEFAULT_IMAGE_SIZE: usize = 512;
/// How many directories above the working directory the default
/// resources path lies.
const RESOURCES_DEPTH: usize = 3;

const ENV_PREFIX: &str = "PRNG_LAB_";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub resources_path: PathBuf,
    pub images_path: String,
    pub test_path: String,
    pub seed: i32,
    pub image_size: usize,
}

/// Config file contents before validation.
/// Values may be given as JSON strings or numbers.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawConfig {
    resources_path: Option<String>,
    images_path: Option<String>,
    test_path: Option<String>,
    seed: Option<serde_json::Value>,
    image_size: Option<serde_json::Value>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            resources_path: default_resources_path(),
            images_path: DEFAULT_IMAGES_PATH.to_owned(),
            test_path: DEFAULT_TEST_PATH.to_owned(),
            seed: DEFAULT_SEED,
            image_size: DEFAULT_IMAGE_SIZE,
        }
    }
}

impl Config {
    /// Read `path` if it exists, then apply environment overrides.
    /// A missing file yields the defaults, malformed JSON is an error.
    pub fn load(path: &Path) -> Result<Self, LabError> {
        let raw = if path.exists() {
            let text = fs::read_to_string(path).map_err(LabError::io(path))?;
            serde_json::from_str(&text)
                .map_err(|e| LabError::Config(format!("{}: {e}", path.display())))?
        } else {
            info!(path = %path.display(), "no configuration file, using defaults");
            RawConfig::default()
        };
        let mut config = Config::from_raw(raw);
        config.apply_env_overrides(|key| env::var(format!("{ENV_PREFIX}{key}")).ok());
        Ok(config)
    }

    /// Parse a JSON document.
    pub fn from_json(text: &str) -> Result<Self, LabError> {
        let raw: RawConfig =
            serde_json::from_str(text).map_err(|e| LabError::Config(e.to_string()))?;
        Ok(Config::from_raw(raw))
    }

    fn from_raw(raw: RawConfig) -> Self {
        let mut config = Config::default();
        if let Some(path) = raw.resources_path {
            config.resources_path = PathBuf::from(path);
        }
        if let Some(path) = raw.images_path {
            config.images_path = path;
        }
        if let Some(path) = raw.test_path {
            config.test_path = path;
        }
        if let Some(seed) = raw.seed {
            config.seed = parse_or_default("seed", &json_to_string(&seed), DEFAULT_SEED);
        }
        if let Some(size) = raw.image_size {
            config.image_size = parse_image_size(&json_to_string(&size));
        }
        config
    }

    /// Apply overrides found by `lookup`, keyed by the upper case
    /// environment names without prefix.
    fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(path) = lookup("RESOURCES_PATH") {
            self.resources_path = PathBuf::from(path);
        }
        if let Some(path) = lookup("IMAGES_PATH") {
            self.images_path = path;
        }
        if let Some(path) = lookup("TEST_PATH") {
            self.test_path = path;
        }
        if let Some(seed) = lookup("SEED") {
            self.seed = parse_or_default("seed", &seed, DEFAULT_SEED);
        }
        if let Some(size) = lookup("IMAGE_SIZE") {
            self.image_size = parse_image_size(&size);
        }
    }

    /// Directory holding one sub directory of images per generator.
    pub fn images_dir(&self) -> PathBuf {
        join_segment(&self.resources_path, &self.images_path)
    }

    /// Directory holding one report file per generator.
    pub fn test_results_dir(&self) -> PathBuf {
        join_segment(&self.resources_path, &self.test_path)
    }
}

/// Third ancestor of the working directory, or the furthest one available.
fn default_resources_path() -> PathBuf {
    let cwd = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let resources = cwd
        .ancestors()
        .take(RESOURCES_DEPTH + 1)
        .last()
        .map(Path::to_path_buf);
    resources.unwrap_or(cwd)
}

fn join_segment(base: &Path, segment: &str) -> PathBuf {
    let segment = segment.trim_matches(|c| c == '/' || c == '\\');
    if segment.is_empty() {
        base.to_path_buf()
    } else {
        base.join(segment)
    }
}

fn json_to_string(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn parse_or_default<T>(key: &str, value: &str, default: T) -> T
where
    T: FromStr + Display + Copy,
{
    match value.trim().parse() {
        Ok(v) => v,
        Err(_) => {
            warn!(key, value, %default, "unparseable configuration value, using default");
            default
        }
    }
}

/// Parsed as a positive i32, anything else falls back to the default.
fn parse_image_size(value: &str) -> usize {
    let size: i32 = parse_or_default("imageSize", value, DEFAULT_IMAGE_SIZE as i32);
    match usize::try_from(size) {
        Ok(size) if size > 0 => size,
        _ => {
            warn!(size, "imageSize must be positive, using default");
            DEFAULT_IMAGE_SIZE
        }
    }
}
