//! Benchmark run configuration
//!
//! This module handles loading and validating configuration from a JSON file.
//! All configuration is loaded at startup, validated, and passed by reference
//! into the runner.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::constants::{DEFAULT_BIN_DIR, DEFAULT_REPORT_PATH, DEFAULT_TIME_COMMAND};

/// Main harness configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Workload parameters (sieve upper bounds), tested in declared order
    pub max_primes: Vec<u64>,

    /// Target binary names inside `bin_dir`, tested in declared order
    pub binaries: Vec<String>,

    /// Warmup phase settings (results discarded)
    pub warmup: PhaseConfig,

    /// Measured phase settings (results aggregated)
    pub measure: PhaseConfig,

    /// Directory holding the target binaries
    #[serde(default = "default_bin_dir")]
    pub bin_dir: PathBuf,

    /// Destination of the CSV report
    #[serde(default = "default_report_path")]
    pub report_path: PathBuf,

    /// GNU time executable used as the profiling wrapper
    #[serde(default = "default_time_command")]
    pub time_command: String,
}

/// Iteration and timeout settings for one phase of a pair
#[derive(Debug, Clone, Deserialize)]
pub struct PhaseConfig {
    /// Number of repetitions in this phase
    pub iterations: u32,

    /// Per-repetition timeout in seconds
    pub timeout_seconds: u64,
}

fn default_bin_dir() -> PathBuf {
    PathBuf::from(DEFAULT_BIN_DIR)
}

fn default_report_path() -> PathBuf {
    PathBuf::from(DEFAULT_REPORT_PATH)
}

fn default_time_command() -> String {
    DEFAULT_TIME_COMMAND.to_string()
}

impl Config {
    /// Load and validate configuration from a JSON file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)
            .map_err(|e| ConfigError::Unreadable(path.to_path_buf(), e))?;
        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Path of a declared target inside the binaries directory
    pub fn binary_path(&self, name: &str) -> PathBuf {
        self.bin_dir.join(name)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.max_primes.is_empty() {
            return Err(ConfigError::Invalid("max_primes must not be empty".into()));
        }
        if self.binaries.is_empty() {
            return Err(ConfigError::Invalid("binaries must not be empty".into()));
        }
        for (name, phase) in [("warmup", &self.warmup), ("measure", &self.measure)] {
            if phase.iterations == 0 {
                return Err(ConfigError::Invalid(format!(
                    "{name}.iterations must be at least 1"
                )));
            }
            if phase.timeout_seconds == 0 {
                return Err(ConfigError::Invalid(format!(
                    "{name}.timeout_seconds must be at least 1"
                )));
            }
        }
        Ok(())
    }
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Cannot read configuration file {0}: {1}")]
    Unreadable(PathBuf, #[source] std::io::Error),

    #[error("Malformed configuration: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
