//! Harness error types
//!
//! Fatal errors (configuration, missing binaries, report I/O) abort the run;
//! pair-local errors abandon the current (target, parameter) pair only.

use thiserror::Error;

/// Application-wide error type for the benchmark harness
#[derive(Debug, Error)]
pub enum BenchError {
    /// Configuration file missing, malformed, or invalid
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// One or more declared targets are absent from the binaries directory
    #[error("Missing binaries: {}", .0.join(", "))]
    MissingBinaries(Vec<String>),

    /// The profiling wrapper could not be spawned, or the run exited abnormally
    #[error("Launch failure: {0}")]
    Launch(String),

    /// A repetition exceeded its timeout
    #[error("Timed out after {0}s")]
    Timeout(u64),

    /// A required diagnostic line was absent from the profiler output
    #[error("Profiler output missing metric: {0}")]
    MissingMetric(&'static str),

    /// The report could not be written
    #[error("Report error: {0}")]
    Report(String),
}

/// Result type alias using BenchError
pub type BenchResult<T> = Result<T, BenchError>;
