//! Primebench - External Binary Benchmarking Harness
//!
//! This library benchmarks compiled prime-sieve binaries by repeatedly
//! running them under a GNU time wrapper, extracting wall time, peak memory,
//! and CPU utilization, and aggregating the measurements into a CSV report.
//!
//! # Architecture
//!
//! - **Config**: JSON run configuration (targets, parameters, phase settings)
//! - **Bench**: process execution, metric extraction, warmup/measure loop
//! - **Report**: CSV serialization of the aggregated results

pub mod bench;
pub mod config;
pub mod constants;
pub mod error;
pub mod report;

// Re-export commonly used types
pub use bench::{AggregateResult, BenchmarkRunner, SampleMeasurement};
pub use config::Config;
pub use error::{BenchError, BenchResult};
