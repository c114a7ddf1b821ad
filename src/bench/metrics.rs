//! Profiler output extraction and per-pair aggregation
//!
//! GNU time (`-v`) prints human-readable diagnostics on stderr; the two
//! lines below are the sole source of memory and CPU metrics. Wall time is
//! measured by the harness itself, not taken from the profiler.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::error::BenchError;

/// `Maximum resident set size (kbytes): N`
static PEAK_RSS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Maximum resident set size \(kbytes\): (\d+)")
        .expect("Invalid peak RSS regex")
});

/// `Percent of CPU this job got: N%`
static CPU_PCT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Percent of CPU this job got: (\d+)%")
        .expect("Invalid CPU percent regex")
});

/// Extract the peak resident set size in kbytes, if present
pub fn parse_peak_rss(output: &str) -> Option<u64> {
    PEAK_RSS.captures(output)?.get(1)?.as_str().parse().ok()
}

/// Extract the CPU utilization percentage, if present
pub fn parse_cpu_pct(output: &str) -> Option<u64> {
    CPU_PCT.captures(output)?.get(1)?.as_str().parse().ok()
}

/// Measurements from one subprocess execution
#[derive(Debug, Clone, Copy)]
pub struct SampleMeasurement {
    /// Wall-clock elapsed time in seconds, measured by the harness
    pub elapsed_secs: f64,
    /// Peak resident set size in kbytes, from the profiler
    pub memory_kb: u64,
    /// CPU utilization percent, from the profiler
    pub cpu_pct: u64,
}

impl SampleMeasurement {
    /// Build a sample from the profiler's diagnostic text.
    ///
    /// A required line missing from the output fails the sample; no metric
    /// is ever defaulted into aggregation.
    pub fn from_profile_output(elapsed_secs: f64, output: &str) -> Result<Self, BenchError> {
        let memory_kb = parse_peak_rss(output)
            .ok_or(BenchError::MissingMetric("maximum resident set size"))?;
        let cpu_pct = parse_cpu_pct(output)
            .ok_or(BenchError::MissingMetric("percent of CPU"))?;

        Ok(Self {
            elapsed_secs,
            memory_kb,
            cpu_pct,
        })
    }
}

/// Aggregated measurements for one (target, parameter) pair.
///
/// Field order matches the report's column order.
#[derive(Debug, Clone, Serialize)]
pub struct AggregateResult {
    /// Target binary name
    pub test_label: String,
    /// Workload parameter the target was invoked with
    pub max_prime: u64,
    /// Mean wall-clock time in seconds across measured repetitions
    pub average_execution_time: f64,
    /// Mean peak resident set size in kbytes
    pub average_memory: f64,
    /// Mean CPU utilization percent
    pub average_cpu_pct: f64,
    /// Sample standard deviation of wall-clock time; logged, not reported
    #[serde(skip)]
    pub time_stddev: f64,
}

impl AggregateResult {
    /// Aggregate the measured repetitions of one pair.
    ///
    /// `samples` is non-empty: the measured phase runs at least one
    /// repetition and a failed pair never reaches aggregation.
    pub fn from_samples(test_label: &str, max_prime: u64, samples: &[SampleMeasurement]) -> Self {
        let n = samples.len() as f64;

        let average_execution_time = samples.iter().map(|s| s.elapsed_secs).sum::<f64>() / n;
        let average_memory = samples.iter().map(|s| s.memory_kb as f64).sum::<f64>() / n;
        let average_cpu_pct = samples.iter().map(|s| s.cpu_pct as f64).sum::<f64>() / n;

        // Sample standard deviation (n - 1 denominator)
        let time_stddev = if samples.len() > 1 {
            let variance = samples
                .iter()
                .map(|s| (s.elapsed_secs - average_execution_time).powi(2))
                .sum::<f64>()
                / (n - 1.0);
            variance.sqrt()
        } else {
            0.0
        };

        Self {
            test_label: test_label.to_string(),
            max_prime,
            average_execution_time,
            average_memory,
            average_cpu_pct,
            time_stddev,
        }
    }
}
