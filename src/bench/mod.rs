//! Benchmark execution engine
//!
//! One (target binary, workload parameter) pair at a time: a warmup phase
//! whose measurements are discarded, then a measured phase whose samples are
//! aggregated. Any timeout or launch failure abandons the pair; the run
//! continues with the next one.

pub mod exec;
pub mod metrics;
pub mod runner;

pub use exec::ProfiledExecutor;
pub use metrics::{AggregateResult, SampleMeasurement};
pub use runner::BenchmarkRunner;
