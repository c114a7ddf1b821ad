//! CSV report writing
//!
//! The report is written once, after all pairs are processed. The column
//! header is fixed; downstream tooling keys on these exact names.

use std::fs;
use std::path::Path;

use crate::bench::AggregateResult;
use crate::error::{BenchError, BenchResult};

const HEADER: [&str; 5] = [
    "test_label",
    "max_prime",
    "average_execution_time",
    "average_memory",
    "average_cpu_pct",
];

/// Write one row per successful pair, in the order results were produced.
///
/// The parent directory is created if absent. An empty result set still
/// produces a header-only report.
pub fn write_report(path: &Path, results: &[AggregateResult]) -> BenchResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| BenchError::Report(format!("create {}: {}", parent.display(), e)))?;
        }
    }

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(|e| BenchError::Report(format!("open {}: {}", path.display(), e)))?;

    writer
        .write_record(HEADER)
        .map_err(|e| BenchError::Report(e.to_string()))?;
    for result in results {
        writer
            .serialize(result)
            .map_err(|e| BenchError::Report(e.to_string()))?;
    }
    writer
        .flush()
        .map_err(|e| BenchError::Report(e.to_string()))?;

    Ok(())
}
