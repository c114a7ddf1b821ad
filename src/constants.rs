//! Application-wide constants
//!
//! This module contains all constant values used throughout the harness.
//! Constants are grouped by their purpose for better organization.

// =============================================================================
// CONFIGURATION DEFAULTS
// =============================================================================

/// Default configuration file path, relative to the working directory
pub const DEFAULT_CONFIG_PATH: &str = "benchmark_conf.json";

/// Default directory holding the target binaries
pub const DEFAULT_BIN_DIR: &str = "bin";

/// Default destination of the CSV report
pub const DEFAULT_REPORT_PATH: &str = "reports/report.csv";

/// Default GNU time executable used as the profiling wrapper
pub const DEFAULT_TIME_COMMAND: &str = "gtime";

// =============================================================================
// TIMEOUT CLEANUP
// =============================================================================

/// Grace period in milliseconds between SIGTERM and SIGKILL when a
/// timed-out process group is torn down
pub const KILL_GRACE_MS: u64 = 200;
