//! Benchmark runner - orchestrates the warmup/measure loop
//!
//! Pairs are benchmarked strictly one at a time, in declared order:
//! measurement accuracy requires exclusive use of the host's CPU and
//! memory, so no two children ever run concurrently.

use crate::config::Config;
use crate::error::{BenchError, BenchResult};

use super::exec::ProfiledExecutor;
use super::metrics::{AggregateResult, SampleMeasurement};

/// Benchmark runner that processes every (target, parameter) pair
pub struct BenchmarkRunner<'a> {
    config: &'a Config,
    executor: ProfiledExecutor,
}

impl<'a> BenchmarkRunner<'a> {
    /// Create a new benchmark runner
    pub fn new(config: &'a Config) -> Self {
        let executor = ProfiledExecutor::new(config.time_command.clone());
        Self { config, executor }
    }

    /// Verify every declared target is a regular file in the binaries
    /// directory. All missing names are reported at once, before any
    /// process is launched.
    pub fn verify_targets(&self) -> BenchResult<()> {
        let missing: Vec<String> = self
            .config
            .binaries
            .iter()
            .filter(|name| !self.config.binary_path(name).is_file())
            .cloned()
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(BenchError::MissingBinaries(missing))
        }
    }

    /// Benchmark all pairs in declared order.
    ///
    /// Returns one aggregate per fully successful pair; failed pairs are
    /// logged and skipped, they never abort the run.
    pub async fn run(&self) -> Vec<AggregateResult> {
        let mut results = Vec::new();

        for binary in &self.config.binaries {
            for &max_prime in &self.config.max_primes {
                match self.bench_pair(binary, max_prime).await {
                    Ok(aggregate) => {
                        tracing::info!(
                            "{} @ {}: avg {:.4}s (stddev {:.4}s), {:.0} kB, {:.0}% CPU",
                            binary,
                            max_prime,
                            aggregate.average_execution_time,
                            aggregate.time_stddev,
                            aggregate.average_memory,
                            aggregate.average_cpu_pct,
                        );
                        results.push(aggregate);
                    }
                    Err(e) => {
                        tracing::warn!("Skipping {} @ {}: {}", binary, max_prime, e);
                    }
                }
            }
        }

        results
    }

    /// Warmup then measured phase for one pair.
    ///
    /// Warmup repetitions prime OS and filesystem caches; their
    /// measurements are discarded. Any repetition failing abandons the
    /// pair, and partial measured samples are discarded with it.
    async fn bench_pair(&self, binary: &str, max_prime: u64) -> BenchResult<AggregateResult> {
        let path = self.config.binary_path(binary);

        for _ in 0..self.config.warmup.iterations {
            self.executor
                .run_once(&path, max_prime, self.config.warmup.timeout_seconds)
                .await?;
        }

        let mut samples: Vec<SampleMeasurement> =
            Vec::with_capacity(self.config.measure.iterations as usize);
        for _ in 0..self.config.measure.iterations {
            let sample = self
                .executor
                .run_once(&path, max_prime, self.config.measure.timeout_seconds)
                .await?;
            samples.push(sample);
        }

        Ok(AggregateResult::from_samples(binary, max_prime, &samples))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PhaseConfig;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use std::path::PathBuf;
    use tempfile::TempDir;

    /// Write an executable stub standing in for the GNU time wrapper
    fn write_stub(dir: &TempDir, body: &str) -> PathBuf {
        let path = dir.path().join("fake_gtime");
        fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();

        let mut perms = fs::metadata(&path).unwrap().permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&path, perms).unwrap();

        path
    }

    /// Config pointing at a temp binaries directory and a stub wrapper
    fn make_config(
        dir: &TempDir,
        binaries: &[&str],
        max_primes: &[u64],
        stub_body: &str,
    ) -> Config {
        let bin_dir = dir.path().join("bin");
        fs::create_dir_all(&bin_dir).unwrap();
        for name in binaries {
            fs::write(bin_dir.join(name), b"").unwrap();
        }

        let stub = write_stub(dir, stub_body);

        Config {
            max_primes: max_primes.to_vec(),
            binaries: binaries.iter().map(|s| s.to_string()).collect(),
            warmup: PhaseConfig {
                iterations: 1,
                timeout_seconds: 10,
            },
            measure: PhaseConfig {
                iterations: 2,
                timeout_seconds: 10,
            },
            bin_dir,
            report_path: dir.path().join("report.csv"),
            time_command: stub.to_string_lossy().into_owned(),
        }
    }

    const FULL_DIAGNOSTICS: &str = r#"printf '\tPercent of CPU this job got: 87%%\n' >&2
printf '\tMaximum resident set size (kbytes): 4096\n' >&2"#;

    #[test]
    fn test_verify_targets_lists_all_missing() {
        let dir = TempDir::new().unwrap();
        let mut config = make_config(&dir, &["present"], &[10], FULL_DIAGNOSTICS);
        config.binaries.push("ghost_a".to_string());
        config.binaries.push("ghost_b".to_string());

        let runner = BenchmarkRunner::new(&config);
        let err = runner.verify_targets().unwrap_err();

        match err {
            BenchError::MissingBinaries(names) => {
                assert_eq!(names, vec!["ghost_a".to_string(), "ghost_b".to_string()]);
            }
            other => panic!("expected MissingBinaries, got {other:?}"),
        }
    }

    #[test]
    fn test_verify_targets_rejects_directories() {
        let dir = TempDir::new().unwrap();
        let config = make_config(&dir, &["present"], &[10], FULL_DIAGNOSTICS);
        fs::create_dir(config.bin_dir.join("a_directory")).unwrap();

        let mut config = config;
        config.binaries.push("a_directory".to_string());

        let runner = BenchmarkRunner::new(&config);
        assert!(matches!(
            runner.verify_targets(),
            Err(BenchError::MissingBinaries(_))
        ));
    }

    #[tokio::test]
    async fn test_one_row_per_pair_in_declared_order() {
        let dir = TempDir::new().unwrap();
        let config = make_config(
            &dir,
            &["sieve_b", "sieve_a"],
            &[200, 100],
            FULL_DIAGNOSTICS,
        );

        let runner = BenchmarkRunner::new(&config);
        runner.verify_targets().unwrap();
        let results = runner.run().await;

        let order: Vec<(String, u64)> = results
            .iter()
            .map(|r| (r.test_label.clone(), r.max_prime))
            .collect();
        assert_eq!(
            order,
            vec![
                ("sieve_b".to_string(), 200),
                ("sieve_b".to_string(), 100),
                ("sieve_a".to_string(), 200),
                ("sieve_a".to_string(), 100),
            ]
        );
        assert!(results.iter().all(|r| r.average_memory == 4096.0));
    }

    #[tokio::test]
    async fn test_warmup_timeout_skips_measured_phase() {
        let dir = TempDir::new().unwrap();
        let log = dir.path().join("invocations.log");
        let body = format!("echo run >> {}\nsleep 30", log.display());
        let mut config = make_config(&dir, &["sieve"], &[10], &body);
        config.warmup = PhaseConfig {
            iterations: 2,
            timeout_seconds: 1,
        };

        let runner = BenchmarkRunner::new(&config);
        let results = runner.run().await;

        assert!(results.is_empty());
        // First warmup repetition timed out; nothing else was launched
        let invocations = fs::read_to_string(&log).unwrap();
        assert_eq!(invocations.lines().count(), 1);
    }

    #[tokio::test]
    async fn test_failed_pair_does_not_stop_the_run() {
        let dir = TempDir::new().unwrap();
        // The wrapper is invoked as `stub -v <binary> <param>`
        let body = format!(
            "case \"$2\" in *broken*) exit 1 ;; esac\n{FULL_DIAGNOSTICS}"
        );
        let config = make_config(&dir, &["broken", "healthy"], &[10], &body);

        let runner = BenchmarkRunner::new(&config);
        let results = runner.run().await;

        let labels: Vec<&str> = results.iter().map(|r| r.test_label.as_str()).collect();
        assert_eq!(labels, vec!["healthy"]);
    }

    #[tokio::test]
    async fn test_measured_failure_discards_whole_pair() {
        let dir = TempDir::new().unwrap();
        let log = dir.path().join("invocations.log");
        // Succeeds until the third invocation, then dies: warmup passes,
        // the measured phase fails midway.
        let body = format!(
            "echo run >> {log}\n[ $(wc -l < {log}) -ge 3 ] && exit 1\n{FULL_DIAGNOSTICS}",
            log = log.display()
        );
        let mut config = make_config(&dir, &["sieve"], &[10], &body);
        config.measure = PhaseConfig {
            iterations: 3,
            timeout_seconds: 10,
        };

        let runner = BenchmarkRunner::new(&config);
        let results = runner.run().await;

        assert!(results.is_empty());
        // 1 warmup + 2 measured runs happened, the rest was abandoned
        let invocations = fs::read_to_string(&log).unwrap();
        assert_eq!(invocations.lines().count(), 3);
    }
}
