//! Profiled subprocess execution
//!
//! Each repetition launches the target through the GNU time wrapper with the
//! target's stdout discarded and the wrapper's diagnostics captured from
//! stderr. The child gets its own process group so a timeout can tear down
//! the target together with any sub-children it spawned; every exit path
//! either waits the child or group-kills and reaps it, with `kill_on_drop`
//! as the last-resort backstop.

use std::path::Path;
use std::process::{ExitStatus, Stdio};
use std::time::{Duration, Instant};

use nix::sys::signal::{killpg, Signal};
use nix::unistd::Pid;
use tokio::io::AsyncReadExt;
use tokio::process::Command;
use tokio::time::timeout;

use super::metrics::SampleMeasurement;
use crate::constants::KILL_GRACE_MS;
use crate::error::{BenchError, BenchResult};

/// Runs target binaries under the GNU time wrapper
pub struct ProfiledExecutor {
    time_command: String,
}

impl ProfiledExecutor {
    /// Create an executor using the given GNU time executable
    pub fn new(time_command: impl Into<String>) -> Self {
        Self {
            time_command: time_command.into(),
        }
    }

    /// Execute one repetition of `binary` with `max_prime` as its argument.
    ///
    /// Wall time is measured from just before launch to process exit,
    /// independent of the wrapper's own timing. On timeout the whole process
    /// group is terminated and the child reaped before returning.
    pub async fn run_once(
        &self,
        binary: &Path,
        max_prime: u64,
        timeout_seconds: u64,
    ) -> BenchResult<SampleMeasurement> {
        let start = Instant::now();

        let mut child = Command::new(&self.time_command)
            .arg("-v")
            .arg(binary)
            .arg(max_prime.to_string())
            .stdin(Stdio::null())
            // The target's own output is discarded; only the wrapper's
            // stderr diagnostics matter.
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .process_group(0)
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| BenchError::Launch(format!("{}: {}", self.time_command, e)))?;

        // With process_group(0) the child's pid doubles as its pgid.
        let pgid = child.id().map(|id| Pid::from_raw(id as i32));

        let limit = Duration::from_secs(timeout_seconds);
        let awaited = timeout(limit, async {
            let mut diagnostics = String::new();
            if let Some(mut pipe) = child.stderr.take() {
                pipe.read_to_string(&mut diagnostics).await?;
            }
            let status = child.wait().await?;
            Ok::<(ExitStatus, String), std::io::Error>((status, diagnostics))
        })
        .await;

        match awaited {
            Ok(Ok((status, diagnostics))) => {
                let elapsed_secs = start.elapsed().as_secs_f64();

                if !status.success() {
                    return Err(BenchError::Launch(describe_abnormal_exit(status)));
                }

                SampleMeasurement::from_profile_output(elapsed_secs, &diagnostics)
            }
            Ok(Err(e)) => Err(BenchError::Launch(format!(
                "failed waiting on {}: {}",
                binary.display(),
                e
            ))),
            Err(_) => {
                terminate_group(pgid).await;
                // Reap so the timed-out child never lingers as a zombie
                let _ = child.wait().await;
                Err(BenchError::Timeout(timeout_seconds))
            }
        }
    }
}

/// SIGTERM the group, give it a moment to exit, then SIGKILL whatever is left
async fn terminate_group(pgid: Option<Pid>) {
    let Some(pgid) = pgid else { return };

    let _ = killpg(pgid, Signal::SIGTERM);
    tokio::time::sleep(Duration::from_millis(KILL_GRACE_MS)).await;
    // ESRCH here just means the group is already gone
    let _ = killpg(pgid, Signal::SIGKILL);
}

fn describe_abnormal_exit(status: ExitStatus) -> String {
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return format!("run killed by signal {}", signal);
        }
    }
    format!("run exited with status {}", status.code().unwrap_or(-1))
}
