//! Supervisor configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

/// Supervisor configuration.
#[derive(Debug, Clone)]
pub struct SupervisorConfig {
    /// Path to the hashcat executable, or a name looked up in PATH.
    pub binary: String,

    /// Workload profile passed as `-w<workload>`.
    pub workload: String,

    /// Interval hashcat emits status lines at.
    pub status_timer: Duration,

    /// Results file hashcat writes recovered secrets to.
    pub outfile: PathBuf,

    /// Minimum time between two progress summaries.
    pub notification_interval: Duration,

    /// Sleep between empty reads of the results file.
    pub tail_poll_interval: Duration,

    /// How long joining the tailer may take before it is logged as slow.
    /// The join itself is never cut short, so no pending result is lost.
    pub tailer_join_warning: Duration,

    /// How long to keep reading buffered stdout/stderr after exit.
    pub stdout_drain_timeout: Duration,

    /// Maximum stderr bytes kept for error reporting (the tail is kept).
    pub stderr_capture_limit: usize,
}

impl SupervisorConfig {
    /// Place the results file inside `work_dir`.
    pub fn with_work_dir(mut self, work_dir: &Path) -> Self {
        self.outfile = work_dir.join("hashcat.out");
        self
    }
}

impl Default for SupervisorConfig {
    fn default() -> Self {
        Self {
            binary: "hashcat".to_string(),
            workload: "4".to_string(),
            status_timer: Duration::from_secs(10),
            outfile: PathBuf::from("/tmp/hashcat.out"),
            notification_interval: Duration::from_secs(30 * 60),
            tail_poll_interval: Duration::from_millis(500),
            tailer_join_warning: Duration::from_secs(5),
            stdout_drain_timeout: Duration::from_secs(2),
            stderr_capture_limit: 64 * 1024,
        }
    }
}
