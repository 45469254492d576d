//! Periodic progress summaries.

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::status::StatusSnapshot;

/// A summarized view of the run, sent as a periodic notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressSummary {
    /// Wall-clock time since the run started.
    pub elapsed: Duration,
    /// Sum of all device speeds, in KHash/s.
    pub total_speed: u64,
    /// Seconds until the estimated stop; `None` if unknown.
    pub remaining_secs: Option<u64>,
    /// Secrets recovered so far.
    pub recovered_count: usize,
}

impl ProgressSummary {
    /// Build a summary from a snapshot observed at `now`.
    pub fn from_snapshot(
        snapshot: &StatusSnapshot,
        started_at: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            elapsed: (now - started_at).to_std().unwrap_or_default(),
            total_speed: snapshot.total_speed(),
            remaining_secs: snapshot.remaining_secs(now.timestamp()),
            recovered_count: snapshot.recovered_count,
        }
    }
}

impl fmt::Display for ProgressSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Running for: {}. Speed: {} KHash/s. Estimated time left: ",
            format_elapsed(self.elapsed),
            self.total_speed
        )?;
        match self.remaining_secs {
            Some(secs) => write!(f, "{secs} seconds")?,
            None => write!(f, "unknown")?,
        }
        write!(f, ". Recovered: {} hashes", self.recovered_count)
    }
}

/// Format a duration as `1h 02m 03s`, dropping leading zero units.
pub fn format_elapsed(elapsed: Duration) -> String {
    let total = elapsed.as_secs();
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;

    if hours > 0 {
        format!("{hours}h {minutes:02}m {seconds:02}s")
    } else if minutes > 0 {
        format!("{minutes}m {seconds:02}s")
    } else {
        format!("{seconds}s")
    }
}
