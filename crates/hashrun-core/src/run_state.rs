//! Supervisor-owned run state and the periodic notification throttle.

use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::status::StatusSnapshot;
use crate::summary::ProgressSummary;

/// State of one supervised run.
///
/// Owned and mutated by the supervisor's pump loop only. A summary is due
/// when a snapshot was just decoded and at least `notification_interval`
/// has passed since the last summary (or since the start of the run).
#[derive(Debug, Clone)]
pub struct RunState {
    started_at: DateTime<Utc>,
    last_notified_at: DateTime<Utc>,
    notification_interval: Duration,
    exit_code: Option<i32>,
    snapshots_seen: u64,
    summaries_sent: u64,
    last_snapshot: Option<StatusSnapshot>,
}

impl RunState {
    /// Create the state for a run launched at `started_at`.
    pub fn new(started_at: DateTime<Utc>, notification_interval: Duration) -> Self {
        Self {
            started_at,
            last_notified_at: started_at,
            notification_interval,
            exit_code: None,
            snapshots_seen: 0,
            summaries_sent: 0,
            last_snapshot: None,
        }
    }

    /// Record a decoded snapshot observed at `now`.
    ///
    /// Returns the summary to send if the throttle interval has elapsed.
    /// The throttle timer only moves when a summary is returned.
    pub fn observe(
        &mut self,
        snapshot: StatusSnapshot,
        now: DateTime<Utc>,
    ) -> Option<ProgressSummary> {
        self.snapshots_seen += 1;

        let due = (now - self.last_notified_at)
            .to_std()
            .map(|since| since >= self.notification_interval)
            .unwrap_or(false);

        let summary = if due {
            self.last_notified_at = now;
            self.summaries_sent += 1;
            Some(ProgressSummary::from_snapshot(&snapshot, self.started_at, now))
        } else {
            None
        };

        self.last_snapshot = Some(snapshot);
        summary
    }

    /// Record the process exit code. Only the first call has an effect.
    pub fn record_exit(&mut self, code: i32) {
        if self.exit_code.is_none() {
            self.exit_code = Some(code);
        }
    }

    pub fn last_notified_at(&self) -> DateTime<Utc> {
        self.last_notified_at
    }

    pub fn exit_code(&self) -> Option<i32> {
        self.exit_code
    }

    /// Number of snapshots decoded so far.
    pub fn snapshots_seen(&self) -> u64 {
        self.snapshots_seen
    }

    /// Number of summaries the throttle has released.
    pub fn summaries_sent(&self) -> u64 {
        self.summaries_sent
    }

    /// Most recent decoded snapshot, if any.
    pub fn last_snapshot(&self) -> Option<&StatusSnapshot> {
        self.last_snapshot.as_ref()
    }

    /// Wall-clock time since the run started.
    pub fn elapsed(&self, now: DateTime<Utc>) -> Duration {
        (now - self.started_at).to_std().unwrap_or_default()
    }
}
