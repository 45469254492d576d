//! The attack supervisor: process lifecycle, status pump and cleanup.

use std::path::PathBuf;
use std::process::{ExitStatus, Stdio};
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use hashrun_core::{parse_status_line, RunState};
use hashrun_notify::Notifier;
use tokio::io::{AsyncBufReadExt, BufReader, Lines};
use tokio::process::{Child, ChildStderr, ChildStdout};
use tokio::task::JoinHandle;
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, trace, warn};

use crate::command::AttackCommand;
use crate::config::SupervisorConfig;
use crate::error::SupervisorError;
use crate::tailer::{ResultTailer, TailerStats};

/// Exit code reported when the process ended without one (e.g. killed by a signal).
pub const EXIT_CODE_UNKNOWN: i32 = -1;

/// Result of a supervised run.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    /// hashcat's exit code, or [`EXIT_CODE_UNKNOWN`].
    pub exit_code: i32,

    /// Tail of hashcat's stderr.
    pub stderr: String,

    /// Wall-clock duration of the run.
    pub elapsed: Duration,

    /// Status lines decoded as snapshots.
    pub snapshots_seen: u64,

    /// Progress summaries sent.
    pub summaries_sent: u64,

    /// Recovered-result lines forwarded by the tailer.
    pub results_delivered: u64,
}

impl RunOutcome {
    /// Returns true if hashcat exited with code 0.
    pub fn is_success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Runs hashcat and reports on it.
///
/// The supervisor owns the child process for its whole lifetime. The result
/// tailer runs as a separate task and shares nothing with the supervisor
/// except its cancellation token.
pub struct AttackSupervisor {
    config: SupervisorConfig,
    notifier: Arc<dyn Notifier>,
}

impl AttackSupervisor {
    pub fn new(config: SupervisorConfig, notifier: Arc<dyn Notifier>) -> Self {
        Self { config, notifier }
    }

    /// Run one attack against `targets` and wait for it to finish.
    ///
    /// `attack_params` are appended to the command line verbatim. A
    /// non-zero exit is reported in the returned [`RunOutcome`]; `Err` is
    /// reserved for runs that could not be started or observed. In every
    /// case the tailer has been stopped and joined before this returns.
    pub async fn run(
        &self,
        targets: &[PathBuf],
        attack_params: &[String],
    ) -> Result<RunOutcome, SupervisorError> {
        let command = AttackCommand::new(&self.config, targets, attack_params)?;

        let outfile = self.config.outfile.clone();
        ResultTailer::ensure_exists(&outfile)
            .await
            .map_err(|source| SupervisorError::Outfile {
                path: outfile.clone(),
                source,
            })?;

        let cancel = CancellationToken::new();
        let tailer = self.spawn_tailer(outfile, cancel.clone());

        let result = self.supervise(&command).await;

        // Cleanup runs on every path.
        cancel.cancel();
        let stats = self.join_tailer(tailer).await;

        result.map(|mut outcome| {
            outcome.results_delivered = stats.lines_delivered;
            outcome
        })
    }

    fn spawn_tailer(&self, outfile: PathBuf, cancel: CancellationToken) -> JoinHandle<TailerStats> {
        let tailer = ResultTailer::new(outfile, self.config.tail_poll_interval);
        let notifier = Arc::clone(&self.notifier);

        tokio::spawn(tailer.run(
            move |line| {
                let notifier = Arc::clone(&notifier);
                async move {
                    info!(result = %line, "Recovered hash");
                    notifier
                        .notify(&format!("Found recovered hash: {line}"))
                        .await;
                }
            },
            cancel,
        ))
    }

    /// Wait for the tailer's final pass. Deliveries are never cut short;
    /// each one is bounded by the notifier's own timeout.
    async fn join_tailer(&self, mut handle: JoinHandle<TailerStats>) -> TailerStats {
        let joined = match timeout(self.config.tailer_join_warning, &mut handle).await {
            Ok(joined) => joined,
            Err(_) => {
                warn!(
                    after_secs = self.config.tailer_join_warning.as_secs_f64(),
                    "Result tailer still delivering results, waiting for it"
                );
                handle.await
            }
        };

        joined.unwrap_or_else(|e| {
            error!(error = %e, "Result tailer task failed");
            TailerStats::default()
        })
    }

    /// Spawn hashcat, pump its status stream and wait for it to exit.
    async fn supervise(&self, command: &AttackCommand) -> Result<RunOutcome, SupervisorError> {
        info!(command = %command, "Execute command");

        let mut cmd = command.to_command();
        cmd.stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let mut child = cmd.spawn().map_err(|source| {
            error!(error = %source, binary = %command.binary(), "Failed to spawn hashcat");
            SupervisorError::Spawn {
                binary: command.binary().to_string(),
                source,
            }
        })?;

        let mut state = RunState::new(Utc::now(), self.config.notification_interval);
        info!(pid = ?child.id(), "hashcat started");

        // Held until the exit status is known. `Child::wait` would close it.
        let stdin = child
            .stdin
            .take()
            .ok_or(SupervisorError::MissingPipe("stdin"))?;
        let stdout = child
            .stdout
            .take()
            .ok_or(SupervisorError::MissingPipe("stdout"))?;
        let stderr = child
            .stderr
            .take()
            .ok_or(SupervisorError::MissingPipe("stderr"))?;

        let mut stderr_task = tokio::spawn(capture_stderr(
            stderr,
            self.config.stderr_capture_limit,
        ));

        let mut lines = BufReader::new(stdout).lines();
        let status = self.pump(&mut child, &mut lines, &mut state).await?;
        drop(lines);
        drop(stdin);

        let stderr = match timeout(self.config.stdout_drain_timeout, &mut stderr_task).await {
            Ok(Ok(text)) => text,
            Ok(Err(e)) => {
                warn!(error = %e, "stderr capture task failed");
                String::new()
            }
            Err(_) => {
                warn!("stderr still open after exit, giving up on it");
                stderr_task.abort();
                String::new()
            }
        };

        state.record_exit(exit_code_of(&status));
        let exit_code = state.exit_code().unwrap_or(EXIT_CODE_UNKNOWN);

        if status.success() {
            info!(
                exit_code,
                recovered = ?state.last_snapshot().map(|s| s.recovered_count),
                "hashcat finished"
            );
        } else {
            error!(
                command = %command,
                exit_code,
                stderr = %stderr.trim(),
                "hashcat exited with failure"
            );
        }

        Ok(RunOutcome {
            exit_code,
            stderr,
            elapsed: state.elapsed(Utc::now()),
            snapshots_seen: state.snapshots_seen(),
            summaries_sent: state.summaries_sent(),
            results_delivered: 0,
        })
    }

    /// Feed stdout lines to the status parser until the stream ends or the
    /// process exits, then return the exit status.
    async fn pump(
        &self,
        child: &mut Child,
        lines: &mut Lines<BufReader<ChildStdout>>,
        state: &mut RunState,
    ) -> Result<ExitStatus, SupervisorError> {
        loop {
            tokio::select! {
                biased;

                line = lines.next_line() => match line {
                    Ok(Some(line)) => self.handle_line(&line, state).await,
                    Ok(None) => {
                        debug!("hashcat stdout closed");
                        return Ok(child.wait().await?);
                    }
                    Err(e) => {
                        error!(error = %e, "Error reading hashcat stdout");
                        return Ok(child.wait().await?);
                    }
                },

                status = child.wait() => {
                    let status = status?;
                    debug!("hashcat exited before closing stdout, draining");
                    self.drain(lines, state).await;
                    return Ok(status);
                }
            }
        }
    }

    /// Read what is left on stdout after exit, bounded by the drain timeout.
    async fn drain(&self, lines: &mut Lines<BufReader<ChildStdout>>, state: &mut RunState) {
        loop {
            match timeout(self.config.stdout_drain_timeout, lines.next_line()).await {
                Ok(Ok(Some(line))) => self.handle_line(&line, state).await,
                Ok(Ok(None)) => break,
                Ok(Err(e)) => {
                    warn!(error = %e, "Error draining hashcat stdout");
                    break;
                }
                Err(_) => {
                    warn!("hashcat stdout still open after exit, stop reading");
                    break;
                }
            }
        }
    }

    async fn handle_line(&self, line: &str, state: &mut RunState) {
        let Some(snapshot) = parse_status_line(line) else {
            trace!(line = %line, "Skipping non-status output");
            return;
        };

        debug!(
            devices = snapshot.devices.len(),
            speed = snapshot.total_speed(),
            recovered = snapshot.recovered_count,
            estimated_stop = ?snapshot.estimated_stop_epoch,
            "Status"
        );

        if let Some(summary) = state.observe(snapshot, Utc::now()) {
            info!(summary = %summary, "Sending progress summary");
            self.notifier.notify(&summary.to_string()).await;
        }
    }
}

fn exit_code_of(status: &ExitStatus) -> i32 {
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            warn!(signal, "hashcat was terminated by a signal");
        }
    }
    status.code().unwrap_or(EXIT_CODE_UNKNOWN)
}

/// Collect stderr, keeping at most the last `limit` bytes.
async fn capture_stderr(stderr: ChildStderr, limit: usize) -> String {
    let mut reader = BufReader::new(stderr);
    let mut captured = String::new();
    let mut chunk = Vec::new();

    loop {
        chunk.clear();
        match reader.read_until(b'\n', &mut chunk).await {
            Ok(0) => break,
            Ok(_) => {
                let text = String::from_utf8_lossy(&chunk);
                let trimmed = text.trim();
                if !trimmed.is_empty() {
                    debug!(stderr = %trimmed, "hashcat stderr");
                }
                captured.push_str(&text);
                truncate_front(&mut captured, limit);
            }
            Err(e) => {
                warn!(error = %e, "Error reading hashcat stderr");
                break;
            }
        }
    }

    captured
}

fn truncate_front(text: &mut String, limit: usize) {
    if text.len() <= limit {
        return;
    }
    let mut cut = text.len() - limit;
    while !text.is_char_boundary(cut) {
        cut += 1;
    }
    text.drain(..cut);
}
