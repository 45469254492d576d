//! Polling tail of hashcat's results file.
//!
//! hashcat appends one line per recovered secret to its `--outfile`. The
//! tailer follows that file by byte offset and hands every complete line to
//! a callback. A trailing partial line is left unread until its newline
//! arrives, so a line is never split or delivered twice.

use std::future::Future;
use std::io::{self, SeekFrom};
use std::path::{Path, PathBuf};
use std::time::Duration;

use tokio::fs::{File, OpenOptions};
use tokio::io::{AsyncReadExt, AsyncSeekExt};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Counters reported when the tailer stops.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TailerStats {
    /// Lines handed to the callback.
    pub lines_delivered: u64,
    /// Bytes of the file consumed, i.e. the final read offset.
    pub bytes_consumed: u64,
    /// Read passes that failed with an I/O error.
    pub read_errors: u64,
}

/// Follows a results file for newly appended lines.
#[derive(Debug, Clone)]
pub struct ResultTailer {
    path: PathBuf,
    poll_interval: Duration,
}

/// Read cursor state, owned by the running tailer.
struct TailCursor {
    file: Option<File>,
    offset: u64,
}

impl ResultTailer {
    pub fn new(path: impl Into<PathBuf>, poll_interval: Duration) -> Self {
        Self {
            path: path.into(),
            poll_interval,
        }
    }

    /// Create `path` empty if it does not exist. Existing content is kept.
    pub async fn ensure_exists(path: &Path) -> io::Result<()> {
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .await
            .map(|_| ())
    }

    /// Tail the file until `cancel` fires.
    ///
    /// `on_line` is awaited for each complete line, in file order. When no
    /// new line is available the tailer sleeps for the poll interval or
    /// until cancelled. After cancellation it makes one last read pass, so
    /// lines written before the cancel are still delivered, and returns
    /// without waiting again.
    pub async fn run<F, Fut>(self, mut on_line: F, cancel: CancellationToken) -> TailerStats
    where
        F: FnMut(String) -> Fut,
        Fut: Future<Output = ()>,
    {
        info!(path = %self.path.display(), "Result tailer started");

        let mut cursor = TailCursor {
            file: None,
            offset: 0,
        };
        let mut stats = TailerStats::default();

        loop {
            let stopping = cancel.is_cancelled();

            let delivered = match cursor.read_lines(&self.path).await {
                Ok(lines) => {
                    let count = lines.len();
                    for line in lines {
                        on_line(line).await;
                        stats.lines_delivered += 1;
                    }
                    count
                }
                Err(e) => {
                    // Reopen on the next pass.
                    warn!(path = %self.path.display(), error = %e, "Failed to read results file");
                    cursor.file = None;
                    stats.read_errors += 1;
                    0
                }
            };

            if stopping {
                break;
            }
            if delivered > 0 {
                continue;
            }

            tokio::select! {
                _ = cancel.cancelled() => {}
                _ = tokio::time::sleep(self.poll_interval) => {}
            }
        }

        stats.bytes_consumed = cursor.offset;
        info!(
            lines = stats.lines_delivered,
            bytes = stats.bytes_consumed,
            "Result tailer stopped"
        );
        stats
    }
}

impl TailCursor {
    /// Read every complete line past the cursor and advance over them.
    async fn read_lines(&mut self, path: &Path) -> io::Result<Vec<String>> {
        let file = match self.file.take() {
            Some(file) => file,
            None => File::open(path).await?,
        };
        let file = self.file.insert(file);

        let len = file.metadata().await?.len();
        if len < self.offset {
            warn!(
                path = %path.display(),
                offset = self.offset,
                len,
                "Results file shrank, reading from the start"
            );
            self.offset = 0;
        }
        if len == self.offset {
            return Ok(Vec::new());
        }

        file.seek(SeekFrom::Start(self.offset)).await?;
        let mut buf = Vec::with_capacity(usize::try_from(len - self.offset).unwrap_or(0));
        file.read_to_end(&mut buf).await?;

        let mut lines = Vec::new();
        let mut consumed = 0usize;
        while let Some(pos) = buf[consumed..].iter().position(|&b| b == b'\n') {
            let raw = &buf[consumed..consumed + pos];
            consumed += pos + 1;

            let line = String::from_utf8_lossy(raw);
            let line = line.trim_end_matches('\r');
            if !line.is_empty() {
                lines.push(line.to_string());
            }
        }

        if consumed < buf.len() {
            debug!(pending = buf.len() - consumed, "Partial line left for next pass");
        }
        self.offset += consumed as u64;
        Ok(lines)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tokio::sync::mpsc;
    use tokio::task::JoinHandle;
    use tokio::time::timeout;

    use super::*;

    const POLL: Duration = Duration::from_millis(20);
    const WAIT: Duration = Duration::from_secs(5);

    fn append(path: &Path, content: &str) {
        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .unwrap();
        file.write_all(content.as_bytes()).unwrap();
    }

    fn spawn_tailer(
        path: &Path,
        poll: Duration,
    ) -> (
        JoinHandle<TailerStats>,
        mpsc::UnboundedReceiver<String>,
        CancellationToken,
    ) {
        let (tx, rx) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();
        let tailer = ResultTailer::new(path, poll);
        let handle = tokio::spawn(tailer.run(
            move |line| {
                let tx = tx.clone();
                async move {
                    tx.send(line).ok();
                }
            },
            cancel.clone(),
        ));
        (handle, rx, cancel)
    }

    async fn next(rx: &mut mpsc::UnboundedReceiver<String>) -> String {
        timeout(WAIT, rx.recv()).await.unwrap().unwrap()
    }

    #[tokio::test]
    async fn test_delivers_appended_lines_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hashcat.out");
        ResultTailer::ensure_exists(&path).await.unwrap();

        let (handle, mut rx, cancel) = spawn_tailer(&path, POLL);

        tokio::time::sleep(Duration::from_millis(60)).await;
        append(&path, "hashA:pass1\n");
        assert_eq!(next(&mut rx).await, "hashA:pass1");

        tokio::time::sleep(Duration::from_millis(60)).await;
        append(&path, "hashB:pass2\n");
        assert_eq!(next(&mut rx).await, "hashB:pass2");

        cancel.cancel();
        let stats = timeout(WAIT, handle).await.unwrap().unwrap();

        assert_eq!(stats.lines_delivered, 2);
        assert_eq!(stats.bytes_consumed, 24);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_partial_line_waits_for_newline() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hashcat.out");
        append(&path, "hashA:pa");

        let (handle, mut rx, cancel) = spawn_tailer(&path, POLL);

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(rx.try_recv().is_err());

        append(&path, "ss1\r\nhashB:");
        assert_eq!(next(&mut rx).await, "hashA:pass1");

        cancel.cancel();
        let stats = timeout(WAIT, handle).await.unwrap().unwrap();

        // "hashB:" is never terminated and never delivered.
        assert_eq!(stats.lines_delivered, 1);
        assert_eq!(stats.bytes_consumed, "hashA:pass1\r\n".len() as u64);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_backlog_is_delivered_eagerly() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hashcat.out");
        append(&path, "a:1\nb:2\n\nc:3\n");

        // A poll interval this long would time the test out if the
        // backlog were read one sleep at a time.
        let (handle, mut rx, cancel) = spawn_tailer(&path, Duration::from_secs(30));

        assert_eq!(next(&mut rx).await, "a:1");
        assert_eq!(next(&mut rx).await, "b:2");
        assert_eq!(next(&mut rx).await, "c:3");

        cancel.cancel();
        let stats = timeout(WAIT, handle).await.unwrap().unwrap();
        assert_eq!(stats.lines_delivered, 3);
    }

    #[tokio::test]
    async fn test_stop_while_idle_returns_promptly() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hashcat.out");
        ResultTailer::ensure_exists(&path).await.unwrap();

        let (handle, _rx, cancel) = spawn_tailer(&path, Duration::from_secs(30));
        tokio::time::sleep(Duration::from_millis(50)).await;

        cancel.cancel();
        let stats = timeout(Duration::from_secs(1), handle)
            .await
            .expect("tailer did not observe cancellation")
            .unwrap();

        assert_eq!(stats, TailerStats::default());
    }

    #[tokio::test]
    async fn test_final_pass_after_cancel() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hashcat.out");
        ResultTailer::ensure_exists(&path).await.unwrap();

        let (handle, mut rx, cancel) = spawn_tailer(&path, Duration::from_secs(30));
        tokio::time::sleep(Duration::from_millis(50)).await;

        // Written while the tailer sleeps, right before the stop signal.
        append(&path, "late:secret\n");
        cancel.cancel();

        let stats = timeout(Duration::from_secs(1), handle).await.unwrap().unwrap();
        assert_eq!(stats.lines_delivered, 1);
        assert_eq!(rx.try_recv().unwrap(), "late:secret");
    }

    #[tokio::test]
    async fn test_missing_file_recovers_once_created() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("later.out");

        let (handle, mut rx, cancel) = spawn_tailer(&path, POLL);
        tokio::time::sleep(Duration::from_millis(60)).await;

        append(&path, "x:y\n");
        assert_eq!(next(&mut rx).await, "x:y");

        cancel.cancel();
        let stats = timeout(WAIT, handle).await.unwrap().unwrap();
        assert_eq!(stats.lines_delivered, 1);
        assert!(stats.read_errors > 0);
    }

    #[tokio::test]
    async fn test_truncated_file_is_reread() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hashcat.out");
        append(&path, "first:one\n");

        let (handle, mut rx, cancel) = spawn_tailer(&path, POLL);
        assert_eq!(next(&mut rx).await, "first:one");

        std::fs::write(&path, "new\n").unwrap();
        assert_eq!(next(&mut rx).await, "new");

        cancel.cancel();
        let stats = timeout(WAIT, handle).await.unwrap().unwrap();
        assert_eq!(stats.lines_delivered, 2);
        assert_eq!(stats.bytes_consumed, 4);
    }

    #[tokio::test]
    async fn test_ensure_exists_keeps_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hashcat.out");

        ResultTailer::ensure_exists(&path).await.unwrap();
        assert_eq!(std::fs::read(&path).unwrap().len(), 0);

        append(&path, "keep:me\n");
        ResultTailer::ensure_exists(&path).await.unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "keep:me\n");
    }
}
