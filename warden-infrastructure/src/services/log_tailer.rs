// Active log discovery and append-only line tailing

use std::io::SeekFrom;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::NaiveDateTime;
use tokio::fs::{self, File};
use tokio::io::{AsyncReadExt, AsyncSeekExt};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Rotation directories are named by server start time, e.g.
/// `logs_2024-01-02_12-00-00`.
const LOG_DIR_FORMAT: &str = "logs_%Y-%m-%d_%H-%M-%S";
const CONSOLE_LOG: &str = "console.log";

const POLL_INTERVAL: Duration = Duration::from_millis(50);
const CHUNK_SIZE: usize = 8192;

/// Upper bound on bytes buffered for a single line. A console line never
/// comes close to this; anything larger is corrupt output and gets dropped
/// rather than buffered without limit.
const MAX_LINE_BYTES: usize = 1024 * 1024;

/// Scans `base_dir` for rotation directories and returns the console log of
/// the latest one, or `None` when no directory matches. Rotation after this
/// point is not detected; a new active log requires a restart.
pub async fn find_latest_console_log(base_dir: &Path) -> std::io::Result<Option<PathBuf>> {
    let mut latest: Option<(NaiveDateTime, PathBuf)> = None;
    let mut entries = fs::read_dir(base_dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        if !entry.file_type().await?.is_dir() {
            continue;
        }
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        let Ok(started_at) = NaiveDateTime::parse_from_str(name, LOG_DIR_FORMAT) else {
            debug!("ignoring non-rotation directory {}", name);
            continue;
        };
        if latest.as_ref().map(|(ts, _)| started_at > *ts).unwrap_or(true) {
            latest = Some((started_at, entry.path()));
        }
    }
    Ok(latest.map(|(_, dir)| dir.join(CONSOLE_LOG)))
}

/// Tails one console log file, delivering every complete appended line in
/// arrival order. Historical content before the tail start point is never
/// delivered, and a partial trailing line is held back until its terminator
/// arrives.
pub struct LogTailer {
    path: PathBuf,
    poll_interval: Duration,
}

impl LogTailer {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            poll_interval: POLL_INTERVAL,
        }
    }

    #[cfg(test)]
    fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Runs until the receiver side of `sink` is dropped (clean shutdown) or
    /// an I/O error ends the tail session. A missing file is such an error;
    /// restarts are the orchestrator's call, never retried here.
    pub async fn run(self, sink: mpsc::Sender<String>) -> std::io::Result<()> {
        let mut file = File::open(&self.path).await?;
        file.seek(SeekFrom::End(0)).await?;
        info!("tailing {}", self.path.display());

        let mut pending: Vec<u8> = Vec::new();
        let mut discarding = false;
        let mut chunk = vec![0u8; CHUNK_SIZE];
        loop {
            let read = file.read(&mut chunk).await?;
            if read == 0 {
                tokio::time::sleep(self.poll_interval).await;
                continue;
            }
            pending.extend_from_slice(&chunk[..read]);
            while let Some(terminator) = pending.iter().position(|&byte| byte == b'\n') {
                let mut line: Vec<u8> = pending.drain(..=terminator).collect();
                if std::mem::take(&mut discarding) {
                    // Tail end of a line already dropped as oversized.
                    continue;
                }
                line.pop();
                if line.last() == Some(&b'\r') {
                    line.pop();
                }
                let line = String::from_utf8_lossy(&line).into_owned();
                if sink.send(line).await.is_err() {
                    // Receiver gone: the pipeline is shutting down.
                    return Ok(());
                }
            }
            if pending.len() > MAX_LINE_BYTES {
                warn!(
                    "dropping line exceeding {} buffered bytes without a terminator",
                    MAX_LINE_BYTES
                );
                pending.clear();
                discarding = true;
            }
        }
    }
}
