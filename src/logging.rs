//! Tracing setup for the demo binary: a daily log file, plus a line feed that the
//! workspace shows in its bottom panel.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, SyncSender};

use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

const LOG_FILE: &str = "zstudio.log";
const DEFAULT_FILTER: &str = "zstudio=info";
/// Lines buffered for the panel before new ones are dropped.
const FEED_CAPACITY: usize = 1024;

pub struct LogHandle {
    _file_guard: WorkerGuard,
    dir: PathBuf,
    feed: Option<Receiver<String>>,
}

impl LogHandle {
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// The panel feed can only be handed out once.
    pub fn take_feed(&mut self) -> Option<Receiver<String>> {
        self.feed.take()
    }
}

/// Writes to the log file and forwards every complete line to the panel feed.
struct FeedWriter {
    file: NonBlocking,
    feed: SyncSender<String>,
    pending: Vec<u8>,
}

impl FeedWriter {
    fn forward(&mut self, bytes: Vec<u8>) {
        let line = String::from_utf8_lossy(&bytes);
        let line = line.trim_end();
        if !line.is_empty() {
            // A full feed means nobody is draining it; the file still has the line.
            let _ = self.feed.try_send(line.to_string());
        }
    }

    fn forward_complete_lines(&mut self) {
        while let Some(end) = self.pending.iter().position(|b| *b == b'\n') {
            let line: Vec<u8> = self.pending.drain(..=end).collect();
            self.forward(line);
        }
    }
}

impl Write for FeedWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let written = self.file.write(buf)?;
        self.pending.extend_from_slice(&buf[..written]);
        self.forward_complete_lines();
        Ok(written)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}

impl Drop for FeedWriter {
    fn drop(&mut self) {
        if !self.pending.is_empty() {
            let rest = std::mem::take(&mut self.pending);
            self.forward(rest);
        }
    }
}

#[derive(Clone)]
struct FeedMakeWriter {
    file: NonBlocking,
    feed: SyncSender<String>,
}

impl<'a> MakeWriter<'a> for FeedMakeWriter {
    type Writer = FeedWriter;

    fn make_writer(&'a self) -> Self::Writer {
        FeedWriter {
            file: self.file.clone(),
            feed: self.feed.clone(),
            pending: Vec::new(),
        }
    }
}

fn resolve_log_dir() -> Option<PathBuf> {
    zstudio::kernel::services::adapters::ensure_log_dir()
        .or_else(|_| -> io::Result<PathBuf> {
            let dir = std::env::temp_dir().join("zstudio").join("logs");
            std::fs::create_dir_all(&dir)?;
            Ok(dir)
        })
        .ok()
}

/// Installs the global subscriber. `None` when no log dir is usable or a
/// subscriber is already set.
pub fn init() -> Option<LogHandle> {
    let dir = resolve_log_dir()?;
    let (file, file_guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::daily(&dir, LOG_FILE));
    let (feed_tx, feed_rx) = mpsc::sync_channel(FEED_CAPACITY);

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let layer = tracing_subscriber::fmt::layer()
        .compact()
        .with_ansi(false)
        .with_target(true)
        .with_writer(FeedMakeWriter {
            file,
            feed: feed_tx,
        });
    if tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init()
        .is_err()
    {
        return None;
    }

    std::panic::set_hook(Box::new(|info| {
        let location = info
            .location()
            .map(|l| format!("{}:{}", l.file(), l.line()))
            .unwrap_or_default();
        tracing::error!(%location, "panic: {info}");
    }));
    tracing::info!(dir = %dir.display(), "logging to file");

    Some(LogHandle {
        _file_guard: file_guard,
        dir,
        feed: Some(feed_rx),
    })
}

#[cfg(test)]
#[path = "../tests/unit/logging.rs"]
mod tests;
