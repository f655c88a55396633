//! File sink
//!
//! The dispatch path must never wait on the disk, so file logging is:
//! - a bounded queue (non-blocking `try_send`, lines dropped when full)
//! - a dedicated thread with buffered writes and periodic flush
//!
//! `shutdown` closes the queue and joins the writer, so every accepted line
//! is on disk once it returns.

use crate::constants::{FILE_FLUSH_INTERVAL_MS, FILE_QUEUE_CAPACITY, FILE_WRITER_THREAD_NAME};
use crate::error::{LoggerError, Result};
use crate::severity::Severity;
use crate::sink::Sink;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Component, Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{sync_channel, Receiver, RecvTimeoutError, SyncSender};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use tracing::debug;

/// On-disk text encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileEncoding {
    #[default]
    Utf8,
    /// UTF-16 little endian, no BOM
    Utf16Le,
    /// 7-bit ASCII, other characters become `?`
    Ascii,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSinkConfig {
    /// A bare file name is placed in the system temp directory
    pub path: PathBuf,
    pub encoding: FileEncoding,
    /// Write the severity prefix before each message
    pub prefix: bool,
    /// Write an HH:MM:SS.mmm local timestamp before each message
    pub timestamps: bool,
    pub queue_capacity: usize,
    pub flush_interval_ms: u64,
}

impl Default for FileSinkConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("sinklog.log"),
            encoding: FileEncoding::Utf8,
            prefix: true,
            timestamps: false,
            queue_capacity: FILE_QUEUE_CAPACITY,
            flush_interval_ms: FILE_FLUSH_INTERVAL_MS,
        }
    }
}

impl FileSinkConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Default::default()
        }
    }
}

pub struct FileSink {
    path: PathBuf,
    prefix: bool,
    timestamps: bool,
    tx: Mutex<Option<SyncSender<String>>>,
    writer: Mutex<Option<JoinHandle<()>>>,
    dropped: AtomicU64,
}

impl FileSink {
    /// Open (or create) the log file in append mode and start the writer
    pub fn open(config: &FileSinkConfig) -> Result<Self> {
        let path = resolve_path(&config.path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| LoggerError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let file = open_append(&path).map_err(|e| LoggerError::Io {
            path: path.clone(),
            source: e,
        })?;

        let (tx, rx) = sync_channel::<String>(config.queue_capacity.max(1));
        let flush_interval = if config.flush_interval_ms == 0 {
            Duration::from_millis(FILE_FLUSH_INTERVAL_MS)
        } else {
            Duration::from_millis(config.flush_interval_ms)
        };
        let encoding = config.encoding;

        let writer = thread::Builder::new()
            .name(FILE_WRITER_THREAD_NAME.to_string())
            .spawn(move || run_writer(rx, file, encoding, flush_interval))
            .map_err(|e| LoggerError::Io {
                path: path.clone(),
                source: e,
            })?;

        debug!(path = %path.display(), "file sink opened");

        Ok(Self {
            path,
            prefix: config.prefix,
            timestamps: config.timestamps,
            tx: Mutex::new(Some(tx)),
            writer: Mutex::new(Some(writer)),
            dropped: AtomicU64::new(0),
        })
    }

    /// Resolved path of the log file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Lines dropped because the queue was full or the writer had stopped
    pub fn dropped(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }

    fn format_line(&self, severity: Severity, message: &str) -> String {
        let mut line = String::with_capacity(message.len() + 24);
        if self.timestamps {
            line.push_str(&chrono::Local::now().format("%H:%M:%S%.3f ").to_string());
        }
        if self.prefix {
            line.push_str(severity.prefix());
        }
        line.push_str(message);
        line.push('\n');
        line
    }

    fn close(&self) {
        // Dropping the sender ends the writer loop after it drains the queue.
        drop(self.tx.lock().take());
        if let Some(handle) = self.writer.lock().take() {
            let _ = handle.join();
        }
    }
}

impl Sink for FileSink {
    fn log(&self, severity: Severity, message: &str) {
        let line = self.format_line(severity, message);
        let sent = match self.tx.lock().as_ref() {
            Some(tx) => tx.try_send(line).is_ok(),
            None => false,
        };
        if !sent {
            self.dropped.fetch_add(1, Ordering::Relaxed);
        }
    }

    fn shutdown(&self) {
        self.close();
    }
}

impl Drop for FileSink {
    fn drop(&mut self) {
        self.close();
    }
}

/// Bare file names go to the temp directory; anything else is used as given
fn resolve_path(path: &Path) -> PathBuf {
    let mut components = path.components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => std::env::temp_dir().join(path),
        _ => path.to_path_buf(),
    }
}

fn open_append(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

fn run_writer(
    rx: Receiver<String>,
    file: File,
    encoding: FileEncoding,
    flush_interval: Duration,
) {
    let mut writer = BufWriter::new(file);
    let mut dirty = false;
    let mut last_flush = Instant::now();

    loop {
        match rx.recv_timeout(flush_interval) {
            Ok(line) => {
                if write_encoded(&mut writer, &line, encoding).is_ok() {
                    dirty = true;
                }
                if dirty && last_flush.elapsed() >= flush_interval {
                    let _ = writer.flush();
                    dirty = false;
                    last_flush = Instant::now();
                }
            }
            Err(RecvTimeoutError::Timeout) => {
                if dirty {
                    let _ = writer.flush();
                    dirty = false;
                    last_flush = Instant::now();
                }
            }
            Err(RecvTimeoutError::Disconnected) => {
                let _ = writer.flush();
                break;
            }
        }
    }
}

fn write_encoded<W: Write>(writer: &mut W, line: &str, encoding: FileEncoding) -> io::Result<()> {
    match encoding {
        FileEncoding::Utf8 => writer.write_all(line.as_bytes()),
        FileEncoding::Utf16Le => {
            let bytes: Vec<u8> = line.encode_utf16().flat_map(u16::to_le_bytes).collect();
            writer.write_all(&bytes)
        }
        FileEncoding::Ascii => {
            let bytes: Vec<u8> = super::to_ascii_lossy(line).collect();
            writer.write_all(&bytes)
        }
    }
}
