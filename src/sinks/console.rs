//! Console sink
//!
//! Writes `prefix + message` lines to stderr, the hosted stand-in for a
//! debugger console. Any `Write` target can be used instead.

use crate::severity::Severity;
use crate::sink::Sink;
use parking_lot::Mutex;
use std::io::{self, Write};

pub struct ConsoleSink<W: Write + Send = io::Stderr> {
    out: Mutex<W>,
}

impl ConsoleSink<io::Stderr> {
    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }
}

impl Default for ConsoleSink<io::Stderr> {
    fn default() -> Self {
        Self::stderr()
    }
}

impl<W: Write + Send> ConsoleSink<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    /// Consume the sink and return the writer
    pub fn into_inner(self) -> W {
        self.out.into_inner()
    }
}

/// Build the full line first so concurrent writers never interleave mid-line
fn format_line(severity: Severity, message: &str) -> String {
    let prefix = severity.prefix();
    let mut line = String::with_capacity(prefix.len() + message.len() + 1);
    line.push_str(prefix);
    line.push_str(message);
    line.push('\n');
    line
}

impl<W: Write + Send> Sink for ConsoleSink<W> {
    fn log(&self, severity: Severity, message: &str) {
        let line = format_line(severity, message);
        let _ = self.out.lock().write_all(line.as_bytes());
    }

    fn shutdown(&self) {
        let _ = self.out.lock().flush();
    }
}
