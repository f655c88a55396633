//! Serial sink
//!
//! Writes each message as `wide prefix + ASCII text + CRLF` to a serial
//! port. Characters outside ASCII are sent as `?`.

use super::to_ascii_lossy;
use crate::constants::{DEFAULT_SERIAL_BAUD_RATE, DEFAULT_SERIAL_PORT, SERIAL_WRITE_TIMEOUT_MS};
use crate::error::{LoggerError, Result};
use crate::severity::Severity;
use crate::sink::Sink;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SerialSinkConfig {
    /// Port name (e.g. "COM1", "/dev/ttyS0")
    pub port: String,
    pub baud_rate: u32,
}

impl Default for SerialSinkConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_SERIAL_PORT.to_string(),
            baud_rate: DEFAULT_SERIAL_BAUD_RATE,
        }
    }
}

/// Serial sink over any byte writer
///
/// # Example
///
/// ```ignore
/// let sink = SerialSink::open(&SerialSinkConfig::default())?;
/// logger.add_sink(sink)?;
/// ```
pub struct SerialSink<W: Write + Send> {
    port: Mutex<W>,
}

impl SerialSink<Box<dyn serialport::SerialPort>> {
    /// Open a serial port for log output
    pub fn open(config: &SerialSinkConfig) -> Result<Self> {
        let port = serialport::new(&config.port, config.baud_rate)
            .timeout(Duration::from_millis(SERIAL_WRITE_TIMEOUT_MS))
            .open()
            .map_err(|e| LoggerError::SerialOpen {
                port: config.port.clone(),
                source: e,
            })?;
        Ok(Self::new(port))
    }
}

impl<W: Write + Send> SerialSink<W> {
    pub fn new(port: W) -> Self {
        Self {
            port: Mutex::new(port),
        }
    }

    /// Consume the sink and return the writer
    pub fn into_inner(self) -> W {
        self.port.into_inner()
    }
}

fn encode_line(severity: Severity, message: &str) -> Vec<u8> {
    let prefix = severity.wide_prefix();
    let mut line = Vec::with_capacity(prefix.len() + message.len() + 2);
    line.extend_from_slice(prefix.as_bytes());
    line.extend(to_ascii_lossy(message));
    line.extend_from_slice(b"\r\n");
    line
}

impl<W: Write + Send> Sink for SerialSink<W> {
    fn log(&self, severity: Severity, message: &str) {
        let line = encode_line(severity, message);
        // Timeouts and disconnects lose the line; nothing to report to.
        let _ = self.port.lock().write_all(&line);
    }

    fn shutdown(&self) {
        let _ = self.port.lock().flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wide_prefix_and_crlf() {
        let sink = SerialSink::new(Vec::new());
        sink.log(Severity::Warning, "fan stalled");

        assert_eq!(sink.into_inner(), b"    WRN    :  fan stalled\r\n".to_vec());
    }

    #[test]
    fn test_non_ascii_replaced() {
        let sink = SerialSink::new(Vec::new());
        sink.log(Severity::Trace, "température");

        assert_eq!(sink.into_inner(), b"   TRACE   :  temp?rature\r\n".to_vec());
    }

    #[test]
    fn test_open_missing_port_fails() {
        let config = SerialSinkConfig {
            port: "/dev/sinklog-no-such-port".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            SerialSink::open(&config),
            Err(LoggerError::SerialOpen { .. })
        ));
    }
}
