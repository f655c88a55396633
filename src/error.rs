//! Centralized error types for the logger
//!
//! Everything that can be reported to a caller is a `LoggerError`.
//! Use `Result<T>` as shorthand for `std::result::Result<T, LoggerError>`.
//!
//! Dispatch failures are never reported to the caller of a log call; they are
//! classified by `DispatchError`, counted, and the message is dropped.

use std::fmt;
use std::path::PathBuf;

/// All logger errors
#[derive(Debug)]
pub enum LoggerError {
    // === Registry ===
    /// The sink registry already holds its maximum number of sinks
    RegistryFull { capacity: usize },
    /// The logger has shut down and accepts no more sinks
    ShutDown,

    // === Config ===
    /// Failed to read a configuration file
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Configuration file is not valid TOML for `LoggerConfig`
    ConfigParse { path: PathBuf, reason: String },
    /// Unknown severity name
    InvalidSeverity { value: String },

    // === Sinks ===
    /// File system operation failed
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Failed to open serial port
    SerialOpen {
        port: String,
        source: serialport::Error,
    },
}

impl std::error::Error for LoggerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ConfigRead { source, .. } | Self::Io { source, .. } => Some(source),
            Self::SerialOpen { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl fmt::Display for LoggerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RegistryFull { capacity } => {
                write!(f, "Sink registry is full ({} sinks)", capacity)
            }
            Self::ShutDown => write!(f, "Logger has been shut down"),
            Self::ConfigRead { path, .. } => {
                write!(f, "Cannot read config: {}", path.display())
            }
            Self::ConfigParse { path, reason } => {
                write!(f, "Invalid config {}: {}", path.display(), reason)
            }
            Self::InvalidSeverity { value } => write!(f, "Unknown severity: {:?}", value),
            Self::Io { path, .. } => write!(f, "IO error: {}", path.display()),
            Self::SerialOpen { port, .. } => write!(f, "Cannot open serial port: {}", port),
        }
    }
}

/// Alias for Result with LoggerError
pub type Result<T> = std::result::Result<T, LoggerError>;

/// Why a dispatched message was dropped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchError {
    /// Measuring the rendered length failed (a `Display` impl returned an error)
    Measure,
    /// The format buffer could not be grown to the requested size
    Alloc { requested: usize },
    /// Rendering into the buffer failed or overran the measured length
    Render,
}

impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Measure => write!(f, "message measurement failed"),
            Self::Alloc { requested } => {
                write!(f, "format buffer allocation of {} bytes failed", requested)
            }
            Self::Render => write!(f, "message rendering failed"),
        }
    }
}

impl std::error::Error for DispatchError {}
