//! Configuration
//!
//! `LoggerConfig` is the only thing the logger itself needs. `Config` is the
//! on-disk TOML layout, which can also describe the bundled sinks:
//!
//! ```toml
//! [logger]
//! minimum_level = "warning"
//! max_buffer_capacity = 4096
//!
//! [file]
//! path = "driver.log"
//! encoding = "utf16le"
//!
//! [serial]
//! port = "COM1"
//! baud_rate = 115200
//! ```

use crate::error::{LoggerError, Result};
use crate::severity::Severity;
use crate::sinks::{FileSinkConfig, SerialSinkConfig};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

// =============================================================================
// Logger Configuration
// =============================================================================

/// Configuration of a single logger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// Messages below this severity are dropped before any formatting.
    /// `Disabled` drops everything.
    pub minimum_level: Severity,
    /// Upper bound on the format buffer, in bytes (None = unbounded).
    /// Longer messages are dropped as if allocation had failed.
    pub max_buffer_capacity: Option<usize>,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            minimum_level: Severity::Trace,
            max_buffer_capacity: None,
        }
    }
}

impl LoggerConfig {
    /// Default config with a different minimum level
    pub fn with_minimum_level(minimum_level: Severity) -> Self {
        Self {
            minimum_level,
            ..Default::default()
        }
    }
}

// =============================================================================
// File Layout
// =============================================================================

/// Full configuration file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub logger: LoggerConfig,
    /// Present when `Logger::from_config` should attach a file sink
    pub file: Option<FileSinkConfig>,
    /// Present when `Logger::from_config` should attach a serial sink
    pub serial: Option<SerialSinkConfig>,
}

impl Config {
    /// Parse a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        parse(content, Path::new("<inline>"))
    }

    /// Serialize to pretty TOML
    pub fn to_toml_string(&self) -> String {
        // Every field is a plain serde type; serialization cannot fail.
        toml::to_string_pretty(self).unwrap_or_default()
    }
}

fn parse(content: &str, path: &Path) -> Result<Config> {
    toml::from_str(content).map_err(|e| LoggerError::ConfigParse {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Load config from a TOML file
pub fn load(path: impl AsRef<Path>) -> Result<Config> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| LoggerError::ConfigRead {
        path: PathBuf::from(path),
        source: e,
    })?;
    parse(&content, path)
}

/// Load config from a TOML file, falling back to defaults on any error
pub fn load_or_default(path: impl AsRef<Path>) -> Config {
    match load(path) {
        Ok(config) => config,
        Err(e) => {
            warn!("{}, using defaults", e);
            Config::default()
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
