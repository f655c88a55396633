//! Logger
//!
//! Owns the configuration, the sink registry and the format buffer, and
//! exposes the logging API. Dropping a logger notifies every sink before the
//! sinks themselves are released.
//!
//! # Example
//!
//! ```
//! use sinklog::{Logger, LoggerConfig, Severity, sinks::MemorySink};
//! use std::sync::Arc;
//!
//! let logger = Logger::with_config(LoggerConfig::with_minimum_level(Severity::Warning));
//! let sink = Arc::new(MemorySink::new());
//! logger.add_sink(sink.clone()).unwrap();
//!
//! sinklog::debug!(logger, "x");
//! sinklog::error!(logger, "y={}", 5);
//!
//! assert_eq!(sink.records(), vec![(Severity::Error, "y=5".to_string())]);
//! ```

use crate::config::{Config, LoggerConfig};
use crate::dispatch::Dispatcher;
use crate::error::Result;
use crate::severity::Severity;
use crate::sink::{Sink, SinkId};
use crate::sinks::{FileSink, SerialSink};
use crate::stats::StatsSnapshot;
use spin::RwLock;
use std::fmt;
use tracing::{debug, warn};

pub struct Logger {
    config: RwLock<LoggerConfig>,
    dispatcher: Dispatcher,
}

impl Logger {
    /// Logger with the default configuration (everything is logged)
    pub fn new() -> Self {
        Self::with_config(LoggerConfig::default())
    }

    pub fn with_config(config: LoggerConfig) -> Self {
        Self {
            dispatcher: Dispatcher::new(config.minimum_level, config.max_buffer_capacity),
            config: RwLock::new(config),
        }
    }

    /// Logger for a loaded config file, with its `[file]` and `[serial]`
    /// sinks opened and registered in that order
    ///
    /// # Errors
    ///
    /// Any error opening a configured sink. Sinks opened before the failure
    /// are shut down with the discarded logger.
    pub fn from_config(config: &Config) -> Result<Self> {
        let logger = Self::with_config(config.logger);
        if let Some(file) = &config.file {
            logger.add_sink(FileSink::open(file)?)?;
        }
        if let Some(serial) = &config.serial {
            logger.add_sink(SerialSink::open(serial)?)?;
        }
        Ok(logger)
    }

    // === Sinks ===

    /// Register a sink
    ///
    /// Pass an `Arc<T>` to keep a handle to the sink after registering it.
    ///
    /// # Errors
    ///
    /// `RegistryFull` when the logger already holds `MAX_SINKS` sinks,
    /// `ShutDown` after [`Logger::shutdown`].
    pub fn add_sink<S: Sink + 'static>(&self, sink: S) -> Result<SinkId> {
        match self.dispatcher.sinks().register(sink) {
            Ok(id) => {
                debug!(slot = id.index(), "sink registered");
                Ok(id)
            }
            Err(e) => {
                warn!("{}", e);
                Err(e)
            }
        }
    }

    /// Construct a sink with `Default` and register it
    pub fn add_default_sink<S: Sink + Default + 'static>(&self) -> Result<SinkId> {
        self.add_sink(S::default())
    }

    pub fn sink_count(&self) -> usize {
        self.dispatcher.sinks().len()
    }

    // === Logging ===

    /// Log a message of the given severity
    ///
    /// Never fails. Filtered messages cost the level check only; malformed or
    /// unallocatable messages are dropped and show up in [`Logger::stats`].
    #[inline]
    pub fn log(&self, severity: Severity, args: fmt::Arguments<'_>) {
        self.dispatcher.dispatch(severity, args);
    }

    #[inline]
    pub fn trace(&self, args: fmt::Arguments<'_>) {
        self.log(Severity::Trace, args);
    }

    #[inline]
    pub fn debug(&self, args: fmt::Arguments<'_>) {
        self.log(Severity::Debug, args);
    }

    #[inline]
    pub fn information(&self, args: fmt::Arguments<'_>) {
        self.log(Severity::Information, args);
    }

    #[inline]
    pub fn warning(&self, args: fmt::Arguments<'_>) {
        self.log(Severity::Warning, args);
    }

    #[inline]
    pub fn error(&self, args: fmt::Arguments<'_>) {
        self.log(Severity::Error, args);
    }

    #[inline]
    pub fn fatal(&self, args: fmt::Arguments<'_>) {
        self.log(Severity::Fatal, args);
    }

    /// Whether a message of `severity` would currently reach the sinks
    #[inline]
    pub fn is_enabled(&self, severity: Severity) -> bool {
        self.dispatcher.is_enabled(severity)
    }

    // === Configuration ===

    pub fn config(&self) -> LoggerConfig {
        *self.config.read()
    }

    pub fn minimum_level(&self) -> Severity {
        self.dispatcher.minimum_level()
    }

    /// Replace the whole configuration; sinks and buffer are kept
    pub(crate) fn reconfigure(&self, config: LoggerConfig) {
        let mut current = self.config.write();
        self.dispatcher.set_minimum_level(config.minimum_level);
        self.dispatcher.set_buffer_limit(config.max_buffer_capacity);
        *current = config;
    }

    // === Introspection ===

    /// Current format buffer capacity in bytes
    pub fn buffer_capacity(&self) -> usize {
        self.dispatcher.buffer_capacity()
    }

    pub fn stats(&self) -> StatsSnapshot {
        self.dispatcher.stats().snapshot()
    }

    // === Teardown ===

    /// Notify every sink of shutdown and stop logging
    ///
    /// Only the first call has an effect. Called automatically on drop.
    pub fn shutdown(&self) {
        if self.dispatcher.stop() {
            debug!(sinks = self.sink_count(), "logger shut down");
        }
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("config", &self.config())
            .field("sinks", &self.sink_count())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::MAX_SINKS;
    use crate::error::LoggerError;
    use crate::sinks::{FileSinkConfig, MemorySink, SerialSinkConfig};
    use std::sync::Arc;

    #[test]
    fn test_default_logs_everything() {
        let logger = Logger::new();
        assert_eq!(logger.minimum_level(), Severity::Trace);
        for level in Severity::MESSAGE_LEVELS {
            assert!(logger.is_enabled(level));
        }
    }

    #[test]
    fn test_convenience_calls_fix_severity() {
        let logger = Logger::new();
        let sink = Arc::new(MemorySink::new());
        logger.add_sink(sink.clone()).unwrap();

        logger.trace(format_args!("t"));
        logger.debug(format_args!("d"));
        logger.information(format_args!("i"));
        logger.warning(format_args!("w"));
        logger.error(format_args!("e"));
        logger.fatal(format_args!("f"));

        let levels: Vec<Severity> = sink.records().into_iter().map(|(s, _)| s).collect();
        assert_eq!(levels, Severity::MESSAGE_LEVELS.to_vec());
    }

    #[test]
    fn test_add_default_sink() {
        let logger = Logger::new();
        let id = logger.add_default_sink::<MemorySink>().unwrap();
        assert_eq!(id.index(), 0);
        assert_eq!(logger.sink_count(), 1);
    }

    #[test]
    fn test_registry_full_is_reported() {
        let logger = Logger::new();
        for _ in 0..MAX_SINKS {
            logger.add_default_sink::<MemorySink>().unwrap();
        }
        assert!(matches!(
            logger.add_default_sink::<MemorySink>(),
            Err(LoggerError::RegistryFull { capacity: MAX_SINKS })
        ));
    }

    #[test]
    fn test_reconfigure_changes_filter() {
        let logger = Logger::new();
        logger.reconfigure(LoggerConfig {
            minimum_level: Severity::Fatal,
            max_buffer_capacity: Some(64),
        });

        assert!(!logger.is_enabled(Severity::Error));
        assert!(logger.is_enabled(Severity::Fatal));
        assert_eq!(logger.config().max_buffer_capacity, Some(64));
    }

    #[test]
    fn test_buffer_limit_drops_long_messages() {
        let logger = Logger::with_config(LoggerConfig {
            max_buffer_capacity: Some(8),
            ..Default::default()
        });
        let sink = Arc::new(MemorySink::new());
        logger.add_sink(sink.clone()).unwrap();

        logger.information(format_args!("{}", "this is far too long"));
        logger.information(format_args!("short"));

        assert_eq!(sink.messages(), vec!["short".to_string()]);
        assert_eq!(logger.stats().dropped_alloc, 1);
    }

    #[test]
    fn test_explicit_shutdown_then_drop_notifies_once() {
        let sink = Arc::new(MemorySink::new());
        {
            let logger = Logger::new();
            logger.add_sink(sink.clone()).unwrap();
            logger.shutdown();
        }
        assert_eq!(sink.shutdown_count(), 1);
    }

    #[test]
    fn test_going_out_of_scope_notifies_sinks() {
        let first = Arc::new(MemorySink::new());
        let second = Arc::new(MemorySink::new());
        {
            let logger = Logger::new();
            logger.add_sink(first.clone()).unwrap();
            logger.add_sink(second.clone()).unwrap();
            logger.information(format_args!("running"));
        }
        assert_eq!(first.shutdown_count(), 1);
        assert_eq!(second.shutdown_count(), 1);
    }

    #[test]
    fn test_add_sink_after_shutdown_is_refused() {
        let early = Arc::new(MemorySink::new());
        let late = Arc::new(MemorySink::new());
        {
            let logger = Logger::new();
            logger.add_sink(early.clone()).unwrap();
            logger.shutdown();

            assert!(matches!(
                logger.add_sink(late.clone()),
                Err(LoggerError::ShutDown)
            ));
            assert_eq!(logger.sink_count(), 1);
        }
        assert_eq!(early.shutdown_count(), 1);
        // Never registered, so never owned by the logger
        assert_eq!(late.shutdown_count(), 0);
        assert_eq!(Arc::strong_count(&late), 1);
    }

    #[test]
    fn test_from_config_attaches_file_sink() {
        let dir = std::env::temp_dir().join(format!(
            "sinklog-logger-{}-{}",
            std::process::id(),
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap_or_default()
                .as_nanos()
        ));
        let path = dir.join("driver.log");
        let config = Config {
            logger: LoggerConfig::with_minimum_level(Severity::Warning),
            file: Some(FileSinkConfig {
                prefix: false,
                ..FileSinkConfig::new(&path)
            }),
            serial: None,
        };

        {
            let logger = Logger::from_config(&config).unwrap();
            assert_eq!(logger.sink_count(), 1);
            assert_eq!(logger.minimum_level(), Severity::Warning);
            logger.information(format_args!("quiet"));
            logger.error(format_args!("boom {}", 7));
        }

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "boom 7\n");
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_from_config_reports_serial_open_failure() {
        let config = Config {
            serial: Some(SerialSinkConfig {
                port: "/dev/sinklog-no-such-port".to_string(),
                ..Default::default()
            }),
            ..Default::default()
        };

        assert!(matches!(
            Logger::from_config(&config),
            Err(LoggerError::SerialOpen { .. })
        ));
    }
}
