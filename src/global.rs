//! Process-wide logger
//!
//! A thin convenience over an ordinary [`Logger`] for code that cannot pass a
//! handle around. Rules:
//!
//! - [`init`] is the only way to create it. The first call builds the logger;
//!   every later call only re-applies the configuration, keeping the
//!   registered sinks and the locks.
//! - Logging before `init` is a silent no-op.
//! - The logger lives until process exit. [`shutdown`] notifies its sinks
//!   once, after which it stays inert.

use crate::config::LoggerConfig;
use crate::logger::Logger;
use crate::severity::Severity;
use spin::Once;
use std::fmt;

static GLOBAL: Once<Logger> = Once::new();

/// Initialize the process-wide logger, or re-apply `config` if it exists
pub fn init(config: LoggerConfig) -> &'static Logger {
    let mut created = false;
    let logger = GLOBAL.call_once(|| {
        created = true;
        Logger::with_config(config)
    });
    if !created {
        logger.reconfigure(config);
    }
    logger
}

/// The process-wide logger, if initialized
pub fn get() -> Option<&'static Logger> {
    GLOBAL.get()
}

/// Log through the process-wide logger; no-op before [`init`]
#[inline]
pub fn log(severity: Severity, args: fmt::Arguments<'_>) {
    if let Some(logger) = get() {
        logger.log(severity, args);
    }
}

/// Shut down the process-wide logger's sinks (first call only)
pub fn shutdown() {
    if let Some(logger) = get() {
        logger.shutdown();
    }
}
