//! Forward messages into `tracing`
//!
//! Lets a sinklog logger feed an application that already has a `tracing`
//! subscriber. Fatal has no `tracing` counterpart and is emitted at ERROR.

use crate::severity::Severity;
use crate::sink::Sink;

#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl Sink for TracingSink {
    fn log(&self, severity: Severity, message: &str) {
        match severity {
            Severity::Trace => tracing::trace!(target: "sinklog", "{}", message),
            Severity::Debug => tracing::debug!(target: "sinklog", "{}", message),
            Severity::Information => tracing::info!(target: "sinklog", "{}", message),
            Severity::Warning => tracing::warn!(target: "sinklog", "{}", message),
            Severity::Error => tracing::error!(target: "sinklog", "{}", message),
            Severity::Fatal => tracing::error!(target: "sinklog", fatal = true, "{}", message),
            Severity::Disabled => {}
        }
    }
}
