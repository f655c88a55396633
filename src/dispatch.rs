//! Dispatcher
//!
//! Filter, measure, format into the shared buffer, fan out. Each step that
//! can fail drops the message and counts it; nothing reaches the caller.
//!
//! Lock order is buffer then registry. The buffer lock stays held across the
//! fan-out: sinks read the rendered text straight out of the shared buffer,
//! so it must not be reused until every sink has returned.

use crate::buffer::{self, FormatBuffer};
use crate::constants::MAX_SINKS;
use crate::error::DispatchError;
use crate::registry::SinkRegistry;
use crate::severity::Severity;
use crate::stats::DispatchStats;
use spin::Mutex;
use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use tracing::trace;

pub(crate) struct Dispatcher {
    minimum_level: AtomicU8,
    stopped: AtomicBool,
    buffer: Mutex<FormatBuffer>,
    sinks: SinkRegistry<MAX_SINKS>,
    stats: DispatchStats,
}

impl Dispatcher {
    pub(crate) fn new(minimum_level: Severity, buffer_limit: Option<usize>) -> Self {
        Self {
            minimum_level: AtomicU8::new(minimum_level as u8),
            stopped: AtomicBool::new(false),
            buffer: Mutex::new(FormatBuffer::new(buffer_limit)),
            sinks: SinkRegistry::new(),
            stats: DispatchStats::new(),
        }
    }

    /// Lock-free check whether a message of `severity` would be dispatched
    #[inline]
    pub(crate) fn is_enabled(&self, severity: Severity) -> bool {
        let minimum = Severity::from_u8(self.minimum_level.load(Ordering::Relaxed));
        severity != Severity::Disabled
            && minimum != Severity::Disabled
            && severity >= minimum
            && !self.stopped.load(Ordering::Acquire)
    }

    /// Best-effort dispatch; failures are counted and swallowed
    pub(crate) fn dispatch(&self, severity: Severity, args: fmt::Arguments<'_>) {
        // Filtered calls only read; no shared counter is written.
        if !self.is_enabled(severity) {
            return;
        }

        match self.render_and_fan_out(severity, args) {
            Ok(true) => self.stats.record_dispatched(),
            Ok(false) => {}
            Err(reason) => {
                trace!(%severity, %reason, "log message dropped");
                self.stats.record_dropped(reason);
            }
        }
    }

    fn render_and_fan_out(
        &self,
        severity: Severity,
        args: fmt::Arguments<'_>,
    ) -> Result<bool, DispatchError> {
        let required = buffer::measure(args)?;

        let mut buffer = self.buffer.lock();
        // Shutdown may have completed between the filter and the lock.
        if self.stopped.load(Ordering::Acquire) {
            return Ok(false);
        }
        let rendered = buffer.acquire(required)?.render(args)?;
        let message = rendered.as_str();

        self.sinks.for_each(|sink| sink.log(severity, message));
        Ok(true)
    }

    pub(crate) fn set_minimum_level(&self, level: Severity) {
        self.minimum_level.store(level as u8, Ordering::Relaxed);
    }

    pub(crate) fn minimum_level(&self) -> Severity {
        Severity::from_u8(self.minimum_level.load(Ordering::Relaxed))
    }

    pub(crate) fn set_buffer_limit(&self, limit: Option<usize>) {
        self.buffer.lock().set_limit(limit);
    }

    pub(crate) fn buffer_capacity(&self) -> usize {
        self.buffer.lock().capacity()
    }

    pub(crate) fn sinks(&self) -> &SinkRegistry<MAX_SINKS> {
        &self.sinks
    }

    pub(crate) fn stats(&self) -> &DispatchStats {
        &self.stats
    }

    /// Stop dispatching and notify every sink; returns false if already stopped
    pub(crate) fn stop(&self) -> bool {
        if self.stopped.swap(true, Ordering::AcqRel) {
            return false;
        }
        // Wait out any dispatch already past the filter.
        let _buffer = self.buffer.lock();
        self.sinks.shutdown_all();
        true
    }
}
