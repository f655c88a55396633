//! Sink contract
//!
//! A sink is anything that accepts a severity and a fully rendered message.
//! The logger only ever talks to sinks through this trait.

use crate::severity::Severity;
use std::sync::Arc;

/// Consumer of rendered log messages
///
/// `log` is called while the logger holds its spin locks, so it must return
/// promptly and must not log through the same logger. `message` borrows the
/// logger's shared buffer and is only valid for the duration of the call.
///
/// Errors inside a sink stay inside the sink.
pub trait Sink: Send + Sync {
    /// Consume one rendered message
    fn log(&self, severity: Severity, message: &str);

    /// Called once when the owning logger shuts down, before it releases its
    /// resources
    fn shutdown(&self) {}
}

impl<S: Sink + ?Sized> Sink for Arc<S> {
    #[inline]
    fn log(&self, severity: Severity, message: &str) {
        (**self).log(severity, message)
    }

    #[inline]
    fn shutdown(&self) {
        (**self).shutdown()
    }
}

impl<S: Sink + ?Sized> Sink for Box<S> {
    #[inline]
    fn log(&self, severity: Severity, message: &str) {
        (**self).log(severity, message)
    }

    #[inline]
    fn shutdown(&self) {
        (**self).shutdown()
    }
}

/// Identifier of a registered sink (its slot index)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SinkId(pub(crate) usize);

impl SinkId {
    /// Slot index, in registration order
    pub fn index(self) -> usize {
        self.0
    }
}
