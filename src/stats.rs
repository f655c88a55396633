//! Dispatch statistics
//!
//! Lock-free counters for accepted and dropped log calls. Dropped
//! messages are never reported to the caller; this is where they show up.

use crate::error::DispatchError;
use std::sync::atomic::{AtomicU64, Ordering};

/// Dispatch counters (fully lock-free)
#[derive(Debug, Default)]
pub struct DispatchStats {
    /// Messages fanned out to the sinks
    dispatched: AtomicU64,
    /// Messages whose length could not be measured
    dropped_measure: AtomicU64,
    /// Messages dropped because the buffer could not grow
    dropped_alloc: AtomicU64,
    /// Messages whose rendering failed
    dropped_render: AtomicU64,
}

impl DispatchStats {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub(crate) fn record_dispatched(&self) {
        self.dispatched.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn record_dropped(&self, reason: DispatchError) {
        let counter = match reason {
            DispatchError::Measure => &self.dropped_measure,
            DispatchError::Alloc { .. } => &self.dropped_alloc,
            DispatchError::Render => &self.dropped_render,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// Point-in-time copy of all counters
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            dispatched: self.dispatched.load(Ordering::Relaxed),
            dropped_measure: self.dropped_measure.load(Ordering::Relaxed),
            dropped_alloc: self.dropped_alloc.load(Ordering::Relaxed),
            dropped_render: self.dropped_render.load(Ordering::Relaxed),
        }
    }
}

/// Plain copy of `DispatchStats`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub dispatched: u64,
    pub dropped_measure: u64,
    pub dropped_alloc: u64,
    pub dropped_render: u64,
}

impl StatsSnapshot {
    /// Total messages dropped for any reason
    pub fn dropped(&self) -> u64 {
        self.dropped_measure + self.dropped_alloc + self.dropped_render
    }
}
