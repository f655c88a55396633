//! In-memory sink
//!
//! Keeps the most recent records in a ring buffer (`VecDeque`), dropping the
//! oldest at capacity. Useful as a crash-dump buffer and as a recording sink
//! in tests.

use crate::constants::DEFAULT_MEMORY_SINK_CAPACITY;
use crate::severity::Severity;
use crate::sink::Sink;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};

pub struct MemorySink {
    records: Mutex<VecDeque<(Severity, String)>>,
    max_records: usize,
    shutdowns: AtomicU32,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_MEMORY_SINK_CAPACITY)
    }

    /// Create a sink keeping at most `max_records` records
    pub fn with_capacity(max_records: usize) -> Self {
        let max_records = max_records.max(1);
        Self {
            records: Mutex::new(VecDeque::with_capacity(max_records)),
            max_records,
            shutdowns: AtomicU32::new(0),
        }
    }

    /// All kept records, oldest first
    pub fn records(&self) -> Vec<(Severity, String)> {
        self.records.lock().iter().cloned().collect()
    }

    /// Message texts only, oldest first
    pub fn messages(&self) -> Vec<String> {
        self.records
            .lock()
            .iter()
            .map(|(_, text)| text.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }

    pub fn clear(&self) {
        self.records.lock().clear();
    }

    /// Number of shutdown notifications received
    pub fn shutdown_count(&self) -> u32 {
        self.shutdowns.load(Ordering::Acquire)
    }

    /// Format kept records as prefixed text lines
    pub fn to_text(&self) -> String {
        self.records
            .lock()
            .iter()
            .map(|(severity, text)| format!("{}{}", severity.prefix(), text))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Default for MemorySink {
    fn default() -> Self {
        Self::new()
    }
}

impl Sink for MemorySink {
    fn log(&self, severity: Severity, message: &str) {
        let mut records = self.records.lock();
        if records.len() >= self.max_records {
            records.pop_front();
        }
        records.push_back((severity, message.to_owned()));
    }

    fn shutdown(&self) {
        self.shutdowns.fetch_add(1, Ordering::AcqRel);
    }
}
