//! Bundled sinks
//!
//! - `ConsoleSink` - prefixed lines on stderr (or any writer)
//! - `FileSink` - appends to a file from a dedicated writer thread
//! - `SerialSink` - prefixed ASCII lines on a serial port
//! - `MemorySink` - bounded in-memory record store
//! - `TracingSink` - re-emits messages as `tracing` events
//!
//! # Adding a new sink
//!
//! 1. Create `sinks/my_sink.rs`
//! 2. Implement the `Sink` trait
//! 3. Add `pub mod my_sink;` here
//! 4. No other changes needed

pub mod console;
pub mod file;
pub mod forward;
pub mod memory;
pub mod serial;

pub use console::ConsoleSink;
pub use file::{FileEncoding, FileSink, FileSinkConfig};
pub use forward::TracingSink;
pub use memory::MemorySink;
pub use serial::{SerialSink, SerialSinkConfig};

/// Replace every non-ASCII character with `?`
pub(crate) fn to_ascii_lossy(message: &str) -> impl Iterator<Item = u8> + '_ {
    message
        .chars()
        .map(|c| if c.is_ascii() { c as u8 } else { b'?' })
}
