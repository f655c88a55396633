//! Crate-wide constants
//!
//! Limits and sink defaults shared across modules.

// =============================================================================
// Registry
// =============================================================================

/// Maximum number of sinks a logger can hold
pub const MAX_SINKS: usize = 16;

// =============================================================================
// File sink
// =============================================================================

/// Queue depth between `FileSink::log` and its writer thread
pub const FILE_QUEUE_CAPACITY: usize = 1024;

/// Flush interval used when the configured one is zero (milliseconds)
pub const FILE_FLUSH_INTERVAL_MS: u64 = 250;

/// Name of the file sink's writer thread
pub const FILE_WRITER_THREAD_NAME: &str = "sinklog-file-writer";

// =============================================================================
// Serial sink
// =============================================================================

/// Default serial port for the serial sink
#[cfg(windows)]
pub const DEFAULT_SERIAL_PORT: &str = "COM1";

/// Default serial port for the serial sink
#[cfg(not(windows))]
pub const DEFAULT_SERIAL_PORT: &str = "/dev/ttyS0";

/// Default baud rate for the serial sink
pub const DEFAULT_SERIAL_BAUD_RATE: u32 = 115_200;

/// Write timeout for the serial sink (milliseconds)
pub const SERIAL_WRITE_TIMEOUT_MS: u64 = 10;

// =============================================================================
// Memory sink
// =============================================================================

/// Default number of records kept by `MemorySink`
pub const DEFAULT_MEMORY_SINK_CAPACITY: usize = 256;
