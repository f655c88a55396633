//! sinklog - low-overhead logging with pluggable sinks
//!
//! A log call is filtered by severity with a single atomic load, measured,
//! formatted once into a shared growable buffer, then handed to every
//! registered sink. Every critical section is a spin lock: nothing on the
//! dispatch path parks the calling thread.
//!
//! Delivery is best-effort. A message that cannot be measured, allocated
//! for or rendered is dropped and counted in [`Logger::stats`]; the caller
//! never sees an error.
//!
//! ```
//! use sinklog::{Logger, sinks::ConsoleSink};
//!
//! let logger = Logger::new();
//! logger.add_sink(ConsoleSink::stderr()).unwrap();
//! sinklog::info!(logger, "device {} attached", 3);
//! ```
//!
//! Sinks must not log through the logger that is dispatching to them: the
//! dispatch lock is not reentrant.

mod buffer;
mod constants;
mod diagnostics;
mod dispatch;
mod error;
mod logger;
mod macros;
mod severity;
mod sink;
mod stats;

pub mod config;
pub mod global;
pub mod registry;
pub mod sinks;

pub use config::{Config, LoggerConfig};
pub use constants::MAX_SINKS;
pub use diagnostics::init_tracing;
pub use error::{DispatchError, LoggerError, Result};
pub use logger::Logger;
pub use registry::SinkRegistry;
pub use severity::Severity;
pub use sink::{Sink, SinkId};
pub use stats::{DispatchStats, StatsSnapshot};
