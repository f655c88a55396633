//! Leveled logging macros
//!
//! Each macro takes a logger (anything with a `log(Severity, Arguments)`
//! method, e.g. `Logger` or `&'static Logger`) followed by a format string
//! and its arguments. Arguments are only rendered when the severity passes
//! the logger's filter.
//!
//! ```
//! # use sinklog::{Logger, Severity};
//! let logger = Logger::new();
//! sinklog::log!(logger, Severity::Warning, "queue at {}%", 93);
//! sinklog::info!(logger, "attached");
//! ```

#[macro_export]
macro_rules! log {
    ($logger:expr, $severity:expr, $($arg:tt)+) => {
        $logger.log($severity, ::core::format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! trace {
    ($logger:expr, $($arg:tt)+) => { $crate::log!($logger, $crate::Severity::Trace, $($arg)+) };
}

#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => { $crate::log!($logger, $crate::Severity::Debug, $($arg)+) };
}

#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => { $crate::log!($logger, $crate::Severity::Information, $($arg)+) };
}

#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => { $crate::log!($logger, $crate::Severity::Warning, $($arg)+) };
}

#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => { $crate::log!($logger, $crate::Severity::Error, $($arg)+) };
}

#[macro_export]
macro_rules! fatal {
    ($logger:expr, $($arg:tt)+) => { $crate::log!($logger, $crate::Severity::Fatal, $($arg)+) };
}
