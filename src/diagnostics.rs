//! Internal diagnostics
//!
//! The crate reports about itself (registrations, dropped messages, config
//! fallbacks) through `tracing`. Applications that want to see those events
//! can install a subscriber here.

/// Install a compact `tracing` subscriber for sinklog's own diagnostics
///
/// Call early in main() before any logger is created.
/// Set `verbose` to true to see per-message drop reports.
pub fn init_tracing(verbose: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let level = if verbose { "sinklog=trace" } else { "sinklog=warn" };

    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_file(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .with(tracing_subscriber::EnvFilter::new(level))
        .try_init();
}
