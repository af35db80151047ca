//! Logging integration.
//!
//! Provides a helper for installing a [`tracing`]-based subscriber so that
//! resolution, save orchestration, and switch handling emit readable output.

/// Installs the global tracing subscriber with the given filter directive.
///
/// The filter uses the `tracing_subscriber::EnvFilter` syntax (e.g. "debug",
/// "info", "locale_rs_db=trace"); the `RUST_LOG` environment variable takes
/// precedence when set. Installing twice is a no-op, so tests can call this
/// freely.
///
/// # Examples
///
/// ```
/// locale_rs_core::logging::setup_logging("debug");
/// tracing::debug!("subscriber installed");
/// ```
pub fn setup_logging(filter: &str) {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .ok();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setup_is_idempotent() {
        setup_logging("debug");
        setup_logging("info");
        tracing::debug!("still alive after double install");
    }
}
