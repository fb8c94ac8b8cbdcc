//! Tracing subscriber setup.
//!
//! The engine only emits `tracing` events; applications decide whether to
//! install a subscriber. [`init_tracing`] installs the fmt subscriber with an
//! `EnvFilter`, preferring `RUST_LOG` over the given level.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::settings::LogLevel;

/// Installs the global fmt subscriber.
///
/// Returns `false` when a global subscriber was already installed; the
/// existing one is left in place.
///
/// # Examples
///
/// ```rust
/// use exotic_engine::settings::LogLevel;
/// use exotic_engine::telemetry::init_tracing;
///
/// let _installed = init_tracing(LogLevel::Warn);
/// assert!(!init_tracing(LogLevel::Warn));
/// ```
pub fn init_tracing(level: LogLevel) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_filter_str()));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_install_is_rejected() {
        let _ = init_tracing(LogLevel::Debug);
        assert!(!init_tracing(LogLevel::Debug));
    }
}
