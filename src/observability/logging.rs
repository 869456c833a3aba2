//! Structured logging setup.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter directive for `level`: this crate at `level`, dependencies at warn.
pub fn default_directive(level: &str) -> String {
    format!("warn,dakora_client={level},dakora={level}")
}

/// Install a global fmt subscriber.
///
/// `RUST_LOG` wins over `level` when set. Calling this twice is harmless;
/// the second call leaves the first subscriber in place.
pub fn init(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive(level)));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}
