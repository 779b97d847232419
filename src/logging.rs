//! Logging bootstrap.
//!
//! Installs a `tracing-subscriber` fmt layer writing to stderr. The
//! configured level is the default directive; `RUST_LOG` refines it.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Errors that can occur during logger initialization.
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    /// A global subscriber was already installed in this process.
    #[error("Tracing subscriber error: {0}")]
    Subscriber(#[from] tracing_subscriber::util::TryInitError),
}

/// Combines the configured level with `-v` flags.
///
/// Each `-v` raises the level one step above the configured one, never
/// lowering it: `warn` plus one `-v` is `info`, plus two is `debug`.
pub fn effective_level(configured: LevelFilter, verbose: u8) -> LevelFilter {
    let from_flags = match verbose {
        0 => LevelFilter::OFF,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    configured.max(from_flags)
}

/// Installs the global subscriber.
pub fn init(level: LevelFilter) -> Result<(), LoggingError> {
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .try_init()?;
    Ok(())
}
