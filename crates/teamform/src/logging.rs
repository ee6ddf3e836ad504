//! Tracing setup for the `teamform` binary.
//!
//! Events are emitted under the `teamform` target: row additions and
//! removals at debug, refused edits at warn, submissions at info. They are
//! written to stderr because stdout carries the rendered form.

use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Verbosity level for logging output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Suppress all output except errors.
    Quiet,
    /// Normal output level (info and above).
    #[default]
    Normal,
    /// Verbose output (debug and above).
    Verbose,
    /// Very verbose output (trace level).
    Trace,
}

impl Verbosity {
    /// Convert verbosity to tracing level filter.
    #[must_use]
    pub fn to_level_filter(&self) -> Level {
        match self {
            Self::Quiet => Level::ERROR,
            Self::Normal => Level::INFO,
            Self::Verbose => Level::DEBUG,
            Self::Trace => Level::TRACE,
        }
    }
}

/// Filter directive applied when `RUST_LOG` is unset.
#[must_use]
pub fn default_directive(verbosity: Verbosity) -> String {
    format!("teamform={}", verbosity.to_level_filter())
}

/// Install the global subscriber for a CLI run.
///
/// `-q`/`-v`/`-vv` pick the `teamform` level through `verbosity`. A set
/// `RUST_LOG` replaces that directive entirely. Calling this again after a
/// subscriber is installed does nothing.
///
/// # Examples
///
/// ```no_run
/// use teamform::{init_logging, logging::Verbosity};
///
/// init_logging(Verbosity::Verbose);
/// ```
pub fn init_logging(verbosity: Verbosity) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false),
        );

    let _ = subscriber.try_init();
}

/// Route warnings to the test harness's captured output.
#[cfg(test)]
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("warn")
        .with_test_writer()
        .try_init();
}
