//! Diagnostic logging on stderr
//!
//! The readiness report goes to stdout; tracing output stays on stderr so
//! `--json` output remains parseable.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Default filter directive for a `-v` count
pub fn default_directive(verbosity: u8) -> &'static str {
  match verbosity {
    0 => "warn",
    1 => "info",
    2 => "debug",
    _ => "trace",
  }
}

/// Install the global subscriber
///
/// `RUST_LOG` wins over the verbosity flag. Installing twice is a no-op.
pub fn init_logging(verbosity: u8) {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

  let subscriber = tracing_subscriber::registry().with(filter).with(
    fmt::layer()
      .with_writer(std::io::stderr)
      .with_target(false)
      .with_level(true),
  );

  if subscriber.try_init().is_err() {
    tracing::debug!("global tracing subscriber already installed");
  }
}
