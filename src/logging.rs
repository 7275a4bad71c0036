//! Log output for the command-line front-end.
//!
//! The library logs through the `log` facade; [`initialize`] installs a
//! `tracing-subscriber` formatter on stderr that also picks up those records.

use anyhow::{Result, anyhow};
use tracing_subscriber::EnvFilter;

/// Environment variable holding an explicit filter such as `screencat=debug`.
pub const LOG_ENV: &str = "SCREENCAT_LOG";

/// Map `-v` repetitions onto a default filter directive.
#[must_use]
pub fn default_directive(verbosity: u8) -> &'static str {
	match verbosity {
		0 => "warn",
		1 => "info",
		2 => "debug",
		_ => "trace",
	}
}

/// Install the global subscriber. `SCREENCAT_LOG` takes precedence over
/// `verbosity` when set.
pub fn initialize(verbosity: u8) -> Result<()> {
	let filter = EnvFilter::try_from_env(LOG_ENV)
		.unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_target(false)
		.try_init()
		.map_err(|err| anyhow!("failed to initialize logging: {err}"))
}
