//! Tracing setup for the `talksearch` binary.
//!
//! Library code only emits `tracing` events; installing a subscriber is left
//! to the binary so embedders keep control of their own output.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Environment variable holding an `EnvFilter` directive that overrides the
/// verbosity chosen on the command line.
pub const LOG_ENV: &str = "TALKSEARCH_LOG";

/// Map a `-v` count onto a level; warnings are always shown.
pub fn level_for_verbosity(verbosity: u8) -> LevelFilter {
	match verbosity {
		0 => LevelFilter::WARN,
		1 => LevelFilter::INFO,
		2 => LevelFilter::DEBUG,
		_ => LevelFilter::TRACE,
	}
}

/// Install a stderr subscriber. Returns `false` when one was already set.
pub fn initialize(default_level: LevelFilter) -> bool {
	let filter = EnvFilter::builder()
		.with_default_directive(default_level.into())
		.with_env_var(LOG_ENV)
		.from_env_lossy();

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_target(false)
		.try_init()
		.is_ok()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn verbosity_levels_increase() {
		assert_eq!(level_for_verbosity(0), LevelFilter::WARN);
		assert_eq!(level_for_verbosity(2), LevelFilter::DEBUG);
		assert_eq!(level_for_verbosity(9), LevelFilter::TRACE);
	}

	#[test]
	fn second_initialization_is_refused() {
		initialize(LevelFilter::WARN);
		assert!(!initialize(LevelFilter::WARN));
	}
}
