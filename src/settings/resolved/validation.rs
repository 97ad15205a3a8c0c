use super::{ConfigError, ConfigSources, ResolvedConfig};

/// Narrowest card width that still fits a title next to the live badge.
const MIN_WIDTH: usize = 20;

pub(super) fn validate(
	config: &ResolvedConfig,
	sources: &ConfigSources,
) -> Result<(), ConfigError> {
	if config.sync.quiet_period.is_zero() {
		return Err(ConfigError::invalid(
			"sync.debounce_ms",
			"0",
			sources.source_for_debounce(),
			"must be greater than zero",
		));
	}

	let codec = &config.sync.codec;
	if codec.array_limit == 0 {
		return Err(ConfigError::invalid(
			"sync.array_limit",
			"0",
			sources.source_for_array_limit(),
			"must be at least 1",
		));
	}

	if codec.depth == 0 {
		return Err(ConfigError::invalid(
			"sync.depth",
			"0",
			sources.source_for_depth(),
			"must be at least 1",
		));
	}

	if config.display.width < MIN_WIDTH {
		return Err(ConfigError::invalid(
			"display.width",
			config.display.width.to_string(),
			sources.source_for_width(),
			format!("must be at least {MIN_WIDTH}"),
		));
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	use std::time::Duration;

	use talksearch::{DisplayOptions, SyncOptions};
	use url::Url;

	use super::super::SettingSource;
	use super::*;

	fn config() -> ResolvedConfig {
		ResolvedConfig {
			sync: SyncOptions::default(),
			location: Url::parse("https://localhost/").expect("url"),
			display: DisplayOptions::default(),
		}
	}

	#[test]
	fn defaults_pass() {
		assert!(validate(&config(), &ConfigSources::default()).is_ok());
	}

	#[test]
	fn validation_rejects_zero_debounce() {
		let mut config = config();
		config.sync.quiet_period = Duration::ZERO;
		let sources = ConfigSources {
			sync_debounce_ms: Some(SettingSource::CliFlag("--debounce-ms")),
			..ConfigSources::default()
		};

		let err = validate(&config, &sources).unwrap_err();
		assert!(matches!(err.key, "sync.debounce_ms"));
		let message = err.to_string();
		assert!(message.contains("value: 0"));
		assert!(message.contains("CLI flag"));
	}

	#[test]
	fn validation_rejects_zero_depth() {
		let mut config = config();
		config.sync.codec.depth = 0;
		let sources = ConfigSources {
			sync_depth: Some(SettingSource::Environment("TALKSEARCH__SYNC__DEPTH")),
			..ConfigSources::default()
		};

		let err = validate(&config, &sources).unwrap_err();
		assert!(matches!(err.key, "sync.depth"));
		assert!(err.to_string().contains("environment variable"));
	}

	#[test]
	fn validation_rejects_narrow_cards() {
		let mut config = config();
		config.display.width = 12;

		let err = validate(&config, &ConfigSources::default()).unwrap_err();
		assert!(matches!(err.key, "display.width"));
		let message = err.to_string();
		assert!(message.contains("value: 12"));
		assert!(message.contains("configuration key `display.width`"));
	}
}
