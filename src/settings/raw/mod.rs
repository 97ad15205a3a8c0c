use std::env;

use anyhow::{Error, Result};
use serde::Deserialize;

use crate::cli::CliArgs;

use super::resolved::{ConfigSources, ResolvedConfig, SettingSource};

mod display;
mod sync;

use display::DisplaySection;
use sync::SyncSection;

/// Mirror of the configuration file representation before CLI overrides and
/// validation are applied.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct RawConfig {
	sync: SyncSection,
	display: DisplaySection,
}

impl RawConfig {
	/// Apply CLI overrides on top of the raw configuration values.
	pub(super) fn apply_cli_overrides(&mut self, cli: &CliArgs) {
		self.sync.apply_cli_overrides(cli);
		self.display.apply_cli_overrides(cli);
	}

	/// Convert the raw configuration into a [`ResolvedConfig`], validating and
	/// filling defaults where required.
	pub(super) fn resolve(self, cli: &CliArgs) -> Result<ResolvedConfig> {
		let sources = ConfigSources {
			sync_debounce_ms: detect_source(
				cli.debounce_ms.is_some(),
				self.sync.debounce_ms.is_some(),
				"TALKSEARCH__SYNC__DEBOUNCE_MS",
				"--debounce-ms",
				"sync.debounce_ms",
			),
			sync_array_limit: detect_source(
				cli.array_limit.is_some(),
				self.sync.array_limit.is_some(),
				"TALKSEARCH__SYNC__ARRAY_LIMIT",
				"--array-limit",
				"sync.array_limit",
			),
			sync_depth: detect_source(
				cli.depth.is_some(),
				self.sync.depth.is_some(),
				"TALKSEARCH__SYNC__DEPTH",
				"--depth",
				"sync.depth",
			),
			sync_location: detect_source(
				cli.location.is_some(),
				self.sync.location.is_some(),
				"TALKSEARCH__SYNC__LOCATION",
				"--location",
				"sync.location",
			),
			display_utc_offset: detect_source(
				cli.utc_offset_minutes.is_some(),
				self.display.utc_offset_minutes.is_some(),
				"TALKSEARCH__DISPLAY__UTC_OFFSET_MINUTES",
				"--utc-offset-minutes",
				"display.utc_offset_minutes",
			),
			display_width: detect_source(
				cli.width.is_some(),
				self.display.width.is_some(),
				"TALKSEARCH__DISPLAY__WIDTH",
				"--width",
				"display.width",
			),
		};

		let (sync, location) = self.sync.resolve(&sources).map_err(Error::new)?;
		let display = self.display.resolve(&sources).map_err(Error::new)?;

		let config = ResolvedConfig {
			sync,
			location,
			display,
		};

		config.validate(&sources).map_err(Error::new)?;

		Ok(config)
	}
}

fn detect_source(
	cli_present: bool,
	value_present: bool,
	env_var: &'static str,
	cli_flag: &'static str,
	key: &'static str,
) -> Option<SettingSource> {
	if !value_present {
		return None;
	}

	if cli_present {
		return Some(SettingSource::CliFlag(cli_flag));
	}

	if env::var_os(env_var).is_some() {
		return Some(SettingSource::Environment(env_var));
	}

	Some(SettingSource::ConfigKey(key))
}

#[cfg(test)]
mod tests;
