use std::time::Duration;

use serde::Deserialize;
use talksearch::query::CodecOptions;
use talksearch::{SyncOptions, parse_location};
use url::Url;

use crate::cli::CliArgs;

use super::super::resolved::{ConfigError, ConfigSources};

/// Page location assumed when none is configured.
pub(super) const DEFAULT_LOCATION: &str = "https://localhost/";

/// History synchronisation options as they are read from disk.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct SyncSection {
	pub(super) debounce_ms: Option<u64>,
	pub(super) array_limit: Option<usize>,
	pub(super) depth: Option<usize>,
	pub(super) parameter_limit: Option<usize>,
	pub(super) location: Option<String>,
}

impl SyncSection {
	pub(super) fn apply_cli_overrides(&mut self, cli: &CliArgs) {
		if let Some(value) = cli.debounce_ms {
			self.debounce_ms = Some(value);
		}
		if let Some(value) = cli.array_limit {
			self.array_limit = Some(value);
		}
		if let Some(value) = cli.depth {
			self.depth = Some(value);
		}
		if let Some(value) = &cli.location {
			self.location = Some(value.clone());
		}
	}

	pub(super) fn resolve(self, sources: &ConfigSources) -> Result<(SyncOptions, Url), ConfigError> {
		let defaults = SyncOptions::default();
		let mut codec = CodecOptions::default();
		if let Some(limit) = self.array_limit {
			codec = codec.with_array_limit(limit);
		}
		if let Some(depth) = self.depth {
			codec = codec.with_depth(depth);
		}
		if let Some(limit) = self.parameter_limit {
			codec = codec.with_parameter_limit(limit);
		}

		let quiet_period = self
			.debounce_ms
			.map(Duration::from_millis)
			.unwrap_or(defaults.quiet_period);

		let raw_location = self.location.unwrap_or_else(|| DEFAULT_LOCATION.to_string());
		let location = parse_location(&raw_location).map_err(|err| {
			ConfigError::invalid(
				"sync.location",
				raw_location.clone(),
				sources.source_for_location(),
				err.to_string(),
			)
		})?;

		Ok((SyncOptions { quiet_period, codec }, location))
	}
}
