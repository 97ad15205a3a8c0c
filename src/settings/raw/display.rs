use chrono::FixedOffset;
use serde::Deserialize;
use talksearch::DisplayOptions;

use crate::cli::CliArgs;

use super::super::resolved::{ConfigError, ConfigSources};

/// Talk card presentation options as they are read from disk.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct DisplaySection {
	pub(super) utc_offset_minutes: Option<i32>,
	pub(super) snippet_words: Option<usize>,
	pub(super) width: Option<usize>,
	pub(super) profile_base: Option<String>,
	pub(super) avatar_base: Option<String>,
}

impl DisplaySection {
	pub(super) fn apply_cli_overrides(&mut self, cli: &CliArgs) {
		if let Some(value) = cli.utc_offset_minutes {
			self.utc_offset_minutes = Some(value);
		}
		if let Some(value) = cli.snippet_words {
			self.snippet_words = Some(value);
		}
		if let Some(value) = cli.width {
			self.width = Some(value);
		}
	}

	pub(super) fn resolve(self, sources: &ConfigSources) -> Result<DisplayOptions, ConfigError> {
		let defaults = DisplayOptions::default();

		let offset = match self.utc_offset_minutes {
			Some(minutes) => minutes
				.checked_mul(60)
				.and_then(FixedOffset::east_opt)
				.ok_or_else(|| {
					ConfigError::invalid(
						"display.utc_offset_minutes",
						minutes.to_string(),
						sources.source_for_utc_offset(),
						"must be less than 24 hours either side of UTC",
					)
				})?,
			None => defaults.offset,
		};

		Ok(DisplayOptions {
			offset,
			snippet_words: self.snippet_words.unwrap_or(defaults.snippet_words),
			width: self.width.unwrap_or(defaults.width),
			profile_base: self.profile_base.unwrap_or(defaults.profile_base),
			avatar_base: self.avatar_base.unwrap_or(defaults.avatar_base),
		})
	}
}
