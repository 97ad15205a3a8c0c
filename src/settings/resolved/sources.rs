use std::fmt;

#[derive(Debug, Clone)]
pub(crate) enum SettingSource {
	CliFlag(&'static str),
	Environment(&'static str),
	ConfigKey(&'static str),
}

impl fmt::Display for SettingSource {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::CliFlag(flag) => write!(f, "CLI flag `{flag}`"),
			Self::Environment(var) => write!(f, "environment variable `{var}`"),
			Self::ConfigKey(key) => write!(f, "configuration key `{key}`"),
		}
	}
}

/// Where each validated setting came from, when it was set at all.
#[derive(Debug, Default, Clone)]
pub(crate) struct ConfigSources {
	pub(crate) sync_debounce_ms: Option<SettingSource>,
	pub(crate) sync_array_limit: Option<SettingSource>,
	pub(crate) sync_depth: Option<SettingSource>,
	pub(crate) sync_location: Option<SettingSource>,
	pub(crate) display_utc_offset: Option<SettingSource>,
	pub(crate) display_width: Option<SettingSource>,
}

impl ConfigSources {
	pub(crate) fn source_for_debounce(&self) -> SettingSource {
		Self::or_key(&self.sync_debounce_ms, "sync.debounce_ms")
	}

	pub(crate) fn source_for_array_limit(&self) -> SettingSource {
		Self::or_key(&self.sync_array_limit, "sync.array_limit")
	}

	pub(crate) fn source_for_depth(&self) -> SettingSource {
		Self::or_key(&self.sync_depth, "sync.depth")
	}

	pub(crate) fn source_for_location(&self) -> SettingSource {
		Self::or_key(&self.sync_location, "sync.location")
	}

	pub(crate) fn source_for_utc_offset(&self) -> SettingSource {
		Self::or_key(&self.display_utc_offset, "display.utc_offset_minutes")
	}

	pub(crate) fn source_for_width(&self) -> SettingSource {
		Self::or_key(&self.display_width, "display.width")
	}

	fn or_key(source: &Option<SettingSource>, key: &'static str) -> SettingSource {
		source.clone().unwrap_or(SettingSource::ConfigKey(key))
	}
}
