use std::time::Duration;

use clap::Parser;

use super::RawConfig;
use crate::cli::CliArgs;

#[test]
fn cli_overrides_take_precedence() {
	let cli = CliArgs::parse_from([
		"talksearch",
		"--debounce-ms",
		"120",
		"--array-limit",
		"20",
		"--depth",
		"3",
		"--location",
		"https://fosdem.example.org/schedule",
		"--utc-offset-minutes",
		"0",
		"--snippet-words",
		"12",
		"--width",
		"60",
		"decode",
		"",
	]);

	let mut config = RawConfig::default();
	config.sync.debounce_ms = Some(900);
	config.display.width = Some(100);
	config.apply_cli_overrides(&cli);

	assert_eq!(config.sync.debounce_ms, Some(120));
	assert_eq!(config.sync.array_limit, Some(20));
	assert_eq!(config.sync.depth, Some(3));
	assert_eq!(config.sync.location, cli.location);
	assert_eq!(config.display.utc_offset_minutes, Some(0));
	assert_eq!(config.display.snippet_words, Some(12));
	assert_eq!(config.display.width, Some(60));
}

#[test]
fn empty_config_resolves_to_defaults() {
	let cli = CliArgs::parse_from(["talksearch", "decode", ""]);
	let resolved = RawConfig::default().resolve(&cli).expect("resolve");

	assert_eq!(resolved.sync.quiet_period, Duration::from_millis(400));
	assert_eq!(resolved.sync.codec.array_limit, 100);
	assert_eq!(resolved.sync.codec.depth, 5);
	assert_eq!(resolved.sync.codec.parameter_limit, 1000);
	assert_eq!(resolved.location.as_str(), "https://localhost/");
	assert_eq!(resolved.display.offset.local_minus_utc(), 3600);
	assert_eq!(resolved.display.snippet_words, 50);
	assert_eq!(resolved.display.width, 80);
}

#[test]
fn unparsable_location_names_its_flag() {
	let cli = CliArgs::parse_from(["talksearch", "--location", "not a url", "decode", ""]);
	let mut config = RawConfig::default();
	config.apply_cli_overrides(&cli);

	let message = config.resolve(&cli).expect_err("bad location").to_string();
	assert!(message.contains("sync.location"));
	assert!(message.contains("--location"));
	assert!(message.contains("not a url"));
}

#[test]
fn offset_beyond_a_day_is_rejected() {
	let cli = CliArgs::parse_from(["talksearch", "--utc-offset-minutes", "1440", "decode", ""]);
	let mut config = RawConfig::default();
	config.apply_cli_overrides(&cli);

	let message = config.resolve(&cli).expect_err("bad offset").to_string();
	assert!(message.contains("display.utc_offset_minutes"));
}

#[test]
fn negative_offsets_resolve() {
	let cli = CliArgs::parse_from(["talksearch", "--utc-offset-minutes", "-300", "decode", ""]);
	let mut config = RawConfig::default();
	config.apply_cli_overrides(&cli);

	let resolved = config.resolve(&cli).expect("resolve");
	assert_eq!(resolved.display.offset.local_minus_utc(), -18_000);
}

#[test]
fn sections_deserialize_from_toml() {
	let raw: RawConfig = config::Config::builder()
		.add_source(config::File::from_str(
			"[sync]\nparameter_limit = 10\n\n[display]\nprofile_base = \"https://example.org/\"\n",
			config::FileFormat::Toml,
		))
		.build()
		.expect("build")
		.try_deserialize()
		.expect("deserialize");

	assert_eq!(raw.sync.parameter_limit, Some(10));
	assert_eq!(raw.display.profile_base.as_deref(), Some("https://example.org/"));
	assert_eq!(raw.sync.debounce_ms, None);
}
