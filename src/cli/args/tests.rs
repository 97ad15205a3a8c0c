use std::path::PathBuf;

use clap::{CommandFactory, Parser};

use super::{CliArgs, Command, OutputFormat};

#[test]
fn command_definition_is_consistent() {
	CliArgs::command().debug_assert();
}

#[test]
fn global_flags_follow_the_subcommand() {
	let cli = CliArgs::parse_from([
		"talksearch",
		"replay",
		"typing.txt",
		"--debounce-ms",
		"250",
		"-o",
		"json",
		"-vv",
	]);

	assert_eq!(cli.command, Command::Replay {
		file: PathBuf::from("typing.txt"),
	});
	assert_eq!(cli.debounce_ms, Some(250));
	assert_eq!(cli.output, OutputFormat::Json);
	assert_eq!(cli.verbose, 2);
}

#[test]
fn encode_collects_repeated_refinements() {
	let cli = CliArgs::parse_from([
		"talksearch",
		"encode",
		"-q",
		"rust",
		"-r",
		"track=Rust",
		"-r",
		"room=H.2215",
		"--default-days",
	]);

	match cli.command {
		Command::Encode {
			query,
			refine,
			default_days,
			..
		} => {
			assert_eq!(query.as_deref(), Some("rust"));
			assert_eq!(refine, vec!["track=Rust", "room=H.2215"]);
			assert!(default_days);
		}
		other => panic!("unexpected command {other:?}"),
	}
	assert_eq!(cli.output, OutputFormat::Plain);
}

#[test]
fn negative_offsets_are_accepted() {
	let cli = CliArgs::parse_from(["talksearch", "--utc-offset-minutes", "-300", "decode", "?page=2"]);
	assert_eq!(cli.utc_offset_minutes, Some(-300));
}
