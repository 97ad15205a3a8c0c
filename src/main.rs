mod cli;
mod settings;
mod workflow;

use anyhow::Result;
use cli::{Command, OutputFormat, parse_cli, print_json, print_plain};
use settings::ResolvedConfig;
use talksearch::logging;
use workflow::Workflow;

fn main() -> Result<()> {
	let cli = parse_cli();
	logging::initialize(logging::level_for_verbosity(cli.verbose));

	let resolved = settings::load(&cli)?;

	if cli.print_config {
		resolved.print_summary();
	}

	run_command(cli.output, cli.command, resolved)
}

/// Execute one command and print its outcome in the chosen format.
fn run_command(format: OutputFormat, command: Command, settings: ResolvedConfig) -> Result<()> {
	let outcome = Workflow::from_config(settings).run(command)?;

	match format {
		OutputFormat::Plain => print_plain(&outcome),
		OutputFormat::Json => print_json(&outcome)?,
	}

	Ok(())
}
