use std::path::PathBuf;

use clap::{ArgAction, ColorChoice, Parser, Subcommand};

use super::options::OutputFormat;
use super::styles::{cli_styles, long_version};

/// Command-line arguments accepted by the `talksearch` binary.
#[derive(Parser, Debug)]
#[command(
	name = "talksearch",
	version,
	long_version = long_version(),
	about = "Conference schedule search: URL state, history sync and talk cards",
	color = ColorChoice::Auto,
	styles = cli_styles()
)]
pub(crate) struct CliArgs {
	#[command(subcommand)]
	pub(crate) command: Command,
	#[arg(
		short,
		long = "config",
		value_name = "FILE",
		env = "TALKSEARCH_CONFIG",
		action = ArgAction::Append,
		global = true,
		help = "Additional configuration file to merge (default: none)"
	)]
	pub(crate) config: Vec<PathBuf>,
	#[arg(
		short = 'n',
		long = "no-config",
		global = true,
		help = "Skip loading default configuration files (default: disabled)"
	)]
	pub(crate) no_config: bool,
	#[arg(
		long = "debounce-ms",
		value_name = "MS",
		global = true,
		help = "Quiet period before a state change reaches history (default: 400)"
	)]
	pub(crate) debounce_ms: Option<u64>,
	#[arg(
		long = "array-limit",
		value_name = "NUM",
		global = true,
		help = "Maximum values kept per facet when decoding (default: 100)"
	)]
	pub(crate) array_limit: Option<usize>,
	#[arg(
		long,
		value_name = "NUM",
		global = true,
		help = "Maximum bracketed key segments followed when decoding (default: 5)"
	)]
	pub(crate) depth: Option<usize>,
	#[arg(
		long,
		value_name = "URL",
		global = true,
		help = "Page location history entries are built on (default: https://localhost/)"
	)]
	pub(crate) location: Option<String>,
	#[arg(
		long = "utc-offset-minutes",
		value_name = "MINUTES",
		allow_hyphen_values = true,
		global = true,
		help = "Venue offset from UTC used for start times (default: 60)"
	)]
	pub(crate) utc_offset_minutes: Option<i32>,
	#[arg(
		long = "snippet-words",
		value_name = "NUM",
		global = true,
		help = "Words kept from talk descriptions (default: 50)"
	)]
	pub(crate) snippet_words: Option<usize>,
	#[arg(
		short = 'w',
		long,
		value_name = "COLUMNS",
		global = true,
		help = "Maximum width of rendered card lines (default: 80)"
	)]
	pub(crate) width: Option<usize>,
	#[arg(
		short = 'p',
		long = "print-config",
		global = true,
		help = "Print the resolved configuration before running (default: disabled)"
	)]
	pub(crate) print_config: bool,
	#[arg(
		short = 'v',
		long = "verbose",
		action = ArgAction::Count,
		global = true,
		help = "Increase log verbosity; repeat for more detail (default: warnings only)"
	)]
	pub(crate) verbose: u8,
	#[arg(
		short = 'o',
		long = "output",
		value_enum,
		default_value_t = OutputFormat::Plain,
		global = true,
		help = "Choose how to print the result"
	)]
	pub(crate) output: OutputFormat,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub(crate) enum Command {
	/// Decode an address-bar query string into search state
	Decode {
		/// Raw query string, with or without the leading `?`
		#[arg(allow_hyphen_values = true)]
		query: String,
	},

	/// Build the canonical query string and URL for a search state
	Encode {
		/// Free-text query
		#[arg(short, long)]
		query: Option<String>,

		/// Result page
		#[arg(long)]
		page: Option<u32>,

		/// Facet refinement as `facet=value`; repeat to select several
		#[arg(short, long = "refine", value_name = "FACET=VALUE")]
		refine: Vec<String>,

		/// Single-value menu selection as `attribute=value`
		#[arg(short, long = "menu", value_name = "ATTRIBUTE=VALUE")]
		menu: Vec<String>,

		/// Select the default conference days when no day is refined
		#[arg(long)]
		default_days: bool,
	},

	/// Feed a timed script of state changes through the debounced history writer
	Replay {
		/// Script with one `<offset_ms> <query-string>` per line
		file: PathBuf,
	},

	/// Summarise facet panels over a JSON export of search hits
	Facets {
		/// JSON array of talk records
		file: PathBuf,

		/// Query string whose refinements are marked as selected
		#[arg(long, value_name = "QUERY", allow_hyphen_values = true)]
		state: Option<String>,

		/// Filter values of the searchable panels (track, speaker)
		#[arg(short, long, value_name = "TEXT")]
		search: Option<String>,

		/// Show up to the "show more" limit instead of the collapsed list
		#[arg(short, long)]
		all: bool,
	},

	/// Render talk cards from a JSON export of search hits
	Cards {
		/// JSON array of talk records
		file: PathBuf,

		/// Moment used for live badges, RFC 3339 (default: now)
		#[arg(long, value_name = "TIME")]
		now: Option<String>,
	},
}
