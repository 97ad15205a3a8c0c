use super::ResolvedConfig;

pub(super) fn print_summary(config: &ResolvedConfig) {
	for line in summary_lines(config) {
		println!("{line}");
	}
}

fn summary_lines(config: &ResolvedConfig) -> Vec<String> {
	let codec = &config.sync.codec;
	let display = &config.display;
	vec![
		"Effective configuration:".to_string(),
		format!("  Location: {}", config.location),
		format!("  Debounce: {} ms", config.sync.quiet_period.as_millis()),
		format!("  Array limit: {}", codec.array_limit),
		format!("  Key depth: {}", codec.depth),
		format!("  Parameter limit: {}", codec.parameter_limit),
		format!("  UTC offset: {}", display.offset),
		format!("  Snippet words: {}", display.snippet_words),
		format!("  Card width: {}", display.width),
		format!("  Profile base: {}", display.profile_base),
		format!("  Avatar base: {}", display.avatar_base),
	]
}

#[cfg(test)]
mod tests {
	use std::time::Duration;

	use talksearch::{DisplayOptions, SyncOptions};
	use url::Url;

	use super::*;

	fn config() -> ResolvedConfig {
		ResolvedConfig {
			sync: SyncOptions {
				quiet_period: Duration::from_millis(250),
				..SyncOptions::default()
			},
			location: Url::parse("https://localhost/").expect("url"),
			display: DisplayOptions::default(),
		}
	}

	#[test]
	fn summary_lists_effective_values() {
		let lines = summary_lines(&config());
		assert_eq!(lines[0], "Effective configuration:");
		assert!(lines.contains(&"  Debounce: 250 ms".to_string()));
		assert!(lines.contains(&"  UTC offset: +01:00".to_string()));
		assert!(lines.contains(&"  Location: https://localhost/".to_string()));
	}

	#[test]
	fn summary_prints_without_panic() {
		print_summary(&config());
	}
}
