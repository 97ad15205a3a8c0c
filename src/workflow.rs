use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow, bail};
use chrono::{DateTime, Utc};
use talksearch::facets::{Facet, FacetPanel, panel, with_default_days};
use talksearch::sync::replay::{self, ReplayWrite};
use talksearch::sync::url_for_query;
use talksearch::talk::{Talk, parse_talks};
use talksearch::{MemoryHistory, SearchState, TalkCard, UrlSync};
use tracing::info;
use url::Url;

use crate::cli::Command;
use crate::settings::ResolvedConfig;

/// A search state together with its canonical encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct StateReport {
	pub(crate) state: SearchState,
	pub(crate) query_string: String,
	pub(crate) url: Url,
}

impl StateReport {
	fn new(state: SearchState, location: &Url) -> Self {
		let query_string = UrlSync::<MemoryHistory>::encode_state_for_history(&state);
		let url = url_for_query(location, &query_string);
		Self {
			state,
			query_string,
			url,
		}
	}
}

/// What a command produced, ready for printing.
#[derive(Debug)]
pub(crate) enum Outcome {
	State(StateReport),
	Replay(Vec<ReplayWrite>),
	Cards { cards: Vec<TalkCard>, width: usize },
	Facets(Vec<FacetPanel>),
}

/// Runs one CLI command against the resolved configuration.
pub(crate) struct Workflow {
	config: ResolvedConfig,
}

impl Workflow {
	pub(crate) fn from_config(config: ResolvedConfig) -> Self {
		Self { config }
	}

	pub(crate) fn run(self, command: Command) -> Result<Outcome> {
		match command {
			Command::Decode { query } => Ok(self.decode(&query)),
			Command::Encode {
				query,
				page,
				refine,
				menu,
				default_days,
			} => self.encode(query, page, &refine, &menu, default_days),
			Command::Replay { file } => self.replay(&file),
			Command::Cards { file, now } => self.cards(&file, now.as_deref()),
			Command::Facets {
				file,
				state,
				search,
				all,
			} => self.facets(&file, state.as_deref(), search.as_deref(), all),
		}
	}

	fn decode(&self, raw: &str) -> Outcome {
		let state = UrlSync::<MemoryHistory>::decode_initial_state(raw, &self.config.sync);
		Outcome::State(StateReport::new(state, &self.config.location))
	}

	fn encode(
		&self,
		query: Option<String>,
		page: Option<u32>,
		refine: &[String],
		menu: &[String],
		default_days: bool,
	) -> Result<Outcome> {
		let mut state = SearchState::new();
		if let Some(query) = query {
			state = state.with_query(query);
		}

		let mut refinements: BTreeMap<String, Vec<String>> = BTreeMap::new();
		for pair in refine {
			let (facet, value) = split_pair(pair, "--refine")?;
			let values = refinements.entry(facet.to_string()).or_default();
			if !values.iter().any(|existing| existing == value) {
				values.push(value.to_string());
			}
		}
		for (facet, values) in refinements {
			state = state.with_refinements(facet, values);
		}

		for pair in menu {
			let (attribute, value) = split_pair(pair, "--menu")?;
			state = state.with_menu(attribute, Some(value.to_string()));
		}

		if default_days {
			state = with_default_days(state);
		}
		if let Some(page) = page {
			state = state.with_page(page);
		}

		Ok(Outcome::State(StateReport::new(state, &self.config.location)))
	}

	fn replay(&self, path: &Path) -> Result<Outcome> {
		let script = fs::read_to_string(path)
			.with_context(|| format!("failed to read replay script {}", path.display()))?;
		let events = replay::parse_script(&script, &self.config.sync.codec)
			.with_context(|| format!("invalid replay script {}", path.display()))?;
		info!(events = events.len(), "replaying state changes");

		let writes = replay::replay(self.config.location.clone(), self.config.sync, &events);
		Ok(Outcome::Replay(writes))
	}

	fn cards(&self, path: &Path, now: Option<&str>) -> Result<Outcome> {
		let now = match now {
			Some(raw) => parse_moment(raw)?,
			None => Utc::now(),
		};
		let talks = read_talks(path)?;
		info!(talks = talks.len(), "rendering talk cards");

		let display = &self.config.display;
		let cards = talks
			.iter()
			.map(|talk| TalkCard::new(talk, now, display))
			.collect();
		Ok(Outcome::Cards {
			cards,
			width: display.width,
		})
	}

	fn facets(&self, path: &Path, state: Option<&str>, search: Option<&str>, all: bool) -> Result<Outcome> {
		let talks = read_talks(path)?;
		let state = match state {
			Some(raw) => UrlSync::<MemoryHistory>::decode_initial_state(raw, &self.config.sync),
			None => with_default_days(SearchState::new()),
		};
		info!(talks = talks.len(), "summarising facets");

		let panels = Facet::ALL
			.into_iter()
			.map(|facet| panel(facet, &talks, &state, search, all))
			.collect();
		Ok(Outcome::Facets(panels))
	}
}

fn read_talks(path: &Path) -> Result<Vec<Talk>> {
	let json = fs::read_to_string(path)
		.with_context(|| format!("failed to read talks {}", path.display()))?;
	parse_talks(&json).with_context(|| format!("invalid talks in {}", path.display()))
}

fn split_pair<'a>(pair: &'a str, flag: &str) -> Result<(&'a str, &'a str)> {
	match pair.split_once('=') {
		Some((key, value)) if !key.is_empty() => Ok((key, value)),
		_ => bail!("{flag} expects NAME=VALUE, got `{pair}`"),
	}
}

fn parse_moment(raw: &str) -> Result<DateTime<Utc>> {
	DateTime::parse_from_rfc3339(raw)
		.map(|moment| moment.with_timezone(&Utc))
		.map_err(|err| anyhow!("invalid --now `{raw}`: {err}"))
}

#[cfg(test)]
mod tests {
	use std::path::PathBuf;
	use std::time::Duration;

	use chrono::TimeZone;
	use talksearch::{DisplayOptions, SyncOptions};

	use super::*;

	fn workflow() -> Workflow {
		Workflow::from_config(ResolvedConfig {
			sync: SyncOptions::default(),
			location: Url::parse("https://search.example.org/").expect("url"),
			display: DisplayOptions::default(),
		})
	}

	fn encode(refine: &[&str], menu: &[&str], page: Option<u32>, default_days: bool) -> Result<Outcome> {
		let refine: Vec<String> = refine.iter().map(|pair| pair.to_string()).collect();
		let menu: Vec<String> = menu.iter().map(|pair| pair.to_string()).collect();
		workflow().run(Command::Encode {
			query: Some("rust".into()),
			page,
			refine,
			menu,
			default_days,
		})
	}

	fn report(outcome: Outcome) -> StateReport {
		match outcome {
			Outcome::State(report) => report,
			other => panic!("unexpected outcome {other:?}"),
		}
	}

	#[test]
	fn decode_reports_canonical_form() {
		let outcome = workflow()
			.run(Command::Decode {
				query: "?refinementList[track][]=Rust&query=async".into(),
			})
			.expect("decode");
		let report = report(outcome);

		assert_eq!(report.state.query.as_deref(), Some("async"));
		assert_eq!(report.state.refinements("track"), ["Rust"]);
		assert_eq!(report.query_string, "query=async&refinementList%5Btrack%5D%5B0%5D=Rust");
		assert_eq!(
			report.url.as_str(),
			"https://search.example.org/?query=async&refinementList%5Btrack%5D%5B0%5D=Rust"
		);
	}

	#[test]
	fn encode_groups_refinements_and_keeps_page() {
		let report = report(
			encode(&["track=Rust", "track=Go", "track=Rust"], &["room=H.2215"], Some(3), true)
				.expect("encode"),
		);

		assert_eq!(report.state.refinements("track"), ["Rust", "Go"]);
		assert_eq!(report.state.refinements("day"), ["Saturday", "Sunday"]);
		assert_eq!(report.state.menu.get("room").map(String::as_str), Some("H.2215"));
		assert_eq!(report.state.page, Some(3));
	}

	#[test]
	fn encode_rejects_pairs_without_a_name() {
		let err = encode(&["Rust"], &[], None, false).expect_err("missing name");
		assert!(err.to_string().contains("--refine"));
		assert!(encode(&[], &["=x"], None, false).is_err());
	}

	#[test]
	fn replay_reads_the_script() {
		let dir = tempfile::tempdir().expect("tempdir");
		let path = dir.path().join("typing.txt");
		fs::write(&path, "# typing\n0 query=r\n100 query=ru\n200 query=rust\n").expect("write");

		match workflow().run(Command::Replay { file: path }).expect("replay") {
			Outcome::Replay(writes) => {
				assert_eq!(writes.len(), 1);
				assert_eq!(writes[0].offset, Duration::from_millis(600));
				assert_eq!(writes[0].entry.url.as_str(), "https://search.example.org/?query=rust");
			}
			other => panic!("unexpected outcome {other:?}"),
		}
	}

	#[test]
	fn missing_replay_script_names_the_path() {
		let err = workflow()
			.run(Command::Replay {
				file: PathBuf::from("/nonexistent/typing.txt"),
			})
			.expect_err("missing file");
		assert!(err.to_string().contains("/nonexistent/typing.txt"));
	}

	const TALKS: &str = r#"[
		{"hierarchy": {"lvl0": "Async Rust"}, "track": "Rust", "room": "H.2215", "day": "Saturday",
		 "speaker": "Ana", "start": 1580547600000, "end": 1580550600000},
		{"hierarchy": {"lvl0": "Go generics"}, "track": "Go", "room": "AW1.120", "day": "Sunday",
		 "speaker": "Ben", "start": 1580634000000, "end": 1580637000000}
	]"#;

	#[test]
	fn facets_default_to_both_days_selected() {
		let dir = tempfile::tempdir().expect("tempdir");
		let path = dir.path().join("talks.json");
		fs::write(&path, TALKS).expect("write");

		let outcome = workflow()
			.run(Command::Facets {
				file: path,
				state: None,
				search: Some("ru".into()),
				all: false,
			})
			.expect("facets");
		let panels = match outcome {
			Outcome::Facets(panels) => panels,
			other => panic!("unexpected outcome {other:?}"),
		};

		assert_eq!(panels.len(), 4);
		assert_eq!(panels[0].attribute, "day");
		assert!(panels[0].items.iter().all(|item| item.is_refined));
		let tracks: Vec<&str> = panels[1].items.iter().map(|item| item.label.as_str()).collect();
		assert_eq!(tracks, ["Rust"]);
		assert_eq!(panels[2].items.len(), 2);
	}

	#[test]
	fn invalid_now_is_rejected() {
		assert!(parse_moment("yesterday").is_err());
		assert_eq!(
			parse_moment("2020-02-01T10:10:00+01:00").expect("moment"),
			Utc.with_ymd_and_hms(2020, 2, 1, 9, 10, 0).single().expect("utc")
		);
	}
}
