use anyhow::Result;
use serde_json::{Value, json};
use talksearch::SearchState;
use talksearch::facets::{Facet, FacetPanel};
use talksearch::sync::replay::ReplayWrite;
use talksearch::sync::whole_millis;

use crate::workflow::{Outcome, StateReport};

/// Print a plain-text representation of a command outcome.
pub(crate) fn print_plain(outcome: &Outcome) {
	for line in plain_lines(outcome) {
		println!("{line}");
	}
}

fn plain_lines(outcome: &Outcome) -> Vec<String> {
	match outcome {
		Outcome::State(report) => state_lines(report),
		Outcome::Replay(writes) if writes.is_empty() => vec!["No history writes".to_string()],
		Outcome::Replay(writes) => writes
			.iter()
			.map(|write| format!("{:>6} ms  {}", write.offset.as_millis(), write.entry.url))
			.collect(),
		Outcome::Cards { cards, .. } if cards.is_empty() => vec!["No talks".to_string()],
		Outcome::Cards { cards, width } => {
			let mut lines = Vec::new();
			for (index, card) in cards.iter().enumerate() {
				if index > 0 {
					lines.push(String::new());
				}
				lines.extend(card.render(*width));
			}
			lines
		}
		Outcome::Facets(panels) => panels.iter().flat_map(panel_lines).collect(),
	}
}

fn panel_lines(panel: &FacetPanel) -> Vec<String> {
	let mut lines = vec![panel.header.to_string()];
	let facet = Facet::from_attribute(panel.attribute);
	for item in &panel.items {
		let label = match facet {
			Some(facet) => facet.label_for(&item.label),
			None => item.label.clone(),
		};
		let mark = if item.is_refined { "[x]" } else { "[ ]" };
		lines.push(format!("  {mark} {label} ({})", item.count));
	}
	if panel.has_more {
		lines.push("  show more".to_string());
	}
	lines
}

fn state_lines(report: &StateReport) -> Vec<String> {
	let mut lines = vec![report.query_string.clone(), report.url.to_string()];
	lines.extend(describe_state(&report.state));
	lines
}

fn describe_state(state: &SearchState) -> Vec<String> {
	if state.is_empty() {
		return vec!["  (empty state)".to_string()];
	}

	let mut lines = Vec::new();
	if let Some(query) = &state.query {
		lines.push(format!("  query: {query}"));
	}
	if let Some(page) = state.page {
		lines.push(format!("  page: {page}"));
	}
	for (facet, values) in &state.refinement_list {
		lines.push(format!("  refinement {facet}: {}", values.join(", ")));
	}
	for (attribute, value) in &state.menu {
		lines.push(format!("  menu {attribute}: {value}"));
	}
	lines
}

/// Format a command outcome as a JSON string.
pub(crate) fn format_outcome_json(outcome: &Outcome) -> Result<String> {
	let payload = match outcome {
		Outcome::State(report) => json!({
			"queryString": report.query_string,
			"url": report.url,
			"state": report.state,
		}),
		Outcome::Replay(writes) => Value::Array(writes.iter().map(write_json).collect()),
		Outcome::Cards { cards, .. } => serde_json::to_value(cards)?,
		Outcome::Facets(panels) => serde_json::to_value(panels)?,
	};

	Ok(serde_json::to_string_pretty(&payload)?)
}

fn write_json(write: &ReplayWrite) -> Value {
	json!({
		"offsetMs": whole_millis(write.offset),
		"url": write.entry.url,
		"state": write.entry.state,
	})
}

/// Print the JSON representation of a command outcome.
pub(crate) fn print_json(outcome: &Outcome) -> Result<()> {
	println!("{}", format_outcome_json(outcome)?);
	Ok(())
}

#[cfg(test)]
mod tests {
	use std::time::Duration;

	use talksearch::{FacetItem, HistoryEntry};
	use url::Url;

	use super::*;

	fn location() -> Url {
		Url::parse("https://search.example.org/").expect("url")
	}

	fn report() -> StateReport {
		let state = SearchState::new()
			.with_query("rust")
			.with_refinements("track", ["Rust", "Go"]);
		StateReport {
			query_string: state.encode(),
			url: location(),
			state,
		}
	}

	#[test]
	fn plain_state_lists_each_part() {
		let lines = plain_lines(&Outcome::State(report()));
		assert_eq!(
			lines[0],
			"query=rust&refinementList%5Btrack%5D%5B0%5D=Rust&refinementList%5Btrack%5D%5B1%5D=Go"
		);
		assert!(lines.contains(&"  query: rust".to_string()));
		assert!(lines.contains(&"  refinement track: Rust, Go".to_string()));
	}

	#[test]
	fn plain_empty_state_is_labelled() {
		let state = SearchState::new();
		let lines = plain_lines(&Outcome::State(StateReport {
			query_string: String::new(),
			url: location(),
			state,
		}));
		assert_eq!(lines, vec!["", "https://search.example.org/", "  (empty state)"]);
	}

	#[test]
	fn json_state_uses_wire_names() {
		let json = format_outcome_json(&Outcome::State(report())).expect("json");
		let value: Value = serde_json::from_str(&json).expect("parse");
		assert_eq!(value["state"]["query"], "rust");
		assert_eq!(value["state"]["refinementList"]["track"][1], "Go");
		assert_eq!(value["url"], "https://search.example.org/");
	}

	#[test]
	fn json_replay_carries_offsets() {
		let state = SearchState::new().with_page(2);
		let writes = vec![ReplayWrite {
			offset: Duration::from_millis(600),
			entry: HistoryEntry::for_state(&location(), state),
		}];

		let json = format_outcome_json(&Outcome::Replay(writes)).expect("json");
		let value: Value = serde_json::from_str(&json).expect("parse");
		assert_eq!(value[0]["offsetMs"], 600);
		assert_eq!(value[0]["url"], "https://search.example.org/?page=2");
		assert_eq!(value[0]["state"]["page"], 2);
	}

	#[test]
	fn json_replay_offsets_saturate() {
		let writes = vec![ReplayWrite {
			offset: Duration::MAX,
			entry: HistoryEntry::for_state(&location(), SearchState::new()),
		}];

		let json = format_outcome_json(&Outcome::Replay(writes)).expect("json");
		let value: Value = serde_json::from_str(&json).expect("parse");
		assert_eq!(value[0]["offsetMs"], u64::MAX);
	}

	#[test]
	fn plain_facets_use_display_labels() {
		let mut saturday = FacetItem::new("Saturday", 320);
		saturday.is_refined = true;
		let panel = FacetPanel {
			attribute: "day",
			header: "February 2020",
			items: vec![saturday, FacetItem::new("Sunday", 300)],
			has_more: true,
		};

		assert_eq!(plain_lines(&Outcome::Facets(vec![panel])), vec![
			"February 2020",
			"  [x] Saturday 1st (320)",
			"  [ ] Sunday 2nd (300)",
			"  show more",
		]);
	}

	#[test]
	fn plain_replay_without_writes() {
		assert_eq!(plain_lines(&Outcome::Replay(Vec::new())), vec!["No history writes"]);
	}
}
