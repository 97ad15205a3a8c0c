//! Facet panels shown beside the results: which attributes can be refined,
//! how their values are ordered and labelled, and the defaults they start
//! with. [`panel`] puts these together for a set of talk records.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::state::SearchState;
use crate::talk::Talk;

/// Values shown per panel before "show more".
pub const DEFAULT_VISIBLE: usize = 10;

/// Values shown per panel after "show more".
pub const SHOW_MORE_LIMIT: usize = 100;

/// Days selected when no day refinement is present.
pub const DEFAULT_DAYS: [&str; 2] = ["Saturday", "Sunday"];

/// Refinable attributes of a talk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Facet {
	Day,
	Track,
	Room,
	Speaker,
}

impl Facet {
	/// Panels in display order.
	pub const ALL: [Facet; 4] = [Facet::Day, Facet::Track, Facet::Room, Facet::Speaker];

	/// Attribute name in the index and in the URL state.
	pub fn attribute(self) -> &'static str {
		match self {
			Facet::Day => "day",
			Facet::Track => "track",
			Facet::Room => "room",
			Facet::Speaker => "speaker",
		}
	}

	pub fn header(self) -> &'static str {
		match self {
			Facet::Day => "February 2020",
			Facet::Track => "Track",
			Facet::Room => "Room",
			Facet::Speaker => "Speaker",
		}
	}

	/// Whether the panel offers a search box over its values.
	pub fn searchable(self) -> bool {
		matches!(self, Facet::Track | Facet::Speaker)
	}

	pub fn from_attribute(attribute: &str) -> Option<Self> {
		Self::ALL
			.into_iter()
			.find(|facet| facet.attribute() == attribute)
	}

	/// Order values the way the panel presents them. Days put Saturday
	/// first and rooms sort by name; other facets keep the backend order.
	pub fn order(self, items: &mut [FacetItem]) {
		match self {
			Facet::Day => items.sort_by_key(|item| item.label != DEFAULT_DAYS[0]),
			Facet::Room => items.sort_by(|a, b| a.label.cmp(&b.label)),
			Facet::Track | Facet::Speaker => {}
		}
	}

	/// Label shown next to a value.
	pub fn label_for(self, value: &str) -> String {
		match self {
			Facet::Day => day_label(value).to_string(),
			_ => value.to_string(),
		}
	}

	/// The value `talk` carries for this attribute.
	pub fn value_of(self, talk: &Talk) -> &str {
		match self {
			Facet::Day => &talk.day,
			Facet::Track => &talk.track,
			Facet::Room => &talk.room,
			Facet::Speaker => &talk.speaker,
		}
	}
}

/// One value of a facet with its hit count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetItem {
	pub label: String,
	pub count: u64,
	#[serde(default)]
	pub is_refined: bool,
}

impl FacetItem {
	pub fn new(label: impl Into<String>, count: u64) -> Self {
		Self {
			label: label.into(),
			count,
			is_refined: false,
		}
	}
}

/// Toggle label for a conference day.
pub fn day_label(day: &str) -> &'static str {
	if day == DEFAULT_DAYS[0] {
		"Saturday 1st"
	} else {
		"Sunday 2nd"
	}
}

/// Flag the items selected in `state` for `facet`.
pub fn mark_refined(items: &mut [FacetItem], state: &SearchState, facet: Facet) {
	for item in items {
		item.is_refined = state.is_refined(facet.attribute(), &item.label);
	}
}

/// Apply the default day selection when the state has none.
pub fn with_default_days(state: SearchState) -> SearchState {
	if state.refinements(Facet::Day.attribute()).is_empty() {
		let page = state.page;
		let mut state = state.with_refinements(Facet::Day.attribute(), DEFAULT_DAYS);
		state.page = page;
		state
	} else {
		state
	}
}

/// Values a panel shows, collapsed or expanded.
pub fn visible(items: &[FacetItem], expanded: bool) -> &[FacetItem] {
	let limit = if expanded {
		SHOW_MORE_LIMIT
	} else {
		DEFAULT_VISIBLE
	};
	&items[..items.len().min(limit)]
}

/// Case-insensitive filter used by searchable panels.
pub fn search_values<'a>(items: &'a [FacetItem], needle: &str) -> Vec<&'a FacetItem> {
	let needle = needle.trim().to_lowercase();
	items
		.iter()
		.filter(|item| needle.is_empty() || item.label.to_lowercase().contains(&needle))
		.collect()
}

/// A facet panel as displayed: header, visible values and whether more
/// are hidden behind "show more".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FacetPanel {
	pub attribute: &'static str,
	pub header: &'static str,
	pub items: Vec<FacetItem>,
	pub has_more: bool,
}

/// Hit counts per value, most frequent first and ties by value, the order
/// the search backend reports them in. Empty values are skipped.
pub fn count_values(talks: &[Talk], facet: Facet) -> Vec<FacetItem> {
	let mut counts: BTreeMap<&str, u64> = BTreeMap::new();
	for talk in talks {
		let value = facet.value_of(talk);
		if !value.is_empty() {
			*counts.entry(value).or_default() += 1;
		}
	}

	let mut items: Vec<FacetItem> = counts
		.into_iter()
		.map(|(value, count)| FacetItem::new(value, count))
		.collect();
	items.sort_by(|a, b| b.count.cmp(&a.count));
	items
}

/// Build the panel for `facet` over `talks`. `search` only applies to
/// searchable panels.
pub fn panel(
	facet: Facet,
	talks: &[Talk],
	state: &SearchState,
	search: Option<&str>,
	expanded: bool,
) -> FacetPanel {
	let mut items = count_values(talks, facet);
	facet.order(&mut items);
	mark_refined(&mut items, state, facet);

	let matching: Vec<FacetItem> = match search {
		Some(needle) if facet.searchable() => search_values(&items, needle).into_iter().cloned().collect(),
		_ => items,
	};
	let shown = visible(&matching, expanded).to_vec();

	FacetPanel {
		attribute: facet.attribute(),
		header: facet.header(),
		has_more: shown.len() < matching.len(),
		items: shown,
	}
}
