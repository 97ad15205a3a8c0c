//! Typed search UI state and its mapping onto the query-string codec.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::query::{self, CodecOptions, QueryMap, QueryValue};

const QUERY_KEY: &str = "query";
const PAGE_KEY: &str = "page";
const REFINEMENT_LIST_KEY: &str = "refinementList";
const MENU_KEY: &str = "menu";
/// Top-level parameters whose first segment is always a facet name.
const NAMED_MAPS: [&str; 2] = [REFINEMENT_LIST_KEY, MENU_KEY];

/// Search widget state: free-text query, page and facet refinements.
///
/// Values are replaced rather than edited; the builder methods consume
/// `self` or borrow it and return a new state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchState {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub query: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub page: Option<u32>,
	/// Selected values per facet. Facets never map to an empty list.
	#[serde(skip_serializing_if = "BTreeMap::is_empty")]
	pub refinement_list: BTreeMap<String, Vec<String>>,
	/// Single-value facet selections.
	#[serde(skip_serializing_if = "BTreeMap::is_empty")]
	pub menu: BTreeMap<String, String>,
}

impl SearchState {
	pub fn new() -> Self {
		Self::default()
	}

	/// Decode a raw address-bar query string. Never fails; unusable input
	/// yields an empty state.
	pub fn decode(raw: &str, options: &CodecOptions) -> Self {
		Self::from_params(query::decode_with_named_maps(raw, options, &NAMED_MAPS))
	}

	/// Canonical query string for this state, without a leading `?`.
	pub fn encode(&self) -> String {
		query::encode(&self.to_params())
	}

	pub fn is_empty(&self) -> bool {
		self.query.is_none()
			&& self.page.is_none()
			&& self.refinement_list.is_empty()
			&& self.menu.is_empty()
	}

	/// Replace the free-text query. Paging restarts with a new query.
	pub fn with_query(mut self, query: impl Into<String>) -> Self {
		self.query = Some(query.into());
		self.page = None;
		self
	}

	pub fn with_page(mut self, page: u32) -> Self {
		self.page = Some(page);
		self
	}

	/// Replace the selected values of a facet; an empty list clears it.
	pub fn with_refinements<I, S>(mut self, facet: impl Into<String>, values: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		let facet = facet.into();
		let values: Vec<String> = values.into_iter().map(Into::into).collect();
		if values.is_empty() {
			self.refinement_list.remove(&facet);
		} else {
			self.refinement_list.insert(facet, values);
		}
		self.page = None;
		self
	}

	/// Set or clear a single-value menu selection.
	pub fn with_menu(mut self, attribute: impl Into<String>, value: Option<String>) -> Self {
		let attribute = attribute.into();
		match value {
			Some(value) => {
				self.menu.insert(attribute, value);
			}
			None => {
				self.menu.remove(&attribute);
			}
		}
		self.page = None;
		self
	}

	/// Add `value` to the facet's refinements, or remove it when already
	/// selected. The result is a new state with paging reset.
	pub fn toggle_refinement(&self, facet: &str, value: &str) -> Self {
		let mut values = self.refinements(facet).to_vec();
		match values.iter().position(|existing| existing == value) {
			Some(index) => {
				values.remove(index);
			}
			None => values.push(value.to_owned()),
		}
		self.clone().with_refinements(facet, values)
	}

	pub fn refinements(&self, facet: &str) -> &[String] {
		self.refinement_list
			.get(facet)
			.map(Vec::as_slice)
			.unwrap_or_default()
	}

	pub fn is_refined(&self, facet: &str, value: &str) -> bool {
		self.refinements(facet).iter().any(|existing| existing == value)
	}

	/// Build a state from a decoded parameter tree, dropping anything that
	/// does not fit the expected shape.
	pub fn from_params(params: QueryMap) -> Self {
		let mut state = Self::default();

		for (key, value) in params {
			match key.as_str() {
				QUERY_KEY => match value {
					QueryValue::String(text) => state.query = Some(text),
					other => debug!(?other, "ignoring non-text query"),
				},
				PAGE_KEY => match value.as_str().map(str::parse::<u32>) {
					Some(Ok(page)) => state.page = Some(page),
					_ => debug!(?value, "ignoring unparseable page"),
				},
				REFINEMENT_LIST_KEY => match value {
					QueryValue::Map(facets) => {
						for (facet, values) in facets {
							let values = values.string_items();
							if !values.is_empty() {
								state.refinement_list.insert(unescape_name(&facet), values);
							}
						}
					}
					other => debug!(?other, "ignoring malformed refinement list"),
				},
				MENU_KEY => match value {
					QueryValue::Map(entries) => {
						for (attribute, selected) in entries {
							if let QueryValue::String(selected) = selected {
								state.menu.insert(unescape_name(&attribute), selected);
							}
						}
					}
					other => debug!(?other, "ignoring malformed menu"),
				},
				unknown => debug!(key = unknown, "ignoring unknown search parameter"),
			}
		}

		state
	}

	/// Parameter tree for this state.
	pub fn to_params(&self) -> QueryMap {
		let mut params = QueryMap::new();

		if let Some(query) = &self.query {
			params.insert(QUERY_KEY.to_string(), QueryValue::from(query.as_str()));
		}
		if let Some(page) = self.page {
			params.insert(PAGE_KEY.to_string(), QueryValue::String(page.to_string()));
		}
		if !self.refinement_list.is_empty() {
			let facets = self
				.refinement_list
				.iter()
				.map(|(facet, values)| (escape_name(facet), QueryValue::from(values.clone())))
				.collect();
			params.insert(REFINEMENT_LIST_KEY.to_string(), QueryValue::Map(facets));
		}
		if !self.menu.is_empty() {
			let entries = self
				.menu
				.iter()
				.map(|(attribute, value)| (escape_name(attribute), QueryValue::from(value.as_str())))
				.collect();
			params.insert(MENU_KEY.to_string(), QueryValue::Map(entries));
		}

		params
	}
}

/// Escape the characters that would break a bracketed path. Only `%`, `[`
/// and `]` change, so ordinary facet names stay readable in the address bar.
fn escape_name(name: &str) -> String {
	let mut escaped = String::with_capacity(name.len());
	for ch in name.chars() {
		match ch {
			'%' => escaped.push_str("%25"),
			'[' => escaped.push_str("%5B"),
			']' => escaped.push_str("%5D"),
			other => escaped.push(other),
		}
	}
	escaped
}

/// Inverse of [`escape_name`]. Any other `%` sequence is kept as written.
fn unescape_name(name: &str) -> String {
	let mut unescaped = String::with_capacity(name.len());
	let mut rest = name;
	while let Some(position) = rest.find('%') {
		unescaped.push_str(&rest[..position]);
		let tail = &rest[position..];
		let (ch, len) = if tail.starts_with("%25") {
			('%', 3)
		} else if tail.starts_with("%5B") {
			('[', 3)
		} else if tail.starts_with("%5D") {
			(']', 3)
		} else {
			('%', 1)
		};
		unescaped.push(ch);
		rest = &tail[len..];
	}
	unescaped.push_str(rest);
	unescaped
}
