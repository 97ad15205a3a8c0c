use serde::Serialize;
use url::Url;

use crate::state::SearchState;

/// A navigation entry: the address to show and the state it restores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryEntry {
	pub url: Url,
	pub state: SearchState,
}

impl HistoryEntry {
	/// Build an entry whose address is `location` with its query replaced by
	/// the canonical encoding of `state`.
	pub fn for_state(location: &Url, state: SearchState) -> Self {
		Self {
			url: url_for_query(location, &state.encode()),
			state,
		}
	}
}

/// Replace the query of `location` with `encoded`; an empty encoding clears it.
pub fn url_for_query(location: &Url, encoded: &str) -> Url {
	let mut url = location.clone();
	url.set_fragment(None);
	if encoded.is_empty() {
		url.set_query(None);
	} else {
		url.set_query(Some(encoded));
	}
	url
}

/// Append-only navigation history.
pub trait History {
	/// Add a new entry after the current one. Existing entries are never
	/// replaced.
	fn push_state(&mut self, entry: HistoryEntry);
}

/// History kept in memory, in push order.
#[derive(Debug, Clone, Default)]
pub struct MemoryHistory {
	entries: Vec<HistoryEntry>,
}

impl MemoryHistory {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn entries(&self) -> &[HistoryEntry] {
		&self.entries
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	pub fn last(&self) -> Option<&HistoryEntry> {
		self.entries.last()
	}

	pub fn into_entries(self) -> Vec<HistoryEntry> {
		self.entries
	}
}

impl History for MemoryHistory {
	fn push_state(&mut self, entry: HistoryEntry) {
		self.entries.push(entry);
	}
}

impl<H: History + ?Sized> History for &mut H {
	fn push_state(&mut self, entry: HistoryEntry) {
		(**self).push_state(entry);
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn location() -> Url {
		Url::parse("https://search.example.org/schedule?old=1#results").expect("url")
	}

	#[test]
	fn entry_url_carries_the_encoding() {
		let state = SearchState::new().with_query("rust");
		let entry = HistoryEntry::for_state(&location(), state.clone());

		assert_eq!(entry.url.as_str(), "https://search.example.org/schedule?query=rust");
		assert_eq!(entry.state, state);
	}

	#[test]
	fn empty_state_clears_the_query() {
		let entry = HistoryEntry::for_state(&location(), SearchState::new());
		assert_eq!(entry.url.as_str(), "https://search.example.org/schedule");
	}

	#[test]
	fn memory_history_appends() {
		let mut history = MemoryHistory::new();
		history.push_state(HistoryEntry::for_state(&location(), SearchState::new()));
		history.push_state(HistoryEntry::for_state(
			&location(),
			SearchState::new().with_page(2),
		));

		assert_eq!(history.len(), 2);
		assert_eq!(history.last().map(|entry| entry.state.page), Some(Some(2)));
	}
}
