//! Talk records returned by the schedule index and the fields derived from
//! them for display.

mod card;
mod duration;

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};

pub use card::{DisplayOptions, TalkCard, TruncationStyle, truncate_to_width};
pub use duration::format_distance_strict;

use crate::error::Result;

/// Ellipsis appended to shortened text.
pub const ELLIPSIS: &str = "…";

/// Heading levels carried by each record; `lvl0` is the talk title.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Hierarchy {
	pub lvl0: String,
}

/// One talk as stored in the search index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Talk {
	#[serde(default)]
	pub hierarchy: Hierarchy,
	#[serde(default)]
	pub track: String,
	#[serde(default)]
	pub room: String,
	#[serde(default)]
	pub day: String,
	#[serde(default)]
	pub speaker: String,
	#[serde(default)]
	pub speaker_url: String,
	#[serde(default)]
	pub github_handle: Option<String>,
	#[serde(default)]
	pub description: String,
	#[serde(default)]
	pub url: String,
	/// Stream address shown while the talk is running.
	#[serde(default)]
	pub live: Option<String>,
	#[serde(with = "chrono::serde::ts_milliseconds")]
	pub start: DateTime<Utc>,
	#[serde(with = "chrono::serde::ts_milliseconds")]
	pub end: DateTime<Utc>,
}

impl Talk {
	pub fn title(&self) -> &str {
		&self.hierarchy.lvl0
	}

	/// Whether `now` falls inside the talk's slot, both ends inclusive.
	pub fn is_live(&self, now: DateTime<Utc>) -> bool {
		self.start <= now && now <= self.end
	}

	/// Start time as `h:mm AM` in the venue's offset.
	pub fn start_label(&self, offset: &FixedOffset) -> String {
		self.start
			.with_timezone(offset)
			.format("%-I:%M %p")
			.to_string()
	}

	/// Length of the slot, e.g. `50 minutes`.
	pub fn duration_label(&self) -> String {
		format_distance_strict(self.start, self.end)
	}

	pub fn speaker_profile_url(&self, base: &str) -> String {
		join_url(base, &self.speaker_url)
	}

	/// Avatar image address, when the speaker has a GitHub handle.
	pub fn avatar_url(&self, base: &str) -> Option<String> {
		self.github_handle
			.as_deref()
			.map(str::trim)
			.filter(|handle| !handle.is_empty())
			.map(|handle| join_url(base, handle))
	}

	/// The first `words` words of the description, with an ellipsis when
	/// anything was cut.
	pub fn snippet(&self, words: usize) -> String {
		snippet(&self.description, words)
	}
}

/// Parse a JSON array of talk records.
pub fn parse_talks(json: &str) -> Result<Vec<Talk>> {
	Ok(serde_json::from_str(json)?)
}

/// Keep the first `words` whitespace-separated words of `text`.
pub fn snippet(text: &str, words: usize) -> String {
	let mut parts = text.split_whitespace();
	let kept: Vec<&str> = parts.by_ref().take(words).collect();
	let mut shortened = kept.join(" ");
	if parts.next().is_some() {
		shortened.push_str(ELLIPSIS);
	}
	shortened
}

fn join_url(base: &str, path: &str) -> String {
	format!(
		"{}/{}",
		base.trim_end_matches('/'),
		path.trim_start_matches('/')
	)
}
