use chrono::{DateTime, FixedOffset, Offset, Utc};
use serde::Serialize;
use unicode_truncate::UnicodeTruncateStr;
use unicode_width::UnicodeWidthStr;

use super::{ELLIPSIS, Talk};

const LIVE_BADGE: &str = "[Live]";
const SEPARATOR: &str = " · ";
/// Brussels in winter.
const VENUE_OFFSET_SECONDS: i32 = 3600;

/// Which end of a string gives way when it does not fit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TruncationStyle {
	/// Keep the start and cut the end.
	#[default]
	Right,
	/// Keep the end and cut the start.
	Left,
}

/// Presentation settings for talk cards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayOptions {
	/// Venue offset used for start times.
	pub offset: FixedOffset,
	pub snippet_words: usize,
	/// Maximum display width of a rendered line.
	pub width: usize,
	pub profile_base: String,
	pub avatar_base: String,
}

impl Default for DisplayOptions {
	fn default() -> Self {
		Self {
			offset: FixedOffset::east_opt(VENUE_OFFSET_SECONDS).unwrap_or_else(|| Utc.fix()),
			snippet_words: 50,
			width: 80,
			profile_base: "https://fosdem.org/".to_string(),
			avatar_base: "https://unavatar.now.sh/github/".to_string(),
		}
	}
}

/// Display-ready fields of a talk at a given moment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TalkCard {
	pub track: String,
	pub title: String,
	pub is_live: bool,
	/// Stream address, only while live.
	pub live_url: Option<String>,
	pub speaker: String,
	pub profile_url: String,
	pub avatar_url: Option<String>,
	pub snippet: String,
	pub day: String,
	pub start: String,
	pub duration: String,
	pub room: String,
	pub url: String,
}

impl TalkCard {
	pub fn new(talk: &Talk, now: DateTime<Utc>, options: &DisplayOptions) -> Self {
		let is_live = talk.is_live(now);
		Self {
			track: talk.track.clone(),
			title: talk.title().to_string(),
			is_live,
			live_url: talk.live.clone().filter(|_| is_live),
			speaker: talk.speaker.clone(),
			profile_url: talk.speaker_profile_url(&options.profile_base),
			avatar_url: talk.avatar_url(&options.avatar_base),
			snippet: talk.snippet(options.snippet_words),
			day: talk.day.clone(),
			start: talk.start_label(&options.offset),
			duration: talk.duration_label(),
			room: talk.room.clone(),
			url: talk.url.clone(),
		}
	}

	/// Plain-text rendering, every line at most `width` columns wide.
	pub fn render(&self, width: usize) -> Vec<String> {
		let mut lines = vec![truncate_to_width(&self.track, width, TruncationStyle::Right)];

		if self.is_live {
			let room_for_title = width.saturating_sub(LIVE_BADGE.width() + 1);
			let title = truncate_to_width(&self.title, room_for_title, TruncationStyle::Right);
			lines.push(truncate_to_width(
				&format!("{title} {LIVE_BADGE}"),
				width,
				TruncationStyle::Right,
			));
		} else {
			lines.push(truncate_to_width(&self.title, width, TruncationStyle::Right));
		}

		lines.push(truncate_to_width(
			&format!("By {} <{}>", self.speaker, self.profile_url),
			width,
			TruncationStyle::Right,
		));
		if let Some(avatar) = &self.avatar_url {
			lines.push(truncate_to_width(
				&format!("Avatar: {avatar}"),
				width,
				TruncationStyle::Left,
			));
		}
		if !self.snippet.is_empty() {
			lines.push(truncate_to_width(&self.snippet, width, TruncationStyle::Right));
		}
		lines.push(truncate_to_width(
			&[
				format!("{} at {}", self.day, self.start),
				self.duration.clone(),
				format!("Room {}", self.room),
			]
			.join(SEPARATOR),
			width,
			TruncationStyle::Right,
		));
		if !self.url.is_empty() {
			lines.push(truncate_to_width(&self.url, width, TruncationStyle::Left));
		}

		lines
	}
}

/// Shorten `text` to at most `max_width` display columns, marking the cut
/// with an ellipsis on the side given by `style`.
pub fn truncate_to_width(text: &str, max_width: usize, style: TruncationStyle) -> String {
	if max_width == 0 {
		return String::new();
	}
	if text.width() <= max_width {
		return text.to_string();
	}

	let ellipsis_width = ELLIPSIS.width();
	if max_width <= ellipsis_width {
		return ELLIPSIS.to_string();
	}

	let available = max_width - ellipsis_width;
	match style {
		TruncationStyle::Right => {
			let (slice, _) = text.unicode_truncate(available);
			format!("{slice}{ELLIPSIS}")
		}
		TruncationStyle::Left => {
			let (slice, _) = text.unicode_truncate_start(available);
			format!("{ELLIPSIS}{slice}")
		}
	}
}
