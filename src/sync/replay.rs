//! Replay a timed script of state changes through a [`UrlSync`].
//!
//! Each non-blank line is `<offset_ms> <query-string>`, where the offset is
//! measured from the start of the script and the query string may be empty.
//! Lines starting with `#` are comments.

use std::time::{Duration, Instant};

use url::Url;

use super::history::{HistoryEntry, MemoryHistory};
use super::synchronizer::{SyncOptions, UrlSync};
use crate::error::{Error, Result};
use crate::query::CodecOptions;
use crate::state::SearchState;

/// A state change at a fixed offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayEvent {
	pub offset: Duration,
	pub state: SearchState,
}

/// A history write and the offset at which it fired.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayWrite {
	pub offset: Duration,
	pub entry: HistoryEntry,
}

/// Parse a replay script. Offsets must not decrease.
pub fn parse_script(text: &str, options: &CodecOptions) -> Result<Vec<ReplayEvent>> {
	let mut events: Vec<ReplayEvent> = Vec::new();

	for (index, raw) in text.lines().enumerate() {
		let line = raw.trim();
		if line.is_empty() || line.starts_with('#') {
			continue;
		}

		let (offset, query) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
		let offset: u64 = offset.parse().map_err(|_| Error::ReplayLine {
			line: index + 1,
			reason: format!("invalid offset `{offset}`"),
		})?;
		let offset = Duration::from_millis(offset);

		if let Some(previous) = events.last()
			&& offset < previous.offset
		{
			return Err(Error::ReplayLine {
				line: index + 1,
				reason: "offsets must not decrease".to_string(),
			});
		}

		events.push(ReplayEvent {
			offset,
			state: SearchState::decode(query.trim(), options),
		});
	}

	Ok(events)
}

/// Run `events` through a fresh synchroniser on a virtual clock and collect
/// every history write.
///
/// A write that falls due at the same offset as a change fires before the
/// change is applied.
pub fn replay(location: Url, options: SyncOptions, events: &[ReplayEvent]) -> Vec<ReplayWrite> {
	let start = Instant::now();
	let mut sync = UrlSync::from_location(location, MemoryHistory::new(), options);
	let mut fired = Vec::new();

	for event in events {
		let now = start + event.offset;
		flush_due(&mut sync, start, now, &mut fired);
		sync.on_state_change(event.state.clone(), now);
	}
	if let Some(deadline) = sync.next_deadline() {
		flush_due(&mut sync, start, deadline, &mut fired);
	}

	fired
		.into_iter()
		.zip(sync.into_history().into_entries())
		.map(|(offset, entry)| ReplayWrite { offset, entry })
		.collect()
}

fn flush_due(
	sync: &mut UrlSync<MemoryHistory>,
	start: Instant,
	now: Instant,
	fired: &mut Vec<Duration>,
) {
	if let Some(deadline) = sync.next_deadline()
		&& sync.poll(now)
	{
		fired.push(deadline.duration_since(start));
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn location() -> Url {
		Url::parse("https://example.org/search").expect("url")
	}

	fn ms(value: u64) -> Duration {
		Duration::from_millis(value)
	}

	#[test]
	fn parses_offsets_comments_and_empty_queries() {
		let script = "# typing\n0 query=r\n\n100 ?query=ru\n250\n";
		let events = parse_script(script, &CodecOptions::default()).expect("script");

		assert_eq!(events.len(), 3);
		assert_eq!(events[1].offset, ms(100));
		assert_eq!(events[1].state.query.as_deref(), Some("ru"));
		assert!(events[2].state.is_empty());
	}

	#[test]
	fn rejects_bad_offsets() {
		let err = parse_script("abc query=x", &CodecOptions::default()).unwrap_err();
		assert!(err.to_string().contains("line 1"));

		let err = parse_script("100 a=1\n50 a=2", &CodecOptions::default()).unwrap_err();
		assert!(err.to_string().contains("line 2"));
	}

	#[test]
	fn typing_burst_writes_once() {
		let events = parse_script(
			"0 query=s1\n100 query=s2\n200 query=s3",
			&CodecOptions::default(),
		)
		.expect("script");

		let writes = replay(location(), SyncOptions::default(), &events);
		assert_eq!(writes.len(), 1);
		assert_eq!(writes[0].offset, ms(600));
		assert_eq!(writes[0].entry.url.as_str(), "https://example.org/search?query=s3");
	}

	#[test]
	fn spaced_changes_write_separately() {
		let events = parse_script("0 page=1\n399 page=2\n1000 page=3", &CodecOptions::default())
			.expect("script");

		let writes = replay(location(), SyncOptions::default(), &events);
		let offsets: Vec<_> = writes.iter().map(|write| write.offset).collect();
		assert_eq!(offsets, vec![ms(799), ms(1400)]);
		assert_eq!(writes[0].entry.state.page, Some(2));
	}

	#[test]
	fn empty_script_writes_nothing() {
		assert!(replay(location(), SyncOptions::default(), &[]).is_empty());
	}
}
