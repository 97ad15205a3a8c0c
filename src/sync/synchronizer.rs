use std::time::{Duration, Instant};

use tracing::{debug, trace};
use url::Url;

use super::debounce::Debouncer;
use super::history::{History, HistoryEntry};
use crate::query::CodecOptions;
use crate::state::SearchState;

/// Quiet period before a state change is written to history.
pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(400);

/// Whole milliseconds in `duration`, saturating at `u64::MAX`.
pub fn whole_millis(duration: Duration) -> u64 {
	u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

/// Tuning for [`UrlSync`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncOptions {
	pub quiet_period: Duration,
	pub codec: CodecOptions,
}

impl Default for SyncOptions {
	fn default() -> Self {
		Self {
			quiet_period: DEFAULT_QUIET_PERIOD,
			codec: CodecOptions::default(),
		}
	}
}

/// Keeps navigation history in eventual agreement with the live search
/// state.
///
/// Every change is adopted immediately. The history write is debounced:
/// only a state that survives a full quiet period without being superseded
/// is pushed. The pending write is owned here and cannot be cancelled from
/// outside other than by a newer change.
#[derive(Debug)]
pub struct UrlSync<H> {
	location: Url,
	current: SearchState,
	pending: Debouncer<SearchState>,
	history: H,
	options: SyncOptions,
}

impl<H: History> UrlSync<H> {
	/// Start from the state encoded in `location`'s query.
	pub fn from_location(location: Url, history: H, options: SyncOptions) -> Self {
		let current = Self::decode_initial_state(location.query().unwrap_or_default(), &options);
		debug!(url = %location, "restored initial search state");
		Self {
			location,
			current,
			pending: Debouncer::new(options.quiet_period),
			history,
			options,
		}
	}

	/// Decode the state carried by a raw address-bar query string. A missing
	/// or malformed string yields an empty state.
	pub fn decode_initial_state(raw: &str, options: &SyncOptions) -> SearchState {
		SearchState::decode(raw, &options.codec)
	}

	/// Canonical query string written to history for `state`.
	pub fn encode_state_for_history(state: &SearchState) -> String {
		state.encode()
	}

	/// Record a UI-driven change made at `now`.
	///
	/// Any write still pending is dropped, `state` becomes current at once,
	/// and a write of `state` is scheduled one quiet period after `now`.
	pub fn on_state_change(&mut self, state: SearchState, now: Instant) {
		if self.pending.schedule(now, state.clone()).is_some() {
			trace!("superseded pending history write");
		}
		self.current = state;
		debug!(
			delay_ms = whole_millis(self.options.quiet_period),
			"scheduled history write"
		);
	}

	/// Push the pending state to history if its quiet period has elapsed by
	/// `now`. Returns whether an entry was written.
	pub fn poll(&mut self, now: Instant) -> bool {
		let Some(state) = self.pending.poll(now) else {
			return false;
		};
		let entry = HistoryEntry::for_state(&self.location, state);
		debug!(url = %entry.url, "pushing history entry");
		self.history.push_state(entry);
		true
	}

	/// When the pending write is due, if there is one.
	pub fn next_deadline(&self) -> Option<Instant> {
		self.pending.deadline()
	}

	pub fn is_pending(&self) -> bool {
		self.pending.is_pending()
	}

	pub fn current(&self) -> &SearchState {
		&self.current
	}

	pub fn location(&self) -> &Url {
		&self.location
	}

	pub fn options(&self) -> &SyncOptions {
		&self.options
	}

	pub fn history(&self) -> &H {
		&self.history
	}

	/// Tear down, discarding any write that has not fired yet.
	pub fn into_history(mut self) -> H {
		if self.pending.cancel().is_some() {
			debug!("discarding pending history write");
		}
		self.history
	}
}
