use std::time::{Duration, Instant};

/// Phase of a [`Debouncer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DebounceState<T> {
	/// Nothing scheduled.
	Idle,
	/// `payload` is released once `deadline` has been reached.
	Pending { deadline: Instant, payload: T },
}

/// Trailing-edge debounce over explicit timestamps.
///
/// Every [`schedule`](Self::schedule) replaces the pending payload and
/// restarts the quiet period, so only a payload left alone for the whole
/// period is ever released. At most one payload is pending at a time.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
	quiet_period: Duration,
	state: DebounceState<T>,
}

impl<T> Debouncer<T> {
	pub fn new(quiet_period: Duration) -> Self {
		Self {
			quiet_period,
			state: DebounceState::Idle,
		}
	}

	pub fn quiet_period(&self) -> Duration {
		self.quiet_period
	}

	pub fn state(&self) -> &DebounceState<T> {
		&self.state
	}

	pub fn is_pending(&self) -> bool {
		matches!(self.state, DebounceState::Pending { .. })
	}

	pub fn deadline(&self) -> Option<Instant> {
		match &self.state {
			DebounceState::Idle => None,
			DebounceState::Pending { deadline, .. } => Some(*deadline),
		}
	}

	/// Schedule `payload` for release at `now + quiet_period`.
	///
	/// Returns the payload that was still pending, if any; it will never be
	/// released.
	pub fn schedule(&mut self, now: Instant, payload: T) -> Option<T> {
		let deadline = now + self.quiet_period;
		let previous = self.cancel();
		self.state = DebounceState::Pending { deadline, payload };
		previous
	}

	/// Release the pending payload if its deadline has been reached.
	pub fn poll(&mut self, now: Instant) -> Option<T> {
		match self.deadline() {
			Some(deadline) if now >= deadline => self.cancel(),
			_ => None,
		}
	}

	/// Drop the pending payload without releasing it.
	pub(crate) fn cancel(&mut self) -> Option<T> {
		match std::mem::replace(&mut self.state, DebounceState::Idle) {
			DebounceState::Idle => None,
			DebounceState::Pending { payload, .. } => Some(payload),
		}
	}
}
