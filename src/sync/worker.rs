use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Instant;

use tracing::debug;

use super::history::History;
use super::synchronizer::UrlSync;
use crate::error::{Error, Result};
use crate::state::SearchState;

/// Commands understood by the background synchroniser.
#[derive(Debug)]
pub enum SyncCommand {
	/// A UI-driven state change.
	StateChanged(SearchState),
	/// Stop the worker, discarding any pending write.
	Shutdown,
}

/// Handle to a synchroniser running on its own thread.
///
/// All changes flow through one channel into a single consumer, which owns
/// the debounce timer, so ordering and cancellation stay deterministic
/// without a lock.
pub struct SyncHandle<H> {
	commands: Sender<SyncCommand>,
	worker: JoinHandle<H>,
}

/// Move `sync` onto a background thread.
pub fn spawn<H>(sync: UrlSync<H>) -> SyncHandle<H>
where
	H: History + Send + 'static,
{
	let (commands, receiver) = mpsc::channel();
	let worker = thread::spawn(move || worker_loop(sync, receiver));
	SyncHandle { commands, worker }
}

impl<H> SyncHandle<H> {
	/// Forward a state change without blocking.
	pub fn notify(&self, state: SearchState) -> Result<()> {
		self.commands
			.send(SyncCommand::StateChanged(state))
			.map_err(|_| Error::WorkerStopped)
	}

	/// Stop the worker and hand back its history.
	pub fn shutdown(self) -> Result<H> {
		// The worker also stops when the channel disconnects, so a failed
		// send is not an error here.
		let _ = self.commands.send(SyncCommand::Shutdown);
		self.worker.join().map_err(|_| Error::WorkerPanicked)
	}
}

fn worker_loop<H: History>(mut sync: UrlSync<H>, receiver: Receiver<SyncCommand>) -> H {
	debug!("history synchroniser started");
	loop {
		let command = match sync.next_deadline() {
			Some(deadline) => {
				let wait = deadline.saturating_duration_since(Instant::now());
				match receiver.recv_timeout(wait) {
					Ok(command) => Some(command),
					Err(RecvTimeoutError::Timeout) => None,
					Err(RecvTimeoutError::Disconnected) => Some(SyncCommand::Shutdown),
				}
			}
			None => Some(receiver.recv().unwrap_or(SyncCommand::Shutdown)),
		};

		match command {
			Some(SyncCommand::StateChanged(state)) => sync.on_state_change(state, Instant::now()),
			Some(SyncCommand::Shutdown) => break,
			None => {
				sync.poll(Instant::now());
			}
		}
	}
	debug!("history synchroniser stopped");
	sync.into_history()
}
