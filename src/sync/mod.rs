//! Keeps navigation history in step with the search state.
//!
//! [`UrlSync`] is the cooperative form: the caller reports changes with
//! [`UrlSync::on_state_change`] and drives time with [`UrlSync::poll`].
//! [`spawn`] runs the same synchroniser on a dedicated thread fed by a
//! channel. [`replay`] drives it over a virtual clock from a timed script.

mod debounce;
mod history;
pub mod replay;
mod synchronizer;
mod worker;

pub use debounce::{DebounceState, Debouncer};
pub use history::{History, HistoryEntry, MemoryHistory, url_for_query};
pub use synchronizer::{DEFAULT_QUIET_PERIOD, SyncOptions, UrlSync, whole_millis};
pub use worker::{SyncCommand, SyncHandle, spawn};
