//! Search front end for a conference schedule.
//!
//! The hosted search service does retrieval and ranking; this crate owns the
//! state around it. [`state`] and [`query`] turn the widget state into a
//! canonical, shareable query string and back. [`sync`] keeps navigation
//! history in step with that state through a debounced writer. [`talk`] and
//! [`facets`] derive what the result cards and filter panels display.

pub mod app_dirs;
pub mod error;
pub mod facets;
pub mod logging;
pub mod query;
pub mod state;
pub mod sync;
pub mod talk;

pub use error::{Error, Result, parse_location};
pub use facets::{Facet, FacetItem, FacetPanel};
pub use query::{CodecOptions, QueryValue};
pub use state::SearchState;
pub use sync::{History, HistoryEntry, MemoryHistory, SyncOptions, UrlSync};
pub use talk::{DisplayOptions, Talk, TalkCard};
