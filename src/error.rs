//! Error types for the library.
//!
//! Decoding search state never fails; these cover the edges that read
//! external input or coordinate threads.

use thiserror::Error;

/// Main error type for `talksearch` operations.
#[derive(Error, Debug)]
pub enum Error {
	#[error("invalid location '{input}': {source}")]
	InvalidLocation {
		input: String,
		#[source]
		source: url::ParseError,
	},

	#[error("failed to parse talk records: {0}")]
	Talks(#[from] serde_json::Error),

	#[error("replay script line {line}: {reason}")]
	ReplayLine { line: usize, reason: String },

	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),

	#[error("history synchroniser is no longer running")]
	WorkerStopped,

	#[error("history synchroniser panicked")]
	WorkerPanicked,
}

/// Result type alias for `talksearch` operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
	pub fn invalid_location(input: impl Into<String>, source: url::ParseError) -> Self {
		Self::InvalidLocation {
			input: input.into(),
			source,
		}
	}
}

/// Parse a page location, naming the input on failure.
pub fn parse_location(input: &str) -> Result<url::Url> {
	url::Url::parse(input).map_err(|source| Error::invalid_location(input, source))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn invalid_location_names_the_input() {
		let err = parse_location("not a url").unwrap_err();
		assert!(err.to_string().contains("'not a url'"));
	}

	#[test]
	fn replay_errors_carry_line_numbers() {
		let err = Error::ReplayLine {
			line: 4,
			reason: "invalid offset `x`".into(),
		};
		assert_eq!(err.to_string(), "replay script line 4: invalid offset `x`");
	}
}
