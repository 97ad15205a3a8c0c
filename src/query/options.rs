/// Default cap on the number of elements kept for a single list parameter.
pub const DEFAULT_ARRAY_LIMIT: usize = 100;

/// Default number of bracketed segments followed before the rest of a key is
/// taken literally.
pub const DEFAULT_DEPTH: usize = 5;

/// Default number of `key=value` pairs considered per query string.
pub const DEFAULT_PARAMETER_LIMIT: usize = 1000;

/// Bounds applied while decoding a query string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecOptions {
	/// Maximum number of elements per list; later elements are dropped.
	pub array_limit: usize,
	/// Maximum number of bracketed key segments.
	pub depth: usize,
	/// Maximum number of pairs read from the input.
	pub parameter_limit: usize,
}

impl Default for CodecOptions {
	fn default() -> Self {
		Self {
			array_limit: DEFAULT_ARRAY_LIMIT,
			depth: DEFAULT_DEPTH,
			parameter_limit: DEFAULT_PARAMETER_LIMIT,
		}
	}
}

impl CodecOptions {
	pub fn with_array_limit(mut self, limit: usize) -> Self {
		self.array_limit = limit;
		self
	}

	pub fn with_depth(mut self, depth: usize) -> Self {
		self.depth = depth;
		self
	}

	pub fn with_parameter_limit(mut self, limit: usize) -> Self {
		self.parameter_limit = limit;
		self
	}
}
