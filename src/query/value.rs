use std::collections::BTreeMap;

/// Top-level parameters of a decoded query string.
pub type QueryMap = BTreeMap<String, QueryValue>;

/// Untyped tree produced by decoding a bracketed query string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryValue {
	String(String),
	List(Vec<QueryValue>),
	Map(QueryMap),
}

impl QueryValue {
	pub fn as_str(&self) -> Option<&str> {
		match self {
			Self::String(value) => Some(value),
			_ => None,
		}
	}

	pub fn as_map(&self) -> Option<&QueryMap> {
		match self {
			Self::Map(map) => Some(map),
			_ => None,
		}
	}

	/// Collect the string elements of a list.
	///
	/// A bare string is treated as a one-element list so that `facet=value`
	/// and `facet[0]=value` read the same. Nested containers are skipped.
	pub fn string_items(&self) -> Vec<String> {
		match self {
			Self::String(value) => vec![value.clone()],
			Self::List(items) => items
				.iter()
				.filter_map(|item| item.as_str().map(str::to_owned))
				.collect(),
			Self::Map(_) => Vec::new(),
		}
	}

	/// Whether the value would produce no pairs when encoded.
	pub fn is_empty(&self) -> bool {
		match self {
			Self::String(_) => false,
			Self::List(items) => items.iter().all(QueryValue::is_empty),
			Self::Map(map) => map.values().all(QueryValue::is_empty),
		}
	}
}

impl From<String> for QueryValue {
	fn from(value: String) -> Self {
		Self::String(value)
	}
}

impl From<&str> for QueryValue {
	fn from(value: &str) -> Self {
		Self::String(value.to_owned())
	}
}

impl From<Vec<String>> for QueryValue {
	fn from(values: Vec<String>) -> Self {
		Self::List(values.into_iter().map(QueryValue::String).collect())
	}
}

impl From<QueryMap> for QueryValue {
	fn from(map: QueryMap) -> Self {
		Self::Map(map)
	}
}
