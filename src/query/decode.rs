use std::collections::BTreeMap;
use std::mem;

use tracing::debug;
use url::form_urlencoded;

use super::options::CodecOptions;
use super::value::{QueryMap, QueryValue};

/// One bracketed component of a parameter name.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
	/// `[name]`
	Key(String),
	/// `[3]`
	Index(usize),
	/// `[]`
	Push,
}

impl Segment {
	fn parse(inner: &str) -> Self {
		if inner.is_empty() {
			return Self::Push;
		}
		let canonical = inner == "0" || !inner.starts_with('0');
		match inner.parse::<usize>() {
			Ok(index) if canonical && inner.bytes().all(|b| b.is_ascii_digit()) => {
				Self::Index(index)
			}
			_ => Self::Key(inner.to_owned()),
		}
	}
}

/// Intermediate tree. Lists stay keyed by index until the whole input has
/// been read so that out-of-order indices compact into source order.
#[derive(Debug)]
enum Node {
	Leaf(String),
	Seq(BTreeMap<usize, Node>),
	Map(BTreeMap<String, Node>),
}

/// Decode a query string into a parameter tree.
///
/// Leading `?` characters are ignored. Decoding never fails: nameless
/// pairs, conflicting shapes and list elements past
/// [`CodecOptions::array_limit`] are dropped.
pub fn decode(input: &str, options: &CodecOptions) -> QueryMap {
	decode_with_named_maps(input, options, &[])
}

/// Like [`decode`], but the top-level parameters listed in `named` always
/// hold maps. Their first bracketed segment is a key taken verbatim, so
/// `menu[7]` and `menu[]` address the entries named `7` and the empty name
/// instead of list positions.
pub fn decode_with_named_maps(input: &str, options: &CodecOptions, named: &[&str]) -> QueryMap {
	let trimmed = input.trim_start_matches('?');
	let mut root = BTreeMap::new();

	for (key, value) in form_urlencoded::parse(trimmed.as_bytes()).take(options.parameter_limit) {
		let Some((head, segments)) = split_key(&key, options.depth, named) else {
			debug!(key = %key, "ignoring query parameter without a name");
			continue;
		};
		if !insert_into_map(&mut root, head, &segments, value.into_owned(), options.array_limit) {
			debug!(key = %key, "dropping query parameter that exceeds limits or conflicts");
		}
	}

	root.into_iter()
		.map(|(key, node)| (key, node.into_value()))
		.collect()
}

/// Split `a[b][0]` into its head and bracketed segments.
fn split_key(key: &str, depth: usize, named: &[&str]) -> Option<(String, Vec<Segment>)> {
	if key.is_empty() {
		return None;
	}

	let (head, mut rest) = match key.find('[') {
		Some(0) => {
			let len = bracket_len(key)?;
			(&key[1..len - 1], &key[len..])
		}
		Some(open) if bracket_len(&key[open..]).is_some() => (&key[..open], &key[open..]),
		_ => return Some((key.to_owned(), Vec::new())),
	};
	if head.is_empty() {
		return None;
	}
	let keyed_head = named.contains(&head);

	let mut segments = Vec::new();
	while segments.len() < depth {
		let Some(len) = bracket_len(rest) else {
			break;
		};
		let inner = &rest[1..len - 1];
		if keyed_head && segments.is_empty() {
			segments.push(Segment::Key(inner.to_owned()));
		} else {
			segments.push(Segment::parse(inner));
		}
		rest = &rest[len..];
	}
	if !rest.is_empty() {
		segments.push(Segment::Key(rest.to_owned()));
	}

	Some((head.to_owned(), segments))
}

/// Length of a leading `[...]` group that contains no nested `[`.
fn bracket_len(text: &str) -> Option<usize> {
	let inner = text.strip_prefix('[')?;
	let close = inner.find(']')?;
	if inner[..close].contains('[') {
		return None;
	}
	Some(close + 2)
}

fn insert_into_map(
	map: &mut BTreeMap<String, Node>,
	key: String,
	segments: &[Segment],
	value: String,
	limit: usize,
) -> bool {
	match map.get_mut(&key) {
		Some(existing) => existing.merge(segments, value, limit),
		None => match Node::build(segments, value, limit) {
			Some(node) => {
				map.insert(key, node);
				true
			}
			None => false,
		},
	}
}

fn push(items: &mut BTreeMap<usize, Node>, node: Node, limit: usize) -> bool {
	let next = items.last_key_value().map_or(0, |(index, _)| index + 1);
	if next >= limit {
		return false;
	}
	items.insert(next, node);
	true
}

impl Node {
	fn build(segments: &[Segment], value: String, limit: usize) -> Option<Self> {
		let Some((first, rest)) = segments.split_first() else {
			return Some(Self::Leaf(value));
		};
		match first {
			Segment::Key(key) => {
				let child = Self::build(rest, value, limit)?;
				Some(Self::Map(BTreeMap::from([(key.clone(), child)])))
			}
			Segment::Index(index) if *index < limit => {
				let child = Self::build(rest, value, limit)?;
				Some(Self::Seq(BTreeMap::from([(*index, child)])))
			}
			Segment::Push if limit > 0 => {
				let child = Self::build(rest, value, limit)?;
				Some(Self::Seq(BTreeMap::from([(0, child)])))
			}
			Segment::Index(_) | Segment::Push => None,
		}
	}

	fn merge(&mut self, segments: &[Segment], value: String, limit: usize) -> bool {
		if let Self::Leaf(_) = self {
			return self.absorb_into_leaf(segments, value, limit);
		}

		let Some((first, rest)) = segments.split_first() else {
			return match self {
				Self::Seq(items) => push(items, Self::Leaf(value), limit),
				_ => false,
			};
		};

		match first {
			Segment::Push => match (self, Self::build(rest, value, limit)) {
				(Self::Seq(items), Some(child)) => push(items, child, limit),
				_ => false,
			},
			Segment::Index(index) => match self {
				Self::Seq(items) => {
					if *index >= limit {
						return false;
					}
					match items.get_mut(index) {
						Some(child) => child.merge(rest, value, limit),
						None => match Self::build(rest, value, limit) {
							Some(child) => {
								items.insert(*index, child);
								true
							}
							None => false,
						},
					}
				}
				Self::Map(map) => insert_into_map(map, index.to_string(), rest, value, limit),
				Self::Leaf(_) => false,
			},
			Segment::Key(key) => {
				if let Self::Seq(_) = self {
					self.promote_to_map();
				}
				match self {
					Self::Map(map) => insert_into_map(map, key.clone(), rest, value, limit),
					_ => false,
				}
			}
		}
	}

	/// A repeated name turns a plain value into a list holding both.
	fn absorb_into_leaf(&mut self, segments: &[Segment], value: String, limit: usize) -> bool {
		if limit < 2 {
			return false;
		}
		let Some(incoming) = Self::build(segments, value, limit) else {
			return false;
		};
		let existing = match mem::replace(self, Self::Seq(BTreeMap::new())) {
			Self::Leaf(existing) => existing,
			other => {
				*self = other;
				return false;
			}
		};

		let mut items = BTreeMap::from([(0, Self::Leaf(existing))]);
		match incoming {
			Self::Seq(values) => {
				for child in values.into_values() {
					push(&mut items, child, limit);
				}
			}
			other => {
				push(&mut items, other, limit);
			}
		}
		*self = Self::Seq(items);
		true
	}

	/// Named keys on a list turn it into a map keyed by the old indices.
	fn promote_to_map(&mut self) {
		if let Self::Seq(items) = mem::replace(self, Self::Map(BTreeMap::new())) {
			*self = Self::Map(
				items
					.into_iter()
					.map(|(index, node)| (index.to_string(), node))
					.collect(),
			);
		}
	}

	fn into_value(self) -> QueryValue {
		match self {
			Self::Leaf(value) => QueryValue::String(value),
			Self::Seq(items) => QueryValue::List(items.into_values().map(Self::into_value).collect()),
			Self::Map(map) => QueryValue::Map(
				map.into_iter()
					.map(|(key, node)| (key, node.into_value()))
					.collect(),
			),
		}
	}
}
