use url::form_urlencoded::{self, Serializer};

use super::value::{QueryMap, QueryValue};

/// Encode a parameter tree as a canonical query string without a leading `?`.
///
/// Keys come out in map order and list elements carry explicit indices, so
/// equal trees always produce the same text. Empty lists and maps produce no
/// pairs.
pub fn encode(params: &QueryMap) -> String {
	let mut serializer = form_urlencoded::Serializer::new(String::new());
	for (key, value) in params {
		append(&mut serializer, key.clone(), value);
	}
	serializer.finish()
}

fn append(serializer: &mut Serializer<'_, String>, path: String, value: &QueryValue) {
	match value {
		QueryValue::String(text) => {
			serializer.append_pair(&path, text);
		}
		QueryValue::List(items) => {
			for (index, item) in items.iter().enumerate() {
				append(serializer, format!("{path}[{index}]"), item);
			}
		}
		QueryValue::Map(map) => {
			for (key, item) in map {
				append(serializer, format!("{path}[{key}]"), item);
			}
		}
	}
}
