//! Bracketed query-string codec.
//!
//! Parameter names may carry nested paths such as `refinementList[track][0]`.
//! [`decode`] turns a raw query string into a [`QueryValue`] tree and
//! [`encode`] produces the canonical text for a tree. Lists are bounded by
//! [`CodecOptions::array_limit`]; anything past the bound is truncated on
//! decode rather than rejected.

mod decode;
mod encode;
mod options;
mod value;

pub use decode::{decode, decode_with_named_maps};
pub use encode::encode;
pub use options::{CodecOptions, DEFAULT_ARRAY_LIMIT, DEFAULT_DEPTH, DEFAULT_PARAMETER_LIMIT};
pub use value::{QueryMap, QueryValue};
