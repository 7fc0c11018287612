// src/data/querydata.rs

//! Decode the URL-query-encoded data field of a server access log line into a
//! [`QueryData`] map.
//!
//! There is one canonical decode: split on `'&'`, split each pair on the
//! first `'='`, then percent-decode the key and the value once.
//!
//! [`QueryData`]: crate::data::querydata::QueryData

use std::collections::BTreeMap;
use std::fmt;

use ::percent_encoding::percent_decode_str;
#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

/// Decoded key/value pairs of a query-encoded field.
pub type QueryData = BTreeMap<String, String>;

/// Server log placeholder for "no data".
pub const QUERY_DATA_NONE: &str = "-";

/// Separator between pairs.
pub const PAIR_SEPARATOR: char = '&';

/// Separator between key and value.
pub const KEY_VALUE_SEPARATOR: char = '=';

/// Failure to decode a query-encoded field.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum QueryDataError {
    /// A pair has no `'='`; holds the offending pair.
    MissingEquals(String),
    /// Percent-decoding produced bytes that are not UTF-8; holds the
    /// offending text.
    InvalidUtf8(String),
}

impl fmt::Display for QueryDataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryDataError::MissingEquals(pair) => {
                write!(f, "query data pair {:?} has no {:?}", pair, KEY_VALUE_SEPARATOR)
            }
            QueryDataError::InvalidUtf8(text) => {
                write!(f, "query data {:?} does not percent-decode to UTF-8", text)
            }
        }
    }
}

impl std::error::Error for QueryDataError {}

/// Percent-decode `text` once.
fn percent_decode_once(text: &str) -> Result<String, QueryDataError> {
    match percent_decode_str(text).decode_utf8() {
        Ok(cow) => Ok(cow.into_owned()),
        Err(_err) => {
            defñ!("decode_utf8 failed {:?}: {}", text, _err);
            Err(QueryDataError::InvalidUtf8(text.to_string()))
        }
    }
}

/// Decode a query-encoded `field`, e.g. `p=42&s=%7B%7D`.
///
/// A `field` that is empty or the placeholder `"-"` decodes to an empty map.
/// An empty pair (e.g. a trailing `'&'`) has no `'='` so it is
/// [`MissingEquals`]. A later duplicate key replaces an earlier one.
///
/// [`MissingEquals`]: self::QueryDataError::MissingEquals
pub fn decode_query_data(field: &str) -> Result<QueryData, QueryDataError> {
    defn!("({:?})", field);
    let mut data = QueryData::new();
    if field.is_empty() || field == QUERY_DATA_NONE {
        defx!("no data");
        return Ok(data);
    }
    for pair in field.split(PAIR_SEPARATOR) {
        let (key, value) = match pair.split_once(KEY_VALUE_SEPARATOR) {
            Some(kv) => kv,
            None => {
                defx!("pair {:?} missing {:?}", pair, KEY_VALUE_SEPARATOR);
                return Err(QueryDataError::MissingEquals(pair.to_string()));
            }
        };
        data.insert(percent_decode_once(key)?, percent_decode_once(value)?);
    }
    defx!("decoded {} pairs", data.len());

    Ok(data)
}
