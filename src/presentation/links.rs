//! Percent-encoding for ids placed in paths and hints placed in query strings.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Everything but RFC 3986 unreserved characters.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// A query value may keep `/` readable; `&`, `=`, `?`, `#` and `%` are escaped.
const QUERY_VALUE: &AsciiSet = &PATH_SEGMENT.remove(b'/');

/// Encode `raw` so it stays a single path segment.
pub fn path_segment(raw: &str) -> String {
    utf8_percent_encode(raw, PATH_SEGMENT).to_string()
}

/// Encode `raw` so it stays a single query parameter value.
pub fn query_value(raw: &str) -> String {
    utf8_percent_encode(raw, QUERY_VALUE).to_string()
}
